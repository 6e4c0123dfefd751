pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::VocabularyConfig};
pub use core::{
    etl::RenderEngine,
    mapper::{MatchOptions, SelectionPolicy, TermMapper},
    pipeline::RenderPipeline,
    vocabulary::Vocabulary,
};
pub use domain::model::{ConceptTerm, Domain, PatternDocument};
pub use utils::error::{MapperError, Result};
