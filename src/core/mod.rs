pub mod catalog;
pub mod etl;
pub mod mapper;
pub mod pipeline;
pub mod vocabulary;

pub use crate::domain::model::{
    ExtractResult, PatternDocument, RenderSummary, RenderedPattern, TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
