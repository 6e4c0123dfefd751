pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::{
    CliConfig, Command, LookupArgs, PolicyArg, PolicyArgs, RenderArgs, TransformArgs, VariationsArgs,
};

#[cfg(feature = "cli")]
mod args {
    use crate::core::mapper::{MatchOptions, SelectionPolicy, TermMapper};
    use crate::core::vocabulary::Vocabulary;
    use crate::core::ConfigProvider;
    use crate::domain::model::Domain;
    use crate::utils::error::{MapperError, Result};
    use crate::utils::validation::{validate_file_extensions, validate_path, Validate};
    use clap::{Args, Parser, Subcommand, ValueEnum};
    use serde::{Deserialize, Serialize};

    use super::toml_config::VocabularyConfig;

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "archetype-mapper")]
    #[command(about = "Rewrite generic pattern text into Physical, Social, Conceptual or Psychic vocabulary")]
    pub struct CliConfig {
        #[arg(long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Emit logs as JSON")]
        pub json_logs: bool,

        /// TOML vocabulary table replacing the built-in one
        #[arg(long, global = true)]
        pub vocabulary: Option<String>,

        /// Also match capitalized concept terms (e.g. "Domain")
        #[arg(long, global = true)]
        pub case_insensitive: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
    pub enum Command {
        /// Rewrite text (argument, --file, or stdin) into a domain's vocabulary
        Transform(TransformArgs),
        /// Show the candidate phrases for a domain and concept term
        Lookup(LookupArgs),
        /// Print the vocabulary table as markdown
        Table,
        /// Render every pattern document in a directory
        Render(RenderArgs),
        /// Compare each pattern's template with its catalog domain sections
        Variations(VariationsArgs),
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
    pub enum PolicyArg {
        First,
        Random,
        Index,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, Args)]
    pub struct PolicyArgs {
        #[arg(long, value_enum, default_value = "first")]
        pub policy: PolicyArg,

        /// Candidate index for --policy index (0-based)
        #[arg(long, default_value = "0")]
        pub index: usize,

        /// Seed for --policy random
        #[arg(long)]
        pub seed: Option<u64>,
    }

    impl PolicyArgs {
        pub fn selection_policy(&self) -> SelectionPolicy {
            match self.policy {
                PolicyArg::First => SelectionPolicy::First,
                PolicyArg::Random => SelectionPolicy::Random { seed: self.seed },
                PolicyArg::Index => SelectionPolicy::Index(self.index),
            }
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize, Args)]
    pub struct TransformArgs {
        #[arg(long)]
        pub domain: String,

        #[command(flatten)]
        pub policy: PolicyArgs,

        /// Read the text from a markdown or plain text file
        #[arg(long, conflicts_with = "text")]
        pub file: Option<String>,

        pub text: Option<String>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, Args)]
    pub struct LookupArgs {
        #[arg(long)]
        pub domain: String,

        #[arg(long)]
        pub term: String,

        #[arg(long, help = "Print the candidates as a JSON array")]
        pub json: bool,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, Args)]
    pub struct RenderArgs {
        /// Directory holding the pattern markdown files
        #[arg(long)]
        pub input: String,

        #[arg(long, default_value = "./rendered")]
        pub output: String,

        #[arg(long, value_delimiter = ',', default_value = "physical,social,conceptual,psychic")]
        pub domains: Vec<String>,

        #[command(flatten)]
        pub policy: PolicyArgs,

        #[arg(long, help = "Also write renderings.zip")]
        pub bundle: bool,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, Args)]
    pub struct VariationsArgs {
        /// Directory holding the pattern markdown files
        #[arg(long)]
        pub input: String,

        /// Only these files (e.g. 12610010.md,12610020.md); all markdown files when empty
        #[arg(long, value_delimiter = ',')]
        pub patterns: Vec<String>,

        /// Write the report to this file instead of stdout
        #[arg(long)]
        pub output: Option<String>,
    }

    impl Validate for VariationsArgs {
        fn validate(&self) -> Result<()> {
            validate_path("input", &self.input)?;
            validate_file_extensions("patterns", &self.patterns, &["md"])?;
            if let Some(output) = &self.output {
                validate_path("output", output)?;
            }
            Ok(())
        }
    }

    impl CliConfig {
        /// Builds the mapper from `--vocabulary` (or the built-in table) and `--case-insensitive`.
        pub fn build_mapper(&self) -> Result<TermMapper> {
            let vocabulary = match &self.vocabulary {
                Some(path) => {
                    tracing::info!("📁 Loading vocabulary from: {}", path);
                    VocabularyConfig::from_file(path)?.to_vocabulary()?
                }
                None => Vocabulary::builtin().clone(),
            };

            Ok(TermMapper::new(
                vocabulary,
                MatchOptions {
                    case_insensitive: self.case_insensitive,
                },
            ))
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(path) = &self.vocabulary {
                validate_path("vocabulary", path)?;
                validate_file_extensions("vocabulary", std::slice::from_ref(path), &["toml"])?;
            }

            match &self.command {
                Command::Transform(args) => {
                    args.domain.parse::<Domain>()?;
                    if let Some(file) = &args.file {
                        validate_path("file", file)?;
                        validate_file_extensions("file", std::slice::from_ref(file), &["md", "txt"])?;
                    }
                }
                Command::Lookup(_) | Command::Table => {}
                Command::Render(args) => args.validate()?,
                Command::Variations(args) => args.validate()?,
            }

            Ok(())
        }
    }

    impl Validate for RenderArgs {
        fn validate(&self) -> Result<()> {
            validate_path("input", &self.input)?;
            validate_path("output", &self.output)?;

            if self.domains.is_empty() {
                return Err(MapperError::ValidationError {
                    message: "At least one domain must be rendered".to_string(),
                });
            }
            for domain in &self.domains {
                domain.parse::<Domain>()?;
            }

            Ok(())
        }
    }

    impl ConfigProvider for RenderArgs {
        fn input_path(&self) -> &str {
            &self.input
        }

        fn output_path(&self) -> &str {
            &self.output
        }

        fn domains(&self) -> Vec<Domain> {
            // 已在 validate 檢查過，無法解析的名稱直接略過
            let mut domains: Vec<Domain> =
                self.domains.iter().filter_map(|d| d.parse().ok()).collect();
            domains.sort();
            domains.dedup();
            domains
        }

        fn selection_policy(&self) -> SelectionPolicy {
            self.policy.selection_policy()
        }

        fn bundle(&self) -> bool {
            self.bundle
        }
    }

}
