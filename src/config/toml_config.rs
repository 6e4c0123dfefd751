use crate::core::vocabulary::Vocabulary;
use crate::domain::model::{ConceptTerm, Domain};
use crate::utils::error::{MapperError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Vocabulary table as written in a TOML file: one table per domain, one array per concept term.
///
/// ```toml
/// [physical]
/// domain = ["region", "area"]
/// organization = ["building"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VocabularyConfig {
    pub domains: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl VocabularyConfig {
    /// 從 TOML 檔案載入詞彙表
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MapperError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析詞彙表
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| MapperError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${REGION_TERM})
    fn substitute_env_vars(content: &str) -> String {
        use once_cell::sync::Lazy;
        use regex::Regex;

        static ENV_VAR: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var regex is valid"));

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 轉換成不可變的詞彙表，並檢查每個領域與概念詞都齊全
    pub fn to_vocabulary(&self) -> Result<Vocabulary> {
        let mut entries: BTreeMap<Domain, BTreeMap<ConceptTerm, Vec<String>>> = BTreeMap::new();

        for (domain_name, terms) in &self.domains {
            let domain: Domain = domain_name.parse()?;
            let slot = entries.entry(domain).or_default();

            for (term_name, phrases) in terms {
                let term: ConceptTerm = term_name.parse()?;
                let phrases = phrases.iter().map(|p| p.trim().to_string()).collect();
                slot.insert(term, phrases);
            }
        }

        Vocabulary::from_entries(entries)
    }
}

impl From<&Vocabulary> for VocabularyConfig {
    fn from(vocabulary: &Vocabulary) -> Self {
        let mut domains: BTreeMap<String, BTreeMap<String, Vec<String>>> = BTreeMap::new();
        for (domain, term, phrases) in vocabulary.iter() {
            domains
                .entry(domain.key().to_string())
                .or_default()
                .insert(term.to_string(), phrases.to_vec());
        }
        Self { domains }
    }
}

impl Validate for VocabularyConfig {
    fn validate(&self) -> Result<()> {
        self.to_vocabulary().map(|_| ())
    }
}
