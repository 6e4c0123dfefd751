use crate::utils::error::MapperError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One of the four abstraction categories a generic pattern can be specialized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Physical,
    Social,
    Conceptual,
    Psychic,
}

impl Domain {
    pub const ALL: [Domain; 4] = [
        Domain::Physical,
        Domain::Social,
        Domain::Conceptual,
        Domain::Psychic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Physical => "Physical",
            Domain::Social => "Social",
            Domain::Conceptual => "Conceptual",
            Domain::Psychic => "Psychic",
        }
    }

    /// Lower-case key used in vocabulary files and output directories.
    pub fn key(&self) -> &'static str {
        match self {
            Domain::Physical => "physical",
            Domain::Social => "social",
            Domain::Conceptual => "conceptual",
            Domain::Psychic => "psychic",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = MapperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Domain::ALL
            .into_iter()
            .find(|d| d.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| MapperError::UnknownDomain {
                value: s.to_string(),
            })
    }
}

/// Domain-neutral vocabulary key found in pattern templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConceptTerm {
    Domain,
    Organization,
    Elements,
    Frameworks,
    Resources,
    Relationships,
}

impl ConceptTerm {
    pub const ALL: [ConceptTerm; 6] = [
        ConceptTerm::Domain,
        ConceptTerm::Organization,
        ConceptTerm::Elements,
        ConceptTerm::Frameworks,
        ConceptTerm::Resources,
        ConceptTerm::Relationships,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConceptTerm::Domain => "domain",
            ConceptTerm::Organization => "organization",
            ConceptTerm::Elements => "elements",
            ConceptTerm::Frameworks => "frameworks",
            ConceptTerm::Resources => "resources",
            ConceptTerm::Relationships => "relationships",
        }
    }
}

impl fmt::Display for ConceptTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConceptTerm {
    type Err = MapperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConceptTerm::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| MapperError::UnknownConceptTerm {
                value: s.to_string(),
            })
    }
}

/// Named `##` sections a catalog pattern may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    Template,
    Domain(Domain),
}

impl Section {
    pub fn from_heading(heading: &str) -> Option<Self> {
        let heading = heading.trim();
        if heading.eq_ignore_ascii_case("template") {
            return Some(Section::Template);
        }
        heading.parse::<Domain>().ok().map(Section::Domain)
    }
}

/// A catalog pattern document parsed from markdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternDocument {
    pub id: String,
    pub name: String,
    pub sections: BTreeMap<Section, String>,
}

impl PatternDocument {
    pub fn template(&self) -> Option<&str> {
        self.sections
            .get(&Section::Template)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn domain_section(&self, domain: Domain) -> Option<&str> {
        self.sections
            .get(&Section::Domain(domain))
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// One pattern rendered into one domain's vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedPattern {
    pub id: String,
    pub name: String,
    pub domain: Domain,
    pub markdown: String,
}

impl RenderedPattern {
    /// Relative output path, e.g. `social/12610010.md`.
    pub fn relative_path(&self) -> String {
        format!("{}/{}.md", self.domain.key(), self.id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExtractResult {
    pub documents: Vec<PatternDocument>,
    pub skipped_untitled: usize,
    /// Later documents reusing an id already seen in this run.
    pub skipped_duplicate: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub rendered: Vec<RenderedPattern>,
    pub skipped_no_template: usize,
    pub skipped_untitled: usize,
    pub skipped_duplicate: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderSummary {
    pub rendered: usize,
    pub skipped_no_template: usize,
    pub skipped_untitled: usize,
    pub skipped_duplicate: usize,
    pub output_path: String,
}
