use crate::domain::model::{ConceptTerm, Domain};
use crate::utils::error::{MapperError, Result};
use crate::utils::validation::validate_phrase_list;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

type Entry = (Domain, ConceptTerm, &'static [&'static str]);

const BUILTIN_ENTRIES: &[Entry] = &[
    // Physical
    (Domain::Physical, ConceptTerm::Domain, &["region", "area", "land", "environment"]),
    (Domain::Physical, ConceptTerm::Organization, &["building", "settlement", "structure", "development"]),
    (Domain::Physical, ConceptTerm::Elements, &["materials", "rooms", "spaces", "buildings"]),
    (Domain::Physical, ConceptTerm::Frameworks, &["cities", "towns", "infrastructure", "urban areas"]),
    (Domain::Physical, ConceptTerm::Resources, &["land", "fertility", "agriculture", "natural resources"]),
    (Domain::Physical, ConceptTerm::Relationships, &["roads", "connections", "networks", "proximity"]),
    // Social
    (Domain::Social, ConceptTerm::Domain, &["functional domain", "community", "group", "organization"]),
    (Domain::Social, ConceptTerm::Organization, &["institution", "group", "community", "network"]),
    (Domain::Social, ConceptTerm::Elements, &["members", "participants", "roles", "positions"]),
    (Domain::Social, ConceptTerm::Frameworks, &["institutions", "organizations", "systems", "procedures"]),
    (Domain::Social, ConceptTerm::Resources, &["social resources", "human resources", "relationships"]),
    (Domain::Social, ConceptTerm::Relationships, &["communications", "interactions", "connections"]),
    // Conceptual
    (Domain::Conceptual, ConceptTerm::Domain, &["conceptual domain", "knowledge domain", "intellectual area"]),
    (Domain::Conceptual, ConceptTerm::Organization, &["conceptual framework", "knowledge system", "theory"]),
    (Domain::Conceptual, ConceptTerm::Elements, &["concepts", "ideas", "methods", "approaches"]),
    (Domain::Conceptual, ConceptTerm::Frameworks, &["paradigms", "schools of thought", "theoretical systems"]),
    (Domain::Conceptual, ConceptTerm::Resources, &["creative resources", "intellectual resources", "knowledge"]),
    (Domain::Conceptual, ConceptTerm::Relationships, &["conceptual links", "logical connections", "associations"]),
    // Psychic
    (Domain::Psychic, ConceptTerm::Domain, &["mode of awareness", "consciousness", "mental state"]),
    (Domain::Psychic, ConceptTerm::Organization, &["structured awareness", "organized thinking", "mental framework"]),
    (Domain::Psychic, ConceptTerm::Elements, &["perceptions", "impressions", "insights", "experiences"]),
    (Domain::Psychic, ConceptTerm::Frameworks, &["modes of awareness", "mental structures", "psychological patterns"]),
    (Domain::Psychic, ConceptTerm::Resources, &["psychic resources", "mental energy", "awareness"]),
    (Domain::Psychic, ConceptTerm::Relationships, &["associative relationships", "mental connections", "psychological links"]),
];

static BUILTIN: Lazy<Vocabulary> = Lazy::new(|| {
    let mut entries: BTreeMap<Domain, BTreeMap<ConceptTerm, Vec<String>>> = BTreeMap::new();
    for (domain, term, phrases) in BUILTIN_ENTRIES {
        entries
            .entry(*domain)
            .or_default()
            .insert(*term, phrases.iter().map(|p| p.to_string()).collect());
    }
    Vocabulary::from_entries(entries).expect("built-in vocabulary satisfies the table invariants")
});

/// Immutable generic-to-domain vocabulary table.
///
/// Every (domain, concept term) pair is present and maps to a non-empty list of
/// distinct, non-blank phrases; the first phrase is the preferred substitution.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    table: BTreeMap<(Domain, ConceptTerm), Vec<String>>,
}

impl Vocabulary {
    pub fn builtin() -> &'static Vocabulary {
        &BUILTIN
    }

    pub fn from_entries(
        mut entries: BTreeMap<Domain, BTreeMap<ConceptTerm, Vec<String>>>,
    ) -> Result<Self> {
        let mut table = BTreeMap::new();

        for domain in Domain::ALL {
            let mut terms = entries
                .remove(&domain)
                .ok_or_else(|| MapperError::MissingConfigError {
                    field: domain.key().to_string(),
                })?;

            for term in ConceptTerm::ALL {
                let field = format!("{}.{}", domain.key(), term);
                let phrases = terms
                    .remove(&term)
                    .ok_or_else(|| MapperError::MissingConfigError {
                        field: field.clone(),
                    })?;
                validate_phrase_list(&field, &phrases)?;
                table.insert((domain, term), phrases);
            }
        }

        tracing::debug!("Vocabulary built with {} entries", table.len());
        Ok(Self { table })
    }

    /// Ordered candidates for a pair; the first one is preferred.
    ///
    /// Every pair is present once `from_entries` has succeeded.
    pub fn phrases(&self, domain: Domain, term: ConceptTerm) -> &[String] {
        &self.table[&(domain, term)]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Domain, ConceptTerm, &[String])> {
        self.table
            .iter()
            .map(|((domain, term), phrases)| (*domain, *term, phrases.as_slice()))
    }

    /// Markdown report with one `Generic Concept | Domain-Specific Terms` table per domain.
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("# Generic to Domain-Specific Transformation Patterns\n\n");
        out.push_str(
            "Common word/concept transformations from generic template to specific domains.\n\n",
        );

        for domain in Domain::ALL {
            out.push_str(&format!("## {} Transformations\n\n", domain));
            out.push_str("| Generic Concept | Domain-Specific Terms |\n");
            out.push_str("|-----------------|----------------------|\n");
            for term in ConceptTerm::ALL {
                out.push_str(&format!(
                    "| {} | {} |\n",
                    term,
                    self.phrases(domain, term).join(", ")
                ));
            }
            out.push('\n');
        }

        out
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
