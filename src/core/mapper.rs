use crate::core::vocabulary::Vocabulary;
use crate::domain::model::{ConceptTerm, Domain};
use crate::utils::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::{Captures, Regex, RegexBuilder};

/// Which candidate phrase to use when a concept term has alternates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// Always the preferred (first) phrase. Deterministic.
    #[default]
    First,
    /// A uniformly random phrase per occurrence. A seed makes the draw reproducible.
    Random { seed: Option<u64> },
    /// The phrase at this 0-based index, or the preferred phrase when a term has fewer candidates.
    Index(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchOptions {
    /// Match `Domain` as well as `domain`. Off by default.
    pub case_insensitive: bool,
}

enum Chooser {
    First,
    Random(StdRng),
    Index(usize),
}

impl Chooser {
    fn new(policy: SelectionPolicy) -> Self {
        match policy {
            SelectionPolicy::First => Chooser::First,
            SelectionPolicy::Random { seed: Some(seed) } => {
                Chooser::Random(StdRng::seed_from_u64(seed))
            }
            SelectionPolicy::Random { seed: None } => Chooser::Random(StdRng::from_entropy()),
            SelectionPolicy::Index(i) => Chooser::Index(i),
        }
    }

    fn pick<'a>(&mut self, phrases: &'a [String]) -> &'a str {
        let index = match self {
            Chooser::First => 0,
            Chooser::Random(rng) => rng.gen_range(0..phrases.len()),
            Chooser::Index(i) if *i < phrases.len() => *i,
            Chooser::Index(i) => {
                tracing::debug!(
                    "Candidate index {} out of range ({} candidates), using preferred phrase",
                    i,
                    phrases.len()
                );
                0
            }
        };
        &phrases[index]
    }
}

/// Rewrites generic concept terms in free-form text into a domain's vocabulary.
///
/// Matching is whole-word: `domain` is replaced, `domains` is not. Surrounding
/// punctuation is never part of a token. The mapper holds no mutable state and
/// can be shared across threads.
#[derive(Debug, Clone)]
pub struct TermMapper {
    vocabulary: Vocabulary,
    pattern: Regex,
    options: MatchOptions,
}

impl TermMapper {
    pub fn new(vocabulary: Vocabulary, options: MatchOptions) -> Self {
        let alternation = ConceptTerm::ALL
            .iter()
            .map(|t| regex::escape(t.as_str()))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = RegexBuilder::new(&format!(r"\b(?:{})\b", alternation))
            .case_insensitive(options.case_insensitive)
            .build()
            .expect("concept term alternation is a valid regex");

        Self {
            vocabulary,
            pattern,
            options,
        }
    }

    pub fn builtin() -> Self {
        Self::new(Vocabulary::builtin().clone(), MatchOptions::default())
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Candidates for a domain and concept term given by name.
    ///
    /// The domain is checked before the term, so a call with both invalid
    /// reports `UnknownDomain`.
    pub fn lookup(&self, domain: &str, concept_term: &str) -> Result<&[String]> {
        let domain: Domain = domain.parse()?;
        let term: ConceptTerm = concept_term.parse()?;
        Ok(self.candidates(domain, term))
    }

    pub fn candidates(&self, domain: Domain, term: ConceptTerm) -> &[String] {
        self.vocabulary.phrases(domain, term)
    }

    /// Parses `domain` and rewrites `text`. Fails only on an unknown domain,
    /// before any substitution happens.
    pub fn transform(&self, text: &str, domain: &str, policy: SelectionPolicy) -> Result<String> {
        let domain: Domain = domain.parse()?;
        Ok(self.transform_in(text, domain, policy))
    }

    pub fn transform_in(&self, text: &str, domain: Domain, policy: SelectionPolicy) -> String {
        let mut chooser = Chooser::new(policy);
        let mut substitutions = 0usize;

        let output = self.pattern.replace_all(text, |caps: &Captures| {
            let token = &caps[0];
            let term = match self.term_for(token) {
                Some(term) => term,
                None => return token.to_string(),
            };

            substitutions += 1;
            let phrase = chooser.pick(self.vocabulary.phrases(domain, term));

            if self.options.case_insensitive && starts_uppercase(token) {
                capitalize(phrase)
            } else {
                phrase.to_string()
            }
        });

        tracing::debug!(
            "Substituted {} concept term(s) for {} domain",
            substitutions,
            domain
        );
        output.into_owned()
    }

    fn term_for(&self, token: &str) -> Option<ConceptTerm> {
        if self.options.case_insensitive {
            token.to_lowercase().parse().ok()
        } else {
            token.parse().ok()
        }
    }
}

impl Default for TermMapper {
    fn default() -> Self {
        Self::builtin()
    }
}

fn starts_uppercase(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_uppercase)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::MapperError;

    #[test]
    fn test_social_scenario() {
        let mapper = TermMapper::builtin();
        let out = mapper
            .transform(
                "Improve the organization of elements within the domain.",
                "Social",
                SelectionPolicy::First,
            )
            .unwrap();
        assert_eq!(
            out,
            "Improve the institution of members within the functional domain."
        );
    }

    #[test]
    fn test_whole_word_only() {
        let mapper = TermMapper::builtin();
        assert_eq!(
            mapper
                .transform("domains are large", "physical", SelectionPolicy::First)
                .unwrap(),
            "domains are large"
        );
        assert_eq!(
            mapper
                .transform("the domain is large", "physical", SelectionPolicy::First)
                .unwrap(),
            "the region is large"
        );
        assert_eq!(
            mapper.transform_in("subdomain, organizational", Domain::Physical, SelectionPolicy::First),
            "subdomain, organizational"
        );
    }

    #[test]
    fn test_punctuation_is_not_part_of_token() {
        let mapper = TermMapper::builtin();
        let out = mapper.transform_in(
            "(elements), resources; relationships!",
            Domain::Physical,
            SelectionPolicy::First,
        );
        assert_eq!(out, "(materials), land; roads!");
        assert_eq!(
            mapper.transform_in("domain-specific", Domain::Physical, SelectionPolicy::First),
            "region-specific"
        );
    }

    #[test]
    fn test_case_sensitive_by_default() {
        let mapper = TermMapper::builtin();
        let out = mapper.transform_in("Domain and domain", Domain::Physical, SelectionPolicy::First);
        assert_eq!(out, "Domain and region");
    }

    #[test]
    fn test_case_insensitive_extension() {
        let mapper = TermMapper::new(
            Vocabulary::builtin().clone(),
            MatchOptions {
                case_insensitive: true,
            },
        );
        let out = mapper.transform_in(
            "Domain and domain and ELEMENTS",
            Domain::Physical,
            SelectionPolicy::First,
        );
        assert_eq!(out, "Region and region and Materials");
    }

    #[test]
    fn test_index_policy_with_fallback() {
        let mapper = TermMapper::builtin();
        // Physical domain has four candidates, Social relationships only three.
        assert_eq!(
            mapper.transform_in("domain", Domain::Physical, SelectionPolicy::Index(3)),
            "environment"
        );
        assert_eq!(
            mapper.transform_in("relationships", Domain::Social, SelectionPolicy::Index(3)),
            "communications"
        );
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let mapper = TermMapper::builtin();
        let text = "domain elements frameworks resources relationships organization";
        let policy = SelectionPolicy::Random { seed: Some(42) };

        let a = mapper.transform_in(text, Domain::Conceptual, policy);
        let b = mapper.transform_in(text, Domain::Conceptual, policy);
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_picks_a_candidate() {
        let mapper = TermMapper::builtin();
        let candidates = mapper.candidates(Domain::Psychic, ConceptTerm::Elements);
        for _ in 0..20 {
            let out = mapper.transform_in(
                "elements",
                Domain::Psychic,
                SelectionPolicy::Random { seed: None },
            );
            assert!(candidates.iter().any(|c| *c == out));
        }
    }

    #[test]
    fn test_lookup_errors() {
        let mapper = TermMapper::builtin();
        assert!(matches!(
            mapper.lookup("martian", "domain"),
            Err(MapperError::UnknownDomain { .. })
        ));
        assert!(matches!(
            mapper.lookup("physical", "widgets"),
            Err(MapperError::UnknownConceptTerm { .. })
        ));
        assert!(matches!(
            mapper.lookup("martian", "widgets"),
            Err(MapperError::UnknownDomain { .. })
        ));
        assert_eq!(mapper.lookup("social", "elements").unwrap()[0], "members");
    }

    #[test]
    fn test_transform_rejects_unknown_domain() {
        let mapper = TermMapper::builtin();
        assert!(matches!(
            mapper.transform("the domain", "Atlantis", SelectionPolicy::First),
            Err(MapperError::UnknownDomain { .. })
        ));
    }
}
