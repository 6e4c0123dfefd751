use crate::domain::model::{Domain, PatternDocument, Section};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^# (\d+) - (.+?)\s*$").expect("title regex is valid"));

impl PatternDocument {
    /// Parses a catalog pattern in the `# <id> - <name>` / `## <Section>` layout.
    ///
    /// Returns `None` when the document has no title line. Unrecognized `##`
    /// headings close the current section and are otherwise ignored.
    pub fn parse(content: &str) -> Option<Self> {
        let caps = TITLE.captures(content)?;
        let id = caps[1].to_string();
        let name = caps[2].to_string();

        let mut sections = BTreeMap::new();
        let mut current: Option<(Section, Vec<&str>)> = None;

        for line in content.lines() {
            if let Some(heading) = line.strip_prefix("## ") {
                if let Some((section, body)) = current.take() {
                    sections.insert(section, body.join("\n").trim().to_string());
                }
                current = Section::from_heading(heading).map(|s| (s, Vec::new()));
                continue;
            }

            if let Some((_, body)) = current.as_mut() {
                body.push(line);
            }
        }

        if let Some((section, body)) = current {
            sections.insert(section, body.join("\n").trim().to_string());
        }

        Some(Self { id, name, sections })
    }
}

fn quote(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Side-by-side report of how each pattern reads in the generic template and in every domain.
///
/// `entries` pairs the source file name with its parsed document. Empty sections are left out.
pub fn variation_report(entries: &[(String, PatternDocument)]) -> String {
    let mut out = String::from("# Domain Variation Examples\n\n");
    out.push_str("Examples showing how the same organizational pattern concept is expressed differently across the domains.\n\n");

    for (source, document) in entries {
        out.push_str(&format!("## {}\n\n*Source: {}*\n\n", document.name, source));

        if let Some(template) = document.template() {
            out.push_str(&format!("### Template (Generic)\n{}\n\n", quote(template)));
        }

        for domain in Domain::ALL {
            if let Some(text) = document.domain_section(domain) {
                out.push_str(&format!("### {} Domain\n{}\n\n", domain, quote(text)));
            }
        }

        out.push_str("---\n\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# 12610010 - Independent domains

## Template

Independent domains of organization should be distinguished within the domain.

## Physical

Independent regions should be distinguished.

## Notes

Not a recognized section.

## Psychic

Independent modes of awareness.
";

    #[test]
    fn test_parse_title_and_sections() {
        let doc = PatternDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.id, "12610010");
        assert_eq!(doc.name, "Independent domains");
        assert_eq!(
            doc.template(),
            Some("Independent domains of organization should be distinguished within the domain.")
        );
        assert_eq!(
            doc.domain_section(Domain::Physical),
            Some("Independent regions should be distinguished.")
        );
        assert_eq!(
            doc.domain_section(Domain::Psychic),
            Some("Independent modes of awareness.")
        );
        assert_eq!(doc.domain_section(Domain::Social), None);
        assert_eq!(doc.sections.len(), 3);
    }

    #[test]
    fn test_untitled_document() {
        assert!(PatternDocument::parse("## Template\n\nno title here").is_none());
    }

    #[test]
    fn test_empty_template_counts_as_missing() {
        let doc = PatternDocument::parse("# 7 - Empty\n\n## Template\n\n## Social\n\ntext").unwrap();
        assert_eq!(doc.template(), None);
        assert_eq!(doc.domain_section(Domain::Social), Some("text"));
    }

    #[test]
    fn test_variation_report() {
        let doc = PatternDocument::parse(SAMPLE).unwrap();
        let report = variation_report(&[("12610010.md".to_string(), doc)]);

        assert!(report.starts_with("# Domain Variation Examples\n\n"));
        assert!(report.contains("## Independent domains\n\n*Source: 12610010.md*\n\n"));
        assert!(report.contains(
            "### Template (Generic)\n> Independent domains of organization should be distinguished within the domain.\n\n"
        ));
        assert!(report.contains("### Physical Domain\n> Independent regions should be distinguished.\n\n"));
        assert!(report.contains("### Psychic Domain\n> Independent modes of awareness.\n\n"));
        assert!(!report.contains("### Social Domain"));
        assert!(!report.contains("Not a recognized section"));
        assert!(report.ends_with("---\n\n"));

        // Physical 必須排在 Psychic 之前
        let physical = report.find("### Physical Domain").unwrap();
        let psychic = report.find("### Psychic Domain").unwrap();
        assert!(physical < psychic);
    }

    #[test]
    fn test_variation_report_quotes_every_line() {
        let doc = PatternDocument::parse("# 3 - Multi\n\n## Template\n\nfirst line\n\nsecond line\n").unwrap();
        let report = variation_report(&[("3.md".to_string(), doc)]);
        assert!(report.contains("### Template (Generic)\n> first line\n>\n> second line\n\n"));
    }
}
