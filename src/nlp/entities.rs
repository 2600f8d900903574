use super::lexicon::is_function_word;
use super::{Entity, EntityKind, EntityRecognizer, Lexicon};
use std::sync::Arc;

const CONNECTORS: &[&str] = &["of", "the", "for", "de", "von", "van", "la", "del"];

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn is_acronym(word: &str) -> bool {
    word.chars().count() >= 2
        && word.chars().all(|c| c.is_uppercase() || c.is_ascii_digit())
        && word.chars().any(char::is_alphabetic)
}

fn is_quantity(word: &str) -> bool {
    let body = word.strip_suffix('%').unwrap_or(word);
    body.chars().next().is_some_and(|c| c.is_ascii_digit())
        && body
            .chars()
            .all(|c| c.is_ascii_digit() || c == ',' || c == '.')
}

fn ends_clause(raw: &str) -> bool {
    raw.ends_with(['.', ',', ';', ':', '!', '?', ')'])
}

fn ends_sentence(raw: &str) -> bool {
    raw.trim_end_matches(['"', '\'', ')']).ends_with(['.', '!', '?'])
}

/// Capitalisation-driven entity recognizer.
///
/// Proper names are maximal runs of capitalised tokens, optionally joined by
/// lower-case connectors ("Bank of England"). A lone capitalised word at the
/// start of a sentence is only an entity when the lexicon does not know it as
/// an ordinary word. Numbers and percentages are reported as quantities.
pub struct RuleEntityRecognizer {
    lexicon: Arc<dyn Lexicon>,
}

impl RuleEntityRecognizer {
    pub fn new(lexicon: Arc<dyn Lexicon>) -> Self {
        Self { lexicon }
    }
}

impl EntityRecognizer for RuleEntityRecognizer {
    fn entities(&self, text: &str) -> Vec<Entity> {
        let raw: Vec<&str> = text.split_whitespace().collect();
        let words: Vec<&str> = raw
            .iter()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '%'))
            .collect();

        let mut found = Vec::new();
        let mut i = 0;
        while i < words.len() {
            let word = words[i];
            let sentence_start = i == 0 || ends_sentence(raw[i - 1]);

            if word.is_empty() {
                i += 1;
                continue;
            }

            if is_quantity(word) {
                found.push(Entity {
                    text: word.trim_end_matches(['.', ',']).to_string(),
                    kind: EntityKind::Quantity,
                });
                i += 1;
                continue;
            }

            if !is_capitalized(word) || (is_function_word(&word.to_lowercase()) && !is_acronym(word)) {
                i += 1;
                continue;
            }

            // Extend the run over capitalised words and inner connectors.
            let start = i;
            let mut end = i + 1;
            while end < words.len() && !ends_clause(raw[end - 1]) {
                let next = words[end];
                if is_capitalized(next) {
                    end += 1;
                } else if CONNECTORS.contains(&next)
                    && end + 1 < words.len()
                    && !ends_clause(raw[end])
                    && is_capitalized(words[end + 1])
                {
                    end += 2;
                } else {
                    break;
                }
            }

            let single = end - start == 1;
            if single && sentence_start && !is_acronym(word) && self.lexicon.contains(word) {
                i = end;
                continue;
            }

            let kind = if single && is_acronym(word) {
                EntityKind::Acronym
            } else {
                EntityKind::Proper
            };
            found.push(Entity {
                text: words[start..end].join(" "),
                kind,
            });
            i = end;
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::lexicon::WordListLexicon;

    fn recognizer() -> RuleEntityRecognizer {
        RuleEntityRecognizer::new(Arc::new(WordListLexicon::from_words([
            "the", "war", "ended", "in", "paris", "treaty", "was", "signed", "plants",
        ])))
    }

    fn texts(entities: &[Entity]) -> Vec<&str> {
        entities.iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn test_multiword_names_and_connectors() {
        let e = recognizer().entities("The treaty was signed by the Bank of England and Isaac Newton.");
        assert_eq!(texts(&e), vec!["Bank of England", "Isaac Newton"]);
    }

    #[test]
    fn test_sentence_initial_common_word_is_skipped() {
        let e = recognizer().entities("Plants grow. Paris is big. Einstein agreed.");
        // "Paris" is a dictionary word in this lexicon, "Einstein" is not.
        assert_eq!(texts(&e), vec!["Einstein"]);
    }

    #[test]
    fn test_quantities_and_acronyms() {
        let e = recognizer().entities("the war ended in 1945 and NATO grew 12%");
        assert_eq!(texts(&e), vec!["1945", "NATO", "12%"]);
        assert_eq!(e[1].kind, EntityKind::Acronym);
        assert_eq!(e[2].kind, EntityKind::Quantity);
    }
}
