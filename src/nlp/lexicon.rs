use super::grammar::verb_forms;
use super::Lexicon;
use crate::error::{GfResult, GradeForgeError};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

const EMBEDDED_WORDS: &str = include_str!("../../data/dictionary/en_common.txt");

/// Closed-class words: determiners, prepositions, conjunctions, pronouns,
/// auxiliaries and a few frequent adverbs.
pub const FUNCTION_WORDS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
    "their", "some", "any", "no", "every", "each", "all", "both", "either", "neither", "much",
    "many", "more", "most", "few", "less", "least", "several", "such", "what", "which", "whose",
    "who", "whom", "whatever", "whichever", "of", "in", "on", "at", "by", "for", "with", "about",
    "against", "between", "into", "through", "during", "before", "after", "above", "below", "to",
    "from", "up", "down", "out", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "and", "but", "or", "nor", "so", "yet", "if",
    "because", "as", "until", "while", "although", "though", "unless", "since", "than", "whether",
    "not", "only", "own", "same", "too", "very", "just", "also", "even", "still", "already",
    "never", "always", "often", "sometimes", "usually", "however", "therefore", "thus", "hence",
    "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself", "yourself",
    "himself", "herself", "itself", "ourselves", "themselves", "via", "per", "upon", "within",
    "without", "across", "along", "around", "among", "behind", "beyond", "near", "toward",
    "towards", "onto", "inside", "outside", "despite", "except", "like", "unlike",
];

/// Words that can head a subject on their own.
pub const SUBJECT_PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "this", "that", "these", "those", "who",
    "which", "what", "one", "everyone", "everybody", "someone", "somebody", "nobody", "anyone",
    "anybody", "something", "everything", "nothing", "anything", "each", "both", "all", "many",
    "some", "most", "none",
];

pub fn is_function_word(word: &str) -> bool {
    FUNCTION_WORDS.contains(&word)
}

/// A dictionary backed by an in-memory word set.
///
/// Lookups are case-insensitive and tolerate regular inflection: a word is
/// known when it, or its stem after removing a common suffix, is listed.
pub struct WordListLexicon {
    words: HashSet<String>,
}

impl WordListLexicon {
    /// The built-in English list, plus function words and generated verb forms.
    pub fn embedded() -> Self {
        let mut lexicon = Self::from_words(EMBEDDED_WORDS.lines());
        lexicon.extend(FUNCTION_WORDS.iter().copied());
        lexicon.extend(verb_forms().iter().map(String::as_str));
        lexicon
    }

    pub fn from_words<'a, I: IntoIterator<Item = &'a str>>(words: I) -> Self {
        let mut lexicon = Self {
            words: HashSet::new(),
        };
        lexicon.extend(words);
        lexicon
    }

    pub fn extend<'a, I: IntoIterator<Item = &'a str>>(&mut self, words: I) {
        for w in words {
            let w = w.trim();
            if w.is_empty() || w.starts_with('#') {
                continue;
            }
            self.words.insert(w.to_lowercase());
        }
    }

    /// Adds every word of a one-word-per-line file.
    pub fn extend_from_file<P: AsRef<Path>>(&mut self, path: P) -> GfResult<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GradeForgeError::ModelUnavailable(format!(
                "Could not read dictionary '{}': {}",
                path.display(),
                e
            ))
        })?;
        let before = self.words.len();
        self.extend(content.lines());
        debug!(
            "Dictionary '{}' added {} words",
            path.display(),
            self.words.len() - before
        );
        Ok(())
    }

    fn known_stem(&self, w: &str) -> bool {
        const SUFFIXES: &[(&str, &str)] = &[
            ("'s", ""),
            ("ies", "y"),
            ("ied", "y"),
            ("es", ""),
            ("s", ""),
            ("ed", ""),
            ("ed", "e"),
            ("d", ""),
            ("ing", ""),
            ("ing", "e"),
            ("ly", ""),
            ("ily", "y"),
            ("er", ""),
            ("er", "e"),
            ("est", ""),
            ("ness", ""),
            ("ment", ""),
            ("al", ""),
            ("ally", ""),
            ("ity", ""),
            ("ation", "e"),
            ("ation", ""),
            ("tion", "te"),
            ("ful", ""),
            ("less", ""),
            ("able", ""),
            ("ize", ""),
            ("ise", ""),
        ];

        SUFFIXES.iter().any(|(suffix, replacement)| {
            w.strip_suffix(suffix)
                .filter(|stem| stem.chars().count() >= 2)
                .map(|stem| {
                    let candidate = format!("{}{}", stem, replacement);
                    if self.words.contains(&candidate) {
                        return true;
                    }
                    // doubled consonant: "stopped" -> "stop", "running" -> "run"
                    let mut chars = stem.chars().rev();
                    match (chars.next(), chars.next()) {
                        (Some(a), Some(b)) if a == b && replacement.is_empty() => {
                            self.words.contains(&stem[..stem.len() - a.len_utf8()])
                        }
                        _ => false,
                    }
                })
                .unwrap_or(false)
        })
    }
}

impl Lexicon for WordListLexicon {
    fn contains(&self, word: &str) -> bool {
        if word.chars().count() <= 1 || word.chars().all(|c| c.is_numeric()) {
            return true;
        }
        let w = word.to_lowercase();
        self.words.contains(&w) || self.known_stem(&w)
    }

    fn len(&self) -> usize {
        self.words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inflections_are_known() {
        let lex = WordListLexicon::from_words(["stop", "study", "make", "quick"]);
        assert!(lex.contains("Stop"));
        assert!(lex.contains("stopped"));
        assert!(lex.contains("studies"));
        assert!(lex.contains("making"));
        assert!(lex.contains("quickly"));
        assert!(!lex.contains("qwzx"));
    }

    #[test]
    fn test_numbers_and_single_chars_are_known() {
        let lex = WordListLexicon::from_words(Vec::<&str>::new());
        assert!(lex.contains("1945"));
        assert!(lex.contains("x"));
        assert!(!lex.contains("xy"));
    }

    #[test]
    fn test_embedded_list_is_loaded() {
        let lex = WordListLexicon::embedded();
        assert!(lex.len() > 1000);
        assert!(lex.contains("the"));
        assert!(lex.contains("energy"));
        assert!(lex.contains("produces"));
    }
}
