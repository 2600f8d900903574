use super::lexicon::{is_function_word, SUBJECT_PRONOUNS};
use super::{SentenceAnalyzer, SentenceParse};
use crate::text;
use std::collections::HashSet;
use std::sync::LazyLock;

const AUXILIARIES: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "am", "has", "have", "had", "having",
    "do", "does", "did", "can", "could", "will", "would", "shall", "should", "may", "might",
    "must", "isn't", "aren't", "wasn't", "weren't", "hasn't", "haven't", "hadn't", "doesn't",
    "don't", "didn't", "can't", "cannot", "couldn't", "won't", "wouldn't", "shouldn't",
];

const BASE_VERBS: &[&str] = &[
    "absorb", "accept", "achieve", "act", "add", "affect", "agree", "allow", "analyze", "answer",
    "appear", "apply", "argue", "arrive", "ask", "assume", "attack", "avoid", "base", "believe",
    "belong", "bind", "boil", "break", "bring", "build", "burn", "buy", "calculate", "call",
    "carry", "cause", "change", "check", "choose", "claim", "close", "collect", "combine", "come",
    "compare", "complete", "compute", "consider", "consist", "contain", "continue", "control",
    "convert", "cool", "cost", "count", "cover", "create", "cross", "cut", "decide", "decrease",
    "define", "depend", "describe", "design", "destroy", "determine", "develop", "die", "differ",
    "discover", "divide", "draw", "drive", "drop", "eat", "emerge", "enable", "encourage", "end",
    "ensure", "enter", "establish", "evaluate", "evolve", "exist", "expand", "expect", "explain",
    "express", "extend", "fail", "fall", "feel", "fight", "fill", "find", "finish", "flow", "fly",
    "follow", "force", "forget", "form", "found", "function", "gain", "generate", "get", "give",
    "go", "govern", "grow", "happen", "hear", "heat", "help", "hold", "identify", "implement",
    "improve", "include", "increase", "indicate", "influence", "inform", "involve", "join",
    "keep", "kill", "know", "lack", "last", "lead", "learn", "leave", "let", "lie", "like",
    "limit", "link", "live", "look", "lose", "love", "maintain", "make", "manage", "mean",
    "measure", "meet", "melt", "move", "need", "note", "observe", "obtain", "occur", "offer",
    "open", "operate", "orbit", "order", "own", "pass", "pay", "perform", "place", "plan", "play",
    "point", "power", "predict", "prefer", "prepare", "present", "prevent", "process", "produce",
    "protect", "prove", "provide", "publish", "pull", "push", "put", "raise", "reach", "read",
    "receive", "reduce", "refer", "reflect", "release", "remain", "remember", "remove", "replace",
    "report", "represent", "require", "rely", "respond", "rest", "result", "return", "reveal",
    "rise", "rule", "run", "say", "see", "seem", "sell", "send", "serve", "set", "share", "shift",
    "show", "sit", "solve", "speak", "spend", "stand", "start", "state", "stay", "stop", "store",
    "study", "succeed", "suggest", "supply", "support", "take", "talk", "teach", "tell", "tend",
    "test", "think", "transfer", "transform", "travel", "treat", "try", "turn", "understand",
    "use", "vary", "wait", "walk", "want", "watch", "win", "wish", "work", "write",
];

const IRREGULAR_FORMS: &[&str] = &[
    "began", "begun", "bound", "broke", "broken", "brought", "built", "bought", "came", "chose",
    "chosen", "did", "done", "drew", "drawn", "drove", "driven", "ate", "eaten", "fell", "fallen",
    "felt", "fought", "flew", "flown", "forgot", "forgotten", "found", "gave", "given", "got",
    "gotten", "went", "gone", "grew", "grown", "heard", "held", "kept", "knew", "known", "led",
    "left", "lay", "lain", "lost", "made", "meant", "met", "paid", "proved", "proven", "ran",
    "rose", "risen", "said", "saw", "seen", "sold", "sent", "sat", "spoke", "spoken", "spent",
    "stood", "took", "taken", "taught", "told", "thought", "understood", "won", "wrote",
    "written", "became", "become", "becomes", "becoming",
];

static VERB_FORMS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    let mut forms: HashSet<String> = HashSet::new();
    for &aux in AUXILIARIES {
        forms.insert(aux.to_string());
    }
    for &form in IRREGULAR_FORMS {
        forms.insert(form.to_string());
    }
    for &base in BASE_VERBS {
        forms.insert(base.to_string());
        forms.insert(inflect_s(base));
        forms.insert(inflect_ed(base));
        forms.insert(inflect_ing(base));
    }
    forms
});

fn inflect_s(base: &str) -> String {
    if let Some(stem) = base.strip_suffix('y').filter(|s| !s.ends_with(['a', 'e', 'o', 'u'])) {
        format!("{}ies", stem)
    } else if base.ends_with(['s', 'x', 'z']) || base.ends_with("ch") || base.ends_with("sh") || base.ends_with('o') {
        format!("{}es", base)
    } else {
        format!("{}s", base)
    }
}

fn inflect_ed(base: &str) -> String {
    if base.ends_with('e') {
        format!("{}d", base)
    } else if let Some(stem) = base.strip_suffix('y').filter(|s| !s.ends_with(['a', 'e', 'o', 'u'])) {
        format!("{}ied", stem)
    } else {
        format!("{}ed", base)
    }
}

fn inflect_ing(base: &str) -> String {
    match base.strip_suffix('e') {
        Some(stem) if !base.ends_with("ee") && !stem.is_empty() => format!("{}ing", stem),
        _ => format!("{}ing", base),
    }
}

/// Every verb form the heuristic analyzer recognises as a predicate.
pub fn verb_forms() -> &'static HashSet<String> {
    &VERB_FORMS
}

fn is_auxiliary(word: &str) -> bool {
    AUXILIARIES.contains(&word)
}

fn is_verb(word: &str) -> bool {
    VERB_FORMS.contains(word)
        || (word.len() > 4 && word.ends_with("ed") && !is_function_word(word))
        || word.ends_with("izes")
        || word.ends_with("ises")
}

fn is_subject_candidate(word: &str) -> bool {
    if SUBJECT_PRONOUNS.contains(&word) {
        return true;
    }
    !is_function_word(word)
        && !is_verb(word)
        && !word.ends_with("ly")
        && word.chars().any(char::is_alphanumeric)
}

/// Rule-based clause detector.
///
/// A sentence has a predicate when it contains a recognised verb form; it has
/// a subject when a pronoun or content word precedes that verb, or, for
/// questions opening with an auxiliary, follows it.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicAnalyzer;

impl HeuristicAnalyzer {
    pub fn parse_sentence(sentence: &str) -> SentenceParse {
        let words: Vec<String> = text::whitespace_tokens(sentence)
            .into_iter()
            .map(|t| text::strip_punctuation(t).to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        let Some(p) = words.iter().position(|w| is_verb(w)) else {
            return SentenceParse {
                has_subject: words.iter().any(|w| is_subject_candidate(w)),
                has_predicate: false,
            };
        };

        let before = words[..p].iter().any(|w| is_subject_candidate(w));
        let inverted = is_auxiliary(&words[p])
            && words[p + 1..]
                .iter()
                .take_while(|w| !is_verb(w) || is_auxiliary(w))
                .any(|w| is_subject_candidate(w));

        SentenceParse {
            has_subject: before || inverted,
            has_predicate: true,
        }
    }
}

impl SentenceAnalyzer for HeuristicAnalyzer {
    fn analyze(&self, text: &str) -> Vec<SentenceParse> {
        text::sentences(text)
            .into_iter()
            .map(Self::parse_sentence)
            .collect()
    }
}
