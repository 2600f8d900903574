use crate::error::{GfResult, GradeForgeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// The nine similarity / quality signals combined into a mark.
#[derive(
    Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Cosine,
    Jaccard,
    Levenshtein,
    Embedding,
    Keyword,
    Numeric,
    Entity,
    Grammar,
    Spelling,
}

impl Signal {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cosine => "Cosine Similarity",
            Self::Jaccard => "Jaccard Similarity",
            Self::Levenshtein => "Levenshtein Similarity",
            Self::Embedding => "Embedding Similarity",
            Self::Keyword => "Keyword Matching",
            Self::Numeric => "Numeric Consistency",
            Self::Entity => "Entity Matching",
            Self::Grammar => "Grammar Quality",
            Self::Spelling => "Spelling Quality",
        }
    }
}

/// Per-signal weights. Values are kept exactly as tabled; they do not
/// necessarily sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub cosine: f64,
    pub jaccard: f64,
    pub levenshtein: f64,
    pub embedding: f64,
    pub keyword: f64,
    pub numeric: f64,
    pub entity: f64,
    pub grammar: f64,
    pub spelling: f64,
}

impl WeightVector {
    #[allow(clippy::too_many_arguments)]
    const fn new(
        cosine: f64,
        jaccard: f64,
        levenshtein: f64,
        embedding: f64,
        keyword: f64,
        numeric: f64,
        entity: f64,
        grammar: f64,
        spelling: f64,
    ) -> Self {
        Self {
            cosine,
            jaccard,
            levenshtein,
            embedding,
            keyword,
            numeric,
            entity,
            grammar,
            spelling,
        }
    }

    pub fn get(&self, signal: Signal) -> f64 {
        match signal {
            Signal::Cosine => self.cosine,
            Signal::Jaccard => self.jaccard,
            Signal::Levenshtein => self.levenshtein,
            Signal::Embedding => self.embedding,
            Signal::Keyword => self.keyword,
            Signal::Numeric => self.numeric,
            Signal::Entity => self.entity,
            Signal::Grammar => self.grammar,
            Signal::Spelling => self.spelling,
        }
    }

    pub fn sum(&self) -> f64 {
        Signal::iter().map(|s| self.get(s)).sum()
    }
}

/// The eight fixed weighting schemes, numbered 1..=8.
#[derive(
    Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Normal,
    Technical,
    Grammar,
    Spelling,
    TechnicalGrammar,
    TechnicalSpelling,
    GrammarSpelling,
    Comprehensive,
}

//                                       cos   jac   lev   emb   key   num   ent   gram  spell
const W_NORMAL: WeightVector = WeightVector::new(0.20, 0.15, 0.10, 0.30, 0.05, 0.05, 0.05, 0.05, 0.05);
const W_TECHNICAL: WeightVector = WeightVector::new(0.20, 0.15, 0.10, 0.05, 0.40, 0.08, 0.01, 0.0, 0.01);
const W_GRAMMAR: WeightVector = WeightVector::new(0.20, 0.15, 0.10, 0.05, 0.05, 0.01, 0.01, 0.42, 0.01);
const W_SPELLING: WeightVector = WeightVector::new(0.20, 0.15, 0.10, 0.05, 0.05, 0.01, 0.01, 0.01, 0.42);
const W_TECH_GRAMMAR: WeightVector = WeightVector::new(0.20, 0.15, 0.10, 0.05, 0.20, 0.05, 0.01, 0.23, 0.01);
const W_TECH_SPELLING: WeightVector = WeightVector::new(0.20, 0.15, 0.10, 0.05, 0.22, 0.05, 0.01, 0.01, 0.22);
const W_GRAMMAR_SPELLING: WeightVector = WeightVector::new(0.20, 0.15, 0.10, 0.05, 0.05, 0.01, 0.01, 0.23, 0.20);
const W_COMPREHENSIVE: WeightVector = WeightVector::new(0.20, 0.15, 0.10, 0.05, 0.15, 0.04, 0.01, 0.15, 0.15);

/// Indexed by `FlagCombination::bits()` (technical = 4, grammar = 2, spelling = 1).
const PRESET_TABLE: [Preset; 8] = [
    Preset::Normal,            // 000
    Preset::Spelling,          // 001
    Preset::Grammar,           // 010
    Preset::GrammarSpelling,   // 011
    Preset::Technical,         // 100
    Preset::TechnicalSpelling, // 101
    Preset::TechnicalGrammar,  // 110
    Preset::Comprehensive,     // 111
];

impl Preset {
    pub fn weights(&self) -> WeightVector {
        match self {
            Self::Normal => W_NORMAL,
            Self::Technical => W_TECHNICAL,
            Self::Grammar => W_GRAMMAR,
            Self::Spelling => W_SPELLING,
            Self::TechnicalGrammar => W_TECH_GRAMMAR,
            Self::TechnicalSpelling => W_TECH_SPELLING,
            Self::GrammarSpelling => W_GRAMMAR_SPELLING,
            Self::Comprehensive => W_COMPREHENSIVE,
        }
    }

    /// The preset's number in the 1..=8 numbering.
    pub fn number(&self) -> u8 {
        match self {
            Self::Normal => 1,
            Self::Technical => 2,
            Self::Grammar => 3,
            Self::Spelling => 4,
            Self::TechnicalGrammar => 5,
            Self::TechnicalSpelling => 6,
            Self::GrammarSpelling => 7,
            Self::Comprehensive => 8,
        }
    }

    pub fn from_number(n: u8) -> GfResult<Self> {
        Self::iter().find(|p| p.number() == n).ok_or_else(|| {
            GradeForgeError::InvalidInput(format!("Preset number must be 1..=8, got {}", n))
        })
    }

    pub fn flags(&self) -> FlagCombination {
        let bits = PRESET_TABLE
            .iter()
            .position(|p| p == self)
            .unwrap_or_default() as u8;
        FlagCombination::from_bits(bits)
    }
}

/// Which grading emphases apply to an assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlagCombination {
    #[serde(default)]
    pub technical: bool,
    #[serde(default)]
    pub grammar: bool,
    #[serde(default)]
    pub spelling: bool,
}

impl FlagCombination {
    pub fn new(technical: bool, grammar: bool, spelling: bool) -> Self {
        Self {
            technical,
            grammar,
            spelling,
        }
    }

    pub fn bits(&self) -> u8 {
        (self.technical as u8) << 2 | (self.grammar as u8) << 1 | self.spelling as u8
    }

    /// Only the low three bits are read.
    pub fn from_bits(bits: u8) -> Self {
        Self::new(bits & 4 != 0, bits & 2 != 0, bits & 1 != 0)
    }

    pub fn from_preset(n: u8) -> GfResult<Self> {
        Preset::from_number(n).map(|p| p.flags())
    }

    pub fn preset(&self) -> Preset {
        PRESET_TABLE[self.bits() as usize]
    }

    pub fn weights(&self) -> WeightVector {
        self.preset().weights()
    }

    pub fn all() -> impl Iterator<Item = FlagCombination> {
        (0u8..8).map(Self::from_bits)
    }
}

impl fmt::Display for FlagCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.technical {
            names.push("technical");
        }
        if self.grammar {
            names.push("grammar");
        }
        if self.spelling {
            names.push("spelling");
        }
        if names.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", names.join(","))
        }
    }
}

impl FromStr for FlagCombination {
    type Err = GradeForgeError;

    /// Accepts `none`, an empty string, or a comma list of
    /// `technical`, `grammar`, `spelling` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Self::default();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.to_lowercase().as_str() {
                "none" => {}
                "technical" | "tech" => flags.technical = true,
                "grammar" => flags.grammar = true,
                "spelling" => flags.spelling = true,
                other => {
                    return Err(GradeForgeError::InvalidInput(format!(
                        "Unknown grading flag '{}' (expected technical, grammar, spelling or none)",
                        other
                    )))
                }
            }
        }
        Ok(flags)
    }
}
