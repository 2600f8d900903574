pub mod api;
pub mod config;
pub mod documents;
pub mod error;
pub mod nlp;
pub mod plagiarism;
pub mod scorer;
pub mod text;
pub mod weights;

pub use api::GradingService;
pub use error::{GfResult, GradeForgeError};
pub use plagiarism::{detect_plagiarism, PlagiarismPair, PlagiarismReport};
pub use scorer::{GradingResult, SignalBreakdown};
pub use weights::{FlagCombination, Preset, Signal, WeightVector};
