use crate::reports::{self, GradeRow};
use clap::Args;
use gradeforge::config::{AssignmentSpec, Config};
use gradeforge::documents::{self, PlainTextExtractor, TextExtractor};
use gradeforge::error::{GfResult, GradeForgeError};
use gradeforge::weights::FlagCombination;
use gradeforge::GradingService;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct GradeArgs {
    #[command(flatten)]
    pub config: Config,

    /// Submission files to grade.
    #[arg(required = true)]
    pub submissions: Vec<PathBuf>,

    /// Answer key document.
    #[arg(short, long)]
    pub key: Option<PathBuf>,

    /// Assignment JSON supplying key path, total marks and flags.
    #[arg(short, long)]
    pub assignment: Option<PathBuf>,

    #[arg(short, long)]
    pub total_marks: Option<i64>,

    /// Preset number 1..=8; overrides every other flag source.
    #[arg(short, long)]
    pub preset: Option<u8>,

    /// Comma list of emphases, e.g. "technical,grammar".
    #[arg(long)]
    pub flags: Option<String>,

    #[arg(long, default_value_t = false)]
    pub technical: bool,
    #[arg(long, default_value_t = false)]
    pub grammar: bool,
    #[arg(long, default_value_t = false)]
    pub spelling: bool,

    /// Also compare the submissions with each other and mark overlaps.
    #[arg(long, default_value_t = false)]
    pub check_plagiarism: bool,

    /// Print results as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Write a gradesheet CSV.
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

impl GradeArgs {
    /// Preset, then `--flags`, then the boolean switches, then the assignment file.
    fn resolve_flags(&self, assignment: Option<&AssignmentSpec>) -> GfResult<FlagCombination> {
        if let Some(n) = self.preset {
            return FlagCombination::from_preset(n);
        }
        if let Some(ref s) = self.flags {
            return s.parse();
        }
        if self.technical || self.grammar || self.spelling {
            return Ok(FlagCombination::new(
                self.technical,
                self.grammar,
                self.spelling,
            ));
        }
        Ok(assignment.map(|a| a.flags).unwrap_or_default())
    }
}

pub fn run(args: &GradeArgs, config: Config) -> GfResult<()> {
    let assignment = args
        .assignment
        .as_ref()
        .map(AssignmentSpec::load_from_file)
        .transpose()?;

    let key_path = args
        .key
        .clone()
        .or_else(|| assignment.as_ref().and_then(|a| a.key_path.clone()))
        .ok_or_else(|| {
            GradeForgeError::InvalidInput("No answer key given (use --key or --assignment)".into())
        })?;
    let total_marks = args
        .total_marks
        .or_else(|| assignment.as_ref().map(|a| a.total_marks))
        .ok_or_else(|| {
            GradeForgeError::InvalidInput(
                "No total marks given (use --total-marks or --assignment)".into(),
            )
        })?;
    if total_marks <= 0 {
        return Err(GradeForgeError::InvalidInput(format!(
            "total marks must be positive, got {}",
            total_marks
        )));
    }
    let flags = args.resolve_flags(assignment.as_ref())?;

    let extractor = PlainTextExtractor;
    let key_text = extractor.extract(&key_path)?;

    let mut names = Vec::with_capacity(args.submissions.len());
    let mut texts = Vec::with_capacity(args.submissions.len());
    for path in &args.submissions {
        names.push(display_name(path));
        texts.push(extractor.extract(path)?);
    }

    info!(
        "Grading {} submission(s) out of {} [{}, preset {}]",
        texts.len(),
        total_marks,
        flags,
        flags.preset().number()
    );
    let service = GradingService::new(&config)?;
    let results = service.grade_batch(&texts, &key_text, total_marks, flags);

    let flagged = if args.check_plagiarism {
        flagged_submissions(&service, &texts, &config)
    } else {
        HashSet::new()
    };

    let mut rows = Vec::with_capacity(results.len());
    for (i, (name, result)) in names.into_iter().zip(results).enumerate() {
        match result {
            Ok(result) => rows.push(GradeRow {
                submission: name,
                flagged: flagged.contains(&i),
                result,
            }),
            Err(e) => warn!("Failed to grade {}: {}", name, e),
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in &rows {
            reports::print_grading_report(&row.submission, &row.result);
        }
        reports::print_grade_summary(&rows);
    }

    if let Some(ref path) = args.csv {
        reports::write_gradesheet_csv(path, &rows)?;
        info!("Gradesheet written to {}", path.display());
    }
    Ok(())
}

/// Positions of submissions that appear in any pair above the threshold.
fn flagged_submissions(
    service: &GradingService,
    texts: &[String],
    config: &Config,
) -> HashSet<usize> {
    let params = &config.plagiarism;
    let prepared: Vec<(usize, String)> = if params.raw {
        texts.iter().cloned().enumerate().collect()
    } else {
        documents::prepare(texts, params)
    };
    let docs: Vec<&str> = prepared.iter().map(|(_, t)| t.as_str()).collect();

    match service.detect_plagiarism(&docs) {
        Ok(report) => report
            .above(params.threshold)
            .flat_map(|p| [prepared[p.index_a].0, prepared[p.index_b].0])
            .collect(),
        Err(e) => {
            warn!("Plagiarism check skipped: {}", e);
            HashSet::new()
        }
    }
}

pub fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
