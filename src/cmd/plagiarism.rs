use crate::cmd::grade::display_name;
use crate::reports::{self, FlaggedPair};
use clap::Args;
use gradeforge::config::Config;
use gradeforge::documents::{self, PlainTextExtractor, TextExtractor};
use gradeforge::error::GfResult;
use gradeforge::plagiarism;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct PlagiarismArgs {
    #[command(flatten)]
    pub config: Config,

    /// Submission files to compare.
    #[arg(required = true, num_args = 2..)]
    pub submissions: Vec<PathBuf>,

    /// List every pair, not only those above the threshold.
    #[arg(long, default_value_t = false)]
    pub all_pairs: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long)]
    pub csv: Option<PathBuf>,
}

pub fn run(args: &PlagiarismArgs, config: Config) -> GfResult<()> {
    let params = &config.plagiarism;
    let extractor = PlainTextExtractor;

    let names: Vec<String> = args.submissions.iter().map(|p| display_name(p)).collect();
    let texts = args
        .submissions
        .iter()
        .map(|p| extractor.extract(p))
        .collect::<GfResult<Vec<_>>>()?;

    let prepared: Vec<(usize, String)> = if params.raw {
        texts.into_iter().enumerate().collect()
    } else {
        documents::prepare(&texts, params)
    };
    let docs: Vec<&str> = prepared.iter().map(|(_, t)| t.as_str()).collect();

    let report = plagiarism::detect_plagiarism(&docs)?;
    let threshold = if args.all_pairs {
        f64::NEG_INFINITY
    } else {
        params.threshold
    };

    // Map indices back to the files given on the command line.
    let pairs: Vec<FlaggedPair> = report
        .above(threshold)
        .map(|p| FlaggedPair {
            submission_a: names[prepared[p.index_a].0].clone(),
            submission_b: names[prepared[p.index_b].0].clone(),
            similarity: p.similarity,
        })
        .collect();

    info!(
        "{} of {} pair(s) above {:.2}%",
        report.above(params.threshold).count(),
        report.pairs.len(),
        params.threshold
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&pairs)?);
    } else {
        reports::print_plagiarism_report(&pairs, params.threshold);
    }

    if let Some(ref path) = args.csv {
        reports::write_pairs_csv(path, &pairs)?;
        info!("Pairs written to {}", path.display());
    }
    Ok(())
}
