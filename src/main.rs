use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use gradeforge::config::Config;
use gradeforge::error::GfResult;
use std::path::PathBuf;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Grades free-text answers and flags overlapping submissions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file; explicit CLI flags override its values.
    #[arg(global = true, long)]
    config_file: Option<PathBuf>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Grade one or more submissions against an answer key.
    Grade(cmd::grade::GradeArgs),
    /// Compare submissions pairwise for textual overlap.
    Plagiarism(cmd::plagiarism::PlagiarismArgs),
    /// Print the weight presets.
    Presets,
}

fn resolve_config(
    cli_config: &Config,
    config_file: &Option<PathBuf>,
    sub_matches: &ArgMatches,
) -> GfResult<Config> {
    match config_file {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            let mut config = Config::load_from_file(path)?;
            config.merge_from_cli(cli_config, sub_matches);
            Ok(config)
        }
        None => Ok(cli_config.clone()),
    }
}

fn run(cli: Cli, matches: &ArgMatches) -> GfResult<()> {
    match &cli.command {
        Commands::Grade(args) => {
            let sub = matches.subcommand_matches("grade").unwrap_or(matches);
            let config = resolve_config(&args.config, &cli.config_file, sub)?;
            cmd::grade::run(args, config)
        }
        Commands::Plagiarism(args) => {
            let sub = matches.subcommand_matches("plagiarism").unwrap_or(matches);
            let config = resolve_config(&args.config, &cli.config_file, sub)?;
            cmd::plagiarism::run(args, config)
        }
        Commands::Presets => {
            reports::print_presets();
            Ok(())
        }
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli, &matches) {
        error!("{}", e);
        process::exit(1);
    }
}
