use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use audio_similarity::audio::{probe_wav, DurationCheck};
use audio_similarity::batch::{BatchReport, BatchScorer};
use audio_similarity::config::{AppConfig, ReportConfig};
use audio_similarity::error::{log_input_error, log_scoring_error, ErrorCode};
use audio_similarity::{
    compare_clips_timed, compare_fingerprints, score, BatchManifest, FeatureSummary, MethodTimings,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

#[path = "similarity_cli/render.rs"]
mod render;

#[derive(Parser, Debug)]
#[command(
    name = "similarity_cli",
    about = "Compare audio clips by feature summaries and fingerprints"
)]
struct Cli {
    /// JSON configuration file (defaults are used when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score two feature summaries.
    Score(ScoreArgs),
    /// Compare two fingerprint strings.
    Fingerprint(FingerprintArgs),
    /// Full comparison: features, fingerprints and WAV durations.
    Compare(CompareArgs),
    /// Score every pair listed in a batch manifest.
    Batch(BatchArgs),
}

#[derive(Args, Debug, Clone)]
struct PairArgs {
    /// First feature summary (JSON).
    #[arg(long)]
    a: PathBuf,
    /// Second feature summary (JSON).
    #[arg(long)]
    b: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct OutputArgs {
    /// Output format for stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    /// Also write the JSON result to this file.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct ScoreArgs {
    #[command(flatten)]
    pair: PairArgs,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
struct FingerprintArgs {
    /// First fingerprint, or @path to read it from a file.
    #[arg(long)]
    a: String,
    /// Second fingerprint, or @path to read it from a file.
    #[arg(long)]
    b: String,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
struct CompareArgs {
    #[command(flatten)]
    pair: PairArgs,
    /// Reference fingerprint of the first clip (or @path).
    #[arg(long, requires = "fingerprint_b")]
    fingerprint_a: Option<String>,
    /// Reference fingerprint of the second clip (or @path).
    #[arg(long, requires = "fingerprint_a")]
    fingerprint_b: Option<String>,
    /// Source WAV of the first clip, for a duration check.
    #[arg(long)]
    wav_a: Option<PathBuf>,
    /// Source WAV of the second clip, for a duration check.
    #[arg(long)]
    wav_b: Option<PathBuf>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
struct BatchArgs {
    /// Batch manifest (JSON).
    #[arg(long)]
    manifest: PathBuf,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.execute() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

impl Cli {
    fn execute(self) -> Result<ExitCode> {
        let config = self
            .config
            .as_deref()
            .map(AppConfig::load_from_file)
            .unwrap_or_default();

        match self.command {
            Command::Score(args) => score_command(args, &config),
            Command::Fingerprint(args) => fingerprint_command(args, &config),
            Command::Compare(args) => compare_command(args, &config),
            Command::Batch(args) => batch_command(args, &config),
        }
    }
}

fn score_command(args: ScoreArgs, config: &AppConfig) -> Result<ExitCode> {
    let (a, b) = load_pair(&args.pair)?;
    let report = score(&a, &b).map_err(|err| {
        log_scoring_error(&err, "score");
        err
    })?;

    emit(&report, &args.output, &config.report, |precision| {
        render::print_similarity_table(&report, precision)
    })?;
    Ok(ExitCode::SUCCESS)
}

fn fingerprint_command(args: FingerprintArgs, config: &AppConfig) -> Result<ExitCode> {
    let a = read_fingerprint(&args.a)?;
    let b = read_fingerprint(&args.b)?;
    let result = compare_fingerprints(&a, &b);

    emit(&result, &args.output, &config.report, |precision| {
        render::print_fingerprint_table(&result, precision)
    })?;
    Ok(ExitCode::SUCCESS)
}

#[derive(Serialize)]
struct CompareOutput<'a> {
    a: &'a Path,
    b: &'a Path,
    #[serde(flatten)]
    comparison: &'a audio_similarity::ClipComparison,
    computation_time: MethodTimings,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_a: Option<DurationCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_b: Option<DurationCheck>,
}

fn compare_command(args: CompareArgs, config: &AppConfig) -> Result<ExitCode> {
    let (a, b) = load_pair(&args.pair)?;

    let fingerprints = match (&args.fingerprint_a, &args.fingerprint_b) {
        (Some(fa), Some(fb)) => Some((read_fingerprint(fa)?, read_fingerprint(fb)?)),
        _ => None,
    };
    let (comparison, timings) = compare_clips_timed(
        &a,
        &b,
        fingerprints
            .as_ref()
            .map(|(fa, fb)| (fa.as_str(), fb.as_str())),
        &config.comparison,
    )
    .map_err(|err| {
        log_scoring_error(&err, "compare");
        err
    })?;

    let duration_a = args
        .wav_a
        .as_deref()
        .map(|path| check_duration(&a, path))
        .transpose()?;
    let duration_b = args
        .wav_b
        .as_deref()
        .map(|path| check_duration(&b, path))
        .transpose()?;

    let output = CompareOutput {
        a: &args.pair.a,
        b: &args.pair.b,
        comparison: &comparison,
        computation_time: timings,
        duration_a,
        duration_b,
    };

    emit(&output, &args.output, &config.report, |precision| {
        let mut durations = Vec::new();
        if let Some(check) = &output.duration_a {
            durations.push(("a", check));
        }
        if let Some(check) = &output.duration_b {
            durations.push(("b", check));
        }
        render::print_comparison_table(&comparison, &timings, &durations, precision)
    })?;
    Ok(ExitCode::SUCCESS)
}

fn batch_command(args: BatchArgs, config: &AppConfig) -> Result<ExitCode> {
    let manifest = BatchManifest::load(&args.manifest)
        .map_err(|err| {
            log_input_error(&err, "batch manifest");
            err
        })
        .with_context(|| format!("loading manifest {}", args.manifest.display()))?;
    let jobs = manifest
        .into_jobs()
        .map_err(|err| {
            log_input_error(&err, "batch clips");
            err
        })
        .with_context(|| format!("resolving clips of {}", args.manifest.display()))?;

    let scorer = BatchScorer::new(&config.batch, config.comparison.clone());
    let outcomes = scorer.run(&jobs);
    let report = BatchReport::new(&outcomes);

    emit(&report, &args.output, &config.report, |precision| {
        render::print_batch_table(&report, precision)
    })?;

    if report.summary.failed > 0 {
        tracing::warn!(
            failed = report.summary.failed,
            total = report.summary.total,
            "Some pairs could not be scored"
        );
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn load_pair(pair: &PairArgs) -> Result<(FeatureSummary, FeatureSummary)> {
    let a = FeatureSummary::load(&pair.a)
        .with_context(|| format!("loading summary {}", pair.a.display()))?;
    let b = FeatureSummary::load(&pair.b)
        .with_context(|| format!("loading summary {}", pair.b.display()))?;
    Ok((a, b))
}

fn read_fingerprint(value: &str) -> Result<String> {
    match value.strip_prefix('@') {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("reading fingerprint file {path}"))?;
            Ok(contents.trim().to_string())
        }
        None => Ok(value.to_string()),
    }
}

fn check_duration(summary: &FeatureSummary, wav: &Path) -> Result<DurationCheck> {
    let info = probe_wav(wav).map_err(|err| {
        tracing::error!(code = err.code(), "{}", err);
        err
    })?;
    Ok(DurationCheck::new(summary, &info))
}

fn emit<T: Serialize>(
    value: &T,
    output: &OutputArgs,
    report: &ReportConfig,
    table: impl FnOnce(usize),
) -> Result<()> {
    let json = render::to_json(value, report)?;

    if let Some(path) = &output.output {
        fs::write(path, &json).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("Wrote result to {}", path.display());
    }

    match output.format {
        OutputFormat::Json => println!("{json}"),
        OutputFormat::Table => table(report.precision),
    }
    Ok(())
}
