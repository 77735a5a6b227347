use anyhow::Result;
use audio_similarity::analysis::ClipComparison;
use audio_similarity::audio::DurationCheck;
use audio_similarity::batch::{BatchReport, BatchStatus};
use audio_similarity::config::ReportConfig;
use audio_similarity::{FingerprintComparison, MethodTimings, SimilarityReport};
use serde::Serialize;

pub fn to_json<T: Serialize>(value: &T, report: &ReportConfig) -> Result<String> {
    let json = if report.pretty_json {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

pub fn print_similarity_table(report: &SimilarityReport, precision: usize) {
    println!("Feature similarities     :");
    for (kind, value) in report.similarities.iter() {
        println!("  - {:<18}: {:.*}", kind.name(), precision, value);
    }
    println!(
        "Aggregate similarity     : {:.*}",
        precision, report.aggregate_similarity
    );
    println!(
        "Interpretation           : {} ({})",
        report.interpretation,
        report.interpretation.description()
    );
}

pub fn print_fingerprint_table(result: &FingerprintComparison, precision: usize) {
    println!("Fingerprint lengths      : {} / {}", result.length_a, result.length_b);
    println!("Identical                : {}", result.identical);
    println!(
        "Fingerprint similarity   : {:.*}",
        precision, result.similarity
    );
    println!(
        "Interpretation           : {} ({})",
        result.interpretation,
        result.interpretation.description()
    );
}

pub fn print_comparison_table(
    comparison: &ClipComparison,
    timings: &MethodTimings,
    durations: &[(&str, &DurationCheck)],
    precision: usize,
) {
    print_similarity_table(&comparison.features, precision);
    println!(
        "Feature digests          : {}",
        if comparison.feature_digests.identical {
            "identical"
        } else {
            "different"
        }
    );

    if let Some(fingerprint) = &comparison.fingerprint {
        print_fingerprint_table(fingerprint, precision);
    }
    if let Some(consensus) = comparison.consensus {
        println!("Method consensus         : {consensus:?}");
    }
    if comparison.fingerprint_false_positive {
        println!("Warning                  : identical fingerprints, dissimilar features");
    }

    println!(
        "Feature time (ms)        : {:.3}",
        timings.features * 1_000.0
    );
    if let Some(seconds) = timings.fingerprint {
        println!("Fingerprint time (ms)    : {:.3}", seconds * 1_000.0);
    }

    for (clip, check) in durations {
        println!(
            "Duration {clip}               : summary {:.3}s, file {:.3}s, accuracy {:.*}",
            check.summary_seconds, check.probed_seconds, precision, check.accuracy
        );
        if !check.sample_rate_matches {
            println!("  - sample rate of summary and file differ");
        }
    }
}

pub fn print_batch_table(report: &BatchReport, precision: usize) {
    for record in &report.results {
        match (record.status, &record.comparison) {
            (BatchStatus::Ok, Some(comparison)) => println!(
                "  - {:<24} {:.*}  {}",
                record.id,
                precision,
                comparison.features.aggregate_similarity,
                comparison.label()
            ),
            _ => println!(
                "  - {:<24} FAILED ({})",
                record.id,
                record.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    let summary = &report.summary;
    println!(
        "Pairs                    : {} total, {} ok, {} failed",
        summary.total, summary.succeeded, summary.failed
    );
    if !summary.labels.is_empty() {
        println!("Labels                   :");
        for (label, count) in &summary.labels {
            println!("  - {label}: {count}");
        }
    }
}
