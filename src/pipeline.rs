/// End-to-end evaluation run
///
/// Collection and aggregation are interleaved per pivot so only one read
/// table is alive at a time. The confusion matrix is the only state kept
/// across pivots.
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

use crate::accuracy::{calculate_accuracy_values, AccuracyRecord};
use crate::collector::{RecordCollector, Weighting};
use crate::config::{RunConfig, WeightMode};
use crate::matrix::ConfusionMatrix;
use crate::noise::load_noise;
use crate::output::write_results;

/// Result of a completed run
#[derive(Debug)]
pub struct RunSummary {
    pub matrix: ConfusionMatrix,
    pub accuracy: Vec<AccuracyRecord>,
    pub matrix_path: PathBuf,
    pub values_path: PathBuf,
}

/// Turn the configured mode into a concrete weighting, computing the noise
/// value once for MEMs
pub fn resolve_weighting(config: &RunConfig) -> Result<Weighting> {
    match config.mode {
        WeightMode::UnitWeighted => Ok(Weighting::Unit),
        WeightMode::LengthWeighted => {
            let path = config
                .reference_length_file
                .as_ref()
                .context("Length of text must be specified (--length-text) when using MEMs")?;
            let noise = load_noise(path)?;
            info!("Noise: {noise}");
            Ok(Weighting::Length { noise })
        }
    }
}

/// Build the confusion matrix and accuracy table without writing anything
pub fn evaluate(config: &RunConfig) -> Result<(ConfusionMatrix, Vec<AccuracyRecord>)> {
    config.validate()?;

    let weighting = resolve_weighting(config)?;
    let collector = RecordCollector::new(config.threshold, weighting);
    let mut matrix = ConfusionMatrix::new(config.num_datasets);

    for pivot in 0..config.num_datasets {
        info!(
            "Building a dictionary of the read alignments for pivot {}",
            pivot + 1
        );
        let (table, stats) = collector.collect_pivot(&config.sam_dir, pivot, config.num_datasets)?;
        debug!(
            "Pivot {}: {} distinct reads from {} records",
            pivot + 1,
            table.len(),
            stats.records_seen
        );
        matrix.fold_pivot(pivot, table);
    }

    let accuracy = calculate_accuracy_values(&matrix);
    Ok((matrix, accuracy))
}

/// Evaluate and write `confusion_matrix.csv` and `accuracy_values.csv`
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let (matrix, accuracy) = evaluate(config)?;

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;
    let (matrix_path, values_path) = write_results(&config.output_dir, &matrix, &accuracy)?;
    info!("Wrote {}", matrix_path.display());
    info!("Wrote {}", values_path.display());

    log_accuracy_summary(&accuracy);

    Ok(RunSummary {
        matrix,
        accuracy,
        matrix_path,
        values_path,
    })
}

fn log_accuracy_summary(values: &[AccuracyRecord]) {
    let fmt = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{:.4}", v));
    for record in values {
        info!(
            "Dataset {}: precision {}, recall {}, accuracy {}",
            record.dataset,
            fmt(record.precision()),
            fmt(record.recall()),
            fmt(record.accuracy())
        );
    }
}
