/// CSV output for the confusion matrix and the accuracy table
///
/// Both files are headerless. Numbers use the shortest representation that
/// round-trips, so identical inputs always give byte-identical files.
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::accuracy::AccuracyRecord;
use crate::matrix::ConfusionMatrix;

pub const CONFUSION_MATRIX_FILE: &str = "confusion_matrix.csv";
pub const ACCURACY_VALUES_FILE: &str = "accuracy_values.csv";

fn csv_writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))
}

/// Write one row per pivot, N fields each
pub fn write_confusion_matrix<P: AsRef<Path>>(path: P, matrix: &ConfusionMatrix) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv_writer(path)?;

    for row in matrix.rows() {
        writer
            .write_record(row.iter().map(|value| value.to_string()))
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `[dataset, tp, tn, fp, fn]` per dataset
pub fn write_accuracy_values<P: AsRef<Path>>(path: P, values: &[AccuracyRecord]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv_writer(path)?;

    for record in values {
        writer
            .write_record(record.to_row())
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write both result files into `output_dir`, returning their paths
pub fn write_results<P: AsRef<Path>>(
    output_dir: P,
    matrix: &ConfusionMatrix,
    values: &[AccuracyRecord],
) -> Result<(PathBuf, PathBuf)> {
    let output_dir = output_dir.as_ref();
    let matrix_path = output_dir.join(CONFUSION_MATRIX_FILE);
    let values_path = output_dir.join(ACCURACY_VALUES_FILE);

    write_confusion_matrix(&matrix_path, matrix)?;
    write_accuracy_values(&values_path, values)?;

    Ok((matrix_path, values_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accuracy::calculate_accuracy_values;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_results() -> Result<()> {
        let dir = TempDir::new()?;
        let mut matrix = ConfusionMatrix::new(2);
        matrix.add(0, 0, 9.5);
        matrix.add(0, 1, 0.5);
        matrix.add(1, 1, 10.0);
        let values = calculate_accuracy_values(&matrix);

        let (matrix_path, values_path) = write_results(dir.path(), &matrix, &values)?;

        assert_eq!(fs::read_to_string(matrix_path)?, "9.5,0.5\n0,10\n");
        assert_eq!(
            fs::read_to_string(values_path)?,
            "1,9.5,10,0,0.5\n2,10,9.5,0.5,0\n"
        );
        Ok(())
    }
}
