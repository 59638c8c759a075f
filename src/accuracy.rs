/// Per-dataset accuracy counts derived from a finished confusion matrix
///
/// For dataset k: the diagonal cell is the true positive mass, the rest of
/// column k is false positive, the rest of row k is false negative and every
/// cell outside row k and column k is true negative.
use crate::matrix::ConfusionMatrix;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccuracyRecord {
    /// 1-based dataset index
    pub dataset: usize,
    pub true_positive: f64,
    pub true_negative: f64,
    pub false_positive: f64,
    pub false_negative: f64,
}

impl AccuracyRecord {
    pub fn total(&self) -> f64 {
        self.true_positive + self.true_negative + self.false_positive + self.false_negative
    }

    /// TP / (TP + FP)
    pub fn precision(&self) -> Option<f64> {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    /// TP / (TP + FN), a.k.a. sensitivity
    pub fn recall(&self) -> Option<f64> {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    /// (TP + TN) / total
    pub fn accuracy(&self) -> Option<f64> {
        ratio(self.true_positive + self.true_negative, self.total())
    }

    /// Fields in output column order
    pub fn to_row(&self) -> [String; 5] {
        [
            self.dataset.to_string(),
            self.true_positive.to_string(),
            self.true_negative.to_string(),
            self.false_positive.to_string(),
            self.false_negative.to_string(),
        ]
    }
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator > 0.0 {
        Some(numerator / denominator)
    } else {
        None
    }
}

/// Derive one accuracy record per dataset, in ascending dataset order
pub fn calculate_accuracy_values(matrix: &ConfusionMatrix) -> Vec<AccuracyRecord> {
    let n = matrix.size();

    (0..n)
        .map(|k| {
            let mut record = AccuracyRecord {
                dataset: k + 1,
                true_positive: matrix.get(k, k),
                true_negative: 0.0,
                false_positive: 0.0,
                false_negative: 0.0,
            };

            for row in 0..n {
                for col in 0..n {
                    let value = matrix.get(row, col);
                    if col == k && row != k {
                        record.false_positive += value;
                    } else if row == k && col != k {
                        record.false_negative += value;
                    } else if row != k {
                        record.true_negative += value;
                    }
                }
            }
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix_from(rows: &[&[f64]]) -> ConfusionMatrix {
        let mut matrix = ConfusionMatrix::new(rows.len());
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                matrix.add(r, c, value);
            }
        }
        matrix
    }

    #[test]
    fn test_perfect_classification() {
        let matrix = matrix_from(&[&[10.0, 0.0], &[0.0, 10.0]]);
        let values = calculate_accuracy_values(&matrix);

        assert_eq!(values.len(), 2);
        assert_eq!(values[0].dataset, 1);
        assert_eq!(values[0].true_positive, 10.0);
        assert_eq!(values[0].true_negative, 10.0);
        assert_eq!(values[0].false_positive, 0.0);
        assert_eq!(values[0].false_negative, 0.0);
        assert_eq!(values[1].dataset, 2);
        assert_eq!(values[1].precision(), Some(1.0));
    }

    #[test]
    fn test_partition_of_three_by_three() {
        let matrix = matrix_from(&[&[5.0, 1.0, 2.0], &[3.0, 7.0, 0.5], &[0.25, 4.0, 9.0]]);
        let values = calculate_accuracy_values(&matrix);

        let middle = values[1];
        assert_eq!(middle.true_positive, 7.0);
        assert_eq!(middle.false_positive, 1.0 + 4.0);
        assert_eq!(middle.false_negative, 3.0 + 0.5);
        assert_eq!(middle.true_negative, 5.0 + 2.0 + 0.25 + 9.0);

        for record in &values {
            assert!((record.total() - matrix.total()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_ratios_undefined_on_empty_matrix() {
        let matrix = ConfusionMatrix::new(2);
        let values = calculate_accuracy_values(&matrix);
        assert_eq!(values[0].precision(), None);
        assert_eq!(values[0].recall(), None);
        assert_eq!(values[0].accuracy(), None);
    }

    #[test]
    fn test_row_formatting() {
        let matrix = matrix_from(&[&[1.5, 0.5], &[0.0, 2.0]]);
        let values = calculate_accuracy_values(&matrix);
        assert_eq!(values[0].to_row(), ["1", "1.5", "2", "0", "0.5"].map(String::from));
    }
}
