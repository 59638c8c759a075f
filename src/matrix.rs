/// Confusion matrix and fractional-credit aggregation
///
/// Row = pivot dataset the reads came from, column = dataset credited.
/// A read aligned to k distinct datasets adds weight/k to each of those k
/// cells of its pivot's row. No rounding, no tie-breaking.
use log::info;
use std::collections::BTreeSet;

use crate::collector::ReadMappingTable;

/// N×N table of non-negative accumulators
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    size: usize,
    cells: Vec<f64>,
}

impl ConfusionMatrix {
    /// Create an all-zero matrix for `size` datasets
    pub fn new(size: usize) -> Self {
        ConfusionMatrix {
            size,
            cells: vec![0.0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.size + col]
    }

    /// Add a non-negative contribution to one cell
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        debug_assert!(value >= 0.0, "negative contribution {value}");
        self.cells[row * self.size + col] += value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.cells.chunks(self.size.max(1))
    }

    pub fn row_sum(&self, row: usize) -> f64 {
        self.row(row).iter().sum()
    }

    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// Fold a pivot's read table into row `pivot` (0-based), consuming the
    /// table. Returns the total weight processed.
    pub fn fold_pivot(&mut self, pivot: usize, table: ReadMappingTable) -> f64 {
        let mut total_weight = 0.0;

        for (_read_name, read) in table {
            let datasets: BTreeSet<usize> = read.hits.into_iter().collect();
            debug_assert!(!datasets.is_empty(), "read table entry without hits");

            let share = read.weight / datasets.len() as f64;
            for dataset in datasets {
                self.add(pivot, dataset, share);
            }
            total_weight += read.weight;
        }

        info!("Returned {total_weight}");
        total_weight
    }
}
