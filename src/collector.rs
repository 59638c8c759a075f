/// Record collection: group alignment records of one pivot by read name
///
/// Every SAM file of a pivot (one per target dataset) is streamed in dataset
/// order. Records passing the length threshold and the weighting rule are
/// folded into a [`ReadMappingTable`] keyed by read name. The weight of a
/// read is fixed the first time it is accepted; later hits only extend its
/// dataset list.
use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::{debug, info};
use std::path::Path;

use crate::read_name::ground_truth_length;
use crate::sam::{resolve_alignment_path, AlignmentRecord, SamRecordSource};

/// How an accepted read is weighted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Weighting {
    /// MEMs: ground-truth length minus noise, reads shorter than the noise are dropped
    Length { noise: f64 },
    /// Half-MEMs: every read counts once
    Unit,
}

/// Weight of a read plus every dataset it was aligned to (duplicates allowed)
#[derive(Debug, Clone, PartialEq)]
pub struct ReadHits {
    pub weight: f64,
    pub hits: Vec<usize>,
}

/// Per-pivot mapping from read name to its hits
///
/// Insertion ordered, so folding the table into the matrix always sums in
/// the same order and repeated runs give identical output.
#[derive(Debug, Default)]
pub struct ReadMappingTable {
    entries: IndexMap<String, ReadHits>,
}

impl ReadMappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ReadMappingTable {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Record a hit of `read_name` against `dataset`. `weight` is only stored
    /// when the read is new. Returns true if this was the first hit.
    pub fn add_hit(&mut self, read_name: &str, weight: f64, dataset: usize) -> bool {
        if let Some(entry) = self.entries.get_mut(read_name) {
            entry.hits.push(dataset);
            return false;
        }

        self.entries.insert(
            read_name.to_string(),
            ReadHits {
                weight,
                hits: vec![dataset],
            },
        );
        true
    }

    pub fn contains(&self, read_name: &str) -> bool {
        self.entries.contains_key(read_name)
    }

    pub fn get(&self, read_name: &str) -> Option<&ReadHits> {
        self.entries.get(read_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for ReadMappingTable {
    type Item = (String, ReadHits);
    type IntoIter = indexmap::map::IntoIter<String, ReadHits>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Diagnostic counters for one pivot
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CollectionStats {
    pub records_seen: usize,
    pub records_kept: usize,
    pub below_threshold: usize,
    pub below_noise: usize,
    /// Sum over newly accepted reads: `sequence_len - noise` for MEMs, 1 for half-MEMs
    pub input_entries: f64,
}

impl CollectionStats {
    fn merge(&mut self, other: &CollectionStats) {
        self.records_seen += other.records_seen;
        self.records_kept += other.records_kept;
        self.below_threshold += other.below_threshold;
        self.below_noise += other.below_noise;
        self.input_entries += other.input_entries;
    }
}

/// Applies the threshold and weighting rules to alignment records
#[derive(Debug, Clone, Copy)]
pub struct RecordCollector {
    threshold: i64,
    weighting: Weighting,
}

impl RecordCollector {
    pub fn new(threshold: i64, weighting: Weighting) -> Self {
        RecordCollector {
            threshold,
            weighting,
        }
    }

    /// Offer one record aligned against `dataset` (0-based) to the table
    pub fn accept(
        &self,
        record: &AlignmentRecord,
        dataset: usize,
        table: &mut ReadMappingTable,
        stats: &mut CollectionStats,
    ) -> Result<()> {
        stats.records_seen += 1;

        let length = ground_truth_length(&record.read_name)?;
        if length < self.threshold {
            stats.below_threshold += 1;
            return Ok(());
        }

        match self.weighting {
            Weighting::Length { noise } => {
                let corrected = length as f64 - noise;
                if corrected < 0.0 {
                    stats.below_noise += 1;
                    return Ok(());
                }
                if table.add_hit(&record.read_name, corrected, dataset) {
                    stats.input_entries += record.sequence_len as f64 - noise;
                }
            }
            Weighting::Unit => {
                if table.add_hit(&record.read_name, 1.0, dataset) {
                    stats.input_entries += 1.0;
                }
            }
        }

        stats.records_kept += 1;
        Ok(())
    }

    /// Fold every record of one source into the table
    pub fn collect_records<I>(
        &self,
        records: I,
        dataset: usize,
        table: &mut ReadMappingTable,
        stats: &mut CollectionStats,
    ) -> Result<()>
    where
        I: IntoIterator<Item = Result<AlignmentRecord>>,
    {
        for record in records {
            self.accept(&record?, dataset, table, stats)?;
        }
        Ok(())
    }

    /// Build the read mapping table of one pivot (0-based) from its SAM files
    /// against every dataset, in ascending dataset order
    pub fn collect_pivot<P: AsRef<Path>>(
        &self,
        sam_dir: P,
        pivot: usize,
        num_datasets: usize,
    ) -> Result<(ReadMappingTable, CollectionStats)> {
        let sam_dir = sam_dir.as_ref();
        let mut table = ReadMappingTable::new();
        let mut totals = CollectionStats::default();

        for dataset in 0..num_datasets {
            let path = resolve_alignment_path(sam_dir, pivot + 1, dataset + 1)?;
            let mut stats = CollectionStats::default();

            // Scoped so the file is closed before the next dataset is opened
            {
                let source = SamRecordSource::open(&path)?;
                let source_path = source.path().to_path_buf();
                self.collect_records(source, dataset, &mut table, &mut stats)
                    .with_context(|| {
                        format!("Failed to collect records from {}", source_path.display())
                    })?;
                debug!(
                    "{}: {} records, {} kept, {} below threshold, {} below noise",
                    source_path.display(),
                    stats.records_seen,
                    stats.records_kept,
                    stats.below_threshold,
                    stats.below_noise
                );
            }
            totals.merge(&stats);
        }

        info!("Received {}", totals.input_entries);
        Ok((table, totals))
    }
}
