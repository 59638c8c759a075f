/// Read identifier parsing
///
/// Benchmark reads carry their ground-truth length in the name, e.g.
/// `read_17_dataset3_250_rev`: fields are `_`-delimited and field 3 holds the
/// length. A name without it breaks the contract of the read generator, so
/// parsing failures are hard errors. Signed values parse; negative lengths
/// are left for the threshold to drop.
use anyhow::{Context, Result};

/// Delimiter between fields of a read identifier
pub const FIELD_DELIMITER: char = '_';

/// Zero-based index of the ground-truth length field
pub const LENGTH_FIELD: usize = 3;

/// Extract the ground-truth length encoded in a read identifier
pub fn ground_truth_length(read_name: &str) -> Result<i64> {
    let field = read_name
        .split(FIELD_DELIMITER)
        .nth(LENGTH_FIELD)
        .with_context(|| {
            format!(
                "Read name '{read_name}' has no length field (expected at least {} '{}'-delimited fields)",
                LENGTH_FIELD + 1,
                FIELD_DELIMITER
            )
        })?;

    field.parse::<i64>().with_context(|| {
        format!("Read name '{read_name}' has a non-numeric length field '{field}'")
    })
}
