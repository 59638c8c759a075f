/// Noise model for length-weighted (MEM) alignments
///
/// Spurious exact matches against a reference of total length L are expected
/// up to roughly log_4(L) bases long, so that many bases are subtracted from
/// every ground-truth length before it is credited.
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Alphabet size of DNA, the base of the noise logarithm
pub const NOISE_BASE: f64 = 4.0;

/// Compute the noise value log_4(L) for a total reference length L
pub fn noise_from_length(reference_length: u64) -> Result<f64> {
    if reference_length == 0 {
        bail!("Total reference length must be a positive integer, got 0");
    }
    Ok((reference_length as f64).log(NOISE_BASE))
}

/// Read the total reference length from the first line of a text file
pub fn read_reference_length<P: AsRef<Path>>(path: P) -> Result<u64> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open reference length file {}", path.display()))?;

    let mut first_line = String::new();
    BufReader::new(file)
        .read_line(&mut first_line)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let trimmed = first_line.trim();
    if trimmed.is_empty() {
        bail!("Reference length file {} is empty", path.display());
    }

    trimmed.parse::<u64>().with_context(|| {
        format!(
            "First line of {} is not a decimal integer: '{}'",
            path.display(),
            trimmed
        )
    })
}

/// Load the noise value straight from a reference length file
pub fn load_noise<P: AsRef<Path>>(path: P) -> Result<f64> {
    let length = read_reference_length(path)?;
    noise_from_length(length)
}
