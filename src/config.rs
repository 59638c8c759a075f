/// Run configuration and eager validation
///
/// Everything that can be checked before a single SAM record is read is
/// checked here, so a bad invocation fails fast with a clear message.
use anyhow::{bail, Result};
use std::path::PathBuf;

/// Alignment weighting convention, exactly one per run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightMode {
    /// MEMs: weight = ground-truth length minus noise
    LengthWeighted,
    /// Half-MEMs: weight = 1 per read
    UnitWeighted,
}

impl WeightMode {
    /// Resolve the two mutually exclusive command-line switches
    pub fn from_flags(mems: bool, half_mems: bool) -> Result<Self> {
        match (mems, half_mems) {
            (true, false) => Ok(WeightMode::LengthWeighted),
            (false, true) => Ok(WeightMode::UnitWeighted),
            _ => bail!("Exactly one type needs to be chosen (--half-mems or --mems)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub num_datasets: usize,
    pub sam_dir: PathBuf,
    pub output_dir: PathBuf,
    pub mode: WeightMode,
    /// Minimum ground-truth read length to keep a record
    pub threshold: i64,
    /// First line holds the total reference length; the noise value of MEMs
    /// is derived from it, and it is required in either mode
    pub reference_length_file: Option<PathBuf>,
}

impl RunConfig {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(
        num_datasets: usize,
        sam_dir: P,
        output_dir: Q,
        mode: WeightMode,
    ) -> Self {
        RunConfig {
            num_datasets,
            sam_dir: sam_dir.into(),
            output_dir: output_dir.into(),
            mode,
            threshold: 0,
            reference_length_file: None,
        }
    }

    pub fn with_threshold(mut self, threshold: i64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_reference_length_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.reference_length_file = Some(path.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.sam_dir.is_dir() {
            bail!(
                "SAM directory does not exist: {}",
                self.sam_dir.display()
            );
        }
        if self.num_datasets < 1 {
            bail!("Number of datasets must be greater than 0");
        }
        if self.reference_length_file.is_none() {
            bail!("Length of text must be specified (--length-text)");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_mode_flags() {
        assert_eq!(WeightMode::from_flags(true, false).unwrap(), WeightMode::LengthWeighted);
        assert_eq!(WeightMode::from_flags(false, true).unwrap(), WeightMode::UnitWeighted);
        assert!(WeightMode::from_flags(true, true).is_err());
        assert!(WeightMode::from_flags(false, false).is_err());
    }

    #[test]
    fn test_missing_sam_dir() {
        let config = RunConfig::new(2, "/nonexistent/sam/dir", "/tmp", WeightMode::UnitWeighted);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("SAM directory does not exist"));
    }

    #[test]
    fn test_zero_datasets_rejected() {
        let dir = TempDir::new().unwrap();
        let config = RunConfig::new(0, dir.path(), dir.path(), WeightMode::UnitWeighted);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_mems_require_length_file() {
        let dir = TempDir::new().unwrap();
        let config = RunConfig::new(2, dir.path(), dir.path(), WeightMode::LengthWeighted);
        assert!(config.validate().is_err());

        let config = config.with_reference_length_file(dir.path().join("len.txt"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_half_mems_require_length_file() {
        let dir = TempDir::new().unwrap();
        let config =
            RunConfig::new(1, dir.path(), dir.path(), WeightMode::UnitWeighted).with_threshold(-5);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("--length-text"));
        assert_eq!(config.threshold, -5);

        let config = config.with_reference_length_file(dir.path().join("len.txt"));
        assert!(config.validate().is_ok());
    }
}
