/// SAM alignment record sources
///
/// Each (pivot, dataset) pair has its own SAM file under the alignment
/// directory, named `pivot_{pivot}_align_dataset_{dataset}.sam` (1-indexed).
/// Only the read name and the aligned sequence length of each record are
/// consumed.
use anyhow::{bail, Context, Result};
use noodles::{bgzf, sam};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Compressed variants tried when the plain `.sam` file is missing
const COMPRESSED_EXTENSIONS: [&str; 2] = ["gz", "bgz"];

/// One read-to-reference mapping, reduced to the fields used for evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    pub read_name: String,
    pub sequence_len: usize,
}

/// Path of the SAM file for a pivot aligned against a dataset (both 1-indexed)
pub fn alignment_path<P: AsRef<Path>>(sam_dir: P, pivot: usize, dataset: usize) -> PathBuf {
    sam_dir
        .as_ref()
        .join(format!("pivot_{pivot}_align_dataset_{dataset}.sam"))
}

/// Locate the SAM file for a (pivot, dataset) pair, falling back to a
/// bgzip-compressed copy if the plain file is absent
pub fn resolve_alignment_path<P: AsRef<Path>>(
    sam_dir: P,
    pivot: usize,
    dataset: usize,
) -> Result<PathBuf> {
    let plain = alignment_path(sam_dir, pivot, dataset);
    if plain.is_file() {
        return Ok(plain);
    }

    for ext in COMPRESSED_EXTENSIONS {
        let mut name = plain.clone().into_os_string();
        name.push(".");
        name.push(ext);
        let candidate = PathBuf::from(name);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    bail!(
        "Alignment file for pivot {pivot} against dataset {dataset} not found: {}",
        plain.display()
    )
}

/// Open a file and auto-detect bgzip compression, returning a boxed BufRead
pub fn open_sam_input<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    // Check by file extension (faster than reading magic bytes)
    let is_compressed = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| COMPRESSED_EXTENSIONS.contains(&ext))
        .unwrap_or(false);

    if is_compressed {
        Ok(Box::new(BufReader::new(bgzf::io::reader::Reader::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Streaming reader over the records of one SAM file
///
/// The header is consumed on open. The underlying file is closed when the
/// source is dropped.
pub struct SamRecordSource {
    reader: sam::io::Reader<Box<dyn BufRead>>,
    record: sam::Record,
    path: PathBuf,
}

impl SamRecordSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut reader = sam::io::Reader::new(open_sam_input(&path)?);
        reader
            .read_header()
            .with_context(|| format!("Failed to read SAM header from {}", path.display()))?;

        Ok(SamRecordSource {
            reader,
            record: sam::Record::default(),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the next record, or `None` at end of file
    pub fn next_record(&mut self) -> Result<Option<AlignmentRecord>> {
        let bytes = self
            .reader
            .read_record(&mut self.record)
            .with_context(|| format!("Malformed SAM record in {}", self.path.display()))?;
        if bytes == 0 {
            return Ok(None);
        }

        let read_name = match self.record.name() {
            Some(name) => String::from_utf8_lossy(name).into_owned(),
            None => bail!("SAM record without a read name in {}", self.path.display()),
        };

        Ok(Some(AlignmentRecord {
            read_name,
            sequence_len: self.record.sequence().len(),
        }))
    }
}

impl Iterator for SamRecordSource {
    type Item = Result<AlignmentRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
