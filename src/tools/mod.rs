//! Regression-corpus helpers shared by the CLI and tests.
//!
//! A corpus is a directory holding `barcodes.txt` and the images it names.
//! Each non-blank manifest line is `<expected 65-char string> <combo>...`;
//! line `n` (counting non-blank lines from 1) with combo `c` refers to the
//! image `t{n}_{c}.png` next to the manifest.

use crate::error::ScanError;
use crate::models::{BarcodeString, NUM_BARS};
use crate::pipeline::Scanner;
use rayon::prelude::*;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default manifest file name
pub const MANIFEST_NAME: &str = "barcodes.txt";

/// One image of the corpus and the string it must decode to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    /// One-based barcode number
    pub barcode: usize,
    /// Capture-condition tag from the manifest
    pub combo: String,
    /// Image path
    pub image: PathBuf,
    /// Expected decode
    pub expected: BarcodeString,
}

/// Image name for barcode `n` captured under `combo`
pub fn image_name(barcode: usize, combo: &str) -> String {
    format!("t{barcode}_{combo}.png")
}

/// Parse a manifest's text. `path` is used for error messages and to resolve
/// image paths.
pub fn parse_manifest_str(path: &Path, content: &str) -> Result<Vec<CorpusEntry>, ScanError> {
    let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let mut entries = Vec::new();
    let mut barcode = 0usize;

    for (index, line) in content.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let Some(expected) = tokens.next() else {
            continue;
        };
        barcode += 1;

        let expected: BarcodeString = expected.parse().map_err(|e| ScanError::Manifest {
            path: path.to_path_buf(),
            line: index + 1,
            reason: format!("{e}"),
        })?;

        for combo in tokens {
            entries.push(CorpusEntry {
                barcode,
                combo: combo.to_string(),
                image: root.join(image_name(barcode, combo)),
                expected,
            });
        }
    }

    Ok(entries)
}

/// Read and parse the manifest at `path`
pub fn parse_manifest(path: &Path) -> Result<Vec<CorpusEntry>, ScanError> {
    let content = fs::read_to_string(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest_str(path, &content)
}

/// Per-position diff: a space where `scanned` matches `expected`, the
/// expected character where it does not. Always [`NUM_BARS`] wide.
pub fn diff_line(expected: &str, scanned: &str) -> String {
    let mut scanned = scanned.chars();
    expected
        .chars()
        .chain(std::iter::repeat(' '))
        .take(NUM_BARS)
        .map(|e| match scanned.next() {
            Some(s) if s == e => ' ',
            _ => e,
        })
        .collect()
}

/// Outcome of one corpus image
#[derive(Debug)]
pub struct CaseResult {
    /// The corpus entry
    pub entry: CorpusEntry,
    /// What the scanner produced
    pub scanned: Result<BarcodeString, ScanError>,
}

impl CaseResult {
    /// Whether the scan matched the expected string
    pub fn passed(&self) -> bool {
        matches!(&self.scanned, Ok(s) if *s == self.entry.expected)
    }
}

/// Results of a whole corpus run, in manifest order
#[derive(Debug, Default)]
pub struct CorpusReport {
    /// Every case
    pub cases: Vec<CaseResult>,
}

impl CorpusReport {
    /// Number of matching cases
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.passed()).count()
    }

    /// Number of cases
    pub fn total(&self) -> usize {
        self.cases.len()
    }

    /// Whether every case matched
    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }

    /// Failed cases
    pub fn failures(&self) -> impl Iterator<Item = &CaseResult> {
        self.cases.iter().filter(|c| !c.passed())
    }
}

impl fmt::Display for CorpusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for case in self.failures() {
            let expected = case.entry.expected.to_string();
            writeln!(f, "{}", case.entry.image.display())?;
            match &case.scanned {
                Ok(scanned) => {
                    writeln!(f, "\t{}", expected)?;
                    writeln!(f, "\t{}.", diff_line(&expected, &scanned.to_string()))?;
                }
                Err(err) => writeln!(f, "\terror: {}", err)?,
            }
        }
        write!(f, "Done. {}/{} passed", self.passed(), self.total())
    }
}

/// Scan every entry in parallel; results keep manifest order
pub fn run_corpus(scanner: &Scanner, entries: &[CorpusEntry]) -> CorpusReport {
    let cases = entries
        .par_iter()
        .map(|entry| CaseResult {
            entry: entry.clone(),
            scanned: scanner.scan_path(&entry.image),
        })
        .collect();
    CorpusReport { cases }
}

/// Recursively collect image files under `root`, sorted
pub fn collect_images(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                // Skip our own debug output
                if path.file_name().is_some_and(|n| n == "out") {
                    continue;
                }
                stack.push(path);
                continue;
            }
            if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy().to_lowercase();
                if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "bmp" | "tif" | "tiff") {
                    images.push(path);
                }
            }
        }
    }

    images.sort();
    images
}
