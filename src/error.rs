use std::path::PathBuf;

/// Errors surfaced by scanning and corpus tooling
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The input could not be opened or decoded as an image
    #[error("failed to load image {}: {source}", path.display())]
    Load {
        /// Input path
        path: PathBuf,
        /// Decoder error
        #[source]
        source: image::ImageError,
    },
    /// The input decoded to an image with no pixels
    #[error("image {} has no pixels", path.display())]
    EmptyImage {
        /// Input path
        path: PathBuf,
    },
    /// A regression manifest line could not be understood
    #[error("{}:{line}: {reason}", path.display())]
    Manifest {
        /// Manifest path
        path: PathBuf,
        /// One-based line number
        line: usize,
        /// What was wrong
        reason: String,
    },
    /// Reading a regression manifest failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Failure to persist a debug artifact. Never affects scan results.
#[derive(Debug, thiserror::Error)]
pub enum DebugWriteError {
    /// Creating the output directory failed
    #[error("cannot create {}: {source}", path.display())]
    Io {
        /// Directory path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// Encoding or writing the image failed
    #[error("cannot write {}: {source}", path.display())]
    Encode {
        /// Output file
        path: PathBuf,
        /// Encoder error
        #[source]
        source: image::ImageError,
    },
}
