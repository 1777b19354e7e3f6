//! Error types for `ObjTools`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `ObjTools` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Record Errors ====================
    /// A record file exists in none of its candidate roots.
    #[error("file does not exist: {}", display_candidates(.candidates))]
    MissingFile {
        /// Every path that was tried, in resolution order.
        candidates: Vec<PathBuf>,
    },

    /// A record file has no `RootNode` wrapper.
    #[error("RootNode does not exist in {}", .path.display())]
    MalformedRecord {
        /// The file that was loaded.
        path: PathBuf,
    },

    /// A `$parent` chain refers back to a record already being resolved.
    #[error("$parent cycle: {}", .chain.join(" -> "))]
    ParentCycle {
        /// The chain of references, ending with the repeated one.
        chain: Vec<String>,
    },

    /// A `$parent` chain is deeper than the configured limit.
    #[error("$parent chain deeper than {limit} at {reference}")]
    ParentDepthExceeded {
        /// The reference at which the limit was hit.
        reference: String,
        /// The configured depth limit.
        limit: usize,
    },

    // ==================== Text Table Errors ====================
    /// A manual override redirects to a key that has no value.
    #[error("override for '{key}' references unresolved key '{target}'")]
    OverrideConflict {
        /// The key being overridden.
        key: String,
        /// The redirect target that was not found.
        target: String,
    },

    /// A manual override line is not of the form `key,value`.
    #[error("invalid override on line {line}: {content}")]
    InvalidOverride {
        /// One-based line number.
        line: usize,
        /// The offending line.
        content: String,
    },

    // ==================== Marker Errors ====================
    /// A placement hash is not an unsigned 64-bit integer.
    #[error("invalid placement hash: {value}")]
    InvalidHash {
        /// The value as found in the source file.
        value: String,
    },

    /// A placement record is missing a field or has the wrong shape.
    #[error("invalid placement in {kind}: {message}")]
    InvalidPlacement {
        /// The location-area kind the record belongs to.
        kind: String,
        /// Description of what is wrong.
        message: String,
    },

    // ==================== Tile Errors ====================
    /// The tile layout or zoom table cannot be used.
    #[error("invalid tile layout: {message}")]
    InvalidTileLayout {
        /// Description of what is invalid.
        message: String,
    },

    /// A tile could not be encoded.
    #[error("failed to encode {}: {message}", .path.display())]
    TileEncode {
        /// The tile being written.
        path: PathBuf,
        /// Encoder status.
        message: String,
    },

    /// Unknown map area letter.
    #[error("unknown map area '{0}' (expected G, S or U)")]
    UnknownArea(String),

    /// Image decoding or encoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    // ==================== Parsing Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML (msyt) parsing error.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Configuration parse error.
    #[error("config error: {0}")]
    ConfigError(#[from] toml::de::Error),

    /// Configuration serialization error.
    #[error("config serialization error: {0}")]
    ConfigSerializeError(#[from] toml::ser::Error),

    // ==================== File System Errors ====================
    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),
}

fn display_candidates(candidates: &[PathBuf]) -> String {
    candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// Add conversion from walkdir::Error
impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `ObjTools` operations.
pub type Result<T> = std::result::Result<T, Error>;
