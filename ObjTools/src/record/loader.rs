//! `$parent` resolution over two candidate roots

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{DEFAULT_MAX_DEPTH, ROOT_NODE, Record, merge, normalize_reference, parent_reference};
use crate::error::{Error, Result};

/// Read a record file and unwrap its `RootNode`
pub fn read_root<P: AsRef<Path>>(path: P) -> Result<Record> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let raw: Value = serde_json::from_str(&text)?;
    match raw {
        Value::Object(mut map) => match map.remove(ROOT_NODE) {
            Some(Value::Object(root)) => Ok(root),
            _ => Err(Error::MalformedRecord {
                path: path.to_path_buf(),
            }),
        },
        _ => Err(Error::MalformedRecord {
            path: path.to_path_buf(),
        }),
    }
}

/// Loads records and flattens their `$parent` chains
///
/// References are resolved against the object-local root first and the
/// shared root second. A reference found in neither is a
/// [`Error::MissingFile`].
#[derive(Debug, Clone)]
pub struct RecordLoader {
    work: PathBuf,
    rescom: PathBuf,
    max_depth: usize,
}

impl RecordLoader {
    /// Create a loader for one object root and the shared root
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(work: P, rescom: Q) -> Self {
        Self {
            work: work.into(),
            rescom: rescom.into(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit the length of `$parent` chains
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Candidate files for a reference, in resolution order
    pub fn candidates(&self, reference: &str) -> [PathBuf; 2] {
        let relative = normalize_reference(reference);
        [self.work.join(&relative), self.rescom.join(&relative)]
    }

    /// First existing candidate for a reference
    pub fn find(&self, reference: &str) -> Result<PathBuf> {
        let candidates = self.candidates(reference);
        candidates
            .iter()
            .find(|p| p.is_file())
            .cloned()
            .ok_or_else(|| Error::MissingFile {
                candidates: candidates.to_vec(),
            })
    }

    /// Load a record by asset reference and resolve its ancestors
    pub fn load(&self, reference: &str) -> Result<Record> {
        let mut chain = vec![normalize_reference(reference)];
        self.load_reference(reference, &mut chain)
    }

    /// Load a record from an explicit file and resolve its ancestors
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Record> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MissingFile {
                candidates: vec![path.to_path_buf()],
            });
        }
        let mut chain = vec![path.display().to_string()];
        let root = read_root(path)?;
        self.resolve(root, &mut chain)
    }

    fn load_reference(&self, reference: &str, chain: &mut Vec<String>) -> Result<Record> {
        let path = self.find(reference)?;
        tracing::debug!("Loading {} from {}", reference, path.display());
        let root = read_root(&path)?;
        self.resolve(root, chain)
    }

    fn resolve(&self, root: Record, chain: &mut Vec<String>) -> Result<Record> {
        let Some(parent) = parent_reference(&root).map(ToString::to_string) else {
            return Ok(root);
        };

        let key = normalize_reference(&parent);
        if chain.contains(&key) {
            chain.push(key);
            return Err(Error::ParentCycle {
                chain: std::mem::take(chain),
            });
        }
        if chain.len() >= self.max_depth {
            return Err(Error::ParentDepthExceeded {
                reference: parent,
                limit: self.max_depth,
            });
        }

        chain.push(key);
        let mut base = self.load_reference(&parent, chain)?;
        chain.pop();

        merge(&mut base, root);
        Ok(base)
    }
}
