//! Component file lookup

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::{
    DEFAULT_MAX_DEPTH, Record, component_reference, normalize_reference, parent_reference,
    read_root,
};
use crate::error::{Error, Result};

/// Result of a component lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    /// The component file, if one was found
    pub path: Option<PathBuf>,
    /// Root that later lookups for this object should use
    ///
    /// Once the chain passes through an ancestor stored in the shared root,
    /// everything below it resolves against the shared root too.
    pub root: PathBuf,
}

impl Located {
    fn not_found(root: &Path) -> Self {
        Self {
            path: None,
            root: root.to_path_buf(),
        }
    }
}

/// Finds component files declared on a record or its ancestors
#[derive(Debug, Clone)]
pub struct ComponentLocator {
    common_root: PathBuf,
    max_depth: usize,
}

impl ComponentLocator {
    pub fn new<P: Into<PathBuf>>(common_root: P) -> Self {
        Self {
            common_root: common_root.into(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Locate the file for `component`, starting at `record`
    ///
    /// A component declared on the record itself is looked up in
    /// `object_root`, then in the shared root. Otherwise the lookup moves to
    /// the `$parent` record, read from whichever root holds it. A missing
    /// file is not an error; it yields a [`Located`] without a path.
    pub fn locate(&self, record: &Record, component: &str, object_root: &Path) -> Result<Located> {
        let mut visited = HashSet::new();
        self.locate_inner(record, component, object_root, &mut visited)
    }

    /// Locate a component and read its `RootNode`
    ///
    /// The component's own `$parent` is not merged; callers walk it with
    /// further [`locate`](Self::locate) calls when needed.
    pub fn load(
        &self,
        record: &Record,
        component: &str,
        object_root: &Path,
    ) -> Result<Option<(Record, PathBuf)>> {
        let located = self.locate(record, component, object_root)?;
        match located.path {
            Some(path) => Ok(Some((read_root(&path)?, located.root))),
            None => Ok(None),
        }
    }

    fn locate_inner(
        &self,
        record: &Record,
        component: &str,
        object_root: &Path,
        visited: &mut HashSet<PathBuf>,
    ) -> Result<Located> {
        if let Some(reference) = component_reference(record, component) {
            let relative = normalize_reference(reference);
            if relative.is_empty() {
                return Ok(Located::not_found(object_root));
            }
            for candidate in [object_root.join(&relative), self.common_root.join(&relative)] {
                if candidate.is_file() {
                    tracing::debug!("{} -> {}", component, candidate.display());
                    return Ok(Located {
                        path: Some(candidate),
                        root: object_root.to_path_buf(),
                    });
                }
            }
            return Ok(Located::not_found(object_root));
        }

        let Some(parent) = parent_reference(record) else {
            return Ok(Located::not_found(object_root));
        };
        let stub = normalize_reference(parent);

        let local = object_root.join(&stub);
        let (parent_path, parent_root) = if local.is_file() {
            (local, object_root.to_path_buf())
        } else {
            let common = self.common_root.join(&stub);
            if !common.is_file() {
                return Ok(Located::not_found(object_root));
            }
            (common, self.common_root.clone())
        };

        if !visited.insert(parent_path.clone()) {
            return Err(Error::ParentCycle {
                chain: visited
                    .iter()
                    .map(|p| p.display().to_string())
                    .chain(std::iter::once(parent_path.display().to_string()))
                    .collect(),
            });
        }
        if visited.len() > self.max_depth {
            return Err(Error::ParentDepthExceeded {
                reference: parent.to_string(),
                limit: self.max_depth,
            });
        }

        let parent_record = read_root(&parent_path)?;
        self.locate_inner(&parent_record, component, &parent_root, visited)
    }
}
