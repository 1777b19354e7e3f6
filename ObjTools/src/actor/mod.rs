//! Actor packs
//!
//! The decompiled `Pack/Actor` directory holds one sub-directory per actor.
//! Each pack mirrors the game's `Work/` tree, so its ActorParam lives at
//! `{pack}/Actor/{name}.engine__actor__ActorParam.json`.

pub mod common_name;
pub mod horn;

pub use common_name::{CommonNameResult, extract_common_names};
pub use horn::{HornEntry, HornResult, extract_horns};

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::Result;

/// Suffix of the actor parameter file inside a pack
pub const ACTOR_PARAM_SUFFIX: &str = ".engine__actor__ActorParam.json";

/// One actor pack directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorPack {
    /// Actor name (the directory name)
    pub name: String,
    /// Pack directory, used as the object-local record root
    pub dir: PathBuf,
}

impl ActorPack {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
        }
    }

    /// Path of the pack's ActorParam file
    pub fn param_path(&self) -> PathBuf {
        self.dir
            .join("Actor")
            .join(format!("{}{ACTOR_PARAM_SUFFIX}", self.name))
    }

    /// Whether the pack contains an ActorParam
    pub fn has_param(&self) -> bool {
        self.param_path().is_file()
    }
}

/// Find all actor packs under `actor_root`, sorted by name
pub fn find_actor_packs<P: AsRef<Path>>(actor_root: P) -> Result<Vec<ActorPack>> {
    let mut packs = Vec::new();
    for entry in WalkDir::new(actor_root.as_ref())
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
    {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            packs.push(ActorPack::new(name, entry.path()));
        }
    }

    packs.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::info!(
        "Found {} actor packs in {}",
        packs.len(),
        actor_root.as_ref().display()
    );
    Ok(packs)
}
