//! Prototype-style records
//!
//! Actor parameters, components and parameter tables are stored as
//! JSON-converted BYML trees. Every file wraps its fields in a `RootNode`
//! object, and a record may name a base record in `$parent` that it extends.
//!
//! # Overview
//!
//! - [`merge`] / [`merged`] - right-biased recursive merge of two records
//! - [`RecordLoader`] - loads a record and flattens its `$parent` chain,
//!   trying the object-local root before the shared root
//! - [`ComponentLocator`] - finds the file behind a named component,
//!   walking `$parent` when the component is declared on an ancestor
//!
//! # Usage
//!
//! ```no_run
//! use objtools::record::{ComponentLocator, RecordLoader};
//! use std::path::Path;
//!
//! let pack = Path::new("Pack/Actor/Enemy_Moriblin");
//! let loader = RecordLoader::new(pack, "Pack/ResidentCommon");
//! let param = loader.load_path(&pack.join("Actor/Enemy_Moriblin.engine__actor__ActorParam.json"))?;
//!
//! let locator = ComponentLocator::new("Pack/ResidentCommon");
//! let found = locator.locate(&param, "GameParameterTableRef", pack)?;
//! println!("{:?}", found.path);
//! # Ok::<(), objtools::Error>(())
//! ```

mod loader;
mod locator;

pub use loader::{RecordLoader, read_root};
pub use locator::{ComponentLocator, Located};

use serde_json::{Map, Value};

/// A parsed record: the contents of a file's `RootNode`
pub type Record = Map<String, Value>;

/// Wrapper key present in every record file
pub const ROOT_NODE: &str = "RootNode";
/// Key naming the record this one inherits from
pub const PARENT_KEY: &str = "$parent";
/// Key mapping component names to file references
pub const COMPONENTS_KEY: &str = "Components";
/// Default limit on `$parent` chain length
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Merge `overlay` into `base`
///
/// Nested objects are merged key by key. Any other conflicting value is
/// replaced by the overlay's, so the descendant always wins.
pub fn merge(base: &mut Record, overlay: Record) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(nested)) => merge(existing, nested),
            (Some(existing), value) => {
                if *existing != value {
                    *existing = value;
                }
            }
            (None, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Return `parent` with `child` merged on top
pub fn merged(mut parent: Record, child: Record) -> Record {
    merge(&mut parent, child);
    parent
}

/// The `$parent` reference of a record, if it names one
pub fn parent_reference(record: &Record) -> Option<&str> {
    record
        .get(PARENT_KEY)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// The file reference declared for `component`, if any
///
/// Returns `Some("")` when the component is declared without a file.
pub fn component_reference<'a>(record: &'a Record, component: &str) -> Option<&'a str> {
    record
        .get(COMPONENTS_KEY)
        .and_then(Value::as_object)
        .and_then(|components| components.get(component))
        .map(|value| value.as_str().unwrap_or_default())
}

/// Turn an asset reference into a path relative to a record root
///
/// `Work/` and the leading `?` both mark the object root; `.gyml` and
/// `.bgyml` files exist on disk as `.json` conversions.
pub fn normalize_reference(reference: &str) -> String {
    let converted = reference
        .replace(".bgyml", ".json")
        .replace(".gyml", ".json");
    let relative = converted
        .strip_prefix("Work/")
        .or_else(|| converted.strip_prefix('?'))
        .unwrap_or(&converted);
    relative.to_string()
}

/// Walk a `/`-separated path of object keys
pub fn get_path<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('/');
    let mut current = record.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// File stem of an asset reference (`Work/Actor/Foo.engine__actor__ActorParam.gyml` -> `Foo`)
pub fn reference_stem(reference: &str) -> &str {
    let file = reference.rsplit('/').next().unwrap_or(reference);
    file.split('.').next().unwrap_or(file)
}
