//! Manual name overrides (`missing.csv`)
//!
//! One `key,value` pair per line. Lines starting with `#` and blank lines are
//! ignored. A value starting with `$` redirects to the already-resolved name
//! of another key; an empty value leaves the key alone.

use std::path::Path;

use crate::error::{Error, Result};

/// Marks a value as a reference to another key
pub const REDIRECT_MARKER: char = '$';
pub const COMMENT_MARKER: char = '#';

/// Value side of an override row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideValue {
    /// Literal display name
    Text(String),
    /// Use the name already resolved for this key
    Redirect(String),
    /// Nothing to apply
    Empty,
}

/// One parsed override line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRow {
    /// One-based source line
    pub line: usize,
    pub key: String,
    pub value: OverrideValue,
}

/// Parse override rows from text
///
/// Fields past the second are ignored.
pub fn parse_overrides(text: &str) -> Result<Vec<OverrideRow>> {
    let mut rows = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
            continue;
        }

        let mut fields = trimmed.split(',').map(str::trim);
        let key = fields.next().unwrap_or_default();
        let Some(value) = fields.next() else {
            return Err(Error::InvalidOverride {
                line: index + 1,
                content: raw.to_string(),
            });
        };

        let value = if value.is_empty() {
            OverrideValue::Empty
        } else if let Some(target) = value.strip_prefix(REDIRECT_MARKER) {
            OverrideValue::Redirect(target.to_string())
        } else {
            OverrideValue::Text(value.to_string())
        };

        rows.push(OverrideRow {
            line: index + 1,
            key: key.to_string(),
            value,
        });
    }
    Ok(rows)
}

/// Load and parse an override file
pub fn load_overrides<P: AsRef<Path>>(path: P) -> Result<Vec<OverrideRow>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let rows = parse_overrides(&text)?;
    tracing::info!("Read {} overrides from {}", rows.len(), path.display());
    Ok(rows)
}
