//! Name-table key classification

/// Suffixes of keys that hold descriptive text rather than names
pub const EXCLUDED_SUFFIXES: &[&str] = &["_Caption", "_BaseName", "_InstantTips"];
/// Infixes of keys that hold descriptive text rather than names
pub const EXCLUDED_INFIXES: &[&str] = &["_Caption_"];

pub const NAME_SUFFIX: &str = "_Name";
pub const ALIAS_SUFFIX: &str = "_Alias";

/// How a table key contributes to the name map
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyClass {
    /// `{key}_Name`: a display name for `key`
    Name(String),
    /// `{key}_Alias`: an alternative name for `key`
    Alias(String),
    /// Caption, tooltip or base-name text
    Excluded,
    /// Matches no rule
    Unclassified,
}

/// Classify a table key
pub fn classify_key(key: &str) -> KeyClass {
    if EXCLUDED_SUFFIXES.iter().any(|s| key.ends_with(s))
        || EXCLUDED_INFIXES.iter().any(|s| key.contains(s))
    {
        return KeyClass::Excluded;
    }
    if let Some(stem) = key.strip_suffix(ALIAS_SUFFIX) {
        return KeyClass::Alias(stem.to_string());
    }
    if let Some(stem) = key.strip_suffix(NAME_SUFFIX) {
        return KeyClass::Name(stem.to_string());
    }
    KeyClass::Unclassified
}
