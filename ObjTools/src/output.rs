//! JSON output documents
//!
//! Every generated document carries a `_doc_` block recording where it is
//! meant to live, which command produced it and what it was built from.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// Key under which the provenance block is stored
pub const DOC_KEY: &str = "_doc_";

/// Provenance block written as `_doc_`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    /// Destination path inside the viewer repository
    pub path: String,
    /// Command that generated the document
    pub created: String,
    pub input_files: Vec<String>,
    pub notes: Vec<String>,
}

impl DocBlock {
    pub fn new(path: impl Into<String>, created: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            created: created.into(),
            input_files: Vec::new(),
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn input(mut self, file: impl Into<String>) -> Self {
        self.input_files.push(file.into());
        self
    }

    #[must_use]
    pub fn inputs<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_files.extend(files.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Attach this block to a document under [`DOC_KEY`]
    pub fn attach(&self, document: &mut Map<String, Value>) -> Result<()> {
        document.insert(DOC_KEY.to_string(), serde_json::to_value(self)?);
        Ok(())
    }
}

impl Serialize for DocBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("path", &self.path)?;
        map.serialize_entry("created", &self.created)?;
        map.serialize_entry("input_files", &self.input_files)?;
        // A single note is `notes`; several are numbered `notes1`, `notes2`, ...
        if let [note] = self.notes.as_slice() {
            map.serialize_entry("notes", note)?;
        } else {
            for (i, note) in self.notes.iter().enumerate() {
                map.serialize_entry(&format!("notes{}", i + 1), note)?;
            }
        }
        map.end()
    }
}

/// Layout of the written JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonStyle {
    /// Two-space indentation
    Pretty,
    /// Single line
    Compact,
}

/// Serialize `value` to `path`
pub fn write_json<P: AsRef<Path>, T: Serialize + ?Sized>(
    path: P,
    value: &T,
    style: JsonStyle,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    match style {
        JsonStyle::Pretty => serde_json::to_writer_pretty(&mut writer, value)?,
        JsonStyle::Compact => serde_json::to_writer(&mut writer, value)?,
    }
    writer.flush()?;

    tracing::info!("==> {}", path.display());
    Ok(())
}

/// Build a document from a string map plus its `_doc_` block
pub fn string_document<'a, I>(entries: I, doc: &DocBlock) -> Result<Map<String, Value>>
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut document: Map<String, Value> = entries
        .into_iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    doc.attach(&mut document)?;
    Ok(document)
}
