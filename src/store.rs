//! Item records kept inside the index page.
//!
//! The index page is the database. Each record is one line of markup,
//! `<p>Item {key} = {value}</p>`, somewhere among the page's other lines.
//! [`Document`] holds the page as a list of lines so edits are made per line
//! and everything else is written back untouched; [`ItemStore`] wraps each
//! edit in a full read-modify-write of the file.
//!
//! Keys are located by substring: the first line containing `Item {key}`
//! is the record for `key`. A key that is a prefix of another (`1` vs `12`)
//! therefore matches the longer one too.
//!
//! There is no locking. Edits are only safe while requests are handled one
//! at a time.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

const ITEM_INDENT: &str = "        ";
const PARAGRAPH_CLOSE: &str = "</p>";
const LINE_BREAK: &str = "<br>";
const CR: char = '\r';

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item `{key}` already exists")]
    Duplicate { key: String },

    #[error("item `{key}` not found")]
    Missing { key: String },

    #[error("document has no paragraph or line-break to insert after")]
    Structure,

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ── Item ──────────────────────────────────────────────────────────────────────

/// One key/value record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Item {
    pub key: String,
    pub value: String,
}

impl Item {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }

    /// Markup for the record, without indentation.
    pub fn render(&self) -> String {
        format!("<p>{}</p>", self.text())
    }

    fn text(&self) -> String {
        format!("{} = {}", marker(&self.key), self.value)
    }

    /// Reads a record back from a line of markup, if the line is one.
    pub fn parse(line: &str) -> Option<Self> {
        let inner = line.trim().strip_prefix("<p>Item ")?.strip_suffix(PARAGRAPH_CLOSE)?;
        let (key, value) = inner.split_once(" = ")?;
        Some(Self::new(key, value))
    }
}

/// The substring that identifies `key`'s record.
fn marker(key: &str) -> String {
    format!("Item {key}")
}

// ── Document ──────────────────────────────────────────────────────────────────

/// The page split on `\n`. Rendering joins the lines back, so an unedited
/// document round-trips byte for byte. A `\r` before the `\n` stays part of
/// its line, and edited lines keep the ending of the line they replace or
/// follow, so a CRLF page stays CRLF.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        Self { lines: text.split('\n').map(str::to_owned).collect() }
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    /// Index of the first line holding `key`'s marker.
    fn position(&self, key: &str) -> Option<usize> {
        let marker = marker(key);
        self.lines.iter().position(|l| l.contains(&marker))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Records in document order.
    pub fn items(&self) -> Vec<Item> {
        self.lines.iter().filter_map(|l| Item::parse(l)).collect()
    }

    /// Adds `item` on a new line after the last paragraph, or failing that
    /// after the last line break.
    pub fn insert(&mut self, item: &Item) -> Result<(), StoreError> {
        if self.contains_key(&item.key) {
            return Err(StoreError::Duplicate { key: item.key.clone() });
        }
        let anchor = self
            .last_line_with(PARAGRAPH_CLOSE)
            .or_else(|| self.last_line_with(LINE_BREAK))
            .ok_or(StoreError::Structure)?;
        let mut line = format!("{ITEM_INDENT}{}", item.render());
        if self.lines[anchor].ends_with(CR) {
            line.push(CR);
        }
        self.lines.insert(anchor + 1, line);
        Ok(())
    }

    /// Rewrites the record line from the marker to the end of the line.
    pub fn update(&mut self, item: &Item) -> Result<(), StoreError> {
        let idx = self
            .position(&item.key)
            .ok_or_else(|| StoreError::Missing { key: item.key.clone() })?;
        let line = &mut self.lines[idx];
        let crlf = line.ends_with(CR);
        if let Some(start) = line.find(&marker(&item.key)) {
            line.truncate(start);
            line.push_str(&item.text());
            line.push_str(PARAGRAPH_CLOSE);
            if crlf {
                line.push(CR);
            }
        }
        Ok(())
    }

    /// Removes the whole record line.
    pub fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let idx = self
            .position(key)
            .ok_or_else(|| StoreError::Missing { key: key.to_owned() })?;
        self.lines.remove(idx);
        Ok(())
    }

    fn last_line_with(&self, needle: &str) -> Option<usize> {
        self.lines.iter().rposition(|l| l.contains(needle))
    }
}

// ── ItemStore ─────────────────────────────────────────────────────────────────

/// File-backed item records. Every call reads the whole file and, when it
/// changes something, writes the whole file back.
#[derive(Clone, Debug)]
pub struct ItemStore {
    path: PathBuf,
}

impl ItemStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn create(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.edit(|doc| doc.insert(&Item::new(key, value)))?;
        debug!(key, value, "item created");
        Ok(())
    }

    pub fn update(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.edit(|doc| doc.update(&Item::new(key, value)))?;
        debug!(key, value, "item updated");
        Ok(())
    }

    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.edit(|doc| doc.remove(key))?;
        debug!(key, "item deleted");
        Ok(())
    }

    pub fn items(&self) -> Result<Vec<Item>, StoreError> {
        Ok(self.load()?.items())
    }

    fn load(&self) -> Result<Document, StoreError> {
        Ok(Document::parse(&fs::read_to_string(&self.path)?))
    }

    fn edit(&self, op: impl FnOnce(&mut Document) -> Result<(), StoreError>) -> Result<(), StoreError> {
        let mut doc = self.load()?;
        op(&mut doc)?;
        fs::write(&self.path, doc.render())?;
        Ok(())
    }
}
