//! Lookup tables: predefined symbols plus the dest/comp/jump field codes.
//!
//! Every table is a stream of whitespace-separated `key value` pairs. The
//! copies under `tables/` are compiled in and used unless a directory is
//! given at run time.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AsmError;
use crate::parser::NULL_MNEMONIC;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    Symbols,
    Dest,
    Comp,
    Jump,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Symbols,
        TableKind::Dest,
        TableKind::Comp,
        TableKind::Jump,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            TableKind::Symbols => "symbols.txt",
            TableKind::Dest => "dest.txt",
            TableKind::Comp => "comp.txt",
            TableKind::Jump => "jump.txt",
        }
    }

    /// Width of the bit-string codes, `None` for the symbol table.
    pub fn code_width(self) -> Option<usize> {
        match self {
            TableKind::Symbols => None,
            TableKind::Dest | TableKind::Jump => Some(3),
            TableKind::Comp => Some(7),
        }
    }

    fn builtin_text(self) -> &'static str {
        match self {
            TableKind::Symbols => include_str!("../tables/symbols.txt"),
            TableKind::Dest => include_str!("../tables/dest.txt"),
            TableKind::Comp => include_str!("../tables/comp.txt"),
            TableKind::Jump => include_str!("../tables/jump.txt"),
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableKind::Symbols => "symbol",
            TableKind::Dest => "dest",
            TableKind::Comp => "comp",
            TableKind::Jump => "jump",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Table {
    entries: BTreeMap<String, String>,
    // value -> first key declared for it, so `A+D` never shadows `D+A`
    #[serde(skip)]
    reverse: HashMap<String, String>,
}

impl Table {
    /// Parse one table. Duplicate keys keep the last value.
    pub fn parse(kind: TableKind, text: &str) -> Result<Self, AsmError> {
        let mut table = Table::default();
        let mut tokens = text.split_whitespace();
        while let Some(key) = tokens.next() {
            let value = tokens.next().ok_or_else(|| AsmError::TableFormat {
                table: kind,
                reason: format!("key `{key}` has no value"),
            })?;
            check_value(kind, key, value)?;
            table.entries.insert(key.to_string(), value.to_string());
            table
                .reverse
                .entry(value.to_string())
                .or_insert_with(|| key.to_string());
        }
        // dest and jump must carry the no-op code used for omitted fields
        if matches!(kind, TableKind::Dest | TableKind::Jump)
            && !table.entries.contains_key(NULL_MNEMONIC)
        {
            return Err(AsmError::TableFormat {
                table: kind,
                reason: format!("missing `{NULL_MNEMONIC}` entry"),
            });
        }
        Ok(table)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Reverse lookup: the first key declared with this value.
    pub fn key_for(&self, value: &str) -> Option<&str> {
        self.reverse.get(value).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn check_value(kind: TableKind, key: &str, value: &str) -> Result<(), AsmError> {
    let bad = |reason: String| AsmError::TableFormat { table: kind, reason };
    match kind.code_width() {
        None => {
            value
                .parse::<u16>()
                .map_err(|_| bad(format!("`{key}` has non-numeric address `{value}`")))?;
        }
        Some(width) => {
            if value.len() != width || !value.bytes().all(|b| b == b'0' || b == b'1') {
                return Err(bad(format!(
                    "`{key}` maps to `{value}`, expected {width} binary digits"
                )));
            }
        }
    }
    Ok(())
}

/// The four lookup tables, loaded once and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tables {
    pub symbols: Table,
    pub dest: Table,
    pub comp: Table,
    pub jump: Table,
}

impl Tables {
    /// Tables compiled in from `tables/`.
    pub fn builtin() -> Result<Self, AsmError> {
        Self::load_with(|kind| Ok(kind.builtin_text().to_string()))
    }

    /// Read `symbols.txt`, `dest.txt`, `comp.txt` and `jump.txt` from `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self, AsmError> {
        Self::load_with(|kind| {
            let path = dir.join(kind.file_name());
            std::fs::read_to_string(&path).map_err(|source| AsmError::TableIo {
                table: kind,
                path,
                source,
            })
        })
    }

    fn load_with<F>(mut read: F) -> Result<Self, AsmError>
    where
        F: FnMut(TableKind) -> Result<String, AsmError>,
    {
        let mut load = |kind: TableKind| -> Result<Table, AsmError> {
            let table = Table::parse(kind, &read(kind)?)?;
            debug!(table = %kind, entries = table.len(), "loaded table");
            Ok(table)
        };
        Ok(Self {
            symbols: load(TableKind::Symbols)?,
            dest: load(TableKind::Dest)?,
            comp: load(TableKind::Comp)?,
            jump: load(TableKind::Jump)?,
        })
    }

    pub fn table(&self, kind: TableKind) -> &Table {
        match kind {
            TableKind::Symbols => &self.symbols,
            TableKind::Dest => &self.dest,
            TableKind::Comp => &self.comp,
            TableKind::Jump => &self.jump,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_lookup_prefers_first_spelling() {
        let t = Table::parse(TableKind::Comp, "D+A 0000010\nA+D 0000010").unwrap();
        assert_eq!(t.key_for("0000010"), Some("D+A"));
        assert_eq!(t.get("A+D"), Some("0000010"));
    }

    #[test]
    fn duplicate_key_keeps_last_value() {
        let t = Table::parse(TableKind::Symbols, "X 1 X 2").unwrap();
        assert_eq!(t.get("X"), Some("2"));
        assert_eq!(t.len(), 1);
    }
}
