use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::path::Path;

use hack_asm::decoder::parse_word;
use hack_asm::disasm::fmt_word;
use hack_asm::Tables;

#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub addr: u32,
    pub word: String,
    pub text: String,
}

/// Tables from `dir`, or the built-in copy when no directory is given.
pub fn load_tables(dir: Option<&Path>) -> Result<Tables> {
    match dir {
        Some(dir) => Tables::load_dir(dir)
            .with_context(|| format!("loading tables from {}", dir.display())),
        None => Tables::builtin().context("loading built-in tables"),
    }
}

pub fn load_hack(path: &Path) -> Result<Vec<u16>> {
    let text = std::fs::read_to_string(path)?;
    parse_hack(&text)
}

/// Parse `.hack` text. Blank lines are skipped; any other line must be a
/// 16-digit binary word.
pub fn parse_hack(text: &str) -> Result<Vec<u16>> {
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| parse_word(l).ok_or_else(|| anyhow!("line {}: not a 16-bit word: {:?}", i + 1, l)))
        .collect()
}

pub fn listing(words: &[u16], tables: &Tables) -> Vec<Entry> {
    words
        .iter()
        .enumerate()
        .map(|(addr, w)| Entry {
            addr: addr as u32,
            word: format!("{w:016b}"),
            text: fmt_word(*w, tables),
        })
        .collect()
}
