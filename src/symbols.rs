use std::collections::HashMap;

use tracing::debug;

use crate::error::AsmError;
use crate::tables::{Table, TableKind};

/// First RAM address handed out to variables.
pub const VARIABLE_BASE: u32 = 16;

/// Symbol name -> address. Holds predefined symbols, labels (bound in the
/// first pass) and variables (allocated lazily in the second pass).
#[derive(Debug, Clone)]
pub struct SymbolTable {
    entries: HashMap<String, u32>,
    next_variable: u32,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_variable: VARIABLE_BASE,
        }
    }

    /// Start from the predefined architecture symbols.
    pub fn with_predefined(table: &Table) -> Result<Self, AsmError> {
        let mut symbols = Self::new();
        for (name, value) in table.iter() {
            let addr = value.parse::<u32>().map_err(|_| AsmError::TableFormat {
                table: TableKind::Symbols,
                reason: format!("`{name}` has non-numeric address `{value}`"),
            })?;
            symbols.entries.insert(name.to_string(), addr);
        }
        Ok(symbols)
    }

    /// Bind `name` to `addr`, returning the previous binding if any.
    pub fn bind(&mut self, name: &str, addr: u32) -> Option<u32> {
        self.entries.insert(name.to_string(), addr)
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Address of `name`, allocating the next variable slot if it is unbound.
    /// Existing bindings (predefined or label) always win.
    pub fn resolve_or_allocate(&mut self, name: &str) -> u32 {
        if let Some(addr) = self.get(name) {
            return addr;
        }
        let addr = self.next_variable;
        self.next_variable += 1;
        self.entries.insert(name.to_string(), addr);
        debug!(symbol = name, addr, "allocated variable");
        addr
    }

    /// Next address a new variable would receive.
    pub fn next_variable(&self) -> u32 {
        self.next_variable
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All bindings ordered by address, then name.
    pub fn sorted(&self) -> Vec<(&str, u32)> {
        let mut out: Vec<(&str, u32)> = self
            .entries
            .iter()
            .map(|(name, addr)| (name.as_str(), *addr))
            .collect();
        out.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        out
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
