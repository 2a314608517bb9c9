use std::path::PathBuf;

use crate::tables::TableKind;

#[derive(thiserror::Error, Debug)]
pub enum AsmError {
    #[error("Failed to read {table} table from {}: {source}", .path.display())]
    TableIo {
        table: TableKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed {table} table: {reason}")]
    TableFormat { table: TableKind, reason: String },
    #[error("line {line}: malformed label declaration `{text}`")]
    MalformedLabel { line: usize, text: String },
    #[error("line {line}: address instruction `{text}` has no operand")]
    EmptyOperand { line: usize, text: String },
    #[error("line {line}: address {value} in `{text}` does not fit in 15 bits")]
    AddressOutOfRange {
        line: usize,
        text: String,
        value: String,
    },
    #[error("line {line}: unknown {field} mnemonic `{mnemonic}` in `{text}`")]
    UnknownMnemonic {
        line: usize,
        field: TableKind,
        mnemonic: String,
        text: String,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AsmError {
    /// Source line the error points at, for errors raised while translating.
    pub fn line(&self) -> Option<usize> {
        match self {
            AsmError::MalformedLabel { line, .. }
            | AsmError::EmptyOperand { line, .. }
            | AsmError::AddressOutOfRange { line, .. }
            | AsmError::UnknownMnemonic { line, .. } => Some(*line),
            _ => None,
        }
    }
}
