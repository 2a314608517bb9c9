pub mod assembler;
pub mod decoder;
pub mod disasm;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod symbols;
pub mod tables;

pub use assembler::{assemble, translate, Program};
pub use error::AsmError;
pub use symbols::SymbolTable;
pub use tables::{Table, TableKind, Tables};
