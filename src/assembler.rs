//! Two-pass translation: labels and instruction stream first, then operand
//! resolution and encoding.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::AsmError;
use crate::normalize::{normalize, Line};
use crate::parser::{parse, Instruction, Operand};
use crate::symbols::SymbolTable;
use crate::tables::{TableKind, Tables};

/// Leading bits of every compute instruction.
pub const COMPUTE_PREFIX: &str = "111";
/// Largest value an address instruction can load (15 bits).
pub const MAX_ADDRESS: u32 = 0x7FFF;

/// One entry of the instruction stream. Its address is its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInstr {
    /// 1-based line in the source file
    pub line: usize,
    pub text: String,
}

/// Output of the first pass.
#[derive(Debug, Clone)]
pub struct FirstPass {
    pub stream: Vec<SourceInstr>,
    pub symbols: SymbolTable,
}

/// A fully translated program.
#[derive(Debug, Clone)]
pub struct Program {
    pub words: Vec<u16>,
    pub symbols: SymbolTable,
}

impl Program {
    /// One 16-character `0`/`1` string per instruction.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.words.iter().map(|w| format!("{w:016b}"))
    }

    /// The `.hack` artifact: every line terminated by `\n`.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.words.len() * 17);
        for line in self.lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Strip formatting, bind labels to the address of the next instruction and
/// collect the instruction stream.
pub fn first_pass(source: &str, mut symbols: SymbolTable) -> Result<FirstPass, AsmError> {
    let mut stream = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        match normalize(raw, line)? {
            None => {}
            Some(Line::Label(name)) => {
                let addr = stream.len() as u32;
                if let Some(prev) = symbols.bind(&name, addr) {
                    warn!(label = %name, prev, addr, line, "label re-declared, last binding wins");
                }
                debug!(label = %name, addr, "bound label");
            }
            Some(Line::Instruction(text)) => stream.push(SourceInstr { line, text }),
        }
    }
    info!(instructions = stream.len(), symbols = symbols.len(), "first pass done");
    Ok(FirstPass { stream, symbols })
}

/// Resolve operands and encode every instruction, in stream order.
pub fn second_pass(
    stream: &[SourceInstr],
    symbols: &mut SymbolTable,
    tables: &Tables,
) -> Result<Vec<u16>, AsmError> {
    let words = stream
        .iter()
        .map(|instr| encode(instr, symbols, tables))
        .collect::<Result<Vec<_>, _>>()?;
    info!(words = words.len(), next_variable = symbols.next_variable(), "second pass done");
    Ok(words)
}

/// Encode a single instruction, allocating a variable if it names an
/// unbound symbol.
pub fn encode(
    instr: &SourceInstr,
    symbols: &mut SymbolTable,
    tables: &Tables,
) -> Result<u16, AsmError> {
    match parse(&instr.text, instr.line)? {
        Instruction::Address(operand) => {
            let addr = match &operand {
                Operand::Literal(v) => *v,
                Operand::Symbol(name) => symbols.resolve_or_allocate(name),
            };
            if addr > MAX_ADDRESS {
                return Err(AsmError::AddressOutOfRange {
                    line: instr.line,
                    text: instr.text.clone(),
                    value: addr.to_string(),
                });
            }
            Ok(addr as u16)
        }
        Instruction::Compute { dest, comp, jump } => {
            let code = |kind: TableKind, mnemonic: &str| {
                tables
                    .table(kind)
                    .get(mnemonic)
                    .ok_or_else(|| AsmError::UnknownMnemonic {
                        line: instr.line,
                        field: kind,
                        mnemonic: mnemonic.to_string(),
                        text: instr.text.clone(),
                    })
            };
            let bits = format!(
                "{COMPUTE_PREFIX}{}{}{}",
                code(TableKind::Comp, &comp)?,
                code(TableKind::Dest, &dest)?,
                code(TableKind::Jump, &jump)?,
            );
            // widths are checked when the tables load
            u16::from_str_radix(&bits, 2).map_err(|_| AsmError::TableFormat {
                table: TableKind::Comp,
                reason: format!("`{}` does not encode to 16 bits", instr.text),
            })
        }
    }
}

/// Run both passes over `source`.
pub fn assemble(source: &str, tables: &Tables) -> Result<Program, AsmError> {
    let symbols = SymbolTable::with_predefined(&tables.symbols)?;
    let FirstPass { stream, mut symbols } = first_pass(source, symbols)?;
    let words = second_pass(&stream, &mut symbols, tables)?;
    Ok(Program { words, symbols })
}

/// Read all of `reader`, assemble it and write the `.hack` text to
/// `writer`. Nothing is written unless the whole program encodes.
pub fn translate<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    tables: &Tables,
) -> Result<Program, AsmError> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    let program = assemble(&source, tables)?;
    writer.write_all(program.to_text().as_bytes())?;
    writer.flush()?;
    Ok(program)
}

/// Default output path: the source path with a `.hack` extension.
pub fn hack_path(source: &Path) -> PathBuf {
    source.with_extension("hack")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hack_path_replaces_extension() {
        assert_eq!(hack_path(Path::new("prog/Max.asm")), PathBuf::from("prog/Max.hack"));
        assert_eq!(hack_path(Path::new("Add")), PathBuf::from("Add.hack"));
    }

    #[test]
    fn program_text_has_one_line_per_word() {
        let p = Program {
            words: vec![2, 0xEC10],
            symbols: SymbolTable::new(),
        };
        assert_eq!(p.to_text(), "0000000000000010\n1110110000010000\n");
    }
}
