use crate::error::AsmError;

pub const ADDRESS_MARKER: char = '@';
/// Table key for an omitted dest or jump field.
pub const NULL_MNEMONIC: &str = "NUL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Literal(u32),
    Symbol(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `@value` or `@symbol`
    Address(Operand),
    /// `[dest=]comp[;jump]`, omitted parts hold [`NULL_MNEMONIC`]
    Compute {
        dest: String,
        comp: String,
        jump: String,
    },
}

/// Parse a normalized instruction (no whitespace, no comment).
pub fn parse(text: &str, line: usize) -> Result<Instruction, AsmError> {
    match text.strip_prefix(ADDRESS_MARKER) {
        Some(operand) => parse_operand(operand, text, line).map(Instruction::Address),
        None => Ok(split_compute(text)),
    }
}

fn parse_operand(operand: &str, text: &str, line: usize) -> Result<Operand, AsmError> {
    if operand.is_empty() {
        return Err(AsmError::EmptyOperand {
            line,
            text: text.to_string(),
        });
    }
    let out_of_range = || AsmError::AddressOutOfRange {
        line,
        text: text.to_string(),
        value: operand.to_string(),
    };
    let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    // negative literals cannot be loaded
    if operand.strip_prefix('-').is_some_and(is_number) {
        return Err(out_of_range());
    }
    let digits = operand.strip_prefix('+').unwrap_or(operand);
    if !is_number(digits) {
        return Ok(Operand::Symbol(operand.to_string()));
    }
    // digits only: a literal, even when too large to hold
    digits
        .parse::<u32>()
        .map(Operand::Literal)
        .map_err(|_| out_of_range())
}

fn split_compute(text: &str) -> Instruction {
    let (dest, rest) = text.split_once('=').unwrap_or((NULL_MNEMONIC, text));
    let (comp, jump) = rest.split_once(';').unwrap_or((rest, NULL_MNEMONIC));
    Instruction::Compute {
        dest: dest.to_string(),
        comp: comp.to_string(),
        jump: jump.to_string(),
    }
}
