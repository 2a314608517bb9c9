use crate::decoder::{decode, Decoded};
use crate::parser::NULL_MNEMONIC;
use crate::tables::Tables;

/// Render a decoded word as assembly, or `None` if a field code has no
/// mnemonic in `tables`.
pub fn fmt_decoded(d: &Decoded, tables: &Tables) -> Option<String> {
    match *d {
        Decoded::Address(v) => Some(format!("@{v}")),
        Decoded::Compute { comp, dest, jump } => {
            let comp = tables.comp.key_for(&format!("{comp:07b}"))?;
            let dest = tables.dest.key_for(&format!("{dest:03b}"))?;
            let jump = tables.jump.key_for(&format!("{jump:03b}"))?;
            let mut s = String::new();
            if dest != NULL_MNEMONIC {
                s.push_str(dest);
                s.push('=');
            }
            s.push_str(comp);
            if jump != NULL_MNEMONIC {
                s.push(';');
                s.push_str(jump);
            }
            Some(s)
        }
    }
}

/// Disassemble one word; anything undecodable is shown as raw data.
pub fn fmt_word(word: u16, tables: &Tables) -> String {
    decode(word)
        .and_then(|d| fmt_decoded(&d, tables))
        .unwrap_or_else(|| format!(".word {word:#018b}"))
}
