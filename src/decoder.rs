use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decoded {
    /// MSB clear: load a 15-bit value
    Address(u16),
    /// `111` prefix followed by the comp (7), dest (3) and jump (3) fields
    Compute { comp: u8, dest: u8, jump: u8 },
}

/// Split a machine word into its fields. Words with the top bit set but a
/// prefix other than `111` are not valid instructions.
pub fn decode(word: u16) -> Option<Decoded> {
    if word & 0x8000 == 0 {
        return Some(Decoded::Address(word));
    }
    if word >> 13 != 0b111 {
        return None;
    }
    Some(Decoded::Compute {
        comp: ((word >> 6) & 0x7F) as u8,
        dest: ((word >> 3) & 0x7) as u8,
        jump: (word & 0x7) as u8,
    })
}

/// Parse one line of `.hack` output (exactly 16 `0`/`1` characters).
pub fn parse_word(line: &str) -> Option<u16> {
    let line = line.trim();
    if line.len() != 16 || !line.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }
    u16::from_str_radix(line, 2).ok()
}
