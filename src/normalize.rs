use crate::error::AsmError;

pub const COMMENT: &str = "//";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// `(NAME)` declaration
    Label(String),
    /// Instruction text with whitespace and comments removed
    Instruction(String),
}

/// Normalize one raw source line. `line` is the 1-based line number, used
/// only for diagnostics.
///
/// ASCII whitespace (plus vertical tab) is dropped everywhere before the
/// comment marker is searched for, so `D = A // x` becomes `D=A`. Other
/// Unicode spaces are kept. Blank and comment-only lines yield `None`.
pub fn normalize(raw: &str, line: usize) -> Result<Option<Line>, AsmError> {
    let mut text: String = raw
        .chars()
        .filter(|c| !(c.is_ascii_whitespace() || *c == '\u{0B}'))
        .collect();
    if let Some(pos) = text.find(COMMENT) {
        text.truncate(pos);
    }
    if text.is_empty() {
        return Ok(None);
    }

    if let Some(rest) = text.strip_prefix('(') {
        return match rest.strip_suffix(')') {
            Some(name) if !name.is_empty() && !name.contains(|c| c == '(' || c == ')') => {
                Ok(Some(Line::Label(name.to_string())))
            }
            _ => Err(AsmError::MalformedLabel { line, text }),
        };
    }

    Ok(Some(Line::Instruction(text)))
}
