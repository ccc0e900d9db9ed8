//! Structured parse-error reporting.

use derive_more::{Display, Error};

/// Kind of syntax error encountered while scanning or parsing one MI line.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
pub enum ParseErrorKind {
    #[display("quoted string was not terminated before the end of the line")]
    UnterminatedString,
    #[display("token correlation prefix overflowed a 64-bit integer")]
    TokenOverflow,
    #[display("line did not match the expected record grammar")]
    UnexpectedToken,
    #[display("line ended before a complete record was recognized")]
    UnexpectedEndOfLine,
}

/// Structured description of a single recovered parse failure.
///
/// Produced once per line that fails to scan or parse; the driver discards
/// the partial output in progress and resynchronizes at the next prompt
/// line rather than propagating the failure out of [`crate::Parser::push`].
#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
#[display("{kind} at line {line}, column {column}")]
pub struct ParseErrorEvent {
    pub kind: ParseErrorKind,
    /// The complete offending line, exactly as it appeared in the pushed
    /// bytes, terminator (`\n` or `\r\n`) included.
    pub mi_line: Vec<u8>,
    /// Copy of the offending lexeme. Empty when the line ended before any
    /// further token could be identified (`UnexpectedEndOfLine`).
    pub lexeme: Vec<u8>,
    /// 1-based line number within this parser's lifetime.
    pub line: usize,
    /// 1-based byte offset of the offending lexeme within `mi_line`.
    pub column: usize,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_includes_position() {
        let event = ParseErrorEvent {
            kind: ParseErrorKind::UnexpectedToken,
            mi_line: b"^done,$garbage".to_vec(),
            lexeme: b"$".to_vec(),
            line: 3,
            column: 7,
        };
        assert_eq!(
            event.to_string(),
            "line did not match the expected record grammar at line 3, column 7"
        );
    }
}
