//! Lexical and syntactic analysis of one line of GDB/MI output.
//!
//! Each call to [`parse_line`] consumes exactly one already-line-buffered,
//! terminator-stripped slice of bytes and reduces it to a single
//! [`Line`]: one out-of-band record, one result record, or the `(gdb)`
//! prompt. Accumulating those into a complete [`crate::model::Output`]
//! across several lines is the push driver's job (`driver.rs`), not this
//! module's: the grammar here has no notion of "the output so far".

use crate::model::{
    AsyncClass, AsyncKind, AsyncRecord, OobRecord, ResultClass, ResultEntry, ResultRecord,
    ResultTuple, StreamKind, StreamRecord, Value,
};
use derive_more::{Debug, Display, Error};
use logos::Logos;
use pomelo::pomelo;

/// One line reduced to its syntactic role.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Line {
    Oob(OobRecord),
    Result(ResultRecord),
    Prompt,
}

/// Kind of failure the grammar engine's internal `%error` type can carry.
/// Turned into a [`crate::error::ParseErrorKind`] by [`parse_line`], which
/// also attaches the offending lexeme and its position.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, Error, Default)]
pub(crate) enum SyntaxError {
    /// Default: produced both by the scanner (a byte starts no token) and
    /// by the LALR tables (a token does not fit the expected production).
    #[default]
    #[display("unexpected token")]
    UnexpectedToken,
    #[display("unterminated quoted string")]
    UnterminatedString,
    #[display("token prefix overflowed u64")]
    TokenOverflow,
}

/// Richer error returned by [`parse_line`]: a [`crate::error::ParseErrorKind`]
/// plus the byte offset and text of the offending lexeme within the line.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GrammarError {
    pub kind: crate::error::ParseErrorKind,
    pub offset: usize,
    pub lexeme: Vec<u8>,
}

/// Parses one terminator-stripped line of GDB/MI output.
pub fn parse_line(line: &[u8]) -> Result<Line, GrammarError> {
    let mut lexer = parser::Token::lexer(line);
    let mut parser = parser::Parser::new();
    let mut last_offset = 0usize;
    let mut last_lexeme: Vec<u8> = Vec::new();

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        last_offset = span.start;
        last_lexeme = line[span].to_vec();
        tracing::trace!(offset = last_offset, lexeme = ?last_lexeme, ok = token.is_ok(), "mi token");
        match token {
            Ok(t) => {
                if let Err(e) = parser.parse(t) {
                    return Err(GrammarError {
                        kind: syntax_error_kind(e),
                        offset: last_offset,
                        lexeme: last_lexeme,
                    });
                }
            }
            Err(e) => {
                return Err(GrammarError {
                    kind: syntax_error_kind(e),
                    offset: last_offset,
                    lexeme: last_lexeme,
                });
            }
        }
    }

    parser.end_of_input().map_err(|_| GrammarError {
        kind: crate::error::ParseErrorKind::UnexpectedEndOfLine,
        offset: line.len(),
        lexeme: Vec::new(),
    })
}

fn syntax_error_kind(e: SyntaxError) -> crate::error::ParseErrorKind {
    match e {
        SyntaxError::UnexpectedToken => crate::error::ParseErrorKind::UnexpectedToken,
        SyntaxError::UnterminatedString => crate::error::ParseErrorKind::UnterminatedString,
        SyntaxError::TokenOverflow => crate::error::ParseErrorKind::TokenOverflow,
    }
}

fn ident_str(b: &[u8]) -> &str {
    // The Identifier regex only matches `[A-Za-z_-][A-Za-z0-9_-]*`, which is
    // always valid ASCII/UTF-8.
    std::str::from_utf8(b).expect("identifier token is ASCII by construction")
}

fn parse_token(b: &[u8]) -> Result<u64, SyntaxError> {
    std::str::from_utf8(b)
        .expect("numeric token is ASCII by construction")
        .parse()
        .map_err(|_| SyntaxError::TokenOverflow)
}

pomelo! {
    %include {
        use super::{*, Debug};
    }

    %error SyntaxError;

    %token
    /// Tokens accepted by the syntactic parser.
    #[derive(Clone, PartialEq, Eq, Debug, Logos)]
    #[logos(error = SyntaxError)]
    #[logos(source = [u8])]
    #[logos(skip r" ")]
    pub enum Token<'s> {};

    // Underlying types of nonterminal symbols
    %type line            Line;
    %type stream_record   StreamRecord;
    %type async_record    AsyncRecord;
    %type async_record1   AsyncRecord;
    %type async_class     AsyncClass;
    %type result_record   ResultRecord;
    %type result_record1  ResultRecord;
    %type result_class    ResultClass;
    %type results         ResultTuple;
    %type result          ResultEntry;
    %type value           Value;
    %type values           Vec<Value>;

    // ========================================
    //            TERMINAL SYMBOLS
    // ========================================

    %type
    #[regex(r"[A-Za-z_\-][A-Za-z0-9_\-]*")]
    #[debug("{_0:?}")]
    Identifier &'s [u8];

    %type
    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let slice = lex.slice();
        Ok::<_, SyntaxError>(crate::lexer::decode_escapes(&slice[1..slice.len() - 1]))
    })]
    #[debug("{_0:?}")]
    Quoted Vec<u8>;

    // A `"` that never reaches a closing quote on this line. Always shorter
    // than the matching `Quoted` pattern when one exists, so this only wins
    // when no closing quote is present at all.
    %type
    #[regex(r#""([^"\\]|\\.)*"#, |_| Err::<(), _>(SyntaxError::UnterminatedString))]
    #[debug("<unterminated>")]
    UnterminatedQuoted ();

    %type
    #[regex(r"[0-9]+")]
    #[debug("{_0:?}")]
    Numeric &'s [u8];

    %type
    #[token("(gdb)")]
    #[debug("(gdb)")]
    Prompt;

    %type
    #[token("^")]
    #[debug("^")]
    Caret;

    %type
    #[token("*")]
    #[debug("*")]
    Asterisk;

    %type
    #[token("+")]
    #[debug("+")]
    Plus;

    %type
    #[token("=")]
    #[debug("=")]
    Equals;

    %type
    #[token("~")]
    #[debug("~")]
    Tilde;

    %type
    #[token("@")]
    #[debug("@")]
    At;

    %type
    #[token("&")]
    #[debug("&")]
    Ampersand;

    %type
    #[token(",")]
    #[debug(",")]
    Comma;

    %type
    #[token("{")]
    #[debug("{{")]
    OpenBrace;

    %type
    #[token("}")]
    #[debug("}}")]
    CloseBrace;

    %type
    #[token("[")]
    #[debug("[")]
    OpenBracket;

    %type
    #[token("]")]
    #[debug("]")]
    CloseBracket;

    // ========================================
    //                 GRAMMAR
    // ========================================

    // Starting nonterminal: one line reduces to exactly one of these.
    line ::= stream_record(r)                                 { Line::Oob(OobRecord::Stream(r)) }
    line ::= async_record(r)                                  { Line::Oob(OobRecord::Async(r)) }
    line ::= result_record(r)                                 { Line::Result(r) }
    line ::= Prompt                                            { Line::Prompt }

    // Stream records
    stream_record ::= Tilde Quoted(s)                         { StreamRecord { kind: StreamKind::Console, payload: s } }
    stream_record ::= At Quoted(s)                            { StreamRecord { kind: StreamKind::Target, payload: s } }
    stream_record ::= Ampersand Quoted(s)                     { StreamRecord { kind: StreamKind::Log, payload: s } }

    // Async records: exec (*), status (+), notify (=)
    async_record ::= async_record1;
    async_record ::= async_record1(mut r) Comma results(e)    { r.results = e; r }
    async_record1 ::= Numeric?(n) Asterisk async_class(c)     { AsyncRecord { token: n.map(parse_token).transpose()?, kind: AsyncKind::Exec, class: c, results: ResultTuple::default() } }
    async_record1 ::= Numeric?(n) Plus async_class(c)         { AsyncRecord { token: n.map(parse_token).transpose()?, kind: AsyncKind::Status, class: c, results: ResultTuple::default() } }
    async_record1 ::= Numeric?(n) Equals async_class(c)       { AsyncRecord { token: n.map(parse_token).transpose()?, kind: AsyncKind::Notify, class: c, results: ResultTuple::default() } }
    async_class ::= Identifier(s)                             { AsyncClass::recognize(ident_str(s)) }

    // Result record
    result_record ::= result_record1;
    result_record ::= result_record1(mut r) Comma results(e)  { r.results = e; r }
    result_record1 ::= Numeric?(n) Caret result_class(c)      { ResultRecord { token: n.map(parse_token).transpose()?, class: c, results: ResultTuple::default() } }
    result_class ::= Identifier(s)                            { ResultClass::recognize(ident_str(s)) }

    // Named result entries, shared by records, tuples, and named lists
    results ::= result(e)                                     { ResultTuple(vec![e]) }
    results ::= results(mut r) Comma result(e)                { r.0.push(e); r }
    result ::= Identifier(k) Equals value(v)                  { ResultEntry { variable: ident_str(k).to_owned(), value: v } }

    // Unnamed value sequences, for plain lists
    values ::= value(e)                                       { vec![e] }
    values ::= values(mut v) Comma value(e)                   { v.push(e); v }

    value ::= Quoted(s)                                       { Value::Cstring(s) }
    value ::= OpenBrace results?(r) CloseBrace                { let t = r.unwrap_or_default(); tracing::debug!(children = t.len(), "reduced tuple"); Value::Tuple(t) }
    value ::= OpenBracket results(r) CloseBracket             { tracing::debug!(children = r.len(), "reduced named list"); Value::TupleList(r) }
    value ::= OpenBracket values?(r) CloseBracket             { let v = r.unwrap_or_default(); tracing::debug!(children = v.len(), "reduced list"); Value::List(v) }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn result_record_with_no_data() {
        let line = parse_line(b"^done").expect("should parse");
        assert_eq!(
            line,
            Line::Result(ResultRecord {
                token: None,
                class: ResultClass::Done,
                results: ResultTuple::default(),
            })
        );
    }

    #[test]
    fn result_record_with_token_and_value() {
        let line = parse_line(b"123^done,value=\"1\"").expect("should parse");
        assert_eq!(
            line,
            Line::Result(ResultRecord {
                token: Some(123),
                class: ResultClass::Done,
                results: ResultTuple(vec![ResultEntry {
                    variable: "value".to_owned(),
                    value: Value::Cstring(b"1".to_vec()),
                }]),
            })
        );
    }

    #[test]
    fn unknown_result_class_is_unsupported_not_a_parse_error() {
        let line = parse_line(b"^frobnicated").expect("should parse");
        assert_eq!(
            line,
            Line::Result(ResultRecord {
                token: None,
                class: ResultClass::Unsupported,
                results: ResultTuple::default(),
            })
        );
    }

    #[test]
    fn async_exec_record() {
        let line = parse_line(br#"*stopped,reason="breakpoint-hit""#).expect("should parse");
        assert_eq!(
            line,
            Line::Oob(OobRecord::Async(AsyncRecord {
                token: None,
                kind: AsyncKind::Exec,
                class: AsyncClass::Stopped,
                results: ResultTuple(vec![ResultEntry {
                    variable: "reason".to_owned(),
                    value: Value::Cstring(b"breakpoint-hit".to_vec()),
                }]),
            }))
        );
    }

    #[test]
    fn notify_async_record() {
        let line = parse_line(br#"=thread-created,id="1""#).expect("should parse");
        assert_eq!(
            line,
            Line::Oob(OobRecord::Async(AsyncRecord {
                token: None,
                kind: AsyncKind::Notify,
                class: AsyncClass::ThreadCreated,
                results: ResultTuple(vec![ResultEntry {
                    variable: "id".to_owned(),
                    value: Value::Cstring(b"1".to_vec()),
                }]),
            }))
        );
    }

    #[test]
    fn console_stream_record() {
        let line = parse_line(br#"~"hello\n""#).expect("should parse");
        assert_eq!(
            line,
            Line::Oob(OobRecord::Stream(StreamRecord {
                kind: StreamKind::Console,
                payload: b"hello\n".to_vec(),
            }))
        );
    }

    #[test]
    fn prompt_line() {
        assert_eq!(parse_line(b"(gdb)").expect("should parse"), Line::Prompt);
        assert_eq!(parse_line(b"(gdb) ").expect("should parse"), Line::Prompt);
    }

    #[test]
    fn nested_tuples_and_lists() {
        let line =
            parse_line(br#"^done,a={},b={x="1",y="2"},c=[],d=["1","2"],e=[x="1",y="2"]"#)
                .expect("should parse");
        let Line::Result(record) = line else {
            panic!("expected a result record");
        };
        assert_eq!(
            record.results.get("a"),
            Some(&Value::Tuple(ResultTuple::default()))
        );
        assert_eq!(record.results.get("c"), Some(&Value::List(Vec::new())));
        assert_eq!(
            record.results.get("d"),
            Some(&Value::List(vec![
                Value::Cstring(b"1".to_vec()),
                Value::Cstring(b"2".to_vec()),
            ]))
        );
        assert!(matches!(record.results.get("e"), Some(Value::TupleList(_))));
    }

    #[test]
    fn garbled_line_is_a_syntax_error() {
        let err = parse_line(b"$garbage").expect_err("should not parse");
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn unterminated_quoted_string_is_reported() {
        let err = parse_line(br#"^done,value="unterminated"#).expect_err("should not parse");
        assert_eq!(err.kind, crate::error::ParseErrorKind::UnterminatedString);
    }

    #[test]
    fn incomplete_record_is_unexpected_end_of_line() {
        let err = parse_line(b"^done,value=").expect_err("should not parse");
        assert_eq!(err.kind, crate::error::ParseErrorKind::UnexpectedEndOfLine);
    }

    #[test]
    fn token_overflowing_u64_is_reported() {
        let err =
            parse_line(b"99999999999999999999999999^done").expect_err("should not parse");
        assert_eq!(err.kind, crate::error::ParseErrorKind::TokenOverflow);
    }
}
