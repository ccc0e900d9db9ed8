//! Push-mode front end that turns arbitrary byte writes into completed
//! [`crate::model::Output`] values.

use crate::{
    error::ParseErrorEvent,
    grammar::{self, Line},
    model::{OobRecord, Output, ResultRecord},
};
use derive_more::{Display, Error};

/// Failure returned by [`Parser::push`].
///
/// The standard allocator aborts the process on allocation failure instead
/// of returning an error, so in practice nothing in this crate constructs
/// this type outside of tests; it exists so the API does not have to change
/// shape if a fallible-allocation path (e.g. `try_reserve` propagated all
/// the way through) is added later.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, Error)]
#[display("failed to grow the internal line buffer")]
pub struct PushError;

/// Receives completed output commands and recovered parse errors as a
/// [`Parser`] consumes pushed bytes.
///
/// Every method has a no-op default, so a host overrides only the events it
/// cares about.
pub trait OutputSink {
    /// Called once per completed output command, in input order.
    fn output(&mut self, output: Output) {
        let _ = output;
    }
    /// Called once per line that failed to scan or parse.
    fn parse_error(&mut self, error: ParseErrorEvent) {
        let _ = error;
    }
}

/// Turns arbitrary byte fragments into line-buffered GDB/MI output commands.
///
/// Any number of bytes may be pushed per call, including zero, a partial
/// line, or several lines at once. No callback fires until a complete line
/// (terminated by `\n`) has been seen, and no [`Output`] is delivered until
/// its terminating `(gdb) ` prompt line has been seen. Dropping a `Parser`
/// silently discards any partial line or in-progress output still buffered;
/// there is no `destroy` call, since `Drop` does the same job.
pub struct Parser<S> {
    sink: S,
    buffer: Vec<u8>,
    pending_oob: Vec<OobRecord>,
    pending_result: Option<ResultRecord>,
    line_no: usize,
    resyncing: bool,
}

impl<S: OutputSink> Parser<S> {
    /// Creates a parser that reports to `sink`.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            buffer: Vec::new(),
            pending_oob: Vec::new(),
            pending_result: None,
            line_no: 0,
            resyncing: false,
        }
    }

    /// Consumes the parser and returns the installed sink, discarding any
    /// partial in-flight line or output.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Feeds `bytes` into the parser.
    ///
    /// Re-entrant pushes (calling `push` again from inside a sink callback
    /// invoked by this same call) are a borrow-checker error at compile
    /// time for any sink that does not itself hand out a second mutable
    /// reference to this `Parser` — see the repository's design notes.
    pub fn push(&mut self, bytes: &[u8]) -> Result<(), PushError> {
        self.buffer.try_reserve(bytes.len()).map_err(|_| PushError)?;
        self.buffer.extend_from_slice(bytes);
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            // `raw_line` keeps its terminator, for error reporting; `line`
            // is the terminator-stripped slice the grammar actually parses.
            let raw_line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let mut line = raw_line.clone();
            line.pop(); // the '\n' itself
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            self.consume_line(line, raw_line);
        }
        Ok(())
    }

    fn consume_line(&mut self, line: Vec<u8>, raw_line: Vec<u8>) {
        self.line_no += 1;
        tracing::trace!(line = self.line_no, len = line.len(), "mi line");

        if self.resyncing {
            if is_prompt_line(&line) {
                self.resyncing = false;
            }
            return;
        }

        match grammar::parse_line(&line) {
            Ok(Line::Oob(record)) => self.pending_oob.push(record),
            Ok(Line::Result(record)) => self.pending_result = Some(record),
            Ok(Line::Prompt) => self.emit_output(),
            Err(e) => self.report_error(line, raw_line, e),
        }
    }

    fn emit_output(&mut self) {
        let output = Output {
            oob: std::mem::take(&mut self.pending_oob),
            result: self.pending_result.take(),
        };
        tracing::debug!(
            oob = output.oob.len(),
            has_result = output.result.is_some(),
            "mi output"
        );
        self.sink.output(output);
    }

    fn report_error(&mut self, line: Vec<u8>, raw_line: Vec<u8>, error: grammar::GrammarError) {
        let column = error.offset + 1;
        tracing::warn!(line = self.line_no, column, kind = %error.kind, "mi parse error");
        self.pending_oob.clear();
        self.pending_result = None;
        self.resyncing = !is_prompt_line(&line);
        self.sink.parse_error(ParseErrorEvent {
            kind: error.kind,
            mi_line: raw_line,
            lexeme: error.lexeme,
            line: self.line_no,
            column,
        });
    }
}

fn is_prompt_line(line: &[u8]) -> bool {
    line.strip_suffix(b" ").unwrap_or(line) == b"(gdb)"
}
