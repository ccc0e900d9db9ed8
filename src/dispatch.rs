//! Convenience layer that walks a completed [`crate::model::Output`] and
//! fans it out to a typed callback set.

use crate::{
    driver::{OutputSink, Parser, PushError},
    error::ParseErrorEvent,
    model::{AsyncRecord, OobRecord, Output, ResultRecord, StreamRecord},
};

/// Host callback set for [`Dispatcher`].
///
/// Every method has a no-op default; a host overrides only the events it
/// cares about. This replaces the C original's callback-struct-plus-void-
/// pointer-context with a plain trait object or generic type parameter:
/// the context a C host would thread through `ctx` is just `self`.
pub trait MiEventSink {
    /// A console (`~`), target (`@`), or log (`&`) stream record.
    fn stream(&mut self, record: &StreamRecord) {
        let _ = record;
    }
    /// An async exec/status/notify record.
    fn async_record(&mut self, record: &AsyncRecord) {
        let _ = record;
    }
    /// The result record for the command this output answers, if any.
    fn result(&mut self, record: &ResultRecord) {
        let _ = record;
    }
    /// Called once per completed output command, after every `stream`,
    /// `async_record`, and `result` call for that command.
    fn prompt(&mut self) {}
    /// A line failed to scan or parse and was discarded.
    fn parse_error(&mut self, error: &ParseErrorEvent) {
        let _ = error;
    }
}

struct Adapter<T>(T);

impl<T: MiEventSink> OutputSink for Adapter<T> {
    fn output(&mut self, output: Output) {
        for record in &output.oob {
            match record {
                OobRecord::Stream(r) => self.0.stream(r),
                OobRecord::Async(r) => self.0.async_record(r),
            }
        }
        if let Some(result) = &output.result {
            self.0.result(result);
        }
        self.0.prompt();
    }

    fn parse_error(&mut self, error: ParseErrorEvent) {
        self.0.parse_error(&error);
    }
}

/// Drives byte-level parsing and fans each completed output command out to
/// a [`MiEventSink`], so a host never touches [`crate::model::Output`]
/// directly.
pub struct Dispatcher<T: MiEventSink>(Parser<Adapter<T>>);

impl<T: MiEventSink> Dispatcher<T> {
    /// Creates a dispatcher that reports to `sink`.
    pub fn new(sink: T) -> Self {
        Self(Parser::new(Adapter(sink)))
    }

    /// Feeds `bytes` into the parser; see [`Parser::push`].
    pub fn push_data(&mut self, bytes: &[u8]) -> Result<(), PushError> {
        self.0.push(bytes)
    }

    /// Consumes the dispatcher and returns the installed sink.
    pub fn into_sink(self) -> T {
        self.0.into_sink().0
    }
}
