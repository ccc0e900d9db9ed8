//! A streaming parser for the [GDB/MI machine
//! interface](https://sourceware.org/gdb/current/onlinedocs/gdb.html/GDB_002fMI.html)
//! protocol: the line-oriented, sigil-prefixed text format GDB speaks when
//! driven by a front end instead of a human at the console.
//!
//! This crate never opens a pipe and never spawns `gdb` itself. It consumes
//! whatever bytes a host reads from GDB's stdout (in any chunking the host
//! happens to receive them in — partial lines, several lines at once, a
//! single byte at a time) and turns them into a sequence of structured
//! [`model::Output`] values, one per `(gdb) ` prompt.
//!
//! Two front ends are provided over the same core:
//!
//! - [`Parser`] hands back whole [`model::Output`] trees through the
//!   [`OutputSink`] trait, for callers that want to walk the parse tree
//!   themselves.
//! - [`Dispatcher`] fans each output's records out individually through the
//!   [`MiEventSink`] trait, for callers that want per-record callbacks and
//!   never need to hold a whole output in memory at once.
//!
//! Both are push-mode: feed bytes in with `push`/`push_data` as they
//! arrive, and the sink's methods fire synchronously from inside that
//! call, in the order the records appeared in the input. Neither type is
//! `Send`/`Sync` by itself unless its sink is; a host that wants to move
//! parsing across threads does so the same way it would with any other
//! `!Sync` owner of mutable state — there is no process-wide handle or
//! global lock anywhere in this crate, unlike a C library that would
//! typically expose one of each.
//!
//! Diagnostics are emitted through [`tracing`]; this crate never installs a
//! subscriber itself, so a host controls whether and where any of it is
//! shown.

pub mod catalog;
pub mod dispatch;
pub mod driver;
pub mod error;
pub(crate) mod grammar;
pub(crate) mod lexer;
pub mod model;

pub use dispatch::{Dispatcher, MiEventSink};
pub use driver::{OutputSink, Parser, PushError};
pub use error::{ParseErrorEvent, ParseErrorKind};
pub use model::{
    AsyncClass, AsyncKind, AsyncRecord, OobRecord, Output, ResultClass, ResultEntry, ResultRecord,
    ResultTuple, StreamKind, StreamRecord, Value,
};

#[cfg(test)]
mod test {
    use super::*;

    struct Count(usize);
    impl MiEventSink for Count {
        fn prompt(&mut self) {
            self.0 += 1;
        }
    }

    #[test]
    fn public_api_round_trip() {
        let mut dispatcher = Dispatcher::new(Count(0));
        dispatcher.push_data(b"^done\n(gdb) \n").unwrap();
        assert_eq!(dispatcher.into_sink().0, 1);
    }
}
