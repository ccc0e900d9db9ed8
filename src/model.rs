//! Parse-tree model for GDB/MI output.
//!
//! Based on the output grammar documented at
//! <https://sourceware.org/gdb/current/onlinedocs/gdb.html/GDB_002fMI-Output-Syntax.html>
//! and the output record catalog at
//! <https://sourceware.org/gdb/current/onlinedocs/gdb.html/GDB_002fMI-Output-Records.html>.
//!
//! Every parent exclusively owns its children and siblings are held in a
//! `Vec`, in order. There is no separate `free`/`append` pair: dropping an
//! [`Output`] releases the whole tree, and pushing to a `Vec` is the
//! "append" operation used while the grammar engine reduces a record.

use derive_more::{Display, From};

/// One completed GDB/MI output command: the out-of-band records and the
/// optional result record that preceded a single `(gdb) ` prompt.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Output {
    /// Stream and async records, in the order GDB emitted them.
    pub oob: Vec<OobRecord>,
    /// The result record that answered the command, if GDB sent one.
    pub result: Option<ResultRecord>,
}

/// Out-of-band record: emitted without being a direct reply to a front-end command.
#[derive(Clone, PartialEq, Eq, Debug, From)]
pub enum OobRecord {
    Stream(StreamRecord),
    Async(AsyncRecord),
}

/// Which stream a [`StreamRecord`] came from.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
pub enum StreamKind {
    /// `~`: console output, the text a human would see in a GDB CLI.
    #[display("console")]
    Console,
    /// `@`: output produced by the debugged target itself.
    #[display("target")]
    Target,
    /// `&`: GDB's own log/diagnostic channel.
    #[display("log")]
    Log,
}

/// Free-form textual output: a console, target, or log stream record.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StreamRecord {
    pub kind: StreamKind,
    /// Decoded payload bytes. Byte-transparent: every byte that survives
    /// quoted-string escape decoding is preserved, not just valid UTF-8.
    pub payload: Vec<u8>,
}

/// Which sigil introduced an [`AsyncRecord`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
pub enum AsyncKind {
    /// `+`: progress/status notification for a still-running command.
    #[display("status")]
    Status,
    /// `*`: the inferior's execution state changed.
    #[display("exec")]
    Exec,
    /// `=`: a notification unrelated to execution state (breakpoints, threads, ...).
    #[display("notify")]
    Notify,
}

/// Asynchronous, out-of-band state-change notification.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AsyncRecord {
    /// Correlation token, if GDB echoed one back. `None` means absent;
    /// GDB normally omits tokens on async records even when a command
    /// token was outstanding.
    pub token: Option<u64>,
    pub kind: AsyncKind,
    pub class: AsyncClass,
    pub results: ResultTuple,
}

/// Reply to a front-end command (`^`-prefixed).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ResultRecord {
    pub token: Option<u64>,
    pub class: ResultClass,
    pub results: ResultTuple,
}

/// Closed catalog of [`ResultRecord::class`] values, plus a catch-all for
/// names this crate does not recognize.
///
/// `Running` and `Connected` are kept distinct from `Done` even though
/// upstream GDB notes a future MI revision may unify them: until GDB
/// actually makes that change, aliasing them would be guessing at a
/// deprecation that may never land. A name outside the catalog always
/// becomes [`ResultClass::Unsupported`]; it is never silently aliased to
/// `Done`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
pub enum ResultClass {
    #[display("done")]
    Done,
    #[display("running")]
    Running,
    #[display("connected")]
    Connected,
    #[display("error")]
    Error,
    #[display("exit")]
    Exit,
    #[display("unsupported")]
    Unsupported,
}

/// Closed catalog of [`AsyncRecord::class`] values, plus a catch-all for
/// names this crate does not recognize. Shared by all three async sigils;
/// [`AsyncRecord::kind`] records which sigil actually introduced the record.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
pub enum AsyncClass {
    #[display("stopped")]
    Stopped,
    #[display("running")]
    Running,
    #[display("thread-group-added")]
    ThreadGroupAdded,
    #[display("thread-group-removed")]
    ThreadGroupRemoved,
    #[display("thread-group-started")]
    ThreadGroupStarted,
    #[display("thread-group-exited")]
    ThreadGroupExited,
    #[display("thread-created")]
    ThreadCreated,
    #[display("thread-exited")]
    ThreadExited,
    #[display("thread-selected")]
    ThreadSelected,
    #[display("library-loaded")]
    LibraryLoaded,
    #[display("library-unloaded")]
    LibraryUnloaded,
    #[display("breakpoint-created")]
    BreakpointCreated,
    #[display("breakpoint-modified")]
    BreakpointModified,
    #[display("breakpoint-deleted")]
    BreakpointDeleted,
    #[display("record-started")]
    RecordStarted,
    #[display("record-stopped")]
    RecordStopped,
    #[display("cmd-param-changed")]
    CmdParamChanged,
    #[display("memory-changed")]
    MemoryChanged,
    #[display("tsv-created")]
    TsvCreated,
    #[display("tsv-deleted")]
    TsvDeleted,
    #[display("tsv-modified")]
    TsvModified,
    #[display("download")]
    Download,
    #[display("unsupported")]
    Unsupported,
}

/// Data payload that contains named fields: a `{...}` tuple, or a `[...]`
/// list whose elements are all named (see [`Value::TupleList`]).
#[derive(Clone, PartialEq, Eq, Debug, Default, derive_more::Deref, derive_more::DerefMut)]
pub struct ResultTuple(pub Vec<ResultEntry>);

/// Single named entry of a [`ResultTuple`].
///
/// Corresponds to the spec's "CSTRING/TUPLE/LIST carries an optional
/// `variable`" description: the variable lives on the entry rather than on
/// [`Value`] itself, since a bare `Value` (e.g. an element of
/// [`Value::List`]) never carries one.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ResultEntry {
    pub variable: String,
    pub value: Value,
}

/// Any value in a GDB/MI result payload.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Value {
    /// `CSTRING`: a decoded quoted-string payload. Byte-transparent.
    Cstring(Vec<u8>),

    /// `TUPLE`: `{}` or `{result ("," result)*}`. Every child carries a
    /// non-empty `variable`.
    Tuple(ResultTuple),

    /// `LIST` whose elements all carry a `variable=` prefix, e.g.
    /// `[frame={...},frame={...}]`. Surfaces as "LIST" in the spec's data
    /// model but is kept distinct from [`Value::List`] so callers can tell
    /// whether the elements are named without inspecting each one.
    TupleList(ResultTuple),

    /// `LIST` whose elements are bare, unnamed values, e.g. `["a","b"]` or
    /// `[]`.
    List(Vec<Value>),
}

impl Value {
    /// Extracts the payload of a [`Value::Cstring`], if this value is one.
    pub fn into_cstring(self) -> Option<Vec<u8>> {
        match self {
            Self::Cstring(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts a [`Value::Tuple`] or [`Value::TupleList`], if this value is one.
    pub fn into_tuple(self) -> Option<ResultTuple> {
        match self {
            Self::Tuple(t) | Self::TupleList(t) => Some(t),
            _ => None,
        }
    }

    /// Extracts a [`Value::List`], if this value is one.
    pub fn into_list(self) -> Option<Vec<Value>> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }
}

impl ResultTuple {
    /// Looks up the value of the first entry named `variable`, if any.
    pub fn get(&self, variable: &str) -> Option<&Value> {
        self.0.iter().find(|e| e.variable == variable).map(|e| &e.value)
    }
}
