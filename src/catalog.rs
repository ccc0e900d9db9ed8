//! Closed name catalogs for [`crate::model::ResultClass`] and
//! [`crate::model::AsyncClass`].
//!
//! Both lookups are total: a name outside the catalog resolves to the
//! enum's `Unsupported` variant instead of rejecting the record. Upstream
//! GDB has occasionally introduced new async classes between releases, and
//! a front end built on this crate should keep working (minus
//! interpretation of the new class) rather than error out.

use crate::model::{AsyncClass, ResultClass};

impl ResultClass {
    /// Recognizes a result-class name against the closed catalog.
    ///
    /// Always succeeds: a name outside the catalog resolves to
    /// [`ResultClass::Unsupported`].
    pub fn recognize(name: &str) -> Self {
        match name {
            "done" => Self::Done,
            "running" => Self::Running,
            "connected" => Self::Connected,
            "error" => Self::Error,
            "exit" => Self::Exit,
            _ => Self::Unsupported,
        }
    }
}

impl AsyncClass {
    /// Recognizes an async-class name against the closed catalog.
    ///
    /// Always succeeds: a name outside the catalog resolves to
    /// [`AsyncClass::Unsupported`].
    pub fn recognize(name: &str) -> Self {
        match name {
            "stopped" => Self::Stopped,
            "running" => Self::Running,
            "thread-group-added" => Self::ThreadGroupAdded,
            "thread-group-removed" => Self::ThreadGroupRemoved,
            "thread-group-started" => Self::ThreadGroupStarted,
            "thread-group-exited" => Self::ThreadGroupExited,
            "thread-created" => Self::ThreadCreated,
            "thread-exited" => Self::ThreadExited,
            "thread-selected" => Self::ThreadSelected,
            "library-loaded" => Self::LibraryLoaded,
            "library-unloaded" => Self::LibraryUnloaded,
            "breakpoint-created" => Self::BreakpointCreated,
            "breakpoint-modified" => Self::BreakpointModified,
            "breakpoint-deleted" => Self::BreakpointDeleted,
            "record-started" => Self::RecordStarted,
            "record-stopped" => Self::RecordStopped,
            "cmd-param-changed" => Self::CmdParamChanged,
            "memory-changed" => Self::MemoryChanged,
            "tsv-created" => Self::TsvCreated,
            "tsv-deleted" => Self::TsvDeleted,
            "tsv-modified" => Self::TsvModified,
            "download" => Self::Download,
            _ => Self::Unsupported,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn recognizes_known_result_classes() {
        assert_eq!(ResultClass::recognize("done"), ResultClass::Done);
        assert_eq!(ResultClass::recognize("exit"), ResultClass::Exit);
    }

    #[test]
    fn unknown_result_class_is_unsupported_not_an_error() {
        assert_eq!(ResultClass::recognize("frobnicated"), ResultClass::Unsupported);
    }

    #[test]
    fn running_and_connected_are_not_aliased_to_done() {
        assert_ne!(ResultClass::recognize("running"), ResultClass::Done);
        assert_ne!(ResultClass::recognize("connected"), ResultClass::Done);
    }

    #[test]
    fn unknown_async_class_is_unsupported_not_aliased() {
        assert_eq!(AsyncClass::recognize("something-new"), AsyncClass::Unsupported);
    }

    #[test]
    fn recognizes_known_async_classes() {
        assert_eq!(AsyncClass::recognize("breakpoint-created"), AsyncClass::BreakpointCreated);
        assert_eq!(AsyncClass::recognize("thread-exited"), AsyncClass::ThreadExited);
    }
}
