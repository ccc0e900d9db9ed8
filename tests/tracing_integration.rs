//! Confirms the crate's `tracing` instrumentation behaves under a real
//! subscriber instead of only the default no-op one: installing a
//! subscriber is the host's job, never this crate's, so this test plays
//! the host's part.

use gdbmi_parser::{Dispatcher, MiEventSink};

struct Noop;
impl MiEventSink for Noop {}

#[test]
fn parsing_under_an_installed_subscriber_does_not_panic() {
    let subscriber = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut dispatcher = Dispatcher::new(Noop);
        dispatcher
            .push_data(b"~\"booting\\n\"\n$bad\n(gdb) \n^done\n(gdb) \n")
            .expect("push should not fail");
    });
}
