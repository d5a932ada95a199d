//! Tracing setup is safe to call repeatedly.

use itz_core::tracing::{init_tracing, spans::names};

#[test]
fn init_is_idempotent() {
    init_tracing();
    init_tracing();
    tracing::info!(target: "itz", "still logging after repeated init");
}

#[test]
fn span_macros_use_documented_names() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        let span = itz_core::synthesis_span!(3usize, 5usize);
        assert_eq!(span.metadata().map(|m| m.name()), Some(names::SYNTHESIS));
        let span = itz_core::fit_span!(4usize, 6usize);
        assert_eq!(span.metadata().map(|m| m.name()), Some(names::FIT));
        let span = itz_core::effects_span!("x", "y");
        assert_eq!(span.metadata().map(|m| m.name()), Some(names::EFFECTS));
    });
}
