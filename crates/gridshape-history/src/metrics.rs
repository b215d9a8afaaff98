//! History event hooks.
//!
//! Compiled down to a no-op unless the `tracing` feature is on. Subscribers
//! are installed by the binary layer.

#[cfg(feature = "tracing")]
pub fn emit_span(event: &str, key_values: &[(&str, String)]) {
    let span = tracing::debug_span!("gridshape_history", event);
    let _enter = span.enter();
    for (k, v) in key_values {
        tracing::debug!(%event, %k, %v, "history");
    }
}

#[cfg(not(feature = "tracing"))]
pub fn emit_span(_event: &str, _key_values: &[(&str, String)]) { /* no-op */
}
