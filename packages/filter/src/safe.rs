use crate::diagnostic::{DiagnosticSink, FilterReport, TracingSink};
use crate::error::FilterResult;
use crate::filter::Filter;
use serde_json::Value;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::instrument;

/// Failure boundary around a filter
///
/// If the inner filter returns an error or panics, one [`FilterReport`] goes
/// to the sink and the input document is returned untouched. `apply` on a
/// `Safe` filter never fails.
///
/// The process-wide panic hook is left alone, so under the default hook a
/// panic is also printed to stderr. Binaries that want the report to be the
/// only diagnostic install their own hook (the `folio` binary logs panics at
/// `debug`).
pub struct Safe<F> {
    inner: F,
    sink: Box<dyn DiagnosticSink>,
}

/// Wrap a filter, reporting failures through `tracing`
pub fn safe<F: Filter>(filter: F) -> Safe<F> {
    safe_with(filter, TracingSink)
}

/// Wrap a filter, reporting failures to `sink`
pub fn safe_with<F: Filter>(filter: F, sink: impl DiagnosticSink + 'static) -> Safe<F> {
    Safe {
        inner: filter,
        sink: Box::new(sink),
    }
}

impl<F: Filter> Safe<F> {
    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F: Filter> Filter for Safe<F> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn description(&self) -> &str {
        self.inner.description()
    }

    #[instrument(skip_all, fields(filter = self.inner.name()))]
    fn apply(&self, ast: Value) -> FilterResult<Value> {
        let attempt = panic::catch_unwind(AssertUnwindSafe(|| self.inner.apply(ast.clone())));

        let report = match attempt {
            Ok(Ok(out)) => return Ok(out),
            Ok(Err(err)) => FilterReport::from_error(self.inner.name(), &err),
            Err(payload) => FilterReport::new(
                self.inner.name(),
                format!("panicked: {}", panic_message(payload.as_ref())),
            ),
        };

        self.sink.report(report);
        Ok(ast)
    }
}

/// Text of a panic payload, as carried by `panic!` with a message
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
