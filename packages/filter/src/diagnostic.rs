use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::error;

/// Report of a filter pass that failed and was rolled back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterReport {
    /// The filter that failed
    pub filter: String,

    /// Top-level error or panic message
    pub message: String,

    /// Underlying causes, outermost first
    pub causes: Vec<String>,
}

impl FilterReport {
    pub fn new(filter: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            message: message.into(),
            causes: Vec::new(),
        }
    }

    /// Build a report from an error and its `source()` chain
    pub fn from_error(filter: impl Into<String>, err: &(dyn std::error::Error + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        Self {
            filter: filter.into(),
            message: err.to_string(),
            causes,
        }
    }
}

impl std::fmt::Display for FilterReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "filter '{}' failed: {}", self.filter, self.message)?;
        for cause in &self.causes {
            write!(f, "\n  caused by: {}", cause)?;
        }
        Ok(())
    }
}

/// Where failed filter passes are reported
pub trait DiagnosticSink {
    fn report(&self, report: FilterReport);
}

/// Logs reports through `tracing` at error level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, report: FilterReport) {
        error!(
            filter = %report.filter,
            causes = ?report.causes,
            "Filter failed, document left unchanged: {}",
            report.message
        );
    }
}

/// Collects reports in memory; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    reports: Arc<Mutex<Vec<FilterReport>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<FilterReport> {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, report: FilterReport) {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(report);
    }
}

/// Forwards every report to each inner sink
pub struct FanoutSink {
    sinks: Vec<Box<dyn DiagnosticSink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Box<dyn DiagnosticSink>>) -> Self {
        Self { sinks }
    }
}

impl DiagnosticSink for FanoutSink {
    fn report(&self, report: FilterReport) {
        for sink in &self.sinks {
            sink.report(report.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_clones_share_buffer() {
        let sink = MemorySink::new();
        let handle = sink.clone();
        sink.report(FilterReport::new("include", "boom"));

        assert_eq!(handle.len(), 1);
        assert_eq!(handle.reports()[0].message, "boom");
    }

    #[test]
    fn test_report_from_error_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = folio_common::CommonError::Io(io);
        let report = FilterReport::from_error("exec", &err);

        assert_eq!(report.message, "IO error: disk on fire");
        assert_eq!(report.causes, vec!["disk on fire".to_string()]);
        assert!(report.to_string().contains("caused by: disk on fire"));
    }

    #[test]
    fn test_fanout() {
        let a = MemorySink::new();
        let b = MemorySink::new();
        let fanout = FanoutSink::new(vec![Box::new(a.clone()), Box::new(b.clone())]);
        fanout.report(FilterReport::new("x", "y"));
        assert_eq!((a.len(), b.len()), (1, 1));
    }
}
