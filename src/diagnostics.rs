// ABOUTME: Collector for degraded outcomes that do not fail a command.
// ABOUTME: A skipped invalidation or an absent bucket is reported, not raised.

use std::fmt;

/// Non-fatal warnings gathered while a command runs.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Log the warning at `warn` level and keep it for the final report.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn count(&self, kind: WarningKind) -> usize {
        self.warnings.iter().filter(|w| w.kind == kind).count()
    }
}

#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn invalidation_skipped(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::InvalidationSkipped,
            message: message.into(),
        }
    }

    pub fn nothing_to_remove(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::NothingToRemove,
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Content changed but no distribution is provisioned.
    InvalidationSkipped,
    /// Teardown found no bucket.
    NothingToRemove,
}
