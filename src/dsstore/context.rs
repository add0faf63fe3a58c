//! Per-parse state shared by the format stages.

use log::warn;

use super::types::error::{FormatWarning, Result};

/// Collects format anomalies for a single parse.
///
/// In strict mode the first anomaly aborts the parse instead.
#[derive(Debug, Default)]
pub struct ParseContext {
    strict: bool,
    warnings: Vec<FormatWarning>,
}

impl ParseContext {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            warnings: Vec::new(),
        }
    }

    pub fn report(&mut self, warning: FormatWarning) -> Result<()> {
        warn!("{}", warning);
        if self.strict {
            return Err(warning.into());
        }
        self.warnings.push(warning);
        Ok(())
    }

    pub fn warnings(&self) -> &[FormatWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<FormatWarning> {
        self.warnings
    }
}
