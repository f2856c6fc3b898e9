//! Caller-visible notices raised while configuring an engine.
//!
//! Notices are not errors: configuration succeeded, but something about the
//! input was adjusted or ignored. Each notice is logged through `tracing`
//! when raised and kept on the object that raised it so callers can inspect
//! it without a subscriber.

use std::fmt::Display;

use tracing::{info, warn};

use crate::process::ProcessKind;

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// Row weights did not sum to one and were rescaled.
    DirectionsRenormalized { total_weight: f64 },
    /// Rows with zero norm carry no weight and were removed.
    ZeroWeightRowsDropped { count: usize },
    /// The process does not use a direction distribution.
    DirectionsIgnored { kind: ProcessKind },
}

impl Notice {
    /// Logs the notice and hands it back for storage.
    pub(crate) fn emit(self) -> Self {
        match &self {
            Notice::DirectionsIgnored { .. } => warn!(notice = %self, "configuration notice"),
            _ => info!(notice = %self, "configuration notice"),
        }
        self
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::DirectionsRenormalized { total_weight } => write!(
                f,
                "direction weights summed to {total_weight}, renormalized to 1"
            ),
            Notice::ZeroWeightRowsDropped { count } => {
                write!(f, "dropped {count} zero-norm direction row(s)")
            }
            Notice::DirectionsIgnored { kind } => write!(
                f,
                "direction distribution is ignored for the {kind} process (axis-aligned only)"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignored_display_names_process() {
        let n = Notice::DirectionsIgnored {
            kind: ProcessKind::Mondrian,
        };
        assert!(n.to_string().contains("mondrian"));
    }

    #[test]
    fn dropped_rows_display() {
        let n = Notice::ZeroWeightRowsDropped { count: 2 };
        assert_eq!(n.to_string(), "dropped 2 zero-norm direction row(s)");
    }

    #[test]
    fn emit_returns_same_notice() {
        let n = Notice::DirectionsRenormalized { total_weight: 4.0 };
        assert_eq!(n.clone().emit(), n);
    }
}
