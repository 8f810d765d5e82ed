//! Payment status enum.

use serde::{Deserialize, Serialize};

/// Outcome of a payment attempt, as recorded on the sale record.
///
/// Only [`PaymentStatus::Success`] is ever written by the storefront: a
/// sale record exists only after the processor confirms payment. The
/// other variants cover records created by reconciliation tooling or
/// imported from the processor dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Success,
    Failed,
    Abandoned,
}

impl PaymentStatus {
    /// Wire form of the status (lowercase, as the content API stores it).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Abandoned => "abandoned",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_form_is_lowercase() {
        let json = serde_json::to_string(&PaymentStatus::Success).unwrap();
        assert_eq!(json, "\"success\"");
        assert_eq!(PaymentStatus::Success.as_str(), "success");
    }
}
