//! Payment reference type.
//!
//! A reference identifies one purchase attempt. A fresh one is generated
//! when a payment session is built; the processor echoes its own issued
//! reference back in the success callback.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix for references generated by this storefront.
const REFERENCE_PREFIX: &str = "FOLIO";

/// Errors that can occur when accepting a [`PaymentReference`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// The reference string is empty.
    #[error("payment reference cannot be empty")]
    Empty,
}

/// A payment reference token.
///
/// Generated references are time-based (`FOLIO-<unix millis>`), matching
/// one purchase attempt to one processor transaction. References received
/// from the processor callback are accepted as-is, as long as they are
/// non-empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PaymentReference(String);

impl PaymentReference {
    /// Generate a fresh reference for a new payment session.
    #[must_use]
    pub fn generate() -> Self {
        Self::generate_at(Utc::now())
    }

    /// Generate a reference for the given instant.
    #[must_use]
    pub fn generate_at(now: DateTime<Utc>) -> Self {
        Self(format!("{REFERENCE_PREFIX}-{}", now.timestamp_millis()))
    }

    /// Accept a reference issued by the payment processor.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty.
    pub fn parse(s: &str) -> Result<Self, ReferenceError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ReferenceError::Empty);
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generate_at_is_time_based() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let reference = PaymentReference::generate_at(instant);
        assert_eq!(
            reference.as_str(),
            format!("FOLIO-{}", instant.timestamp_millis())
        );
    }

    #[test]
    fn test_distinct_instants_give_distinct_references() {
        let first = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let second = first + chrono::Duration::milliseconds(1);
        assert_ne!(
            PaymentReference::generate_at(first),
            PaymentReference::generate_at(second)
        );
    }

    #[test]
    fn test_parse_accepts_processor_reference() {
        let reference = PaymentReference::parse("T685312322670417").unwrap();
        assert_eq!(reference.as_str(), "T685312322670417");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(PaymentReference::parse(""), Err(ReferenceError::Empty));
        assert_eq!(PaymentReference::parse("   "), Err(ReferenceError::Empty));
    }
}
