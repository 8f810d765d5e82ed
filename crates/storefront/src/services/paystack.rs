//! Payment session construction for the processor's inline checkout.
//!
//! The processor runs in the browser: the page loads its inline widget
//! and hands it this session object. Success and cancel callbacks from
//! the widget land back on the `/pay/complete` and `/pay/cancel` routes.
//! Nothing here talks to the network; the session is configuration only
//! and is discarded once the flow completes or is cancelled.

use folio_core::{Email, EmailError, PaymentReference, Price, PriceError};
use serde::Serialize;
use thiserror::Error;

use crate::config::PaystackConfig;

/// Errors that block a payment session from being built.
///
/// Any of these means the "pay" action stops before a single network
/// call is made.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Payer name is empty.
    #[error("payer name is required")]
    MissingName,

    /// Payer email failed validation.
    #[error("invalid payer email: {0}")]
    Email(#[from] EmailError),

    /// Amount cannot be charged.
    #[error("invalid amount: {0}")]
    Amount(#[from] PriceError),
}

/// One payment session, serialized for the inline checkout widget.
///
/// Field names follow the widget's expected configuration shape; note
/// `ref` on the wire for the reference.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentSession {
    /// Processor public key.
    pub key: String,
    /// Payer email.
    pub email: Email,
    /// Amount in minor currency units (kobo for NGN).
    pub amount: u64,
    /// ISO 4217 currency code.
    pub currency: &'static str,
    /// Client-generated, time-based transaction reference.
    #[serde(rename = "ref")]
    pub reference: PaymentReference,
    /// Item context shown on the processor dashboard.
    pub metadata: SessionMetadata,
}

/// Metadata attached to the processor transaction.
#[derive(Debug, Clone, Serialize)]
pub struct SessionMetadata {
    pub custom_fields: Vec<CustomField>,
}

/// A labelled metadata field, in the processor's custom-field shape.
#[derive(Debug, Clone, Serialize)]
pub struct CustomField {
    pub display_name: String,
    pub variable_name: String,
    pub value: String,
}

impl PaymentSession {
    /// Build a payment session for one purchase attempt.
    ///
    /// Validates the payer details first: an empty name or malformed
    /// email fails here, before any reference is generated.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, the email is invalid, or
    /// the amount cannot be converted to minor units.
    pub fn build(
        config: &PaystackConfig,
        name: &str,
        email: &str,
        price: Price,
        item_title: &str,
    ) -> Result<Self, PaymentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PaymentError::MissingName);
        }
        let email = Email::parse(email)?;
        let amount = price.to_minor_units()?;

        Ok(Self {
            key: config.public_key.clone(),
            email,
            amount,
            currency: price.currency.code(),
            reference: PaymentReference::generate(),
            metadata: SessionMetadata {
                custom_fields: vec![
                    CustomField {
                        display_name: "Book Title".to_string(),
                        variable_name: "book_title".to_string(),
                        value: item_title.to_string(),
                    },
                    CustomField {
                        display_name: "Customer Name".to_string(),
                        variable_name: "customer_name".to_string(),
                        value: name.to_string(),
                    },
                ],
            },
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use folio_core::Currency;

    fn test_config() -> PaystackConfig {
        PaystackConfig {
            public_key: "pk_test_1a2b3c".to_string(),
        }
    }

    fn test_price() -> Price {
        Price::new("1500".parse().unwrap(), Currency::Ngn)
    }

    #[test]
    fn test_build_scales_amount_to_minor_units() {
        let session = PaymentSession::build(
            &test_config(),
            "Ada Obi",
            "ada@example.com",
            test_price(),
            "The Long Harmattan",
        )
        .unwrap();

        assert_eq!(session.amount, 150_000);
        assert_eq!(session.currency, "NGN");
        assert_eq!(session.key, "pk_test_1a2b3c");
        assert!(session.reference.as_str().starts_with("FOLIO-"));
    }

    #[test]
    fn test_build_rejects_empty_name() {
        let result = PaymentSession::build(
            &test_config(),
            "   ",
            "ada@example.com",
            test_price(),
            "The Long Harmattan",
        );
        assert!(matches!(result, Err(PaymentError::MissingName)));
    }

    #[test]
    fn test_build_rejects_invalid_email() {
        let result = PaymentSession::build(
            &test_config(),
            "Ada Obi",
            "not-an-email",
            test_price(),
            "The Long Harmattan",
        );
        assert!(matches!(result, Err(PaymentError::Email(_))));
    }

    #[test]
    fn test_build_rejects_unchargeable_amount() {
        let free = Price::new("0".parse().unwrap(), Currency::Ngn);
        let result = PaymentSession::build(
            &test_config(),
            "Ada Obi",
            "ada@example.com",
            free,
            "The Long Harmattan",
        );
        assert!(matches!(result, Err(PaymentError::Amount(_))));
    }

    #[test]
    fn test_session_serializes_ref_key() {
        let session = PaymentSession::build(
            &test_config(),
            "Ada Obi",
            "ada@example.com",
            test_price(),
            "The Long Harmattan",
        )
        .unwrap();

        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("ref").is_some());
        assert!(json.get("reference").is_none());
        assert_eq!(json["metadata"]["custom_fields"][0]["value"], "The Long Harmattan");
    }
}
