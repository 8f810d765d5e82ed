//! External service integrations.

pub mod paystack;

pub use paystack::{PaymentError, PaymentSession};
