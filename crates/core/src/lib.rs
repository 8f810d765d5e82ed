//! Folio Core - Shared types library.
//!
//! This crate provides the common types used across Folio components:
//! - `storefront` - Public-facing marketing site
//! - `integration-tests` - End-to-end tests against a running storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, prices, payment references,
//!   and payment statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
