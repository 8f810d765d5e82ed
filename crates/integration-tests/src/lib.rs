//! Integration test support for Folio.
//!
//! The actual tests live in `tests/`; this library only exists so the
//! crate participates in the workspace.

#![cfg_attr(not(test), forbid(unsafe_code))]
