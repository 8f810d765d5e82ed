//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Home page (book shelf + event tickets)
//! GET  /health            - Liveness check
//! GET  /health/ready      - Readiness check (pings the content API)
//!
//! # Books
//! GET  /books             - Book listing
//! GET  /books/{slug}      - Book detail
//!
//! # Events
//! GET  /events            - Event listing
//!
//! # Payments
//! GET  /pay/{slug}        - Checkout page for a directly-sold book
//! POST /pay/start         - Validate payer, return inline-widget session
//! POST /pay/complete      - Processor success callback (writes sale record)
//! POST /pay/cancel        - Processor cancel callback
//! ```

pub mod books;
pub mod events;
pub mod home;
pub mod payments;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the payment routes router.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/{slug}", get(payments::checkout))
        .route("/start", post(payments::start))
        .route("/complete", post(payments::complete))
        .route("/cancel", post(payments::cancel))
}

/// Create the main application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/books", get(books::index))
        .route("/books/{slug}", get(books::show))
        .route("/events", get(events::index))
        .nest("/pay", payment_routes())
}
