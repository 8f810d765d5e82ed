//! Payment route handlers.
//!
//! The purchase flow is a three-step hand-off:
//!
//! 1. `POST /pay/start` validates the payer details and returns a payment
//!    session for the processor's inline widget. Validation failures stop
//!    here, before any network call.
//! 2. The widget collects payment in the browser and fires one of two
//!    callbacks, which land on `/pay/complete` or `/pay/cancel`.
//! 3. `/pay/complete` attempts exactly one sale-record write to the
//!    content API. The processor has already collected the money at this
//!    point, so a failed write is logged and surfaced as a notice but the
//!    success response still goes out; nothing is rolled back or retried.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use folio_core::{Email, PaymentReference, PaymentStatus};

use crate::cms::SaleRecord;
use crate::error::{AppError, Result};
use crate::filters;
use crate::routes::books::BookView;
use crate::services::{PaymentError, PaymentSession};
use crate::state::AppState;

// =============================================================================
// Checkout page
// =============================================================================

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "payments/checkout.html")]
pub struct CheckoutTemplate {
    pub book: BookView,
}

/// Display the checkout page for a directly-sold book.
#[instrument(skip(state))]
pub async fn checkout(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<CheckoutTemplate> {
    let book = state
        .content()
        .get_book(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("book {slug}")))?;

    let book = BookView::from_record(book);
    if !book.purchasable() {
        return Err(AppError::NotFound(format!(
            "book {slug} is not sold directly"
        )));
    }

    Ok(CheckoutTemplate { book })
}

// =============================================================================
// Start
// =============================================================================

/// Payer form posted from the checkout page.
#[derive(Debug, Deserialize)]
pub struct StartPaymentForm {
    pub name: String,
    pub email: String,
    pub slug: String,
}

/// Response for the start action, consumed by the checkout page script.
#[derive(Debug, Serialize)]
pub struct StartPaymentResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<PaymentSession>,
}

impl StartPaymentResponse {
    fn failure(message: &str) -> (StatusCode, Json<Self>) {
        (
            StatusCode::BAD_REQUEST,
            Json(Self {
                success: false,
                message: Some(message.to_string()),
                session: None,
            }),
        )
    }
}

/// Build a payment session for the inline widget.
///
/// Payer details are validated before the book is looked up, so a
/// validation failure performs zero network calls.
#[instrument(skip(state), fields(slug = %form.slug, email = %form.email))]
pub async fn start(
    State(state): State<AppState>,
    Form(form): Form<StartPaymentForm>,
) -> Result<(StatusCode, Json<StartPaymentResponse>)> {
    if form.name.trim().is_empty() {
        return Ok(StartPaymentResponse::failure("Please enter your name."));
    }
    if Email::parse(&form.email).is_err() {
        return Ok(StartPaymentResponse::failure(
            "Please enter a valid email address.",
        ));
    }

    let book = state
        .content()
        .get_book(&form.slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("book {}", form.slug)))?;

    let Some(price) = book.price else {
        return Ok(StartPaymentResponse::failure(
            "This book is not sold directly.",
        ));
    };

    let session = PaymentSession::build(
        &state.config().paystack,
        &form.name,
        &form.email,
        price,
        &book.title,
    )
    .map_err(|e| match e {
        // Name and email were pre-checked; only the amount can fail here.
        PaymentError::Amount(_) => {
            AppError::BadRequest("This book cannot be charged.".to_string())
        }
        other => AppError::BadRequest(other.to_string()),
    })?;

    tracing::info!(reference = %session.reference, "Payment session created");

    Ok((
        StatusCode::OK,
        Json(StartPaymentResponse {
            success: true,
            message: None,
            session: Some(session),
        }),
    ))
}

// =============================================================================
// Complete / cancel callbacks
// =============================================================================

/// Callback form posted by the checkout page after the widget succeeds.
#[derive(Debug, Deserialize)]
pub struct CompletePaymentForm {
    pub reference: String,
    pub name: String,
    pub email: String,
    pub amount: Decimal,
    pub book_title: String,
}

/// Success fragment shown in place of the checkout form.
#[derive(Template, WebTemplate)]
#[template(path = "payments/complete.html")]
pub struct PaymentCompleteTemplate {
    pub reference: String,
    /// False when the sale record could not be written; the payment
    /// itself has still succeeded.
    pub record_saved: bool,
}

/// Cancelled fragment shown when the payer closes the widget.
#[derive(Template, WebTemplate)]
#[template(path = "payments/cancelled.html")]
pub struct PaymentCancelledTemplate;

/// Record a confirmed payment.
///
/// The processor callback is authoritative: by the time this runs, money
/// has changed hands. The sale-record write is attempted once; a failure
/// is logged and surfaced in the fragment, but the response is a success
/// either way.
#[instrument(skip(state, form), fields(reference = %form.reference))]
pub async fn complete(
    State(state): State<AppState>,
    Form(form): Form<CompletePaymentForm>,
) -> Response {
    let Ok(reference) = PaymentReference::parse(&form.reference) else {
        return (StatusCode::BAD_REQUEST, "Missing payment reference").into_response();
    };
    let Ok(email) = Email::parse(&form.email) else {
        return (StatusCode::BAD_REQUEST, "Invalid payer email").into_response();
    };

    let record = SaleRecord {
        customer_name: form.name.trim().to_string(),
        customer_email: email,
        amount_paid: form.amount,
        reference: reference.clone(),
        book_title: form.book_title,
        payment_status: PaymentStatus::Success,
        published_at: Utc::now(),
    };

    let record_saved = match state.content().create_sale(&record).await {
        Ok(()) => {
            tracing::info!(reference = %reference, "Sale record saved");
            true
        }
        Err(e) => {
            // Money collected, record unsaved: surface it, don't mask the
            // payment success.
            let event_id = sentry::capture_error(&e);
            tracing::error!(
                reference = %reference,
                error = %e,
                sentry_event_id = %event_id,
                "Sale record write failed after confirmed payment"
            );
            false
        }
    };

    PaymentCompleteTemplate {
        reference: reference.to_string(),
        record_saved,
    }
    .into_response()
}

/// Acknowledge a cancelled payment. No backend call is made.
#[instrument]
pub async fn cancel() -> PaymentCancelledTemplate {
    tracing::info!("Payment cancelled by payer");
    PaymentCancelledTemplate
}
