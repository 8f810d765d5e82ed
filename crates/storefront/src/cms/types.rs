//! Wire and domain types for the content API.
//!
//! The content API is a Strapi-style REST backend: list responses wrap
//! records in a `{ "data": [ { "id", "attributes": {...} } ] }` envelope,
//! media fields nest one level deeper, and creation requests wrap the
//! payload in `{ "data": {...} }`. The wire types stay private to this
//! module tree; handlers only see the flattened domain types.

use chrono::{DateTime, Utc};
use folio_core::{Currency, Email, PaymentReference, PaymentStatus, Price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Wire envelope
// =============================================================================

/// List response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse<T> {
    pub data: Vec<Entry<T>>,
}

/// A single enveloped record.
#[derive(Debug, Deserialize)]
pub(crate) struct Entry<T> {
    pub id: i64,
    pub attributes: T,
}

/// A populated media relation (`cover: { data: { attributes: { url } } }`).
#[derive(Debug, Deserialize)]
pub(crate) struct MediaField {
    pub data: Option<MediaEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MediaEntry {
    pub attributes: MediaAttributes,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MediaAttributes {
    pub url: String,
}

/// Creation request envelope.
#[derive(Debug, Serialize)]
pub(crate) struct CreateSaleRequest<'a> {
    pub data: &'a SaleRecord,
}

// =============================================================================
// Record attributes
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookAttributes {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub cover: Option<MediaField>,
    #[serde(default)]
    pub purchase_links: Vec<PurchaseLink>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EventAttributes {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub cover: Option<MediaField>,
    #[serde(default)]
    pub registration_url: Option<String>,
    #[serde(default)]
    pub guest_list_url: Option<String>,
    #[serde(default)]
    pub team_url: Option<String>,
}

// =============================================================================
// Domain types
// =============================================================================

/// A purchase or registration link tagged with a platform label.
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseLink {
    pub platform: String,
    pub url: String,
}

/// A book listing, flattened from the content API envelope.
#[derive(Debug, Clone)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub synopsis: Option<String>,
    /// Direct-sale price; books sold only via platform links have none.
    pub price: Option<Price>,
    /// Absolute cover URL, if the record has media attached.
    pub cover_url: Option<String>,
    pub purchase_links: Vec<PurchaseLink>,
}

/// An event listing, flattened from the content API envelope.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub venue: Option<String>,
    /// Ticket price; free events register via `registration_url` instead.
    pub price: Option<Price>,
    pub cover_url: Option<String>,
    pub registration_url: Option<String>,
    pub guest_list_url: Option<String>,
    pub team_url: Option<String>,
}

/// A sale record, persisted to the content API after a confirmed payment.
///
/// Field names match the content API schema exactly; the creation request
/// wraps this in `{ "data": {...} }`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub customer_name: String,
    pub customer_email: Email,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_paid: Decimal,
    pub reference: PaymentReference,
    pub book_title: String,
    pub payment_status: PaymentStatus,
    pub published_at: DateTime<Utc>,
}

// =============================================================================
// Conversions
// =============================================================================

/// Media URLs come back relative (`/uploads/...`); resolve against the
/// API base. Already-absolute URLs (external CDNs) pass through.
fn absolute_media_url(base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("{base_url}{url}")
    }
}

fn media_url(field: Option<MediaField>, base_url: &str) -> Option<String> {
    field
        .and_then(|f| f.data)
        .map(|entry| absolute_media_url(base_url, &entry.attributes.url))
}

impl Book {
    pub(crate) fn from_entry(entry: Entry<BookAttributes>, base_url: &str) -> Self {
        let attrs = entry.attributes;
        Self {
            id: entry.id,
            title: attrs.title,
            slug: attrs.slug,
            synopsis: attrs.synopsis,
            price: attrs.price.map(|p| Price::new(p, Currency::Ngn)),
            cover_url: media_url(attrs.cover, base_url),
            purchase_links: attrs.purchase_links,
        }
    }
}

impl EventRecord {
    pub(crate) fn from_entry(entry: Entry<EventAttributes>, base_url: &str) -> Self {
        let attrs = entry.attributes;
        Self {
            id: entry.id,
            title: attrs.title,
            description: attrs.description,
            date: attrs.date,
            venue: attrs.venue,
            price: attrs.price.map(|p| Price::new(p, Currency::Ngn)),
            cover_url: media_url(attrs.cover, base_url),
            registration_url: attrs.registration_url,
            guest_list_url: attrs.guest_list_url,
            team_url: attrs.team_url,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_media_url_is_resolved() {
        assert_eq!(
            absolute_media_url("http://localhost:1337", "/uploads/cover.jpg"),
            "http://localhost:1337/uploads/cover.jpg"
        );
    }

    #[test]
    fn test_absolute_media_url_passes_through() {
        assert_eq!(
            absolute_media_url("http://localhost:1337", "https://cdn.example.com/c.jpg"),
            "https://cdn.example.com/c.jpg"
        );
    }

    #[test]
    fn test_sale_record_wire_shape() {
        use chrono::TimeZone;

        let record = SaleRecord {
            customer_name: "Ada Obi".to_string(),
            customer_email: Email::parse("ada@example.com").unwrap(),
            amount_paid: "1500".parse().unwrap(),
            reference: PaymentReference::parse("T123456").unwrap(),
            book_title: "The Long Harmattan".to_string(),
            payment_status: PaymentStatus::Success,
            published_at: chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(CreateSaleRequest { data: &record }).unwrap();
        let data = json.get("data").unwrap();

        assert_eq!(data["customerName"], "Ada Obi");
        assert_eq!(data["customerEmail"], "ada@example.com");
        assert_eq!(data["amountPaid"], 1500.0);
        assert_eq!(data["reference"], "T123456");
        assert_eq!(data["bookTitle"], "The Long Harmattan");
        assert_eq!(data["paymentStatus"], "success");
        assert!(data["publishedAt"].is_string());
    }

    #[test]
    fn test_book_from_entry_without_optional_fields() {
        let entry = Entry {
            id: 7,
            attributes: BookAttributes {
                title: "Notes From The Delta".to_string(),
                slug: "notes-from-the-delta".to_string(),
                synopsis: None,
                price: None,
                cover: None,
                purchase_links: Vec::new(),
            },
        };

        let book = Book::from_entry(entry, "http://localhost:1337");
        assert_eq!(book.id, 7);
        assert!(book.cover_url.is_none());
        assert!(book.price.is_none());
        assert!(book.purchase_links.is_empty());
    }
}
