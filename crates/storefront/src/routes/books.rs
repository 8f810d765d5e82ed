//! Book route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::cms::Book;
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Fallback cover shown when a record has no media attached.
pub const PLACEHOLDER_COVER: &str = "/static/images/placeholder-cover.svg";

/// Fallback synopsis for records that have none yet.
const SYNOPSIS_FALLBACK: &str = "Synopsis coming soon.";

// =============================================================================
// Platform link variants
// =============================================================================

/// Visual variant for a platform link button.
///
/// Chosen by case-insensitive substring match on the platform label;
/// labels that match nothing get the default variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformVariant {
    Amazon,
    Selar,
    Okadabooks,
    Bambooks,
    #[default]
    Default,
}

impl PlatformVariant {
    /// Match a platform label against the fixed variant lookup.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("amazon") {
            Self::Amazon
        } else if label.contains("selar") {
            Self::Selar
        } else if label.contains("okada") {
            Self::Okadabooks
        } else if label.contains("bambooks") {
            Self::Bambooks
        } else {
            Self::Default
        }
    }

    /// CSS class applied to the link button.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Amazon => "link-amazon",
            Self::Selar => "link-selar",
            Self::Okadabooks => "link-okadabooks",
            Self::Bambooks => "link-bambooks",
            Self::Default => "link-default",
        }
    }
}

// =============================================================================
// View types
// =============================================================================

/// Link button display data for templates.
#[derive(Clone)]
pub struct LinkButtonView {
    pub label: String,
    pub url: String,
    pub css_class: &'static str,
}

/// Book display data for templates.
#[derive(Clone)]
pub struct BookView {
    pub slug: String,
    pub title: String,
    pub synopsis: String,
    /// Formatted direct-sale price, when the book can be bought here.
    pub price_display: Option<String>,
    /// Raw decimal amount, rendered into the checkout page for the
    /// completion callback.
    pub price_amount: Option<String>,
    pub cover_url: String,
    pub links: Vec<LinkButtonView>,
}

impl BookView {
    /// Map a content record to its display form, applying fallbacks.
    #[must_use]
    pub fn from_record(book: Book) -> Self {
        Self {
            slug: book.slug,
            title: book.title,
            synopsis: book.synopsis.unwrap_or_else(|| SYNOPSIS_FALLBACK.to_string()),
            price_display: book.price.map(|p| p.display()),
            price_amount: book.price.map(|p| p.amount.to_string()),
            cover_url: book.cover_url.unwrap_or_else(|| PLACEHOLDER_COVER.to_string()),
            links: book
                .purchase_links
                .into_iter()
                .map(|link| LinkButtonView {
                    css_class: PlatformVariant::from_label(&link.platform).css_class(),
                    label: link.platform,
                    url: link.url,
                })
                .collect(),
        }
    }

    /// Whether the book can be bought directly through the checkout flow.
    #[must_use]
    pub const fn purchasable(&self) -> bool {
        self.price_display.is_some()
    }
}

// =============================================================================
// Templates & handlers
// =============================================================================

/// Book listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "books/index.html")]
pub struct BooksIndexTemplate {
    pub books: Vec<BookView>,
}

/// Book detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "books/show.html")]
pub struct BookShowTemplate {
    pub book: BookView,
}

/// Display the book listing page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<BooksIndexTemplate> {
    let books = state
        .content()
        .list_books()
        .await?
        .into_iter()
        .map(BookView::from_record)
        .collect();

    Ok(BooksIndexTemplate { books })
}

/// Display a book detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<BookShowTemplate> {
    let book = state
        .content()
        .get_book(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("book {slug}")))?;

    Ok(BookShowTemplate {
        book: BookView::from_record(book),
    })
}
