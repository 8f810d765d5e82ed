//! Home page route handler.
//!
//! The shell of the site: one page with the book shelf and the event
//! tickets, fetched fresh from the content API on every render.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use chrono::Utc;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::routes::books::BookView;
use crate::routes::events::EventView;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub books: Vec<BookView>,
    pub events: Vec<EventView>,
}

/// Display the home page.
///
/// The two listing fetches are independent; neither blocks the other.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<HomeTemplate> {
    let (books, events) = tokio::join!(
        state.content().list_books(),
        state.content().list_events(),
    );

    let now = Utc::now();
    Ok(HomeTemplate {
        books: books?.into_iter().map(BookView::from_record).collect(),
        events: events?
            .into_iter()
            .map(|event| EventView::from_record(event, now))
            .collect(),
    })
}
