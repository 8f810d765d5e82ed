//! Event route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::cms::EventRecord;
use crate::error::Result;
use crate::filters;
use crate::routes::books::PLACEHOLDER_COVER;
use crate::state::AppState;

// =============================================================================
// Countdown
// =============================================================================

/// Days remaining until an event, measured in calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Event is `n` whole days away (n >= 1).
    Days(i64),
    /// Event is today.
    Today,
    /// Event date has passed.
    Ended,
}

impl Countdown {
    /// Compute the countdown from `now` to the event instant.
    ///
    /// Calendar days, not 24-hour periods: an event tomorrow morning is
    /// "1 Day" away even if fewer than 24 hours remain.
    #[must_use]
    pub fn from_dates(event: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let days = event
            .date_naive()
            .signed_duration_since(now.date_naive())
            .num_days();
        match days {
            1.. => Self::Days(days),
            0 => Self::Today,
            _ => Self::Ended,
        }
    }

    /// Display label for the ticket badge.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Days(1) => "1 Day".to_string(),
            Self::Days(n) => format!("{n} Days"),
            Self::Today => "Today".to_string(),
            Self::Ended => "Ended".to_string(),
        }
    }
}

// =============================================================================
// View types
// =============================================================================

/// Event ticket display data for templates.
#[derive(Clone)]
pub struct EventView {
    pub title: String,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub date_display: String,
    pub countdown_label: String,
    /// Past events render in the disabled state with no registration action.
    pub ended: bool,
    pub price_display: Option<String>,
    pub cover_url: String,
    pub registration_url: Option<String>,
    pub guest_list_url: Option<String>,
    pub team_url: Option<String>,
}

impl EventView {
    /// Map a content record to its ticket form, relative to `now`.
    #[must_use]
    pub fn from_record(event: EventRecord, now: DateTime<Utc>) -> Self {
        let countdown = Countdown::from_dates(event.date, now);
        Self {
            title: event.title,
            description: event.description,
            venue: event.venue,
            date_display: event.date.format("%-d %B %Y, %-I:%M %p").to_string(),
            countdown_label: countdown.label(),
            ended: countdown == Countdown::Ended,
            price_display: event.price.map(|p| p.display()),
            cover_url: event.cover_url.unwrap_or_else(|| PLACEHOLDER_COVER.to_string()),
            registration_url: event.registration_url,
            guest_list_url: event.guest_list_url,
            team_url: event.team_url,
        }
    }
}

// =============================================================================
// Templates & handlers
// =============================================================================

/// Event listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "events/index.html")]
pub struct EventsIndexTemplate {
    pub events: Vec<EventView>,
}

/// Display the event listing page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<EventsIndexTemplate> {
    let now = Utc::now();
    let events = state
        .content()
        .list_events()
        .await?
        .into_iter()
        .map(|event| EventView::from_record(event, now))
        .collect();

    Ok(EventsIndexTemplate { events })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn test_event(date: DateTime<Utc>) -> EventRecord {
        EventRecord {
            id: 1,
            title: "Lagos Book Salon".to_string(),
            description: None,
            date,
            venue: Some("Freedom Park".to_string()),
            price: None,
            cover_url: None,
            registration_url: Some("https://example.com/register".to_string()),
            guest_list_url: None,
            team_url: None,
        }
    }

    #[test]
    fn test_countdown_three_days_out() {
        let now = noon(2024, 5, 1);
        let countdown = Countdown::from_dates(now + Duration::days(3), now);
        assert_eq!(countdown, Countdown::Days(3));
        assert_eq!(countdown.label(), "3 Days");
    }

    #[test]
    fn test_countdown_singular_day() {
        let now = noon(2024, 5, 1);
        let countdown = Countdown::from_dates(now + Duration::days(1), now);
        assert_eq!(countdown.label(), "1 Day");
    }

    #[test]
    fn test_countdown_same_calendar_day() {
        let now = noon(2024, 5, 1);
        let tonight = Utc.with_ymd_and_hms(2024, 5, 1, 19, 0, 0).unwrap();
        assert_eq!(Countdown::from_dates(tonight, now), Countdown::Today);
        // Earlier the same day still counts as today, not ended.
        let this_morning = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        assert_eq!(Countdown::from_dates(this_morning, now), Countdown::Today);
    }

    #[test]
    fn test_countdown_past_event() {
        let now = noon(2024, 5, 1);
        let countdown = Countdown::from_dates(now - Duration::days(2), now);
        assert_eq!(countdown, Countdown::Ended);
        assert_eq!(countdown.label(), "Ended");
    }

    #[test]
    fn test_past_event_renders_ended_state() {
        let now = noon(2024, 5, 1);
        let view = EventView::from_record(test_event(now - Duration::days(7)), now);
        assert!(view.ended);
        assert_eq!(view.countdown_label, "Ended");
    }

    #[test]
    fn test_upcoming_event_keeps_registration_action() {
        let now = noon(2024, 5, 1);
        let view = EventView::from_record(test_event(now + Duration::days(3)), now);
        assert!(!view.ended);
        assert_eq!(view.countdown_label, "3 Days");
        assert!(view.registration_url.is_some());
    }
}
