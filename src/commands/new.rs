use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use hollowcal_core::{Calendar, EventDraft};

use crate::notice;
use crate::tui;

pub async fn run(title: String, start: &str, end: Option<&str>, all_day: bool) -> Result<()> {
    let start = parse_datetime(start)?;
    let end = match end {
        Some(raw) => parse_datetime(raw)?,
        None if all_day => start + Duration::days(1),
        None => start + Duration::hours(1),
    };
    if end < start {
        anyhow::bail!("End must not be before start");
    }

    let (mut session, _state) = super::restore_session().await?;

    if !session.is_connected() {
        notice::error("Wallet not connected", "Connect your wallet first.");
        return Ok(());
    }
    if session.contract_address().is_none() {
        notice::error(
            "Contract not found",
            "Connect your wallet and deploy a contract first.",
        );
        return Ok(());
    }

    // Load existing events first so the new event gets the next free id.
    let mut calendar = Calendar::new();
    session.reconcile(&mut calendar).await?;

    let draft = EventDraft {
        title,
        start,
        end,
        all_day,
    };

    let spinner = tui::spinner("Saving event...");
    let result = session.create_event(&mut calendar, draft).await;
    spinner.finish_and_clear();

    match result {
        Ok(event) => {
            notice::success(
                "Event created",
                &format!("\"{}\" saved with id {}.", event.title, event.id),
            );
            Ok(())
        }
        Err(e) => {
            notice::error("Error", "There was an error saving the event.");
            Err(e.into())
        }
    }
}

/// Parse an RFC 3339 timestamp, a `YYYY-MM-DDTHH:MM` local-less form or a
/// bare `YYYY-MM-DD` date (midnight).
fn parse_datetime(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    anyhow::bail!(
        "Could not parse '{}' as a date/time (expected e.g. 2026-03-20T15:00 or 2026-03-20)",
        raw
    )
}
