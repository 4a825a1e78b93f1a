use anyhow::Result;
use hollowcal_core::Calendar;
use owo_colors::OwoColorize;

use crate::notice;
use crate::render;
use crate::tui;

pub async fn run() -> Result<()> {
    let (mut session, _state) = super::restore_session().await?;

    if session.contract_address().is_none() {
        notice::error(
            "Contract not found",
            "Connect your wallet and deploy a contract first.",
        );
        return Ok(());
    }

    let spinner = tui::spinner("Loading events...");
    let mut calendar = Calendar::new();
    let stats = session.reconcile(&mut calendar).await;
    spinner.finish_and_clear();
    let stats = stats?;

    if calendar.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    render::print_events(&calendar);

    if stats.skipped > 0 {
        println!();
        println!(
            "{}",
            format!("({} deleted or unreadable record(s) skipped)", stats.skipped).dimmed()
        );
    }

    Ok(())
}
