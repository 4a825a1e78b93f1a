use anyhow::Result;
use dialoguer::Confirm;
use hollowcal_core::Calendar;

use crate::notice;
use crate::tui;

pub async fn run(id: &str) -> Result<()> {
    let (mut session, _state) = super::restore_session().await?;

    if session.contract_address().is_none() {
        notice::error(
            "Contract not found",
            "Connect your wallet and deploy a contract first.",
        );
        return Ok(());
    }

    // Ids are assigned during reconciliation, so load before resolving one.
    let mut calendar = Calendar::new();
    session.reconcile(&mut calendar).await?;

    let Some(event) = calendar.get(id) else {
        anyhow::bail!("No event with id '{}'", id);
    };
    let title = event.title.clone();

    let confirmed = Confirm::new()
        .with_prompt(format!("Delete \"{title}\"?"))
        .default(false)
        .interact()?;
    if !confirmed {
        return Ok(());
    }

    let spinner = tui::spinner("Deleting event...");
    let result = session.delete_event(&mut calendar, id).await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            notice::success("Event deleted", &format!("Removed \"{title}\"."));
            Ok(())
        }
        Err(e) => {
            notice::error("Error", "There was an error deleting the event.");
            Err(e.into())
        }
    }
}
