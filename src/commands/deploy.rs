use anyhow::Result;
use dialoguer::Confirm;
use hollowcal_core::HollowCalError;

use crate::notice;
use crate::tui;

pub async fn run() -> Result<()> {
    let (mut session, mut state) = super::restore_session().await?;

    if !session.is_connected() {
        notice::error("Wallet not connected", "Connect your wallet first.");
        return Ok(());
    }

    // A redeploy replaces the stored address; the old contract keeps its
    // events but is no longer reachable from here.
    if state.contract_address().is_some() {
        let confirmed = Confirm::new()
            .with_prompt("A contract is already deployed. Deploy a new one and replace it?")
            .default(false)
            .interact()?;
        if !confirmed {
            return Ok(());
        }
    }

    let spinner = tui::spinner("Deploying data contract...");
    let result = session.deploy(&mut state).await;
    spinner.finish_and_clear();

    match result {
        Ok(address) => {
            notice::success(
                "Deployed",
                &format!("Successfully deployed a data contract at {address}."),
            );
            Ok(())
        }
        Err(HollowCalError::DeployFailed) => {
            notice::error("Error", "There was an error uploading the contract.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
