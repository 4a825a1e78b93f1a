use anyhow::Result;
use hollowcal_core::{Backend, HollowCalError};

use crate::notice;
use crate::tui;

pub async fn run(backend: &str) -> Result<()> {
    let backend: Backend = backend.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let (mut session, mut state) = super::restore_session().await?;

    if session.backend() == Some(backend) {
        notice::info(
            "Already connected",
            &format!("You are already connected with {backend}."),
        );
        return Ok(());
    }

    let spinner = tui::spinner(format!("Waiting for {backend} wallet approval..."));
    let result = session.connect(backend, &mut state).await;
    spinner.finish_and_clear();

    match result {
        Ok(address) => {
            notice::success("Connected", &format!("Successfully connected to {backend}."));
            println!("Address: {address}");
            Ok(())
        }
        Err(HollowCalError::WalletConflict(active)) => {
            notice::error(
                "Already connected",
                &format!("You are already connected with {active}."),
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
