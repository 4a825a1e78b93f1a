use anyhow::Result;

use crate::notice;

pub async fn run() -> Result<()> {
    let (mut session, mut state) = super::restore_session().await?;

    let Some(backend) = session.backend() else {
        notice::info("Not connected", "No wallet is currently connected.");
        return Ok(());
    };

    session.disconnect(&mut state).await?;
    notice::success("Disconnected", &format!("Disconnected from {backend}."));
    Ok(())
}
