pub mod connect;
pub mod delete;
pub mod deploy;
pub mod disconnect;
pub mod events;
pub mod new;
pub mod status;

use anyhow::Result;
use hollowcal_core::Session;
use hollowcal_core::gateway::Gateway;
use hollowcal_core::local_state::LocalState;

/// Load durable state and rebuild the session a previous invocation left
/// behind, the way a page reload would.
pub(crate) async fn restore_session() -> Result<(Session<Gateway>, LocalState)> {
    let state = LocalState::load()?;
    let mut session = Session::new(Gateway::new());
    session.restore(&state).await?;
    Ok((session, state))
}
