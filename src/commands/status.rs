use anyhow::Result;
use hollowcal_core::Calendar;
use owo_colors::OwoColorize;

pub async fn run() -> Result<()> {
    let (mut session, state) = super::restore_session().await?;

    match session.backend() {
        Some(backend) => println!(
            "{} {} ({})",
            "Wallet:".bold(),
            backend,
            session.address()
        ),
        None => println!("{} {}", "Wallet:".bold(), "not connected".dimmed()),
    }

    match state.contract_address() {
        Some(address) => println!("{} {}", "Contract:".bold(), address),
        None => println!("{} {}", "Contract:".bold(), "not deployed".dimmed()),
    }

    // Counting events needs a bound store, which needs both of the above.
    if session.contract_address().is_some() {
        let mut calendar = Calendar::new();
        let stats = session.reconcile(&mut calendar).await?;
        println!(
            "{} {} ({} deleted or unreadable)",
            "Events:".bold(),
            stats.loaded,
            stats.skipped
        );
    }

    Ok(())
}
