//! Error types for the hollowcal ecosystem.

use thiserror::Error;

use crate::backend::Backend;

/// Errors that can occur in hollowcal operations.
#[derive(Error, Debug)]
pub enum HollowCalError {
    #[error("Wallet not connected")]
    NotConnected,

    #[error("Already connected with {0}")]
    WalletConflict(Backend),

    #[error("Contract deployment returned no address")]
    DeployFailed,

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Gateway '{0}' not found in PATH")]
    GatewayNotInstalled(String),

    #[error("Gateway request timed out after {0}s")]
    GatewayTimeout(u64),

    #[error("State error: {0}")]
    State(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for hollowcal operations.
pub type HollowCalResult<T> = Result<T, HollowCalError>;
