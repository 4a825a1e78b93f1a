//! Wallet backends.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the two mutually exclusive wallet backends.
///
/// At most one backend is active per session; connecting one while the
/// other is active is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Arweave,
    Ethereum,
}

impl Backend {
    /// Name of the gateway binary serving this backend.
    pub fn gateway_binary(&self) -> &'static str {
        match self {
            Backend::Arweave => "hollowcal-gateway-arweave",
            Backend::Ethereum => "hollowcal-gateway-ethereum",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Arweave => write!(f, "Arweave"),
            Backend::Ethereum => write!(f, "Ethereum"),
        }
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "arweave" => Ok(Backend::Arweave),
            "ethereum" | "eth" => Ok(Backend::Ethereum),
            other => Err(format!(
                "Unknown backend '{}' (expected arweave or ethereum)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_backend_names() {
        assert_eq!("arweave".parse::<Backend>().unwrap(), Backend::Arweave);
        assert_eq!("Ethereum".parse::<Backend>().unwrap(), Backend::Ethereum);
        assert_eq!("eth".parse::<Backend>().unwrap(), Backend::Ethereum);
        assert!("solana".parse::<Backend>().is_err());
    }
}
