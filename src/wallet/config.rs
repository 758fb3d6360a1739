//! Client configuration.
//!
//! Node endpoint and tangle parameters the command set reads and updates:
//! `client_conf` renders the current configuration as JSON, and
//! `client_conf_set` / `node_info_set` modify it. Defaults are provided for
//! the mainnet and devnet deployments.

use heapless::String;
use serde::Serialize;

/// Maximum length of a node host name.
pub const MAX_NODE_LEN: usize = 64;

/// Client/node configuration.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct ClientConfig {
    /// Node host name or IP.
    pub node: String<MAX_NODE_LEN>,
    /// Node port.
    pub port: u16,
    /// Whether to reach the node over HTTPS.
    pub https: bool,
    /// Minimum weight magnitude for proof of work (9 testnet, 14 mainnet).
    pub mwm: u8,
    /// Depth at which tip selection starts its random walk.
    pub depth: u8,
    /// Security level of generated addresses (1, 2 or 3).
    pub security: u8,
}

impl ClientConfig {
    /// Mainnet defaults.
    pub fn mainnet() -> Self {
        Self {
            node: String::try_from("nodes.iota.cafe").unwrap_or_default(),
            port: 443,
            https: true,
            mwm: 14,
            depth: 3,
            security: 2,
        }
    }

    /// Devnet defaults.
    pub fn testnet() -> Self {
        Self {
            node: String::try_from("nodes.devnet.iota.org").unwrap_or_default(),
            port: 443,
            https: true,
            mwm: 9,
            depth: 6,
            security: 2,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}
