//! Wallet collaborator seam.
//!
//! The shell engine never performs wallet work itself: address derivation,
//! transaction signing, bundle assembly, and node communication live behind
//! the [`Wallet`] trait, and the command handlers in [`commands`] are thin
//! glue that call a trait method and print the result. This keeps the
//! engine free of cryptography and transport concerns and makes the command
//! set testable against an in-memory mock.
//!
//! # Usage
//!
//! ```rust,ignore
//! use libcmder::wallet::{Transfer, Wallet};
//!
//! fn pay<W: Wallet>(wallet: &mut W) -> Result<(), libcmder::wallet::Error> {
//!     let transfer = Transfer {
//!         receiver: "atoi1qexampleaddress",
//!         value: 100,
//!         tag: None,
//!         message: None,
//!         remainder: None,
//!     };
//!     let id = wallet.send(&transfer)?;
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};

pub mod commands;
pub mod config;

/// Wallet seed length in bytes.
pub const SEED_BYTES: usize = 32;

/// Seed length as a hexadecimal string.
pub const SEED_HEX_LEN: usize = SEED_BYTES * 2;

/// Upper bound on an encoded address, generous enough for bech32.
pub const MAX_ADDRESS_LEN: usize = 90;

/// An encoded receive address.
pub type Address = heapless::String<MAX_ADDRESS_LEN>;

/// Hex-encoded identifier of a submitted message/transaction.
pub type MessageId = heapless::String<64>;

/// Errors raised by wallet implementations.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The node rejected a request or returned an error payload.
    NodeError,
    /// A seed string was not [`SEED_HEX_LEN`] hexadecimal characters.
    InvalidSeed,
    /// An address failed basic validation.
    InvalidAddress,
    /// The wallet balance does not cover the requested transfer.
    InsufficientBalance,
    /// No node endpoint is configured or reachable.
    NotConnected,
    /// A node response exceeded an internal buffer.
    ResponseTooLarge,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::NodeError => defmt::write!(f, "NodeError"),
            Error::InvalidSeed => defmt::write!(f, "InvalidSeed"),
            Error::InvalidAddress => defmt::write!(f, "InvalidAddress"),
            Error::InsufficientBalance => defmt::write!(f, "InsufficientBalance"),
            Error::NotConnected => defmt::write!(f, "NotConnected"),
            Error::ResponseTooLarge => defmt::write!(f, "ResponseTooLarge"),
        }
    }
}

/// Node status as reported by the node's info endpoint.
///
/// Borrows from the wallet's response buffer; fields follow the REST
/// payload of the node API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeInfo<'a> {
    /// Node software name.
    #[serde(borrow)]
    pub name: &'a str,
    /// Node software version.
    #[serde(borrow)]
    pub version: &'a str,
    /// Whether the node considers itself synced and healthy.
    #[serde(rename = "isHealthy")]
    pub is_healthy: bool,
    /// Identifier of the network the node participates in.
    #[serde(borrow, rename = "networkId")]
    pub network_id: &'a str,
    /// Human-readable part used for bech32 addresses.
    #[serde(borrow, rename = "bech32HRP")]
    pub bech32_hrp: &'a str,
    /// Minimum proof-of-work score the node accepts.
    #[serde(rename = "minPoWScore")]
    pub min_pow_score: u64,
    /// Latest milestone index seen by the node.
    #[serde(rename = "latestMilestoneIndex")]
    pub latest_milestone_index: u64,
    /// Latest confirmed milestone index.
    #[serde(rename = "confirmedMilestoneIndex")]
    pub confirmed_milestone_index: u64,
    /// Milestone index up to which the node has pruned.
    #[serde(rename = "pruningIndex")]
    pub pruning_index: u64,
}

/// Aggregated account state.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct AccountData {
    /// Total confirmed balance across the account's addresses.
    pub balance: u64,
    /// Number of addresses derived so far.
    pub address_count: u32,
}

/// One value-or-data transfer to submit.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Transfer<'a> {
    /// Receiver address.
    pub receiver: &'a str,
    /// Token value to move; zero for a data-only transfer.
    pub value: u64,
    /// Optional tag attached to the transfer.
    pub tag: Option<&'a str>,
    /// Optional message payload.
    pub message: Option<&'a str>,
    /// Optional remainder address for change.
    pub remainder: Option<&'a str>,
}

/// The opaque wallet/node collaborator the command set drives.
///
/// Implementations own the seed, the endpoint connection, and all
/// cryptographic and transport concerns. Every method is synchronous and
/// blocks the shell until it returns.
pub trait Wallet {
    /// Query the configured node for its status.
    fn node_info(&mut self) -> Result<NodeInfo<'_>, Error>;

    /// Point the wallet at a different node endpoint.
    fn set_endpoint(&mut self, host: &str, port: u16, https: bool) -> Result<(), Error>;

    /// The raw seed bytes.
    fn seed(&self) -> &[u8];

    /// Replace the seed from a [`SEED_HEX_LEN`]-character hex string.
    fn set_seed(&mut self, seed_hex: &str) -> Result<(), Error>;

    /// Aggregate balance and address usage for the seed's account.
    fn account(&mut self) -> Result<AccountData, Error>;

    /// Confirmed balance of a single address.
    fn balance(&mut self, address: &str) -> Result<u64, Error>;

    /// Sign and submit a transfer, returning the message identifier.
    fn send(&mut self, transfer: &Transfer<'_>) -> Result<MessageId, Error>;

    /// Address derived at the given index.
    fn address(&mut self, index: u32) -> Result<Address, Error>;
}

/// Validate a seed string: exactly [`SEED_HEX_LEN`] hex characters.
///
/// Implementations of [`Wallet::set_seed`] can use this before decoding.
pub fn check_seed(seed_hex: &str) -> Result<(), Error> {
    if seed_hex.len() != SEED_HEX_LEN || !seed_hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidSeed);
    }
    Ok(())
}
