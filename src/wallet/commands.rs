//! The fixed wallet command set.
//!
//! [`WalletCli`] is the command context the console dispatches into: it
//! owns the [`Wallet`] collaborator, the [`ClientConfig`], and the output
//! function the handlers print through. [`register_commands`] installs the
//! command set into a registry at initialization; registration never
//! happens after the run loop starts.
//!
//! Handlers are deliberately thin: validate-and-convert is done by the
//! schema layer before a handler runs, so each body is a call into the
//! wallet trait followed by formatted output.

use core::fmt::Write as _;

use heapless::String;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::shell::{
    ArgSpec, Command, CommandCall, CommandResult, Error as ShellError, OutputFn, Registry, Schema,
};

use super::config::{ClientConfig, MAX_NODE_LEN};
use super::{Transfer, Wallet};

/// Alphabet used by `gen_hash`, matching tryte-encoded hashes.
const TRYTE_CHARS: &[u8; 27] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ9";

/// Upper bound on a `gen_hash` request.
const MAX_HASH_LEN: usize = 256;

/// Command context: the wallet collaborator plus client configuration and
/// the output seam the handlers print through.
pub struct WalletCli<W> {
    wallet: W,
    config: ClientConfig,
    output_fn: Option<OutputFn>,
    rng: SmallRng,
}

impl<W: Wallet> WalletCli<W> {
    /// Create a context over a wallet. `rng_seed` seeds the deterministic
    /// generator backing `gen_hash`; pass entropy from the platform.
    pub fn new(wallet: W, config: ClientConfig, rng_seed: u64) -> Self {
        Self {
            wallet,
            config,
            output_fn: None,
            rng: SmallRng::seed_from_u64(rng_seed),
        }
    }

    /// Set the function that receives handler output.
    pub fn set_output_function(&mut self, output_fn: OutputFn) {
        self.output_fn = Some(output_fn);
    }

    /// The wallet collaborator.
    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    /// Mutable access to the wallet collaborator.
    pub fn wallet_mut(&mut self) -> &mut W {
        &mut self.wallet
    }

    /// The current client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn print(&self, text: &str) {
        if let Some(output_fn) = self.output_fn {
            output_fn(text);
        }
    }
}

impl<W> core::fmt::Debug for WalletCli<W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WalletCli").field("config", &self.config).finish()
    }
}

static NODE_INFO_SET_SPECS: [ArgSpec; 3] = [
    ArgSpec::str1("<url>", "IP or URI"),
    ArgSpec::int1("<port>", "port number"),
    ArgSpec::int1("<is_https>", "0 or 1"),
];

static CLIENT_CONF_SET_SPECS: [ArgSpec; 3] = [
    ArgSpec::int1("<mwm>", "9 for testnet, 14 for mainnet"),
    ArgSpec::int1("<depth>", "depth at which the random walk starts, 3 is typical for wallets"),
    ArgSpec::int1("<security>", "security level of addresses, can be 1, 2 or 3"),
];

static SEED_SET_SPECS: [ArgSpec; 1] =
    [ArgSpec::str1("<seed>", "a 64-character hexadecimal string")];

static BALANCE_SPECS: [ArgSpec; 1] = [ArgSpec::strn("<address>", 1, 10, "address hashes")];

static SEND_SPECS: [ArgSpec; 5] = [
    ArgSpec::str1("<receiver>", "a receiver address"),
    ArgSpec::opt_int("v", "value", "<value>", "a token value"),
    ArgSpec::opt_str("r", "remainder", "<remainder>", "a remainder address"),
    ArgSpec::opt_str("m", "message", "<message>", "a message for this transfer"),
    ArgSpec::opt_str("t", "tag", "<tag>", "a tag for this transfer"),
];

static GEN_HASH_SPECS: [ArgSpec; 1] = [ArgSpec::int1("<length>", "a length for the hash")];

static GET_ADDRESSES_SPECS: [ArgSpec; 2] = [
    ArgSpec::int1("<start>", "start index"),
    ArgSpec::int1("<end>", "end index"),
];

/// Register the fixed wallet command set.
///
/// Called once during initialization; any error aborts setup.
pub fn register_commands<W: Wallet>(
    registry: &mut Registry<WalletCli<W>>,
) -> Result<(), ShellError> {
    registry.register(Command {
        name: "help",
        help: "Show this help",
        hint: None,
        schema: None,
        handler: cmd_help::<W>,
    })?;
    registry.register(Command {
        name: "version",
        help: "Show version info",
        hint: None,
        schema: None,
        handler: cmd_version::<W>,
    })?;
    registry.register(Command {
        name: "node_info",
        help: "Show node info",
        hint: None,
        schema: None,
        handler: cmd_node_info::<W>,
    })?;
    registry.register(Command {
        name: "node_info_set",
        help: "Set the node endpoint",
        hint: Some(" <url> <port> <is_https (0|1)>"),
        schema: Some(Schema::new(&NODE_INFO_SET_SPECS)),
        handler: cmd_node_info_set::<W>,
    })?;
    registry.register(Command {
        name: "client_conf",
        help: "Show client configuration",
        hint: None,
        schema: None,
        handler: cmd_client_conf::<W>,
    })?;
    registry.register(Command {
        name: "client_conf_set",
        help: "Set client configuration",
        hint: Some(" <mwm> <depth> <security>"),
        schema: Some(Schema::new(&CLIENT_CONF_SET_SPECS)),
        handler: cmd_client_conf_set::<W>,
    })?;
    registry.register(Command {
        name: "seed",
        help: "Show the wallet seed",
        hint: None,
        schema: None,
        handler: cmd_seed::<W>,
    })?;
    registry.register(Command {
        name: "seed_set",
        help: "Set the wallet seed",
        hint: Some(" <seed>"),
        schema: Some(Schema::new(&SEED_SET_SPECS)),
        handler: cmd_seed_set::<W>,
    })?;
    registry.register(Command {
        name: "account",
        help: "Get account data",
        hint: None,
        schema: None,
        handler: cmd_account::<W>,
    })?;
    registry.register(Command {
        name: "balance",
        help: "Get the balance of addresses",
        hint: Some(" <addresses...>"),
        schema: Some(Schema::new(&BALANCE_SPECS)),
        handler: cmd_balance::<W>,
    })?;
    registry.register(Command {
        name: "send",
        help: "Send value or data to the Tangle, ex: send <RECEIVER> -v 100",
        hint: Some(" <receiver> -v <value> -m <message> -t <tag>"),
        schema: Some(Schema::new(&SEND_SPECS)),
        handler: cmd_send::<W>,
    })?;
    registry.register(Command {
        name: "gen_hash",
        help: "Generate a hash of the given length, `gen_hash 81` for a random tryte seed",
        hint: Some(" <length>"),
        schema: Some(Schema::new(&GEN_HASH_SPECS)),
        handler: cmd_gen_hash::<W>,
    })?;
    registry.register(Command {
        name: "get_addresses",
        help: "Get addresses by index range",
        hint: Some(" <start> <end>"),
        schema: Some(Schema::new(&GET_ADDRESSES_SPECS)),
        handler: cmd_get_addresses::<W>,
    })?;
    Ok(())
}

fn cmd_help<W: Wallet>(
    ctx: &mut WalletCli<W>,
    registry: &Registry<WalletCli<W>>,
    _call: &CommandCall<'_>,
) -> CommandResult {
    let mut text: String<256> = String::new();
    for command in registry.iter() {
        text.clear();
        let mut hint: String<64> = String::new();
        if let Some(stored) = command.hint {
            let _ = hint.push_str(stored);
        } else if let Some(schema) = &command.schema {
            let _ = schema.write_hint(&mut hint);
        }
        if hint.is_empty() {
            let _ = write!(text, "- {} {}\r\n", command.name, command.help);
        } else {
            let _ = write!(text, "- {}{}\r\n    {}\r\n", command.name, hint, command.help);
        }
        ctx.print(&text);
        if let Some(schema) = &command.schema {
            for (identifier, help) in schema.glossary() {
                text.clear();
                let _ = write!(text, "  {identifier:>12}  {help}\r\n");
                ctx.print(&text);
            }
        }
        ctx.print("\r\n");
    }
    Ok(())
}

fn cmd_version<W: Wallet>(
    ctx: &mut WalletCli<W>,
    _registry: &Registry<WalletCli<W>>,
    _call: &CommandCall<'_>,
) -> CommandResult {
    let mut text: String<64> = String::new();
    let _ = write!(text, "cmder v{}\r\n", env!("CARGO_PKG_VERSION"));
    ctx.print(&text);
    Ok(())
}

fn cmd_node_info<W: Wallet>(
    ctx: &mut WalletCli<W>,
    _registry: &Registry<WalletCli<W>>,
    _call: &CommandCall<'_>,
) -> CommandResult {
    let mut text: String<512> = String::new();
    let result = match ctx.wallet.node_info() {
        Ok(info) => {
            let _ = write!(
                text,
                "name: {}\r\nversion: {}\r\nisHealthy: {}\r\nnetworkId: {}\r\nbech32HRP: {}\r\nminPoWScore: {}\r\nlatestMilestoneIndex: {}\r\nconfirmedMilestoneIndex: {}\r\npruningIndex: {}\r\n",
                info.name,
                info.version,
                info.is_healthy,
                info.network_id,
                info.bech32_hrp,
                info.min_pow_score,
                info.latest_milestone_index,
                info.confirmed_milestone_index,
                info.pruning_index,
            );
            Ok(())
        }
        Err(e) => {
            let _ = write!(text, "node_info error: {e:?}\r\n");
            Err(ShellError::Failed)
        }
    };
    ctx.print(&text);
    result
}

fn cmd_node_info_set<W: Wallet>(
    ctx: &mut WalletCli<W>,
    _registry: &Registry<WalletCli<W>>,
    call: &CommandCall<'_>,
) -> CommandResult {
    let args = call.parsed().ok_or(ShellError::InvalidArgument)?;
    let url = args.str_of(0).ok_or(ShellError::InvalidArgument)?;
    let port = args.int_of(1).ok_or(ShellError::InvalidArgument)?;
    let https = args.int_of(2).ok_or(ShellError::InvalidArgument)? != 0;

    let Ok(port) = u16::try_from(port) else {
        ctx.print("port out of range\r\n");
        return Err(ShellError::InvalidArgument);
    };
    if url.len() > MAX_NODE_LEN {
        ctx.print("node url too long\r\n");
        return Err(ShellError::InvalidArgument);
    }

    match ctx.wallet.set_endpoint(url, port, https) {
        Ok(()) => {
            ctx.config.node = String::try_from(url).unwrap_or_default();
            ctx.config.port = port;
            ctx.config.https = https;
            ctx.print("endpoint updated\r\n");
            Ok(())
        }
        Err(e) => {
            let mut text: String<64> = String::new();
            let _ = write!(text, "set endpoint failed: {e:?}\r\n");
            ctx.print(&text);
            Err(ShellError::Failed)
        }
    }
}

fn cmd_client_conf<W: Wallet>(
    ctx: &mut WalletCli<W>,
    _registry: &Registry<WalletCli<W>>,
    _call: &CommandCall<'_>,
) -> CommandResult {
    match serde_json_core::to_string::<_, 192>(&ctx.config) {
        Ok(json) => {
            ctx.print(&json);
            ctx.print("\r\n");
            Ok(())
        }
        Err(_) => Err(ShellError::Failed),
    }
}

fn cmd_client_conf_set<W: Wallet>(
    ctx: &mut WalletCli<W>,
    _registry: &Registry<WalletCli<W>>,
    call: &CommandCall<'_>,
) -> CommandResult {
    let args = call.parsed().ok_or(ShellError::InvalidArgument)?;
    let mwm = args.int_of(0).ok_or(ShellError::InvalidArgument)?;
    let depth = args.int_of(1).ok_or(ShellError::InvalidArgument)?;
    let security = args.int_of(2).ok_or(ShellError::InvalidArgument)?;

    let (Ok(mwm), Ok(depth)) = (u8::try_from(mwm), u8::try_from(depth)) else {
        ctx.print("mwm and depth must be small positive integers\r\n");
        return Err(ShellError::InvalidArgument);
    };
    if !(1..=3).contains(&security) {
        ctx.print("security level must be 1, 2 or 3\r\n");
        return Err(ShellError::InvalidArgument);
    }

    ctx.config.mwm = mwm;
    ctx.config.depth = depth;
    ctx.config.security = security as u8;
    ctx.print("client configuration updated\r\n");
    Ok(())
}

fn cmd_seed<W: Wallet>(
    ctx: &mut WalletCli<W>,
    _registry: &Registry<WalletCli<W>>,
    _call: &CommandCall<'_>,
) -> CommandResult {
    let mut text: String<192> = String::new();
    let _ = text.push_str("seed: ");
    for byte in ctx.wallet.seed() {
        let _ = write!(text, "{byte:02x}");
    }
    let _ = text.push_str("\r\n");
    ctx.print(&text);
    Ok(())
}

fn cmd_seed_set<W: Wallet>(
    ctx: &mut WalletCli<W>,
    _registry: &Registry<WalletCli<W>>,
    call: &CommandCall<'_>,
) -> CommandResult {
    let args = call.parsed().ok_or(ShellError::InvalidArgument)?;
    let seed = args.str_of(0).ok_or(ShellError::InvalidArgument)?;
    match ctx.wallet.set_seed(seed) {
        Ok(()) => {
            ctx.print("seed updated\r\n");
            Ok(())
        }
        Err(_) => {
            ctx.print("invalid seed, it should be a 64-character hex string\r\n");
            Err(ShellError::Failed)
        }
    }
}

fn cmd_account<W: Wallet>(
    ctx: &mut WalletCli<W>,
    _registry: &Registry<WalletCli<W>>,
    _call: &CommandCall<'_>,
) -> CommandResult {
    let mut text: String<96> = String::new();
    let result = match ctx.wallet.account() {
        Ok(data) => {
            let _ = write!(
                text,
                "balance: {}\r\naddresses: {}\r\n",
                data.balance, data.address_count
            );
            Ok(())
        }
        Err(e) => {
            let _ = write!(text, "account error: {e:?}\r\n");
            Err(ShellError::Failed)
        }
    };
    ctx.print(&text);
    result
}

fn cmd_balance<W: Wallet>(
    ctx: &mut WalletCli<W>,
    _registry: &Registry<WalletCli<W>>,
    call: &CommandCall<'_>,
) -> CommandResult {
    let args = call.parsed().ok_or(ShellError::InvalidArgument)?;
    let mut text: String<192> = String::new();
    let mut total: u64 = 0;
    let mut failed = false;
    for address in args.strs(0) {
        text.clear();
        match ctx.wallet.balance(address) {
            Ok(value) => {
                total = total.saturating_add(value);
                let _ = write!(text, "{address}: {value}\r\n");
            }
            Err(e) => {
                failed = true;
                let _ = write!(text, "{address}: error {e:?}\r\n");
            }
        }
        ctx.print(&text);
    }
    text.clear();
    let _ = write!(text, "total: {total}\r\n");
    ctx.print(&text);
    if failed { Err(ShellError::Failed) } else { Ok(()) }
}

fn cmd_send<W: Wallet>(
    ctx: &mut WalletCli<W>,
    _registry: &Registry<WalletCli<W>>,
    call: &CommandCall<'_>,
) -> CommandResult {
    let args = call.parsed().ok_or(ShellError::InvalidArgument)?;
    let receiver = args.str_of(0).ok_or(ShellError::InvalidArgument)?;
    let value = args.int_of(1).unwrap_or(0);
    if value < 0 {
        ctx.print("value must not be negative\r\n");
        return Err(ShellError::InvalidArgument);
    }

    let transfer = Transfer {
        receiver,
        value: value as u64,
        remainder: args.str_of(2),
        message: args.str_of(3),
        tag: args.str_of(4),
    };
    match ctx.wallet.send(&transfer) {
        Ok(id) => {
            let mut text: String<96> = String::new();
            let _ = write!(text, "message submitted: {}\r\n", id.as_str());
            ctx.print(&text);
            Ok(())
        }
        Err(e) => {
            let mut text: String<64> = String::new();
            let _ = write!(text, "send error: {e:?}\r\n");
            ctx.print(&text);
            Err(ShellError::Failed)
        }
    }
}

fn cmd_gen_hash<W: Wallet>(
    ctx: &mut WalletCli<W>,
    _registry: &Registry<WalletCli<W>>,
    call: &CommandCall<'_>,
) -> CommandResult {
    let args = call.parsed().ok_or(ShellError::InvalidArgument)?;
    let length = args.int_of(0).ok_or(ShellError::InvalidArgument)?;
    if length < 1 || length as usize > MAX_HASH_LEN {
        ctx.print("length must be between 1 and 256\r\n");
        return Err(ShellError::InvalidArgument);
    }

    let mut hash: String<MAX_HASH_LEN> = String::new();
    for _ in 0..length {
        let index = ctx.rng.random_range(0..TRYTE_CHARS.len());
        let _ = hash.push(TRYTE_CHARS[index] as char);
    }

    let mut text: String<{ MAX_HASH_LEN + 16 }> = String::new();
    let _ = write!(text, "Hash: {}\r\n", hash.as_str());
    ctx.print(&text);
    Ok(())
}

fn cmd_get_addresses<W: Wallet>(
    ctx: &mut WalletCli<W>,
    _registry: &Registry<WalletCli<W>>,
    call: &CommandCall<'_>,
) -> CommandResult {
    let args = call.parsed().ok_or(ShellError::InvalidArgument)?;
    let start = args.int_of(0).ok_or(ShellError::InvalidArgument)?;
    let end = args.int_of(1).ok_or(ShellError::InvalidArgument)?;

    let (Ok(start), Ok(end)) = (u32::try_from(start), u32::try_from(end)) else {
        ctx.print("indexes must be non-negative\r\n");
        return Err(ShellError::InvalidArgument);
    };
    if start > end {
        ctx.print("start index must not exceed end index\r\n");
        return Err(ShellError::InvalidArgument);
    }

    let mut text: String<128> = String::new();
    for index in start..end {
        text.clear();
        match ctx.wallet.address(index) {
            Ok(address) => {
                let _ = write!(text, "[{index}] {}\r\n", address.as_str());
                ctx.print(&text);
            }
            Err(e) => {
                let _ = write!(text, "address error at {index}: {e:?}\r\n");
                ctx.print(&text);
                return Err(ShellError::Failed);
            }
        }
    }
    Ok(())
}
