//! Interactive wallet shell over a simulated wallet.
//!
//! Runs the full command set against an in-memory wallet so the shell can be
//! exercised without a node. Type `help` for the command list, `exit` to
//! quit.

use std::io::{self, BufRead, Write as _};

use heapless::String;

use libcmder::shell::{Console, State};
use libcmder::wallet::commands::{register_commands, WalletCli};
use libcmder::wallet::config::ClientConfig;
use libcmder::wallet::{
    check_seed, AccountData, Address, Error, MessageId, NodeInfo, Transfer, Wallet, SEED_BYTES,
};

/// In-memory wallet with deterministic fake data.
struct SimWallet {
    seed: [u8; SEED_BYTES],
    host: String<64>,
    port: u16,
    https: bool,
    milestone: u64,
    sent: u32,
}

impl SimWallet {
    fn new() -> Self {
        Self {
            seed: [0x2a; SEED_BYTES],
            host: String::try_from("nodes.iota.cafe").unwrap_or_default(),
            port: 443,
            https: true,
            milestone: 1_234_567,
            sent: 0,
        }
    }
}

impl Wallet for SimWallet {
    fn node_info(&mut self) -> Result<NodeInfo<'_>, Error> {
        self.milestone += 1;
        Ok(NodeInfo {
            name: "HORNET",
            version: "1.0.5",
            is_healthy: true,
            network_id: "mainnet1",
            bech32_hrp: "iota",
            min_pow_score: 4000,
            latest_milestone_index: self.milestone,
            confirmed_milestone_index: self.milestone - 2,
            pruning_index: self.milestone - 60_480,
        })
    }

    fn set_endpoint(&mut self, host: &str, port: u16, https: bool) -> Result<(), Error> {
        self.host = String::try_from(host).map_err(|_| Error::NodeError)?;
        self.port = port;
        self.https = https;
        Ok(())
    }

    fn seed(&self) -> &[u8] {
        &self.seed
    }

    fn set_seed(&mut self, seed_hex: &str) -> Result<(), Error> {
        check_seed(seed_hex)?;
        for (i, byte) in self.seed.iter_mut().enumerate() {
            let pair = &seed_hex[2 * i..2 * i + 2];
            *byte = u8::from_str_radix(pair, 16).map_err(|_| Error::InvalidSeed)?;
        }
        Ok(())
    }

    fn account(&mut self) -> Result<AccountData, Error> {
        Ok(AccountData {
            balance: 1_000_000,
            address_count: 4,
        })
    }

    fn balance(&mut self, address: &str) -> Result<u64, Error> {
        if address.is_empty() {
            return Err(Error::InvalidAddress);
        }
        let sum: u64 = address.bytes().map(u64::from).sum();
        Ok(sum * 100)
    }

    fn send(&mut self, transfer: &Transfer<'_>) -> Result<MessageId, Error> {
        if transfer.receiver.is_empty() {
            return Err(Error::InvalidAddress);
        }
        self.sent += 1;
        let mut id = MessageId::new();
        use core::fmt::Write as _;
        let _ = write!(id, "{:064x}", u64::from(self.sent) * 0x9e37_79b9);
        Ok(id)
    }

    fn address(&mut self, index: u32) -> Result<Address, Error> {
        let mut address = Address::new();
        use core::fmt::Write as _;
        let _ = write!(address, "atoi1qsim{index:08}wallet{index:08}demo");
        Ok(address)
    }
}

fn stdout_output(text: &str) {
    print!("{text}");
    let _ = io::stdout().flush();
}

fn main() -> io::Result<()> {
    let cli = WalletCli::new(SimWallet::new(), ClientConfig::mainnet(), 0x5eed);
    let mut console = Console::new(cli);
    console.set_output_function(stdout_output);
    console.set_echo(false);
    console.context_mut().set_output_function(stdout_output);
    if let Err(e) = register_commands(console.registry_mut()) {
        eprintln!("failed to register commands: {e:?}");
        return Ok(());
    }

    println!("cmder demo shell; type 'help' for commands, 'exit' to quit");
    let stdin = io::stdin();
    loop {
        console.show_prompt();
        let mut line = std::string::String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let _ = console.execute_line(line.trim_end_matches(['\r', '\n']));
        if console.state() == State::Terminated {
            break;
        }
    }
    Ok(())
}
