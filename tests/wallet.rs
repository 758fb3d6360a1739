use libcmder::shell::{Console, Error as ShellError};
use libcmder::wallet::commands::{register_commands, WalletCli};
use libcmder::wallet::config::ClientConfig;
use libcmder::wallet::{
    check_seed, AccountData, Address, Error, MessageId, NodeInfo, Transfer, Wallet, SEED_BYTES,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, OnceLock};

/// Thread-safe test output capture.
static TEST_OUTPUT: OnceLock<Arc<Mutex<VecDeque<String>>>> = OnceLock::new();

/// Serializes the tests that share the capture buffer.
static TEST_LOCK: Mutex<()> = Mutex::new(());

fn output_buffer() -> &'static Arc<Mutex<VecDeque<String>>> {
    TEST_OUTPUT.get_or_init(|| Arc::new(Mutex::new(VecDeque::new())))
}

fn capture_output(text: &str) {
    output_buffer().lock().unwrap().push_back(text.to_string());
}

fn take_output() -> String {
    let mut buf = output_buffer().lock().unwrap();
    buf.drain(..).collect::<Vec<_>>().join("")
}

/// Captured transfer, owned so it outlives the dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SentTransfer {
    receiver: String,
    value: u64,
    tag: Option<String>,
    message: Option<String>,
}

struct MockWallet {
    seed: [u8; SEED_BYTES],
    host: String,
    port: u16,
    https: bool,
    last_sent: Option<SentTransfer>,
}

impl Default for MockWallet {
    fn default() -> Self {
        Self {
            seed: [0x11; SEED_BYTES],
            host: "nodes.iota.cafe".to_string(),
            port: 443,
            https: true,
            last_sent: None,
        }
    }
}

impl Wallet for MockWallet {
    fn node_info(&mut self) -> Result<NodeInfo<'_>, Error> {
        Ok(NodeInfo {
            name: "HORNET",
            version: "1.0.5",
            is_healthy: true,
            network_id: "mainnet1",
            bech32_hrp: "iota",
            min_pow_score: 4000,
            latest_milestone_index: 1_000_000,
            confirmed_milestone_index: 999_998,
            pruning_index: 939_520,
        })
    }

    fn set_endpoint(&mut self, host: &str, port: u16, https: bool) -> Result<(), Error> {
        self.host = host.to_string();
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
        Ok(address.len() as u64 * 10)
    }

    fn send(&mut self, transfer: &Transfer<'_>) -> Result<MessageId, Error> {
        self.last_sent = Some(SentTransfer {
            receiver: transfer.receiver.to_string(),
            value: transfer.value,
            tag: transfer.tag.map(str::to_string),
            message: transfer.message.map(str::to_string),
        });
        MessageId::try_from("deadbeef").map_err(|_| Error::NodeError)
    }

    fn address(&mut self, index: u32) -> Result<Address, Error> {
        use core::fmt::Write as _;
        let mut address = Address::new();
        let _ = write!(address, "addr{index}");
        Ok(address)
    }
}

fn wallet_console() -> Console<WalletCli<MockWallet>> {
    let cli = WalletCli::new(MockWallet::default(), ClientConfig::mainnet(), 7);
    let mut console = Console::new(cli);
    console.set_output_function(capture_output);
    console.context_mut().set_output_function(capture_output);
    register_commands(console.registry_mut()).unwrap();
    console
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_every_command_in_registration_order() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        console.execute_line("help").unwrap();
        let output = take_output();

        let positions: Vec<usize> = ["- help", "- version", "- node_info", "- send", "- get_addresses"]
            .iter()
            .map(|needle| output.find(needle).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        // Schema glossary lines are indented under their command.
        assert!(output.contains("<receiver>"));
        assert!(output.contains("a token value"));
    }

    #[test]
    fn version_prints_the_crate_version() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        console.execute_line("version").unwrap();
        assert!(take_output().contains("cmder v"));
    }

    #[test]
    fn node_info_prints_the_node_status() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        console.execute_line("node_info").unwrap();
        let output = take_output();
        assert!(output.contains("name: HORNET"));
        assert!(output.contains("isHealthy: true"));
        assert!(output.contains("latestMilestoneIndex: 1000000"));
    }

    #[test]
    fn node_info_set_updates_wallet_and_configuration() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        console
            .execute_line("node_info_set nodes.example.org 14265 0")
            .unwrap();
        assert!(take_output().contains("endpoint updated"));

        let cli = console.context();
        assert_eq!(cli.wallet().host, "nodes.example.org");
        assert_eq!(cli.wallet().port, 14265);
        assert!(!cli.wallet().https);
        assert_eq!(cli.config().node.as_str(), "nodes.example.org");
        assert_eq!(cli.config().port, 14265);
        assert!(!cli.config().https);
    }

    #[test]
    fn node_info_set_requires_all_three_arguments() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        assert_eq!(
            console.execute_line("node_info_set nodes.example.org"),
            Err(ShellError::InvalidArgument)
        );
        let output = take_output();
        assert!(output.contains("node_info_set: invalid arguments:"));
        assert!(output.contains("missing required argument"));
    }

    #[test]
    fn client_conf_renders_json() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        console.execute_line("client_conf").unwrap();
        let output = take_output();
        assert!(output.contains("\"node\":\"nodes.iota.cafe\""));
        assert!(output.contains("\"mwm\":14"));
        assert!(output.contains("\"security\":2"));
    }

    #[test]
    fn client_conf_set_updates_tangle_parameters() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        console.execute_line("client_conf_set 9 6 3").unwrap();
        assert!(take_output().contains("updated"));
        assert_eq!(console.context().config().mwm, 9);
        assert_eq!(console.context().config().depth, 6);
        assert_eq!(console.context().config().security, 3);
    }

    #[test]
    fn client_conf_set_rejects_bad_security_level() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        assert_eq!(
            console.execute_line("client_conf_set 9 6 4"),
            Err(ShellError::InvalidArgument)
        );
        assert!(take_output().contains("security level must be 1, 2 or 3"));
        assert_eq!(console.context().config().security, 2);
    }

    #[test]
    fn seed_prints_the_seed_as_hex() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        console.execute_line("seed").unwrap();
        let expected = format!("seed: {}\r\n", "11".repeat(SEED_BYTES));
        assert_eq!(take_output(), expected);
    }

    #[test]
    fn seed_set_replaces_the_seed() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        let line = format!("seed_set {}", "ab".repeat(SEED_BYTES));
        console.execute_line(&line).unwrap();
        assert!(take_output().contains("seed updated"));
        assert_eq!(console.context().wallet().seed(), &[0xab; SEED_BYTES]);
    }

    #[test]
    fn seed_set_rejects_malformed_seeds() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        assert_eq!(console.execute_line("seed_set xyz"), Err(ShellError::Failed));
        assert!(take_output().contains("invalid seed"));
        assert_eq!(console.context().wallet().seed(), &[0x11; SEED_BYTES]);
    }

    #[test]
    fn account_prints_balance_and_address_count() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        console.execute_line("account").unwrap();
        let output = take_output();
        assert!(output.contains("balance: 1000000"));
        assert!(output.contains("addresses: 4"));
    }

    #[test]
    fn balance_sums_across_addresses() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        console.execute_line("balance aa bbb").unwrap();
        let output = take_output();
        assert!(output.contains("aa: 20"));
        assert!(output.contains("bbb: 30"));
        assert!(output.contains("total: 50"));
    }

    #[test]
    fn send_builds_the_transfer_from_options() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        console
            .execute_line("send RECV -v 100 -t test -m \"hello tangle\"")
            .unwrap();
        assert!(take_output().contains("message submitted: deadbeef"));

        let sent = console.context().wallet().last_sent.clone().unwrap();
        assert_eq!(
            sent,
            SentTransfer {
                receiver: "RECV".to_string(),
                value: 100,
                tag: Some("test".to_string()),
                message: Some("hello tangle".to_string()),
            }
        );
    }

    #[test]
    fn send_defaults_to_a_data_only_transfer() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        console.execute_line("send RECV -m ping").unwrap();
        let sent = console.context().wallet().last_sent.clone().unwrap();
        assert_eq!(sent.value, 0);
        assert_eq!(sent.message.as_deref(), Some("ping"));
        let _ = take_output();
    }

    #[test]
    fn send_rejects_negative_values() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        assert_eq!(
            console.execute_line("send RECV -v -5"),
            Err(ShellError::InvalidArgument)
        );
        assert!(take_output().contains("value must not be negative"));
        assert!(console.context().wallet().last_sent.is_none());
    }

    #[test]
    fn gen_hash_emits_the_requested_length_from_the_tryte_alphabet() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        console.execute_line("gen_hash 81").unwrap();
        let output = take_output();
        let hash = output
            .strip_prefix("Hash: ")
            .and_then(|rest| rest.strip_suffix("\r\n"))
            .unwrap();
        assert_eq!(hash.len(), 81);
        assert!(hash.chars().all(|c| c == '9' || c.is_ascii_uppercase()));
    }

    #[test]
    fn gen_hash_is_deterministic_per_seed() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut first = wallet_console();
        first.execute_line("gen_hash 32").unwrap();
        let a = take_output();

        let mut second = wallet_console();
        second.execute_line("gen_hash 32").unwrap();
        let b = take_output();

        assert_eq!(a, b);
    }

    #[test]
    fn gen_hash_bounds_the_length() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        assert_eq!(
            console.execute_line("gen_hash 0"),
            Err(ShellError::InvalidArgument)
        );
        assert!(take_output().contains("length must be between 1 and 256"));
    }

    #[test]
    fn get_addresses_walks_the_index_range() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        console.execute_line("get_addresses 0 3").unwrap();
        let output = take_output();
        assert!(output.contains("[0] addr0"));
        assert!(output.contains("[1] addr1"));
        assert!(output.contains("[2] addr2"));
        assert!(!output.contains("[3]"));
    }

    #[test]
    fn get_addresses_rejects_an_inverted_range() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        assert_eq!(
            console.execute_line("get_addresses 3 1"),
            Err(ShellError::InvalidArgument)
        );
        assert!(take_output().contains("start index must not exceed end index"));
    }

    #[test]
    fn unknown_wallet_command_is_reported() {
        let _lock = TEST_LOCK.lock().unwrap();
        let _ = take_output();

        let mut console = wallet_console();
        console.execute_line("stake").unwrap();
        assert!(take_output().contains("Unknown command"));
    }
}
