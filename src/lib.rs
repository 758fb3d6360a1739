//! # libcmder - Wallet command shell engine
//!
//! A command-line interpreter engine for operating cryptocurrency client/wallet
//! software from an interactive shell. The library provides the full pipeline
//! from raw input line to command execution: tokenization with quoting and
//! escape rules, a declarative argument-schema validator, a command registry
//! with ordered dispatch, and the interactive affordances (tab completion,
//! inline hints, input history) that build on the registry. It is designed for
//! embedded systems and supports `no_std` environments.
//!
//! ## Features
//!
//! ### Shell Engine
//! - **Tokenizer**: quoted and escaped argument splitting, in place, zero-allocation
//! - **Argument Schemas**: declarative positional/option specifications with
//!   typed conversion and batched violation reporting
//! - **Command Registry**: ordered, bounded registry with duplicate rejection
//! - **Console**: byte-fed read-eval loop with echo, line editing, comment
//!   lines, an exit directive, and bounded input history
//! - **Completion & Hints**: prefix completion and inline usage hints driven
//!   by the registry
//!
//! ### Wallet Seam
//! - The [`wallet::Wallet`] trait keeps node communication, signing, and
//!   persistence outside the engine; command handlers are thin glue over it
//! - A ready-made command set (`node_info`, `balance`, `send`, ...) matching a
//!   typical wallet client
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libcmder = "0.1.0"
//! ```
//!
//! ### Basic Console Setup
//!
//! ```rust
//! use libcmder::shell::{Command, CommandCall, CommandResult, Console, Registry};
//!
//! struct Ctx {
//!     greeted: bool,
//! }
//!
//! fn hello(ctx: &mut Ctx, _registry: &Registry<Ctx>, _call: &CommandCall<'_>) -> CommandResult {
//!     ctx.greeted = true;
//!     Ok(())
//! }
//!
//! let mut console = Console::new(Ctx { greeted: false });
//! console
//!     .register(Command {
//!         name: "hello",
//!         help: "Say hello",
//!         hint: None,
//!         schema: None,
//!         handler: hello,
//!     })
//!     .unwrap();
//!
//! console.execute_line("hello").unwrap();
//! assert!(console.context().greeted);
//! ```
//!
//! ### Wallet Command Set
//!
//! ```rust,ignore
//! use libcmder::shell::Console;
//! use libcmder::wallet::commands::{self, WalletCli};
//! use libcmder::wallet::config::ClientConfig;
//!
//! let cli = WalletCli::new(my_wallet, ClientConfig::mainnet(), 0x5eed);
//! let mut console = Console::new(cli);
//! console.set_output_function(|text| {
//!     // Send to UART or stdout
//! });
//! commands::register_commands(console.registry_mut()).unwrap();
//!
//! console.execute_line("node_info").ok();
//! ```
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, etc.)
//! - Linux-based devices (Raspberry Pi, etc.)
//! - Any platform supporting Rust's `core` library
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Command shell engine: tokenizer, argument schemas, registry, dispatch,
/// completion/hints, history, and the interactive console lifecycle.
pub mod shell;

/// Wallet collaborator seam: the [`wallet::Wallet`] trait, wire types,
/// client configuration, and the fixed wallet command set.
pub mod wallet;
