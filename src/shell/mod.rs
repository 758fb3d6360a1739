//! Command shell engine for wallet clients.
//!
//! This module implements a complete command-line interpreter pipeline for
//! interactive wallet shells, suitable for `no_std` environments. Input lines
//! are tokenized with shell-like quoting rules, matched against a registry of
//! named commands, validated against a per-command argument schema, and
//! dispatched to the matching handler.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Console      │───▶│   Tokenizer     │───▶│   Dispatcher    │
//! │  (input loop,   │    │  (quoting and   │    │  (lookup, run   │
//! │   history)      │    │   escapes)      │    │   validator)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!          │                                             │
//!          ▼                                             ▼
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Completion /   │◀───│    Registry     │    │  Arg Schema /   │
//! │  Hints          │    │  (ordered cmd   │    │  Validator      │
//! │                 │    │   records)      │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! All buffers are fixed-size; the engine never allocates. Tokens produced
//! for one dispatch borrow a parse buffer scoped to that dispatch, so a token
//! can never outlive its backing storage.
//!
//! # Usage
//!
//! ```rust
//! use libcmder::shell::{Command, CommandCall, CommandResult, Console, Registry};
//!
//! fn ping(_ctx: &mut (), _reg: &Registry<()>, _call: &CommandCall<'_>) -> CommandResult {
//!     Ok(())
//! }
//!
//! let mut console = Console::new(());
//! console
//!     .register(Command {
//!         name: "ping",
//!         help: "Check the shell is alive",
//!         hint: None,
//!         schema: None,
//!         handler: ping,
//!     })
//!     .unwrap();
//!
//! // Byte-fed input, e.g. from a UART
//! console.input(b"ping\r").unwrap();
//! ```

pub mod console;
pub mod dispatch;
pub mod hints;
pub mod history;
pub mod registry;
pub mod schema;
pub mod tokenizer;

pub use console::{
    ASCII_BACKSPACE, ASCII_CR, ASCII_DEL, ASCII_LF, COMMENT_MARKER, Console, EXIT_DIRECTIVE, State,
};
pub use dispatch::{CommandCall, DispatchError, Outcome, dispatch};
pub use hints::{complete, hint};
pub use history::History;
pub use registry::{Command, CommandFn, Registry};
pub use schema::{ArgKind, ArgSpec, ParsedArgs, Schema, Violation, ViolationKind, Violations};
pub use tokenizer::split_args;

/// Maximum length of one input line, in bytes.
///
/// Lines longer than this are rejected with [`Error::BufferOverflow`] by the
/// console's input processing.
pub const MAX_LINE: usize = 256;

/// Maximum number of tokens per line, including the command name.
///
/// The tokenizer produces at most `MAX_ARGS - 1` tokens; the final slot is
/// reserved as the terminator position of the conventional `argv` contract.
pub const MAX_ARGS: usize = 16;

/// Maximum number of argument specs per schema.
///
/// [`Schema::new`] asserts this bound, so an oversized `static` schema fails
/// at compile time.
pub const MAX_SPECS: usize = 16;

/// Maximum number of commands a registry can hold.
pub const MAX_COMMANDS: usize = 32;

/// Maximum number of remembered input lines.
pub const MAX_HISTORY: usize = 16;

/// Maximum length of a rendered hint fragment.
pub const MAX_HINT_LEN: usize = 64;

/// Result type returned by command handlers and engine operations.
pub type CommandResult = Result<(), Error>;

/// Function signature for shell output.
///
/// The console and command handlers send all text to the user through a
/// function of this type, so the engine stays independent of the transport
/// (UART, stdout, a test capture buffer).
pub type OutputFn = fn(&str);

/// Errors raised by the shell engine.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// A bounded buffer or the registry ran out of capacity.
    OutOfMemory,
    /// Empty input where a command was expected, or arguments that failed
    /// schema validation.
    InvalidArgument,
    /// The engine was used outside its ready/running states, e.g. feeding
    /// input after the exit directive terminated the console.
    NotInitialized,
    /// No registered command matched. The dispatcher itself never raises
    /// this; it is available for callers that surface unknown commands.
    CommandNotFound,
    /// A command with the same name is already registered.
    DuplicateName,
    /// An input line exceeded [`MAX_LINE`].
    BufferOverflow,
    /// A command handler failed.
    Failed,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::OutOfMemory => defmt::write!(f, "OutOfMemory"),
            Error::InvalidArgument => defmt::write!(f, "InvalidArgument"),
            Error::NotInitialized => defmt::write!(f, "NotInitialized"),
            Error::CommandNotFound => defmt::write!(f, "CommandNotFound"),
            Error::DuplicateName => defmt::write!(f, "DuplicateName"),
            Error::BufferOverflow => defmt::write!(f, "BufferOverflow"),
            Error::Failed => defmt::write!(f, "Failed"),
        }
    }
}
