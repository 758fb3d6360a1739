//! Command records and the ordered command registry.
//!
//! Each [`Command`] pairs a name with a handler, optional help and hint
//! text, and an optional argument [`Schema`]. The [`Registry`] is the single
//! ordered collection of records: append-only during initialization,
//! read-only during the run loop. Registration order is preserved for help
//! enumeration and completion.
//!
//! Handlers receive an explicit context object rather than reaching for
//! process-wide state, which keeps commands testable with a fresh context
//! per test, and a reference to the registry itself so a `help` command can
//! enumerate its peers.

use core::fmt;

use heapless::Vec;

use super::dispatch::CommandCall;
use super::schema::Schema;
use super::{CommandResult, Error, MAX_COMMANDS};

/// Function signature for command handlers.
///
/// `ctx` is the command context (e.g. a wallet client), `registry` the
/// registry the command was dispatched from, and `call` the tokenized and
/// validated invocation.
pub type CommandFn<C> =
    fn(ctx: &mut C, registry: &Registry<C>, call: &CommandCall<'_>) -> CommandResult;

/// One registered command.
///
/// Records are plain data plus a function pointer; they are built from
/// `'static` strings at initialization and never mutated afterwards.
pub struct Command<C> {
    /// Command name as typed by the user. Must be non-empty, unique within
    /// the registry, and contain no whitespace. Case-sensitive.
    pub name: &'static str,
    /// Description line shown by the `help` command.
    pub help: &'static str,
    /// Usage fragment shown inline while typing, e.g. `" <host> <port>"`.
    /// When absent and a schema is present, a hint is synthesized from the
    /// schema's placeholders.
    pub hint: Option<&'static str>,
    /// Argument schema. Absent means the handler receives raw arguments
    /// unvalidated.
    pub schema: Option<Schema>,
    /// The function implementing the command.
    pub handler: CommandFn<C>,
}

impl<C> Clone for Command<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Command<C> {}

impl<C> fmt::Debug for Command<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("help", &self.help)
            .field("hint", &self.hint)
            .field("schema", &self.schema)
            .finish()
    }
}

/// The ordered, bounded collection of command records.
pub struct Registry<C> {
    commands: Vec<Command<C>, MAX_COMMANDS>,
}

impl<C> Registry<C> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { commands: Vec::new() }
    }

    /// Append a command record.
    ///
    /// Returns [`Error::InvalidArgument`] for an empty or
    /// whitespace-containing name, [`Error::DuplicateName`] if a command
    /// with the same name is already registered (exact, case-sensitive
    /// match), and [`Error::OutOfMemory`] when the registry is full.
    pub fn register(&mut self, command: Command<C>) -> Result<(), Error> {
        if command.name.is_empty() || command.name.chars().any(char::is_whitespace) {
            return Err(Error::InvalidArgument);
        }
        if self.lookup(command.name).is_some() {
            return Err(Error::DuplicateName);
        }
        self.commands.push(command).map_err(|_| Error::OutOfMemory)
    }

    /// Find a command by exact name.
    pub fn lookup(&self, name: &str) -> Option<&Command<C>> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Iterate over the records in registration order. Each call starts a
    /// fresh traversal.
    pub fn iter(&self) -> core::slice::Iter<'_, Command<C>> {
        self.commands.iter()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<C> Default for Registry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for Registry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.commands.iter().map(|c| c.name)).finish()
    }
}
