//! Dispatch of a tokenized line to its command handler.
//!
//! The dispatcher looks up `argv[0]` in the registry, runs the command's
//! validator when a schema is present, and invokes the handler. An unknown
//! name is a silent no-op at this layer; [`dispatch`] reports it through
//! [`Outcome::NotFound`] so higher layers can decide whether to surface it
//! to the user.

use core::fmt;

use super::registry::Registry;
use super::schema::{ParsedArgs, Violations};
use super::Error;

/// What the dispatcher did with a line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Outcome {
    /// A handler was found and invoked.
    Handled,
    /// No registered command matched `argv[0]`; nothing was invoked.
    NotFound,
}

/// Why a dispatch did not complete.
#[derive(Debug, PartialEq)]
pub enum DispatchError<'a> {
    /// The token list was empty; there is nothing to run.
    Empty,
    /// Schema validation failed; the full violation batch, never empty.
    /// The handler was not invoked.
    Invalid(Violations<'a>),
    /// The handler ran and failed; its result is passed through verbatim.
    Command(Error),
}

/// One command invocation: the raw argument vector plus, when the command
/// declared a schema, the typed values bound by validation.
pub struct CommandCall<'a> {
    argv: &'a [&'a str],
    parsed: Option<ParsedArgs<'a>>,
}

impl<'a> CommandCall<'a> {
    /// Number of tokens, including the command name.
    pub fn argc(&self) -> usize {
        self.argv.len()
    }

    /// The raw tokens. `argv()[0]` is the command name.
    pub fn argv(&self) -> &'a [&'a str] {
        self.argv
    }

    /// Token at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.argv.get(index).copied()
    }

    /// Typed values bound by the validator; `None` for schema-less commands.
    pub fn parsed(&self) -> Option<&ParsedArgs<'a>> {
        self.parsed.as_ref()
    }
}

impl fmt::Debug for CommandCall<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandCall").field("argv", &self.argv).finish()
    }
}

/// Dispatch a tokenized line.
///
/// Looks up `argv[0]` in `registry`; if the command carries a schema, the
/// validator runs first and the handler is only invoked on success. The
/// handler's result is passed through unchanged. Duplicate names cannot
/// occur (registration rejects them), so exactly one handler fires per
/// match.
pub fn dispatch<'a, C>(
    registry: &Registry<C>,
    ctx: &mut C,
    argv: &'a [&'a str],
) -> Result<Outcome, DispatchError<'a>> {
    if argv.is_empty() {
        return Err(DispatchError::Empty);
    }

    let Some(command) = registry.lookup(argv[0]) else {
        return Ok(Outcome::NotFound);
    };

    let parsed = match &command.schema {
        Some(schema) => Some(schema.validate(argv).map_err(DispatchError::Invalid)?),
        None => None,
    };

    let call = CommandCall { argv, parsed };
    (command.handler)(ctx, registry, &call).map_err(DispatchError::Command)?;
    Ok(Outcome::Handled)
}
