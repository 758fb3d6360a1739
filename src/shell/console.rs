//! Interactive console: input processing and the read-eval lifecycle.
//!
//! The [`Console`] owns the registry, the command context, the line buffer,
//! and the input history, and drives the read-eval loop. Input can be fed
//! byte by byte (e.g. from a UART, with echo and backspace handling) or as
//! whole lines from a line-oriented frontend.
//!
//! # Line protocol
//!
//! - An empty line is a no-op.
//! - A line whose first character is `/` is a comment: skipped, not
//!   dispatched, not recorded.
//! - A line whose first four characters are `exit` terminates the console.
//! - Every other line is tokenized, dispatched, and then recorded in the
//!   input history regardless of the dispatch outcome.
//!
//! The console runs single-threaded and synchronous: one line is fully
//! read, tokenized, validated, and dispatched before the next is read. A
//! handler that blocks (e.g. on a node request) blocks the shell.
//!
//! # Lifecycle
//!
//! ```text
//! Ready ──first input──▶ Running ──exit directive──▶ Terminated
//! ```
//!
//! Construction is infallible (all buffers are fixed-size); command
//! registration happens between construction and the first input, and any
//! registration error aborts setup before the loop starts. After
//! termination, further input returns [`Error::NotInitialized`]. Teardown
//! is `Drop`: the registry, buffers, and the context (and with it any
//! external collaborator handle) are released exactly once.

use core::fmt::{self, Write};

use heapless::{String, Vec};

use super::dispatch::{DispatchError, Outcome, dispatch};
use super::hints;
use super::history::History;
use super::registry::{Command, Registry};
use super::schema::Violations;
use super::tokenizer::split_args;
use super::{Error, MAX_COMMANDS, MAX_HINT_LEN, MAX_LINE, OutputFn};

/// ASCII backspace character (0x08).
pub const ASCII_BACKSPACE: u8 = 0x08;
/// ASCII line feed character (0x0A).
pub const ASCII_LF: u8 = 0x0A;
/// ASCII carriage return character (0x0D).
pub const ASCII_CR: u8 = 0x0D;
/// ASCII delete character (0x7F).
pub const ASCII_DEL: u8 = 0x7F;

/// First character of a comment line.
pub const COMMENT_MARKER: char = '/';

/// A line starting with these four characters terminates the run loop.
pub const EXIT_DIRECTIVE: &str = "exit";

/// Console lifecycle states.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum State {
    /// Constructed and accepting registrations; no input seen yet.
    Ready,
    /// Inside the read-eval loop.
    Running,
    /// The exit directive was seen; no further input is accepted.
    Terminated,
}

/// Interactive shell console over a command context `C`.
pub struct Console<C> {
    registry: Registry<C>,
    ctx: C,
    buffer: [u8; MAX_LINE],
    buffer_len: usize,
    history: History,
    output_fn: Option<OutputFn>,
    echo_enabled: bool,
    prompt: &'static str,
    state: State,
}

impl<C> Console<C> {
    /// Create a console in the `Ready` state over the given context.
    pub fn new(ctx: C) -> Self {
        Self {
            registry: Registry::new(),
            ctx,
            buffer: [0; MAX_LINE],
            buffer_len: 0,
            history: History::new(),
            output_fn: None,
            echo_enabled: true,
            prompt: "> ",
            state: State::Ready,
        }
    }

    /// Register a command. Shorthand for `registry_mut().register(..)`.
    pub fn register(&mut self, command: Command<C>) -> Result<(), Error> {
        self.registry.register(command)
    }

    /// The command registry.
    pub fn registry(&self) -> &Registry<C> {
        &self.registry
    }

    /// Mutable access to the registry, for registration during setup.
    pub fn registry_mut(&mut self) -> &mut Registry<C> {
        &mut self.registry
    }

    /// The command context.
    pub fn context(&self) -> &C {
        &self.ctx
    }

    /// Mutable access to the command context.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.ctx
    }

    /// Set the function that receives all console output.
    pub fn set_output_function(&mut self, output_fn: OutputFn) {
        self.output_fn = Some(output_fn);
    }

    /// Enable or disable echoing of typed characters.
    pub fn set_echo(&mut self, enabled: bool) {
        self.echo_enabled = enabled;
    }

    /// Set the prompt text shown by [`show_prompt`](Self::show_prompt).
    pub fn set_prompt(&mut self, prompt: &'static str) {
        self.prompt = prompt;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The recorded input history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Write the prompt to the output function.
    pub fn show_prompt(&self) {
        self.output(self.prompt);
    }

    /// Propose completions for a partial buffer. See [`hints::complete`].
    pub fn complete(&self, buf: &str) -> Vec<&'static str, MAX_COMMANDS> {
        hints::complete(&self.registry, buf)
    }

    /// Hint text for a fully typed command name. See [`hints::hint`].
    pub fn hint(&self, buf: &str) -> Option<String<MAX_HINT_LEN>> {
        hints::hint(&self.registry, buf)
    }

    /// Process input bytes.
    ///
    /// Printable ASCII is buffered (and echoed when echo is enabled),
    /// backspace and delete remove the last buffered character with visual
    /// feedback, and CR or LF executes the buffered line. Other control
    /// characters are ignored. Returns [`Error::BufferOverflow`] when a
    /// line exceeds [`MAX_LINE`]` - 1` bytes and [`Error::NotInitialized`]
    /// after the console has terminated; bytes after the exit directive in
    /// the same call are dropped.
    pub fn input(&mut self, data: &[u8]) -> Result<(), Error> {
        if self.state == State::Terminated {
            return Err(Error::NotInitialized);
        }
        self.state = State::Running;

        for &byte in data {
            match byte {
                ASCII_CR | ASCII_LF => {
                    if self.echo_enabled {
                        self.output(if byte == ASCII_CR { "\r" } else { "\n" });
                    }
                    self.commit_line();
                    if self.state == State::Terminated {
                        break;
                    }
                }
                ASCII_BACKSPACE | ASCII_DEL => {
                    if self.buffer_len > 0 {
                        self.buffer_len -= 1;
                        self.buffer[self.buffer_len] = 0;
                        if self.echo_enabled {
                            self.output("\x08 \x08");
                        }
                    }
                }
                _ => {
                    if (0x20..0x7F).contains(&byte) {
                        if self.buffer_len < MAX_LINE - 1 {
                            self.buffer[self.buffer_len] = byte;
                            self.buffer_len += 1;
                            if self.echo_enabled {
                                let ch = [byte];
                                if let Ok(s) = core::str::from_utf8(&ch) {
                                    self.output(s);
                                }
                            }
                        } else {
                            return Err(Error::BufferOverflow);
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Execute one complete input line.
    ///
    /// Applies the line protocol described at module level. The handler's
    /// result, or the validation outcome, is returned; an unknown command
    /// is reported to the output but is not an error here.
    pub fn execute_line(&mut self, line: &str) -> Result<(), Error> {
        if self.state == State::Terminated {
            return Err(Error::NotInitialized);
        }
        self.state = State::Running;

        if line.is_empty() {
            return Ok(());
        }
        if line.starts_with(COMMENT_MARKER) {
            return Ok(());
        }
        if line.starts_with(EXIT_DIRECTIVE) {
            self.state = State::Terminated;
            return Ok(());
        }
        if line.len() > MAX_LINE {
            return Err(Error::BufferOverflow);
        }

        // Scoped parse arena: the tokens borrow this buffer and are
        // released with it when the dispatch returns.
        let mut parse_buf = [0u8; MAX_LINE];
        parse_buf[..line.len()].copy_from_slice(line.as_bytes());
        let argv = split_args(&mut parse_buf[..line.len()]);

        let mut result = Ok(());
        if !argv.is_empty() {
            match dispatch(&self.registry, &mut self.ctx, &argv) {
                Ok(Outcome::Handled) => {}
                Ok(Outcome::NotFound) => {
                    self.output("Unknown command. Type 'help' to see available commands.\r\n");
                }
                Err(DispatchError::Empty) => {}
                Err(DispatchError::Invalid(violations)) => {
                    self.report_violations(argv[0], &violations);
                    result = Err(Error::InvalidArgument);
                }
                Err(DispatchError::Command(e)) => {
                    result = Err(e);
                }
            }
        }

        self.history.push(line);
        result
    }

    fn commit_line(&mut self) {
        let len = self.buffer_len;
        let mut line = [0u8; MAX_LINE];
        line[..len].copy_from_slice(&self.buffer[..len]);
        self.reset_buffer();
        if let Ok(text) = core::str::from_utf8(&line[..len]) {
            let _ = self.execute_line(text);
        }
    }

    fn reset_buffer(&mut self) {
        self.buffer.fill(0);
        self.buffer_len = 0;
    }

    fn report_violations(&self, command: &str, violations: &Violations<'_>) {
        let mut text: String<MAX_LINE> = String::new();
        let _ = write!(text, "{command}: invalid arguments:\r\n");
        self.output(&text);
        for violation in violations {
            text.clear();
            let _ = write!(text, "  {}: {}\r\n", violation.subject, violation.kind);
            self.output(&text);
        }
    }

    fn output(&self, text: &str) {
        if let Some(output_fn) = self.output_fn {
            output_fn(text);
        }
    }
}

impl<C> fmt::Debug for Console<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("state", &self.state)
            .field("commands", &self.registry.len())
            .field("history", &self.history.len())
            .finish()
    }
}
