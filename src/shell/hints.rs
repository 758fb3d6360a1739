//! Interactive completion and hinting over the registry.
//!
//! These are read-only consumers of the [`Registry`], intended to back the
//! tab-completion and inline-hint callbacks of a line editor. Completion
//! proposes every command whose name starts with the typed prefix; hinting
//! fires once the buffer exactly spells a full command name and shows its
//! usage fragment.

use heapless::{String, Vec};

use super::registry::Registry;
use super::{MAX_COMMANDS, MAX_HINT_LEN};

/// Propose completions for a partial buffer.
///
/// Every registered command whose name has `buf` as an exact case-sensitive
/// prefix is proposed, in registration order. An empty buffer proposes
/// nothing.
pub fn complete<C>(registry: &Registry<C>, buf: &str) -> Vec<&'static str, MAX_COMMANDS> {
    let mut proposals = Vec::new();
    if buf.is_empty() {
        return proposals;
    }
    for command in registry.iter() {
        if command.name.starts_with(buf) {
            let _ = proposals.push(command.name);
        }
    }
    proposals
}

/// Hint text for a fully typed command name.
///
/// Returns the stored hint of the command whose name exactly equals `buf`,
/// or a hint synthesized from its schema's placeholders when the record has
/// none. Returns `None` when the buffer does not spell a full command name
/// or the command has neither hint nor schema.
pub fn hint<C>(registry: &Registry<C>, buf: &str) -> Option<String<MAX_HINT_LEN>> {
    if buf.is_empty() {
        return None;
    }
    let command = registry.iter().find(|c| c.name == buf)?;
    if let Some(text) = command.hint {
        let mut out = String::new();
        return out.push_str(text).ok().map(|_| out);
    }
    if let Some(schema) = &command.schema {
        let mut out = String::new();
        let _ = schema.write_hint(&mut out);
        if !out.is_empty() {
            return Some(out);
        }
    }
    None
}
