//! Argument tokenizer with quoting and escape support.
//!
//! Splits a raw input line into an argument vector:
//!
//! - Whitespace-separated arguments:
//!
//!   `abc def 1 20 .3` -> `["abc", "def", "1", "20", ".3"]`
//!
//! - Arguments containing spaces may be surrounded with double quotes; spaces
//!   are preserved and the quotes are stripped:
//!
//!   `abc "123 456" def` -> `["abc", "123 456", "def"]`
//!
//! - Backslash escapes produce a literal backslash, double quote, or space,
//!   inside and outside quotes:
//!
//!   `a\ b\\c\"` -> `["a b\c""]`
//!
//! An unrecognized escape keeps both characters. Escape processing rewrites
//! the buffer in place; the returned tokens are subslices of the caller's
//! buffer, so the buffer is a parse arena scoped to one dispatch.

use heapless::Vec;

use super::MAX_ARGS;

const QUOTE: u8 = b'"';
const ESCAPE: u8 = b'\\';

/// Split a line into arguments in place.
///
/// At most [`MAX_ARGS`]` - 1` tokens are produced; input beyond that bound is
/// silently dropped. This is the bounded-resource policy of the engine, not
/// an error. An empty or all-whitespace line yields an empty vector, which
/// callers treat as "nothing to dispatch".
///
/// Token byte ranges that are not valid UTF-8 are skipped; the console's byte
/// input path only admits printable ASCII, so this arises only when callers
/// feed raw buffers directly.
pub fn split_args(line: &mut [u8]) -> Vec<&str, MAX_ARGS> {
    let len = line.len();
    let mut spans: [(usize, usize); MAX_ARGS] = [(0, 0); MAX_ARGS];
    let mut count = 0;

    let mut read = 0;
    let mut write = 0;
    while read < len && count < MAX_ARGS - 1 {
        while read < len && line[read].is_ascii_whitespace() {
            read += 1;
        }
        if read >= len {
            break;
        }

        let start = write;
        let mut in_quotes = false;
        while read < len {
            let byte = line[read];
            if byte == ESCAPE && read + 1 < len {
                let escaped = line[read + 1];
                match escaped {
                    ESCAPE | QUOTE | b' ' => {
                        line[write] = escaped;
                        write += 1;
                        read += 2;
                    }
                    _ => {
                        // Not one of ours: keep the backslash literally and
                        // let the next byte be processed on its own.
                        line[write] = ESCAPE;
                        write += 1;
                        read += 1;
                    }
                }
            } else if byte == QUOTE {
                in_quotes = !in_quotes;
                read += 1;
            } else if !in_quotes && byte.is_ascii_whitespace() {
                break;
            } else {
                line[write] = byte;
                write += 1;
                read += 1;
            }
        }
        spans[count] = (start, write - start);
        count += 1;
    }

    let line = &*line;
    let mut tokens = Vec::new();
    for &(start, token_len) in &spans[..count] {
        if let Ok(token) = core::str::from_utf8(&line[start..start + token_len]) {
            let _ = tokens.push(token);
        }
    }
    tokens
}
