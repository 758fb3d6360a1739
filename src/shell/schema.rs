//! Declarative argument schemas with a parse-and-validate pass.
//!
//! A [`Schema`] describes the arguments a command expects: positional values
//! consumed in declared order, and named options matched by short or long
//! form. Validation converts each matched token per its declared kind and
//! reports every structural violation of one invocation in a single batch,
//! so the user sees all problems in one pass instead of fixing them one at a
//! time.
//!
//! # Usage
//!
//! ```rust
//! use libcmder::shell::{ArgSpec, Schema};
//!
//! static SPECS: [ArgSpec; 2] = [
//!     ArgSpec::str1("<url>", "IP or URI"),
//!     ArgSpec::int1("<port>", "port number"),
//! ];
//! static SCHEMA: Schema = Schema::new(&SPECS);
//!
//! let parsed = SCHEMA.validate(&["node_info_set", "nodes.example.org", "443"]).unwrap();
//! assert_eq!(parsed.str_of(0), Some("nodes.example.org"));
//! assert_eq!(parsed.int_of(1), Some(443));
//! ```
//!
//! # Numeric conversion policy
//!
//! Integer and floating-point conversions are locale-independent, base-10,
//! with an optional leading sign, and reject trailing non-numeral characters:
//! `"42abc"` is a violation, not the value 42.

use core::fmt;

use heapless::Vec;

use super::{MAX_ARGS, MAX_SPECS};

/// The typed kind of an argument.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ArgKind {
    /// Any token; conversion never fails.
    Str,
    /// Base-10 signed integer. The whole token must parse.
    Int,
    /// Base-10 floating-point number. The whole token must parse.
    Double,
    /// A named switch carrying no value.
    Flag,
}

/// One expected argument or option within a schema.
///
/// A spec with neither a short nor a long option name is positional.
/// Positional specs are consumed in declared order before named options are
/// matched; their arity bounds are fixed at registration time.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ArgSpec {
    /// Declared kind, governing conversion.
    pub kind: ArgKind,
    /// Short option name without the leading dash, e.g. `"v"`.
    pub short: Option<&'static str>,
    /// Long option name without the leading dashes, e.g. `"value"`.
    pub long: Option<&'static str>,
    /// Placeholder shown in hints and the glossary, e.g. `"<port>"`.
    pub placeholder: &'static str,
    /// Description line for the glossary.
    pub help: &'static str,
    /// Minimum number of occurrences.
    pub min: u8,
    /// Maximum number of occurrences.
    pub max: u8,
}

impl ArgSpec {
    /// Required positional string (exactly one).
    pub const fn str1(placeholder: &'static str, help: &'static str) -> Self {
        Self::positional(ArgKind::Str, placeholder, help, 1, 1)
    }

    /// Optional positional string (zero or one).
    pub const fn str0(placeholder: &'static str, help: &'static str) -> Self {
        Self::positional(ArgKind::Str, placeholder, help, 0, 1)
    }

    /// Repeated positional string with explicit bounds.
    pub const fn strn(placeholder: &'static str, min: u8, max: u8, help: &'static str) -> Self {
        Self::positional(ArgKind::Str, placeholder, help, min, max)
    }

    /// Required positional integer (exactly one).
    pub const fn int1(placeholder: &'static str, help: &'static str) -> Self {
        Self::positional(ArgKind::Int, placeholder, help, 1, 1)
    }

    /// Optional positional integer (zero or one).
    pub const fn int0(placeholder: &'static str, help: &'static str) -> Self {
        Self::positional(ArgKind::Int, placeholder, help, 0, 1)
    }

    /// Required positional floating-point value (exactly one).
    pub const fn dbl1(placeholder: &'static str, help: &'static str) -> Self {
        Self::positional(ArgKind::Double, placeholder, help, 1, 1)
    }

    /// Optional named string option, e.g. `-t <tag>` / `--tag <tag>`.
    pub const fn opt_str(
        short: &'static str,
        long: &'static str,
        placeholder: &'static str,
        help: &'static str,
    ) -> Self {
        Self::named(ArgKind::Str, short, long, placeholder, help, 0, 1)
    }

    /// Optional named integer option.
    pub const fn opt_int(
        short: &'static str,
        long: &'static str,
        placeholder: &'static str,
        help: &'static str,
    ) -> Self {
        Self::named(ArgKind::Int, short, long, placeholder, help, 0, 1)
    }

    /// Optional switch (zero or one occurrence, no value).
    pub const fn flag(short: &'static str, long: &'static str, help: &'static str) -> Self {
        Self::named(ArgKind::Flag, short, long, "", help, 0, 1)
    }

    /// Switch with explicit occurrence bounds.
    pub const fn flagn(
        short: &'static str,
        long: &'static str,
        min: u8,
        max: u8,
        help: &'static str,
    ) -> Self {
        Self::named(ArgKind::Flag, short, long, "", help, min, max)
    }

    const fn positional(
        kind: ArgKind,
        placeholder: &'static str,
        help: &'static str,
        min: u8,
        max: u8,
    ) -> Self {
        Self {
            kind,
            short: None,
            long: None,
            placeholder,
            help,
            min,
            max,
        }
    }

    const fn named(
        kind: ArgKind,
        short: &'static str,
        long: &'static str,
        placeholder: &'static str,
        help: &'static str,
        min: u8,
        max: u8,
    ) -> Self {
        Self {
            kind,
            short: if short.is_empty() { None } else { Some(short) },
            long: if long.is_empty() { None } else { Some(long) },
            placeholder,
            help,
            min,
            max,
        }
    }

    /// Whether this spec is positional (no option names).
    pub const fn is_positional(&self) -> bool {
        self.short.is_none() && self.long.is_none()
    }

    /// Identifier used in violation reports and the glossary: the option
    /// name when present, the placeholder otherwise.
    pub fn identifier(&self) -> &'static str {
        if !self.placeholder.is_empty() {
            self.placeholder
        } else if let Some(long) = self.long {
            long
        } else {
            self.short.unwrap_or("")
        }
    }
}

/// An ordered list of argument specifications for one command.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Schema {
    specs: &'static [ArgSpec],
}

/// How one spec or token violated the schema.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViolationKind {
    /// A spec with `min >= 1` was not satisfied.
    MissingRequired,
    /// A spec occurred more often than its `max` bound.
    TooMany,
    /// A token declared `Int` did not parse as a base-10 integer.
    InvalidInt,
    /// A token declared `Double` did not parse as a base-10 number.
    InvalidDouble,
    /// A dash-prefixed token matched no named spec.
    UnknownOption,
    /// A positional token arrived after all positional slots were full.
    Unexpected,
    /// A named option was given without its value token.
    MissingValue,
}

impl ViolationKind {
    /// Short human-readable description for error reports.
    pub fn description(&self) -> &'static str {
        match self {
            ViolationKind::MissingRequired => "missing required argument",
            ViolationKind::TooMany => "too many occurrences",
            ViolationKind::InvalidInt => "expected an integer",
            ViolationKind::InvalidDouble => "expected a number",
            ViolationKind::UnknownOption => "unknown option",
            ViolationKind::Unexpected => "unexpected argument",
            ViolationKind::MissingValue => "option requires a value",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// One schema violation: the subject (spec identifier or offending token)
/// paired with the kind of violation.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Violation<'a> {
    /// The spec's identifier, or the offending token for unknown/unexpected
    /// input.
    pub subject: &'a str,
    /// What went wrong.
    pub kind: ViolationKind,
}

/// The full batch of violations from one validation pass. Never empty when
/// returned as an error.
pub type Violations<'a> = Vec<Violation<'a>, MAX_ARGS>;

#[derive(Debug, PartialEq, Clone, Copy)]
enum Value<'a> {
    Str(&'a str),
    Int(i64),
    Double(f64),
    Flag,
}

#[derive(Debug, PartialEq, Clone, Copy)]
struct Bound<'a> {
    spec: usize,
    value: Value<'a>,
}

/// Typed values bound by a successful validation pass, addressed by the
/// declaring spec's index within the schema.
#[derive(Debug, PartialEq, Clone)]
pub struct ParsedArgs<'a> {
    values: Vec<Bound<'a>, MAX_ARGS>,
}

impl<'a> ParsedArgs<'a> {
    /// Number of occurrences bound for the given spec.
    pub fn count(&self, spec: usize) -> usize {
        self.values.iter().filter(|b| b.spec == spec).count()
    }

    /// First bound string for the given spec, if any.
    pub fn str_of(&self, spec: usize) -> Option<&'a str> {
        self.strs(spec).next()
    }

    /// All bound strings for the given spec, in input order.
    pub fn strs(&self, spec: usize) -> impl Iterator<Item = &'a str> + '_ {
        self.values.iter().filter_map(move |b| match b {
            Bound {
                spec: s,
                value: Value::Str(v),
            } if *s == spec => Some(*v),
            _ => None,
        })
    }

    /// First bound integer for the given spec, if any.
    pub fn int_of(&self, spec: usize) -> Option<i64> {
        self.values.iter().find_map(|b| match b {
            Bound {
                spec: s,
                value: Value::Int(v),
            } if *s == spec => Some(*v),
            _ => None,
        })
    }

    /// First bound floating-point value for the given spec, if any.
    pub fn dbl_of(&self, spec: usize) -> Option<f64> {
        self.values.iter().find_map(|b| match b {
            Bound {
                spec: s,
                value: Value::Double(v),
            } if *s == spec => Some(*v),
            _ => None,
        })
    }

    /// Whether the given flag spec occurred at least once.
    pub fn flag_set(&self, spec: usize) -> bool {
        self.count(spec) > 0
    }
}

impl Schema {
    /// Create a schema over a static spec list.
    ///
    /// Asserts that the list holds at most [`MAX_SPECS`] specs; for the
    /// usual `static` schemas the assertion fires at compile time.
    pub const fn new(specs: &'static [ArgSpec]) -> Self {
        assert!(specs.len() <= MAX_SPECS, "schema exceeds MAX_SPECS");
        Self { specs }
    }

    /// The declared specs, in order.
    pub fn specs(&self) -> &'static [ArgSpec] {
        self.specs
    }

    /// Glossary entries `(identifier, help)` for the help surface, in
    /// declaration order.
    pub fn glossary(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        self.specs.iter().map(|s| (s.identifier(), s.help))
    }

    /// Render a usage fragment from the declared placeholders, e.g.
    /// `" <url> <port> [-v <value>]"`.
    pub fn write_hint(&self, out: &mut impl fmt::Write) -> fmt::Result {
        for spec in self.specs {
            if spec.is_positional() {
                write!(out, " {}", spec.placeholder)?;
            } else {
                let name = spec.long.or(spec.short).unwrap_or("");
                let dashes = if spec.long.is_some() { "--" } else { "-" };
                if spec.kind == ArgKind::Flag {
                    write!(out, " [{dashes}{name}]")?;
                } else {
                    write!(out, " [{dashes}{name} {}]", spec.placeholder)?;
                }
            }
        }
        Ok(())
    }

    /// Validate `argv` (command name in slot 0) against this schema.
    ///
    /// Positional specs consume tokens in declared order up to their bounds;
    /// remaining tokens must match named specs as `-s v`, `--long v`,
    /// `-s=v`, or `--long=v`. On success, returns the typed bindings; on
    /// failure, returns every violation found in one batch and has no side
    /// effects.
    pub fn validate<'a>(&self, argv: &[&'a str]) -> Result<ParsedArgs<'a>, Violations<'a>> {
        let mut counts = [0usize; MAX_SPECS];
        let mut values: Vec<Bound<'a>, MAX_ARGS> = Vec::new();
        let mut violations: Violations<'a> = Vec::new();

        let mut index = 1;
        while index < argv.len() {
            let token = argv[index];
            if let Some((spec_index, inline)) = self.match_option(token) {
                let spec = &self.specs[spec_index];
                counts[spec_index] += 1;
                if counts[spec_index] == spec.max as usize + 1 {
                    push(&mut violations, spec.identifier(), ViolationKind::TooMany);
                }
                if spec.kind == ArgKind::Flag {
                    if counts[spec_index] <= spec.max as usize {
                        bind(&mut values, spec_index, Value::Flag);
                    }
                } else {
                    let value = match inline {
                        Some(v) => Some(v),
                        None => {
                            index += 1;
                            argv.get(index).copied()
                        }
                    };
                    match value {
                        Some(v) => {
                            self.convert(spec_index, v, &mut values, &mut violations, &counts)
                        }
                        None => {
                            push(&mut violations, spec.identifier(), ViolationKind::MissingValue)
                        }
                    }
                }
            } else if looks_like_option(token) {
                push(&mut violations, token, ViolationKind::UnknownOption);
            } else {
                match self.next_positional(&counts) {
                    Some(spec_index) => {
                        counts[spec_index] += 1;
                        self.convert(spec_index, token, &mut values, &mut violations, &counts);
                    }
                    None => push(&mut violations, token, ViolationKind::Unexpected),
                }
            }
            index += 1;
        }

        for (spec_index, spec) in self.specs.iter().enumerate() {
            if counts[spec_index] < spec.min as usize {
                push(&mut violations, spec.identifier(), ViolationKind::MissingRequired);
            }
        }

        if violations.is_empty() {
            Ok(ParsedArgs { values })
        } else {
            Err(violations)
        }
    }

    /// Match a token against the named specs, returning the spec index and
    /// any `=`-inline value.
    fn match_option<'a>(&self, token: &'a str) -> Option<(usize, Option<&'a str>)> {
        let (name, inline) = if let Some(rest) = token.strip_prefix("--") {
            split_inline(rest)
        } else if let Some(rest) = token.strip_prefix('-') {
            if rest.is_empty() || rest.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
                return None;
            }
            split_inline(rest)
        } else {
            return None;
        };

        let long_form = token.starts_with("--");
        self.specs
            .iter()
            .position(|spec| {
                if long_form {
                    spec.long == Some(name)
                } else {
                    spec.short == Some(name)
                }
            })
            .map(|i| (i, inline))
    }

    /// Next positional spec, in declared order, that still has room.
    fn next_positional(&self, counts: &[usize; MAX_SPECS]) -> Option<usize> {
        self.specs
            .iter()
            .enumerate()
            .position(|(i, spec)| spec.is_positional() && counts[i] < spec.max as usize)
    }

    fn convert<'a>(
        &self,
        spec_index: usize,
        token: &'a str,
        values: &mut Vec<Bound<'a>, MAX_ARGS>,
        violations: &mut Violations<'a>,
        counts: &[usize; MAX_SPECS],
    ) {
        let spec = &self.specs[spec_index];
        if counts[spec_index] > spec.max as usize {
            return;
        }
        match spec.kind {
            ArgKind::Str => bind(values, spec_index, Value::Str(token)),
            ArgKind::Int => match token.parse::<i64>() {
                Ok(v) => bind(values, spec_index, Value::Int(v)),
                Err(_) => push(violations, spec.identifier(), ViolationKind::InvalidInt),
            },
            ArgKind::Double => match token.parse::<f64>() {
                Ok(v) => bind(values, spec_index, Value::Double(v)),
                Err(_) => push(violations, spec.identifier(), ViolationKind::InvalidDouble),
            },
            ArgKind::Flag => bind(values, spec_index, Value::Flag),
        }
    }
}

/// A dash-prefixed token that is not a negative number or a bare dash.
fn looks_like_option(token: &str) -> bool {
    token.len() > 1
        && token.starts_with('-')
        && !token[1..].starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

fn split_inline(name: &str) -> (&str, Option<&str>) {
    match name.split_once('=') {
        Some((n, v)) => (n, Some(v)),
        None => (name, None),
    }
}

fn push<'a>(violations: &mut Violations<'a>, subject: &'a str, kind: ViolationKind) {
    let _ = violations.push(Violation { subject, kind });
}

fn bind<'a>(values: &mut Vec<Bound<'a>, MAX_ARGS>, spec: usize, value: Value<'a>) {
    let _ = values.push(Bound { spec, value });
}
