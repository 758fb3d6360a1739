use libcmder::shell::{ArgSpec, Schema, ViolationKind};

static PORT_SPECS: [ArgSpec; 1] = [ArgSpec::int1("<port>", "port number")];
static PORT_SCHEMA: Schema = Schema::new(&PORT_SPECS);

static ENDPOINT_SPECS: [ArgSpec; 3] = [
    ArgSpec::str1("<url>", "IP or URI"),
    ArgSpec::int1("<port>", "port number"),
    ArgSpec::int1("<is_https>", "0 or 1"),
];
static ENDPOINT_SCHEMA: Schema = Schema::new(&ENDPOINT_SPECS);

static TRANSFER_SPECS: [ArgSpec; 3] = [
    ArgSpec::str1("<receiver>", "a receiver address"),
    ArgSpec::opt_int("v", "value", "<value>", "a token value"),
    ArgSpec::opt_str("t", "tag", "<tag>", "a tag for this transfer"),
];
static TRANSFER_SCHEMA: Schema = Schema::new(&TRANSFER_SPECS);

static ADDRESSES_SPECS: [ArgSpec; 1] = [ArgSpec::strn("<address>", 1, 3, "address hashes")];
static ADDRESSES_SCHEMA: Schema = Schema::new(&ADDRESSES_SPECS);

static VERBOSE_SPECS: [ArgSpec; 1] = [ArgSpec::flagn("v", "verbose", 0, 3, "verbosity")];
static VERBOSE_SCHEMA: Schema = Schema::new(&VERBOSE_SPECS);

static THRESHOLD_SPECS: [ArgSpec; 1] = [ArgSpec::dbl1("<threshold>", "a ratio")];
static THRESHOLD_SCHEMA: Schema = Schema::new(&THRESHOLD_SPECS);

#[test]
fn positional_int_binds() {
    let parsed = PORT_SCHEMA.validate(&["cmd", "443"]).unwrap();
    assert_eq!(parsed.int_of(0), Some(443));
    assert_eq!(parsed.count(0), 1);
}

#[test]
fn negative_int_is_a_value_not_an_option() {
    let parsed = PORT_SCHEMA.validate(&["cmd", "-7"]).unwrap();
    assert_eq!(parsed.int_of(0), Some(-7));
}

#[test]
fn trailing_garbage_rejects_the_whole_token() {
    let violations = PORT_SCHEMA.validate(&["cmd", "42abc"]).unwrap_err();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].subject, "<port>");
    assert_eq!(violations[0].kind, ViolationKind::InvalidInt);
}

#[test]
fn missing_required_is_reported_per_spec() {
    let violations = ENDPOINT_SCHEMA.validate(&["cmd", "nodes.example.org"]).unwrap_err();
    assert_eq!(violations.len(), 2);
    assert!(violations.iter().all(|v| v.kind == ViolationKind::MissingRequired));
    assert_eq!(violations[0].subject, "<port>");
    assert_eq!(violations[1].subject, "<is_https>");
}

#[test]
fn violations_arrive_in_one_batch() {
    // Bad conversion and an unknown option in the same invocation: both
    // are reported, not just the first.
    let violations = ENDPOINT_SCHEMA
        .validate(&["cmd", "nodes.example.org", "abc", "1", "--bogus"])
        .unwrap_err();
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].kind, ViolationKind::InvalidInt);
    assert_eq!(violations[1].subject, "--bogus");
    assert_eq!(violations[1].kind, ViolationKind::UnknownOption);
}

#[test]
fn option_short_form_with_separate_value() {
    let parsed = TRANSFER_SCHEMA.validate(&["send", "RECV", "-v", "100"]).unwrap();
    assert_eq!(parsed.str_of(0), Some("RECV"));
    assert_eq!(parsed.int_of(1), Some(100));
    assert_eq!(parsed.str_of(2), None);
}

#[test]
fn option_long_form_with_inline_value() {
    let parsed = TRANSFER_SCHEMA
        .validate(&["send", "RECV", "--value=250", "--tag=test"])
        .unwrap();
    assert_eq!(parsed.int_of(1), Some(250));
    assert_eq!(parsed.str_of(2), Some("test"));
}

#[test]
fn short_option_does_not_match_long_name() {
    let violations = TRANSFER_SCHEMA
        .validate(&["send", "RECV", "-value", "250"])
        .unwrap_err();
    assert!(violations
        .iter()
        .any(|v| v.subject == "-value" && v.kind == ViolationKind::UnknownOption));
}

#[test]
fn option_without_value_is_reported() {
    let violations = TRANSFER_SCHEMA.validate(&["send", "RECV", "-v"]).unwrap_err();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].subject, "<value>");
    assert_eq!(violations[0].kind, ViolationKind::MissingValue);
}

#[test]
fn extra_positional_is_unexpected() {
    let violations = PORT_SCHEMA.validate(&["cmd", "443", "extra"]).unwrap_err();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].subject, "extra");
    assert_eq!(violations[0].kind, ViolationKind::Unexpected);
}

#[test]
fn repeated_positional_collects_in_order() {
    let parsed = ADDRESSES_SCHEMA.validate(&["balance", "a1", "a2", "a3"]).unwrap();
    assert_eq!(parsed.count(0), 3);
    let collected: Vec<&str> = parsed.strs(0).collect();
    assert_eq!(collected, ["a1", "a2", "a3"]);
}

#[test]
fn repeated_positional_over_max_is_rejected() {
    let violations = ADDRESSES_SCHEMA
        .validate(&["balance", "a1", "a2", "a3", "a4", "a5"])
        .unwrap_err();
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].subject, "a4");
    assert_eq!(violations[1].subject, "a5");
    assert!(violations.iter().all(|v| v.kind == ViolationKind::Unexpected));
}

#[test]
fn flag_occurrences_are_counted() {
    let parsed = VERBOSE_SCHEMA.validate(&["cmd", "-v", "-v"]).unwrap();
    assert!(parsed.flag_set(0));
    assert_eq!(parsed.count(0), 2);
}

#[test]
fn flag_over_max_is_too_many_once() {
    let violations = VERBOSE_SCHEMA
        .validate(&["cmd", "-v", "-v", "-v", "-v", "-v"])
        .unwrap_err();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].subject, "verbose");
    assert_eq!(violations[0].kind, ViolationKind::TooMany);
}

#[test]
fn double_accepts_leading_dot() {
    let parsed = THRESHOLD_SCHEMA.validate(&["cmd", ".5"]).unwrap();
    assert_eq!(parsed.dbl_of(0), Some(0.5));
}

#[test]
fn double_rejects_trailing_garbage() {
    let violations = THRESHOLD_SCHEMA.validate(&["cmd", "1.5x"]).unwrap_err();
    assert_eq!(violations[0].kind, ViolationKind::InvalidDouble);
}

#[test]
fn hint_is_synthesized_from_placeholders() {
    let mut out = String::new();
    TRANSFER_SCHEMA.write_hint(&mut out).unwrap();
    assert_eq!(out, " <receiver> [--value <value>] [--tag <tag>]");
}

const SLOT: ArgSpec = ArgSpec::int0("<n>", "slot");
static FULL_WIDTH_SPECS: [ArgSpec; 16] = [SLOT; 16];
static OVERSIZED_SPECS: [ArgSpec; 17] = [SLOT; 17];

#[test]
fn schema_at_the_spec_bound_validates() {
    let schema = Schema::new(&FULL_WIDTH_SPECS);
    let parsed = schema.validate(&["cmd"]).unwrap();
    assert_eq!(parsed.count(15), 0);
    let parsed = schema.validate(&["cmd", "1", "2"]).unwrap();
    assert_eq!(parsed.int_of(1), Some(2));
}

#[test]
#[should_panic(expected = "MAX_SPECS")]
fn oversized_schema_is_rejected_at_construction() {
    let _ = Schema::new(&OVERSIZED_SPECS);
}

#[test]
fn glossary_follows_declaration_order() {
    let entries: Vec<_> = ENDPOINT_SCHEMA.glossary().collect();
    assert_eq!(
        entries,
        [
            ("<url>", "IP or URI"),
            ("<port>", "port number"),
            ("<is_https>", "0 or 1"),
        ]
    );
}
