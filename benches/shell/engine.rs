use std::hint::black_box;

use criterion::Criterion;

use libcmder::shell::{
    ArgSpec, Command, CommandCall, CommandResult, Registry, Schema, dispatch, split_args,
};

static SEND_SPECS: [ArgSpec; 4] = [
    ArgSpec::str1("<receiver>", "a receiver address"),
    ArgSpec::opt_int("v", "value", "<value>", "a token value"),
    ArgSpec::opt_str("m", "message", "<message>", "a message for this transfer"),
    ArgSpec::opt_str("t", "tag", "<tag>", "a tag for this transfer"),
];
static SEND_SCHEMA: Schema = Schema::new(&SEND_SPECS);

const LINE: &str = "send RECEIVERADDRESS -v 100 -m \"hello tangle\" -t benchmark";

fn nop(_ctx: &mut u32, _registry: &Registry<u32>, _call: &CommandCall<'_>) -> CommandResult {
    Ok(())
}

pub fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize", |b| {
        let mut buf = [0u8; 256];
        b.iter(|| {
            buf[..LINE.len()].copy_from_slice(LINE.as_bytes());
            let argv = split_args(black_box(&mut buf[..LINE.len()]));
            black_box(argv.len())
        })
    });
}

pub fn bench_validate(c: &mut Criterion) {
    let argv = ["send", "RECEIVERADDRESS", "-v", "100", "-m", "hello", "-t", "bench"];
    c.bench_function("validate", |b| {
        b.iter(|| SEND_SCHEMA.validate(black_box(&argv)).unwrap())
    });
}

pub fn bench_dispatch(c: &mut Criterion) {
    let mut registry: Registry<u32> = Registry::new();
    registry
        .register(Command {
            name: "send",
            help: "",
            hint: None,
            schema: Some(SEND_SCHEMA),
            handler: nop,
        })
        .unwrap();

    let argv = ["send", "RECEIVERADDRESS", "-v", "100"];
    let mut ctx = 0u32;
    c.bench_function("dispatch", |b| {
        b.iter(|| dispatch(&registry, &mut ctx, black_box(&argv)).unwrap())
    });
}
