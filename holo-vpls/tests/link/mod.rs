//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

mod parse;

use std::sync::LazyLock as Lazy;

use holo_vpls::attr::RTA_ALIGNTO;
use holo_vpls::error::ParseResult;
use holo_vpls::*;
use maplit::btreemap;

static RESOLVER: Lazy<StaticResolver> = Lazy::new(|| {
    StaticResolver::new(btreemap! {
        "eth0".to_owned() => 2,
        "eth1".to_owned() => 3,
    })
});

//
// Helper functions.
//

// Initializes tracing subscriber, ignoring subsequent calls.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_ansi(false)
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

// Builds the expected encoding of a single attribute.
fn rta(attr: VplsAttr, payload: &[u8]) -> Vec<u8> {
    let len = (4 + payload.len()) as u16;
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&len.to_ne_bytes());
    bytes.extend_from_slice(&(attr as u16).to_ne_bytes());
    bytes.extend_from_slice(payload);
    bytes.resize(bytes.len().next_multiple_of(RTA_ALIGNTO), 0);
    bytes
}

fn parse(args: &[&str]) -> ParseResult<VplsLink> {
    init_tracing();
    VplsLink::parse(args, &*RESOLVER)
}

fn encode(args: &[&str]) -> Vec<u8> {
    let link = parse(args).unwrap();
    let mut builder = AttrBuilder::new();
    link.encode(&mut builder).unwrap();
    builder.as_bytes().to_vec()
}

fn summary(table: &AttrTable) -> String {
    VplsSummary::new(table, &*RESOLVER).to_string()
}

fn encode_and_print(args: &[&str]) -> String {
    let table = AttrTable::decode(&encode(args)).unwrap();
    summary(&table)
}
