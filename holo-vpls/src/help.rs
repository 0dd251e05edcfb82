//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::io::Write;

pub const USAGE: &str = concat!(
    "Usage: ... vpls id ID [ output LABEL ] [ input LABEL ]\n",
    "                 [ ttl TTL ] [ via ADDR ][ dev PHYS_DEV ]\n",
    "                 [ vlan ID ]\n",
    "\n",
    "Where: ID    := 0-16777215\n",
    "       TTL   := { 1..255 | inherit }\n",
    "       LABEL := 0-1048575\n",
);

// Writes the VPLS option synopsis.
pub fn print_explain(out: &mut dyn Write) -> std::io::Result<()> {
    out.write_all(USAGE.as_bytes())
}
