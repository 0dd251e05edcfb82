//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

// Returns true if `arg` is an abbreviation of `keyword`.
//
// Any non-empty prefix is accepted, so keyword order decides ambiguous
// abbreviations.
pub(crate) fn matches(arg: &str, keyword: &str) -> bool {
    !arg.is_empty() && keyword.starts_with(arg)
}

// Parses an unsigned integer the way `strtoul(arg, _, 0)` does.
//
// A `0x` or `0X` prefix selects hexadecimal and a leading `0` selects octal.
// Signs, whitespace and trailing characters are rejected.
pub(crate) fn get_unsigned(arg: &str) -> Option<u64> {
    let (digits, radix) = if let Some(digits) =
        arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X"))
    {
        (digits, 16)
    } else if arg.len() > 1 && arg.starts_with('0') {
        (&arg[1..], 8)
    } else {
        (arg, 10)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

pub(crate) fn get_u32(arg: &str) -> Option<u32> {
    get_unsigned(arg).and_then(|value| u32::try_from(value).ok())
}

pub(crate) fn get_u8(arg: &str) -> Option<u8> {
    get_unsigned(arg).and_then(|value| u8::try_from(value).ok())
}

// Parses an IPv4 or IPv6 address.
//
// The presence of a colon selects the address family.
pub(crate) fn get_addr(arg: &str) -> Option<IpAddr> {
    if arg.contains(':') {
        arg.parse::<Ipv6Addr>().ok().map(IpAddr::V6)
    } else {
        arg.parse::<Ipv4Addr>().ok().map(IpAddr::V4)
    }
}

// ===== unit tests =====
