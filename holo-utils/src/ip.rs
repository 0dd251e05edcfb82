//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

// Address Family identifier.
//
// IANA registry:
// http://www.iana.org/assignments/address-family-numbers
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum AddressFamily {
    Ipv4 = 1,
    Ipv6 = 2,
}

// ===== impl AddressFamily =====

impl AddressFamily {
    // Returns the family keyword used by iproute2 (`inet` or `inet6`).
    pub fn keyword(&self) -> &'static str {
        match self {
            AddressFamily::Ipv4 => "inet",
            AddressFamily::Ipv6 => "inet6",
        }
    }
}
