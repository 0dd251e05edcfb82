//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::debug::Debug;

// Interface name <-> index resolution.
//
// An index of zero never refers to an interface.
pub trait IfResolver: std::fmt::Debug + Send + Sync {
    // Returns the index of the interface with the given name.
    fn name_to_index(&self, name: &str) -> Option<u32>;

    // Returns the name of the interface with the given index.
    fn index_to_name(&self, ifindex: u32) -> Option<String>;
}

// Resolver backed by the kernel interface table.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemResolver;

// Resolver backed by a fixed name to index table.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize)]
#[serde(transparent)]
pub struct StaticResolver {
    interfaces: BTreeMap<String, u32>,
}

// ===== impl SystemResolver =====

impl IfResolver for SystemResolver {
    fn name_to_index(&self, name: &str) -> Option<u32> {
        match nix::net::if_::if_nametoindex(name) {
            Ok(0) => None,
            Ok(ifindex) => Some(ifindex),
            Err(error) => {
                Debug::IfNameLookupFailed(name, error).log();
                None
            }
        }
    }

    fn index_to_name(&self, ifindex: u32) -> Option<String> {
        if ifindex == 0 {
            return None;
        }
        let name = nix::net::if_::if_indextoname(ifindex).ok()?;
        name.into_string().ok()
    }
}

// ===== impl StaticResolver =====

impl StaticResolver {
    pub fn new(interfaces: BTreeMap<String, u32>) -> StaticResolver {
        StaticResolver { interfaces }
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}

impl IfResolver for StaticResolver {
    fn name_to_index(&self, name: &str) -> Option<u32> {
        self.interfaces
            .get(name)
            .copied()
            .filter(|ifindex| *ifindex != 0)
    }

    fn index_to_name(&self, ifindex: u32) -> Option<String> {
        if ifindex == 0 {
            return None;
        }
        self.interfaces
            .iter()
            .find(|(_, idx)| **idx == ifindex)
            .map(|(name, _)| name.clone())
    }
}
