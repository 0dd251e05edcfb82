//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use crate::attr::{AttrTable, VplsAttr};
use crate::ifname::IfResolver;
use crate::link::NextHop;

// One-line summary of decoded VPLS attributes.
//
// Each field is written as `key value ` (note the trailing space) and no
// newline is appended. Nothing is written when the VPLS ID is missing.
//
// Labels, VLAN ID, TTL and next-hop are only shown when non-zero, so an
// explicit zero can't be told apart from an absent attribute.
#[derive(Debug)]
pub struct VplsSummary<'a> {
    table: &'a AttrTable,
    resolver: &'a dyn IfResolver,
}

// ===== impl VplsSummary =====

impl<'a> VplsSummary<'a> {
    pub fn new(table: &'a AttrTable, resolver: &'a dyn IfResolver) -> Self {
        VplsSummary { table, resolver }
    }

    fn nonzero_u32(&self, attr: VplsAttr) -> Option<u32> {
        self.table.get_u32(attr).filter(|value| *value != 0)
    }

    fn nonzero_u8(&self, attr: VplsAttr) -> Option<u8> {
        self.table.get_u8(attr).filter(|value| *value != 0)
    }
}

impl std::fmt::Display for VplsSummary<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let table = self.table;

        let Some(id) = table.get_u32(VplsAttr::Id) else {
            return Ok(());
        };
        write!(f, "id {id} ")?;

        if let Some(label) = self.nonzero_u32(VplsAttr::InLabel) {
            write!(f, "label in {label} ")?;
        }
        if let Some(label) = self.nonzero_u32(VplsAttr::OutLabel) {
            write!(f, "out {label} ")?;
        }
        if let Some(vlan_id) = self.nonzero_u8(VplsAttr::VlanId) {
            write!(f, "vlan {vlan_id} ")?;
        }

        if let Some(nexthop) = NextHop::from_table(table) {
            write!(f, "via {nexthop} ")?;
        }

        if let Some(ifindex) = table.get_u32(VplsAttr::Oif) {
            match self.resolver.index_to_name(ifindex) {
                Some(ifname) => write!(f, "dev {ifname} ")?,
                None => write!(f, "dev {ifindex} ")?,
            }
        }

        if let Some(ttl) = self.nonzero_u8(VplsAttr::Ttl) {
            write!(f, "ttl {ttl} ")?;
        }

        Ok(())
    }
}
