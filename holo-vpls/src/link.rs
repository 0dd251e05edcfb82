//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use holo_utils::ip::AddressFamily;
use holo_utils::mpls::Label;

use crate::args;
use crate::attr::{AttrBuilder, AttrTable, AttrValue, VplsAttr};
use crate::debug::Debug;
use crate::error::{
    EncodeResult, LabelDirection, ParseError, ParseResult, TtlError,
};
use crate::ifname::IfResolver;

// VPLS link configuration.
//
// Every field is optional. Absent fields produce no attribute.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VplsLink {
    pub id: Option<u32>,
    pub in_label: Option<Label>,
    pub out_label: Option<Label>,
    pub oif: Option<u32>,
    pub ttl: Option<u8>,
    pub vlan_id: Option<u8>,
    pub nexthop: Option<NextHop>,
}

// Address of the remote pseudowire endpoint.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NextHop {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
}

// Next-hop addresses seen while parsing, one per address family.
#[derive(Debug, Default)]
struct NextHopCandidates {
    ipv4: Option<Ipv4Addr>,
    ipv6: Option<Ipv6Addr>,
}

// ===== impl VplsLink =====

impl VplsLink {
    // Largest VPLS identifier advertised by the usage text.
    pub const ID_MAX: u32 = 0x00FF_FFFF;

    // Parses link options.
    //
    // Nothing is emitted here: the returned configuration is fully
    // validated, and the first invalid option aborts the whole parse.
    pub fn parse<I, S>(
        tokens: I,
        resolver: &dyn IfResolver,
    ) -> ParseResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut link = VplsLink::default();
        let mut nexthops = NextHopCandidates::default();

        let mut tokens = tokens.into_iter();
        while let Some(arg) = tokens.next() {
            let arg = arg.as_ref();

            if args::matches(arg, "id") {
                let value = next_arg(&mut tokens, "id")?;
                let value = value.as_ref();
                let id = args::get_u32(value)
                    .ok_or_else(|| ParseError::InvalidId(value.to_owned()))?;
                if id > Self::ID_MAX {
                    Debug::IdOutOfRange(id).log();
                }
                link.id = Some(id);
            } else if args::matches(arg, "via") {
                let value = next_arg(&mut tokens, "via")?;
                let value = value.as_ref();
                let addr = args::get_addr(value).ok_or_else(|| {
                    ParseError::InvalidAddress(value.to_owned())
                })?;
                nexthops.update(addr);
            } else if args::matches(arg, "vlan") {
                let value = next_arg(&mut tokens, "vlan")?;
                let value = value.as_ref();
                let vlan_id = args::get_u8(value)
                    .ok_or_else(|| ParseError::InvalidVlan(value.to_owned()))?;
                link.vlan_id = Some(vlan_id);
            } else if args::matches(arg, "dev") {
                let value = next_arg(&mut tokens, "dev")?;
                let value = value.as_ref();
                let ifindex = resolver.name_to_index(value).ok_or_else(|| {
                    ParseError::InvalidDevice(value.to_owned())
                })?;
                link.oif = Some(ifindex);
            } else if args::matches(arg, "ttl")
                || args::matches(arg, "hoplimit")
            {
                let value = next_arg(&mut tokens, "ttl")?;
                link.ttl = parse_ttl(value.as_ref())?;
            } else if args::matches(arg, "input") {
                let value = next_arg(&mut tokens, "input")?;
                let label = parse_label(value.as_ref(), LabelDirection::Input)?;
                link.in_label = Some(label);
            } else if args::matches(arg, "output") {
                let value = next_arg(&mut tokens, "output")?;
                let label =
                    parse_label(value.as_ref(), LabelDirection::Output)?;
                link.out_label = Some(label);
            } else if args::matches(arg, "help") {
                return Err(ParseError::HelpRequested);
            } else {
                return Err(ParseError::UnknownOption(arg.to_owned()));
            }
        }

        link.nexthop = nexthops.resolve();
        Debug::LinkParse(&link).log();

        Ok(link)
    }

    // Returns the attributes describing this link, in encoding order.
    pub fn attrs(&self) -> Vec<(VplsAttr, AttrValue)> {
        let mut attrs = Vec::with_capacity(VplsAttr::ALL.len());
        if let Some(id) = self.id {
            attrs.push((VplsAttr::Id, AttrValue::U32(id)));
        }
        if let Some(label) = self.in_label {
            attrs.push((VplsAttr::InLabel, AttrValue::U32(label.get())));
        }
        if let Some(label) = self.out_label {
            attrs.push((VplsAttr::OutLabel, AttrValue::U32(label.get())));
        }
        if let Some(ifindex) = self.oif {
            attrs.push((VplsAttr::Oif, AttrValue::U32(ifindex)));
        }
        if let Some(ttl) = self.ttl {
            attrs.push((VplsAttr::Ttl, AttrValue::U8(ttl)));
        }
        if let Some(vlan_id) = self.vlan_id {
            attrs.push((VplsAttr::VlanId, AttrValue::U8(vlan_id)));
        }
        if let Some(nexthop) = &self.nexthop {
            attrs.push(nexthop.attr());
        }
        attrs
    }

    // Appends the link attributes to the given builder.
    pub fn encode(&self, builder: &mut AttrBuilder) -> EncodeResult<()> {
        for (attr, value) in self.attrs() {
            builder.put(attr, &value)?;
        }
        Ok(())
    }

    // Rebuilds a link configuration from decoded attributes.
    //
    // Unlike the summary printer, this keeps zero-valued fields. Labels
    // with bits set outside the 20-bit field are dropped.
    pub fn from_table(table: &AttrTable) -> VplsLink {
        let label = |attr| {
            table
                .get_u32(attr)
                .and_then(|value| Label::try_new(value).ok())
        };
        VplsLink {
            id: table.get_u32(VplsAttr::Id),
            in_label: label(VplsAttr::InLabel),
            out_label: label(VplsAttr::OutLabel),
            oif: table.get_u32(VplsAttr::Oif),
            ttl: table.get_u8(VplsAttr::Ttl),
            vlan_id: table.get_u8(VplsAttr::VlanId),
            nexthop: NextHop::from_table(table),
        }
    }
}

// ===== impl NextHop =====

impl NextHop {
    pub fn address_family(&self) -> AddressFamily {
        match self {
            NextHop::Ipv4(_) => AddressFamily::Ipv4,
            NextHop::Ipv6(_) => AddressFamily::Ipv6,
        }
    }

    pub fn addr(&self) -> IpAddr {
        match self {
            NextHop::Ipv4(addr) => (*addr).into(),
            NextHop::Ipv6(addr) => (*addr).into(),
        }
    }

    // Returns the next-hop carried by decoded attributes.
    //
    // The IPv4 attribute hides the IPv6 one whenever present, even when
    // unspecified. Unspecified addresses count as unset.
    pub fn from_table(table: &AttrTable) -> Option<NextHop> {
        if table.contains(VplsAttr::Nh) {
            table
                .get_ipv4(VplsAttr::Nh)
                .filter(|addr| !addr.is_unspecified())
                .map(NextHop::Ipv4)
        } else {
            table
                .get_ipv6(VplsAttr::Nh6)
                .filter(|addr| !addr.is_unspecified())
                .map(NextHop::Ipv6)
        }
    }

    fn attr(&self) -> (VplsAttr, AttrValue) {
        match self {
            NextHop::Ipv4(addr) => (VplsAttr::Nh, AttrValue::Ipv4(*addr)),
            NextHop::Ipv6(addr) => (VplsAttr::Nh6, AttrValue::Ipv6(*addr)),
        }
    }
}

impl std::fmt::Display for NextHop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.address_family().keyword(), self.addr())
    }
}

// ===== impl NextHopCandidates =====

impl NextHopCandidates {
    fn update(&mut self, addr: IpAddr) {
        match addr {
            IpAddr::V4(addr) => self.ipv4 = Some(addr),
            IpAddr::V6(addr) => self.ipv6 = Some(addr),
        }
    }

    // IPv4 wins over IPv6. Unspecified addresses count as unset.
    fn resolve(self) -> Option<NextHop> {
        if let Some(addr) = self.ipv4.filter(|addr| !addr.is_unspecified()) {
            return Some(NextHop::Ipv4(addr));
        }
        self.ipv6
            .filter(|addr| !addr.is_unspecified())
            .map(NextHop::Ipv6)
    }
}

// ===== helper functions =====

fn next_arg<I, S>(tokens: &mut I, keyword: &'static str) -> ParseResult<S>
where
    I: Iterator<Item = S>,
{
    tokens.next().ok_or(ParseError::IncompleteCommand(keyword))
}

fn parse_ttl(value: &str) -> ParseResult<Option<u8>> {
    if value == "inherit" {
        return Ok(None);
    }

    let error = |reason| ParseError::InvalidTtl(value.to_owned(), reason);
    let ttl = args::get_u32(value).ok_or_else(|| error(TtlError::Malformed))?;
    match ttl {
        0 => Err(error(TtlError::Zero)),
        1..=255 => Ok(Some(ttl as u8)),
        _ => Err(error(TtlError::TooLarge)),
    }
}

fn parse_label(value: &str, direction: LabelDirection) -> ParseResult<Label> {
    args::get_u32(value)
        .and_then(|value| Label::try_new(value).ok())
        .ok_or_else(|| ParseError::InvalidLabel(direction, value.to_owned()))
}
