//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::{Ipv4Addr, Ipv6Addr};

use bytes::{Buf, BufMut, Bytes, BytesMut};
use holo_utils::bytes::{BufExt, BytesMutExt};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::debug::Debug;
use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};

//
// Netlink route attribute (struct rtattr).
//
// Encoding format (host byte order for the header and integer payloads):
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |            Length             |             Type              |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                                                               |
// ~                Payload (padded to 4 octets)                   ~
// |                                                               |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//
// The length covers the header and the payload, but not the padding.
//
pub const RTA_HDR_SIZE: usize = 4;
pub const RTA_ALIGNTO: usize = 4;
pub const VPLS_ATTR_MAX: u16 = 8;

// VPLS link attribute types (IFLA_VPLS_*).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(FromPrimitive)]
pub enum VplsAttr {
    Id = 1,
    InLabel = 2,
    OutLabel = 3,
    Oif = 4,
    Ttl = 5,
    VlanId = 6,
    Nh = 7,
    Nh6 = 8,
}

// Payload type of an attribute.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttrKind {
    U8,
    U32,
    Ipv4,
    Ipv6,
}

// Typed attribute payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttrValue {
    U8(u8),
    U32(u32),
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
}

// Appends VPLS attributes to a flat attribute buffer.
#[derive(Clone, Debug)]
pub struct AttrBuilder {
    buf: BytesMut,
    max_len: usize,
}

// Decoded VPLS attributes, indexed by attribute type.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AttrTable {
    attrs: [Option<Bytes>; VPLS_ATTR_MAX as usize + 1],
}

// ===== impl VplsAttr =====

impl VplsAttr {
    // All attributes, in encoding order.
    pub const ALL: [VplsAttr; 8] = [
        VplsAttr::Id,
        VplsAttr::InLabel,
        VplsAttr::OutLabel,
        VplsAttr::Oif,
        VplsAttr::Ttl,
        VplsAttr::VlanId,
        VplsAttr::Nh,
        VplsAttr::Nh6,
    ];

    pub fn decode(value: u16) -> Option<Self> {
        VplsAttr::from_u16(value)
    }

    // Returns the payload type carried by this attribute.
    pub const fn kind(&self) -> AttrKind {
        match self {
            VplsAttr::Id
            | VplsAttr::InLabel
            | VplsAttr::OutLabel
            | VplsAttr::Oif => AttrKind::U32,
            VplsAttr::Ttl | VplsAttr::VlanId => AttrKind::U8,
            VplsAttr::Nh => AttrKind::Ipv4,
            VplsAttr::Nh6 => AttrKind::Ipv6,
        }
    }
}

impl std::fmt::Display for VplsAttr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VplsAttr::Id => write!(f, "IFLA_VPLS_ID"),
            VplsAttr::InLabel => write!(f, "IFLA_VPLS_IN_LABEL"),
            VplsAttr::OutLabel => write!(f, "IFLA_VPLS_OUT_LABEL"),
            VplsAttr::Oif => write!(f, "IFLA_VPLS_OIF"),
            VplsAttr::Ttl => write!(f, "IFLA_VPLS_TTL"),
            VplsAttr::VlanId => write!(f, "IFLA_VPLS_VLANID"),
            VplsAttr::Nh => write!(f, "IFLA_VPLS_NH"),
            VplsAttr::Nh6 => write!(f, "IFLA_VPLS_NH6"),
        }
    }
}

// ===== impl AttrKind =====

impl AttrKind {
    // Returns the payload length in bytes.
    pub const fn width(&self) -> usize {
        match self {
            AttrKind::U8 => 1,
            AttrKind::U32 => 4,
            AttrKind::Ipv4 => 4,
            AttrKind::Ipv6 => 16,
        }
    }
}

impl std::fmt::Display for AttrKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttrKind::U8 => write!(f, "u8"),
            AttrKind::U32 => write!(f, "u32"),
            AttrKind::Ipv4 => write!(f, "ipv4"),
            AttrKind::Ipv6 => write!(f, "ipv6"),
        }
    }
}

// ===== impl AttrValue =====

impl AttrValue {
    pub const fn kind(&self) -> AttrKind {
        match self {
            AttrValue::U8(_) => AttrKind::U8,
            AttrValue::U32(_) => AttrKind::U32,
            AttrValue::Ipv4(_) => AttrKind::Ipv4,
            AttrValue::Ipv6(_) => AttrKind::Ipv6,
        }
    }

    fn encode(&self, buf: &mut BytesMut) {
        match self {
            AttrValue::U8(value) => buf.put_u8(*value),
            AttrValue::U32(value) => buf.put_u32_ne(*value),
            AttrValue::Ipv4(addr) => buf.put_ipv4(addr),
            AttrValue::Ipv6(addr) => buf.put_ipv6(addr),
        }
    }

    fn decode(kind: AttrKind, buf: &mut Bytes) -> DecodeResult<Self> {
        let value = match kind {
            AttrKind::U8 => AttrValue::U8(buf.try_get_u8()?),
            AttrKind::U32 => AttrValue::U32(buf.try_get_u32_ne()?),
            AttrKind::Ipv4 => AttrValue::Ipv4(buf.try_get_ipv4()?),
            AttrKind::Ipv6 => AttrValue::Ipv6(buf.try_get_ipv6()?),
        };
        Ok(value)
    }
}

impl std::fmt::Display for AttrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttrValue::U8(value) => write!(f, "{value}"),
            AttrValue::U32(value) => write!(f, "{value}"),
            AttrValue::Ipv4(addr) => write!(f, "{addr}"),
            AttrValue::Ipv6(addr) => write!(f, "{addr}"),
        }
    }
}

// ===== impl AttrBuilder =====

impl AttrBuilder {
    // Same bound iproute2 uses for link info attributes.
    pub const DFLT_MAX_LEN: usize = 1024;

    pub fn new() -> AttrBuilder {
        AttrBuilder::with_max_len(Self::DFLT_MAX_LEN)
    }

    pub fn with_max_len(max_len: usize) -> AttrBuilder {
        AttrBuilder {
            buf: BytesMut::with_capacity(max_len),
            max_len,
        }
    }

    // Appends one attribute.
    //
    // The value type must match the attribute schema, and the aligned
    // attribute must fit within the maximum buffer length.
    pub fn put(
        &mut self,
        attr: VplsAttr,
        value: &AttrValue,
    ) -> EncodeResult<()> {
        let kind = attr.kind();
        if value.kind() != kind {
            return Err(EncodeError::KindMismatch(attr, value.kind()));
        }

        let attr_len = RTA_HDR_SIZE + kind.width();
        let aligned_len = attr_len.next_multiple_of(RTA_ALIGNTO);
        if self.buf.len() + aligned_len > self.max_len {
            return Err(EncodeError::MessageTooLong(self.max_len));
        }

        self.buf.put_u16_ne(attr_len as u16);
        self.buf.put_u16_ne(attr as u16);
        value.encode(&mut self.buf);
        self.buf.put_align(RTA_ALIGNTO);

        Debug::AttrEncode(attr, value).log();

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

impl Default for AttrBuilder {
    fn default() -> AttrBuilder {
        AttrBuilder::new()
    }
}

// ===== impl AttrTable =====

impl AttrTable {
    // Demultiplexes a flat attribute buffer.
    //
    // Attribute types outside the VPLS schema are skipped. When the same type
    // appears more than once, the last occurrence wins.
    pub fn decode(data: &[u8]) -> DecodeResult<AttrTable> {
        let mut buf = Bytes::copy_from_slice(data);
        let mut table = AttrTable::default();

        while buf.remaining() >= RTA_HDR_SIZE {
            let mut hdr = buf.clone();
            let attr_len = hdr.try_get_u16_ne()?;
            let attr_type = hdr.try_get_u16_ne()?;
            if (attr_len as usize) < RTA_HDR_SIZE
                || attr_len as usize > buf.remaining()
            {
                return Err(DecodeError::InvalidAttrLength(attr_len));
            }

            match VplsAttr::decode(attr_type) {
                Some(attr) => {
                    let payload = buf.slice(RTA_HDR_SIZE..attr_len as usize);
                    table.insert(attr, payload);
                }
                None => Debug::AttrUnknown(attr_type).log(),
            }

            // The padding of the last attribute may be missing.
            let aligned_len =
                (attr_len as usize).next_multiple_of(RTA_ALIGNTO);
            buf.advance(aligned_len.min(buf.remaining()));
        }

        if buf.has_remaining() {
            return Err(DecodeError::TrailingBytes(buf.remaining()));
        }

        Ok(table)
    }

    // Stores a raw payload, replacing any previous one.
    pub fn insert(&mut self, attr: VplsAttr, payload: Bytes) {
        self.attrs[attr as usize] = Some(payload);
    }

    pub fn get(&self, attr: VplsAttr) -> Option<&Bytes> {
        self.attrs[attr as usize].as_ref()
    }

    pub fn contains(&self, attr: VplsAttr) -> bool {
        self.get(attr).is_some()
    }

    pub fn payload_len(&self, attr: VplsAttr) -> Option<usize> {
        self.get(attr).map(|payload| payload.len())
    }

    // Decodes the payload of an attribute according to the schema.
    //
    // Returns `None` when the attribute is absent or its payload is shorter
    // than the schema width.
    pub fn get_value(&self, attr: VplsAttr) -> Option<AttrValue> {
        let mut payload = self.get(attr)?.clone();
        match AttrValue::decode(attr.kind(), &mut payload) {
            Ok(value) => Some(value),
            Err(_) => {
                Debug::AttrTruncated(attr, self.payload_len(attr)?).log();
                None
            }
        }
    }

    pub fn get_u8(&self, attr: VplsAttr) -> Option<u8> {
        match self.get_value(attr)? {
            AttrValue::U8(value) => Some(value),
            _ => None,
        }
    }

    pub fn get_u32(&self, attr: VplsAttr) -> Option<u32> {
        match self.get_value(attr)? {
            AttrValue::U32(value) => Some(value),
            _ => None,
        }
    }

    pub fn get_ipv4(&self, attr: VplsAttr) -> Option<Ipv4Addr> {
        match self.get_value(attr)? {
            AttrValue::Ipv4(addr) => Some(addr),
            _ => None,
        }
    }

    pub fn get_ipv6(&self, attr: VplsAttr) -> Option<Ipv6Addr> {
        match self.get_value(attr)? {
            AttrValue::Ipv6(addr) => Some(addr),
            _ => None,
        }
    }

    // Iterates over the present attributes in type order.
    pub fn iter(&self) -> impl Iterator<Item = (VplsAttr, &Bytes)> + '_ {
        VplsAttr::ALL.into_iter().filter_map(move |attr| {
            self.get(attr).map(|payload| (attr, payload))
        })
    }
}
