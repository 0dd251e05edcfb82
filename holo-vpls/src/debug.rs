//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::{debug, debug_span, trace};

use crate::attr::{AttrValue, VplsAttr};
use crate::link::VplsLink;

// VPLS debug messages.
#[derive(Debug)]
pub enum Debug<'a> {
    IdOutOfRange(u32),
    LinkParse(&'a VplsLink),
    AttrEncode(VplsAttr, &'a AttrValue),
    AttrUnknown(u16),
    AttrTruncated(VplsAttr, usize),
    IfNameLookupFailed(&'a str, nix::Error),
}

// ===== impl Debug =====

impl Debug<'_> {
    // Log debug message using the tracing API.
    pub(crate) fn log(&self) {
        match self {
            Debug::IdOutOfRange(id) => {
                debug!(%id, max = VplsLink::ID_MAX, "{}", self);
            }
            Debug::LinkParse(link) => {
                debug!(?link, "{}", self);
            }
            Debug::AttrEncode(attr, value) => {
                debug_span!("attribute", %attr).in_scope(|| {
                    trace!(%value, "{}", self);
                });
            }
            Debug::AttrUnknown(attr_type) => {
                trace!(%attr_type, "{}", self);
            }
            Debug::AttrTruncated(attr, len) => {
                debug_span!("attribute", %attr).in_scope(|| {
                    debug!(%len, width = attr.kind().width(), "{}", self);
                });
            }
            Debug::IfNameLookupFailed(name, error) => {
                debug!(%name, %error, "{}", self);
            }
        }
    }
}

impl std::fmt::Display for Debug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Debug::IdOutOfRange(..) => {
                write!(f, "VPLS ID exceeds 24 bits")
            }
            Debug::LinkParse(..) => {
                write!(f, "link options parsed")
            }
            Debug::AttrEncode(..) => {
                write!(f, "attribute encoded")
            }
            Debug::AttrUnknown(..) => {
                write!(f, "ignoring unknown attribute")
            }
            Debug::AttrTruncated(..) => {
                write!(f, "ignoring truncated attribute")
            }
            Debug::IfNameLookupFailed(..) => {
                write!(f, "interface name lookup failed")
            }
        }
    }
}
