//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! VPLS pseudowire link options.
//!
//! Translates the textual `ip link ... type vpls` options into the
//! `IFLA_VPLS_*` netlink attribute set, and decoded attributes back into a
//! one-line summary.

#![warn(rust_2018_idioms)]

mod args;
pub mod attr;
pub mod debug;
pub mod error;
pub mod help;
pub mod ifname;
pub mod kind;
pub mod link;
pub mod print;

pub use attr::{AttrBuilder, AttrTable, AttrValue, VplsAttr};
pub use error::{DecodeError, EncodeError, Error, ParseError};
pub use ifname::{IfResolver, StaticResolver, SystemResolver};
pub use kind::{LinkKind, Vpls, link_kind};
pub use link::{NextHop, VplsLink};
pub use print::VplsSummary;
