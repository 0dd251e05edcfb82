//
// Copyright (c) The Holo Core Contributors
//
// See LICENSE for license details.
//

use std::net::{Ipv4Addr, Ipv6Addr};

use bytes::{Buf, BufMut, BytesMut, TryGetError};

// Extension methods for Buf.
pub trait BufExt: Buf {
    /// Gets an IPv4 addr from `self` in network byte order.
    ///
    /// The current position is advanced by 4.
    ///
    /// Returns `Err` if fewer than 4 bytes remain.
    fn try_get_ipv4(&mut self) -> Result<Ipv4Addr, TryGetError>;

    /// Gets an IPv6 addr from `self` in network byte order.
    ///
    /// The current position is advanced by 16.
    ///
    /// Returns `Err` if fewer than 16 bytes remain.
    fn try_get_ipv6(&mut self) -> Result<Ipv6Addr, TryGetError>;
}

// Extension methods for BytesMut.
pub trait BytesMutExt {
    /// Writes an IPv4 addr to `self` in network byte order.
    ///
    /// The current position is advanced by 4.
    fn put_ipv4(&mut self, addr: &Ipv4Addr);

    /// Writes an IPv6 addr to `self` in network byte order.
    ///
    /// The current position is advanced by 16.
    fn put_ipv6(&mut self, addr: &Ipv6Addr);

    /// Pads `self` with zeroes until its length is a multiple of `align`.
    fn put_align(&mut self, align: usize);
}

// ===== impl Buf =====

impl<B: Buf> BufExt for B {
    fn try_get_ipv4(&mut self) -> Result<Ipv4Addr, TryGetError> {
        let mut octets = [0; 4];
        self.try_copy_to_slice(&mut octets)?;
        Ok(Ipv4Addr::from(octets))
    }

    fn try_get_ipv6(&mut self) -> Result<Ipv6Addr, TryGetError> {
        let mut octets = [0; 16];
        self.try_copy_to_slice(&mut octets)?;
        Ok(Ipv6Addr::from(octets))
    }
}

// ===== impl BytesMut =====

impl BytesMutExt for BytesMut {
    fn put_ipv4(&mut self, addr: &Ipv4Addr) {
        self.put_slice(&addr.octets())
    }

    fn put_ipv6(&mut self, addr: &Ipv6Addr) {
        self.put_slice(&addr.octets())
    }

    fn put_align(&mut self, align: usize) {
        let padding = self.len().next_multiple_of(align) - self.len();
        self.put_bytes(0, padding);
    }
}

// ===== unit tests =====
