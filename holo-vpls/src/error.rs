//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use bytes::TryGetError;
use tracing::{debug, warn};

use crate::attr::{AttrKind, VplsAttr};

// Type aliases.
pub type ParseResult<T> = Result<T, ParseError>;
pub type EncodeResult<T> = Result<T, EncodeError>;
pub type DecodeResult<T> = Result<T, DecodeError>;

// VPLS link errors.
#[derive(Debug)]
pub enum Error {
    Parse(ParseError),
    Encode(EncodeError),
    Decode(DecodeError),
}

// Errors found while parsing link options.
//
// Argument errors carry the offending token verbatim.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    InvalidId(String),
    InvalidAddress(String),
    InvalidVlan(String),
    InvalidDevice(String),
    InvalidTtl(String, TtlError),
    InvalidLabel(LabelDirection, String),
    IncompleteCommand(&'static str),
    UnknownOption(String),
    HelpRequested,
}

// Reason why a TTL argument was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TtlError {
    Malformed,
    Zero,
    TooLarge,
}

// Direction of an MPLS label.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LabelDirection {
    Input,
    Output,
}

// Attribute encoding errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EncodeError {
    KindMismatch(VplsAttr, AttrKind),
    MessageTooLong(usize),
}

// Attribute decoding errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DecodeError {
    ReadOutOfBounds,
    InvalidAttrLength(u16),
    TrailingBytes(usize),
}

// ===== impl Error =====

impl Error {
    pub fn log(&self) {
        match self {
            Error::Parse(error) => error.log(),
            Error::Encode(error) => {
                warn!(%error, "{}", self);
            }
            Error::Decode(error) => {
                warn!(%error, "{}", self);
            }
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(error) => error.fmt(f),
            Error::Encode(..) => {
                write!(f, "failed to encode link attributes")
            }
            Error::Decode(..) => {
                write!(f, "failed to decode link attributes")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(error) => Some(error),
            Error::Encode(error) => Some(error),
            Error::Decode(error) => Some(error),
        }
    }
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Error {
        Error::Parse(error)
    }
}

impl From<EncodeError> for Error {
    fn from(error: EncodeError) -> Error {
        Error::Encode(error)
    }
}

impl From<DecodeError> for Error {
    fn from(error: DecodeError) -> Error {
        Error::Decode(error)
    }
}

// ===== impl ParseError =====

impl ParseError {
    // Returns the token that caused the error, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            ParseError::InvalidId(value)
            | ParseError::InvalidAddress(value)
            | ParseError::InvalidVlan(value)
            | ParseError::InvalidDevice(value)
            | ParseError::InvalidTtl(value, _)
            | ParseError::InvalidLabel(_, value)
            | ParseError::UnknownOption(value) => Some(value),
            ParseError::IncompleteCommand(keyword) => Some(keyword),
            ParseError::HelpRequested => None,
        }
    }

    // Returns a short description of why the argument was rejected.
    pub fn reason(&self) -> &'static str {
        match self {
            ParseError::InvalidId(..) => "invalid id",
            ParseError::InvalidAddress(..) => "invalid address",
            ParseError::InvalidVlan(..) => "invalid vlan id",
            ParseError::InvalidDevice(..) => "invalid device",
            ParseError::InvalidTtl(_, TtlError::TooLarge) => {
                "TTL must be <= 255"
            }
            ParseError::InvalidTtl(..) => "invalid TTL",
            ParseError::InvalidLabel(LabelDirection::Input, _) => {
                "invalid input label"
            }
            ParseError::InvalidLabel(LabelDirection::Output, _) => {
                "invalid output label"
            }
            ParseError::IncompleteCommand(..) => "missing argument",
            ParseError::UnknownOption(..) => "unknown command",
            ParseError::HelpRequested => "help requested",
        }
    }

    // Returns true when parsing stopped because help was requested.
    pub fn is_help(&self) -> bool {
        matches!(self, ParseError::HelpRequested)
    }

    pub(crate) fn log(&self) {
        match self {
            ParseError::HelpRequested => {
                debug!("{}", self);
            }
            ParseError::IncompleteCommand(keyword) => {
                warn!(%keyword, "{}", self);
            }
            _ => {
                let value = self.value().unwrap_or_default();
                warn!(%value, reason = self.reason(), "{}", self);
            }
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidId(value)
            | ParseError::InvalidAddress(value)
            | ParseError::InvalidVlan(value)
            | ParseError::InvalidDevice(value)
            | ParseError::InvalidTtl(value, _)
            | ParseError::InvalidLabel(_, value) => {
                write!(f, "argument \"{}\" is wrong: {}", value, self.reason())
            }
            ParseError::IncompleteCommand(..) => {
                write!(f, "Command line is not complete. Try option \"help\"")
            }
            ParseError::UnknownOption(value) => {
                write!(f, "vpls: unknown command \"{value}\"?")
            }
            ParseError::HelpRequested => {
                write!(f, "help requested")
            }
        }
    }
}

impl std::error::Error for ParseError {}

// ===== impl TtlError =====

impl std::fmt::Display for TtlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TtlError::Malformed => write!(f, "not an unsigned integer"),
            TtlError::Zero => write!(f, "zero is not a valid TTL"),
            TtlError::TooLarge => write!(f, "greater than 255"),
        }
    }
}

// ===== impl LabelDirection =====

impl std::fmt::Display for LabelDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelDirection::Input => write!(f, "input"),
            LabelDirection::Output => write!(f, "output"),
        }
    }
}

// ===== impl EncodeError =====

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::KindMismatch(attr, kind) => {
                write!(f, "{attr} doesn't carry a {kind} value")
            }
            EncodeError::MessageTooLong(max_len) => {
                write!(f, "message exceeded bound of {max_len}")
            }
        }
    }
}

impl std::error::Error for EncodeError {}

// ===== impl DecodeError =====

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::ReadOutOfBounds => {
                write!(f, "attempt to read out of bounds")
            }
            DecodeError::InvalidAttrLength(len) => {
                write!(f, "Invalid attribute length: {len}")
            }
            DecodeError::TrailingBytes(len) => {
                write!(f, "Trailing bytes after last attribute: {len}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<TryGetError> for DecodeError {
    fn from(_error: TryGetError) -> DecodeError {
        DecodeError::ReadOutOfBounds
    }
}
