//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::io::Write;
use std::sync::Arc;

use tracing::warn;

use crate::attr::{AttrBuilder, AttrTable, VPLS_ATTR_MAX};
use crate::error::{Error, ParseError};
use crate::help;
use crate::ifname::{IfResolver, SystemResolver};
use crate::link::VplsLink;
use crate::print::VplsSummary;

// Link type handlers, looked up by the `type` keyword of `ip link`.
pub trait LinkKind: std::fmt::Debug + Send + Sync {
    // Name of the link type.
    fn kind(&self) -> &'static str;

    // Highest attribute type of the link type's attribute set.
    fn max_attr(&self) -> u16;

    // Parses the link type options and appends the resulting attributes.
    //
    // Diagnostics are written to `diag`. On error, `builder` is left
    // untouched.
    fn parse_opt(
        &self,
        args: &[&str],
        builder: &mut AttrBuilder,
        diag: &mut dyn Write,
    ) -> Result<(), Error>;

    // Writes the one-line summary of the decoded attributes.
    fn print_opt(
        &self,
        out: &mut dyn Write,
        table: Option<&AttrTable>,
    ) -> std::io::Result<()>;

    // Writes the usage text.
    fn print_help(&self, out: &mut dyn Write) -> std::io::Result<()>;
}

// VPLS link type.
#[derive(Debug)]
pub struct Vpls {
    resolver: Arc<dyn IfResolver>,
}

// ===== impl Vpls =====

impl Vpls {
    pub const KIND: &'static str = "vpls";

    pub fn new(resolver: Arc<dyn IfResolver>) -> Vpls {
        Vpls { resolver }
    }

    pub fn resolver(&self) -> &dyn IfResolver {
        self.resolver.as_ref()
    }

    fn report(error: &ParseError, diag: &mut dyn Write) {
        // Diagnostics are best-effort.
        let result = match error {
            ParseError::HelpRequested => help::print_explain(diag),
            ParseError::UnknownOption(..) => writeln!(diag, "{error}")
                .and_then(|_| help::print_explain(diag)),
            ParseError::IncompleteCommand(..) => writeln!(diag, "{error}"),
            _ => writeln!(diag, "Error: {error}"),
        };
        if let Err(io_error) = result {
            warn!(error = %io_error, "failed to write diagnostics");
        }
    }
}

impl Default for Vpls {
    fn default() -> Vpls {
        Vpls::new(Arc::new(SystemResolver))
    }
}

impl LinkKind for Vpls {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn max_attr(&self) -> u16 {
        VPLS_ATTR_MAX
    }

    fn parse_opt(
        &self,
        args: &[&str],
        builder: &mut AttrBuilder,
        diag: &mut dyn Write,
    ) -> Result<(), Error> {
        let link = match VplsLink::parse(args, self.resolver()) {
            Ok(link) => link,
            Err(error) => {
                error.log();
                Vpls::report(&error, diag);
                return Err(error.into());
            }
        };

        // Encode into a scratch builder first so that a failure halfway
        // doesn't leave a partial attribute set behind.
        let mut scratch = builder.clone();
        link.encode(&mut scratch)?;
        *builder = scratch;

        Ok(())
    }

    fn print_opt(
        &self,
        out: &mut dyn Write,
        table: Option<&AttrTable>,
    ) -> std::io::Result<()> {
        let Some(table) = table else {
            return Ok(());
        };
        write!(out, "{}", VplsSummary::new(table, self.resolver()))
    }

    fn print_help(&self, out: &mut dyn Write) -> std::io::Result<()> {
        help::print_explain(out)
    }
}

// ===== global functions =====

// Returns the handler for the given link type, if supported.
pub fn link_kind(
    kind: &str,
    resolver: Arc<dyn IfResolver>,
) -> Option<Box<dyn LinkKind>> {
    match kind {
        Vpls::KIND => Some(Box::new(Vpls::new(resolver))),
        _ => None,
    }
}
