//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

mod config;

use std::io::Write;
use std::sync::Arc;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use config::{Config, LoggingFmtStyle};
use holo_vpls::{
    AttrBuilder, AttrTable, IfResolver, LinkKind, SystemResolver, link_kind,
};
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::prelude::*;

// Exit status used when the link options are rejected.
const EXIT_PARSE_ABORT: i32 = 255;

fn init_tracing(config: &config::Logging) {
    // Enable logging to stderr.
    let stderr = config.stderr.enabled.then(|| {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_file(config.stderr.fmt.show_source)
            .with_line_number(config.stderr.fmt.show_source)
            .with_ansi(config.stderr.fmt.colors);
        match config.stderr.fmt.style {
            LoggingFmtStyle::Compact => layer.compact().boxed(),
            LoggingFmtStyle::Full => layer.boxed(),
            LoggingFmtStyle::Json => layer.json().boxed(),
            LoggingFmtStyle::Pretty => layer.pretty().boxed(),
        }
    });

    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr)
        .init();
}

fn resolver(config: &Config) -> Arc<dyn IfResolver> {
    if config.interfaces.is_empty() {
        Arc::new(SystemResolver)
    } else {
        Arc::new(config.interfaces.clone())
    }
}

fn encode(kind: &dyn LinkKind, matches: &ArgMatches<'_>) -> i32 {
    let args = matches
        .values_of("TOKENS")
        .map(|values| values.collect::<Vec<_>>())
        .unwrap_or_default();

    let mut builder = AttrBuilder::new();
    let mut stderr = std::io::stderr();
    if kind.parse_opt(&args, &mut builder, &mut stderr).is_err() {
        return EXIT_PARSE_ABORT;
    }

    println!("{}", hex::encode(builder.as_bytes()));
    0
}

fn show(kind: &dyn LinkKind, matches: &ArgMatches<'_>) -> i32 {
    let input: String = matches
        .value_of("HEX")
        .unwrap_or_default()
        .split_whitespace()
        .collect();

    let data = match hex::decode(&input) {
        Ok(data) => data,
        Err(error) => {
            eprintln!("Error: invalid hex dump: {error}");
            return 1;
        }
    };
    let table = match AttrTable::decode(&data) {
        Ok(table) => table,
        Err(error) => {
            let error = holo_vpls::Error::from(error);
            error.log();
            eprintln!("Error: {error}: {}", error_source(&error));
            return 1;
        }
    };

    let mut stdout = std::io::stdout().lock();
    let result = kind
        .print_opt(&mut stdout, Some(&table))
        .and_then(|_| writeln!(stdout));
    match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("Error: {error}");
            1
        }
    }
}

fn help_link(kind: &dyn LinkKind) -> i32 {
    match kind.print_help(&mut std::io::stdout()) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("Error: {error}");
            1
        }
    }
}

fn error_source(error: &dyn std::error::Error) -> String {
    error
        .source()
        .map(|source| source.to_string())
        .unwrap_or_default()
}

// ===== main =====

fn main() {
    // Parse command-line parameters.
    let matches = App::new("VPLS link options")
        .about("Encode and decode VPLS pseudowire link attributes")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("file")
                .help("Specify an alternative configuration file."),
        )
        .subcommand(
            SubCommand::with_name("encode")
                .about("Encode link options into netlink attributes")
                .setting(AppSettings::TrailingVarArg)
                .arg(
                    Arg::with_name("TOKENS")
                        .help("Link options (e.g. id 42 output 200)")
                        .multiple(true)
                        .allow_hyphen_values(true)
                        .index(1),
                ),
        )
        .subcommand(
            SubCommand::with_name("show")
                .about("Print the summary of encoded netlink attributes")
                .arg(
                    Arg::with_name("HEX")
                        .help("Hex dump of the attributes")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            SubCommand::with_name("help-link")
                .about("Print the link options synopsis"),
        )
        .get_matches();

    // Read configuration file.
    let config = match Config::load(matches.value_of("config")) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };

    // Initialize tracing.
    init_tracing(&config.logging);

    let resolver = resolver(&config);
    debug!(?resolver, "using interface resolver");
    let Some(kind) = link_kind("vpls", resolver) else {
        eprintln!("unsupported link type");
        std::process::exit(1);
    };

    let status = match matches.subcommand() {
        ("encode", Some(matches)) => encode(kind.as_ref(), matches),
        ("show", Some(matches)) => show(kind.as_ref(), matches),
        ("help-link", _) => help_link(kind.as_ref()),
        _ => unreachable!(),
    };
    std::process::exit(status);
}
