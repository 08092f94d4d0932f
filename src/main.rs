//! camotls: decode a ClientHello, compose the fake server flight

use std::path::Path;

use anyhow::{Context, bail};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cli;

use camotls::config::{FrontConfig, LogLevel};
use camotls::protocol::constants::TLS_RECORD_HEADER_LEN;
use camotls::protocol::record::{RecordCheck, is_tls_handshake};
use camotls::{ClientHello, SecureRandom, build_fake_handshake};

use crate::cli::{Command, Input};

fn init_logging(config: &FrontConfig, silent: bool, cli_log_level: Option<&str>) {
    let effective_log_level = if silent {
        LogLevel::Silent
    } else if let Some(s) = cli_log_level {
        LogLevel::from_str_loose(s)
    } else {
        config.general.log_level.clone()
    };

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(effective_log_level.to_filter_str())
    };

    // stdout carries the summary and reply; logs go to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!config.general.disable_colors);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    debug!("Log level: {}", effective_log_level);
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let opts = match cli::parse_args(&args) {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            eprint!("{}", cli::USAGE);
            return Ok(());
        }
        Ok(Command::Version) => {
            println!("camotls {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Err(e) => {
            eprintln!("[camotls] {}", e);
            eprint!("{}", cli::USAGE);
            std::process::exit(2);
        }
    };

    let config_exists = Path::new(&opts.config_path).exists();
    let mut config = if config_exists {
        FrontConfig::load(&opts.config_path)
            .with_context(|| format!("loading {}", opts.config_path))?
    } else {
        FrontConfig::default()
    };
    if opts.permissive {
        config.handshake.record_check = RecordCheck::Permissive;
    }

    init_logging(&config, opts.silent, opts.log_level.as_deref());

    if config_exists {
        info!("Config: {}", opts.config_path);
    } else {
        debug!("No config at {}, using defaults", opts.config_path);
    }

    let record = match &opts.input {
        Input::Hex(text) => cli::decode_hex_input(text)?,
        Input::File(path) => {
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?
        }
    };

    let payload_len = record.len().saturating_sub(TLS_RECORD_HEADER_LEN);
    if payload_len > config.handshake.max_record_len {
        bail!(
            "record payload of {} bytes exceeds handshake.max_record_len = {}",
            payload_len,
            config.handshake.max_record_len
        );
    }

    if !is_tls_handshake(&record) {
        warn!("Input does not start with a TLS handshake record header");
    }

    let hello = match ClientHello::from_record(&record, config.handshake.record_check) {
        Ok(hello) => hello,
        Err(e) if e.is_wrong_message() => {
            warn!(error = %e, "Peer sent a different handshake message");
            std::process::exit(1);
        }
        Err(e) => {
            error!(error = %e, "Rejected ClientHello");
            std::process::exit(1);
        }
    };

    println!("{}", cli::summarize(&hello));

    if opts.reply || opts.out.is_some() {
        let rng = SecureRandom::new();
        let reply = build_fake_handshake(&hello, &rng)?;
        info!(len = reply.len(), "Composed fake server handshake");

        if opts.reply {
            println!("{}", hex::encode(&reply));
        }
        if let Some(path) = &opts.out {
            std::fs::write(path, &reply)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("Reply written to {}", path.display());
        }
    }

    Ok(())
}
