//! CLI argument parsing and output formatting

use std::fmt::Write as _;
use std::path::PathBuf;

use camotls::ClientHello;
use camotls::error::{Result, TlsError};

pub const USAGE: &str = "\
Usage: camotls [config.toml] (--hex <HEX> | --file <PATH>) [OPTIONS]

Decode a captured TLS ClientHello record and optionally compose the fake
ServerHello/ChangeCipherSpec/Finished reply for it.

Input:
  --hex <HEX>             Record as hex (whitespace, ':' and 0x prefix allowed)
  --file <PATH>           Record as raw bytes

Options:
  --reply                 Print the composed reply as hex
  --out <PATH>            Write the composed reply bytes to PATH
  --permissive            Skip the record length check
  --silent, -s            Only log warnings and errors
  --log-level <LEVEL>     debug|verbose|normal|silent
  --help, -h              Show this help
  --version, -V           Show version
";

/// Where the ClientHello record comes from
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Hex(String),
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub config_path: String,
    pub input: Input,
    pub reply: bool,
    pub out: Option<PathBuf>,
    pub permissive: bool,
    pub silent: bool,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(CliOptions),
    Help,
    Version,
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| TlsError::InvalidInput(format!("{} needs a value", flag)))
}

/// Parse CLI args (program name already skipped).
pub fn parse_args(args: &[String]) -> Result<Command> {
    let mut config_path = "config.toml".to_string();
    let mut input = None;
    let mut reply = false;
    let mut out = None;
    let mut permissive = false;
    let mut silent = false;
    let mut log_level = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--hex" => {
                input = Some(Input::Hex(next_value(args, &mut i, "--hex")?.to_string()));
            }
            "--file" => {
                input = Some(Input::File(PathBuf::from(next_value(args, &mut i, "--file")?)));
            }
            "--out" => {
                out = Some(PathBuf::from(next_value(args, &mut i, "--out")?));
            }
            "--reply" => reply = true,
            "--permissive" => permissive = true,
            "--silent" | "-s" => silent = true,
            "--log-level" => {
                log_level = Some(next_value(args, &mut i, "--log-level")?.to_string());
            }
            s if s.starts_with("--log-level=") => {
                log_level = Some(s.trim_start_matches("--log-level=").to_string());
            }
            s if !s.starts_with('-') => {
                config_path = s.to_string();
            }
            other => {
                return Err(TlsError::InvalidInput(format!("Unknown option: {}", other)));
            }
        }
        i += 1;
    }

    let input = input
        .ok_or_else(|| TlsError::InvalidInput("one of --hex or --file is required".into()))?;

    Ok(Command::Run(CliOptions {
        config_path,
        input,
        reply,
        out,
        permissive,
        silent,
        log_level,
    }))
}

/// Decode a hex dump as copied from Wireshark, tcpdump or a log line.
pub fn decode_hex_input(text: &str) -> Result<Vec<u8>> {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let cleaned: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();

    hex::decode(&cleaned).map_err(|e| TlsError::InvalidInput(format!("bad hex input: {}", e)))
}

/// Human-readable summary of a decoded ClientHello.
pub fn summarize(hello: &ClientHello) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ClientHello ({} bytes)", hello.length);
    let _ = writeln!(
        out,
        "  version:      0x{:02x}{:02x}",
        hello.client_version[0], hello.client_version[1]
    );
    let _ = writeln!(out, "  random:       {}", hex::encode(hello.random));
    let _ = writeln!(
        out,
        "  session id:   {} bytes {}",
        hello.session_id.len(),
        hex::encode(&hello.session_id)
    );

    let suites: Vec<String> = hello
        .cipher_suite_ids()
        .iter()
        .map(|cs| format!("0x{:04x}", cs))
        .collect();
    let _ = writeln!(out, "  cipher suites: [{}]", suites.join(", "));
    let _ = writeln!(out, "  compression:  {}", hex::encode(&hello.compression_methods));

    let _ = writeln!(out, "  extensions:   {}", hello.extensions.len());
    for ext in &hello.extensions {
        let _ = writeln!(out, "    0x{:04x} ({} bytes)", ext.ext_type, ext.len());
    }

    if let Some(sni) = hello.server_name() {
        let _ = writeln!(out, "  sni:          {}", sni);
    }
    let alpn: Vec<String> = hello
        .alpn_protocols()
        .iter()
        .map(|p| String::from_utf8_lossy(p).into_owned())
        .collect();
    if !alpn.is_empty() {
        let _ = writeln!(out, "  alpn:         {}", alpn.join(", "));
    }
    let _ = write!(out, "  grease:       {}", hello.has_grease());
    out
}
