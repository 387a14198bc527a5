// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Command-line interface: argument parsing and the line-by-line
//! assemble/disassemble drivers.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use serde_json::json;

use crate::core::insn::CodeStream;
use crate::core::registry::ModuleRegistry;
use crate::core::value::parse_number;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(
    name = "retroasm",
    version = VERSION,
    about = "Table-driven assembler and disassembler for historical CPUs"
)]
pub struct Cli {
    #[arg(
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Text,
        long_help = "Select output format. text prints an address/bytes listing; json emits one object per line."
    )]
    pub format: OutputFormat,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assemble a source file, one statement per line.
    Asm {
        #[arg(long = "cpu", value_name = "ID")]
        cpu: String,
        #[arg(
            long = "origin",
            value_name = "ADDR",
            default_value = "0",
            value_parser = parse_addr,
            long_help = "Start address for the first instruction. Accepts the usual literal notations ($FFxx, 0x.., plain decimal)."
        )]
        origin: u32,
        #[arg(
            long = "set",
            value_name = "OPTION=VALUE",
            long_help = "Set an assembler option, e.g. --set smart-branch=on or --set list-radix=dec. May be given more than once."
        )]
        set: Vec<String>,
        input: PathBuf,
    },
    /// Disassemble a flat binary image.
    Dis {
        #[arg(long = "cpu", value_name = "ID")]
        cpu: String,
        #[arg(
            long = "origin",
            value_name = "ADDR",
            default_value = "0",
            value_parser = parse_addr
        )]
        origin: u32,
        #[arg(long = "set", value_name = "OPTION=VALUE")]
        set: Vec<String>,
        input: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn parse_addr(text: &str) -> Result<u32, String> {
    parse_number(text)
        .and_then(|val| u32::try_from(val).ok())
        .ok_or_else(|| format!("invalid address {text:?}"))
}

/// Run the parsed command. Returns the process exit code: 0 when every
/// line assembled or decoded cleanly, 1 otherwise.
pub fn run(cli: &Cli) -> Result<i32, String> {
    let registry = ModuleRegistry::with_default_modules();
    match &cli.command {
        Command::Asm {
            cpu,
            origin,
            set,
            input,
        } => run_asm(&registry, cli.format, cpu, *origin, set, input),
        Command::Dis {
            cpu,
            origin,
            set,
            input,
        } => run_dis(&registry, cli.format, cpu, *origin, set, input),
    }
}

fn split_option(spec: &str) -> Result<(&str, &str), String> {
    spec.split_once('=')
        .ok_or_else(|| format!("option {spec:?} is not of the form OPTION=VALUE"))
}

fn run_asm(
    registry: &ModuleRegistry,
    format: OutputFormat,
    cpu: &str,
    origin: u32,
    set: &[String],
    input: &PathBuf,
) -> Result<i32, String> {
    let mut asm = registry
        .new_assembler(cpu)
        .map_err(|err| format!("{cpu}: {err}"))?;
    for spec in set {
        let (name, value) = split_option(spec)?;
        asm.options_mut()
            .set(name, value)
            .map_err(|err| format!("{spec}: {err}"))?;
    }
    let source = fs::read_to_string(input).map_err(|err| format!("{}: {err}", input.display()))?;
    info!("assembling {} for {}", input.display(), asm.cpu_name());

    let mut addr = origin;
    let mut failed = false;
    for (lineno, line) in source.lines().enumerate() {
        let out = asm.encode(line, addr, None);
        match format {
            OutputFormat::Text => {
                let bytes = hex_bytes(out.insn.bytes());
                println!("{:04X}  {:<12} {}", addr, bytes, line.trim_end());
                if let Some(err) = &out.error {
                    eprintln!("{}:{}: error: {}", input.display(), lineno + 1, err.kind);
                }
            }
            OutputFormat::Json => {
                let error = out.error.as_ref().map(|err| {
                    json!({
                        "kind": err.kind.to_string(),
                        "start": err.span.start,
                        "end": err.span.end,
                    })
                });
                let record = json!({
                    "line": lineno + 1,
                    "addr": addr,
                    "bytes": out.insn.bytes(),
                    "source": line,
                    "error": error,
                });
                println!("{record}");
            }
        }
        failed |= out.error.is_some();
        addr = addr.wrapping_add(out.insn.len() as u32);
    }
    Ok(i32::from(failed))
}

fn run_dis(
    registry: &ModuleRegistry,
    format: OutputFormat,
    cpu: &str,
    origin: u32,
    set: &[String],
    input: &PathBuf,
) -> Result<i32, String> {
    let mut dis = registry
        .new_disassembler(cpu)
        .map_err(|err| format!("{cpu}: {err}"))?;
    for spec in set {
        let (name, value) = split_option(spec)?;
        dis.options_mut()
            .set(name, value)
            .map_err(|err| format!("{spec}: {err}"))?;
    }
    let image = fs::read(input).map_err(|err| format!("{}: {err}", input.display()))?;
    info!(
        "disassembling {} ({} bytes) for {}",
        input.display(),
        image.len(),
        dis.cpu_name()
    );

    let mut stream = CodeStream::new(&image, origin);
    let mut failed = false;
    while stream.remaining() > 0 {
        let addr = stream.addr();
        let out = dis.decode(&mut stream, None);
        match format {
            OutputFormat::Text => {
                let bytes = hex_bytes(out.insn.bytes());
                println!("{:04X}  {:<12} {}", addr, bytes, out.text());
                if let Some(kind) = &out.error {
                    eprintln!("{}: error at {addr:04X}: {kind}", input.display());
                }
            }
            OutputFormat::Json => {
                let record = json!({
                    "addr": addr,
                    "bytes": out.insn.bytes(),
                    "text": out.text(),
                    "error": out.error.as_ref().map(|kind| kind.to_string()),
                });
                println!("{record}");
            }
        }
        failed |= out.error.is_some();
    }
    Ok(i32::from(failed))
}

fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{byte:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_literals() {
        assert_eq!(parse_addr("0"), Ok(0));
        assert_eq!(parse_addr("$ABCD"), Ok(0xABCD));
        assert_eq!(parse_addr("0x1000"), Ok(0x1000));
        assert!(parse_addr("-1").is_err());
        assert!(parse_addr("nope").is_err());
    }

    #[test]
    fn option_specs() {
        assert_eq!(split_option("smart-branch=on"), Ok(("smart-branch", "on")));
        assert!(split_option("smart-branch").is_err());
    }

    #[test]
    fn byte_listing() {
        assert_eq!(hex_bytes(&[0xF0, 0xF1, 0xF2]), "F0 F1 F2");
        assert_eq!(hex_bytes(&[]), "");
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "retroasm",
            "--format",
            "json",
            "asm",
            "--cpu",
            "mc68hc12",
            "--origin",
            "$1000",
            "--set",
            "smart-branch=on",
            "prog.s",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::Asm {
                cpu, origin, set, ..
            } => {
                assert_eq!(cpu, "mc68hc12");
                assert_eq!(origin, 0x1000);
                assert_eq!(set, ["smart-branch=on"]);
            }
            Command::Dis { .. } => panic!("expected asm subcommand"),
        }
    }
}
