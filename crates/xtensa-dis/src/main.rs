use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use xtensa_rs::decoder::decode;
use xtensa_rs::disasm::fmt_inst;

mod model;
use model::{is_mapped, load_raw_bin, read_window, Image};

#[derive(Parser, Debug)]
#[command(author, version, about = "Xtensa disassembler CLI", long_about=None)]
struct Cli {
    /// Load address for the binary in target address space
    #[arg(long, default_value_t = 0u32)]
    base: u32,
    /// Skip N bytes at start of file before loading
    #[arg(long, default_value_t = 0usize)]
    skip: usize,
    /// Input binary path
    #[arg(value_name = "BINFILE")]
    input: String,
    /// Limit bytes loaded (default: to EOF after --skip)
    #[arg(long)]
    len: Option<usize>,
    /// Subcommand
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List loaded segments (simple single-segment for raw .bin)
    Sections,
    /// Disassemble a range [start, end) in bytes
    Range {
        /// Start address (hex or dec)
        start: String,
        /// End address (hex or dec, exclusive)
        end: String,
        /// Show instruction bytes
        #[arg(long)]
        show_bytes: bool,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, serde::Serialize)]
struct InsnOut {
    addr: u32,
    size: usize,
    bytes: String,
    text: String,
}

fn parse_u32(s: &str) -> Result<u32> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u32::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u32>()?)
    }
}

fn hex_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(" ")
}

fn disassemble_range(img: &Image, start: u32, end: u32) -> Vec<InsnOut> {
    let mut rows = Vec::new();
    let mut addr = start;
    while addr < end {
        if !is_mapped(img, addr) {
            break;
        }
        let window = read_window(img, addr, 3);
        match decode(&window, addr) {
            Ok((insn, size)) => {
                rows.push(InsnOut {
                    addr,
                    size,
                    bytes: hex_bytes(&window[..size]),
                    text: fmt_inst(&insn),
                });
                addr = addr.wrapping_add(size as u32);
            }
            Err(e) => {
                // Report at this exact offset and skip the minimum
                // instruction size so the listing can continue.
                rows.push(InsnOut {
                    addr,
                    size: 0,
                    bytes: hex_bytes(&window),
                    text: format!("<cannot disassemble: {}>", e),
                });
                addr = addr.wrapping_add(2);
            }
        }
    }
    rows
}

fn write_out(out: Option<&str>, text: &str) -> Result<()> {
    match out {
        Some(path) => std::fs::write(path, text)?,
        None => print!("{}", text),
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let img = load_raw_bin(std::path::Path::new(&cli.input), cli.base, cli.skip, cli.len)?;

    match cli.cmd {
        Command::Sections => {
            for s in &img.segments {
                println!(
                    "{:<10} {:#010x}..{:#010x} {} {}",
                    s.name,
                    s.base,
                    s.base.wrapping_add(s.bytes.len() as u32),
                    s.perms,
                    s.kind
                );
            }
        }
        Command::Range { start, end, show_bytes, format, out } => {
            let start = parse_u32(&start)?;
            let end = parse_u32(&end)?;
            let rows = disassemble_range(&img, start, end);
            let text = match format {
                OutputFormat::Json => {
                    let mut s = serde_json::to_string_pretty(&rows)?;
                    s.push('\n');
                    s
                }
                OutputFormat::Text => {
                    let mut s = String::new();
                    for row in &rows {
                        if show_bytes {
                            s.push_str(&format!(
                                "{:#010x}: {:<9} {}\n",
                                row.addr, row.bytes, row.text
                            ));
                        } else {
                            s.push_str(&format!("{:#010x}: {}\n", row.addr, row.text));
                        }
                    }
                    s
                }
            };
            write_out(out.as_deref(), &text)?;
        }
    }

    Ok(())
}
