//! `mips-sim` binary: runs a program image on the simulator core.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use mips_core::{disassemble_range, ByteOrder, CoreConfig, ZeroRegisterPolicy};
use mips_sim::{exit_code, load_state, run_session, CliError, ReportOptions, SessionOptions};
#[cfg(test)]
use tempfile as _;
use thiserror as _;
use tracing as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "mips-sim",
    version,
    about = "Simulator for a 32-bit MIPS integer subset"
)]
struct Cli {
    /// Program image: one 32-bit instruction word per 4 bytes.
    program: PathBuf,

    /// Print every register after each instruction.
    #[arg(short, long)]
    registers: bool,

    /// Print all nonzero data memory after each instruction.
    #[arg(short, long)]
    memory: bool,

    /// Prompt before each instruction; enter `q` to quit.
    #[arg(short, long)]
    interactive: bool,

    /// Emit debug logs on stderr.
    #[arg(short, long)]
    debug: bool,

    /// Read instruction words most significant byte first.
    #[arg(long)]
    big_endian: bool,

    /// Stop after N retired instructions.
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,

    /// Let writes to $0 take effect.
    #[arg(long)]
    writable_zero: bool,

    /// Print a listing of the loaded program and exit.
    #[arg(long)]
    disassemble: bool,
}

impl Cli {
    fn core_config(&self) -> CoreConfig {
        CoreConfig {
            zero_register: if self.writable_zero {
                ZeroRegisterPolicy::Writable
            } else {
                ZeroRegisterPolicy::Hardwired
            },
            ..CoreConfig::default()
        }
    }

    const fn byte_order(&self) -> ByteOrder {
        if self.big_endian {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        }
    }

    const fn session_options(&self) -> SessionOptions {
        SessionOptions {
            report: ReportOptions {
                registers: self.registers,
                memory: self.memory,
            },
            interactive: self.interactive,
            max_steps: self.max_steps,
        }
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<i32, CliError> {
    let mut state = load_state(&cli.program, cli.byte_order(), &cli.core_config())?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if cli.disassemble {
        let layout = *state.memory.layout();
        let rows = disassemble_range(&state.memory, layout.base, layout.instruction_words);
        let used = rows.iter().rposition(|row| row.word != 0).map_or(0, |last| last + 1);
        for row in &rows[..used] {
            writeln!(out, "{:08x}:  {:08x}  {}", row.addr, row.word, row.text)?;
        }
        out.flush()?;
        return Ok(mips_sim::EXIT_OK);
    }

    let stdin = io::stdin();
    run_session(
        &mut state,
        cli.session_options(),
        &mut stdin.lock(),
        &mut out,
    )?;
    Ok(exit_code(state.run_state))
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            error.exit_code()
        }
    };

    process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use mips_core::{ByteOrder, ZeroRegisterPolicy};

    #[test]
    fn parses_short_flags() {
        let cli = Cli::try_parse_from(["mips-sim", "prog.bin", "-r", "-m", "-i", "-d"])
            .expect("valid arguments");
        let options = cli.session_options();
        assert!(options.report.registers);
        assert!(options.report.memory);
        assert!(options.interactive);
        assert!(cli.debug);
        assert_eq!(options.max_steps, None);
    }

    #[test]
    fn maps_long_options_onto_config() {
        let cli = Cli::try_parse_from([
            "mips-sim",
            "prog.bin",
            "--big-endian",
            "--max-steps",
            "40",
            "--writable-zero",
        ])
        .expect("valid arguments");
        assert_eq!(cli.byte_order(), ByteOrder::Big);
        assert_eq!(cli.session_options().max_steps, Some(40));
        assert_eq!(
            cli.core_config().zero_register,
            ZeroRegisterPolicy::Writable
        );
    }

    #[test]
    fn program_path_is_required() {
        assert!(Cli::try_parse_from(["mips-sim"]).is_err());
    }
}
