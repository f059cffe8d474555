//! Per-cycle trace output.

use std::io::{self, Write};

use mips_core::{format_instruction, CycleReport, HaltReason, Memory, RegisterFile};

/// Selects between change summaries and full dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportOptions {
    /// Dump all registers after each cycle instead of the changed one.
    pub registers: bool,
    /// Dump nonzero data memory after each cycle instead of the changed word.
    pub memory: bool,
}

/// Writes the trace block for one retired instruction.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn write_cycle(
    out: &mut impl Write,
    report: &CycleReport,
    registers: &RegisterFile,
    memory: &Memory,
    options: ReportOptions,
) -> io::Result<()> {
    writeln!(
        out,
        "Executing instruction at {:08x}: {:08x}",
        report.pc, report.word
    )?;
    writeln!(out, "{}", format_instruction(&report.instruction, report.pc))?;
    writeln!(out, "New pc = {:08x}", report.next_pc)?;

    if options.registers {
        write_registers(out, registers)?;
    } else if let Some((reg, value)) = report.changed_register {
        writeln!(out, "Updated r{:02} to {value:08x}", reg.index())?;
    } else {
        writeln!(out, "No register was updated.")?;
    }

    if options.memory {
        write_nonzero_memory(out, memory)?;
    } else if let Some((addr, value)) = report.changed_memory {
        writeln!(out, "Updated memory at address {addr:08x} to {value:08x}")?;
    } else {
        writeln!(out, "No memory location was updated.")?;
    }
    Ok(())
}

/// Writes all 32 registers, four per line.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn write_registers(out: &mut impl Write, registers: &RegisterFile) -> io::Result<()> {
    for (index, value) in registers.values().iter().enumerate() {
        write!(out, "r{index:02}: {value:08x}  ")?;
        if (index + 1) % 4 == 0 {
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Writes every nonzero data word as `ADDRESS  VALUE`.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn write_nonzero_memory(out: &mut impl Write, memory: &Memory) -> io::Result<()> {
    writeln!(out, "Nonzero memory")?;
    writeln!(out, "ADDR\t  CONTENTS")?;
    for (addr, value) in memory.nonzero_data() {
        writeln!(out, "{addr:08x}  {value:08x}")?;
    }
    Ok(())
}

/// Writes the final status line.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn write_halt(out: &mut impl Write, reason: Option<HaltReason>) -> io::Result<()> {
    match reason {
        Some(reason) => writeln!(out, "Simulation halted: {reason}"),
        None => writeln!(out, "Simulation halted: step limit reached"),
    }
}
