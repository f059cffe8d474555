use std::fmt;

use crate::FaultCode;

/// Why the step driver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum HaltReason {
    /// A cycle raised a fatal fault.
    Fault(FaultCode),
    /// The host asked the core to stop between cycles.
    UserRequested,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fault(code) => write!(f, "{code}"),
            Self::UserRequested => f.write_str("halt requested"),
        }
    }
}

/// Execution-state machine for host-observable control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum RunState {
    /// Ready to execute the next instruction.
    #[default]
    Running,
    /// Terminal; no further cycles execute.
    Halted(HaltReason),
}

impl RunState {
    /// Returns the halt reason, if halted.
    #[must_use]
    pub const fn halt_reason(self) -> Option<HaltReason> {
        match self {
            Self::Running => None,
            Self::Halted(reason) => Some(reason),
        }
    }

    /// Returns the latched fault, if this state halted on one.
    #[must_use]
    pub const fn latched_fault(self) -> Option<FaultCode> {
        match self {
            Self::Halted(HaltReason::Fault(cause)) => Some(cause),
            Self::Running | Self::Halted(HaltReason::UserRequested) => None,
        }
    }

    /// Returns `true` when the next step would execute an instruction.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}
