//! What happens to the caller after a `fatal` or `panic` log call
//!
//! The disposition is decided from the level alone, after the write has been
//! attempted. How it is carried out is delegated to a [`TerminationPolicy`]
//! so the process-ending behavior can be replaced in tests.

use pointlog_protocol::Level;

/// Exit code used for `fatal`
pub const FATAL_EXIT_CODE: i32 = 1;

/// Outcome of a log call for its caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Return normally
    Continue,
    /// End the process with `code`
    Terminate { code: i32 },
    /// Unwind the caller with the rendered message
    Unwind { message: String },
}

impl Disposition {
    /// Disposition for a call at `level` that rendered `message`
    pub fn for_level(level: Level, message: &str) -> Self {
        match level {
            Level::Fatal => Self::Terminate {
                code: FATAL_EXIT_CODE,
            },
            Level::Panic => Self::Unwind {
                message: message.to_string(),
            },
            _ => Self::Continue,
        }
    }

    /// Carry out the disposition with `policy`
    pub fn apply(self, policy: &dyn TerminationPolicy) {
        match self {
            Self::Continue => {}
            Self::Terminate { code } => policy.terminate(code),
            Self::Unwind { message } => policy.unwind(message),
        }
    }
}

/// Carries out `fatal` and `panic` dispositions
pub trait TerminationPolicy: Send + Sync {
    /// End the process with `code`
    fn terminate(&self, code: i32);

    /// Unwind the calling task or thread
    fn unwind(&self, message: String);
}

/// Exits the process on `fatal` and panics on `panic`
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessTermination;

impl TerminationPolicy for ProcessTermination {
    fn terminate(&self, code: i32) {
        tracing::error!(code, "fatal log call, exiting");
        std::process::exit(code);
    }

    fn unwind(&self, message: String) {
        panic!("{message}");
    }
}
