//! Confirmation gate for exporting while ports are in use.
//!
//! When the live pass finds a port bound by another process, the export
//! pipeline asks a [`ConfirmationPolicy`] whether to go on. Policies are
//! injected so the pipeline stays testable and non-interactive callers never
//! block on a prompt.

use std::io::{self, BufRead, Write};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::validation::PortFinding;
use crate::Result;

/// Outcome of the confirmation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Export despite the conflicts.
    Continue,
    /// Stop without exporting anything.
    Abort,
}

/// Decides whether an export goes ahead when ports are in use.
pub trait ConfirmationPolicy {
    /// Decide for the given in-use findings.
    ///
    /// # Errors
    ///
    /// Returns an error if the decision could not be obtained, e.g. the
    /// prompt could not be written.
    fn confirm(&mut self, conflicts: &[PortFinding]) -> Result<Decision>;
}

/// Always continue.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysContinue;

impl ConfirmationPolicy for AlwaysContinue {
    fn confirm(&mut self, _conflicts: &[PortFinding]) -> Result<Decision> {
        Ok(Decision::Continue)
    }
}

/// Always abort.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysAbort;

impl ConfirmationPolicy for AlwaysAbort {
    fn confirm(&mut self, _conflicts: &[PortFinding]) -> Result<Decision> {
        Ok(Decision::Abort)
    }
}

/// Prompts on a writer and reads the answer from a reader.
///
/// `y` or `yes` (any case) continues. End of input or any other answer
/// aborts.
///
/// # Examples
///
/// ```
/// use portband::confirm::{ConfirmationPolicy, Decision, Interactive};
/// use portband::validation::PortFinding;
///
/// let mut out = Vec::new();
/// let mut policy = Interactive::new("YES\n".as_bytes(), &mut out);
/// let decision = policy.confirm(&[PortFinding::new("arangodb", 15001)]).unwrap();
/// assert_eq!(decision, Decision::Continue);
/// ```
pub struct Interactive<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Interactive<R, W> {
    /// Create a policy reading from `input` and prompting on `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl Interactive<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr and read from stdin.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> ConfirmationPolicy for Interactive<R, W> {
    fn confirm(&mut self, conflicts: &[PortFinding]) -> Result<Decision> {
        writeln!(self.output, "The following ports are already in use:")?;
        for finding in conflicts {
            writeln!(self.output, "  {finding}")?;
        }
        write!(self.output, "Continue anyway? [y/N] ")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output)?;
            return Ok(Decision::Abort);
        }

        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => Ok(Decision::Continue),
            _ => Ok(Decision::Abort),
        }
    }
}

/// Configured reaction to in-use ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OnConflict {
    /// Prompt on the terminal.
    Ask,
    /// Export anyway.
    Continue,
    /// Refuse to export.
    Abort,
}

impl OnConflict {
    /// Build the matching policy. `Ask` prompts on stderr and reads stdin.
    #[must_use]
    pub fn into_policy(self) -> Box<dyn ConfirmationPolicy> {
        match self {
            Self::Ask => Box::new(Interactive::stdio()),
            Self::Continue => Box::new(AlwaysContinue),
            Self::Abort => Box::new(AlwaysAbort),
        }
    }
}
