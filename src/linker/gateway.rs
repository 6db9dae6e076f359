//! Applies link changes one package at a time, isolating failures.

use crossterm::style::Stylize;
use log::debug;
use std::path::{Path, PathBuf};

use crate::changeset::ChangeSet;

use super::{LinkAction, LinkRequest, Linker};

/// Result of one linker run. Never an error: the batch keeps going.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkOutcome {
    Applied,
    /// The tool ran and exited non-zero.
    Failed { stderr: String },
    /// The tool could not be started.
    LaunchFailed { error: String },
}

impl LinkOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, LinkOutcome::Applied)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackageOutcome {
    pub name: String,
    pub action: LinkAction,
    pub outcome: LinkOutcome,
}

/// Outcomes of a whole batch, in execution order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub outcomes: Vec<PackageOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_applied()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

pub struct LinkerGateway<'a, L: Linker> {
    linker: &'a L,
    package_root: PathBuf,
    target: PathBuf,
}

impl<'a, L: Linker> LinkerGateway<'a, L> {
    pub fn new(linker: &'a L, package_root: PathBuf, target: PathBuf) -> Self {
        Self {
            linker,
            package_root,
            target,
        }
    }

    pub fn package_root(&self) -> &Path {
        &self.package_root
    }

    /// Link (`enable`) or unlink one package.
    #[tracing::instrument(skip(self))]
    pub fn apply(&self, name: &str, enable: bool) -> LinkOutcome {
        let request = LinkRequest {
            package_root: self.package_root.clone(),
            package: name.to_string(),
            target: self.target.clone(),
            action: LinkAction::from_enable(enable),
        };

        match self.linker.invoke(&request) {
            Ok(output) if output.success => {
                debug!("{} {}", request.action.past_tense(), name);
                LinkOutcome::Applied
            }
            Ok(output) => {
                debug!("Failed to {} {}: {}", request.action.verb(), name, output.stderr);
                LinkOutcome::Failed {
                    stderr: output.stderr,
                }
            }
            Err(e) => {
                debug!("Could not run {} for {}: {:#}", self.linker.program(), name, e);
                LinkOutcome::LaunchFailed {
                    error: format!("{:#}", e),
                }
            }
        }
    }

    /// Apply one package and print its status line.
    pub fn apply_and_report(&self, name: &str, action: LinkAction) -> PackageOutcome {
        let outcome = PackageOutcome {
            name: name.to_string(),
            action,
            outcome: self.apply(name, action == LinkAction::Enable),
        };
        print_outcome(&self.linker.program(), &outcome);
        outcome
    }

    /// Apply `to_enable` then `to_disable`, sequentially. Every item runs
    /// regardless of earlier failures.
    pub fn apply_change_set(&self, change_set: &ChangeSet) -> BatchReport {
        let enables = change_set
            .to_enable
            .iter()
            .map(|name| (name, LinkAction::Enable));
        let disables = change_set
            .to_disable
            .iter()
            .map(|name| (name, LinkAction::Disable));

        BatchReport {
            outcomes: enables
                .chain(disables)
                .map(|(name, action)| self.apply_and_report(name, action))
                .collect(),
        }
    }
}

/// Format the status line for one outcome, without colours.
pub fn outcome_line(program: &str, outcome: &PackageOutcome) -> String {
    match &outcome.outcome {
        LinkOutcome::Applied => {
            format!("✓ {}: {}", outcome.action.past_tense(), outcome.name)
        }
        LinkOutcome::Failed { stderr } => format!(
            "✗ Failed to {} {}: {}",
            outcome.action.verb(),
            outcome.name,
            stderr
        ),
        LinkOutcome::LaunchFailed { error } => {
            format!("✗ Error running {} for {}: {}", program, outcome.name, error)
        }
    }
}

fn print_outcome(program: &str, outcome: &PackageOutcome) {
    let line = outcome_line(program, outcome);
    // Colour only the leading mark.
    let (mark, rest) = line.split_at(line.char_indices().nth(1).map_or(line.len(), |(i, _)| i));
    if outcome.outcome.is_applied() {
        println!("{}{}", mark.green(), rest);
    } else {
        println!("{}{}", mark.red(), rest);
    }
}
