use anyhow::Result;
use crossterm::style::StyledContent;
use log::debug;
use std::collections::BTreeSet;

use crate::error::{StowmanError, is_interrupted};
use crate::linker::Linker;
use crate::runtime::Runtime;

pub mod config;
mod import;
mod interactive;
mod list;
mod manage;
mod startup;

pub use config::Config;
pub use import::import;
pub use interactive::interactive;
pub use list::{ListFilter, list};
pub use manage::{install, remove};
pub use startup::{StartupChoice, check_linker, ensure_package_root, offer_import_if_empty};

const CONFIRM_PROMPT: &str = "\nPress Enter to confirm or Ctrl+C to cancel...";

/// What one invocation does, as chosen on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Install(Vec<String>),
    Remove(Vec<String>),
    List(ListFilter),
    Import,
    Interactive,
}

/// Run one action after the startup checks. A cancellation at a prompt is
/// reported and treated as success.
#[tracing::instrument(skip(runtime, linker, config))]
pub fn run<R: Runtime, L: Linker>(
    runtime: &R,
    linker: &L,
    config: &Config,
    action: Action,
) -> Result<()> {
    match dispatch(runtime, linker, config, action) {
        Err(e) if is_interrupted(&e) => {
            println!("\n{}", e);
            Ok(())
        }
        other => other,
    }
}

fn dispatch<R: Runtime, L: Linker>(
    runtime: &R,
    linker: &L,
    config: &Config,
    action: Action,
) -> Result<()> {
    check_linker(linker)?;
    ensure_package_root(runtime, config)?;

    if action != Action::Import {
        match offer_import_if_empty(runtime, config)? {
            StartupChoice::Proceed => {}
            StartupChoice::Import => import(runtime, linker, config)?,
            StartupChoice::Exit => return Ok(()),
        }
    }

    debug!("Running {:?}", action);
    match action {
        Action::Install(names) => install(runtime, linker, config, &names).map(|_| ()),
        Action::Remove(names) => remove(runtime, linker, config, &names).map(|_| ()),
        Action::List(filter) => list(runtime, config, filter),
        Action::Import => import(runtime, linker, config),
        Action::Interactive => interactive(runtime, linker, config),
    }
}

/// Block until Enter; anything that cancels becomes [`StowmanError::Interrupted`].
fn confirm<R: Runtime>(runtime: &R) -> Result<()> {
    if runtime.wait_for_enter(CONFIRM_PROMPT)? {
        Ok(())
    } else {
        Err(StowmanError::Interrupted.into())
    }
}

/// `"<label> a, b"`, or nothing when `names` is empty.
fn print_pending(label: StyledContent<&str>, names: &BTreeSet<String>) {
    if names.is_empty() {
        return;
    }
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    println!("{} {}", label, names.join(", "));
}
