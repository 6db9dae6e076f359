use anyhow::Result;
use crossterm::style::Stylize;
use std::io::{self, Read, Write};

use crate::linker::Linker;
use crate::runtime::Runtime;
use crate::selector::{KeyReader, Menu};
use crate::snapshot::Snapshot;

use super::config::Config;
use super::{confirm, manage, print_pending};

const MENU_TITLE: &str = "Select packages to enable/disable";

/// Toggle packages in the terminal menu, then apply the difference.
#[tracing::instrument(skip(runtime, linker, config))]
pub fn interactive<R: Runtime, L: Linker>(runtime: &R, linker: &L, config: &Config) -> Result<()> {
    let mut keys = KeyReader::stdin();
    let stdout = io::stdout();
    interactive_with_keys(runtime, linker, config, &mut keys, &mut stdout.lock())
}

pub(crate) fn interactive_with_keys<R: Runtime, L: Linker, K: Read, W: Write>(
    runtime: &R,
    linker: &L,
    config: &Config,
    keys: &mut KeyReader<K>,
    out: &mut W,
) -> Result<()> {
    let packages = config.repository(runtime).list_packages()?;
    if packages.is_empty() {
        println!("No packages found to manage.");
        return Ok(());
    }

    let mut snapshot = Snapshot::from_packages(&packages)?;
    snapshot.sort_by_selected();

    let change_set = Menu::new(MENU_TITLE, snapshot).run(keys, out)?;
    if change_set.is_empty() {
        println!("\nNo changes to apply.");
        return Ok(());
    }

    println!("\nChanges to apply:");
    print_pending("To enable:".green(), &change_set.to_enable);
    print_pending("To disable:".red(), &change_set.to_disable);

    confirm(runtime)?;
    println!("Applying changes...");
    manage::apply(linker, config, &change_set)?;
    println!("Done!");
    Ok(())
}
