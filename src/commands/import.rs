use anyhow::Result;
use crossterm::style::Stylize;
use log::debug;
use std::io::{self, Read, Write};

use crate::import::ConfigImporter;
use crate::linker::{LinkOutcome, Linker};
use crate::runtime::Runtime;
use crate::selector::{KeyReader, Menu};
use crate::snapshot::Snapshot;

use super::config::Config;
use super::{confirm, print_pending};

const MENU_TITLE: &str = "Select configurations to import";

/// Choose live configuration directories to import, or packages to de-import,
/// then move them.
#[tracing::instrument(skip(runtime, linker, config))]
pub fn import<R: Runtime, L: Linker>(runtime: &R, linker: &L, config: &Config) -> Result<()> {
    let mut keys = KeyReader::stdin();
    let stdout = io::stdout();
    import_with_keys(runtime, linker, config, &mut keys, &mut stdout.lock())
}

pub(crate) fn import_with_keys<R: Runtime, L: Linker, K: Read, W: Write>(
    runtime: &R,
    linker: &L,
    config: &Config,
    keys: &mut KeyReader<K>,
    out: &mut W,
) -> Result<()> {
    let importer = ConfigImporter::new(config.repository(runtime), config.gateway(linker));

    let entries = importer.list_importable()?;
    if entries.is_empty() {
        println!("No configurations found to import in $HOME/.config");
        return Ok(());
    }

    let change_set = Menu::new(MENU_TITLE, Snapshot::from_entries(&entries)?).run(keys, out)?;
    if change_set.is_empty() {
        println!("\nNo changes to apply.");
        return Ok(());
    }

    if !change_set.to_enable.is_empty() {
        println!("\nConfigurations to import:");
        print_pending("To import:".green(), &change_set.to_enable);
    }
    if !change_set.to_disable.is_empty() {
        println!("\nConfigurations to de-import:");
        print_pending("To de-import:".green(), &change_set.to_disable);
    }

    confirm(runtime)?;
    println!("Importing configurations...");

    let mut failures = 0;
    for name in &change_set.to_enable {
        match importer.import_entry(name) {
            Ok(LinkOutcome::Applied) => println!("{} Imported and enabled: {}", "✓".green(), name),
            Ok(LinkOutcome::Failed { stderr: detail })
            | Ok(LinkOutcome::LaunchFailed { error: detail }) => {
                println!(
                    "{} Imported {} but could not enable it: {}",
                    "✗".red(),
                    name,
                    detail
                );
            }
            Err(e) => {
                failures += 1;
                println!("{} Failed to import {}: {:#}", "✗".red(), name, e);
            }
        }
    }

    for name in &change_set.to_disable {
        match importer.deimport_entry(name) {
            Ok(()) => println!("{} De-imported: {}", "✓".red(), name),
            Err(e) => {
                failures += 1;
                println!("{} Failed to de-import {}: {:#}", "✗".red(), name, e);
            }
        }
    }

    if failures > 0 {
        debug!("{} of {} entries failed", failures, change_set.len());
        anyhow::bail!("{} configuration(s) could not be processed", failures);
    }

    println!("Done!");
    Ok(())
}
