use anyhow::Result;
use crossterm::style::Stylize;
use std::io::Write;

use crate::package::{Package, partition_by_status};
use crate::runtime::Runtime;

use super::config::Config;

/// Which packages `list` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    Enabled,
    Disabled,
    All,
}

/// Print packages by status.
#[tracing::instrument(skip(runtime, config))]
pub fn list<R: Runtime>(runtime: &R, config: &Config, filter: ListFilter) -> Result<()> {
    let packages = config.repository(runtime).list_packages()?;
    let stdout = std::io::stdout();
    write_list(&mut stdout.lock(), &packages, filter)
}

pub(crate) fn write_list<W: Write>(
    out: &mut W,
    packages: &[Package],
    filter: ListFilter,
) -> Result<()> {
    let (enabled, disabled) = partition_by_status(packages);

    match filter {
        ListFilter::Enabled => write_titled(out, "Enabled packages:", "enabled", &enabled)?,
        ListFilter::Disabled => write_titled(out, "Disabled packages:", "disabled", &disabled)?,
        ListFilter::All => {
            writeln!(out, "Available packages:")?;
            if !enabled.is_empty() {
                writeln!(out, "\n{}", "Enabled:".green())?;
                write_names(out, &enabled)?;
            }
            if !disabled.is_empty() {
                writeln!(out, "\n{}", "Disabled:".red())?;
                write_names(out, &disabled)?;
            }
        }
    }
    Ok(())
}

/// `title` then one indented line per name, or a "none" line.
fn write_titled<W: Write>(out: &mut W, title: &str, status: &str, names: &[&str]) -> Result<()> {
    if names.is_empty() {
        writeln!(out, "No packages are currently {}", status)?;
        return Ok(());
    }

    writeln!(out, "{}", title)?;
    write_names(out, names)
}

fn write_names<W: Write>(out: &mut W, names: &[&str]) -> Result<()> {
    for name in names {
        writeln!(out, "  {}", name)?;
    }
    Ok(())
}
