//! Minimal set of link changes between two snapshots.

use anyhow::Result;
use std::collections::{BTreeSet, HashMap};

use crate::error::StowmanError;
use crate::snapshot::Snapshot;

/// Names to enable and names to disable. The two sets never overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub to_enable: BTreeSet<String>,
    pub to_disable: BTreeSet<String>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.to_enable.is_empty() && self.to_disable.is_empty()
    }

    pub fn len(&self) -> usize {
        self.to_enable.len() + self.to_disable.len()
    }
}

/// Compare `original` and `updated` item by item, joined on name.
///
/// Both snapshots must hold exactly the same names; their order may differ.
pub fn diff(original: &Snapshot, updated: &Snapshot) -> Result<ChangeSet> {
    let before: HashMap<&str, bool> = original
        .items()
        .iter()
        .map(|item| (item.name.as_str(), item.selected))
        .collect();

    if original.len() != updated.len() {
        return Err(StowmanError::validation(format!(
            "Cannot compare selections of different sizes ({} vs {})",
            original.len(),
            updated.len()
        ))
        .into());
    }

    let mut change_set = ChangeSet::default();
    for item in updated.items() {
        let Some(&was_selected) = before.get(item.name.as_str()) else {
            return Err(StowmanError::validation(format!(
                "'{}' is not part of the original selection",
                item.name
            ))
            .into());
        };

        match (was_selected, item.selected) {
            (false, true) => {
                change_set.to_enable.insert(item.name.clone());
            }
            (true, false) => {
                change_set.to_disable.insert(item.name.clone());
            }
            _ => {}
        }
    }

    Ok(change_set)
}
