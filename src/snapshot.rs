//! Point-in-time selection state fed to the menu and the diff.

use anyhow::Result;
use std::collections::HashSet;

use crate::error::StowmanError;
use crate::import::ConfigEntry;
use crate::package::Package;

/// One menu row: the identity used for every operation, the text shown for
/// it, and whether it is currently selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionItem {
    pub name: String,
    pub label: String,
    pub selected: bool,
}

impl SelectionItem {
    pub fn new(name: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            selected,
        }
    }
}

/// Ordered items with unique names. Order only matters for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    items: Vec<SelectionItem>,
}

impl Snapshot {
    pub fn new(items: Vec<SelectionItem>) -> Result<Self> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.name.as_str()) {
                return Err(StowmanError::validation(format!(
                    "Duplicate entry '{}' in selection",
                    item.name
                ))
                .into());
            }
        }
        Ok(Self { items })
    }

    /// Packages labelled by name, selected when installed.
    pub fn from_packages(packages: &[Package]) -> Result<Self> {
        Self::new(
            packages
                .iter()
                .map(|p| SelectionItem::new(&p.name, &p.name, p.installed))
                .collect(),
        )
    }

    /// Config entries labelled with their status, selected when managed.
    pub fn from_entries(entries: &[ConfigEntry]) -> Result<Self> {
        Self::new(
            entries
                .iter()
                .map(|e| SelectionItem::new(&e.name, e.label(), e.is_managed()))
                .collect(),
        )
    }

    pub fn items(&self) -> &[SelectionItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Flip the item at `index`. Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            item.selected = !item.selected;
        }
    }

    /// Stable sort, unselected items first.
    pub fn sort_by_selected(&mut self) {
        self.items.sort_by_key(|item| item.selected);
    }
}
