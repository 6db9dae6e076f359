//! Single-keypress toggle menu.
//!
//! The loop is synchronous: draw everything, block for one key, apply it.
//! Confirm and Quit both end the loop and keep whatever was toggled.

mod input;
mod render;

use anyhow::Result;
use std::io::{Read, Write};

use crate::changeset::{ChangeSet, diff};
use crate::snapshot::{SelectionItem, Snapshot};

pub use input::{InputEvent, KeyReader, decode, read_key};
pub use render::{CONTROLS, menu_line, render_menu};

pub struct Menu {
    title: String,
    original: Snapshot,
    current: Snapshot,
    active: usize,
}

impl Menu {
    pub fn new(title: impl Into<String>, snapshot: Snapshot) -> Self {
        Self {
            title: title.into(),
            original: snapshot.clone(),
            current: snapshot,
            active: 0,
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn items(&self) -> &[SelectionItem] {
        self.current.items()
    }

    /// Apply one event. Returns true when the loop should stop.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        let len = self.current.len();
        if len == 0 {
            return true;
        }

        match event {
            InputEvent::Up => self.active = (self.active + len - 1) % len,
            InputEvent::Down => self.active = (self.active + 1) % len,
            InputEvent::Toggle => self.current.toggle(self.active),
            InputEvent::Confirm | InputEvent::Quit => return true,
            InputEvent::Unknown => {}
        }
        false
    }

    /// Changes made so far.
    pub fn changes(&self) -> Result<ChangeSet> {
        diff(&self.original, &self.current)
    }

    /// Run the loop until Confirm or Quit and return the changes.
    pub fn run<R: Read, W: Write>(
        &mut self,
        keys: &mut KeyReader<R>,
        out: &mut W,
    ) -> Result<ChangeSet> {
        if self.current.is_empty() {
            return self.changes();
        }

        loop {
            render_menu(out, &self.title, self.current.items(), self.active)?;
            if self.handle(keys.next_event()?) {
                break;
            }
        }

        self.changes()
    }
}
