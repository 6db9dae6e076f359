use anyhow::Result;
use std::io::{self, IsTerminal, Read};

use crate::runtime::RawModeGuard;

const ESC: u8 = 0x1b;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Up,
    Down,
    Toggle,
    Confirm,
    Quit,
    Unknown,
}

/// Map one keypress, as raw bytes, to an event. Escape sequences arrive as
/// three bytes (`ESC [ A`).
pub fn decode(key: &[u8]) -> InputEvent {
    match key {
        b"k" | b"p" | b"\x1b[A" => InputEvent::Up,
        b"j" | b"n" | b"\x1b[B" => InputEvent::Down,
        b" " => InputEvent::Toggle,
        b"\r" | b"\n" => InputEvent::Confirm,
        b"q" => InputEvent::Quit,
        _ => InputEvent::Unknown,
    }
}

/// Read one keypress: a single byte, plus two more after an escape byte.
/// Returns `None` at end of input.
pub fn read_key<R: Read>(input: &mut R) -> Result<Option<Vec<u8>>> {
    let mut first = [0u8; 1];
    if input.read(&mut first)? == 0 {
        return Ok(None);
    }

    let mut key = vec![first[0]];
    if first[0] == ESC {
        let mut rest = [0u8; 2];
        let read = read_up_to(input, &mut rest)?;
        key.extend_from_slice(&rest[..read]);
    }
    Ok(Some(key))
}

fn read_up_to<R: Read>(input: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

/// Source of menu events.
pub struct KeyReader<R: Read> {
    input: R,
    raw_mode: bool,
}

impl KeyReader<io::Stdin> {
    /// Keys from the terminal, each read in raw mode.
    pub fn stdin() -> Self {
        let input = io::stdin();
        let raw_mode = input.is_terminal();
        Self { input, raw_mode }
    }
}

impl<R: Read> KeyReader<R> {
    /// Keys from any byte stream, without touching the terminal.
    pub fn new(input: R) -> Self {
        Self {
            input,
            raw_mode: false,
        }
    }

    /// Block for the next keypress. End of input reads as `Quit`.
    pub fn next_event(&mut self) -> Result<InputEvent> {
        let _guard = if self.raw_mode {
            Some(RawModeGuard::enable()?)
        } else {
            None
        };

        Ok(match read_key(&mut self.input)? {
            Some(key) => decode(&key),
            None => InputEvent::Quit,
        })
    }
}
