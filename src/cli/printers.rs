// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pretty printers for reporting results and collected warnings.

use std::{
    borrow::Cow,
    sync::{Mutex, MutexGuard},
};

const VERTICAL: char = '│';
const UP_AND_RIGHT: char = '└';
const VERTICAL_AND_RIGHT: char = '├';

lazy_static::lazy_static! {
    static ref WARNING_PRINTER: Mutex<WarningPrinter> = Mutex::new(WarningPrinter::default());
}

/// The tree symbol in front of a line. The first line of a block gets a
/// branch; the last single-line block closes the tree.
fn tree_symbol(i_line: usize, last_line: bool, last_block: bool) -> char {
    match (i_line, last_line, last_block) {
        (0, false, _) | (0, _, false) => VERTICAL_AND_RIGHT,
        (0, true, true) => UP_AND_RIGHT,
        _ => VERTICAL,
    }
}

/// Render blocks of lines as a tree under a title.
fn render(title: &str, blocks: &[Vec<Cow<'static, str>>]) -> Vec<String> {
    let mut lines = Vec::with_capacity(blocks.iter().map(Vec::len).sum::<usize>() + 1);
    lines.push(console::style(title).bold().to_string());
    let num_blocks = blocks.len();
    for (i_block, block) in blocks.iter().enumerate() {
        let num_lines = block.len();
        for (i_line, line) in block.iter().enumerate() {
            let symbol = tree_symbol(i_line, i_line + 1 == num_lines, i_block + 1 == num_blocks);
            lines.push(format!("{symbol} {line}"));
        }
    }
    lines
}

pub(crate) struct InfoPrinter {
    title: Cow<'static, str>,
    blocks: Vec<Vec<Cow<'static, str>>>,
}

impl InfoPrinter {
    pub(crate) fn new(title: Cow<'static, str>) -> Self {
        Self {
            title,
            blocks: vec![],
        }
    }

    pub(crate) fn push_line(&mut self, line: Cow<'static, str>) {
        self.blocks.push(vec![line]);
    }

    pub(crate) fn push_block(&mut self, block: Vec<Cow<'static, str>>) {
        self.blocks.push(block);
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        render(&self.title, &self.blocks)
    }

    pub(crate) fn display(self) {
        for line in self.lines() {
            log::info!("{line}");
        }
        log::info!("");
    }
}

#[derive(Default)]
struct WarningPrinter {
    blocks: Vec<Vec<Cow<'static, str>>>,
}

impl WarningPrinter {
    fn display(&mut self) {
        log::debug!("Displaying warnings");
        if self.blocks.is_empty() {
            return;
        }

        for line in render("Warnings", &self.blocks) {
            log::warn!("{line}");
        }
        log::warn!("");
        self.blocks.clear();
    }
}

// A panic while holding the lock can't leave the printer in a bad state.
fn warning_printer() -> MutexGuard<'static, WarningPrinter> {
    WARNING_PRINTER
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub(crate) trait Warn {
    fn warn(self);
}

impl Warn for &'static str {
    fn warn(self) {
        warning_printer().blocks.push(vec![self.into()]);
    }
}

impl Warn for String {
    fn warn(self) {
        warning_printer().blocks.push(vec![self.into()]);
    }
}

/// Print out any warnings that have been collected while running a command.
/// The collection is emptied afterwards.
pub(crate) fn display_warnings() {
    warning_printer().display();
}
