// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Holder for the last successful result of a workflow.

/// Keeps at most one result and whether its window is open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presenter<T> {
    result: Option<T>,
    open: bool,
}

impl<T> Default for Presenter<T> {
    fn default() -> Self {
        Self {
            result: None,
            open: false,
        }
    }
}

impl<T> Presenter<T> {
    /// Replace any previous result and open the window.
    pub fn show(&mut self, result: T) {
        self.result = Some(result);
        self.open = true;
    }

    /// Close the window and drop the stored result. Safe to call repeatedly.
    pub fn dismiss(&mut self) {
        self.result = None;
        self.open = false;
    }

    /// The presented result, only while open.
    pub fn current(&self) -> Option<&T> {
        if self.open { self.result.as_ref() } else { None }
    }
}
