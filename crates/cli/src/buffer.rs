// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Line-addressed text buffer with newline round-tripping.
//!
//! A buffer holds the lines of one file for the duration of one edit pass.
//! Line indices are 0-based here; the 1-based convention used by external
//! tools (PHPCS reports, config files) is translated at the API edge.

/// Newline flavor of a file, detected from its first line break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Newline {
    /// Unix line endings (`\n`).
    Lf,
    /// Windows line endings (`\r\n`).
    CrLf,
}

impl Newline {
    /// The line terminator as a string slice.
    pub fn as_str(self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
        }
    }
}

/// An ordered sequence of lines plus the formatting needed to
/// reconstruct the original text on write-back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
    newline: Newline,
    trailing_newline: bool,
}

impl TextBuffer {
    /// Split raw text into lines, recording newline flavor and whether
    /// the text ended with a line break.
    ///
    /// Files with mixed line endings are normalized to the flavor of the
    /// first break; an unedited buffer still renders byte-for-byte.
    pub fn parse(text: &str) -> Self {
        let newline = match text.find('\n') {
            Some(at) if at > 0 && text.as_bytes()[at - 1] == b'\r' => Newline::CrLf,
            _ => Newline::Lf,
        };
        let trailing_newline = text.ends_with('\n');

        let mut lines: Vec<String> = if text.is_empty() {
            Vec::new()
        } else {
            text.split('\n')
                .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
                .collect()
        };
        // split() leaves an empty segment after a trailing newline
        if trailing_newline {
            lines.pop();
        }

        Self {
            lines,
            newline,
            trailing_newline,
        }
    }

    /// Reconstruct the text, including the trailing newline if the
    /// original had one.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push_str(self.newline.as_str());
            }
            out.push_str(line);
        }
        if self.trailing_newline && !self.lines.is_empty() {
            out.push_str(self.newline.as_str());
        }
        out
    }

    /// Number of lines in the buffer.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the buffer holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line at `idx`, if in range.
    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    /// All lines, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The newline flavor detected at parse time.
    pub fn newline(&self) -> Newline {
        self.newline
    }

    /// Insert `line` at `idx`, shifting `idx` and everything after it
    /// down by one.
    pub fn insert(&mut self, idx: usize, line: String) {
        self.lines.insert(idx, line);
    }

    /// Overwrite the line at `idx`.
    pub fn replace(&mut self, idx: usize, line: String) {
        self.lines[idx] = line;
    }

    /// Replace the whole line sequence, keeping newline formatting.
    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
