//! Narrative terminal output.
//!
//! The engine never sleeps or schedules timers for presentation. It
//! enqueues lines with a due time on the DisplayQueue; the host drains
//! due lines each frame and keeps the latest N in a Terminal.

use crate::types::Millis;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Command,
    Output,
    Error,
    Success,
    Info,
}

impl LogKind {
    /// Category for generated pseudo-code lines.
    pub fn classify(text: &str) -> Self {
        if text.starts_with("//") {
            Self::Info
        } else if text.contains('✓') {
            Self::Success
        } else {
            Self::Output
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TerminalLine {
    pub id: u64,
    pub text: String,
    pub kind: LogKind,
    /// When the line becomes visible.
    pub timestamp: Millis,
}

/// Lines waiting for their display time, ordered by (due, sequence).
#[derive(Debug, Default)]
pub struct DisplayQueue {
    pending: BTreeMap<(Millis, u64), TerminalLine>,
    next_id: u64,
    stagger_ms: Millis,
}

impl DisplayQueue {
    pub fn new(stagger_ms: Millis) -> Self {
        Self {
            pending: BTreeMap::new(),
            next_id: 0,
            stagger_ms,
        }
    }

    /// Show one line at `now`.
    pub fn push(&mut self, now: Millis, kind: LogKind, text: impl Into<String>) {
        self.schedule(now, kind, text.into());
    }

    /// Show a block of lines one stagger apart, starting at `now`.
    pub fn push_staggered<I>(&mut self, now: Millis, lines: I)
    where
        I: IntoIterator<Item = (LogKind, String)>,
    {
        for (i, (kind, text)) in lines.into_iter().enumerate() {
            let due = now.saturating_add(self.stagger_ms.saturating_mul(i as Millis));
            self.schedule(due, kind, text);
        }
    }

    /// Remove and return every line due at or before `now`, in display order.
    pub fn take_due(&mut self, now: Millis) -> Vec<TerminalLine> {
        let later = self.pending.split_off(&(now.saturating_add(1), 0));
        let due = std::mem::replace(&mut self.pending, later);
        due.into_values().collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    fn schedule(&mut self, due: Millis, kind: LogKind, text: String) {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.insert(
            (due, id),
            TerminalLine { id, text, kind, timestamp: due },
        );
    }
}

/// Bounded scrollback of displayed lines.
#[derive(Debug, Clone)]
pub struct Terminal {
    lines: VecDeque<TerminalLine>,
    capacity: usize,
}

impl Terminal {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, line: TerminalLine) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = TerminalLine>) {
        for line in lines {
            self.push(line);
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &TerminalLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
