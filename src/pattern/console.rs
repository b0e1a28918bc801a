use std::collections::VecDeque;

/// Lines kept by a runtime console before the oldest are dropped.
pub const CONSOLE_CAPACITY: usize = 256;

/// Bounded interpreter console: script output and generator fault reports.
///
/// Once full, each new line evicts the oldest one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Console {
    lines: VecDeque<String>,
    capacity: usize,
    dropped: u64,
}

impl Default for Console {
    fn default() -> Self {
        Self::with_capacity(CONSOLE_CAPACITY)
    }
}

impl Console {
    /// A console holding up to [`CONSOLE_CAPACITY`] lines.
    pub fn new() -> Self {
        Self::default()
    }

    /// A console holding up to `capacity` lines (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity.min(CONSOLE_CAPACITY)),
            capacity,
            dropped: 0,
        }
    }

    /// Append a line, evicting the oldest when full.
    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
            self.dropped += 1;
        }
        self.lines.push_back(line.into());
    }

    /// Lines currently held.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether no lines are held.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Maximum number of lines held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lines evicted since the console was created.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Held lines, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(String::as_str)
    }

    /// Copy of the held lines, oldest first.
    pub fn to_vec(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    /// Remove and return the held lines, oldest first.
    pub fn drain(&mut self) -> Vec<String> {
        self.lines.drain(..).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/console.rs"]
mod tests;
