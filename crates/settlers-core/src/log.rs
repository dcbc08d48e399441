//! The game log: an ordered list of human-readable lines for the renderer.

use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLog {
    entries: Vec<String>,
}

impl GameLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line. Lines are mirrored to tracing.
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        info!(target: "settlers::log", "{}", line);
        self.entries.push(line);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take every line, leaving the log empty
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.entries)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_then_drain() {
        let mut log = GameLog::new();
        log.push("first");
        log.push(String::from("second"));
        assert_eq!(log.entries(), ["first", "second"]);

        let lines = log.drain();
        assert_eq!(lines, vec!["first".to_string(), "second".to_string()]);
        assert!(log.is_empty());

        log.push("third");
        assert_eq!(log.len(), 1);
        log.clear();
        assert!(log.is_empty());
    }
}
