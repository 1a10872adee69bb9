use rand::Rng;

use crate::trending::resolve_topic;

/// Query state kept by the presentation layer between interactions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSession {
    query: String,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores trimmed input; blank input keeps the previous query.
    pub fn submit(&mut self, input: &str) -> Option<&str> {
        let trimmed = input.trim();
        if !trimmed.is_empty() {
            self.query = trimmed.to_string();
        }
        self.active_query()
    }

    /// Resolves a trending topic and makes it the current query.
    pub fn select_topic<R: Rng + ?Sized>(&mut self, topic: &str, rng: &mut R) -> Option<&str> {
        let resolved = resolve_topic(topic, rng);
        self.submit(&resolved)
    }

    /// One line of interactive input: `:topic <name>` selects a trending topic,
    /// anything else is submitted as a query.
    pub fn handle_line<R: Rng + ?Sized>(&mut self, line: &str, rng: &mut R) -> Option<&str> {
        match line.trim().strip_prefix(":topic") {
            Some(name) if name.starts_with(char::is_whitespace) && !name.trim().is_empty() => {
                self.select_topic(name.trim(), rng)
            }
            _ => self.submit(line),
        }
    }

    pub fn active_query(&self) -> Option<&str> {
        if self.query.is_empty() {
            None
        } else {
            Some(&self.query)
        }
    }

    pub fn clear(&mut self) {
        self.query.clear();
    }
}
