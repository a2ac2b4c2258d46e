//! Keystroke debouncing for the search box.

use std::time::{Duration, Instant};

use catalog_core::SEARCH_DEBOUNCE_MS;

/// Turns a stream of keystrokes into at most one search per pause.
///
/// The caller feeds edits through [`input`](Self::input) and polls
/// [`tick`](Self::tick) from its event loop; `tick` yields the text to search
/// once the delay has passed since the last edit and the text differs from
/// the query already applied.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: String,
    active: String,
    last_keystroke: Option<Instant>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(SEARCH_DEBOUNCE_MS))
    }
}

impl SearchDebouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay, pending: String::new(), active: String::new(), last_keystroke: None }
    }

    /// Records the current contents of the search box and restarts the timer.
    pub fn input(&mut self, text: &str, now: Instant) {
        text.clone_into(&mut self.pending);
        self.last_keystroke = Some(now);
    }

    /// Marks `query` as applied, e.g. after a fetch started elsewhere.
    pub fn set_active(&mut self, query: &str) {
        query.clone_into(&mut self.active);
    }

    /// When the pending text becomes due, if a keystroke is outstanding.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.last_keystroke.map(|at| at + self.delay)
    }

    pub fn tick(&mut self, now: Instant) -> Option<String> {
        let due = self.deadline()?;
        if now < due {
            return None;
        }
        self.last_keystroke = None;
        if self.pending == self.active {
            return None;
        }
        self.active.clone_from(&self.pending);
        Some(self.active.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(SEARCH_DEBOUNCE_MS);

    #[test]
    fn fires_once_after_pause() {
        let t0 = Instant::now();
        let mut debouncer = SearchDebouncer::default();

        debouncer.input("l", t0);
        debouncer.input("la", t0 + Duration::from_millis(100));
        debouncer.input("lap", t0 + Duration::from_millis(200));

        assert_eq!(debouncer.tick(t0 + Duration::from_millis(650)), None);
        assert_eq!(debouncer.tick(t0 + Duration::from_millis(700)), Some("lap".to_owned()));
        assert_eq!(debouncer.tick(t0 + Duration::from_millis(2000)), None);
    }

    #[test]
    fn unchanged_text_does_not_refire() {
        let t0 = Instant::now();
        let mut debouncer = SearchDebouncer::new(DELAY);
        debouncer.set_active("desk");

        debouncer.input("desks", t0);
        debouncer.input("desk", t0 + Duration::from_millis(50));

        assert_eq!(debouncer.tick(t0 + Duration::from_secs(1)), None);
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn clearing_the_box_searches_for_everything() {
        let t0 = Instant::now();
        let mut debouncer = SearchDebouncer::new(DELAY);
        debouncer.input("x", t0);
        assert_eq!(debouncer.tick(t0 + DELAY), Some("x".to_owned()));

        debouncer.input("", t0 + DELAY);
        assert_eq!(debouncer.tick(t0 + DELAY * 2), Some(String::new()));
    }
}
