//! Per-pass profile tracking.
//!
//! The processor and serializer each build a fresh [`ProfileState`] at entry,
//! so no profile context can leak between calls.

/// Profile context for one parse or serialize pass.
///
/// Tracks the LIFO stack of `BEGIN`ed block names, plus the last profile set
/// explicitly by a `PROFILE` line and whether that explicit profile is the
/// most recent signal.
#[derive(Debug, Default)]
pub struct ProfileState {
    stack: Vec<String>,
    explicit: Option<String>,
    explicit_active: bool,
}

impl ProfileState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a `PROFILE` line. The explicit profile takes priority until
    /// the next `BEGIN`.
    pub fn set_explicit(&mut self, name: impl Into<String>) {
        self.explicit = Some(name.into());
        self.explicit_active = true;
    }

    /// Records a `BEGIN:x`. The block stack takes priority from here on.
    pub fn push(&mut self, name: impl Into<String>) {
        self.stack.push(name.into());
        self.explicit_active = false;
    }

    /// Records an `END:x`. Returns the popped block name, or `None` if the
    /// stack was empty (the caller raises "END without BEGIN").
    pub fn pop(&mut self) -> Option<String> {
        self.stack.pop()
    }

    /// Returns the name on top of the block stack, if any.
    #[must_use]
    pub fn top(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    /// Returns whether the block stack is empty.
    #[must_use]
    pub fn stack_is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Returns the number of open blocks.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns the currently active profile name.
    ///
    /// Lookup order: the explicit profile if it was the most recent signal,
    /// else the top of the block stack, else the explicit profile even if
    /// stale, else none.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        if self.explicit_active {
            return self.explicit.as_deref();
        }
        self.top().or(self.explicit.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_state_has_no_profile() {
        assert_eq!(ProfileState::new().current(), None);
    }

    #[test]
    fn explicit_profile_wins_while_recent() {
        let mut state = ProfileState::new();
        state.set_explicit("vcard");
        assert_eq!(state.current(), Some("vcard"));
    }

    #[test]
    fn begin_suspends_explicit_profile() {
        let mut state = ProfileState::new();
        state.set_explicit("vcard");
        state.push("VCALENDAR");
        assert_eq!(state.current(), Some("VCALENDAR"));
    }

    #[test]
    fn profile_line_overrides_open_block() {
        let mut state = ProfileState::new();
        state.push("VCARD");
        state.set_explicit("other");
        assert_eq!(state.current(), Some("other"));
    }

    #[test]
    fn stale_explicit_profile_survives_stack_drain() {
        let mut state = ProfileState::new();
        state.set_explicit("vcard");
        state.push("GROUP");
        assert_eq!(state.pop().as_deref(), Some("GROUP"));
        // Stack empty again: fall back to the stale explicit profile
        assert_eq!(state.current(), Some("vcard"));
    }

    #[test]
    fn pop_on_empty_returns_none() {
        assert_eq!(ProfileState::new().pop(), None);
    }

    #[test]
    fn nested_blocks_pop_in_lifo_order() {
        let mut state = ProfileState::new();
        state.push("A");
        state.push("B");
        assert_eq!(state.current(), Some("B"));
        assert_eq!(state.pop().as_deref(), Some("B"));
        assert_eq!(state.current(), Some("A"));
        assert_eq!(state.pop().as_deref(), Some("A"));
        assert!(state.stack_is_empty());
    }
}
