use std::sync::{Mutex, MutexGuard};

/// Shown while an advice request is in flight.
pub const ADVICE_PLACEHOLDER: &str = "Syncing intelligence...";

/// Handle identifying one advice request; only the newest may publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdviceTicket(u64);

#[derive(Debug)]
struct BoardState {
    generation: u64,
    open: bool,
    current: String,
}

/// Latest advice text shown on the home screen.
///
/// Results of superseded requests, or requests that complete after
/// [`AdviceBoard::close`], are discarded.
#[derive(Debug)]
pub struct AdviceBoard {
    state: Mutex<BoardState>,
}

impl Default for AdviceBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl AdviceBoard {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BoardState {
                generation: 0,
                open: true,
                current: ADVICE_PLACEHOLDER.to_string(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Starts a new request and supersedes older ones.
    ///
    /// On a closed board the placeholder is left untouched and the ticket
    /// can never publish.
    pub fn begin(&self) -> AdviceTicket {
        let mut state = self.lock();
        state.generation += 1;
        if state.open {
            state.current = ADVICE_PLACEHOLDER.to_string();
        }
        AdviceTicket(state.generation)
    }

    /// Stores `text` if `ticket` is still the newest request and the board is
    /// open. Returns whether the text was accepted.
    pub fn publish(&self, ticket: AdviceTicket, text: impl Into<String>) -> bool {
        let mut state = self.lock();
        if !state.open || state.generation != ticket.0 {
            return false;
        }
        state.current = text.into();
        true
    }

    pub fn current(&self) -> String {
        self.lock().current.clone()
    }

    /// Stops accepting results until [`AdviceBoard::reopen`].
    pub fn close(&self) {
        self.lock().open = false;
    }

    /// Accepts results again; tickets taken while closed stay rejected.
    pub fn reopen(&self) {
        self.lock().open = true;
    }

    pub fn is_open(&self) -> bool {
        self.lock().open
    }
}
