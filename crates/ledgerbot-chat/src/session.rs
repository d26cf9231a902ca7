//! Per-user conversation session
//!
//! A session is ephemeral: it lives only in memory, is created on the first
//! turn, and is reset whenever a flow completes or Back runs off the bottom
//! of the navigation stack. Ledger records never live here beyond one turn.

use std::collections::HashMap;
use std::sync::Mutex;

use ledgerbot_core::models::Frequency;
use rust_decimal::Decimal;

/// Which ledger a target-selection flow operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Expense,
    Income,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl std::str::FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            _ => Err(format!("Unknown record kind: {}", s)),
        }
    }
}

/// Where the conversation currently is
///
/// Menu states present a closed set of buttons; `Awaiting*` states expect
/// free text or a bounded button choice. The paginated views carry their
/// `(month, year)` cursor in the variant itself, so stepping the cursor
/// replaces the state without touching the navigation stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatState {
    MainMenu,
    ExpenseKindMenu,
    AwaitingAmount,
    AwaitingCategory,
    AwaitingPayment,
    AwaitingIncome,
    EditKindMenu,
    AwaitingEditTarget(RecordKind),
    AwaitingEditAmount(RecordKind),
    AwaitingEditDetail(RecordKind),
    AwaitingEditPayment,
    RemoveKindMenu,
    AwaitingRemoveTarget(RecordKind),
    AwaitingRemoveConfirm(RecordKind),
    AwaitingLimit,
    SummaryView { month: u32, year: i32 },
    ExportView { month: u32, year: i32 },
}

/// Transient field values accumulated across a multi-step flow
///
/// Cleared on commit, cancellation, and top-menu reset so nothing leaks into
/// a later, unrelated flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub frequency: Option<Frequency>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    /// Record id selected for edit/remove
    pub target_id: Option<i64>,
    /// Staged edit values; `None` means "keep the stored value"
    pub edit_amount: Option<Decimal>,
    pub edit_detail: Option<String>,
}

/// One user's conversation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub state: ChatState,
    /// Prior states, last-in-first-out, driving Back
    pub stack: Vec<ChatState>,
    pub draft: Draft,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            state: ChatState::MainMenu,
            stack: Vec::new(),
            draft: Draft::default(),
        }
    }
}

impl Session {
    /// Advance to a child state, remembering the current one for Back
    pub fn enter(&mut self, next: ChatState) {
        self.stack.push(self.state.clone());
        self.state = next;
    }

    /// Swap the current state without touching the stack (cursor moves)
    pub fn replace(&mut self, next: ChatState) {
        self.state = next;
    }

    /// Pop back to the previous state; an empty stack resets to the top
    /// menu unconditionally, which makes repeated Back presses idempotent.
    pub fn back(&mut self) {
        match self.stack.pop() {
            Some(prev) => self.state = prev,
            None => self.reset(),
        }
    }

    /// Return to the top menu, dropping history and draft
    pub fn reset(&mut self) {
        self.state = ChatState::MainMenu;
        self.stack.clear();
        self.draft = Draft::default();
    }
}

/// Step a `(month, year)` cursor one month in either direction, rolling the
/// year at the December/January boundary.
pub fn step_month(month: u32, year: i32, forward: bool) -> (u32, i32) {
    if forward {
        if month >= 12 {
            (1, year + 1)
        } else {
            (month + 1, year)
        }
    } else if month <= 1 {
        (12, year - 1)
    } else {
        (month - 1, year)
    }
}

/// In-process session store keyed by user identity
///
/// The transport delivers one update per user at a time, so a session never
/// sees concurrent turns; the mutex only guards map access across users.
#[derive(Default)]
pub struct SessionStore {
    inner: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one turn against the user's session, creating it on first use
    pub fn with_session<F, R>(&self, user: &str, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut sessions = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let session = sessions.entry(user.to_string()).or_default();
        f(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_and_back_restore_prior_state() {
        let mut session = Session::default();
        session.enter(ChatState::ExpenseKindMenu);
        session.enter(ChatState::AwaitingAmount);
        assert_eq!(session.state, ChatState::AwaitingAmount);

        session.back();
        assert_eq!(session.state, ChatState::ExpenseKindMenu);
        session.back();
        assert_eq!(session.state, ChatState::MainMenu);
    }

    #[test]
    fn test_back_on_empty_stack_is_idempotent() {
        let mut session = Session::default();
        session.draft.amount = Some(Decimal::ONE);
        for _ in 0..3 {
            session.back();
            assert_eq!(session.state, ChatState::MainMenu);
            assert!(session.stack.is_empty());
        }
        // The unconditional reset also drops the draft
        assert_eq!(session.draft, Draft::default());
    }

    #[test]
    fn test_back_preserves_draft_while_stack_nonempty() {
        let mut session = Session::default();
        session.enter(ChatState::AwaitingAmount);
        session.draft.amount = Some(Decimal::TEN);
        session.back();
        assert_eq!(session.draft.amount, Some(Decimal::TEN));
    }

    #[test]
    fn test_step_month_rolls_year_both_ways() {
        assert_eq!(step_month(12, 2025, true), (1, 2026));
        assert_eq!(step_month(1, 2025, false), (12, 2024));
        assert_eq!(step_month(6, 2025, true), (7, 2025));
        assert_eq!(step_month(6, 2025, false), (5, 2025));
    }

    #[test]
    fn test_step_month_is_cyclic_with_period_twelve() {
        let (mut month, mut year) = (7, 2025);
        for _ in 0..12 {
            (month, year) = step_month(month, year, true);
        }
        assert_eq!((month, year), (7, 2026));
        for _ in 0..12 {
            (month, year) = step_month(month, year, false);
        }
        assert_eq!((month, year), (7, 2025));
    }

    #[test]
    fn test_session_store_is_per_user() {
        let store = SessionStore::new();
        store.with_session("alice", |s| s.enter(ChatState::AwaitingLimit));
        store.with_session("bob", |s| assert_eq!(s.state, ChatState::MainMenu));
        store.with_session("alice", |s| {
            assert_eq!(s.state, ChatState::AwaitingLimit);
        });
    }
}
