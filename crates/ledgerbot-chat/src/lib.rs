//! ledgerbot-chat - Conversation layer for the ledgerbot expense tracker
//!
//! Models the chat as an explicit state machine: each user has a `Session`
//! holding the current `ChatState`, a Back stack, and an in-progress draft.
//! The `Engine` consumes one `Event` per turn and emits a `Reply` (text plus
//! an optional button menu) for whatever transport fronts it.

pub mod engine;
pub mod reply;
pub mod session;

pub use engine::{Engine, Event};
pub use reply::{Button, Menu, Reply};
pub use session::{ChatState, Session, SessionStore};
