//! Minichess session service
//!
//! Hosts concurrent human-vs-AI games on top of `minichess_engine`:
//! session lifecycle, per-session locking, AI turns under a deadline,
//! inactivity expiry, and one structured event per operation.

pub mod config;
pub mod error;
pub mod events;
pub mod manager;
pub mod session;
pub mod view;

pub use config::{ConfigError, ServiceConfig};
pub use error::{SessionError, SessionResult};
pub use manager::SessionManager;
pub use session::{GameResult, MoveRecord, NewSession, SessionStatus};
pub use view::SessionView;
