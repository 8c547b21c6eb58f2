//! # Connection Handshake
//!
//! Envelope-driven state machine for opening and tearing down connections.
//!
//! ```text
//! A                          B
//! |---- ConnectRequest ----->|  accept_inbound(A)
//! |<--- ConnectAccepted -----|  (or an inert reply when full)
//! |---- ConnectDone -------->|  A recorded B as outbound
//!
//! |---- Kill --------------->|  B forgets A
//! |<--- Killed --------------|  A forgets B
//! ```
//!
//! An initiator that can no longer hold the connection when the acceptance
//! arrives answers `Kill` instead of `ConnectDone`, so the acceptor frees
//! the inbound slot again.

mod state;
mod types;

pub use state::respond;
pub use types::HandshakeOutcome;
