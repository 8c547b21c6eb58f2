//! # Envelope
//!
//! The value exchanged between peers. The flat field set of the wire
//! (`connect_as_outbound`, `kill_connection`, `get_address`, ...) is folded
//! into a single [`Intent`]; accessors on [`Envelope`] give the flat view back.

mod types;

pub use types::{ConnectState, Envelope, Intent};
