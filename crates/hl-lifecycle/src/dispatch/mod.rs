//! # Dispatch Layer
//!
//! Turns a function name plus string arguments into a typed [`Command`]
//! once, at the boundary, then routes it into the core.

pub mod command;
pub mod dispatcher;

pub use command::*;
pub use dispatcher::{Dispatcher, PING_RESPONSE};
