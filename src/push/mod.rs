//! Live log push channel
//!
//! The messaging server emits `log` events on a Socket.IO namespace. This
//! module speaks just enough of the protocol to join that namespace over a
//! WebSocket, answer heartbeats and hand each log message to the dashboard.

pub mod channel;
pub mod packet;
pub mod session;

pub use channel::{ChannelEnd, Subscription};
pub use session::{Session, Step};
