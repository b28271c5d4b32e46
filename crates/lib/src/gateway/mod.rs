//! Gateway: the Telegram webhook endpoint and the reply pipeline behind it.
//!
//! Each POST runs extraction, book search and the reply send inline, then acknowledges with 200.
//! Internal failures are logged and never change the acknowledgment.

mod handler;
mod server;
#[cfg(test)]
mod test_support;

pub use handler::{build_reply, handle_update, AppState};
pub use server::{router, run_gateway};
