//! # mooderia-client
//!
//! Application glue for a Mooderia UI host: signed-in state, the
//! command layer a front end invokes, and the event payloads it
//! receives back. No rendering lives here; a desktop shell or web
//! front end calls the commands and draws the DTOs they return.

pub mod commands;
pub mod error;
pub mod events;
pub mod state;

pub use error::ClientError;
pub use state::AppState;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing for a client host (respects RUST_LOG).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("mooderia_client=debug,mooderia_chat=debug,mooderia_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
