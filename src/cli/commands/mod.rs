//! CLI command implementations.

mod ask;
mod chat;
mod config;
mod define;
mod doctor;
mod summarize;
mod transcript;

pub use ask::run_ask;
pub use chat::run_chat;
pub use config::run_config;
pub use define::run_define;
pub use doctor::run_doctor;
pub use summarize::run_summarize;
pub use transcript::run_transcript;
