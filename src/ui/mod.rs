// Mon Oct 19 2026 - Alex

pub mod cli;
pub mod banner;

pub use cli::{Args, Command, CommandHandler};
pub use banner::Banner;
