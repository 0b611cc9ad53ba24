rust_i18n::i18n!("locales");

pub mod cli;
pub mod config;
pub mod error;
mod i18n;
pub mod launcher;
pub mod profile;
pub mod prompt;
pub mod utils;

pub use config::{Config, Settings};
pub use error::Error;
pub use profile::{Profile, ProfileManager};
