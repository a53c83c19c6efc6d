pub mod config;
pub mod fallback;
pub mod name;

pub use config::Config;
pub use fallback::fallback_names;
pub use name::{Gender, NameCandidate, NameRequest, NameResponse, Usage};
