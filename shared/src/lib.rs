pub mod config;
pub mod parse;
pub mod report;
pub mod sizing;

pub use config::Config;
pub use parse::{parse_keyed, try_parse_positional, ParseError};
pub use sizing::{compute, RiskConfig, SizingError, SizingRequest, SizingResult, MAX_ENTRIES};
