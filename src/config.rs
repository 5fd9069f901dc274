pub use self::parser::{Config, LoggingConfig, SantaConfig};
pub use self::validator::ConfigError;

mod parser;
mod validator;
