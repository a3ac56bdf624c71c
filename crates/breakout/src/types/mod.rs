mod delimiters;
mod value;

pub use delimiters::{ConfigError, DelimiterConfig, Delimiters};
pub use value::{Map, Object, Value};
