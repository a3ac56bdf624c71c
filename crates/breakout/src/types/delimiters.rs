use bon::bon;
use serde::Deserialize;
use thiserror::Error;

/// Errors from building a delimiter configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// One of the four delimiters is the empty string.
    #[error("the {which} delimiter must not be empty")]
    EmptyDelimiter { which: &'static str },

    /// Variable and block tags open with the same string.
    #[error("variable and block tags cannot both open with '{open}'")]
    AmbiguousOpen { open: String },
}

/// The four literal strings that mark template tags.
///
/// Defaults to `{{ }}` for variables and `{% %}` for blocks.
///
/// # Example
///
/// ```
/// use breakout::Delimiters;
///
/// let delimiters = Delimiters::builder()
///     .variable_open("<<")
///     .variable_close(">>")
///     .build()
///     .unwrap();
///
/// assert_eq!(delimiters.variable(), ("<<", ">>"));
/// assert_eq!(delimiters.block(), ("{%", "%}"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    variable_open: String,
    variable_close: String,
    block_open: String,
    block_close: String,
}

#[bon]
impl Delimiters {
    #[builder]
    pub fn new(
        #[builder(into, default = "{{".to_string())] variable_open: String,
        #[builder(into, default = "}}".to_string())] variable_close: String,
        #[builder(into, default = "{%".to_string())] block_open: String,
        #[builder(into, default = "%}".to_string())] block_close: String,
    ) -> Result<Self, ConfigError> {
        for (which, value) in [
            ("variable open", &variable_open),
            ("variable close", &variable_close),
            ("block open", &block_open),
            ("block close", &block_close),
        ] {
            if value.is_empty() {
                return Err(ConfigError::EmptyDelimiter { which });
            }
        }
        if variable_open == block_open {
            return Err(ConfigError::AmbiguousOpen { open: block_open });
        }
        Ok(Self {
            variable_open,
            variable_close,
            block_open,
            block_close,
        })
    }
}

impl Delimiters {
    /// Opening and closing strings for variable tags.
    pub fn variable(&self) -> (&str, &str) {
        (&self.variable_open, &self.variable_close)
    }

    /// Opening and closing strings for block tags.
    pub fn block(&self) -> (&str, &str) {
        (&self.block_open, &self.block_close)
    }

    pub fn variable_open(&self) -> &str {
        &self.variable_open
    }

    pub fn variable_close(&self) -> &str {
        &self.variable_close
    }

    pub fn block_open(&self) -> &str {
        &self.block_open
    }

    pub fn block_close(&self) -> &str {
        &self.block_close
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            variable_open: "{{".to_string(),
            variable_close: "}}".to_string(),
            block_open: "{%".to_string(),
            block_close: "%}".to_string(),
        }
    }
}

/// Serialized form of a delimiter configuration.
///
/// Either pair may be omitted to keep its default.
///
/// ```json
/// { "variable": ["<<", ">>"], "block": ["<%", "%>"] }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DelimiterConfig {
    #[serde(default)]
    pub variable: Option<[String; 2]>,
    #[serde(default)]
    pub block: Option<[String; 2]>,
}

impl TryFrom<DelimiterConfig> for Delimiters {
    type Error = ConfigError;

    fn try_from(config: DelimiterConfig) -> Result<Self, Self::Error> {
        let defaults = Delimiters::default();
        let [variable_open, variable_close] = config
            .variable
            .unwrap_or([defaults.variable_open, defaults.variable_close]);
        let [block_open, block_close] = config
            .block
            .unwrap_or([defaults.block_open, defaults.block_close]);
        Delimiters::builder()
            .variable_open(variable_open)
            .variable_close(variable_close)
            .block_open(block_open)
            .block_close(block_close)
            .build()
    }
}
