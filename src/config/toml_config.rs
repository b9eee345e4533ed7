use crate::utils::error::{DeploymentError, Result};
use crate::utils::logger::{init_logger, LogFormat};
use crate::utils::messages::{MessageCatalog, OUTPUT_PLACEHOLDER, SOURCE_PLACEHOLDER};
use crate::utils::validation::{
    validate_contains_placeholders, validate_non_empty_string, PathSyntax, PathValidator,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub validation: ValidationSettings,
    #[serde(default)]
    pub messages: MessageCatalog,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// `windows`, `unix` or `host`; defaults to `windows`.
    pub path_syntax: Option<String>,
    pub validate_method_level: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `compact` or `json`; defaults to `compact`.
    pub format: Option<String>,
    pub verbose: Option<bool>,
}

impl ResolverConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DeploymentError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_vars(content, |name| std::env::var(name).ok());

        toml::from_str(&processed_content).map_err(|e| DeploymentError::ConfigParseError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn validate_config(&self) -> Result<()> {
        self.path_syntax()?;
        self.log_format()?;

        let messages = &self.messages;
        validate_non_empty_string("messages.path_null_or_empty", &messages.path_null_or_empty)?;
        validate_non_empty_string(
            "messages.output_directory_null",
            &messages.output_directory_null,
        )?;
        validate_contains_placeholders(
            "messages.invalid_characters",
            &messages.invalid_characters,
            &[SOURCE_PLACEHOLDER, OUTPUT_PLACEHOLDER],
        )?;
        validate_contains_placeholders(
            "messages.output_directory_not_relative",
            &messages.output_directory_not_relative,
            &[OUTPUT_PLACEHOLDER],
        )?;

        Ok(())
    }

    pub fn path_syntax(&self) -> Result<PathSyntax> {
        match &self.validation.path_syntax {
            Some(value) => value.parse(),
            None => Ok(PathSyntax::default()),
        }
    }

    pub fn validate_method_level(&self) -> bool {
        self.validation.validate_method_level.unwrap_or(true)
    }

    pub fn path_validator(&self) -> Result<PathValidator> {
        Ok(PathValidator::new(self.path_syntax()?, self.messages.clone()))
    }

    pub fn log_format(&self) -> Result<LogFormat> {
        match &self.logging.format {
            Some(value) => value.parse(),
            None => Ok(LogFormat::default()),
        }
    }

    /// Installs the global subscriber described by `[logging]`.
    pub fn init_logging(&self) -> Result<()> {
        init_logger(self.log_format()?, self.logging.verbose.unwrap_or(false))
    }
}

/// Replaces `${VAR}` with `lookup(VAR)`; unknown variables stay as written.
fn substitute_vars(content: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    ENV_VAR_RE
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        })
        .into_owned()
}

impl Validate for ResolverConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
