use crate::domain::model::{DeploymentItem, RawAttributePair};
use crate::utils::error::{DeploymentError, Result};
use crate::utils::messages::MessageCatalog;
use std::fmt;
use std::str::FromStr;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DeploymentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_contains_placeholders(
    field_name: &str,
    value: &str,
    placeholders: &[&str],
) -> Result<()> {
    let missing: Vec<&str> = placeholders
        .iter()
        .copied()
        .filter(|p| !value.contains(p))
        .collect();
    if !missing.is_empty() {
        return Err(DeploymentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Template must contain {}", missing.join(", ")),
        });
    }
    Ok(())
}

/// Path rules of the file system deployment items are staged on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathSyntax {
    /// `"<>|` and control characters are illegal; drive designators and
    /// leading separators root a path. Also rejects Unix absolute paths.
    #[default]
    Windows,
    /// Only NUL is illegal; a leading `/` roots a path.
    Unix,
}

impl PathSyntax {
    pub fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    pub fn is_invalid_char(self, c: char) -> bool {
        match self {
            Self::Windows => matches!(c, '"' | '<' | '>' | '|') || (c as u32) < 0x20,
            Self::Unix => c == '\0',
        }
    }

    pub fn contains_invalid_chars(self, path: &str) -> bool {
        path.chars().any(|c| self.is_invalid_char(c))
    }

    pub fn is_rooted(self, path: &str) -> bool {
        match self {
            Self::Windows => {
                let bytes = path.as_bytes();
                matches!(bytes.first(), Some(b'\\' | b'/'))
                    || (bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':')
            }
            Self::Unix => path.starts_with('/'),
        }
    }
}

impl FromStr for PathSyntax {
    type Err = DeploymentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "windows" => Ok(Self::Windows),
            "unix" => Ok(Self::Unix),
            "host" => Ok(Self::host()),
            _ => Err(DeploymentError::InvalidConfigValueError {
                field: "validation.path_syntax".to_string(),
                value: s.to_string(),
                reason: "Valid values: windows, unix, host".to_string(),
            }),
        }
    }
}

impl fmt::Display for PathSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => write!(f, "windows"),
            Self::Unix => write!(f, "unix"),
        }
    }
}

/// Checks one (source path, output directory) pair.
///
/// Checks run in a fixed order and the first failure decides the single
/// warning. Malformed input never panics or errors.
#[derive(Debug, Clone, Default)]
pub struct PathValidator {
    syntax: PathSyntax,
    messages: MessageCatalog,
}

impl PathValidator {
    pub fn new(syntax: PathSyntax, messages: MessageCatalog) -> Self {
        Self { syntax, messages }
    }

    pub fn syntax(&self) -> PathSyntax {
        self.syntax
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    pub fn check(
        &self,
        source_path: Option<&str>,
        output_directory: Option<&str>,
    ) -> std::result::Result<(), String> {
        let (source, output) = self.check_presence(source_path, output_directory)?;

        if self.syntax.contains_invalid_chars(source) || self.syntax.contains_invalid_chars(output)
        {
            return Err(self.messages.invalid_characters(source, output));
        }

        if self.syntax.is_rooted(output) {
            return Err(self.messages.output_directory_not_relative(output));
        }

        Ok(())
    }

    /// Returns the verdict and the warning, which is empty for a valid pair.
    pub fn is_valid(
        &self,
        source_path: Option<&str>,
        output_directory: Option<&str>,
    ) -> (bool, String) {
        match self.check(source_path, output_directory) {
            Ok(()) => (true, String::new()),
            Err(warning) => (false, warning),
        }
    }

    pub fn validate(
        &self,
        pair: &RawAttributePair,
    ) -> std::result::Result<DeploymentItem, String> {
        self.check(pair.source_path(), pair.output_directory())?;
        Ok(self.build(pair))
    }

    /// Only the null/empty checks; used where the syntax checks are turned off.
    pub fn validate_presence(
        &self,
        pair: &RawAttributePair,
    ) -> std::result::Result<DeploymentItem, String> {
        self.check_presence(pair.source_path(), pair.output_directory())?;
        Ok(self.build(pair))
    }

    fn check_presence<'a>(
        &self,
        source_path: Option<&'a str>,
        output_directory: Option<&'a str>,
    ) -> std::result::Result<(&'a str, &'a str), String> {
        let source = match source_path {
            Some(source) if !source.is_empty() => source,
            _ => return Err(self.messages.path_null_or_empty()),
        };
        let output = output_directory.ok_or_else(|| self.messages.output_directory_null())?;
        Ok((source, output))
    }

    fn build(&self, pair: &RawAttributePair) -> DeploymentItem {
        DeploymentItem::new(
            pair.source_path().unwrap_or_default(),
            pair.output_directory().unwrap_or_default(),
        )
    }
}
