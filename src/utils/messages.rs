//! Warning templates for malformed deployment items.
//!
//! Templates carry `{source}` and `{output}` placeholders which are replaced
//! with the offending values verbatim.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(source|output)\}").expect("valid regex"));

pub const SOURCE_PLACEHOLDER: &str = "{source}";
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageCatalog {
    pub path_null_or_empty: String,
    pub output_directory_null: String,
    pub invalid_characters: String,
    pub output_directory_not_relative: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            path_null_or_empty: "The deployment item path cannot be null or empty.".to_string(),
            output_directory_null: "The deployment item output directory cannot be null."
                .to_string(),
            invalid_characters: "Invalid deployment item: the specified path \"{source}\" or \
                output directory \"{output}\" contains illegal characters."
                .to_string(),
            output_directory_not_relative: "Invalid deployment item: the specified output \
                directory \"{output}\" is not valid. It must be relative to the deployment \
                directory."
                .to_string(),
        }
    }
}

impl MessageCatalog {
    pub fn path_null_or_empty(&self) -> String {
        self.path_null_or_empty.clone()
    }

    pub fn output_directory_null(&self) -> String {
        self.output_directory_null.clone()
    }

    pub fn invalid_characters(&self, source: &str, output: &str) -> String {
        render(&self.invalid_characters, source, output)
    }

    pub fn output_directory_not_relative(&self, output: &str) -> String {
        render(&self.output_directory_not_relative, "", output)
    }
}

// Single pass so a value containing "{output}" is never substituted twice.
fn render(template: &str, source: &str, output: &str) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "source" => source.to_string(),
            _ => output.to_string(),
        })
        .into_owned()
}
