use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A validated (source path, relative output directory) pair.
///
/// Only the crate constructs these, and only after the pair passed
/// [`PathValidator`](crate::utils::validation::PathValidator).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DeploymentItem {
    source_path: String,
    output_directory: String,
}

impl DeploymentItem {
    pub(crate) fn new(source_path: impl Into<String>, output_directory: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            output_directory: output_directory.into(),
        }
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    /// Empty means the root of the deployment directory.
    pub fn output_directory(&self) -> &str {
        &self.output_directory
    }
}

impl fmt::Display for DeploymentItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let output = if self.output_directory.is_empty() {
            "."
        } else {
            &self.output_directory
        };
        write!(f, "{} -> {}", self.source_path, output)
    }
}

/// A declaration as surfaced by an attribute provider, before validation.
/// `None` stands for a null value on the declaring attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawAttributePair {
    #[serde(default)]
    pub source_path: Option<String>,
    #[serde(default)]
    pub output_directory: Option<String>,
}

impl RawAttributePair {
    pub fn new(source_path: impl Into<String>, output_directory: impl Into<String>) -> Self {
        Self {
            source_path: Some(source_path.into()),
            output_directory: Some(output_directory.into()),
        }
    }

    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    pub fn output_directory(&self) -> Option<&str> {
        self.output_directory.as_deref()
    }
}

impl From<&DeploymentItem> for RawAttributePair {
    fn from(item: &DeploymentItem) -> Self {
        Self::new(item.source_path.clone(), item.output_directory.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReflectionTarget {
    Class {
        type_name: String,
    },
    Method {
        type_name: String,
        method_name: String,
    },
}

impl ReflectionTarget {
    pub fn class(type_name: impl Into<String>) -> Self {
        Self::Class {
            type_name: type_name.into(),
        }
    }

    pub fn method(type_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self::Method {
            type_name: type_name.into(),
            method_name: method_name.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Self::Class { type_name } | Self::Method { type_name, .. } => type_name,
        }
    }
}

impl fmt::Display for ReflectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class { type_name } => write!(f, "{}", type_name),
            Self::Method {
                type_name,
                method_name,
            } => write!(f, "{}.{}", type_name, method_name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum AttributeKind {
    DeploymentItem,
}

/// Append-only diagnostics collected over one discovery pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings {
    messages: Vec<String>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Moves every message of `other` to the end, keeping their order.
    pub fn append(&mut self, other: &mut Warnings) {
        self.messages.append(&mut other.messages);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.messages
    }

    pub fn into_vec(self) -> Vec<String> {
        self.messages
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyVisibility {
    Visible,
    Hidden,
}

/// Descriptor of a typed entry in a test case's property bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestProperty {
    pub id: &'static str,
    pub label: &'static str,
    pub visibility: PropertyVisibility,
}

/// Reserved key holding the resolved deployment items of a test case.
pub const DEPLOYMENT_ITEMS_PROPERTY: TestProperty = TestProperty {
    id: "MSTestDiscoverer2.DeploymentItems",
    label: "DeploymentItems",
    visibility: PropertyVisibility::Hidden,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub fully_qualified_name: String,
    pub class_name: String,
    pub method_name: String,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

impl TestCase {
    pub fn new(class_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        let class_name = class_name.into();
        let method_name = method_name.into();
        Self {
            fully_qualified_name: format!("{}.{}", class_name, method_name),
            class_name,
            method_name,
            properties: HashMap::new(),
        }
    }

    pub fn method_target(&self) -> ReflectionTarget {
        ReflectionTarget::method(self.class_name.clone(), self.method_name.clone())
    }

    pub fn get_property(&self, property: &TestProperty) -> Option<&serde_json::Value> {
        self.properties.get(property.id)
    }

    pub fn set_property(&mut self, property: &TestProperty, value: serde_json::Value) {
        self.properties.insert(property.id.to_string(), value);
    }

    pub fn remove_property(&mut self, property: &TestProperty) -> Option<serde_json::Value> {
        self.properties.remove(property.id)
    }
}
