use crate::core::AttributeProvider;
use crate::domain::model::{AttributeKind, RawAttributePair, ReflectionTarget};
use crate::utils::error::{DeploymentError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::convert::Infallible;
use std::path::Path;

/// Attribute provider backed by declarations written in TOML.
///
/// ```toml
/// [classes."Contoso.ParserTests"]
/// deployment_items = [{ path = "data\\input.xml", output_directory = "in" }]
///
/// [classes."Contoso.ParserTests".methods.ParsesEmptyFile]
/// deployment_items = [{ path = "data\\empty.xml" }]
/// ```
///
/// A missing `path` or `output_directory` stands for a null value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestAttributeProvider {
    #[serde(default)]
    classes: HashMap<String, ClassDeclarations>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ClassDeclarations {
    #[serde(default)]
    deployment_items: Vec<DeclaredItem>,
    #[serde(default)]
    methods: HashMap<String, MethodDeclarations>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MethodDeclarations {
    #[serde(default)]
    deployment_items: Vec<DeclaredItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeclaredItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output_directory: Option<String>,
}

impl From<RawAttributePair> for DeclaredItem {
    fn from(pair: RawAttributePair) -> Self {
        Self {
            path: pair.source_path,
            output_directory: pair.output_directory,
        }
    }
}

impl From<&DeclaredItem> for RawAttributePair {
    fn from(item: &DeclaredItem) -> Self {
        Self {
            source_path: item.path.clone(),
            output_directory: item.output_directory.clone(),
        }
    }
}

impl ManifestAttributeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DeploymentError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DeploymentError::ManifestError {
            message: e.to_string(),
        })
    }

    pub fn with_class_items(
        mut self,
        class_name: impl Into<String>,
        pairs: impl IntoIterator<Item = RawAttributePair>,
    ) -> Self {
        self.classes
            .entry(class_name.into())
            .or_default()
            .deployment_items
            .extend(pairs.into_iter().map(DeclaredItem::from));
        self
    }

    pub fn with_method_items(
        mut self,
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        pairs: impl IntoIterator<Item = RawAttributePair>,
    ) -> Self {
        self.classes
            .entry(class_name.into())
            .or_default()
            .methods
            .entry(method_name.into())
            .or_default()
            .deployment_items
            .extend(pairs.into_iter().map(DeclaredItem::from));
        self
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn method_names(&self, class_name: &str) -> impl Iterator<Item = &str> {
        self.classes
            .get(class_name)
            .into_iter()
            .flat_map(|class| class.methods.keys().map(String::as_str))
    }

    fn declared(&self, target: &ReflectionTarget) -> &[DeclaredItem] {
        let Some(class) = self.classes.get(target.type_name()) else {
            return &[];
        };
        match target {
            ReflectionTarget::Class { .. } => class.deployment_items.as_slice(),
            ReflectionTarget::Method { method_name, .. } => class
                .methods
                .get(method_name)
                .map(|method| method.deployment_items.as_slice())
                .unwrap_or(&[]),
        }
    }
}

impl AttributeProvider for ManifestAttributeProvider {
    type Error = Infallible;

    fn get_custom_attributes(
        &self,
        target: &ReflectionTarget,
        kind: AttributeKind,
    ) -> std::result::Result<Vec<RawAttributePair>, Infallible> {
        match kind {
            AttributeKind::DeploymentItem => {
                Ok(self.declared(target).iter().map(RawAttributePair::from).collect())
            }
        }
    }
}
