pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::ManifestAttributeProvider;
pub use config::ResolverConfig;
pub use crate::core::{
    collector::{ItemCollector, ValidationMode},
    merger::ItemMerger,
    presence::{attach_deployment_items, attached_deployment_items, has_deployment_items},
    resolver::{DeploymentResolver, DiscoverySummary},
};
pub use domain::model::{
    AttributeKind, DeploymentItem, RawAttributePair, ReflectionTarget, TestCase, TestProperty,
    Warnings, DEPLOYMENT_ITEMS_PROPERTY,
};
pub use domain::ports::AttributeProvider;
pub use utils::error::{DeploymentError, Result};
pub use utils::logger::{init_logger, LogFormat};
pub use utils::messages::MessageCatalog;
pub use utils::validation::{PathSyntax, PathValidator};
