pub mod collector;
pub mod merger;
pub mod presence;
pub mod resolver;

pub use crate::domain::model::{DeploymentItem, RawAttributePair, ReflectionTarget, Warnings};
pub use crate::domain::ports::AttributeProvider;
pub use crate::utils::error::Result;
