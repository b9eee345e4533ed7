use crate::core::AttributeProvider;
use crate::domain::model::{
    AttributeKind, DeploymentItem, RawAttributePair, ReflectionTarget, Warnings,
};
use crate::utils::validation::PathValidator;
use std::collections::HashSet;

/// How much of the path validation runs on a batch of raw pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Full,
    /// Null/empty checks only; character and rootedness checks are skipped.
    PresenceOnly,
}

/// Class-level deployment items for one reflection target.
pub struct ItemCollector<'a, P> {
    provider: &'a P,
    validator: &'a PathValidator,
}

impl<'a, P: AttributeProvider> ItemCollector<'a, P> {
    pub fn new(provider: &'a P, validator: &'a PathValidator) -> Self {
        Self {
            provider,
            validator,
        }
    }

    /// Validated, deduplicated items declared on `target`, in declaration order.
    ///
    /// Invalid declarations are dropped and reported through `warnings`;
    /// provider failures are returned as they are.
    pub fn collect_class_level(
        &self,
        target: &ReflectionTarget,
        warnings: &mut Warnings,
    ) -> Result<Vec<DeploymentItem>, P::Error> {
        let raw = self
            .provider
            .get_custom_attributes(target, AttributeKind::DeploymentItem)?;

        let items = validate_pairs(self.validator, &raw, ValidationMode::Full, target, warnings);
        let items = dedup_first_seen(items);

        tracing::debug!(
            target_name = %target,
            declared = raw.len(),
            kept = items.len(),
            "Collected class-level deployment items"
        );
        Ok(items)
    }
}

pub(crate) fn validate_pairs(
    validator: &PathValidator,
    raw: &[RawAttributePair],
    mode: ValidationMode,
    target: &ReflectionTarget,
    warnings: &mut Warnings,
) -> Vec<DeploymentItem> {
    raw.iter()
        .filter_map(|pair| {
            let verdict = match mode {
                ValidationMode::Full => validator.validate(pair),
                ValidationMode::PresenceOnly => validator.validate_presence(pair),
            };
            match verdict {
                Ok(item) => Some(item),
                Err(warning) => {
                    tracing::debug!(target_name = %target, %warning, "Dropping deployment item");
                    warnings.push(warning);
                    None
                }
            }
        })
        .collect()
}

/// First occurrence keeps its position; later duplicates are dropped.
pub(crate) fn dedup_first_seen(
    items: impl IntoIterator<Item = DeploymentItem>,
) -> Vec<DeploymentItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
