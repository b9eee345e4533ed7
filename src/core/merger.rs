use crate::core::collector::{dedup_first_seen, validate_pairs, ValidationMode};
use crate::core::AttributeProvider;
use crate::domain::model::{AttributeKind, DeploymentItem, ReflectionTarget, Warnings};
use crate::utils::validation::PathValidator;

/// Combines method-level declarations with already resolved class-level items.
pub struct ItemMerger<'a, P> {
    provider: &'a P,
    validator: &'a PathValidator,
    method_mode: ValidationMode,
}

impl<'a, P: AttributeProvider> ItemMerger<'a, P> {
    pub fn new(provider: &'a P, validator: &'a PathValidator) -> Self {
        Self {
            provider,
            validator,
            method_mode: ValidationMode::Full,
        }
    }

    /// With `false`, method-level pairs skip the character and rootedness
    /// checks. Pairs without a path or output directory are still dropped.
    pub fn with_method_validation(self, enabled: bool) -> Self {
        self.with_method_mode(if enabled {
            ValidationMode::Full
        } else {
            ValidationMode::PresenceOnly
        })
    }

    pub fn with_method_mode(mut self, mode: ValidationMode) -> Self {
        self.method_mode = mode;
        self
    }

    /// Class-level items first, then method-level items in declaration
    /// order, without duplicates. `None` means there is nothing to stage.
    pub fn resolve(
        &self,
        method_target: &ReflectionTarget,
        class_level_items: &[DeploymentItem],
        warnings: &mut Warnings,
    ) -> Result<Option<Vec<DeploymentItem>>, P::Error> {
        let raw = self
            .provider
            .get_custom_attributes(method_target, AttributeKind::DeploymentItem)?;

        if class_level_items.is_empty() && raw.is_empty() {
            return Ok(None);
        }

        let method_items =
            validate_pairs(self.validator, &raw, self.method_mode, method_target, warnings);
        let merged = dedup_first_seen(class_level_items.iter().cloned().chain(method_items));

        tracing::debug!(
            target_name = %method_target,
            class_level = class_level_items.len(),
            method_level = raw.len(),
            merged = merged.len(),
            "Merged deployment items"
        );

        if merged.is_empty() {
            Ok(None)
        } else {
            Ok(Some(merged))
        }
    }
}
