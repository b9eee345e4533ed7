use crate::config::ResolverConfig;
use crate::core::collector::{ItemCollector, ValidationMode};
use crate::core::merger::ItemMerger;
use crate::core::presence::{attach_deployment_items, attached_deployment_items};
use crate::core::AttributeProvider;
use crate::domain::model::{DeploymentItem, ReflectionTarget, TestCase, Warnings};
use crate::utils::error::Result;
use crate::utils::validation::PathValidator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscoverySummary {
    pub tests: usize,
    pub tests_with_items: usize,
    pub items: usize,
}

/// Resolves and attaches deployment items for the tests of one class at a time.
pub struct DeploymentResolver<P: AttributeProvider> {
    provider: P,
    validator: PathValidator,
    method_mode: ValidationMode,
}

impl<P: AttributeProvider> DeploymentResolver<P> {
    pub fn new(provider: P, validator: PathValidator) -> Self {
        Self {
            provider,
            validator,
            method_mode: ValidationMode::Full,
        }
    }

    pub fn from_config(provider: P, config: &ResolverConfig) -> Result<Self> {
        let resolver = Self::new(provider, config.path_validator()?);
        Ok(resolver.with_method_validation(config.validate_method_level()))
    }

    pub fn with_method_validation(mut self, enabled: bool) -> Self {
        self.method_mode = if enabled {
            ValidationMode::Full
        } else {
            ValidationMode::PresenceOnly
        };
        self
    }

    pub fn validator(&self) -> &PathValidator {
        &self.validator
    }

    pub fn method_mode(&self) -> ValidationMode {
        self.method_mode
    }

    /// Reads back the items attached by [`Self::discover_class`], checked the
    /// same way they were resolved.
    pub fn attached_items(
        &self,
        test_case: &TestCase,
        warnings: &mut Warnings,
    ) -> Result<Vec<DeploymentItem>> {
        attached_deployment_items(test_case, &self.validator, self.method_mode, warnings)
    }

    pub fn class_level_items(
        &self,
        class_name: &str,
        warnings: &mut Warnings,
    ) -> std::result::Result<Vec<DeploymentItem>, P::Error> {
        ItemCollector::new(&self.provider, &self.validator)
            .collect_class_level(&ReflectionTarget::class(class_name), warnings)
    }

    pub fn resolve_method(
        &self,
        class_name: &str,
        method_name: &str,
        class_items: &[DeploymentItem],
        warnings: &mut Warnings,
    ) -> std::result::Result<Option<Vec<DeploymentItem>>, P::Error> {
        self.resolve_target(
            &ReflectionTarget::method(class_name, method_name),
            class_items,
            warnings,
        )
    }

    fn resolve_target(
        &self,
        target: &ReflectionTarget,
        class_items: &[DeploymentItem],
        warnings: &mut Warnings,
    ) -> std::result::Result<Option<Vec<DeploymentItem>>, P::Error> {
        ItemMerger::new(&self.provider, &self.validator)
            .with_method_mode(self.method_mode)
            .resolve(target, class_items, warnings)
    }

    /// Collects the class-level items once, then resolves and attaches the
    /// items of every test case. Test cases without items end up without the
    /// reserved property. Test cases of another class are skipped and left
    /// untouched.
    pub fn discover_class(
        &self,
        class_name: &str,
        test_cases: &mut [TestCase],
        warnings: &mut Warnings,
    ) -> std::result::Result<DiscoverySummary, P::Error> {
        tracing::info!(class = class_name, tests = test_cases.len(), "Resolving deployment items");

        let class_items = self.class_level_items(class_name, warnings)?;
        let mut summary = DiscoverySummary::default();

        for test_case in test_cases.iter_mut() {
            if test_case.class_name != class_name {
                tracing::warn!(
                    class = class_name,
                    test = %test_case.fully_qualified_name,
                    "Skipping test case of another class"
                );
                continue;
            }

            summary.tests += 1;
            let resolved =
                self.resolve_target(&test_case.method_target(), &class_items, warnings)?;
            match resolved {
                Some(items) => {
                    tracing::debug!(
                        test = %test_case.fully_qualified_name,
                        items = items.len(),
                        "Attaching deployment items"
                    );
                    summary.tests_with_items += 1;
                    summary.items += items.len();
                    attach_deployment_items(test_case, &items);
                }
                None => attach_deployment_items(test_case, &[]),
            }
        }

        tracing::info!(
            class = class_name,
            tests_with_items = summary.tests_with_items,
            items = summary.items,
            warnings = warnings.len(),
            "Deployment items resolved"
        );
        Ok(summary)
    }
}
