//! Reading and writing the reserved deployment items property of a test case.

use crate::core::collector::ValidationMode;
use crate::domain::model::{
    DeploymentItem, RawAttributePair, TestCase, Warnings, DEPLOYMENT_ITEMS_PROPERTY,
};
use crate::utils::error::Result;
use crate::utils::validation::PathValidator;
use serde_json::{json, Value};

/// True iff the reserved property holds a non-empty array.
pub fn has_deployment_items(test_case: &TestCase) -> bool {
    matches!(
        test_case.get_property(&DEPLOYMENT_ITEMS_PROPERTY),
        Some(Value::Array(items)) if !items.is_empty()
    )
}

/// Stores `items` under the reserved property. An empty slice clears it.
pub fn attach_deployment_items(test_case: &mut TestCase, items: &[DeploymentItem]) {
    if items.is_empty() {
        test_case.remove_property(&DEPLOYMENT_ITEMS_PROPERTY);
        return;
    }

    let pairs = items
        .iter()
        .map(|item| {
            json!({
                "source_path": item.source_path(),
                "output_directory": item.output_directory()
            })
        })
        .collect();
    test_case.set_property(&DEPLOYMENT_ITEMS_PROPERTY, Value::Array(pairs));
}

/// Items attached to `test_case`, re-validated for the staging side.
///
/// `mode` must match the mode the items were resolved with, otherwise pairs
/// let through by presence-only checks are dropped here. Pairs that fail are
/// reported through `warnings`. A property that is not a list of pairs is an
/// error.
pub fn attached_deployment_items(
    test_case: &TestCase,
    validator: &PathValidator,
    mode: ValidationMode,
    warnings: &mut Warnings,
) -> Result<Vec<DeploymentItem>> {
    let value = match test_case.get_property(&DEPLOYMENT_ITEMS_PROPERTY) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(value) => value,
    };

    let pairs: Vec<RawAttributePair> = serde_json::from_value(value.clone())?;
    let mut items = Vec::with_capacity(pairs.len());
    for pair in &pairs {
        let verdict = match mode {
            ValidationMode::Full => validator.validate(pair),
            ValidationMode::PresenceOnly => validator.validate_presence(pair),
        };
        match verdict {
            Ok(item) => items.push(item),
            Err(warning) => {
                tracing::warn!(
                    test = %test_case.fully_qualified_name,
                    %warning,
                    "Attached deployment item is invalid"
                );
                warnings.push(warning);
            }
        }
    }
    Ok(items)
}
