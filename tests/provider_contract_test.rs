use deployment_items::{
    AttributeKind, AttributeProvider, DeploymentResolver, ItemCollector, PathValidator,
    RawAttributePair, ReflectionTarget, TestCase, Warnings,
};
use mockall::mock;
use mockall::predicate::eq;
use std::fmt;

const CLASS: &str = "Contoso.Tests.ReportTests";

#[derive(Debug, Clone, PartialEq)]
struct ReflectionError(String);

impl fmt::Display for ReflectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reflection failed: {}", self.0)
    }
}

impl std::error::Error for ReflectionError {}

mock! {
    Reflection {}

    impl AttributeProvider for Reflection {
        type Error = ReflectionError;

        fn get_custom_attributes(
            &self,
            target: &ReflectionTarget,
            kind: AttributeKind,
        ) -> Result<Vec<RawAttributePair>, ReflectionError>;
    }
}

#[test]
fn test_provider_is_called_once_per_scope() {
    let mut reflection = MockReflection::new();
    reflection
        .expect_get_custom_attributes()
        .with(eq(ReflectionTarget::class(CLASS)), eq(AttributeKind::DeploymentItem))
        .times(1)
        .returning(|_, _| Ok(vec![RawAttributePair::new("report.xslt", "")]));
    for method in ["RendersHtml", "RendersPdf"] {
        reflection
            .expect_get_custom_attributes()
            .with(
                eq(ReflectionTarget::method(CLASS, method)),
                eq(AttributeKind::DeploymentItem),
            )
            .times(1)
            .returning(|_, _| Ok(vec![]));
    }

    let resolver = DeploymentResolver::new(reflection, PathValidator::default());
    let mut test_cases = vec![
        TestCase::new(CLASS, "RendersHtml"),
        TestCase::new(CLASS, "RendersPdf"),
    ];
    let mut warnings = Warnings::new();

    let summary = resolver
        .discover_class(CLASS, &mut test_cases, &mut warnings)
        .unwrap();

    assert_eq!(summary.tests_with_items, 2);
    assert_eq!(summary.items, 2);
}

#[test]
fn test_class_level_failure_propagates_unchanged() {
    let mut reflection = MockReflection::new();
    reflection
        .expect_get_custom_attributes()
        .times(1)
        .returning(|_, _| Err(ReflectionError("type load".to_string())));

    let validator = PathValidator::default();
    let mut warnings = Warnings::new();
    let err = ItemCollector::new(&reflection, &validator)
        .collect_class_level(&ReflectionTarget::class(CLASS), &mut warnings)
        .unwrap_err();

    assert_eq!(err, ReflectionError("type load".to_string()));
    assert!(warnings.is_empty());
}

#[test]
fn test_method_level_failure_stops_discovery() {
    let mut reflection = MockReflection::new();
    reflection
        .expect_get_custom_attributes()
        .with(eq(ReflectionTarget::class(CLASS)), eq(AttributeKind::DeploymentItem))
        .returning(|_, _| Ok(vec![RawAttributePair::new("a|b", "")]));
    reflection
        .expect_get_custom_attributes()
        .with(
            eq(ReflectionTarget::method(CLASS, "Broken")),
            eq(AttributeKind::DeploymentItem),
        )
        .returning(|_, _| Err(ReflectionError("missing method".to_string())));

    let resolver = DeploymentResolver::new(reflection, PathValidator::default());
    let mut test_cases = vec![TestCase::new(CLASS, "Broken")];
    let mut warnings = Warnings::new();

    let err = resolver
        .discover_class(CLASS, &mut test_cases, &mut warnings)
        .unwrap_err();

    assert_eq!(err.to_string(), "reflection failed: missing method");
    // The per-item warning recorded before the failure is kept.
    assert_eq!(warnings.len(), 1);
}

#[test]
fn test_parallel_resolution_with_private_warnings() {
    let resolver = DeploymentResolver::new(
        deployment_items::ManifestAttributeProvider::new()
            .with_class_items("A", [RawAttributePair::new("a", "<bad>")])
            .with_class_items("B", [RawAttributePair::new("", "out")]),
        PathValidator::default(),
    );

    let mut pass = Warnings::new();
    let per_class: Vec<Warnings> = std::thread::scope(|scope| {
        let handles: Vec<_> = ["A", "B"]
            .into_iter()
            .map(|class| {
                let resolver = &resolver;
                scope.spawn(move || {
                    let mut private = Warnings::new();
                    let mut tests = vec![TestCase::new(class, "M")];
                    match resolver.discover_class(class, &mut tests, &mut private) {
                        Ok(_) => private,
                        Err(never) => match never {},
                    }
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("resolution thread panicked"))
            .collect()
    });

    for mut private in per_class {
        pass.append(&mut private);
    }

    assert_eq!(pass.len(), 2);
    assert!(pass.as_slice()[0].contains("illegal characters"));
    assert!(pass.as_slice()[1].contains("cannot be null or empty"));
}
