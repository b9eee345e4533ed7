use anyhow::Result;
use deployment_items::{
    has_deployment_items, DeploymentResolver, DiscoverySummary, ManifestAttributeProvider,
    ResolverConfig, TestCase, Warnings,
};
use std::fs;
use tempfile::TempDir;

const MANIFEST: &str = r#"
[classes."Contoso.Tests.ImportTests"]
deployment_items = [
    { path = 'fixtures\schema.xsd', output_directory = "" },
    { path = 'fixtures\schema.xsd', output_directory = "" },
    { output_directory = "fixtures" },
]

[classes."Contoso.Tests.ImportTests".methods.ImportsLargeFile]
deployment_items = [
    { path = 'fixtures\schema.xsd', output_directory = "" },
    { path = 'fixtures\large.csv', output_directory = "data" },
    { path = 'fixtures\large.csv', output_directory = "backup" },
]

[classes."Contoso.Tests.ImportTests".methods.RejectsAbsoluteOutput]
deployment_items = [{ path = "fixtures", output_directory = 'C:\staging' }]

[classes."Contoso.Tests.PlainTests".methods.Runs]
deployment_items = []
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> Result<std::path::PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, content)?;
    Ok(path)
}

/// Manifest and config loaded from disk, one class resolved end to end.
#[test]
fn test_discover_class_from_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let manifest_path = write(&temp_dir, "deployment.toml", MANIFEST)?;
    let config_path = write(
        &temp_dir,
        "resolver.toml",
        "[validation]\npath_syntax = \"windows\"\n",
    )?;

    let provider = ManifestAttributeProvider::from_file(&manifest_path)?;
    let config = ResolverConfig::from_file(&config_path)?;
    let resolver = DeploymentResolver::from_config(provider, &config)?;

    let class = "Contoso.Tests.ImportTests";
    let mut test_cases = vec![
        TestCase::new(class, "ImportsLargeFile"),
        TestCase::new(class, "ImportsEmptyFile"),
        TestCase::new(class, "RejectsAbsoluteOutput"),
    ];
    let mut warnings = Warnings::new();

    let summary = resolver.discover_class(class, &mut test_cases, &mut warnings)?;

    assert_eq!(
        summary,
        DiscoverySummary {
            tests: 3,
            tests_with_items: 3,
            items: 5,
        }
    );

    // Null class-level path, then the absolute method-level output.
    assert_eq!(warnings.len(), 2);
    assert!(warnings.as_slice()[0].contains("cannot be null or empty"));
    assert!(warnings.as_slice()[1].contains(r#""C:\staging""#));

    let mut read_warnings = Warnings::new();
    let large = resolver.attached_items(&test_cases[0], &mut read_warnings)?;
    let rendered: Vec<String> = large.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            r"fixtures\schema.xsd -> .",
            r"fixtures\large.csv -> data",
            r"fixtures\large.csv -> backup",
        ]
    );
    assert!(read_warnings.is_empty());

    let empty = resolver.attached_items(&test_cases[1], &mut read_warnings)?;
    assert_eq!(empty.len(), 1);
    assert_eq!(empty[0].source_path(), r"fixtures\schema.xsd");

    Ok(())
}

#[test]
fn test_class_without_declarations_gets_no_property() -> Result<()> {
    let provider = ManifestAttributeProvider::from_toml_str(MANIFEST)?;
    let resolver = DeploymentResolver::from_config(provider, &ResolverConfig::default())?;
    let mut test_cases = vec![TestCase::new("Contoso.Tests.PlainTests", "Runs")];
    let mut warnings = Warnings::new();

    let summary =
        resolver.discover_class("Contoso.Tests.PlainTests", &mut test_cases, &mut warnings)?;

    assert_eq!(summary.tests_with_items, 0);
    assert!(!has_deployment_items(&test_cases[0]));
    assert!(test_cases[0].properties.is_empty());
    assert!(warnings.is_empty());
    Ok(())
}

#[test]
fn test_rediscovery_clears_stale_items() -> Result<()> {
    let class = "Contoso.Tests.ImportTests";
    let mut test_cases = vec![TestCase::new(class, "ImportsLargeFile")];
    let mut warnings = Warnings::new();

    let first = DeploymentResolver::from_config(
        ManifestAttributeProvider::from_toml_str(MANIFEST)?,
        &ResolverConfig::default(),
    )?;
    first.discover_class(class, &mut test_cases, &mut warnings)?;
    assert!(has_deployment_items(&test_cases[0]));

    let second = DeploymentResolver::from_config(
        ManifestAttributeProvider::new(),
        &ResolverConfig::default(),
    )?;
    second.discover_class(class, &mut test_cases, &mut warnings)?;
    assert!(!has_deployment_items(&test_cases[0]));
    Ok(())
}

#[test]
fn test_custom_messages_flow_into_warnings() -> Result<()> {
    let config = ResolverConfig::from_toml_str(
        r#"
[messages]
output_directory_not_relative = "absolute output '{output}' rejected"
"#,
    )?;
    let provider = ManifestAttributeProvider::from_toml_str(MANIFEST)?;
    let resolver = DeploymentResolver::from_config(provider, &config)?;
    let mut warnings = Warnings::new();

    let resolved = resolver.resolve_method(
        "Contoso.Tests.ImportTests",
        "RejectsAbsoluteOutput",
        &[],
        &mut warnings,
    )?;

    assert_eq!(resolved, None);
    assert_eq!(warnings.as_slice(), [r"absolute output 'C:\staging' rejected"]);
    Ok(())
}

#[test]
fn test_unix_syntax_accepts_windows_style_output() -> Result<()> {
    let config = ResolverConfig::from_toml_str("[validation]\npath_syntax = \"unix\"\n")?;
    let provider = ManifestAttributeProvider::from_toml_str(MANIFEST)?;
    let resolver = DeploymentResolver::from_config(provider, &config)?;
    let mut warnings = Warnings::new();

    let resolved = resolver.resolve_method(
        "Contoso.Tests.ImportTests",
        "RejectsAbsoluteOutput",
        &[],
        &mut warnings,
    )?;

    assert_eq!(resolved.map(|items| items.len()), Some(1));
    assert!(warnings.is_empty());
    Ok(())
}

#[test]
fn test_relaxed_method_validation_round_trips() -> Result<()> {
    let config = ResolverConfig::from_toml_str("[validation]\nvalidate_method_level = false\n")?;
    let provider = ManifestAttributeProvider::from_toml_str(MANIFEST)?;
    let resolver = DeploymentResolver::from_config(provider, &config)?;
    let class = "Contoso.Tests.ImportTests";
    let mut test_cases = vec![TestCase::new(class, "RejectsAbsoluteOutput")];
    let mut warnings = Warnings::new();

    resolver.discover_class(class, &mut test_cases, &mut warnings)?;
    // Only the null class-level path is reported.
    assert_eq!(warnings.len(), 1);

    let mut read_warnings = Warnings::new();
    let items = resolver.attached_items(&test_cases[0], &mut read_warnings)?;
    let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![r"fixtures\schema.xsd -> .", r"fixtures -> C:\staging"]
    );
    assert!(read_warnings.is_empty());
    Ok(())
}
