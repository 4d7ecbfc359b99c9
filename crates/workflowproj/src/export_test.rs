use super::manifest_file_name;
use crate::{ErrorKind, ManifestObject, ProjectBuilder, ProjectError};
use sonataflow_api::{ConfigMap, SonataFlow};
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

const GREET_JSON: &str = r#"{
  "id": "greet",
  "start": "Hello",
  "states": [{"name": "Hello", "type": "inject", "data": {"greeting": "hi"}, "end": true}]
}"#;

fn source(contents: &str) -> Cursor<Vec<u8>> {
    Cursor::new(contents.as_bytes().to_vec())
}

fn full_builder() -> ProjectBuilder {
    ProjectBuilder::new("default")
        .with_workflow(source(GREET_JSON))
        .with_properties(source("quarkus.log.level=INFO"))
        .add_resource("petstore.json", source("{\"openapi\":\"3.0.0\"}"))
        .add_resource_at("input.schema.json", "schemas", source("{\"type\":\"object\"}"))
}

fn file_names(dir: &std::path::Path) -> Vec<String> {
    let mut names = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().to_string())
        .collect::<Vec<_>>();
    names.sort();
    names
}

#[test]
fn file_name_is_sequence_kind_and_name() {
    let mut config_map = ConfigMap::new("greet-props", "default");
    config_map.type_meta.kind = "ConfigMap".to_string();
    assert_eq!(
        manifest_file_name(4, &ManifestObject::ConfigMap(&config_map)),
        "04-configmap_greet-props.yaml"
    );
}

#[test]
fn export_writes_workflow_then_bundles_then_properties() {
    let dir = TempDir::new().expect("temp dir");
    let target = dir.path().join("nested").join("manifests");

    let written = full_builder().export(&target).expect("must export");

    let expected = vec![
        "01-sonataflow_greet.yaml",
        "02-configmap_01-greet-resources.yaml",
        "03-configmap_02-greet-resources.yaml",
        "04-configmap_greet-props.yaml",
    ];
    assert_eq!(file_names(&target), expected);
    let written_names = written
        .iter()
        .map(|path| path.file_name().expect("file name").to_string_lossy().to_string())
        .collect::<Vec<_>>();
    assert_eq!(written_names, expected);
}

#[test]
fn export_without_properties_has_no_gap() {
    let dir = TempDir::new().expect("temp dir");
    let mut builder = ProjectBuilder::new("default")
        .with_workflow(source(GREET_JSON))
        .add_resource("petstore.json", source("{}"));

    builder.export(dir.path()).expect("must export");
    assert_eq!(
        file_names(dir.path()),
        vec!["01-sonataflow_greet.yaml", "02-configmap_01-greet-resources.yaml"]
    );
}

#[test]
fn exported_manifests_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let mut builder = full_builder();
    builder.export(dir.path()).expect("must export");
    let project = builder.build().expect("cached project").clone();

    let workflow: SonataFlow = serde_yaml::from_str(
        &fs::read_to_string(dir.path().join("01-sonataflow_greet.yaml")).expect("read workflow"),
    )
    .expect("decode workflow");
    assert_eq!(workflow.type_meta, project.workflow.type_meta);
    assert_eq!(workflow.metadata, project.workflow.metadata);
    assert_eq!(workflow.spec.resources, project.workflow.spec.resources);
    assert_eq!(workflow.spec.flow, project.workflow.spec.flow);

    let bundle: ConfigMap = serde_yaml::from_str(
        &fs::read_to_string(dir.path().join("02-configmap_01-greet-resources.yaml"))
            .expect("read bundle"),
    )
    .expect("decode bundle");
    assert_eq!(bundle, project.resources[0]);

    let properties: ConfigMap = serde_yaml::from_str(
        &fs::read_to_string(dir.path().join("04-configmap_greet-props.yaml"))
            .expect("read properties"),
    )
    .expect("decode properties");
    assert_eq!(Some(properties), project.properties);
}

#[test]
fn parse_failure_writes_nothing() {
    let dir = TempDir::new().expect("temp dir");
    let target = dir.path().join("manifests");
    let mut builder = ProjectBuilder::new("default")
        .with_workflow(source(GREET_JSON))
        .add_resource("petstore.json", source(""));

    let err = builder.export(&target).expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::Content);
    assert!(!target.exists());
}

#[test]
fn export_is_not_transactional_across_files() {
    let dir = TempDir::new().expect("temp dir");
    // A directory squatting on the second manifest's name makes its rename fail.
    fs::create_dir(dir.path().join("02-configmap_01-greet-resources.yaml")).expect("blocker");

    let err = full_builder().export(dir.path()).expect_err("must fail");
    assert!(matches!(err, ProjectError::Write { .. }));
    assert_eq!(err.kind(), ErrorKind::Io);

    assert_eq!(
        file_names(dir.path()),
        vec!["01-sonataflow_greet.yaml", "02-configmap_01-greet-resources.yaml"]
    );
    assert!(dir.path().join("01-sonataflow_greet.yaml").is_file());
    assert!(dir.path().join("02-configmap_01-greet-resources.yaml").is_dir());
}

#[test]
fn repeated_export_reuses_the_project() {
    let first = TempDir::new().expect("temp dir");
    let second = TempDir::new().expect("temp dir");
    let mut builder = full_builder();

    builder.export(first.path()).expect("first export");
    builder.export(second.path()).expect("second export");

    for name in file_names(first.path()) {
        let left = fs::read_to_string(first.path().join(&name)).expect("first file");
        let right = fs::read_to_string(second.path().join(&name)).expect("second file");
        assert_eq!(left, right, "{name} differs");
    }
}

#[cfg(unix)]
#[test]
fn exported_manifests_are_readable_by_others() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().expect("temp dir");
    let written = full_builder().export(dir.path()).expect("must export");

    assert_eq!(written.len(), 4);
    for path in written {
        let mode = fs::metadata(&path).expect("metadata").permissions().mode() & 0o777;
        assert_eq!(mode, 0o644, "{} has mode {mode:o}", path.display());
    }
}

#[test]
fn name_with_path_separator_is_rejected_before_writing() {
    let dir = TempDir::new().expect("temp dir");
    let target = dir.path().join("manifests");
    let mut builder = ProjectBuilder::new("default")
        .with_workflow(source(GREET_JSON))
        .named("team/greet");

    let err = builder.export(&target).expect_err("must fail");
    assert!(matches!(err, ProjectError::InvalidName { ref name, .. } if name == "team/greet"));
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(!target.exists());
}
