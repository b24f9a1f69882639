//! Integration tests for Settings config loading.
//!
//! Note: These tests pass an explicit config file from a temp directory;
//! a global config on the test machine would be layered underneath.

use std::fs;

use tempfile::TempDir;

use xml2conf::application::ApplicationError;
use xml2conf::config::Settings;
use xml2conf::domain::AbsOperands;
use xml2conf::infrastructure::di::ServiceContainer;

#[test]
fn given_explicit_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("xml2conf.toml");
    fs::write(
        &path,
        r#"
[translate]
abs_operands = "exactly-one"

[output]
trailing_newline = true
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(path.as_path())).expect("load settings");

    // Assert
    assert_eq!(settings.translate.abs_operands, AbsOperands::ExactlyOne);
    assert!(settings.output.trailing_newline);
}

#[test]
fn given_missing_explicit_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let result = Settings::load(Some(dir.path().join("nope.toml").as_path()));
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_invalid_value_when_load_then_config_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[translate]\nabs_operands = \"all\"\n").unwrap();

    match Settings::load(Some(path.as_path())) {
        Err(ApplicationError::Config { message }) => {
            assert!(message.contains("bad.toml"), "message: {message}")
        }
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn given_strict_settings_when_container_builds_service_then_service_is_strict() {
    let settings = Settings::default().merge_with(
        &toml::from_str("[translate]\nabs_operands = \"exactly-one\"\n").unwrap(),
    );
    let container = ServiceContainer::new(settings);

    let result = container.translate_service().translate_source(
        r#"<c><expression operation="abs"><operands><operand>1</operand><operand>2</operand></operands></expression></c>"#,
    );

    assert!(matches!(result, Err(ApplicationError::Domain(_))));
}

#[test]
fn given_trim_text_settings_when_container_builds_service_then_text_is_trimmed() {
    let mut settings = Settings::default();
    settings.loader.trim_text = true;
    let container = ServiceContainer::new(settings);

    let text = container
        .translate_service()
        .translate_source("<c><constant name=\"x\"><value type=\"string\">\n  padded\n</value></constant></c>")
        .unwrap();

    assert_eq!(text, "x is \"padded\"");
}
