use super::*;
use crate::options::Options;

fn registry() -> SettingsRegistry {
    create_settings_registry()
}

#[test]
fn bare_name_turns_boolean_on() {
    let mut options = Options::default();
    options.ignorecase = false;
    registry().execute(&mut options, "ignorecase", None).unwrap();
    assert!(options.ignorecase);
}

#[test]
fn no_prefix_turns_boolean_off() {
    let mut options = Options::default();
    options.number = true;
    registry().execute(&mut options, "nonumber", None).unwrap();
    assert!(!options.number);
}

#[test]
fn inv_prefix_toggles() {
    let mut options = Options::default();
    let initial = options.hlsearch;
    registry().execute(&mut options, "invhlsearch", None).unwrap();
    assert_eq!(options.hlsearch, !initial);
    registry().execute(&mut options, "invhlsearch", None).unwrap();
    assert_eq!(options.hlsearch, initial);
}

#[test]
fn numeric_value_coerces_to_integer() {
    let mut options = Options::default();
    registry()
        .execute(&mut options, "shiftwidth", Some("2"))
        .unwrap();
    assert_eq!(options.shiftwidth, 2);
}

#[test]
fn aliases_resolve() {
    let mut options = Options::default();
    registry().execute(&mut options, "sw", Some("8")).unwrap();
    assert_eq!(options.shiftwidth, 8);
    registry().execute(&mut options, "nonu", None).unwrap();
    assert!(!options.number);
}

#[test]
fn unique_prefix_resolves() {
    let mut options = Options::default();
    registry()
        .execute(&mut options, "timeoutlen", Some("500"))
        .unwrap();
    assert_eq!(options.timeoutlen, 500);
    registry().execute(&mut options, "timeo", Some("250")).unwrap();
    assert_eq!(options.timeoutlen, 250);
}

#[test]
fn unknown_option_is_an_error() {
    let mut options = Options::default();
    let err = registry()
        .execute(&mut options, "bogus", None)
        .unwrap_err();
    assert_eq!(err, SettingError::UnknownOption("bogus".to_string()));
}

#[test]
fn boolean_value_forms_parse() {
    let mut options = Options::default();
    registry()
        .execute(&mut options, "ignorecase", Some("off"))
        .unwrap();
    assert!(!options.ignorecase);
    registry()
        .execute(&mut options, "ignorecase", Some("yes"))
        .unwrap();
    assert!(options.ignorecase);
}

#[test]
fn integer_bounds_are_validated() {
    let mut options = Options::default();
    let err = registry()
        .execute(&mut options, "tabstop", Some("0"))
        .unwrap_err();
    assert!(matches!(err, SettingError::ValidationError(_)));
    assert_eq!(options.tabstop, Options::default().tabstop);

    let err = registry()
        .execute(&mut options, "tabstop", Some("nope"))
        .unwrap_err();
    assert!(matches!(err, SettingError::ParseError(_)));
}

#[test]
fn integer_option_requires_a_value() {
    let mut options = Options::default();
    let err = registry()
        .execute(&mut options, "shiftwidth", None)
        .unwrap_err();
    assert!(matches!(err, SettingError::ValidationError(_)));
}

#[test]
fn show_renders_current_values() {
    let options = Options::default();
    assert_eq!(registry().show(&options, "number").unwrap(), "number");
    assert_eq!(
        registry().show(&options, "relativenumber").unwrap(),
        "norelativenumber"
    );
    assert_eq!(registry().show(&options, "ts").unwrap(), "tabstop=8");
}
