//! End-to-end coverage of the profile-aware loading algorithm, using
//! throwaway file trees.

use std::fs;

use tempfile::TempDir;
use vortex_core::env::{Environment, EnvironmentPublisher, Loader, LoaderOptions, Profile};
use vortex_core::format::spring;

fn write(dir: &TempDir, name: &str, contents: &str) {
    fs::write(dir.path().join(name), contents).unwrap();
}

fn run(dir: &TempDir, environment: &mut Environment) {
    let options = LoaderOptions::builder()
        .search_locations(vec![format!("file:{}/", dir.path().display())])
        .build()
        .unwrap();
    let mut loader = Loader::new(options);
    let result = loader.load(environment).unwrap();
    EnvironmentPublisher::publish(environment, &result);
}

#[test]
fn s1_single_file_no_profiles() {
    let dir = TempDir::new().unwrap();
    write(&dir, "application.properties", "a=1\n");

    let mut environment = Environment::new();
    run(&dir, &mut environment);

    assert_eq!(environment.get_str("a"), Some("1"));
    assert!(environment.active_profiles().is_empty());
}

#[test]
fn s2_profile_overlay() {
    let dir = TempDir::new().unwrap();
    write(&dir, "application.properties", "a=1\nb=1\n");
    write(&dir, "application-dev.properties", "a=2\n");

    let mut environment = Environment::new();
    environment.set_property(spring::PROFILES_ACTIVE, "dev");
    run(&dir, &mut environment);

    assert_eq!(environment.get_str("a"), Some("2"));
    assert_eq!(environment.get_str("b"), Some("1"));
    assert_eq!(environment.active_profiles(), &[Profile::new("dev")]);
}

#[test]
fn s3_include_discovery() {
    let dir = TempDir::new().unwrap();
    write(&dir, "application.properties", "placeholder=1\n");
    write(
        &dir,
        "application-dev.properties",
        "spring.profiles.include=db\n",
    );
    write(&dir, "application-db.properties", "x=1\n");

    let mut environment = Environment::new();
    environment.set_property(spring::PROFILES_ACTIVE, "dev");
    run(&dir, &mut environment);

    assert_eq!(environment.get_str("x"), Some("1"));
    let names: Vec<&str> = environment.active_profiles().iter().map(Profile::name).collect();
    assert!(names.contains(&"dev"));
    assert!(names.contains(&"db"));
}

#[test]
fn s4_default_profile_fallback_does_not_promote_to_active() {
    let dir = TempDir::new().unwrap();
    write(&dir, "application-default.properties", "k=v\n");

    let mut environment = Environment::new();
    run(&dir, &mut environment);

    assert_eq!(environment.get_str("k"), Some("v"));
    assert!(environment.active_profiles().is_empty());
}

#[test]
fn s5_location_precedence_prefers_most_specific_folder() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("application.properties"), "a=outer\n").unwrap();
    write(&dir, "application.properties", "a=inner\n");

    let mut environment = Environment::new();
    let options = LoaderOptions::builder()
        .search_locations(vec![
            format!("file:{}/", dir.path().display()),
            format!("file:{}/", config_dir.display()),
        ])
        .build()
        .unwrap();
    let mut loader = Loader::new(options);
    let result = loader.load(&mut environment).unwrap();
    EnvironmentPublisher::publish(&mut environment, &result);

    assert_eq!(environment.get_str("a"), Some("outer"));
}

#[test]
fn s6_multi_document_yaml_overrides_by_profile() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "application.yml",
        "a: 1\n---\nspring:\n  profiles: dev\na: 2\n",
    );

    let mut environment = Environment::new();
    environment.set_property(spring::PROFILES_ACTIVE, "dev");
    run(&dir, &mut environment);

    assert_eq!(environment.get("a").unwrap().as_i64(), Some(2));
}
