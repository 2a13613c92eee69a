//! Integration tests for ConfigResolver
//!
//! These tests verify:
//! - Descriptor loading (verbatim, no merging with defaults)
//! - Inference from gamemodes/ and legacy root sources
//! - Built-in defaults when nothing is present
//! - The is_project predicate
//! - Error reporting for malformed descriptors

use camino::{Utf8Path, Utf8PathBuf};
use ompcli::config::{ConfigResolver, default_project_config, default_server_config};
use ompcli::ConfigError;
use std::fs;
use tempfile::TempDir;

fn create_test_root() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, root)
}

fn touch(root: &Utf8Path, relative: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "main() {}").unwrap();
}

#[test]
fn test_empty_directory_is_not_a_project() {
    let (_temp_dir, root) = create_test_root();
    assert!(!ConfigResolver::new(&root).is_project());
}

#[test]
fn test_is_project_with_project_descriptor() {
    let (_temp_dir, root) = create_test_root();
    fs::write(root.join("project.json"), "{}").unwrap();
    assert!(ConfigResolver::new(&root).is_project());
}

#[test]
fn test_is_project_with_server_descriptor() {
    let (_temp_dir, root) = create_test_root();
    fs::write(root.join("config.json"), "{}").unwrap();
    assert!(ConfigResolver::new(&root).is_project());
}

#[test]
fn test_is_project_with_gamemodes_source() {
    let (_temp_dir, root) = create_test_root();
    let resolver = ConfigResolver::new(&root);

    fs::create_dir(root.join("gamemodes")).unwrap();
    assert!(!resolver.is_project(), "empty gamemodes/ is not enough");

    touch(&root, "gamemodes/freeroam.pwn");
    assert!(resolver.is_project());
}

#[test]
fn test_is_project_with_legacy_root_source() {
    let (_temp_dir, root) = create_test_root();
    touch(&root, "legacy.pwn");
    assert!(ConfigResolver::new(&root).is_project());
}

#[test]
fn test_non_source_files_do_not_qualify() {
    let (_temp_dir, root) = create_test_root();
    fs::write(root.join("readme.md"), "# gm").unwrap();
    fs::create_dir(root.join("gamemodes")).unwrap();
    fs::write(root.join("gamemodes/notes.inc"), "").unwrap();

    assert!(!ConfigResolver::new(&root).is_project());
}

#[test]
fn test_infer_from_gamemodes_source() {
    let (_temp_dir, root) = create_test_root();
    touch(&root, "gamemodes/foo.pwn");

    let config = ConfigResolver::new(&root).resolve_project().unwrap();

    assert_eq!(config.name, "foo");
    assert_eq!(
        Utf8PathBuf::from(&config.main_file),
        Utf8Path::new("gamemodes").join("foo.pwn")
    );
    assert_eq!(
        Utf8PathBuf::from(&config.output_file),
        Utf8Path::new("gamemodes").join("foo.amx")
    );
    assert_eq!(config.version, "1.0.0");
    assert_eq!(config.pawncc_path, "qawno");
}

#[test]
fn test_infer_first_lexical_match_wins() {
    let (_temp_dir, root) = create_test_root();
    touch(&root, "gamemodes/zombies.pwn");
    touch(&root, "gamemodes/deathmatch.pwn");
    touch(&root, "gamemodes/race.pwn");

    let config = ConfigResolver::new(&root).resolve_project().unwrap();
    assert_eq!(config.name, "deathmatch");
}

#[test]
fn test_gamemodes_source_beats_root_source() {
    let (_temp_dir, root) = create_test_root();
    touch(&root, "aaa_legacy.pwn");
    touch(&root, "gamemodes/modern.pwn");

    let config = ConfigResolver::new(&root).resolve_project().unwrap();
    assert_eq!(config.name, "modern");
}

#[test]
fn test_infer_from_legacy_root_source() {
    let (_temp_dir, root) = create_test_root();
    touch(&root, "oldschool.pwn");

    let config = ConfigResolver::new(&root).resolve_project().unwrap();

    assert_eq!(config.name, "oldschool");
    assert_eq!(config.main_file, "oldschool.pwn");
    assert_eq!(
        Utf8PathBuf::from(&config.output_file),
        Utf8Path::new("gamemodes").join("oldschool.amx")
    );
}

#[test]
fn test_defaults_without_any_sources() {
    let (_temp_dir, root) = create_test_root();

    let config = ConfigResolver::new(&root).resolve_project().unwrap();
    assert_eq!(config, default_project_config());

    let server = ConfigResolver::new(&root).resolve_server().unwrap();
    assert_eq!(server, default_server_config());
}

#[test]
fn test_descriptor_is_used_verbatim() {
    let (_temp_dir, root) = create_test_root();
    touch(&root, "gamemodes/inferred.pwn");
    fs::write(
        root.join("project.json"),
        r#"{
            "name": "declared",
            "version": "2.1.0",
            "main_file": "src/main.pwn",
            "output_file": "gamemodes/declared.amx",
            "resources": ["scriptfiles/motd.txt"],
            "plugins": [],
            "server_cfg": "server.cfg",
            "author": "Y_Less",
            "repository": "https://github.com/example/declared",
            "pawncc_path": ""
        }"#,
    )
    .unwrap();

    let config = ConfigResolver::new(&root).resolve_project().unwrap();

    assert_eq!(config.name, "declared");
    assert_eq!(config.main_file, "src/main.pwn");
    assert_eq!(config.resources, vec!["scriptfiles/motd.txt"]);
    assert_eq!(config.server_cfg, "server.cfg");
    // Empty compiler path stays empty, not the "qawno" default
    assert!(config.pawncc_path.is_empty());
}

#[test]
fn test_partial_descriptor_is_not_merged_with_defaults() {
    let (_temp_dir, root) = create_test_root();
    fs::write(root.join("config.json"), r#"{"hostname": "My Server", "port": 8192}"#).unwrap();

    let server = ConfigResolver::new(&root).resolve_server().unwrap();

    assert_eq!(server.hostname, "My Server");
    assert_eq!(server.port, 8192);
    assert_eq!(server.max_players, 0);
    assert!(server.gamemode.is_empty());
}

#[test]
fn test_malformed_descriptor_reports_parse_error() {
    let (_temp_dir, root) = create_test_root();
    fs::write(root.join("config.json"), r#"{"port": "not a number"}"#).unwrap();

    let err = ConfigResolver::new(&root).resolve_server().unwrap_err();
    match err {
        ConfigError::Parse { path, .. } => assert!(path.ends_with("config.json")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_resolution_is_idempotent() {
    let (_temp_dir, root) = create_test_root();
    touch(&root, "gamemodes/stable.pwn");
    let resolver = ConfigResolver::new(&root);

    assert_eq!(
        resolver.resolve_project().unwrap(),
        resolver.resolve_project().unwrap()
    );
    assert_eq!(
        resolver.resolve_server().unwrap(),
        resolver.resolve_server().unwrap()
    );
}

#[test]
fn test_resolution_rereads_disk() {
    let (_temp_dir, root) = create_test_root();
    touch(&root, "gamemodes/before.pwn");
    let resolver = ConfigResolver::new(&root);
    assert_eq!(resolver.resolve_project().unwrap().name, "before");

    fs::write(root.join("project.json"), r#"{"name": "after"}"#).unwrap();
    assert_eq!(resolver.resolve_project().unwrap().name, "after");
}

#[test]
fn test_null_fields_read_as_zero_values() {
    let (_temp_dir, root) = create_test_root();
    fs::write(
        root.join("project.json"),
        r#"{
            "name": "lvdm",
            "main_file": "gamemodes/lvdm.pwn",
            "resources": null,
            "plugins": null,
            "author": null,
            "repository": null
        }"#,
    )
    .unwrap();
    fs::write(
        root.join("config.json"),
        r#"{"hostname": null, "maxplayers": -1, "port": -7777, "plugins": null}"#,
    )
    .unwrap();

    let resolver = ConfigResolver::new(&root);

    let project = resolver.resolve_project().unwrap();
    assert_eq!(project.name, "lvdm");
    assert!(project.resources.is_empty());
    assert!(project.plugins.is_empty());
    assert!(project.author.is_empty());
    assert!(project.repository.is_empty());

    let server = resolver.resolve_server().unwrap();
    assert!(server.hostname.is_empty());
    assert_eq!(server.max_players, -1);
    assert_eq!(server.port, -7777);
    assert!(server.plugins.is_empty());
}
