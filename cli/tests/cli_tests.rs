use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const ROLE_TABLE: &str = r#"id: roles
name: Test roles
description: Reduced role table for CLI tests
version: 1.0.0
role_ids:
  7: dealer
  8: buyer
permissions:
  dealer: [listing.view, listing.create, showroom.manage]
  buyer: [listing.view]
landing:
  dealer: /dealer-home
"#;

/// Helper to build a command isolated from the caller's environment
fn accessctl(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("accessctl").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("ACCESS_ROLE_TABLE")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper function to create a directory holding a role table
fn create_role_table(content: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("roles.yaml"), content).unwrap();
    temp_dir
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    accessctl(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Access CLI"))
        .stdout(predicate::str::contains("landing"));
}

#[test]
fn test_cli_version() {
    let dir = TempDir::new().unwrap();
    accessctl(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("accessctl"));
}

#[test]
fn test_roles_text() {
    let dir = TempDir::new().unwrap();
    accessctl(&dir)
        .arg("roles")
        .assert()
        .success()
        .stdout(predicate::str::contains("Marketplace Roles"))
        .stdout(predicate::str::contains("super_admin"))
        .stdout(predicate::str::contains("/showroom-dashboard"))
        .stdout(predicate::str::contains("Total roles:"));
}

#[test]
fn test_roles_json() {
    let dir = TempDir::new().unwrap();
    let output = accessctl(&dir)
        .args(["roles", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let table: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(table["role_ids"]["5"], "dealer");
    assert_eq!(table["landing"]["dealer"], "/showroom-dashboard");
    assert!(table["permissions"]["guest"]
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p != "listing.create"));
}

#[test]
fn test_check_allowed_and_denied() {
    let dir = TempDir::new().unwrap();
    accessctl(&dir)
        .args(["check", "--permission", "listing.create", "--role-id", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ALLOWED"))
        .stdout(predicate::str::contains("seller"));

    accessctl(&dir)
        .args(["check", "--permission", "listing.create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DENIED"))
        .stdout(predicate::str::contains("guest"));
}

#[test]
fn test_check_unknown_token_is_denied() {
    let dir = TempDir::new().unwrap();
    accessctl(&dir)
        .args(["check", "--permission", "listing.fly", "--role-id", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DENIED"));
}

#[test]
fn test_check_json() {
    let dir = TempDir::new().unwrap();
    let output = accessctl(&dir)
        .args([
            "check",
            "--permission",
            "admin.settings",
            "--role-id",
            "9999",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let result: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(result["role"], "guest");
    assert_eq!(result["granted"], false);
}

#[test]
fn test_route_without_requirements_renders() {
    let dir = TempDir::new().unwrap();
    accessctl(&dir)
        .args(["route", "--path", "/about"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RENDER"));
}

#[test]
fn test_route_any_of_requirements() {
    let dir = TempDir::new().unwrap();
    accessctl(&dir)
        .args([
            "route",
            "--require",
            "showroom.manage,garage.services.manage",
            "--role-id",
            "6",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("RENDER"));
}

#[test]
fn test_route_redirect_remembers_location_for_visitors() {
    let dir = TempDir::new().unwrap();
    let output = accessctl(&dir)
        .args([
            "route",
            "--require",
            "listing.create",
            "--path",
            "/listings/new",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let result: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(result["result"]["decision"], "redirect");
    assert_eq!(result["result"]["to"], "/login");
    assert_eq!(result["result"]["remember"], "/listings/new");
    assert_eq!(result["navigations"].as_array().unwrap().len(), 1);
}

#[test]
fn test_route_unmapped_role_is_redirected() {
    let dir = TempDir::new().unwrap();
    accessctl(&dir)
        .args([
            "route",
            "--require",
            "admin.settings",
            "--role-id",
            "9999",
            "--fallback",
            "/unauthorized",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("REDIRECT"))
        .stdout(predicate::str::contains("/unauthorized"));
}

#[test]
fn test_route_rejects_unknown_requirement() {
    let dir = TempDir::new().unwrap();
    accessctl(&dir)
        .args(["route", "--require", "admin.everything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown permission"));
}

#[test]
fn test_landing_priority_chain() {
    let dir = TempDir::new().unwrap();

    accessctl(&dir)
        .args([
            "landing",
            "--role-id",
            "5",
            "--redirect-to",
            "/foo",
            "--remembered",
            "/bar",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("/foo"))
        .stdout(predicate::str::contains("query_redirect"));

    accessctl(&dir)
        .args(["landing", "--role-id", "5", "--remembered", "/bar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/bar"))
        .stdout(predicate::str::contains("remembered_location"));

    accessctl(&dir)
        .args(["landing", "--role-id", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/showroom-dashboard"))
        .stdout(predicate::str::contains("role_default"));
}

#[test]
fn test_config_flag_loads_role_table() {
    let dir = create_role_table(ROLE_TABLE);

    accessctl(&dir)
        .args(["--config", "roles.yaml", "landing", "--role-id", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/dealer-home"));

    // Role id 5 is not mapped in this table
    accessctl(&dir)
        .args(["--config", "roles.yaml", "check", "-p", "showroom.manage", "-r", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DENIED"));
}

#[test]
fn test_config_from_environment() {
    let dir = create_role_table(ROLE_TABLE);

    accessctl(&dir)
        .env("ACCESS_ROLE_TABLE", dir.path().join("roles.yaml"))
        .args(["check", "--permission", "showroom.manage", "--role-id", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ALLOWED"));
}

#[test]
fn test_config_from_dotenv_file() {
    let dir = create_role_table(ROLE_TABLE);
    fs::write(dir.path().join(".env"), "ACCESS_ROLE_TABLE=roles.yaml\n").unwrap();

    accessctl(&dir)
        .args(["landing", "--role-id", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/dealer-home"));
}

#[test]
fn test_invalid_role_table_fails() {
    let dir = create_role_table(
        "id: roles\nname: Broken\nversion: 1.0.0\npermissions:\n  buyer: [listing.fly]\n",
    );

    accessctl(&dir)
        .args(["--config", "roles.yaml", "roles"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load role table"))
        .stderr(predicate::str::contains("Unknown permission"));
}

#[test]
fn test_verbose_flag() {
    let dir = TempDir::new().unwrap();
    accessctl(&dir)
        .args(["--verbose", "roles"])
        .assert()
        .success();
}
