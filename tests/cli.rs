//
//  pantry-cli
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use assert_cmd::Command;
use predicates::prelude::*;

fn pantry() -> Command {
    let mut cmd = Command::cargo_bin("pantry").unwrap();
    cmd.env_remove("PANTRY_API_URL").env_remove("PANTRY_DEBUG");
    cmd
}

#[test]
fn test_help_lists_resource_commands() {
    pantry()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pantry"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("product"));
}

#[test]
fn test_version() {
    pantry()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("pantry version "));
}

#[test]
fn test_completion_bash() {
    pantry()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pantry"));
}

#[test]
fn test_config_get_unknown_key_fails() {
    pantry()
        .args(["config", "get", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_list_add_item_needs_product_or_name() {
    pantry()
        .args(["list", "add-item", "3"])
        .assert()
        .code(2);
}

#[test]
fn test_sort_direction_requires_sort_field() {
    pantry()
        .args(["pantry", "list", "--desc"])
        .assert()
        .code(2);
}
