//! Integration tests for the `bnw` CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bnw() -> Command {
    Command::cargo_bin("bnw").unwrap()
}

/// A temp directory holding the sample campaign written by `bnw init`.
fn sample_campaign() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("campaign.json");
    bnw().arg("init").arg(&path).assert().success();
    (dir, path)
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_writes_legacy_campaign() {
    let (_dir, path) = sample_campaign();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"body\""));
    assert!(text.contains("Phase Step"));
    assert!(!text.contains("traitMigrationComplete"));
}

#[test]
fn init_refuses_existing_file() {
    let (_dir, path) = sample_campaign();
    bnw()
        .arg("init")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

// ---------------------------------------------------------------------------
// migrate
// ---------------------------------------------------------------------------

#[test]
fn migrate_once_then_skip() {
    let (_dir, path) = sample_campaign();
    bnw()
        .args(["migrate", "-f"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 actor(s), 2 item(s)"));

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"strength\""));
    assert!(text.contains("\"smarts\""));
    assert!(!text.contains("\"body\""));
    assert!(text.contains("traitMigrationComplete"));

    bnw()
        .args(["migrate", "-f"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("already complete"));
}

#[test]
fn migrate_as_player_changes_nothing() {
    let (_dir, path) = sample_campaign();
    let before = fs::read_to_string(&path).unwrap();
    bnw()
        .args(["migrate", "--player", "-f"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Only the game master"));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn migrate_missing_file_fails() {
    bnw()
        .args(["migrate", "-f", "/nonexistent/campaign.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// ---------------------------------------------------------------------------
// sheet
// ---------------------------------------------------------------------------

#[test]
fn sheet_shows_migrated_traits_and_powers() {
    let (_dir, path) = sample_campaign();
    bnw()
        .args(["sheet", "NOVA", "-f"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Strength"))
        .stdout(predicate::str::contains("Smarts"))
        .stdout(predicate::str::contains("Brawl"))
        .stdout(predicate::str::contains("Phase Step"))
        .stdout(predicate::str::contains("Stealth (Speed)"));
}

#[test]
fn sheet_unknown_actor_fails() {
    let (_dir, path) = sample_campaign();
    bnw()
        .args(["sheet", "Nobody", "-f"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown actor: Nobody"));
}

// ---------------------------------------------------------------------------
// roll
// ---------------------------------------------------------------------------

#[test]
fn roll_with_explicit_target() {
    let (_dir, path) = sample_campaign();
    bnw()
        .args(["roll", "nova", "strength", "brawl", "--target", "7", "--seed", "42"])
        .args(["--json", "-f"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pool\": 5"))
        .stdout(predicate::str::contains("\"target\": 7"))
        .stdout(predicate::str::contains("\"title\": \"Brawl (Strength)\""))
        .stdout(predicate::str::contains("\"trait\": \"strength\""));
}

#[test]
fn roll_is_repeatable_with_seed() {
    let (_dir, path) = sample_campaign();
    let run = || {
        let out = bnw()
            .args(["roll", "nova", "speed", "stealth", "-t", "6", "-s", "7", "--json", "-f"])
            .arg(&path)
            .output()
            .unwrap();
        assert!(out.status.success());
        String::from_utf8(out.stdout).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn roll_reads_target_from_stdin() {
    let (_dir, path) = sample_campaign();
    bnw()
        .args(["roll", "nova", "smarts", "science", "--json", "-f"])
        .arg(&path)
        .write_stdin("9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"target\": 9"))
        .stderr(predicate::str::contains("Science / Smarts"));
}

#[test]
fn roll_blank_answer_takes_configured_default() {
    let (dir, path) = sample_campaign();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"default_target": 9}"#).unwrap();
    bnw()
        .args(["roll", "nova", "spirit", "--json", "-f"])
        .arg(&path)
        .arg("--config")
        .arg(&config)
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"target\": 9"));
}

#[test]
fn roll_cancelled_on_end_of_input() {
    let (_dir, path) = sample_campaign();
    bnw()
        .args(["roll", "nova", "strength", "-f"])
        .arg(&path)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Roll cancelled."));
}

#[test]
fn roll_unknown_trait_fails() {
    let (_dir, path) = sample_campaign();
    bnw()
        .args(["roll", "nova", "luck", "--target", "7", "-f"])
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Unknown trait: luck"))
        .stderr(predicate::str::contains("error: unknown trait: luck"));
}

#[test]
fn roll_unknown_skill_rolls_trait_only() {
    let (_dir, path) = sample_campaign();
    bnw()
        .args(["roll", "nova", "strength", "juggling", "--target", "7", "--json", "-f"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pool\": 3"))
        .stderr(predicate::str::contains("Unknown skill: juggling"));
}

#[test]
fn roll_negative_bonus_keeps_one_die() {
    let (_dir, path) = sample_campaign();
    bnw()
        .args(["roll", "nova", "spirit", "--bonus", "-10", "--target", "2", "--json", "-f"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pool\": 1"))
        .stdout(predicate::str::contains("\"bonus_dice\": null"));
}

#[test]
fn roll_huge_bonus_is_refused() {
    let (_dir, path) = sample_campaign();
    bnw()
        .args(["roll", "nova", "strength", "--bonus", "5000000000", "-t", "7", "-f"])
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Pool of 4294967295 dice exceeds the limit of 100",
        ))
        .stderr(predicate::str::contains("error: pool of 4294967295 dice"));
}

#[test]
fn roll_formatted_card() {
    let (_dir, path) = sample_campaign();
    bnw()
        .args(["roll", "nova", "strength", "--label", "Lift the Truck", "-t", "4", "-f"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Lift the Truck"))
        .stdout(predicate::str::contains("highest:"));
}

// ---------------------------------------------------------------------------
// power
// ---------------------------------------------------------------------------

#[test]
fn power_roll_uses_item_fields() {
    let (_dir, path) = sample_campaign();
    bnw()
        .args(["power", "nova", "phase step", "--target", "5", "--json", "-f"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Phase Step\""))
        .stdout(predicate::str::contains("\"pool\": 5"))
        .stdout(predicate::str::contains("\"bonus_dice\": 1"))
        .stdout(predicate::str::contains("\"trait\": \"speed\""));
}

#[test]
fn power_unknown_item_fails() {
    let (_dir, path) = sample_campaign();
    bnw()
        .args(["power", "nova", "Laser Eyes", "--target", "5", "-f"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown item: Laser Eyes"));
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn invalid_config_is_rejected() {
    let (dir, path) = sample_campaign();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"min_target": 1}"#).unwrap();
    bnw()
        .args(["sheet", "nova", "-f"])
        .arg(&path)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}
