#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const USER: &str = "6f1d0b9e-4c1a-4b5e-9c61-0f3f4a0d2a10";

fn natal(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("natal").unwrap();
    cmd.current_dir(dir.path())
        .env("NATAL_ROOT", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let out = natal(dir).args(args).arg("--json").output().unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    serde_json::from_slice(&out.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// natal signs / sun / moon / rising
// ---------------------------------------------------------------------------

#[test]
fn signs_reference_fixture() {
    let dir = TempDir::new().unwrap();
    natal(&dir)
        .args(["signs", "--date", "1990-06-15", "--time", "10:15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gemini"))
        .stdout(predicate::str::contains("Libra"))
        .stdout(predicate::str::contains("Aquarius"));
}

#[test]
fn signs_json_uses_camel_case_keys() {
    let dir = TempDir::new().unwrap();
    let v = stdout_json(
        &dir,
        &["signs", "--date", "1990-06-15", "--time", "10:15", "--location", "Lisbon"],
    );
    assert_eq!(v["sunSign"], "Gemini");
    assert_eq!(v["moonSign"], "Libra");
    assert_eq!(v["risingSign"], "Aquarius");
}

#[test]
fn location_does_not_change_signs() {
    let dir = TempDir::new().unwrap();
    let a = stdout_json(&dir, &["signs", "--date", "1971-02-03", "--time", "04:05"]);
    let b = stdout_json(
        &dir,
        &["signs", "--date", "1971-02-03", "--time", "04:05", "--location", "Nairobi"],
    );
    assert_eq!(a, b);
}

#[test]
fn malformed_time_is_rejected() {
    let dir = TempDir::new().unwrap();
    for bad in ["25:99", "", "7:30"] {
        natal(&dir)
            .args(["signs", "--date", "1990-06-15", "--time", bad])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid birth time"));
    }
}

#[test]
fn malformed_date_is_rejected() {
    let dir = TempDir::new().unwrap();
    natal(&dir)
        .args(["sun", "1990-02-30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid birth date"));
}

#[test]
fn sun_boundaries() {
    let dir = TempDir::new().unwrap();
    for (date, sign) in [
        ("2001-03-20", "Pisces"),
        ("2001-03-21", "Aries"),
        ("2001-04-19", "Aries"),
        ("2001-04-20", "Taurus"),
        ("2001-12-22", "Capricorn"),
        ("2002-01-19", "Capricorn"),
    ] {
        natal(&dir)
            .args(["sun", date])
            .assert()
            .success()
            .stdout(format!("{sign}\n"));
    }
}

#[test]
fn moon_reports_day_of_year() {
    let dir = TempDir::new().unwrap();
    let v = stdout_json(&dir, &["moon", "1990-06-15"]);
    assert_eq!(v["dayOfYear"], 166);
    assert_eq!(v["cycle"], 6);
    assert_eq!(v["moonSign"], "Libra");
}

#[test]
fn rising_fixture() {
    let dir = TempDir::new().unwrap();
    natal(&dir)
        .args(["rising", "1990-06-15", "10:15"])
        .assert()
        .success()
        .stdout("Aquarius\n");
}

// ---------------------------------------------------------------------------
// natal sign
// ---------------------------------------------------------------------------

#[test]
fn sign_list_has_twelve_entries() {
    let dir = TempDir::new().unwrap();
    let v = stdout_json(&dir, &["sign", "list"]);
    let all = v.as_array().unwrap();
    assert_eq!(all.len(), 12);
    assert_eq!(all[0]["name"], "Aries");
    assert_eq!(all[11]["name"], "Pisces");
}

#[test]
fn sign_show_details() {
    let dir = TempDir::new().unwrap();
    natal(&dir)
        .args(["sign", "show", "Scorpio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Water"))
        .stdout(predicate::str::contains("Fixed"))
        .stdout(predicate::str::contains("Oct 23 – Nov 21"));
}

#[test]
fn sign_show_unknown_fails() {
    let dir = TempDir::new().unwrap();
    natal(&dir)
        .args(["sign", "show", "ophiuchus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not one of the twelve signs"));
}

// ---------------------------------------------------------------------------
// natal onboard
// ---------------------------------------------------------------------------

#[test]
fn onboard_emits_profile_update() {
    let dir = TempDir::new().unwrap();
    let v = stdout_json(
        &dir,
        &[
            "onboard", "--user-id", USER, "--name", " Ada ", "--date", "1990-06-15",
            "--time", "10:15", "--location", "Lisbon",
        ],
    );
    let profile = &v["profile"];
    assert_eq!(profile["id"], USER);
    assert_eq!(profile["display_name"], "Ada");
    assert_eq!(profile["birth_date"], "1990-06-15");
    assert_eq!(profile["birth_time"], "10:15");
    assert_eq!(profile["birth_location"], "Lisbon");
    assert_eq!(profile["sun_sign"], "Gemini");
    assert_eq!(profile["moon_sign"], "Libra");
    assert_eq!(profile["rising_sign"], "Aquarius");
    assert_eq!(profile["onboarding_completed"], true);
    assert_eq!(v["subscription"]["tier"], "free");
    assert_eq!(v["subscription"]["user_id"], USER);
}

#[test]
fn onboard_lists_every_problem() {
    let dir = TempDir::new().unwrap();
    natal(&dir)
        .args([
            "onboard", "--user-id", USER, "--date", "1850-01-01", "--time", "24:00",
            "--location", "X",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Name is required"))
        .stderr(predicate::str::contains(
            "Birth date must be between 1 January 1900 and today",
        ))
        .stderr(predicate::str::contains("HH:mm"))
        .stderr(predicate::str::contains("at least 2 characters"))
        .stderr(predicate::str::contains("4 problem(s)"));
}

#[test]
fn onboard_rejects_future_birth_date() {
    let dir = TempDir::new().unwrap();
    natal(&dir)
        .args([
            "onboard", "--user-id", USER, "--name", "Ada", "--date", "2999-01-01", "--time",
            "10:15", "--location", "Lisbon",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 January 1900 and today"));
}

#[test]
fn onboard_honours_configured_bounds() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".natal")).unwrap();
    std::fs::write(
        dir.path().join(".natal/config.yaml"),
        "validation:\n  max_display_name: 3\n",
    )
    .unwrap();
    natal(&dir)
        .args([
            "onboard", "--user-id", USER, "--name", "Adalyn", "--date", "1990-06-15",
            "--time", "10:15", "--location", "Lisbon",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Name must be 3 characters or fewer"));
}

#[test]
fn onboard_requires_valid_user_id() {
    let dir = TempDir::new().unwrap();
    natal(&dir)
        .args([
            "onboard", "--user-id", "not-a-uuid", "--name", "Ada", "--date", "1990-06-15",
            "--time", "10:15", "--location", "Lisbon",
        ])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// natal limits
// ---------------------------------------------------------------------------

#[test]
fn limits_free_by_default() {
    let dir = TempDir::new().unwrap();
    let v = stdout_json(&dir, &["limits"]);
    assert_eq!(v["isPremium"], false);
    assert_eq!(v["limits"]["max_reading_history"], 30);
    assert_eq!(v["limits"]["can_access_ppf"], false);
}

#[test]
fn limits_premium_and_lapsed() {
    let dir = TempDir::new().unwrap();
    let v = stdout_json(&dir, &["limits", "--tier", "premium"]);
    assert_eq!(v["isPremium"], true);
    assert!(v["limits"]["max_reading_history"].is_null());

    let v = stdout_json(&dir, &["limits", "--tier", "premium", "--inactive"]);
    assert_eq!(v["isPremium"], false);
    assert_eq!(v["limits"]["max_reading_history"], 30);

    natal(&dir)
        .args(["limits", "--tier", "gold"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tier 'gold'"));
}

// ---------------------------------------------------------------------------
// natal config
// ---------------------------------------------------------------------------

#[test]
fn config_init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    natal(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    assert!(dir.path().join(".natal/config.yaml").exists());

    natal(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn config_validate_requires_init() {
    let dir = TempDir::new().unwrap();
    natal(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));

    natal(&dir).args(["config", "init"]).assert().success();
    natal(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn config_validate_reports_errors() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".natal")).unwrap();
    std::fs::write(
        dir.path().join(".natal/config.yaml"),
        "validation:\n  min_location: 20\n  max_location: 10\n",
    )
    .unwrap();
    natal(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error]"));
}

#[test]
fn config_show_defaults_without_file() {
    let dir = TempDir::new().unwrap();
    let v = stdout_json(&dir, &["config", "show"]);
    assert_eq!(v["source"], "(defaults)");
    assert_eq!(v["config"]["validation"]["min_birth_date"], "1900-01-01");
}

#[test]
fn configured_json_output() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".natal")).unwrap();
    std::fs::write(dir.path().join(".natal/config.yaml"), "output:\n  json: true\n").unwrap();
    let out = natal(&dir).args(["sun", "1990-06-15"]).output().unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["sunSign"], "Gemini");
}
