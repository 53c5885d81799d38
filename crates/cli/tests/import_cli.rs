// End-to-end tests through the built `jdhub` binary.
//
// Each test runs in its own temp dir with JDHUB_CONFIG pointed at a file
// that does not exist, so the developer's own settings never leak in.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const REFERENCE: &str = r#"{
    "locations": [{"id": "loc-hq", "name": "HQ"}],
    "departments": [{"id": "dep-it", "name": "IT"}, {"id": "dep-sales", "name": "Sales"}],
    "teams": [
        {"id": "team-dev", "name": "Dev", "department_id": "dep-it"},
        {"id": "team-ops", "name": "Ops", "department_id": "dep-sales"}
    ],
    "job_grades": [{"id": "jg-11", "name": "JG 1.1"}],
    "users": [{"email": "existing@x.com"}]
}"#;

const HEADER: &str = "email,full_name,role,job_grade,types_name,department_name,team_name\n";

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    fn new() -> Self {
        let ws = Self { dir: tempfile::tempdir().unwrap() };
        ws.write("reference.json", REFERENCE);
        ws
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn jdhub(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_jdhub"));
        cmd.current_dir(self.dir.path())
            .env("JDHUB_CONFIG", self.path("no-settings.toml"))
            .env_remove("JDHUB_REFERENCE")
            .env_remove("JDHUB_LOG")
            .env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.jdhub().args(args).output().expect("run jdhub")
    }
}

fn code(output: &Output) -> i32 {
    output.status.code().expect("exit code")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn exists(path: &Path) -> bool {
    path.try_exists().unwrap()
}

// ===========================================================================
// jdhub review
// ===========================================================================

#[test]
fn review_clean_sheet_exits_zero() {
    let ws = Workspace::new();
    ws.write("users.csv", &format!("{HEADER}a@x.com,A B,viewer,1.1,HQ,IT,Dev\n"));

    let out = ws.run(&["review", "users.csv", "--reference", "reference.json"]);
    assert_eq!(code(&out), 0, "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("a@x.com"));
    assert!(stderr(&out).contains("1 rows: 1 valid, 0 invalid"));
}

#[test]
fn review_invalid_rows_exit_three_with_json_report() {
    let ws = Workspace::new();
    ws.write(
        "users.csv",
        &format!(
            "{HEADER}a@x.com,A B,viewer,1.1,HQ,IT,Dev\n\
             a@x.com,A B,viewer,9.9,HQ,IT,Dev\n\
             a@x.com,A B,viewer,1.1,HQ,Finance,\n"
        ),
    );

    let out = ws.run(&["review", "users.csv", "--reference", "reference.json", "--json"]);
    assert_eq!(code(&out), 3, "stderr: {}", stderr(&out));

    let report: serde_json::Value = serde_json::from_str(stdout(&out).trim()).expect("single JSON value");
    assert_eq!(report["summary"]["total"], 3);
    assert_eq!(report["summary"]["valid"], 1);
    assert_eq!(report["summary"]["invalid"], 2);

    let rows = report["rows"].as_array().unwrap();
    assert_eq!(rows[0]["row_number"], 2);
    assert_eq!(rows[0]["resolved"]["teamId"], "team-dev");
    assert!(rows[1]["errors"][0].as_str().unwrap().starts_with("invalid job grade"));
    assert_eq!(rows[2]["errors"][0], "department not found: Finance");
    assert_eq!(rows[2]["errors"].as_array().unwrap().len(), 2);
    assert!(rows[2].get("resolved").is_none());
    assert_eq!(rows[0]["fields"]["email"], "a@x.com");
    assert!(rows[0]["fields"].get("row_number").is_none());
}

#[test]
fn review_writes_csv_report() {
    let ws = Workspace::new();
    ws.write("users.csv", &format!("{HEADER}existing@x.com,Dup,admin,,HQ,Sales,ops\n"));

    let out = ws.run(&["review", "users.csv", "--reference", "reference.json", "--csv", "review.csv"]);
    assert_eq!(code(&out), 3);

    let text = std::fs::read_to_string(ws.path("review.csv")).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("row,email,full_name,role,job_grade,types_name,department_name,team_name,valid,errors")
    );
    let line = lines.next().unwrap();
    assert!(line.starts_with("2,existing@x.com,Dup,admin,"));
    assert!(line.ends_with("false,email already registered: existing@x.com"));
}

#[test]
fn review_reference_from_env() {
    let ws = Workspace::new();
    ws.write("users.csv", &format!("{HEADER}b@x.com,B,manager,,hq,sales,OPS\n"));

    let out = ws
        .jdhub()
        .env("JDHUB_REFERENCE", ws.path("reference.json"))
        .args(["review", "users.csv"])
        .output()
        .unwrap();
    assert_eq!(code(&out), 0, "stderr: {}", stderr(&out));
}

#[test]
fn review_reference_from_settings_file() {
    let ws = Workspace::new();
    ws.write("settings.toml", "reference_path = \"reference.json\"\n");
    ws.write("users.csv", &format!("{HEADER}b@x.com,B,manager,,HQ,Sales,Ops\n"));

    let out = ws
        .jdhub()
        .env("JDHUB_CONFIG", ws.path("settings.toml"))
        .args(["review", "users.csv"])
        .output()
        .unwrap();
    assert_eq!(code(&out), 0, "stderr: {}", stderr(&out));
}

#[test]
fn review_without_reference_is_usage_error() {
    let ws = Workspace::new();
    ws.write("users.csv", &format!("{HEADER}a@x.com,A,viewer,,HQ,IT,Dev\n"));

    let out = ws.run(&["review", "users.csv"]);
    assert_eq!(code(&out), 2);
    assert!(stderr(&out).contains("no reference snapshot given"));
    assert!(stderr(&out).contains("hint:"));
}

#[test]
fn review_unreadable_inputs() {
    let ws = Workspace::new();
    ws.write("header_only.csv", HEADER);
    ws.write("users.pdf", "%PDF");

    assert_eq!(code(&ws.run(&["review", "missing.csv", "--reference", "reference.json"])), 4);
    assert_eq!(code(&ws.run(&["review", "users.pdf", "--reference", "reference.json"])), 4);

    let out = ws.run(&["review", "header_only.csv", "--reference", "reference.json"]);
    assert_eq!(code(&out), 4);
    assert!(stderr(&out).contains("no data rows"));
}

#[test]
fn review_invalid_reference_exits_five() {
    let ws = Workspace::new();
    ws.write("users.csv", &format!("{HEADER}a@x.com,A,viewer,,HQ,IT,Dev\n"));
    ws.write("broken.json", "{");
    ws.write("wrong_shape.json", r#"{"locations": "HQ"}"#);

    assert_eq!(code(&ws.run(&["review", "users.csv", "--reference", "broken.json"])), 5);
    assert_eq!(code(&ws.run(&["review", "users.csv", "--reference", "wrong_shape.json"])), 5);
}

#[test]
fn review_tolerates_duplicate_reference_names() {
    let ws = Workspace::new();
    ws.write("users.csv", &format!("{HEADER}a@x.com,A B,viewer,1.1,hq,IT,Dev\n"));
    ws.write(
        "dup.json",
        r#"{
            "locations": [{"id": "loc-a", "name": "HQ"}, {"id": "loc-b", "name": " hq "}],
            "departments": [{"id": "dep-it", "name": "IT"}],
            "teams": [{"id": "team-dev", "name": "Dev", "department_id": "dep-it"}],
            "job_grades": [{"id": "jg-11", "name": "JG 1.1"}]
        }"#,
    );

    let out = ws.run(&["review", "users.csv", "--reference", "dup.json", "--json"]);
    assert_eq!(code(&out), 0, "stderr: {}", stderr(&out));
    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(report["rows"][0]["resolved"]["locationId"], "loc-a");
}

#[test]
fn review_flags_rows_naming_an_orphan_team() {
    let ws = Workspace::new();
    ws.write(
        "users.csv",
        &format!(
            "{HEADER}a@x.com,A B,viewer,1.1,HQ,IT,Dev\n\
             b@x.com,B C,viewer,1.1,HQ,IT,Legacy\n"
        ),
    );
    ws.write(
        "orphan.json",
        r#"{
            "locations": [{"id": "loc-hq", "name": "HQ"}],
            "departments": [{"id": "dep-it", "name": "IT"}],
            "teams": [
                {"id": "team-dev", "name": "Dev", "department_id": "dep-it"},
                {"id": "team-old", "name": "Legacy", "department_id": "gone"}
            ],
            "job_grades": [{"id": "jg-11", "name": "JG 1.1"}]
        }"#,
    );

    let out = ws.run(&["review", "users.csv", "--reference", "orphan.json", "--json"]);
    assert_eq!(code(&out), 3, "stderr: {}", stderr(&out));
    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(report["summary"]["valid"], 1);
    assert_eq!(report["summary"]["invalid"], 1);
    assert_eq!(report["rows"][1]["valid"], false);
    assert_eq!(report["rows"][1]["errors"][0], "team not found: Legacy in department: IT");
}

// ===========================================================================
// jdhub commit
// ===========================================================================

#[test]
fn commit_writes_valid_subset() {
    let ws = Workspace::new();
    ws.write(
        "users.csv",
        &format!(
            "{HEADER}a@x.com,A B,viewer,1.1,HQ,IT,Dev\n\
             bad-email,C,viewer,,HQ,IT,Dev\n\
             b@x.com,B,admin,5,HQ,Sales,Ops\n"
        ),
    );

    let out = ws.run(&["commit", "users.csv", "--reference", "reference.json", "--payload", "out.json"]);
    assert_eq!(code(&out), 0, "stderr: {}", stderr(&out));
    assert!(stderr(&out).contains("imported 2 users"));
    assert!(stderr(&out).contains("1 invalid rows skipped"));

    let payload: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(ws.path("out.json")).unwrap()).unwrap();
    let users = payload.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["email"], "a@x.com");
    assert_eq!(users[0]["jobGrade"], "1.1");
    assert_eq!(users[1]["role"], "admin");
    assert_eq!(users[1]["departmentId"], "dep-sales");
    assert_eq!(users[1]["teamId"], "team-ops");
}

#[test]
fn commit_with_no_valid_rows_exits_six() {
    let ws = Workspace::new();
    ws.write("users.csv", &format!("{HEADER}existing@x.com,A,viewer,,HQ,IT,Dev\n"));

    let out = ws.run(&["commit", "users.csv", "--reference", "reference.json", "--payload", "out.json"]);
    assert_eq!(code(&out), 6);
    assert!(!exists(&ws.path("out.json")));
}

#[test]
fn commit_sink_failure_exits_seven() {
    let ws = Workspace::new();
    ws.write("users.csv", &format!("{HEADER}a@x.com,A,viewer,,HQ,IT,Dev\n"));

    let out = ws.run(&[
        "commit",
        "users.csv",
        "--reference",
        "reference.json",
        "--payload",
        "missing-dir/out.json",
    ]);
    assert_eq!(code(&out), 7);
    assert!(stderr(&out).contains("cannot write"));
}

// ===========================================================================
// jdhub template / reference check
// ===========================================================================

#[test]
fn template_then_review_round_trip() {
    let ws = Workspace::new();

    let out = ws.run(&["template", "--reference", "reference.json"]);
    assert_eq!(code(&out), 0, "stderr: {}", stderr(&out));
    assert!(exists(&ws.path("user_import_template.xlsx")));

    let out = ws.run(&["review", "user_import_template.xlsx", "--reference", "reference.json"]);
    assert_eq!(code(&out), 0, "stderr: {}", stderr(&out));
    assert!(stderr(&out).contains("3 rows: 3 valid, 0 invalid"));
}

#[test]
fn template_without_reference_uses_defaults() {
    let ws = Workspace::new();
    let out = ws.run(&["template", "-o", "blank.xlsx"]);
    assert_eq!(code(&out), 0, "stderr: {}", stderr(&out));
    assert!(exists(&ws.path("blank.xlsx")));
}

#[test]
fn reference_check_prints_counts() {
    let ws = Workspace::new();
    let out = ws.run(&["reference", "check", "reference.json"]);
    assert_eq!(code(&out), 0, "stderr: {}", stderr(&out));

    let text = stdout(&out);
    assert!(text.contains("locations:   1"));
    assert!(text.contains("departments: 2"));
    assert!(text.contains("teams:       2"));
    assert!(text.contains("users:       1"));
}

#[test]
fn reference_check_skips_orphan_team() {
    let ws = Workspace::new();
    ws.write(
        "orphan.json",
        r#"{"teams": [{"id": "t1", "name": "Dev", "department_id": "gone"}]}"#,
    );
    let out = ws.run(&["reference", "check", "orphan.json"]);
    assert_eq!(code(&out), 0, "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("teams:       0"));
    assert!(stdout(&out).contains("skipped:     1"));
}
