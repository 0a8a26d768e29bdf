use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use similar::{ChangeTag, TextDiff};

struct Case {
    name: &'static str,
    args: &'static [&'static str],
}

const CASES: &[Case] = &[
    Case {
        name: "parse_utc",
        args: &[
            "parse",
            "--parser",
            "utc",
            "--app-tz",
            "Europe/Amsterdam",
            "--output-format",
            "json",
            "--input",
        ],
    },
    Case {
        name: "parse_locale",
        args: &[
            "parse",
            "--parser",
            "locale",
            "--app-tz",
            "UTC",
            "--output-format",
            "json",
            "--input",
        ],
    },
    Case {
        name: "format_planon",
        args: &[
            "format",
            "--target",
            "planon",
            "--app-tz",
            "UTC",
            "--output-format",
            "json",
            "--input",
        ],
    },
];

fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

fn fixture_dir() -> PathBuf {
    project_root().join("fixtures")
}

fn golden_dir() -> PathBuf {
    project_root().join("golden")
}

fn update_golden() -> bool {
    std::env::var("UPDATE_GOLDEN").is_ok()
}

fn diff_strings(expected: &str, actual: &str) -> String {
    let diff = TextDiff::from_lines(expected, actual);
    let mut out = String::new();
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        out.push_str(&format!("{sign}{change}"));
    }
    out
}

#[test]
fn golden_json_output() {
    let fixtures = fixture_dir();
    let golden = golden_dir();

    for case in CASES {
        let fixture_path = fixtures.join(format!("{}.txt", case.name));
        let golden_path = golden.join(format!("{}.json", case.name));

        let output = Command::new(env!("CARGO_BIN_EXE_tznorm"))
            .args(case.args)
            .arg(&fixture_path)
            .env_remove("APP_TIMEZONE")
            .output()
            .expect("Failed to execute tznorm");

        assert!(
            output.status.success(),
            "tznorm failed for {}: {}",
            case.name,
            String::from_utf8_lossy(&output.stderr)
        );

        let actual = String::from_utf8(output.stdout).expect("Output is not valid UTF-8");

        if update_golden() {
            fs::create_dir_all(&golden).ok();
            fs::write(&golden_path, &actual)
                .unwrap_or_else(|e| panic!("Failed to write golden file {golden_path:?}: {e}"));
            eprintln!("Updated golden file: {golden_path:?}");
            continue;
        }

        let expected = fs::read_to_string(&golden_path).unwrap_or_else(|e| {
            panic!(
                "Golden file {golden_path:?} not found: {e}\n\
                 Hint: Run with UPDATE_GOLDEN=1 to generate golden files"
            )
        });

        if actual != expected {
            let diff = diff_strings(&expected, &actual);
            panic!(
                "Golden test mismatch for {}:\n\n\
                 {diff}\n\n\
                 Run with UPDATE_GOLDEN=1 to refresh snapshots",
                case.name
            );
        }
    }
}

#[test]
fn rejects_foreign_offsets_with_input_exit_code() {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = Command::new(env!("CARGO_BIN_EXE_tznorm"))
        .args([
            "parse",
            "--parser",
            "utc",
            "--app-tz",
            "UTC",
            "--output-format",
            "text",
            "--input",
            "-",
        ])
        .env_remove("APP_TIMEZONE")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn tznorm");
    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(b"2024-01-01T00:00:00+02:00\n")
        .unwrap();
    let output = child.wait_with_output().expect("Failed to wait for tznorm");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("+02:00"), "stderr was: {stderr}");
}
