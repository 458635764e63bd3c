use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_slidesmith"))
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn long_slide(lines: usize, blank_at: usize) -> String {
    (1..=lines)
        .map(|n| {
            if n == blank_at {
                String::new()
            } else {
                format!("point {}", n)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_split_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let deck_path = temp_dir.path().join("slides.md");
    let deck = format!("# Title\n---\n{}\n---\n## End\n", long_slide(50, 38));
    fs::write(&deck_path, &deck).expect("Failed to write deck");

    let output = run_command(&["split", deck_path.to_str().unwrap()]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Slide 2: split from 50 lines into 2 slides"));
    assert!(stdout.contains("Total modifications: 1"));

    let rewritten = fs::read_to_string(&deck_path).expect("Failed to read deck");
    assert_eq!(rewritten.matches("\n---\n").count(), 3);
    assert!(rewritten.starts_with("# Title\n"));
    assert!(rewritten.ends_with("## End\n"));
}

#[test]
fn test_split_command_respects_max_lines() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let deck_path = temp_dir.path().join("slides.md");
    fs::write(&deck_path, long_slide(30, 18)).expect("Failed to write deck");

    let output = run_command(&["split", deck_path.to_str().unwrap(), "--max-lines", "20"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let rewritten = fs::read_to_string(&deck_path).expect("Failed to read deck");
    assert_eq!(rewritten.matches("\n---\n").count(), 1);
}

#[test]
fn test_split_command_leaves_short_deck_alone() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let deck_path = temp_dir.path().join("slides.md");
    let deck = "# Short\n---\n- one\n- two\n";
    fs::write(&deck_path, deck).expect("Failed to write deck");

    let output = run_command(&["split", deck_path.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Total modifications: 0"));
    assert_eq!(fs::read_to_string(&deck_path).unwrap(), deck);
}

#[test]
fn test_split_command_rejects_zero_max_lines() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let deck_path = temp_dir.path().join("slides.md");
    fs::write(&deck_path, "# Deck\n").expect("Failed to write deck");

    let output = run_command(&["split", deck_path.to_str().unwrap(), "--max-lines", "0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("max_lines"));
}

#[test]
fn test_missing_file_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("nope.md");

    let output = run_command(&["wrap", missing.to_str().unwrap()]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error processing"));
    assert!(stderr.contains("1 of 1 files failed"));
    assert_eq!(stderr.lines().filter(|l| l.contains("nope.md")).count(), 1);
}

#[test]
fn test_wrap_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let deck_path = temp_dir.path().join("slides.md");
    let long = format!("- {}", vec!["column"; 14].join(" "));
    let deck = format!(
        "<div class=\"grid grid-cols-2 gap-8\">\n<div>\n\n{}\n\n</div>\n</div>\n",
        long
    );
    fs::write(&deck_path, &deck).expect("Failed to write deck");

    let output = run_command(&["wrap", deck_path.to_str().unwrap(), "--max-width", "40"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Processed:"));

    let rewritten = fs::read_to_string(&deck_path).expect("Failed to read deck");
    assert!(!rewritten.contains(&long));
    assert!(rewritten.lines().all(|l| l.chars().count() <= 40));
}

#[test]
fn test_strip_times_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let deck_path = temp_dir.path().join("slides.md");
    fs::write(
        &deck_path,
        "# Week 1 (90분)\n\n## ⏰ 세션 구성\n- **이론**: 45분\n- **실습**: 45분\n\n## Topics\n- a\n",
    )
    .expect("Failed to write deck");

    let output = run_command(&["strip-times", deck_path.to_str().unwrap()]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Updated:"));
    assert!(stdout.contains("Total files updated: 1"));

    let rewritten = fs::read_to_string(&deck_path).expect("Failed to read deck");
    assert_eq!(rewritten, "# Week 1\n\n## Topics\n- a\n");
}

#[test]
fn test_restore_code_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let reference = temp_dir.path().join("reference.md");
    let target = temp_dir.path().join("target.md");
    fs::write(&reference, "```css\nh1 {\n  color: blue;\n}\n```\n").unwrap();
    fs::write(&target, "## Styles\n\n```css {1-1}\n```\n").unwrap();

    let output = run_command(&[
        "restore-code",
        "-r",
        reference.to_str().unwrap(),
        "-t",
        target.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Restored 1 css blocks"));

    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "## Styles\n\n```css {1-3}\nh1 {\n  color: blue;\n}\n```\n"
    );
}
