use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn create_week(root: &Path, name: &str, slides: Option<&str>, summary: Option<&str>) {
    let week = root.join(name);
    fs::create_dir_all(&week).expect("Failed to create week dir");
    if let Some(slides) = slides {
        fs::write(week.join("slides.md"), slides).expect("Failed to write slides");
    }
    if let Some(summary) = summary {
        fs::write(week.join("summary.md"), summary).expect("Failed to write summary");
    }
}

#[test]
fn test_bootstrap_then_rewrite_decks() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let slides_dir = temp_dir.path().join("slides");
    let output_path = temp_dir.path().join("site/index.html");

    let long_body: Vec<String> = (1..=45).map(|n| format!("- item {}", n)).collect();
    let deck = format!(
        "# Interaction Basics\n\n## Outline (10분)\n---\n{}\n",
        long_body.join("\n")
    );
    create_week(&slides_dir, "week01-basics", Some(&deck), None);
    create_week(
        &slides_dir,
        "week02",
        None,
        Some("# Visual Design\n\n## 🎯 학습 목표\n- Pick a palette\n\n## More\n"),
    );
    fs::create_dir_all(slides_dir.join("week02/code")).unwrap();
    fs::write(slides_dir.join("week02/code/app.css"), "body {}\n").unwrap();
    fs::create_dir_all(slides_dir.join("drafts")).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_slidesmith"))
        .arg("bootstrap")
        .arg("--slides-dir")
        .arg(&slides_dir)
        .arg("--output")
        .arg(&output_path)
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "Bootstrap failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Found 2 weeks:"));
    assert!(stdout.contains("Week 01: Interaction Basics"));
    assert!(stdout.contains("Weeks with code: 1"));

    let html = fs::read_to_string(&output_path).expect("Index not written");
    assert!(html.contains("<h3>Interaction Basics</h3>"));
    assert!(html.contains("<h3>Visual Design</h3>"));
    assert!(html.contains("<li>Pick a palette</li>"));
    assert_eq!(html.matches("class=\"lecture-card\"").count(), 2);

    // then clean the first deck up
    let deck_path = slides_dir.join("week01-basics/slides.md");
    let strip = Command::new(env!("CARGO_BIN_EXE_slidesmith"))
        .arg("strip-times")
        .arg(&deck_path)
        .output()
        .expect("Failed to execute command");
    assert!(strip.status.success());

    let split = Command::new(env!("CARGO_BIN_EXE_slidesmith"))
        .arg("split")
        .arg(&deck_path)
        .output()
        .expect("Failed to execute command");
    assert!(split.status.success());
    assert!(String::from_utf8_lossy(&split.stdout).contains("1 hard split"));

    let rewritten = fs::read_to_string(&deck_path).unwrap();
    assert!(rewritten.starts_with("# Interaction Basics\n\n## Outline\n---\n"));
    assert_eq!(rewritten.matches("\n---\n").count(), 2);
    assert!(rewritten.ends_with("- item 45\n"));
}

#[test]
fn test_bootstrap_without_weeks() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("index.html");

    let output = Command::new(env!("CARGO_BIN_EXE_slidesmith"))
        .arg("bootstrap")
        .arg("--slides-dir")
        .arg(temp_dir.path())
        .arg("-o")
        .arg(&output_path)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No weeks found"));
    assert!(!output_path.exists());
}
