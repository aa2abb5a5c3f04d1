use std::{
    io::Write,
    path::Path,
    process::{Command, Output, Stdio},
};

struct Env {
    _tmp: tempfile::TempDir,
    data_dir: std::path::PathBuf,
    vault: std::path::PathBuf,
}

fn setup() -> Env {
    let tmp = tempfile::tempdir().unwrap();
    let data_dir = tmp.path().join("data");
    let vault = tmp.path().join("vault");
    std::fs::create_dir_all(vault.join("notes")).unwrap();
    std::fs::create_dir_all(vault.join("dailies")).unwrap();
    std::fs::create_dir_all(vault.join(".obsidian")).unwrap();
    std::fs::write(
        vault.join("inbox.md"),
        "Thinking about foxes and hounds, again.",
    )
    .unwrap();
    std::fs::write(vault.join("notes").join("Foxes of Europe.md"), "").unwrap();
    std::fs::write(vault.join("notes").join("hounds.md"), "").unwrap();
    std::fs::write(vault.join("notes").join("hounds.png"), "").unwrap();
    std::fs::write(vault.join("dailies").join("foxes seen.md"), "").unwrap();
    std::fs::write(vault.join(".obsidian").join("foxes.md"), "").unwrap();
    Env {
        _tmp: tmp,
        data_dir,
        vault,
    }
}

fn command(env: &Env) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_related-notes"));
    cmd.env("RELATED_NOTES_DATA_DIR", &env.data_dir)
        .env_remove("RELATED_NOTES_LOG");
    cmd
}

fn run(env: &Env, args: &[&str]) -> Output {
    command(env).args(args).output().unwrap()
}

fn run_with_input(env: &Env, args: &[&str], input: &str) -> Output {
    let mut child = command(env)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn vault_arg(env: &Env) -> String {
    env.vault.to_string_lossy().into_owned()
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn config_show_lists_defaults() {
    let env = setup();
    let output = run(&env, &["config", "show"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("min_letters\t3"));
    assert!(out.contains("append_link\ttrue"));
    assert!(out.contains("filter_words\tthe,and,but"));
}

#[test]
fn config_set_persists_and_validates() {
    let env = setup();
    assert!(run(&env, &["config", "set", "min-letters", "5"]).status.success());
    assert!(!run(&env, &["config", "set", "min-letters", "five"]).status.success());

    let output = run(&env, &["config", "show", "--json"]);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["min_letters"], 5);

    assert!(run(&env, &["config", "reset"]).status.success());
    let output = run(&env, &["config", "show", "--json"]);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["min_letters"], 3);
}

#[test]
fn links_without_note_is_silent() {
    let env = setup();
    let output = run(&env, &["links", "--vault", &vault_arg(&env)]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn links_json_respects_exclusion() {
    let env = setup();
    run(&env, &["config", "set", "dailies", "dailies"]);

    let output =
        run(&env, &["links", "inbox.md", "--vault", &vault_arg(&env), "--json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let foxes: Vec<_> = json["foxes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["path"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(foxes, vec!["notes/Foxes of Europe.md"]);
    assert_eq!(json["hounds"][0]["path"], "notes/hounds.md");
    assert!(json.get("thinking").is_none());
}

#[test]
fn links_interactive_appends_link() {
    let env = setup();
    let output = run_with_input(
        &env,
        &["links", "inbox.md", "--vault", &vault_arg(&env)],
        "2\n1\n",
    );
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("2 keywords found"));
    assert!(out.contains("foxes - 2 notes found"));
    assert!(out.contains("hounds - 1 notes found"));
    assert!(out.contains("Added link [[hounds]] to end of 'inbox'"));
    assert_eq!(
        read(&env.vault.join("inbox.md")),
        "Thinking about foxes and hounds, again.\n[[hounds]]"
    );
}

#[test]
fn links_no_append_leaves_note_untouched() {
    let env = setup();
    let output = run_with_input(
        &env,
        &["links", "inbox.md", "--vault", &vault_arg(&env), "--no-append"],
        "1\n1\n",
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("Opened "));
    assert_eq!(
        read(&env.vault.join("inbox.md")),
        "Thinking about foxes and hounds, again."
    );
}

#[test]
fn keywords_prints_sorted_set() {
    let env = setup();
    let output = run(&env, &["keywords", "inbox.md", "--vault", &vault_arg(&env)]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "about\nagain\nfoxes\nhounds\nthinking\n");
}

#[test]
fn keywords_with_selection() {
    let env = setup();
    let output = run(
        &env,
        &[
            "keywords",
            "inbox.md",
            "--vault",
            &vault_arg(&env),
            "--selection",
            "Foxes hounds",
        ],
    );
    assert_eq!(stdout(&output), "foxes\nhounds\n");
}

#[test]
fn keywords_of_unreadable_note_is_empty() {
    let env = setup();
    std::fs::write(env.vault.join("binary.md"), [0xff, 0xfe, 0xfd]).unwrap();
    let output =
        run(&env, &["keywords", "binary.md", "--vault", &vault_arg(&env)]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn unknown_note_fails() {
    let env = setup();
    let output = run(&env, &["links", "ghost.md", "--vault", &vault_arg(&env)]);
    assert!(!output.status.success());
}
