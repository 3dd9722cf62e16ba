// ArcanaScript configuration and host tests
// Covers: TOML config files, console host saves, memory host transcripts, static checks

use std::fs;

use arcanascript::{
    ConsoleHost, Interpreter, InterpreterConfig, MemoryHost, ScriptError, check,
};
use tempfile::tempdir;

#[test]
fn test_config_file_overrides_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("arcana.toml");
    fs::write(&path, "seed = 42\nuntil_limit = 50\n").unwrap();

    let config = InterpreterConfig::from_path(&path).unwrap();
    assert_eq!(config.seed, 42);
    assert_eq!(config.until_limit, 50);
    assert_eq!(config.max_nesting, InterpreterConfig::default().max_nesting);
    assert!(config.save_dir.is_none());
}

#[test]
fn test_config_save_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("arcana.toml");
    let config = InterpreterConfig {
        seed: 5,
        until_limit: 12,
        max_nesting: 8,
        save_dir: Some(dir.path().join("scrolls")),
    };
    config.save(&path).unwrap();
    assert_eq!(InterpreterConfig::from_path(&path).unwrap(), config);
}

#[test]
fn test_broken_config_files_are_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("arcana.toml");
    fs::write(&path, "seed = \"many\"").unwrap();
    let err = InterpreterConfig::from_path(&path).unwrap_err();
    assert!(format!("{err:#}").contains("arcana.toml"));
    assert!(InterpreterConfig::from_path(&dir.path().join("absent.toml")).is_err());
    assert!(InterpreterConfig::load(Some(dir.path().join("absent.toml").as_path())).is_err());
}

#[test]
fn test_console_host_writes_into_the_save_dir() {
    let dir = tempdir().unwrap();
    let config = InterpreterConfig {
        save_dir: Some(dir.path().to_path_buf()),
        ..InterpreterConfig::default()
    };
    let host = ConsoleHost::new(config.save_dir_or_cwd());
    let mut interp = Interpreter::with_host(config, Box::new(host));
    interp
        .interpret("tale is \"Once upon a time\" ok\nScribe tale as \"../tale.txt\" ok")
        .unwrap();
    let written = fs::read_to_string(dir.path().join("tale.txt")).unwrap();
    assert_eq!(written, "Once upon a time");
}

#[test]
fn test_memory_host_records_every_effect() {
    let host = MemoryHost::new();
    let mut interp = Interpreter::with_host(InterpreterConfig::default(), Box::new(host.clone()));
    interp
        .interpret(
            "Reveal: hello\nScribe [1, 2] as \"list.txt\" ok\nImprint \"spell\" to clipboard ok",
        )
        .unwrap();
    assert_eq!(host.output(), vec!["hello"]);
    assert_eq!(
        host.saved_files(),
        vec![("list.txt".to_string(), "[1, 2]".to_string())]
    );
    assert_eq!(host.clipboard().as_deref(), Some("spell"));
}

#[test]
fn test_check_validates_without_running() {
    let good = "Reveal: hi\nwhen truth:\n  Scribe \"x\" as \"never.txt\" ok\nconclude\n";
    assert!(check(good).is_ok());

    let issue = check("Reveal: hi\nrepeat each c in \"ab\":\nReveal: {| c |}").unwrap_err();
    assert_eq!(issue.line, 2);
    assert!(matches!(issue.error, ScriptError::UnterminatedBlock { .. }));

    let issue = check("x is 1 ok\nSummon std/time ok").unwrap_err();
    assert_eq!(issue.line, 2);
    assert!(issue.to_string().contains("E001"));
}
