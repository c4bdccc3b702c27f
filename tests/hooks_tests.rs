// =============================================================================
// Fichier : tests/hooks_tests.rs
// Rôle    : Hooks fournis (fichier, popup)
// =============================================================================

mod common;

use std::fs;

use rog::{values, FileHook, Flags, Hook, Logger, MemorySink, PopupHook};
use tempdir::TempDir;

use common::init_test_logging;

#[test]
fn file_hook_overwrites_with_last_line() {
    init_test_logging();
    let dir = TempDir::new("rog-hooks").unwrap();
    let path = dir.path().join("hooked.txt");

    let l = Logger::new(None, "", Flags::empty());
    l.hook(FileHook::new(&path, 0o644));

    l.print(&values!["hello, world"]);
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello, world");

    l.bind(&values!["[L]", 123]).print(&values!["{L}", "def"]);
    assert_eq!(fs::read_to_string(&path).unwrap(), "[L]123{L}def");

    l.print(&values![1, 2, "a", 3.5]);
    assert_eq!(fs::read_to_string(&path).unwrap(), "1 2a3.5");

    l.print(&values!["x"]);
    assert_eq!(fs::read_to_string(&path).unwrap(), "x");
}

#[cfg(unix)]
#[test]
fn file_hook_applies_mode_on_creation() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new("rog-hooks").unwrap();
    let path = dir.path().join("private.txt");
    FileHook::new(&path, 0o600).run(&values!["secret"]);

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o077, 0);
}

#[test]
fn file_hook_never_vetoes_even_on_error() {
    init_test_logging();
    let sink = MemorySink::new();
    let l = Logger::new(Some(sink.output()), "", Flags::empty());
    let hook = FileHook::new("/nonexistent-dir/rog/hooked.txt", 0o644);
    assert!(!hook.run(&values!["x"]));

    l.hook(hook);
    l.print(&values!["still written"]);
    assert_eq!(sink.contents(), "still written\n");
}

#[test]
fn popup_hook_arguments() {
    let hook = PopupHook::new();
    assert_eq!(
        hook.arguments(&values!["Hello?", 42]),
        ["*", "Hello?", "42"]
    );
}

#[test]
fn popup_hook_does_not_veto_or_wait() {
    init_test_logging();
    let sink = MemorySink::new();
    let l = Logger::new(Some(sink.output()), "", Flags::empty());
    // Programme absent : l'échec est journalisé, la ligne passe quand même
    l.hook(PopupHook::with_program("rog-no-such-program", ["*"]));
    l.print(&values!["Are you there?"]);
    assert_eq!(sink.contents(), "Are you there?\n");
}

#[cfg(unix)]
#[test]
fn popup_hook_spawns_detached() {
    let hook = PopupHook::with_program("sleep", Vec::<String>::new());
    let start = std::time::Instant::now();
    assert!(!hook.run(&values![1]));
    assert!(start.elapsed() < std::time::Duration::from_millis(900));
}
