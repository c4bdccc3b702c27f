// =============================================================================
// Fichier : tests/facade_tests.rs
// Rôle    : Loggers globaux et interrupteur de debug
//
// Un seul test modifie l'état global, pour éviter les interférences entre
// tests exécutés en parallèle.
// =============================================================================

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rog::{values, Flags, Logger, LoggerSettings, MemorySink, OutputTarget, Value};

use common::{assert_line, expected_headers, init_test_logging};

#[test]
fn debug_toggle_and_standard_logger() {
    init_test_logging();

    // Debug désactivé par défaut : aucune écriture
    let sink = MemorySink::new();
    rog::enable_debug(Some(Logger::new(Some(sink.output()), "", Flags::STD)));
    rog::disable_debug();
    assert!(!rog::is_debug_enabled());
    rog::debug(&values!["Debug output disabled"]);
    rog::debugf("%v", &values!["Debug output disabled"]);
    assert_eq!(sink.contents(), "");

    rog::enable_debug(None);
    assert!(rog::is_debug_enabled());
    let headers = expected_headers("", || rog::debug(&values!["Debug output"]));
    assert_line(&sink.take(), &headers, "Debug output\n");

    let headers = expected_headers("", || rog::debugf("n=%v", &values![1]));
    assert_line(&sink.take(), &headers, "n=1\n");

    // Emplacement : celui de l'appelant de la façade
    let short = MemorySink::new();
    rog::enable_debug(Some(Logger::new(Some(short.output()), "", Flags::SHORT_FILE)));
    let line = line!() + 1;
    rog::debug(&values!["where"]);
    assert_eq!(short.take(), format!("facade_tests.rs:{line}: where\n"));
    rog::disable_debug();

    // Logger standard redirigé
    let std_sink = MemorySink::new();
    rog::std_logger().set_output(Some(std_sink.output()));
    rog::std_logger().set_flags(Flags::SHORT_FILE);
    let line = line!() + 1;
    rog::print(&values!["std", 1]);
    rog::printf("%v-%v", &values!["a", "b"]);
    assert_eq!(
        std_sink.take(),
        format!("facade_tests.rs:{line}: std 1\nfacade_tests.rs:{}: a-b\n", line + 1)
    );

    // Paramètres appliqués au logger standard
    let settings = LoggerSettings {
        prefix: "[cfg] ".to_string(),
        flags: "compat".to_string(),
        output: OutputTarget::Discard,
        debug: true,
    };
    rog::configure(&settings).unwrap();
    assert!(rog::is_debug_enabled());
    assert!(!rog::std_logger().is_enabled());
    assert_eq!(rog::std_logger().prefix(), "[cfg] ");
    assert_eq!(rog::std_logger().flags(), Flags::COMPAT);

    let bad = LoggerSettings {
        flags: "nope".to_string(),
        ..LoggerSettings::default()
    };
    assert!(rog::configure(&bad).is_err());
    rog::disable_debug();
}

#[test]
fn discard_runs_only_hooks() {
    let hits = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&hits);
    let l = rog::discard().bind(&values![]);
    l.hook(move |_: &[Value]| {
        seen.fetch_add(1, Ordering::SeqCst);
        false
    });

    l.print(&values!["Hello?"]);
    l.print(&values!["Are you there?"]);
    rog::discard().print(&values!["I'm not here."]);

    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert!(!rog::discard().is_enabled());
    assert_eq!(rog::discard().hook_count(), 0);
}

#[test]
fn settings_deserialize_with_defaults() {
    let settings: LoggerSettings =
        serde_json::from_str(r#"{ "prefix": "[svc] ", "output": "stdout" }"#).unwrap();
    assert_eq!(settings.prefix, "[svc] ");
    assert_eq!(settings.output, OutputTarget::Stdout);
    assert_eq!(settings.flags().unwrap(), Flags::STD);
    assert!(!settings.debug);

    let json = serde_json::to_string(&settings).unwrap();
    assert!(json.contains(r#""output":"stdout""#), "{json}");
}
