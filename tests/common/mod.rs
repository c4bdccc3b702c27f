// =============================================================================
// Fichier : tests/common/mod.rs
// Rôle    : Outils partagés des tests d'intégration
// =============================================================================

#![allow(dead_code)]

use chrono::{DateTime, Local, Utc};

/// Backend `log` pour voir les diagnostics internes pendant les tests.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// En-tête attendu au format du logger standard pour un instant donné.
pub fn std_header_local(prefix: &str, at: DateTime<Local>) -> String {
    format!("{prefix}{} ", at.format("%Y/%m/%d %H:%M:%S"))
}

pub fn std_header_utc(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{prefix}{} ", at.format("%Y/%m/%d %H:%M:%S"))
}

/// Exécute `f` et renvoie les en-têtes plausibles (l'horloge peut changer de
/// seconde pendant l'appel).
pub fn expected_headers<F: FnOnce()>(prefix: &str, f: F) -> Vec<String> {
    let before = Local::now();
    f();
    let after = Local::now();
    vec![std_header_local(prefix, before), std_header_local(prefix, after)]
}

/// Vérifie que `actual` vaut l'un des en-têtes suivi de `body`.
pub fn assert_line(actual: &str, headers: &[String], body: &str) {
    assert!(
        headers.iter().any(|h| actual == format!("{h}{body}")),
        "ligne inattendue : {actual:?} (en-têtes possibles : {headers:?}, corps : {body:?})"
    );
}
