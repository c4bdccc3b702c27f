// =============================================================================
// Fichier : facade.rs
// Rôle    : Loggers globaux du processus (standard, discard, debug)
//
// Les instances sont créées paresseusement au premier usage. L'interrupteur
// de debug est atomique et le remplacement du logger de debug passe par un
// verrou lecture/écriture.
// =============================================================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::core::flags::Flags;
use crate::core::logger::Logger;
use crate::core::settings::LoggerSettings;
use crate::core::sink::Output;
use crate::core::value::Value;

static STD: Lazy<Logger> = Lazy::new(Logger::default);

static DISCARD: Lazy<Logger> = Lazy::new(Logger::disabled);

static DEBUG: Lazy<RwLock<Arc<Logger>>> = Lazy::new(|| RwLock::new(Arc::new(default_debug())));

static DEBUGGING: AtomicBool = AtomicBool::new(false);

fn default_debug() -> Logger {
    Logger::new(Some(Output::stderr()), "", Flags::STD | Flags::SHORT_FILE)
}

// =============================================================================
// Accès aux instances
// =============================================================================

/// Logger standard : stderr, sans préfixe, `Flags::STD`.
pub fn std_logger() -> &'static Logger {
    &STD
}

/// Logger sans flux : seuls ses hooks s'exécutent.
pub fn discard() -> &'static Logger {
    &DISCARD
}

/// Logger de debug courant.
pub fn debug_logger() -> Arc<Logger> {
    Arc::clone(&DEBUG.read())
}

// =============================================================================
// Interrupteur de debug
// =============================================================================

/// Active la sortie de debug, en remplaçant éventuellement le logger de debug.
pub fn enable_debug(replacement: Option<Logger>) {
    if let Some(logger) = replacement {
        *DEBUG.write() = Arc::new(logger);
        log::debug!("Logger de debug remplacé");
    }
    DEBUGGING.store(true, Ordering::Release);
    log::debug!("Sortie de debug activée");
}

pub fn disable_debug() {
    DEBUGGING.store(false, Ordering::Release);
    log::debug!("Sortie de debug désactivée");
}

pub fn is_debug_enabled() -> bool {
    DEBUGGING.load(Ordering::Acquire)
}

/// Applique des paramètres au logger standard et à l'interrupteur de debug.
pub fn configure(settings: &LoggerSettings) -> Result<()> {
    let flags = settings.flags()?;
    STD.set_output(settings.output.open());
    STD.set_prefix(settings.prefix.clone());
    STD.set_flags(flags);

    if settings.debug {
        enable_debug(None);
    } else {
        disable_debug();
    }
    log::info!(
        "Logger standard configuré (sortie: {:?}, drapeaux: {flags:?})",
        settings.output
    );
    Ok(())
}

// =============================================================================
// Écriture via les loggers globaux
// =============================================================================

#[track_caller]
pub fn print(values: &[Value]) {
    STD.print(values);
}

#[track_caller]
pub fn printf(format: &str, values: &[Value]) {
    STD.printf(format, values);
}

/// Sans effet tant que le debug est désactivé.
#[track_caller]
pub fn debug(values: &[Value]) {
    if is_debug_enabled() {
        debug_logger().print(values);
    }
}

#[track_caller]
pub fn debugf(format: &str, values: &[Value]) {
    if is_debug_enabled() {
        debug_logger().printf(format, values);
    }
}
