// =============================================================================
// rog — Logger ligne par ligne compatible, avec valeurs liées et hooks
// =============================================================================
//
// Architecture :
//   core/      — Formatage d'en-tête, logger, hooks, valeurs, paramètres
//   hooks/     — Hooks fournis (fichier, popup système)
//   facade.rs  — Loggers globaux et interrupteur de debug
//
// Format de sortie :
//   [préfixe][YYYY/MM/DD ][HH:MM:SS[.uuuuuu] ][fichier:ligne: ]message
//
// Auteur : M@nu
// Licence : MIT
// =============================================================================

pub mod core;
pub mod facade;
pub mod hooks;

pub use crate::core::flags::Flags;
pub use crate::core::format::sprint;
pub use crate::core::header::{Caller, UNKNOWN_FILE};
pub use crate::core::hook::Hook;
pub use crate::core::logger::Logger;
pub use crate::core::settings::{LoggerSettings, OutputTarget};
pub use crate::core::sink::{MemorySink, Output};
pub use crate::core::value::{Text, Value};
pub use facade::{
    configure, debug, debug_logger, debugf, disable_debug, discard, enable_debug,
    is_debug_enabled, print, printf, std_logger,
};
pub use hooks::{FileHook, PopupHook};
