// =============================================================================
// Fichier : core/mod.rs
// Rôle    : Cœur du logger (formatage d'en-tête, écriture, hooks)
// =============================================================================

pub mod flags;
pub mod format;
pub mod header;
pub mod hook;
pub mod logger;
pub mod printf;
pub mod settings;
pub mod sink;
pub mod value;
