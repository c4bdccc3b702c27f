// =============================================================================
// Fichier : hooks/mod.rs
// Rôle    : Hooks fournis avec la bibliothèque (fichier, popup système)
// =============================================================================

pub mod file_hook;
pub mod popup_hook;

pub use file_hook::FileHook;
pub use popup_hook::PopupHook;
