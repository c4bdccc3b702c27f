// =============================================================================
// Fichier : file_hook.rs
// Rôle    : Hook qui réécrit un fichier avec la dernière ligne reçue
// =============================================================================

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::format::sprint;
use crate::core::hook::Hook;
use crate::core::value::Value;

/// Écrase `path` à chaque appel avec la représentation par défaut des
/// valeurs (espace seulement entre deux opérandes qui ne sont pas des chaînes).
///
/// `mode` est appliqué à la création du fichier (Unix uniquement). Le hook
/// n'annule jamais l'appel ; les erreurs d'écriture sont journalisées.
#[derive(Debug, Clone)]
pub struct FileHook {
    path: PathBuf,
    mode: u32,
}

impl FileHook {
    pub fn new(path: impl Into<PathBuf>, mode: u32) -> Self {
        Self {
            path: path.into(),
            mode,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, text: &str) -> Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(self.mode);
        }

        let mut file = options
            .open(&self.path)
            .with_context(|| format!("Impossible d'ouvrir {}", self.path.display()))?;
        file.write_all(text.as_bytes())
            .with_context(|| format!("Impossible d'écrire {}", self.path.display()))?;
        Ok(())
    }
}

impl Hook for FileHook {
    fn run(&self, values: &[Value]) -> bool {
        if let Err(e) = self.write(&sprint(values)) {
            log::warn!("FileHook : {e:#}");
        }
        false
    }
}
