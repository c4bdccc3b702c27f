// =============================================================================
// Fichier : settings.rs
// Rôle    : Paramètres d'un logger (valeurs par défaut, environnement, serde)
// =============================================================================

use std::env;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::flags::Flags;
use super::logger::Logger;
use super::sink::Output;

/// Variables d'environnement lues par [`LoggerSettings::from_env`].
pub const ENV_PREFIX: &str = "ROG_PREFIX";
pub const ENV_FLAGS: &str = "ROG_FLAGS";
pub const ENV_OUTPUT: &str = "ROG_OUTPUT";
pub const ENV_DEBUG: &str = "ROG_DEBUG";

// =============================================================================
// Structures de configuration
// =============================================================================

/// Destination d'un logger construit depuis les paramètres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    #[default]
    Stderr,
    Stdout,
    Discard,
}

impl OutputTarget {
    /// Convertit depuis une chaîne (`stderr`, `stdout`, `discard`).
    pub fn from_str_name(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stderr" | "" => Ok(Self::Stderr),
            "stdout" => Ok(Self::Stdout),
            "discard" | "none" | "off" => Ok(Self::Discard),
            other => bail!("Sortie inconnue : {other}"),
        }
    }

    /// Ouvre le flux correspondant ; `Discard` désactive le logger.
    pub fn open(self) -> Option<Output> {
        match self {
            Self::Stderr => Some(Output::stderr()),
            Self::Stdout => Some(Output::stdout()),
            Self::Discard => None,
        }
    }
}

/// Paramètres d'un logger, sérialisables pour être intégrés à la
/// configuration de l'application hôte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    pub prefix: String,
    /// Noms de drapeaux, ex. `"date|time|shortfile"`.
    pub flags: String,
    pub output: OutputTarget,
    pub debug: bool,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            flags: "date|time".to_string(),
            output: OutputTarget::Stderr,
            debug: false,
        }
    }
}

// =============================================================================
// Chargement et construction
// =============================================================================

impl LoggerSettings {
    /// Valeurs par défaut surchargées par `ROG_PREFIX`, `ROG_FLAGS`,
    /// `ROG_OUTPUT` et `ROG_DEBUG`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Comme `from_env`, avec une source de variables arbitraire.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(prefix) = lookup(ENV_PREFIX) {
            settings.prefix = prefix;
        }
        if let Some(flags) = lookup(ENV_FLAGS) {
            Flags::parse(&flags).with_context(|| format!("{ENV_FLAGS} invalide"))?;
            settings.flags = flags;
        }
        if let Some(output) = lookup(ENV_OUTPUT) {
            settings.output = OutputTarget::from_str_name(&output)
                .with_context(|| format!("{ENV_OUTPUT} invalide"))?;
        }
        if let Some(debug) = lookup(ENV_DEBUG) {
            settings.debug = match debug.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                other => {
                    log::warn!("{ENV_DEBUG} ignoré : valeur inattendue {other:?}");
                    false
                }
            };
        }

        log::debug!("Paramètres du logger : {settings:?}");
        Ok(settings)
    }

    /// Drapeaux analysés.
    pub fn flags(&self) -> Result<Flags> {
        Flags::parse(&self.flags).with_context(|| format!("Drapeaux invalides : {}", self.flags))
    }

    /// Construit un logger indépendant à partir des paramètres.
    pub fn build(&self) -> Result<Logger> {
        Ok(Logger::new(self.output.open(), self.prefix.clone(), self.flags()?))
    }
}
