// =============================================================================
// Fichier : flags.rs
// Rôle    : Drapeaux d'en-tête (mêmes valeurs que le logger standard)
// =============================================================================

use anyhow::{bail, Result};
use bitflags::bitflags;

bitflags! {
    /// Options d'en-tête et de formatage, combinables par OU binaire.
    ///
    /// L'ordre de rendu est fixe : préfixe, date, heure, emplacement.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags: u32 {
        /// Date locale : `2009/01/23`.
        const DATE = 1;
        /// Heure locale : `01:23:23`.
        const TIME = 1 << 1;
        /// Résolution microseconde : `01:23:23.123123` (suppose `TIME`).
        const MICROSECONDS = 1 << 2;
        /// Chemin complet et ligne : `/a/b/c/d.rs:23`.
        const LONG_FILE = 1 << 3;
        /// Dernier composant et ligne : `d.rs:23` (prioritaire sur `LONG_FILE`).
        const SHORT_FILE = 1 << 4;
        /// Date et heure en UTC plutôt qu'en heure locale.
        const UTC = 1 << 5;
        /// Valeurs initiales du logger standard.
        const STD = Self::DATE.bits() | Self::TIME.bits();
        /// Concaténation héritée : pas d'espace entre deux chaînes consécutives.
        const COMPAT = 1 << 8;
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::STD
    }
}

impl Flags {
    /// Vrai si un horodatage doit être lu.
    pub const fn needs_clock(self) -> bool {
        self.intersects(Self::DATE.union(Self::TIME))
    }

    /// Vrai si l'emplacement de l'appelant doit être rendu.
    pub const fn needs_caller(self) -> bool {
        self.intersects(Self::LONG_FILE.union(Self::SHORT_FILE))
    }

    /// Analyse une liste de noms (`"date|time|shortfile"`) ou une valeur décimale.
    ///
    /// Séparateurs acceptés : `|`, `,` et espaces. Insensible à la casse.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if let Ok(bits) = input.parse::<u32>() {
            return match Self::from_bits(bits) {
                Some(flags) => Ok(flags),
                None => bail!("Bits de drapeaux inconnus : {bits:#x}"),
            };
        }

        let mut flags = Self::empty();
        for name in input
            .split(|c: char| c == '|' || c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
        {
            flags |= match name.to_ascii_lowercase().as_str() {
                "date" | "ldate" => Self::DATE,
                "time" | "ltime" => Self::TIME,
                "microseconds" | "lmicroseconds" => Self::MICROSECONDS,
                "longfile" | "llongfile" => Self::LONG_FILE,
                "shortfile" | "lshortfile" => Self::SHORT_FILE,
                "utc" | "lutc" => Self::UTC,
                "std" | "stdflags" | "lstdflags" => Self::STD,
                "compat" | "lcompat" => Self::COMPAT,
                "none" => Self::empty(),
                other => bail!("Drapeau inconnu : {other}"),
            };
        }
        Ok(flags)
    }
}
