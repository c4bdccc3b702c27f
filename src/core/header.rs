// =============================================================================
// Fichier : header.rs
// Rôle    : Rendu de l'en-tête (préfixe, date, heure, fichier:ligne)
//
// Le rendu passe par une table de paires ASCII à deux chiffres et un cache
// par instance : la date n'est recalculée qu'au changement de jour, le
// préfixe `HH:MM:` qu'au changement de minute. Aucune allocation une fois le
// tampon d'en-tête dimensionné.
// =============================================================================

use std::io::Write;
use std::panic::Location;

use chrono::{Datelike, Local, Timelike, Utc};

use super::flags::Flags;

/// Emplacement inconnu (profondeur de pile introuvable, enregistrement sans fichier).
pub const UNKNOWN_FILE: &str = "???";

/// Table `n -> [dizaine, unité]` en ASCII pour `n` dans `0..=99`.
const D2: [[u8; 2]; 100] = build_d2();

const fn build_d2() -> [[u8; 2]; 100] {
    let mut table = [[b'0'; 2]; 100];
    let mut i = 0;
    while i < 100 {
        table[i] = [b'0' + (i / 10) as u8, b'0' + (i % 10) as u8];
        i += 1;
    }
    table
}

/// Paire ASCII zéro-complétée pour `n` dans `0..=99`.
#[inline]
pub(crate) const fn two_digits(n: u32) -> [u8; 2] {
    D2[n as usize]
}

// =============================================================================
// Emplacement de l'appelant
// =============================================================================

/// Fichier et ligne de l'appelant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller<'a> {
    pub file: &'a str,
    pub line: u32,
}

impl<'a> Caller<'a> {
    pub const fn new(file: &'a str, line: u32) -> Self {
        Self { file, line }
    }
}

impl From<&'static Location<'static>> for Caller<'static> {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

/// Dernier composant d'un chemin, séparateurs Unix et Windows confondus.
fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

// =============================================================================
// Horodatage
// =============================================================================

/// Instant décomposé, tel que lu une seule fois par appel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub micros: u32,
}

impl Stamp {
    /// Lit l'horloge système, en UTC ou en heure locale.
    pub fn now(utc: bool) -> Self {
        if utc {
            Self::from_datetime(&Utc::now())
        } else {
            Self::from_datetime(&Local::now())
        }
    }

    pub fn from_datetime<T: Datelike + Timelike>(dt: &T) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            // Seconde intercalaire : chrono la porte dans les nanosecondes
            second: dt.second().min(59),
            micros: (dt.nanosecond() / 1_000) % 1_000_000,
        }
    }
}

// =============================================================================
// Cache de formatage
// =============================================================================

#[derive(Debug, Default)]
struct FormatCache {
    day: Option<(i32, u32, u32)>,
    date: [u8; 11],
    minute: Option<(u32, u32)>,
    time: [u8; 6],
    #[cfg(test)]
    renders: usize,
}

impl FormatCache {
    /// `YYYY/MM/DD ` pour le jour donné, recalculé seulement au changement de jour.
    fn date(&mut self, year: i32, month: u32, day: u32) -> &[u8; 11] {
        if self.day != Some((year, month, day)) {
            let y = year.rem_euclid(10_000) as u32;
            let [c0, c1] = two_digits(y / 100);
            let [y0, y1] = two_digits(y % 100);
            let [m0, m1] = two_digits(month);
            let [d0, d1] = two_digits(day);
            self.date = [c0, c1, y0, y1, b'/', m0, m1, b'/', d0, d1, b' '];
            self.day = Some((year, month, day));
            #[cfg(test)]
            {
                self.renders += 1;
            }
        }
        &self.date
    }

    /// `HH:MM:` pour la minute donnée, recalculé seulement au changement de minute.
    fn time(&mut self, hour: u32, minute: u32) -> &[u8; 6] {
        if self.minute != Some((hour, minute)) {
            let [h0, h1] = two_digits(hour);
            let [m0, m1] = two_digits(minute);
            self.time = [h0, h1, b':', m0, m1, b':'];
            self.minute = Some((hour, minute));
            #[cfg(test)]
            {
                self.renders += 1;
            }
        }
        &self.time
    }
}

// =============================================================================
// Formateur d'en-tête
// =============================================================================

/// Tampon d'en-tête réutilisable et cache associé, propres à une instance.
#[derive(Debug, Default)]
pub(crate) struct HeaderFormatter {
    buf: Vec<u8>,
    cache: FormatCache,
}

impl HeaderFormatter {
    /// Rend l'en-tête complet dans le tampon interne et le renvoie.
    ///
    /// `stamp` n'est consulté que si `DATE` ou `TIME` est actif ; `caller`
    /// absent produit `???:0`.
    pub(crate) fn render(
        &mut self,
        prefix: &str,
        flags: Flags,
        stamp: Option<Stamp>,
        caller: Option<Caller<'_>>,
    ) -> &[u8] {
        self.buf.clear();
        self.buf.extend_from_slice(prefix.as_bytes());

        if let Some(now) = stamp.filter(|_| flags.needs_clock()) {
            if flags.contains(Flags::DATE) {
                let date = self.cache.date(now.year, now.month, now.day);
                self.buf.extend_from_slice(date);
            }
            if flags.contains(Flags::TIME) {
                let time = self.cache.time(now.hour, now.minute);
                self.buf.extend_from_slice(time);
                self.buf.extend_from_slice(&two_digits(now.second));
                if flags.contains(Flags::MICROSECONDS) {
                    self.buf.push(b'.');
                    self.buf.extend_from_slice(&two_digits(now.micros / 10_000));
                    self.buf.extend_from_slice(&two_digits((now.micros / 100) % 100));
                    self.buf.extend_from_slice(&two_digits(now.micros % 100));
                }
                self.buf.push(b' ');
            }
        }

        if flags.needs_caller() {
            let Caller { file, line } = caller.unwrap_or(Caller::new(UNKNOWN_FILE, 0));
            let file = if flags.contains(Flags::SHORT_FILE) {
                base_name(file)
            } else {
                file
            };
            let _ = write!(self.buf, "{file}:{line}: ");
        }

        &self.buf
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.buf.capacity()
    }
}
