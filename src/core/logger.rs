// =============================================================================
// Fichier : logger.rs
// Rôle    : Logger ligne par ligne (valeurs liées, hooks, écriture)
//
// Chemin d'écriture, sous un seul verrou :
//   fusion des valeurs liées → hooks (print seulement) → en-tête → corps
// L'en-tête et le corps partent dans deux écritures distinctes.
// =============================================================================

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use parking_lot::Mutex;

use super::flags::Flags;
use super::format::{ensure_newline, write_concat, write_spaced};
use super::header::{Caller, HeaderFormatter, Stamp};
use super::hook::{Hook, HookChain};
use super::printf::write_formatted;
use super::sink::Output;
use super::value::Value;

/// État mutable d'un logger, protégé par son verrou.
struct Inner {
    out: Option<Output>,
    prefix: String,
    flags: Flags,
    header: HeaderFormatter,
    body: Vec<u8>,
    hooks: HookChain,
}

/// Logger compatible avec le format du logger standard.
///
/// Sans flux de sortie (`None`), le logger est désactivé : rien n'est
/// formaté ni écrit, mais les hooks sont toujours exécutés par `print`.
pub struct Logger {
    inner: Mutex<Inner>,
    bounds: Vec<Value>,
}

impl Logger {
    /// Crée un logger vers `out` avec le préfixe et les drapeaux donnés.
    pub fn new(out: Option<Output>, prefix: impl Into<String>, flags: Flags) -> Self {
        Self::with_bounds(out, prefix.into(), flags, HookChain::default(), Vec::new())
    }

    /// Logger désactivé (aucun flux).
    pub fn disabled() -> Self {
        Self::new(None, "", Flags::empty())
    }

    fn with_bounds(
        out: Option<Output>,
        prefix: String,
        flags: Flags,
        hooks: HookChain,
        bounds: Vec<Value>,
    ) -> Self {
        Self {
            inner: Mutex::new(Inner {
                out,
                prefix,
                flags,
                header: HeaderFormatter::default(),
                body: Vec::new(),
                hooks,
            }),
            bounds,
        }
    }

    // =========================================================================
    // Valeurs liées et hooks
    // =========================================================================

    /// Dérive un logger indépendant dont les valeurs liées sont celles de
    /// `self` suivies de `values`.
    ///
    /// La configuration (flux, préfixe, drapeaux, hooks) est copiée ; le
    /// nouveau logger a son propre verrou, ses propres tampons et son propre
    /// cache. `self` n'est pas modifié.
    pub fn bind(&self, values: &[Value]) -> Self {
        let inner = self.inner.lock();
        let mut bounds = Vec::with_capacity(self.bounds.len() + values.len());
        bounds.extend_from_slice(&self.bounds);
        bounds.extend_from_slice(values);
        Self::with_bounds(
            inner.out.clone(),
            inner.prefix.clone(),
            inner.flags,
            inner.hooks.clone(),
            bounds,
        )
    }

    /// Valeurs préfixées à chaque appel.
    pub fn bound_values(&self) -> &[Value] {
        &self.bounds
    }

    /// Ajoute un hook en fin de chaîne.
    pub fn hook(&self, hook: impl Hook + 'static) {
        self.hook_shared(Arc::new(hook));
    }

    /// Ajoute un hook déjà partagé (l'appelant garde l'accès à son état).
    pub fn hook_shared(&self, hook: Arc<dyn Hook>) {
        self.inner.lock().hooks.push(hook);
    }

    /// Retire tous les hooks.
    pub fn reset_hooks(&self) {
        self.inner.lock().hooks.clear();
    }

    /// Nombre de hooks enregistrés.
    pub fn hook_count(&self) -> usize {
        self.inner.lock().hooks.len()
    }

    // =========================================================================
    // Écriture
    // =========================================================================

    /// Écrit les valeurs (précédées des valeurs liées), séparées par des
    /// espaces, ou concaténées à l'ancienne avec `Flags::COMPAT`.
    #[track_caller]
    pub fn print(&self, values: &[Value]) {
        self.print_at(Some(Caller::from(Location::caller())), values);
    }

    /// Comme `print`, avec un emplacement explicite (`None` : inconnu).
    pub fn print_at(&self, caller: Option<Caller<'_>>, values: &[Value]) {
        let mut inner = self.inner.lock();
        let values = self.merge(values);

        if inner.hooks.run(&values) {
            return;
        }

        Self::emit(&mut inner, caller, |buf, flags| {
            if flags.contains(Flags::COMPAT) {
                write_concat(buf, &values);
            } else {
                write_spaced(buf, &values);
            }
        });
    }

    /// Substitue les valeurs (précédées des valeurs liées) dans `format`.
    ///
    /// N'exécute jamais les hooks ; `Flags::COMPAT` est sans effet.
    #[track_caller]
    pub fn printf(&self, format: &str, values: &[Value]) {
        self.printf_at(Some(Caller::from(Location::caller())), format, values);
    }

    /// Comme `printf`, avec un emplacement explicite (`None` : inconnu).
    pub fn printf_at(&self, caller: Option<Caller<'_>>, format: &str, values: &[Value]) {
        let mut inner = self.inner.lock();
        if inner.out.is_none() {
            return;
        }
        let values = self.merge(values);

        Self::emit(&mut inner, caller, |buf, _| {
            write_formatted(buf, format, &values);
        });
    }

    /// Valeurs liées suivies de `values` ; sans valeur liée, aucune copie.
    fn merge<'a>(&'a self, values: &'a [Value]) -> Cow<'a, [Value]> {
        if self.bounds.is_empty() {
            return Cow::Borrowed(values);
        }
        let mut merged = Vec::with_capacity(self.bounds.len() + values.len());
        merged.extend_from_slice(&self.bounds);
        merged.extend_from_slice(values);
        Cow::Owned(merged)
    }

    /// En-tête puis corps, en deux écritures ; les erreurs du flux sont ignorées.
    fn emit<F>(inner: &mut Inner, caller: Option<Caller<'_>>, fill: F)
    where
        F: FnOnce(&mut Vec<u8>, Flags),
    {
        let Inner {
            out: Some(out),
            prefix,
            flags,
            header,
            body,
            ..
        } = inner
        else {
            return;
        };
        let flags = *flags;

        let stamp = flags
            .needs_clock()
            .then(|| Stamp::now(flags.contains(Flags::UTC)));
        let head = header.render(prefix, flags, stamp, caller);
        if !head.is_empty() {
            let _ = out.write_all(head);
        }

        body.clear();
        fill(&mut *body, flags);
        ensure_newline(body);
        let _ = out.write_all(body);
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Remplace le préfixe écrit en tête de chaque ligne.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.inner.lock().prefix = prefix.into();
    }

    /// Copie du préfixe courant.
    pub fn prefix(&self) -> String {
        self.inner.lock().prefix.clone()
    }

    /// Remplace les drapeaux d'en-tête et de formatage.
    pub fn set_flags(&self, flags: Flags) {
        self.inner.lock().flags = flags;
    }

    /// Drapeaux courants.
    pub fn flags(&self) -> Flags {
        self.inner.lock().flags
    }

    /// Change le flux ; `None` désactive le logger.
    pub fn set_output(&self, out: Option<Output>) {
        self.inner.lock().out = out;
    }

    /// Vrai si un flux est configuré.
    pub fn is_enabled(&self) -> bool {
        self.inner.lock().out.is_some()
    }
}

impl Default for Logger {
    /// Équivalent du logger standard : stderr, sans préfixe, `Flags::STD`.
    fn default() -> Self {
        Self::new(Some(Output::stderr()), "", Flags::STD)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Logger")
            .field("enabled", &inner.out.is_some())
            .field("prefix", &inner.prefix)
            .field("flags", &inner.flags)
            .field("hooks", &inner.hooks.len())
            .field("bounds", &self.bounds)
            .finish()
    }
}
