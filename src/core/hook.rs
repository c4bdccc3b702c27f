// =============================================================================
// Fichier : hook.rs
// Rôle    : Trait d'interception des lignes avant formatage
// =============================================================================

use std::sync::Arc;

use super::value::Value;

/// Intercepteur appelé par `Logger::print` avant tout formatage.
///
/// `run` reçoit les valeurs fusionnées (valeurs liées puis valeurs de
/// l'appel) et renvoie `true` pour annuler l'appel : les hooks suivants ne
/// sont pas exécutés et rien n'est écrit.
///
/// Les hooks d'un logger s'exécutent un par un sous son verrou. Un hook ne
/// doit pas bloquer indéfiniment ni écrire dans le logger qui l'appelle ; il
/// peut lancer un travail détaché sans l'attendre.
pub trait Hook: Send + Sync {
    fn run(&self, values: &[Value]) -> bool;
}

impl<F> Hook for F
where
    F: Fn(&[Value]) -> bool + Send + Sync,
{
    fn run(&self, values: &[Value]) -> bool {
        self(values)
    }
}

/// Liste ordonnée de hooks.
#[derive(Clone, Default)]
pub(crate) struct HookChain {
    hooks: Vec<Arc<dyn Hook>>,
}

impl HookChain {
    pub(crate) fn push(&mut self, hook: Arc<dyn Hook>) {
        self.hooks.push(hook);
    }

    pub(crate) fn clear(&mut self) {
        self.hooks.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Exécute les hooks dans l'ordre d'enregistrement ; `true` dès le premier veto.
    pub(crate) fn run(&self, values: &[Value]) -> bool {
        self.hooks.iter().any(|h| h.run(values))
    }
}
