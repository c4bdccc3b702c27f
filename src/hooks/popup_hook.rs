// =============================================================================
// Fichier : popup_hook.rs
// Rôle    : Hook qui affiche chaque ligne dans une fenêtre système
// =============================================================================

use std::process::{Command, Stdio};
use std::thread;

use crate::core::hook::Hook;
use crate::core::value::Value;

/// Lance l'utilitaire de message système (`msg *` sous Windows) avec les
/// valeurs en arguments, sans attendre sa fin. N'annule jamais l'appel.
#[derive(Debug, Clone)]
pub struct PopupHook {
    program: String,
    leading_args: Vec<String>,
}

impl Default for PopupHook {
    fn default() -> Self {
        Self::with_program("msg", ["*"])
    }
}

impl PopupHook {
    /// `msg *` : diffusion à toutes les sessions (Windows).
    pub fn new() -> Self {
        Self::default()
    }

    /// Programme et premiers arguments personnalisés.
    pub fn with_program<I, S>(program: impl Into<String>, leading_args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            leading_args: leading_args.into_iter().map(Into::into).collect(),
        }
    }

    /// Arguments complets passés au programme.
    pub fn arguments(&self, values: &[Value]) -> Vec<String> {
        self.leading_args
            .iter()
            .cloned()
            .chain(values.iter().map(ToString::to_string))
            .collect()
    }

    fn command(&self, values: &[Value]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.arguments(values))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

impl Hook for PopupHook {
    fn run(&self, values: &[Value]) -> bool {
        match self.command(values).spawn() {
            Ok(mut child) => {
                // Le processus est récolté en arrière-plan, l'appel n'attend pas
                let reaper = thread::Builder::new()
                    .name("rog-popup".to_string())
                    .spawn(move || {
                        let _ = child.wait();
                    });
                if let Err(e) = reaper {
                    log::warn!("PopupHook : thread de récolte impossible : {e}");
                }
            }
            Err(e) => log::warn!("PopupHook : impossible de lancer {} : {e}", self.program),
        }
        false
    }
}
