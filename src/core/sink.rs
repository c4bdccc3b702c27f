// =============================================================================
// Fichier : sink.rs
// Rôle    : Destination des lignes (flux partagé entre loggers dérivés)
// =============================================================================

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Poignée clonable vers un flux d'écriture.
///
/// Un logger dérivé par `bind` partage la même poignée que son parent ;
/// chaque écriture prend le verrou du flux, ce qui sérialise les écritures
/// venant de loggers différents.
#[derive(Clone)]
pub struct Output {
    inner: Arc<Mutex<dyn Write + Send>>,
}

impl Output {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Écrit un bloc complet ; les erreurs sont ignorées par l'appelant.
    pub(crate) fn write_all(&self, bytes: &[u8]) -> io::Result<()> {
        self.inner.lock().write_all(bytes)
    }

    /// Vrai si les deux poignées désignent le même flux.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output").finish_non_exhaustive()
    }
}

impl From<MemorySink> for Output {
    fn from(sink: MemorySink) -> Self {
        Self::new(sink)
    }
}

// =============================================================================
// Tampon mémoire
// =============================================================================

/// Flux en mémoire, clonable, utile pour capturer la sortie d'un logger.
///
/// Compte aussi le nombre d'appels à `write`, pour observer que l'en-tête et
/// le corps arrivent en deux écritures distinctes.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    bytes: Vec<u8>,
    writes: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contenu accumulé, décodé en UTF-8 (avec remplacement).
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().bytes).into_owned()
    }

    /// Vide le tampon et renvoie son contenu.
    pub fn take(&self) -> String {
        let mut inner = self.inner.lock();
        inner.writes = 0;
        let bytes = std::mem::take(&mut inner.bytes);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Nombre d'appels à `write` depuis la création ou le dernier `take`.
    pub fn writes(&self) -> usize {
        self.inner.lock().writes
    }

    pub fn output(&self) -> Output {
        Output::from(self.clone())
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.inner.lock();
        inner.bytes.extend_from_slice(buf);
        inner.writes += 1;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
