use std::{rc::Rc, sync::{atomic::{AtomicUsize, Ordering}, Arc, RwLock}};

use super::error::Error;

/// Sink for rendered diagnostics, separate from the one-line messages the
/// REPL prints on stdout.
pub trait DiagnosticEmitterIO {
    fn emit_diagnostic(&self, error: &Error);
}

#[derive(Debug, Clone, Copy)]
pub struct NullDiagnosticEmitterIO;

impl DiagnosticEmitterIO for NullDiagnosticEmitterIO {
    fn emit_diagnostic(&self, _error: &Error) {}
}

#[derive(Debug, Default, Clone)]
pub struct VectorDiagnosticEmitterIO {
    pub errors: Arc<RwLock<Vec<Error>>>
}

impl VectorDiagnosticEmitterIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Error> {
        match self.errors.write() {
            Ok(mut errors) => std::mem::take(&mut *errors),
            Err(_) => vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.errors.read().map_or(0, |errors| errors.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticEmitterIO for VectorDiagnosticEmitterIO {
    fn emit_diagnostic(&self, error: &Error) {
        if let Ok(mut errors) = self.errors.write() {
            errors.push(error.clone());
        }
    }
}

#[derive(Clone)]
pub struct DiagnosticEmitter {
    count: Arc<AtomicUsize>,
    emitter: Rc<dyn DiagnosticEmitterIO>
}

impl DiagnosticEmitter {
    pub fn new(emitter: Rc<dyn DiagnosticEmitterIO>) -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            emitter,
        }
    }

    pub fn null() -> Self {
        Self::new(Rc::new(NullDiagnosticEmitterIO))
    }

    /// Diagnostics emitted since creation.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub fn emit(&self, error: &Error) {
        _ = self.count.fetch_add(1, Ordering::Relaxed);
        self.emitter.emit_diagnostic(error);
    }
}

impl Default for DiagnosticEmitter {
    fn default() -> Self {
        Self::null()
    }
}
