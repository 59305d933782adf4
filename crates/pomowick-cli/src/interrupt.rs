//! Ctrl+C handling.
//!
//! During a session the handler only raises a flag that the session loop
//! polls between ticks. Anywhere else it ends the process with status 130.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct Interrupts {
    pending: Arc<AtomicBool>,
    in_session: Arc<AtomicBool>,
}

impl Interrupts {
    /// Install the process-wide handler. Call once.
    pub fn install() -> Result<Self, ctrlc::Error> {
        let interrupts = Self::detached();
        let pending = Arc::clone(&interrupts.pending);
        let in_session = Arc::clone(&interrupts.in_session);
        ctrlc::set_handler(move || {
            if in_session.load(Ordering::SeqCst) {
                pending.store(true, Ordering::SeqCst);
            } else {
                println!();
                std::process::exit(130);
            }
        })?;
        Ok(interrupts)
    }

    fn detached() -> Self {
        Self {
            pending: Arc::new(AtomicBool::new(false)),
            in_session: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether Ctrl+C was pressed since the last `take`.
    pub fn pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Consume a pending Ctrl+C.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::SeqCst)
    }

    /// Route Ctrl+C to the flag until the guard drops.
    pub fn session(&self) -> SessionGuard<'_> {
        self.pending.store(false, Ordering::SeqCst);
        self.in_session.store(true, Ordering::SeqCst);
        SessionGuard { interrupts: self }
    }
}

pub struct SessionGuard<'a> {
    interrupts: &'a Interrupts,
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        self.interrupts.in_session.store(false, Ordering::SeqCst);
    }
}
