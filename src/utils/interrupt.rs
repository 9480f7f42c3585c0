use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Catch Ctrl-C: the running child is killed and no further phase starts
pub fn install_handler() {
    if let Err(e) = ctrlc::try_set_handler(|| {
        if INTERRUPTED.swap(true, Ordering::SeqCst) {
            // Second Ctrl-C: give up waiting
            std::process::exit(130);
        }
        eprintln!("\nInterrupted, stopping current command...");
    }) {
        log::warn!("Could not install Ctrl-C handler: {}", e);
    }
}

pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}
