// Environment detection utilities

use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag to force headless mode (set by --headless CLI flag)
static FORCE_HEADLESS: AtomicBool = AtomicBool::new(false);

pub fn set_headless_override(headless: bool) {
    FORCE_HEADLESS.store(headless, Ordering::Relaxed);
}

/// Check if a browser cannot be launched from this session
///
/// Headless mode is detected when:
/// - --headless CLI flag is set (highest priority)
/// - SSH_TTY or SSH_CONNECTION is set
/// - CI is set
/// - TERM is "dumb" or empty
/// - On Linux and other non-macOS Unix: neither DISPLAY nor WAYLAND_DISPLAY is set
pub fn is_headless_environment() -> bool {
    if FORCE_HEADLESS.load(Ordering::Relaxed) {
        tracing::debug!("Headless mode: forced by --headless flag");
        return true;
    }

    detect_headless(|key| std::env::var(key).ok())
}

fn detect_headless<F>(var: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    for key in ["SSH_TTY", "SSH_CONNECTION", "CI"] {
        if var(key).is_some() {
            tracing::debug!("Headless detected: {} set", key);
            return true;
        }
    }

    if let Some(term) = var("TERM") {
        if term == "dumb" || term.is_empty() {
            tracing::debug!("Headless detected: TERM is '{}'", term);
            return true;
        }
    }

    // macOS and Windows have no X11/Wayland display variable
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        if var("DISPLAY").is_none() && var("WAYLAND_DISPLAY").is_none() {
            tracing::debug!("Headless detected: no DISPLAY or WAYLAND_DISPLAY");
            return true;
        }
    }

    tracing::debug!("Not headless: detected graphical environment");
    false
}
