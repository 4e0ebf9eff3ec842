//! The display side effect: hand a finished figure to the platform viewer.
//!
//! Every render call ends here. `Viewer` writes the figure to a temporary
//! PNG and spawns the platform opener; `Auto` does the same only when a
//! graphical session is present; `Headless` is the non-interactive backend
//! for tests and pipelines and never touches the filesystem.

use crate::figure::Figure;
use crate::DisplayMode;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};

static DISPLAY_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Show a figure according to the display mode
pub fn show(figure: &Figure, mode: DisplayMode) -> Result<()> {
    match mode {
        DisplayMode::Headless => {
            log::debug!("display skipped (headless)");
            Ok(())
        }
        DisplayMode::Auto if !session_available() => {
            log::debug!("display skipped (no graphical session)");
            Ok(())
        }
        _ => open_in_viewer(figure),
    }
}

/// Best-effort check for a graphical session on the current platform
fn session_available() -> bool {
    if cfg!(target_os = "linux") {
        std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some()
    } else {
        true
    }
}

fn open_in_viewer(figure: &Figure) -> Result<()> {
    let path = temp_png_path();
    figure.save(&path)?;
    log::info!("displaying plot via {}", path.display());

    viewer_command(&path)
        .spawn()
        .with_context(|| format!("Failed to launch a viewer for '{}'", path.display()))?;
    Ok(())
}

/// Unique path per shown figure, so successive plots never clobber each other
fn temp_png_path() -> PathBuf {
    let n = DISPLAY_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("scattergram-{}-{}.png", std::process::id(), n))
}

#[cfg(target_os = "macos")]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(target_os = "windows")]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]);
    cmd.arg(path);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}
