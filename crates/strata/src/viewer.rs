//! Opening finished artifacts with the platform's default viewer.

use std::{
    io,
    path::Path,
    process::{Command, Stdio},
};

use log::info;

/// Spawns the platform opener for `path` without waiting for it.
pub(crate) fn open(path: &Path) -> io::Result<()> {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    info!(opener, path = path.display().to_string(); "Opening artifact");
    Command::new(opener)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}
