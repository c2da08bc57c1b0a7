use std::{
    env,
    path::{Path, PathBuf},
    process::Command,
    thread,
};

use color_eyre::{Result, eyre::WrapErr as _};
use engine::{
    ShareBox, ShareTarget,
    share::SharePayload,
};
use log::{debug, info};

#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(target_os = "windows")]
const OPENER: &str = "explorer";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPENER: &str = "xdg-open";

/// Shares through the desktop's mail client, via the platform's URI opener.
#[derive(Debug, Clone)]
pub struct SystemShare {
    opener: PathBuf,
}

impl SystemShare {
    /// `None` when the opener isn't installed, in which case sharing is not offered.
    pub fn detect() -> Option<Self> {
        let opener = find_on_path(OPENER)?;
        info!("Sharing available through {}", opener.display());
        Some(Self { opener })
    }
}

impl ShareTarget for SystemShare {
    fn share(&self, payload: &SharePayload) -> Result<()> {
        let uri = payload.mailto_uri()?;
        debug!("Opening {uri}");
        let mut child = Command::new(&self.opener)
            .arg(&uri)
            .spawn()
            .wrap_err_with(|| format!("Couldn't run {}", self.opener.display()))?;
        // reap the opener so it doesn't linger as a zombie
        thread::spawn(move || child.wait());
        Ok(())
    }

    fn clone(&self) -> ShareBox {
        Box::new(Clone::clone(self))
    }
}

fn find_on_path(name: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths).find_map(|dir| executable_in(&dir, name))
}

fn executable_in(dir: &Path, name: &str) -> Option<PathBuf> {
    let candidates = if cfg!(windows) {
        vec![dir.join(format!("{name}.exe"))]
    } else {
        vec![dir.join(name)]
    };
    candidates.into_iter().find(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_executables_in_a_directory() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let name = if cfg!(windows) { "opener.exe" } else { "opener" };
        std::fs::write(dir.path().join(name), "")?;

        assert_eq!(
            executable_in(dir.path(), "opener"),
            Some(dir.path().join(name))
        );
        assert_eq!(executable_in(dir.path(), "missing"), None);
        Ok(())
    }
}
