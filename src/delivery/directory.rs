//! Directory delivery: write `init.lua` into the editor's config directory

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use super::{DeliveryContext, DeliveryError};

pub const INIT_LUA: &str = "init.lua";

/// Result of a directory write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryWrite {
    pub path: PathBuf,
    /// Where the previous `init.lua` was moved, if there was one
    pub backup: Option<PathBuf>,
}

/// `init.lua.backup.<YYYYmmdd_HHMMSS>`
pub fn backup_file_name(now: DateTime<Local>) -> String {
    format!("{}.backup.{}", INIT_LUA, now.format("%Y%m%d_%H%M%S"))
}

/// Write `text` as `init.lua` in the context's target directory
///
/// An existing `init.lua` is renamed to a timestamped backup first.
pub fn write_init_lua(ctx: &DeliveryContext, text: &str) -> Result<DirectoryWrite, DeliveryError> {
    let dir = ctx.target_dir().ok_or(DeliveryError::NoTarget)?;
    write_init_lua_at(dir, text, Local::now())
}

pub(crate) fn write_init_lua_at(
    dir: &Path,
    text: &str,
    now: DateTime<Local>,
) -> Result<DirectoryWrite, DeliveryError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| DeliveryError::Io(format!("{}: {}", dir.display(), e)))?;

    let path = dir.join(INIT_LUA);
    let backup = if path.exists() {
        let backup = dir.join(backup_file_name(now));
        std::fs::rename(&path, &backup)
            .map_err(|e| DeliveryError::Io(format!("{}: {}", backup.display(), e)))?;
        tracing::info!("Backed up existing config to {}", backup.display());
        Some(backup)
    } else {
        None
    };

    std::fs::write(&path, text).map_err(|e| DeliveryError::Io(format!("{}: {}", path.display(), e)))?;
    tracing::info!("Wrote {}", path.display());
    Ok(DirectoryWrite { path, backup })
}

/// Ask the user for a target directory with a native folder picker
///
/// Returns `false` when the dialog was cancelled; the context is unchanged.
#[cfg(feature = "picker")]
pub fn pick_target_dir(ctx: &mut DeliveryContext) -> bool {
    let mut dlg = rfd::FileDialog::new().set_title("Choose your Neovim config directory");
    if let Some(dir) = ctx.target_dir() {
        dlg = dlg.set_directory(dir);
    }
    match dlg.pick_folder() {
        Some(folder) => {
            ctx.set_target_dir(folder);
            true
        }
        None => false,
    }
}
