use std::path::{Path, PathBuf};

use super::{DeliveryContext, DeliveryError};

/// Write text to `path`, creating parent directories
pub fn write_file(path: &Path, text: &str) -> Result<PathBuf, DeliveryError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| DeliveryError::Io(format!("{}: {}", parent.display(), e)))?;
    }
    std::fs::write(path, text).map_err(|e| DeliveryError::Io(format!("{}: {}", path.display(), e)))?;
    tracing::info!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(path.to_path_buf())
}

/// Save `file_name` into the configured download directory
///
/// Without an `output_dir` the file lands in the working directory.
pub fn download(
    ctx: &DeliveryContext,
    file_name: &str,
    text: &str,
) -> Result<PathBuf, DeliveryError> {
    let path = match &ctx.config().output_dir {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    };
    write_file(&path, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WizardConfig;

    #[test]
    fn test_write_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/init.lua");
        let written = write_file(&path, "-- hi\n").unwrap();
        assert_eq!(written, path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "-- hi\n");
    }

    #[test]
    fn test_download_uses_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = DeliveryContext::new(WizardConfig {
            output_dir: Some(dir.path().to_path_buf()),
            ..WizardConfig::default()
        });
        let path = download(&ctx, "init.lua", "x").unwrap();
        assert_eq!(path, dir.path().join("init.lua"));
        assert!(path.exists());
    }
}
