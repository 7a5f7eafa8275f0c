use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

/// An upload spilled to disk for loaders that only accept a path.
///
/// Every handle owns a freshly created directory, so concurrent parse calls
/// never collide. Dropping the handle removes the directory as well; call
/// [`TempUpload::cleanup`] to get the failure logged.
pub struct TempUpload {
    dir: TempDir,
    path: PathBuf,
}

impl TempUpload {
    pub fn create(bytes: &[u8], file_name: &str) -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("intake-").tempdir()?;
        let path = dir.path().join(file_name);
        let mut file = std::fs::File::create(&path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        Ok(Self { dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the directory. Never fails; a directory that is not empty is
    /// ignored silently, anything else is logged.
    pub fn cleanup(self) {
        let dir_path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            if e.kind() == io::ErrorKind::DirectoryNotEmpty {
                debug!(dir = %dir_path.display(), "temp directory not empty, leaving it");
            } else {
                warn!(dir = %dir_path.display(), "Failed to remove temp upload: {e}");
            }
        }
    }
}
