use std::fs;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use tracing::debug;

use crate::api::{Snapshot, SnapshotStore};
use crate::error::StorageError;

const QUALIFIER: &str = "com";
const ORG: &str = "macroevent";
const APP: &str = "rsvp";

/// Snapshot cache backed by one JSON file.
pub struct FileSnapshotStore {
    path: Utf8PathBuf,
}

impl FileSnapshotStore {
    /// Store at an explicit file path.
    pub fn at(path: Utf8PathBuf) -> Self {
        Self { path }
    }

    /// Store inside `dir`, using the configured snapshot file name.
    pub fn in_dir(dir: &Utf8Path) -> Self {
        Self {
            path: dir.join(rsvp_config::SNAPSHOT_FILE),
        }
    }

    /// Store in the platform state directory.
    pub fn in_default_dir() -> Result<Self, StorageError> {
        let dirs = ProjectDirs::from(QUALIFIER, ORG, APP).ok_or(StorageError::NoStateDir)?;
        let dir = Utf8PathBuf::from_path_buf(dirs.data_local_dir().to_path_buf())
            .map_err(|_| StorageError::NoStateDir)?;
        Ok(Self {
            path: dir.join(rsvp_config::SNAPSHOT_FILE),
        })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn try_save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_std_path().exists() {
                fs::create_dir_all(parent.as_std_path())?;
            }
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        atomic_write(self.path.as_std_path(), json.as_bytes())?;
        Ok(())
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn save(&self, snapshot: &Snapshot) {
        let snapshot = snapshot.clone().normalized();
        if let Err(err) = self.try_save(&snapshot) {
            debug!(path = %self.path, error = %err, "snapshot save skipped");
        }
    }

    fn load(&self) -> Option<Snapshot> {
        let content = fs::read_to_string(self.path.as_std_path()).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn clear(&self) {
        let _ = fs::remove_file(self.path.as_std_path());
    }
}

/// Write-to-temp-then-rename so a crashed write never corrupts an existing
/// snapshot.
fn atomic_write(path: &std::path::Path, contents: &[u8]) -> std::io::Result<()> {
    let tmp_path = {
        let mut name = path.as_os_str().to_os_string();
        name.push(".tmp");
        std::path::PathBuf::from(name)
    };

    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);

    match fs::rename(&tmp_path, path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            fs::remove_file(path).ok();
            fs::rename(&tmp_path, path)?;
        }
        Err(e) => return Err(e),
    }

    if let Some(parent) = path.parent() {
        if let Ok(dir) = fs::File::open(parent) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}
