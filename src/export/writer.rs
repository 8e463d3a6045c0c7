use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{Error, Result};

/// Number of numbered copies the tutor reads as its starting population.
pub const DEFAULT_SNAPSHOT_COUNT: usize = 300;

/// Where a finished model is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    /// Canonical export, e.g. `data/model.json`.
    pub model: PathBuf,
    /// Directory receiving `0.json`, `1.json`, ...
    pub snapshot_dir: PathBuf,
    pub snapshots: usize,
}

impl Default for ExportPaths {
    fn default() -> Self {
        ExportPaths {
            model: PathBuf::from("data/model.json"),
            snapshot_dir: PathBuf::from("data/current"),
            snapshots: DEFAULT_SNAPSHOT_COUNT,
        }
    }
}

impl ExportPaths {
    pub fn snapshot_path(&self, index: usize) -> PathBuf {
        self.snapshot_dir.join(format!("{index}.json"))
    }
}

/// Writes the same serialized document to the canonical path and to every
/// numbered snapshot path. Returns the paths written, canonical first.
///
/// Missing parent directories are created.
pub fn write_exports(json: &str, paths: &ExportPaths) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(paths.snapshots + 1);

    write_file(&paths.model, json)?;
    written.push(paths.model.clone());

    if paths.snapshots > 0 {
        fs::create_dir_all(&paths.snapshot_dir).map_err(|e| Error::io(&paths.snapshot_dir, e))?;
    }
    for index in 0..paths.snapshots {
        let path = paths.snapshot_path(index);
        write_file(&path, json)?;
        written.push(path);
    }

    info!(
        "wrote {} ({} bytes) and {} snapshots to {}",
        paths.model.display(),
        json.len(),
        paths.snapshots,
        paths.snapshot_dir.display()
    );
    Ok(written)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| Error::io(path, e))?;
    debug!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_match_engine_layout() {
        let paths = ExportPaths::default();
        assert_eq!(paths.model, PathBuf::from("data/model.json"));
        assert_eq!(paths.snapshot_path(0), PathBuf::from("data/current/0.json"));
        assert_eq!(paths.snapshot_path(299), PathBuf::from("data/current/299.json"));
        assert_eq!(paths.snapshots, 300);
    }

    #[test]
    fn writes_identical_copies() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ExportPaths {
            model: dir.path().join("model.json"),
            snapshot_dir: dir.path().join("current"),
            snapshots: 5,
        };
        let written = write_exports(r#"{"K":2,"Weights":[]}"#, &paths).unwrap();

        assert_eq!(written.len(), 6);
        assert_eq!(written[0], paths.model);
        assert_eq!(written[5], dir.path().join("current").join("4.json"));
        let canonical = fs::read(&paths.model).unwrap();
        for path in &written[1..] {
            assert_eq!(fs::read(path).unwrap(), canonical);
        }
        assert!(!dir.path().join("current").join("5.json").exists());
    }

    #[test]
    fn zero_snapshots_writes_only_model() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ExportPaths {
            model: dir.path().join("out").join("model.json"),
            snapshot_dir: dir.path().join("current"),
            snapshots: 0,
        };
        assert_eq!(write_exports("{}", &paths).unwrap(), vec![paths.model.clone()]);
        assert!(!paths.snapshot_dir.exists());
    }
}
