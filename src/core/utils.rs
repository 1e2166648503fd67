use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use super::errors::Result;

const DEFAULT_DIR_NAME: &str = ".budget_tracker";
const HOME_ENV: &str = "BUDGET_TRACKER_HOME";
const DATA_DIR: &str = "data";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const STORE_FILE: &str = "tracker.json";

/// Resolves every on-disk location used by the tracker from a single base directory.
pub struct PathResolver;

impl PathResolver {
    /// Base directory: `$BUDGET_TRACKER_HOME`, falling back to `~/.budget_tracker`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn data_dir_in(base: &Path) -> PathBuf {
        base.join(DATA_DIR)
    }

    pub fn store_file_in(base: &Path) -> PathBuf {
        Self::data_dir_in(base).join(STORE_FILE)
    }

    pub fn config_dir_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        Self::config_dir_in(base).join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Sibling path used to stage a write before renaming it over `path`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.tmp"),
        None => "tmp".to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Stages `data` next to `path` and renames it into place, so readers only ever
/// observe the previous or the new contents.
pub fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn tmp_path_keeps_original_extension() {
        let path = Path::new("/tmp/data/tracker.json");
        assert_eq!(tmp_path(path), PathBuf::from("/tmp/data/tracker.json.tmp"));
        assert_eq!(tmp_path(Path::new("plain")), PathBuf::from("plain.tmp"));
    }

    #[test]
    fn write_atomic_creates_parent_dirs() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("nested").join("file.json");
        write_atomic(&path, "{}").expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read"), "{}");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn resolver_layout_is_rooted_at_base() {
        let base = Path::new("/srv/tracker");
        assert_eq!(
            PathResolver::store_file_in(base),
            PathBuf::from("/srv/tracker/data/tracker.json")
        );
        assert_eq!(
            PathResolver::config_file_in(base),
            PathBuf::from("/srv/tracker/config/config.json")
        );
    }
}
