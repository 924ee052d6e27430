//! Write-then-rename file output.
//!
//! Bytes go to `{path}.tmp`, are synced, then the temp file is renamed over
//! `path`. An interrupted write leaves any previous file at `path` intact.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

pub fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path);
    let mut file = File::create(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("transport_catalogue_atomic_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_writes_and_overwrites() {
        let dir = test_dir("overwrite");
        let path = dir.join("base.db");

        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        assert!(!temp_path(&path).exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = test_dir("parents");
        let path = dir.join("nested").join("deeper").join("base.db");

        atomic_write(&path, b"data").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"data");
        let _ = fs::remove_dir_all(&dir);
    }
}
