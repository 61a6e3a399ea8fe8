// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// Write a whole file, creating parent directories first. Truncates.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::Validation(format!("Path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// `-o` handling: empty → default file name in the working dir;
/// a directory (or something that looks like one) → default name inside it.
pub fn resolve_single_out_path(user_o: &str, default_filename: &str) -> Result<PathBuf> {
    if user_o.is_empty() { return Ok(PathBuf::from(default_filename)); }
    let p = PathBuf::from(normalize_separators(user_o));
    if looks_like_dir_hint(&p) || p.is_dir() {
        ensure_directory(&p)?;
        Ok(p.join(default_filename))
    } else {
        Ok(p)
    }
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_text_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset/nested/filters.json");
        write_text(&path, "{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn out_path_variants() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_single_out_path("", "R02.png").unwrap(), PathBuf::from("R02.png"));

        let d = dir.path().to_string_lossy().into_owned();
        assert_eq!(resolve_single_out_path(&d, "R02.png").unwrap(), dir.path().join("R02.png"));

        let f = dir.path().join("swatch.png");
        assert_eq!(resolve_single_out_path(&f.to_string_lossy(), "R02.png").unwrap(), f);
    }

    #[test]
    fn file_in_the_way_of_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("dataset");
        fs::write(&blocker, "").unwrap();
        assert!(ensure_directory(&blocker).is_err());
    }
}
