use dirs::data_dir;
use once_cell::sync::Lazy;
use std::{
    fs,
    path::{Path, PathBuf},
};

static DATA_ROOT: Lazy<PathBuf> = Lazy::new(|| {
    let base = data_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let root = base.join("event-form");
    if let Err(err) = fs::create_dir_all(&root) {
        log::warn!("failed to create data root {:?}: {err}", root);
    }
    root
});

pub fn data_root() -> PathBuf {
    DATA_ROOT.clone()
}

pub fn default_store_path() -> PathBuf {
    data_root().join("events.json")
}

pub fn config_path() -> PathBuf {
    data_root().join("config.json")
}

pub fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Final component of a picked path, used for button captions.
pub fn file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_strips_directories() {
        assert_eq!(file_name("/home/me/pictures/poster.png"), "poster.png");
        assert_eq!(file_name("poster.png"), "poster.png");
    }

    #[test]
    fn ensure_parent_accepts_bare_file_names() {
        ensure_parent(Path::new("events.json")).expect("no parent to create");
    }

    #[test]
    fn ensure_parent_creates_nested_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("a").join("b").join("events.json");
        ensure_parent(&target).expect("create parents");
        assert!(dir.path().join("a").join("b").is_dir());
    }
}
