use std::path::{Path, PathBuf};

pub const BACKUP_EXTENSION: &str = "bak";

/// A non-directory entry as seen by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
    /// Name with the final extension removed.
    pub base_name: String,
    /// Text after the final `.`, empty when the name has none.
    pub extension: String,
}

impl FileEntry {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (base_name, extension) = split_extension(&name);
        Self {
            base_name: base_name.to_string(),
            extension: extension.to_string(),
            name,
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_backup(&self) -> bool {
        self.extension == BACKUP_EXTENSION
    }

    /// A file answers to `key` when either its full name or its base name is
    /// `key`, so both `a.txt` and `a.txt.bak`, and `a.bak` and `a.txt`, pair up.
    pub fn answers_to(&self, key: &str) -> bool {
        self.name == key || self.base_name == key
    }
}

// `.bak` is a backup of the empty name, unlike `Path::extension` which treats
// it as a dotfile without extension.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rsplit_once('.') {
        Some((base, extension)) => (base, extension),
        None => (name, ""),
    }
}
