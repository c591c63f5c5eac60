//! Input cache stored next to each day's source folder

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the cached puzzle input
pub const INPUT_FILE_NAME: &str = "input.txt";

/// File-based cache for one day's puzzle input
///
/// Layout: `{day_folder}/input.txt`. A cached file is always trusted; nothing
/// ever invalidates it.
#[derive(Debug, Clone)]
pub struct InputCache {
    path: PathBuf,
}

impl InputCache {
    /// Cache for the day whose source lives in `day_folder`
    pub fn new(day_folder: &Path) -> Self {
        Self {
            path: day_folder.join(INPUT_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if input is cached
    pub fn contains(&self) -> bool {
        self.path.is_file()
    }

    /// Get cached input or None if not cached
    pub fn get(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Store raw input bytes, creating the folder if needed
    pub fn put(&self, input: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, input)
    }
}
