use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::errors::ScreenerError;

/// Destination for binary payloads the user asked to download.
pub trait Downloader: Send {
    fn save(&mut self, file_name: &str, contents: &[u8]) -> Result<PathBuf, ScreenerError>;
}

/// Writes downloads into a fixed directory.
pub struct DirDownloader {
    dir: PathBuf,
}

impl DirDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Downloader for DirDownloader {
    fn save(&mut self, file_name: &str, contents: &[u8]) -> Result<PathBuf, ScreenerError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(sanitize_file_name(file_name));
        fs::write(&path, contents)?;
        info!("Saved {} bytes to {}", contents.len(), path.display());
        Ok(path)
    }
}

/// Keeps a download inside its directory: path separators and other
/// characters most filesystems reject become `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    match cleaned.trim_matches('.') {
        "" => "download".to_string(),
        _ => cleaned,
    }
}
