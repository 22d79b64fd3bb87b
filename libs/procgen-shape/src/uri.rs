//! File URI helpers.
//!
//! The engine addresses rule packages and geometry by URI; hosts hand us
//! filesystem paths.

use std::path::{Path, PathBuf};

use url::Url;

use crate::error::UriError;

/// Converts a filesystem path into a percent-encoded `file://` URI.
///
/// Relative paths are resolved against the current directory.
///
/// # Example
///
/// ```rust
/// # #[cfg(unix)]
/// # {
/// use std::path::Path;
/// use procgen_shape::to_file_uri;
///
/// let uri = to_file_uri(Path::new("/tmp/my lot.obj")).unwrap();
/// assert_eq!(uri, "file:///tmp/my%20lot.obj");
/// # }
/// ```
pub fn to_file_uri(path: &Path) -> Result<String, UriError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| UriError::CurrentDir(e.to_string()))?
            .join(path)
    };

    Url::from_file_path(&absolute)
        .map(String::from)
        .map_err(|()| UriError::NotAFilePath(absolute.display().to_string()))
}

/// Converts a `file://` URI back into a path. Any other scheme yields `None`.
pub fn file_uri_to_path(uri: &str) -> Option<PathBuf> {
    let url = Url::parse(uri).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}
