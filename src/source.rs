//! Input source detection for local paths vs remote HTTP/HTTPS URLs.

use color_eyre::Result;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum InputSource {
    Local(PathBuf),
    Http(String),
}

/// Classifies the path as local or HTTP/HTTPS using string parsing only (no filesystem calls).
pub(crate) fn input_source(path: &Path) -> InputSource {
    let s = path.as_os_str().to_string_lossy();
    if let Some(after_scheme) = s.find("://") {
        let prefix = s[..after_scheme].to_lowercase();
        if prefix == "http" || prefix == "https" {
            return InputSource::Http(s.to_string());
        }
    }
    InputSource::Local(path.to_path_buf())
}

/// Returns the file extension of the last path segment of a URL (host stripped for HTTP).
/// Used to pick the temp file suffix for downloads.
pub(crate) fn url_extension(url: &str) -> Option<String> {
    let path_part = if let Some(i) = url.find("://") {
        let after = &url[i + 3..];
        after
            .find('/')
            .map(|j| after[j + 1..].to_string())
            .unwrap_or_default()
    } else {
        String::new()
    };
    let last_segment = path_part.rsplit('/').next().unwrap_or(&path_part);
    Path::new(last_segment)
        .extension()
        .and_then(|e| e.to_str())
        .map(String::from)
}

/// Downloads an HTTP/HTTPS resource to a temp file and returns its path.
/// Single attempt with a timeout; a retry policy would slot in here without
/// touching the loading code downstream.
pub(crate) fn download_http_to_temp(url: &str) -> Result<PathBuf> {
    let suffix = url_extension(url)
        .map(|e| format!(".{e}"))
        .unwrap_or_else(|| ".csv".to_string());
    let mut temp = tempfile::Builder::new()
        .suffix(&suffix)
        .tempfile()
        .map_err(|_| color_eyre::eyre::eyre!("Could not create a temporary file."))?;
    let response = ureq::get(url)
        .timeout(std::time::Duration::from_secs(300))
        .call()
        .map_err(|e| {
            color_eyre::eyre::eyre!("Download failed. Check the URL and your connection: {}", e)
        })?;
    let status = response.status();
    if status >= 400 {
        return Err(color_eyre::eyre::eyre!(
            "Server returned {} {}. Check the URL.",
            status,
            response.status_text()
        ));
    }
    std::io::copy(&mut response.into_reader(), &mut temp)
        .map_err(|_| color_eyre::eyre::eyre!("Download failed while saving the file."))?;
    let (_file, path) = temp
        .keep()
        .map_err(|_| color_eyre::eyre::eyre!("Could not save the downloaded file."))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_source_local_path() {
        let p = PathBuf::from("/tmp/salaries.csv");
        assert!(matches!(input_source(&p), InputSource::Local(_)));
        let p = PathBuf::from("relative.csv");
        assert!(matches!(input_source(&p), InputSource::Local(_)));
        let p = PathBuf::from(".");
        assert!(matches!(input_source(&p), InputSource::Local(_)));
    }

    #[test]
    fn input_source_http() {
        let p = PathBuf::from("https://example.com/data.csv");
        match input_source(&p) {
            InputSource::Http(u) => assert_eq!(u, "https://example.com/data.csv"),
            _ => panic!("expected Http"),
        }
        let p = PathBuf::from("HTTP://host/path/file.csv");
        match input_source(&p) {
            InputSource::Http(u) => assert_eq!(u, "HTTP://host/path/file.csv"),
            _ => panic!("expected Http"),
        }
    }

    #[test]
    fn input_source_unknown_scheme_stays_local() {
        let p = PathBuf::from("file:///tmp/foo.csv");
        assert!(matches!(input_source(&p), InputSource::Local(_)));
        let p = PathBuf::from("s3://bucket/key.csv");
        assert!(matches!(input_source(&p), InputSource::Local(_)));
    }

    #[test]
    fn url_extension_http() {
        assert_eq!(
            url_extension("https://example.com/dir/data.csv").as_deref(),
            Some("csv")
        );
        assert_eq!(
            url_extension("https://x.com/raw/refs/heads/main/dados.csv").as_deref(),
            Some("csv")
        );
        assert_eq!(url_extension("https://example.com/no-extension"), None);
    }
}
