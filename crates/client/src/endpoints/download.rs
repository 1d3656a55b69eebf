//! Writing a successful parse response to disk.
//!
//! # Invariants
//! - The target name is reduced to its final path component, so a server
//!   cannot direct the write outside the output directory.
//! - Data is streamed into `<name>.part` and renamed once complete. A failed
//!   or dropped transfer leaves no partial file behind.
//! - Existing files are kept unless overwriting is enabled; the first free
//!   ` (n)` name is claimed with `create_new` instead.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use reqwest::Response;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::models::DownloadHandle;

/// Where and how downloads are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    /// Directory the file goes into.
    pub dir: PathBuf,
    /// Replace an existing file of the same name.
    pub overwrite: bool,
}

/// Extract a file name from a `Content-Disposition` header value.
///
/// Handles `filename="name"` and RFC 5987 `filename*=UTF-8''encoded`, the
/// latter taking precedence.
pub fn filename_from_disposition(value: &str) -> Option<String> {
    let mut plain = None;
    for part in value.split(';') {
        let part = part.trim();
        if let Some(encoded) = part.strip_prefix("filename*=") {
            let encoded = encoded.rsplit('\'').next().unwrap_or(encoded);
            if let Ok(decoded) = percent_decode_str(encoded.trim_matches('"')).decode_utf8() {
                let name = sanitize_file_name(&decoded);
                if name.is_some() {
                    return name;
                }
            }
        } else if let Some(raw) = part.strip_prefix("filename=") {
            plain = sanitize_file_name(raw.trim_matches('"'));
        }
    }
    plain
}

/// Reduce a name to its final path component, rejecting empty and dot names.
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next()?.trim();
    if last.is_empty() || last == "." || last == ".." {
        None
    } else {
        Some(last.to_string())
    }
}

/// Upper bound on ` (n)` suffixes tried before giving up.
const MAX_NAME_ATTEMPTS: usize = 1000;

/// `dir/name.ext`, then `dir/name (1).ext`, `dir/name (2).ext`, ...
fn candidate_paths(dir: &Path, file_name: &str) -> impl Iterator<Item = PathBuf> {
    let as_path = Path::new(file_name);
    let stem = as_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    let extension = as_path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let dir = dir.to_path_buf();
    std::iter::once(dir.join(file_name))
        .chain((1..).map(move |n| dir.join(format!("{stem} ({n}){extension}"))))
}

/// Claim the first free name for `file_name` in `dir` by creating it empty.
///
/// The file is created with `create_new`, so a name another process takes in
/// the meantime is skipped rather than replaced.
pub async fn reserve_path(dir: &Path, file_name: &str) -> Result<PathBuf> {
    for candidate in candidate_paths(dir, file_name).take(MAX_NAME_ATTEMPTS) {
        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
            .await
        {
            Ok(_) => return Ok(candidate),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(source) => {
                return Err(ClientError::Io {
                    path: candidate,
                    source,
                });
            }
        }
    }
    Err(ClientError::Io {
        path: dir.join(file_name),
        source: std::io::Error::new(std::io::ErrorKind::AlreadyExists, "no free file name"),
    })
}

/// Files of an unfinished download, removed on drop unless disarmed.
///
/// Also runs when the `save_response` future is dropped mid-transfer.
struct PartialFiles(Vec<PathBuf>);

impl PartialFiles {
    fn disarm(mut self) {
        self.0.clear();
    }
}

impl Drop for PartialFiles {
    fn drop(&mut self) {
        for path in &self.0 {
            if let Err(e) = std::fs::remove_file(path)
                && e.kind() != std::io::ErrorKind::NotFound
            {
                debug!(path = %path.display(), error = %e, "Failed to remove partial download");
            }
        }
    }
}

/// Stream the response body into the download target.
///
/// `fallback_name` is used when the response carries no usable
/// `Content-Disposition` file name.
pub async fn save_response(
    mut response: Response,
    target: &DownloadTarget,
    fallback_name: &str,
) -> Result<DownloadHandle> {
    let headers = response.headers();
    let file_name = headers
        .get(CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(filename_from_disposition)
        .or_else(|| sanitize_file_name(fallback_name))
        .unwrap_or_else(|| fallback_name.to_string());
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    tokio::fs::create_dir_all(&target.dir)
        .await
        .map_err(|source| ClientError::Io {
            path: target.dir.clone(),
            source,
        })?;

    let mut partial = PartialFiles(Vec::with_capacity(2));
    let path = if target.overwrite {
        target.dir.join(&file_name)
    } else {
        let reserved = reserve_path(&target.dir, &file_name).await?;
        partial.0.push(reserved.clone());
        reserved
    };
    let part_path = path.with_file_name(format!(
        "{}.part",
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.clone())
    ));
    partial.0.push(part_path.clone());

    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ClientError::Io { path, source }
    };

    let mut file = tokio::fs::File::create(&part_path)
        .await
        .map_err(io_err(&part_path))?;

    let mut bytes_written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await.map_err(io_err(&part_path))?;
        bytes_written += chunk.len() as u64;
    }
    file.flush().await.map_err(io_err(&part_path))?;
    drop(file);

    // Replaces the empty reservation, or the old file when overwriting.
    tokio::fs::rename(&part_path, &path)
        .await
        .map_err(io_err(&path))?;
    partial.disarm();

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(file_name);
    debug!(path = %path.display(), bytes_written, "Download written");

    Ok(DownloadHandle {
        path,
        file_name,
        bytes_written,
        content_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_filename_from_disposition_quoted() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="server.log.xlsx""#),
            Some("server.log.xlsx".to_string())
        );
    }

    #[test]
    fn test_filename_from_disposition_rfc5987_preferred() {
        assert_eq!(
            filename_from_disposition(
                "attachment; filename=\"fallback.xlsx\"; filename*=UTF-8''r%C3%A9sum%C3%A9.xlsx"
            ),
            Some("résumé.xlsx".to_string())
        );
    }

    #[test]
    fn test_filename_from_disposition_strips_directories() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="../../etc/passwd""#),
            Some("passwd".to_string())
        );
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="C:\temp\out.xlsx""#),
            Some("out.xlsx".to_string())
        );
    }

    #[test]
    fn test_filename_from_disposition_missing() {
        assert_eq!(filename_from_disposition("inline"), None);
        assert_eq!(filename_from_disposition(r#"attachment; filename="..""#), None);
    }

    #[tokio::test]
    async fn test_reserve_path_appends_counter() {
        let dir = TempDir::new().unwrap();
        let first = reserve_path(dir.path(), "app.log.xlsx").await.unwrap();
        assert_eq!(first, dir.path().join("app.log.xlsx"));
        assert!(first.exists());

        let second = reserve_path(dir.path(), "app.log.xlsx").await.unwrap();
        assert_eq!(second, dir.path().join("app.log (1).xlsx"));

        let third = reserve_path(dir.path(), "app.log.xlsx").await.unwrap();
        assert_eq!(third, dir.path().join("app.log (2).xlsx"));
    }

    #[tokio::test]
    async fn test_reserve_path_never_claims_existing_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("report.xlsx"), b"keep me").unwrap();

        let reserved = reserve_path(dir.path(), "report.xlsx").await.unwrap();
        assert_eq!(reserved, dir.path().join("report (1).xlsx"));
        assert_eq!(
            std::fs::read(dir.path().join("report.xlsx")).unwrap(),
            b"keep me"
        );
    }

    #[test]
    fn test_partial_files_removed_on_drop() {
        let dir = TempDir::new().unwrap();
        let part = dir.path().join("r.xlsx.part");
        std::fs::write(&part, b"half").unwrap();

        drop(PartialFiles(vec![part.clone(), dir.path().join("missing")]));
        assert!(!part.exists());
    }

    #[test]
    fn test_disarmed_partial_files_are_kept() {
        let dir = TempDir::new().unwrap();
        let done = dir.path().join("r.xlsx");
        std::fs::write(&done, b"full").unwrap();

        PartialFiles(vec![done.clone()]).disarm();
        assert!(done.exists());
    }
}
