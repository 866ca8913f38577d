//! Release artifact helpers.
//!
//! # Responsibilities
//! - Find the binaries waiting in the upload folders
//! - Decide which of them go through large-file storage
//! - Keep `.gitattributes` tracking lines in sync
//! - Embed an access token into a GitHub push URL
//!
//! # Design Decisions
//! - Only files directly inside an upload folder count; subdirectories are ignored
//! - Nothing here shells out; the caller runs the actual push

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use url::Url;

pub const DEFAULT_UPLOAD_FOLDERS: [&str; 2] = ["apk", "windows"];

/// Extensions tracked through large-file storage.
pub const LFS_EXTENSIONS: [&str; 10] = [
    ".apk", ".xapk", ".exe", ".msi", ".zip", ".rar", ".7z", ".iso", ".dmg", ".pkg",
];

pub const GITATTRIBUTES: &str = ".gitattributes";

#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReleaseError {
    fn io(path: &Path, source: io::Error) -> Self {
        ReleaseError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A file waiting to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub size: u64,
    pub lfs: bool,
}

/// Create any missing upload folders under `root`. Returns the ones created.
pub fn ensure_folders(root: &Path, folders: &[&str]) -> Result<Vec<PathBuf>, ReleaseError> {
    let mut created = Vec::new();
    for name in folders {
        let path = root.join(name);
        if !path.is_dir() {
            fs::create_dir_all(&path).map_err(|e| ReleaseError::io(&path, e))?;
            created.push(path);
        }
    }
    Ok(created)
}

/// Files directly inside each upload folder, sorted by path. Missing folders are skipped.
pub fn collect_artifacts(root: &Path, folders: &[&str]) -> Result<Vec<Artifact>, ReleaseError> {
    let mut artifacts = Vec::new();
    for name in folders {
        let dir = root.join(name);
        if !dir.is_dir() {
            continue;
        }
        let entries = fs::read_dir(&dir).map_err(|e| ReleaseError::io(&dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| ReleaseError::io(&dir, e))?;
            let path = entry.path();
            let meta = entry.metadata().map_err(|e| ReleaseError::io(&path, e))?;
            if !meta.is_file() {
                continue;
            }
            let lfs = is_lfs_tracked(&path);
            artifacts.push(Artifact {
                path,
                size: meta.len(),
                lfs,
            });
        }
    }
    artifacts.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(artifacts)
}

pub fn has_files_to_upload(root: &Path, folders: &[&str]) -> Result<bool, ReleaseError> {
    Ok(!collect_artifacts(root, folders)?.is_empty())
}

pub fn is_lfs_tracked(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| LFS_EXTENSIONS.iter().any(|ext| name.ends_with(ext)))
}

/// Human-readable size: 1024 base, one decimal, `B` through `TB`.
pub fn format_size(bytes: u64) -> String {
    let mut n = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if n < 1024.0 {
            return format!("{n:.1} {unit}");
        }
        n /= 1024.0;
    }
    format!("{n:.1} TB")
}

/// Push URL for `remote` carrying `token` as userinfo.
///
/// Only `github.com` remotes are rewritten: the scheme becomes `https` and
/// any existing userinfo and port are replaced. Anything else, including an
/// empty token or an unparsable remote, comes back unchanged.
pub fn remote_url_with_token(remote: &str, token: &str) -> String {
    let token = token.trim();
    if token.is_empty() {
        return remote.to_string();
    }
    let Ok(parsed) = Url::parse(remote.trim()) else {
        return remote.to_string();
    };
    if parsed.host_str() != Some("github.com") {
        return remote.to_string();
    }

    let mut rebuilt = match Url::parse(&format!("https://github.com{}", parsed.path())) {
        Ok(url) => url,
        Err(_) => return remote.to_string(),
    };
    rebuilt.set_query(parsed.query());
    if rebuilt.set_username(token).is_err() {
        return remote.to_string();
    }
    rebuilt.to_string()
}

/// The `.gitattributes` line tracking `ext` through large-file storage.
pub fn gitattributes_line(ext: &str) -> String {
    format!("*{ext} filter=lfs diff=lfs merge=lfs -text")
}

/// Append any missing tracking lines to `<root>/.gitattributes`.
/// Returns the lines added; a second run adds nothing.
pub fn sync_gitattributes(root: &Path) -> Result<Vec<String>, ReleaseError> {
    let path = root.join(GITATTRIBUTES);
    let existing = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(ReleaseError::io(&path, e)),
    };

    let missing: Vec<String> = LFS_EXTENSIONS
        .iter()
        .map(|ext| gitattributes_line(ext))
        .filter(|line| !existing.lines().any(|l| l.trim() == line))
        .collect();
    if missing.is_empty() {
        return Ok(missing);
    }

    let mut content = existing;
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    for line in &missing {
        content.push_str(line);
        content.push('\n');
    }
    fs::write(&path, content).map_err(|e| ReleaseError::io(&path, e))?;
    Ok(missing)
}
