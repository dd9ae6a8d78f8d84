//! Safe archive extraction.
//!
//! # Responsibilities
//! - Extract node release archives (tar.gz, zip) into a target directory
//! - Sanitize every entry path before anything touches the filesystem
//!
//! # Security Invariant
//! No write ever lands outside the destination directory, regardless of
//! archive contents: absolute entry paths and any `..` component are
//! rejected, and symlink entries are skipped.

use std::fs;
use std::io::Read;
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use thiserror::Error;

/// Errors from archive extraction.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Filesystem or stream failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Entry path would escape the destination directory.
    #[error("unsafe entry path: {0}")]
    UnsafePath(String),

    /// Zip container is malformed.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Resolve an entry path inside `dest`, rejecting traversal.
///
/// Returns the full path to write, or an error if the entry is absolute
/// or contains a `..` component.
fn sanitize_entry(dest: &Path, entry: &Path) -> ArchiveResult<PathBuf> {
    let mut out = dest.to_path_buf();
    for component in entry.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ArchiveError::UnsafePath(entry.display().to_string()));
            }
        }
    }
    // Belt and suspenders: the joined path must still be under dest.
    if !out.starts_with(dest) {
        return Err(ArchiveError::UnsafePath(entry.display().to_string()));
    }
    Ok(out)
}

/// Extract a gzip-compressed tar stream into `dest`.
///
/// Directories are created as needed; symlink and hardlink entries are
/// skipped with a warning.
pub fn extract_tar_gz<R: Read>(reader: R, dest: &Path) -> ArchiveResult<()> {
    fs::create_dir_all(dest)?;
    let mut archive = tar::Archive::new(GzDecoder::new(reader));

    for entry in archive.entries()? {
        let mut entry = entry?;
        let raw_path = entry.path()?.into_owned();
        let target = sanitize_entry(dest, &raw_path)?;

        let kind = entry.header().entry_type();
        if kind.is_symlink() || kind.is_hard_link() {
            tracing::warn!(path = %raw_path.display(), "Skipping link entry in archive");
            continue;
        }
        if kind.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        entry.unpack(&target)?;
    }

    tracing::debug!(dest = %dest.display(), "Archive extracted");
    Ok(())
}

/// Extract a zip archive into `dest`.
pub fn extract_zip(archive_path: &Path, dest: &Path) -> ArchiveResult<()> {
    fs::create_dir_all(dest)?;
    let file = fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let raw_path = PathBuf::from(entry.name());
        let target = sanitize_entry(dest, &raw_path)?;

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = fs::File::create(&target)?;
        std::io::copy(&mut entry, &mut out)?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&target, fs::Permissions::from_mode(mode))?;
        }
    }

    tracing::debug!(dest = %dest.display(), "Archive extracted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_plain_path() {
        let dest = Path::new("/tmp/extract");
        let out = sanitize_entry(dest, Path::new("bin/node")).unwrap();
        assert_eq!(out, Path::new("/tmp/extract/bin/node"));
    }

    #[test]
    fn test_sanitize_strips_curdir() {
        let dest = Path::new("/tmp/extract");
        let out = sanitize_entry(dest, Path::new("./bin/./node")).unwrap();
        assert_eq!(out, Path::new("/tmp/extract/bin/node"));
    }

    #[test]
    fn test_sanitize_rejects_parent_traversal() {
        let dest = Path::new("/tmp/extract");
        for evil in ["../evil", "bin/../../evil", "a/b/../../../evil"] {
            assert!(
                matches!(sanitize_entry(dest, Path::new(evil)), Err(ArchiveError::UnsafePath(_))),
                "{} should be rejected",
                evil
            );
        }
    }

    #[test]
    fn test_sanitize_rejects_absolute() {
        let dest = Path::new("/tmp/extract");
        assert!(matches!(
            sanitize_entry(dest, Path::new("/etc/passwd")),
            Err(ArchiveError::UnsafePath(_))
        ));
    }

    #[test]
    fn test_tar_gz_round_trip() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
        let data = b"#!/bin/sh\necho node\n";
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder.append_data(&mut header, "bin/node", data.as_slice()).unwrap();
        let gz = builder.into_inner().unwrap().finish().unwrap();

        let dir = tempfile::tempdir().unwrap();
        extract_tar_gz(gz.as_slice(), dir.path()).unwrap();

        let extracted = fs::read(dir.path().join("bin/node")).unwrap();
        assert_eq!(extracted, data);
    }

    #[test]
    fn test_zip_slip_rejected() {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        // The zip writer happily records a traversal name; extraction must not.
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut writer = zip::ZipWriter::new(file.reopen().unwrap());
        writer
            .start_file("../evil.txt", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"pwned").unwrap();
        writer.finish().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let result = extract_zip(file.path(), dir.path());
        assert!(matches!(result, Err(ArchiveError::UnsafePath(_))));

        // Nothing may have escaped the destination
        assert!(!dir.path().parent().unwrap().join("evil.txt").exists());
    }

    #[test]
    fn test_zip_round_trip() {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        let file = tempfile::NamedTempFile::new().unwrap();
        let mut writer = zip::ZipWriter::new(file.reopen().unwrap());
        writer
            .start_file("config/node.json", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"{\"network\":\"local\"}").unwrap();
        writer.finish().unwrap();

        let dir = tempfile::tempdir().unwrap();
        extract_zip(file.path(), dir.path()).unwrap();

        let extracted = fs::read_to_string(dir.path().join("config/node.json")).unwrap();
        assert_eq!(extracted, "{\"network\":\"local\"}");
    }
}
