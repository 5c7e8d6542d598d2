//! Artifact Stager.
//!
//! Moves packaged artifacts from the staging area into the final output tree.
//! Destinations are always replaced, never merged into: a stale file or
//! folder at the destination is removed before the copy.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Filesystem failures while staging or placing artifacts.
#[derive(Debug, Error)]
pub enum FsError {
  #[error("source {} does not exist", path.display())]
  MissingSource { path: PathBuf },

  #[error("failed to remove {}: {source}", path.display())]
  Remove { path: PathBuf, source: io::Error },

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: io::Error },

  #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
  Copy {
    from: PathBuf,
    to: PathBuf,
    source: io::Error,
  },

  #[error("failed to read symlink {}: {source}", path.display())]
  ReadSymlink { path: PathBuf, source: io::Error },

  #[error("failed to walk {}: {message}", path.display())]
  Walk { path: PathBuf, message: String },

  #[error("failed to write file {}: {source}", path.display())]
  WriteFile { path: PathBuf, source: io::Error },
}

/// Replace `dst` with a recursive copy of `src`.
///
/// Symbolic links inside `src` are recreated as links. Running it twice with
/// the same arguments leaves `dst` identical to `src`.
pub fn merge_tree(src: &Path, dst: &Path) -> Result<(), FsError> {
  merge_tree_excluding(src, dst, &[])
}

/// [`merge_tree`], leaving out the `exclude` subtrees of `src`.
pub fn merge_tree_excluding(src: &Path, dst: &Path, exclude: &[&Path]) -> Result<(), FsError> {
  if !src.is_dir() {
    return Err(FsError::MissingSource { path: src.to_path_buf() });
  }
  remove_dir_if_exists(dst)?;
  copy_tree_excluding(src, dst, exclude)
}

/// Recursively copy `src` into `dst`, creating `dst` as needed.
///
/// Existing files in `dst` with the same relative path are overwritten, other
/// content is left alone. Use [`merge_tree`] for a full replacement. When
/// `dst` lies inside `src` it is skipped, so a tree is never copied into
/// itself.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<(), FsError> {
  copy_tree_excluding(src, dst, &[])
}

fn copy_tree_excluding(src: &Path, dst: &Path, exclude: &[&Path]) -> Result<(), FsError> {
  debug!(src = %src.display(), dst = %dst.display(), "copying tree");

  let root = resolve_lenient(src);
  let skipped: Vec<PathBuf> = exclude
    .iter()
    .copied()
    .chain([dst])
    .filter_map(|path| nested_in(&root, path))
    .collect();
  if !skipped.is_empty() {
    debug!(?skipped, "excluding nested subtrees");
  }

  let walker = WalkDir::new(src)
    .follow_links(false)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|entry| {
      let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
      !skipped.iter().any(|skip| rel == skip.as_path())
    });

  for entry in walker {
    let entry = entry.map_err(|e| FsError::Walk {
      path: src.to_path_buf(),
      message: e.to_string(),
    })?;

    let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
    let target = dst.join(rel);
    let file_type = entry.file_type();

    // The root itself is followed even when it is a link.
    if file_type.is_dir() || rel.as_os_str().is_empty() {
      fs::create_dir_all(&target).map_err(|e| FsError::CreateDir {
        path: target.clone(),
        source: e,
      })?;
    } else if file_type.is_symlink() {
      copy_symlink(entry.path(), &target)?;
    } else {
      copy_file(entry.path(), &target)?;
    }
  }

  Ok(())
}

/// Move a single file to `dst`, replacing whatever is there.
///
/// The destination is deleted first, then `src` is copied over and removed.
/// The parent of `dst` must already exist.
pub fn place_file(src: &Path, dst: &Path) -> Result<(), FsError> {
  if !src.is_file() {
    return Err(FsError::MissingSource { path: src.to_path_buf() });
  }

  if dst.symlink_metadata().is_ok() {
    fs::remove_file(dst).map_err(|e| FsError::Remove {
      path: dst.to_path_buf(),
      source: e,
    })?;
  }

  copy_file(src, dst)?;

  fs::remove_file(src).map_err(|e| FsError::Remove {
    path: src.to_path_buf(),
    source: e,
  })
}

/// Remove a directory tree if present.
pub fn remove_dir_if_exists(path: &Path) -> Result<(), FsError> {
  let result = match fs::symlink_metadata(path) {
    Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
    Ok(_) => fs::remove_file(path),
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
    Err(e) => Err(e),
  };
  result.map_err(|e| FsError::Remove {
    path: path.to_path_buf(),
    source: e,
  })
}

/// Canonical form of `path`, resolving through its parent when `path` itself
/// does not exist yet.
fn resolve_lenient(path: &Path) -> PathBuf {
  if let Ok(canonical) = dunce::canonicalize(path) {
    return canonical;
  }
  match (path.parent(), path.file_name()) {
    (Some(parent), Some(name)) => resolve_lenient(parent).join(name),
    _ => path.to_path_buf(),
  }
}

/// Path of `path` relative to `root`, if it lies strictly inside it.
fn nested_in(root: &Path, path: &Path) -> Option<PathBuf> {
  let resolved = resolve_lenient(path);
  let rel = resolved.strip_prefix(root).ok()?;
  (!rel.as_os_str().is_empty()).then(|| rel.to_path_buf())
}

fn copy_file(src: &Path, dst: &Path) -> Result<(), FsError> {
  fs::copy(src, dst).map(|_| ()).map_err(|e| FsError::Copy {
    from: src.to_path_buf(),
    to: dst.to_path_buf(),
    source: e,
  })
}

/// Recreate a link at `dst` pointing where `src` points.
///
/// Falls back to copying the dereferenced target when the platform refuses
/// to create the link. A dangling link then fails the copy.
fn copy_symlink(src: &Path, dst: &Path) -> Result<(), FsError> {
  let link_target = fs::read_link(src).map_err(|e| FsError::ReadSymlink {
    path: src.to_path_buf(),
    source: e,
  })?;

  if dst.symlink_metadata().is_ok() {
    remove_dir_if_exists(dst)?;
  }

  match create_symlink(&link_target, src, dst) {
    Ok(()) => Ok(()),
    Err(e) => {
      warn!(
        link = %src.display(),
        error = %e,
        "could not recreate symlink, copying its target instead"
      );
      if src.is_dir() {
        copy_tree(src, dst)
      } else {
        copy_file(src, dst)
      }
    }
  }
}

#[cfg(unix)]
fn create_symlink(link_target: &Path, _src: &Path, dst: &Path) -> io::Result<()> {
  std::os::unix::fs::symlink(link_target, dst)
}

#[cfg(windows)]
fn create_symlink(link_target: &Path, src: &Path, dst: &Path) -> io::Result<()> {
  if src.is_dir() {
    std::os::windows::fs::symlink_dir(link_target, dst)
  } else {
    std::os::windows::fs::symlink_file(link_target, dst)
  }
}

/// Write a file, creating parent directories.
pub fn write_file(path: &Path, contents: &str) -> Result<(), FsError> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).map_err(|e| FsError::CreateDir {
      path: parent.to_path_buf(),
      source: e,
    })?;
  }
  fs::write(path, contents).map_err(|e| FsError::WriteFile {
    path: path.to_path_buf(),
    source: e,
  })
}
