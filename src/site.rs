//! Static-site build.
//!
//! The deployable site is a verbatim copy of a few top-level project paths
//! (`index.html`, `assets/`, `data/`) into a fresh output directory. Missing
//! sources are skipped with a warning so a project without, say, an assets
//! folder still builds.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::BuildError;

/// Output directory used when none is configured.
pub const DEFAULT_OUT_DIR: &str = "dist";

/// Paths copied when none are configured.
pub const DEFAULT_SOURCES: [&str; 3] = ["index.html", "assets", "data"];

/// What a build copied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    /// Absolute output directory.
    pub out_dir: PathBuf,
    /// Sources copied, in configured order.
    pub copied: Vec<String>,
    /// Sources skipped because they do not exist.
    pub skipped: Vec<String>,
    /// Number of regular files written.
    pub files: usize,
}

/// Clears `out_dir` and copies each of `sources` from `root` into it.
///
/// A relative `out_dir` is taken relative to `root`.
///
/// # Errors
///
/// Returns [`BuildError::InvalidSource`] for a source that is not a plain
/// relative path, [`BuildError::UnsafeOutputDir`] when the output directory
/// would overlap the project root or a source, and [`BuildError::Io`] when a
/// filesystem operation fails.
pub fn build_static<S: AsRef<str>>(
    root: &Path,
    out_dir: &Path,
    sources: &[S],
) -> Result<BuildSummary, BuildError> {
    let root = absolute(root)?;
    let out = absolute(&root.join(out_dir))?;

    for name in sources {
        let name = name.as_ref();
        if !is_plain_relative(name) {
            return Err(BuildError::InvalidSource {
                name: name.to_string(),
            });
        }
    }
    check_out_dir(&root, &out, sources)?;

    info!(out_dir = %out.display(), "creating output directory");
    match fs::remove_dir_all(&out) {
        Ok(()) => debug!("removed previous build output"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(io_err(&out, e)),
    }
    fs::create_dir_all(&out).map_err(|e| io_err(&out, e))?;

    let mut summary = BuildSummary {
        out_dir: out.clone(),
        ..BuildSummary::default()
    };

    for name in sources {
        let name = name.as_ref();
        let src = root.join(name);
        if !src.exists() {
            warn!(source = name, "skipping missing source");
            summary.skipped.push(name.to_string());
            continue;
        }

        let dest = out.join(name);
        info!(source = name, dest = %dest.display(), "copying");
        summary.files += copy_tree(&src, &dest)?;
        summary.copied.push(name.to_string());
    }

    info!(
        files = summary.files,
        skipped = summary.skipped.len(),
        "build complete"
    );
    Ok(summary)
}

/// Copies a file or directory tree, returning the number of files and
/// symlinks written.
///
/// Symlinks below `src` are recreated as symlinks, never followed.
fn copy_tree(src: &Path, dest: &Path) -> Result<usize, BuildError> {
    let mut files = 0;
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_err(src, e))?;
        let path = entry.path();
        let Ok(relative) = path.strip_prefix(src) else {
            continue;
        };
        let target = if relative.as_os_str().is_empty() {
            dest.to_path_buf()
        } else {
            dest.join(relative)
        };
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(|e| io_err(&target, e))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
        if file_type.is_symlink() {
            copy_symlink(path, &target)?;
        } else {
            fs::copy(path, &target).map_err(|e| io_err(path, e))?;
        }
        files += 1;
    }
    Ok(files)
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dest: &Path) -> Result<(), BuildError> {
    let link = fs::read_link(src).map_err(|e| io_err(src, e))?;
    std::os::unix::fs::symlink(&link, dest).map_err(|e| io_err(dest, e))
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dest: &Path) -> Result<(), BuildError> {
    // No portable symlink creation; copy the target's contents for links to files.
    fs::copy(src, dest).map(|_| ()).map_err(|e| io_err(src, e))
}

fn walk_err(root: &Path, err: walkdir::Error) -> BuildError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
    BuildError::Io { path, source }
}

fn check_out_dir<S: AsRef<str>>(root: &Path, out: &Path, sources: &[S]) -> Result<(), BuildError> {
    if root.starts_with(out) {
        return Err(BuildError::UnsafeOutputDir {
            out_dir: out.to_path_buf(),
            reason: format!("it contains the project root {}", root.display()),
        });
    }
    for name in sources {
        let src = root.join(name.as_ref());
        if out.starts_with(&src) {
            return Err(BuildError::UnsafeOutputDir {
                out_dir: out.to_path_buf(),
                reason: format!("it lies inside the source {}", name.as_ref()),
            });
        }
    }
    Ok(())
}

/// `true` for a non-empty relative path made only of normal components.
#[must_use]
pub fn is_plain_relative(name: &str) -> bool {
    let path = Path::new(name);
    !name.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// Absolute, lexically normalized form of `path`.
fn absolute(path: &Path) -> Result<PathBuf, BuildError> {
    let abs = std::path::absolute(path).map_err(|e| io_err(path, e))?;
    let mut out = PathBuf::new();
    for component in abs.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

fn io_err(path: &Path, source: std::io::Error) -> BuildError {
    BuildError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("index.html"), "<html></html>").unwrap();
        fs::create_dir_all(root.join("assets/img")).unwrap();
        fs::write(root.join("assets/main.js"), "console.log(1)").unwrap();
        fs::write(root.join("assets/img/otter.png"), [0u8, 1, 2]).unwrap();
        fs::create_dir(root.join("data")).unwrap();
        fs::write(root.join("data/content.json"), "{}").unwrap();
        tmp
    }

    #[test]
    fn copies_default_sources() {
        let tmp = project();
        let summary = build_static(tmp.path(), Path::new("dist"), &DEFAULT_SOURCES).unwrap();

        assert_eq!(summary.copied, vec!["index.html", "assets", "data"]);
        assert!(summary.skipped.is_empty());
        assert_eq!(summary.files, 4);
        let dist = tmp.path().join("dist");
        assert_eq!(
            fs::read(dist.join("assets/img/otter.png")).unwrap(),
            vec![0u8, 1, 2]
        );
        assert_eq!(
            fs::read_to_string(dist.join("index.html")).unwrap(),
            "<html></html>"
        );
    }

    #[test]
    fn missing_sources_are_skipped() {
        let tmp = project();
        fs::remove_dir_all(tmp.path().join("assets")).unwrap();
        let summary = build_static(tmp.path(), Path::new("dist"), &DEFAULT_SOURCES).unwrap();
        assert_eq!(summary.copied, vec!["index.html", "data"]);
        assert_eq!(summary.skipped, vec!["assets"]);
        assert!(!tmp.path().join("dist/assets").exists());
    }

    #[test]
    fn stale_output_is_cleared() {
        let tmp = project();
        fs::create_dir_all(tmp.path().join("dist/old")).unwrap();
        fs::write(tmp.path().join("dist/old/stale.txt"), "x").unwrap();
        build_static(tmp.path(), Path::new("dist"), &DEFAULT_SOURCES).unwrap();
        assert!(!tmp.path().join("dist/old").exists());
    }

    #[test]
    fn refuses_root_as_output() {
        let tmp = project();
        let err = build_static(tmp.path(), Path::new("."), &DEFAULT_SOURCES).unwrap_err();
        assert!(matches!(err, BuildError::UnsafeOutputDir { .. }));
        let err = build_static(tmp.path(), Path::new(".."), &DEFAULT_SOURCES).unwrap_err();
        assert!(matches!(err, BuildError::UnsafeOutputDir { .. }));
        assert!(tmp.path().join("index.html").exists());
    }

    #[test]
    fn refuses_output_inside_a_source() {
        let tmp = project();
        let err = build_static(tmp.path(), Path::new("assets/dist"), &DEFAULT_SOURCES).unwrap_err();
        assert!(matches!(err, BuildError::UnsafeOutputDir { .. }));
    }

    #[test]
    fn rejects_escaping_sources() {
        let tmp = project();
        for bad in ["../etc", "/etc", "", "./data"] {
            let err = build_static(tmp.path(), Path::new("dist"), &[bad]).unwrap_err();
            assert!(
                matches!(err, BuildError::InvalidSource { .. }),
                "{bad}: {err:?}"
            );
        }
    }

    #[test]
    fn absolute_output_dir_outside_root() {
        let tmp = project();
        let out = tempfile::tempdir().unwrap();
        let summary =
            build_static(tmp.path(), &out.path().join("site"), &["data".to_string()]).unwrap();
        assert_eq!(summary.files, 1);
        assert!(out.path().join("site/data/content.json").exists());
    }

    #[test]
    fn single_file_source() {
        let tmp = project();
        let summary = build_static(tmp.path(), Path::new("dist"), &["index.html"]).unwrap();
        assert_eq!(summary.files, 1);
        assert!(tmp.path().join("dist/index.html").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_copied_not_followed() {
        let tmp = project();
        std::os::unix::fs::symlink("..", tmp.path().join("assets/up")).unwrap();

        let summary = build_static(tmp.path(), Path::new("dist"), &DEFAULT_SOURCES).unwrap();

        assert_eq!(summary.files, 5);
        let link = tmp.path().join("dist/assets/up");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&link).unwrap(), PathBuf::from(".."));
    }

    #[test]
    fn copy_preserves_nested_layout() {
        let tmp = project();
        fs::create_dir_all(tmp.path().join("assets/img/icons")).unwrap();
        fs::write(tmp.path().join("assets/img/icons/star.svg"), "<svg/>").unwrap();
        let summary = build_static(tmp.path(), Path::new("dist"), &["assets"]).unwrap();
        assert_eq!(summary.files, 3);
        assert_eq!(
            fs::read_to_string(tmp.path().join("dist/assets/img/icons/star.svg")).unwrap(),
            "<svg/>"
        );
    }
}
