//! Writes the generated document to disk.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

use crate::error::PrefdocError;

/// Writes `content` to `path`, creating parent directories as needed.
///
/// The file is only created once the full document has been assembled and
/// validated; there is no partial output.
///
/// # Errors
///
/// Returns [`PrefdocError::Io`] when the directory cannot be created or the
/// file cannot be written.
pub fn write_markdown(path: &Utf8Path, content: &str) -> Result<(), PrefdocError> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    };
    let file_name = path.file_name().ok_or_else(|| PrefdocError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "output path has no file name",
        ),
    })?;

    let dir = ensure_dir(&parent)?;
    let mut file = dir
        .open_with(
            file_name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(|io_err| PrefdocError::Io {
            path: path.to_path_buf(),
            source: io_err,
        })?;
    file.write_all(content.as_bytes())
        .map_err(|io_err| PrefdocError::Io {
            path: path.to_path_buf(),
            source: io_err,
        })
}

fn ensure_dir(path: &Utf8Path) -> Result<Dir, PrefdocError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority()).map_err(|io_err| {
                PrefdocError::Io {
                    path: path.to_path_buf(),
                    source: io_err,
                }
            })?;
            Dir::open_ambient_dir(path, ambient_authority()).map_err(|io_err| PrefdocError::Io {
                path: path.to_path_buf(),
                source: io_err,
            })
        }
        Err(open_err) => Err(PrefdocError::Io {
            path: path.to_path_buf(),
            source: open_err,
        }),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "tests fail loudly on fixture errors")]

    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn writes_content_creating_parent_directories() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 tempdir");
        let target = root.join("wiki/nested/Configuration.md");
        write_markdown(&target, "# Hello\n").expect("write succeeds");
        let written = std::fs::read_to_string(&target).expect("file readable");
        assert_eq!(written, "# Hello\n");
    }

    #[test]
    fn overwrites_existing_output() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 tempdir");
        let target = root.join("Configuration.md");
        write_markdown(&target, "long first version\n").expect("first write");
        write_markdown(&target, "short\n").expect("second write");
        let written = std::fs::read_to_string(&target).expect("file readable");
        assert_eq!(written, "short\n");
    }
}
