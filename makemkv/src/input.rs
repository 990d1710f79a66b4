use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Source makemkvcon reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Disc in the drive with this index.
    Disc(u32),
    /// Device, ISO image, `.IFO` file or DVD/Blu-ray folder.
    Path(PathBuf),
}

impl Default for Input {
    fn default() -> Self {
        Input::Disc(0)
    }
}

impl From<u32> for Input {
    fn from(index: u32) -> Self {
        Input::Disc(index)
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::Path(path)
    }
}

impl From<&Path> for Input {
    fn from(path: &Path) -> Self {
        Input::Path(path.to_path_buf())
    }
}

impl Input {
    /// Formats the input in makemkvcon's `type:name` syntax.
    ///
    /// Paths are inspected on disk: block devices become `dev:`, `.iso`
    /// files `iso:` and `.ifo` files point at their folder. A folder holding
    /// a `VIDEO_TS` subfolder is replaced by that subfolder.
    pub fn locator(&self) -> Result<String> {
        let path = match self {
            Input::Disc(index) => return Ok(format!("disc:{index}")),
            Input::Path(path) => path,
        };

        if is_device(path) {
            return Ok(format!("dev:{}", path.display()));
        }

        match extension(path).as_deref() {
            Some("iso") => return Ok(format!("iso:{}", path.display())),
            Some("ifo") => {
                let parent = path
                    .parent()
                    .filter(|parent| !parent.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."));
                return Ok(format!("file:{}", parent.display()));
            }
            _ => {}
        }

        if path.is_dir() && !is_video_ts_folder(path) {
            let entries = fs::read_dir(path)
                .with_context(|| format!("Failed to list {}", path.display()))?;
            for entry in entries {
                let child = entry?.path();
                if is_video_ts_folder(&child) {
                    return Ok(format!("file:{}", child.display()));
                }
            }
        }

        Ok(format!("file:{}", path.display()))
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Disc(index) => write!(f, "disc {index}"),
            Input::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}

/// Matches `VIDEO_TS`, `video-ts`, `Video TS`, `videots` and the like.
fn is_video_ts_name(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    let Some(rest) = name.strip_prefix("video") else {
        return false;
    };
    let rest = rest
        .strip_prefix(['-', '_', ' '])
        .unwrap_or(rest);
    rest.starts_with("ts")
}

fn is_video_ts_folder(path: &Path) -> bool {
    path.is_dir()
        && path
            .file_name()
            .is_some_and(|name| is_video_ts_name(&name.to_string_lossy()))
}

#[cfg(unix)]
fn is_device(path: &Path) -> bool {
    use std::os::unix::fs::FileTypeExt;

    fs::metadata(path).is_ok_and(|meta| meta.file_type().is_block_device())
}

#[cfg(windows)]
fn is_device(path: &Path) -> bool {
    use std::path::Component;

    // `D:` or `D:\`
    let mut components = path.components();
    matches!(components.next(), Some(Component::Prefix(_)))
        && components.all(|c| matches!(c, Component::RootDir))
}

#[cfg(not(any(unix, windows)))]
fn is_device(_path: &Path) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disc_index() -> Result<()> {
        assert_eq!(Input::Disc(0).locator()?, "disc:0");
        assert_eq!(Input::from(3).locator()?, "disc:3");
        assert_eq!(Input::default(), Input::Disc(0));
        Ok(())
    }

    #[test]
    fn video_ts_names() {
        for name in ["VIDEO_TS", "video_ts", "Video-TS", "VIDEO TS", "videots"] {
            assert!(is_video_ts_name(name), "{name}");
        }
        for name in ["AUDIO_TS", "BDMV", "my video_ts", "video"] {
            assert!(!is_video_ts_name(name), "{name}");
        }
    }

    #[test]
    fn image_and_ifo_files() -> Result<()> {
        let dir = tempfile::tempdir()?;

        let iso = dir.path().join("movie.ISO");
        fs::write(&iso, b"")?;
        assert_eq!(
            Input::from(iso.clone()).locator()?,
            format!("iso:{}", iso.display())
        );

        let ifo = dir.path().join("VIDEO_TS.IFO");
        fs::write(&ifo, b"")?;
        assert_eq!(
            Input::from(ifo).locator()?,
            format!("file:{}", dir.path().display())
        );
        Ok(())
    }

    #[test]
    fn bare_ifo_name_uses_current_dir() -> Result<()> {
        assert_eq!(Input::from(PathBuf::from("VIDEO_TS.IFO")).locator()?, "file:.");
        assert_eq!(
            Input::from(PathBuf::from("disc/VIDEO_TS.IFO")).locator()?,
            "file:disc"
        );
        Ok(())
    }

    #[test]
    fn folder_with_video_ts() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let video_ts = dir.path().join("VIDEO_TS");
        fs::create_dir(&video_ts)?;
        fs::create_dir(dir.path().join("AUDIO_TS"))?;

        assert_eq!(
            Input::from(dir.path()).locator()?,
            format!("file:{}", video_ts.display())
        );
        assert_eq!(
            Input::from(video_ts.clone()).locator()?,
            format!("file:{}", video_ts.display())
        );
        Ok(())
    }

    #[test]
    fn plain_folder_and_missing_path() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::create_dir(dir.path().join("BDMV"))?;
        assert_eq!(
            Input::from(dir.path()).locator()?,
            format!("file:{}", dir.path().display())
        );

        let missing = dir.path().join("missing");
        assert_eq!(
            Input::from(missing.clone()).locator()?,
            format!("file:{}", missing.display())
        );
        Ok(())
    }
}
