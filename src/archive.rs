//! Archive access
//!
//! Thin boundary over the `zip` crate. Everything the library can report is
//! turned into an [`ExtractError`] here, so the drivers only ever see
//! explicit results.

use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{debug, warn};

use crate::error::{zip_description, ExtractError, Result};
use crate::platform::{current_platform, zip_time_to_system_time, Platform};

/// Metadata of one archive entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Position in the archive
    pub index: usize,
    /// Name as stored in the archive
    pub name: String,
    /// Is directory
    pub is_dir: bool,
    /// Uncompressed size in bytes
    pub size: u64,
    /// Modification time, when the entry carries a valid one
    pub modified: Option<SystemTime>,
    /// Unix permissions (mode)
    pub unix_mode: Option<u32>,
}

/// A ZIP archive opened read-only
pub struct Archive {
    path: PathBuf,
    inner: zip::ZipArchive<BufReader<File>>,
}

impl Archive {
    /// Open the archive at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let open_err = |source| ExtractError::ArchiveOpen {
            path: path.clone(),
            source,
        };
        let file = File::open(&path).map_err(|e| open_err(zip::result::ZipError::Io(e)))?;
        let inner = zip::ZipArchive::new(BufReader::new(file)).map_err(open_err)?;
        debug!("opened {} ({} entries)", path.display(), inner.len());
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries, files and directories alike
    pub fn count(&self) -> usize {
        self.inner.len()
    }

    /// Index of the entry called `name`
    ///
    /// Names are matched exactly. A name written with `\` separators is
    /// retried with `/`, which is what archives store.
    pub fn find_file(&self, name: &str) -> Option<usize> {
        self.inner.index_for_name(name).or_else(|| {
            if name.contains('\\') {
                self.inner.index_for_name(&name.replace('\\', "/"))
            } else {
                None
            }
        })
    }

    /// Read the header of entry `index` without decompressing it
    pub fn file_info(&mut self, index: usize) -> Result<EntryInfo> {
        let archive = self.path.clone();
        let entry = self
            .inner
            .by_index_raw(index)
            .map_err(|source| ExtractError::EntryAttributes {
                index,
                archive,
                source,
            })?;

        Ok(EntryInfo {
            index,
            name: entry.name().to_string(),
            is_dir: entry.is_dir(),
            size: entry.size(),
            modified: entry.last_modified().and_then(zip_time_to_system_time),
            unix_mode: entry.unix_mode(),
        })
    }

    /// Extract the entry described by `info` below `destination`, keeping
    /// its path
    ///
    /// Errors raised while reading the entry (bad local data, checksum,
    /// unsupported method) come back as [`ExtractError::Library`]; failing
    /// to place or write the file is [`ExtractError::Extraction`].
    /// Returns the path that was written.
    pub fn extract_file(
        &mut self,
        info: &EntryInfo,
        destination: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let destination = destination.as_ref();
        let name = info.name.as_str();
        let mut entry = self
            .inner
            .by_index(info.index)
            .map_err(|e| ExtractError::library(zip_description(&e)))?;

        let relative = entry.enclosed_name().ok_or_else(|| {
            ExtractError::extraction(
                name,
                io::Error::new(io::ErrorKind::InvalidInput, "entry path escapes destination"),
            )
        })?;
        let output = destination.join(relative);

        if info.is_dir {
            fs::create_dir_all(&output).map_err(|e| ExtractError::extraction(name, e))?;
            debug!("created directory {}", output.display());
            return Ok(output);
        }

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(|e| ExtractError::extraction(name, e))?;
        }
        let mut outfile = File::create(&output).map_err(|e| ExtractError::extraction(name, e))?;
        copy_entry(&mut entry, &mut outfile, name)?;
        drop(outfile);

        apply_metadata(&output, info.modified, info.unix_mode);

        debug!("extracted {} ({} bytes) -> {}", name, info.size, output.display());
        Ok(output)
    }

    /// Release the archive
    pub fn close(self) {
        debug!("closed {}", self.path.display());
    }
}

/// Copy entry data, keeping read failures apart from write failures.
fn copy_entry(entry: &mut impl Read, out: &mut impl Write, name: &str) -> Result<()> {
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = match entry.read(&mut buf) {
            Ok(0) => return Ok(()),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ExtractError::library(e.to_string())),
        };
        out.write_all(&buf[..n])
            .map_err(|e| ExtractError::extraction(name, e))?;
    }
}

/// Restore timestamp and mode bits. Failures are not fatal.
fn apply_metadata(path: &Path, modified: Option<SystemTime>, unix_mode: Option<u32>) {
    let platform = current_platform();
    if let Some(mtime) = modified {
        if let Err(e) = platform.set_mtime(path, mtime) {
            warn!("cannot set mtime on {}: {}", path.display(), e);
        }
    }
    if let Some(mode) = unix_mode {
        if let Err(e) = platform.set_permissions(path, mode) {
            warn!("cannot set permissions on {}: {}", path.display(), e);
        }
    }
}
