//! Platform abstraction layer
//!
//! Applies entry metadata to extracted files, plus the UTF-16 helpers the
//! Windows host glue needs.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Platform-specific operations trait
pub trait Platform {
    /// Set file permissions from Unix mode bits
    fn set_permissions(&self, path: &Path, mode: u32) -> std::io::Result<()>;

    /// Set file modification time
    fn set_mtime(&self, path: &Path, mtime: SystemTime) -> std::io::Result<()> {
        let file = fs::OpenOptions::new().write(true).open(path)?;
        file.set_modified(mtime)
    }
}

/// Unix platform implementation
#[cfg(unix)]
pub struct UnixPlatform;

#[cfg(unix)]
impl Platform for UnixPlatform {
    fn set_permissions(&self, path: &Path, mode: u32) -> std::io::Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(mode & 0o777);
        fs::set_permissions(path, perms)
    }
}

/// Windows platform implementation
#[cfg(windows)]
pub struct WindowsPlatform;

#[cfg(windows)]
impl Platform for WindowsPlatform {
    fn set_permissions(&self, path: &Path, mode: u32) -> std::io::Result<()> {
        let mut perms = fs::metadata(path)?.permissions();
        // Windows only knows the readonly flag
        let readonly = (mode & 0o200) == 0;
        perms.set_readonly(readonly);
        fs::set_permissions(path, perms)
    }
}

/// Generic platform implementation for other OSes
#[cfg(not(any(unix, windows)))]
pub struct GenericPlatform;

#[cfg(not(any(unix, windows)))]
impl Platform for GenericPlatform {
    fn set_permissions(&self, _path: &Path, _mode: u32) -> std::io::Result<()> {
        Ok(())
    }
}

/// Get the platform implementation for the current OS
pub fn current_platform() -> &'static impl Platform {
    #[cfg(unix)]
    {
        static PLATFORM: UnixPlatform = UnixPlatform;
        &PLATFORM
    }

    #[cfg(windows)]
    {
        static PLATFORM: WindowsPlatform = WindowsPlatform;
        &PLATFORM
    }

    #[cfg(not(any(unix, windows)))]
    {
        static PLATFORM: GenericPlatform = GenericPlatform;
        &PLATFORM
    }
}

/// NUL-terminated UTF-16 copy of `input`.
pub fn utf8_to_utf16(input: &str) -> Vec<u16> {
    let mut wide: Vec<u16> = input.encode_utf16().collect();
    wide.push(0);
    wide
}

/// Decode UTF-16 up to the first NUL. Unpaired surrogates become U+FFFD.
pub fn utf16_to_utf8(input: &[u16]) -> String {
    let nul_pos = input.iter().position(|c| *c == 0).unwrap_or(input.len());
    String::from_utf16_lossy(&input[..nul_pos])
}

/// Convert an archive timestamp to `SystemTime`.
///
/// ZIP stores local wall-clock time. The local offset is used when it can
/// be determined, UTC otherwise. Invalid dates give `None`.
pub fn zip_time_to_system_time(dt: zip::DateTime) -> Option<SystemTime> {
    let month = time::Month::try_from(dt.month()).ok()?;
    let date = time::Date::from_calendar_date(dt.year() as i32, month, dt.day()).ok()?;
    let clock = time::Time::from_hms(dt.hour(), dt.minute(), dt.second()).ok()?;
    let offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    Some(date.with_time(clock).assume_offset(offset).into())
}
