//! Numeric directory enumeration.
//!
//! Node and link directories are named by decimal index, but sysfs mixes
//! in other entries. Anything that is hidden or not all digits is skipped
//! silently; only a failure to open, read or close the directory itself
//! is an error.
//!
//! `std::fs::ReadDir` closes its handle on drop and swallows the result,
//! so the handle is driven through `libc` to report `closedir` failures.

use std::ffi::{CStr, CString, OsStr, OsString};
use std::io;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::{Path, PathBuf};
use std::ptr::NonNull;

use nix::errno::Errno;

use crate::{Error, Result};

/// Parse an entry name as an index.
///
/// `None` for hidden names, empty names, anything with a non-digit, digit
/// strings too large for `u32`, and zero-padded names like `007`. Paths are
/// rebuilt from the parsed integer, so a padded name could never be resolved.
pub fn parse_index(name: &OsStr) -> Option<u32> {
    let bytes = name.as_bytes();
    if bytes.is_empty() || bytes[0] == b'.' || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    // All ASCII digits, so valid UTF-8.
    std::str::from_utf8(bytes).ok()?.parse().ok()
}

/// Indices of the numeric entries directly under `path`, ascending.
///
/// The directory handle is closed before returning on every path.
pub fn numeric_entries(path: &Path) -> Result<Vec<u32>> {
    let mut dir = DirHandle::open(path)?;

    let mut indices = Vec::new();
    let scanned = loop {
        match dir.next_name() {
            Ok(Some(name)) => match parse_index(&name) {
                Some(index) => indices.push(index),
                None => {
                    tracing::debug!(
                        dir = %path.display(),
                        entry = ?name,
                        "skipping non-index entry"
                    );
                }
            },
            Ok(None) => break Ok(()),
            Err(e) => break Err(e),
        }
    };

    let closed = dir.close();
    match (scanned, closed) {
        (Ok(()), Ok(())) => {}
        (Ok(()), Err(close_err)) => return Err(close_err),
        (Err(scan_err), Ok(())) => return Err(scan_err),
        (Err(scan_err), Err(close_err)) => {
            tracing::warn!(error = %close_err, "directory close failed after read error");
            return Err(scan_err);
        }
    }

    indices.sort_unstable();
    Ok(indices)
}

// ============================================================================
// DirHandle
// ============================================================================

/// An open `DIR*` stream.
///
/// Call [`close`](DirHandle::close) to observe the result of `closedir`.
/// Dropping an unclosed handle still closes it, ignoring the result.
pub struct DirHandle {
    dir: Option<NonNull<libc::DIR>>,
    path: PathBuf,
}

impl DirHandle {
    pub fn open(path: &Path) -> Result<Self> {
        let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|_| {
            Error::InvalidArgument(format!("path contains a NUL byte: {}", path.display()))
        })?;

        // SAFETY: c_path is a valid NUL-terminated string for the duration of the call.
        let dir = unsafe { libc::opendir(c_path.as_ptr()) };
        match NonNull::new(dir) {
            Some(dir) => Ok(Self { dir: Some(dir), path: path.to_path_buf() }),
            None => Err(Error::Io {
                path: path.to_path_buf(),
                source: io::Error::last_os_error(),
            }),
        }
    }

    /// Next entry name, `None` at end of stream. Includes `.` and `..`.
    pub fn next_name(&mut self) -> Result<Option<OsString>> {
        let Some(dir) = self.dir else {
            return Ok(None);
        };

        // readdir signals both end-of-stream and failure with NULL; errno tells them apart.
        Errno::clear();
        // SAFETY: dir is an open stream owned by self and not shared.
        let entry = unsafe { libc::readdir(dir.as_ptr()) };
        if entry.is_null() {
            let err = io::Error::last_os_error();
            return match err.raw_os_error() {
                None | Some(0) => Ok(None),
                Some(_) => Err(Error::Io { path: self.path.clone(), source: err }),
            };
        }

        // SAFETY: readdir returned a valid dirent whose d_name is NUL-terminated and
        // stays valid until the next readdir/closedir on this stream; it is copied out here.
        let name = unsafe { CStr::from_ptr((*entry).d_name.as_ptr()) };
        Ok(Some(OsString::from_vec(name.to_bytes().to_vec())))
    }

    pub fn close(mut self) -> Result<()> {
        let Some(dir) = self.dir.take() else {
            return Ok(());
        };
        // SAFETY: dir was obtained from opendir and is closed exactly once (taken above).
        if unsafe { libc::closedir(dir.as_ptr()) } != 0 {
            return Err(Error::DirectoryClose {
                path: self.path.clone(),
                source: io::Error::last_os_error(),
            });
        }
        Ok(())
    }
}

impl Drop for DirHandle {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            // SAFETY: dir is still open; close() takes it before closing.
            unsafe { libc::closedir(dir.as_ptr()) };
        }
    }
}
