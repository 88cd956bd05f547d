//! Input acquisition: turns a CLI path argument into a contiguous, read-only
//! byte buffer shared by every scan worker.
//!
//! Returns an owned [`Buffer`] rather than a `Box<dyn Read>`: the scan
//! pipeline needs random access into the whole file, not a stream, since
//! tiles are scanned out of order across worker threads.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use memmap2::Mmap;

use crate::error::Error;

/// Sentinel accepted in place of a path: read standard input.
pub const STDIN_MARK: &str = "-";

/// A contiguous, read-only view of the input, regardless of how it was
/// acquired. `Deref`s to `&[u8]` so callers never need to match on the
/// origin.
pub enum Buffer {
    /// POSIX regular file, borrowed via `mmap`.
    Mapped(Mmap),
    /// Standard input or any source that cannot be mapped, read fully onto
    /// the heap.
    Owned(Vec<u8>),
}

impl std::ops::Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Buffer::Mapped(m) => &m[..],
            Buffer::Owned(v) => &v[..],
        }
    }
}

/// Loads `path` into a [`Buffer`].
///
/// - `path == "-"` reads standard input fully into a heap buffer (no
///   mapping is attempted: stdin is usually a pipe, not a regular file).
/// - Otherwise `path` must name a regular file; it is memory-mapped.
///   Zero-length files yield an empty [`Buffer::Owned`] (`mmap` of a
///   zero-length file is disallowed on some platforms, so the empty case is
///   special-cased rather than mapped).
pub fn load(path: &str) -> Result<Buffer, Error> {
    if path == STDIN_MARK {
        return load_stdin();
    }

    let p = Path::new(path);
    let meta = std::fs::metadata(p).map_err(|source| Error::IoOpen { path: path.to_owned(), source })?;
    if !meta.is_file() {
        return Err(Error::NotARegularFile { path: path.to_owned() });
    }

    let size = meta.len();
    if size > usize::MAX as u64 {
        return Err(Error::FileTooLarge { path: path.to_owned(), size });
    }
    if size == 0 {
        return Ok(Buffer::Owned(Vec::new()));
    }

    let file = File::open(p).map_err(|source| Error::IoOpen { path: path.to_owned(), source })?;
    // SAFETY: the file is not modified by this process for the duration of
    // the scan; all workers only read through the resulting slice.
    let mmap = unsafe { Mmap::map(&file) }
        .map_err(|source| Error::MmapFailed { path: path.to_owned(), source })?;
    Ok(Buffer::Mapped(mmap))
}

/// Reads standard input fully into a heap buffer. On Unix, attempts an
/// `mmap` first (stdin may itself be a redirected regular file), falling
/// back to a heap read on failure.
fn load_stdin() -> Result<Buffer, Error> {
    #[cfg(unix)]
    {
        if is_stdin_regular_file() {
            let stdin = std::io::stdin();
            // SAFETY: stdin is a regular file for the duration of the probe
            // above and is not concurrently truncated by this process.
            if let Ok(mmap) = unsafe { Mmap::map(&stdin) } {
                return Ok(Buffer::Mapped(mmap));
            }
        }
    }

    let mut buf = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buf)
        .map_err(|source| Error::IoRead { path: STDIN_MARK.to_owned(), source })?;
    Ok(Buffer::Owned(buf))
}

/// Returns `true` if fd 0 (stdin) is backed by a regular file.
#[cfg(unix)]
fn is_stdin_regular_file() -> bool {
    use nix::sys::stat::{fstat, SFlag};
    use std::os::unix::io::BorrowedFd;

    // SAFETY: fd 0 is valid for the lifetime of the process.
    let fd = unsafe { BorrowedFd::borrow_raw(0) };
    match fstat(fd) {
        Ok(stat) => {
            (stat.st_mode as u32) & SFlag::S_IFMT.bits() as u32 == SFlag::S_IFREG.bits() as u32
        }
        Err(_) => false,
    }
}
