use std::{io, ptr, ptr::NonNull, slice};

use tracing::{info, warn};

/// A zeroed, process-private, anonymous mapping of a fixed number of bytes.
///
/// The mapping is released when the `Arena` is dropped, so every path that
/// gives up an arena (shutdown, re-initialization, a failed initialize, the
/// manager itself going away) returns the memory to the OS exactly once.
///
/// ```text
///   base                                                  base + len
///   ┌──────────────────────────────────────────────────────┐
///   │        mmap(PROT_READ | PROT_WRITE,                  │
///   │             MAP_PRIVATE | MAP_ANONYMOUS)             │
///   └──────────────────────────────────────────────────────┘
/// ```
#[derive(Debug)]
pub struct Arena {
  base: NonNull<u8>,
  len: usize,
}

impl Arena {
  /// Maps `len` bytes of fresh memory.
  ///
  /// Fails with `InvalidInput` for a zero length and with the OS error when
  /// `mmap` refuses the request.
  pub fn reserve(len: usize) -> io::Result<Self> {
    if len == 0 {
      return Err(io::Error::new(
        io::ErrorKind::InvalidInput,
        "cannot reserve an empty arena",
      ));
    }

    let address = unsafe {
      libc::mmap(
        ptr::null_mut(),
        len,
        libc::PROT_READ | libc::PROT_WRITE,
        libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
        -1,
        0,
      )
    };

    if address == libc::MAP_FAILED {
      let error = io::Error::last_os_error();
      warn!(bytes = len, %error, "arena reservation failed");
      return Err(error);
    }

    let base = NonNull::new(address as *mut u8).ok_or_else(|| io::Error::other("mmap returned null"))?;

    info!(bytes = len, base = ?base, "arena reserved");

    Ok(Self { base, len })
  }

  pub fn base(&self) -> NonNull<u8> {
    self.base
  }

  pub fn len(&self) -> usize {
    self.len
  }

  /// Address of the byte `byte_offset` bytes into the arena, if in bounds.
  pub fn at(
    &self,
    byte_offset: usize,
  ) -> Option<NonNull<u8>> {
    if byte_offset >= self.len {
      return None;
    }

    // SAFETY: `byte_offset < len`, so the result stays inside the mapping.
    Some(unsafe { self.base.add(byte_offset) })
  }

  /// Byte offset of `address` from the base, if it lies inside the arena.
  pub fn offset_of(
    &self,
    address: *const u8,
  ) -> Option<usize> {
    let byte_offset = (address as usize).checked_sub(self.base.as_ptr() as usize)?;

    (byte_offset < self.len).then_some(byte_offset)
  }

  pub fn as_slice(&self) -> &[u8] {
    // SAFETY: the mapping is readable, `len` bytes long and lives as long as `self`.
    unsafe { slice::from_raw_parts(self.base.as_ptr(), self.len) }
  }
}

impl Drop for Arena {
  fn drop(&mut self) {
    let result = unsafe { libc::munmap(self.base.as_ptr().cast(), self.len) };

    if result == 0 {
      info!(bytes = self.len, base = ?self.base, "arena released");
    } else {
      warn!(bytes = self.len, error = %io::Error::last_os_error(), "munmap failed");
    }
  }
}
