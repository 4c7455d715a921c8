//! Ownership of serialized search results handed to callers.
//!
//! Each successful search produces a NUL-terminated text buffer that the
//! caller owns until it releases it. The buffer is leaked out of its
//! `CString` with `into_raw` when issued, so the caller holds the only live
//! pointer to it and may treat it as writable. The registry records only the
//! buffer address; on release it is reclaimed with `CString::from_raw` after
//! the address is found (and removed) in the registry.
//!
//! Releasing a handle twice, or one that was never issued, is undefined by
//! contract. The registry rejects addresses it does not hold with
//! [`FabricError::InvalidHandle`] without touching memory. Detection is
//! best-effort: once a buffer is released the allocator may hand the same
//! address to a newer buffer, and a stale release of that address then frees
//! the newer one.

use std::ffi::{CStr, CString, c_char};

use ahash::AHashSet;
use parking_lot::Mutex;

use crate::error::{FabricError, Result};

/// An outstanding result buffer owned by the caller.
///
/// Not `Clone`: releasing consumes the handle, so a Rust caller cannot
/// release the same buffer twice.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "result buffers stay allocated until released"]
pub struct ResultHandle {
    id: usize,
}

impl ResultHandle {
    /// The buffer address this handle stands for.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The buffer as a C string pointer, for handing across the C ABI.
    pub fn as_ptr(&self) -> *mut c_char {
        self.id as *mut c_char
    }

    /// Give up the typed handle, keeping only the buffer address.
    ///
    /// The buffer stays outstanding; it must still be released by id.
    pub fn into_raw(self) -> usize {
        self.id
    }
}

/// Registry of buffers issued to callers and not yet released.
#[derive(Debug, Default)]
pub struct HandleRegistry {
    /// Addresses produced by `CString::into_raw`.
    outstanding: Mutex<AHashSet<usize>>,
}

impl HandleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        HandleRegistry::default()
    }

    /// Take ownership of `text` and issue a handle for it.
    pub fn issue(&self, text: String) -> Result<ResultHandle> {
        let buffer = CString::new(text).map_err(|e| {
            FabricError::invalid_argument(format!(
                "result text contains a NUL byte at {}",
                e.nul_position()
            ))
        })?;

        let mut outstanding = self.outstanding.lock();
        outstanding.try_reserve(1).map_err(|e| {
            FabricError::resource_exhausted(format!("cannot register result buffer: {e}"))
        })?;
        let id = CString::into_raw(buffer) as usize;
        outstanding.insert(id);
        Ok(ResultHandle { id })
    }

    /// Run `f` on the buffer behind `handle`, if it is still outstanding.
    pub fn with_buffer<R>(&self, handle: &ResultHandle, f: impl FnOnce(&CStr) -> R) -> Option<R> {
        let outstanding = self.outstanding.lock();
        if !outstanding.contains(&handle.id) {
            return None;
        }
        // SAFETY: the address came from `CString::into_raw` and has not been
        // reclaimed; the lock keeps `release` from freeing it meanwhile.
        let buffer = unsafe { CStr::from_ptr(handle.as_ptr()) };
        Some(f(buffer))
    }

    /// Copy out the text behind `handle`.
    pub fn resolve(&self, handle: &ResultHandle) -> Option<String> {
        self.with_buffer(handle, |buffer| buffer.to_string_lossy().into_owned())
    }

    /// Release the buffer with the given id.
    pub fn release(&self, id: usize) -> Result<()> {
        if !self.outstanding.lock().remove(&id) {
            return Err(FabricError::invalid_handle(format!(
                "no outstanding result buffer at {id:#x}"
            )));
        }
        // SAFETY: `id` was produced by `CString::into_raw` in `issue` and was
        // just removed from the registry, so it is reclaimed exactly once.
        drop(unsafe { CString::from_raw(id as *mut c_char) });
        Ok(())
    }

    /// Number of buffers issued and not yet released.
    pub fn outstanding(&self) -> usize {
        self.outstanding.lock().len()
    }
}

impl Drop for HandleRegistry {
    fn drop(&mut self) {
        for id in self.outstanding.get_mut().drain() {
            // SAFETY: every registered address came from `CString::into_raw`
            // and is still unreclaimed.
            drop(unsafe { CString::from_raw(id as *mut c_char) });
        }
    }
}
