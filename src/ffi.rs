//! C ABI for foreign-language bindings.
//!
//! ```c
//! bool fabric_init(void);
//! bool fabric_index_data(const char* key, const uint8_t* data, size_t length);
//! bool fabric_search(const char* query, char** result);
//! void fabric_free_string(char* s);
//! ```
//!
//! The process owns exactly one [`Engine`], created by the first successful
//! `fabric_init`. Every failure is reported as `false` and logged; no error
//! details cross the boundary, and no panic unwinds into the caller.
//!
//! A successful `fabric_search` stores a NUL-terminated JSON document in
//! `*result`. The caller owns it and must pass it to `fabric_free_string`
//! exactly once. Passing any other pointer, or the same pointer twice, is
//! undefined behavior by contract. Pointers that are not outstanding are
//! logged and ignored; a stale pointer whose address was reused by a newer
//! result cannot be told apart from that result.

use std::ffi::{CStr, c_char};
use std::panic::{self, AssertUnwindSafe};
use std::slice;
use std::sync::OnceLock;

use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::engine::{Engine, EngineConfig};
use crate::error::{FabricError, Result};

/// Environment variable holding the log filter for library consumers.
pub const LOG_ENV_VAR: &str = "FABRIC_LOG";

static ENGINE: OnceLock<Engine> = OnceLock::new();

fn engine() -> Result<&'static Engine> {
    ENGINE.get().ok_or(FabricError::NotInitialized)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    // A host that already installed a subscriber keeps it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run an ABI entry point, collapsing errors and panics to `false`.
fn guarded(operation: &str, f: impl FnOnce() -> Result<()>) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            error!(operation, error = %e, "call failed");
            false
        }
        Err(_) => {
            error!(operation, "call panicked");
            false
        }
    }
}

/// Borrow a C string argument as UTF-8.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for `'a`.
unsafe fn str_arg<'a>(ptr: *const c_char, name: &str) -> Result<&'a str> {
    if ptr.is_null() {
        return Err(FabricError::invalid_argument(format!("{name} is null")));
    }
    // SAFETY: non-null and NUL-terminated per the caller contract.
    let text = unsafe { CStr::from_ptr(ptr) };
    text.to_str()
        .map_err(|e| FabricError::invalid_argument(format!("{name} is not valid UTF-8: {e}")))
}

/// Borrow a byte buffer argument.
///
/// # Safety
///
/// When `length` is non-zero, `data` must be null or point to `length`
/// readable bytes that stay valid for `'a`.
unsafe fn bytes_arg<'a>(data: *const u8, length: usize) -> Result<&'a [u8]> {
    if length == 0 {
        return Ok(&[]);
    }
    if data.is_null() {
        return Err(FabricError::invalid_argument(format!(
            "data is null but length is {length}"
        )));
    }
    // SAFETY: non-null and `length` readable bytes per the caller contract.
    Ok(unsafe { slice::from_raw_parts(data, length) })
}

/// Create the process-wide engine and move it to the ready state.
///
/// The configuration is read from the JSON file named by `FABRIC_CONFIG`,
/// if set. Calling this again after success is a no-op returning `true`.
#[unsafe(no_mangle)]
pub extern "C" fn fabric_init() -> bool {
    init_logging();
    guarded("init", || {
        if let Some(engine) = ENGINE.get() {
            return engine.init();
        }
        let engine = Engine::new(EngineConfig::from_env()?)?;
        ENGINE.get_or_init(|| engine).init()
    })
}

/// Index `length` bytes at `data` under the NUL-terminated `key`.
///
/// # Safety
///
/// `key` must be a valid NUL-terminated string. `data` must point to
/// `length` readable bytes (it may be null when `length` is 0).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fabric_index_data(
    key: *const c_char,
    data: *const u8,
    length: usize,
) -> bool {
    guarded("index", || {
        let engine = engine()?;
        // SAFETY: forwarded caller contract.
        let key = unsafe { str_arg(key, "key") }?;
        // SAFETY: forwarded caller contract.
        let content = unsafe { bytes_arg(data, length) }?;
        engine.index(key, content)
    })
}

/// Search for the NUL-terminated `query`, storing the JSON result in
/// `*result` on success.
///
/// `*result` is left untouched on failure.
///
/// # Safety
///
/// `query` must be a valid NUL-terminated string and `result` a valid,
/// writable pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fabric_search(query: *const c_char, result: *mut *mut c_char) -> bool {
    guarded("search", || {
        let engine = engine()?;
        if result.is_null() {
            return Err(FabricError::invalid_argument("result pointer is null"));
        }
        // SAFETY: forwarded caller contract.
        let query = unsafe { str_arg(query, "query") }?;

        let handle = engine.search_handle(query)?;
        // From here on the caller owns the buffer through `ptr`.
        let ptr = handle.as_ptr();
        let _ = handle.into_raw();

        // SAFETY: `result` is non-null and writable per the caller contract.
        unsafe { result.write(ptr) };
        Ok(())
    })
}

/// Release a result buffer returned by `fabric_search`. Null is ignored.
#[unsafe(no_mangle)]
pub extern "C" fn fabric_free_string(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    guarded("free", || engine()?.release_raw(s as usize));
}
