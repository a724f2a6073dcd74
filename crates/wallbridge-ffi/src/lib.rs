//! C ABI for the wallpaper bridge.
//!
//! Declared in `include/wallbridge.h`. Every function is synchronous and
//! runs on the caller's thread. On macOS the host shell may expect calls
//! from the main thread; that is the caller's responsibility.
//!
//! No panic crosses this boundary: failures are reported as a non-zero
//! status or a NULL string.

use std::ffi::{c_char, c_void, CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use tracing::{debug, error, warn};

use wallbridge_core::{BridgeError, Status};
use wallbridge_infra::bridge;

mod logging;

/// Receives a borrowed path and its length in bytes (excluding the NUL).
pub type WallpaperPathCallback =
    unsafe extern "C" fn(path: *const c_char, len: usize, context: *mut c_void);

fn guard<T>(fallback: T, f: impl FnOnce() -> T) -> T {
    logging::init();
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|_| {
        error!("panic inside wallbridge call");
        fallback
    })
}

#[cfg(unix)]
fn path_to_cstring(path: &Path) -> Result<CString, BridgeError> {
    use std::os::unix::ffi::OsStrExt;
    CString::new(path.as_os_str().as_bytes()).map_err(|_| BridgeError::QueryUnavailable {
        reason: "wallpaper path contains a NUL byte".into(),
    })
}

#[cfg(not(unix))]
fn path_to_cstring(path: &Path) -> Result<CString, BridgeError> {
    let s = path.to_str().ok_or_else(|| BridgeError::QueryUnavailable {
        reason: "wallpaper path is not valid UTF-8".into(),
    })?;
    CString::new(s).map_err(|_| BridgeError::QueryUnavailable {
        reason: "wallpaper path contains a NUL byte".into(),
    })
}

fn current_cstring() -> Result<CString, BridgeError> {
    path_to_cstring(&bridge::current_wallpaper()?)
}

/// Bad caller input is logged quietly; host failures are warnings.
fn log_failure(op: &str, err: &BridgeError) -> Status {
    if err.is_preflight() {
        debug!("{op}: {err:#}");
    } else {
        warn!("{op}: {err:#}");
    }
    err.status()
}

/// Fetch a path under the panic guard and lend it to `callback`.
///
/// # Safety
/// `callback` must be safe to call with `context`.
unsafe fn lend_path(
    callback: WallpaperPathCallback,
    context: *mut c_void,
    fetch: impl FnOnce() -> Result<CString, BridgeError>,
) -> Status {
    let path = guard(Err(Status::Panic), || {
        fetch().map_err(|err| log_failure("get wallpaper", &err))
    });
    match path {
        Ok(s) => {
            // SAFETY: `s` outlives the call; the caller vouches for `callback`/`context`.
            unsafe { callback(s.as_ptr(), s.as_bytes().len(), context) };
            Status::Ok
        }
        Err(status) => status,
    }
}

/// Set the wallpaper on every display and every space.
///
/// Returns 0 if every target accepted the image, non-zero otherwise.
///
/// # Safety
/// `image_path` must be NULL or point to a NUL-terminated string that stays
/// valid for the duration of the call.
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn setWallpaperOnAllScreensAndSpacesC(image_path: *const c_char) -> i32 {
    guard(Status::Panic, || {
        if image_path.is_null() {
            warn!("setWallpaperOnAllScreensAndSpacesC: NULL path");
            return Status::InvalidArgument;
        }
        // SAFETY: non-NULL and NUL-terminated per the contract above.
        let raw = unsafe { CStr::from_ptr(image_path) };

        match bridge::set_wallpaper_bytes(raw.to_bytes()) {
            Ok(_) => Status::Ok,
            Err(err) => log_failure("set wallpaper", &err),
        }
    })
    .code()
}

/// Path of the primary display's wallpaper.
///
/// Returns NULL if no wallpaper can be determined. A non-NULL result is a
/// fresh copy owned by the caller and must be released exactly once with
/// [`wallbridge_string_free`].
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub extern "C" fn getCurrentWallpaperPathC() -> *mut c_char {
    guard(std::ptr::null_mut(), || match current_cstring() {
        Ok(s) => s.into_raw(),
        Err(err) => {
            log_failure("get wallpaper", &err);
            std::ptr::null_mut()
        }
    })
}

/// Release a string returned by [`getCurrentWallpaperPathC`]. NULL is a no-op.
///
/// # Safety
/// `s` must be NULL or a pointer obtained from this library that has not
/// been released yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn wallbridge_string_free(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    // SAFETY: produced by CString::into_raw and released at most once per the contract.
    drop(unsafe { CString::from_raw(s) });
}

/// Borrowing variant of [`getCurrentWallpaperPathC`]: no release step.
///
/// On success `callback` is invoked exactly once with a NUL-terminated path
/// that is only valid during the callback, and 0 is returned. On failure the
/// callback is not invoked and a non-zero status is returned.
///
/// # Safety
/// `callback` must be safe to call with `context`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn wallbridge_with_current_wallpaper_path(
    callback: Option<WallpaperPathCallback>,
    context: *mut c_void,
) -> i32 {
    let Some(callback) = callback else {
        return Status::InvalidArgument.code();
    };

    // SAFETY: forwarded from this function's contract.
    unsafe { lend_path(callback, context, current_cstring) }.code()
}

/// Static description of a status code. Never NULL; never free it.
#[unsafe(no_mangle)]
pub extern "C" fn wallbridge_status_message(status: i32) -> *const c_char {
    status_message(status).as_ptr()
}

fn status_message(status: i32) -> &'static CStr {
    match Status::from_code(status) {
        Some(Status::Ok) => c"ok",
        Some(Status::EmptyPath) => c"image path is empty",
        Some(Status::InvalidArgument) => c"invalid argument",
        Some(Status::Unreadable) => c"image file cannot be read",
        Some(Status::UnsupportedFormat) => c"file is not a recognised image",
        Some(Status::NoShell) => c"no supported desktop shell detected",
        Some(Status::NoTargets) => c"desktop shell reported no displays",
        Some(Status::ApplyFailed) => c"wallpaper was not applied on every display",
        Some(Status::QueryUnavailable) => c"current wallpaper unavailable",
        Some(Status::Panic) => c"internal error",
        None => c"unknown status",
    }
}
