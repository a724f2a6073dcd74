//! Fixtures shared by the integration tests.

use std::ffi::OsString;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::Mutex;

/// Tests in one binary share the process environment.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

pub const PNG_1X1: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
    0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
    0xCF, 0xC0, 0x00, 0x00, 0x03, 0x01, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0xB5, 0x00, 0x00, 0x00,
    0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

pub fn write_exe(path: &Path, body: &str) {
    std::fs::write(path, body).unwrap();
    let mut perm = std::fs::metadata(path).unwrap().permissions();
    perm.set_mode(0o755);
    std::fs::set_permissions(path, perm).unwrap();
}

/// Run `f` with `vars` set, restoring the previous values afterwards.
pub fn with_env<F: FnOnce()>(vars: &[(&str, &OsString)], f: F) {
    let _g = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    let old: Vec<(&str, Option<OsString>)> =
        vars.iter().map(|(k, _)| (*k, std::env::var_os(k))).collect();
    unsafe {
        for (k, v) in vars {
            std::env::set_var(k, v);
        }
    }

    f();

    unsafe {
        for (k, v) in old {
            match v {
                Some(v) => std::env::set_var(k, v),
                None => std::env::remove_var(k),
            }
        }
    }
}
