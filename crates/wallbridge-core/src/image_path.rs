//! Image path validation and `file://` URI conversion.

use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::BridgeError;

/// Bytes read from the head of a file when sniffing its format.
const SNIFF_LEN: u64 = 64;

/// ISO-BMFF brands for HEIF stills, which `image` does not know about.
const HEIF_BRANDS: &[&[u8; 4]] = &[b"heic", b"heix", b"hevc", b"mif1", b"msf1"];

/// A file-system path naming a wallpaper image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePath(PathBuf);

impl ImagePath {
    pub fn parse(raw: &str) -> Result<Self, BridgeError> {
        if raw.trim().is_empty() {
            return Err(BridgeError::EmptyPath);
        }
        Ok(Self(PathBuf::from(raw)))
    }

    /// Build from raw C-string bytes (without the trailing NUL).
    #[cfg(unix)]
    pub fn from_bytes(raw: &[u8]) -> Result<Self, BridgeError> {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        if raw.iter().all(u8::is_ascii_whitespace) {
            return Err(BridgeError::EmptyPath);
        }
        Ok(Self(PathBuf::from(OsStr::from_bytes(raw))))
    }

    #[cfg(not(unix))]
    pub fn from_bytes(raw: &[u8]) -> Result<Self, BridgeError> {
        let s = std::str::from_utf8(raw)
            .map_err(|_| BridgeError::InvalidArgument("path is not valid UTF-8"))?;
        Self::parse(s)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// Relative paths are resolved against the current directory.
    pub fn absolutize(self) -> Result<Self, BridgeError> {
        if self.0.is_absolute() {
            return Ok(self);
        }
        let cwd = std::env::current_dir().map_err(|source| BridgeError::Unreadable {
            path: self.0.clone(),
            source,
        })?;
        Ok(Self(cwd.join(self.0)))
    }

    /// Check the file is readable and starts with a known image signature.
    ///
    /// Only the first few bytes are read; nothing is decoded.
    pub fn preflight(&self) -> Result<(), BridgeError> {
        let unreadable = |source| BridgeError::Unreadable {
            path: self.0.clone(),
            source,
        };

        // Opening a FIFO blocks until a writer shows up, so check the type first.
        if !std::fs::metadata(&self.0).map_err(unreadable)?.file_type().is_file() {
            return Err(BridgeError::UnsupportedFormat {
                path: self.0.clone(),
            });
        }
        let file = File::open(&self.0).map_err(unreadable)?;

        let mut head = Vec::with_capacity(SNIFF_LEN as usize);
        file.take(SNIFF_LEN)
            .read_to_end(&mut head)
            .map_err(unreadable)?;

        if image::guess_format(&head).is_ok() || is_heif(&head) {
            Ok(())
        } else {
            Err(BridgeError::UnsupportedFormat {
                path: self.0.clone(),
            })
        }
    }

    pub fn to_file_uri(&self) -> String {
        let mut uri = String::from("file://");
        for &b in path_bytes(&self.0).iter() {
            if b.is_ascii_alphanumeric() || b"/-._~".contains(&b) {
                uri.push(b as char);
            } else {
                uri.push_str(&format!("%{b:02X}"));
            }
        }
        uri
    }

    /// Parse a `file://` URI (or a bare absolute path) back into a path.
    pub fn from_file_uri(uri: &str) -> Option<Self> {
        match uri.strip_prefix("file://") {
            Some(rest) => {
                let rest = rest.strip_prefix("localhost").unwrap_or(rest);
                if !rest.starts_with('/') {
                    return None;
                }
                Self::from_bytes(&percent_decode(rest)?).ok()
            }
            None if uri.starts_with('/') => Self::parse(uri).ok(),
            None => None,
        }
    }
}

fn is_heif(head: &[u8]) -> bool {
    head.len() >= 12 && &head[4..8] == b"ftyp" && HEIF_BRANDS.iter().any(|b| &head[8..12] == *b)
}

#[cfg(unix)]
fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    match path.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

fn percent_decode(s: &str) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(s.len());
    let mut bytes = s.bytes();
    while let Some(b) = bytes.next() {
        if b == b'%' {
            let hi = (bytes.next()? as char).to_digit(16)?;
            let lo = (bytes.next()? as char).to_digit(16)?;
            out.push((hi * 16 + lo) as u8);
        } else {
            out.push(b);
        }
    }
    Some(out)
}
