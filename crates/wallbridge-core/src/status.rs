//! Integer status codes returned across the C boundary.
//!
//! Zero is success. Every other value is a failure; callers that only care
//! about success may compare against zero.

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok = 0,
    EmptyPath = 1,
    InvalidArgument = 2,
    Unreadable = 3,
    UnsupportedFormat = 4,
    NoShell = 5,
    NoTargets = 6,
    ApplyFailed = 7,
    QueryUnavailable = 8,
    Panic = 9,
}

impl Status {
    pub const fn code(self) -> i32 {
        self as i32
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }

    pub fn from_code(code: i32) -> Option<Self> {
        let s = match code {
            0 => Self::Ok,
            1 => Self::EmptyPath,
            2 => Self::InvalidArgument,
            3 => Self::Unreadable,
            4 => Self::UnsupportedFormat,
            5 => Self::NoShell,
            6 => Self::NoTargets,
            7 => Self::ApplyFailed,
            8 => Self::QueryUnavailable,
            9 => Self::Panic,
            _ => return None,
        };
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(Status::Ok.code(), 0);
        assert_eq!(Status::ApplyFailed.code(), 7);
        assert_eq!(Status::Panic.code(), 9);
        assert_eq!(Status::from_code(4), Some(Status::UnsupportedFormat));
        assert_eq!(Status::from_code(42), None);
    }
}
