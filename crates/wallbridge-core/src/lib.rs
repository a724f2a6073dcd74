//! wallbridge-core: data model shared by the adapters and the C ABI.

pub mod error;
pub mod image_path;
pub mod status;
pub mod target;

pub use error::BridgeError;
pub use image_path::ImagePath;
pub use status::Status;
pub use target::{ApplyReport, Target};
