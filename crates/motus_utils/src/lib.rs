//! Motus Utilities
//!
//! Leaf helpers that sit next to the animation system:
//!
//! - **Math**: distance, clamping, Fibonacci
//! - **Text**: word capitalization, character removal, type tags
//! - **JSON**: an injectable codec plus a `to_json` extension
//! - **Touch**: mapping raw touches onto the view tree
//! - **Bitmap**: aspect-preserving resize and JPEG/PNG temp files
//! - **File**: background downloads and temp-file copies

pub mod bitmap;
pub mod error;
pub mod file;
pub mod json;
pub mod math;
pub mod text;
pub mod touch;

pub use bitmap::{resize, to_image_file, ImageFileFormat, DEFAULT_JPEG_QUALITY};
pub use error::{BitmapError, FileError, JsonError};
pub use file::{copy_to_temp_file, download_file, Download};
pub use json::{JsonCodec, ToJson};
pub use math::{clamp, distance, fibonacci};
pub use text::{alphanumeric, capitalize_each_word, remove_chars, type_tag};
pub use touch::{find_view_containing_point, touch_to_view_position, DEFAULT_TOUCH_RADIUS};
