//! Motus Core
//!
//! Foundational types shared by the Motus crates:
//!
//! - **View Tree**: the animation target model, an arena of views with
//!   named scalar properties, visibility, and parent containers
//! - **Geometry**: points, sizes, and rects in window coordinates
//!
//! # Example
//!
//! ```rust
//! use motus_core::{Property, View, ViewTree};
//!
//! let mut tree = ViewTree::new();
//! let root = tree.insert(View::new(320.0, 480.0));
//! let card = tree.insert_child(root, View::new(100.0, 60.0).at(20.0, 40.0)).unwrap();
//!
//! tree.set_property(card, Property::TranslationY, -10.0).unwrap();
//! assert_eq!(tree.property(card, Property::Y), Some(30.0));
//! ```

pub mod error;
pub mod geometry;
pub mod view;

pub use error::{Result, ViewError};
pub use geometry::{Point, Rect, Size};
pub use view::{Property, View, ViewId, ViewTree, Visibility};
