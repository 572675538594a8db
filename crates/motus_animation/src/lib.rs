//! Motus Animation System
//!
//! Property transitions, transition groups, and ready-made view effects,
//! driven by a single-threaded frame scheduler.
//!
//! # Features
//!
//! - **Transitions**: One property of one view, with delay, easing, and
//!   restart/reverse repetition
//! - **Groups**: Parallel and sequential composition with start,
//!   per-stage, and completion callbacks
//! - **Presets**: Fade, appear/disappear, flip, pulse, rotate, compress,
//!   bounce, and move-to
//! - **UI tasks**: Closures posted to run on the scheduler thread
//!
//! # Example
//!
//! ```
//! use motus_animation::{AnimationScheduler, Callback, ViewAnimations};
//! use motus_core::{View, ViewTree};
//!
//! let mut views = ViewTree::new();
//! let id = views.insert(View::new(100.0, 40.0));
//! let mut scheduler = AnimationScheduler::new();
//!
//! scheduler.appear(&mut views, id, Some(Callback::simple(|| println!("shown"))));
//! while !scheduler.is_idle() {
//!     scheduler.tick(16.0, &mut views);
//! }
//! assert_eq!(views.get(id).map(|v| v.scale_x), Some(1.0));
//! ```

pub mod callback;
pub mod config;
pub mod easing;
pub mod error;
pub mod group;
pub mod presets;
pub mod scheduler;
mod track;
pub mod transition;

pub use callback::{AnimationContext, Callback};
pub use config::PresetConfig;
pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use group::{Checkpoint, GroupMode, Track, TransitionGroup};
pub use presets::{AnimationPreset, ViewAnimations};
pub use scheduler::{AnimationId, AnimationScheduler};
pub use transition::{Repeat, RepeatMode, Transition};
