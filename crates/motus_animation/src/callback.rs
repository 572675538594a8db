//! Completion and checkpoint callbacks

use std::fmt;

use motus_core::ViewTree;

use crate::scheduler::AnimationScheduler;

/// What a callback can reach while it runs.
///
/// Callbacks fire from inside [`AnimationScheduler::tick`], on the thread
/// that owns the scheduler. They get the view tree being animated and the
/// scheduler itself, so a callback can mutate views or chain a new
/// animation.
pub struct AnimationContext<'a> {
    pub views: &'a mut ViewTree,
    pub scheduler: &'a mut AnimationScheduler,
}

/// A single-shot callback bound to an animation checkpoint
pub struct Callback(Box<dyn FnOnce(&mut AnimationContext<'_>)>);

impl Callback {
    /// Create a callback that receives the animation context
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(&mut AnimationContext<'_>) + 'static,
    {
        Self(Box::new(f))
    }

    /// Create a callback that ignores the animation context
    pub fn simple<F>(f: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self(Box::new(move |_| f()))
    }

    /// Consume and run the callback
    pub fn invoke(self, cx: &mut AnimationContext<'_>) {
        (self.0)(cx)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}
