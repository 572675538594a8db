//! View animation presets
//!
//! Ready-made effects for a single view: fades, appear/disappear, flips,
//! pulses, rotations, squash-and-stretch, bounce, and move-to. Each preset
//! is available in two forms:
//!
//! - [`AnimationPreset`] builds the [`TransitionGroup`] without starting it
//! - [`ViewAnimations`] applies the preset's side effects (visibility,
//!   detaching) and starts it on an [`AnimationScheduler`]
//!
//! All end and middle callbacks are optional. Middle callbacks fire
//! between the two halves of two-stage presets, strictly before the end
//! callback.

use motus_core::{Property, ViewId, ViewTree, Visibility};

use crate::callback::{AnimationContext, Callback};
use crate::config::PresetConfig;
use crate::easing::Easing;
use crate::group::{Checkpoint, TransitionGroup};
use crate::scheduler::{AnimationId, AnimationScheduler};
use crate::transition::{Repeat, RepeatMode, Transition};

/// Pre-built transition groups for common view effects
pub struct AnimationPreset;

impl AnimationPreset {
    // ========================================================================
    // Fade animations
    // ========================================================================

    /// Alpha from its current value to fully opaque
    pub fn fade_in(target: ViewId, duration_ms: u32) -> TransitionGroup {
        TransitionGroup::parallel().with(
            Transition::new(target, Property::Alpha, 1.0)
                .duration(duration_ms)
                .ease(Easing::Linear),
        )
    }

    /// Alpha from its current value toward fully opaque.
    ///
    /// This matches the long-standing behavior of the helper it mirrors,
    /// which targets 1.0 rather than 0.0.
    pub fn fade_out(target: ViewId, duration_ms: u32) -> TransitionGroup {
        TransitionGroup::parallel().with(
            Transition::new(target, Property::Alpha, 1.0)
                .duration(duration_ms)
                .ease(Easing::Linear),
        )
    }

    // ========================================================================
    // Appear / disappear
    // ========================================================================

    /// Horizontal shrink from full width to nothing, after a short delay
    pub fn disappear(target: ViewId, config: &PresetConfig) -> TransitionGroup {
        TransitionGroup::parallel().with(
            Transition::new(target, Property::ScaleX, 0.0)
                .from_value(1.0)
                .duration(config.disappear_duration_ms)
                .delay(config.disappear_delay_ms)
                .ease(Easing::Anticipate(config.appear_tension)),
        )
    }

    /// Horizontal grow from nothing to full width, overshooting on the way
    pub fn appear(target: ViewId, config: &PresetConfig) -> TransitionGroup {
        TransitionGroup::parallel().with(
            Transition::new(target, Property::ScaleX, 1.0)
                .from_value(0.0)
                .duration(config.appear_duration_ms)
                .ease(Easing::Overshoot(config.appear_tension)),
        )
    }

    /// Flicker while rising: the first half of flip-ascend-disappear.
    ///
    /// The flicker flips scale-x back and forth once per flicker period,
    /// `duration / period` extra times; the ascent moves the view up by
    /// `ascend_px` over `duration`.
    pub fn flip_ascend(
        views: &ViewTree,
        target: ViewId,
        duration_ms: u32,
        ascend_px: f32,
        config: &PresetConfig,
    ) -> TransitionGroup {
        let period = config.flicker_period_ms.max(1);
        let start_y = views
            .property(target, Property::TranslationY)
            .unwrap_or(0.0);

        let flicker = Transition::new(target, Property::ScaleX, 0.0)
            .from_value(1.0)
            .duration(period)
            .ease(Easing::Accelerate)
            .repeat(Repeat::Count(duration_ms / period), RepeatMode::Reverse);
        let ascend = Transition::new(target, Property::TranslationY, start_y - ascend_px)
            .from_value(start_y)
            .duration(duration_ms)
            .ease(Easing::AccelerateDecelerate);

        TransitionGroup::parallel().with(flicker).with(ascend)
    }

    // ========================================================================
    // Two-stage animations
    // ========================================================================

    /// Close horizontally, then reopen; stage 0 ends at the midpoint
    pub fn flip(target: ViewId, duration_ms: u32) -> TransitionGroup {
        let half = duration_ms / 2;
        TransitionGroup::sequential()
            .with(
                Transition::new(target, Property::ScaleX, 0.0)
                    .from_value(1.0)
                    .duration(half)
                    .ease(Easing::anticipate()),
            )
            .with(
                Transition::new(target, Property::ScaleX, 1.0)
                    .from_value(0.0)
                    .duration(half)
                    .ease(Easing::overshoot()),
            )
    }

    /// Turn around the vertical axis to `rotation` degrees in two stages.
    ///
    /// The first stage reaches half the rotation over the full duration and
    /// the second finishes it over half the duration.
    pub fn rotate_on_y(target: ViewId, duration_ms: u32, rotation: f32) -> TransitionGroup {
        TransitionGroup::sequential()
            .with(
                Transition::new(target, Property::RotationY, rotation / 2.0)
                    .duration(duration_ms)
                    .ease(Easing::anticipate()),
            )
            .with(
                Transition::new(target, Property::RotationY, rotation)
                    .from_value(rotation / 2.0)
                    .duration(duration_ms / 2)
                    .ease(Easing::overshoot()),
            )
    }

    /// Squash (wide and flat), then spring back to the natural shape
    pub fn compress_and_expand(
        target: ViewId,
        duration_ms: u32,
        config: &PresetConfig,
    ) -> TransitionGroup {
        let half = duration_ms / 2;
        let (sx, sy) = (config.compress_scale_x, config.compress_scale_y);
        let compress = Easing::Anticipate(config.compress_tension);

        let squash = TransitionGroup::parallel()
            .with(
                Transition::new(target, Property::ScaleX, sx)
                    .from_value(1.0)
                    .duration(half)
                    .ease(compress),
            )
            .with(
                Transition::new(target, Property::ScaleY, sy)
                    .from_value(1.0)
                    .duration(half)
                    .ease(compress),
            );
        let stretch = TransitionGroup::parallel()
            .with(
                Transition::new(target, Property::ScaleX, 1.0)
                    .from_value(sx)
                    .duration(half)
                    .ease(Easing::overshoot()),
            )
            .with(
                Transition::new(target, Property::ScaleY, 1.0)
                    .from_value(sy)
                    .duration(half)
                    .ease(Easing::overshoot()),
            );

        TransitionGroup::sequential().with(squash).with(stretch)
    }

    // ========================================================================
    // Single-stage scale and position
    // ========================================================================

    /// Endless pulse between the current scale and `config.pulse_scale`
    pub fn pulse(target: ViewId, duration_ms: u32, config: &PresetConfig) -> TransitionGroup {
        let axis = |property| {
            Transition::new(target, property, config.pulse_scale)
                .duration(duration_ms)
                .ease(Easing::FastOutSlowIn)
                .repeat(Repeat::Infinite, RepeatMode::Reverse)
        };
        TransitionGroup::parallel()
            .with(axis(Property::ScaleX))
            .with(axis(Property::ScaleY))
    }

    /// Shrink both axes from `config.bounce_scale` to natural size
    pub fn bounce(target: ViewId, duration_ms: u32, config: &PresetConfig) -> TransitionGroup {
        let axis = |property| {
            Transition::new(target, property, 1.0)
                .from_value(config.bounce_scale)
                .duration(duration_ms / 2)
                .ease(Easing::anticipate())
        };
        TransitionGroup::parallel()
            .with(axis(Property::ScaleX))
            .with(axis(Property::ScaleY))
    }

    /// Move the view's visual position to (`x`, `y`).
    ///
    /// The duration is the straight-line distance divided by `speed`
    /// (pixels per millisecond), truncated to whole milliseconds. A
    /// non-positive speed moves instantly.
    pub fn move_to(views: &ViewTree, target: ViewId, x: f32, y: f32, speed: f32) -> TransitionGroup {
        let (from_x, from_y) = match views.get(target) {
            Some(view) => (view.property(Property::X), view.property(Property::Y)),
            None => {
                tracing::warn!("Moving view {:?} that is not in the tree", target);
                (x, y)
            }
        };

        let duration_ms = move_duration_ms(from_x, from_y, x, y, speed);
        tracing::trace!("Move of {:?} takes {}ms", target, duration_ms);

        TransitionGroup::parallel()
            .with(
                Transition::new(target, Property::X, x)
                    .from_value(from_x)
                    .duration(duration_ms)
                    .ease(Easing::AccelerateDecelerate),
            )
            .with(
                Transition::new(target, Property::Y, y)
                    .from_value(from_y)
                    .duration(duration_ms)
                    .ease(Easing::AccelerateDecelerate),
            )
    }
}

/// Travel time for a move, in whole milliseconds
pub fn move_duration_ms(from_x: f32, from_y: f32, to_x: f32, to_y: f32, speed: f32) -> u32 {
    let dx = (to_x - from_x) as f64;
    let dy = (to_y - from_y) as f64;
    let distance = (dx * dx + dy * dy).sqrt();
    let duration = distance / speed as f64;

    if speed > 0.0 && duration.is_finite() {
        duration.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// View animation effects, started on a scheduler
///
/// Every method returns the handle of the animation it started. Callbacks
/// run on the thread that ticks the scheduler.
pub trait ViewAnimations {
    /// Fade alpha up to 1.0; the view stays visible
    fn fade_in(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        duration_ms: u32,
        on_end: Option<Callback>,
    ) -> AnimationId;

    /// Make the view visible, then fade alpha toward 1.0
    fn fade_out(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        duration_ms: u32,
        on_end: Option<Callback>,
    ) -> AnimationId;

    /// Shrink the view away, mark it gone, and optionally detach it from
    /// its parent before `on_end` runs
    fn disappear(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        remove_from_parent: bool,
        on_end: Option<Callback>,
    ) -> AnimationId;

    /// Make the view visible and grow it in
    fn appear(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        on_end: Option<Callback>,
    ) -> AnimationId;

    /// Flicker while rising, then [`disappear`](Self::disappear).
    ///
    /// Returns `None` without touching the view when `duration_ms` is 0.
    /// The returned handle covers the flicker; the disappear that follows
    /// is started as a separate animation.
    fn flip_ascend_disappear(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        duration_ms: u32,
        ascend_px: f32,
        on_end: Option<Callback>,
    ) -> Option<AnimationId>;

    /// Flip the view once around its vertical center line
    fn flip(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        duration_ms: u32,
        on_middle: Option<Callback>,
        on_end: Option<Callback>,
    ) -> AnimationId;

    /// Pulse forever; stop it with [`AnimationScheduler::cancel`]
    fn infinite_pulse(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        duration_ms: u32,
    ) -> AnimationId;

    /// Rotate around the vertical axis to `rotation` degrees
    fn rotate_on_y(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        duration_ms: u32,
        rotation: f32,
        on_middle: Option<Callback>,
        on_end: Option<Callback>,
    ) -> AnimationId;

    /// Squash, then spring back
    fn compress_and_expand(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        duration_ms: u32,
        on_middle: Option<Callback>,
        on_end: Option<Callback>,
    ) -> AnimationId;

    /// Drop from an enlarged scale back to natural size
    fn bounce(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        duration_ms: u32,
        on_end: Option<Callback>,
    ) -> AnimationId;

    /// Glide to a visual position at `speed` pixels per millisecond
    fn move_to_position(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        x: f32,
        y: f32,
        speed: f32,
        on_end: Option<Callback>,
    ) -> AnimationId;
}

fn show(views: &mut ViewTree, target: ViewId) {
    if let Err(err) = views.set_visibility(target, Visibility::Visible) {
        tracing::warn!("Cannot show view: {}", err);
    }
}

/// Hide (and optionally detach) the view, then hand over to the caller
fn finish_disappear(
    cx: &mut AnimationContext<'_>,
    target: ViewId,
    remove_from_parent: bool,
    on_end: Option<Callback>,
) {
    if let Err(err) = cx.views.set_visibility(target, Visibility::Gone) {
        tracing::warn!("Cannot hide view: {}", err);
    }
    if remove_from_parent {
        if let Err(err) = cx.views.remove_from_parent(target) {
            tracing::warn!("Cannot detach view after disappear: {}", err);
        }
    }
    if let Some(on_end) = on_end {
        on_end.invoke(cx);
    }
}

impl ViewAnimations for AnimationScheduler {
    fn fade_in(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        duration_ms: u32,
        on_end: Option<Callback>,
    ) -> AnimationId {
        let group = AnimationPreset::fade_in(target, duration_ms).on_complete(on_end);
        self.start_group(views, group)
    }

    fn fade_out(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        duration_ms: u32,
        on_end: Option<Callback>,
    ) -> AnimationId {
        show(views, target);
        let group = AnimationPreset::fade_out(target, duration_ms).on_complete(on_end);
        self.start_group(views, group)
    }

    fn disappear(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        remove_from_parent: bool,
        on_end: Option<Callback>,
    ) -> AnimationId {
        let group = AnimationPreset::disappear(target, self.config()).on_complete(Callback::new(
            move |cx| finish_disappear(cx, target, remove_from_parent, on_end),
        ));
        self.start_group(views, group)
    }

    fn appear(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        on_end: Option<Callback>,
    ) -> AnimationId {
        show(views, target);
        let group = AnimationPreset::appear(target, self.config()).on_complete(on_end);
        self.start_group(views, group)
    }

    fn flip_ascend_disappear(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        duration_ms: u32,
        ascend_px: f32,
        on_end: Option<Callback>,
    ) -> Option<AnimationId> {
        if duration_ms == 0 {
            return None;
        }

        let group = AnimationPreset::flip_ascend(views, target, duration_ms, ascend_px, self.config())
            .on_complete(Callback::new(move |cx| {
                cx.scheduler.disappear(cx.views, target, false, on_end);
            }));
        Some(self.start_group(views, group))
    }

    fn flip(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        duration_ms: u32,
        on_middle: Option<Callback>,
        on_end: Option<Callback>,
    ) -> AnimationId {
        let group = AnimationPreset::flip(target, duration_ms)
            .on(Checkpoint::StageComplete(0), on_middle)
            .on_complete(on_end);
        self.start_group(views, group)
    }

    fn infinite_pulse(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        duration_ms: u32,
    ) -> AnimationId {
        let group = AnimationPreset::pulse(target, duration_ms, self.config());
        self.start_group(views, group)
    }

    fn rotate_on_y(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        duration_ms: u32,
        rotation: f32,
        on_middle: Option<Callback>,
        on_end: Option<Callback>,
    ) -> AnimationId {
        let group = AnimationPreset::rotate_on_y(target, duration_ms, rotation)
            .on(Checkpoint::StageComplete(0), on_middle)
            .on_complete(on_end);
        self.start_group(views, group)
    }

    fn compress_and_expand(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        duration_ms: u32,
        on_middle: Option<Callback>,
        on_end: Option<Callback>,
    ) -> AnimationId {
        let group = AnimationPreset::compress_and_expand(target, duration_ms, self.config())
            .on(Checkpoint::StageComplete(0), on_middle)
            .on_complete(on_end);
        self.start_group(views, group)
    }

    fn bounce(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        duration_ms: u32,
        on_end: Option<Callback>,
    ) -> AnimationId {
        let group = AnimationPreset::bounce(target, duration_ms, self.config()).on_complete(on_end);
        self.start_group(views, group)
    }

    fn move_to_position(
        &mut self,
        views: &mut ViewTree,
        target: ViewId,
        x: f32,
        y: f32,
        speed: f32,
        on_end: Option<Callback>,
    ) -> AnimationId {
        let group = AnimationPreset::move_to(views, target, x, y, speed).on_complete(on_end);
        self.start_group(views, group)
    }
}
