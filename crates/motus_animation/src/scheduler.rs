//! Animation scheduler
//!
//! Owns every started animation and every posted UI task, and advances
//! them each frame. Everything runs on the thread that calls [`tick`]:
//! starting an animation registers it and returns immediately, and all
//! callbacks fire from inside a later `tick`.
//!
//! [`tick`]: AnimationScheduler::tick

use std::time::Instant;

use motus_core::ViewTree;
use slotmap::{new_key_type, SlotMap};

use crate::callback::{AnimationContext, Callback};
use crate::config::PresetConfig;
use crate::group::TransitionGroup;
use crate::track::{Progress, TrackRun};
use crate::transition::Transition;

new_key_type! {
    /// Handle to a started transition or group
    pub struct AnimationId;
}

/// A started animation.
///
/// The run is taken out of its slot while it advances so its callbacks can
/// borrow the scheduler mutably; the slot stays occupied so the id remains
/// valid (and cancellable) during that time.
struct ActiveAnimation {
    run: Option<TrackRun>,
}

/// A closure queued to run on a later tick
struct PostedTask {
    due_ms: f64,
    seq: u64,
    callback: Callback,
}

/// The scheduler that ticks all active animations and posted tasks
pub struct AnimationScheduler {
    animations: SlotMap<AnimationId, ActiveAnimation>,
    tasks: Vec<PostedTask>,
    next_task_seq: u64,
    clock_ms: f64,
    last_frame: Instant,
    target_fps: u32,
    config: PresetConfig,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::with_config(PresetConfig::default())
    }

    /// Create a scheduler whose presets use the given tuning
    pub fn with_config(config: PresetConfig) -> Self {
        Self {
            animations: SlotMap::with_key(),
            tasks: Vec::new(),
            next_task_seq: 0,
            clock_ms: 0.0,
            last_frame: Instant::now(),
            target_fps: 120,
            config,
        }
    }

    pub fn config(&self) -> &PresetConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PresetConfig) {
        self.config = config;
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps.max(1);
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Milliseconds between frames at the target frame rate
    pub fn frame_interval_ms(&self) -> f32 {
        1000.0 / self.target_fps as f32
    }

    /// Scheduler time in milliseconds, advanced by every tick
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Start a single transition
    pub fn start_transition(&mut self, views: &mut ViewTree, transition: Transition) -> AnimationId {
        tracing::debug!(
            "Starting {} transition on {:?}",
            transition.property().name(),
            transition.target()
        );
        self.start_run(views, TrackRun::new(transition.into()))
    }

    /// Start a group; its checkpoint callbacks fire as the group progresses
    pub fn start_group(&mut self, views: &mut ViewTree, group: TransitionGroup) -> AnimationId {
        tracing::debug!(
            "Starting {:?} group with {} tracks",
            group.mode(),
            group.len()
        );
        self.start_run(views, TrackRun::new(group.into()))
    }

    fn start_run(&mut self, views: &mut ViewTree, mut run: TrackRun) -> AnimationId {
        let id = self.animations.insert(ActiveAnimation { run: None });
        {
            let mut cx = AnimationContext {
                views: &mut *views,
                scheduler: &mut *self,
            };
            run.begin(&mut cx);
        }
        // A start callback may have cancelled the animation already
        if let Some(active) = self.animations.get_mut(id) {
            active.run = Some(run);
        }
        id
    }

    /// Stop an animation without firing any of its remaining callbacks.
    ///
    /// Properties keep whatever value they had at the last tick. Returns
    /// `false` if the animation already completed or was cancelled.
    pub fn cancel(&mut self, id: AnimationId) -> bool {
        let cancelled = self.animations.remove(id).is_some();
        if cancelled {
            tracing::debug!("Cancelled animation {:?}", id);
        }
        cancelled
    }

    /// Whether an animation is still running
    pub fn is_active(&self, id: AnimationId) -> bool {
        self.animations.contains_key(id)
    }

    /// Run `callback` on the next tick
    pub fn post(&mut self, callback: Callback) {
        self.post_delayed(0, callback);
    }

    /// Run `callback` on the first tick at which `delay_ms` has elapsed
    pub fn post_delayed(&mut self, delay_ms: u32, callback: Callback) {
        let seq = self.next_task_seq;
        self.next_task_seq += 1;
        self.tasks.push(PostedTask {
            due_ms: self.clock_ms + delay_ms as f64,
            seq,
            callback,
        });
    }

    /// Advance every animation and due task by `dt_ms` of simulated time
    pub fn tick(&mut self, dt_ms: f32, views: &mut ViewTree) {
        let dt_ms = if dt_ms.is_finite() { f64::from(dt_ms.max(0.0)) } else { 0.0 };
        self.clock_ms += dt_ms;

        // Animations started by callbacks during this tick wait for the next one
        let ids: Vec<AnimationId> = self.animations.keys().collect();
        for id in ids {
            let Some(mut run) = self.animations.get_mut(id).and_then(|a| a.run.take()) else {
                continue;
            };

            let progress = {
                let mut cx = AnimationContext {
                    views: &mut *views,
                    scheduler: &mut *self,
                };
                run.advance(dt_ms, &mut cx)
            };

            match progress {
                Progress::Finished { .. } => {
                    if self.animations.remove(id).is_some() {
                        tracing::debug!("Animation {:?} completed", id);
                    }
                }
                Progress::Running => {
                    if let Some(active) = self.animations.get_mut(id) {
                        active.run = Some(run);
                    }
                }
            }
        }

        self.run_due_tasks(views);
    }

    /// Tick using wall-clock time since the previous frame
    pub fn tick_frame(&mut self, views: &mut ViewTree) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32() * 1000.0;
        self.last_frame = now;
        self.tick(dt, views);
    }

    fn run_due_tasks(&mut self, views: &mut ViewTree) {
        // Tasks posted while draining run on the next tick at the earliest
        let horizon = self.next_task_seq;

        loop {
            let next = self
                .tasks
                .iter()
                .enumerate()
                .filter(|(_, task)| task.seq < horizon && task.due_ms <= self.clock_ms)
                .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)))
                .map(|(index, _)| index);

            let Some(index) = next else {
                break;
            };

            let task = self.tasks.remove(index);
            let mut cx = AnimationContext {
                views: &mut *views,
                scheduler: &mut *self,
            };
            task.callback.invoke(&mut cx);
        }
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        !self.animations.is_empty()
    }

    /// Get the number of running animations
    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    /// Get the number of posted tasks that have not run yet
    pub fn pending_task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Whether there is nothing left to tick
    pub fn is_idle(&self) -> bool {
        self.animations.is_empty() && self.tasks.is_empty()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::group::Checkpoint;
    use crate::transition::{Repeat, RepeatMode};
    use approx::assert_abs_diff_eq;
    use motus_core::{Property, View};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn setup() -> (AnimationScheduler, ViewTree, motus_core::ViewId) {
        let mut views = ViewTree::new();
        let id = views.insert(View::new(100.0, 100.0));
        (AnimationScheduler::new(), views, id)
    }

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Callback) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = log.clone();
        let make = move |label: &'static str| {
            let log = log_clone.clone();
            Callback::simple(move || log.borrow_mut().push(label))
        };
        (log, make)
    }

    #[test]
    fn test_transition_interpolates_linearly() {
        let (mut scheduler, mut views, id) = setup();
        let transition = Transition::new(id, Property::Alpha, 0.0)
            .duration(100)
            .ease(Easing::Linear);
        let handle = scheduler.start_transition(&mut views, transition);

        scheduler.tick(25.0, &mut views);
        assert_abs_diff_eq!(views.property(id, Property::Alpha).unwrap(), 0.75);
        assert!(scheduler.is_active(handle));

        scheduler.tick(75.0, &mut views);
        assert_abs_diff_eq!(views.property(id, Property::Alpha).unwrap(), 0.0);
        assert!(!scheduler.is_active(handle));
    }

    #[test]
    fn test_implicit_start_is_read_after_delay() {
        let (mut scheduler, mut views, id) = setup();
        let transition = Transition::new(id, Property::TranslationX, 100.0)
            .duration(100)
            .delay(50)
            .ease(Easing::Linear);
        scheduler.start_transition(&mut views, transition);

        scheduler.tick(20.0, &mut views);
        // Moved by someone else while the transition is still delayed
        views.set_property(id, Property::TranslationX, 50.0).unwrap();

        scheduler.tick(80.0, &mut views);
        // 50ms into the run: halfway from 50 to 100
        assert_abs_diff_eq!(views.property(id, Property::TranslationX).unwrap(), 75.0);
    }

    #[test]
    fn test_sequential_carries_leftover_and_orders_callbacks() {
        let (mut scheduler, mut views, id) = setup();
        let (log, cb) = recorder();

        let group = TransitionGroup::sequential()
            .with(Transition::new(id, Property::ScaleX, 0.0).duration(100))
            .with(Transition::new(id, Property::ScaleX, 1.0).duration(100))
            .with(Transition::new(id, Property::ScaleX, 2.0).duration(100))
            .on(Checkpoint::Start, cb("start"))
            .on(Checkpoint::StageComplete(0), cb("stage0"))
            .on(Checkpoint::StageComplete(1), cb("stage1"))
            .on(Checkpoint::Complete, cb("complete"));
        let handle = scheduler.start_group(&mut views, group);
        assert_eq!(*log.borrow(), vec!["start"]);

        // One oversized frame crosses every stage boundary
        scheduler.tick(1000.0, &mut views);
        assert_eq!(*log.borrow(), vec!["start", "stage0", "stage1", "complete"]);
        assert_eq!(views.property(id, Property::ScaleX), Some(2.0));
        assert!(!scheduler.is_active(handle));

        scheduler.tick(1000.0, &mut views);
        assert_eq!(log.borrow().len(), 4);
    }

    #[test]
    fn test_parallel_completes_with_slowest() {
        let (mut scheduler, mut views, id) = setup();
        let (log, cb) = recorder();

        let group = TransitionGroup::parallel()
            .with(Transition::new(id, Property::ScaleX, 0.0).duration(100))
            .with(Transition::new(id, Property::ScaleY, 0.0).duration(300))
            .on_complete(cb("complete"));
        scheduler.start_group(&mut views, group);

        scheduler.tick(150.0, &mut views);
        assert!(log.borrow().is_empty());
        scheduler.tick(149.0, &mut views);
        assert!(log.borrow().is_empty());
        scheduler.tick(1.0, &mut views);
        assert_eq!(*log.borrow(), vec!["complete"]);
    }

    #[test]
    fn test_reverse_repeat_ends_on_start_value() {
        let (mut scheduler, mut views, id) = setup();
        let transition = Transition::new(id, Property::ScaleX, 0.0)
            .from_value(1.0)
            .duration(100)
            .ease(Easing::Linear)
            .repeat(Repeat::Count(3), RepeatMode::Reverse);
        let handle = scheduler.start_transition(&mut views, transition);

        scheduler.tick(150.0, &mut views);
        // Second pass runs back up: 50% of the way from 0 to 1
        assert_abs_diff_eq!(views.property(id, Property::ScaleX).unwrap(), 0.5);

        scheduler.tick(250.0, &mut views);
        assert!(!scheduler.is_active(handle));
        assert_abs_diff_eq!(views.property(id, Property::ScaleX).unwrap(), 1.0);
    }

    #[test]
    fn test_zero_duration_completes_on_next_tick() {
        let (mut scheduler, mut views, id) = setup();
        let (log, cb) = recorder();
        let group = TransitionGroup::parallel()
            .with(Transition::new(id, Property::Alpha, 0.25).duration(0))
            .on_complete(cb("done"));
        scheduler.start_group(&mut views, group);

        scheduler.tick(0.0, &mut views);
        assert_eq!(*log.borrow(), vec!["done"]);
        assert_eq!(views.property(id, Property::Alpha), Some(0.25));
    }

    #[test]
    fn test_cancel_suppresses_callbacks() {
        let (mut scheduler, mut views, id) = setup();
        let (log, cb) = recorder();
        let group = TransitionGroup::parallel()
            .with(Transition::new(id, Property::Alpha, 0.0).duration(100))
            .on_complete(cb("done"));
        let handle = scheduler.start_group(&mut views, group);

        scheduler.tick(50.0, &mut views);
        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));

        scheduler.tick(100.0, &mut views);
        assert!(log.borrow().is_empty());
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_missing_target_finishes_without_panicking() {
        let (mut scheduler, mut views, id) = setup();
        let (log, cb) = recorder();
        views.remove(id);

        let group = TransitionGroup::sequential()
            .with(Transition::new(id, Property::Alpha, 0.0).duration(100))
            .on_complete(cb("done"));
        scheduler.start_group(&mut views, group);
        scheduler.tick(16.0, &mut views);
        assert_eq!(*log.borrow(), vec!["done"]);
    }

    #[test]
    fn test_callback_can_chain_animation() {
        let (mut scheduler, mut views, id) = setup();
        let first = TransitionGroup::parallel()
            .with(Transition::new(id, Property::Alpha, 0.0).duration(100))
            .on_complete(Callback::new(move |cx| {
                let next = Transition::new(id, Property::Alpha, 1.0).duration(100);
                cx.scheduler.start_transition(cx.views, next);
            }));
        scheduler.start_group(&mut views, first);

        scheduler.tick(100.0, &mut views);
        assert_eq!(scheduler.animation_count(), 1);
        scheduler.tick(100.0, &mut views);
        assert!(!scheduler.has_active_animations());
        assert_eq!(views.property(id, Property::Alpha), Some(1.0));
    }

    #[test]
    fn test_posted_tasks_run_in_due_order() {
        let (mut scheduler, mut views, _) = setup();
        let (log, cb) = recorder();

        scheduler.post_delayed(100, cb("late"));
        scheduler.post_delayed(10, cb("early"));
        scheduler.post(cb("now"));
        assert_eq!(scheduler.pending_task_count(), 3);

        scheduler.tick(0.0, &mut views);
        assert_eq!(*log.borrow(), vec!["now"]);

        scheduler.tick(200.0, &mut views);
        assert_eq!(*log.borrow(), vec!["now", "early", "late"]);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_very_long_transition_still_completes() {
        let (mut scheduler, mut views, id) = setup();
        let (log, cb) = recorder();
        let group = TransitionGroup::parallel()
            .with(
                Transition::new(id, Property::X, 1000.0)
                    .from_value(0.0)
                    .duration(600_000_000)
                    .ease(Easing::Linear),
            )
            .on_complete(cb("done"));
        let handle = scheduler.start_group(&mut views, group);

        // Land about a second short of the end, then step in frame-sized ticks
        scheduler.tick(599_999_000.0, &mut views);
        assert!(scheduler.is_active(handle));
        for _ in 0..1000 {
            if !scheduler.is_active(handle) {
                break;
            }
            scheduler.tick(16.0, &mut views);
        }

        assert!(!scheduler.is_active(handle));
        assert_eq!(*log.borrow(), vec!["done"]);
        assert_eq!(views.property(id, Property::X), Some(1000.0));
        assert!(scheduler.clock_ms() < 600_001_000.0);
    }

    #[test]
    fn test_animation_callbacks_run_before_tasks_due_same_tick() {
        let (mut scheduler, mut views, id) = setup();
        let (log, cb) = recorder();
        let group = TransitionGroup::parallel()
            .with(Transition::new(id, Property::Alpha, 0.0).duration(10))
            .on_complete(cb("anim"));
        scheduler.post_delayed(10, cb("task"));
        scheduler.start_group(&mut views, group);

        scheduler.tick(10.0, &mut views);
        assert_eq!(*log.borrow(), vec!["anim", "task"]);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_tick_frame_uses_wall_clock() {
        let (mut scheduler, mut views, id) = setup();
        let transition = Transition::new(id, Property::Alpha, 0.0).duration(10_000);
        let handle = scheduler.start_transition(&mut views, transition);

        scheduler.tick_frame(&mut views);
        let before = scheduler.clock_ms();
        std::thread::sleep(std::time::Duration::from_millis(20));
        scheduler.tick_frame(&mut views);

        assert!(scheduler.clock_ms() - before >= 15.0);
        assert!(scheduler.is_active(handle));
        assert!(views.property(id, Property::Alpha).unwrap() < 1.0);
    }

    #[test]
    fn test_task_posted_from_task_waits_a_tick() {
        let (mut scheduler, mut views, _) = setup();
        let (log, cb) = recorder();
        let inner = cb("inner");

        scheduler.post(Callback::new(move |cx| cx.scheduler.post(inner)));

        scheduler.tick(0.0, &mut views);
        assert!(log.borrow().is_empty());
        scheduler.tick(0.0, &mut views);
        assert_eq!(*log.borrow(), vec!["inner"]);
    }
}
