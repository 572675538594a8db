//! Runtime state of started tracks
//!
//! [`Transition`] and [`TransitionGroup`] are descriptions; once handed to
//! the scheduler they are converted into the run types below, which carry
//! the clock, the resolved start value, and the callbacks still to fire.
//!
//! Time that overshoots the end of a track is handed back as
//! `leftover_ms` so the next sequential stage starts exactly where the
//! previous one ended, no matter how coarse the frame timing is.

use motus_core::ViewTree;
use smallvec::SmallVec;

use crate::callback::{AnimationContext, Callback};
use crate::group::{Checkpoint, GroupMode, Track, TransitionGroup};
use crate::transition::Transition;

/// Result of advancing a track
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Progress {
    Running,
    Finished { leftover_ms: f64 },
}

pub(crate) enum TrackRun {
    Transition(TransitionRun),
    Group(GroupRun),
}

impl TrackRun {
    pub(crate) fn new(track: Track) -> Self {
        match track {
            Track::Transition(transition) => TrackRun::Transition(TransitionRun::new(transition)),
            Track::Group(group) => TrackRun::Group(GroupRun::new(group)),
        }
    }

    /// Start the track: resolve start values and fire start checkpoints
    pub(crate) fn begin(&mut self, cx: &mut AnimationContext<'_>) {
        match self {
            TrackRun::Transition(run) => run.begin(cx.views),
            TrackRun::Group(run) => run.begin(cx),
        }
    }

    /// Advance by `dt_ms`, firing any callbacks reached along the way
    pub(crate) fn advance(&mut self, dt_ms: f64, cx: &mut AnimationContext<'_>) -> Progress {
        match self {
            TrackRun::Transition(run) => run.advance(dt_ms, cx.views),
            TrackRun::Group(run) => run.advance(dt_ms, cx),
        }
    }
}

/// Clocks are kept in `f64`; an `f32` stops absorbing frame-sized steps
/// on transitions longer than a few days.
enum Phase {
    Idle,
    Delayed { remaining_ms: f64 },
    Running { from: f32, elapsed_ms: f64, pass: u64 },
    Finished,
}

pub(crate) struct TransitionRun {
    transition: Transition,
    phase: Phase,
}

impl TransitionRun {
    fn new(transition: Transition) -> Self {
        Self {
            transition,
            phase: Phase::Idle,
        }
    }

    fn begin(&mut self, views: &mut ViewTree) {
        if self.transition.delay_ms() > 0 {
            self.phase = Phase::Delayed {
                remaining_ms: self.transition.delay_ms() as f64,
            };
        } else {
            self.enter_running(views);
        }
    }

    /// Resolve the start value from the view and apply the first frame
    fn enter_running(&mut self, views: &mut ViewTree) {
        let target = self.transition.target();
        let property = self.transition.property();
        let from = self
            .transition
            .start_value()
            .or_else(|| views.property(target, property));

        match from {
            Some(from) => {
                self.phase = Phase::Running {
                    from,
                    elapsed_ms: 0.0,
                    pass: 0,
                };
                self.apply(views, from, 0, 0.0);
            }
            None => {
                tracing::warn!(
                    "Skipping {} transition: view {:?} is not in the tree",
                    property.name(),
                    target
                );
                self.phase = Phase::Finished;
            }
        }
    }

    fn apply(&self, views: &mut ViewTree, from: f32, pass: u64, t: f32) {
        self.write(views, self.transition.value_at(from, pass, t));
    }

    /// Land exactly on the end value of `pass`
    fn finish_pass(&self, views: &mut ViewTree, from: f32, pass: u64) {
        self.write(views, self.transition.end_of_pass(from, pass));
    }

    fn write(&self, views: &mut ViewTree, value: f32) {
        if let Err(err) = views.set_property(self.transition.target(), self.transition.property(), value) {
            tracing::warn!("Dropped {} update: {}", self.transition.property().name(), err);
        }
    }

    fn advance(&mut self, dt_ms: f64, views: &mut ViewTree) -> Progress {
        let mut dt = dt_ms.max(0.0);

        if let Phase::Idle = self.phase {
            self.begin(views);
        }

        if let Phase::Delayed { remaining_ms } = &mut self.phase {
            if dt < *remaining_ms {
                *remaining_ms -= dt;
                return Progress::Running;
            }
            dt -= *remaining_ms;
            self.enter_running(views);
        }

        match self.phase {
            Phase::Running {
                from,
                elapsed_ms,
                pass,
            } => self.step(views, from, elapsed_ms + dt, pass),
            Phase::Finished => Progress::Finished { leftover_ms: dt },
            Phase::Idle | Phase::Delayed { .. } => Progress::Running,
        }
    }

    fn step(&mut self, views: &mut ViewTree, from: f32, mut elapsed: f64, mut pass: u64) -> Progress {
        let duration = self.transition.duration_ms() as f64;

        if duration <= 0.0 {
            // Zero-length passes jump straight to the final value
            return match self.transition.passes() {
                Some(passes) => {
                    self.finish_pass(views, from, passes - 1);
                    self.phase = Phase::Finished;
                    Progress::Finished {
                        leftover_ms: elapsed,
                    }
                }
                None => {
                    self.finish_pass(views, from, pass);
                    self.phase = Phase::Running {
                        from,
                        elapsed_ms: 0.0,
                        pass,
                    };
                    Progress::Running
                }
            };
        }

        while elapsed >= duration {
            if self.transition.is_last_pass(pass) {
                self.finish_pass(views, from, pass);
                self.phase = Phase::Finished;
                return Progress::Finished {
                    leftover_ms: elapsed - duration,
                };
            }
            elapsed -= duration;
            pass += 1;
        }

        self.apply(views, from, pass, (elapsed / duration) as f32);
        self.phase = Phase::Running {
            from,
            elapsed_ms: elapsed,
            pass,
        };
        Progress::Running
    }
}

type CallbackSlots = SmallVec<[(Checkpoint, Option<Callback>); 2]>;

pub(crate) struct GroupRun {
    mode: GroupMode,
    tracks: Vec<TrackRun>,
    done: Vec<bool>,
    current: usize,
    callbacks: CallbackSlots,
    finished: bool,
}

/// Run every callback bound to `checkpoint` that has not fired yet
fn fire(callbacks: &mut CallbackSlots, checkpoint: Checkpoint, cx: &mut AnimationContext<'_>) {
    for (bound, slot) in callbacks.iter_mut() {
        if *bound == checkpoint {
            if let Some(callback) = slot.take() {
                callback.invoke(cx);
            }
        }
    }
}

impl GroupRun {
    fn new(group: TransitionGroup) -> Self {
        let (mode, tracks, callbacks) = group.into_parts();
        let tracks: Vec<TrackRun> = tracks.into_iter().map(TrackRun::new).collect();
        Self {
            mode,
            done: vec![false; tracks.len()],
            tracks,
            current: 0,
            callbacks: callbacks
                .into_iter()
                .map(|(checkpoint, callback)| (checkpoint, Some(callback)))
                .collect(),
            finished: false,
        }
    }

    fn begin(&mut self, cx: &mut AnimationContext<'_>) {
        fire(&mut self.callbacks, Checkpoint::Start, cx);
        match self.mode {
            GroupMode::Parallel => {
                for track in self.tracks.iter_mut() {
                    track.begin(cx);
                }
            }
            GroupMode::Sequential => {
                if let Some(first) = self.tracks.first_mut() {
                    first.begin(cx);
                }
            }
        }
    }

    fn advance(&mut self, dt_ms: f64, cx: &mut AnimationContext<'_>) -> Progress {
        if self.finished {
            return Progress::Finished { leftover_ms: dt_ms };
        }

        let progress = match self.mode {
            GroupMode::Parallel => self.advance_parallel(dt_ms, cx),
            GroupMode::Sequential => self.advance_sequential(dt_ms, cx),
        };

        if let Progress::Finished { .. } = progress {
            self.finished = true;
            fire(&mut self.callbacks, Checkpoint::Complete, cx);
        }
        progress
    }

    fn advance_parallel(&mut self, dt_ms: f64, cx: &mut AnimationContext<'_>) -> Progress {
        // The last track to finish has the least time left over
        let mut leftover: Option<f64> = None;

        for (index, track) in self.tracks.iter_mut().enumerate() {
            if self.done[index] {
                continue;
            }
            if let Progress::Finished { leftover_ms } = track.advance(dt_ms, cx) {
                self.done[index] = true;
                leftover = Some(leftover.map_or(leftover_ms, |l| l.min(leftover_ms)));
                fire(&mut self.callbacks, Checkpoint::StageComplete(index), cx);
            }
        }

        if self.done.iter().all(|done| *done) {
            Progress::Finished {
                leftover_ms: leftover.unwrap_or(dt_ms),
            }
        } else {
            Progress::Running
        }
    }

    fn advance_sequential(&mut self, dt_ms: f64, cx: &mut AnimationContext<'_>) -> Progress {
        let mut dt = dt_ms;

        while let Some(track) = self.tracks.get_mut(self.current) {
            match track.advance(dt, cx) {
                Progress::Running => return Progress::Running,
                Progress::Finished { leftover_ms } => {
                    self.done[self.current] = true;
                    fire(&mut self.callbacks, Checkpoint::StageComplete(self.current), cx);
                    self.current += 1;
                    dt = leftover_ms;
                    if let Some(next) = self.tracks.get_mut(self.current) {
                        next.begin(cx);
                    }
                }
            }
        }

        Progress::Finished { leftover_ms: dt }
    }
}
