//! Transition groups
//!
//! A [`TransitionGroup`] composes transitions (and nested groups) either in
//! parallel or one after another, and binds callbacks to [`Checkpoint`]s of
//! the composite timeline.

use smallvec::SmallVec;

use crate::callback::Callback;
use crate::transition::Transition;

/// How the tracks of a group are scheduled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GroupMode {
    /// All tracks start together; the group completes when the slowest finishes
    #[default]
    Parallel,
    /// Each track starts when the previous one completes
    Sequential,
}

/// A point in a group's timeline where a callback can be bound
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Checkpoint {
    /// The group has started
    Start,
    /// Track `n` (zero-based) has completed
    StageComplete(usize),
    /// Every track has completed
    Complete,
}

/// One entry of a group: a transition or a nested group
#[derive(Debug)]
pub enum Track {
    Transition(Transition),
    Group(TransitionGroup),
}

impl From<Transition> for Track {
    fn from(transition: Transition) -> Self {
        Track::Transition(transition)
    }
}

impl From<TransitionGroup> for Track {
    fn from(group: TransitionGroup) -> Self {
        Track::Group(group)
    }
}

/// An ordered or parallel composition of tracks with checkpoint callbacks
#[derive(Debug, Default)]
pub struct TransitionGroup {
    mode: GroupMode,
    tracks: Vec<Track>,
    callbacks: SmallVec<[(Checkpoint, Callback); 2]>,
}

impl TransitionGroup {
    pub fn new(mode: GroupMode) -> Self {
        Self {
            mode,
            tracks: Vec::new(),
            callbacks: SmallVec::new(),
        }
    }

    /// A group whose tracks run together
    pub fn parallel() -> Self {
        Self::new(GroupMode::Parallel)
    }

    /// A group whose tracks run one after another
    pub fn sequential() -> Self {
        Self::new(GroupMode::Sequential)
    }

    /// Builder: append a track
    pub fn with(mut self, track: impl Into<Track>) -> Self {
        self.tracks.push(track.into());
        self
    }

    /// Builder: bind a callback to a checkpoint.
    ///
    /// Accepts either a [`Callback`] or an `Option<Callback>`; `None` binds
    /// nothing.
    pub fn on(mut self, checkpoint: Checkpoint, callback: impl Into<Option<Callback>>) -> Self {
        if let Some(callback) = callback.into() {
            self.callbacks.push((checkpoint, callback));
        }
        self
    }

    /// Builder: bind a callback to group completion
    pub fn on_complete(self, callback: impl Into<Option<Callback>>) -> Self {
        self.on(Checkpoint::Complete, callback)
    }

    pub fn mode(&self) -> GroupMode {
        self.mode
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Checkpoints that have a callback bound, in binding order
    pub fn checkpoints(&self) -> impl Iterator<Item = Checkpoint> + '_ {
        self.callbacks.iter().map(|(checkpoint, _)| *checkpoint)
    }

    /// Total running time, `None` if any track repeats forever
    pub fn total_duration_ms(&self) -> Option<u64> {
        let mut durations = self.tracks.iter().map(Track::total_duration_ms);
        match self.mode {
            GroupMode::Parallel => durations.try_fold(0, |acc, d| d.map(|d| acc.max(d))),
            GroupMode::Sequential => durations.try_fold(0, |acc, d| d.map(|d| acc + d)),
        }
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        GroupMode,
        Vec<Track>,
        SmallVec<[(Checkpoint, Callback); 2]>,
    ) {
        (self.mode, self.tracks, self.callbacks)
    }
}

impl Track {
    /// Total running time, `None` if the track repeats forever
    pub fn total_duration_ms(&self) -> Option<u64> {
        match self {
            Track::Transition(transition) => transition.total_duration_ms(),
            Track::Group(group) => group.total_duration_ms(),
        }
    }
}
