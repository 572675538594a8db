//! Single-property transitions
//!
//! A [`Transition`] describes how one scalar property of one view changes
//! over time: start and end value, duration, easing, start delay, and
//! repetition. It is a plain description; the scheduler owns the runtime
//! state once the transition is started.

use motus_core::{Property, ViewId};

use crate::easing::Easing;

/// How many extra times a transition plays after the first pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Repeat {
    /// Play once
    #[default]
    Never,
    /// Play `n` additional times (`n + 1` passes in total)
    Count(u32),
    /// Repeat until cancelled
    Infinite,
}

/// What a repeated pass does
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RepeatMode {
    /// Every pass runs start -> end
    #[default]
    Restart,
    /// Odd passes run end -> start
    Reverse,
}

/// One time-bounded change of one scalar property
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    target: ViewId,
    property: Property,
    from: Option<f32>,
    to: f32,
    duration_ms: u32,
    easing: Easing,
    delay_ms: u32,
    repeat: Repeat,
    repeat_mode: RepeatMode,
}

impl Transition {
    /// Animate `property` of `target` toward `to`.
    ///
    /// Without an explicit [`from_value`](Self::from_value), the start value is read
    /// from the view when the transition begins (after its delay).
    pub fn new(target: ViewId, property: Property, to: f32) -> Self {
        Self {
            target,
            property,
            from: None,
            to,
            duration_ms: 300,
            easing: Easing::AccelerateDecelerate,
            delay_ms: 0,
            repeat: Repeat::Never,
            repeat_mode: RepeatMode::Restart,
        }
    }

    /// Builder: explicit start value
    pub fn from_value(mut self, value: f32) -> Self {
        self.from = Some(value);
        self
    }

    /// Builder: duration of one pass in milliseconds
    pub fn duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Builder: easing applied to every pass
    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Builder: delay before the first pass starts
    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Builder: repetition count and mode
    pub fn repeat(mut self, repeat: Repeat, mode: RepeatMode) -> Self {
        self.repeat = repeat;
        self.repeat_mode = mode;
        self
    }

    pub fn target(&self) -> ViewId {
        self.target
    }

    pub fn property(&self) -> Property {
        self.property
    }

    pub fn start_value(&self) -> Option<f32> {
        self.from
    }

    pub fn end_value(&self) -> f32 {
        self.to
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn repeat_count(&self) -> Repeat {
        self.repeat
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    /// Number of passes, `None` when repeating forever
    pub fn passes(&self) -> Option<u64> {
        match self.repeat {
            Repeat::Never => Some(1),
            Repeat::Count(n) => Some(n as u64 + 1),
            Repeat::Infinite => None,
        }
    }

    /// Delay plus every pass, `None` when repeating forever
    pub fn total_duration_ms(&self) -> Option<u64> {
        self.passes()
            .map(|passes| self.delay_ms as u64 + passes * self.duration_ms as u64)
    }

    /// Whether pass `pass` (zero-based) runs end -> start
    pub(crate) fn is_reversed_pass(&self, pass: u64) -> bool {
        self.repeat_mode == RepeatMode::Reverse && pass % 2 == 1
    }

    /// Whether pass `pass` (zero-based) is the final one
    pub(crate) fn is_last_pass(&self, pass: u64) -> bool {
        match self.passes() {
            Some(passes) => pass + 1 >= passes,
            None => false,
        }
    }

    /// Exact property value at the end of pass `pass`
    pub(crate) fn end_of_pass(&self, from: f32, pass: u64) -> f32 {
        if self.is_reversed_pass(pass) {
            from
        } else {
            self.to
        }
    }

    /// Property value during pass `pass` at linear progress `t` (0.0 to 1.0)
    pub(crate) fn value_at(&self, from: f32, pass: u64, t: f32) -> f32 {
        let t = if self.is_reversed_pass(pass) { 1.0 - t } else { t };
        from + (self.to - from) * self.easing.apply(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn view() -> ViewId {
        ViewId::from(KeyData::from_ffi(1))
    }

    #[test]
    fn test_total_duration() {
        let t = Transition::new(view(), Property::ScaleX, 0.0)
            .duration(100)
            .delay(50)
            .repeat(Repeat::Count(3), RepeatMode::Reverse);
        assert_eq!(t.passes(), Some(4));
        assert_eq!(t.total_duration_ms(), Some(450));

        let forever = t.repeat(Repeat::Infinite, RepeatMode::Reverse);
        assert_eq!(forever.total_duration_ms(), None);
        assert!(!forever.is_last_pass(1_000_000));
    }

    #[test]
    fn test_reverse_passes_swap_direction() {
        let t = Transition::new(view(), Property::ScaleX, 0.0)
            .ease(Easing::Linear)
            .repeat(Repeat::Count(1), RepeatMode::Reverse);

        assert_eq!(t.value_at(1.0, 0, 0.25), 0.75);
        assert_eq!(t.value_at(1.0, 1, 0.25), 0.25);
        // End of a reversed pass lands back on the start value
        assert_eq!(t.end_of_pass(1.0, 1), 1.0);
        assert_eq!(t.end_of_pass(1.0, 0), 0.0);
    }

    #[test]
    fn test_restart_mode_never_reverses() {
        let t = Transition::new(view(), Property::Alpha, 1.0)
            .repeat(Repeat::Count(4), RepeatMode::Restart);
        assert!((0..5).all(|pass| !t.is_reversed_pass(pass)));
        assert!(t.is_last_pass(4));
    }
}
