//! Offline preset simulation
//!
//! Runs one preset against a small view tree at a fixed frame rate and
//! records the animated view's properties after every frame.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use clap::ValueEnum;
use motus_animation::{AnimationScheduler, Callback, PresetConfig, ViewAnimations};
use motus_core::{View, ViewId, ViewTree, Visibility};

use crate::config::SimulationConfig;

/// Presets the CLI can run
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PresetName {
    FadeIn,
    FadeOut,
    Disappear,
    Appear,
    FlipAscendDisappear,
    Flip,
    Pulse,
    RotateOnY,
    CompressAndExpand,
    Bounce,
    MoveToPosition,
}

/// Per-run knobs from the command line
#[derive(Clone, Debug)]
pub struct PresetArgs {
    pub duration_ms: Option<u32>,
    pub rotation: f32,
    pub target_x: f32,
    pub target_y: f32,
    pub remove_from_parent: bool,
}

impl Default for PresetArgs {
    fn default() -> Self {
        Self {
            duration_ms: None,
            rotation: 180.0,
            target_x: 40.0,
            target_y: 30.0,
            remove_from_parent: false,
        }
    }
}

/// Snapshot of the animated view after one frame
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub t_ms: f64,
    pub view: Option<View>,
    pub attached: bool,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.1}", self.t_ms)?;
        match &self.view {
            Some(view) => write!(
                f,
                " alpha={:.3} scale_x={:.3} scale_y={:.3} translation_x={:.2} translation_y={:.2} rotation_y={:.2} visibility={:?} attached={}",
                view.alpha,
                view.scale_x,
                view.scale_y,
                view.translation_x,
                view.translation_y,
                view.rotation_y,
                view.visibility,
                self.attached
            ),
            None => write!(f, " removed"),
        }
    }
}

/// A callback that fired during the run
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub t_ms: f64,
    pub label: &'static str,
}

#[derive(Debug, Default)]
pub struct Trace {
    pub frames: Vec<Frame>,
    pub events: Vec<Event>,
    /// Whether the run hit the time cap before the scheduler went idle
    pub capped: bool,
}

type EventLog = Rc<RefCell<Vec<Event>>>;

fn event(log: &EventLog, label: &'static str) -> Option<Callback> {
    let log = log.clone();
    Some(Callback::new(move |cx| {
        log.borrow_mut().push(Event {
            t_ms: cx.scheduler.clock_ms(),
            label,
        });
    }))
}

/// Root container with the animated view in its middle
fn stage(preset: PresetName) -> (ViewTree, ViewId, ViewId) {
    let mut views = ViewTree::new();
    let root = views.insert(View::new(400.0, 400.0));
    let mut subject = View::new(100.0, 100.0).at(150.0, 150.0);
    match preset {
        PresetName::FadeIn => subject = subject.with_alpha(0.0),
        PresetName::Appear => subject = subject.with_visibility(Visibility::Gone),
        _ => {}
    }
    let target = views.insert(subject);
    if let Err(err) = views.add_child(root, target) {
        tracing::warn!("Cannot attach the animated view: {}", err);
    }
    (views, root, target)
}

fn start(
    scheduler: &mut AnimationScheduler,
    views: &mut ViewTree,
    target: ViewId,
    preset: PresetName,
    args: &PresetArgs,
    log: &EventLog,
) {
    let config: PresetConfig = scheduler.config().clone();
    let duration = |default: u32| args.duration_ms.unwrap_or(default);

    match preset {
        PresetName::FadeIn => {
            scheduler.fade_in(views, target, duration(300), event(log, "end"));
        }
        PresetName::FadeOut => {
            scheduler.fade_out(views, target, duration(300), event(log, "end"));
        }
        PresetName::Disappear => {
            scheduler.disappear(views, target, args.remove_from_parent, event(log, "end"));
        }
        PresetName::Appear => {
            scheduler.appear(views, target, event(log, "end"));
        }
        PresetName::FlipAscendDisappear => {
            let started = scheduler.flip_ascend_disappear(
                views,
                target,
                duration(config.flip_ascend_duration_ms),
                config.flip_ascend_pixels,
                event(log, "end"),
            );
            if started.is_none() {
                tracing::info!("Zero duration, nothing to animate");
            }
        }
        PresetName::Flip => {
            scheduler.flip(
                views,
                target,
                duration(config.flip_duration_ms),
                event(log, "middle"),
                event(log, "end"),
            );
        }
        PresetName::Pulse => {
            scheduler.infinite_pulse(views, target, duration(config.pulse_duration_ms));
        }
        PresetName::RotateOnY => {
            scheduler.rotate_on_y(
                views,
                target,
                duration(config.rotate_duration_ms),
                args.rotation,
                event(log, "middle"),
                event(log, "end"),
            );
        }
        PresetName::CompressAndExpand => {
            scheduler.compress_and_expand(
                views,
                target,
                duration(config.compress_duration_ms),
                event(log, "middle"),
                event(log, "end"),
            );
        }
        PresetName::Bounce => {
            scheduler.bounce(views, target, duration(config.bounce_duration_ms), event(log, "end"));
        }
        PresetName::MoveToPosition => {
            scheduler.move_to_position(
                views,
                target,
                args.target_x,
                args.target_y,
                config.move_speed,
                event(log, "end"),
            );
        }
    }
}

/// Run `preset` until the scheduler is idle or `simulation.max_ms` passes
pub fn run(
    preset: PresetName,
    args: &PresetArgs,
    presets: PresetConfig,
    simulation: &SimulationConfig,
) -> Trace {
    let (mut views, root, target) = stage(preset);
    let mut scheduler = AnimationScheduler::with_config(presets);
    scheduler.set_target_fps(simulation.fps);
    let frame_ms = scheduler.frame_interval_ms();
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));

    tracing::info!("Simulating {:?} at {} fps", preset, scheduler.target_fps());
    start(&mut scheduler, &mut views, target, preset, args, &log);

    let snapshot = |views: &ViewTree, t_ms: f64| Frame {
        t_ms,
        view: views.get(target).cloned(),
        attached: views.parent(target) == Some(root),
    };

    let mut trace = Trace {
        frames: vec![snapshot(&views, 0.0)],
        ..Trace::default()
    };

    while !scheduler.is_idle() {
        if scheduler.clock_ms() >= simulation.max_ms as f64 {
            trace.capped = true;
            break;
        }
        scheduler.tick(frame_ms, &mut views);
        trace.frames.push(snapshot(&views, scheduler.clock_ms()));
    }

    trace.events = log.take();
    tracing::debug!(
        "Simulation ended after {} frames, {} events",
        trace.frames.len(),
        trace.events.len()
    );
    trace
}
