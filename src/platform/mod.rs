//! Platform abstraction layer
//!
//! The boundary between the deterministic core and whatever hosts it:
//! - Frame clock (what "now" is, how frames advance)
//! - Host callbacks (game over, stage complete)
//! - Headless runner for demos and tests
//!
//! Asset loading stays with the host; the core only sees the readiness flag
//! set through [`GameState::set_assets_ready`].

use crate::consts::FRAME_MS;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Source of frame timestamps
pub trait FrameClock {
    /// Current reading in milliseconds. Must never go backwards.
    fn now_ms(&self) -> f64;
    /// Called once after every simulated frame
    fn advance(&mut self);
}

/// Clock that moves a fixed step per frame (60 Hz by default)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStepClock {
    now_ms: f64,
    step_ms: f64,
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedStepClock {
    pub fn new() -> Self {
        Self::with_step(FRAME_MS)
    }

    pub fn with_step(step_ms: f64) -> Self {
        Self {
            now_ms: 0.0,
            step_ms: step_ms.max(0.0),
        }
    }

    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }
}

impl FrameClock for FixedStepClock {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn advance(&mut self) {
        self.now_ms += self.step_ms;
    }
}

/// Notifications the host may care about. Fire-and-forget: nothing returned
/// is read back by the core.
pub trait HostCallbacks {
    fn on_game_over(&mut self, _score: u64) {}
    fn on_stage_complete(&mut self, _stage: u32) {}
    /// Every event, including the ones routed to the methods above
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// No host
impl HostCallbacks for () {}

/// Deliver the events of one tick to the host, in the order they were raised
pub fn dispatch_events<H: HostCallbacks + ?Sized>(events: &[GameEvent], host: &mut H) {
    for event in events {
        host.on_event(event);
        match *event {
            GameEvent::GameOver { score } => host.on_game_over(score),
            GameEvent::StageComplete { stage } => host.on_stage_complete(stage),
            _ => {}
        }
    }
}

/// Drives a game without a display: one tick per clock step
pub struct Headless<C: FrameClock = FixedStepClock> {
    pub state: GameState,
    pub clock: C,
    /// Input for the next frame. One-shot commands are cleared after each
    /// frame; `autopilot` persists.
    pub input: TickInput,
}

impl Headless<FixedStepClock> {
    pub fn new(state: GameState) -> Self {
        Self::with_clock(state, FixedStepClock::new())
    }
}

impl<C: FrameClock> Headless<C> {
    pub fn with_clock(state: GameState, clock: C) -> Self {
        Self {
            state,
            clock,
            input: TickInput::default(),
        }
    }

    /// Let the autopilot play
    pub fn autopilot(mut self, enabled: bool) -> Self {
        self.input.autopilot = enabled;
        self
    }

    /// Simulate one frame and hand its events to the host
    pub fn frame<H: HostCallbacks + ?Sized>(&mut self, host: &mut H) {
        tick(&mut self.state, &self.input, self.clock.now_ms());
        self.clock.advance();

        self.input = TickInput {
            autopilot: self.input.autopilot,
            ..Default::default()
        };

        let events = self.state.drain_events();
        dispatch_events(&events, host);
    }

    /// Run until the game ends or `max_frames` have passed. Returns the
    /// number of frames simulated.
    pub fn run<H: HostCallbacks + ?Sized>(&mut self, max_frames: u32, host: &mut H) -> u32 {
        let mut frames = 0;
        while frames < max_frames && self.state.phase != GamePhase::Ended {
            self.frame(host);
            frames += 1;
        }
        frames
    }
}
