//! # Animation Choreographer
//!
//! Drives the open/close cycle of a set of cells around a base circle.
//!
//! ## Responsibilities
//! - **Lifecycle**: Closed → Opening → Open → Closing → Closed, with `open` and
//!   `close` acting as hard restarts from any state (last writer wins).
//! - **Timing**: Per-cell eased progress with a stagger delay when opening, and
//!   a global eased progress deciding completion.
//! - **Blending**: Rebuilds the blend engine's pairs every tick (base ↔ first
//!   cell, then every consecutive pair) and keeps the resulting composite.
//!
//! All mutation happens inside [`Choreographer::tick`], which the host calls from
//! its frame clock with the delta since the previous tick.

use crate::cell::CellRef;
use crate::clock::Clock;
use crate::config::LiquidConfig;
use crate::state::LifecycleState;
use metaball_core::{Circle, CompositeShape, MetaballEngine};
use tracing::{debug, info, trace, warn};

/// Output of one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Base disk merged with every neck of this frame.
    pub shape: CompositeShape,
    /// Lifecycle state after the tick.
    pub state: LifecycleState,
    /// True on the tick that completed a cycle.
    pub finished: bool,
}

#[derive(Debug)]
pub struct Choreographer {
    config: LiquidConfig,
    engine: MetaballEngine,
    base: Circle,
    cells: Vec<CellRef>,
    state: LifecycleState,
    clock: Clock,
    composite: CompositeShape,
}

impl Choreographer {
    pub fn new(base: Circle, config: LiquidConfig) -> Self {
        let config = config.sanitized();
        let engine = MetaballEngine::new(config.engine_parameters(), config.color);
        let composite = engine.draw(&base);
        Self {
            config,
            engine,
            base,
            cells: Vec::new(),
            state: LifecycleState::Closed,
            clock: Clock::default(),
            composite,
        }
    }

    /// Replaces the configuration. Takes effect from the next tick.
    pub fn configure(&mut self, config: LiquidConfig) {
        self.config = config.sanitized();
        self.engine.configure(
            self.config.radius_threshold,
            self.config.angle_threshold,
            self.config.viscosity,
            self.config.color,
        );
    }

    pub fn config(&self) -> &LiquidConfig {
        &self.config
    }

    pub fn set_base(&mut self, base: Circle) {
        self.base = base;
    }

    pub fn base(&self) -> &Circle {
        &self.base
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Cells of the in-flight cycle, in stagger order. Empty when idle.
    pub fn animated_cells(&self) -> &[CellRef] {
        &self.cells
    }

    pub fn engine(&self) -> &MetaballEngine {
        &self.engine
    }

    /// The most recently drawn composite.
    pub fn composite(&self) -> &CompositeShape {
        &self.composite
    }

    /// Starts an opening cycle over `cells`, discarding any cycle in flight.
    pub fn open(&mut self, cells: Vec<CellRef>) {
        for cell in &cells {
            cell.borrow_mut().stage(self.base.center, self.config.color);
        }
        self.restart(cells, LifecycleState::Opening);
    }

    /// Starts a closing cycle over `cells`, discarding any cycle in flight.
    /// Cells stop accepting selection immediately.
    pub fn close(&mut self, cells: Vec<CellRef>) {
        for cell in &cells {
            cell.borrow_mut().interactive = false;
        }
        self.restart(cells, LifecycleState::Closing);
    }

    fn restart(&mut self, cells: Vec<CellRef>, state: LifecycleState) {
        if self.state.is_transient() {
            debug!(from = ?self.state, to = ?state, dropped = self.cells.len(), "restarting cycle in flight");
        }
        self.stop();

        if cells.is_empty() {
            self.state = state.settled();
            debug!(state = ?self.state, "no cells to animate, settled immediately");
            return;
        }

        debug!(state = ?state, cells = cells.len(), "starting cycle");
        self.cells = cells;
        self.state = state;
        self.clock.start();
    }

    fn stop(&mut self) {
        self.clock.stop();
        self.engine.clear();
        self.cells.clear();
        self.composite = self.engine.draw(&self.base);
    }

    /// Advances the running cycle by `dt` seconds and rebuilds the composite.
    ///
    /// Idle choreographers, empty sets and non-positive durations produce the
    /// bare base circle.
    pub fn tick(&mut self, dt: f64) -> Frame {
        let (duration, delay, opening) = match self.state {
            LifecycleState::Opening => (self.config.open_duration, self.config.stagger_delay, true),
            LifecycleState::Closing => (self.config.close_duration, 0.0, false),
            _ => return self.inert_frame(),
        };
        if !self.clock.is_running() || self.cells.is_empty() {
            return self.inert_frame();
        }
        if !(duration > 0.0) || !duration.is_finite() {
            warn!(duration, "non-positive duration, skipping tick");
            return self.inert_frame();
        }

        let elapsed = self.clock.advance(dt);
        let easing = self.config.easing;
        let count = self.cells.len();
        let total = duration + (count - 1) as f64 * delay;
        let global = easing.eval(elapsed / total);
        let axis = self.config.direction.unit();

        for (i, cell) in self.cells.iter().enumerate() {
            let ratio = easing.eval((elapsed - delay * i as f64) / duration);
            let position_ratio = if opening {
                if global > i as f64 / count as f64 {
                    ratio
                } else {
                    0.0
                }
            } else {
                1.0 - ratio
            };

            let mut cell = cell.borrow_mut();
            let height = cell.circle.diameter();
            let distance = height * 0.5 + (i + 1) as f64 * height * 1.5;
            cell.circle.center = self.base.center + axis * (distance * position_ratio);
            cell.update(ratio, opening);
        }

        self.engine.clear();
        if let Some(first) = self.cells.first() {
            self.engine.push(&self.base, &first.borrow().circle);
        }
        for pair in self.cells.windows(2) {
            self.engine.push(&pair[0].borrow().circle, &pair[1].borrow().circle);
        }
        self.composite = self.engine.draw(&self.base);
        trace!(elapsed, global, connectors = self.composite.connectors, "tick");

        let finished = global >= 1.0;
        let shape = self.composite.clone();
        if finished {
            self.finish();
        }

        Frame {
            shape,
            state: self.state,
            finished,
        }
    }

    fn finish(&mut self) {
        let settled = self.state.settled();
        for cell in &self.cells {
            let mut cell = cell.borrow_mut();
            match settled {
                LifecycleState::Open => cell.interactive = true,
                _ => cell.attached = false,
            }
        }
        info!(state = ?settled, cells = self.cells.len(), elapsed = self.clock.elapsed(), "cycle finished");
        self.stop();
        self.state = settled;
    }

    fn inert_frame(&mut self) -> Frame {
        self.engine.clear();
        self.composite = self.engine.draw(&self.base);
        Frame {
            shape: self.composite.clone(),
            state: self.state,
            finished: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::config::Direction;
    use kurbo::Point;
    use metaball_core::Color;

    fn base() -> Circle {
        Circle::new((200.0, 400.0), 28.0, Color::default())
    }

    fn cells(n: usize) -> Vec<CellRef> {
        (0..n)
            .map(|_| Cell::shared(Circle::new((0.0, 0.0), 20.0, Color::WHITE)))
            .collect()
    }

    #[test]
    fn test_open_stages_cells_at_base() {
        let mut ch = Choreographer::new(base(), LiquidConfig::default());
        let set = cells(2);
        ch.open(set.clone());

        assert_eq!(ch.state(), LifecycleState::Opening);
        assert!(ch.is_running());
        for cell in &set {
            let cell = cell.borrow();
            assert_eq!(cell.circle.center, Point::new(200.0, 400.0));
            assert_eq!(cell.circle.color, Color::default());
            assert!(cell.attached);
            assert!(!cell.interactive);
        }
    }

    #[test]
    fn test_stagger_gates_later_cells() {
        let mut ch = Choreographer::new(base(), LiquidConfig::default());
        let set = cells(3);
        ch.open(set.clone());

        // Global ratio ease(0.05 / 0.4) ~ 0.23: only cell 0 has activated.
        ch.tick(0.05);
        let c0 = set[0].borrow().circle.center;
        let c1 = set[1].borrow().circle.center;
        assert!(c0.y < 400.0, "first cell moves up");
        assert_eq!(c1, Point::new(200.0, 400.0), "second cell waits for its slot");
    }

    #[test]
    fn test_final_positions_follow_direction() {
        let config = LiquidConfig {
            direction: Direction::Right,
            ..Default::default()
        };
        let mut ch = Choreographer::new(base(), config);
        let set = cells(2);
        ch.open(set.clone());

        // Cell 0 finishes at 0.2 s; cell 1 (delayed 0.1 s) at 0.3 s.
        let frame = ch.tick(0.35);
        assert!(frame.finished);

        let c0 = set[0].borrow().circle.center;
        let c1 = set[1].borrow().circle.center;
        assert!((c0.x - (200.0 + 20.0 + 60.0)).abs() < 1e-9, "c0 = {:?}", c0);
        assert!((c1.x - (200.0 + 20.0 + 120.0)).abs() < 1e-9, "c1 = {:?}", c1);
        assert_eq!(c0.y, 400.0);
    }

    #[test]
    fn test_tick_pushes_base_and_consecutive_pairs() {
        let config = LiquidConfig {
            open_duration: 1.0,
            stagger_delay: 0.0,
            ..Default::default()
        };
        let mut ch = Choreographer::new(base(), config);
        ch.open(cells(3));

        let frame = ch.tick(0.1);
        assert!(!frame.finished);
        assert_eq!(ch.engine().pairs().len(), 3);
        assert_eq!(ch.engine().pairs()[0].0, base());
        assert_eq!(frame.shape, *ch.composite());
    }

    #[test]
    fn test_zero_duration_is_a_noop_tick() {
        let config = LiquidConfig {
            open_duration: 0.0,
            ..Default::default()
        };
        let mut ch = Choreographer::new(base(), config);
        let set = cells(2);
        ch.open(set.clone());

        let frame = ch.tick(1.0);
        assert!(!frame.finished);
        assert_eq!(frame.shape.connectors, 0);
        assert_eq!(frame.state, LifecycleState::Opening);
        assert_eq!(ch.elapsed(), 0.0);
        assert_eq!(set[0].borrow().circle.center, Point::new(200.0, 400.0));
    }

    #[test]
    fn test_empty_open_settles_without_running() {
        let mut ch = Choreographer::new(base(), LiquidConfig::default());
        ch.open(Vec::new());
        assert_eq!(ch.state(), LifecycleState::Open);
        assert!(!ch.is_running());

        let frame = ch.tick(0.016);
        assert!(!frame.finished);
        assert_eq!(frame.shape.connectors, 0);
        assert!(!frame.shape.is_empty());
    }

    #[test]
    fn test_close_hides_content_and_detaches() {
        let mut ch = Choreographer::new(base(), LiquidConfig::default());
        let set = cells(2);
        ch.open(set.clone());
        ch.tick(1.0);
        assert_eq!(ch.state(), LifecycleState::Open);

        ch.close(set.clone());
        ch.tick(0.1);
        // Closing ratio 0.75 leaves no visible content.
        assert_eq!(set[0].borrow().content_alpha, 0.0);
        assert!(set[0].borrow().attached);

        let frame = ch.tick(0.1);
        assert!(frame.finished);
        assert_eq!(frame.state, LifecycleState::Closed);
        for cell in &set {
            let cell = cell.borrow();
            assert!(!cell.attached);
            assert_eq!(cell.circle.center, Point::new(200.0, 400.0));
        }
    }
}
