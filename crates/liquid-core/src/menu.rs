use crate::choreographer::{Choreographer, Frame};
use crate::config::LiquidConfig;
use crate::errors::LiquidError;
use crate::source::{CircleSource, SelectionListener};
use crate::state::LifecycleState;
use metaball_core::Circle;
use tracing::debug;

/// A base circle that fans its cells out and back, wired to a cell source and
/// a selection listener.
pub struct LiquidMenu<S: CircleSource, L: SelectionListener = ()> {
    choreographer: Choreographer,
    source: S,
    listener: L,
}

impl<S: CircleSource> LiquidMenu<S, ()> {
    pub fn new(base: Circle, config: LiquidConfig, source: S) -> Self {
        Self::with_listener(base, config, source, ())
    }
}

impl<S: CircleSource, L: SelectionListener> LiquidMenu<S, L> {
    pub fn with_listener(base: Circle, config: LiquidConfig, source: S, listener: L) -> Self {
        Self {
            choreographer: Choreographer::new(base, config),
            source,
            listener,
        }
    }

    pub fn open(&mut self) {
        let cells = self.source.cells();
        self.choreographer.open(cells);
    }

    pub fn close(&mut self) {
        let cells = self.source.cells();
        self.choreographer.close(cells);
    }

    /// Closes an open (or opening) menu, opens otherwise.
    pub fn toggle(&mut self) {
        match self.choreographer.state() {
            LifecycleState::Open | LifecycleState::Opening => self.close(),
            LifecycleState::Closed | LifecycleState::Closing => self.open(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.choreographer.state().is_closed()
    }

    pub fn state(&self) -> LifecycleState {
        self.choreographer.state()
    }

    /// Reports a selection of the cell at `index` to the listener.
    ///
    /// Only interactive cells of an open menu can be selected.
    pub fn select(&mut self, index: usize) -> Result<(), LiquidError> {
        let state = self.choreographer.state();
        let selectable = state == LifecycleState::Open
            && self
                .source
                .object_at(index)
                .is_some_and(|cell| cell.borrow().interactive);
        if !selectable {
            return Err(LiquidError::CellNotSelectable { index, state });
        }

        debug!(index, "cell selected");
        self.listener.did_select(index);
        Ok(())
    }

    pub fn tick(&mut self, dt: f64) -> Frame {
        self.choreographer.tick(dt)
    }

    pub fn choreographer(&self) -> &Choreographer {
        &self.choreographer
    }

    pub fn choreographer_mut(&mut self) -> &mut Choreographer {
        &mut self.choreographer
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }
}
