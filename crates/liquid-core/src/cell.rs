//! Host-visible animated objects.
//!
//! A [`Cell`] is created and owned by the host (through a
//! [`CircleSource`](crate::source::CircleSource)); the choreographer only holds
//! a [`CellRef`] while a cycle runs and rewrites the cell's sample every tick.

use crate::animation::visible_fraction;
use kurbo::Point;
use metaball_core::{Circle, Color};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a cell. Identity persists across frames.
pub type CellRef = Rc<RefCell<Cell>>;

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Current disk of the cell.
    pub circle: Circle,
    /// Opacity of the cell's content (icon), 0.0 to 1.0.
    pub content_alpha: f64,
    /// Whether the cell accepts selection.
    pub interactive: bool,
    /// Whether the cell is on the renderable surface.
    pub attached: bool,
}

impl Cell {
    pub fn new(circle: Circle) -> Self {
        Self {
            circle,
            content_alpha: 0.0,
            interactive: false,
            attached: false,
        }
    }

    pub fn shared(circle: Circle) -> CellRef {
        Rc::new(RefCell::new(Self::new(circle)))
    }

    /// Applies the opacity-equivalent state for `ratio` of this cell's progress.
    pub fn update(&mut self, ratio: f64, open: bool) {
        self.content_alpha = visible_fraction(ratio, open);
    }

    /// Puts the cell on the surface, hidden inside the base circle.
    pub(crate) fn stage(&mut self, origin: Point, color: Color) {
        self.circle.center = origin;
        self.circle.color = color;
        self.content_alpha = 0.0;
        self.interactive = false;
        self.attached = true;
    }
}
