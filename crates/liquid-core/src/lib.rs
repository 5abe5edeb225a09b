//! # liquid-core
//!
//! Animation driver for a liquid floating menu: a base circle whose cells
//! stream out along one axis and back, glued together by metaball necks.
//!
//! ## Core Features
//!
//! *   **Choreography**: Staggered, eased open/close cycles with hard-restart
//!     semantics ([`Choreographer`]).
//! *   **Lifecycle**: Closed / Opening / Open / Closing ([`LifecycleState`]).
//! *   **Capabilities**: Cells come from a [`CircleSource`]; selections go to a
//!     [`SelectionListener`]; [`LiquidMenu`] wires both to a choreographer.
//! *   **Configuration**: JSON-loadable [`LiquidConfig`] with clamping.
//!
//! ## Usage
//!
//! ```rust
//! use liquid_core::{Cell, Choreographer, LiquidConfig, LifecycleState};
//! use metaball_core::{Circle, Color};
//!
//! let base = Circle::new((160.0, 480.0), 28.0, Color::default());
//! let cells: Vec<_> = (0..3)
//!     .map(|_| Cell::shared(Circle::new((0.0, 0.0), 20.0, Color::default())))
//!     .collect();
//!
//! let mut choreographer = Choreographer::new(base, LiquidConfig::default());
//! choreographer.open(cells.clone());
//! while choreographer.is_running() {
//!     let frame = choreographer.tick(1.0 / 60.0);
//!     let _svg = frame.shape.to_svg_path();
//! }
//! assert_eq!(choreographer.state(), LifecycleState::Open);
//! assert!(cells.iter().all(|c| c.borrow().interactive));
//! ```

/// Easing curves and the content fade rule.
pub mod animation;

/// Host-visible animated cells.
pub mod cell;

/// The per-frame animation driver.
pub mod choreographer;

/// Cycle clock and fixed-rate tick source.
pub mod clock;

/// JSON-loadable settings.
pub mod config;

pub mod errors;

/// The menu facade combining source, listener and choreographer.
pub mod menu;

/// Cell source and selection capabilities.
pub mod source;

/// Lifecycle states.
pub mod state;

pub use animation::{ease, visible_fraction, EasingType};
pub use cell::{Cell, CellRef};
pub use choreographer::{Choreographer, Frame};
pub use clock::{Clock, FixedStepClock};
pub use config::{Direction, LiquidConfig};
pub use errors::LiquidError;
pub use menu::LiquidMenu;
pub use source::{CircleSource, SelectionListener};
pub use state::LifecycleState;
