//! # Liquid Engine
//!
//! `liquid-engine` renders "liquid" menus: a base circle whose cells stream out
//! along one axis, connected by metaball necks that stretch and snap as the
//! cells move apart.
//!
//! The workspace is split into:
//! *   [`metaball`]: two-circle neck geometry and composite outlines (kurbo).
//! *   [`liquid`]: the staggered open/close choreographer and menu facade.
//!
//! Rasterization lives in the `liquid-skia` crate and the frame exporter in
//! `liquid-cli`.

pub use liquid_core as liquid;
pub use metaball_core as metaball;

pub use liquid_core::{
    Cell, CellRef, Choreographer, CircleSource, Direction, EasingType, Frame, LifecycleState,
    LiquidConfig, LiquidError, LiquidMenu, SelectionListener,
};
pub use metaball_core::{Circle, Color, CompositeShape, EngineParameters, MetaballEngine};
