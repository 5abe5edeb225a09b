//! # metaball-core
//!
//! Geometry for liquid metaball blending: given pairs of nearby circles, builds
//! the smooth connective outline ("neck") between them and merges every neck
//! with a base disk into one fillable [`CompositeShape`].
//!
//! Everything here is a pure function of its inputs. Paths are produced as
//! [`kurbo::BezPath`] values; painting them is left to a rendering surface.
//!
//! ```rust
//! use metaball_core::{Circle, Color, EngineParameters, MetaballEngine};
//!
//! let mut engine = MetaballEngine::new(EngineParameters::default(), Color::default());
//! let base = Circle::new((100.0, 100.0), 28.0, Color::default());
//! let cell = Circle::new((100.0, 40.0), 20.0, Color::default());
//!
//! engine.clear();
//! engine.push(&base, &cell);
//! let shape = engine.draw(&base);
//! assert_eq!(shape.connectors, 1);
//! ```

pub mod circle;
pub mod engine;
pub mod shape;

pub use circle::{Circle, Color};
pub use engine::{connect, Connector, EngineParameters, MetaballEngine};
pub use shape::{disk_path, CompositeShape, ARC_TOLERANCE};
