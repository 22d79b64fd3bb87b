//! # Procgen Shape
//!
//! Initial shape geometry handed to the generation engine.
//!
//! ## Architecture
//!
//! ```text
//! ShapeSource::Path    → GeometryResolver (engine) → InitialShapeGeometry
//! ShapeSource::Buffers → from_buffers (validated)  → InitialShapeGeometry
//! ```
//!
//! Callers substitute [`InitialShapeGeometry::default_quad`] when either
//! path fails, so one bad shape never aborts a batch.
//!
//! ## Example
//!
//! ```rust
//! use procgen_shape::InitialShapeGeometry;
//!
//! let quad = InitialShapeGeometry::from_buffers(
//!     vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0],
//!     vec![0, 1, 2, 3],
//!     vec![4],
//! )
//! .unwrap();
//! assert_eq!(quad, InitialShapeGeometry::default_quad());
//! ```

pub mod error;
pub mod geometry;
pub mod source;
pub mod uri;

pub use error::{GeometryResolutionError, InvalidGeometryError, ShapeError, UriError};
pub use geometry::InitialShapeGeometry;
pub use source::{GeometryResolver, ShapeSource};
pub use uri::{file_uri_to_path, to_file_uri};
