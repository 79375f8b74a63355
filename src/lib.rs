//! Splitting **closed triangle meshes** along a plane, producing two closed
//! halves whose cross-sections are capped with flat, ear-clipped patches.
//!
//! The core operation is [`Mesh::split`]: classify every triangle against the
//! plane, clip the straddling ones, chain the cut segments into closed loops,
//! triangulate the loops in the plane's local 2D frame, and assemble two
//! watertight meshes. The input mesh is never mutated.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` import/export
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon for multithreading

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod plane;
pub mod split;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::SplitError;
pub use mesh::Mesh;
pub use plane::Plane;
pub use split::{SplitConfig, SplitResult};
