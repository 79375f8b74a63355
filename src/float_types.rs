// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Absolute floor for coincidence comparisons. The effective epsilon of a
/// split is `relative_tolerance() * bounding-box diagonal`, clamped so it
/// never drops below this.
#[cfg(feature = "f32")]
pub const EPSILON: Real = 1e-5;
/// Absolute floor for coincidence comparisons. The effective epsilon of a
/// split is `relative_tolerance() * bounding-box diagonal`, clamped so it
/// never drops below this.
#[cfg(feature = "f64")]
pub const EPSILON: Real = 1e-12;

/// Lazily-initialized relative tolerance used across the crate.
/// Defaults depend on precision (`f32` vs `f64`), but can be overridden:
///  1) **Build-time**: set env var `CLEAVER_TOLERANCE` (e.g. `CLEAVER_TOLERANCE=1e-6 cargo build`)
///  2) **Runtime**: call [`set_relative_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_relative_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-5
    }
    #[cfg(feature = "f64")]
    {
        1e-8
    }
}

/// Returns the current relative tolerance (a fraction of the mesh
/// bounding-box diagonal). If not set yet, it tries `CLEAVER_TOLERANCE`
/// (parsed as the active `Real`) and falls back to a sensible default.
pub fn relative_tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        // Compile-time env if provided, inherited by dependencies
        if let Some(environment_variable) = option_env!("CLEAVER_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_relative_tolerance()
    })
}

/// Set the relative tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `cleaver::float_types::set_relative_tolerance(1e-6);`
pub fn set_relative_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

// Pi
/// Archimedes' constant (π)
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
/// Archimedes' constant (π)
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;

// Tau
/// The full circle constant (τ)
#[cfg(feature = "f32")]
pub const TAU: Real = core::f32::consts::TAU;
/// The full circle constant (τ)
#[cfg(feature = "f64")]
pub const TAU: Real = core::f64::consts::TAU;
