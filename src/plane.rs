//! Oriented planes and the local 2D frame used for cap triangulation.

use crate::errors::SplitError;
use crate::float_types::{EPSILON, Real};
use nalgebra::{Point3, Vector3};

/// An oriented plane `n · p = w` with unit normal `n`.
///
/// The normal side of the plane is the *positive* half-space; points with
/// [`signed_distance`](Plane::signed_distance) above zero lie on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    normal: Vector3<Real>,
    w: Real,
}

impl Plane {
    /// Build a plane through `point` with the given (not necessarily unit)
    /// `normal`. Fails with [`SplitError::DegenerateInput`] if the normal has
    /// (near) zero length or any parameter is non-finite.
    pub fn from_point_normal(
        point: Point3<Real>,
        normal: Vector3<Real>,
    ) -> Result<Self, SplitError> {
        let length = normal.norm();
        if !length.is_finite() || length < EPSILON {
            return Err(SplitError::DegenerateInput(format!(
                "plane normal ({}, {}, {}) has zero length",
                normal.x, normal.y, normal.z
            )));
        }
        if !point.coords.iter().all(|c| c.is_finite()) {
            return Err(SplitError::DegenerateInput(format!(
                "plane point ({}, {}, {}) is not finite",
                point.x, point.y, point.z
            )));
        }
        let unit = normal / length;
        Ok(Plane {
            normal: unit,
            w: unit.dot(&point.coords),
        })
    }

    /// Build a plane from a (not necessarily unit) normal and its offset `w`
    /// along that normal.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Result<Self, SplitError> {
        Self::from_point_normal(Point3::from(normal.normalize() * w), normal)
    }

    /// The unit normal.
    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    /// Offset along the normal (`n · p` for points `p` on the plane).
    pub const fn offset(&self) -> Real {
        self.w
    }

    /// Signed distance of `p` to the plane; positive on the normal side.
    pub fn signed_distance(&self, p: &Point3<Real>) -> Real {
        self.normal.dot(&p.coords) - self.w
    }

    /// Flip the plane orientation in place.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// A copy of this plane with the opposite orientation.
    pub fn flipped(&self) -> Self {
        let mut plane = self.clone();
        plane.flip();
        plane
    }

    /// An orthonormal in-plane basis `(u, v)` with `u × v = n`, so that 2D
    /// polygons wound counter-clockwise in `(u, v)` coordinates lift to 3D
    /// triangles whose normal is `+n`.
    pub fn basis(&self) -> (Vector3<Real>, Vector3<Real>) {
        let n = self.normal;
        // pick the world axis least aligned with n to avoid a degenerate cross
        let helper = if n.x.abs() < 0.5 {
            Vector3::x()
        } else {
            Vector3::y()
        };
        let u = n.cross(&helper).normalize();
        let v = n.cross(&u);
        (u, v)
    }

    /// Project `p` into the `(u, v)` frame returned by [`basis`](Plane::basis).
    pub fn project(&self, p: &Point3<Real>) -> (Real, Real) {
        let (u, v) = self.basis();
        (u.dot(&p.coords), v.dot(&p.coords))
    }

    /// Lift `(x, y)` frame coordinates back onto the plane in 3D. Inverse of
    /// [`project`](Plane::project) for points lying exactly on the plane.
    pub fn lift(&self, x: Real, y: Real) -> Point3<Real> {
        let (u, v) = self.basis();
        Point3::from(u * x + v * y + self.normal * self.w)
    }
}
