// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Volume: box volume primitives for spatial (3D) hit testing.
//!
//! This crate provides the narrow-phase geometry used when tracked pointing
//! devices (hands, controllers, rays) are tested against UI element volumes.
//! Everything is expressed in the *local* space of the element being tested;
//! transforming poses into that space is the caller's job.
//!
//! # Key types
//!
//! - [`Bounds`] – an axis-aligned box described by its center and its full
//!   dimensions. Use [`Bounds::from_top_left`] when the caller thinks in a
//!   top-left + size convention, where layout grows toward `-X` and `-Y`.
//! - [`Ray`] – an origin and a direction, see [`Bounds::ray_intersect`].
//!
//! # Tests
//!
//! - [`Bounds::contains_point`] – inclusive point containment.
//! - [`Bounds::line_contains`] – does a line *segment* touch the box.
//! - [`Bounds::capsule_contains`] – does a swept sphere (segment + radius)
//!   touch the box. The box is inflated by the radius, so corners are treated
//!   as square rather than rounded; this is slightly generous near corners.
//! - [`Bounds::ray_intersect`] – distance along a ray to the box.
//! - [`Bounds::sdf_manhattan`] – signed distance used for ranking: negative
//!   inside (depth to the nearest face), positive outside (sum of per-axis
//!   overshoot). Lower means "more inside".
//!
//! ```rust
//! use glam::Vec3;
//! use understory_volume::{Bounds, Ray};
//!
//! let button = Bounds::new(Vec3::ZERO, Vec3::ONE);
//!
//! // A fingertip that swept through the button this frame.
//! assert!(button.capsule_contains(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0), 0.01));
//!
//! // A controller ray aimed at the front face.
//! let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z);
//! assert_eq!(button.ray_intersect(&ray), Some(1.5));
//!
//! // The center is half a unit deep.
//! assert_eq!(button.sdf_manhattan(Vec3::ZERO), -0.5);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

use glam::Vec3;

mod ray;

pub use ray::Ray;

/// Parallel-axis threshold for segment and ray tests.
const PARALLEL_EPSILON: f32 = 1e-7;

/// Axis-aligned box in local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Center of the box.
    pub center: Vec3,
    /// Full extent along each axis (not half extents).
    pub dimensions: Vec3,
}

impl Bounds {
    /// An empty box at the origin.
    pub const ZERO: Self = Self::new(Vec3::ZERO, Vec3::ZERO);

    /// Create a box from its center and full dimensions.
    pub const fn new(center: Vec3, dimensions: Vec3) -> Self {
        Self { center, dimensions }
    }

    /// Create a box from its top-left-front corner and its dimensions.
    ///
    /// UI layout grows away from the top-left corner toward `-X` and `-Y`,
    /// so the center lies at `top_left - dimensions / 2`.
    pub fn from_top_left(top_left: Vec3, dimensions: Vec3) -> Self {
        Self {
            center: top_left - dimensions * 0.5,
            dimensions,
        }
    }

    /// Create the smallest box containing both corners.
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self {
            center: (min + max) * 0.5,
            dimensions: max - min,
        }
    }

    /// Half of the dimensions.
    pub fn half_extents(&self) -> Vec3 {
        self.dimensions * 0.5
    }

    /// Minimum corner.
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents()
    }

    /// Maximum corner.
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents()
    }

    /// Grow the box by `amount` on every side.
    pub fn inflate(&self, amount: f32) -> Self {
        Self {
            center: self.center,
            dimensions: self.dimensions + Vec3::splat(amount * 2.0),
        }
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, pt: Vec3) -> bool {
        let min = self.min();
        let max = self.max();
        pt.cmpge(min).all() && pt.cmple(max).all()
    }

    /// Whether the segment from `start` to `end` touches the box.
    ///
    /// A zero-length segment degrades to [`Bounds::contains_point`].
    pub fn line_contains(&self, start: Vec3, end: Vec3) -> bool {
        let min = self.min();
        let max = self.max();
        let delta = end - start;

        let mut t_enter = 0.0_f32;
        let mut t_exit = 1.0_f32;
        for axis in 0..3 {
            let s = start[axis];
            let d = delta[axis];
            if d > -PARALLEL_EPSILON && d < PARALLEL_EPSILON {
                // Parallel to this slab: must already be between its planes.
                if s < min[axis] || s > max[axis] {
                    return false;
                }
                continue;
            }
            let inv = 1.0 / d;
            let a = (min[axis] - s) * inv;
            let b = (max[axis] - s) * inv;
            t_enter = t_enter.max(a.min(b));
            t_exit = t_exit.min(a.max(b));
            if t_enter > t_exit {
                return false;
            }
        }
        true
    }

    /// Whether a capsule (the segment `start..end` swept by `radius`) touches the box.
    pub fn capsule_contains(&self, start: Vec3, end: Vec3, radius: f32) -> bool {
        self.inflate(radius).line_contains(start, end)
    }

    /// Distance along `ray` to where it meets the box.
    ///
    /// Returns the entry distance, or the exit distance when the origin is
    /// already inside. `None` when the ray misses, the box is entirely
    /// behind the origin, or the direction is zero. A ray lying in a face
    /// plane touches the box.
    pub fn ray_intersect(&self, ray: &Ray) -> Option<f32> {
        let min = self.min();
        let max = self.max();

        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;
        for axis in 0..3 {
            let o = ray.origin[axis];
            let d = ray.direction[axis];
            if d > -PARALLEL_EPSILON && d < PARALLEL_EPSILON {
                if o < min[axis] || o > max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let a = (min[axis] - o) * inv;
            let b = (max[axis] - o) * inv;
            t_min = t_min.max(a.min(b));
            t_max = t_max.min(a.max(b));
        }

        // `t_max` stays infinite only for a zero direction.
        if t_max < 0.0 || t_min > t_max || t_max.is_infinite() {
            return None;
        }
        Some(if t_min < 0.0 { t_max } else { t_min })
    }

    /// Manhattan-style signed distance from `pt` to the box surface.
    ///
    /// Inside, this is the (negative) distance to the nearest face. Outside,
    /// it is the sum of how far `pt` overshoots the box on each axis.
    pub fn sdf_manhattan(&self, pt: Vec3) -> f32 {
        let q = (pt - self.center).abs() - self.half_extents();
        let outside = q.max(Vec3::ZERO);
        let inside = q.max_element().min(0.0);
        outside.x + outside.y + outside.z + inside
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::ZERO
    }
}
