// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rays for far-field (pointer) hit testing.

use glam::Vec3;

/// A half-line starting at `origin` and extending along `direction`.
///
/// `direction` is not required to be normalized, but distances returned by
/// [`Bounds::ray_intersect`](crate::Bounds::ray_intersect) are measured in
/// multiples of it, so callers that want world units should normalize first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Start of the ray.
    pub origin: Vec3,
    /// Direction of travel.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray.
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
