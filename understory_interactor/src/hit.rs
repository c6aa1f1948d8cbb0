// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Volume hit testing for a single interactor.

use glam::Vec3;
use understory_volume::{Bounds, Ray};

use crate::interactor::Interactor;
use crate::types::InteractorKind;

/// Result of testing one interactor against one box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeHit {
    /// Whether the interactor touches the box.
    pub hit: bool,
    /// Interaction point in local space; zero on a miss.
    pub at: Vec3,
    /// Ranking value, lower is better; `+inf` on a miss.
    pub priority: f32,
}

impl VolumeHit {
    /// No hit, worst possible priority.
    pub const MISS: Self = Self {
        hit: false,
        at: Vec3::ZERO,
        priority: f32::INFINITY,
    };
}

impl Default for VolumeHit {
    fn default() -> Self {
        Self::MISS
    }
}

impl Interactor {
    /// Test this interactor against `bounds`, in the current local space.
    ///
    /// - Point interactors sweep a capsule of [`Interactor::radius`] from the
    ///   previous to the current hit-test position. The priority is the box's
    ///   Manhattan SDF at the current position.
    /// - Ray interactors cast along their local forward direction. The
    ///   priority is the SDF at the hit point plus the squared distance to
    ///   it, so nearer boxes win over farther ones.
    ///
    /// Untracked interactors always miss.
    pub fn check_box(&self, bounds: &Bounds) -> VolumeHit {
        if !self.is_tracked() {
            return VolumeHit::MISS;
        }

        match self.kind {
            InteractorKind::Point => {
                let at = self.hit_test_local.position;
                if bounds.capsule_contains(at, self.hit_test_local_prev.position, self.radius) {
                    VolumeHit {
                        hit: true,
                        at,
                        priority: bounds.sdf_manhattan(at),
                    }
                } else {
                    VolumeHit::MISS
                }
            }
            InteractorKind::Ray => {
                let ray = Ray::new(self.hit_test_local.position, self.hit_test_local_dir);
                match bounds.ray_intersect(&ray) {
                    Some(dist) => {
                        let at = ray.at(dist);
                        VolumeHit {
                            hit: true,
                            at,
                            priority: bounds.sdf_manhattan(at)
                                + ray.origin.distance_squared(at),
                        }
                    }
                    None => VolumeHit::MISS,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Quat};

    use super::*;
    use crate::interactor::Interactors;
    use crate::types::{ButtonState, InteractorEvents, Pose};

    fn localized(actor: Interactor) -> Interactor {
        let mut reg = Interactors::new();
        let id = reg.add(actor);
        reg.update_local(Mat4::IDENTITY);
        reg.remove(id).unwrap()
    }

    fn point_at(pos: Vec3) -> Interactor {
        let mut actor =
            Interactor::new(InteractorKind::Point, InteractorEvents::POKE).with_radius(0.05);
        let pose = Pose::new(pos, Quat::IDENTITY);
        actor.update(ButtonState::ACTIVE | ButtonState::JUST_ACTIVE, pose, pose);
        localized(actor)
    }

    fn ray_from(pos: Vec3) -> Interactor {
        let mut actor = Interactor::new(InteractorKind::Ray, InteractorEvents::PINCH);
        let pose = Pose::new(pos, Quat::IDENTITY);
        actor.update(ButtonState::ACTIVE | ButtonState::JUST_ACTIVE, pose, pose);
        localized(actor)
    }

    const UNIT: Bounds = Bounds::new(Vec3::ZERO, Vec3::ONE);

    #[test]
    fn point_inside_hits_with_depth_priority() {
        let hit = point_at(Vec3::ZERO).check_box(&UNIT);
        assert!(hit.hit);
        assert_eq!(hit.at, Vec3::ZERO);
        assert_eq!(hit.priority, -0.5);
    }

    #[test]
    fn point_outside_misses() {
        let hit = point_at(Vec3::new(0.0, 0.0, 1.0)).check_box(&UNIT);
        assert_eq!(hit, VolumeHit::MISS);
    }

    #[test]
    fn point_sweep_catches_fast_motion() {
        let mut actor =
            Interactor::new(InteractorKind::Point, InteractorEvents::POKE).with_radius(0.01);
        let before = Pose::new(Vec3::new(0.0, 0.0, 1.0), Quat::IDENTITY);
        let after = Pose::new(Vec3::new(0.0, 0.0, -1.0), Quat::IDENTITY);
        actor.update(ButtonState::ACTIVE | ButtonState::JUST_ACTIVE, before, before);
        actor.update(ButtonState::ACTIVE, after, after);
        let actor = localized(actor);

        let hit = actor.check_box(&UNIT);
        assert!(hit.hit, "the swept capsule passes through the box");
        assert_eq!(hit.at, after.position);
        assert!(hit.priority > 0.0);
    }

    #[test]
    fn ray_priority_adds_squared_distance() {
        let hit = ray_from(Vec3::new(0.0, 0.0, 2.5)).check_box(&UNIT);
        assert!(hit.hit);
        assert!(hit.at.abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), 1e-6));
        assert!((hit.priority - 4.0).abs() < 1e-5);
    }

    #[test]
    fn ray_pointing_away_misses() {
        let mut actor = ray_from(Vec3::new(0.0, 0.0, 2.5));
        actor.hit_test_local_dir = Vec3::Z;
        assert_eq!(actor.check_box(&UNIT), VolumeHit::MISS);
    }

    #[test]
    fn untracked_never_hits() {
        let mut actor = point_at(Vec3::ZERO);
        actor.tracked = ButtonState::JUST_INACTIVE;
        assert_eq!(actor.check_box(&UNIT), VolumeHit::MISS);
        let mut actor = ray_from(Vec3::new(0.0, 0.0, 2.5));
        actor.tracked = ButtonState::empty();
        assert_eq!(actor.check_box(&UNIT).priority, f32::INFINITY);
    }
}
