// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projection of interactor poses into an element's local space.

use glam::Mat4;

use crate::interactor::Interactors;
use crate::types::InteractorKind;

impl Interactors {
    /// Recompute every interactor's local-space poses for a new coordinate context.
    ///
    /// `to_local` maps world space into the space the next volumes are defined
    /// in. Call this whenever that context changes. A non-invertible transform
    /// yields meaningless local poses.
    pub fn update_local(&mut self, to_local: Mat4) {
        for actor in &mut self.items {
            actor.hit_test_local = actor.hit_test_world.transformed(to_local);
            actor.hit_test_local_prev = actor.hit_test_world_prev.transformed(to_local);
            actor.motion_pose_local = actor.motion_pose_world.transformed(to_local);
            if actor.kind == InteractorKind::Ray {
                actor.hit_test_local_dir = actor.hit_test_local.forward();
            }
        }
    }
}
