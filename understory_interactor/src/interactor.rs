// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactor records and the registry that owns them.

use alloc::vec::Vec;

use glam::Vec3;
use tracing::debug;

use crate::types::{ButtonState, ElementId, InteractorEvents, InteractorId, InteractorKind, Pose};

/// World and local state captured when an activation begins.
///
/// Manipulation code measures deltas against these values for as long as the
/// activation lasts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ActionSnapshot {
    /// Motion pose in world space at activation.
    pub motion_pose_world: Pose,
    /// Hit-test pose in world space at activation.
    pub hit_test_world: Pose,
    /// Interaction point in world space at activation.
    pub hit_at_world: Vec3,
    /// Interaction point relative to the motion pose at activation.
    pub hit_at_action_local: Vec3,
}

/// A tracked pointing device: a hand, a fingertip, a controller ray.
///
/// Input code owns the world-space fields and refreshes them every frame via
/// [`Interactor::update`]. Local-space fields are derived by
/// [`Interactors::update_local`], and focus/active bookkeeping is written only
/// by the arbiter (see [`Interactors::set_focus`] and
/// [`Interactors::set_active`]) and by [`Interactors::step_frame`].
#[derive(Clone, Debug)]
pub struct Interactor {
    /// Hit-test algorithm.
    pub kind: InteractorKind,
    /// Tracking state; untracked interactors never hit anything.
    pub tracked: ButtonState,
    /// Event categories this interactor may drive.
    pub events: InteractorEvents,
    /// Current hit-test pose in world space.
    pub hit_test_world: Pose,
    /// Pose used for manipulation, in world space.
    pub motion_pose_world: Pose,
    /// Radius of [`InteractorKind::Point`] interactors.
    pub radius: f32,

    pub(crate) hit_test_world_prev: Pose,

    pub(crate) hit_test_local: Pose,
    pub(crate) hit_test_local_prev: Pose,
    pub(crate) motion_pose_local: Pose,
    pub(crate) hit_test_local_dir: Vec3,

    pub(crate) focused: Option<ElementId>,
    pub(crate) focused_prev: Option<ElementId>,
    pub(crate) focused_priority: f32,
    pub(crate) active: Option<ElementId>,
    pub(crate) active_prev: Option<ElementId>,

    pub(crate) action: ActionSnapshot,
}

impl Interactor {
    /// Create an untracked interactor at the origin.
    pub fn new(kind: InteractorKind, events: InteractorEvents) -> Self {
        Self {
            kind,
            tracked: ButtonState::empty(),
            events,
            hit_test_world: Pose::IDENTITY,
            motion_pose_world: Pose::IDENTITY,
            radius: 0.0,
            hit_test_world_prev: Pose::IDENTITY,
            hit_test_local: Pose::IDENTITY,
            hit_test_local_prev: Pose::IDENTITY,
            motion_pose_local: Pose::IDENTITY,
            hit_test_local_dir: Vec3::NEG_Z,
            focused: None,
            focused_prev: None,
            focused_priority: f32::INFINITY,
            active: None,
            active_prev: None,
            action: ActionSnapshot::default(),
        }
    }

    /// Set the radius used by point hit tests.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Refresh tracking and world poses for a new frame.
    ///
    /// The outgoing hit-test pose becomes the previous one, so point
    /// interactors sweep between frames. When tracking has just begun there is
    /// no meaningful previous pose, and the new pose is used for both.
    pub fn update(&mut self, tracked: ButtonState, hit_test_world: Pose, motion_pose_world: Pose) {
        self.hit_test_world_prev = if tracked.is_just_active() {
            hit_test_world
        } else {
            self.hit_test_world
        };
        self.tracked = tracked;
        self.hit_test_world = hit_test_world;
        self.motion_pose_world = motion_pose_world;
    }

    /// Whether this interactor can currently hit anything.
    pub fn is_tracked(&self) -> bool {
        self.tracked.is_active()
    }

    /// Hit-test pose in world space as of the previous frame.
    pub fn hit_test_world_prev(&self) -> Pose {
        self.hit_test_world_prev
    }

    /// Hit-test pose in the current local space.
    pub fn hit_test_local(&self) -> Pose {
        self.hit_test_local
    }

    /// Previous hit-test pose in the current local space.
    pub fn hit_test_local_prev(&self) -> Pose {
        self.hit_test_local_prev
    }

    /// Motion pose in the current local space.
    pub fn motion_pose_local(&self) -> Pose {
        self.motion_pose_local
    }

    /// Forward direction in the current local space (ray interactors).
    pub fn hit_test_local_dir(&self) -> Vec3 {
        self.hit_test_local_dir
    }

    /// Element focused so far this frame.
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Element focused last frame.
    pub fn focused_prev(&self) -> Option<ElementId> {
        self.focused_prev
    }

    /// Best (lowest) focus priority claimed so far this frame.
    pub fn focused_priority(&self) -> f32 {
        self.focused_priority
    }

    /// Element active so far this frame.
    pub fn active(&self) -> Option<ElementId> {
        self.active
    }

    /// Element active last frame.
    pub fn active_prev(&self) -> Option<ElementId> {
        self.active_prev
    }

    /// State captured when the current activation began.
    pub fn action(&self) -> &ActionSnapshot {
        &self.action
    }

    /// Roll this frame's focus/active results into the `_prev` fields.
    fn step_frame(&mut self) {
        self.focused_prev = self.focused.take();
        self.active_prev = self.active.take();
        self.focused_priority = f32::INFINITY;
    }
}

/// Ordered, resizable collection of interactors.
///
/// Input code adds and removes interactors as devices appear and disappear;
/// everything else addresses them by [`InteractorId`]. Removing an interactor
/// shifts the ids of the ones after it.
#[derive(Clone, Debug, Default)]
pub struct Interactors {
    pub(crate) items: Vec<Interactor>,
}

impl Interactors {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interactor and return its id.
    pub fn add(&mut self, interactor: Interactor) -> InteractorId {
        let id = InteractorId::new(self.items.len());
        debug!(index = id.index(), kind = ?interactor.kind, "interactor added");
        self.items.push(interactor);
        id
    }

    /// Remove an interactor, returning it if the id was valid.
    pub fn remove(&mut self, id: InteractorId) -> Option<Interactor> {
        if id.index() >= self.items.len() {
            return None;
        }
        debug!(index = id.index(), "interactor removed");
        Some(self.items.remove(id.index()))
    }

    /// Remove every interactor.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of interactors.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no interactors.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an interactor.
    pub fn get(&self, id: InteractorId) -> Option<&Interactor> {
        self.items.get(id.index())
    }

    /// Look up an interactor mutably.
    pub fn get_mut(&mut self, id: InteractorId) -> Option<&mut Interactor> {
        self.items.get_mut(id.index())
    }

    /// Iterate interactors in id order.
    pub fn iter(&self) -> impl Iterator<Item = (InteractorId, &Interactor)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, actor)| (InteractorId::new(i), actor))
    }

    /// Ids of all interactors, in order.
    pub fn ids(&self) -> impl Iterator<Item = InteractorId> + use<> {
        (0..self.items.len()).map(InteractorId::new)
    }

    /// Frame boundary: copy focus/active into their `_prev` fields, clear the
    /// current ones, and reset every interactor's focus priority.
    ///
    /// This is the only operation that writes the `_prev` fields.
    pub fn step_frame(&mut self) {
        for actor in &mut self.items {
            actor.step_frame();
        }
    }
}
