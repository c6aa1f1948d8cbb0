// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus and activation arbitration.
//!
//! There is no stored per-element state machine. Each frame, widgets claim
//! focus or activation for an element id on an interactor, and the result is
//! derived by comparing this frame's claim with the interactor's `_prev`
//! fields:
//!
//! ```text
//! Inactive --hit, best priority--> Focused --activate--> Active
//!    ^                                |                     |
//!    +-------- lost hit --------------+<---- released ------+
//! ```
//!
//! Focus claims accumulate within a frame: an interactor remembers the best
//! priority it has handed out, and a later element with an equal or better
//! priority takes focus over an earlier one.

use glam::Vec3;
use tracing::trace;

use crate::interactor::Interactors;
use crate::types::{ButtonState, ElementId, InteractorId};

impl Interactors {
    /// Claim focus of `element` for `interactor`.
    ///
    /// The claim succeeds when `hit` is set and `priority` is no worse than the
    /// best priority this interactor has seen this frame. A `None` or unknown
    /// interactor returns an empty state and changes nothing.
    ///
    /// The returned state compares the claim with last frame's focus:
    /// [`ACTIVE`](ButtonState::ACTIVE) while focused,
    /// [`JUST_ACTIVE`](ButtonState::JUST_ACTIVE) when newly focused, and
    /// [`JUST_INACTIVE`](ButtonState::JUST_INACTIVE) when focus was lost.
    pub fn set_focus(
        &mut self,
        interactor: Option<InteractorId>,
        element: ElementId,
        hit: bool,
        priority: f32,
    ) -> ButtonState {
        let Some(actor) = interactor.and_then(|id| self.items.get_mut(id.index())) else {
            return ButtonState::empty();
        };

        let was_focused = actor.focused_prev == Some(element);
        let is_focused = hit && priority <= actor.focused_priority;
        if is_focused {
            actor.focused = Some(element);
            actor.focused_priority = priority;
        }

        let state = ButtonState::from_transition(was_focused, is_focused);
        if state.intersects(ButtonState::CHANGED) {
            trace!(?interactor, ?element, ?state, priority, "focus changed");
        }
        state
    }

    /// Claim activation of `element` for `interactor`.
    ///
    /// Activation only sticks to an element the interactor already has a
    /// relationship with: active on it last frame, or focused on it last frame
    /// or this frame. An interactor already activated on a different element
    /// this frame refuses the claim. On [`JUST_ACTIVE`](ButtonState::JUST_ACTIVE) the
    /// interactor's poses and the world-space interaction point `at_world`
    /// are captured in its [`ActionSnapshot`](crate::ActionSnapshot).
    ///
    /// A `None` or unknown interactor returns an empty state and changes nothing.
    pub fn set_active(
        &mut self,
        interactor: Option<InteractorId>,
        element: ElementId,
        activate: bool,
        at_world: Vec3,
    ) -> ButtonState {
        let Some(actor) = interactor.and_then(|id| self.items.get_mut(id.index())) else {
            return ButtonState::empty();
        };

        let was_active = actor.active_prev == Some(element);
        let related = was_active
            || actor.focused_prev == Some(element)
            || actor.focused == Some(element);
        // The first element activated this frame keeps the interactor.
        let taken = actor.active.is_some_and(|e| e != element);
        let is_active = activate && related && !taken;
        if is_active {
            actor.active = Some(element);
        }

        let state = ButtonState::from_transition(was_active, is_active);
        if state.is_just_active() {
            actor.action.motion_pose_world = actor.motion_pose_world;
            actor.action.hit_test_world = actor.hit_test_world;
            actor.action.hit_at_world = at_world;
            actor.action.hit_at_action_local = actor
                .motion_pose_world
                .to_mat4()
                .inverse()
                .transform_point3(at_world);
        }
        if state.intersects(ButtonState::CHANGED) {
            trace!(?interactor, ?element, ?state, "activation changed");
        }
        state
    }

    /// Whether `interactor` is committed to an element other than `element`.
    ///
    /// True when it was active on a different element last frame, or, with
    /// `include_focused`, focused on a different element last frame. Unknown
    /// interactors are never preoccupied.
    pub fn is_preoccupied(
        &self,
        interactor: InteractorId,
        element: ElementId,
        include_focused: bool,
    ) -> bool {
        let Some(actor) = self.get(interactor) else {
            return false;
        };
        let other = |prev: Option<ElementId>| prev.is_some_and(|e| e != element);
        (include_focused && other(actor.focused_prev)) || other(actor.active_prev)
    }

    /// First interactor that was active on `element` last frame.
    pub fn last_active(&self, element: ElementId) -> Option<InteractorId> {
        self.iter()
            .find(|(_, actor)| actor.active_prev == Some(element))
            .map(|(id, _)| id)
    }

    /// First interactor that was focused on `element` last frame.
    pub fn last_focused(&self, element: ElementId) -> Option<InteractorId> {
        self.iter()
            .find(|(_, actor)| actor.focused_prev == Some(element))
            .map(|(id, _)| id)
    }
}
