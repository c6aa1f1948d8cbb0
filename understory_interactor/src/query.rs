// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ready-made volume queries for widgets.
//!
//! - [`InteractionContext::volume_1h`] serves simple widgets (buttons,
//!   toggles) that care about one interactor at a time. It uses a larger box
//!   once focused so focus does not flicker at the boundary.
//! - [`InteractionContext::volume_2h`] serves grabbable handles and ranks up
//!   to two interactors by priority.

use glam::Vec3;
use understory_volume::Bounds;

use crate::context::InteractionContext;
use crate::types::{ButtonState, ElementId, InteractorEvents, InteractorId};

/// Result of [`InteractionContext::volume_1h`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeFocus {
    /// Focus state of the reported interactor on the element.
    pub state: ButtonState,
    /// Interactor that produced `state`, or, when none did this frame, the
    /// interactor that was focused on the element last frame.
    pub interactor: Option<InteractorId>,
    /// Interaction point in local space.
    pub at_local: Vec3,
}

impl VolumeFocus {
    /// Nothing interacting.
    pub const NONE: Self = Self {
        state: ButtonState::empty(),
        interactor: None,
        at_local: Vec3::ZERO,
    };
}

/// How many interactors hold a two-handed element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TwoHandState {
    /// No interactor.
    None,
    /// Exactly one interactor.
    OneHanded,
    /// Two interactors.
    TwoHanded,
}

/// Result of [`InteractionContext::volume_2h`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandleFocus {
    /// Coarse state derived from how many interactors were ranked.
    pub state: TwoHandState,
    /// Interactor with the best (lowest) priority.
    pub first: Option<InteractorId>,
    /// Runner-up.
    pub second: Option<InteractorId>,
}

impl HandleFocus {
    /// Nothing interacting.
    pub const NONE: Self = Self {
        state: TwoHandState::None,
        first: None,
        second: None,
    };
}

impl InteractionContext {
    /// Resolve focus of a single-interactor element.
    ///
    /// Every interactor whose events intersect `events` and that is not
    /// active on another element is tested against the element's box: the
    /// focused box when that interactor focused `element` last frame,
    /// otherwise the unfocused one. Boxes are given as top-left corner and
    /// size (see [`Bounds::from_top_left`]).
    ///
    /// The result reports the *last* interactor whose focus claim produced a
    /// non-empty state; when none did, it falls back to the interactor that
    /// focused `element` last frame. While interaction is disabled this
    /// returns [`VolumeFocus::NONE`] without touching any interactor.
    pub fn volume_1h(
        &mut self,
        element: ElementId,
        events: InteractorEvents,
        unfocused_top_left: Vec3,
        unfocused_size: Vec3,
        focused_top_left: Vec3,
        focused_size: Vec3,
    ) -> VolumeFocus {
        let mut result = VolumeFocus::NONE;
        if !self.settings.enabled {
            return result;
        }

        self.note_keyboard_preserve(element);

        let unfocused = Bounds::from_top_left(unfocused_top_left, unfocused_size);
        let focused = Bounds::from_top_left(focused_top_left, focused_size);

        for id in self.interactors.ids() {
            let Some(actor) = self.interactors.get(id) else {
                continue;
            };
            if !actor.events.intersects(events)
                || self.interactors.is_preoccupied(id, element, false)
            {
                continue;
            }

            let bounds = if actor.focused_prev == Some(element) {
                focused
            } else {
                unfocused
            };

            let hit = self.check_box(id, &bounds);
            let state = self
                .interactors
                .set_focus(Some(id), element, hit.hit, hit.priority);
            if !state.is_empty() {
                result = VolumeFocus {
                    state,
                    interactor: Some(id),
                    at_local: hit.at,
                };
            }
        }

        if result.interactor.is_none() {
            result.interactor = self.interactors.last_focused(element);
        }
        result
    }

    /// Resolve focus of an element that up to two interactors may hold at once.
    ///
    /// Every eligible interactor (matching `events`, not active on another
    /// element) is tested against `bounds` and claims focus. Interactors
    /// whose claim yields a state are ranked by priority, and the best two are
    /// reported. While interaction is disabled this returns
    /// [`HandleFocus::NONE`].
    pub fn volume_2h(
        &mut self,
        element: ElementId,
        events: InteractorEvents,
        bounds: Bounds,
    ) -> HandleFocus {
        if !self.settings.enabled {
            // No interactor is named, so this only yields an empty state.
            self.interactors.set_focus(None, element, false, 0.0);
            return HandleFocus::NONE;
        }

        // Empty slots hold +inf, so a claim that only reports losing focus
        // (priority +inf) is never ranked.
        let mut ranked: [(Option<InteractorId>, f32); 2] = [(None, f32::INFINITY); 2];

        for id in self.interactors.ids() {
            let Some(actor) = self.interactors.get(id) else {
                continue;
            };
            if self.interactors.is_preoccupied(id, element, false)
                || !actor.events.intersects(events)
            {
                continue;
            }

            let hit = self.check_box(id, &bounds);
            let state = self
                .interactors
                .set_focus(Some(id), element, hit.hit, hit.priority);
            if state.is_empty() {
                continue;
            }

            if hit.priority < ranked[0].1 {
                ranked[1] = ranked[0];
                ranked[0] = (Some(id), hit.priority);
            } else if hit.priority < ranked[1].1 {
                ranked[1] = (Some(id), hit.priority);
            }
        }

        let (first, second) = (ranked[0].0, ranked[1].0);
        let state = match (first, second) {
            (None, _) => TwoHandState::None,
            (Some(_), None) => TwoHandState::OneHanded,
            (Some(_), Some(_)) => TwoHandState::TwoHanded,
        };
        HandleFocus {
            state,
            first,
            second,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Quat};

    use super::*;
    use crate::interactor::Interactor;
    use crate::types::{InteractorKind, Pose};

    const BUTTON: ElementId = ElementId(0x0b);
    const OTHER: ElementId = ElementId(0x0c);

    fn add(ctx: &mut InteractionContext, kind: InteractorKind, pos: Vec3) -> InteractorId {
        let mut actor = Interactor::new(kind, InteractorEvents::all()).with_radius(0.05);
        let pose = Pose::new(pos, Quat::IDENTITY);
        actor.update(ButtonState::ACTIVE | ButtonState::JUST_ACTIVE, pose, pose);
        ctx.interactors_mut().add(actor)
    }

    fn move_to(ctx: &mut InteractionContext, id: InteractorId, pos: Vec3) {
        let pose = Pose::new(pos, Quat::IDENTITY);
        let actor = ctx.interactors_mut().get_mut(id).unwrap();
        // Teleport: no sweep from the old position.
        actor.update(ButtonState::ACTIVE | ButtonState::JUST_ACTIVE, pose, pose);
    }

    /// Unit box centered at the origin, grown by 0.5 on each side once focused.
    fn button(ctx: &mut InteractionContext, events: InteractorEvents) -> VolumeFocus {
        ctx.volume_1h(
            BUTTON,
            events,
            Vec3::splat(0.5),
            Vec3::ONE,
            Vec3::splat(1.0),
            Vec3::splat(2.0),
        )
    }

    #[test]
    fn point_inside_box_takes_focus() {
        let mut ctx = InteractionContext::default();
        let a = add(&mut ctx, InteractorKind::Point, Vec3::ZERO);
        ctx.update_local(Mat4::IDENTITY);

        let r = button(&mut ctx, InteractorEvents::POKE);
        assert_eq!(r.state, ButtonState::ACTIVE | ButtonState::JUST_ACTIVE);
        assert_eq!(r.interactor, Some(a));
        assert!(r.at_local.abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn event_mask_filters_interactors() {
        let mut ctx = InteractionContext::default();
        let a = add(&mut ctx, InteractorKind::Point, Vec3::ZERO);
        ctx.interactors_mut().get_mut(a).unwrap().events = InteractorEvents::GRIP;
        ctx.update_local(Mat4::IDENTITY);

        let r = button(&mut ctx, InteractorEvents::POKE);
        assert_eq!(r, VolumeFocus::NONE);
        assert_eq!(ctx.interactors().get(a).unwrap().focused(), None);
    }

    #[test]
    fn focused_box_adds_hysteresis() {
        let mut ctx = InteractionContext::default();
        let a = add(&mut ctx, InteractorKind::Point, Vec3::ZERO);
        ctx.update_local(Mat4::IDENTITY);
        assert!(button(&mut ctx, InteractorEvents::POKE).state.is_just_active());
        ctx.step_frame();

        // Outside the unfocused box, inside the focused one.
        move_to(&mut ctx, a, Vec3::new(0.75, 0.0, 0.0));
        ctx.update_local(Mat4::IDENTITY);
        let r = button(&mut ctx, InteractorEvents::POKE);
        assert_eq!(r.state, ButtonState::ACTIVE);
        ctx.step_frame();

        // A fresh approach to the same spot does not focus.
        ctx.step_frame();
        ctx.update_local(Mat4::IDENTITY);
        let r = button(&mut ctx, InteractorEvents::POKE);
        assert_eq!(r.state, ButtonState::empty());
    }

    #[test]
    fn losing_focus_reports_just_inactive() {
        let mut ctx = InteractionContext::default();
        let a = add(&mut ctx, InteractorKind::Point, Vec3::ZERO);
        ctx.update_local(Mat4::IDENTITY);
        button(&mut ctx, InteractorEvents::POKE);
        ctx.step_frame();

        move_to(&mut ctx, a, Vec3::new(5.0, 0.0, 0.0));
        ctx.update_local(Mat4::IDENTITY);
        let r = button(&mut ctx, InteractorEvents::POKE);
        assert_eq!(r.state, ButtonState::JUST_INACTIVE);
        assert_eq!(r.interactor, Some(a));
        assert_eq!(r.at_local, Vec3::ZERO);
    }

    #[test]
    fn last_successful_interactor_is_reported() {
        let mut ctx = InteractionContext::default();
        // `b` is deeper inside but `c` comes later.
        let _a = add(&mut ctx, InteractorKind::Point, Vec3::new(3.0, 0.0, 0.0));
        let _b = add(&mut ctx, InteractorKind::Point, Vec3::ZERO);
        let c = add(&mut ctx, InteractorKind::Point, Vec3::new(0.4, 0.0, 0.0));
        ctx.update_local(Mat4::IDENTITY);

        let r = button(&mut ctx, InteractorEvents::POKE);
        assert_eq!(r.interactor, Some(c));
    }

    #[test]
    fn falls_back_to_last_frames_focus() {
        let mut ctx = InteractionContext::default();
        let a = add(&mut ctx, InteractorKind::Point, Vec3::ZERO);
        ctx.update_local(Mat4::IDENTITY);
        button(&mut ctx, InteractorEvents::POKE);
        ctx.step_frame();

        // Filtered out this frame, but it was the focuser last frame.
        let r = button(&mut ctx, InteractorEvents::empty());
        assert_eq!(r.state, ButtonState::empty());
        assert_eq!(r.interactor, Some(a));
    }

    #[test]
    fn active_elsewhere_is_skipped() {
        let mut ctx = InteractionContext::default();
        let a = add(&mut ctx, InteractorKind::Point, Vec3::ZERO);
        ctx.update_local(Mat4::IDENTITY);
        ctx.set_focus(Some(a), OTHER, true, 0.0);
        ctx.set_active(Some(a), OTHER, true, Vec3::ZERO);
        ctx.step_frame();

        assert!(ctx.is_preoccupied(a, BUTTON, false));
        ctx.update_local(Mat4::IDENTITY);
        let r = button(&mut ctx, InteractorEvents::POKE);
        assert_eq!(r, VolumeFocus::NONE);
        assert_eq!(ctx.interactors().get(a).unwrap().focused(), None);
    }

    #[test]
    fn disabled_is_a_no_op() {
        let mut ctx = InteractionContext::default();
        let a = add(&mut ctx, InteractorKind::Point, Vec3::ZERO);
        ctx.update_local(Mat4::IDENTITY);
        ctx.push_preserve_keyboard(true);
        ctx.set_enabled(false);

        assert_eq!(button(&mut ctx, InteractorEvents::POKE), VolumeFocus::NONE);
        let h = ctx.volume_2h(BUTTON, InteractorEvents::all(), Bounds::new(Vec3::ZERO, Vec3::ONE));
        assert_eq!(h, HandleFocus::NONE);
        assert_eq!(ctx.interactors().get(a).unwrap().focused(), None);

        ctx.pop_preserve_keyboard();
        ctx.step_frame();
        assert!(!ctx.preserves_keyboard(BUTTON));
    }

    #[test]
    fn volume_1h_records_keyboard_preservation() {
        let mut ctx = InteractionContext::default();
        ctx.push_preserve_keyboard(true);
        button(&mut ctx, InteractorEvents::POKE);
        ctx.pop_preserve_keyboard();
        ctx.step_frame();
        assert!(ctx.preserves_keyboard(BUTTON));
    }

    #[test]
    fn two_rays_rank_by_distance() {
        let mut ctx = InteractionContext::default();
        let near = add(&mut ctx, InteractorKind::Ray, Vec3::new(0.0, 0.0, 2.5));
        let far = add(&mut ctx, InteractorKind::Ray, Vec3::new(0.0, 0.1, 5.5));
        ctx.update_local(Mat4::IDENTITY);

        let h = ctx.volume_2h(BUTTON, InteractorEvents::all(), Bounds::new(Vec3::ZERO, Vec3::ONE));
        assert_eq!(h.state, TwoHandState::TwoHanded);
        assert_eq!(h.first, Some(near));
        assert_eq!(h.second, Some(far));
    }

    #[test]
    fn better_late_challenger_takes_first_slot() {
        let mut ctx = InteractionContext::default();
        let far = add(&mut ctx, InteractorKind::Ray, Vec3::new(0.0, 0.0, 5.5));
        let mid = add(&mut ctx, InteractorKind::Ray, Vec3::new(0.0, 0.0, 3.5));
        let near = add(&mut ctx, InteractorKind::Ray, Vec3::new(0.0, 0.0, 1.5));
        ctx.update_local(Mat4::IDENTITY);

        let h = ctx.volume_2h(BUTTON, InteractorEvents::all(), Bounds::new(Vec3::ZERO, Vec3::ONE));
        assert_eq!(h.first, Some(near));
        assert_eq!(h.second, Some(mid));
        assert_ne!(h.second, Some(far));
    }

    #[test]
    fn one_interactor_is_one_handed() {
        let mut ctx = InteractionContext::default();
        let a = add(&mut ctx, InteractorKind::Point, Vec3::ZERO);
        let _miss = add(&mut ctx, InteractorKind::Point, Vec3::new(4.0, 0.0, 0.0));
        ctx.update_local(Mat4::IDENTITY);

        let h = ctx.volume_2h(BUTTON, InteractorEvents::all(), Bounds::new(Vec3::ZERO, Vec3::ONE));
        assert_eq!(h.state, TwoHandState::OneHanded);
        assert_eq!(h.first, Some(a));
        assert_eq!(h.second, None);
    }

    #[test]
    fn losing_interactor_is_not_ranked() {
        let mut ctx = InteractionContext::default();
        let a = add(&mut ctx, InteractorKind::Point, Vec3::ZERO);
        ctx.update_local(Mat4::IDENTITY);
        let bounds = Bounds::new(Vec3::ZERO, Vec3::ONE);
        ctx.volume_2h(BUTTON, InteractorEvents::all(), bounds);
        ctx.step_frame();

        move_to(&mut ctx, a, Vec3::new(4.0, 0.0, 0.0));
        ctx.update_local(Mat4::IDENTITY);
        let h = ctx.volume_2h(BUTTON, InteractorEvents::all(), bounds);
        assert_eq!(h, HandleFocus::NONE);
    }
}
