// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interaction context: registry, settings, and per-frame side channels.

use alloc::vec::Vec;
use core::mem;

use glam::{Mat4, Quat, Vec3};
use hashbrown::HashSet;
use smallvec::SmallVec;
use tracing::{debug, warn};
use understory_volume::Bounds;

use crate::hit::VolumeHit;
use crate::interactor::Interactors;
use crate::settings::InteractionSettings;
use crate::types::{ButtonState, ElementId, InteractorId};

/// A request to draw a tested volume, recorded while
/// [`InteractionSettings::show_volumes`] is set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugVolume {
    /// Local-to-world transform in effect when the volume was tested.
    pub to_world: Mat4,
    /// The tested box, in that local space.
    pub bounds: Bounds,
}

impl DebugVolume {
    /// Transform mapping a unit cube centered at the origin onto the volume in world space.
    pub fn world_transform(&self) -> Mat4 {
        self.to_world
            * Mat4::from_scale_rotation_translation(
                self.bounds.dimensions,
                Quat::IDENTITY,
                self.bounds.center,
            )
    }
}

/// Everything the focus and activation queries read and write during a frame.
///
/// The context is owned by the UI layer: created once, refreshed by input code
/// every frame, queried by widgets while they are laid out, and rolled over
/// with [`InteractionContext::step_frame`] at the end of the frame. All access
/// is sequential, and call order matters: a widget queried later in a frame can
/// take focus from one queried earlier.
#[derive(Debug)]
pub struct InteractionContext {
    pub(crate) interactors: Interactors,
    pub(crate) settings: InteractionSettings,
    to_local: Mat4,
    to_world: Mat4,
    debug_volumes: Vec<DebugVolume>,
    preserve_keyboard_stack: SmallVec<[bool; 4]>,
    preserve_keyboard_read: HashSet<ElementId>,
    preserve_keyboard_write: HashSet<ElementId>,
}

impl Default for InteractionContext {
    fn default() -> Self {
        Self::new(InteractionSettings::default())
    }
}

impl InteractionContext {
    /// Create a context with no interactors.
    pub fn new(settings: InteractionSettings) -> Self {
        Self {
            interactors: Interactors::new(),
            settings,
            to_local: Mat4::IDENTITY,
            to_world: Mat4::IDENTITY,
            debug_volumes: Vec::new(),
            preserve_keyboard_stack: SmallVec::new(),
            preserve_keyboard_read: HashSet::new(),
            preserve_keyboard_write: HashSet::new(),
        }
    }

    /// The interactor registry.
    pub fn interactors(&self) -> &Interactors {
        &self.interactors
    }

    /// The interactor registry, for input code to refresh.
    pub fn interactors_mut(&mut self) -> &mut Interactors {
        &mut self.interactors
    }

    /// Current settings.
    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    /// Mutable access to the settings.
    pub fn settings_mut(&mut self) -> &mut InteractionSettings {
        &mut self.settings
    }

    /// Enable or disable all interaction.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.settings.enabled != enabled {
            debug!(enabled, "interaction toggled");
        }
        self.settings.enabled = enabled;
    }

    /// World-to-local transform of the current coordinate context.
    pub fn to_local(&self) -> Mat4 {
        self.to_local
    }

    /// Local-to-world transform of the current coordinate context.
    pub fn to_world(&self) -> Mat4 {
        self.to_world
    }

    /// Enter a new coordinate context and project every interactor into it.
    ///
    /// See [`Interactors::update_local`].
    pub fn update_local(&mut self, to_local: Mat4) {
        self.to_local = to_local;
        self.to_world = to_local.inverse();
        self.interactors.update_local(to_local);
    }

    /// Hit test one interactor against `bounds` in the current local space.
    ///
    /// Unknown interactors miss. With [`InteractionSettings::show_volumes`]
    /// set, boxes tested against tracked interactors are recorded in
    /// [`InteractionContext::debug_volumes`].
    pub fn check_box(&mut self, interactor: InteractorId, bounds: &Bounds) -> VolumeHit {
        let Some(actor) = self.interactors.get(interactor) else {
            return VolumeHit::MISS;
        };
        if self.settings.show_volumes && actor.is_tracked() {
            self.debug_volumes.push(DebugVolume {
                to_world: self.to_world,
                bounds: *bounds,
            });
        }
        actor.check_box(bounds)
    }

    /// See [`Interactors::set_focus`].
    pub fn set_focus(
        &mut self,
        interactor: Option<InteractorId>,
        element: ElementId,
        hit: bool,
        priority: f32,
    ) -> ButtonState {
        self.interactors.set_focus(interactor, element, hit, priority)
    }

    /// Claim activation with a local-space interaction point.
    ///
    /// `at_local` is converted to world space through the current coordinate
    /// context; see [`Interactors::set_active`].
    pub fn set_active(
        &mut self,
        interactor: Option<InteractorId>,
        element: ElementId,
        activate: bool,
        at_local: Vec3,
    ) -> ButtonState {
        let at_world = self.to_world.transform_point3(at_local);
        self.interactors
            .set_active(interactor, element, activate, at_world)
    }

    /// See [`Interactors::is_preoccupied`].
    pub fn is_preoccupied(
        &self,
        interactor: InteractorId,
        element: ElementId,
        include_focused: bool,
    ) -> bool {
        self.interactors
            .is_preoccupied(interactor, element, include_focused)
    }

    /// See [`Interactors::last_active`].
    pub fn last_active(&self, element: ElementId) -> Option<InteractorId> {
        self.interactors.last_active(element)
    }

    /// See [`Interactors::last_focused`].
    pub fn last_focused(&self, element: ElementId) -> Option<InteractorId> {
        self.interactors.last_focused(element)
    }

    /// Begin a scope whose queried elements should keep keyboard focus.
    ///
    /// While the innermost scope is `true`, every element passed to
    /// [`InteractionContext::volume_1h`] is recorded for the keyboard-focus
    /// owner, which reads them next frame through
    /// [`InteractionContext::preserves_keyboard`].
    pub fn push_preserve_keyboard(&mut self, preserve: bool) {
        self.preserve_keyboard_stack.push(preserve);
    }

    /// End the innermost keyboard preservation scope.
    pub fn pop_preserve_keyboard(&mut self) {
        if self.preserve_keyboard_stack.pop().is_none() {
            warn!("pop_preserve_keyboard without a matching push");
        }
    }

    /// Whether `element` was queried inside a preserving scope last frame.
    pub fn preserves_keyboard(&self, element: ElementId) -> bool {
        self.preserve_keyboard_read.contains(&element)
    }

    /// Elements queried inside a preserving scope last frame, in no particular order.
    pub fn preserved_keyboard_ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.preserve_keyboard_read.iter().copied()
    }

    pub(crate) fn note_keyboard_preserve(&mut self, element: ElementId) {
        if self.preserve_keyboard_stack.last().copied().unwrap_or(false) {
            self.preserve_keyboard_write.insert(element);
        }
    }

    /// Volumes recorded this frame for debug drawing.
    pub fn debug_volumes(&self) -> &[DebugVolume] {
        &self.debug_volumes
    }

    /// Frame boundary.
    ///
    /// Rolls interactor focus/active state into the `_prev` fields (see
    /// [`Interactors::step_frame`]), publishes this frame's keyboard
    /// preservation ids, and drops the debug volume requests.
    pub fn step_frame(&mut self) {
        self.interactors.step_frame();

        mem::swap(
            &mut self.preserve_keyboard_read,
            &mut self.preserve_keyboard_write,
        );
        self.preserve_keyboard_write.clear();
        if !self.preserve_keyboard_stack.is_empty() {
            warn!(
                depth = self.preserve_keyboard_stack.len(),
                "keyboard preservation scopes left open at frame end"
            );
            self.preserve_keyboard_stack.clear();
        }

        self.debug_volumes.clear();
    }
}
