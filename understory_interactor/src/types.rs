// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public value types: element and interactor identifiers, state flags, and poses.

use glam::{Mat4, Quat, Vec3};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Transient identity of a UI element.
///
/// Elements are not registered anywhere; an element exists only as the id
/// passed to a query during one frame. Two equal ids are the same element,
/// no matter where they were produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Hash a label into a root-level id (64-bit FNV-1a).
    pub const fn from_label(label: &str) -> Self {
        Self(fnv1a(FNV_OFFSET, label.as_bytes()))
    }

    /// Hash a label in the scope of this id, for ids of nested elements.
    ///
    /// ```rust
    /// use understory_interactor::ElementId;
    ///
    /// let window = ElementId::from_label("window");
    /// assert_eq!(window.child("ok"), window.child("ok"));
    /// assert_ne!(window.child("ok"), ElementId::from_label("ok"));
    /// ```
    pub const fn child(self, label: &str) -> Self {
        Self(fnv1a(self.0, label.as_bytes()))
    }
}

const fn fnv1a(mut hash: u64, bytes: &[u8]) -> u64 {
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Handle of an interactor in an [`Interactors`](crate::Interactors) registry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InteractorId(pub(crate) u32);

impl InteractorId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "registries hold a handful of interactors"
    )]
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    /// Position of the interactor in its registry.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Activation state and its transitions.
    ///
    /// An empty set means inactive. [`JUST_ACTIVE`](Self::JUST_ACTIVE) and
    /// [`JUST_INACTIVE`](Self::JUST_INACTIVE) are never set together; either
    /// one means the state differs from the previous frame.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ButtonState: u8 {
        /// Currently active (focused, pressed, tracked...).
        const ACTIVE        = 0b0000_0001;
        /// Was active last frame and is not anymore.
        const JUST_INACTIVE = 0b0000_0010;
        /// Is active now and was not last frame.
        const JUST_ACTIVE   = 0b0000_0100;
        /// Either transition.
        const CHANGED       = Self::JUST_INACTIVE.bits() | Self::JUST_ACTIVE.bits();
    }
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::empty()
    }
}

impl ButtonState {
    /// Build the state for a `was` → `is` transition.
    pub fn from_transition(was: bool, is: bool) -> Self {
        let mut state = Self::empty();
        if is {
            state |= Self::ACTIVE;
        }
        if is && !was {
            state |= Self::JUST_ACTIVE;
        }
        if was && !is {
            state |= Self::JUST_INACTIVE;
        }
        state
    }

    /// Whether [`ACTIVE`](Self::ACTIVE) is set.
    pub fn is_active(self) -> bool {
        self.contains(Self::ACTIVE)
    }

    /// Whether the state became active this frame.
    pub fn is_just_active(self) -> bool {
        self.contains(Self::JUST_ACTIVE)
    }

    /// Whether the state became inactive this frame.
    pub fn is_just_inactive(self) -> bool {
        self.contains(Self::JUST_INACTIVE)
    }
}

bitflags::bitflags! {
    /// Categories of events an interactor may drive.
    ///
    /// Widgets pass a mask to the volume queries; interactors whose mask does
    /// not intersect it are ignored by that widget.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct InteractorEvents: u8 {
        /// Direct touch, such as a fingertip pressing a button.
        const POKE  = 0b0000_0010;
        /// Whole-hand grab.
        const GRIP  = 0b0000_0100;
        /// Thumb and finger pinch, near or far.
        const PINCH = 0b0000_1000;
    }
}

impl Default for InteractorEvents {
    fn default() -> Self {
        Self::all()
    }
}

/// How an interactor is hit tested.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InteractorKind {
    /// A sphere swept from the previous to the current hit-test position.
    Point,
    /// A ray cast from the hit-test position along its forward direction.
    Ray,
}

/// Position and orientation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pose {
    /// Position.
    pub position: Vec3,
    /// Orientation.
    pub orientation: Quat,
}

impl Pose {
    /// Origin, no rotation.
    pub const IDENTITY: Self = Self::new(Vec3::ZERO, Quat::IDENTITY);

    /// Create a pose.
    pub const fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// This pose expressed in the space `transform` maps into.
    pub fn transformed(self, transform: Mat4) -> Self {
        let (_, rotation, _) = transform.to_scale_rotation_translation();
        Self {
            position: transform.transform_point3(self.position),
            orientation: (rotation * self.orientation).normalize(),
        }
    }

    /// Rigid transform placing the origin at this pose.
    pub fn to_mat4(self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }

    /// The pose's forward direction (`-Z` rotated by the orientation).
    pub fn forward(self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_flags() {
        assert_eq!(ButtonState::from_transition(false, false), ButtonState::empty());
        assert_eq!(
            ButtonState::from_transition(false, true),
            ButtonState::ACTIVE | ButtonState::JUST_ACTIVE
        );
        assert_eq!(ButtonState::from_transition(true, true), ButtonState::ACTIVE);
        assert_eq!(
            ButtonState::from_transition(true, false),
            ButtonState::JUST_INACTIVE
        );
    }

    #[test]
    fn label_hashes_are_stable() {
        assert_eq!(ElementId::from_label(""), ElementId(FNV_OFFSET));
        assert_eq!(ElementId::from_label("a"), ElementId(0xaf63_dc4c_8601_ec8c));
        assert_ne!(ElementId::from_label("a"), ElementId::from_label("b"));
    }

    #[test]
    fn pose_transform_moves_and_rotates() {
        let turn = Quat::from_rotation_y(core::f32::consts::FRAC_PI_2);
        let to_local = Mat4::from_rotation_translation(turn, Vec3::new(0.0, 1.0, 0.0));
        let pose = Pose::new(Vec3::new(0.0, 0.0, -1.0), Quat::IDENTITY).transformed(to_local);

        assert!(pose.position.abs_diff_eq(Vec3::new(-1.0, 1.0, 0.0), 1e-5));
        // Forward (-Z) turned a quarter around +Y points along -X.
        assert!(pose.forward().abs_diff_eq(Vec3::NEG_X, 1e-5));
    }

    #[test]
    fn pose_matrix_round_trips_points() {
        let pose = Pose::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_x(0.3));
        let m = pose.to_mat4();
        let p = Vec3::new(0.2, -0.4, 0.7);
        assert!(m.inverse().transform_point3(m.transform_point3(p)).abs_diff_eq(p, 1e-5));
    }
}
