// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_interactor --heading-base-level=0

//! Understory Interactor: per-frame focus and activation arbitration for spatial UI.
//!
//! Given a set of *interactors* (tracked pointing devices such as fingertips,
//! hands, or controller rays) and the element volumes widgets query during a
//! frame, this crate decides which interactor focuses each element, which one
//! wins when several compete, and how focus turns into a sustained *active*
//! (pressed, gripped) state across frames.
//!
//! Elements are not registered. An element is an [`ElementId`] passed to a
//! query for one frame, and the only persistent state is the interactor
//! registry.
//!
//! ## Frame flow
//!
//! 1) Input code refreshes each [`Interactor`] with [`Interactor::update`].
//! 2) Before testing volumes in a coordinate space, call
//!    [`InteractionContext::update_local`] with the world-to-local transform.
//! 3) Widgets call [`InteractionContext::volume_1h`] (buttons and other
//!    single-interactor widgets) or [`InteractionContext::volume_2h`]
//!    (handles that two interactors may hold), and drive activation with
//!    [`InteractionContext::set_active`].
//! 4) At the end of the frame, [`InteractionContext::step_frame`] rolls the
//!    results into each interactor's `_prev` fields.
//!
//! ## Priorities and exclusivity
//!
//! Hit tests produce a priority where lower is better: the box's Manhattan
//! signed distance at the interaction point, plus the squared distance along
//! the ray for ray interactors. An interactor keeps the best priority it has
//! granted this frame, so an element queried later can take focus from one
//! queried earlier if it is a better fit. An interactor that was active on
//! one element last frame is *preoccupied* and ignored by queries for other
//! elements.
//!
//! ## Minimal example
//!
//! ```rust
//! use glam::{Mat4, Quat, Vec3};
//! use understory_interactor::{
//!     ButtonState, ElementId, InteractionContext, Interactor, InteractorEvents, InteractorKind,
//!     Pose,
//! };
//!
//! let mut ctx = InteractionContext::default();
//! let finger = ctx.interactors_mut().add(
//!     Interactor::new(InteractorKind::Point, InteractorEvents::POKE).with_radius(0.01),
//! );
//!
//! // Input: the fingertip starts tracking at the origin.
//! let tip = Pose::new(Vec3::ZERO, Quat::IDENTITY);
//! ctx.interactors_mut()
//!     .get_mut(finger)
//!     .unwrap()
//!     .update(ButtonState::ACTIVE | ButtonState::JUST_ACTIVE, tip, tip);
//!
//! // UI: a 10cm button centered on the origin.
//! ctx.update_local(Mat4::IDENTITY);
//! let id = ElementId::from_label("ok");
//! let size = Vec3::splat(0.1);
//! let focus = ctx.volume_1h(id, InteractorEvents::POKE, size / 2.0, size, size / 2.0, size);
//!
//! assert!(focus.state.is_just_active());
//! assert_eq!(focus.interactor, Some(finger));
//!
//! let press = ctx.set_active(focus.interactor, id, true, focus.at_local);
//! assert!(press.is_just_active());
//!
//! ctx.step_frame();
//! assert_eq!(ctx.last_active(id), Some(finger));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `glam` and `tracing`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod arbiter;
mod context;
mod hit;
mod interactor;
mod local;
mod query;
mod settings;
mod types;

pub use context::{DebugVolume, InteractionContext};
pub use hit::VolumeHit;
pub use interactor::{ActionSnapshot, Interactor, Interactors};
pub use query::{HandleFocus, TwoHandState, VolumeFocus};
pub use settings::InteractionSettings;
pub use types::{ButtonState, ElementId, InteractorEvents, InteractorId, InteractorKind, Pose};

pub use understory_volume::{Bounds, Ray};
