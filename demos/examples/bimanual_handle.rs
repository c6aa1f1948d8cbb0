// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two controller rays grabbing a handle.
//!
//! The handle is a box queried with `volume_2h`. Each ranked ray that holds
//! its grip button activates the handle, so the log shows the handle going
//! from one-handed to two-handed and back as the grips change.
//!
//! Run:
//! - `cargo run -p understory_demos --example bimanual_handle`

use glam::{Mat4, Quat, Vec3};
use tracing::info;
use understory_interactor::{
    ButtonState, ElementId, InteractionContext, Interactor, InteractorEvents, InteractorId,
    InteractorKind, Pose, TwoHandState,
};
use understory_volume::Bounds;

/// One frame of scripted controller input.
#[derive(Clone, Copy, Debug)]
struct Controller {
    position: Vec3,
    grip: bool,
}

fn controller(x: f32, grip: bool) -> Controller {
    Controller {
        position: Vec3::new(x, 0.0, 1.5),
        grip,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut ctx = InteractionContext::default();
    let hands = [
        ctx.interactors_mut()
            .add(Interactor::new(InteractorKind::Ray, InteractorEvents::GRIP)),
        ctx.interactors_mut()
            .add(Interactor::new(InteractorKind::Ray, InteractorEvents::GRIP)),
    ];

    let handle = ElementId::from_label("handle");
    let bounds = Bounds::new(Vec3::ZERO, Vec3::new(1.0, 0.3, 0.3));

    // Left and right controllers pointing at the handle (-Z), gripping in
    // turn, then letting go in turn.
    let script = [
        [controller(-0.3, false), controller(0.3, false)],
        [controller(-0.3, true), controller(0.3, false)],
        [controller(-0.3, true), controller(0.3, true)],
        [controller(-0.4, true), controller(0.4, true)],
        [controller(-0.4, false), controller(0.4, true)],
        [controller(-0.4, false), controller(0.4, false)],
    ];

    for (frame, inputs) in script.into_iter().enumerate() {
        for (&id, input) in hands.iter().zip(inputs) {
            let tracked = if frame == 0 {
                ButtonState::ACTIVE | ButtonState::JUST_ACTIVE
            } else {
                ButtonState::ACTIVE
            };
            let pose = Pose::new(input.position, Quat::IDENTITY);
            if let Some(actor) = ctx.interactors_mut().get_mut(id) {
                actor.update(tracked, pose, pose);
            }
        }

        ctx.update_local(Mat4::IDENTITY);
        let focus = ctx.volume_2h(handle, InteractorEvents::GRIP, bounds);

        let mut holding: Vec<InteractorId> = Vec::new();
        for id in [focus.first, focus.second].into_iter().flatten() {
            let grip = hands
                .iter()
                .position(|&h| h == id)
                .is_some_and(|i| inputs[i].grip);
            // Where the ray meets the handle, not where it starts.
            let at = ctx.check_box(id, &bounds).at;
            let state = ctx.set_active(Some(id), handle, grip, at);
            if state.is_just_active() {
                info!(frame, hand = id.index(), at = ?at, "grabbed");
            } else if state.is_just_inactive() {
                info!(frame, hand = id.index(), "released");
            }
            if state.is_active() {
                holding.push(id);
            }
        }

        if focus.state != TwoHandState::None {
            info!(frame, state = ?focus.state, holders = holding.len(), "handle");
        }
        ctx.step_frame();
    }
}
