// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A fingertip pushing a floating button.
//!
//! A point interactor approaches a 10cm button from the front, presses
//! through its surface, and pulls back out. Each frame the button asks
//! `volume_1h` for focus and turns focus plus depth into activation, the way
//! a push-button widget would.
//!
//! Run:
//! - `cargo run -p understory_demos --example button_press`
//! - `RUST_LOG=understory_interactor=trace cargo run -p understory_demos --example button_press`

use glam::{Mat4, Quat, Vec3};
use tracing::info;
use understory_interactor::{
    ButtonState, ElementId, InteractionContext, Interactor, InteractorEvents, InteractorKind,
    Pose,
};

/// Button face size; the button sits on a panel one meter in front of the user.
const SIZE: Vec3 = Vec3::new(0.1, 0.1, 0.02);
/// How far the finger must push past the face before the button presses.
const PRESS_DEPTH: f32 = 0.005;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut ctx = InteractionContext::default();
    let finger = ctx.interactors_mut().add(
        Interactor::new(InteractorKind::Point, InteractorEvents::POKE).with_radius(0.008),
    );

    let panel_to_world = Mat4::from_translation(Vec3::new(0.0, 1.2, -1.0));
    let button = ElementId::from_label("panel").child("ok");

    // Finger depth relative to the button face, in meters, one entry per frame.
    let path = [0.08, 0.05, 0.02, 0.0, -0.006, -0.009, -0.004, 0.01, 0.04];

    for (frame, depth) in path.into_iter().enumerate() {
        // Input: place the fingertip in world space.
        let local_tip = Vec3::new(0.0, 0.0, SIZE.z / 2.0 + depth);
        let tip = Pose::new(panel_to_world.transform_point3(local_tip), Quat::IDENTITY);
        let tracked = if frame == 0 {
            ButtonState::ACTIVE | ButtonState::JUST_ACTIVE
        } else {
            ButtonState::ACTIVE
        };
        if let Some(actor) = ctx.interactors_mut().get_mut(finger) {
            actor.update(tracked, tip, tip);
        }

        // UI: enter the panel's space and lay out the button.
        ctx.update_local(panel_to_world.inverse());
        let top_left = Vec3::new(SIZE.x / 2.0, SIZE.y / 2.0, SIZE.z / 2.0);
        let focused_size = SIZE + Vec3::new(0.02, 0.02, 0.04);
        let focus = ctx.volume_1h(
            button,
            InteractorEvents::POKE,
            top_left,
            SIZE,
            focused_size / 2.0,
            focused_size,
        );

        let pressed_in = focus.state.is_active() && focus.at_local.z < SIZE.z / 2.0 - PRESS_DEPTH;
        let press = ctx.set_active(focus.interactor, button, pressed_in, focus.at_local);

        if focus.state.intersects(ButtonState::CHANGED) || press.intersects(ButtonState::CHANGED) {
            info!(frame, depth, focus = ?focus.state, press = ?press, "button");
        }
        if press.is_just_active() {
            info!(frame, "clicked");
        }

        ctx.step_frame();
    }
}
