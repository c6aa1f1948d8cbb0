// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Behavior switches for an [`InteractionContext`](crate::InteractionContext).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InteractionSettings {
    /// Whether interaction is enabled at all.
    ///
    /// While disabled, the volume queries report no winners and leave
    /// interactor state untouched.
    pub enabled: bool,
    /// Record a [`DebugVolume`](crate::DebugVolume) for every box tested
    /// against a tracked interactor.
    pub show_volumes: bool,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            show_volumes: false,
        }
    }
}
