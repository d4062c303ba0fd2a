// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Trellis crates.
//!
//! Each adapter is gated behind a feature flag to keep the core engine
//! lightweight and `no_std` by default.
//!
//! ## Available Adapters
//!
//! - [`drag`] (`drag_adapter` feature): the cross-container bridge that
//!   lets a [`trellis_drag`] controller's item be absorbed by sortable
//!   containers mid-drag and released back if it leaves before the drop.

#[cfg(feature = "drag_adapter")]
pub mod drag;
