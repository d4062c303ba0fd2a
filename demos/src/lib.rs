// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integration demos for the Trellis interaction engine.
//!
//! See the `examples/` directory:
//! - `drag_into_sortable`: a free-floating draggable absorbed by a
//!   sortable list mid-drag.
//! - `resize_with_aspect`: directional handles with an aspect lock.
