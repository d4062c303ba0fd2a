// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directional resizing with an aspect lock.
//!
//! Run:
//! - `cargo run -p trellis_demos --example resize_with_aspect`

use kurbo::{Point, Size, Vec2};
use trellis_pointer::{PointerDispatcher, SessionConfig, SessionTracker};
use trellis_resize::{AspectRatio, Handle, ResizeConfig, ResizeController, ResizeEvent};
use trellis_space::{ElementMetrics, Positioning, ScrollState};

fn main() {
    let metrics = ElementMetrics {
        page_origin: Point::new(100.0, 100.0),
        local_position: Point::new(100.0, 100.0),
        parent_origin: Point::ZERO,
        parent_border: Vec2::ZERO,
        positioning: Positioning::Absolute,
        scroll: ScrollState::root(Vec2::ZERO),
        size: Size::new(200.0, 100.0),
    };

    let mut tracker = SessionTracker::new();
    let mut dispatcher = PointerDispatcher::new(SessionConfig::default());

    for handle in [Handle::Se, Handle::Nw, Handle::E] {
        let mut controller = ResizeController::new(
            "panel",
            metrics,
            handle,
            ResizeConfig {
                aspect: AspectRatio::Locked,
                ..ResizeConfig::default()
            },
        );

        // Grab the handle and pull it 60px right, 15px down.
        let grip = Point::new(300.0, 200.0);
        dispatcher.press(&mut tracker, &mut controller, &ResizeEvent::press(grip, 0));
        dispatcher.motion(
            &mut tracker,
            &mut controller,
            &ResizeEvent::motion(grip + Vec2::new(60.0, 15.0), 16),
        );
        dispatcher.release(
            &mut tracker,
            &mut controller,
            &ResizeEvent::motion(grip + Vec2::new(60.0, 15.0), 32),
        );

        let g = controller.geometry().unwrap();
        println!(
            "{handle:?}: position ({:.0}, {:.0}), size {:.0}x{:.0}",
            g.position.x, g.position.y, g.size.width, g.size.height
        );
    }
}
