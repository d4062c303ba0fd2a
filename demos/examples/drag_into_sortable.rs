// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-container drag and drop: draggable + sort engine + bridge.
//!
//! This example shows how to combine:
//! - `trellis_pointer` for the press/move/release session,
//! - `trellis_drag` for the moving item's geometry,
//! - `trellis_sort` with the `drag_adapter` bridge, so the item is
//!   absorbed by a sortable list when the pointer enters it.
//!
//! Run:
//! - `cargo run -p trellis_demos --example drag_into_sortable`

use kurbo::{Point, Rect, Size, Vec2};
use trellis_drag::{DragConfig, DragController, DragEvent, Revert};
use trellis_events::{InteractionContext, SortListener};
use trellis_pointer::{PointerDispatcher, SessionConfig, SessionTracker};
use trellis_sort::adapters::drag::BridgedDrag;
use trellis_sort::{RowLayout, SortEngine};
use trellis_space::{ElementMetrics, Positioning, ScrollState};

/// Print every sort notification as it happens.
struct Narrator;

impl SortListener<&'static str, &'static str> for Narrator {
    fn activate(&mut self, c: &&'static str, _ctx: &InteractionContext<&'static str>) {
        println!("  [{c}] activate");
    }
    fn deactivate(&mut self, c: &&'static str, _ctx: &InteractionContext<&'static str>) {
        println!("  [{c}] deactivate");
    }
    fn over(&mut self, c: &&'static str, ctx: &InteractionContext<&'static str>) {
        println!("  [{c}] over: {} entered", ctx.element);
    }
    fn out(&mut self, c: &&'static str, ctx: &InteractionContext<&'static str>) {
        println!("  [{c}] out: {} left", ctx.element);
    }
    fn change(&mut self, c: &&'static str, _ctx: &InteractionContext<&'static str>) {
        println!("  [{c}] change: placeholder moved");
    }
    fn update(&mut self, c: &&'static str, _ctx: &InteractionContext<&'static str>) {
        println!("  [{c}] update: order committed");
    }
    fn receive(&mut self, c: &&'static str, ctx: &InteractionContext<&'static str>) {
        println!("  [{c}] receive: {}", ctx.element);
    }
    fn remove(&mut self, c: &&'static str, ctx: &InteractionContext<&'static str>) {
        println!("  [{c}] remove: {}", ctx.element);
    }
}

fn main() {
    // A sortable to-do list occupying the top-left of the page.
    let mut layout: RowLayout<&str, &str> = RowLayout::new();
    layout.set_container("todo", Rect::new(0.0, 0.0, 160.0, 120.0));
    layout.push("todo", "water plants", Size::new(160.0, 40.0));
    layout.push("todo", "file taxes", Size::new(160.0, 40.0));
    layout.push("todo", "walk dog", Size::new(160.0, 40.0));

    let mut engine: SortEngine<&str, &str> = SortEngine::new();
    engine.register("todo", &mut layout);

    // A free-floating card parked at page (400, 300).
    let card_metrics = ElementMetrics {
        page_origin: Point::new(400.0, 300.0),
        local_position: Point::new(400.0, 300.0),
        parent_origin: Point::ZERO,
        parent_border: Vec2::ZERO,
        positioning: Positioning::Absolute,
        scroll: ScrollState::root(Vec2::ZERO),
        size: Size::new(160.0, 40.0),
    };
    let mut drag = DragController::new(
        "buy milk",
        card_metrics,
        DragConfig::default().with_revert(Revert::OnInvalidDrop),
    );

    let mut narrator = Narrator;
    let mut bridged = BridgedDrag::new(&mut drag, &mut engine, &mut narrator, "placeholder");

    let mut tracker = SessionTracker::new();
    let mut dispatcher = PointerDispatcher::new(SessionConfig::default());

    // Scripted gesture: pick the card up, carry it over the list, drop it
    // between "water plants" and "file taxes".
    println!("press on the card");
    dispatcher.press(&mut tracker, &mut bridged, &DragEvent::press(Point::new(410.0, 310.0), 0));

    for (t, p) in [
        (16, Point::new(300.0, 200.0)),
        (32, Point::new(150.0, 80.0)),
        (48, Point::new(80.0, 60.0)), // over the list, past the first row
    ] {
        println!("move to ({:.0}, {:.0})", p.x, p.y);
        dispatcher.motion(&mut tracker, &mut bridged, &DragEvent::motion(p, t));
        // Mirror any accepted reorder in the host list, then run the
        // debounced refresh the engine scheduled.
        for op in bridged.take_reorders() {
            println!("  host: placeholder {:?} -> {:?}", op.from, op.to);
        }
    }

    println!("release");
    dispatcher.release(&mut tracker, &mut bridged, &DragEvent::motion(Point::new(80.0, 60.0), 64));

    if let Some(report) = bridged.take_drop() {
        println!(
            "dropped into '{}' at index {} (from outside: {})",
            report.container, report.index, report.received
        );
    }

    let order: Vec<&str> = engine
        .slots(&"todo")
        .unwrap()
        .iter()
        .map(|s| s.item)
        .collect();
    println!("final order: {order:?}");
}
