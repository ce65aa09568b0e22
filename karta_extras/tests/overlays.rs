use std::{cell::RefCell, rc::Rc, time::Duration};

use egui::{Pos2, pos2};
use karta::{
    Map, MapContext, MapOptions, PixelSize, RawPointerEvent, lat_lon,
    input::{ButtonAction, ButtonState},
};
use karta_extras::{
    Circle, DistanceUnit, EditablePolyline, MovablePin, Pin, PinEvent, Polyline, SelectionState,
};

fn init_logger() {
    env_logger::builder()
        .is_test(true)
        .try_init()
        .unwrap_or_default();
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

const CENTER: Pos2 = pos2(400., 300.);

fn map() -> Map {
    init_logger();

    let mut map = Map::new(
        MapOptions::default()
            .with_initial_coordinates(lat_lon(51.09916, 17.03664))
            .with_zoom(15, 2, 19),
    )
    .unwrap();
    map.resize(PixelSize::new(800., 600.));
    map
}

fn context(map: &Map) -> MapContext {
    map.context().unwrap()
}

fn press(pos: Pos2) -> RawPointerEvent {
    RawPointerEvent::Buttons {
        pos,
        state: ButtonState::PRIMARY,
    }
}

fn release(pos: Pos2) -> RawPointerEvent {
    RawPointerEvent::Buttons {
        pos,
        state: ButtonState::RELEASED,
    }
}

#[test]
fn hovered_pin_takes_the_press() {
    let presses = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&presses);
    let mut map = map().with_on_press(move |_| *sink.borrow_mut() += 1);

    let mut selection = SelectionState::new();
    let mut pin = Pin::new(7, map.center(), PixelSize::new(32., 32.));

    // Not hovered yet.
    assert!(pin.update(&context(&map), &mut selection).is_empty());

    map.handle(RawPointerEvent::Moved(CENTER), ms(0));
    assert_eq!(
        vec![PinEvent::Hovered],
        pin.update(&context(&map), &mut selection)
    );
    assert_eq!(Some(7), selection.hovered());

    map.handle(press(CENTER), ms(10));
    map.handle(release(CENTER), ms(60));

    let events = pin.update(&context(&map), &mut selection);
    assert!(
        events
            .iter()
            .any(|event| matches!(event, PinEvent::Press(_)))
    );
    assert!(selection.is_selected(7));
    assert_eq!(0, *presses.borrow(), "map must yield to the pin");

    // Away from the pin, the map gets the presses back.
    map.handle(RawPointerEvent::Moved(pos2(10., 10.)), ms(100));
    assert_eq!(
        vec![PinEvent::Unhovered],
        pin.update(&context(&map), &mut selection)
    );

    map.handle(press(pos2(10., 10.)), ms(110));
    map.handle(release(pos2(10., 10.)), ms(160));
    assert_eq!(1, *presses.borrow());
}

#[test]
fn movable_pin_follows_the_pointer_instead_of_the_map() {
    let mut map = map();
    let center = map.viewport().center();

    let mut selection = SelectionState::new();
    let mut pin = MovablePin::new(Pin::new(1, map.center(), PixelSize::new(32., 32.)));

    // Grab it a bit off its center.
    let grab_at = pos2(CENTER.x + 5., CENTER.y + 5.);
    map.handle(RawPointerEvent::Moved(grab_at), ms(0));
    pin.update(&context(&map), &mut selection);

    map.handle(press(grab_at), ms(10));
    let events = pin.update(&context(&map), &mut selection);
    assert!(events.contains(&PinEvent::Grabbed));
    assert!(pin.is_grabbed());
    assert_eq!(Some(1), selection.grabbed());

    let drop_at = pos2(grab_at.x + 100., grab_at.y - 40.);
    map.handle(RawPointerEvent::Moved(pos2(grab_at.x + 50., grab_at.y)), ms(30));
    map.handle(RawPointerEvent::Moved(drop_at), ms(50));
    let events = pin.update(&context(&map), &mut selection);

    assert_eq!(center, map.viewport().center(), "map must not pan");
    assert_eq!(
        2,
        events
            .iter()
            .filter(|event| matches!(event, PinEvent::Moved(_)))
            .count()
    );

    // Keeps the grab offset, so the pin center is off the pointer just like before.
    let expected = map
        .viewport()
        .pointer_position(pos2(drop_at.x - 5., drop_at.y - 5.))
        .unwrap()
        .coordinates;
    approx::assert_abs_diff_eq!(pin.coordinates().latitude, expected.latitude, epsilon = 1e-6);
    approx::assert_abs_diff_eq!(pin.coordinates().longitude, expected.longitude, epsilon = 1e-6);

    map.handle(release(drop_at), ms(70));
    let events = pin.update(&context(&map), &mut selection);
    assert!(events.contains(&PinEvent::Released));
    assert!(!pin.is_grabbed());
    assert_eq!(None, selection.grabbed());

    // Nobody else listens to drags anymore.
    map.handle(RawPointerEvent::Moved(pos2(10., 10.)), ms(100));
    pin.update(&context(&map), &mut selection);
    map.handle(press(pos2(10., 10.)), ms(110));
    map.handle(RawPointerEvent::Moved(pos2(266., 10.)), ms(120));
    map.handle(release(pos2(266., 10.)), ms(130));
    pin.update(&context(&map), &mut selection);

    approx::assert_abs_diff_eq!(map.viewport().center().x, center.x - 1.0, epsilon = 1e-9);
}

#[test]
fn quick_click_on_movable_pin_does_not_stay_grabbed() {
    let mut map = map();
    let mut selection = SelectionState::new();
    let mut pin = MovablePin::new(Pin::new(1, map.center(), PixelSize::new(32., 32.)));

    map.handle(RawPointerEvent::Moved(CENTER), ms(0));
    pin.update(&context(&map), &mut selection);

    map.handle(press(CENTER), ms(10));
    map.handle(release(CENTER), ms(20));

    let events = pin.update(&context(&map), &mut selection);
    assert!(events.contains(&PinEvent::Grabbed));
    assert!(events.contains(&PinEvent::Released));
    assert!(!pin.is_grabbed());
    assert!(
        events
            .iter()
            .any(|event| matches!(event, PinEvent::Click(click) if click.action == ButtonAction::Release))
    );
}

#[test]
fn circle_radius_in_meters_grows_with_zoom() {
    let mut map = map();
    let circle = Circle::new(map.center(), 100., DistanceUnit::Meters);

    let before = circle.placements(&context(&map));
    assert_eq!(1, before.len());
    assert!((before[0].center.x - CENTER.x as i32).abs() <= 1);

    map.zoom_in();
    let after = circle.placements(&context(&map));
    approx::assert_relative_eq!(after[0].radius, 2. * before[0].radius, max_relative = 1e-3);

    let fixed = Circle::new(map.center(), 12., DistanceUnit::Pixels);
    approx::assert_relative_eq!(fixed.placements(&context(&map))[0].radius, 12.);
}

#[test]
fn circle_reaching_into_the_view_is_placed() {
    let map = map();
    let context = context(&map);

    // Just beyond the right edge.
    let outside = context.converter.convert_to_coordinates(pos2(820., 300.));

    assert!(
        Circle::new(outside, 10., DistanceUnit::Pixels)
            .placements(&context)
            .is_empty()
    );
    assert_eq!(
        1,
        Circle::new(outside, 40., DistanceUnit::Pixels)
            .placements(&context)
            .len()
    );
}

#[test]
fn editing_polyline_vertices() {
    let mut map = map();
    let context_before = context(&map);
    let points = vec![
        context_before.converter.convert_to_coordinates(pos2(200., 300.)),
        context_before.converter.convert_to_coordinates(pos2(400., 300.)),
        context_before.converter.convert_to_coordinates(pos2(600., 300.)),
    ];

    let mut polyline = EditablePolyline::new(Polyline::new(points.clone()), PixelSize::new(20., 20.));

    map.handle(RawPointerEvent::Moved(pos2(600., 300.)), ms(0));
    polyline.update(&context(&map));
    assert_eq!(Some(2), polyline.selection().hovered());

    map.handle(press(pos2(600., 300.)), ms(10));
    polyline.update(&context(&map));
    map.handle(RawPointerEvent::Moved(pos2(600., 400.)), ms(20));
    map.handle(release(pos2(600., 400.)), ms(30));
    let events = polyline.update(&context(&map));

    assert!(
        events
            .iter()
            .any(|(id, event)| *id == 2 && matches!(event, PinEvent::Moved(_)))
    );

    let shape = polyline.polyline();
    assert_eq!(points[0], shape.points[0]);
    assert_eq!(points[1], shape.points[1]);
    assert!(shape.points[2].latitude < points[2].latitude, "moved south");
    assert!(shape.offsets(&context(&map).converter).is_some());
}
