use approx::assert_abs_diff_eq;
use chart_realtime::api::{StreamingChart, scroll_window};
use chart_realtime::core::{
    AxisBindings, AxisGeometry, AxisId, DataPoint, Dataset, DatasetMeta, ElementProperty,
    PixelRect, PropertyAnimation, RenderedElement, TimeWindow,
};

fn scrolling_chart() -> StreamingChart {
    let mut chart = StreamingChart::new(
        PixelRect::new(0.0, 0.0, 1_000.0, 400.0),
        PixelRect::new(0.0, 0.0, 1_000.0, 400.0),
    );
    let index = chart.add_dataset(
        Dataset::new("live").with_points([DataPoint::new(5_000.0, 1.0)]),
        DatasetMeta::new("x", "y"),
    );
    let meta = chart.meta_mut(index).expect("meta");
    meta.elements = vec![
        RenderedElement::at(500.0, 100.0)
            .with_property(ElementProperty::Cp1X, 480.0)
            .with_property(ElementProperty::Cp2X, 520.0)
            .with_animation(ElementProperty::X, PropertyAnimation::new(450.0, 500.0)),
        RenderedElement::at(900.0, 120.0),
    ];
    let mut connector = RenderedElement::at(500.0, 100.0);
    connector.path = Some(vec![[500.0, 100.0], [900.0, 120.0]]);
    meta.dataset_element = Some(connector);
    meta.rebuild_bindings();
    chart
}

#[test]
fn half_second_of_ten_second_window_scrolls_fifty_pixels() {
    let mut chart = scrolling_chart();
    let axis = AxisId::from("x");
    let mut window = TimeWindow::new(10_000.0, 10_000.0, 0.0, None);

    let outcome = scroll_window(
        &mut chart,
        &axis,
        AxisGeometry::horizontal(0.0, 1_000.0),
        &mut window,
        10_500.0,
    );

    assert_abs_diff_eq!(outcome.offset, 50.0);
    let meta = chart.meta(0).expect("meta");
    assert_abs_diff_eq!(meta.elements[0].property(ElementProperty::X).expect("x"), 450.0);
    assert_abs_diff_eq!(meta.elements[0].property(ElementProperty::Cp1X).expect("cp1x"), 430.0);
    assert_abs_diff_eq!(meta.elements[0].property(ElementProperty::Cp2X).expect("cp2x"), 470.0);
    assert_abs_diff_eq!(meta.elements[1].property(ElementProperty::X).expect("x"), 850.0);
    assert_eq!(meta.elements[0].property(ElementProperty::Y), Some(100.0));
}

#[test]
fn in_flight_animations_are_shifted() {
    let mut chart = scrolling_chart();
    let mut window = TimeWindow::new(10_000.0, 10_000.0, 0.0, None);

    scroll_window(
        &mut chart,
        &AxisId::from("x"),
        AxisGeometry::horizontal(0.0, 1_000.0),
        &mut window,
        10_500.0,
    );

    assert_eq!(
        chart.meta(0).expect("meta").elements[0].animation(ElementProperty::X),
        Some(PropertyAnimation::new(400.0, 450.0))
    );
}

#[test]
fn connector_path_is_invalidated() {
    let mut chart = scrolling_chart();
    let mut window = TimeWindow::new(0.0, 10_000.0, 0.0, None);

    scroll_window(
        &mut chart,
        &AxisId::from("x"),
        AxisGeometry::horizontal(0.0, 1_000.0),
        &mut window,
        100.0,
    );

    let connector = chart
        .meta(0)
        .and_then(|meta| meta.dataset_element.as_ref())
        .expect("connector");
    assert!(connector.path.is_none());
    assert_eq!(connector.property(ElementProperty::X), Some(490.0));
}

#[test]
fn bounds_trail_now_by_delay() {
    let mut chart = StreamingChart::default();
    let mut window = TimeWindow::new(0.0, 10_000.0, 2_000.0, None);

    let outcome = scroll_window(
        &mut chart,
        &AxisId::from("x"),
        AxisGeometry::horizontal(0.0, 1_000.0),
        &mut window,
        30_000.0,
    );

    assert_eq!(outcome.max, 28_000.0);
    assert_eq!(outcome.min, 18_000.0);
    assert_eq!(window.head(), 30_000.0);
}

#[test]
fn overlays_and_tooltip_follow_the_axis() {
    let axis = AxisId::from("x");
    let mut bindings = AxisBindings::new();
    bindings.bind(ElementProperty::X, axis.clone());
    bindings.bind(ElementProperty::X2, axis.clone());

    let mut chart = StreamingChart::default();
    chart.overlays.push(
        RenderedElement::new()
            .with_property(ElementProperty::X, 300.0)
            .with_property(ElementProperty::X2, 400.0)
            .with_property(ElementProperty::Y, 10.0)
            .with_bindings(bindings.clone()),
    );
    chart.tooltip = Some(RenderedElement::at(250.0, 40.0).with_bindings(bindings));
    let mut window = TimeWindow::new(0.0, 1_000.0, 0.0, None);

    let outcome = scroll_window(
        &mut chart,
        &axis,
        AxisGeometry::horizontal(0.0, 1_000.0),
        &mut window,
        100.0,
    );

    assert_eq!(outcome.shifted, 3);
    assert_eq!(chart.overlays[0].property(ElementProperty::X), Some(200.0));
    assert_eq!(chart.overlays[0].property(ElementProperty::X2), Some(300.0));
    assert_eq!(chart.overlays[0].property(ElementProperty::Y), Some(10.0));
    assert_eq!(
        chart.tooltip.as_ref().and_then(|tip| tip.property(ElementProperty::X)),
        Some(150.0)
    );
}

#[test]
fn vertical_axis_scrolls_downward() {
    let axis = AxisId::from("time");
    let mut chart = StreamingChart::default();
    let index = chart.add_dataset(Dataset::new("v"), DatasetMeta::new("value", "time"));
    let meta = chart.meta_mut(index).expect("meta");
    meta.elements.push(RenderedElement::at(50.0, 200.0));
    meta.rebuild_bindings();
    let mut window = TimeWindow::new(0.0, 10_000.0, 0.0, None);

    let outcome = scroll_window(
        &mut chart,
        &axis,
        AxisGeometry::vertical(0.0, 500.0),
        &mut window,
        1_000.0,
    );

    assert_abs_diff_eq!(outcome.offset, -50.0);
    let element = &chart.meta(0).expect("meta").elements[0];
    assert_abs_diff_eq!(element.property(ElementProperty::Y).expect("y"), 250.0);
    assert_eq!(element.property(ElementProperty::X), Some(50.0));
}

#[test]
fn stale_frame_time_does_not_scroll_backward() {
    let mut chart = scrolling_chart();
    let mut window = TimeWindow::new(5_000.0, 10_000.0, 0.0, None);

    let outcome = scroll_window(
        &mut chart,
        &AxisId::from("x"),
        AxisGeometry::horizontal(0.0, 1_000.0),
        &mut window,
        4_000.0,
    );

    assert_eq!(outcome.offset, 0.0);
    assert_eq!(outcome.shifted, 0);
    assert_eq!(window.head(), 5_000.0);
}
