use glitch_wasm::timeline::Timeline;

#[test]
fn events_fire_in_due_order_then_schedule_order() {
    let mut tl = Timeline::new(0);
    tl.schedule_at(30, "c");
    tl.schedule_at(10, "a");
    tl.schedule_at(30, "d");
    tl.schedule_in(10, "b");

    let mut fired = Vec::new();
    while let Some((at, e)) = tl.pop_due(100) {
        fired.push((at, e));
    }
    assert_eq!(fired, vec![(10, "a"), (10, "b"), (30, "c"), (30, "d")]);
    assert!(tl.is_empty());
}

#[test]
fn pop_due_stops_at_horizon_and_moves_clock() {
    let mut tl = Timeline::new(100);
    tl.schedule_in(50, 1);
    tl.schedule_in(200, 2);

    assert_eq!(tl.pop_due(149), None);
    assert_eq!(tl.pop_due(160), Some((150, 1)));
    assert_eq!(tl.now(), 150);
    assert_eq!(tl.pop_due(160), None);

    tl.settle(160);
    assert_eq!(tl.now(), 160);
    assert_eq!(tl.next_due(), Some(300));
    assert_eq!(tl.len(), 1);
}

#[test]
fn schedule_in_is_relative_to_current_clock() {
    let mut tl = Timeline::new(0);
    tl.settle(1000);
    tl.schedule_in(40, ());
    assert_eq!(tl.next_due(), Some(1040));
}
