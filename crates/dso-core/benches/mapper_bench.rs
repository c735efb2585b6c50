use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dso_core::cursor::{marker_vertices, CursorShape, ScopeCursor};
use dso_core::mapper::{pixel_to_division, PointerTracker};
use dso_core::settings::ScopeSettings;
use glam::DVec2;

fn bench_pixel_to_division_1000(c: &mut Criterion) {
    c.bench_function("pixel_to_division_1000", |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(pixel_to_division(i as f64, (i / 2) as f64, 800.0, 600.0));
            }
        });
    });
}

fn bench_marker_vertices_all_shapes(c: &mut Criterion) {
    let cursors: Vec<ScopeCursor> = [
        CursorShape::None,
        CursorShape::Vertical,
        CursorShape::Horizontal,
        CursorShape::Rectangular,
    ]
    .into_iter()
    .map(|shape| ScopeCursor {
        shape,
        positions: [DVec2::new(-1.2, 0.4), DVec2::new(2.3, -1.7)],
    })
    .collect();

    c.bench_function("marker_vertices_all_shapes", |b| {
        b.iter(|| {
            for cursor in &cursors {
                black_box(marker_vertices(cursor));
            }
        });
    });
}

fn bench_snap_search(c: &mut Criterion) {
    let mut scope = ScopeSettings::with_channels(2);
    scope.voltage[0].cursor.shape = CursorShape::Rectangular;
    let mut tracker = PointerTracker::new();
    tracker.select_cursor(1);

    c.bench_function("snap_search_press_release", |b| {
        b.iter(|| {
            let events = tracker.on_pointer_down(&mut scope, black_box(DVec2::new(0.99, 0.99)));
            black_box(events);
            tracker.on_pointer_up(&mut scope, DVec2::new(0.99, 0.99));
        });
    });
}

criterion_group!(
    benches,
    bench_pixel_to_division_1000,
    bench_marker_vertices_all_shapes,
    bench_snap_search
);
criterion_main!(benches);
