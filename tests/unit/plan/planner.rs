use super::*;

const MAX_WIDTH: u32 = 10922;

fn plan(speed: f64, width: f64, blank: f64, text_dots: u32) -> AnimationPlan {
    plan_animation(
        &PlanParams {
            speed,
            width,
            blank,
        },
        text_dots,
        13,
        6,
        DotGeometry::default(),
        MAX_WIDTH,
    )
    .unwrap()
}

fn scroll(p: &AnimationPlan) -> ScrollPlan {
    match p.timing {
        Timing::Scroll(s) => s,
        Timing::Static => panic!("expected a scrolling plan, got static"),
    }
}

#[test]
fn clamp_limits_width_to_one_cycle() {
    let p = PlanParams {
        speed: 3.0,
        width: 5.0,
        blank: 0.5,
    };
    assert_eq!(clamp_multipliers(&p), (1.5, 0.5));
}

#[test]
fn static_recompute_uses_clamped_width() {
    let p = PlanParams {
        speed: 0.0,
        width: 2.0,
        blank: 0.0,
    };
    assert_eq!(clamp_multipliers(&p), (1.0, 0.0));

    let p = PlanParams {
        speed: 0.0,
        width: 2.0,
        blank: 3.0,
    };
    assert_eq!(clamp_multipliers(&p), (2.0, 1.0));
}

#[test]
fn delay_rounding_and_guards() {
    assert_eq!(frame_delay_cs(0.0, 6), 0);
    assert_eq!(frame_delay_cs(4.0, 6), 4);
    assert_eq!(frame_delay_cs(-4.0, 6), 4);
    // 100 / 1.56 = 64.1
    assert_eq!(frame_delay_cs(0.26, 6), 64);
    // Faster than the renderer floor.
    assert_eq!(frame_delay_cs(1.0e6, 6), 2);
    // Absurdly slow: out of GIF range, treated as static.
    assert_eq!(frame_delay_cs(1.0e-9, 6), 0);
    assert_eq!(frame_delay_cs(f64::NAN, 6), 0);
    assert_eq!(frame_delay_cs(4.0, 0), 0);
}

#[test]
fn hi_scenario_scrolls_one_frame_per_dot() {
    let p = plan(4.0, 1.0, 1.0, 12);
    let s = scroll(&p);
    assert_eq!(p.layout.window_columns, 12);
    assert_eq!(p.layout.backing_columns, 24);
    assert_eq!(s.direction, ScrollDirection::Forward);
    assert_eq!(s.start_column, 12);
    assert_eq!(s.delay_cs, 4);
    assert_eq!(s.last_delay_cs, 4);
    assert_eq!(s.frame_count, 24);
    assert_eq!(s.blank_run, None);
}

#[test]
fn forward_blank_run_collapses_into_last_frame() {
    let p = plan(4.0, 0.5, 1.0, 12);
    let s = scroll(&p);
    assert_eq!(s.start_column, 18);
    assert_eq!(
        s.blank_run,
        Some(BlankRun {
            start: 12,
            end: 18,
            count: 6
        })
    );
    assert_eq!(s.frame_count, 19);
    assert_eq!(s.last_delay_cs, 24);
    assert_eq!(p.column_of(0), 18);
    assert_eq!(p.column_of(6), 0);
    assert_eq!(p.column_of(18), 12);
    assert_eq!(p.delay_of(17), 4);
    assert_eq!(p.delay_of(18), 24);
}

#[test]
fn reverse_mirrors_forward_counts() {
    let fwd = scroll(&plan(4.0, 0.5, 1.0, 12));
    let rev_plan = plan(-4.0, 0.5, 1.0, 12);
    let rev = scroll(&rev_plan);
    assert_eq!(rev.direction, ScrollDirection::Reverse);
    assert_eq!(rev.start_column, 12);
    assert_eq!(rev.frame_count, fwd.frame_count);
    assert_eq!(rev.delay_cs, fwd.delay_cs);
    assert_eq!(
        rev.blank_run,
        Some(BlankRun {
            start: 13,
            end: 19,
            count: 6
        })
    );
    assert_eq!(rev_plan.column_of(12), 0);
    assert_eq!(rev_plan.column_of(13), 23);
    assert_eq!(rev_plan.column_of(18), 18);
}

#[test]
fn collapse_preserves_total_duration() {
    for (width, blank) in [(0.5, 1.0), (0.25, 2.0), (1.0, 0.5), (0.1, 3.0)] {
        let p = plan(4.0, width, blank, 12);
        let s = scroll(&p);
        let total: u32 = (0..p.frame_count()).map(|i| p.delay_of(i)).sum();
        assert_eq!(total, s.delay_cs * p.layout.backing_columns);
    }
}

#[test]
fn static_plan_is_single_frame() {
    let p = plan(0.0, 2.0, 0.0, 12);
    assert_eq!(p.timing, Timing::Static);
    assert_eq!(p.frame_count(), 1);
    assert_eq!(p.delay_of(0), 0);
    assert_eq!(p.column_of(0), 0);
    assert_eq!(p.layout.window_columns, 12);
    assert_eq!(p.layout.window_width_px, 12 * 8 + 2);
}

#[test]
fn degenerate_speed_falls_back_to_static_without_recompute() {
    let p = plan(1.0e-9, 1.0, 1.0, 12);
    assert_eq!(p.timing, Timing::Static);
    // The blank multiplier is only recomputed for speed == 0.
    assert_eq!(p.blank_mult, 1.0);
    assert_eq!(p.layout.backing_columns, 24);
}

#[test]
fn empty_text_is_static() {
    let p = plan(4.0, 1.0, 1.0, 0);
    assert_eq!(p.timing, Timing::Static);
    assert_eq!(p.frame_count(), 1);
    assert_eq!(p.layout.window_width_px, 2);
}

#[test]
fn oversized_canvas_overflows() {
    let err = plan_animation(
        &PlanParams {
            speed: 4.0,
            width: 1.0,
            blank: 100.0,
        },
        600,
        13,
        6,
        DotGeometry::default(),
        MAX_WIDTH,
    );
    assert!(matches!(err, Err(Overflow::Size { .. })));
}
