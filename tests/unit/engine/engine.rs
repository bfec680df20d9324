use super::*;
use crate::{config::Limits, test_support::StubRasterizer};

fn stub_engine(char_width: u32, row_height: u32, max_width: u32) -> Engine<StubRasterizer> {
    let config = EngineConfig {
        limits: Limits {
            max_text_len: 100,
            max_width,
        },
        ..EngineConfig::default()
    };
    Engine::with_rasterizer(config, StubRasterizer::new(char_width, row_height)).unwrap()
}

#[test]
fn engine_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Engine>();
    assert_send_sync::<Engine<StubRasterizer>>();
}

#[test]
fn default_engine_prerenders_a_scrolling_fallback() {
    let engine = Engine::with_defaults().unwrap();
    let fb = engine.fallback();
    assert!(fb.frame_count() > 1);
    assert!(!fb.is_static());
    assert!(engine.is_fallback(fb));
}

#[test]
fn two_letter_scroll_matches_hand_computed_plan() {
    let engine = stub_engine(6, 13, 10922);
    let anim = engine
        .render(&RenderRequest::new("HI", 4.0, 1.0, 1.0))
        .unwrap();

    assert!(!engine.is_fallback(&anim));
    // 12 dots of text, a 12 dot window and a 24 dot period with no collapsible blank.
    assert_eq!(anim.frame_count(), 24);
    assert!(anim.frames.iter().all(|f| f.delay_cs == 4));
    // n dots of 8 px plus the 1 px outer margin on both sides.
    assert_eq!(anim.width, 12 * 8 + 2);
    assert_eq!(anim.height, 13 * 8 + 2);
    assert_eq!(anim.total_duration_cs(), 24 * 4);
}

#[test]
fn zero_speed_renders_a_single_static_frame() {
    let engine = stub_engine(6, 13, 10922);
    let anim = engine
        .render(&RenderRequest::new("#a", 0.0, 1.0, 3.0))
        .unwrap();
    assert!(anim.is_static());
    assert_eq!(anim.frames[0].delay_cs, 0);
    assert_eq!(anim.width, 12 * 8 + 2);
}

#[test]
fn rendering_is_deterministic() {
    let engine = stub_engine(2, 3, 10922);
    let req = RenderRequest::new("#a #", -3.5, 0.6, 1.7);
    let a = engine.render(&req).unwrap();
    let b = engine.render(&req).unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(*a, *b);
}

#[test]
fn too_wide_text_gets_the_shared_fallback() {
    // 400 px allows 50 dots of text; the 7 dot fallback still fits.
    let engine = stub_engine(1, 1, 400);
    let text = "a".repeat(60);
    let anim = engine
        .render(&RenderRequest::new(text.as_str(), 4.0, 1.0, 1.0))
        .unwrap();
    assert!(engine.is_fallback(&anim));
    assert!(Arc::ptr_eq(&anim, engine.fallback()));
}

#[test]
fn oversized_canvas_gets_the_shared_fallback() {
    let engine = stub_engine(1, 1, 10922);
    let anim = engine
        .render(&RenderRequest::new("a", 4.0, 1.0, 5000.0))
        .unwrap();
    assert!(engine.is_fallback(&anim));
}

#[test]
fn equal_content_is_not_the_fallback() {
    let engine = stub_engine(6, 13, 10922);
    let fb = &engine.config().fallback;
    let req = RenderRequest::new(fb.text.clone(), fb.speed, fb.width, fb.blank);
    let anim = engine.render(&req).unwrap();
    assert_eq!(*anim, **engine.fallback());
    assert!(!engine.is_fallback(&anim));
}

#[test]
fn invalid_requests_are_validation_errors() {
    let engine = stub_engine(6, 13, 10922);
    for req in [
        RenderRequest::new("a", 4.0, 0.0, 1.0),
        RenderRequest::new("a", 4.0, 1.0, -1.0),
        RenderRequest::new("a", f64::NAN, 1.0, 1.0),
        RenderRequest::new("a".repeat(101), 4.0, 1.0, 1.0),
    ] {
        assert!(matches!(
            engine.render(&req),
            Err(DotmtxError::Validation(_))
        ));
    }
}

#[test]
fn construction_fails_when_the_fallback_overflows() {
    // "TOO BIG" needs (7 + 7 + 7) * 8 + 2 = 170 px; rows still fit in 150.
    let config = EngineConfig {
        limits: Limits {
            max_text_len: 100,
            max_width: 150,
        },
        ..EngineConfig::default()
    };
    let err = Engine::with_rasterizer(config, StubRasterizer::new(1, 1)).unwrap_err();
    assert!(matches!(err, DotmtxError::Validation(_)));
}

#[test]
fn construction_rejects_invalid_config() {
    let mut config = EngineConfig::default();
    config.fallback.text.clear();
    assert!(Engine::new(config).is_err());
}

#[test]
fn plan_agrees_with_render() {
    let engine = stub_engine(2, 3, 10922);
    let req = RenderRequest::new("#a", 10.0, 0.5, 2.0);
    let plan = engine.plan(&req).unwrap().unwrap();
    let anim = engine.render(&req).unwrap();
    assert_eq!(plan.frame_count() as usize, anim.frame_count());
    assert_eq!(plan.layout.window_width_px, anim.width);
    assert_eq!(plan.layout.height_px, anim.height);
}

#[test]
fn plan_is_none_on_overflow() {
    let engine = stub_engine(1, 1, 400);
    let wide = RenderRequest::new("a".repeat(60), 4.0, 1.0, 1.0);
    assert_eq!(engine.plan(&wide).unwrap(), None);
    let long_blank = RenderRequest::new("a", 4.0, 1.0, 5000.0);
    assert_eq!(engine.plan(&long_blank).unwrap(), None);
}

#[test]
fn construction_rejects_rasterizers_taller_than_the_limit() {
    // 200 rows of 8 px dots is 1602 px tall, over a 1000 px limit.
    let config = EngineConfig {
        limits: Limits {
            max_text_len: 100,
            max_width: 1000,
        },
        ..EngineConfig::default()
    };
    let err = Engine::with_rasterizer(config, StubRasterizer::new(1, 200)).unwrap_err();
    assert!(matches!(err, DotmtxError::Validation(_)));
}

#[test]
fn plan_and_render_agree_on_overflow() {
    // 400 px: 24 static dots need 386 px, 25 need 402 px, 51 exceed the 50 dot advance limit.
    let engine = stub_engine(1, 1, 400);
    for (len, fits) in [(24, true), (25, false), (51, false)] {
        let req = RenderRequest::new("a".repeat(len), 0.0, 1.0, 0.0);
        let anim = engine.render(&req).unwrap();
        assert_eq!(engine.plan(&req).unwrap().is_some(), fits, "len {len}");
        assert_eq!(!engine.is_fallback(&anim), fits, "len {len}");
    }
}
