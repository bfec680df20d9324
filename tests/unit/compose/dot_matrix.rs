use super::*;
use crate::test_support::StubRasterizer;

#[test]
fn matrix_is_off_filled_with_lit_overlay() {
    let r = StubRasterizer::new(2, 3);
    let dm = compose_dot_matrix(&r, "# x", &Limits::default(), DotGeometry::default()).unwrap();
    assert_eq!((dm.width(), dm.height()), (6, 3));
    for y in 0..3 {
        assert_eq!(dm.dot(0, y), Some(DOT_LIT));
        assert_eq!(dm.dot(1, y), Some(DOT_LIT));
        assert_eq!(dm.dot(2, y), Some(DOT_OFF));
        assert_eq!(dm.dot(3, y), Some(DOT_OFF));
        assert_eq!(dm.dot(4, y), Some(DOT_LIT));
        assert_eq!(dm.dot(5, y), Some(DOT_OFF));
    }
    assert!(dm.grid().as_bytes().iter().all(|&d| d != 0));
}

#[test]
fn advance_beyond_max_dots_is_width_overflow() {
    let r = StubRasterizer::new(5, 1);
    let limits = Limits {
        max_text_len: 100,
        max_width: 80,
    };
    // 80 / 8 = 10 dots: two chars fit, three do not.
    assert!(compose_dot_matrix(&r, "ab", &limits, DotGeometry::default()).is_ok());
    assert_eq!(
        compose_dot_matrix(&r, "abc", &limits, DotGeometry::default()),
        Err(Overflow::Width {
            advance: 15,
            max_dots: 10
        })
    );
}

#[test]
fn empty_text_gives_empty_matrix() {
    let r = StubRasterizer::new(4, 2);
    let dm = compose_dot_matrix(&r, "", &Limits::default(), DotGeometry::default()).unwrap();
    assert_eq!((dm.width(), dm.height()), (0, 2));
}

#[test]
fn checked_advance_is_the_width_gate() {
    let r = StubRasterizer::new(5, 1);
    let limits = Limits {
        max_text_len: 100,
        max_width: 80,
    };
    let dots = DotGeometry::default();
    assert_eq!(checked_advance(&r, "ab", &limits, dots), Ok(10));
    assert_eq!(checked_advance(&r, "", &limits, dots), Ok(0));
    assert_eq!(
        checked_advance(&r, "abc", &limits, dots),
        Err(Overflow::Width {
            advance: 15,
            max_dots: 10
        })
    );
}
