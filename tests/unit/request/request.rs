use super::*;

#[test]
fn parses_bot_style_query() {
    let req: RenderRequest = "4 1 1 HELLO WORLD".parse().unwrap();
    assert_eq!(req, RenderRequest::new("HELLO WORLD", 4.0, 1.0, 1.0));

    let req: RenderRequest = "  -2.5\t0.5  0   spaced  text ".parse().unwrap();
    assert_eq!(req.speed, -2.5);
    assert_eq!(req.width, 0.5);
    assert_eq!(req.blank, 0.0);
    assert_eq!(req.text, "spaced  text ");
}

#[test]
fn missing_fields_are_reported() {
    for q in ["", "4", "4 1", "4 1 1", "4 1 1 ", "4 1 1HELLO"] {
        assert_eq!(
            q.parse::<RenderRequest>(),
            Err(RequestError::NotEnoughParams),
            "query {q:?}"
        );
    }
}

#[test]
fn invalid_numbers_are_reported() {
    for q in ["fast 1 1 X", "4 0 1 X", "4 -1 1 X", "4 1 -0.5 X", "4 NaN 1 X"] {
        assert_eq!(
            q.parse::<RenderRequest>(),
            Err(RequestError::InvalidParams),
            "query {q:?}"
        );
    }
}

#[test]
fn parse_enforces_limits() {
    let limits = Limits {
        max_text_len: 5,
        max_width: 10922,
    };
    assert!(RenderRequest::parse("4 1 1 HELLO", &limits).is_ok());
    assert_eq!(
        RenderRequest::parse("4 1 1 HELLO!", &limits),
        Err(RequestError::TextTooLong { max: 5 })
    );
    // Length is measured in bytes.
    assert!(RenderRequest::parse("4 1 1 ééé", &limits).is_err());
}

#[test]
fn validate_rejects_non_finite_numbers() {
    let limits = Limits::default();
    assert!(RenderRequest::new("X", 1.0, 1.0, 0.0).validate(&limits).is_ok());
    assert!(RenderRequest::new("X", f64::INFINITY, 1.0, 0.0)
        .validate(&limits)
        .is_err());
    assert!(RenderRequest::new("X", 1.0, f64::INFINITY, 0.0)
        .validate(&limits)
        .is_err());
    assert!(RenderRequest::new("X", 1.0, 1.0, f64::NAN)
        .validate(&limits)
        .is_err());
}

#[test]
fn errors_convert_to_validation() {
    let err: DotmtxError = RequestError::NotEnoughParams.into();
    assert!(matches!(err, DotmtxError::Validation(_)));
}

#[test]
fn whitespace_only_text_keeps_the_last_character() {
    let req: RenderRequest = "4 1 1   ".parse().unwrap();
    assert_eq!(req.text, " ");

    let req: RenderRequest = "4 1 1 \t".parse().unwrap();
    assert_eq!(req.text, "\t");
}

#[test]
fn line_breaks_end_the_query() {
    let req: RenderRequest = "4 1 1\nHELLO".parse().unwrap();
    assert_eq!(req.text, "HELLO");

    for q in ["4 1 1 HELLO\nWORLD", "4 1 1 HELLO\n", "4 1 1 \n"] {
        assert_eq!(
            q.parse::<RenderRequest>(),
            Err(RequestError::NotEnoughParams),
            "query {q:?}"
        );
    }
}
