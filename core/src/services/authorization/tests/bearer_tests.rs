use crate::errors::ErrorKind;
use crate::services::authorization::parse_bearer;

#[test]
fn test_valid_bearer() {
    assert_eq!(parse_bearer(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
}

#[test]
fn test_rejected_headers() {
    let cases = [
        None,
        Some(""),
        Some("Bearer"),
        Some("Bearer "),
        Some("bearer abc"),
        Some("Basic abc"),
        Some("Bearer  abc"),
        Some("Bearer abc def"),
        Some("abc"),
    ];

    for case in cases {
        let err = parse_bearer(case).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized, "{case:?}");
    }
}
