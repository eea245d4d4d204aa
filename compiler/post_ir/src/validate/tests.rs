use super::*;

#[test]
fn indices_are_nonzero_integers() {
    assert!(is_valid_index("10"));
    assert!(is_valid_index("1"));
    assert!(is_valid_index("-3"));
    assert!(is_valid_index("+7"));
    assert!(is_valid_index("9007199254740991"));

    assert!(!is_valid_index("0"));
    assert!(!is_valid_index("-0"));
    assert!(!is_valid_index("1.5"));
    assert!(!is_valid_index(""));
    assert!(!is_valid_index(" 10"));
    assert!(!is_valid_index("ten"));
    assert!(!is_valid_index("99999999999999999999"));
}

#[test]
fn parse_index_keeps_value() {
    assert_eq!(parse_index("010"), Some(10));
    assert_eq!(parse_index("-25"), Some(-25));
    assert_eq!(parse_index("0"), None);
}

#[test]
fn subroutine_names_follow_identifier_syntax() {
    assert!(is_valid_subroutine_name("ToRightAndMark"));
    assert!(is_valid_subroutine_name("_private"));
    assert!(is_valid_subroutine_name("$dollar"));
    assert!(is_valid_subroutine_name("a1_b2$"));

    assert!(!is_valid_subroutine_name(""));
    assert!(!is_valid_subroutine_name("1abc"));
    assert!(!is_valid_subroutine_name("with space"));
    assert!(!is_valid_subroutine_name("dash-name"));
    assert!(!is_valid_subroutine_name("ünicode"));
}

#[test]
fn numeric_looking_tokens() {
    assert!(looks_numeric("0"));
    assert!(looks_numeric("1.5"));
    assert!(looks_numeric("-0"));
    assert!(looks_numeric("99999999999999999999"));

    assert!(!looks_numeric("inf"));
    assert!(!looks_numeric("NaN"));
    assert!(!looks_numeric("bad-name"));
    assert!(!looks_numeric(""));
}
