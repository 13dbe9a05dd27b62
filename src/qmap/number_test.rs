use crate::qmap::number::{parse_invariant, NumberFormat};

const GERMAN: NumberFormat = NumberFormat {
    decimal_separator: ',',
    group_separator: '.',
};

// Invariant

#[test]
fn invariant_plain_numbers() {
    assert_eq!(parse_invariant("0"), Some(0.0));
    assert_eq!(parse_invariant("-64"), Some(-64.0));
    assert_eq!(parse_invariant("+3"), Some(3.0));
    assert_eq!(parse_invariant("0.25"), Some(0.25));
    assert_eq!(parse_invariant("-.5"), Some(-0.5));
    assert_eq!(parse_invariant("2."), Some(2.0));
}

#[test]
fn invariant_exponent() {
    assert_eq!(parse_invariant("-1.23e4"), Some(-12300.0));
    assert_eq!(parse_invariant("5E-1"), Some(0.5));
}

#[test]
fn invariant_allows_surrounding_whitespace() {
    assert_eq!(parse_invariant(" 16 "), Some(16.0));
}

#[test]
fn invariant_group_separators_in_whole_part() {
    assert_eq!(parse_invariant("1,024.5"), Some(1024.5));
}

#[test]
fn invariant_rejects_garbage() {
    assert_eq!(parse_invariant(""), None);
    assert_eq!(parse_invariant("wall"), None);
    assert_eq!(parse_invariant("("), None);
    assert_eq!(parse_invariant("inf"), None);
    assert_eq!(parse_invariant("NaN"), None);
    assert_eq!(parse_invariant("1.5.2"), None);
    assert_eq!(parse_invariant("0.1,5"), None);
    assert_eq!(parse_invariant("1e"), None);
}

// Locale formats

#[test]
fn comma_decimal_locale() {
    assert_eq!(GERMAN.parse("0,5"), Some(0.5));
    assert_eq!(GERMAN.parse("-12,25"), Some(-12.25));
}

#[test]
fn comma_decimal_locale_reads_dot_as_group() {
    assert_eq!(GERMAN.parse("0.5"), Some(5.0));
    assert_eq!(GERMAN.parse("1.024,5"), Some(1024.5));
}

#[test]
fn locale_names() {
    assert_eq!(NumberFormat::from_locale_name("de_DE.UTF-8"), GERMAN);
    assert_eq!(NumberFormat::from_locale_name("pt_BR"), GERMAN);
    assert_eq!(
        NumberFormat::from_locale_name("fr_FR.UTF-8").decimal_separator,
        ','
    );
    assert_eq!(
        NumberFormat::from_locale_name("en_US.UTF-8"),
        NumberFormat::INVARIANT
    );
    assert_eq!(NumberFormat::from_locale_name("C"), NumberFormat::INVARIANT);
    assert_eq!(NumberFormat::from_locale_name(""), NumberFormat::INVARIANT);
}
