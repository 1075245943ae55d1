#![allow(non_snake_case)]

use super::*;
use proptest::prelude::*;
use test_case::test_case;

#[test_case("int", "Integer.parseInt(", ")")]
#[test_case("Integer", "Integer.valueOf(", ")")]
#[test_case("boolean", "\"true\".equals(", ")")]
#[test_case("Boolean", "Boolean.valueOf(", ")")]
#[test_case("double", "Double.parseDouble(", ")")]
#[test_case("short", "Short.parseShort(", ")")]
#[test_case("String", "", "")]
fn ScalarKind___java_parse___wraps_reader_text(name: &str, prefix: &str, suffix: &str) {
    let ty = JavaType::parse(name, "").unwrap();

    let kind = ScalarKind::of(&ty).unwrap();

    assert_eq!(kind.java_parse(), (prefix, suffix));
    assert_eq!(kind.java_name(), name);
}

#[test]
fn ScalarKind___of___ignores_non_scalars() {
    assert_eq!(ScalarKind::of(&JavaType::Primitive(Primitive::Char)), None);
    assert_eq!(ScalarKind::of(&JavaType::class("java.util.Date")), None);
    assert_eq!(
        ScalarKind::of(&JavaType::Array(Box::new(JavaType::Primitive(Primitive::Int)))),
        None
    );
}

#[test]
fn ScalarKind___every_kind___resolves_from_its_java_name() {
    for kind in ScalarKind::ALL {
        let ty = JavaType::parse(kind.java_name(), "").unwrap();
        assert_eq!(ScalarKind::of(&ty), Some(kind));
    }
}

#[test_case(ScalarKind::Int, "42", ScalarValue::Int(42))]
#[test_case(ScalarKind::Int, "-7", ScalarValue::Int(-7))]
#[test_case(ScalarKind::BoxedBoolean, "false", ScalarValue::Bool(false))]
#[test_case(ScalarKind::Double, "1.5", ScalarValue::Double(1.5))]
#[test_case(ScalarKind::String, "hello", ScalarValue::Text("hello".to_string()))]
fn ScalarKind___parse_literal___accepts_valid_text(
    kind: ScalarKind,
    text: &str,
    expected: ScalarValue,
) {
    assert_eq!(kind.parse_literal(text).unwrap(), expected);
}

#[test_case(ScalarKind::Int, "4.2")]
#[test_case(ScalarKind::Short, "40000")]
#[test_case(ScalarKind::Boolean, "yes")]
#[test_case(ScalarKind::Long, "")]
fn ScalarKind___parse_literal___rejects_invalid_text(kind: ScalarKind, text: &str) {
    assert!(kind.parse_literal(text).is_err());
}

#[test_case(0)]
#[test_case(-1)]
#[test_case(i32::MAX)]
#[test_case(i32::MIN)]
fn ScalarKind___int_boundaries___round_trip(value: i32) {
    let rendered = ScalarValue::Int(value).render();

    assert_eq!(
        ScalarKind::Int.parse_literal(&rendered).unwrap(),
        ScalarValue::Int(value)
    );
}

proptest! {
    #[test]
    fn proptest_int_round_trip(value in any::<i32>()) {
        let text = ScalarValue::Int(value).render();
        prop_assert_eq!(ScalarKind::Integer.parse_literal(&text).unwrap(), ScalarValue::Int(value));
    }

    #[test]
    fn proptest_long_round_trip(value in any::<i64>()) {
        let text = ScalarValue::Long(value).render();
        prop_assert_eq!(ScalarKind::Long.parse_literal(&text).unwrap(), ScalarValue::Long(value));
    }

    #[test]
    fn proptest_short_round_trip(value in any::<i16>()) {
        let text = ScalarValue::Short(value).render();
        prop_assert_eq!(ScalarKind::BoxedShort.parse_literal(&text).unwrap(), ScalarValue::Short(value));
    }

    #[test]
    fn proptest_double_round_trip(value in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
        let text = ScalarValue::Double(value).render();
        prop_assert_eq!(ScalarKind::Double.parse_literal(&text).unwrap(), ScalarValue::Double(value));
    }

    #[test]
    fn proptest_float_round_trip(value in any::<f32>().prop_filter("finite", |v| v.is_finite())) {
        let text = ScalarValue::Float(value).render();
        prop_assert_eq!(ScalarKind::BoxedFloat.parse_literal(&text).unwrap(), ScalarValue::Float(value));
    }

    #[test]
    fn proptest_bool_round_trip(value in any::<bool>()) {
        let text = ScalarValue::Bool(value).render();
        prop_assert_eq!(ScalarKind::Boolean.parse_literal(&text).unwrap(), ScalarValue::Bool(value));
    }

    #[test]
    fn proptest_text_round_trip(value in ".*") {
        let text = ScalarValue::Text(value.clone()).render();
        prop_assert_eq!(ScalarKind::String.parse_literal(&text).unwrap(), ScalarValue::Text(value));
    }
}
