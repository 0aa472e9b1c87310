use progcalc::{
    evaluate,
    interpreter::value::{
        core::Value,
        format::{Base, FormatOptions},
    },
};
use proptest::prelude::*;
use rstest::rstest;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_value(src: &str, expected: &str) {
    init_logger();
    match evaluate(src) {
        Ok(value) => assert_eq!(value.to_string(), expected, "evaluating {src:?}"),
        Err(e) => panic!("{src:?} failed: {e}"),
    }
}

fn assert_error(src: &str, column: usize, message: &str) {
    init_logger();
    match evaluate(src) {
        Ok(value) => panic!("{src:?} evaluated to {value} but was expected to fail"),
        Err(e) => {
            assert_eq!(e.to_string(), message, "evaluating {src:?}");
            assert_eq!(e.column(), column, "column of {src:?}");
        },
    }
}

#[rstest]
#[case("42", "42")]
#[case("42.1", "42.1")]
#[case("42+1", "43")]
#[case("42.1+1", "43.1")]
#[case(".1", "0.1")]
#[case("0.1", "0.1")]
#[case("1.1", "1.1")]
#[case("-42", "-42")]
#[case("-42.1", "-42.1")]
#[case("42 + 11", "53")]
#[case("42-11", "31")]
#[case("42.1+11", "53.1")]
#[case("42.1-11", "31.1")]
#[case("10/4", "2")]
#[case("10.0/4", "2.5")]
#[case("10*4", "40")]
#[case("10.1*4", "40.4")]
#[case("42%10", "2")]
#[case("(1+2+3+4)/4", "2")]
#[case("(1+2+3+4)/4.0", "2.5")]
fn arithmetic(#[case] src: &str, #[case] expected: &str) {
    assert_value(src, expected);
}

#[rstest]
#[case("0x2a", "42")]
#[case("0X2A", "42")]
#[case("0b101", "5")]
#[case("0o17", "15")]
#[case("017", "15")]
#[case("0", "0")]
#[case("1,000,000", "1000000")]
#[case("1 000 000", "1000000")]
#[case("1.000,5", "1000.5")]
#[case("'A'", "65")]
#[case("'\\n'", "10")]
#[case("'A' + 1", "66")]
fn literals(#[case] src: &str, #[case] expected: &str) {
    assert_value(src, expected);
}

#[rstest]
#[case("1 << 4", "16")]
#[case("256 >> 4", "16")]
#[case("2 + 3 * 4", "14")]
#[case("(2 + 3) * 4", "20")]
#[case("-7 / 2", "-3")]
#[case("-7 % 2", "-1")]
#[case("int8(300)", "44")]
#[case("int8(127) + int8(1)", "-128")]
#[case("int16(1) + 1", "2")]
#[case("float64(10) / 4", "2.5")]
#[case("float(1) / 3", "0.3333333333")]
#[case("int64(2.9)", "2")]
#[case("int64(9007199254740993.0)", "9007199254740993")]
#[case("int64(-9007199254740993.5)", "-9007199254740993")]
#[case("bool(0)", "false")]
#[case("bool(3)", "true")]
fn operators_and_conversions(#[case] src: &str, #[case] expected: &str) {
    assert_value(src, expected);
}

#[test]
fn integer_kind_follows_promotion() {
    init_logger();
    assert_eq!(evaluate("int8(1) + int8(2)").unwrap(), Value::Int8(3));
    assert_eq!(evaluate("int8(1) + int32(2)").unwrap(), Value::Int32(3));
    assert_eq!(evaluate("int16(1) * 3").unwrap(), Value::Int64(3));
    assert!(matches!(evaluate("int32(1) + float64(2)").unwrap(), Value::Float64(v) if v == 3.0));
    assert_eq!(evaluate("'A' + int8(1)").unwrap(), Value::Int8(66));
    assert_eq!(evaluate("'é' + int8(1)").unwrap(), Value::Int16(234));
}

#[test]
fn random_stays_below_its_bound() {
    init_logger();
    for _ in 0..50 {
        let Value::Int64(v) = evaluate("random(10)").unwrap() else {
            panic!("random(10) did not return an Int64");
        };
        assert!((0..10).contains(&v));
    }
}

#[rstest]
#[case("1 / 0", 3, "division by zero")]
#[case("5 % (2 - 2)", 3, "division by zero")]
#[case("0b102", 1, "invalid base-2 integer '0b102'")]
#[case("0x", 1, "invalid base-16 integer '0x'")]
#[case("0xFFFFFFFFFFFFFFFFF", 1, "integer literal '0xFFFFFFFFFFFFFFFFF' out of range")]
#[case("1 + 'a", 6, "unterminated character literal")]
#[case("1 ? 2", 3, "unexpected character '?'")]
#[case("--1", 2, "unexpected token '-'")]
#[case("1 + 2 )", 7, "unexpected token ')'")]
#[case("foo(1)", 1, "unknown function: 'foo'")]
#[case("1 + π(1)", 5, "unknown function: 'π'")]
#[case("random(int8(1), int8(2))", 1, "random: too many arguments")]
#[case("int8()", 1, "int8: missing argument")]
#[case("1 +", 0, "unexpected end of input")]
fn errors(#[case] src: &str, #[case] column: usize, #[case] message: &str) {
    assert_error(src, column, message);
}

proptest! {
    #[test]
    fn decimal_integers_evaluate_to_themselves(n in 0..=i64::MAX) {
        prop_assert_eq!(evaluate(&n.to_string()).unwrap(), Value::Int64(n));
    }

    #[test]
    fn hexadecimal_output_reads_back(n in 0..=i64::MAX) {
        let text = Value::Int64(n).format(FormatOptions::with_base(Base::Hexadecimal));
        prop_assert_eq!(evaluate(&text).unwrap(), Value::Int64(n));
    }

    #[test]
    fn addition_wraps_like_i64(a in 0..=i64::MAX, b in 0..=i64::MAX) {
        let src = format!("{a} + {b}");
        prop_assert_eq!(evaluate(&src).unwrap(), Value::Int64(a.wrapping_add(b)));
    }
}
