mod common;
use common::*;

fn print(expr: &str) -> String {
    run(&format!("10 PRINT {}", expr))
}

#[test]
fn test_int_floors() {
    assert_eq!(print("INT(3.9)"), "3\n");
    assert_eq!(print("INT(-1.75)"), "-2\n");
    assert_eq!(print("INT(-2)"), "-2\n");
}

#[test]
fn test_abs() {
    assert_eq!(print("ABS(-3)"), "3\n");
    assert_eq!(print("ABS(-2.5)"), "2.5\n");
    assert_eq!(run("10 A%=-4\n20 PRINT ABS(A%)"), "4\n");
}

#[test]
fn test_sgn() {
    assert_eq!(print("SGN(-0.5);SGN(0);SGN(42)"), "-101\n");
}

#[test]
fn test_nested_calls() {
    assert_eq!(print("INT(ABS(-2.5))*SGN(-1)"), "-2\n");
}

#[test]
fn test_string_argument_is_type_mismatch() {
    assert_eq!(print("INT(\"X\")"), "TYPE MISMATCH IN 10 (INT)\n");
    assert_eq!(print("SGN(\"X\")"), "TYPE MISMATCH IN 10 (SGN)\n");
}
