mod common;
use common::*;

#[test]
fn test_input_number() {
    assert_eq!(run_with_input("10 INPUT A\n20 PRINT A*2", "21\n"), "? 42\n");
}

#[test]
fn test_input_prompt_replaces_question_mark() {
    assert_eq!(
        run_with_input("10 INPUT \"NAME\";N$\n20 PRINT \"HI \";N$", "BOB\n"),
        "NAMEHI BOB\n"
    );
}

#[test]
fn test_input_several_fields() {
    assert_eq!(
        run_with_input("10 INPUT A,B$,C%\n20 PRINT A;B$;C%", "1.5, X ,3.7\n"),
        "? 1.5X3\n"
    );
}

#[test]
fn test_wrong_field_count_reenters() {
    assert_eq!(
        run_with_input("10 INPUT A,B\n20 PRINT A+B", "1\n2,3\n"),
        "? ?REENTER\n? 5\n"
    );
}

#[test]
fn test_bad_number_reenters() {
    assert_eq!(
        run_with_input("10 INPUT A\n20 PRINT A", "X\n5\n"),
        "? ?REENTER\n? 5\n"
    );
}

#[test]
fn test_exhausted_input_stops() {
    assert_eq!(run_with_input("10 INPUT A\n20 PRINT A", ""), "? ");
}

#[test]
fn test_get_string() {
    assert_eq!(run_with_input("10 GET K$\n20 PRINT K$", "Z"), "Z\n");
}

#[test]
fn test_get_digit() {
    assert_eq!(run_with_input("10 GET K\n20 PRINT K*2", "4"), "8\n");
}

#[test]
fn test_get_non_digit_into_number() {
    assert_eq!(
        run_with_input("10 GET K", "Q"),
        "TYPE MISMATCH: NUMBER EXPECTED IN 10 ()\n"
    );
}
