mod common;
use basic::lang::{lex, parse};
use common::*;

#[test]
fn test_program_display() {
    let src = "10 A=1:B$=\"X\"\n20 FOR I=1 TO 10 STEP 2\n30 PRINT I;A,B$\n40 NEXT I\n50 IF A THEN 10 ELSE PRINT\n";
    let (program, errors) = parse(&lex(src).unwrap());
    assert!(errors.is_empty());
    assert_eq!(
        program.to_string(),
        "10 A=1:B$=\"X\"\n20 FOR I=1 TO 10 STEP 2\n30 PRINT I;A,B$\n40 NEXT I\n50 IF A THEN GOTO 10 ELSE PRINT\n"
    );
}

#[test]
fn test_missing_next() {
    assert_eq!(
        parse_errors("10 PRINT 1\n20 FOR I=1 TO 2\n"),
        vec!["MISSING NEXT IN 20 (FOR)"]
    );
}

#[test]
fn test_next_without_for() {
    assert_eq!(parse_errors("10 NEXT"), vec!["NEXT WITHOUT FOR IN 10 (NEXT)"]);
}

#[test]
fn test_duplicate_line() {
    assert_eq!(
        parse_errors("10 END\n10 END"),
        vec!["DUPLICATE LINE NUMBER IN 10 (10)"]
    );
}

#[test]
fn test_missing_line_number() {
    assert_eq!(
        parse_errors("PRINT 1"),
        vec!["SYNTAX ERROR: EXPECTED LINE NUMBER ON LINE 1"]
    );
}

#[test]
fn test_errors_collected_per_line() {
    assert_eq!(
        parse_errors("10 FOR =1 TO 2\n20 PRINT 1\n30 A 1"),
        vec![
            "SYNTAX ERROR: EXPECTED VARIABLE IN 10 (=)",
            "SYNTAX ERROR: EXPECTED '=' IN 30 (1)"
        ]
    );
}

#[test]
fn test_unsupported_keyword() {
    assert_eq!(
        parse_errors("10 DIM A(10)"),
        vec!["SYNTAX ERROR: UNKNOWN KEYWORD IN 10 (DIM)"]
    );
}

#[test]
fn test_unsupported_function() {
    assert_eq!(
        parse_errors("10 A=RND(1)"),
        vec!["SYNTAX ERROR: UNKNOWN KEYWORD IN 10 (RND)"]
    );
}
