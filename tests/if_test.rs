mod common;
use common::*;

#[test]
fn test_if_then() {
    assert_eq!(run("10 IF 1 THEN PRINT \"ONE\""), "ONE\n");
    assert_eq!(run("10 IF 0 THEN PRINT \"ONE\""), "");
}

#[test]
fn test_if_then_else() {
    let src = "10 A=5\n20 IF A>3 THEN PRINT \"BIG\":PRINT \"!\" ELSE PRINT \"SMALL\"\n30 PRINT \"DONE\"";
    assert_eq!(run(src), "BIG\n!\nDONE\n");
    let src = "10 A=1\n20 IF A>3 THEN PRINT \"BIG\":PRINT \"!\" ELSE PRINT \"SMALL\"\n30 PRINT \"DONE\"";
    assert_eq!(run(src), "SMALL\nDONE\n");
}

#[test]
fn test_if_then_line_number() {
    let src = "10 IF 1 THEN 30\n20 PRINT \"NO\"\n30 PRINT \"YES\"";
    assert_eq!(run(src), "YES\n");
    let src = "10 IF 1 GOTO 30\n20 PRINT \"NO\"\n30 PRINT \"YES\"";
    assert_eq!(run(src), "YES\n");
}

#[test]
fn test_nested_if() {
    let src = "10 FOR I=1 TO 3\n\
               20 IF I>1 THEN IF I>2 THEN PRINT \"C\" ELSE PRINT \"B\"\n\
               30 NEXT";
    assert_eq!(run(src), "B\nC\n");
}

#[test]
fn test_false_if_skips_rest_of_line() {
    assert_eq!(run("10 IF 0 THEN PRINT 1:PRINT 2\n20 PRINT 3"), "3\n");
}

#[test]
fn test_number_conditions() {
    assert_eq!(run("10 IF 0.5 THEN PRINT \"T\""), "T\n");
    assert_eq!(run("10 A%=0\n20 IF A% THEN PRINT \"T\"\n30 PRINT \"F\""), "F\n");
}

#[test]
fn test_string_condition_is_type_mismatch() {
    assert_eq!(
        run("10 IF \"A\" THEN PRINT 1"),
        "TYPE MISMATCH: NUMBER EXPECTED IN 10 (A)\n"
    );
}

#[test]
fn test_string_comparison_is_type_mismatch() {
    assert_eq!(
        run("10 IF \"A\"=\"A\" THEN PRINT 1"),
        "TYPE MISMATCH IN 10 (=)\n"
    );
}

#[test]
fn test_branches_jump_to_their_lines() {
    let src = "5 X=XV\n\
               10 IF X<10 THEN PRINT \"Y\":GOTO 20 ELSE PRINT \"N\":GOTO 30\n\
               15 END\n\
               20 PRINT \"TWENTY\":END\n\
               30 PRINT \"THIRTY\"";
    assert_eq!(run(&src.replace("XV", "5")), "Y\nTWENTY\n");
    assert_eq!(run(&src.replace("XV", "11")), "N\nTHIRTY\n");
}
