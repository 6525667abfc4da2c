mod common;
use common::*;

#[test]
fn test_let_and_implicit_let() {
    assert_eq!(run("10 LET A=1:B=2\n20 PRINT A+B"), "3\n");
}

#[test]
fn test_goto_skips_lines() {
    assert_eq!(
        run("10 GOTO 30\n20 PRINT \"NO\"\n30 PRINT \"YES\""),
        "YES\n"
    );
}

#[test]
fn test_computed_goto() {
    assert_eq!(
        run("10 L=15*2\n20 GOTO L\n25 PRINT \"NO\"\n30 PRINT \"YES\""),
        "YES\n"
    );
}

#[test]
fn test_goto_undefined_line() {
    assert_eq!(run("10 GOTO 99"), "UNDEFINED LINE 99 IN 10 ()\n");
}

#[test]
fn test_goto_string_is_type_mismatch() {
    assert_eq!(
        run("10 GOTO \"X\""),
        "TYPE MISMATCH: NUMBER EXPECTED IN 10 (X)\n"
    );
}

#[test]
fn test_end_stops_program() {
    assert_eq!(run("10 PRINT 1\n20 END\n30 PRINT 2"), "1\n");
}

#[test]
fn test_rem_is_ignored() {
    assert_eq!(run("10 REM NOTHING: PRINT 2\n20 PRINT 1"), "1\n");
}

#[test]
fn test_empty_program() {
    assert_eq!(run(""), "");
}

#[test]
fn test_string_variables() {
    assert_eq!(run("10 A$=\"AB\"+\"CD\"\n20 PRINT A$"), "ABCD\n");
}

#[test]
fn test_integer_variable_truncates() {
    assert_eq!(run("10 A%=7.9\n20 B%=-7.9\n30 PRINT A%;\" \";B%"), "7 -7\n");
}

#[test]
fn test_store_type_mismatch() {
    assert_eq!(
        run("10 A=\"X\""),
        "TYPE MISMATCH: FLOAT EXPECTED IN 10 ()\n"
    );
    assert_eq!(
        run("10 A$=1"),
        "TYPE MISMATCH: STRING EXPECTED IN 10 ()\n"
    );
}

#[test]
fn test_undefined_variable() {
    assert_eq!(run("10 PRINT 1\n20 PRINT X"), "1\nUNDEFINED VARIABLE X IN 20 ()\n");
}

#[test]
fn test_gosub_return() {
    assert_eq!(
        run("10 GOSUB 100\n20 PRINT \"BACK\"\n30 END\n100 PRINT \"SUB\"\n110 RETURN"),
        "SUB\nBACK\n"
    );
}

#[test]
fn test_return_without_gosub() {
    assert_eq!(run("10 RETURN"), "RETURN WITHOUT GOSUB IN 10 ()\n");
}

#[test]
fn test_for_loop_counts() {
    assert_eq!(run("10 FOR I=1 TO 3\n20 PRINT I;\n30 NEXT I\n40 PRINT"), "123\n");
}

#[test]
fn test_for_loop_always_runs_once() {
    assert_eq!(run("10 FOR I=3 TO 0:PRINT I:NEXT I"), "3\n");
}

#[test]
fn test_for_step_evaluated_once() {
    assert_eq!(
        run("10 S=3\n20 FOR I=3 TO 9 STEP S\n30 S=100\n40 PRINT I;\n50 NEXT"),
        "369"
    );
}

#[test]
fn test_runaway_goto() {
    assert_eq!(run("10 GOTO 10"), "\n5000 Execution cycles exceeded.\n");
}

#[test]
fn test_home_and_tabs_are_silent_on_plain_tty() {
    assert_eq!(run("10 HTAB 5:VTAB 3\n20 PRINT \"X\""), "X\n");
}

#[test]
fn test_tabs_at_integer_limit() {
    assert_eq!(
        run("10 HTAB -9223372036854775808\n20 VTAB -9223372036854775808\n30 PRINT \"OK\""),
        "OK\n"
    );
}
