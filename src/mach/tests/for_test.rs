use super::*;

#[test]
fn test_next_steps_innermost_frame() {
    // Jumping past the inner NEXT leaves X on top; NEXT Y still steps it.
    let src = "10 FOR Y=1 TO 2\n20 FOR X=8 TO 9\n30 PRINT Y;\" \";X\n40 GOTO 60\n50 NEXT\n60 NEXT Y\n";
    assert_eq!(run(src), "1 8\n1 9\n");
}

#[test]
fn test_body_runs_once_past_bound() {
    assert_eq!(run("10 FOR I=5 TO 1\n20 PRINT I\n30 NEXT I\n"), "5\n");
}

#[test]
fn test_negative_step() {
    let src = "10 FOR I=3 TO 1 STEP -1:PRINT I;:NEXT I\n20 PRINT\n30 PRINT I\n";
    assert_eq!(run(src), "321\n1\n");
}

#[test]
fn test_fractional_step() {
    let src = "10 FOR I=0 TO 1 STEP 0.25\n20 PRINT I;\",\";\n30 NEXT\n";
    assert_eq!(run(src), "0,0.25,0.5,0.75,1,");
}

#[test]
fn test_nested_loops() {
    let src = "10 FOR I=1 TO 2:FOR J=1 TO 3\n20 PRINT I*J;\" \";\n30 NEXT J:NEXT I\n";
    assert_eq!(run(src), "1 2 3 2 4 6 ");
}

#[test]
fn test_integer_loop_variable() {
    let src = "10 FOR I%=1 TO 3\n20 PRINT I%;\n30 NEXT\n";
    assert_eq!(run(src), "123");
}

#[test]
fn test_step_zero() {
    assert_eq!(
        run("10 FOR I=1 TO 10 STEP 0\n20 NEXT I\n"),
        "STEP CANNOT BE ZERO IN 10 ()\n"
    );
}

#[test]
fn test_runaway_loop_is_reported() {
    let out = run_cycles("10 GOTO 10\n", 100);
    assert_eq!(out, "\n100 Execution cycles exceeded.\n");
}

#[test]
fn test_integer_loop_variable_rejects_fractional_step() {
    assert_eq!(
        run("10 FOR I%=1 TO 2 STEP 0.5\n20 NEXT I%\n"),
        "TYPE MISMATCH: INTEGER EXPECTED IN 10 (0.5)\n"
    );
    assert_eq!(run("10 FOR I%=6 TO 1 STEP -2.0:PRINT I%;:NEXT\n"), "642");
}
