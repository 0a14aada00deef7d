use samasm::{Assembler, Error, Line, Preprocessor};

/// Run a source text through both stages and resolution.
fn assemble(src: &str) -> Result<Assembler, Error> {
    let lines: Vec<String> = src.lines().map(str::to_string).collect();
    let expanded = Preprocessor::new().process(&lines)?;
    let mut asm = Assembler::new();
    for (idx, line) in expanded.iter().enumerate() {
        if let Some(line) = Line::parse(idx + 1, line)? {
            asm.assemble(&line)?;
        }
    }
    asm.resolve()?;
    Ok(asm)
}

fn case(src: &str, expect: &[i32]) {
    println!("--- source");
    for line in src.lines() {
        println!("  | {line}");
    }
    let asm = assemble(src).unwrap();
    println!("--- image");
    for (idx, word) in asm.words().iter().enumerate() {
        println!("{idx:>3}: {word}");
    }
    assert_eq!(asm.words(), expect);
}

#[test]
fn straight_line_programs() {
    case("L1: SPACE\nADD L1\nSTOP", &[0, 1, 0, 14]);
    case("N1: CONST 7\nLOAD N1\nSTOP", &[7, 10, 0, 14]);
    case(
        "COPY A, B\nA: SPACE\nB: SPACE\nSTOP",
        &[9, 3, 4, 0, 0, 14],
    );
}

#[test]
fn forward_references_with_offsets() {
    case("ADD L2 + 3\nL2: SPACE\nSTOP", &[1, 5, 0, 14]);
    case(
        "JMP SKIP\nV: CONST 9\nSKIP: LOAD V + 1\nSTOP",
        &[5, 3, 9, 10, 3, 14],
    );
}

#[test]
fn reservations_divert_the_address_counter() {
    case("BUF: SPACE 3\nJMP END\nEND: STOP", &[0, 5, 6, 14]);
}

#[test]
fn macros_expand_before_assembly() {
    let src = "\
SWAP: MACRO A, B
COPY A, B ; whole-token substitution
ENDMACRO
SWAP X, Y
X: SPACE
Y: SPACE
STOP";
    case(src, &[9, 3, 4, 0, 0, 14]);
}

#[test]
fn two_macros_nest() {
    let src = "\
STEP: MACRO V
ADD V
ENDMACRO
TWICE: MACRO W
STEP W
STEP W
ENDMACRO
TWICE N
STOP
N: SPACE";
    case(src, &[1, 5, 1, 5, 14, 0]);
}

#[test]
fn case_and_comments_are_normalized_away() {
    case(
        " l1:  space ; data\n  add   L1\nstop ; end",
        &[0, 1, 0, 14],
    );
}

#[test]
fn error_programs() {
    assert!(matches!(
        assemble("X: SPACE\nX: SPACE\nSTOP").unwrap_err(),
        Error::DuplicateLabel { line: 2, .. }
    ));
    assert!(matches!(
        assemble("JMP NOWHERE\nSTOP").unwrap_err(),
        Error::UndefinedLabel { .. }
    ));
    assert!(matches!(
        assemble("ADD 5\nSTOP").unwrap_err(),
        Error::Syntax { line: 1, .. }
    ));
    assert!(matches!(
        assemble("ADD ?X\nSTOP").unwrap_err(),
        Error::Lexical { line: 1, .. }
    ));
    assert!(matches!(
        assemble("BUF: SPACE 216\nSTOP").unwrap_err(),
        Error::AddressSpaceExhausted { .. }
    ));
}
