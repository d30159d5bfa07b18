use std::io::Write;

use apex_core::common::error::LoadError;
use apex_core::isa::Opcode;
use apex_core::sim::loader::{load_program, parse_program};
use pretty_assertions::assert_eq;

use crate::common::builder::instruction::*;

#[test]
fn parses_every_operand_layout() {
    let source = "\
ADD,R3,R1,R2
ADDL,R4,R3,#-12
STORE,R2,R1,#8
MOVC,R1,#4000
CML,R7,#0
CMP,R1,R2
BNZ,#-8
JALR,R6,R5,#0
HALT
";
    let program = parse_program(source, 16).unwrap();
    assert_eq!(
        program,
        vec![
            add(3, 1, 2),
            addl(4, 3, -12),
            store(2, 1, 8),
            movc(1, 4000),
            cml(7, 0),
            cmp(1, 2),
            branch(Opcode::Bnz, -8),
            jalr(6, 5, 0),
            halt(),
        ]
    );
}

#[test]
fn accepts_spaces_case_and_comments() {
    let source = "
        ; a comment line
        movc r1, #5      // trailing comment
        MOVC,R2,#10 ; another

        add R3 R1 R2
        halt
    ";
    let program = parse_program(source, 16).unwrap();
    assert_eq!(program, vec![movc(1, 5), movc(2, 10), add(3, 1, 2), halt()]);
}

#[test]
fn errors_carry_line_numbers() {
    let source = "MOVC,R1,#1\nFROB,R1\n";
    assert!(matches!(
        parse_program(source, 16),
        Err(LoadError::UnknownOpcode { line: 2, ref mnemonic }) if mnemonic == "FROB"
    ));

    let source = "MOVC,R1,#1\n\nADD,R1,R2\n";
    assert!(matches!(
        parse_program(source, 16),
        Err(LoadError::OperandCount {
            line: 3,
            mnemonic: "ADD",
            expected: 3,
            found: 2
        })
    ));
}

#[test]
fn malformed_operands() {
    assert!(matches!(
        parse_program("MOVC,X1,#1", 16),
        Err(LoadError::MalformedRegister { line: 1, .. })
    ));
    assert!(matches!(
        parse_program("MOVC,R1,5", 16),
        Err(LoadError::MalformedImmediate { line: 1, .. })
    ));
    assert!(matches!(
        parse_program("MOVC,R1,#five", 16),
        Err(LoadError::MalformedImmediate { .. })
    ));
}

#[test]
fn register_beyond_file_is_rejected() {
    assert!(matches!(
        parse_program("MOVC,R8,#1", 8),
        Err(LoadError::RegisterOutOfRange {
            line: 1,
            index: 8,
            count: 8
        })
    ));
    assert!(parse_program("MOVC,R7,#1", 8).is_ok());
}

#[test]
fn blank_source_is_empty_program() {
    assert!(matches!(
        parse_program("\n ; nothing\n", 16),
        Err(LoadError::EmptyProgram)
    ));
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "MOVC,R1,#5").unwrap();
    writeln!(file, "HALT").unwrap();
    let program = load_program(file.path(), 16).unwrap();
    assert_eq!(program, vec![movc(1, 5), halt()]);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.asm");
    match load_program(&path, 16) {
        Err(LoadError::Io { path: got, .. }) => assert_eq!(got, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}
