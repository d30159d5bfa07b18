use apex_core::common::error::SimError;
use apex_core::core::cpu::memory::{CodeMemory, DataMemory};

use crate::common::builder::instruction::{halt, movc};

fn code() -> CodeMemory {
    CodeMemory::new(4000, vec![movc(1, 5), movc(2, 6), halt()])
}

#[test]
fn fetch_maps_pc_to_index() {
    let code = code();
    assert_eq!(code.fetch(4000).unwrap(), movc(1, 5));
    assert_eq!(code.fetch(4004).unwrap(), movc(2, 6));
    assert_eq!(code.fetch(4008).unwrap(), halt());
    assert_eq!(code.end(), 4012);
}

#[test]
fn fetch_outside_program_fails() {
    let code = code();
    for pc in [3996, 4012, -4, 0] {
        assert!(
            matches!(code.fetch(pc), Err(SimError::PcOutOfRange { pc: got, base: 4000, end: 4012 }) if got == pc),
            "pc {pc}"
        );
    }
}

#[test]
fn fetch_misaligned_fails() {
    assert!(matches!(
        code().fetch(4002),
        Err(SimError::MisalignedPc { pc: 4002 })
    ));
}

#[test]
fn data_memory_bounds() {
    let mut mem = DataMemory::new(16);
    mem.write(4000, 15, 7).unwrap();
    assert_eq!(mem.read(4000, 15).unwrap(), 7);

    assert!(matches!(
        mem.read(4004, 16),
        Err(SimError::MemoryOutOfRange {
            pc: 4004,
            address: 16,
            size: 16
        })
    ));
    assert!(matches!(
        mem.write(4008, -1, 1),
        Err(SimError::MemoryOutOfRange { address: -1, .. })
    ));
    assert_eq!(mem.as_slice()[15], 7);
}

#[test]
fn peek_and_poke() {
    let mut mem = DataMemory::new(4);
    mem.poke(2, -9).unwrap();
    assert_eq!(mem.peek(2), Some(-9));
    assert_eq!(mem.peek(4), None);
    assert!(mem.poke(4, 1).is_err());
}
