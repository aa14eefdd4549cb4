//! Disassembler Tests.

use rv32sim_core::isa::disasm::disassemble;

use crate::common::builder::InstructionBuilder;

#[test]
fn r_type_renders_three_registers() {
    let word = InstructionBuilder::new().add(10, 11, 12).build();
    assert_eq!(disassemble(word).unwrap(), "add a0, a1, a2");
}

#[test]
fn i_type_renders_immediate() {
    let word = InstructionBuilder::new().addi(10, 0, 10).build();
    assert_eq!(disassemble(word).unwrap(), "addi a0, zero, 10");

    let word = InstructionBuilder::new().addi(5, 5, -1).build();
    assert_eq!(disassemble(word).unwrap(), "addi t0, t0, -1");
}

#[test]
fn loads_and_stores_render_offset_base() {
    let word = InstructionBuilder::new().lw(6, 2, 8).build();
    assert_eq!(disassemble(word).unwrap(), "lw t1, 8(sp)");

    let word = InstructionBuilder::new().sw(2, 6, -4).build();
    assert_eq!(disassemble(word).unwrap(), "sw t1, -4(sp)");
}

#[test]
fn branches_and_jumps_render_offsets() {
    let word = InstructionBuilder::new().beq(0, 0, -4).build();
    assert_eq!(disassemble(word).unwrap(), "beq zero, zero, -4");

    let word = InstructionBuilder::new().jal(1, 8).build();
    assert_eq!(disassemble(word).unwrap(), "jal ra, 8");

    let word = InstructionBuilder::new().jalr(0, 1, 0).build();
    assert_eq!(disassemble(word).unwrap(), "jalr zero, 0(ra)");
}

#[test]
fn lui_renders_upper_immediate_in_hex() {
    let word = InstructionBuilder::new().lui(5, 0x10000).build();
    assert_eq!(disassemble(word).unwrap(), "lui t0, 0x10000");
}

#[test]
fn unknown_word_is_an_error() {
    assert!(disassemble(0xFFFF_FFFF).is_err());
}
