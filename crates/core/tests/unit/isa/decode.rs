//! Decoder Tests.
//!
//! Verifies category classification, register field extraction, and the
//! sign-extended immediate assembly for every instruction format.

use rv32sim_core::common::SimError;
use rv32sim_core::isa::decode::decode;
use rv32sim_core::isa::{Category, Mnemonic};

use crate::common::builder::InstructionBuilder;

#[test]
fn classifies_r_type_by_full_triple() {
    let d = decode(InstructionBuilder::new().add(7, 5, 6).build()).unwrap();
    assert_eq!(d.category, Category::R);
    assert_eq!(d.mnemonic, Mnemonic::Add);
    assert_eq!((d.rd, d.rs1, d.rs2), (7, 5, 6));
    assert_eq!(d.imm, 0);

    let d = decode(InstructionBuilder::new().sub(7, 5, 6).build()).unwrap();
    assert_eq!(d.mnemonic, Mnemonic::Sub);

    let d = decode(InstructionBuilder::new().mul(7, 5, 6).build()).unwrap();
    assert_eq!(d.mnemonic, Mnemonic::Mul);
}

#[test]
fn i_type_immediate_sign_extends() {
    let d = decode(InstructionBuilder::new().addi(5, 0, -1).build()).unwrap();
    assert_eq!(d.category, Category::I);
    assert_eq!(d.imm, -1);

    let d = decode(InstructionBuilder::new().addi(5, 0, 2047).build()).unwrap();
    assert_eq!(d.imm, 2047);

    let d = decode(InstructionBuilder::new().addi(5, 0, -2048).build()).unwrap();
    assert_eq!(d.imm, -2048);
}

#[test]
fn shift_immediates_disambiguate_on_funct7() {
    let d = decode(InstructionBuilder::new().srli(5, 6, 3).build()).unwrap();
    assert_eq!(d.mnemonic, Mnemonic::Srli);

    let d = decode(InstructionBuilder::new().srai(5, 6, 3).build()).unwrap();
    assert_eq!(d.mnemonic, Mnemonic::Srai);
    assert_eq!(d.imm & 0x1F, 3);

    let d = decode(InstructionBuilder::new().slli(5, 6, 31).build()).unwrap();
    assert_eq!(d.mnemonic, Mnemonic::Slli);
}

#[test]
fn s_type_immediate_reassembles_split_fields() {
    let d = decode(InstructionBuilder::new().sw(5, 6, -4).build()).unwrap();
    assert_eq!(d.category, Category::S);
    assert_eq!(d.imm, -4);
    assert_eq!((d.rs1, d.rs2), (5, 6));

    let d = decode(InstructionBuilder::new().sb(5, 6, 2047).build()).unwrap();
    assert_eq!(d.imm, 2047);
}

#[test]
fn sb_type_immediate_is_even_and_signed() {
    let d = decode(InstructionBuilder::new().beq(5, 6, -4).build()).unwrap();
    assert_eq!(d.category, Category::SB);
    assert_eq!(d.imm, -4);

    let d = decode(InstructionBuilder::new().bne(5, 6, 4094).build()).unwrap();
    assert_eq!(d.imm, 4094);

    let d = decode(InstructionBuilder::new().blt(5, 6, -4096).build()).unwrap();
    assert_eq!(d.imm, -4096);
}

#[test]
fn u_type_immediate_is_preshifted() {
    let d = decode(InstructionBuilder::new().lui(5, 0x10000).build()).unwrap();
    assert_eq!(d.category, Category::U);
    assert_eq!(d.imm as u32, 0x1000_0000);

    let d = decode(InstructionBuilder::new().auipc(5, 0xFFFFF).build()).unwrap();
    assert_eq!(d.imm as u32, 0xFFFF_F000);
}

#[test]
fn uj_type_immediate_reassembles_scrambled_fields() {
    let d = decode(InstructionBuilder::new().jal(1, 8).build()).unwrap();
    assert_eq!(d.category, Category::UJ);
    assert_eq!(d.imm, 8);

    let d = decode(InstructionBuilder::new().jal(1, -16).build()).unwrap();
    assert_eq!(d.imm, -16);

    let d = decode(InstructionBuilder::new().jal(0, 0xFF000).build()).unwrap();
    assert_eq!(d.imm, 0xFF000);
}

#[test]
fn jalr_is_i_type_control() {
    let d = decode(InstructionBuilder::new().jalr(1, 5, 0).build()).unwrap();
    assert_eq!(d.category, Category::I);
    assert_eq!(d.mnemonic, Mnemonic::Jalr);
}

#[test]
fn unknown_word_is_a_decode_fault() {
    // Opcode 0x7F matches no rule.
    assert_eq!(decode(0x0000_007F), Err(SimError::DecodeFault(0x0000_007F)));
    // All-zero word matches no rule either.
    assert_eq!(decode(0), Err(SimError::DecodeFault(0)));
}

#[test]
fn ld_classifies_but_is_marked_unsupported() {
    let d = decode(InstructionBuilder::new().ld(5, 6, 0).build()).unwrap();
    assert_eq!(d.mnemonic, Mnemonic::Ld);
    assert_eq!(d.category, Category::I);
}

#[test]
fn category_operand_usage() {
    assert!(Category::R.uses_rs1() && Category::R.uses_rs2() && Category::R.writes_rd());
    assert!(Category::I.uses_rs1() && !Category::I.uses_rs2() && Category::I.writes_rd());
    assert!(Category::S.uses_rs2() && !Category::S.writes_rd());
    assert!(Category::SB.uses_rs2() && !Category::SB.writes_rd());
    assert!(!Category::U.uses_rs1() && Category::U.writes_rd());
    assert!(!Category::UJ.uses_rs1() && Category::UJ.writes_rd());
}
