use super::*;

#[test]
fn add_registers() {
    let state = run(&[mov_i(0, 42), mov_i(1, 64), alu_r(Mnemonic::Add, 2, 0, 1)], 3);

    assert_eq!(state.regs[2], 106);
    assert!(!state.flags.zero);
    assert!(!state.flags.carry);
    assert!(!state.flags.negative);
    assert!(!state.flags.overflow);
}

#[test]
fn add_immediate() {
    let state = run(&[mov_i(0, 10), alu_i(Mnemonic::Add, 0, 0, 15)], 2);

    assert_eq!(state.regs[0], 25);
}

#[test]
fn unsigned_wrap_sets_carry_and_zero() {
    let state = run(
        &[
            mov_i(0, 0xFF),
            movt(0, 0xFF),
            alu_i(Mnemonic::Add, 1, 0, 1),
        ],
        3,
    );

    assert_eq!(state.regs[1], 0);
    assert!(state.flags.zero);
    assert!(state.flags.carry);
    assert!(!state.flags.negative);
    assert!(!state.flags.overflow);
}

#[test]
fn signed_overflow_sets_v() {
    let state = run(&[mov_i(0, 0xFF), movt(0, 0x7F), alu_i(Mnemonic::Add, 1, 0, 1)], 3);

    assert_eq!(state.regs[1], 0x8000);
    assert!(!state.flags.carry);
    assert!(state.flags.negative);
    assert!(state.flags.overflow);
}

#[test]
fn pc_operand_reads_incremented_value() {
    // The call sequence emitted by the C front end depends on r2 seeing
    // the already-advanced program counter.
    let state = run(&[alu_i(Mnemonic::Add, 12, 15, 2)], 1);

    assert_eq!(state.regs[12], 19);
}

#[test]
fn value_register_is_sampled_before_pc_advances() {
    let state = run(&[alu_r(Mnemonic::Add, 0, 0, 15)], 1);

    assert_eq!(state.regs[0], 16);
}
