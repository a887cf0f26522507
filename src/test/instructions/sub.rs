use super::*;

#[test]
fn sub_registers() {
    let state = run(&[mov_i(0, 64), mov_i(1, 42), alu_r(Mnemonic::Sub, 2, 0, 1)], 3);

    assert_eq!(state.regs[2], 22);
    assert!(state.flags.carry);
    assert!(!state.flags.zero);
    assert!(!state.flags.negative);
}

#[test]
fn equal_operands_set_zero_and_carry() {
    let state = run(&[mov_i(0, 7), alu_r(Mnemonic::Sub, 1, 0, 0)], 2);

    assert_eq!(state.regs[1], 0);
    assert!(state.flags.zero);
    assert!(state.flags.carry);
}

#[test]
fn borrow_clears_carry_and_sets_negative() {
    let state = run(&[mov_i(0, 3), alu_i(Mnemonic::Sub, 1, 0, 5)], 2);

    assert_eq!(state.regs[1], 0xFFFE);
    assert!(!state.flags.carry);
    assert!(state.flags.negative);
    assert!(!state.flags.overflow);
}

#[test]
fn signed_overflow_sets_v() {
    let state = run(&[mov_i(0, 0), movt(0, 0x80), alu_i(Mnemonic::Sub, 1, 0, 1)], 3);

    assert_eq!(state.regs[1], 0x7FFF);
    assert!(!state.flags.negative);
    assert!(state.flags.overflow);
}
