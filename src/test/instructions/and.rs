use super::*;

#[test]
fn and_registers() {
    let state = run(&[mov_i(0, 0b1100), mov_i(1, 0b1010), alu_r(Mnemonic::And, 2, 0, 1)], 3);

    assert_eq!(state.regs[2], 0b1000);
    assert!(!state.flags.zero);
    assert!(!state.flags.carry);
    assert!(!state.flags.overflow);
}

#[test]
fn disjoint_bits_set_zero() {
    let state = run(&[mov_i(0, 0b0101), mov_i(1, 0b1010), alu_r(Mnemonic::And, 2, 0, 1)], 3);

    assert_eq!(state.regs[2], 0);
    assert!(state.flags.zero);
}
