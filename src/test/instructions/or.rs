use super::*;

#[test]
fn or_registers() {
    let state = run(&[mov_i(0, 0b1100), mov_i(1, 0b1010), alu_r(Mnemonic::Or, 2, 0, 1)], 3);

    assert_eq!(state.regs[2], 0b1110);
    assert!(!state.flags.zero);
    assert!(!state.flags.carry);
}

#[test]
fn negative_flag_follows_bit_15() {
    let state = run(&[mov_i(0, 0), movt(0, 0x80), mov_i(1, 1), alu_r(Mnemonic::Or, 2, 0, 1)], 4);

    assert_eq!(state.regs[2], 0x8001);
    assert!(state.flags.negative);
}
