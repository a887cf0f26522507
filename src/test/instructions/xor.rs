use super::*;

#[test]
fn xor_registers() {
    let state = run(&[mov_i(0, 0b1100), mov_i(1, 0b1010), alu_r(Mnemonic::Xor, 2, 0, 1)], 3);

    assert_eq!(state.regs[2], 0b0110);
}

#[test]
fn xor_with_self_clears() {
    let state = run(&[mov_i(0, 99), alu_r(Mnemonic::Xor, 0, 0, 0)], 2);

    assert_eq!(state.regs[0], 0);
    assert!(state.flags.zero);
}
