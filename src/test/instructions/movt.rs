use super::*;

#[test]
fn sets_high_byte_and_keeps_low() {
    let state = run(&[mov_i(0, 0x34), movt(0, 0x12)], 2);

    assert_eq!(state.regs[0], 0x1234);
}

#[test]
fn does_not_touch_flags() {
    let state = run(&[mov_i(0, 7), alu_r(Mnemonic::Sub, 1, 0, 0), movt(2, 0xFF)], 3);

    assert_eq!(state.regs[2], 0xFF00);
    assert!(state.flags.zero);
    assert!(state.flags.carry);
}
