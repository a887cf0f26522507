use super::*;

#[test]
fn shift_left() {
    let state = run(&[mov_i(0, 3), shft(1, 0, 2)], 2);

    assert_eq!(state.regs[1], 12);
    assert!(!state.flags.carry);
}

#[test]
fn shift_left_carries_out_bit_15() {
    let state = run(&[mov_i(0, 0), movt(0, 0x80), shft(1, 0, 1)], 3);

    assert_eq!(state.regs[1], 0);
    assert!(state.flags.zero);
    assert!(state.flags.carry);
}

#[test]
fn shift_right() {
    let state = run(&[mov_i(0, 12), shft(1, 0, -2)], 2);

    assert_eq!(state.regs[1], 3);
}

#[test]
fn shift_right_discards_low_bits() {
    let state = run(&[mov_i(0, 1), shft(1, 0, -1)], 2);

    assert_eq!(state.regs[1], 0);
    assert!(state.flags.zero);
    assert!(!state.flags.carry);
}

#[test]
fn shift_by_eight() {
    let state = run(&[mov_i(0, 0xAB), shft(1, 0, 8)], 2);

    assert_eq!(state.regs[1], 0xAB00);
}
