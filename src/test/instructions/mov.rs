use super::*;

#[test]
fn immediate_load() {
    let state = run(&[mov_i(3, 255)], 1);

    assert_eq!(state.regs[3], 255);
}

#[test]
fn immediate_load_leaves_flags_alone() {
    // Set Z and C first, then check an immediate mov does not touch them.
    let state = run(&[mov_i(0, 7), alu_r(Mnemonic::Sub, 1, 0, 0), mov_i(2, 5)], 3);

    assert_eq!(state.regs[2], 5);
    assert!(state.flags.zero);
    assert!(state.flags.carry);
}

#[test]
fn register_move_sets_zero_and_clears_carry() {
    let state = run(
        &[
            mov_i(0, 7),
            alu_r(Mnemonic::Sub, 1, 0, 0),
            mov_i(2, 0),
            mov_r(3, 2),
        ],
        4,
    );

    assert_eq!(state.regs[3], 0);
    assert!(state.flags.zero);
    assert!(!state.flags.carry);
    assert!(!state.flags.negative);
    assert!(!state.flags.overflow);
}

#[test]
fn register_move_sets_negative() {
    let state = run(&[mov_i(0, 0), movt(0, 0x80), mov_r(1, 0)], 3);

    assert_eq!(state.regs[1], 0x8000);
    assert!(state.flags.negative);
    assert!(!state.flags.zero);
}
