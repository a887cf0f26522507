use super::*;

#[test]
fn jumps_to_absolute_address() {
    let state = run(&[jmp(20), mov_i(0, 1), mov_i(0, 2), mov_i(0, 3), mov_i(0, 4)], 2);

    assert_eq!(state.regs[0], 4);
    assert_eq!(state.regs[constants::PC], 21);
}

#[test]
fn jump_to_self_holds_pc() {
    let state = run(&[jmp(16)], 3);

    assert_eq!(state.regs[constants::PC], constants::CODE_START);
}
