use super::*;

#[test]
fn branches_forward() {
    let state = run(&[branch(Mnemonic::B, 2), mov_i(0, 1), mov_i(0, 2), mov_i(0, 3)], 2);

    assert_eq!(state.regs[0], 3);
}

#[test]
fn branches_backward() {
    let state = run(&[mov_i(0, 9), branch(Mnemonic::B, -2)], 2);

    assert_eq!(state.regs[constants::PC], constants::CODE_START);
}

#[test]
fn self_loop_stays_put() {
    let mut state = run(&[branch(Mnemonic::B, -1)], 1);
    assert_eq!(state.regs[constants::PC], constants::CODE_START);

    exec(&mut state, 5);
    assert_eq!(state.regs[constants::PC], constants::CODE_START);
}
