use super::*;

#[test]
fn taken_when_carry_set() {
    // 7 - 7 leaves carry set (no borrow).
    let state = run(
        &[
            mov_i(0, 7),
            alu_r(Mnemonic::Sub, 1, 0, 0),
            branch(Mnemonic::Bcs, 1),
            mov_i(2, 9),
            mov_i(2, 7),
        ],
        4,
    );

    assert_eq!(state.regs[2], 7);
}

#[test]
fn not_taken_when_carry_clear() {
    // 0 - 7 borrows, clearing carry.
    let state = run(
        &[
            mov_i(0, 7),
            alu_r(Mnemonic::Sub, 1, 1, 0),
            branch(Mnemonic::Bcs, 1),
            mov_i(2, 9),
        ],
        4,
    );

    assert_eq!(state.regs[2], 9);
}
