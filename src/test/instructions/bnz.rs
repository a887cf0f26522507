use super::*;

#[test]
fn taken_when_nonzero() {
    let state = run(
        &[
            mov_i(0, 1),
            alu_i(Mnemonic::Add, 1, 0, 1),
            branch(Mnemonic::Bnz, 1),
            mov_i(2, 9),
            mov_i(2, 7),
        ],
        4,
    );

    assert_eq!(state.regs[2], 7);
}

#[test]
fn not_taken_when_zero() {
    let state = run(
        &[
            mov_i(0, 1),
            alu_r(Mnemonic::Sub, 1, 0, 0),
            branch(Mnemonic::Bnz, 1),
            mov_i(2, 9),
        ],
        4,
    );

    assert_eq!(state.regs[2], 9);
}
