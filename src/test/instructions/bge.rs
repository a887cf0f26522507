use super::*;

#[test]
fn taken_when_greater() {
    let state = run(
        &[
            mov_i(0, 5),
            alu_i(Mnemonic::Sub, 1, 0, 2),
            branch(Mnemonic::Bge, 1),
            mov_i(2, 9),
            mov_i(2, 7),
        ],
        4,
    );

    assert_eq!(state.regs[2], 7);
}

#[test]
fn taken_when_equal() {
    let state = run(
        &[
            mov_i(0, 2),
            alu_i(Mnemonic::Sub, 1, 0, 2),
            branch(Mnemonic::Bge, 1),
            mov_i(2, 9),
            mov_i(2, 7),
        ],
        4,
    );

    assert_eq!(state.regs[2], 7);
}

#[test]
fn not_taken_when_less() {
    let state = run(
        &[
            mov_i(0, 1),
            alu_i(Mnemonic::Sub, 1, 0, 2),
            branch(Mnemonic::Bge, 1),
            mov_i(2, 9),
        ],
        4,
    );

    assert_eq!(state.regs[2], 9);
}
