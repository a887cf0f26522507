use super::*;

#[test]
fn taken_when_negative_without_overflow() {
    // 1 - 2 is negative with V clear, so N != V.
    let state = run(
        &[
            mov_i(0, 1),
            alu_i(Mnemonic::Sub, 1, 0, 2),
            branch(Mnemonic::Blt, 1),
            mov_i(2, 9),
            mov_i(2, 7),
        ],
        4,
    );

    assert_eq!(state.regs[2], 7);
}

#[test]
fn taken_when_overflow_without_negative() {
    // -32768 - 1 overflows to 0x7FFF: V set, N clear.
    let state = run(
        &[
            mov_i(0, 0),
            movt(0, 0x80),
            alu_i(Mnemonic::Sub, 1, 0, 1),
            branch(Mnemonic::Blt, 1),
            mov_i(2, 9),
            mov_i(2, 7),
        ],
        5,
    );

    assert_eq!(state.regs[2], 7);
}

#[test]
fn not_taken_when_not_less() {
    let state = run(
        &[
            mov_i(0, 5),
            alu_i(Mnemonic::Sub, 1, 0, 2),
            branch(Mnemonic::Blt, 1),
            mov_i(2, 9),
        ],
        4,
    );

    assert_eq!(state.regs[2], 9);
}
