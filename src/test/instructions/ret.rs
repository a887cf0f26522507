use super::*;

#[test]
fn pops_the_program_counter() {
    // The call convention: compute the return address, push it, jump.
    let words = &[
        alu_i(Mnemonic::Add, 12, 15, 2), // r12 <- 19
        push(12),
        jmp(20),
        mov_i(0, 1), // return lands here (19)
        ret(),       // the "function" at 20
    ];
    let state = run(words, 5);

    assert_eq!(state.regs[0], 1);
    assert_eq!(state.regs[constants::PC], 20);
    assert_eq!(state.regs[constants::SP], constants::STACK_START);
}
