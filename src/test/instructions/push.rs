use super::*;
use crate::sim::StepError;

#[test]
fn pushes_and_grows_down() {
    let state = run(&[mov_i(0, 42), push(0), mov_i(1, 43), push(1)], 4);

    assert_eq!(state.mem[8191], 42);
    assert_eq!(state.mem[8190], 43);
    assert_eq!(state.regs[constants::SP], 8189);
}

#[test]
fn overflow_is_fatal() {
    let mut state = boot(&[push(0)]);
    state.regs[constants::SP] = Word::max_value();
    let mut console = ScriptedConsole::new(&[]);

    assert_eq!(
        step(&mut state, &mut console),
        Err(StepError::StackOverflow {
            pc: 16,
            word: push(0),
        })
    );
}

#[test]
fn does_not_touch_flags() {
    let state = run(&[mov_i(0, 7), alu_r(Mnemonic::Sub, 1, 0, 0), push(0)], 3);

    assert!(state.flags.zero);
    assert!(state.flags.carry);
}
