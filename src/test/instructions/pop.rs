use super::*;
use crate::sim::StepError;

#[test]
fn pops_last_pushed_value() {
    let state = run(&[mov_i(0, 42), push(0), pop(1)], 3);

    assert_eq!(state.regs[1], 42);
    assert_eq!(state.regs[constants::SP], constants::STACK_START);
}

#[test]
fn underflow_is_fatal() {
    let mut state = boot(&[pop(0)]);
    let mut console = ScriptedConsole::new(&[]);

    assert_eq!(
        step(&mut state, &mut console),
        Err(StepError::StackUnderflow {
            pc: 16,
            word: pop(0),
        })
    );
}
