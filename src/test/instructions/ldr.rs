use super::*;

#[test]
fn loads_from_memory() {
    let mut state = boot(&[mov_i(1, 100), ldr(0, 1, 0)]);
    state.mem[100] = 0xBEEF;

    exec(&mut state, 2);
    assert_eq!(state.regs[0], 0xBEEF);
}

#[test]
fn negative_offset() {
    let mut state = boot(&[mov_i(1, 100), ldr(0, 1, -8)]);
    state.mem[92] = 42;

    exec(&mut state, 2);
    assert_eq!(state.regs[0], 42);
}

#[test]
fn address_wraps_to_memory_size() {
    let mut state = boot(&[mov_i(1, 0), movt(1, 0x40), ldr(0, 1, 0)]);
    state.mem[0] = 7;

    // 0x4000 is one past the last memory word, so the access wraps to 0.
    exec(&mut state, 3);
    assert_eq!(state.regs[0], 7);
}

#[test]
fn keyboard_port_reads_console() {
    let mut state = boot(&[mov_i(1, 2), ldr(0, 1, 0), ldr(3, 1, 0)]);
    state.mem[2] = 0x7777;
    let mut console = ScriptedConsole::new(&[65]);

    for _ in 0..3 {
        step(&mut state, &mut console).unwrap();
    }

    // The port bypasses memory; an exhausted queue reads as 0.
    assert_eq!(state.regs[0], 65);
    assert_eq!(state.regs[3], 0);
}

#[test]
fn does_not_touch_flags() {
    let mut state = boot(&[mov_i(0, 7), alu_r(Mnemonic::Sub, 1, 0, 0), ldr(2, 0, 0)]);

    exec(&mut state, 3);
    assert!(state.flags.zero);
    assert!(state.flags.carry);
}
