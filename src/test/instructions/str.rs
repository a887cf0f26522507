use super::*;

#[test]
fn stores_to_memory() {
    let state = run(&[mov_i(0, 0xAB), mov_i(1, 100), str(0, 1, 3)], 3);

    assert_eq!(state.mem[103], 0xAB);
}

#[test]
fn character_port_writes_console_not_memory() {
    let mut state = boot(&[mov_i(0, 72), mov_i(1, 7), str(0, 1, 0)]);
    let mut console = ScriptedConsole::new(&[]);

    for _ in 0..3 {
        step(&mut state, &mut console).unwrap();
    }

    assert_eq!(console.output, "H");
    assert_eq!(state.mem[7], 0);
}

#[test]
fn newline_port_emits_newline_only_for_one() {
    let mut state = boot(&[mov_i(0, 1), mov_i(1, 8), str(0, 1, 0), mov_i(0, 2), str(0, 1, 0)]);
    let mut console = ScriptedConsole::new(&[]);

    for _ in 0..5 {
        step(&mut state, &mut console).unwrap();
    }

    // Writing 1 goes to the console; any other value is a plain store.
    assert_eq!(console.output, "\n");
    assert_eq!(state.mem[8], 2);
}

#[test]
fn effective_address_uses_base_plus_offset() {
    let state = run(&[mov_i(0, 65), mov_i(1, 9), str(0, 1, -2)], 3);

    // Address 7 is the character port even when reached via an offset.
    assert_eq!(state.mem[7], 0);
}
