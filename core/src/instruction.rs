use crate::error::Result;
use crate::machine::Machine;
use crate::opcode::Opcode;
use crate::operations::*;

/// An operation reads its operands out of the opcode and applies itself to the machine
pub type Instruction = fn(op: &dyn Opcode, machine: &mut Machine) -> Result<()>;

/// Selects the correct Instruction for a given Opcode, if there is one
pub fn from_op(op: &dyn Opcode) -> Option<Instruction> {
    let instruction: Instruction = match op.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => clr,
        (0x0, 0x0, 0xE, 0xE) => rts,
        (0x1, ..) => jump,
        (0x2, ..) => call,
        (0x3, ..) => ske,
        (0x4, ..) => skne,
        (0x5, .., 0x0) => skre,
        (0x6, ..) => load,
        (0x7, ..) => add,
        (0x8, .., 0x0) => mv,
        (0x8, .., 0x1) => or,
        (0x8, .., 0x2) => and,
        (0x8, .., 0x3) => xor,
        (0x8, .., 0x4) => addr,
        (0x8, .., 0x5) => sub,
        (0x8, .., 0x6) => shr,
        (0x8, .., 0x7) => subn,
        (0x8, .., 0xE) => shl,
        (0x9, .., 0x0) => skrne,
        (0xA, ..) => loadi,
        (0xB, ..) => jumpi,
        (0xC, ..) => rand,
        (0xD, ..) => draw,
        (0xE, _, 0x9, 0xE) => skpr,
        (0xE, _, 0xA, 0x1) => skup,
        (0xF, _, 0x0, 0x7) => get_delay,
        (0xF, _, 0x0, 0xA) => keyd,
        (0xF, _, 0x1, 0x5) => set_delay,
        (0xF, _, 0x1, 0x8) => set_sound,
        (0xF, _, 0x1, 0xE) => addi,
        (0xF, _, 0x2, 0x9) => ldspr,
        (0xF, _, 0x3, 0x3) => bcd,
        (0xF, _, 0x5, 0x5) => stor,
        (0xF, _, 0x6, 0x5) => read,
        _ => return None,
    };
    Some(instruction)
}

#[cfg(test)]
mod test_instruction {
    use super::*;
    use crate::constants::SPRITE_SHEET;
    use crate::error::Error;
    use crate::keypad::KeyState;

    /// Places `op` at the pc and steps over it
    fn run(machine: &mut Machine, op: u16) -> Result<()> {
        let pc = machine.state.pc as usize;
        machine.state.memory[pc..pc + 2].copy_from_slice(&op.to_be_bytes());
        machine.step()
    }

    fn lit(machine: &Machine) -> usize {
        machine.video.pixels().iter().flatten().filter(|&&p| p == 1).count()
    }

    #[test]
    fn test_unknown_opcodes_are_rejected() {
        for op in [0x0123u16, 0x00E1, 0x5121, 0x800F, 0x9121, 0xE1A2, 0xF1FF].iter() {
            assert!(from_op(op).is_none(), "{:04X} should not decode", op);
        }
    }

    #[test]
    fn test_00e0_cls() {
        let mut machine = Machine::new();
        machine.video.pixels_mut()[0][0] = 1;
        run(&mut machine, 0x00E0).unwrap();
        assert_eq!(machine.video.pixels()[0][0], 0);
    }

    #[test]
    fn test_00ee_ret() {
        let mut machine = Machine::new();
        machine.state.sp = 0x1;
        machine.state.stack[0] = 0x0ABC;
        run(&mut machine, 0x00EE).unwrap();
        assert_eq!(machine.state.sp, 0x0);
        assert_eq!(machine.state.pc, 0x0ABC);
    }

    #[test]
    fn test_00ee_ret_with_empty_stack() {
        let mut machine = Machine::new();
        run(&mut machine, 0x00E0).unwrap();
        let result = run(&mut machine, 0x00EE);
        assert!(matches!(result, Err(Error::StackUnderflow { pc: 0x202 })));
        assert_eq!(machine.state.sp, 0);
        assert_eq!(machine.state.pc, 0x204);
    }

    #[test]
    fn test_1nnn_jp() {
        let mut machine = Machine::new();
        run(&mut machine, 0x1ABC).unwrap();
        assert_eq!(machine.state.pc, 0x0ABC);
    }

    #[test]
    fn test_2nnn_call() {
        let mut machine = Machine::new();
        machine.state.pc = 0x0ABC;
        run(&mut machine, 0x2123).unwrap();
        assert_eq!(machine.state.sp, 0x1);
        assert_eq!(machine.state.stack[0], 0x0ABE);
        assert_eq!(machine.state.pc, 0x0123);
    }

    #[test]
    fn test_2nnn_call_then_return() {
        let mut machine = Machine::new();
        run(&mut machine, 0x2400).unwrap();
        run(&mut machine, 0x00EE).unwrap();
        assert_eq!(machine.state.pc, 0x0202);
        assert_eq!(machine.state.sp, 0);
    }

    #[test]
    fn test_2nnn_call_with_full_stack() {
        let mut machine = Machine::new();
        for _ in 0..12 {
            let pc = machine.state.pc;
            run(&mut machine, 0x2000 | (pc + 0x2)).unwrap();
        }
        assert_eq!(machine.state.sp, 12);
        let result = run(&mut machine, 0x2300);
        assert!(matches!(result, Err(Error::StackOverflow { .. })));
        assert_eq!(machine.state.sp, 12);
    }

    #[test]
    fn test_3xnn_se_skips() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 0x11;
        run(&mut machine, 0x3111).unwrap();
        assert_eq!(machine.state.pc, 0x0204);
    }

    #[test]
    fn test_3xnn_se_doesnt_skip() {
        let mut machine = Machine::new();
        run(&mut machine, 0x3111).unwrap();
        assert_eq!(machine.state.pc, 0x0202);
    }

    #[test]
    fn test_4xnn_sne_skips() {
        let mut machine = Machine::new();
        run(&mut machine, 0x4111).unwrap();
        assert_eq!(machine.state.pc, 0x0204);
    }

    #[test]
    fn test_4xnn_sne_doesnt_skip() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 0x11;
        run(&mut machine, 0x4111).unwrap();
        assert_eq!(machine.state.pc, 0x0202);
    }

    #[test]
    fn test_5xy0_se_skips() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 0x11;
        machine.state.v[0x2] = 0x11;
        run(&mut machine, 0x5120).unwrap();
        assert_eq!(machine.state.pc, 0x0204);
    }

    #[test]
    fn test_5xy0_se_doesnt_skip() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 0x11;
        run(&mut machine, 0x5120).unwrap();
        assert_eq!(machine.state.pc, 0x0202);
    }

    #[test]
    fn test_6xnn_ld_every_register_and_byte() {
        let mut machine = Machine::new();
        for x in 0..16u16 {
            for nn in 0..=255u16 {
                machine.state.pc = 0x200;
                run(&mut machine, 0x6000 | x << 8 | nn).unwrap();
                assert_eq!(machine.state.v[x as usize], nn as u8);
            }
        }
    }

    #[test]
    fn test_7xnn_add_wraps() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 0xFF;
        run(&mut machine, 0x7102).unwrap();
        assert_eq!(machine.state.v[0x1], 0x01);
        assert_eq!(machine.state.v[0xF], 0x00);
    }

    #[test]
    fn test_8xy0_ld() {
        let mut machine = Machine::new();
        machine.state.v[0x2] = 0x42;
        run(&mut machine, 0x8120).unwrap();
        assert_eq!(machine.state.v[0x1], 0x42);
    }

    #[test]
    fn test_8xy1_or() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 0x6;
        machine.state.v[0x2] = 0x3;
        run(&mut machine, 0x8121).unwrap();
        assert_eq!(machine.state.v[0x1], 0x7);
    }

    #[test]
    fn test_8xy2_and() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 0x6;
        machine.state.v[0x2] = 0x3;
        run(&mut machine, 0x8122).unwrap();
        assert_eq!(machine.state.v[0x1], 0x2);
    }

    #[test]
    fn test_8xy3_xor() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 0x6;
        machine.state.v[0x2] = 0x3;
        run(&mut machine, 0x8123).unwrap();
        assert_eq!(machine.state.v[0x1], 0x5);
    }

    #[test]
    fn test_8xy4_add_carries() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 250;
        machine.state.v[0x2] = 10;
        run(&mut machine, 0x8124).unwrap();
        assert_eq!(machine.state.v[0x1], 4);
        assert_eq!(machine.state.v[0xF], 1);
    }

    #[test]
    fn test_8xy4_add_doesnt_carry() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 10;
        machine.state.v[0x2] = 5;
        machine.state.v[0xF] = 1;
        run(&mut machine, 0x8124).unwrap();
        assert_eq!(machine.state.v[0x1], 15);
        assert_eq!(machine.state.v[0xF], 0);
    }

    #[test]
    fn test_8xy5_sub_borrows() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 5;
        machine.state.v[0x2] = 10;
        run(&mut machine, 0x8125).unwrap();
        assert_eq!(machine.state.v[0x1], 251);
        assert_eq!(machine.state.v[0xF], 0);
    }

    #[test]
    fn test_8xy5_sub_doesnt_borrow() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 10;
        machine.state.v[0x2] = 5;
        run(&mut machine, 0x8125).unwrap();
        assert_eq!(machine.state.v[0x1], 5);
        assert_eq!(machine.state.v[0xF], 1);
    }

    #[test]
    fn test_8xy5_sub_equal_operands() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 7;
        machine.state.v[0x2] = 7;
        run(&mut machine, 0x8125).unwrap();
        assert_eq!(machine.state.v[0x1], 0);
        assert_eq!(machine.state.v[0xF], 1);
    }

    #[test]
    fn test_8xy6_shr_shifts_vy() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 0xF0;
        machine.state.v[0x2] = 0x05;
        run(&mut machine, 0x8126).unwrap();
        assert_eq!(machine.state.v[0x1], 0x02);
        assert_eq!(machine.state.v[0x2], 0x05);
        assert_eq!(machine.state.v[0xF], 0x1);
    }

    #[test]
    fn test_8fy4_flag_wins() {
        let mut machine = Machine::new();
        machine.state.v[0xF] = 250;
        machine.state.v[0x1] = 10;
        run(&mut machine, 0x8F14).unwrap();
        assert_eq!(machine.state.v[0xF], 1);
    }

    #[test]
    fn test_8fy5_result_wins() {
        let mut machine = Machine::new();
        machine.state.v[0xF] = 10;
        machine.state.v[0x1] = 5;
        run(&mut machine, 0x8F15).unwrap();
        assert_eq!(machine.state.v[0xF], 5);
    }

    #[test]
    fn test_8fy6_result_wins() {
        let mut machine = Machine::new();
        machine.state.v[0xF] = 0xFF;
        machine.state.v[0x1] = 0x05;
        run(&mut machine, 0x8F16).unwrap();
        assert_eq!(machine.state.v[0xF], 0x02);
    }

    #[test]
    fn test_8xy7_subn() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 5;
        machine.state.v[0x2] = 10;
        run(&mut machine, 0x8127).unwrap();
        assert_eq!(machine.state.v[0x1], 5);
        assert_eq!(machine.state.v[0xF], 1);
    }

    #[test]
    fn test_8xy7_subn_borrows() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 10;
        machine.state.v[0x2] = 5;
        run(&mut machine, 0x8127).unwrap();
        assert_eq!(machine.state.v[0x1], 251);
        assert_eq!(machine.state.v[0xF], 0);
    }

    #[test]
    fn test_8xye_shl_shifts_vy() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 0x01;
        machine.state.v[0x2] = 0x81;
        run(&mut machine, 0x812E).unwrap();
        assert_eq!(machine.state.v[0x1], 0x02);
        assert_eq!(machine.state.v[0x2], 0x81);
        assert_eq!(machine.state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xye_shl_without_carry() {
        let mut machine = Machine::new();
        machine.state.v[0x2] = 0x41;
        run(&mut machine, 0x812E).unwrap();
        assert_eq!(machine.state.v[0x1], 0x82);
        assert_eq!(machine.state.v[0xF], 0x0);
    }

    #[test]
    fn test_9xy0_sne_skips() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 0x11;
        run(&mut machine, 0x9120).unwrap();
        assert_eq!(machine.state.pc, 0x0204);
    }

    #[test]
    fn test_9xy0_sne_doesnt_skip() {
        let mut machine = Machine::new();
        run(&mut machine, 0x9120).unwrap();
        assert_eq!(machine.state.pc, 0x0202);
    }

    #[test]
    fn test_annn_ld() {
        let mut machine = Machine::new();
        run(&mut machine, 0xA123).unwrap();
        assert_eq!(machine.state.i, 0x0123);
    }

    #[test]
    fn test_bnnn_jp() {
        let mut machine = Machine::new();
        machine.state.v[0x0] = 0x10;
        run(&mut machine, 0xB300).unwrap();
        assert_eq!(machine.state.pc, 0x0310);
    }

    #[test]
    fn test_cxnn_rand_is_masked() {
        let mut machine = Machine::new();
        for _ in 0..64 {
            machine.state.pc = 0x200;
            run(&mut machine, 0xC10F).unwrap();
            assert_eq!(machine.state.v[0x1] & 0xF0, 0);
        }
        machine.state.pc = 0x200;
        run(&mut machine, 0xC100).unwrap();
        assert_eq!(machine.state.v[0x1], 0);
    }

    #[test]
    fn test_dxyn_drw() {
        let mut machine = Machine::new();
        // glyph for 0 lives at address 0
        machine.state.v[0x1] = 2;
        machine.state.v[0x2] = 3;
        run(&mut machine, 0xD125).unwrap();
        assert_eq!(machine.video.pixels()[3][2..6], [1, 1, 1, 1]);
        assert_eq!(machine.video.pixels()[4][2..6], [1, 0, 0, 1]);
        assert_eq!(lit(&machine), 14);
        assert_eq!(machine.state.v[0xF], 0);
    }

    #[test]
    fn test_dxyn_drw_twice_restores_frame() {
        let mut machine = Machine::new();
        machine.video.pixels_mut()[10][40] = 1;
        machine.state.v[0x1] = 38;
        machine.state.v[0x2] = 8;
        machine.state.i = 5 * 0x8;
        run(&mut machine, 0xD125).unwrap();
        let first_vf = machine.state.v[0xF];
        run(&mut machine, 0xD125).unwrap();
        assert_eq!(machine.state.v[0xF], 1);
        assert_eq!(lit(&machine), 1);
        assert_eq!(machine.video.pixels()[10][40], 1);
        // the 8 glyph covers (40, 10), so the first draw erased it
        assert_eq!(first_vf, 1);
    }

    #[test]
    fn test_dxyn_drw_wraps_around_edges() {
        let mut machine = Machine::new();
        machine.state.memory[0x300] = 0xFF;
        machine.state.memory[0x301] = 0xFF;
        machine.state.i = 0x300;
        machine.state.v[0x1] = 60;
        machine.state.v[0x2] = 31;
        run(&mut machine, 0xD122).unwrap();
        assert_eq!(machine.video.pixels()[31][60..64], [1, 1, 1, 1]);
        assert_eq!(machine.video.pixels()[31][0..4], [1, 1, 1, 1]);
        assert_eq!(machine.video.pixels()[0][60..64], [1, 1, 1, 1]);
        assert_eq!(machine.video.pixels()[0][0..4], [1, 1, 1, 1]);
        assert_eq!(lit(&machine), 16);
    }

    #[test]
    fn test_ex9e_skp_skips() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 0xA;
        machine.set_key(0xA, KeyState::Down).unwrap();
        run(&mut machine, 0xE19E).unwrap();
        assert_eq!(machine.state.pc, 0x0204);
    }

    #[test]
    fn test_ex9e_skp_doesnt_skip() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 0xA;
        run(&mut machine, 0xE19E).unwrap();
        assert_eq!(machine.state.pc, 0x0202);
    }

    #[test]
    fn test_exa1_sknp_skips() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 0xA;
        run(&mut machine, 0xE1A1).unwrap();
        assert_eq!(machine.state.pc, 0x0204);
    }

    #[test]
    fn test_exa1_sknp_doesnt_skip() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 0xA;
        machine.set_key(0xA, KeyState::Down).unwrap();
        run(&mut machine, 0xE1A1).unwrap();
        assert_eq!(machine.state.pc, 0x0202);
    }

    #[test]
    fn test_fx07_ld() {
        let mut machine = Machine::new();
        machine.state.delay_timer = 0x42;
        run(&mut machine, 0xF107).unwrap();
        assert_eq!(machine.state.v[0x1], 0x42);
    }

    #[test]
    fn test_fx0a_ld_waits_for_key() {
        let mut machine = Machine::new();
        run(&mut machine, 0xF30A).unwrap();
        assert!(machine.keypad.is_locked());
        machine.set_key(0x7, KeyState::Down).unwrap();
        assert_eq!(machine.state.v[0x3], 0x7);
        assert!(!machine.keypad.is_locked());
        machine.set_key(0x7, KeyState::Up).unwrap();
        machine.set_key(0x9, KeyState::Down).unwrap();
        assert_eq!(machine.state.v[0x3], 0x7);
    }

    #[test]
    fn test_fx15_ld() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 0x42;
        run(&mut machine, 0xF115).unwrap();
        assert_eq!(machine.state.delay_timer, 0x42);
    }

    #[test]
    fn test_fx18_ld() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 0x42;
        run(&mut machine, 0xF118).unwrap();
        assert_eq!(machine.state.sound_timer, 0x42);
    }

    #[test]
    fn test_fx1e_add() {
        let mut machine = Machine::new();
        machine.state.i = 0x100;
        machine.state.v[0x1] = 0x42;
        run(&mut machine, 0xF11E).unwrap();
        assert_eq!(machine.state.i, 0x142);
    }

    #[test]
    fn test_fx29_ld() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 0xA;
        run(&mut machine, 0xF129).unwrap();
        assert_eq!(machine.state.i, 50);
        assert_eq!(
            machine.state.memory[50..55],
            SPRITE_SHEET[50..55]
        );
    }

    #[test]
    fn test_fx33_bcd() {
        let mut machine = Machine::new();
        machine.state.i = 0x300;
        machine.state.v[0x1] = 254;
        run(&mut machine, 0xF133).unwrap();
        assert_eq!(machine.state.memory[0x300..0x303], [2, 5, 4]);
        assert_eq!(machine.state.i, 0x300);
    }

    #[test]
    fn test_fx55_ld() {
        let mut machine = Machine::new();
        machine.state.i = 0x300;
        machine.state.v[0x0..=0x3].copy_from_slice(&[1, 2, 3, 4]);
        run(&mut machine, 0xF255).unwrap();
        assert_eq!(machine.state.memory[0x300..0x304], [1, 2, 3, 0]);
        assert_eq!(machine.state.i, 0x303);
    }

    #[test]
    fn test_fx65_ld() {
        let mut machine = Machine::new();
        machine.state.i = 0x300;
        machine.state.memory[0x300..0x304].copy_from_slice(&[1, 2, 3, 4]);
        run(&mut machine, 0xF265).unwrap();
        assert_eq!(machine.state.v[0x0..0x4], [1, 2, 3, 0]);
        assert_eq!(machine.state.i, 0x303);
    }
}
