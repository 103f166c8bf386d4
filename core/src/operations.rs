use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, SPRITE_HEIGHT, SPRITE_SHEET_ADDR, STACK_SIZE};
use crate::error::{Error, Result};
use crate::machine::Machine;
use crate::opcode::Opcode;

// The pc already points at the next instruction when these run.

fn skip_if(machine: &mut Machine, condition: bool) {
    if condition {
        machine.state.pc = machine.state.pc.wrapping_add(0x2);
    }
}

fn vx(op: &dyn Opcode, machine: &Machine) -> u8 {
    machine.state.v[op.x() as usize]
}

fn vy(op: &dyn Opcode, machine: &Machine) -> u8 {
    machine.state.v[op.y() as usize]
}

/// clear
pub fn clr(_op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    machine.video.clear();
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(_op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    let state = &mut machine.state;
    if state.sp == 0 {
        return Err(Error::StackUnderflow {
            pc: state.pc.wrapping_sub(0x2),
        });
    }
    state.sp -= 1;
    state.pc = state.stack[state.sp as usize];
    Ok(())
}

/// PC = NNN
pub fn jump(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    machine.state.pc = op.nnn();
    Ok(())
}

/// STACK.push(PC); PC = NNN
pub fn call(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    let state = &mut machine.state;
    if state.sp as usize >= STACK_SIZE {
        return Err(Error::StackOverflow {
            pc: state.pc.wrapping_sub(0x2),
        });
    }
    state.stack[state.sp as usize] = state.pc;
    state.sp += 1;
    state.pc = op.nnn();
    Ok(())
}

/// if Vx == NN then skip
pub fn ske(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    let condition = vx(op, machine) == op.nn();
    skip_if(machine, condition);
    Ok(())
}

/// if Vx != NN then skip
pub fn skne(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    let condition = vx(op, machine) != op.nn();
    skip_if(machine, condition);
    Ok(())
}

/// if Vx == Vy then skip
pub fn skre(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    let condition = vx(op, machine) == vy(op, machine);
    skip_if(machine, condition);
    Ok(())
}

/// Vx = NN
pub fn load(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    machine.state.v[op.x() as usize] = op.nn();
    Ok(())
}

/// Vx += NN
/// Add NN to Vx; allow for overflow but implicitly drop it, VF is untouched
pub fn add(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    let x = op.x() as usize;
    machine.state.v[x] = machine.state.v[x].wrapping_add(op.nn());
    Ok(())
}

/// Vx = Vy
pub fn mv(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    machine.state.v[op.x() as usize] = vy(op, machine);
    Ok(())
}

/// Vx |= Vy
pub fn or(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    machine.state.v[op.x() as usize] |= vy(op, machine);
    Ok(())
}

/// Vx &= Vy
pub fn and(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    machine.state.v[op.x() as usize] &= vy(op, machine);
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    machine.state.v[op.x() as usize] ^= vy(op, machine);
    Ok(())
}

/// Vx += Vy; VF = overflow
/// VF is written last so it holds the carry even when x is F
pub fn addr(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    let (res, over) = vx(op, machine).overflowing_add(vy(op, machine));
    let v = &mut machine.state.v;
    v[op.x() as usize] = res;
    v[0xF] = over as u8;
    Ok(())
}

/// VF = !underflow; Vx -= Vy
pub fn sub(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    let (res, under) = vx(op, machine).overflowing_sub(vy(op, machine));
    let v = &mut machine.state.v;
    v[0xF] = !under as u8;
    v[op.x() as usize] = res;
    Ok(())
}

/// VF = Vy & 1; Vx = Vy >> 1
/// Shifts Vy rather than Vx in place
pub fn shr(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    let source = vy(op, machine);
    let v = &mut machine.state.v;
    v[0xF] = source & 0x1;
    v[op.x() as usize] = source >> 1;
    Ok(())
}

/// VF = !underflow; Vx = Vy - Vx
pub fn subn(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    let (res, under) = vy(op, machine).overflowing_sub(vx(op, machine));
    let v = &mut machine.state.v;
    v[0xF] = !under as u8;
    v[op.x() as usize] = res;
    Ok(())
}

/// VF = Vy & 0x80 != 0; Vx = Vy << 1
/// Shifts Vy rather than Vx in place
pub fn shl(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    let source = vy(op, machine);
    let v = &mut machine.state.v;
    v[0xF] = (source & 0x80 != 0) as u8;
    v[op.x() as usize] = source << 1;
    Ok(())
}

/// if Vx != Vy then skip
pub fn skrne(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    let condition = vx(op, machine) != vy(op, machine);
    skip_if(machine, condition);
    Ok(())
}

/// I = NNN
pub fn loadi(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    machine.state.i = op.nnn();
    Ok(())
}

/// PC = V0 + NNN
pub fn jumpi(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    machine.state.pc = u16::from(machine.state.v[0x0]) + op.nnn();
    Ok(())
}

/// Vx = rand_byte & NN
pub fn rand(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    let rand_byte: u8 = rand::random();
    machine.state.v[op.x() as usize] = rand_byte & op.nn();
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=N)
/// XORs a sprite from memory I..I+N at position x, y on the FrameBuffer.
/// Pixels falling off an edge wrap around to the opposite one.
/// Sets VF if any pixels were erased
pub fn draw(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    let x = vx(op, machine) as usize;
    let y = vy(op, machine) as usize;
    let state = &mut machine.state;
    let frame_buffer = machine.video.pixels_mut();
    let mut collision = 0x0;

    for row in 0..op.n() {
        let sprite = state.read_byte(state.i.wrapping_add(u16::from(row)));
        let py = (y + row as usize) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            let px = (x + bit) % DISPLAY_WIDTH;
            let pixel_value = (sprite >> (7 - bit)) & 1;
            collision |= pixel_value & frame_buffer[py][px];
            frame_buffer[py][px] ^= pixel_value;
        }
    }

    state.v[0xF] = collision;
    Ok(())
}

/// if Vx.pressed then skip
pub fn skpr(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    let condition = machine.keypad.is_down(vx(op, machine));
    skip_if(machine, condition);
    Ok(())
}

/// if !Vx.pressed then skip
pub fn skup(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    let condition = !machine.keypad.is_down(vx(op, machine));
    skip_if(machine, condition);
    Ok(())
}

/// Vx = DT
pub fn get_delay(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    machine.state.v[op.x() as usize] = machine.state.delay_timer;
    Ok(())
}

/// await keypress for Vx
pub fn keyd(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    machine.keypad.lock(op.x());
    Ok(())
}

/// DT = Vx
pub fn set_delay(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    machine.state.delay_timer = vx(op, machine);
    Ok(())
}

/// ST = Vx
pub fn set_sound(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    machine.state.sound_timer = vx(op, machine);
    Ok(())
}

/// I += Vx
pub fn addi(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    machine.state.i = machine.state.i.wrapping_add(u16::from(vx(op, machine)));
    Ok(())
}

/// I = Vx * 5
/// Set I to the memory address of the glyph for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    machine.state.i = SPRITE_SHEET_ADDR as u16 + u16::from(vx(op, machine)) * SPRITE_HEIGHT;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address I
pub fn bcd(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    let value = vx(op, machine);
    let state = &mut machine.state;
    let digits = [value / 100 % 10, value / 10 % 10, value % 10];
    for (offset, digit) in digits.iter().enumerate() {
        state.write_byte(state.i.wrapping_add(offset as u16), *digit);
    }
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx; I += x + 1
pub fn stor(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    let state = &mut machine.state;
    for register in 0..=op.x() {
        let value = state.v[register as usize];
        state.write_byte(state.i.wrapping_add(u16::from(register)), value);
    }
    state.i = state.i.wrapping_add(u16::from(op.x()) + 1);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]; I += x + 1
pub fn read(op: &dyn Opcode, machine: &mut Machine) -> Result<()> {
    let state = &mut machine.state;
    for register in 0..=op.x() {
        state.v[register as usize] = state.read_byte(state.i.wrapping_add(u16::from(register)));
    }
    state.i = state.i.wrapping_add(u16::from(op.x()) + 1);
    Ok(())
}
