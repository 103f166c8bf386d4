/// # Opcodes
///
/// Every instruction is one big-endian 16-bit word, read here as four nibbles `[g x y n]`.
/// The leading nibble `g` picks the instruction family. Inside a family the rest of the
/// word either names the exact instruction (`00E0`, `FX1E`) or carries its operands.
///
/// Operand fields, when present:
/// - `x` selects Vx, or the last register of V0..=Vx for FX55/FX65
/// - `y` selects Vy
/// - `n` is a 4-bit sprite height
/// - `nn` is the low byte, an immediate value
/// - `nnn` is the low 12 bits, a memory address
pub trait Opcode {
    /// Returns the Opcode's component nibbles.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The Opcode's most significant nibble.
    /// `[g___]`
    fn group(&self) -> u8;

    /// `[_x__]`
    fn x(&self) -> u8;

    /// `[__y_]`
    fn y(&self) -> u8;

    /// `[___n]`
    fn n(&self) -> u8;

    /// The Opcode's least significant byte.
    /// `[__nn]`
    fn nn(&self) -> u8;

    /// The Opcode without its most significant nibble.
    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.group(), self.x(), self.y(), self.n())
    }

    fn group(&self) -> u8 {
        ((self & 0xF000) >> 12) as u8
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn nn(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}
