//! Joystick and button codes
//!
//! The input bit-field combines the five joystick switches (bits 0-4) and the
//! push-button (bit 10), active high. Only a reading with exactly one switch
//! closed is a command, anything else is ignored by the navigator.

/// Joystick left
pub const JOYSTICK_LEFT: u16 = 1 << 0;
/// Joystick down
pub const JOYSTICK_DOWN: u16 = 1 << 1;
/// Joystick up
pub const JOYSTICK_UP: u16 = 1 << 2;
/// Joystick pressed in
pub const JOYSTICK_CENTER: u16 = 1 << 3;
/// Joystick right
pub const JOYSTICK_RIGHT: u16 = 1 << 4;
/// Mode push-button
pub const BUTTON: u16 = 1 << 10;

/// Bits of the input port carrying switches
pub const INPUT_MASK: u16 =
    JOYSTICK_LEFT | JOYSTICK_DOWN | JOYSTICK_UP | JOYSTICK_CENTER | JOYSTICK_RIGHT | BUTTON;

/// Operator command decoded from one input reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputCode {
    Left,
    Down,
    Up,
    Center,
    Right,
    Button,
}

impl InputCode {
    /// Decodes a raw input reading. `None` for no switch, several switches, or
    /// bits outside the input mask only.
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits & INPUT_MASK {
            JOYSTICK_LEFT => Some(InputCode::Left),
            JOYSTICK_DOWN => Some(InputCode::Down),
            JOYSTICK_UP => Some(InputCode::Up),
            JOYSTICK_CENTER => Some(InputCode::Center),
            JOYSTICK_RIGHT => Some(InputCode::Right),
            BUTTON => Some(InputCode::Button),
            _ => None,
        }
    }
}
