/// Button bit positions in KEYINPUT (a pressed button reads as 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GbaButton {
    A = 1 << 0,
    B = 1 << 1,
    Select = 1 << 2,
    Start = 1 << 3,
    Right = 1 << 4,
    Left = 1 << 5,
    Up = 1 << 6,
    Down = 1 << 7,
    R = 1 << 8,
    L = 1 << 9,
}

/// All 10 buttons released.
const KEYS_RELEASED: u16 = 0x03FF;

/// Keypad state plus the buttons pressed since the last [`Keypad::latch`].
#[derive(Debug, Clone, Copy)]
pub struct Keypad {
    pub key_input: u16,
    /// Active high, a bit stays set until the next latch even if the button
    /// is released before it.
    presses: u16,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            key_input: KEYS_RELEASED,
            presses: 0,
        }
    }

    /// Set button state: pressed = true, released = false.
    pub const fn set_button(&mut self, button: GbaButton, pressed: bool) {
        if pressed {
            if !self.held(button) {
                self.presses |= button as u16;
            }
            self.key_input &= !(button as u16);
        } else {
            self.key_input |= button as u16;
        }
    }

    #[must_use]
    pub const fn held(&self, button: GbaButton) -> bool {
        self.key_input & (button as u16) == 0
    }

    /// Went down at least once since the last [`Keypad::latch`].
    #[must_use]
    pub const fn pressed(&self, button: GbaButton) -> bool {
        self.presses & (button as u16) != 0
    }

    #[must_use]
    pub const fn a_pressed(&self) -> bool {
        self.pressed(GbaButton::A)
    }

    /// Ends the frame and forgets the presses seen during it.
    pub const fn latch(&mut self) {
        self.presses = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_low() {
        let mut keypad = Keypad::new();
        keypad.set_button(GbaButton::Start, true);
        assert_eq!(keypad.key_input, 0x03F7);
        assert!(keypad.held(GbaButton::Start));

        keypad.set_button(GbaButton::Start, false);
        assert_eq!(keypad.key_input, 0x03FF);
    }

    #[test]
    fn pressed_only_on_the_first_frame() {
        let mut keypad = Keypad::new();
        assert!(!keypad.a_pressed());

        keypad.set_button(GbaButton::A, true);
        assert!(keypad.a_pressed());
        keypad.latch();

        // Still held, no new edge.
        assert!(keypad.held(GbaButton::A));
        assert!(!keypad.a_pressed());

        keypad.set_button(GbaButton::A, false);
        keypad.latch();
        keypad.set_button(GbaButton::A, true);
        assert!(keypad.a_pressed());
    }

    #[test]
    fn tap_between_latches_is_kept() {
        let mut keypad = Keypad::new();
        keypad.set_button(GbaButton::A, true);
        keypad.set_button(GbaButton::A, false);

        assert!(!keypad.held(GbaButton::A));
        assert!(keypad.a_pressed());

        keypad.latch();
        assert!(!keypad.a_pressed());
    }

    #[test]
    fn repeated_press_while_held_is_not_a_new_edge() {
        let mut keypad = Keypad::new();
        keypad.set_button(GbaButton::A, true);
        keypad.latch();

        keypad.set_button(GbaButton::A, true);
        assert!(!keypad.a_pressed());
        assert!(!keypad.pressed(GbaButton::B));
    }
}
