// cl_input.rs -- weapon input handling and key remapping

use physbeam_common::q_shared::KeyBits;

// key numbers for the buttons this module cares about
pub const K_MOUSE1: i32 = 200;
pub const K_MWHEELDOWN: i32 = 239;
pub const K_MWHEELUP: i32 = 240;

/// Pressed-key bits accumulated for the outgoing user command.
#[derive(Default)]
pub struct InputState {
    pub keybits: KeyBits,
}

/// Weapon-level key filter, run before the default binding handler.
///
/// While the attack button is held, the mouse wheel stops scrolling
/// weapons and instead drives the physgun's auxiliary actions (push/pull
/// distance). Returns true when the event was consumed; everything else
/// falls through to the default handler untouched.
pub fn cl_weapon_key_event(input: &mut InputState, key: i32, down: bool) -> bool {
    if down && input.keybits.contains(KeyBits::ATTACK) {
        match key {
            K_MWHEELUP => {
                input.keybits.insert(KeyBits::WEAPON1);
                return true;
            }
            K_MWHEELDOWN => {
                input.keybits.insert(KeyBits::WEAPON2);
                return true;
            }
            _ => {}
        }
    }
    false
}

/// Track the attack button itself so the filter above knows when the
/// wheel is remapped.
pub fn cl_attack_key_event(input: &mut InputState, key: i32, down: bool) {
    if key != K_MOUSE1 {
        return;
    }
    if down {
        input.keybits.insert(KeyBits::ATTACK);
    } else {
        input.keybits.remove(KeyBits::ATTACK);
    }
}

/// Pull the remapped weapon bits for this frame's user command, clearing
/// them for the next frame.
pub fn cl_take_weapon_bits(input: &mut InputState) -> KeyBits {
    let bits = input.keybits & (KeyBits::WEAPON1 | KeyBits::WEAPON2);
    input.keybits.remove(KeyBits::WEAPON1 | KeyBits::WEAPON2);
    bits
}

// ============================================================
// Tests
// ============================================================
