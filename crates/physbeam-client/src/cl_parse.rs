// cl_parse.rs -- parse beam state updates from the server

use physbeam_common::common::{
    com_printf, msg_read_byte, msg_read_float, msg_read_pos, msg_read_short, msg_write_byte,
    msg_write_float, msg_write_pos, msg_write_short,
};
use physbeam_common::qcommon::{
    SizeBuf, U_BEAM_ACTIVE, U_BEAM_GLUE, U_BEAM_TARGET, U_BEAM_TIMER, U_BEAM_VIEWMODEL,
    U_BEAM_WORLD,
};

use crate::cl_beam::BeamState;

/// Apply a svc_beam_update body to the beam state. Only fields flagged in
/// the leading bitmask are present on the wire. Returns the bitmask; the
/// caller fires the data-changed notification afterwards.
pub fn cl_parse_beam_update(msg: &mut SizeBuf, state: &mut BeamState) -> u32 {
    let bits = msg_read_byte(msg);
    if bits < 0 {
        com_printf("cl_parse_beam_update: read past end of message\n");
        return 0;
    }
    let bits = bits as u32;

    if bits & U_BEAM_TARGET != 0 {
        state.target_position = msg_read_pos(msg);
    }
    if bits & U_BEAM_WORLD != 0 {
        state.world_position = msg_read_pos(msg);
    }
    if bits & U_BEAM_ACTIVE != 0 {
        state.active = msg_read_byte(msg) != 0;
    }
    if bits & U_BEAM_GLUE != 0 {
        state.glue_touching = msg_read_byte(msg) != 0;
    }
    if bits & U_BEAM_VIEWMODEL != 0 {
        state.view_model_index = msg_read_short(msg);
    }
    if bits & U_BEAM_TIMER != 0 {
        state.timer = msg_read_float(msg);
    }

    bits
}

/// Serialize the masked fields of a beam state as a svc_beam_update body.
/// The server-side writer; tests and demo recording use it too.
pub fn msg_write_beam_update(msg: &mut SizeBuf, state: &BeamState, bits: u32) {
    msg_write_byte(msg, bits as i32);

    if bits & U_BEAM_TARGET != 0 {
        msg_write_pos(msg, &state.target_position);
    }
    if bits & U_BEAM_WORLD != 0 {
        msg_write_pos(msg, &state.world_position);
    }
    if bits & U_BEAM_ACTIVE != 0 {
        msg_write_byte(msg, state.active as i32);
    }
    if bits & U_BEAM_GLUE != 0 {
        msg_write_byte(msg, state.glue_touching as i32);
    }
    if bits & U_BEAM_VIEWMODEL != 0 {
        msg_write_short(msg, state.view_model_index);
    }
    if bits & U_BEAM_TIMER != 0 {
        msg_write_float(msg, state.timer);
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use physbeam_common::common::msg_begin_reading;
    use physbeam_common::qcommon::MAX_MSGLEN;

    const U_BEAM_ALL: u32 = U_BEAM_TARGET
        | U_BEAM_WORLD
        | U_BEAM_ACTIVE
        | U_BEAM_GLUE
        | U_BEAM_VIEWMODEL
        | U_BEAM_TIMER;

    #[test]
    fn test_full_roundtrip() {
        let mut from = BeamState::default();
        from.target_position = [100.0, -7.5, 64.25];
        from.world_position = [12.0, 8.0, -3.5];
        from.active = true;
        from.glue_touching = true;
        from.view_model_index = 42;
        from.timer = 9.625;

        let mut msg = SizeBuf::new(MAX_MSGLEN);
        msg_write_beam_update(&mut msg, &from, U_BEAM_ALL);

        let mut to = BeamState::default();
        msg_begin_reading(&mut msg);
        let bits = cl_parse_beam_update(&mut msg, &mut to);

        assert_eq!(bits, U_BEAM_ALL);
        assert_eq!(to.target_position, from.target_position);
        assert_eq!(to.world_position, from.world_position);
        assert_eq!(to.active, from.active);
        assert_eq!(to.glue_touching, from.glue_touching);
        assert_eq!(to.view_model_index, from.view_model_index);
        assert_eq!(to.timer, from.timer);
    }

    #[test]
    fn test_partial_update_touches_only_masked_fields() {
        let mut from = BeamState::default();
        from.timer = 2.5;
        from.target_position = [1.0, 2.0, 3.0]; // NOT on the wire

        let mut msg = SizeBuf::new(MAX_MSGLEN);
        msg_write_beam_update(&mut msg, &from, U_BEAM_TIMER);

        let mut to = BeamState::default();
        to.target_position = [9.0, 9.0, 9.0];
        to.active = true;

        msg_begin_reading(&mut msg);
        let bits = cl_parse_beam_update(&mut msg, &mut to);

        assert_eq!(bits, U_BEAM_TIMER);
        assert_eq!(to.timer, 2.5);
        // unmasked fields keep their previous values
        assert_eq!(to.target_position, [9.0, 9.0, 9.0]);
        assert!(to.active);
    }

    #[test]
    fn test_empty_message_is_harmless() {
        let mut msg = SizeBuf::new(8);
        let mut to = BeamState::default();
        msg_begin_reading(&mut msg);
        let bits = cl_parse_beam_update(&mut msg, &mut to);
        assert_eq!(bits, 0);
        assert!(!to.active);
    }

    #[test]
    fn test_deactivation_update() {
        let mut from = BeamState::default();
        from.active = false;

        let mut msg = SizeBuf::new(MAX_MSGLEN);
        msg_write_beam_update(&mut msg, &from, U_BEAM_ACTIVE);

        let mut to = BeamState::default();
        to.active = true;
        msg_begin_reading(&mut msg);
        cl_parse_beam_update(&mut msg, &mut to);
        assert!(!to.active);
    }
}
