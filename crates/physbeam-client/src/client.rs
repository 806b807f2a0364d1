// client.rs -- primary client state for the beam effect subsystem

use rand::RngCore;

use physbeam_common::common::{com_printf, msg_begin_reading, msg_read_byte};
use physbeam_common::cvar::{cvar_get, cvar_init};
use physbeam_common::qcommon::{SizeBuf, SVC_BEAM_UPDATE, SVC_NOP};

use crate::cl_beam::PhysgunWeapon;
use crate::cl_ents::ClientEntState;
use crate::cl_fx::ClFxState;
use crate::cl_input::{cl_attack_key_event, cl_weapon_key_event, InputState};
use crate::cl_parse::cl_parse_beam_update;
use crate::cl_scene::{SceneState, INVALID_RENDER_HANDLE};
use crate::cl_view::{v_register_beam_materials, ViewState};

pub const MAX_DLIGHTS: usize = 32;

// ============================================================
// Client state
// ============================================================

pub struct ClientState {
    /// World clock the client is rendering at, seconds.
    pub time: f32,
    /// Seconds covered by the current frame.
    pub frametime: f32,

    pub ents: ClientEntState,
    pub scene: SceneState,
    pub view: ViewState,
    pub fx: ClFxState,
    pub input: InputState,

    pub weapon: PhysgunWeapon,
}

impl ClientState {
    pub fn new(weapon_entnum: i32) -> Self {
        Self {
            time: 0.0,
            frametime: 0.0,
            ents: ClientEntState::new(),
            scene: SceneState::new(),
            view: ViewState::new(),
            fx: ClFxState::new(),
            input: InputState::default(),
            weapon: PhysgunWeapon::new(weapon_entnum),
        }
    }

    /// One-time startup: cvars and effect material precache.
    pub fn cl_init(&mut self) {
        cvar_init();
        cvar_get("developer", "0", 0);
        v_register_beam_materials(&mut self.view);
    }

    // ============================================================
    // Server message dispatch
    // ============================================================

    /// Run one received server message through the parser. Beam updates
    /// mutate the replicated record and then fire the data-changed
    /// notification, which re-evaluates scene registration.
    pub fn cl_parse_server_message(&mut self, msg: &mut SizeBuf) {
        msg_begin_reading(msg);
        loop {
            if msg.readcount >= msg.cursize {
                break;
            }
            let cmd = msg_read_byte(msg);
            match cmd {
                SVC_NOP => {}
                SVC_BEAM_UPDATE => {
                    cl_parse_beam_update(msg, &mut self.weapon.beam);
                    self.weapon.on_data_changed(&mut self.scene);
                }
                _ => {
                    com_printf(&format!(
                        "cl_parse_server_message: illegible server message {}\n",
                        cmd
                    ));
                    break;
                }
            }
        }
    }

    // ============================================================
    // Key events
    // ============================================================

    /// Client key filter. Returns true when the event was consumed by the
    /// weapon remap instead of the default binding handler.
    pub fn cl_key_event(&mut self, key: i32, down: bool) -> bool {
        cl_attack_key_event(&mut self.input, key, down);
        cl_weapon_key_event(&mut self.input, key, down)
    }

    // ============================================================
    // Frame rendering
    // ============================================================

    /// Build this frame's scene: draw the beam if it is registered as
    /// visible, then run light decay/expiry and hand live lights to the
    /// renderer. Returns 1 when the beam drew.
    pub fn cl_render_frame(&mut self, rng: &mut dyn RngCore) -> i32 {
        self.view.v_clear_scene();

        let mut drawn = 0;
        if self.weapon.renderer.render_handle != INVALID_RENDER_HANDLE {
            drawn = self.weapon.renderer.draw_model(
                &self.weapon.beam,
                &self.ents,
                &mut self.view,
                &mut self.fx,
                self.time,
                rng,
            );
        }

        self.fx.cl_run_dlights(self.time, self.frametime);
        let view = &mut self.view;
        self.fx.cl_add_dlights(|org, radius, r, g, b| {
            view.v_add_light(org, radius, r, g, b);
        });

        drawn
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cl_beam::BEAM_ATTACHMENT;
    use crate::cl_input::{K_MOUSE1, K_MWHEELUP};
    use crate::cl_parse::msg_write_beam_update;
    use physbeam_common::q_shared::KeyBits;
    use physbeam_common::qcommon::{
        MAX_MSGLEN, U_BEAM_ACTIVE, U_BEAM_TARGET, U_BEAM_TIMER, U_BEAM_VIEWMODEL, U_BEAM_WORLD,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn activation_message(viewmodel: i32) -> SizeBuf {
        let mut beam = crate::cl_beam::BeamState::default();
        beam.active = true;
        beam.view_model_index = viewmodel;
        beam.target_position = [64.0, 0.0, 0.0];
        beam.world_position = [60.0, 4.0, 12.0];
        beam.timer = 1.5;

        let mut msg = SizeBuf::new(MAX_MSGLEN);
        physbeam_common::common::msg_write_byte(&mut msg, SVC_BEAM_UPDATE);
        msg_write_beam_update(
            &mut msg,
            &beam,
            U_BEAM_TARGET | U_BEAM_WORLD | U_BEAM_ACTIVE | U_BEAM_VIEWMODEL | U_BEAM_TIMER,
        );
        msg
    }

    fn deactivation_message() -> SizeBuf {
        let beam = crate::cl_beam::BeamState::default();
        let mut msg = SizeBuf::new(MAX_MSGLEN);
        physbeam_common::common::msg_write_byte(&mut msg, SVC_BEAM_UPDATE);
        msg_write_beam_update(&mut msg, &beam, U_BEAM_ACTIVE);
        msg
    }

    #[test]
    fn test_activate_parse_draw_deactivate() {
        let mut cl = ClientState::new(9);
        cl.cl_init();
        cl.time = 10.0;
        cl.frametime = 0.016;

        cl.ents.spawn(4);
        cl.ents.set_attachment(4, BEAM_ATTACHMENT, [2.0, 0.0, 6.0], [0.0; 3]);

        // server switches the beam on
        let mut msg = activation_message(4);
        cl.cl_parse_server_message(&mut msg);
        assert!(cl.scene.is_registered(cl.weapon.renderer.render_handle));
        assert_eq!(cl.weapon.beam.owner, 9);

        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(cl.cl_render_frame(&mut rng), 1);
        assert_eq!(cl.view.r_beams.len(), 1);
        assert_eq!(cl.view.r_dlights.len(), 3);

        // server switches it off; the stale lights expire with the clock
        let mut msg = deactivation_message();
        cl.cl_parse_server_message(&mut msg);
        assert_eq!(cl.weapon.renderer.render_handle, INVALID_RENDER_HANDLE);

        cl.time = 10.1;
        assert_eq!(cl.cl_render_frame(&mut rng), 0);
        assert!(cl.view.r_beams.is_empty());
        assert!(cl.view.r_dlights.is_empty());
    }

    #[test]
    fn test_repeated_activation_keeps_one_registration() {
        let mut cl = ClientState::new(9);
        cl.cl_init();

        for _ in 0..3 {
            let mut msg = activation_message(4);
            cl.cl_parse_server_message(&mut msg);
        }
        assert_eq!(cl.scene.num_registered(), 1);
    }

    #[test]
    fn test_draw_skipped_when_viewmodel_missing() {
        let mut cl = ClientState::new(9);
        cl.cl_init();
        cl.time = 10.0;

        // beam active but entity 4 never spawned
        let mut msg = activation_message(4);
        cl.cl_parse_server_message(&mut msg);

        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(cl.cl_render_frame(&mut rng), 0);
        assert!(cl.view.r_beams.is_empty());
        assert!(cl.view.r_dlights.is_empty());
    }

    #[test]
    fn test_unknown_message_stops_parse() {
        let mut cl = ClientState::new(9);
        cl.cl_init();

        let mut msg = SizeBuf::new(64);
        physbeam_common::common::msg_write_byte(&mut msg, 250);
        cl.cl_parse_server_message(&mut msg); // must not panic
        assert_eq!(cl.weapon.renderer.render_handle, INVALID_RENDER_HANDLE);
    }

    #[test]
    fn test_key_event_remap_through_client() {
        let mut cl = ClientState::new(9);
        assert!(!cl.cl_key_event(K_MWHEELUP, true));

        cl.cl_key_event(K_MOUSE1, true);
        assert!(cl.cl_key_event(K_MWHEELUP, true));
        assert!(cl.input.keybits.contains(KeyBits::WEAPON1));
    }
}
