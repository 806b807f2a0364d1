// cl_beam.rs -- physgun beam state and rendering

use rand::{Rng, RngCore};

use physbeam_common::common::com_dprintf;
use physbeam_common::q_shared::{vector_add, vector_scale, Vec3};

use crate::cl_ents::ClientEntState;
use crate::cl_fx::ClFxState;
use crate::cl_scene::{
    RenderGroup, RenderHandle, Renderable, SceneRegistry, INVALID_RENDER_HANDLE,
};
use crate::cl_view::{ViewState, BEAM_SPRITE_NAME, TEXGROUP_CLIENT_EFFECTS};

// ============================================================
// Constants
// ============================================================

/// Curve width passed to the beam primitive, world units.
pub const BEAM_WIDTH: f32 = 13.0;

/// Attachment slot on the viewmodel the beam hangs from (the muzzle).
pub const BEAM_ATTACHMENT: usize = 1;

/// Beam lights live this long past the frame that spawned them, so they
/// vanish unless re-issued every frame.
pub const BEAM_LIGHT_LIFE: f32 = 0.05;

/// Radius lost per second while a beam light is alive.
pub const BEAM_LIGHT_DECAY: f32 = 512.0;

/// Brightness falloff exponent for beam lights.
pub const BEAM_LIGHT_EXPONENT: i32 = -2;

/// Light style tag for beam lights.
pub const BEAM_LIGHT_STYLE: i32 = 1;

/// Radius bounds for the light at the beam origin; later points divide
/// both bounds by their point index + 1, shrinking down the beam.
pub const BEAM_LIGHT_RADIUS_MIN: f32 = 245.0;
pub const BEAM_LIGHT_RADIUS_MAX: f32 = 256.0;

// loose render bounds; draws whenever the endpoint is in view
const BEAM_BOUNDS: f32 = 32.0;

// ============================================================
// Procedural color
// ============================================================

/// Remap sin(x) from [-1,1] to [0,1].
#[inline]
pub fn oscillate(x: f32) -> f32 {
    (x.sin() + 1.0) * 0.5
}

/// Frame color for the beam. Three channels run at different rates and
/// phases so the hue drifts instead of pulsing.
pub fn beam_color(timer: f32) -> Vec3 {
    [
        oscillate(timer + 0.7),
        oscillate(timer * 0.4),
        oscillate(timer * 2.0),
    ]
}

// ============================================================
// Replicated beam state
// ============================================================

/// Networked state of the physgun beam, filled in by the replication
/// layer. The renderer treats it as read-only.
#[derive(Debug, Clone)]
pub struct BeamState {
    /// Entity number of the weapon carrying the beam. Lookup key only;
    /// the entity's lifetime is independent.
    pub owner: i32,
    /// Far endpoint the beam pulls toward.
    pub target_position: Vec3,
    /// World-anchored near endpoint.
    pub world_position: Vec3,
    pub active: bool,
    /// Replicated but unread here; the glue gun variant consumes it.
    pub glue_touching: bool,
    /// Entity number of the viewmodel the beam originates from.
    pub view_model_index: i32,
    /// Server-synchronized clock driving the color cycle.
    pub timer: f32,
}

impl Default for BeamState {
    fn default() -> Self {
        Self {
            owner: 0,
            target_position: [0.0; 3],
            world_position: [0.0; 3],
            active: false,
            glue_touching: false,
            view_model_index: 0,
            timer: 0.0,
        }
    }
}

// ============================================================
// Beam renderer
// ============================================================

/// Owns the scene registration handle and turns BeamState into draw calls
/// and lights once per visible frame.
pub struct BeamRenderer {
    pub render_handle: RenderHandle,
}

impl Default for BeamRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl BeamRenderer {
    pub fn new() -> Self {
        Self {
            render_handle: INVALID_RENDER_HANDLE,
        }
    }

    /// Re-evaluate scene registration after a state update. Keeps the
    /// handle in lockstep with the active flag: register on the first
    /// active notification, mark changed on later ones, unregister when
    /// the beam shuts off.
    pub fn update(&mut self, state: &BeamState, scene: &mut dyn SceneRegistry) {
        if state.active {
            if self.render_handle == INVALID_RENDER_HANDLE {
                self.render_handle = scene.add_renderable(RenderGroup::Translucent);
            } else {
                scene.renderable_changed(self.render_handle);
            }
        } else if self.render_handle != INVALID_RENDER_HANDLE {
            scene.remove_renderable(self.render_handle);
            self.render_handle = INVALID_RENDER_HANDLE;
        }
    }

    /// Draw the beam for this frame. Returns 1 if a beam was drawn, 0 on
    /// an early out (inactive, or the viewmodel is gone). An early out has
    /// no side effects at all.
    pub fn draw_model(
        &mut self,
        state: &BeamState,
        ents: &ClientEntState,
        view: &mut ViewState,
        fx: &mut ClFxState,
        time: f32,
        rng: &mut dyn RngCore,
    ) -> i32 {
        if !state.active {
            return 0;
        }

        let ent = match ents.get_ent(state.view_model_index) {
            Some(ent) => ent,
            None => return 0,
        };
        let (origin, _angles) = match ent.get_attachment(BEAM_ATTACHMENT) {
            Some(at) => at,
            None => return 0,
        };

        let mut points = [[0.0f32; 3]; 3];
        points[0] = origin;
        points[1] = vector_scale(&vector_add(&state.target_position, &points[0]), 0.5);
        points[2] = state.world_position;

        let color = beam_color(state.timer);
        com_dprintf(&format!(
            "beam color: r={:.3} g={:.3} b={:.3} t={:.3}\n",
            color[0], color[1], color[2], state.timer
        ));

        let material = view.find_material(BEAM_SPRITE_NAME, TEXGROUP_CLIENT_EFFECTS);
        let scroll = time - time.floor();
        view.v_add_beam(material, &points, BEAM_WIDTH, &color, scroll);

        // one light per control point, shrinking down the beam's length
        for (i, point) in points.iter().enumerate() {
            let idx = fx.cl_alloc_dlight(state.view_model_index + i as i32, time);
            let dl = &mut fx.cl_dlights[idx];
            dl.origin = *point;
            dl.color = [
                (color[0] * 255.0) as u8,
                (color[1] * 255.0) as u8,
                (color[2] * 255.0) as u8,
            ];
            dl.exponent = BEAM_LIGHT_EXPONENT;
            dl.die = time + BEAM_LIGHT_LIFE;
            let shrink = 1.0 / (i as f32 + 1.0);
            dl.radius = rng.gen_range(
                BEAM_LIGHT_RADIUS_MIN * shrink..BEAM_LIGHT_RADIUS_MAX * shrink,
            );
            dl.decay = BEAM_LIGHT_DECAY;
            dl.style = BEAM_LIGHT_STYLE;
        }

        1
    }
}

// ============================================================
// Physgun weapon entity
// ============================================================

/// Client mirror of the physgun weapon: the replicated beam record plus
/// its renderer.
pub struct PhysgunWeapon {
    /// Our own entity number, pushed into the beam state as its owner key
    /// on every update.
    pub entnum: i32,
    pub beam: BeamState,
    pub renderer: BeamRenderer,
}

impl PhysgunWeapon {
    pub fn new(entnum: i32) -> Self {
        Self {
            entnum,
            beam: BeamState::default(),
            renderer: BeamRenderer::new(),
        }
    }

    /// Called after the replication layer applies a batch of field
    /// updates.
    pub fn on_data_changed(&mut self, scene: &mut dyn SceneRegistry) {
        self.beam.owner = self.entnum;
        self.renderer.update(&self.beam, scene);
    }
}

impl Renderable for PhysgunWeapon {
    fn render_origin(&self) -> Vec3 {
        self.beam.world_position
    }

    fn render_bounds(&self) -> (Vec3, Vec3) {
        (
            [-BEAM_BOUNDS, -BEAM_BOUNDS, -BEAM_BOUNDS],
            [BEAM_BOUNDS, BEAM_BOUNDS, BEAM_BOUNDS],
        )
    }

    fn is_transparent(&self) -> bool {
        true
    }
}

// ============================================================
// Tests
// ============================================================
