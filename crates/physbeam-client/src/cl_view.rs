// cl_view.rs -- per-frame scene submission and material registration

use physbeam_common::common::com_printf;
use physbeam_common::q_shared::{DLight, Vec3};

pub const MAX_BEAM_SEGMENTS: usize = 64;
pub const MAX_VIEW_DLIGHTS: usize = 32;

/// Sprite material used for the physgun beam, precached at startup.
pub const BEAM_SPRITE_NAME: &str = "sprites/physbeam";

/// Texture group for client-effect materials.
pub const TEXGROUP_CLIENT_EFFECTS: &str = "client effects";

/// Opaque material handle (index + 1, 0 = none).
pub type MaterialHandle = i32;

#[derive(Debug, Clone)]
struct Material {
    name: String,
    group: String,
}

/// A quadratic beam primitive queued for this frame's render pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeamSegment {
    pub material: MaterialHandle,
    pub points: [Vec3; 3],
    pub width: f32,
    pub color: Vec3,
    /// Texture scroll phase, [0,1).
    pub scroll: f32,
}

// ============================================================
// View state
// ============================================================

pub struct ViewState {
    materials: Vec<Material>,

    // scene arrays, cleared each frame
    pub r_beams: Vec<BeamSegment>,
    pub r_dlights: Vec<DLight>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            materials: Vec::new(),
            r_beams: Vec::new(),
            r_dlights: Vec::new(),
        }
    }

    // ============================================================
    // Material registration
    // ============================================================

    /// Find a material by name, registering it on first use.
    pub fn find_material(&mut self, name: &str, group: &str) -> MaterialHandle {
        for (i, m) in self.materials.iter().enumerate() {
            if m.name == name {
                return (i + 1) as MaterialHandle;
            }
        }
        self.materials.push(Material {
            name: name.to_string(),
            group: group.to_string(),
        });
        self.materials.len() as MaterialHandle
    }

    pub fn material_name(&self, handle: MaterialHandle) -> Option<&str> {
        if handle <= 0 || handle as usize > self.materials.len() {
            return None;
        }
        Some(self.materials[handle as usize - 1].name.as_str())
    }

    pub fn num_materials(&self) -> usize {
        self.materials.len()
    }

    // ============================================================
    // V_ClearScene
    // ============================================================

    pub fn v_clear_scene(&mut self) {
        self.r_beams.clear();
        self.r_dlights.clear();
    }

    // ============================================================
    // V_AddBeam / V_AddLight
    // ============================================================

    /// Queue a quadratic beam through three control points.
    pub fn v_add_beam(
        &mut self,
        material: MaterialHandle,
        points: &[Vec3; 3],
        width: f32,
        color: &Vec3,
        scroll: f32,
    ) {
        if self.r_beams.len() >= MAX_BEAM_SEGMENTS {
            com_printf("v_add_beam: beam list overflow\n");
            return;
        }
        self.r_beams.push(BeamSegment {
            material,
            points: *points,
            width,
            color: *color,
            scroll,
        });
    }

    pub fn v_add_light(&mut self, org: &Vec3, intensity: f32, r: f32, g: f32, b: f32) {
        if self.r_dlights.len() >= MAX_VIEW_DLIGHTS {
            return;
        }
        self.r_dlights.push(DLight {
            origin: *org,
            color: [r, g, b],
            intensity,
        });
    }
}

/// Precache the client-effect materials this subsystem draws with.
pub fn v_register_beam_materials(view: &mut ViewState) {
    view.find_material(BEAM_SPRITE_NAME, TEXGROUP_CLIENT_EFFECTS);
}

// ============================================================
// Tests
// ============================================================
