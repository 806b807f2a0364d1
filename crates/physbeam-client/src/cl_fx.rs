// cl_fx.rs -- transient dynamic light management

use physbeam_common::q_shared::Vec3;

use crate::client::MAX_DLIGHTS;

// ============================================================
// Structures
// ============================================================

/// A transient point light. Allocated fresh every frame by whatever effect
/// wants light; the engine expires it at `die` and shrinks it by `decay`
/// world units per second until then.
#[derive(Debug, Clone, Copy)]
pub struct CDlight {
    /// Allocation key, usually the owning entity number. Key 0 never
    /// matches an existing slot.
    pub key: i32,
    pub origin: Vec3,
    /// 8-bit color channels.
    pub color: [u8; 3],
    /// Brightness falloff exponent; negative values bias toward a wide
    /// soft falloff.
    pub exponent: i32,
    /// Absolute time the light stops existing.
    pub die: f32,
    pub radius: f32,
    /// Radius lost per second while alive.
    pub decay: f32,
    /// Light style tag the renderer may apply flicker tables with.
    pub style: i32,
}

impl Default for CDlight {
    fn default() -> Self {
        Self {
            key: 0,
            origin: [0.0; 3],
            color: [0; 3],
            exponent: 0,
            die: 0.0,
            radius: 0.0,
            decay: 0.0,
            style: 0,
        }
    }
}

// ============================================================
// Effect state
// ============================================================

pub struct ClFxState {
    pub cl_dlights: Vec<CDlight>,
}

impl Default for ClFxState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClFxState {
    pub fn new() -> Self {
        Self {
            cl_dlights: vec![CDlight::default(); MAX_DLIGHTS],
        }
    }

    // ============================================================
    // DLIGHT MANAGEMENT
    // ============================================================

    pub fn cl_clear_dlights(&mut self) {
        for dl in self.cl_dlights.iter_mut() {
            *dl = CDlight::default();
        }
    }

    /// Allocate a light slot. Reuses the slot with a matching key, then any
    /// expired slot, then slot 0. The slot comes back zeroed apart from the
    /// key; the caller fills in the fields.
    pub fn cl_alloc_dlight(&mut self, key: i32, cl_time: f32) -> usize {
        // first look for an exact key match
        if key != 0 {
            for i in 0..MAX_DLIGHTS {
                if self.cl_dlights[i].key == key {
                    self.cl_dlights[i] = CDlight::default();
                    self.cl_dlights[i].key = key;
                    return i;
                }
            }
        }

        // then look for anything else
        for i in 0..MAX_DLIGHTS {
            if self.cl_dlights[i].die < cl_time {
                self.cl_dlights[i] = CDlight::default();
                self.cl_dlights[i].key = key;
                return i;
            }
        }

        self.cl_dlights[0] = CDlight::default();
        self.cl_dlights[0].key = key;
        0
    }

    /// Expire and decay active lights once per frame.
    pub fn cl_run_dlights(&mut self, cl_time: f32, frametime: f32) {
        for dl in self.cl_dlights.iter_mut() {
            if dl.radius == 0.0 {
                continue;
            }

            if dl.die < cl_time {
                dl.radius = 0.0;
                continue;
            }
            dl.radius -= frametime * dl.decay;
            if dl.radius < 0.0 {
                dl.radius = 0.0;
            }
        }
    }

    /// Hand every live light to the renderer. Channels are converted back
    /// to normalized floats at the hand-off.
    pub fn cl_add_dlights<F>(&self, mut add_light_fn: F)
    where
        F: FnMut(&Vec3, f32, f32, f32, f32),
    {
        for dl in self.cl_dlights.iter() {
            if dl.radius == 0.0 {
                continue;
            }
            add_light_fn(
                &dl.origin,
                dl.radius,
                dl.color[0] as f32 / 255.0,
                dl.color[1] as f32 / 255.0,
                dl.color[2] as f32 / 255.0,
            );
        }
    }
}

// ============================================================
// Tests
// ============================================================
