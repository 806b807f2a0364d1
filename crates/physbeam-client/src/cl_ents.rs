// cl_ents.rs -- client entity table and attachment queries

use physbeam_common::q_shared::{Vec3, MAX_EDICTS};

pub const MAX_ATTACHMENTS: usize = 4;

/// A model attachment point, updated by animation each frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Attachment {
    pub valid: bool,
    pub origin: Vec3,
    pub angles: Vec3,
}

/// Client-side entity mirror. Only the fields the effect code reads.
#[derive(Debug, Clone, Default)]
pub struct CEntity {
    pub origin: Vec3,
    pub angles: Vec3,
    pub attachments: [Attachment; MAX_ATTACHMENTS],
}

impl CEntity {
    /// Current world position and angles of a named attachment slot.
    /// Fails when the slot is out of range or the model doesn't carry it.
    pub fn get_attachment(&self, index: usize) -> Option<(Vec3, Vec3)> {
        let at = self.attachments.get(index)?;
        if !at.valid {
            return None;
        }
        Some((at.origin, at.angles))
    }
}

// ============================================================
// Entity table
// ============================================================

pub struct ClientEntState {
    entities: Vec<Option<CEntity>>,
}

impl Default for ClientEntState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientEntState {
    pub fn new() -> Self {
        Self {
            entities: vec![None; MAX_EDICTS],
        }
    }

    /// Look up a live entity by number. None for free slots and
    /// out-of-range numbers.
    pub fn get_ent(&self, num: i32) -> Option<&CEntity> {
        if num < 0 || num as usize >= self.entities.len() {
            return None;
        }
        self.entities[num as usize].as_ref()
    }

    pub fn get_ent_mut(&mut self, num: i32) -> Option<&mut CEntity> {
        if num < 0 || num as usize >= self.entities.len() {
            return None;
        }
        self.entities[num as usize].as_mut()
    }

    /// Bring an entity slot into use, resetting it to defaults.
    pub fn spawn(&mut self, num: i32) -> Option<&mut CEntity> {
        if num < 0 || num as usize >= self.entities.len() {
            return None;
        }
        self.entities[num as usize] = Some(CEntity::default());
        self.entities[num as usize].as_mut()
    }

    pub fn free_ent(&mut self, num: i32) {
        if num >= 0 && (num as usize) < self.entities.len() {
            self.entities[num as usize] = None;
        }
    }

    /// Write an attachment point on a live entity, as the animation code
    /// does after advancing a frame.
    pub fn set_attachment(&mut self, num: i32, index: usize, origin: Vec3, angles: Vec3) -> bool {
        if index >= MAX_ATTACHMENTS {
            return false;
        }
        match self.get_ent_mut(num) {
            Some(ent) => {
                ent.attachments[index] = Attachment {
                    valid: true,
                    origin,
                    angles,
                };
                true
            }
            None => false,
        }
    }
}

// ============================================================
// Tests
// ============================================================
