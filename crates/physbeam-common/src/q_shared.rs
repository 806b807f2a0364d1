// q_shared.rs — foundational types and functions shared by all modules

// ============================================================
// Basic types
// ============================================================

pub type Vec3 = [f32; 3];

pub const VEC3_ORIGIN: Vec3 = [0.0, 0.0, 0.0];

// angle indexes
pub const PITCH: usize = 0;
pub const YAW: usize = 1;
pub const ROLL: usize = 2;

// ============================================================
// Limits
// ============================================================

/// Upper bound on networked entity slots the client tracks.
pub const MAX_EDICTS: usize = 1024;

// ============================================================
// Renderer interface types
// ============================================================

/// Dynamic light as handed to the renderer each frame. Color channels are
/// normalized [0,1]; `intensity` is the world-unit radius.
#[derive(Debug, Clone, Copy, Default)]
#[repr(C)]
pub struct DLight {
    pub origin: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

// ============================================================
// Input key bits
// ============================================================

bitflags::bitflags! {
    /// Per-frame pressed-button bits carried in the outgoing user command.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct KeyBits: i32 {
        const ATTACK  = 0x0001;
        const USE     = 0x0002;
        const WEAPON1 = 0x0004;
        const WEAPON2 = 0x0008;
    }
}

// ============================================================
// Vector math
// ============================================================

#[inline]
pub fn vector_add(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn vector_subtract(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn vector_copy(src: &Vec3) -> Vec3 {
    *src
}

#[inline]
pub fn vector_clear(v: &mut Vec3) {
    v[0] = 0.0;
    v[1] = 0.0;
    v[2] = 0.0;
}

#[inline]
pub fn vector_set(v: &mut Vec3, x: f32, y: f32, z: f32) {
    v[0] = x;
    v[1] = y;
    v[2] = z;
}

pub fn vector_scale(v: &Vec3, scale: f32) -> Vec3 {
    [v[0] * scale, v[1] * scale, v[2] * scale]
}

/// veca + scale * vecb
pub fn vector_ma(veca: &Vec3, scale: f32, vecb: &Vec3) -> Vec3 {
    [
        veca[0] + scale * vecb[0],
        veca[1] + scale * vecb[1],
        veca[2] + scale * vecb[2],
    ]
}

pub fn vector_compare(v1: &Vec3, v2: &Vec3) -> bool {
    v1[0] == v2[0] && v1[1] == v2[1] && v1[2] == v2[2]
}

pub fn vector_length(v: &Vec3) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_add_scale() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        assert_eq!(vector_add(&a, &b), [5.0, 7.0, 9.0]);
        assert_eq!(vector_scale(&a, 2.0), [2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_vector_ma() {
        let a = [1.0, 0.0, 0.0];
        let b = [0.0, 1.0, 0.0];
        assert_eq!(vector_ma(&a, 3.0, &b), [1.0, 3.0, 0.0]);
    }

    #[test]
    fn test_vector_length() {
        assert_eq!(vector_length(&[3.0, 4.0, 0.0]), 5.0);
    }

    #[test]
    fn test_keybits_disjoint() {
        let mut bits = KeyBits::ATTACK;
        bits.insert(KeyBits::WEAPON1);
        assert!(bits.contains(KeyBits::ATTACK));
        assert!(bits.contains(KeyBits::WEAPON1));
        assert!(!bits.contains(KeyBits::WEAPON2));
    }
}
