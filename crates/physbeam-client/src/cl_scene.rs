// cl_scene.rs -- scene visibility registration for client renderables

use physbeam_common::common::com_printf;
use physbeam_common::q_shared::Vec3;

pub const MAX_RENDERABLES: usize = 256;

/// Handle returned by the scene system. Slot index + 1; zero means
/// "not registered".
pub type RenderHandle = i32;

pub const INVALID_RENDER_HANDLE: RenderHandle = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderGroup {
    #[default]
    Opaque,
    Translucent,
}

/// Capability set a client-side renderable exposes to the scene system.
pub trait Renderable {
    fn render_origin(&self) -> Vec3;
    /// Bounds relative to the render origin (mins, maxs).
    fn render_bounds(&self) -> (Vec3, Vec3);
    fn should_draw(&self) -> bool {
        true
    }
    fn is_transparent(&self) -> bool;
}

/// The registration surface of the scene system. Renderables hold the
/// returned handle while registered and give it back on removal.
pub trait SceneRegistry {
    fn add_renderable(&mut self, group: RenderGroup) -> RenderHandle;
    fn renderable_changed(&mut self, handle: RenderHandle);
    fn remove_renderable(&mut self, handle: RenderHandle);
}

// ============================================================
// Scene link storage
// ============================================================

#[derive(Debug, Clone, Copy, Default)]
struct SceneLink {
    in_use: bool,
    group: RenderGroup,
    /// Set when the renderable's bounds/transform may have moved since the
    /// last visibility pass; the walk clears it.
    dirty: bool,
}

pub struct SceneState {
    links: Vec<SceneLink>,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneState {
    pub fn new() -> Self {
        Self {
            links: vec![SceneLink::default(); MAX_RENDERABLES],
        }
    }

    pub fn is_registered(&self, handle: RenderHandle) -> bool {
        self.slot(handle).map_or(false, |l| l.in_use)
    }

    pub fn group(&self, handle: RenderHandle) -> Option<RenderGroup> {
        self.slot(handle).filter(|l| l.in_use).map(|l| l.group)
    }

    pub fn num_registered(&self) -> usize {
        self.links.iter().filter(|l| l.in_use).count()
    }

    /// Clear and report a link's dirty flag, as the visibility walk does.
    pub fn take_dirty(&mut self, handle: RenderHandle) -> bool {
        if let Some(l) = self.slot_mut(handle) {
            let was = l.in_use && l.dirty;
            l.dirty = false;
            return was;
        }
        false
    }

    fn slot(&self, handle: RenderHandle) -> Option<&SceneLink> {
        if handle <= 0 || handle as usize > self.links.len() {
            return None;
        }
        Some(&self.links[handle as usize - 1])
    }

    fn slot_mut(&mut self, handle: RenderHandle) -> Option<&mut SceneLink> {
        if handle <= 0 || handle as usize > self.links.len() {
            return None;
        }
        Some(&mut self.links[handle as usize - 1])
    }
}

impl SceneRegistry for SceneState {
    fn add_renderable(&mut self, group: RenderGroup) -> RenderHandle {
        for (i, link) in self.links.iter_mut().enumerate() {
            if !link.in_use {
                link.in_use = true;
                link.group = group;
                link.dirty = true; // new link needs an initial visibility pass
                return (i + 1) as RenderHandle;
            }
        }
        com_printf("scene link overflow!\n");
        INVALID_RENDER_HANDLE
    }

    fn renderable_changed(&mut self, handle: RenderHandle) {
        if let Some(link) = self.slot_mut(handle) {
            if link.in_use {
                link.dirty = true;
            }
        }
    }

    fn remove_renderable(&mut self, handle: RenderHandle) {
        if let Some(link) = self.slot_mut(handle) {
            *link = SceneLink::default();
        }
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut scene = SceneState::new();
        let h = scene.add_renderable(RenderGroup::Translucent);
        assert_ne!(h, INVALID_RENDER_HANDLE);
        assert!(scene.is_registered(h));
        assert_eq!(scene.group(h), Some(RenderGroup::Translucent));

        scene.remove_renderable(h);
        assert!(!scene.is_registered(h));
        assert_eq!(scene.num_registered(), 0);
    }

    #[test]
    fn test_changed_marks_dirty() {
        let mut scene = SceneState::new();
        let h = scene.add_renderable(RenderGroup::Translucent);
        assert!(scene.take_dirty(h)); // initial registration pass
        assert!(!scene.take_dirty(h));

        scene.renderable_changed(h);
        assert!(scene.take_dirty(h));
    }

    #[test]
    fn test_stale_handle_ignored() {
        let mut scene = SceneState::new();
        let h = scene.add_renderable(RenderGroup::Opaque);
        scene.remove_renderable(h);
        // a second removal or change on the dead handle must be harmless
        scene.remove_renderable(h);
        scene.renderable_changed(h);
        assert!(!scene.take_dirty(h));
        assert_eq!(scene.num_registered(), 0);
    }

    #[test]
    fn test_invalid_handle_is_never_registered() {
        let scene = SceneState::new();
        assert!(!scene.is_registered(INVALID_RENDER_HANDLE));
        assert!(!scene.is_registered(-5));
    }

    #[test]
    fn test_slots_reused_after_removal() {
        let mut scene = SceneState::new();
        let h1 = scene.add_renderable(RenderGroup::Opaque);
        scene.remove_renderable(h1);
        let h2 = scene.add_renderable(RenderGroup::Translucent);
        assert_eq!(h1, h2);
    }
}
