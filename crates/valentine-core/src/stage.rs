//! Off-screen stage that rendered surfaces attach to while they are painted.
//!
//! Attaching hands out an [`AttachedSurface`] guard; dropping the guard
//! detaches the surface, so an export that fails half-way can never leave a
//! surface behind. The stage is cheap to clone and all clones share state.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;
use ulid::Ulid;

use crate::render::OffscreenSurface;

/// Identifier of one attached surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub Ulid);

impl SurfaceId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SurfaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface_{}", self.0)
    }
}

#[derive(Debug, Default)]
struct StageState {
    attached: HashSet<SurfaceId>,
    /// Most surfaces ever attached at once
    peak: usize,
}

/// Host for surfaces that are being rendered
#[derive(Debug, Clone, Default)]
pub struct Stage {
    state: Arc<Mutex<StageState>>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a surface for the lifetime of the returned guard
    pub fn attach(&self, surface: OffscreenSurface) -> AttachedSurface {
        let id = SurfaceId::new();
        let mut state = self.state.lock();
        state.attached.insert(id);
        state.peak = state.peak.max(state.attached.len());
        debug!(%id, attached = state.attached.len(), "Attached surface");

        AttachedSurface {
            stage: self.clone(),
            id,
            surface,
        }
    }

    /// Surfaces currently attached
    pub fn attached_count(&self) -> usize {
        self.state.lock().attached.len()
    }

    /// Whether a particular surface is still attached
    pub fn is_attached(&self, id: SurfaceId) -> bool {
        self.state.lock().attached.contains(&id)
    }

    /// Most surfaces that were attached at the same time
    pub fn peak_attached(&self) -> usize {
        self.state.lock().peak
    }

    fn detach(&self, id: SurfaceId) {
        let mut state = self.state.lock();
        state.attached.remove(&id);
        debug!(%id, attached = state.attached.len(), "Detached surface");
    }
}

/// A surface attached to a [`Stage`]; detaches on drop.
#[derive(Debug)]
pub struct AttachedSurface {
    stage: Stage,
    id: SurfaceId,
    surface: OffscreenSurface,
}

impl AttachedSurface {
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn surface(&self) -> &OffscreenSurface {
        &self.surface
    }
}

impl Drop for AttachedSurface {
    fn drop(&mut self) {
        self.stage.detach(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardState;
    use crate::render::CardRenderer;

    fn surface() -> OffscreenSurface {
        CardRenderer::render(&CardState::default())
    }

    #[test]
    fn test_guard_detaches_on_drop() {
        let stage = Stage::new();
        let attached = stage.attach(surface());
        let id = attached.id();
        assert!(stage.is_attached(id));
        assert_eq!(stage.attached_count(), 1);

        drop(attached);
        assert!(!stage.is_attached(id));
        assert_eq!(stage.attached_count(), 0);
    }

    #[test]
    fn test_clones_share_state() {
        let stage = Stage::new();
        let other = stage.clone();
        let first = stage.attach(surface());
        let second = other.attach(surface());

        assert_ne!(first.id(), second.id());
        assert_eq!(stage.attached_count(), 2);
        assert_eq!(stage.peak_attached(), 2);

        drop(first);
        drop(second);
        assert_eq!(other.attached_count(), 0);
        assert_eq!(other.peak_attached(), 2);
    }

    #[test]
    fn test_guard_detaches_on_early_return() {
        fn failing(stage: &Stage) -> Result<(), &'static str> {
            let _attached = stage.attach(surface());
            Err("rasterizer gave up")
        }

        let stage = Stage::new();
        assert!(failing(&stage).is_err());
        assert_eq!(stage.attached_count(), 0);
    }
}
