//! Timed lifetimes for transient hit effects.
//!
//! Each spawned effect is tracked by an `EffectHandle` until it is released.
//! After `lifetime` seconds the effect is stopped, and after a further
//! release grace it is removed and freed. `clear_all` frees everything at
//! once and cancels the pending timers.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::collaborators::EffectPlayer;
use crate::combat::types::Position;
use crate::core::config::EffectConfig;
use crate::core::constants::MIN_EFFECT_LIFETIME_SECONDS;
use crate::core::scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    NormalHit,
    CriticalHit,
}

impl EffectKind {
    pub fn is_critical(self) -> bool {
        matches!(self, EffectKind::CriticalHit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectPhase {
    Playing,
    /// Stopped, waiting out the release grace.
    Stopping,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectHandle {
    pub id: EffectId,
    pub kind: EffectKind,
    pub position: Position,
    pub spawned_at: f64,
    pub expires_at: f64,
    pub critical: bool,
    pub phase: EffectPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EffectStage {
    Stop(EffectId),
    Release(EffectId),
}

pub struct EffectLifecycleManager {
    lifetime: f64,
    release_grace: f64,
    next_id: u64,
    handles: HashMap<EffectId, EffectHandle>,
    timers: Scheduler<EffectStage>,
    renderer: Option<Box<dyn EffectPlayer>>,
}

impl fmt::Debug for EffectLifecycleManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectLifecycleManager")
            .field("lifetime", &self.lifetime)
            .field("active", &self.handles.len())
            .field("has_renderer", &self.renderer.is_some())
            .finish()
    }
}

impl EffectLifecycleManager {
    pub fn new(config: &EffectConfig) -> Self {
        Self {
            lifetime: config.lifetime.max(MIN_EFFECT_LIFETIME_SECONDS),
            release_grace: config.release_grace.max(0.0),
            next_id: 0,
            handles: HashMap::new(),
            timers: Scheduler::new(),
            renderer: None,
        }
    }

    pub fn set_renderer(&mut self, renderer: Option<Box<dyn EffectPlayer>>) {
        self.renderer = renderer;
    }

    pub fn lifetime(&self) -> f64 {
        self.lifetime
    }

    /// Applies to effects spawned after the call.
    pub fn set_lifetime(&mut self, lifetime: f64) {
        self.lifetime = lifetime.max(MIN_EFFECT_LIFETIME_SECONDS);
    }

    pub fn now(&self) -> f64 {
        self.timers.now()
    }

    pub fn active_count(&self) -> usize {
        self.handles.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending_count()
    }

    pub fn get(&self, id: EffectId) -> Option<&EffectHandle> {
        self.handles.get(&id)
    }

    pub fn handles(&self) -> impl Iterator<Item = &EffectHandle> {
        self.handles.values()
    }

    pub fn spawn(&mut self, kind: EffectKind, position: Position) -> EffectHandle {
        let id = EffectId(self.next_id);
        self.next_id += 1;

        let now = self.timers.now();
        let handle = EffectHandle {
            id,
            kind,
            position,
            spawned_at: now,
            expires_at: now + self.lifetime,
            critical: kind.is_critical(),
            phase: EffectPhase::Playing,
        };
        self.handles.insert(id, handle);
        self.timers.schedule(self.lifetime, EffectStage::Stop(id));

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.play(id, kind, position, handle.critical);
        }
        handle
    }

    /// Advances effect timers. Returns the ids freed during this call.
    pub fn update(&mut self, dt: f64) -> Vec<EffectId> {
        self.timers.advance(dt);

        let mut released = Vec::new();
        while let Some(due) = self.timers.pop_due() {
            match due.task {
                EffectStage::Stop(id) => {
                    if let Some(handle) = self.handles.get_mut(&id) {
                        handle.phase = EffectPhase::Stopping;
                        if let Some(renderer) = self.renderer.as_mut() {
                            renderer.stop(id);
                        }
                        self.timers
                            .schedule_at(due.due + self.release_grace, EffectStage::Release(id));
                    }
                }
                EffectStage::Release(id) => {
                    if self.handles.remove(&id).is_some() {
                        if let Some(renderer) = self.renderer.as_mut() {
                            renderer.release(id);
                        }
                        released.push(id);
                    }
                }
            }
        }
        released
    }

    /// Frees every handle immediately, regardless of elapsed time.
    pub fn clear_all(&mut self) -> usize {
        self.timers.cancel_all();
        let mut ids: Vec<EffectId> = self.handles.drain().map(|(id, _)| id).collect();
        ids.sort();
        if let Some(renderer) = self.renderer.as_mut() {
            for id in &ids {
                renderer.release(*id);
            }
        }
        if !ids.is_empty() {
            debug!(count = ids.len(), "cleared all effects");
        }
        ids.len()
    }
}
