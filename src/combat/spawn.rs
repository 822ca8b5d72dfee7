//! Spawn-cycle state machine: normal kills build toward a single boss spawn.

use rand::Rng;
use tracing::info;

use super::types::{MonsterInstance, MonsterTemplate, Position};
use crate::core::config::SpawnConfig;
use crate::core::constants::{BOSS_TEMPLATE_INDEX, NORMAL_TEMPLATE_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnState {
    AwaitingSpawn,
    NormalAlive,
    BossAlive,
}

/// What the kill-or-boss-kill event meant for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillOutcome {
    Counted { kill_count: u32 },
    SessionComplete,
}

#[derive(Debug, Clone)]
pub struct SpawnController {
    templates: Vec<MonsterTemplate>,
    boss_threshold: u32,
    spawn_position: Position,
    kill_count: u32,
    boss_spawned: bool,
    state: SpawnState,
    current: Option<MonsterInstance>,
}

impl SpawnController {
    pub fn new(config: &SpawnConfig) -> Self {
        Self {
            templates: config.templates.clone(),
            boss_threshold: config.boss_threshold,
            spawn_position: config.spawn_position,
            kill_count: 0,
            boss_spawned: false,
            state: SpawnState::AwaitingSpawn,
            current: None,
        }
    }

    pub fn state(&self) -> SpawnState {
        self.state
    }

    pub fn kill_count(&self) -> u32 {
        self.kill_count
    }

    pub fn boss_spawned(&self) -> bool {
        self.boss_spawned
    }

    pub fn boss_threshold(&self) -> u32 {
        self.boss_threshold
    }

    pub fn templates(&self) -> &[MonsterTemplate] {
        &self.templates
    }

    pub fn current(&self) -> Option<&MonsterInstance> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut MonsterInstance> {
        self.current.as_mut()
    }

    /// Chooses the next template index and updates the one-shot boss flag.
    ///
    /// A boss is picked only on the first call after the threshold is reached.
    /// Later calls with the count still over the threshold fall back to a
    /// normal pick and clear the flag again.
    pub fn next_template_index(&mut self, rng: &mut impl Rng) -> usize {
        let index = if self.kill_count < self.boss_threshold {
            self.boss_spawned = false;
            rng.gen_range(0..NORMAL_TEMPLATE_COUNT)
        } else if !self.boss_spawned {
            self.boss_spawned = true;
            BOSS_TEMPLATE_INDEX
        } else {
            self.boss_spawned = false;
            rng.gen_range(0..NORMAL_TEMPLATE_COUNT)
        };

        if index >= self.templates.len() {
            0
        } else {
            index
        }
    }

    /// Instantiates the next monster if none is alive.
    ///
    /// Returns `None` when a monster is still present or the table is empty.
    pub fn try_spawn(&mut self, rng: &mut impl Rng) -> Option<&MonsterInstance> {
        if self.current.is_some() || self.templates.is_empty() {
            return None;
        }

        let index = self.next_template_index(rng);
        let monster = MonsterInstance::spawn(index, &self.templates[index], self.spawn_position);

        self.state = if monster.is_boss {
            info!(name = %monster.name, kills = self.kill_count, "boss spawned");
            SpawnState::BossAlive
        } else {
            info!(name = %monster.name, kills = self.kill_count, "monster spawned");
            SpawnState::NormalAlive
        };
        self.current = Some(monster);
        self.current.as_ref()
    }

    /// Drops the current (dead) monster so the next idle tick can spawn.
    pub fn release_current(&mut self) -> Option<MonsterInstance> {
        self.state = SpawnState::AwaitingSpawn;
        self.current.take()
    }

    pub fn on_kill(&mut self) -> u32 {
        self.kill_count += 1;
        self.kill_count
    }

    /// Boss deaths end the session; the kill count is left untouched.
    pub fn on_boss_kill(&mut self) -> KillOutcome {
        info!(kills = self.kill_count, "boss defeated");
        KillOutcome::SessionComplete
    }

    /// Routes a death to `on_kill` or `on_boss_kill`.
    pub fn record_death(&mut self, was_boss: bool) -> KillOutcome {
        if was_boss {
            self.on_boss_kill()
        } else {
            KillOutcome::Counted {
                kill_count: self.on_kill(),
            }
        }
    }

    pub fn reset(&mut self) {
        self.kill_count = 0;
        self.boss_spawned = false;
    }
}
