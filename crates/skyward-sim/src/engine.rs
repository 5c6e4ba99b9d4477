//! The simulation engine.
//!
//! Owns the ECS world and all session state, applies queued player
//! commands at tick boundaries, runs the system pipeline at a fixed
//! rate, and emits a `WorldSnapshot` after every tick. All randomness
//! flows through one seeded RNG, so a given seed and command sequence
//! replays identically.

use std::collections::VecDeque;
use std::path::PathBuf;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skyward_core::commands::{ControlAxes, PlayerCommand};
use skyward_core::components::{
    Airframe, AngularVelocity, Attitude, Downed, EnemyAgent, Health, Loadout, PlayerState,
    PlayerTag, Position, Velocity, Wreck,
};
use skyward_core::constants::*;
use skyward_core::enums::{AircraftModel, GamePhase};
use skyward_core::events::{AudioEvent, GameEvent};
use skyward_core::state::WorldSnapshot;
use skyward_core::types::{Orientation, SimTime, Vec3};

use crate::missions::MissionLog;
use crate::persistence::{
    self, SaveData, SaveError, SavedAircraft, SavedPlayer, SavedSettings,
};
use crate::progress::PlayerProgress;
use crate::scheduler::{DeferredEffect, TimerQueue};
use crate::systems;
use crate::systems::environment::EnvironmentState;
use crate::systems::spawner::SpawnerState;
use crate::world_setup;

/// Engine construction parameters.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed. The same seed and command sequence replays identically.
    pub seed: u64,
    /// World difficulty in [0.5, 2.0].
    pub difficulty: f64,
    /// Directory for save files. `None` disables saving and autosave.
    pub save_dir: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            difficulty: 1.0,
            save_dir: None,
        }
    }
}

/// The simulation engine. One instance per play session.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
    audio_events: Vec<AudioEvent>,
    timers: TimerQueue,
    missions: MissionLog,
    progress: PlayerProgress,
    controls: ControlAxes,
    difficulty: f64,
    environment: EnvironmentState,
    spawner: SpawnerState,
    next_enemy_id: u32,
    save_dir: Option<PathBuf>,
    last_autosave_tick: u64,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        world_setup::setup_world(&mut world, AircraftModel::Standard, 1, 1);

        let mut engine = Self {
            world,
            time: SimTime::default(),
            phase: GamePhase::Active,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            audio_events: Vec::new(),
            timers: TimerQueue::default(),
            missions: MissionLog::default_campaign(),
            progress: PlayerProgress::default(),
            controls: ControlAxes::default(),
            difficulty: config.difficulty.clamp(0.5, 2.0),
            environment: EnvironmentState::default(),
            spawner: SpawnerState::default(),
            next_enemy_id: 1,
            save_dir: config.save_dir,
            last_autosave_tick: 0,
        };

        // Resume from the autosave when one exists.
        if engine.save_dir.is_some() {
            if let Err(err) = engine.load_game("autosave") {
                log::debug!("no save loaded: {}", err);
            }
        }
        engine
    }

    /// Queue a command for the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance the simulation by one tick and return the snapshot.
    pub fn tick(&mut self) -> WorldSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            // Advance first so systems never observe tick 0, which the
            // last-fired-tick fields reserve for "never".
            self.time.advance();
            self.apply_due_timers();
            self.run_systems();
            self.maybe_autosave();
        }

        systems::snapshot::build(
            &self.world,
            self.time,
            self.phase,
            &self.environment,
            &self.missions,
            &self.progress,
            &mut self.events,
            &mut self.audio_events,
        )
    }

    fn run_systems(&mut self) {
        let tick = self.time.tick;
        let player_position = self.player_position().unwrap_or(Vec3::ZERO);

        systems::environment::run(
            &mut self.environment,
            &mut self.rng,
            &mut self.timers,
            &mut self.events,
            player_position,
            tick,
        );
        systems::spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.spawner,
            player_position,
            self.progress.level,
            self.difficulty,
            &mut self.next_enemy_id,
            tick,
        );
        systems::enemy_ai::run(&mut self.world, &mut self.rng, &mut self.audio_events, tick);
        systems::player::run(
            &mut self.world,
            &mut self.rng,
            &self.controls,
            tick,
            &mut self.events,
            &mut self.audio_events,
        );
        systems::weapons::run(&mut self.world, &mut self.audio_events, tick);
        systems::movement::run(&mut self.world);
        systems::collision::run(
            &mut self.world,
            &mut self.rng,
            &mut self.progress,
            &mut self.missions,
            &mut self.timers,
            &mut self.despawn_buffer,
            &mut self.events,
            &mut self.audio_events,
            tick,
        );
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            match command {
                PlayerCommand::SetControls { axes } => {
                    self.controls = ControlAxes {
                        pitch: axes.pitch.clamp(-1.0, 1.0),
                        yaw: axes.yaw.clamp(-1.0, 1.0),
                        roll: axes.roll.clamp(-1.0, 1.0),
                    };
                }
                PlayerCommand::SetThrottle { throttle } => {
                    let throttle = throttle.clamp(0.0, 1.0);
                    for (_e, (_, state)) in
                        self.world.query_mut::<(&PlayerTag, &mut PlayerState)>()
                    {
                        state.throttle = throttle;
                    }
                }
                PlayerCommand::SetFiring { firing } => {
                    for (_e, (_, loadout)) in self.world.query_mut::<(&PlayerTag, &mut Loadout)>()
                    {
                        loadout.firing = firing;
                    }
                }
                PlayerCommand::SelectWeapon { index } => {
                    for (_e, (_, loadout)) in self.world.query_mut::<(&PlayerTag, &mut Loadout)>()
                    {
                        if index < loadout.weapons.len() {
                            loadout.selected = index;
                        }
                    }
                }
                PlayerCommand::SetAircraftModel { model } => {
                    for (_e, (_, airframe)) in
                        self.world.query_mut::<(&PlayerTag, &mut Airframe)>()
                    {
                        airframe.model = model;
                    }
                }
                PlayerCommand::SetEngineLevel { level } => {
                    for (_e, (_, airframe)) in
                        self.world.query_mut::<(&PlayerTag, &mut Airframe)>()
                    {
                        airframe.engine_level = level.clamp(1, 5);
                    }
                }
                PlayerCommand::SetArmorLevel { level } => {
                    for (_e, (_, airframe)) in
                        self.world.query_mut::<(&PlayerTag, &mut Airframe)>()
                    {
                        airframe.armor_level = level.clamp(1, 5);
                    }
                }
                PlayerCommand::SetDifficulty { difficulty } => {
                    self.difficulty = difficulty.clamp(0.5, 2.0);
                }
                PlayerCommand::SaveGame { slot } => match self.save_game(&slot) {
                    Ok(()) => self.events.push(GameEvent::Notification {
                        message: "Game saved".to_string(),
                    }),
                    Err(err) => log::warn!("save to slot {} failed: {}", slot, err),
                },
                PlayerCommand::Pause => {
                    if self.phase == GamePhase::Active {
                        self.phase = GamePhase::Paused;
                    }
                }
                PlayerCommand::Resume => {
                    if self.phase == GamePhase::Paused {
                        self.phase = GamePhase::Active;
                    }
                }
            }
        }
    }

    fn apply_due_timers(&mut self) {
        for effect in self.timers.drain_due(self.time.tick) {
            match effect {
                DeferredEffect::RespawnPlayer => self.respawn_player(),
                DeferredEffect::DespawnWreck(id) => {
                    let wreck = self
                        .world
                        .query::<(&EnemyAgent, &Wreck)>()
                        .iter()
                        .find(|(_, (agent, _))| agent.id == id)
                        .map(|(entity, _)| entity);
                    if let Some(entity) = wreck {
                        let _ = self.world.despawn(entity);
                    }
                }
                DeferredEffect::Thunder => self.audio_events.push(AudioEvent::Thunder),
            }
        }
    }

    fn respawn_player(&mut self) {
        let Some(entity) = self.player_entity() else {
            return;
        };
        let _ = self.world.remove_one::<Downed>(entity);

        if let Ok(mut pos) = self.world.get::<&mut Position>(entity) {
            pos.0 = Vec3::new(0.0, RESPAWN_HEIGHT, 0.0);
        }
        if let Ok(mut vel) = self.world.get::<&mut Velocity>(entity) {
            vel.0 = Vec3::new(0.0, 0.0, 0.2);
        }
        if let Ok(mut attitude) = self.world.get::<&mut Attitude>(entity) {
            attitude.0 = Orientation::default();
        }
        if let Ok(mut ang_vel) = self.world.get::<&mut AngularVelocity>(entity) {
            *ang_vel = AngularVelocity::default();
        }
        if let Ok(mut health) = self.world.get::<&mut Health>(entity) {
            health.hp = health.max;
        }
        if let Ok(mut state) = self.world.get::<&mut PlayerState>(entity) {
            state.fuel = 100.0;
            state.throttle = 0.5;
            state.is_stalling = false;
            state.stall_assist_until_tick = 0;
            state.low_altitude_warning = false;
            state.g_force = 1.0;
        }

        self.events.push(GameEvent::PlayerRespawned);
        self.events.push(GameEvent::Notification {
            message: "Back in the air!".to_string(),
        });
    }

    fn maybe_autosave(&mut self) {
        if self.save_dir.is_none() {
            return;
        }
        let interval = (AUTOSAVE_INTERVAL_SECS * TICK_RATE as f64) as u64;
        if self.time.tick.saturating_sub(self.last_autosave_tick) < interval {
            return;
        }
        self.last_autosave_tick = self.time.tick;
        if let Err(err) = self.save_game("autosave") {
            log::warn!("autosave failed: {}", err);
        }
    }

    /// Write the durable player state to the named slot.
    pub fn save_game(&self, slot: &str) -> Result<(), SaveError> {
        let Some(dir) = &self.save_dir else {
            return Err(SaveError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no save directory configured",
            )));
        };

        let data = SaveData {
            player: SavedPlayer {
                progress: self.progress.clone(),
                health: self.player_component::<Health>().map_or(100.0, |h| h.hp),
                fuel: self
                    .player_component::<PlayerState>()
                    .map_or(100.0, |s| s.fuel),
            },
            aircraft: self
                .player_component::<Airframe>()
                .map(|airframe| {
                    let weapons = self
                        .player_component::<Loadout>()
                        .map(|l| l.weapons.clone())
                        .unwrap_or_default();
                    SavedAircraft {
                        model: airframe.model,
                        engine_level: airframe.engine_level,
                        armor_level: airframe.armor_level,
                        weapons,
                    }
                })
                .unwrap_or(SavedAircraft {
                    model: AircraftModel::Standard,
                    engine_level: 1,
                    armor_level: 1,
                    weapons: Vec::new(),
                }),
            settings: SavedSettings {
                difficulty: self.difficulty,
            },
            slot_name: slot.to_string(),
            saved_at_tick: self.time.tick,
        };
        persistence::save_to_file(dir, slot, &data)
    }

    /// Restore durable player state from the named slot.
    pub fn load_game(&mut self, slot: &str) -> Result<(), SaveError> {
        let Some(dir) = &self.save_dir else {
            return Err(SaveError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no save directory configured",
            )));
        };
        let data = persistence::load_from_file(dir, slot)?;

        self.progress = data.player.progress;
        self.difficulty = data.settings.difficulty.clamp(0.5, 2.0);

        if let Some(entity) = self.player_entity() {
            if let Ok(mut health) = self.world.get::<&mut Health>(entity) {
                health.hp = data.player.health.clamp(0.0, health.max);
            }
            if let Ok(mut state) = self.world.get::<&mut PlayerState>(entity) {
                state.fuel = data.player.fuel.clamp(0.0, 100.0);
            }
            if let Ok(mut airframe) = self.world.get::<&mut Airframe>(entity) {
                airframe.model = data.aircraft.model;
                airframe.engine_level = data.aircraft.engine_level.clamp(1, 5);
                airframe.armor_level = data.aircraft.armor_level.clamp(1, 5);
            }
            if !data.aircraft.weapons.is_empty() {
                if let Ok(mut loadout) = self.world.get::<&mut Loadout>(entity) {
                    loadout.weapons = data.aircraft.weapons;
                    loadout.selected = loadout.selected.min(loadout.weapons.len() - 1);
                }
            }
        }
        Ok(())
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn progress(&self) -> &PlayerProgress {
        &self.progress
    }

    pub fn missions(&self) -> &MissionLog {
        &self.missions
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn player_entity(&self) -> Option<Entity> {
        self.world
            .query::<&PlayerTag>()
            .iter()
            .next()
            .map(|(entity, _)| entity)
    }

    fn player_position(&self) -> Option<Vec3> {
        self.world
            .query::<(&PlayerTag, &Position)>()
            .iter()
            .next()
            .map(|(_, (_, pos))| pos.0)
    }

    fn player_component<T: hecs::Component + Clone>(&self) -> Option<T> {
        let entity = self.player_entity()?;
        self.world.get::<&T>(entity).ok().map(|c| (*c).clone())
    }
}
