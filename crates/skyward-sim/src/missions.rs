//! Mission and objective ledger.
//!
//! Missions are engine-owned state, not ECS entities. Objectives are
//! matched by stable ids (checkpoint ids, enemy presets, factions);
//! completing every objective completes the mission, grants its reward,
//! and unlocks any mission whose dependencies are now all satisfied.

use serde::{Deserialize, Serialize};

use skyward_core::enums::{EnemyPreset, Faction, MissionStatus};
use skyward_core::events::GameEvent;
use skyward_core::state::{MissionView, ObjectiveView};

/// What completes an objective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ObjectiveKind {
    /// Fly through a checkpoint ring.
    ReachCheckpoint { checkpoint_id: String },
    /// Destroy a number of enemies of one faction.
    DefeatFaction { faction: Faction, required: u32 },
    /// Destroy a number of enemies of one preset.
    DefeatPreset { preset: EnemyPreset, required: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Objective {
    pub id: String,
    pub description: String,
    pub kind: ObjectiveKind,
    pub completed: bool,
    /// Kill counter for defeat objectives.
    pub progress: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    pub title: String,
    pub status: MissionStatus,
    pub objectives: Vec<Objective>,
    pub reward_credits: u32,
    pub reward_experience: u32,
    /// Mission ids that must be completed before this one activates.
    pub dependencies: Vec<String>,
}

/// Rewards granted by completed missions and objectives, to be applied
/// by the engine along with the emitted events.
#[derive(Debug, Default)]
pub struct MissionOutcome {
    pub credits: u32,
    pub experience: u32,
    pub events: Vec<GameEvent>,
}

/// The full mission ledger for a play session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionLog {
    pub missions: Vec<Mission>,
}

impl MissionLog {
    /// The default campaign: a flight tutorial followed by a chain of
    /// combat missions gated by dependencies.
    pub fn default_campaign() -> Self {
        let missions = vec![
            Mission {
                id: "tutorial".into(),
                title: "Flight Training".into(),
                status: MissionStatus::Active,
                objectives: vec![
                    checkpoint_objective("checkpoint1", "Fly through the first ring"),
                    checkpoint_objective("checkpoint2", "Fly through the second ring"),
                    checkpoint_objective("checkpoint3", "Land on the training island"),
                ],
                reward_credits: 300,
                reward_experience: 100,
                dependencies: vec![],
            },
            Mission {
                id: "mission1".into(),
                title: "Pirate Menace".into(),
                status: MissionStatus::Locked,
                objectives: vec![defeat_faction_objective(
                    "clear_pirates",
                    "Shoot down 3 pirate aircraft",
                    Faction::Pirates,
                    3,
                )],
                reward_credits: 500,
                reward_experience: 150,
                dependencies: vec!["tutorial".into()],
            },
            Mission {
                id: "mission2".into(),
                title: "Bomber Alley".into(),
                status: MissionStatus::Locked,
                objectives: vec![Objective {
                    id: "down_bombers".into(),
                    description: "Destroy 2 pirate bombers".into(),
                    kind: ObjectiveKind::DefeatPreset {
                        preset: EnemyPreset::PirateBomber,
                        required: 2,
                    },
                    completed: false,
                    progress: 0,
                }],
                reward_credits: 700,
                reward_experience: 200,
                dependencies: vec!["mission1".into()],
            },
            Mission {
                id: "mission3".into(),
                title: "Military Entanglement".into(),
                status: MissionStatus::Locked,
                objectives: vec![defeat_faction_objective(
                    "military_aces",
                    "Shoot down 4 military aircraft",
                    Faction::Military,
                    4,
                )],
                reward_credits: 1000,
                reward_experience: 300,
                dependencies: vec!["mission1".into(), "mission2".into()],
            },
            Mission {
                id: "mission4".into(),
                title: "The Sky Kraken".into(),
                status: MissionStatus::Locked,
                objectives: vec![Objective {
                    id: "slay_kraken".into(),
                    description: "Defeat the Sky Kraken".into(),
                    kind: ObjectiveKind::DefeatPreset {
                        preset: EnemyPreset::SkyKraken,
                        required: 1,
                    },
                    completed: false,
                    progress: 0,
                }],
                reward_credits: 2500,
                reward_experience: 800,
                dependencies: vec!["mission3".into()],
            },
        ];
        Self { missions }
    }

    /// Record a triggered checkpoint against active missions.
    pub fn on_checkpoint(&mut self, checkpoint_id: &str) -> MissionOutcome {
        let mut outcome = MissionOutcome::default();
        for mission_index in 0..self.missions.len() {
            if self.missions[mission_index].status != MissionStatus::Active {
                continue;
            }
            let mission = &mut self.missions[mission_index];
            let mission_id = mission.id.clone();
            for objective in &mut mission.objectives {
                let matches = match &objective.kind {
                    ObjectiveKind::ReachCheckpoint { checkpoint_id: id } => id == checkpoint_id,
                    _ => false,
                };
                if matches && !objective.completed {
                    objective.completed = true;
                    outcome.events.push(GameEvent::ObjectiveCompleted {
                        mission_id: mission_id.clone(),
                        objective_id: objective.id.clone(),
                    });
                }
            }
            self.check_completion(mission_index, &mut outcome);
        }
        self.unlock_dependents(&mut outcome);
        outcome
    }

    /// Record an enemy kill against active missions.
    pub fn on_enemy_killed(&mut self, preset: EnemyPreset, faction: Faction) -> MissionOutcome {
        let mut outcome = MissionOutcome::default();
        for mission_index in 0..self.missions.len() {
            if self.missions[mission_index].status != MissionStatus::Active {
                continue;
            }
            let mission = &mut self.missions[mission_index];
            let mission_id = mission.id.clone();
            for objective in &mut mission.objectives {
                if objective.completed {
                    continue;
                }
                let (matches, required) = match &objective.kind {
                    ObjectiveKind::DefeatFaction {
                        faction: f,
                        required,
                    } => (*f == faction, *required),
                    ObjectiveKind::DefeatPreset {
                        preset: p,
                        required,
                    } => (*p == preset, *required),
                    ObjectiveKind::ReachCheckpoint { .. } => (false, 0),
                };
                if matches {
                    objective.progress += 1;
                    if objective.progress >= required {
                        objective.completed = true;
                        outcome.events.push(GameEvent::ObjectiveCompleted {
                            mission_id: mission_id.clone(),
                            objective_id: objective.id.clone(),
                        });
                    }
                }
            }
            self.check_completion(mission_index, &mut outcome);
        }
        self.unlock_dependents(&mut outcome);
        outcome
    }

    /// Views for the snapshot.
    pub fn views(&self) -> Vec<MissionView> {
        self.missions
            .iter()
            .map(|m| MissionView {
                id: m.id.clone(),
                title: m.title.clone(),
                status: m.status,
                objectives: m
                    .objectives
                    .iter()
                    .map(|o| ObjectiveView {
                        id: o.id.clone(),
                        description: o.description.clone(),
                        completed: o.completed,
                        progress: match &o.kind {
                            ObjectiveKind::DefeatFaction { required, .. }
                            | ObjectiveKind::DefeatPreset { required, .. } => {
                                Some((o.progress, *required))
                            }
                            ObjectiveKind::ReachCheckpoint { .. } => None,
                        },
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn mission(&self, id: &str) -> Option<&Mission> {
        self.missions.iter().find(|m| m.id == id)
    }

    fn check_completion(&mut self, mission_index: usize, outcome: &mut MissionOutcome) {
        let mission = &mut self.missions[mission_index];
        if mission.status != MissionStatus::Active {
            return;
        }
        if mission.objectives.iter().all(|o| o.completed) {
            mission.status = MissionStatus::Completed;
            outcome.credits += mission.reward_credits;
            outcome.experience += mission.reward_experience;
            outcome.events.push(GameEvent::MissionStatusChanged {
                mission_id: mission.id.clone(),
                status: MissionStatus::Completed,
            });
            outcome.events.push(GameEvent::Notification {
                message: format!("Mission complete: {}", mission.title),
            });
        }
    }

    /// Activate locked missions whose dependencies are all completed.
    fn unlock_dependents(&mut self, outcome: &mut MissionOutcome) {
        let completed: Vec<String> = self
            .missions
            .iter()
            .filter(|m| m.status == MissionStatus::Completed)
            .map(|m| m.id.clone())
            .collect();

        for mission in &mut self.missions {
            if mission.status != MissionStatus::Locked {
                continue;
            }
            let unlocked = mission
                .dependencies
                .iter()
                .all(|dep| completed.contains(dep));
            if unlocked {
                mission.status = MissionStatus::Active;
                outcome.events.push(GameEvent::MissionStatusChanged {
                    mission_id: mission.id.clone(),
                    status: MissionStatus::Active,
                });
                outcome.events.push(GameEvent::Notification {
                    message: format!("New mission: {}", mission.title),
                });
            }
        }
    }
}

fn checkpoint_objective(checkpoint_id: &str, description: &str) -> Objective {
    Objective {
        id: checkpoint_id.to_string(),
        description: description.to_string(),
        kind: ObjectiveKind::ReachCheckpoint {
            checkpoint_id: checkpoint_id.to_string(),
        },
        completed: false,
        progress: 0,
    }
}

fn defeat_faction_objective(
    id: &str,
    description: &str,
    faction: Faction,
    required: u32,
) -> Objective {
    Objective {
        id: id.to_string(),
        description: description.to_string(),
        kind: ObjectiveKind::DefeatFaction { faction, required },
        completed: false,
        progress: 0,
    }
}
