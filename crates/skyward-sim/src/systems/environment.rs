//! World environment system: day/night cycle, weather transitions, and
//! storm lightning.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyward_core::constants::*;
use skyward_core::enums::Weather;
use skyward_core::events::GameEvent;
use skyward_core::types::Vec3;

use crate::scheduler::{DeferredEffect, TimerQueue};

/// Engine-owned environment state.
#[derive(Debug, Clone)]
pub struct EnvironmentState {
    /// Day-night cycle position in [0, 1). 0.5 = noon.
    pub day_cycle: f64,
    pub weather: Weather,
}

impl Default for EnvironmentState {
    fn default() -> Self {
        Self {
            day_cycle: 0.3,
            weather: Weather::Clear,
        }
    }
}

impl EnvironmentState {
    /// Hour of day in [0, 24).
    pub fn hour(&self) -> f64 {
        self.day_cycle * 24.0
    }
}

/// Advance the cycle, roll weather transitions, and spawn lightning
/// while stormy.
pub fn run(
    env: &mut EnvironmentState,
    rng: &mut ChaCha8Rng,
    timers: &mut TimerQueue,
    events: &mut Vec<GameEvent>,
    player_position: Vec3,
    current_tick: u64,
) {
    env.day_cycle = (env.day_cycle + DAY_NIGHT_RATE * DT).rem_euclid(1.0);

    // Weather shifts more often through the afternoon.
    let hour = env.hour();
    let chance = if (12.0..18.0).contains(&hour) {
        WEATHER_CHANCE_AFTERNOON
    } else {
        WEATHER_CHANCE_DEFAULT
    };

    if rng.gen::<f64>() < chance {
        let next = next_weather(env.weather, rng);
        if next != env.weather {
            env.weather = next;
            events.push(GameEvent::WeatherChanged { weather: next });
            events.push(GameEvent::Notification {
                message: weather_notification(next).to_string(),
            });
        }
    }

    if env.weather == Weather::Stormy && rng.gen::<f64>() < LIGHTNING_CHANCE {
        let strike = Vec3::new(
            player_position.x + (rng.gen::<f64>() - 0.5) * 200.0,
            player_position.y + 50.0 + rng.gen::<f64>() * 50.0,
            player_position.z + (rng.gen::<f64>() - 0.5) * 200.0,
        );
        events.push(GameEvent::LightningFlash { position: strike });
        let delay = THUNDER_DELAY_MIN_SECS
            + rng.gen::<f64>() * (THUNDER_DELAY_MAX_SECS - THUNDER_DELAY_MIN_SECS);
        timers.schedule_in(current_tick, delay, DeferredEffect::Thunder);
    }
}

fn next_weather(current: Weather, rng: &mut ChaCha8Rng) -> Weather {
    match current {
        Weather::Clear => {
            if rng.gen::<f64>() < 0.7 {
                Weather::Cloudy
            } else {
                Weather::Foggy
            }
        }
        Weather::Cloudy => {
            if rng.gen::<f64>() < 0.6 {
                Weather::Stormy
            } else {
                Weather::Clear
            }
        }
        Weather::Stormy => Weather::Clear,
        Weather::Foggy => Weather::Clear,
    }
}

fn weather_notification(weather: Weather) -> &'static str {
    match weather {
        Weather::Clear => "The skies are clearing",
        Weather::Cloudy => "Clouds are rolling in",
        Weather::Stormy => "Storm approaching!",
        Weather::Foggy => "Fog is settling in",
    }
}
