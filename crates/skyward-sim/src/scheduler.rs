//! Deterministic deferred-effect scheduler.
//!
//! Deferred effects (respawns, wreck despawns, thunder claps) live in a
//! min-heap keyed by deadline tick, never in host timers. Same-tick
//! effects fire in insertion order via a monotonic sequence counter.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use skyward_core::components::EnemyId;

/// An effect scheduled to fire at a future tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeferredEffect {
    /// Reset the player aircraft after destruction.
    RespawnPlayer,
    /// Remove a destroyed enemy once its death effect has played.
    DespawnWreck(EnemyId),
    /// Thunder clap following a lightning flash.
    Thunder,
}

/// Min-heap timer queue over (deadline tick, sequence).
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<(u64, u64, DeferredEffect)>>,
    next_seq: u64,
}

impl TimerQueue {
    /// Schedule `effect` to fire at `deadline_tick`.
    pub fn schedule(&mut self, deadline_tick: u64, effect: DeferredEffect) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse((deadline_tick, seq, effect)));
    }

    /// Schedule `effect` to fire `delay_secs` from `current_tick`.
    pub fn schedule_in(&mut self, current_tick: u64, delay_secs: f64, effect: DeferredEffect) {
        let ticks = (delay_secs * skyward_core::constants::TICK_RATE as f64).round() as u64;
        self.schedule(current_tick + ticks, effect);
    }

    /// Pop all effects due at or before `current_tick`, in deadline
    /// then insertion order.
    pub fn drain_due(&mut self, current_tick: u64) -> Vec<DeferredEffect> {
        let mut due = Vec::new();
        while let Some(Reverse((deadline, _, _))) = self.heap.peek() {
            if *deadline > current_tick {
                break;
            }
            if let Some(Reverse((_, _, effect))) = self.heap.pop() {
                due.push(effect);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
