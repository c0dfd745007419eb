//! Scheduled effects: delayed and repeating triggers with revocation.
//!
//! The original animation collaborator is reduced to a scheduler as
//! data: pure code schedules a `Trigger` to fire once after a delay or
//! repeatedly with a period, and the update layer interprets whatever
//! fired this tick. No callbacks, no timers — just counters on the
//! shared tick clock.
//!
//! Every entry is scoped to the section that created it so the whole
//! scope can be revoked in one call when that section's view goes
//! away. `cancel_all` is the teardown hook: after it, nothing created
//! before it can ever fire.

use crate::section::Section;

// ============================================================================
// TRIGGERS
// ============================================================================

/// Domain event produced when a scheduled effect fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Spawn a few ambient glyphs drifting through the background.
    AmbientDrift,
    /// Spawn a row of falling confetti (final section, continuous).
    ConfettiRain,
    /// Spawn a radial confetti burst (gift opening).
    ConfettiBurst,
    /// Advance the visible section's typewriter by one step.
    TypeTick,
    /// Reveal the quiz explanation for the locked-in answer.
    RevealExplanation,
    /// Reveal the video inside the opened gift.
    RevealVideo,
}

/// Revocation token returned at schedule time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectId(u64);

// ============================================================================
// REGISTRY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    id: EffectId,
    owner: Section,
    remaining: u32,
    /// `Some(period)` reloads after each fire; `None` fires once.
    period: Option<u32>,
    trigger: Trigger,
}

/// Registry of pending effects, advanced once per tick.
#[derive(Debug, Clone, Default)]
pub struct EffectRegistry {
    next_id: u64,
    entries: Vec<Entry>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        EffectRegistry::default()
    }

    /// Fire `trigger` once, `delay` ticks from now (0 = next tick).
    pub fn schedule(&mut self, owner: Section, delay: u32, trigger: Trigger) -> EffectId {
        self.push(owner, delay, None, trigger)
    }

    /// Fire `trigger` every `period` ticks until revoked. The first
    /// fire happens one full period from now.
    pub fn schedule_repeating(&mut self, owner: Section, period: u32, trigger: Trigger) -> EffectId {
        let period = period.max(1);
        self.push(owner, period, Some(period), trigger)
    }

    fn push(&mut self, owner: Section, delay: u32, period: Option<u32>, trigger: Trigger) -> EffectId {
        let id = EffectId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            owner,
            remaining: delay,
            period,
            trigger,
        });
        id
    }

    /// Revoke one effect. Returns whether it was still pending.
    pub fn cancel(&mut self, id: EffectId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Scoped release: revoke everything a section's view registered.
    pub fn cancel_section(&mut self, owner: Section) {
        self.entries.retain(|e| e.owner != owner);
    }

    /// Teardown hook: revoke every pending effect.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Advance one tick; returns the triggers that fired, in schedule
    /// order. One-shots are removed, repeating entries reload.
    pub fn tick(&mut self) -> Vec<Trigger> {
        let mut fired = Vec::new();
        self.entries.retain_mut(|entry| {
            if entry.remaining > 0 {
                entry.remaining -= 1;
            }
            if entry.remaining > 0 {
                return true;
            }
            fired.push(entry.trigger);
            match entry.period {
                Some(period) => {
                    entry.remaining = period;
                    true
                }
                None => false,
            }
        });
        fired
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_fires_after_delay_then_disappears() {
        let mut reg = EffectRegistry::new();
        reg.schedule(Section::Quiz, 3, Trigger::RevealExplanation);

        assert!(reg.tick().is_empty());
        assert!(reg.tick().is_empty());
        assert_eq!(reg.tick(), vec![Trigger::RevealExplanation]);
        assert!(reg.is_empty());
        assert!(reg.tick().is_empty());
    }

    #[test]
    fn zero_delay_fires_on_next_tick() {
        let mut reg = EffectRegistry::new();
        reg.schedule(Section::Gift, 0, Trigger::ConfettiBurst);
        assert_eq!(reg.tick(), vec![Trigger::ConfettiBurst]);
    }

    #[test]
    fn repeating_fires_every_period() {
        let mut reg = EffectRegistry::new();
        reg.schedule_repeating(Section::Intro, 2, Trigger::AmbientDrift);

        let mut fires = 0;
        for _ in 0..8 {
            fires += reg.tick().len();
        }
        assert_eq!(fires, 4);
        assert_eq!(reg.len(), 1, "repeating entry persists until revoked");
    }

    #[test]
    fn cancel_revokes_by_token() {
        let mut reg = EffectRegistry::new();
        let id = reg.schedule_repeating(Section::Final, 1, Trigger::ConfettiRain);
        assert_eq!(reg.tick(), vec![Trigger::ConfettiRain]);

        assert!(reg.cancel(id));
        assert!(reg.tick().is_empty());
        assert!(!reg.cancel(id), "double-cancel is a no-op");
    }

    #[test]
    fn cancel_section_is_scoped() {
        let mut reg = EffectRegistry::new();
        reg.schedule_repeating(Section::Intro, 1, Trigger::AmbientDrift);
        reg.schedule_repeating(Section::Intro, 2, Trigger::TypeTick);
        reg.schedule_repeating(Section::Final, 1, Trigger::ConfettiRain);

        reg.cancel_section(Section::Intro);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.tick(), vec![Trigger::ConfettiRain]);
    }

    #[test]
    fn cancel_all_silences_everything() {
        let mut reg = EffectRegistry::new();
        reg.schedule(Section::Gift, 1, Trigger::RevealVideo);
        reg.schedule_repeating(Section::Final, 1, Trigger::ConfettiRain);

        reg.cancel_all();
        assert!(reg.is_empty());
        for _ in 0..10 {
            assert!(reg.tick().is_empty());
        }
    }

    #[test]
    fn simultaneous_fires_keep_schedule_order() {
        let mut reg = EffectRegistry::new();
        reg.schedule(Section::Intro, 1, Trigger::TypeTick);
        reg.schedule(Section::Intro, 1, Trigger::AmbientDrift);
        assert_eq!(reg.tick(), vec![Trigger::TypeTick, Trigger::AmbientDrift]);
    }

    #[test]
    fn period_of_zero_is_clamped() {
        let mut reg = EffectRegistry::new();
        reg.schedule_repeating(Section::Intro, 0, Trigger::AmbientDrift);
        // Fires every tick rather than looping forever within one.
        assert_eq!(reg.tick().len(), 1);
        assert_eq!(reg.tick().len(), 1);
    }
}
