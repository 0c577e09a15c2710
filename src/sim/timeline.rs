//! Frame-driven blink and fade choreography
//!
//! A timeline is a list of steps, each tweening an alpha value toward a target
//! over a number of frames and optionally firing an action when it completes.
//! Timelines only move when the frame driver advances them, so pausing the
//! driver pauses every animation.

use serde::{Deserialize, Serialize};

use crate::secs_to_frames;

/// Actions a timeline can fire when a step completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineAction {
    ClearImmunity,
    ClearAttack,
    /// Undo the grow flower's size doubling
    HalveSize,
    MarkDead,
}

/// One step of a timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Frames to reach `alpha` (0 = instant)
    pub frames: u32,
    pub alpha: f32,
    pub on_complete: Option<TimelineAction>,
}

impl Step {
    pub fn fade(alpha: f32, secs: f32) -> Self {
        Self {
            frames: secs_to_frames(secs),
            alpha,
            on_complete: None,
        }
    }

    /// Zero-length step that only fires an action
    pub fn call(action: TimelineAction) -> Self {
        Self {
            frames: 0,
            alpha: 1.0,
            on_complete: Some(action),
        }
    }
}

/// Which choreography a timeline is playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineKind {
    Immunity,
    Attack,
    GrowAttack,
    DeathFade,
}

/// A running sequence of steps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    pub kind: TimelineKind,
    steps: Vec<Step>,
    index: usize,
    elapsed: u32,
    from_alpha: f32,
    alpha: f32,
}

/// Blink pattern shared by immunity and attack: dim, restore, long dim, restore, dim, restore
fn blink_cycle() -> [Step; 6] {
    [
        Step::fade(0.1, 0.5),
        Step::fade(1.0, 0.5),
        Step::fade(0.1, 1.0),
        Step::fade(1.0, 0.5),
        Step::fade(0.1, 0.5),
        Step::fade(1.0, 0.5),
    ]
}

impl Timeline {
    pub fn new(kind: TimelineKind, steps: Vec<Step>) -> Self {
        Self {
            kind,
            steps,
            index: 0,
            elapsed: 0,
            from_alpha: 1.0,
            alpha: 1.0,
        }
    }

    /// Post-hit blink, then immunity is cleared
    pub fn immunity() -> Self {
        let mut steps = blink_cycle().to_vec();
        steps.push(Step::call(TimelineAction::ClearImmunity));
        Self::new(TimelineKind::Immunity, steps)
    }

    /// Attack-only flower: two blink cycles, then attack mode is cleared
    pub fn attack() -> Self {
        let mut steps = blink_cycle().to_vec();
        steps.extend(blink_cycle());
        steps.push(Step::call(TimelineAction::ClearAttack));
        Self::new(TimelineKind::Attack, steps)
    }

    /// Grow flower: the attack sequence plus a closing blink, then the size
    /// doubling is undone and attack mode is cleared.
    ///
    /// The closing blink is deliberate: it runs one second past `attack()`
    /// so the shrink back is visibly signalled before it happens.
    pub fn grow_attack() -> Self {
        let mut steps = blink_cycle().to_vec();
        steps.extend(blink_cycle());
        steps.push(Step::fade(0.1, 0.5));
        steps.push(Step::fade(1.0, 0.5));
        steps.push(Step::call(TimelineAction::HalveSize));
        steps.push(Step::call(TimelineAction::ClearAttack));
        Self::new(TimelineKind::GrowAttack, steps)
    }

    /// Fade out over one second, then the owner is dead
    pub fn death_fade() -> Self {
        Self::new(
            TimelineKind::DeathFade,
            vec![Step {
                frames: secs_to_frames(1.0),
                alpha: 0.0,
                on_complete: Some(TimelineAction::MarkDead),
            }],
        )
    }

    /// Advance one frame, pushing every action whose step completed
    pub fn advance(&mut self, fired: &mut Vec<TimelineAction>) {
        if self.is_finished() {
            return;
        }
        self.elapsed += 1;
        while let Some(step) = self.steps.get(self.index).copied() {
            if self.elapsed < step.frames {
                let t = self.elapsed as f32 / step.frames as f32;
                self.alpha = self.from_alpha + (step.alpha - self.from_alpha) * t;
                return;
            }
            self.alpha = step.alpha;
            self.from_alpha = step.alpha;
            self.elapsed = self.elapsed.saturating_sub(step.frames);
            self.index += 1;
            if let Some(action) = step.on_complete {
                fired.push(action);
            }
            // Zero-length steps chain within the frame; the next timed step starts fresh
            if self.steps.get(self.index).is_some_and(|s| s.frames > 0) {
                self.elapsed = 0;
                return;
            }
        }
    }

    /// Actions that have not fired yet
    pub fn pending_actions(&self) -> impl Iterator<Item = TimelineAction> + '_ {
        self.steps[self.index.min(self.steps.len())..]
            .iter()
            .filter_map(|s| s.on_complete)
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.steps.len()
    }

    /// Total frames from start to last action
    pub fn total_frames(&self) -> u32 {
        self.steps.iter().map(|s| s.frames).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(timeline: &mut Timeline, frames: u32) -> Vec<TimelineAction> {
        let mut fired = Vec::new();
        for _ in 0..frames {
            timeline.advance(&mut fired);
        }
        fired
    }

    #[test]
    fn test_immunity_lasts_three_and_a_half_seconds() {
        let mut timeline = Timeline::immunity();
        assert_eq!(timeline.total_frames(), 210);

        assert!(run(&mut timeline, 209).is_empty());
        assert!(!timeline.is_finished());
        assert_eq!(run(&mut timeline, 1), vec![TimelineAction::ClearImmunity]);
        assert!(timeline.is_finished());
        assert!(run(&mut timeline, 10).is_empty());
    }

    #[test]
    fn test_grow_attack_is_longer_than_attack() {
        assert_eq!(Timeline::attack().total_frames(), 420);
        assert_eq!(Timeline::grow_attack().total_frames(), 480);
    }

    #[test]
    fn test_grow_attack_fires_halve_before_clear() {
        let mut timeline = Timeline::grow_attack();
        let fired = run(&mut timeline, 480);
        assert_eq!(
            fired,
            vec![TimelineAction::HalveSize, TimelineAction::ClearAttack]
        );
    }

    #[test]
    fn test_alpha_tweens_linearly() {
        let mut timeline = Timeline::immunity();
        run(&mut timeline, 15);
        assert!((timeline.alpha() - 0.55).abs() < 1e-4);
        run(&mut timeline, 15);
        assert!((timeline.alpha() - 0.1).abs() < 1e-4);
        run(&mut timeline, 30);
        assert!((timeline.alpha() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_death_fade_reaches_zero() {
        let mut timeline = Timeline::death_fade();
        let fired = run(&mut timeline, 60);
        assert_eq!(fired, vec![TimelineAction::MarkDead]);
        assert_eq!(timeline.alpha(), 0.0);
    }

    #[test]
    fn test_pending_actions() {
        let mut timeline = Timeline::grow_attack();
        assert_eq!(
            timeline.pending_actions().collect::<Vec<_>>(),
            vec![TimelineAction::HalveSize, TimelineAction::ClearAttack]
        );
        run(&mut timeline, 480);
        assert_eq!(timeline.pending_actions().count(), 0);
    }
}
