// Character state machines

/// Combat state of an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnemyState {
    /// Approaching the player
    #[default]
    Walking,
    /// In striking range, showing a combat skin
    Engaging,
    /// Knocked back after a hit, resting before the next approach
    Recovering,
    /// Hit points reached zero, playing the die overlay
    Dying,
    /// Die animation finished; waiting to be swept
    Disposed,
}

impl EnemyState {
    /// Check if the enemy is still part of the fight
    pub fn is_alive(&self) -> bool {
        !matches!(self, Self::Dying | Self::Disposed)
    }

    /// Check if the player may pick this enemy as attack target
    pub fn is_targetable(&self) -> bool {
        matches!(self, Self::Engaging | Self::Recovering)
    }

    /// Check if the enemy accepts damage
    pub fn can_be_hit(&self) -> bool {
        self.is_alive()
    }

    /// Check if the enemy takes part in spacing resolution
    pub fn is_spaced(&self) -> bool {
        self.is_alive()
    }
}

/// State machine that handles enemy state transitions
#[derive(Debug)]
pub struct EnemyStateMachine {
    current_state: EnemyState,
    /// Seconds since the last transition
    state_time: f32,
    /// Remaining rest time; negative when not recovering
    recovery_remaining: f32,
}

impl Default for EnemyStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl EnemyStateMachine {
    pub fn new() -> Self {
        Self {
            current_state: EnemyState::Walking,
            state_time: 0.0,
            recovery_remaining: -1.0,
        }
    }

    /// Get the current state
    pub fn state(&self) -> EnemyState {
        self.current_state
    }

    /// Get time spent in current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Remaining recovery time, `None` when not recovering
    pub fn recovery_remaining(&self) -> Option<f32> {
        (self.recovery_remaining >= 0.0).then_some(self.recovery_remaining)
    }

    pub fn is_recovering(&self) -> bool {
        self.current_state == EnemyState::Recovering
    }

    /// Transition to a new state
    ///
    /// Terminal states are one-way: nothing leaves `Dying` except `Disposed`,
    /// and nothing leaves `Disposed`.
    pub fn transition(&mut self, new_state: EnemyState) {
        let allowed = match self.current_state {
            EnemyState::Disposed => false,
            EnemyState::Dying => new_state == EnemyState::Disposed,
            _ => true,
        };
        if allowed && self.current_state != new_state {
            self.current_state = new_state;
            self.state_time = 0.0;
            if new_state != EnemyState::Recovering {
                self.recovery_remaining = -1.0;
            }
        }
    }

    /// Start the post-hit rest
    pub fn start_recovery(&mut self, duration: f32) {
        if self.current_state.is_alive() {
            self.transition(EnemyState::Recovering);
            self.state_time = 0.0;
            self.recovery_remaining = duration.max(0.0);
        }
    }

    /// Advance timers; returns true on the tick the rest ends
    pub fn update(&mut self, dt: f32) -> bool {
        self.state_time += dt;

        if self.current_state != EnemyState::Recovering {
            return false;
        }
        self.recovery_remaining -= dt;
        if self.recovery_remaining <= 0.0 {
            self.recovery_remaining = -1.0;
            self.transition(EnemyState::Walking);
            return true;
        }
        false
    }

    /// Switch between walking and engaging depending on range
    pub fn set_in_range(&mut self, in_range: bool) {
        if matches!(
            self.current_state,
            EnemyState::Walking | EnemyState::Engaging
        ) {
            self.transition(if in_range {
                EnemyState::Engaging
            } else {
                EnemyState::Walking
            });
        }
    }

    /// Hit points ran out
    pub fn die(&mut self) {
        if self.current_state.is_alive() {
            self.transition(EnemyState::Dying);
        }
    }

    /// Die animation finished
    pub fn finish(&mut self) {
        self.transition(EnemyState::Disposed);
    }
}

/// Side an enemy has committed to strike from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Standing left of the player, striking rightwards
    Left,
    /// Standing right of the player, striking leftwards
    Right,
    /// Not committed yet
    #[default]
    Neutral,
}

impl Mode {
    /// Side of `x` relative to the player
    pub fn from_side(x: f32, player_x: f32) -> Self {
        if x < player_x {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// The opposite committed side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Neutral => Self::Neutral,
        }
    }

    /// Name of the skin shown in this mode
    pub fn skin_name(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Neutral => "none",
        }
    }
}

/// What the player's primary track is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    /// Intro stance, before spawning starts
    #[default]
    Intro,
    /// Idle in the stand loop, ready to attack
    Ready,
    /// Playing an attack animation
    Attacking,
    /// Playing the miss animation
    Missing,
    /// Got hurt; the match is about to end
    Hurt,
}

impl PlayerState {
    /// Map the current primary-track animation to a state
    pub fn from_animation(name: Option<&str>) -> Self {
        match name {
            None | Some("stance") => Self::Intro,
            Some("stand") => Self::Ready,
            Some("miss") => Self::Missing,
            Some("hit") => Self::Hurt,
            Some(_) => Self::Attacking,
        }
    }

    /// Check if move intents may be queued in this state
    pub fn accepts_input(&self) -> bool {
        !matches!(self, Self::Hurt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_state() {
        let sm = EnemyStateMachine::new();
        assert_eq!(sm.state(), EnemyState::Walking);
        assert_eq!(sm.recovery_remaining(), None);
    }

    #[test]
    fn test_engage_and_disengage() {
        let mut sm = EnemyStateMachine::new();
        sm.set_in_range(true);
        assert_eq!(sm.state(), EnemyState::Engaging);
        sm.set_in_range(false);
        assert_eq!(sm.state(), EnemyState::Walking);
    }

    #[test]
    fn test_state_time_resets_on_transition() {
        let mut sm = EnemyStateMachine::new();
        sm.update(0.5);
        sm.set_in_range(false);
        assert_relative_eq!(sm.state_time(), 0.5);

        sm.set_in_range(true);
        assert_relative_eq!(sm.state_time(), 0.0);
        sm.update(0.25);
        sm.update(0.25);
        assert_relative_eq!(sm.state_time(), 0.5);
    }

    #[test]
    fn test_recovery_counts_down_then_walks() {
        let mut sm = EnemyStateMachine::new();
        sm.set_in_range(true);
        sm.start_recovery(0.75);
        assert_eq!(sm.state(), EnemyState::Recovering);
        assert_relative_eq!(sm.recovery_remaining().unwrap_or(0.0), 0.75);

        // Range changes are ignored while recovering
        sm.set_in_range(false);
        assert_eq!(sm.state(), EnemyState::Recovering);

        assert!(!sm.update(0.5));
        assert!(sm.update(0.5));
        assert_eq!(sm.state(), EnemyState::Walking);
        assert_eq!(sm.recovery_remaining(), None);
    }

    #[test]
    fn test_second_hit_restarts_recovery() {
        let mut sm = EnemyStateMachine::new();
        sm.start_recovery(0.75);
        sm.update(0.5);
        sm.start_recovery(0.75);
        assert_relative_eq!(sm.recovery_remaining().unwrap_or(0.0), 0.75);
    }

    #[test]
    fn test_dying_is_one_way() {
        let mut sm = EnemyStateMachine::new();
        sm.die();
        assert_eq!(sm.state(), EnemyState::Dying);

        sm.set_in_range(true);
        sm.start_recovery(0.75);
        sm.transition(EnemyState::Walking);
        assert_eq!(sm.state(), EnemyState::Dying);

        sm.finish();
        assert_eq!(sm.state(), EnemyState::Disposed);
        sm.transition(EnemyState::Walking);
        assert_eq!(sm.state(), EnemyState::Disposed);
    }

    #[test]
    fn test_finish_from_walking() {
        let mut sm = EnemyStateMachine::new();
        sm.finish();
        // Culling may dispose a walking enemy directly
        assert_eq!(sm.state(), EnemyState::Disposed);
    }

    #[test]
    fn test_state_predicates() {
        assert!(EnemyState::Engaging.is_targetable());
        assert!(EnemyState::Recovering.is_targetable());
        assert!(!EnemyState::Walking.is_targetable());
        assert!(!EnemyState::Dying.can_be_hit());
        assert!(!EnemyState::Dying.is_spaced());
        assert!(EnemyState::Walking.is_spaced());
    }

    #[test]
    fn test_player_state_from_animation() {
        assert_eq!(PlayerState::from_animation(Some("stance")), PlayerState::Intro);
        assert_eq!(PlayerState::from_animation(Some("stand")), PlayerState::Ready);
        assert_eq!(PlayerState::from_animation(Some("uppercut")), PlayerState::Attacking);
        assert_eq!(PlayerState::from_animation(Some("miss")), PlayerState::Missing);
        assert_eq!(PlayerState::from_animation(Some("hit")), PlayerState::Hurt);
        assert!(!PlayerState::Hurt.accepts_input());
    }

    #[test]
    fn test_mode_sides() {
        assert_eq!(Mode::from_side(100.0, 640.0), Mode::Left);
        assert_eq!(Mode::from_side(700.0, 640.0), Mode::Right);
        assert_eq!(Mode::Left.opposite(), Mode::Right);
        assert_eq!(Mode::Neutral.opposite(), Mode::Neutral);
        assert_eq!(Mode::Neutral.skin_name(), "none");
    }
}
