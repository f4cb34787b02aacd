// Enemy stats - one fixed table per enemy kind
// Kinds differ in toughness, knockback speed and reward, never in approach speed

/// Distance at which player and enemy are in melee range
pub const ATTACK_DISTANCE: f32 = 150.0;
/// Distance at which an attacking enemy lands a hit on the player
pub const HURT_DISTANCE: f32 = 50.0;
/// Minimum gap between two living enemies
pub const MIN_SPACING: f32 = 100.0;
/// Gap kept inside the attack distance when knocked back
pub const RECOVERY_MARGIN: f32 = 10.0;
/// Rest time after being hit before resuming the approach (seconds)
pub const RECOVERY_TIME: f32 = 0.75;
/// Candy pieces thrown when an enemy bursts
pub const CANDY_PER_KILL: usize = 5;

/// The three enemy kinds, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// Weak: one hit
    Donkey,
    /// Medium: two hits
    Hat,
    /// Strong: three hits, knocked through the player when hit
    SpikeBall,
}

impl EnemyKind {
    /// All kinds in unlock order
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Donkey, EnemyKind::Hat, EnemyKind::SpikeBall];

    /// Name of the character rig for this kind
    pub fn rig_name(&self) -> &'static str {
        match self {
            Self::Donkey => "donkey",
            Self::Hat => "hat",
            Self::SpikeBall => "spike",
        }
    }

    /// Stats table entry for this kind
    pub fn stats(&self) -> EnemyStats {
        match self {
            Self::Donkey => DONKEY_STATS,
            Self::Hat => HAT_STATS,
            Self::SpikeBall => SPIKE_BALL_STATS,
        }
    }

    /// Whether a hit knocks this kind through to the other side of the player
    pub fn knocked_through(&self) -> bool {
        matches!(self, Self::SpikeBall)
    }
}

/// Per-kind enemy properties
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    /// Hits needed to burst the enemy
    pub max_hits: u32,
    /// Score awarded on death
    pub points: u32,
    /// Knockback speed while recovering (units/second)
    pub recovery_speed: f32,
    /// Walking speed towards the player (units/second)
    pub approach_speed: f32,
}

pub const DONKEY_STATS: EnemyStats = EnemyStats {
    max_hits: 1,
    points: 10,
    recovery_speed: 700.0,
    approach_speed: 200.0,
};

pub const HAT_STATS: EnemyStats = EnemyStats {
    max_hits: 2,
    points: 30,
    recovery_speed: 700.0,
    approach_speed: 200.0,
};

pub const SPIKE_BALL_STATS: EnemyStats = EnemyStats {
    max_hits: 3,
    points: 60,
    recovery_speed: 2000.0,
    approach_speed: 200.0,
};

impl Default for EnemyStats {
    fn default() -> Self {
        DONKEY_STATS
    }
}

/// Player movement constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerStats {
    /// Speed while closing in on an attack target (units/second)
    pub chase_speed: f32,
    /// Distance kept from the target while chasing
    pub strike_offset: f32,
}

pub const PLAYER_STATS: PlayerStats = PlayerStats {
    chase_speed: 500.0,
    strike_offset: 50.0,
};

impl Default for PlayerStats {
    fn default() -> Self {
        PLAYER_STATS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_and_points_per_kind() {
        let table: Vec<(u32, u32)> = EnemyKind::ALL
            .iter()
            .map(|kind| (kind.stats().max_hits, kind.stats().points))
            .collect();
        assert_eq!(table, vec![(1, 10), (2, 30), (3, 60)]);
    }

    #[test]
    fn test_all_kinds_approach_alike() {
        for kind in EnemyKind::ALL {
            assert_eq!(kind.stats().approach_speed, 200.0);
        }
        assert!(SPIKE_BALL_STATS.recovery_speed > HAT_STATS.recovery_speed);
    }

    #[test]
    fn test_only_strong_is_knocked_through() {
        assert!(!EnemyKind::Donkey.knocked_through());
        assert!(!EnemyKind::Hat.knocked_through());
        assert!(EnemyKind::SpikeBall.knocked_through());
    }

    #[test]
    fn test_rig_names() {
        assert_eq!(EnemyKind::Donkey.rig_name(), "donkey");
        assert_eq!(EnemyKind::SpikeBall.rig_name(), "spike");
    }

    #[test]
    fn test_default_is_weakest() {
        assert_eq!(EnemyStats::default(), DONKEY_STATS);
        assert_eq!(PlayerStats::default().chase_speed, 500.0);
    }
}
