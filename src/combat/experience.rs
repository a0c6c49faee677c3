//! Experience rewards for fighting

use crate::actor::Actor;

/// Flat experience for any engagement
pub const ENGAGEMENT_XP_BASE: i32 = 10;
/// Extra experience per defender level
pub const XP_PER_DEFENDER_LEVEL: i32 = 5;
/// Extra experience for landing the killing blow
pub const KILL_XP_BONUS: i32 = 20;

/// Experience the attacker earns for hitting `defender`
pub fn calculate_experience(defender: &Actor, killed: bool) -> i32 {
    let mut xp = ENGAGEMENT_XP_BASE + XP_PER_DEFENDER_LEVEL * defender.level as i32;
    if killed {
        xp += KILL_XP_BONUS;
    }
    xp
}

/// Award experience to the attacker; returns the amount granted
pub fn grant_experience(attacker: &mut Actor, defender: &Actor, killed: bool) -> i32 {
    let xp = calculate_experience(defender, killed);
    tracing::debug!("{} gained {} experience", attacker.name, xp);
    attacker.gain_experience(xp);
    xp
}
