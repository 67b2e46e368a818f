//! Outcome queries - winner detection and the live odds line.
//!
//! These are read-only functions over fighter snapshots; they never touch the
//! ECS world and can be called any number of times between steps.

use crate::world::FighterSnapshot;

/// Lower bound of the payout multiplier.
pub const MIN_ODDS: f32 = 1.2;
/// Upper bound of the payout multiplier.
pub const MAX_ODDS: f32 = 6.0;
/// Returned for names that are not on the roster.
pub const UNKNOWN_FIGHTER_ODDS: f32 = 1.0;

/// Current winner, if the encounter is decided.
///
/// - exactly one fighter alive: that fighter;
/// - nobody alive: the fighter with the strictly greatest hp over the whole
///   roster, the earliest one winning ties;
/// - two or more alive: `None`.
pub fn decide_winner(fighters: &[FighterSnapshot]) -> Option<&FighterSnapshot> {
    let mut alive = fighters.iter().filter(|f| f.alive);
    match (alive.next(), alive.next()) {
        (Some(sole), None) => Some(sole),
        (None, _) => {
            let mut iter = fighters.iter();
            let first = iter.next()?;
            Some(iter.fold(first, |best, f| if f.hp > best.hp { f } else { best }))
        }
        (Some(_), Some(_)) => None,
    }
}

/// `max_hp × damage × range × speed`.
pub fn combat_power(fighter: &FighterSnapshot) -> f32 {
    fighter.max_hp * fighter.damage * fighter.range * fighter.speed
}

/// Sum of combat power over living fighters, or 1 when that sum is zero.
pub fn total_live_power(fighters: &[FighterSnapshot]) -> f32 {
    let total: f32 = fighters.iter().filter(|f| f.alive).map(combat_power).sum();
    if total == 0.0 {
        1.0
    } else {
        total
    }
}

/// Payout multiplier for `name`, clamped to `[MIN_ODDS, MAX_ODDS]`.
pub fn odds_for(fighters: &[FighterSnapshot], name: &str) -> f32 {
    match fighters.iter().find(|f| f.name == name) {
        Some(fighter) => odds_against(fighter, total_live_power(fighters)),
        None => UNKNOWN_FIGHTER_ODDS,
    }
}

/// Odds for every fighter in roster order.
pub fn odds_board(fighters: &[FighterSnapshot]) -> Vec<(String, f32)> {
    let total = total_live_power(fighters);
    fighters
        .iter()
        .map(|f| (f.name.clone(), odds_against(f, total)))
        .collect()
}

fn odds_against(fighter: &FighterSnapshot, total_power: f32) -> f32 {
    let ratio = total_power / combat_power(fighter);
    // Zero power gives +inf and an overflowing power gives inf / inf = NaN.
    if !ratio.is_finite() {
        return MAX_ODDS;
    }
    ratio.clamp(MIN_ODDS, MAX_ODDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Vec2, WeaponKind};

    fn fighter(name: &str, hp: f32, alive: bool) -> FighterSnapshot {
        FighterSnapshot {
            name: name.to_string(),
            color: "#fff".to_string(),
            kind: WeaponKind::Blaster,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            heading: 0.0,
            hp,
            max_hp: 100.0,
            speed: 2.0,
            range: 200.0,
            damage: 10.0,
            projectile_speed: 5.0,
            spread: 0.0,
            fire_cooldown: 1.0,
            fire_timer: 0.0,
            alive,
        }
    }

    #[test]
    fn test_no_winner_while_two_alive() {
        let roster = vec![fighter("a", 10.0, true), fighter("b", 90.0, true)];
        assert!(decide_winner(&roster).is_none());
    }

    #[test]
    fn test_sole_survivor_wins() {
        let roster = vec![
            fighter("a", -3.0, false),
            fighter("b", 1.0, true),
            fighter("c", 0.0, false),
        ];
        assert_eq!(decide_winner(&roster).unwrap().name, "b");
    }

    #[test]
    fn test_no_survivors_highest_hp_wins_first_on_ties() {
        let roster = vec![
            fighter("a", -8.0, false),
            fighter("b", -1.5, false),
            fighter("c", -1.5, false),
            fighter("d", -4.0, false),
        ];
        assert_eq!(decide_winner(&roster).unwrap().name, "b");

        let all_equal = vec![fighter("x", 0.0, false), fighter("y", 0.0, false)];
        assert_eq!(decide_winner(&all_equal).unwrap().name, "x");
    }

    #[test]
    fn test_empty_roster_has_no_winner() {
        assert!(decide_winner(&[]).is_none());
    }

    #[test]
    fn test_inert_fighter_gets_long_shot_odds() {
        let mut inert = fighter("a", 100.0, true);
        inert.damage = 0.0;
        inert.range = 0.0;
        inert.speed = 0.0;
        let roster = vec![inert, fighter("b", 100.0, true)];

        assert_eq!(odds_for(&roster, "a"), MAX_ODDS);
        assert_eq!(odds_for(&roster, "b"), MIN_ODDS);
    }

    #[test]
    fn test_overflowing_power_gets_long_shot_odds() {
        let mut huge = fighter("huge", 1e20, true);
        huge.max_hp = 1e20;
        huge.damage = 1e20;
        let roster = vec![huge, fighter("b", 100.0, true)];
        assert!(combat_power(&roster[0]).is_infinite());

        assert_eq!(odds_for(&roster, "huge"), MAX_ODDS);
        for (_, odds) in odds_board(&roster) {
            assert!((MIN_ODDS..=MAX_ODDS).contains(&odds));
        }
    }

    #[test]
    fn test_odds_follow_power_share() {
        let mut strong = fighter("strong", 100.0, true);
        strong.damage = 30.0;
        let roster = vec![strong, fighter("weak", 100.0, true)];
        // Powers are 3:1, so the weak side pays total/weak = 4.
        assert!((odds_for(&roster, "weak") - 4.0).abs() < 1e-4);
        // The strong side would pay 4/3, within bounds.
        assert!((odds_for(&roster, "strong") - 4.0 / 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_unknown_name_is_neutral() {
        let roster = vec![fighter("a", 100.0, true)];
        assert_eq!(odds_for(&roster, "nobody"), UNKNOWN_FIGHTER_ODDS);
        assert_eq!(odds_for(&[], "nobody"), UNKNOWN_FIGHTER_ODDS);
    }

    #[test]
    fn test_odds_with_nobody_alive_stay_bounded() {
        let roster = vec![fighter("a", -1.0, false), fighter("b", -2.0, false)];
        assert_eq!(total_live_power(&roster), 1.0);
        for (_, odds) in odds_board(&roster) {
            assert!((MIN_ODDS..=MAX_ODDS).contains(&odds));
        }
    }

    #[test]
    fn test_dead_fighters_drop_out_of_the_pool() {
        let roster = vec![
            fighter("a", 100.0, true),
            fighter("b", 100.0, true),
            fighter("c", -1.0, false),
        ];
        // Two equal living powers: each pays 2.0; the dead one is priced
        // against the same living pool.
        assert!((odds_for(&roster, "a") - 2.0).abs() < 1e-4);
        assert!((odds_for(&roster, "c") - 2.0).abs() < 1e-4);
    }
}
