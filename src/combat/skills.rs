//! Player skills and proc resolution.
//!
//! Each ready skill whose trigger matches is rolled independently, so several
//! skills may fire on the same attack or hit.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::{ActiveBuff, PlayerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillTrigger {
    /// Rolled when the player attacks.
    OnAttack,
    /// Rolled when the monster's attack lands on the player.
    OnHit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SkillEffect {
    /// Adds `percent` of the base damage to this attack.
    BonusDamage { percent: f64 },
    /// Installs or refreshes the timed attack multiplier.
    AttackBuff { multiplier: f64, duration_ms: u64 },
    /// Reduces incoming damage by `percent`.
    DamageReduction { percent: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub trigger: SkillTrigger,
    pub cooldown_ms: u64,
    pub proc_chance: f64,
    pub effect: SkillEffect,
    pub last_activated_ms: Option<u64>,
}

impl Skill {
    /// Ready when it has never fired or its cooldown has elapsed.
    pub fn is_ready(&self, now_ms: u64) -> bool {
        match self.last_activated_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.cooldown_ms,
        }
    }
}

fn skill(
    id: &str,
    name: &str,
    trigger: SkillTrigger,
    cooldown_ms: u64,
    proc_chance: f64,
    effect: SkillEffect,
) -> Skill {
    Skill {
        id: id.to_string(),
        name: name.to_string(),
        trigger,
        cooldown_ms,
        proc_chance,
        effect,
        last_activated_ms: None,
    }
}

pub fn default_skills() -> Vec<Skill> {
    vec![
        skill(
            "power_strike",
            "Power Strike",
            SkillTrigger::OnAttack,
            3_000,
            0.35,
            SkillEffect::BonusDamage { percent: 50.0 },
        ),
        skill(
            "battle_cry",
            "Battle Cry",
            SkillTrigger::OnAttack,
            8_000,
            0.2,
            SkillEffect::AttackBuff {
                multiplier: 1.3,
                duration_ms: 4_000,
            },
        ),
        skill(
            "iron_skin",
            "Iron Skin",
            SkillTrigger::OnHit,
            5_000,
            0.3,
            SkillEffect::DamageReduction { percent: 40.0 },
        ),
    ]
}

/// A skill that fired during this resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillProc {
    pub skill_id: String,
    pub name: String,
    pub effect: SkillEffect,
}

/// Rolls every ready skill with `trigger` and applies the ones that fire.
///
/// `base` is the damage before any skill; the returned value is the damage
/// after all fired effects, clamped non-negative.
fn resolve(
    player: &mut PlayerState,
    trigger: SkillTrigger,
    base: f64,
    now_ms: u64,
    rng: &mut impl Rng,
) -> (f64, Vec<SkillProc>) {
    let PlayerState { skills, buff, .. } = player;
    let mut damage = base;
    let mut procs = Vec::new();

    for skill in skills.iter_mut() {
        if skill.trigger != trigger || !skill.is_ready(now_ms) {
            continue;
        }
        let chance = skill.proc_chance.clamp(0.0, 1.0);
        if rng.gen::<f64>() >= chance {
            continue;
        }

        skill.last_activated_ms = Some(now_ms);
        match skill.effect {
            SkillEffect::BonusDamage { percent } => {
                damage += base * percent / 100.0;
            }
            SkillEffect::AttackBuff {
                multiplier,
                duration_ms,
            } => {
                *buff = Some(ActiveBuff {
                    multiplier,
                    expires_at_ms: now_ms + duration_ms,
                });
            }
            SkillEffect::DamageReduction { percent } => {
                damage *= (1.0 - percent / 100.0).max(0.0);
            }
        }
        procs.push(SkillProc {
            skill_id: skill.id.clone(),
            name: skill.name.clone(),
            effect: skill.effect,
        });
    }

    (damage.max(0.0), procs)
}

pub fn resolve_on_attack(
    player: &mut PlayerState,
    base_damage: f64,
    now_ms: u64,
    rng: &mut impl Rng,
) -> (f64, Vec<SkillProc>) {
    resolve(player, SkillTrigger::OnAttack, base_damage, now_ms, rng)
}

pub fn resolve_on_hit(
    player: &mut PlayerState,
    incoming_damage: f64,
    now_ms: u64,
    rng: &mut impl Rng,
) -> (f64, Vec<SkillProc>) {
    resolve(player, SkillTrigger::OnHit, incoming_damage, now_ms, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn player_with(skills: Vec<Skill>) -> PlayerState {
        PlayerState {
            skills,
            ..PlayerState::new()
        }
    }

    fn always(id: &str, trigger: SkillTrigger, effect: SkillEffect) -> Skill {
        skill(id, id, trigger, 1_000, 1.0, effect)
    }

    #[test]
    fn test_is_ready_respects_cooldown() {
        let mut s = always("s", SkillTrigger::OnAttack, SkillEffect::BonusDamage { percent: 10.0 });
        assert!(s.is_ready(0));
        s.last_activated_ms = Some(500);
        assert!(!s.is_ready(1_499));
        assert!(s.is_ready(1_500));
    }

    #[test]
    fn test_multiple_skills_fire_same_attack() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut player = player_with(vec![
            always("a", SkillTrigger::OnAttack, SkillEffect::BonusDamage { percent: 50.0 }),
            always("b", SkillTrigger::OnAttack, SkillEffect::BonusDamage { percent: 25.0 }),
            always(
                "c",
                SkillTrigger::OnAttack,
                SkillEffect::AttackBuff {
                    multiplier: 2.0,
                    duration_ms: 300,
                },
            ),
        ]);

        let (damage, procs) = resolve_on_attack(&mut player, 20.0, 1_000, &mut rng);
        // Bonuses are a share of the base, not compounded.
        assert_eq!(damage, 35.0);
        assert_eq!(procs.len(), 3);
        assert_eq!(
            player.buff,
            Some(ActiveBuff {
                multiplier: 2.0,
                expires_at_ms: 1_300
            })
        );

        // All on cooldown now.
        let (damage, procs) = resolve_on_attack(&mut player, 20.0, 1_100, &mut rng);
        assert_eq!(damage, 20.0);
        assert!(procs.is_empty());
    }

    #[test]
    fn test_on_hit_reduces_and_ignores_attack_skills() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut player = player_with(vec![
            always("atk", SkillTrigger::OnAttack, SkillEffect::BonusDamage { percent: 100.0 }),
            always("def", SkillTrigger::OnHit, SkillEffect::DamageReduction { percent: 40.0 }),
        ]);
        let (damage, procs) = resolve_on_hit(&mut player, 10.0, 0, &mut rng);
        assert!((damage - 6.0).abs() < 1e-9);
        assert_eq!(procs.len(), 1);
        assert_eq!(procs[0].skill_id, "def");
        assert_eq!(player.skills[0].last_activated_ms, None);
    }

    #[test]
    fn test_zero_chance_never_fires() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut never = always(
            "n",
            SkillTrigger::OnAttack,
            SkillEffect::BonusDamage { percent: 50.0 },
        );
        never.proc_chance = 0.0;
        let mut player = player_with(vec![never]);
        for t in 0..100 {
            let (damage, procs) = resolve_on_attack(&mut player, 10.0, t * 10_000, &mut rng);
            assert_eq!(damage, 10.0);
            assert!(procs.is_empty());
        }
    }

    #[test]
    fn test_default_proc_rate_is_roughly_chance() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut player = PlayerState::new();
        let mut strikes = 0;
        let rounds = 2_000u64;
        for i in 0..rounds {
            // Far enough apart that every skill is ready each time.
            let (_, procs) = resolve_on_attack(&mut player, 10.0, i * 100_000, &mut rng);
            strikes += procs.iter().filter(|p| p.skill_id == "power_strike").count();
        }
        assert!(strikes > 550 && strikes < 850, "strikes={strikes}");
    }
}
