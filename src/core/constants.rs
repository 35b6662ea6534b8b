// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 100;
pub const MAX_TICKS_PER_ADVANCE: u64 = 6_000;

// Combat log
pub const MAX_COMBAT_LOG: usize = 100;

// Starting player
pub const PLAYER_BASE_ATK: u32 = 17;
pub const PLAYER_BASE_MAX_HP: u32 = 140;
pub const PLAYER_ATTACK_COOLDOWN_MS: u32 = 700;
pub const KILL_HEAL_AMOUNT: u32 = 8;

// Monsters
pub const MONSTER_ATTACK_COOLDOWN_MS: u32 = 1_200;
pub const MONSTER_HP_GROWTH: f64 = 1.10;
pub const MONSTER_ATK_GROWTH: f64 = 1.05;
pub const MONSTER_GOLD_GROWTH: f64 = 1.08;

// Difficulty: level = 1 + kills / DIFFICULTY_STEP_KILLS
pub const DIFFICULTY_STEP_KILLS: u64 = 3;
pub const MAX_DIFFICULTY_LEVEL: u32 = 1_000_000;
// Kills past this never raise difficulty; restore clamps to it.
pub const MAX_KILL_COUNT: u64 = DIFFICULTY_STEP_KILLS * MAX_DIFFICULTY_LEVEL as u64;

// Upgrades: (base_cost, cost_multiplier, stat_multiplier)
pub const ATTACK_UPGRADE: (f64, f64, f64) = (10.0, 1.18, 1.08);
pub const HEALTH_UPGRADE: (f64, f64, f64) = (12.0, 1.16, 1.10);

// Equipment rarity roll
pub const RARITY_LUCK_PER_LEVEL: f64 = 0.003;
pub const RARITY_LUCK_CAP: f64 = 0.2;
pub const LEGENDARY_THRESHOLD: f64 = 0.03;
pub const EPIC_THRESHOLD: f64 = 0.12;
pub const RARE_THRESHOLD: f64 = 0.35;
pub const SHOP_MIN_PRICE: u64 = 8;

// Offline progression
pub const OFFLINE_CAP_SECONDS: u64 = 8 * 60 * 60;
pub const OFFLINE_MIN_SECONDS: u64 = 10;
pub const OFFLINE_EFFICIENCY: f64 = 0.75;
pub const OFFLINE_GOLD_EFFICIENCY: f64 = 0.9;
pub const OFFLINE_MIN_KILL_RATE: f64 = 0.02;
pub const OFFLINE_MAX_REPLAY_KILLS: u64 = 200_000;
pub const OFFLINE_OVERKILLED_GOLD_PENALTY: f64 = 0.5;

// Save
pub const SAVE_VERSION: u32 = 1;
pub const SAVE_FILE_MAGIC: u64 = 0x4155_544F_4241_5401;
