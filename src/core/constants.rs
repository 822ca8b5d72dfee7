// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 100;
pub const MONSTER_CLEANUP_DELAY_SECONDS: f64 = 1.5;

// Combat
pub const DEFAULT_BASE_DAMAGE: f64 = 10.0;
pub const DEFAULT_CRITICAL_CHANCE: f64 = 0.2;
pub const DEFAULT_CRITICAL_MULTIPLIER: f64 = 10.0;

// Upgrade cost curve: cost(level) = round(BASE * MULTIPLIER^level)
pub const DEFAULT_UPGRADE_BASE_COST: i64 = 100;
pub const DEFAULT_UPGRADE_COST_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_DAMAGE_INCREASE_AMOUNT: f64 = 5.0;
pub const DEFAULT_DAMAGE_INCREASE_MULTIPLIER: f64 = 1.2;

// Spawning
pub const DEFAULT_BOSS_KILL_THRESHOLD: u32 = 10;
/// Normal templates occupy indices 0..NORMAL_TEMPLATE_COUNT.
pub const NORMAL_TEMPLATE_COUNT: usize = 2;
pub const BOSS_TEMPLATE_INDEX: usize = 2;
pub const BOSS_GOLD_MULTIPLIER: i64 = 5;

// Default monster table
pub const DEFAULT_MONSTER_MAX_HP: f64 = 100.0;
pub const DEFAULT_BOSS_MAX_HP: f64 = 500.0;
pub const DEFAULT_MIN_GOLD: i64 = 10;
pub const DEFAULT_MAX_GOLD: i64 = 30;

// Effects
pub const DEFAULT_EFFECT_LIFETIME_SECONDS: f64 = 3.0;
pub const MIN_EFFECT_LIFETIME_SECONDS: f64 = 0.1;
pub const EFFECT_RELEASE_GRACE_SECONDS: f64 = 1.0;
pub const DEFAULT_EFFECT_OFFSET_Y: f32 = 0.1;

// Persistence
pub const DEFAULT_GOLD_SAVE_KEY: &str = "PlayerGold";
pub const TOTAL_EARNED_SUFFIX: &str = "_TotalEarned";
pub const TOTAL_SPENT_SUFFIX: &str = "_TotalSpent";
pub const PREFS_DIR_NAME: &str = ".slime_clicker";
pub const PREFS_FILE_NAME: &str = "prefs.json";

// Scene
pub const DEFAULT_CLEAR_SCENE: &str = "Clear";
