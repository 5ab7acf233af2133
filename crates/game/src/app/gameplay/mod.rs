use engine::{
    AnimationEvent, BarrageDef, EnemyDef, FrameList, MoveIntent, MoveTuning, PhysicsBody, Recti,
    SpritePlayer, TileGrid, Vec2, ViewRange,
};
use tracing::{debug, info};

const ARENA_VIRTUAL_WIDTH: f32 = 360.0;
const ARENA_MIN_X: f32 = 0.0;
const ARENA_MAX_X: f32 = 288.0;
const ARENA_TILE_SIZE: u32 = 32;
const MAX_CONSECUTIVE_DASHES: u32 = 2;
const DASH_DELAY_REDUCED_MS: f32 = 500.0;
const BARRAGE_COOLDOWN_FACTOR: f32 = 1.4;
const HP_RATCHET_FRACTION: f32 = 0.5;
const DAMAGE_IMMUNITY_MS: f32 = 500.0;
const PROJECTILE_CULL_MARGIN_PX: f32 = 32.0;
const PROJECTILE_KIND_CANNONBALL: &str = "cannonball";

const LIST_STAND: &str = "stand";
const LIST_MELEE_ATTACK: &str = "melee_attack";
const LIST_DASH_PREPARATION: &str = "dash_preparation";
const LIST_DASH_ATTACK: &str = "dash_attack";
const LIST_CANNONBALLS: &str = "cannonballs";
const LIST_DAMAGE: &str = "damage";
const LIST_DYING: &str = "dying";
const LIST_JUMPING: &str = "jumping";

const BOSS_COLLIDER: Recti = Recti {
    x: 15,
    y: 0,
    w: 70,
    h: 64,
};
const PLAYER_COLLIDER: Recti = Recti {
    x: 0,
    y: 0,
    w: 32,
    h: 32,
};

include!("types.rs");
include!("behavior.rs");
include!("arena.rs");
