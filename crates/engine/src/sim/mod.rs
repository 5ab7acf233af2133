mod animation;
mod body;
mod collision;
mod math;
mod tiles;

pub use animation::{AnimationEvent, FrameList, SpritePlayer};
pub use body::{MoveIntent, PhysicsBody};
pub use collision::resolve_tile_collisions;
pub use math::{Recti, Vec2};
pub use tiles::{TileCollision, TileGrid, TileGridError};
