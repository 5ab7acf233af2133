use super::math::{Recti, Vec2};
use super::tiles::{TileCollision, TileGrid};

pub(crate) fn body_bounds(position: Vec2, collider: Recti) -> Recti {
    Recti::new(
        position.x.round() as i32 + collider.x,
        position.y.round() as i32 + collider.y,
        collider.w,
        collider.h,
    )
}

/// Separates a body from every non-passable tile its bounds overlap.
///
/// Tiles are visited in scan order and each resolution moves the body
/// immediately, so later tiles in the same pass test against the corrected
/// box. This incremental ordering is not a global solve; it is the
/// deterministic tie-break the rest of the simulation is tuned against and
/// must stay as-is.
///
/// Per overlapped tile the shallow axis wins: resolve along Y when
/// `|depth.y| < |depth.x|`, when the tile is a one-way Platform, or when the
/// horizontal velocity is exactly zero; otherwise along X. Platforms never
/// block horizontal motion and only block vertical motion when the body's
/// previous bottom edge was at or above the tile top (so a body jumps up
/// through them and lands on them coming down).
///
/// Returns whether a ground contact was established this pass and stores the
/// final bounds bottom into `previous_bottom` for the next tick's tie-break.
pub fn resolve_tile_collisions(
    position: &mut Vec2,
    collider: Recti,
    previous_bottom: &mut f32,
    velocity_x: f32,
    tiles: &TileGrid,
) -> bool {
    let tile_size = tiles.tile_size() as f32;
    let mut bounds = body_bounds(*position, collider);

    let left_tile = (bounds.left() as f32 / tile_size).floor() as i32;
    let right_tile = (bounds.right() as f32 / tile_size).ceil() as i32 - 1;
    let top_tile = (bounds.top() as f32 / tile_size).floor() as i32;
    let bottom_tile = (bounds.bottom() as f32 / tile_size).ceil() as i32 - 1;

    let mut on_ground = false;

    for y in top_tile..=bottom_tile {
        for x in left_tile..=right_tile {
            let collision = tiles.collision(x, y);
            if collision == TileCollision::Passable {
                continue;
            }

            let tile_bounds = tiles.tile_bounds(x, y);
            let depth = bounds.intersection_depth(tile_bounds);
            if depth == Vec2::ZERO {
                continue;
            }

            let abs_depth_x = depth.x.abs();
            let abs_depth_y = depth.y.abs();

            if abs_depth_y < abs_depth_x
                || collision == TileCollision::Platform
                || velocity_x == 0.0
            {
                if *previous_bottom <= tile_bounds.top() as f32 {
                    on_ground = true;
                }
                if collision == TileCollision::Block || on_ground {
                    position.y += depth.y;
                    bounds = body_bounds(*position, collider);
                }
            } else if collision == TileCollision::Block {
                position.x += depth.x;
                bounds = body_bounds(*position, collider);
            }
        }
    }

    *previous_bottom = bounds.bottom() as f32;
    on_ground
}
