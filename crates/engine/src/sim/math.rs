/// Coordinate convention:
/// - Positions are in pixels, +y points down (screen space).
/// - Tick-resolved positions always have integral components.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Integer pixel rectangle. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Recti {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Recti {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Signed per-axis overlap between `self` and `other`.
    ///
    /// The magnitude is the overlap amount on that axis; the sign is the
    /// direction `self` must move to separate. Returns `Vec2::ZERO` when the
    /// rectangles are disjoint or merely touching.
    pub fn intersection_depth(&self, other: Recti) -> Vec2 {
        let half_w_a = self.w as f32 / 2.0;
        let half_h_a = self.h as f32 / 2.0;
        let half_w_b = other.w as f32 / 2.0;
        let half_h_b = other.h as f32 / 2.0;

        let center_a_x = self.x as f32 + half_w_a;
        let center_a_y = self.y as f32 + half_h_a;
        let center_b_x = other.x as f32 + half_w_b;
        let center_b_y = other.y as f32 + half_h_b;

        let distance_x = center_a_x - center_b_x;
        let distance_y = center_a_y - center_b_y;
        let min_distance_x = half_w_a + half_w_b;
        let min_distance_y = half_h_a + half_h_b;

        if distance_x.abs() >= min_distance_x || distance_y.abs() >= min_distance_y {
            return Vec2::ZERO;
        }

        let depth_x = if distance_x > 0.0 {
            min_distance_x - distance_x
        } else {
            -min_distance_x - distance_x
        };
        let depth_y = if distance_y > 0.0 {
            min_distance_y - distance_y
        } else {
            -min_distance_y - distance_y
        };
        Vec2 {
            x: depth_x,
            y: depth_y,
        }
    }
}
