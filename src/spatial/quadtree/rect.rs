/// Axis-aligned region stored as centre + half extents.
///
/// Containment is half-open (`>=` left/top, `<` right/bottom) so a point on a
/// shared edge belongs to exactly one quadrant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub half_w: f32,
    pub half_h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, half_w: f32, half_h: f32) -> Self {
        Self { x, y, half_w, half_h }
    }

    /// Region spanning `[left, left + width) x [top, top + height)`
    pub fn from_corners(left: f32, top: f32, width: f32, height: f32) -> Self {
        let half_w = width * 0.5;
        let half_h = height * 0.5;
        Self { x: left + half_w, y: top + half_h, half_w, half_h }
    }

    #[inline]
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x - self.half_w
            && px < self.x + self.half_w
            && py >= self.y - self.half_h
            && py < self.y + self.half_h
    }

    /// Conservative test against the circle's bounding square
    #[inline]
    pub fn intersects(&self, circle: &Circle) -> bool {
        (circle.x - self.x).abs() <= self.half_w + circle.radius
            && (circle.y - self.y).abs() <= self.half_h + circle.radius
    }

    /// Child index 0..4 (NW, NE, SW, SE) holding `(px, py)`
    #[inline]
    pub fn quadrant_of(&self, px: f32, py: f32) -> usize {
        (px >= self.x) as usize | (((py >= self.y) as usize) << 1)
    }

    /// The four equal children in NW, NE, SW, SE order
    pub fn quadrants(&self) -> [Rect; 4] {
        let hw = self.half_w * 0.5;
        let hh = self.half_h * 0.5;
        [
            Rect::new(self.x - hw, self.y - hh, hw, hh),
            Rect::new(self.x + hw, self.y - hh, hw, hh),
            Rect::new(self.x - hw, self.y + hh, hw, hh),
            Rect::new(self.x + hw, self.y + hh, hw, hh),
        ]
    }
}

/// Query circle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    #[inline]
    pub fn contains(&self, px: f32, py: f32) -> bool {
        let dx = px - self.x;
        let dy = py - self.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}
