/// Axis-aligned rectangle in world pixels (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap test: rectangles that merely touch do not intersect,
    /// and an empty rectangle never intersects anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.w > 0.0
            && self.h > 0.0
            && other.w > 0.0
            && other.h > 0.0
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Grow by `margin` on every side.
    pub fn inflate(&self, margin: f32) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.w + 2.0 * margin,
            self.h + 2.0 * margin,
        )
    }

    /// Move (never resize) so the rectangle lies inside `bounds`.
    /// A rectangle wider or taller than `bounds` is centred on that axis.
    pub fn clamp_within(&self, bounds: &Rect) -> Rect {
        let x = clamp_axis(self.x, self.w, bounds.x, bounds.w);
        let y = clamp_axis(self.y, self.h, bounds.y, bounds.h);
        Rect { x, y, ..*self }
    }
}

fn clamp_axis(pos: f32, len: f32, lo: f32, span: f32) -> f32 {
    if len >= span {
        lo + (span - len) / 2.0
    } else if pos < lo {
        lo
    } else if pos + len > lo + span {
        lo + span - len
    } else {
        pos
    }
}
