use serde::{Deserialize, Serialize};

/// Grid coordinate. Positive `y` is "up" in the generated layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const ORIGIN: Pos = Pos { y: 0, x: 0 };

    pub fn up(self) -> Pos {
        Pos { y: self.y + 1, x: self.x }
    }

    pub fn right(self) -> Pos {
        Pos { y: self.y, x: self.x + 1 }
    }

    pub fn down(self) -> Pos {
        Pos { y: self.y - 1, x: self.x }
    }

    pub fn left(self) -> Pos {
        Pos { y: self.y, x: self.x - 1 }
    }

    pub fn offset(self, dy: i32, dx: i32) -> Pos {
        Pos { y: self.y + dy, x: self.x + dx }
    }
}

pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

pub fn euclidean(a: Pos, b: Pos) -> f32 {
    let dx = (a.x - b.x) as f32;
    let dy = (a.y - b.y) as f32;
    (dx * dx + dy * dy).sqrt()
}
