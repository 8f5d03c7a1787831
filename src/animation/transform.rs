/// Paint-time placement of the cup relative to its home rectangle.
///
/// Rotation is applied around the rectangle centre, then the translation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Translation in x and y
    pub translate: (f32, f32),
    /// Rotation in radians (clockwise, y points down)
    pub rotate: f32,
}

impl Transform {
    /// No offset, no rotation
    pub const IDENTITY: Self = Self {
        translate: (0.0, 0.0),
        rotate: 0.0,
    };

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            translate: (x, y),
            ..Self::IDENTITY
        }
    }

    pub fn rotate(radians: f32) -> Self {
        Self {
            rotate: radians,
            ..Self::IDENTITY
        }
    }

    pub fn rotate_degrees(degrees: f32) -> Self {
        Self::rotate(degrees.to_radians())
    }

    /// Same transform with a different rotation
    pub fn rotated(mut self, radians: f32) -> Self {
        self.rotate = radians;
        self
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Map a point given relative to a box of `width` x `height` (local
    /// coordinates, origin at its top-left corner) through this transform.
    pub fn apply_to_point(&self, x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
        let origin_x = width * 0.5;
        let origin_y = height * 0.5;

        let mut tx = x - origin_x;
        let mut ty = y - origin_y;

        if self.rotate.abs() > 1e-6 {
            let (sin, cos) = self.rotate.sin_cos();
            let rx = tx * cos - ty * sin;
            let ry = tx * sin + ty * cos;
            tx = rx;
            ty = ry;
        }

        (
            tx + origin_x + self.translate.0,
            ty + origin_y + self.translate.1,
        )
    }

    /// Inverse of [`Transform::apply_to_point`]
    pub fn unapply_point(&self, x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
        let origin_x = width * 0.5;
        let origin_y = height * 0.5;

        let mut tx = x - self.translate.0 - origin_x;
        let mut ty = y - self.translate.1 - origin_y;

        if self.rotate.abs() > 1e-6 {
            let (sin, cos) = (-self.rotate).sin_cos();
            let rx = tx * cos - ty * sin;
            let ry = tx * sin + ty * cos;
            tx = rx;
            ty = ry;
        }

        (tx + origin_x, ty + origin_y)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
