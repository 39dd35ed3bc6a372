/// Maximum tilt angle in degrees at unit offset along one axis.
pub const TILT_DEGREES: f64 = 5.0;

/// Rotation applied to the page container for one pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    /// Normalised horizontal offset from the viewport center, in `[-1, 1]`.
    pub x: f64,
    /// Normalised vertical offset from the viewport center, in `[-1, 1]`.
    pub y: f64,
}

impl Tilt {
    pub const NEUTRAL: Tilt = Tilt { x: 0.0, y: 0.0 };

    /// Rotation axis `(-y, x, 0)`.
    pub fn axis(&self) -> (f64, f64, f64) {
        (-self.y, self.x, 0.0)
    }

    pub fn angle_deg(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt() * TILT_DEGREES
    }

    pub fn css(&self) -> String {
        let (ax, ay, az) = self.axis();
        format!(
            "perspective(1000px) rotate3d({ax}, {ay}, {az}, {}deg)",
            self.angle_deg()
        )
    }
}

/// Map a pointer position to the container tilt.
pub fn tilt_for(client_x: f64, client_y: f64, width: f64, height: f64) -> Tilt {
    if width <= 0.0 || height <= 0.0 {
        return Tilt::NEUTRAL;
    }
    Tilt {
        x: (client_x / width - 0.5) * 2.0,
        y: (client_y / height - 0.5) * 2.0,
    }
}
