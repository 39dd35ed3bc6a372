//! Fixed page constants and the tunable timings of the glitch engine.

/// Length of one simulated player second in milliseconds.
pub const PLAYER_TICK_MS: u64 = 1000;

/// Opacity every photo rests at between effects.
pub const RESTING_OPACITY: f64 = 0.8;

/// Image pool used when a relocated photo swaps its source.
pub const PHOTO_SOURCES: [&str; 4] = [
    "photo/220ae00a9952c0d229ef74ed2f50277e.jpg",
    "photo/73de252c60e3aacaed223c6b7339d777.jpg",
    "photo/b59c1a252380e39639c78fa2d8cf7c2e.jpg",
    "photo/f87697a229e2c0738557e6fae28d394e.jpg",
];

/// Initial placement of a photo: position in vw/vh, width in vw, rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub rotation: f64,
}

/// Load-time layout; photos beyond the fourth reuse the slots in order.
pub const INITIAL_SLOTS: [Slot; 4] = [
    Slot { x: -8.0, y: 5.0, width: 22.0, rotation: -2.0 }, // top left, partly off screen
    Slot { x: 75.0, y: 8.0, width: 18.0, rotation: 3.0 },  // top right
    Slot { x: 70.0, y: 55.0, width: 26.0, rotation: -1.0 }, // bottom right
    Slot { x: 2.0, y: 65.0, width: 20.0, rotation: 4.0 },  // bottom left
];

/// Screen band a relocated photo lands in. Ranges are half-open, in vw/vh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub name: &'static str,
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Zone {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x.0 && x < self.x.1 && y >= self.y.0 && y < self.y.1
    }
}

pub const ZONES: [Zone; 4] = [
    Zone { name: "left", x: (-10.0, 5.0), y: (0.0, 70.0) },
    Zone { name: "right", x: (65.0, 85.0), y: (0.0, 70.0) },
    Zone { name: "top", x: (0.0, 80.0), y: (-5.0, 15.0) },
    Zone { name: "bottom", x: (0.0, 80.0), y: (55.0, 85.0) },
];

/// Intervals (ms) and per-tick probabilities of the recurring photo effects.
#[derive(Debug, Clone, PartialEq)]
pub struct GlitchConfig {
    pub jitter_every: u64,
    pub big_jitter_chance: f64,
    pub glitch_every: u64,
    pub glitch_chance: f64,
    pub flicker_every: u64,
    pub flicker_chance: f64,
    pub relocate_every: u64,
    pub relocate_chance: f64,
    pub slice_every: u64,
    pub slice_chance: f64,
    pub burst_every: u64,
    pub burst_chance: f64,
    pub burst_pulses: u8,
    pub burst_spacing: u64,
    pub burst_hit_chance: f64,
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            jitter_every: 80,
            big_jitter_chance: 0.08,
            glitch_every: 180,
            glitch_chance: 0.45,
            flicker_every: 250,
            flicker_chance: 0.35,
            relocate_every: 5000,
            relocate_chance: 0.25,
            slice_every: 500,
            slice_chance: 0.30,
            burst_every: 7000,
            burst_chance: 0.12,
            burst_pulses: 5,
            burst_spacing: 40,
            burst_hit_chance: 0.5,
        }
    }
}
