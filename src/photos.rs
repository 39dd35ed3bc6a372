//! Randomised glitch animation over the floating photos.
//!
//! The engine owns one [`Photo`] per page element and a [`Timeline`] of
//! effect events. Recurring rolls (jitter, glitch, flicker, relocate,
//! slice, burst) reschedule themselves; each effect schedules its own
//! follow-up steps. Style changes are recorded on the photo and flagged
//! dirty for the page binding to copy out.

use crate::config::{GlitchConfig, Zone, INITIAL_SLOTS, PHOTO_SOURCES, RESTING_OPACITY, ZONES};
use crate::rng::FxRng;
use crate::timeline::Timeline;

/// Inline style the page binding writes onto a photo element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhotoStyle {
    pub left: String,
    pub top: String,
    pub width: String,
    pub transform: String,
    pub filter: String,
    pub opacity: String,
    pub transition: String,
    pub clip_path: String,
    /// Set only once the source has been swapped away from the page's own.
    pub src: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct Photo {
    pub base_x: f64,
    pub base_y: f64,
    pub base_rotation: f64,
    pub width: f64,
    pub glitching: bool,
    pub visible: bool,
    style: PhotoStyle,
    dirty: bool,
}

impl Photo {
    fn new(x: f64, y: f64, width: f64, rotation: f64) -> Self {
        let mut photo = Self {
            base_x: x,
            base_y: y,
            base_rotation: rotation,
            width,
            glitching: false,
            visible: true,
            style: PhotoStyle::default(),
            dirty: true,
        };
        photo.place();
        photo.style.opacity = opacity(RESTING_OPACITY);
        photo
    }

    pub fn style(&self) -> &PhotoStyle {
        &self.style
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn edit(&mut self) -> &mut PhotoStyle {
        self.dirty = true;
        &mut self.style
    }

    /// Write the base geometry into the style.
    fn place(&mut self) {
        let (x, y, w, r) = (self.base_x, self.base_y, self.width, self.base_rotation);
        let style = self.edit();
        style.left = format!("{x}vw");
        style.top = format!("{y}vh");
        style.width = format!("{w}vw");
        style.transform = rest_transform(r);
    }
}

/// One distortion applied by a glitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlitchKind {
    ChannelSplit,
    Contrast,
    Invert,
    Blur,
    HueRotate,
    Skew,
}

impl GlitchKind {
    pub const ALL: [GlitchKind; 6] = [
        GlitchKind::ChannelSplit,
        GlitchKind::Contrast,
        GlitchKind::Invert,
        GlitchKind::Blur,
        GlitchKind::HueRotate,
        GlitchKind::Skew,
    ];

    fn filter(self) -> Option<&'static str> {
        match self {
            GlitchKind::ChannelSplit => Some("drop-shadow(2px 0 0 red) drop-shadow(-2px 0 0 cyan)"),
            GlitchKind::Contrast => Some("contrast(1.8) brightness(1.1)"),
            GlitchKind::Invert => Some("invert(1)"),
            GlitchKind::Blur => Some("blur(1px)"),
            GlitchKind::HueRotate => Some("hue-rotate(90deg)"),
            GlitchKind::Skew => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FxEvent {
    JitterTick,
    GlitchRoll,
    FlickerRoll,
    RelocateRoll,
    SliceRoll,
    BurstRoll,
    GlitchEnd(usize),
    FlickerEnd(usize),
    RelocateMove(usize),
    RelocateReveal(usize),
    TransitionClear(usize),
    SliceEnd(usize),
    BurstPulse { remaining: u8 },
}

pub struct GlitchEngine {
    photos: Vec<Photo>,
    timeline: Timeline<FxEvent>,
    rng: FxRng,
    config: GlitchConfig,
}

impl GlitchEngine {
    /// Lay out `count` photos and arm every recurring effect from `start`.
    pub fn new(count: usize, config: GlitchConfig, seed: u64, start: u64) -> Self {
        let photos = (0..count)
            .map(|i| {
                let slot = INITIAL_SLOTS[i % INITIAL_SLOTS.len()];
                Photo::new(slot.x, slot.y, slot.width, slot.rotation)
            })
            .collect();
        let mut timeline = Timeline::new(start);
        for (event, every) in [
            (FxEvent::JitterTick, config.jitter_every),
            (FxEvent::GlitchRoll, config.glitch_every),
            (FxEvent::FlickerRoll, config.flicker_every),
            (FxEvent::RelocateRoll, config.relocate_every),
            (FxEvent::SliceRoll, config.slice_every),
            (FxEvent::BurstRoll, config.burst_every),
        ] {
            timeline.schedule_in(every, event);
        }
        Self {
            photos,
            timeline,
            rng: FxRng::new(seed),
            config,
        }
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn now(&self) -> u64 {
        self.timeline.now()
    }

    /// Indices of photos whose style changed since the last call, clearing the flags.
    pub fn take_dirty(&mut self) -> Vec<usize> {
        self.photos
            .iter_mut()
            .enumerate()
            .filter_map(|(i, p)| std::mem::take(&mut p.dirty).then_some(i))
            .collect()
    }

    /// Fire every event due at or before `now`.
    pub fn advance_to(&mut self, now: u64) {
        while let Some((at, event)) = self.timeline.pop_due(now) {
            self.handle(at, event, now);
        }
        self.timeline.settle(now);
    }

    fn handle(&mut self, at: u64, event: FxEvent, now: u64) {
        let every = match event {
            FxEvent::JitterTick => {
                self.jitter();
                self.config.jitter_every
            }
            FxEvent::GlitchRoll => {
                if self.rng.chance(self.config.glitch_chance) {
                    if let Some(i) = self.random_photo() {
                        self.glitch(i);
                    }
                }
                self.config.glitch_every
            }
            FxEvent::FlickerRoll => {
                if self.rng.chance(self.config.flicker_chance) {
                    if let Some(i) = self.random_photo() {
                        self.flicker(i);
                    }
                }
                self.config.flicker_every
            }
            FxEvent::RelocateRoll => {
                if self.rng.chance(self.config.relocate_chance) {
                    if let Some(i) = self.random_photo() {
                        self.relocate(i);
                    }
                }
                self.config.relocate_every
            }
            FxEvent::SliceRoll => {
                if self.rng.chance(self.config.slice_chance) {
                    if let Some(i) = self.random_photo() {
                        self.slice(i);
                    }
                }
                self.config.slice_every
            }
            FxEvent::BurstRoll => {
                if self.rng.chance(self.config.burst_chance) {
                    self.burst();
                }
                self.config.burst_every
            }
            FxEvent::GlitchEnd(i) => return self.end_glitch(i),
            FxEvent::FlickerEnd(i) => {
                // a relocation started meanwhile owns the opacity until it reveals
                if self.photos[i].visible {
                    self.photos[i].edit().opacity = opacity(RESTING_OPACITY);
                }
                return;
            }
            FxEvent::RelocateMove(i) => return self.move_photo(i),
            FxEvent::RelocateReveal(i) => {
                let photo = &mut self.photos[i];
                photo.edit().opacity = opacity(RESTING_OPACITY);
                photo.visible = true;
                self.timeline.schedule_in(300, FxEvent::TransitionClear(i));
                return;
            }
            FxEvent::TransitionClear(i) => {
                self.photos[i].edit().transition.clear();
                return;
            }
            FxEvent::SliceEnd(i) => {
                self.photos[i].edit().clip_path.clear();
                return;
            }
            FxEvent::BurstPulse { remaining } => {
                self.burst_pulse();
                if remaining > 1 {
                    self.timeline.schedule_in(
                        self.config.burst_spacing,
                        FxEvent::BurstPulse { remaining: remaining - 1 },
                    );
                }
                return;
            }
        };

        // setInterval cadence, but a tick that fell more than a period
        // behind (throttled tab) restarts from now instead of replaying.
        let mut next = at + every.max(1);
        if next < now {
            next = now + every.max(1);
        }
        self.timeline.schedule_at(next, event);
    }

    fn random_photo(&mut self) -> Option<usize> {
        if self.photos.is_empty() {
            None
        } else {
            Some(self.rng.index(self.photos.len()))
        }
    }

    fn jitter(&mut self) {
        for photo in self.photos.iter_mut() {
            if photo.glitching || !photo.visible {
                continue;
            }
            let intensity = if self.rng.chance(self.config.big_jitter_chance) {
                10.0
            } else {
                1.5
            };
            let tx = self.rng.centered(intensity);
            let ty = self.rng.centered(intensity);
            let r = photo.base_rotation + self.rng.centered(1.0);
            photo.edit().transform = format!("translate({tx}px, {ty}px) rotate({r}deg)");
        }
    }

    /// Distort photo `i` for 50..130 ms. Skipped while it is already glitching or hidden.
    pub fn glitch(&mut self, i: usize) {
        let kind = GlitchKind::ALL[self.rng.index(GlitchKind::ALL.len())];
        self.glitch_with(i, kind);
    }

    pub fn glitch_with(&mut self, i: usize, kind: GlitchKind) {
        let Some(photo) = self.photos.get(i) else { return };
        if photo.glitching || !photo.visible {
            return;
        }
        let base = photo.base_rotation;
        let css = match kind.filter() {
            Some(filter) => (Some(filter.to_string()), None),
            None => {
                let tx = self.rng.centered(30.0);
                let ty = self.rng.centered(15.0);
                let r = base + self.rng.centered(6.0);
                let skew = self.rng.centered(2.0);
                (None, Some(format!("translate({tx}px, {ty}px) rotate({r}deg) skewX({skew}deg)")))
            }
        };
        let photo = &mut self.photos[i];
        photo.glitching = true;
        let style = photo.edit();
        match css {
            (Some(filter), _) => style.filter = filter,
            (None, Some(transform)) => style.transform = transform,
            _ => {}
        }
        let hold = self.rng.millis(50, 130);
        self.timeline.schedule_in(hold, FxEvent::GlitchEnd(i));
    }

    fn end_glitch(&mut self, i: usize) {
        let photo = &mut self.photos[i];
        let base = photo.base_rotation;
        let style = photo.edit();
        style.filter.clear();
        style.transform = rest_transform(base);
        photo.glitching = false;
    }

    /// Drop photo `i` to a low opacity for 30..80 ms.
    pub fn flicker(&mut self, i: usize) {
        if !self.photos.get(i).is_some_and(|p| p.visible) {
            return;
        }
        let level = self.rng.between(0.1, 0.3);
        self.photos[i].edit().opacity = opacity(level);
        let hold = self.rng.millis(30, 80);
        self.timeline.schedule_in(hold, FxEvent::FlickerEnd(i));
    }

    /// Fade photo `i` out, move it to a random zone, and fade it back in.
    pub fn relocate(&mut self, i: usize) {
        let Some(photo) = self.photos.get_mut(i) else { return };
        if !photo.visible {
            return;
        }
        photo.visible = false;
        let style = photo.edit();
        style.transition = "opacity 0.3s".to_string();
        style.opacity = opacity(0.0);
        self.timeline.schedule_in(500, FxEvent::RelocateMove(i));
    }

    fn move_photo(&mut self, i: usize) {
        let zone: Zone = ZONES[self.rng.index(ZONES.len())];
        let x = self.rng.between(zone.x.0, zone.x.1);
        let y = self.rng.between(zone.y.0, zone.y.1);
        let rotation = self.rng.centered(8.0);
        let width = self.rng.between(15.0, 30.0);
        let swap = self.rng.chance(0.5).then(|| PHOTO_SOURCES[self.rng.index(PHOTO_SOURCES.len())]);

        let photo = &mut self.photos[i];
        photo.base_x = x;
        photo.base_y = y;
        photo.base_rotation = rotation;
        photo.width = width;
        photo.place();
        if let Some(src) = swap {
            photo.edit().src = Some(src);
        }
        log::debug!("photo {i} relocated to {} band ({x:.1}vw, {y:.1}vh)", zone.name);
        self.timeline.schedule_in(100, FxEvent::RelocateReveal(i));
    }

    /// Tear photo `i` into 3..=5 horizontally shifted bands for 60..120 ms.
    pub fn slice(&mut self, i: usize) {
        if !self.photos.get(i).is_some_and(|p| p.visible) {
            return;
        }
        let bands = 3 + self.rng.index(3);
        let offsets: Vec<f64> = (0..bands).map(|_| self.rng.centered(12.0)).collect();
        self.photos[i].edit().clip_path = slice_polygon(&offsets);
        let hold = self.rng.millis(60, 120);
        self.timeline.schedule_in(hold, FxEvent::SliceEnd(i));
    }

    /// Start a cluster of rapid glitch pulses.
    pub fn burst(&mut self) {
        log::debug!("glitch burst at {}ms", self.timeline.now());
        self.timeline.schedule_in(
            self.config.burst_spacing,
            FxEvent::BurstPulse { remaining: self.config.burst_pulses },
        );
    }

    fn burst_pulse(&mut self) {
        for i in 0..self.photos.len() {
            if self.rng.chance(self.config.burst_hit_chance) {
                self.glitch(i);
            }
        }
    }
}

fn rest_transform(rotation: f64) -> String {
    format!("rotate({rotation}deg)")
}

fn opacity(level: f64) -> String {
    format!("{level}")
}

/// `polygon(...)` of equal-height bands, band `k` shifted by `offsets[k]` percent.
pub fn slice_polygon(offsets: &[f64]) -> String {
    let n = offsets.len() as f64;
    let bands: Vec<String> = offsets
        .iter()
        .enumerate()
        .map(|(k, off)| {
            let y1 = k as f64 / n * 100.0;
            let y2 = (k + 1) as f64 / n * 100.0;
            let right = 100.0 + off;
            format!("{off:.2}% {y1:.2}%, {right:.2}% {y1:.2}%, {right:.2}% {y2:.2}%, {off:.2}% {y2:.2}%")
        })
        .collect();
    format!("polygon({})", bands.join(", "))
}
