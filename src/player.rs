//! Simulated track player: transport state machine plus display model.
//!
//! Nothing is decoded or played; the player only counts simulated seconds
//! against each track's listed duration.

use crate::config::PLAYER_TICK_MS;
use crate::error::PageError;

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub index: usize,
    pub name: String,
    pub duration: u32,
}

impl Track {
    /// Build a track from the `M:SS` text carried by the page.
    pub fn parse(index: usize, name: impl Into<String>, duration: &str) -> Result<Self, PageError> {
        Ok(Self {
            index,
            name: name.into(),
            duration: parse_duration(duration)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// No track selected yet.
    #[default]
    Idle,
    Stopped,
    Playing,
    Paused,
}

impl Transport {
    pub fn label(self) -> &'static str {
        match self {
            Transport::Idle | Transport::Stopped => "stopped",
            Transport::Playing => "playing",
            Transport::Paused => "paused",
        }
    }
}

/// Highlight state of one entry in the track list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackMark {
    None,
    Active,
    Playing,
}

/// Everything the page shows for the player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub title: String,
    pub status: &'static str,
    pub time: String,
    pub progress_percent: f64,
    pub play_label: &'static str,
    pub marks: Vec<TrackMark>,
}

#[derive(Debug, Clone)]
pub struct Player {
    tracks: Vec<Track>,
    current: Option<usize>,
    transport: Transport,
    elapsed: u32,
    total: u32,
    next_tick_at: Option<u64>,
}

impl Player {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            current: None,
            transport: Transport::Idle,
            elapsed: 0,
            total: 0,
            next_tick_at: None,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    pub fn is_playing(&self) -> bool {
        self.transport == Transport::Playing
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Due time of the next simulated second, if the ticker runs.
    pub fn next_tick_at(&self) -> Option<u64> {
        self.next_tick_at
    }

    /// Make `index` the current track and rewind it. Out-of-range indices are ignored.
    ///
    /// The ticker is left untouched, so a playing selection keeps playing.
    pub fn select_track(&mut self, index: usize) {
        let Some(track) = self.tracks.get(index) else {
            log::warn!("ignoring selection of track {index}, only {} loaded", self.tracks.len());
            return;
        };
        self.current = Some(index);
        self.total = track.duration;
        self.elapsed = 0;
        if self.transport == Transport::Idle {
            self.transport = Transport::Stopped;
        }
        log::debug!("selected track {index} ({}s)", self.total);
    }

    pub fn play(&mut self, now: u64) {
        if self.tracks.is_empty() {
            return;
        }
        if self.current.is_none() {
            self.select_track(0);
        }
        self.transport = Transport::Playing;
        self.next_tick_at = Some(now + PLAYER_TICK_MS);
    }

    /// Only meaningful while playing; otherwise a no-op.
    pub fn pause(&mut self) {
        if self.transport != Transport::Playing {
            return;
        }
        self.transport = Transport::Paused;
        self.next_tick_at = None;
    }

    pub fn stop(&mut self) {
        self.next_tick_at = None;
        self.elapsed = 0;
        self.transport = if self.current.is_some() {
            Transport::Stopped
        } else {
            Transport::Idle
        };
    }

    /// Play button: pause while playing, otherwise play.
    pub fn toggle(&mut self, now: u64) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play(now);
        }
    }

    pub fn next(&mut self, now: u64) {
        let n = self.tracks.len();
        if n == 0 {
            return;
        }
        let index = match self.current {
            Some(i) => (i + 1) % n,
            None => 0,
        };
        self.switch_to(index, now);
    }

    pub fn prev(&mut self, now: u64) {
        let n = self.tracks.len();
        if n == 0 {
            return;
        }
        let index = match self.current {
            Some(i) => (i + n - 1) % n,
            None => n - 1,
        };
        self.switch_to(index, now);
    }

    /// Select a track from the list and start it.
    pub fn pick(&mut self, index: usize, now: u64) {
        if index >= self.tracks.len() {
            return;
        }
        self.select_track(index);
        self.play(now);
    }

    fn switch_to(&mut self, index: usize, now: u64) {
        let was_playing = self.is_playing();
        self.select_track(index);
        if was_playing {
            self.play(now);
        }
    }

    /// Run every simulated second due at or before `now`. Returns whether the display changed.
    pub fn advance_to(&mut self, now: u64) -> bool {
        let mut changed = false;
        while let Some(at) = self.next_tick_at {
            if at > now {
                break;
            }
            self.next_tick_at = Some(at + PLAYER_TICK_MS);
            self.elapsed += 1;
            changed = true;
            if self.elapsed >= self.total {
                log::debug!("track finished at {at}ms, advancing");
                self.next(at);
            }
        }
        changed
    }

    pub fn view(&self) -> PlayerView {
        let marks = (0..self.tracks.len())
            .map(|i| match self.current {
                Some(c) if c == i && self.is_playing() => TrackMark::Playing,
                Some(c) if c == i => TrackMark::Active,
                _ => TrackMark::None,
            })
            .collect();
        let play_label = if self.is_playing() { "pause" } else { "play" };

        match self.current.and_then(|i| self.tracks.get(i)) {
            Some(track) => PlayerView {
                title: format!("{:02}. {}", track.index + 1, track.name),
                status: self.transport.label(),
                time: format!("{} / {}", format_time(self.elapsed), format_time(self.total)),
                progress_percent: if self.total == 0 {
                    0.0
                } else {
                    f64::from(self.elapsed) / f64::from(self.total) * 100.0
                },
                play_label,
                marks,
            },
            None => PlayerView {
                title: "- - -".to_string(),
                status: self.transport.label(),
                time: "00:00 / 00:00".to_string(),
                progress_percent: 0.0,
                play_label,
                marks,
            },
        }
    }
}

/// Parse `M:SS` into seconds.
pub fn parse_duration(text: &str) -> Result<u32, PageError> {
    let bad = || PageError::BadDuration(text.to_string());
    let (m, s) = text.trim().split_once(':').ok_or_else(bad)?;
    let minutes: u32 = m.parse().map_err(|_| bad())?;
    let seconds: u32 = s.parse().map_err(|_| bad())?;
    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(bad)
}

/// `MM:SS`, minutes zero-padded to two digits.
pub fn format_time(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
