//! Media playback primitives: a direct video element and the embedded
//! third-party player locator.

use std::time::{Duration, Instant};

use anyhow::{bail, Result};

/// Length of the looping clip used by the simulated element
pub const SIMULATED_CLIP_LENGTH: Duration = Duration::from_secs(30);

const EMBED_BASE_URL: &str = "https://www.youtube.com/embed";

/// Direct video element: play / pause / seek / mute
pub trait VideoElement: Send {
    /// Start playback. May be rejected by the host's autoplay policy.
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    fn seek(&mut self, position: Duration);
    fn set_muted(&mut self, muted: bool);
    fn is_muted(&self) -> bool;
    fn is_playing(&self) -> bool;
    fn position(&self) -> Duration;
}

/// Clock-driven stand-in for a native looping video element
#[derive(Clone, Debug)]
pub struct SimulatedVideo {
    source: String,
    position: Duration,
    last_update: Instant,
    playing: bool,
    muted: bool,
    autoplay_allowed: bool,
    clip_length: Duration,
}

impl SimulatedVideo {
    pub fn new(source: impl Into<String>, muted: bool, autoplay_allowed: bool) -> Self {
        Self {
            source: source.into(),
            position: Duration::ZERO,
            last_update: Instant::now(),
            playing: false,
            muted,
            autoplay_allowed,
            clip_length: SIMULATED_CLIP_LENGTH,
        }
    }

    fn position_at(&self, now: Instant) -> Duration {
        if !self.playing || self.clip_length.is_zero() {
            return self.position;
        }
        let elapsed = now.saturating_duration_since(self.last_update);
        let total = (self.position + elapsed).as_millis() % self.clip_length.as_millis();
        Duration::from_millis(total as u64)
    }
}

impl VideoElement for SimulatedVideo {
    fn play(&mut self) -> Result<()> {
        if !self.autoplay_allowed {
            bail!("play() rejected: autoplay blocked by host for {}", self.source);
        }
        if !self.playing {
            self.last_update = Instant::now();
            self.playing = true;
        }
        Ok(())
    }

    fn pause(&mut self) {
        let now = Instant::now();
        self.position = self.position_at(now);
        self.last_update = now;
        self.playing = false;
    }

    fn seek(&mut self, position: Duration) {
        self.position = position.min(self.clip_length);
        self.last_update = Instant::now();
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn position(&self) -> Duration {
        self.position_at(Instant::now())
    }
}

/// Player locator for an embedded video: autoplaying, looping, no chrome
pub fn embed_url(video_id: &str, muted: bool) -> String {
    format!(
        "{}/{}?autoplay=1&mute={}&controls=0&loop=1&playlist={}&playsinline=1&rel=0&showinfo=0&modestbranding=1&iv_load_policy=3",
        EMBED_BASE_URL,
        video_id,
        if muted { 1 } else { 0 },
        video_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_autoplay_is_an_error_and_stays_paused() {
        let mut video = SimulatedVideo::new("clip.mp4", true, false);
        assert!(video.play().is_err());
        assert!(!video.is_playing());
        assert_eq!(video.position(), Duration::ZERO);
    }

    #[test]
    fn pause_and_rewind() {
        let mut video = SimulatedVideo::new("clip.mp4", true, true);
        video.play().unwrap();
        assert!(video.is_playing());

        video.pause();
        video.seek(Duration::ZERO);
        assert!(!video.is_playing());
        assert_eq!(video.position(), Duration::ZERO);
    }

    #[test]
    fn position_loops_over_clip_length() {
        let mut video = SimulatedVideo::new("clip.mp4", true, true);
        video.play().unwrap();
        let later = video.last_update + SIMULATED_CLIP_LENGTH + Duration::from_secs(2);
        assert_eq!(video.position_at(later), Duration::from_secs(2));
    }

    #[test]
    fn mute_is_independent_of_playback() {
        let mut video = SimulatedVideo::new("clip.mp4", true, true);
        video.set_muted(false);
        video.play().unwrap();
        assert!(!video.is_muted());
    }

    #[test]
    fn embed_url_carries_mute_and_loop_params() {
        let url = embed_url("abc123", true);
        assert!(url.starts_with("https://www.youtube.com/embed/abc123?autoplay=1&mute=1"));
        assert!(url.contains("loop=1&playlist=abc123"));
        assert!(embed_url("abc123", false).contains("mute=0"));
    }
}
