//! Snapping scroll container
//!
//! Every listing occupies exactly one viewport height, followed by a short
//! "End of Feed" footer. Paging animates to the next snap point; wheel
//! scrolling moves freely and snaps to the nearest unit once it has been
//! idle for the settle delay.

use std::time::{Duration, Instant};

use crate::config::FeedConfig;
use super::visibility::{RegionId, VisibilityEvent, VisibilityObserver, VisibilitySink};

struct Observation {
    region: RegionId,
    sink: VisibilitySink,
    visible: bool,
}

#[derive(Clone, Copy, Debug)]
struct SnapAnimation {
    from: u32,
    to: u32,
    started: Instant,
}

pub struct SnapViewport {
    height: u16,
    footer_rows: u16,
    units: usize,
    offset: u32,
    animation: Option<SnapAnimation>,
    settle_deadline: Option<Instant>,
    threshold: f64,
    snap_duration: Duration,
    settle_delay: Duration,
    observations: Vec<Observation>,
}

impl SnapViewport {
    pub fn new(units: usize, height: u16, config: &FeedConfig) -> Self {
        Self {
            height: height.max(1),
            footer_rows: config.footer_rows,
            units,
            offset: 0,
            animation: None,
            settle_deadline: None,
            threshold: config.visibility_threshold,
            snap_duration: config.snap_duration(),
            settle_delay: config.wheel_settle(),
            observations: Vec::new(),
        }
    }

    /// First content row shown at the top of the viewport
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn units(&self) -> usize {
        self.units
    }

    pub fn is_settled(&self) -> bool {
        self.animation.is_none() && self.settle_deadline.is_none()
    }

    fn content_height(&self) -> u32 {
        self.units as u32 * self.height as u32 + self.footer_rows as u32
    }

    fn max_offset(&self) -> u32 {
        self.content_height().saturating_sub(self.height as u32)
    }

    /// Content rows `[start, end)` covered by a region
    pub fn region_bounds(&self, region: RegionId) -> Option<(u32, u32)> {
        let h = self.height as u32;
        let RegionId(index) = region;
        if index < self.units {
            let start = index as u32 * h;
            Some((start, start + h))
        } else if index == self.units {
            let start = self.units as u32 * h;
            Some((start, start + self.footer_rows as u32))
        } else {
            None
        }
    }

    /// Fraction of the region's area inside the visible bounds
    pub fn visible_ratio(&self, region: RegionId) -> f64 {
        let Some((start, end)) = self.region_bounds(region) else {
            return 0.0;
        };
        if end <= start {
            return 0.0;
        }
        let top = self.offset;
        let bottom = self.offset + self.height as u32;
        let overlap = end.min(bottom).saturating_sub(start.max(top));
        overlap as f64 / (end - start) as f64
    }

    fn snap_points(&self) -> Vec<u32> {
        let max = self.max_offset();
        let mut points: Vec<u32> = (0..self.units)
            .map(|i| (i as u32 * self.height as u32).min(max))
            .collect();
        points.push(max);
        points.dedup();
        points
    }

    fn nearest_snap(&self, points: &[u32], offset: u32) -> usize {
        points
            .iter()
            .enumerate()
            .min_by_key(|(_, p)| p.abs_diff(offset))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Animate `delta` snap points up (negative) or down (positive)
    pub fn page(&mut self, delta: i32, now: Instant) {
        let points = self.snap_points();
        let anchor = self.animation.map(|a| a.to).unwrap_or(self.offset);
        let current = self.nearest_snap(&points, anchor) as i64;
        let target = (current + delta as i64).clamp(0, points.len() as i64 - 1) as usize;
        self.animate_to(points[target], now);
    }

    /// Free scroll by whole rows, snapping once scrolling goes idle
    pub fn scroll_lines(&mut self, delta: i32, now: Instant) {
        self.animation = None;
        let offset = (self.offset as i64 + delta as i64).max(0) as u32;
        self.set_offset(offset);
        self.settle_deadline = Some(now + self.settle_delay);
    }

    fn animate_to(&mut self, target: u32, now: Instant) {
        self.settle_deadline = None;
        if target == self.offset {
            self.animation = None;
            return;
        }
        tracing::trace!(from = self.offset, to = target, "Snap animation started");
        self.animation = Some(SnapAnimation {
            from: self.offset,
            to: target,
            started: now,
        });
    }

    /// Advance the snap animation or the wheel settle timer
    pub fn tick(&mut self, now: Instant) {
        if let Some(anim) = self.animation {
            let elapsed = now.saturating_duration_since(anim.started);
            let t = if self.snap_duration.is_zero() {
                1.0
            } else {
                (elapsed.as_secs_f64() / self.snap_duration.as_secs_f64()).min(1.0)
            };
            // ease-out
            let eased = 1.0 - (1.0 - t) * (1.0 - t);
            let position = anim.from as f64 + (anim.to as f64 - anim.from as f64) * eased;
            self.set_offset(position.round() as u32);
            if t >= 1.0 {
                self.set_offset(anim.to);
                self.animation = None;
            }
        } else if let Some(deadline) = self.settle_deadline {
            if now >= deadline {
                let points = self.snap_points();
                let target = points[self.nearest_snap(&points, self.offset)];
                self.animate_to(target, now);
            }
        }
    }

    /// New terminal height; keeps the unit nearest the top aligned
    pub fn resize(&mut self, height: u16) {
        let height = height.max(1);
        if height == self.height {
            return;
        }
        let old = self.height as u32;
        let unit = (self.offset + old / 2) / old;
        self.height = height;
        self.animation = None;
        self.settle_deadline = None;
        // Geometry changed under every region, so the clamp alone may not move the offset
        self.offset = (unit * height as u32).min(self.max_offset());
        self.notify();
    }

    fn set_offset(&mut self, offset: u32) {
        let offset = offset.min(self.max_offset());
        if offset != self.offset {
            self.offset = offset;
            self.notify();
        }
    }

    fn is_visible(&self, region: RegionId) -> bool {
        self.visible_ratio(region) >= self.threshold
    }

    fn notify(&mut self) {
        let states: Vec<bool> = self
            .observations
            .iter()
            .map(|o| self.is_visible(o.region))
            .collect();
        for (obs, visible) in self.observations.iter_mut().zip(states) {
            if obs.visible != visible {
                obs.visible = visible;
                let _ = obs.sink.unbounded_send(VisibilityEvent {
                    region: obs.region,
                    visible,
                });
            }
        }
    }
}

impl VisibilityObserver for SnapViewport {
    fn observe(&mut self, region: RegionId, sink: VisibilitySink) {
        let visible = self.is_visible(region);
        let _ = sink.unbounded_send(VisibilityEvent { region, visible });
        self.observations.push(Observation {
            region,
            sink,
            visible,
        });
    }

    fn disconnect(&mut self) {
        tracing::debug!(regions = self.observations.len(), "Visibility observer disconnected");
        self.observations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::visibility::{visibility_channel, VisibilityStream};
    use futures::FutureExt;
    use futures::StreamExt;

    fn config() -> FeedConfig {
        FeedConfig {
            footer_rows: 3,
            ..FeedConfig::default()
        }
    }

    fn drain(stream: &mut VisibilityStream) -> Vec<VisibilityEvent> {
        let mut events = Vec::new();
        while let Some(Some(ev)) = stream.next().now_or_never() {
            events.push(ev);
        }
        events
    }

    fn observed(units: usize, height: u16) -> (SnapViewport, VisibilityStream) {
        let mut viewport = SnapViewport::new(units, height, &config());
        let (sink, stream) = visibility_channel();
        for i in 0..units {
            viewport.observe(RegionId(i), sink.clone());
        }
        (viewport, stream)
    }

    fn ev(region: usize, visible: bool) -> VisibilityEvent {
        VisibilityEvent {
            region: RegionId(region),
            visible,
        }
    }

    #[test]
    fn reports_initial_state_on_observe() {
        let (_viewport, mut stream) = observed(3, 20);
        assert_eq!(drain(&mut stream), vec![ev(0, true), ev(1, false), ev(2, false)]);
    }

    #[test]
    fn ratio_threshold_is_inclusive() {
        let mut viewport = SnapViewport::new(3, 10, &config());
        viewport.scroll_lines(4, Instant::now());
        assert!((viewport.visible_ratio(RegionId(0)) - 0.6).abs() < 1e-9);
        assert!(viewport.is_visible(RegionId(0)));
        assert!(!viewport.is_visible(RegionId(1)));
    }

    #[test]
    fn page_down_animates_to_next_unit() {
        let (mut viewport, mut stream) = observed(3, 20);
        drain(&mut stream);

        let start = Instant::now();
        viewport.page(1, start);
        assert!(!viewport.is_settled());
        viewport.tick(start + viewport.snap_duration);

        assert_eq!(viewport.offset(), 20);
        assert!(viewport.is_settled());
        let events = drain(&mut stream);
        assert!(events.contains(&ev(0, false)));
        assert_eq!(events.last(), Some(&ev(1, true)));
    }

    #[test]
    fn repeated_paging_accumulates_while_animating() {
        let (mut viewport, _stream) = observed(4, 20);
        let start = Instant::now();
        viewport.page(1, start);
        viewport.page(1, start);
        viewport.tick(start + Duration::from_secs(5));
        assert_eq!(viewport.offset(), 40);
    }

    #[test]
    fn paging_past_the_end_stops_at_footer() {
        let (mut viewport, _stream) = observed(2, 20);
        let start = Instant::now();
        viewport.page(10, start);
        viewport.tick(start + Duration::from_secs(5));
        // two units plus a three-row footer
        assert_eq!(viewport.offset(), 23);

        viewport.page(-10, start);
        viewport.tick(start + Duration::from_secs(10));
        assert_eq!(viewport.offset(), 0);
    }

    #[test]
    fn small_wheel_scroll_snaps_back() {
        let (mut viewport, mut stream) = observed(3, 20);
        drain(&mut stream);

        let start = Instant::now();
        viewport.scroll_lines(5, start);
        assert_eq!(viewport.offset(), 5);
        assert!(drain(&mut stream).is_empty());

        let settled = start + viewport.settle_delay;
        viewport.tick(settled);
        viewport.tick(settled + viewport.snap_duration);
        assert_eq!(viewport.offset(), 0);
        assert!(viewport.is_settled());
    }

    #[test]
    fn large_wheel_scroll_snaps_forward() {
        let (mut viewport, mut stream) = observed(3, 20);
        drain(&mut stream);

        let start = Instant::now();
        viewport.scroll_lines(12, start);
        let settled = start + viewport.settle_delay;
        viewport.tick(settled);
        viewport.tick(settled + viewport.snap_duration);

        assert_eq!(viewport.offset(), 20);
        let events = drain(&mut stream);
        assert_eq!(events.last(), Some(&ev(1, true)));
    }

    #[test]
    fn disconnect_stops_all_events() {
        let (mut viewport, mut stream) = observed(3, 20);
        drain(&mut stream);

        viewport.disconnect();
        viewport.scroll_lines(20, Instant::now());
        // All senders dropped, so the stream reports end-of-stream
        assert_eq!(stream.next().now_or_never(), Some(None));
    }

    #[test]
    fn resize_keeps_current_unit_on_top() {
        let (mut viewport, _stream) = observed(3, 20);
        let start = Instant::now();
        viewport.page(1, start);
        viewport.tick(start + Duration::from_secs(1));
        assert_eq!(viewport.offset(), 20);

        viewport.resize(30);
        assert_eq!(viewport.offset(), 30);
        assert!(viewport.is_visible(RegionId(1)));
    }

    #[test]
    fn footer_region_bounds() {
        let viewport = SnapViewport::new(2, 10, &config());
        assert_eq!(viewport.region_bounds(RegionId(2)), Some((20, 23)));
        assert_eq!(viewport.region_bounds(RegionId(3)), None);
    }
}
