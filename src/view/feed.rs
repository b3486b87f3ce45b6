//! Scrolling feed rendering
//!
//! Units are laid out back to back, each exactly one viewport tall. Every
//! unit intersecting the viewport is drawn whole into a scratch buffer and
//! its visible rows are copied into the frame, so a half-scrolled unit
//! looks cut off rather than squashed.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Paragraph, Widget},
    Frame,
};

use crate::model::AppModel;
use crate::surface::RegionId;
use super::unit::render_unit;
use super::utils::centered_rect;

pub fn render_feed(frame: &mut Frame, area: Rect, model: &AppModel, now: Instant) {
    if model.store.is_empty() {
        let message = Paragraph::new("No cars to show")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(message, centered_rect(area.width, 1, area));
        return;
    }

    let viewport = &model.viewport;
    let top = viewport.offset();
    let bottom = top + area.height as u32;
    let sweep = model.config.playback.progress_sweep();

    // listing regions followed by the footer region
    for index in 0..=viewport.units() {
        let Some((start, end)) = viewport.region_bounds(RegionId(index)) else {
            continue;
        };
        if end <= top || start >= bottom {
            continue;
        }

        let mut scratch = Buffer::empty(Rect::new(0, 0, area.width, (end - start) as u16));
        let scratch_area = scratch.area;
        if index < viewport.units() {
            let (Some(listing), Some(unit)) = (model.store.get(index), model.feed.unit_at(index)) else {
                continue;
            };
            render_unit(&mut scratch, scratch_area, listing, unit, now, sweep);
        } else {
            render_footer(&mut scratch, scratch_area);
        }
        blit(frame.buffer_mut(), area, &scratch, start as i64 - top as i64);
    }
}

fn render_footer(buf: &mut Buffer, area: Rect) {
    let y = area.y + area.height / 2;
    Paragraph::new("E N D   O F   F E E D")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .render(Rect::new(area.x, y, area.width, 1), buf);
}

/// Copy `src` into `area` of `dest` with its first row at `top` (may be negative)
fn blit(dest: &mut Buffer, area: Rect, src: &Buffer, top: i64) {
    for row in 0..src.area.height {
        let y = top + row as i64;
        if y < 0 || y >= area.height as i64 {
            continue;
        }
        for col in 0..src.area.width.min(area.width) {
            let Some(cell) = src.cell((col, row)) else {
                continue;
            };
            if let Some(target) = dest.cell_mut((area.x + col, area.y + y as u16)) {
                *target = cell.clone();
            }
        }
    }
}
