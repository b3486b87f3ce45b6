//! Formatting helpers and small layout utilities

use std::time::Duration;

use ratatui::layout::Rect;

const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Whole-dollar US currency: `45000` -> `$45,000`
pub fn format_price(price: u64) -> String {
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${}", grouped)
}

/// Like counter: plain below a thousand, otherwise one decimal and `k`
pub fn format_likes(count: u32) -> String {
    if count < 1000 {
        return count.to_string();
    }
    // tenths of a thousand, rounded half up
    let tenths = (count as u64 + 50) / 100;
    format!("{}.{}k", tenths / 10, tenths % 10)
}

pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Calculate centered rect for an overlay, clamped to `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Sheet anchored to the bottom edge, like a mobile action sheet
pub fn bottom_sheet(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + area.height - height;
    Rect::new(x, y, width, height)
}

pub fn spinner_frame(elapsed: Duration) -> &'static str {
    let index = (elapsed.as_millis() / 80) as usize % SPINNER_FRAMES.len();
    SPINNER_FRAMES[index]
}
