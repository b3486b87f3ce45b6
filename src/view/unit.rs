//! One full-viewport presentation unit: media layer, header, action rail,
//! listing info and the progress sweep.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Padding, Paragraph, Widget, Wrap},
};

use crate::model::{Listing, LoadPhase, MediaKind, UnitState};
use crate::surface::embed_url;
use super::utils::{format_duration, format_likes, format_price, spinner_frame, truncate_string};

const BRAND: Color = Color::Rgb(204, 255, 0);
const ACCENT: Color = Color::Rgb(59, 130, 246);
const RAIL_WIDTH: u16 = 14;

/// Render a unit into `buf`. `area` is the unit's full, unclipped rect.
pub fn render_unit(
    buf: &mut Buffer,
    area: Rect,
    listing: &Listing,
    unit: &UnitState,
    now: Instant,
    sweep: Duration,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(3),    // Media + action rail
            Constraint::Length(5), // Listing info
            Constraint::Length(1), // Progress sweep
        ])
        .split(area);

    render_header(buf, chunks[0], listing);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(RAIL_WIDTH)])
        .split(chunks[1]);

    render_media(buf, middle[0], listing, unit, now);
    render_action_rail(buf, middle[1], listing, unit);
    render_info(buf, chunks[2], listing);
    render_sweep(buf, chunks[3], unit, now, sweep);
}

fn render_header(buf: &mut Buffer, area: Rect, listing: &Listing) {
    let mut left = vec![Span::styled(
        " DRIFT",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    )];
    if listing.featured {
        left.push(Span::raw("  "));
        left.push(Span::styled(
            " FEATURED ",
            Style::default().fg(Color::Black).bg(BRAND).add_modifier(Modifier::BOLD),
        ));
    }
    Paragraph::new(Line::from(left)).render(area, buf);
    Paragraph::new(Line::from("[⌕] ").right_aligned()).render(area, buf);
}

fn media_lines<'a>(listing: &'a Listing, unit: &UnitState, now: Instant) -> Vec<Line<'a>> {
    let dim = Style::default().fg(Color::DarkGray);
    let poster = listing.media.poster.as_deref().unwrap_or("(no poster)");
    let sound = if unit.muted { "🔇 muted  [m]" } else { "🔊 sound on  [m]" };

    match listing.media.kind {
        MediaKind::Image => vec![
            Line::from(Span::styled("🖼  Photo", Style::default().fg(Color::White))),
            Line::from(Span::styled(listing.media.source.as_str(), dim)),
        ],
        MediaKind::Video => {
            let state = if unit.is_playing() {
                Line::from(vec![
                    Span::styled("▶ Playing ", Style::default().fg(BRAND)),
                    Span::raw(format_duration(unit.video_position())),
                    Span::styled("  (loop)", dim),
                ])
            } else {
                Line::from(Span::styled("❚❚ Poster", Style::default().fg(Color::Gray)))
            };
            let shown = if unit.is_playing() { listing.media.source.as_str() } else { poster };
            vec![state, Line::from(Span::styled(shown, dim)), Line::raw(""), Line::raw(sound)]
        }
        MediaKind::Embed => {
            let mut lines = match unit.load {
                LoadPhase::Loaded => vec![
                    Line::from(Span::styled("▶ Embedded player", Style::default().fg(BRAND))),
                    Line::from(Span::styled(embed_url(&listing.media.source, unit.muted), dim)),
                ],
                LoadPhase::Loading => vec![
                    Line::from(vec![
                        Span::styled(
                            spinner_frame(unit.active_for(now).unwrap_or_default()),
                            Style::default().fg(BRAND),
                        ),
                        Span::raw(" Loading player"),
                    ]),
                    Line::from(Span::styled(poster, dim)),
                ],
                LoadPhase::NotLoaded => vec![
                    Line::from(Span::styled("Poster", Style::default().fg(Color::Gray))),
                    Line::from(Span::styled(poster, dim)),
                ],
            };
            lines.push(Line::raw(""));
            lines.push(Line::raw(sound));
            lines
        }
    }
}

fn render_media(buf: &mut Buffer, area: Rect, listing: &Listing, unit: &UnitState, now: Instant) {
    let border_style = if unit.is_active() {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Paragraph::new(media_lines(listing, unit, now))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .padding(Padding::horizontal(1)),
        )
        .render(area, buf);
}

fn render_action_rail(buf: &mut Buffer, area: Rect, listing: &Listing, unit: &UnitState) {
    let label = Style::default().fg(Color::Gray);
    let heart = if unit.liked {
        Span::styled("♥ ", Style::default().fg(Color::Red))
    } else {
        Span::styled("♡ ", Style::default().fg(Color::White))
    };
    let seller = truncate_string(&listing.seller.name, RAIL_WIDTH as usize - 4);

    let lines = vec![
        Line::from(vec![
            Span::styled("◉", Style::default().fg(Color::White)),
            Span::styled("+", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(seller, label)),
        Line::raw(""),
        Line::from(vec![
            heart,
            Span::styled(format_likes(unit.likes), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled("[l] Like", label)),
        Line::raw(""),
        Line::raw("➦ Share"),
        Line::from(Span::styled("[s]", label)),
        Line::raw(""),
        Line::raw("ⓘ Specs"),
        Line::from(Span::styled("[i]", label)),
        Line::raw(""),
        Line::from(Span::styled(
            " ✉ Contact ",
            Style::default().fg(Color::Black).bg(BRAND).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("[c]", label)),
    ];
    Paragraph::new(lines)
        .block(Block::default().padding(Padding::left(1)))
        .render(area, buf);
}

fn render_info(buf: &mut Buffer, area: Rect, listing: &Listing) {
    let sep = Span::styled("  │  ", Style::default().fg(Color::DarkGray));
    let stat = Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!(" {} ", listing.make.to_uppercase()),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            listing.model.to_uppercase(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
    ])];
    if !listing.trim.is_empty() {
        lines.push(Line::from(Span::styled(format!(" {}", listing.trim.to_uppercase()), stat)));
    }
    lines.push(Line::from(vec![
        Span::styled(
            format!(" {}", format_price(listing.price)),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        sep.clone(),
        Span::styled(listing.year.to_string(), stat),
        sep,
        Span::styled(format!("{} MILES", listing.mileage), stat),
    ]));
    lines.push(Line::from(Span::styled(
        " TAP FOR DETAILS [Enter]",
        Style::default().fg(Color::DarkGray),
    )));

    Paragraph::new(lines).render(area, buf);
}

fn render_sweep(buf: &mut Buffer, area: Rect, unit: &UnitState, now: Instant, sweep: Duration) {
    LineGauge::default()
        .filled_style(Style::default().fg(BRAND))
        .unfilled_style(Style::default().fg(Color::DarkGray))
        .label("")
        .ratio(unit.sweep_ratio(now, sweep))
        .render(area, buf);
}
