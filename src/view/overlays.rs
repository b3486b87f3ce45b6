//! Overlay rendering (auth sheet, share sheet, specs drawer)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{Listing, ShareTarget, SignInOption};
use super::utils::{bottom_sheet, format_price};

const BRAND: Color = Color::Rgb(204, 255, 0);
const ACCENT: Color = Color::Rgb(59, 130, 246);
const SHEET_BG: Color = Color::Rgb(24, 24, 27);

/// Dim everything behind an overlay
pub fn render_backdrop(frame: &mut Frame) {
    let area = frame.area();
    frame
        .buffer_mut()
        .set_style(area, Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM));
}

fn sheet_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(" Esc to close ").right_aligned())
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(SHEET_BG))
}

pub fn render_auth(frame: &mut Frame, cursor: usize) {
    let popup_area = bottom_sheet(56, 15, frame.area());
    frame.render_widget(Clear, popup_area);

    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            "Create an account to contact dealers, save cars, and apply for financing.",
            Style::default().fg(Color::Gray),
        )),
        Line::raw(""),
    ];

    for (i, option) in SignInOption::ALL.iter().enumerate() {
        let style = if i == cursor {
            Style::default().fg(Color::Black).bg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", i + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(format!(" {:<30}", option.label()), style),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "By continuing, you agree to our Terms of Service and Privacy Policy.",
        Style::default().fg(Color::DarkGray),
    )));

    let sheet = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(sheet_block("Sign in"));
    frame.render_widget(sheet, popup_area);
}

pub fn render_share(frame: &mut Frame, listing: Option<&Listing>, cursor: usize) {
    let popup_area = bottom_sheet(64, 9, frame.area());
    frame.render_widget(Clear, popup_area);

    let targets: Vec<Span> = ShareTarget::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, target)| {
            let style = if i == cursor {
                Style::default().fg(Color::Black).bg(BRAND).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            [Span::styled(format!(" {} ", target.label()), style), Span::raw(" ")]
        })
        .collect();

    let link = listing
        .map(|l| l.share_url())
        .unwrap_or_else(|| "https://carfeed.app".to_string());

    let lines = vec![
        Line::raw(""),
        Line::from(targets),
        Line::raw(""),
        Line::from(Span::styled("─".repeat(popup_area.width as usize), Style::default().fg(Color::DarkGray))),
        Line::from(vec![
            Span::styled(link, Style::default().fg(Color::Gray)),
            Span::raw("  "),
            Span::styled("Copy", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        ]),
    ];

    let sheet = Paragraph::new(lines).block(sheet_block("Share to"));
    frame.render_widget(sheet, popup_area);
}

fn stat_tile<'a>(label: &'a str, value: String) -> Paragraph<'a> {
    Paragraph::new(vec![
        Line::from(Span::styled(
            label.to_uppercase(),
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            value,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1)),
    )
}

pub fn render_specs(frame: &mut Frame, listing: &Listing) {
    let area = frame.area();
    let height = (area.height as u32 * 85 / 100) as u16;
    let popup_area = bottom_sheet(72, height, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Line::from(" ▬▬▬ ").centered())
        .title_bottom(Line::from(" Esc to close ").right_aligned())
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(SHEET_BG));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title + price
            Constraint::Length(8), // Stat tiles
            Constraint::Min(4),    // Overview
            Constraint::Length(4), // Seller
        ])
        .split(inner);

    render_specs_header(frame, chunks[0], listing);
    render_stat_grid(frame, chunks[1], listing);
    render_overview(frame, chunks[2], listing);
    render_seller(frame, chunks[3], listing);
}

fn render_specs_header(frame: &mut Frame, area: Rect, listing: &Listing) {
    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            listing.title().to_uppercase(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(listing.trim.as_str(), Style::default().fg(Color::Gray))),
    ]);
    frame.render_widget(title, area);

    let price = Paragraph::new(Line::from(Span::styled(
        format_price(listing.price),
        Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
    )))
    .right_aligned();
    frame.render_widget(price, area);
}

fn render_stat_grid(frame: &mut Frame, area: Rect, listing: &Listing) {
    let specs = &listing.specs;
    let or_na = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(4)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    frame.render_widget(stat_tile("0-60 mph", specs.zero_to_sixty.clone()), top[0]);
    frame.render_widget(stat_tile("Power", format!("{} HP", specs.horsepower)), top[1]);
    frame.render_widget(stat_tile("Top Speed", or_na(&specs.top_speed)), bottom[0]);
    frame.render_widget(stat_tile("Engine", or_na(&specs.engine)), bottom[1]);
}

fn render_overview(frame: &mut Frame, area: Rect, listing: &Listing) {
    let heading = Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD);
    let tag = Style::default().fg(Color::Gray).bg(Color::Rgb(39, 39, 42));
    let specs = &listing.specs;

    let mut lines = vec![
        Line::from(Span::styled("VEHICLE OVERVIEW", heading)),
        Line::from(Span::styled(listing.description.as_str(), Style::default().fg(Color::Gray))),
    ];

    let extras = [
        ("Transmission", &specs.transmission),
        ("Drivetrain", &specs.drivetrain),
        ("Fuel economy", &specs.mpg),
    ];
    for (label, value) in extras {
        if let Some(value) = value {
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
                Span::styled(value.as_str(), Style::default().fg(Color::White)),
            ]));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled(" Clean Title ", tag),
        Span::raw(" "),
        Span::styled(" One Owner ", tag),
        Span::raw(" "),
        Span::styled(" Verified Listing ", tag),
    ]));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_seller(frame: &mut Frame, area: Rect, listing: &Listing) {
    let seller = Paragraph::new(vec![
        Line::from(Span::styled(
            "SELLER",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw("◉ "),
            Span::styled(
                listing.seller.name.as_str(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled("  ✔ Verified Dealer", Style::default().fg(ACCENT))),
    ])
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(seller, area);

    let contact = Paragraph::new(Line::from(Span::styled(
        " Contact [c] ",
        Style::default().fg(Color::Black).bg(Color::White).add_modifier(Modifier::BOLD),
    )))
    .right_aligned();
    let button = Rect::new(area.x, area.y + 2, area.width, 1u16.min(area.height.saturating_sub(2)));
    frame.render_widget(contact, button);
}
