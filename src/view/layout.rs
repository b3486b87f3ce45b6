//! Bottom tab bar and status line

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::AppModel;

pub const TAB_BAR_HEIGHT: u16 = 2;

const KEY_HINTS: &str = "↑/↓ scroll  l like  m mute  s share  i specs  c contact  q quit";

pub fn render_tab_bar(frame: &mut Frame, area: Rect, model: &AppModel) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(10), // Feed tab
            Constraint::Min(0),     // Hints / notice
            Constraint::Length(14), // Session
        ])
        .split(inner);

    let tab = Paragraph::new(Span::styled(
        " ● FEED",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(tab, chunks[0]);

    let status = match model.notice() {
        Some(notice) => Line::from(Span::styled(
            notice.text.as_str(),
            Style::default().fg(Color::Rgb(204, 255, 0)).add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray))),
    };
    frame.render_widget(Paragraph::new(status).centered(), chunks[1]);

    let session = if model.modals.is_authenticated() {
        Span::styled("✔ signed in ", Style::default().fg(Color::Green))
    } else {
        Span::styled("guest ", Style::default().fg(Color::Gray))
    };
    frame.render_widget(Paragraph::new(Line::from(session).right_aligned()), chunks[2]);
}
