//! Idle Forge の描画。

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::*;
use super::format::format_amount;
use super::IdleGame;

pub fn render(
    game: &IdleGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
    now_ms: f64,
) {
    let toasts = game.visible_toasts();
    let toast_height = if toasts.is_empty() {
        0
    } else {
        toasts.len() as u16 + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(toast_height),
        ])
        .split(area);

    render_header(game, f, chunks[0]);

    let mut cs = click_state.borrow_mut();
    if is_narrow_layout(area.width) {
        let store_height = game.state.store.len() as u16 * 2 + 2;
        let achievements_height = game.state.achievements.len() as u16 + 2;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(4),
                Constraint::Length(store_height),
                Constraint::Length(achievements_height),
                Constraint::Length(7),
            ])
            .split(chunks[1]);
        render_resource(game, f, rows[0], &mut cs);
        render_upgrades(game, f, rows[1], &mut cs);
        render_store(game, f, rows[2], &mut cs);
        render_achievements(game, f, rows[3]);
        render_system(game, f, rows[4], &mut cs, now_ms);
    } else {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(4)])
            .split(cols[0]);
        let store_height = game.state.store.len() as u16 * 2 + 2;
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(store_height),
                Constraint::Min(4),
                Constraint::Length(7),
            ])
            .split(cols[1]);
        render_resource(game, f, left[0], &mut cs);
        render_upgrades(game, f, left[1], &mut cs);
        render_store(game, f, right[0], &mut cs);
        render_achievements(game, f, right[1]);
        render_system(game, f, right[2], &mut cs, now_ms);
    }
    drop(cs);

    if !toasts.is_empty() {
        render_toasts(game, f, chunks[2]);
    }
}

fn panel(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
}

fn key_span(key: char) -> Span<'static> {
    Span::styled(
        format!(" [{}] ", key.to_ascii_uppercase()),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn draw_list(f: &mut Frame, area: Rect, cs: &mut ClickState, cl: ClickableList, block: Block) {
    cl.register_targets(area, cs, 1, 1, area.width.saturating_sub(2));
    let widget = Paragraph::new(cl.into_lines())
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_header(game: &IdleGame, f: &mut Frame, area: Rect) {
    let s = &game.state;
    let line = Line::from(vec![
        Span::styled(
            "Idle Forge",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  Prestige: {} (x{:.2})",
                s.prestige_count, s.prestige_multiplier
            ),
            Style::default().fg(Color::Magenta),
        ),
    ]);
    let header = Paragraph::new(line)
        .block(panel("", Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn render_resource(game: &IdleGame, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let s = &game.state;
    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        format!(" {}", format_amount(s.resource)),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(Span::styled(
        format!(" {} / sec", format_amount(s.per_second)),
        Style::default().fg(Color::Green),
    )));
    cl.push_clickable(
        Line::from(vec![
            key_span('c'),
            Span::raw(format!("Click (+{})", format_amount(s.click_yield()))),
        ]),
        CLICK_RESOURCE,
    );
    draw_list(f, area, cs, cl, panel(" Resource ", Color::Green));
}

fn render_upgrades(game: &IdleGame, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let s = &game.state;
    let mut cl = ClickableList::new();
    for (i, u) in s.upgrades.iter().enumerate().take(9) {
        let cost = u.cost();
        let cost_style = if s.can_afford(cost) {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let key = (b'1' + i as u8) as char;
        cl.push_clickable(
            Line::from(vec![
                key_span(key),
                Span::styled(u.name.clone(), Style::default().fg(Color::White)),
                Span::styled(format!("  {}", format_amount(cost)), cost_style),
            ]),
            BUY_UPGRADE_BASE + i as u16,
        );
        cl.push(Line::from(Span::styled(
            format!("     {} — lvl {}", u.description, u.level),
            Style::default().fg(Color::Gray),
        )));
    }
    draw_list(f, area, cs, cl, panel(" Upgrades ", Color::Yellow));
}

fn render_store(game: &IdleGame, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let s = &game.state;
    let mut cl = ClickableList::new();
    for ((i, item), key) in s.store.iter().enumerate().zip(STORE_KEYS) {
        let (status, status_style) = if item.bought {
            ("Owned", Style::default().fg(Color::DarkGray))
        } else if s.can_afford(item.cost) {
            ("Buy", Style::default().fg(Color::Green))
        } else {
            ("Buy", Style::default().fg(Color::DarkGray))
        };
        cl.push_clickable(
            Line::from(vec![
                key_span(key),
                Span::styled(item.name.clone(), Style::default().fg(Color::White)),
                Span::raw(format!("  {}  ", format_amount(item.cost))),
                Span::styled(status, status_style),
            ]),
            BUY_STORE_BASE + i as u16,
        );
        cl.push(Line::from(Span::styled(
            format!("     {} ({})", item.description, item.effect.label()),
            Style::default().fg(Color::Gray),
        )));
    }
    draw_list(f, area, cs, cl, panel(" Store ", Color::Magenta));
}

fn render_achievements(game: &IdleGame, f: &mut Frame, area: Rect) {
    let s = &game.state;
    let lines: Vec<Line> = s
        .achievements
        .iter()
        .map(|a| {
            let (icon, style) = if a.unlocked {
                ("🏆", Style::default().fg(Color::Yellow))
            } else {
                ("🔒", Style::default().fg(Color::DarkGray))
            };
            Line::from(Span::styled(
                format!(" {} {} — {}", icon, a.name, a.description),
                style,
            ))
        })
        .collect();
    let title = format!(
        " Achievements {}/{} ",
        s.unlocked_count(),
        s.achievements.len()
    );
    let widget = Paragraph::new(lines)
        .block(panel(&title, Color::Blue))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_system(game: &IdleGame, f: &mut Frame, area: Rect, cs: &mut ClickState, now_ms: f64) {
    let s = &game.state;
    let mut cl = ClickableList::new();
    let prestige_style = if s.can_prestige() {
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    cl.push_clickable(
        Line::from(vec![
            key_span('p'),
            Span::styled(
                format!("Prestige (need {})", format_amount(s.prestige_threshold())),
                prestige_style,
            ),
        ]),
        PRESTIGE,
    );
    cl.push_clickable(
        Line::from(vec![key_span('e'), Span::raw("Export save")]),
        EXPORT_SAVE,
    );
    cl.push_clickable(
        Line::from(vec![key_span('i'), Span::raw("Import save")]),
        IMPORT_SAVE,
    );
    cl.push_clickable(
        Line::from(vec![key_span('r'), Span::raw("Reset")]),
        RESET_SAVE,
    );
    let saved = match s.last_saved_ms {
        Some(t) => format!(" Saved {}s ago", ((now_ms - t) / 1000.0).max(0.0).floor()),
        None => " Not saved yet".to_string(),
    };
    cl.push(Line::from(Span::styled(
        saved,
        Style::default().fg(Color::DarkGray),
    )));
    draw_list(f, area, cs, cl, panel(" Game ", Color::Cyan));
}

fn render_toasts(game: &IdleGame, f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = game
        .visible_toasts()
        .iter()
        .map(|t| {
            Line::from(Span::styled(
                format!(" {}", t.text),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();
    let widget = Paragraph::new(lines).block(panel(" ", Color::Yellow));
    f.render_widget(widget, area);
}
