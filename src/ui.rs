use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use endgame::{
    celebration::Confetti,
    keyboard::{key_rows, KeyState},
    language::{Language, Rgb},
    status::Outcome,
};

use crate::{App, Focus};

const HORIZONTAL_MARGIN: u16 = 2;
const CHIP_GAP: usize = 1;

fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Lay the language chips out over as many lines as `max_width` needs.
pub fn chip_lines(
    languages: &[Language],
    wrong_guess_count: usize,
    max_width: usize,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for (index, language) in languages.iter().enumerate() {
        let lost = Language::is_lost_at(index, wrong_guess_count);
        let label = if lost {
            format!(" ☠ {} ", language.name)
        } else {
            format!(" {} ", language.name)
        };
        let width = label.width();

        if used > 0 && used + CHIP_GAP + width > max_width {
            lines.push(Line::from(std::mem::take(&mut current)));
            used = 0;
        }
        if used > 0 {
            current.push(Span::raw(" ".repeat(CHIP_GAP)));
            used += CHIP_GAP;
        }

        let style = if lost {
            Style::default()
                .fg(Color::Gray)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
        } else {
            Style::default()
                .fg(rgb(language.color))
                .bg(rgb(language.background_color))
                .add_modifier(Modifier::BOLD)
        };
        current.push(Span::styled(label, style));
        used += width;
    }

    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let game = &self.game;
        let session = game.session();
        let status = game.status();
        let rules = game.rules();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let inner_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2) as usize;
        let chips = chip_lines(rules.languages(), status.wrong_guess_count, inner_width);
        let rows = key_rows(session, &status);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(2),                      // header
                Constraint::Length(3),                      // status panel
                Constraint::Length(chips.len() as u16 + 1), // language chips
                Constraint::Length(1),                      // counters
                Constraint::Length(2),                      // word
                Constraint::Length(rows.len() as u16 * 2),  // keyboard
                Constraint::Length(3),                      // new game
                Constraint::Min(1),                         // live status
                Constraint::Length(1),                      // legend
            ])
            .split(area);

        // header
        let header = Paragraph::new(vec![
            Line::from(Span::styled("Assembly: Endgame", bold_style)),
            Line::from(Span::styled(
                format!(
                    "Guess the word within {} attempts to keep the programming world safe from {}!",
                    status.total_allowed_wrong_guesses,
                    rules.survivor()
                ),
                dim_style,
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        header.render(chunks[0], buf);

        // status panel
        let panel = match status.outcome.banner(rules.survivor()) {
            Some((title, subtitle)) => {
                let bg = if status.outcome == Outcome::Won {
                    Color::Rgb(0x10, 0xA9, 0x5B)
                } else {
                    Color::Rgb(0xBA, 0x2A, 0x2A)
                };
                Some(
                    Paragraph::new(vec![
                        Line::from(Span::styled(title, bold_style)),
                        Line::from(subtitle),
                    ])
                    .style(Style::default().fg(Color::White).bg(bg)),
                )
            }
            None => session.farewell_message.as_ref().map(|farewell| {
                Paragraph::new(Line::from(Span::styled(farewell.clone(), italic_style)))
                    .style(
                        Style::default()
                            .fg(Color::White)
                            .bg(Color::Rgb(0x7A, 0x5E, 0xA7)),
                    )
            }),
        };
        if let Some(panel) = panel {
            panel
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(chunks[1], buf);
        }

        Paragraph::new(chips)
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        // counters
        let clock_style = if session.time_remaining <= 10 && !status.is_over {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            bold_style
        };
        Paragraph::new(Line::from(vec![
            Span::raw("Guesses left: "),
            Span::styled(status.remaining_guesses.to_string(), bold_style),
            Span::raw("    Time left: "),
            Span::styled(format_clock(session.time_remaining), clock_style),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

        // word progress; a loss reveals the missing letters in red
        let word_spans: Vec<Span> = session
            .secret_word
            .chars()
            .zip(session.masked_word())
            .flat_map(|(letter, shown)| {
                let cell = match shown {
                    Some(c) => Span::styled(
                        format!(" {} ", c.to_ascii_uppercase()),
                        Style::default()
                            .fg(Color::White)
                            .bg(Color::Rgb(0x32, 0x32, 0x32))
                            .add_modifier(Modifier::BOLD),
                    ),
                    None if status.is_lost => Span::styled(
                        format!(" {} ", letter.to_ascii_uppercase()),
                        Style::default()
                            .fg(Color::Rgb(0xEC, 0x5D, 0x49))
                            .bg(Color::Rgb(0x32, 0x32, 0x32))
                            .add_modifier(Modifier::BOLD),
                    ),
                    None => Span::styled(
                        " _ ",
                        Style::default().fg(Color::Gray).bg(Color::Rgb(0x32, 0x32, 0x32)),
                    ),
                };
                [cell, Span::raw(" ")]
            })
            .collect();
        Paragraph::new(Line::from(word_spans))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        // on-screen keyboard
        let cursor = match self.focus {
            Focus::Keyboard(i) if !status.is_over => Some(i),
            _ => None,
        };
        let mut key_lines = Vec::new();
        for (row_index, row) in rows.iter().enumerate() {
            let spans: Vec<Span> = row
                .iter()
                .enumerate()
                .flat_map(|(col, (letter, state))| {
                    let index = row_index * endgame::input::KEYS_PER_ROW + col;
                    let mut style = match state {
                        KeyState::Available => Style::default()
                            .fg(Color::Black)
                            .bg(Color::Rgb(0xFC, 0xBA, 0x29)),
                        KeyState::Correct => Style::default()
                            .fg(Color::Black)
                            .bg(Color::Rgb(0x10, 0xA9, 0x5B)),
                        KeyState::Wrong => Style::default()
                            .fg(Color::Black)
                            .bg(Color::Rgb(0xEC, 0x5D, 0x49)),
                        KeyState::Disabled => Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::DIM),
                    };
                    if cursor == Some(index) {
                        // a used key keeps its color, only underlined
                        style = if state.is_pressable() {
                            style.add_modifier(Modifier::REVERSED | Modifier::BOLD)
                        } else {
                            style.add_modifier(Modifier::UNDERLINED)
                        };
                    }
                    [
                        Span::styled(format!(" {} ", letter.to_ascii_uppercase()), style),
                        Span::raw(" "),
                    ]
                })
                .collect();
            key_lines.push(Line::from(spans));
            key_lines.push(Line::default());
        }
        Paragraph::new(key_lines)
            .alignment(Alignment::Center)
            .render(chunks[5], buf);

        // new game control, shown once the game is over
        if status.is_over {
            let focused = self.focus == Focus::NewGame;
            let style = if focused {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Rgb(0x11, 0xB5, 0xE5))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Rgb(0x11, 0xB5, 0xE5))
            };
            let button_width = 16.min(chunks[6].width);
            let button_area = Rect {
                x: chunks[6].x + (chunks[6].width - button_width) / 2,
                width: button_width,
                ..chunks[6]
            };
            Paragraph::new(Span::styled("New Game", style))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(style))
                .render(button_area, buf);
        }

        // live status line
        Paragraph::new(Span::styled(game.announcement(), italic_style.patch(dim_style)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[7], buf);

        let legend = if status.is_over {
            "(enter) new game / (esc)ape"
        } else {
            "type a letter or ←↑↓→ + (enter) / (ctrl+n) new game / (esc)ape"
        };
        Paragraph::new(Span::styled(legend, italic_style))
            .alignment(Alignment::Center)
            .render(chunks[8], buf);

        if self.confetti.is_active {
            render_confetti(&self.confetti, area, buf);
        }
    }
}

/// Render confetti pieces on top of the game screen
fn render_confetti(confetti: &Confetti, area: Rect, buf: &mut Buffer) {
    for piece in &confetti.pieces {
        if piece.x < 0.0 || piece.y < 0.0 {
            continue;
        }
        let x = piece.x as u16;
        let y = piece.y as u16;

        if x < area.width && y < area.height {
            let alpha = 1.0 - (piece.age / piece.max_age);
            let style = if alpha > 0.7 {
                Style::default().fg(rgb(piece.color)).add_modifier(Modifier::BOLD)
            } else if alpha > 0.3 {
                Style::default().fg(rgb(piece.color))
            } else {
                Style::default()
                    .fg(rgb(piece.color))
                    .add_modifier(Modifier::DIM)
            };

            if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                cell.set_symbol(&piece.symbol.to_string());
                cell.set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::test_app;
    use endgame::celebration::Mood;
    use endgame::language::load_languages;
    use std::time::Instant;

    fn render(app: &App, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(40), "0:40");
        assert_eq!(format_clock(5), "0:05");
        assert_eq!(format_clock(125), "2:05");
        assert_eq!(format_clock(0), "0:00");
    }

    #[test]
    fn test_chip_lines_wrap() {
        let languages = load_languages().unwrap();

        let wide = chip_lines(&languages, 0, 200);
        assert_eq!(wide.len(), 1);

        let narrow = chip_lines(&languages, 0, 30);
        assert!(narrow.len() > 1);
        for line in &narrow {
            assert!(line.width() <= 30);
        }
    }

    #[test]
    fn test_chip_lines_mark_lost_languages() {
        let languages = load_languages().unwrap();
        let lines = chip_lines(&languages, 2, 200);
        let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();

        assert!(text.contains("☠ HTML"));
        assert!(text.contains("☠ CSS"));
        assert!(!text.contains("☠ JavaScript"));
    }

    #[test]
    fn test_render_in_progress() {
        let app = test_app("go", true);
        let rendered = render(&app, 100, 30);

        assert!(rendered.contains("Assembly: Endgame"));
        assert!(rendered.contains("Guesses left: 8"));
        assert!(rendered.contains("Time left: 0:40"));
        assert!(rendered.contains("HTML"));
        assert!(!rendered.contains("New Game"));
    }

    #[test]
    fn test_render_farewell() {
        let mut app = test_app("go", true);
        app.game.submit_guess('x', Instant::now());
        let rendered = render(&app, 100, 30);

        assert!(rendered.contains("HTML"));
        assert!(rendered.contains("Guesses left: 7"));
        assert!(rendered.contains("Sorry, the letter x is not in the word."));

        let farewell = app.game.session().farewell_message.clone().unwrap();
        assert!(farewell.contains("HTML"));
        assert!(rendered.contains(&farewell), "{farewell:?} not drawn");
    }

    fn key_cell_with(buffer: &Buffer, letter: &str, modifier: Modifier) -> bool {
        buffer
            .content()
            .iter()
            .any(|c| c.symbol() == letter && c.modifier.contains(modifier))
    }

    #[test]
    fn test_cursor_style_follows_key_state() {
        let mut app = test_app("go", true);
        let area = Rect::new(0, 0, 100, 30);

        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);
        assert!(key_cell_with(&buffer, "A", Modifier::REVERSED));
        assert!(!key_cell_with(&buffer, "A", Modifier::UNDERLINED));

        app.game.submit_guess('a', Instant::now());
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);
        assert!(!key_cell_with(&buffer, "A", Modifier::REVERSED));
        assert!(key_cell_with(&buffer, "A", Modifier::UNDERLINED));
    }

    #[test]
    fn test_render_win() {
        let mut app = test_app("go", true);
        let now = Instant::now();
        app.game.submit_guess('g', now);
        app.game.submit_guess('o', now);
        app.process_notices((100, 30));
        let rendered = render(&app, 100, 30);

        assert!(rendered.contains("You win!"));
        assert!(rendered.contains("New Game"));
    }

    #[test]
    fn test_render_loss() {
        let mut app = test_app("go", false);
        let now = Instant::now();
        for c in "abcdefhi".chars() {
            app.game.submit_guess(c, now);
        }
        app.process_notices((100, 30));
        let rendered = render(&app, 100, 30);

        assert!(rendered.contains("Game over!"));
        assert!(rendered.contains("Better start learning Assembly"));
        assert!(rendered.contains("Guesses left: 0"));
    }

    #[test]
    fn test_render_small_area() {
        let app = test_app("go", true);
        let area = Rect::new(0, 0, 20, 5);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);

        assert_eq!(*buffer.area(), area);
    }

    #[test]
    fn test_render_confetti() {
        let mut app = test_app("go", true);
        app.confetti.start(Mood::Celebratory, 80, 24);
        for piece in app.confetti.pieces.iter_mut() {
            piece.x = 3.0;
            piece.y = 1.0;
            piece.symbol = '◆';
        }

        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);

        assert_eq!(buffer.cell((3, 1)).unwrap().symbol(), "◆");
    }
}
