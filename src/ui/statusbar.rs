use std::time::SystemTime;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::format::format_clock;
use crate::system::process::RankOptions;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    entries: &[(String, &'static str)],
    options: RankOptions,
    last_update: Option<SystemTime>,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    let mut spans = Vec::new();
    for (key, desc) in entries {
        spans.extend(pill_spans(key, desc, theme));
    }

    spans.push(Span::styled(
        format!(
            "  Sort: {} {}",
            options.criterion.label(),
            options.direction_label()
        ),
        Style::default()
            .fg(theme.pill_desc_fg)
            .add_modifier(Modifier::BOLD),
    ));

    let updated = match last_update {
        Some(at) => format!("  Updated {}", format_clock(at)),
        None => "  Waiting for first sample".to_string(),
    };
    spans.push(Span::styled(updated, Style::default().fg(theme.pill_desc_fg)));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {desc}"), Style::default().fg(theme.pill_desc_fg)),
    ]
}
