use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::format::{format_bytes, format_uptime};
use crate::state::AppState;
use crate::ui::theme::Theme;

pub const LOADING: &str = "Loading...";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    if !state.is_loaded() {
        let block = bordered(theme, " ranktop ");
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let text = Paragraph::new(Span::styled(
            LOADING,
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(text, inner);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    render_host_line(frame, rows[0], state, theme);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ])
        .split(rows[1]);

    render_usage(frame, columns[0], state, theme);
    render_cpu(frame, columns[1], state, theme);
    render_memory(frame, columns[2], state, theme);
    render_load(frame, columns[3], state, theme);
}

fn bordered<'a>(theme: &Theme, title: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_host_line(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let host = state.host();
    let label = Style::default().fg(theme.text_secondary);
    let value = Style::default().fg(theme.text_primary);

    let line = Line::from(vec![
        Span::styled(
            " ranktop ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Host: ", label),
        Span::styled(host.hostname.as_str(), value),
        Span::styled("  OS: ", label),
        Span::styled(host.os.as_str(), value),
        Span::styled("  Arch: ", label),
        Span::styled(host.kernel_arch.as_str(), value),
        Span::styled("  Uptime: ", label),
        Span::styled(format_uptime(host.uptime_seconds), value),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_usage(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = bordered(theme, " Usage ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bars = [
        ("CPU ", state.cpu().busy_percent()),
        ("MEM ", state.mem().used_percent),
        ("SWAP", state.swap().used_percent),
    ];
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1); 3])
        .split(inner);

    for ((label, percent), row) in bars.into_iter().zip(rows.iter()) {
        let ratio = (percent / 100.0).clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .gauge_style(
                Style::default()
                    .fg(theme.heat(percent))
                    .bg(theme.gauge_unfilled),
            )
            .ratio(ratio)
            .label(format!("{label} {percent:5.1}%"));
        frame.render_widget(gauge, *row);
    }
}

fn render_cpu(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let cpu = state.cpu();
    let lines = vec![
        stat_line("User", format!("{:.2} %", cpu.user), theme),
        stat_line("Sys", format!("{:.2} %", cpu.system), theme),
        stat_line("Idle", format!("{:.2} %", cpu.idle), theme),
    ];
    render_column(frame, area, " CPU ", lines, theme);
}

fn render_memory(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let mem = state.mem();
    let lines = vec![
        stat_line("Total", format_bytes(mem.total), theme),
        stat_line("Used", format_bytes(mem.used), theme),
        stat_line("Avail", format_bytes(mem.available), theme),
    ];
    render_column(frame, area, " Memory ", lines, theme);
}

fn render_load(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let load = state.load();
    let lines = vec![
        stat_line("1 min", format!("{:.2}", load.load1), theme),
        stat_line("5 min", format!("{:.2}", load.load5), theme),
        stat_line("15 min", format!("{:.2}", load.load15), theme),
    ];
    render_column(frame, area, " Load ", lines, theme);
}

fn render_column(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    lines: Vec<Line<'static>>,
    theme: &Theme,
) {
    let block = bordered(theme, title);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn stat_line(label: &'static str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<7}"), Style::default().fg(theme.text_secondary)),
        Span::styled(value, Style::default().fg(theme.text_primary)),
    ])
}
