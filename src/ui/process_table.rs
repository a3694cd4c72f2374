use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table, TableState};

use crate::format::truncate_unicode;
use crate::system::process::{ProcessRecord, RankOptions, SortCriterion};
use crate::ui::theme::Theme;

const NAME_WIDTH: usize = 24;
const USER_WIDTH: usize = 12;

const COLUMNS: [(&str, Option<SortCriterion>); 8] = [
    ("PID", Some(SortCriterion::Pid)),
    ("PPID", None),
    ("Name", Some(SortCriterion::Name)),
    ("CPU%", Some(SortCriterion::Cpu)),
    ("MEM%", None),
    ("MEM(MB)", Some(SortCriterion::Memory)),
    ("User", None),
    ("Time", None),
];

pub fn render(
    frame: &mut Frame,
    area: Rect,
    processes: &[ProcessRecord],
    selected: usize,
    options: RankOptions,
    theme: &Theme,
) {
    let arrow = if options.ascending { "\u{25b2}" } else { "\u{25bc}" };
    let header = Row::new(COLUMNS.iter().map(|(title, criterion)| {
        if *criterion == Some(options.criterion) {
            Cell::from(format!("{title}{arrow}"))
        } else {
            Cell::from(*title)
        }
    }))
    .style(
        Style::default()
            .fg(theme.text_secondary)
            .add_modifier(Modifier::BOLD),
    );

    let rows = processes.iter().map(|p| {
        Row::new(vec![
            Cell::from(p.pid.to_string()),
            Cell::from(p.parent_pid.to_string()),
            Cell::from(truncate_unicode(&p.name, NAME_WIDTH)),
            Cell::from(Span::styled(
                format!("{:.2}", p.cpu_percent),
                Style::default().fg(theme.heat(p.cpu_percent)),
            )),
            Cell::from(format!("{:.2}", p.mem_percent)),
            Cell::from(format!("{:.2}", p.memory_usage_mb)),
            Cell::from(truncate_unicode(&p.username, USER_WIDTH)),
            Cell::from(p.running_time.to_string()),
        ])
        .style(Style::default().fg(theme.text_primary))
    });

    let widths = [
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Min(12),
        Constraint::Length(8),
        Constraint::Length(7),
        Constraint::Length(10),
        Constraint::Length(USER_WIDTH as u16),
        Constraint::Length(11),
    ];

    let title = format!(" Processes ({}) ", processes.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(title, Style::default().fg(theme.text_secondary)));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(theme.selection_fg)
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD),
        );

    let mut table_state = TableState::default();
    if !processes.is_empty() {
        table_state.select(Some(selected.min(processes.len() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut table_state);
}
