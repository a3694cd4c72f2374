pub mod header;
pub mod process_table;
pub mod statusbar;
pub mod theme;


use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;
use crate::system::source::MetricsSource;

/// Height of the header: one host line plus a bordered block of three rows.
pub const HEADER_HEIGHT: u16 = 6;

/// Read-only view of the current snapshot. Never triggers a refresh.
pub fn draw<S: MetricsSource>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(frame, chunks[0], &app.state, &app.theme);
    process_table::render(
        frame,
        chunks[1],
        app.state.processes(),
        app.selected_index,
        app.rank_options(),
        &app.theme,
    );
    statusbar::render(
        frame,
        chunks[2],
        &app.help_entries(),
        app.rank_options(),
        app.state.last_update(),
        &app.theme,
    );
}
