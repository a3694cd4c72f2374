use std::time::SystemTime;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::{Action, Direction};
use crate::config::{Config, KeybindsConfig, parse_key};
use crate::state::AppState;
use crate::system::collector::Collector;
use crate::system::process::RankOptions;
use crate::system::ranker::ProcessRanker;
use crate::system::source::MetricsSource;
use crate::system::stats::StatsAggregator;
use crate::ui::theme::Theme;

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub cycle_sort: KeyCode,
    pub toggle_order: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            cycle_sort: parse_key(&kb.cycle_sort).unwrap_or(KeyCode::Char('s')),
            toggle_order: parse_key(&kb.toggle_order).unwrap_or(KeyCode::Char('o')),
            up: parse_key(&kb.up).unwrap_or(KeyCode::Char('k')),
            down: parse_key(&kb.down).unwrap_or(KeyCode::Char('j')),
        }
    }
}

pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        _ => "?".to_string(),
    }
}

/// The metrics core plus the presentation state around it.
pub struct App<S: MetricsSource = Collector> {
    pub running: bool,
    pub state: AppState,
    pub selected_index: usize,
    pub keybinds: ResolvedKeybinds,
    pub theme: Theme,
    source: S,
    aggregator: StatsAggregator,
    ranker: ProcessRanker,
}

impl App<Collector> {
    pub fn new(config: &Config) -> Self {
        App::with_source(Collector::new(), config)
    }
}

impl<S: MetricsSource> App<S> {
    pub fn with_source(source: S, config: &Config) -> Self {
        App {
            running: true,
            state: AppState::new(),
            selected_index: 0,
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
            theme: Theme::from_config(&config.colors.theme),
            source,
            aggregator: StatsAggregator::new(),
            ranker: ProcessRanker::new(config.rank_options()),
        }
    }

    pub fn rank_options(&self) -> RankOptions {
        self.ranker.options()
    }

    /// The only path that mutates the metric snapshot.
    pub fn on_tick(&mut self, at: SystemTime) {
        self.state
            .refresh(&mut self.source, &self.aggregator, &self.ranker, at);

        let rows = self.state.processes().len();
        if self.selected_index >= rows {
            self.selected_index = rows.saturating_sub(1);
        }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        let code = key.code;
        let kb = &self.keybinds;

        // Arrow keys are hardwired (not configurable)
        if code == KeyCode::Up || code == kb.up {
            return Action::Navigate(Direction::Up);
        }
        if code == KeyCode::Down || code == kb.down {
            return Action::Navigate(Direction::Down);
        }
        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.cycle_sort {
            return Action::CycleSort;
        }
        if code == kb.toggle_order {
            return Action::ToggleOrder;
        }

        Action::None
    }

    /// Apply a user action. Never touches the metric snapshot; ranking
    /// changes show up on the next tick.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Navigate(dir) => self.navigate(dir),
            Action::CycleSort => {
                let options = self.ranker.options();
                self.ranker = ProcessRanker::new(options.with_criterion(options.criterion.next()));
            }
            Action::ToggleOrder => {
                let options = self.ranker.options();
                self.ranker = ProcessRanker::new(options.with_ascending(!options.ascending));
            }
            Action::None => {}
        }
    }

    fn navigate(&mut self, direction: Direction) {
        let rows = self.state.processes().len();
        if rows == 0 {
            self.selected_index = 0;
            return;
        }
        self.selected_index = match direction {
            Direction::Up => self.selected_index.saturating_sub(1),
            Direction::Down => (self.selected_index + 1).min(rows - 1),
        };
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        let kb = &self.keybinds;
        vec![
            (key_label(kb.quit), "Quit"),
            (key_label(kb.cycle_sort), "Sort"),
            (key_label(kb.toggle_order), "Order"),
            ("\u{2191}\u{2193}".to_string(), "Select"),
        ]
    }
}
