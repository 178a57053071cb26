//! Terminal dashboard over a CSV of data-industry salary records.
//!
//! The session loads one immutable dataset, derives the filter menus from it
//! once, and recomputes the whole dashboard (metrics, chart series, table)
//! through a pure pipeline on every filter change. The event loop in the
//! binary forwards crossterm events over an mpsc channel of [`AppEvent`]s;
//! [`App::event`] may return a follow-up event to feed back into the loop,
//! which is how loading gets its own render frame before the blocking read.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

pub mod chart_data;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod filters;
pub mod metrics;
mod render;
mod source;
pub mod widgets;

pub use config::{AppConfig, ConfigManager};
pub use dashboard::{compute_view, DashboardData};
pub use dataset::Dataset;
pub use filters::{derive_filter_options, FilterOptions, FilterSelection};
pub use metrics::SummaryMetrics;

/// Application name used for the config directory.
pub const APP_NAME: &str = "paydash";

/// Options carried from the CLI into the loader.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpenOptions {
    pub delimiter: Option<u8>,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }
}

#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// Show the loading screen, then emit DoLoad so it gets a render frame.
    Open(PathBuf, OpenOptions),
    /// Perform the blocking dataset load.
    DoLoad(PathBuf, OpenOptions),
    Exit,
    Crash(String),
}

/// Which panel has keyboard focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Focus {
    Modality,
    Years,
    Seniorities,
    CompanySizes,
    Table,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Modality => Focus::Years,
            Focus::Years => Focus::Seniorities,
            Focus::Seniorities => Focus::CompanySizes,
            Focus::CompanySizes => Focus::Table,
            Focus::Table => Focus::Modality,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Modality => Focus::Table,
            Focus::Years => Focus::Modality,
            Focus::Seniorities => Focus::Years,
            Focus::CompanySizes => Focus::Seniorities,
            Focus::Table => Focus::CompanySizes,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct DebugState {
    pub enabled: bool,
    pub num_events: usize,
    pub last_compute: Duration,
}

/// Session state: the loaded dataset, the UI's selection state, and the
/// derived dashboard data.
pub struct App {
    tx: Sender<AppEvent>,
    pub(crate) config: AppConfig,
    pub(crate) dataset: Option<Dataset>,
    pub(crate) view: Option<DashboardData>,
    pub(crate) focus: Focus,
    pub(crate) modality_idx: usize,
    pub(crate) modality_cursor: usize,
    pub(crate) years_checked: Vec<bool>,
    pub(crate) years_cursor: usize,
    pub(crate) seniorities_checked: Vec<bool>,
    pub(crate) seniorities_cursor: usize,
    pub(crate) sizes_checked: Vec<bool>,
    pub(crate) sizes_cursor: usize,
    pub(crate) table_offset: usize,
    pub(crate) loading: Option<String>,
    pub(crate) error: Option<String>,
    pub(crate) debug: DebugState,
}

impl App {
    pub fn new(tx: Sender<AppEvent>) -> Self {
        Self::with_config(tx, AppConfig::default())
    }

    pub fn with_config(tx: Sender<AppEvent>, config: AppConfig) -> Self {
        Self {
            tx,
            config,
            dataset: None,
            view: None,
            focus: Focus::Modality,
            modality_idx: 0,
            modality_cursor: 0,
            years_checked: Vec::new(),
            years_cursor: 0,
            seniorities_checked: Vec::new(),
            seniorities_cursor: 0,
            sizes_checked: Vec::new(),
            sizes_cursor: 0,
            table_offset: 0,
            loading: None,
            error: None,
            debug: DebugState::default(),
        }
    }

    pub fn enable_debug(&mut self) {
        self.debug.enabled = true;
    }

    /// Handles one event; may return a follow-up event for the loop to
    /// re-enqueue.
    pub fn event(&mut self, event: &AppEvent) -> Option<AppEvent> {
        self.debug.num_events += 1;
        match event {
            AppEvent::Key(key) => self.key(key),
            AppEvent::Resize(_, _) => None,
            AppEvent::Open(path, options) => {
                self.loading = Some(format!("Loading {}...", path.display()));
                Some(AppEvent::DoLoad(path.clone(), options.clone()))
            }
            AppEvent::DoLoad(path, options) => {
                match Dataset::load(path, options.delimiter) {
                    Ok(dataset) => self.install_dataset(dataset),
                    Err(e) => self.error = Some(e.to_string()),
                }
                self.loading = None;
                None
            }
            AppEvent::Exit | AppEvent::Crash(_) => None,
        }
    }

    /// Installs a loaded dataset with the default selection (first modality,
    /// everything checked) and computes the initial view.
    pub fn install_dataset(&mut self, dataset: Dataset) {
        self.modality_idx = 0;
        self.modality_cursor = 0;
        self.years_checked = vec![true; dataset.options.years.len()];
        self.years_cursor = 0;
        self.seniorities_checked = vec![true; dataset.options.seniorities.len()];
        self.seniorities_cursor = 0;
        self.sizes_checked = vec![true; dataset.options.company_sizes.len()];
        self.sizes_cursor = 0;
        self.dataset = Some(dataset);
        self.recompute();
    }

    /// The current selection as the pipeline's domain type.
    pub fn selection(&self) -> FilterSelection {
        let Some(dataset) = &self.dataset else {
            return FilterSelection {
                modality: None,
                years: Vec::new(),
                seniorities: Vec::new(),
                company_sizes: Vec::new(),
            };
        };
        let options = &dataset.options;
        let picked = |values: &[String], checked: &[bool]| -> Vec<String> {
            values
                .iter()
                .zip(checked)
                .filter(|(_, c)| **c)
                .map(|(v, _)| v.clone())
                .collect()
        };
        FilterSelection {
            modality: options.modalities.get(self.modality_idx).cloned(),
            years: options
                .years
                .iter()
                .zip(&self.years_checked)
                .filter(|(_, c)| **c)
                .map(|(y, _)| *y)
                .collect(),
            seniorities: picked(&options.seniorities, &self.seniorities_checked),
            company_sizes: picked(&options.company_sizes, &self.sizes_checked),
        }
    }

    /// Full blocking recompute of the derived view. Called on every
    /// selection change.
    fn recompute(&mut self) {
        let selection = self.selection();
        let Some(dataset) = &self.dataset else {
            return;
        };
        let start = Instant::now();
        match compute_view(
            &dataset.records,
            &selection,
            self.config.chart.top_roles,
            self.config.chart.histogram_bins,
        ) {
            Ok(view) => {
                self.view = Some(view);
                self.table_offset = 0;
            }
            Err(e) => {
                // Should not happen once the dataset validated at load;
                // surface it the same way as a load failure.
                self.error = Some(e.to_string());
            }
        }
        self.debug.last_compute = start.elapsed();
    }

    fn key(&mut self, key: &KeyEvent) -> Option<AppEvent> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(AppEvent::Exit);
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Some(AppEvent::Exit),
            _ => {}
        }
        if self.loading.is_some() || self.error.is_some() || self.dataset.is_none() {
            return None;
        }
        match key.code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::PageUp => self.scroll_table(-(self.table_page() as isize)),
            KeyCode::PageDown => self.scroll_table(self.table_page() as isize),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_focused(),
            KeyCode::Char('a') => self.toggle_all_focused(),
            _ => {}
        }
        None
    }

    fn panel_len(&self, focus: Focus) -> usize {
        let Some(dataset) = &self.dataset else {
            return 0;
        };
        match focus {
            Focus::Modality => dataset.options.modalities.len(),
            Focus::Years => dataset.options.years.len(),
            Focus::Seniorities => dataset.options.seniorities.len(),
            Focus::CompanySizes => dataset.options.company_sizes.len(),
            Focus::Table => self
                .view
                .as_ref()
                .map(|v| v.filtered.height())
                .unwrap_or(0),
        }
    }

    fn table_page(&self) -> usize {
        10
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.focus == Focus::Table {
            self.scroll_table(delta);
            return;
        }
        let len = self.panel_len(self.focus);
        if len == 0 {
            return;
        }
        let cursor = match self.focus {
            Focus::Modality => &mut self.modality_cursor,
            Focus::Years => &mut self.years_cursor,
            Focus::Seniorities => &mut self.seniorities_cursor,
            Focus::CompanySizes => &mut self.sizes_cursor,
            Focus::Table => unreachable!(),
        };
        *cursor = cursor.saturating_add_signed(delta).min(len - 1);
    }

    fn scroll_table(&mut self, delta: isize) {
        let rows = self.panel_len(Focus::Table);
        let max = rows.saturating_sub(1);
        self.table_offset = self.table_offset.saturating_add_signed(delta).min(max);
    }

    /// Space/Enter on the focused panel: pick the modality under the cursor,
    /// or flip the checkbox under the cursor.
    fn toggle_focused(&mut self) {
        if self.panel_len(self.focus) == 0 {
            return;
        }
        match self.focus {
            Focus::Modality => {
                if self.modality_idx != self.modality_cursor {
                    self.modality_idx = self.modality_cursor;
                    self.recompute();
                }
            }
            Focus::Years => {
                let i = self.years_cursor;
                self.years_checked[i] = !self.years_checked[i];
                self.recompute();
            }
            Focus::Seniorities => {
                let i = self.seniorities_cursor;
                self.seniorities_checked[i] = !self.seniorities_checked[i];
                self.recompute();
            }
            Focus::CompanySizes => {
                let i = self.sizes_cursor;
                self.sizes_checked[i] = !self.sizes_checked[i];
                self.recompute();
            }
            Focus::Table => {}
        }
    }

    /// `a` on a multi-select panel: check everything, or uncheck everything
    /// when everything is already checked.
    fn toggle_all_focused(&mut self) {
        let checked = match self.focus {
            Focus::Years => &mut self.years_checked,
            Focus::Seniorities => &mut self.seniorities_checked,
            Focus::CompanySizes => &mut self.sizes_checked,
            Focus::Modality | Focus::Table => return,
        };
        if checked.is_empty() {
            return;
        }
        let target = !checked.iter().all(|c| *c);
        checked.iter_mut().for_each(|c| *c = target);
        self.recompute();
    }

    /// Sender for follow-up events (exposed for embedding and tests).
    pub fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        render::draw(self, area, buf);
    }
}
