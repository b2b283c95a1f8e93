//! Interactive TUI wizard for single-file conversion
//!
//! Walks the user through picking a file, picking a target format from the
//! registry, and running the conversion. After each conversion the wizard
//! shows the outcome and can start over with another file.
//!
//! # Architecture
//!
//! - `WizardState`: state machine holding the step list, the browser, the
//!   status line and the current notice. All transitions are plain methods so
//!   they can be driven without a terminal.
//! - `WizardStep`: one variant per screen, with its own cursor state.
//! - `WizardData`: the selected file, its format and the chosen target.
//!
//! # Flow
//!
//! 1. File selection (unsupported files raise a notice and stay here)
//! 2. Target format
//! 3. Summary and Convert
//! 4. Result notice, then back to 1

use std::io::{stdout, Stdout};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Terminal,
};

use super::file_selector::{self, BrowserAction, FileSelectorState};
use super::status::{ConversionStatus, Notice};
use crate::pipeline::{self, registry, ConversionOutcome, ConversionRequest, ConvertError, Format};

// ============================================================================
// Step Definitions
// ============================================================================

/// Individual wizard step with embedded UI state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardStep {
    /// Browse for the source file
    FileSelection,
    /// Pick one of the registered targets
    TargetFormat { selected: usize },
    /// Review and convert
    Summary,
    /// Outcome of the last conversion
    Result,
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl WizardStep {
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::FileSelection => "Select File",
            WizardStep::TargetFormat { .. } => "Target Format",
            WizardStep::Summary => "Summary",
            WizardStep::Result => "Result",
        }
    }
}

// ============================================================================
// Action Types
// ============================================================================

/// Action to take after handling an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    NextStep,
    PrevStep,
    /// Ask for quit confirmation
    Quit,
    Stay,
    /// Run the conversion for the current selection
    Convert,
    /// Go back to file selection for another conversion
    Restart,
}

// ============================================================================
// Data Accumulation
// ============================================================================

/// Selection accumulated across the steps
#[derive(Debug, Clone, Default)]
pub struct WizardData {
    pub input: Option<PathBuf>,
    pub source_format: Option<Format>,
    /// Registered targets for `source_format`, in registry order
    pub targets: &'static [Format],
    pub target: Option<Format>,
    pub last_outcome: Option<ConversionOutcome>,
}

impl WizardData {
    /// Output path the current selection would write to
    pub fn output_path(&self) -> Option<PathBuf> {
        match (&self.input, self.target) {
            (Some(input), Some(target)) => Some(pipeline::output_path(input, target)),
            _ => None,
        }
    }
}

// ============================================================================
// Wizard State Machine
// ============================================================================

/// Main wizard state machine
pub struct WizardState {
    /// Ordered list of steps for the current selection
    pub steps: Vec<WizardStep>,
    pub current_index: usize,
    pub data: WizardData,
    pub browser: FileSelectorState,
    pub status: ConversionStatus,
    /// Message box drawn over the current step
    pub notice: Option<Notice>,
    pub show_quit_confirm: bool,
    /// Number of successful conversions this session
    pub completed: usize,
}

impl WizardState {
    /// Wizard starting in `start_dir`
    pub fn new(start_dir: PathBuf) -> Self {
        Self::with_browser(FileSelectorState::new(start_dir))
    }

    /// Wizard starting in the home directory
    pub fn from_home() -> Self {
        Self::with_browser(FileSelectorState::from_home())
    }

    fn with_browser(browser: FileSelectorState) -> Self {
        Self {
            steps: vec![WizardStep::FileSelection],
            current_index: 0,
            data: WizardData::default(),
            browser,
            status: ConversionStatus::Ready,
            notice: None,
            show_quit_confirm: false,
            completed: 0,
        }
    }

    /// Rebuild the step list for the selected file
    pub fn build_steps(&mut self) {
        if self.data.targets.is_empty() {
            self.steps = vec![WizardStep::FileSelection];
            self.current_index = 0;
            return;
        }

        let selected = self
            .data
            .target
            .and_then(|t| self.data.targets.iter().position(|&x| x == t))
            .unwrap_or(0);
        self.steps = vec![
            WizardStep::FileSelection,
            WizardStep::TargetFormat { selected },
            WizardStep::Summary,
            WizardStep::Result,
        ];
    }

    /// Take a file from the browser (or the command line).
    ///
    /// A file without registered targets raises the unsupported notice and
    /// leaves the wizard on file selection with nothing to convert.
    pub fn select_file(&mut self, path: PathBuf) {
        let source_format = registry::source_format(&path);
        let targets = source_format.map(registry::targets_for).unwrap_or(&[]);
        log::debug!(
            "Selected {} ({} target(s))",
            path.display(),
            targets.len()
        );

        self.data.target = None;
        self.data.source_format = source_format;
        self.data.targets = targets;

        if targets.is_empty() {
            self.notice = Some(Notice::unsupported(&path));
            self.data.input = None;
            self.build_steps();
            return;
        }

        self.notice = None;
        self.data.input = Some(path);
        self.build_steps();
        self.current_index = 1;
    }

    /// Record the target at `index` of the registered list
    pub fn choose_target(&mut self, index: usize) -> bool {
        match self.data.targets.get(index) {
            Some(&target) => {
                self.data.target = Some(target);
                true
            }
            None => false,
        }
    }

    /// Whether the Convert action is available
    pub fn can_convert(&self) -> bool {
        self.status.is_idle() && self.request().is_some()
    }

    /// Request for the current selection, if it is a registered conversion
    pub fn request(&self) -> Option<ConversionRequest> {
        let input = self.data.input.as_ref()?;
        let source = self.data.source_format?;
        let target = self.data.target?;
        if !registry::is_registered(source, target) {
            return None;
        }
        Some(ConversionRequest::new(input.clone(), target))
    }

    /// Flip the status line before the blocking conversion call
    pub fn begin_conversion(&mut self) -> Option<ConversionRequest> {
        if !self.can_convert() {
            return None;
        }
        self.status = ConversionStatus::Converting;
        self.notice = None;
        self.request()
    }

    /// Record the outcome and move to the result step
    pub fn finish_conversion(
        &mut self,
        result: std::result::Result<ConversionOutcome, ConvertError>,
    ) {
        match result {
            Ok(outcome) => {
                self.status = ConversionStatus::Completed;
                self.notice = Some(Notice::converted(&outcome.output));
                self.data.last_outcome = Some(outcome);
                self.completed += 1;
            }
            Err(err) => {
                log::debug!("Conversion failed: {}", err);
                self.status = ConversionStatus::Failed;
                self.notice = Some(Notice::failed(&err));
                self.data.last_outcome = None;
            }
        }
        if let Some(idx) = self.steps.iter().position(|s| *s == WizardStep::Result) {
            self.current_index = idx;
        }
    }

    /// Run the current selection through the dispatcher
    pub fn run_conversion(&mut self) {
        if let Some(request) = self.begin_conversion() {
            let result = pipeline::convert(&request);
            self.finish_conversion(result);
        }
    }

    /// Start over with another file, keeping the browser where it was
    pub fn restart(&mut self) {
        self.data = WizardData::default();
        self.notice = None;
        self.status = ConversionStatus::Ready;
        self.browser.refresh();
        self.build_steps();
    }

    pub fn next_step(&mut self) {
        if self.current_index + 1 < self.steps.len() {
            self.current_index += 1;
        }
    }

    pub fn prev_step(&mut self) {
        if self.current_index > 0 {
            self.current_index -= 1;
        }
    }

    pub fn current_step(&self) -> Option<&WizardStep> {
        self.steps.get(self.current_index)
    }

    pub fn current_step_mut(&mut self) -> Option<&mut WizardStep> {
        self.steps.get_mut(self.current_index)
    }

    /// Apply a step action returned by a key handler
    pub fn apply(&mut self, action: StepAction) {
        match action {
            StepAction::NextStep => self.next_step(),
            StepAction::PrevStep => self.prev_step(),
            StepAction::Quit => self.show_quit_confirm = true,
            StepAction::Convert => self.run_conversion(),
            StepAction::Restart => self.restart(),
            StepAction::Stay => {}
        }
    }
}

// ============================================================================
// Terminal Setup/Teardown
// ============================================================================

/// Setup terminal for TUI rendering with panic-safe cleanup
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    stdout()
        .execute(EnterAlternateScreen)
        .context("Failed to enter alternate screen")?;

    // Install panic hook for clean terminal restoration
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        teardown_terminal();
        original_hook(panic_info);
    }));

    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
}

// ============================================================================
// Entry Point
// ============================================================================

/// Mutes the logger until dropped.
///
/// Log output goes to stderr, which shares the tty with the alternate screen.
pub struct LogSilencer {
    previous: log::LevelFilter,
}

impl LogSilencer {
    pub fn new() -> Self {
        let previous = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        Self { previous }
    }
}

impl Default for LogSilencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LogSilencer {
    fn drop(&mut self) {
        log::set_max_level(self.previous);
    }
}

/// Run the wizard, returning how many files were converted
pub fn run_wizard(input: Option<&Path>) -> Result<usize> {
    let mut wizard = match input.and_then(Path::parent).filter(|p| p.is_dir()) {
        Some(dir) => WizardState::new(dir.to_path_buf()),
        None => WizardState::from_home(),
    };

    if let Some(input) = input {
        if let Some(name) = input.file_name() {
            wizard.browser.select_name(&name.to_string_lossy());
        }
        wizard.select_file(input.to_path_buf());
    }

    let mut terminal = setup_terminal()?;
    let result = {
        let _quiet = LogSilencer::new();
        run_wizard_loop(&mut terminal, &mut wizard)
    };
    teardown_terminal();

    result.map(|_| wizard.completed)
}

// ============================================================================
// Event Loop
// ============================================================================

fn run_wizard_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    wizard: &mut WizardState,
) -> Result<()> {
    loop {
        terminal.draw(|f| render_wizard(f, wizard))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        if wizard.show_quit_confirm {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => return Ok(()),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    wizard.show_quit_confirm = false;
                }
                _ => {}
            }
            continue;
        }

        let action = handle_step_event(wizard, key);
        if action == StepAction::Convert {
            // Show "Converting..." before the blocking call
            if let Some(request) = wizard.begin_conversion() {
                terminal.draw(|f| render_wizard(f, wizard))?;
                let result = pipeline::convert(&request);
                wizard.finish_conversion(result);
            }
            continue;
        }
        wizard.apply(action);
    }
}

/// Route a key press to the current step
pub fn handle_step_event(wizard: &mut WizardState, key: KeyEvent) -> StepAction {
    // Any key dismisses an unsupported-format notice
    if matches!(wizard.notice, Some(Notice::UnsupportedFormat { .. })) {
        wizard.notice = None;
        return StepAction::Stay;
    }

    match wizard.current_step().cloned() {
        Some(WizardStep::FileSelection) => handle_file_selection(wizard, key),
        Some(WizardStep::TargetFormat { .. }) => handle_target_format(wizard, key),
        Some(WizardStep::Summary) => handle_summary(wizard, key),
        Some(WizardStep::Result) => handle_result(wizard, key),
        None => StepAction::Stay,
    }
}

// ============================================================================
// Step Handlers
// ============================================================================

fn handle_file_selection(wizard: &mut WizardState, key: KeyEvent) -> StepAction {
    match file_selector::handle_key(&mut wizard.browser, key) {
        BrowserAction::Selected(path) => {
            wizard.select_file(path);
            StepAction::Stay
        }
        BrowserAction::Cancel => StepAction::Quit,
        BrowserAction::Stay => StepAction::Stay,
    }
}

fn handle_target_format(wizard: &mut WizardState, key: KeyEvent) -> StepAction {
    let max_idx = wizard.data.targets.len().saturating_sub(1);
    let selected = match wizard.current_step_mut() {
        Some(WizardStep::TargetFormat { selected }) => selected,
        _ => return StepAction::Stay,
    };

    match key.code {
        KeyCode::Up => {
            *selected = selected.saturating_sub(1);
            StepAction::Stay
        }
        KeyCode::Down => {
            if *selected < max_idx {
                *selected += 1;
            }
            StepAction::Stay
        }
        KeyCode::Enter => {
            let index = *selected;
            if wizard.choose_target(index) {
                StepAction::NextStep
            } else {
                StepAction::Stay
            }
        }
        KeyCode::Backspace => StepAction::PrevStep,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => StepAction::Quit,
        _ => StepAction::Stay,
    }
}

fn handle_summary(wizard: &WizardState, key: KeyEvent) -> StepAction {
    match key.code {
        KeyCode::Enter if wizard.can_convert() => StepAction::Convert,
        KeyCode::Backspace => StepAction::PrevStep,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => StepAction::Quit,
        _ => StepAction::Stay,
    }
}

fn handle_result(wizard: &WizardState, key: KeyEvent) -> StepAction {
    match key.code {
        KeyCode::Enter => StepAction::Restart,
        // Retry with another target after a failure
        KeyCode::Backspace if wizard.status == ConversionStatus::Failed => StepAction::PrevStep,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => StepAction::Quit,
        _ => StepAction::Stay,
    }
}

// ============================================================================
// Rendering Helpers
// ============================================================================

/// Create a centered rectangle with fixed dimensions
fn centered_fixed_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn step_color(step: &WizardStep) -> Color {
    match step {
        WizardStep::FileSelection => Color::Cyan,
        WizardStep::TargetFormat { .. } => Color::Magenta,
        WizardStep::Summary => Color::Green,
        WizardStep::Result => Color::Yellow,
    }
}

fn status_color(status: ConversionStatus) -> Color {
    match status {
        ConversionStatus::Ready => Color::DarkGray,
        ConversionStatus::Converting => Color::Yellow,
        ConversionStatus::Completed => Color::Green,
        ConversionStatus::Failed => Color::Red,
    }
}

// ============================================================================
// Main Rendering Functions
// ============================================================================

/// Render the complete wizard UI
///
/// Every rect is clipped to the frame, so short or narrow terminals get a
/// cut-off wizard instead of an out-of-bounds draw.
pub fn render_wizard(f: &mut Frame, wizard: &WizardState) {
    let area = f.area();

    let logo_height = 6u16;
    let footer_height = 2u16;
    let box_width = 66u16.min(area.width);
    let box_height = 22u16
        .min(area.height.saturating_sub(logo_height + footer_height))
        .max(3);

    let total_height = logo_height + box_height + footer_height;
    let x = area.x + area.width.saturating_sub(box_width) / 2;
    let y = area.y + area.height.saturating_sub(total_height) / 2;

    let logo_area = Rect::new(x, y, box_width, logo_height).intersection(area);
    render_logo(f, logo_area);

    let box_area = Rect::new(x, y + logo_height, box_width, box_height).intersection(area);
    if box_area.is_empty() {
        return;
    }
    f.render_widget(Clear, box_area);

    let color = wizard.current_step().map(step_color).unwrap_or(Color::Cyan);
    let title_text = format!(
        " Step {}/{} \u{00b7} {} ",
        wizard.current_index + 1,
        wizard.steps.len(),
        wizard.current_step().map(|s| s.title()).unwrap_or("Unknown")
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title_text)
        .title_style(Style::default().fg(color).bold())
        .title_alignment(Alignment::Center);

    let inner = block.inner(box_area);
    f.render_widget(block, box_area);
    render_step(f, inner, wizard);

    let count_text = match wizard.current_step() {
        Some(WizardStep::FileSelection) if !wizard.browser.filtered.is_empty() => Some(format!(
            " {}/{} ",
            wizard.browser.selected + 1,
            wizard.browser.filtered.len()
        )),
        Some(WizardStep::TargetFormat { selected }) => Some(format!(
            " {}/{} formats ",
            selected + 1,
            wizard.data.targets.len()
        )),
        _ => None,
    };
    if let Some(ct) = count_text {
        let ct_len = ct.chars().count() as u16;
        if ct_len + 2 <= box_area.width {
            let ct_area = Rect::new(
                box_area.x + box_area.width - ct_len - 1,
                box_area.bottom() - 1,
                ct_len,
                1,
            );
            f.render_widget(
                Paragraph::new(Span::styled(ct, Style::default().fg(Color::DarkGray))),
                ct_area,
            );
        }
    }

    let footer_y = box_area.bottom();
    let status_area = Rect::new(x, footer_y, box_width, 1).intersection(area);
    let help_area = Rect::new(x, footer_y.saturating_add(1), box_width, 1).intersection(area);
    if !status_area.is_empty() {
        render_status_line(f, status_area, wizard);
    }
    if !help_area.is_empty() {
        render_help_bar(f, help_area, wizard);
    }

    if let Some(notice) = &wizard.notice {
        if matches!(notice, Notice::UnsupportedFormat { .. }) {
            render_notice_overlay(f, notice);
        }
    }

    if wizard.show_quit_confirm {
        render_quit_confirm_overlay(f);
    }
}

fn render_logo(f: &mut Frame, area: Rect) {
    let logo_style = Style::default().fg(Color::Cyan).bold();
    let logo_lines = vec![
        Line::from(Span::styled("┏━╸╻╻  ┏━╸┏━┓╻ ╻╻┏━╸╺┳╸", logo_style)),
        Line::from(Span::styled("┣╸ ┃┃  ┣╸ ┗━┓┣━┫┃┣╸  ┃ ", logo_style)),
        Line::from(Span::styled("╹  ╹┗━╸┗━╸┗━┛╹ ╹╹╹   ╹ ", logo_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled("⇄ ", Style::default().fg(Color::Magenta).bold()),
            Span::styled(
                "One file in, one format out",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];
    f.render_widget(Paragraph::new(logo_lines).alignment(Alignment::Center), area);
}

fn render_step(f: &mut Frame, area: Rect, wizard: &WizardState) {
    match wizard.current_step() {
        Some(WizardStep::FileSelection) => {
            file_selector::render_file_selector(f, area, &wizard.browser)
        }
        Some(WizardStep::TargetFormat { .. }) => render_target_format(f, area, wizard),
        Some(WizardStep::Summary) => render_summary(f, area, wizard),
        Some(WizardStep::Result) => render_result(f, area, wizard),
        None => {
            let paragraph = Paragraph::new("Error: No current step").alignment(Alignment::Center);
            f.render_widget(paragraph, area);
        }
    }
}

fn render_status_line(f: &mut Frame, area: Rect, wizard: &WizardState) {
    let line = Line::from(vec![
        Span::styled("  Status: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            wizard.status.label(),
            Style::default().fg(status_color(wizard.status)).bold(),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Render help bar with context-appropriate shortcuts
fn render_help_bar(f: &mut Frame, area: Rect, wizard: &WizardState) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan));
    let hint = |h: &'static str| Span::styled(h, Style::default().fg(Color::DarkGray));

    let spans = match wizard.current_step() {
        Some(WizardStep::FileSelection) => vec![
            key("  Enter"),
            hint(" open/select  "),
            key("Type"),
            hint(" filter  "),
            key("Bksp"),
            hint(" up  "),
            key("Esc"),
            hint(" quit"),
        ],
        Some(WizardStep::Summary) if wizard.can_convert() => vec![
            key("  Enter"),
            hint(" convert  "),
            key("Bksp"),
            hint(" back  "),
            key("Q/Esc"),
            hint(" quit"),
        ],
        Some(WizardStep::Result) => vec![
            key("  Enter"),
            hint(" convert another  "),
            key("Q/Esc"),
            hint(" quit"),
        ],
        _ => vec![
            key("  Enter"),
            hint(" next  "),
            key("Bksp"),
            hint(" back  "),
            key("Q/Esc"),
            hint(" quit"),
        ],
    };

    f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}

fn render_quit_confirm_overlay(f: &mut Frame) {
    let popup = centered_fixed_rect(40, 8, f.area());
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Quit fileshift? ")
        .title_style(Style::default().fg(Color::Red).bold())
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Are you sure you want to quit?",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("      ", Style::default()),
            Span::styled("Y", Style::default().fg(Color::Cyan)),
            Span::styled(" yes  ", Style::default().fg(Color::DarkGray)),
            Span::styled("N", Style::default().fg(Color::Cyan)),
            Span::styled(" no", Style::default().fg(Color::DarkGray)),
        ]),
    ];
    f.render_widget(Paragraph::new(content), inner);
}

fn render_notice_overlay(f: &mut Frame, notice: &Notice) {
    let popup = centered_fixed_rect(50, 8, f.area());
    f.render_widget(Clear, popup);

    let color = if notice.is_error() { Color::Red } else { Color::Green };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {} ", notice.title()))
        .title_style(Style::default().fg(color).bold())
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut content = vec![Line::from("")];
    content.extend(notice.message().lines().map(|l| {
        Line::from(Span::styled(format!("  {}", l), Style::default().fg(Color::White)))
    }));
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "  Press any key to continue",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(Paragraph::new(content).wrap(Wrap { trim: false }), inner);
}

// ============================================================================
// Step Renderers
// ============================================================================

fn render_target_format(f: &mut Frame, area: Rect, wizard: &WizardState) {
    let selected = match wizard.current_step() {
        Some(WizardStep::TargetFormat { selected }) => *selected,
        _ => return,
    };
    let color = Color::Magenta;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let source = wizard
        .data
        .source_format
        .map(|s| s.label())
        .unwrap_or("?");
    let desc = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  Convert {} to:", source),
            Style::default().fg(Color::DarkGray).bold(),
        )),
    ]);
    f.render_widget(desc, chunks[0]);

    let items: Vec<ListItem> = wizard
        .data
        .targets
        .iter()
        .enumerate()
        .map(|(i, target)| {
            let style = if i == selected {
                Style::default().fg(Color::Black).bg(color).bold()
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!("  {} (.{})", target.label(), target.extension())).style(style)
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(selected));
    f.render_stateful_widget(List::new(items), chunks[1], &mut list_state);
}

fn render_summary(f: &mut Frame, area: Rect, wizard: &WizardState) {
    let color = Color::Green;
    let display = |p: Option<&Path>| {
        p.map(|p| p.display().to_string())
            .unwrap_or_else(|| "None".to_string())
    };
    let input = display(wizard.data.input.as_deref());
    let output = display(wizard.data.output_path().as_deref());
    let conversion = match (wizard.data.source_format, wizard.data.target) {
        (Some(s), Some(t)) => format!("{} \u{2192} {}", s, t),
        _ => "None".to_string(),
    };
    let overwrite = wizard
        .data
        .output_path()
        .map(|p| p.exists())
        .unwrap_or(false);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Conversion Summary",
            Style::default().fg(Color::DarkGray).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Input:       ", Style::default().fg(Color::DarkGray)),
            Span::styled(input, Style::default().fg(color)),
        ]),
        Line::from(vec![
            Span::styled("  Conversion:  ", Style::default().fg(Color::DarkGray)),
            Span::styled(conversion, Style::default().fg(color)),
        ]),
        Line::from(vec![
            Span::styled("  Output:      ", Style::default().fg(Color::DarkGray)),
            Span::styled(output, Style::default().fg(color)),
        ]),
    ];
    if overwrite {
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            "  The output file exists and will be replaced.",
            Style::default().fg(Color::Yellow),
        )));
    }
    content.push(Line::from(""));
    content.push(Line::from(if wizard.can_convert() {
        Span::styled("  [ Convert ]", Style::default().fg(Color::Black).bg(color).bold())
    } else {
        Span::styled("  [ Convert ]", Style::default().fg(Color::DarkGray))
    }));

    f.render_widget(Paragraph::new(content).wrap(Wrap { trim: false }), area);
}

fn render_result(f: &mut Frame, area: Rect, wizard: &WizardState) {
    let mut content = vec![Line::from("")];
    match &wizard.notice {
        Some(notice) => {
            let color = if notice.is_error() { Color::Red } else { Color::Green };
            content.push(Line::from(Span::styled(
                format!("  {}", notice.title()),
                Style::default().fg(color).bold(),
            )));
            content.push(Line::from(""));
            content.extend(notice.message().lines().map(|l| {
                Line::from(Span::styled(format!("  {}", l), Style::default().fg(Color::White)))
            }));
        }
        None => content.push(Line::from(Span::styled(
            "  Nothing converted yet",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    if let Some(outcome) = &wizard.data.last_outcome {
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            format!("  Took {:.2?}", outcome.elapsed),
            Style::default().fg(Color::DarkGray),
        )));
    }
    f.render_widget(Paragraph::new(content).wrap(Wrap { trim: false }), area);
}
