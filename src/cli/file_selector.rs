//! Directory browser used by the wizard's first step
//!
//! Lists every file in the current directory. Files with a registered
//! conversion are highlighted; everything else is shown dimmed but can still
//! be picked so the wizard can report it as unsupported.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::pipeline::registry;

/// What the browser wants the wizard to do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserAction {
    Stay,
    /// User picked a file
    Selected(PathBuf),
    /// User backed out of the browser
    Cancel,
}

/// A file or directory entry in the browser
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    /// File has at least one registered target format
    pub supported: bool,
}

/// Browser state: current directory, its entries and the filter
#[derive(Debug, Clone)]
pub struct FileSelectorState {
    pub current_dir: PathBuf,
    pub entries: Vec<FileEntry>,
    pub selected: usize,
    pub search: String,
    pub filtered: Vec<usize>,
}

impl FileSelectorState {
    pub fn new(start_dir: PathBuf) -> Self {
        let entries = list_directory(&start_dir);
        let filtered: Vec<usize> = (0..entries.len()).collect();
        Self {
            current_dir: start_dir,
            entries,
            selected: 0,
            search: String::new(),
            filtered,
        }
    }

    /// Start in the home directory, or the working directory if there is none
    pub fn from_home() -> Self {
        Self::new(dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    pub fn refresh(&mut self) {
        self.entries = list_directory(&self.current_dir);
        self.search.clear();
        self.filtered = (0..self.entries.len()).collect();
        self.selected = 0;
    }

    pub fn navigate_to(&mut self, path: PathBuf) {
        self.current_dir = path;
        self.refresh();
    }

    pub fn update_filter(&mut self) {
        let search_lower = self.search.to_lowercase();
        self.filtered = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.name.to_lowercase().contains(&search_lower))
            .map(|(i, _)| i)
            .collect();
        self.selected = 0;
    }

    /// Entry under the cursor
    pub fn highlighted(&self) -> Option<&FileEntry> {
        self.filtered
            .get(self.selected)
            .and_then(|&idx| self.entries.get(idx))
    }

    /// Put the cursor on `name` if it is listed
    pub fn select_name(&mut self, name: &str) {
        if let Some(pos) = self
            .filtered
            .iter()
            .position(|&idx| self.entries[idx].name == name)
        {
            self.selected = pos;
        }
    }
}

/// Apply one key press to the browser
pub fn handle_key(state: &mut FileSelectorState, key: KeyEvent) -> BrowserAction {
    match key.code {
        KeyCode::Enter => {
            if let Some(entry) = state.highlighted().cloned() {
                if entry.is_dir {
                    state.navigate_to(entry.path);
                } else {
                    return BrowserAction::Selected(entry.path);
                }
            }
            BrowserAction::Stay
        }
        KeyCode::Backspace => {
            if state.search.is_empty() {
                if let Some(parent) = state.current_dir.parent() {
                    let left = state
                        .current_dir
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned());
                    state.navigate_to(parent.to_path_buf());
                    if let Some(name) = left {
                        state.select_name(&name);
                    }
                }
            } else {
                state.search.pop();
                state.update_filter();
            }
            BrowserAction::Stay
        }
        KeyCode::Esc => {
            // Esc clears an active filter before leaving
            if state.search.is_empty() {
                BrowserAction::Cancel
            } else {
                state.search.clear();
                state.update_filter();
                BrowserAction::Stay
            }
        }
        KeyCode::Up => {
            state.selected = state.selected.saturating_sub(1);
            BrowserAction::Stay
        }
        KeyCode::Down => {
            if state.selected + 1 < state.filtered.len() {
                state.selected += 1;
            }
            BrowserAction::Stay
        }
        KeyCode::PageUp => {
            state.selected = state.selected.saturating_sub(10);
            BrowserAction::Stay
        }
        KeyCode::PageDown => {
            state.selected = (state.selected + 10).min(state.filtered.len().saturating_sub(1));
            BrowserAction::Stay
        }
        KeyCode::Home => {
            state.selected = 0;
            BrowserAction::Stay
        }
        KeyCode::End => {
            state.selected = state.filtered.len().saturating_sub(1);
            BrowserAction::Stay
        }
        KeyCode::Char(c) if !c.is_control() => {
            state.search.push(c);
            state.update_filter();
            BrowserAction::Stay
        }
        _ => BrowserAction::Stay,
    }
}

/// List directory contents: parent link, then directories, then files
pub fn list_directory(path: &Path) -> Vec<FileEntry> {
    let mut entries = Vec::new();

    if let Some(parent) = path.parent() {
        if parent != path {
            entries.push(FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
                supported: false,
            });
        }
    }

    match std::fs::read_dir(path) {
        Ok(read_dir) => {
            for entry in read_dir.flatten() {
                let entry_path = entry.path();
                let name = entry.file_name().to_string_lossy().to_string();

                // Hidden entries, including multi-hop leftovers
                if name.starts_with('.') {
                    continue;
                }

                let is_dir = entry_path.is_dir();
                let supported = !is_dir && registry::is_supported_path(&entry_path);
                entries.push(FileEntry {
                    name,
                    path: entry_path,
                    is_dir,
                    supported,
                });
            }
        }
        Err(e) => log::debug!("Cannot read directory {}: {}", path.display(), e),
    }

    entries.sort_by(|a, b| {
        if a.name == ".." {
            return Ordering::Less;
        }
        if b.name == ".." {
            return Ordering::Greater;
        }
        match (a.is_dir, b.is_dir) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        }
    });

    entries
}

fn truncate_path_start(path: &str, max_len: usize) -> String {
    let count = path.chars().count();
    if count <= max_len || max_len < 4 {
        path.to_string()
    } else {
        let tail: String = path.chars().skip(count - (max_len - 3)).collect();
        format!("...{}", tail)
    }
}

/// Draw the browser inside `area`
pub fn render_file_selector(f: &mut Frame, area: Rect, state: &FileSelectorState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Current path
            Constraint::Length(3), // Search box
            Constraint::Min(1),    // File list
        ])
        .split(area);

    let path_str = state.current_dir.display().to_string();
    let max_path_len = (chunks[0].width as usize).saturating_sub(12);
    let path_line = Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled("Current: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            truncate_path_start(&path_str, max_path_len),
            Style::default().fg(Color::White),
        ),
    ]);
    f.render_widget(Paragraph::new(path_line), chunks[0]);

    let search_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Filter ")
        .title_style(Style::default().fg(Color::DarkGray));
    let search_content = if state.search.is_empty() {
        Line::from(vec![
            Span::styled("Type to filter...", Style::default().fg(Color::DarkGray)),
            Span::styled("▌", Style::default().fg(Color::Cyan)),
        ])
    } else {
        Line::from(vec![
            Span::styled(state.search.as_str(), Style::default().fg(Color::White)),
            Span::styled("▌", Style::default().fg(Color::Cyan)),
        ])
    };
    f.render_widget(Paragraph::new(search_content).block(search_block), chunks[1]);

    let list_height = chunks[2].height as usize;
    let start_idx = if state.selected >= list_height {
        state.selected - list_height + 1
    } else {
        0
    };

    let items: Vec<ListItem> = state
        .filtered
        .iter()
        .enumerate()
        .skip(start_idx)
        .take(list_height)
        .map(|(display_idx, &entry_idx)| {
            let entry = &state.entries[entry_idx];
            let icon = if entry.is_dir { "▸ " } else { "  " };
            let suffix = if entry.is_dir && entry.name != ".." { "/" } else { "" };

            let style = match (display_idx == state.selected, entry.is_dir, entry.supported) {
                (true, true, _) => Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
                (true, false, true) => Style::default().fg(Color::Black).bg(Color::Green).bold(),
                (true, false, false) => Style::default().fg(Color::Black).bg(Color::DarkGray),
                (false, true, _) => Style::default().fg(Color::Cyan),
                (false, false, true) => Style::default().fg(Color::Green),
                (false, false, false) => Style::default().fg(Color::DarkGray),
            };

            ListItem::new(format!("  {}{}{}", icon, entry.name, suffix)).style(style)
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected.saturating_sub(start_idx)));
    f.render_stateful_widget(List::new(items), chunks[2], &mut list_state);

    if state.filtered.is_empty() {
        let msg = if state.search.is_empty() {
            "This directory is empty"
        } else {
            "No matching files"
        };
        let msg_area = Rect::new(
            chunks[2].x + 2,
            chunks[2].y + chunks[2].height / 2,
            chunks[2].width.saturating_sub(4),
            1,
        )
        .intersection(chunks[2]);
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                msg,
                Style::default().fg(Color::DarkGray).italic(),
            )))
            .alignment(Alignment::Center),
            msg_area,
        );
    }
}
