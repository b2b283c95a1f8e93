//! Tests for the TUI wizard state machine
//!
//! These drive `WizardState` directly; nothing here touches a terminal.

mod common;

use std::path::Path;

use common::*;
use crossterm::event::{KeyCode, KeyEvent};
use fileshift::cli::wizard::{
    handle_step_event, render_wizard, LogSilencer, StepAction, WizardState, WizardStep,
};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use fileshift::cli::{ConversionStatus, Notice};
use fileshift::pipeline::Format;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::from(code)
}

fn wizard_in(dir: &Path) -> WizardState {
    WizardState::new(dir.to_path_buf())
}

#[test]
fn test_initial_state() {
    let dir = temp_dir();
    let wizard = wizard_in(dir.path());

    assert_eq!(wizard.steps, vec![WizardStep::FileSelection]);
    assert_eq!(wizard.status, ConversionStatus::Ready);
    assert!(wizard.notice.is_none());
    assert!(!wizard.can_convert());
}

#[test]
fn test_supported_file_builds_full_flow() {
    let dir = temp_dir();
    let png = write_rgba_png(dir.path(), "logo.png");
    let mut wizard = wizard_in(dir.path());

    wizard.select_file(png);

    assert_eq!(wizard.steps.len(), 4);
    assert!(matches!(wizard.current_step(), Some(WizardStep::TargetFormat { selected: 0 })));
    assert_eq!(wizard.data.source_format, Some(Format::Png));
    assert_eq!(
        wizard.data.targets,
        &[Format::Jpg, Format::Jpeg, Format::Bmp, Format::Gif]
    );
}

#[test]
fn test_unsupported_file_shows_notice_and_no_convert() {
    let dir = temp_dir();
    let docx = write_file(dir.path(), "letter.docx", "x");
    let mut wizard = wizard_in(dir.path());

    wizard.select_file(docx);

    match &wizard.notice {
        Some(Notice::UnsupportedFormat { message }) => {
            assert!(message.starts_with("This file format is not supported for conversion."))
        }
        other => panic!("expected unsupported notice, got {:?}", other),
    }
    assert_eq!(wizard.steps, vec![WizardStep::FileSelection]);
    assert!(wizard.data.targets.is_empty());
    assert!(!wizard.can_convert());
    assert_eq!(wizard.status, ConversionStatus::Ready);
}

#[test]
fn test_any_key_dismisses_unsupported_notice() {
    let dir = temp_dir();
    let docx = write_file(dir.path(), "letter.docx", "x");
    let mut wizard = wizard_in(dir.path());
    wizard.select_file(docx);

    let action = handle_step_event(&mut wizard, key(KeyCode::Down));

    assert_eq!(action, StepAction::Stay);
    assert!(wizard.notice.is_none());
}

#[test]
fn test_browser_filter_and_select() {
    let dir = temp_dir();
    write_file(dir.path(), "alpha.txt", "a");
    write_file(dir.path(), "data.csv", SAMPLE_CSV);
    let mut wizard = wizard_in(dir.path());

    for c in "data".chars() {
        handle_step_event(&mut wizard, key(KeyCode::Char(c)));
    }
    assert_eq!(wizard.browser.filtered.len(), 1);

    handle_step_event(&mut wizard, key(KeyCode::Enter));

    assert_eq!(wizard.data.input, Some(dir.path().join("data.csv")));
    assert!(matches!(wizard.current_step(), Some(WizardStep::TargetFormat { .. })));
}

#[test]
fn test_browser_marks_supported_files() {
    let dir = temp_dir();
    write_file(dir.path(), "notes.md", "# hi");
    write_file(dir.path(), "song.mp3", "x");
    write_file(dir.path(), ".hidden.txt", "x");
    let wizard = wizard_in(dir.path());

    let entries = &wizard.browser.entries;
    let md = entries.iter().find(|e| e.name == "notes.md").unwrap();
    let mp3 = entries.iter().find(|e| e.name == "song.mp3").unwrap();
    assert!(md.supported);
    assert!(!mp3.supported);
    assert!(entries.iter().all(|e| e.name != ".hidden.txt"));
}

#[test]
fn test_target_navigation_and_choice() {
    let dir = temp_dir();
    let csv = write_file(dir.path(), "data.csv", SAMPLE_CSV);
    let mut wizard = wizard_in(dir.path());
    wizard.select_file(csv);

    handle_step_event(&mut wizard, key(KeyCode::Down));
    handle_step_event(&mut wizard, key(KeyCode::Down)); // clamps at the last target
    let action = handle_step_event(&mut wizard, key(KeyCode::Enter));
    wizard.apply(action);

    assert_eq!(wizard.data.target, Some(Format::Json));
    assert_eq!(wizard.current_step(), Some(&WizardStep::Summary));
    assert_eq!(wizard.data.output_path(), Some(dir.path().join("data.json")));
    assert!(wizard.can_convert());
}

#[test]
fn test_successful_conversion_updates_status_and_notice() {
    let dir = temp_dir();
    let csv = write_file(dir.path(), "data.csv", SAMPLE_CSV);
    let mut wizard = wizard_in(dir.path());
    wizard.select_file(csv);
    wizard.choose_target(1);
    wizard.next_step();

    let action = handle_step_event(&mut wizard, key(KeyCode::Enter));
    assert_eq!(action, StepAction::Convert);
    wizard.apply(action);

    assert_eq!(wizard.status, ConversionStatus::Completed);
    assert_eq!(wizard.current_step(), Some(&WizardStep::Result));
    assert_eq!(wizard.completed, 1);
    let expected = format!(
        "File converted successfully!\nSaved as: {}",
        dir.path().join("data.json").display()
    );
    assert_eq!(wizard.notice.as_ref().map(|n| n.message()), Some(expected.as_str()));
    assert!(dir.path().join("data.json").exists());
}

#[test]
fn test_failed_conversion_leaves_wizard_idle() {
    let dir = temp_dir();
    let png = write_file(dir.path(), "broken.png", "not an image");
    let mut wizard = wizard_in(dir.path());
    wizard.select_file(png);
    wizard.choose_target(0);

    wizard.run_conversion();

    assert_eq!(wizard.status, ConversionStatus::Failed);
    assert!(wizard.status.is_idle());
    match &wizard.notice {
        Some(Notice::Error { message }) => {
            assert!(message.starts_with("An error occurred during conversion: "))
        }
        other => panic!("expected error notice, got {:?}", other),
    }
    assert_eq!(wizard.current_step(), Some(&WizardStep::Result));
    assert_eq!(wizard.completed, 0);

    // The same selection can be retried straight away
    assert!(wizard.can_convert());
}

#[test]
fn test_converting_blocks_second_request() {
    let dir = temp_dir();
    let csv = write_file(dir.path(), "data.csv", SAMPLE_CSV);
    let mut wizard = wizard_in(dir.path());
    wizard.select_file(csv);
    wizard.choose_target(0);

    assert!(wizard.begin_conversion().is_some());
    assert_eq!(wizard.status, ConversionStatus::Converting);
    assert!(!wizard.can_convert());
    assert!(wizard.begin_conversion().is_none());
}

#[test]
fn test_restart_returns_to_ready() {
    let dir = temp_dir();
    let csv = write_file(dir.path(), "data.csv", SAMPLE_CSV);
    let mut wizard = wizard_in(dir.path());
    wizard.select_file(csv);
    wizard.choose_target(0);
    wizard.run_conversion();

    let action = handle_step_event(&mut wizard, key(KeyCode::Enter));
    assert_eq!(action, StepAction::Restart);
    wizard.apply(action);

    assert_eq!(wizard.status, ConversionStatus::Ready);
    assert_eq!(wizard.steps, vec![WizardStep::FileSelection]);
    assert!(wizard.data.input.is_none());
    assert!(wizard.notice.is_none());
    // The new output shows up in the browser
    assert!(wizard.browser.entries.iter().any(|e| e.name == "data.xlsx"));
}

#[test]
fn test_escape_on_browser_asks_to_quit() {
    let dir = temp_dir();
    let mut wizard = wizard_in(dir.path());

    let action = handle_step_event(&mut wizard, key(KeyCode::Esc));
    assert_eq!(action, StepAction::Quit);
    wizard.apply(action);

    assert!(wizard.show_quit_confirm);
}

#[test]
fn test_backspace_returns_to_file_selection() {
    let dir = temp_dir();
    let csv = write_file(dir.path(), "data.csv", SAMPLE_CSV);
    let mut wizard = wizard_in(dir.path());
    wizard.select_file(csv);

    let action = handle_step_event(&mut wizard, key(KeyCode::Backspace));
    wizard.apply(action);

    assert_eq!(wizard.current_step(), Some(&WizardStep::FileSelection));
}

fn draw(wizard: &WizardState, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| render_wizard(f, wizard)).unwrap();
    let buffer = terminal.backend().buffer();
    buffer.content().iter().map(|c| c.symbol()).collect()
}

#[test]
fn test_render_fits_short_and_narrow_terminals() {
    let dir = temp_dir();
    let csv = write_file(dir.path(), "data.csv", SAMPLE_CSV);
    let docx = write_file(dir.path(), "letter.docx", "x");

    let mut browsing = wizard_in(dir.path());
    let mut unsupported = wizard_in(dir.path());
    unsupported.select_file(docx);
    let mut picking = wizard_in(dir.path());
    picking.select_file(csv.clone());
    let mut done = wizard_in(dir.path());
    done.select_file(csv);
    done.choose_target(1);
    done.run_conversion();
    browsing.show_quit_confirm = true;

    for wizard in [&browsing, &unsupported, &picking, &done] {
        for (width, height) in [(80, 12), (80, 8), (30, 5), (10, 3), (1, 1), (120, 40)] {
            draw(wizard, width, height);
        }
    }
}

#[test]
fn test_render_shows_status_line_when_room() {
    let dir = temp_dir();
    let wizard = wizard_in(dir.path());

    let screen = draw(&wizard, 100, 40);

    assert!(screen.contains("Status:"));
    assert!(screen.contains("Ready"));
}

#[test]
fn test_log_silencer_restores_level() {
    log::set_max_level(log::LevelFilter::Warn);
    {
        let _quiet = LogSilencer::new();
        assert_eq!(log::max_level(), log::LevelFilter::Off);
    }
    assert_eq!(log::max_level(), log::LevelFilter::Warn);
}

#[test]
fn test_wizard_from_home_starts_in_home_directory() {
    let wizard = WizardState::from_home();

    if let Some(home) = dirs::home_dir() {
        assert_eq!(wizard.browser.current_dir, home);
    }
    assert_eq!(wizard.steps, vec![WizardStep::FileSelection]);
}
