//! The interactive reviewer. `App` is a thin shell over the session
//! controller: every key press turns into a controller operation and every
//! frame is drawn from whatever the controller currently exposes. No record
//! state lives here.

use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use open::that as open_document;
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::config::{self, Settings, Theme};
use crate::docs::{DocKind, DocumentIndex};
use crate::session::{
    CloseOutcome, NavOutcome, PromptChoice, PromptResolution, SessionController, SessionState,
};

use super::helpers::{centered_rect, check_mark, progress_label, surface_error};
use super::theme::Palette;

/// Fine-grained input modes. `Prompt` corresponds to the controller's
/// `Prompting` state; the others only change how keys are routed.
enum Mode {
    Browsing,
    /// Keystrokes edit the notes text until Esc.
    Notes,
    /// Collecting a case id to jump to.
    Jump { input: String },
    /// The unsaved-changes dialog is on screen.
    Prompt,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    session: SessionController,
    docs: DocumentIndex,
    settings: Settings,
    mode: Mode,
    /// Cursor within the checklist; the done flag is the last row, after all
    /// attribute columns.
    selected: usize,
    theme: Theme,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(session: SessionController, docs: DocumentIndex, settings: Settings) -> Self {
        let theme = settings.theme;
        let mut app = Self {
            session,
            docs,
            settings,
            mode: Mode::Browsing,
            selected: 0,
            theme,
            status: None,
        };
        if !app.session.display(0) {
            app.set_status("The backing table has no records.", StatusKind::Error);
        }
        app
    }

    /// Route one key press. Returns `true` when the session has closed and
    /// the event loop should stop.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Browsing);

        self.mode = match mode {
            Mode::Browsing => self.handle_browsing_key(code, &mut exit),
            Mode::Notes => self.handle_notes_key(code),
            Mode::Jump { input } => self.handle_jump_key(code, input),
            Mode::Prompt => self.handle_prompt_key(code, &mut exit),
        };
        Ok(exit)
    }

    /// Ctrl-S saves from any input mode, including mid-notes.
    pub fn handle_ctrl_s(&mut self) {
        self.save();
    }

    fn handle_browsing_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => match self.session.request_close() {
                CloseOutcome::Closed => {
                    *exit = true;
                }
                CloseOutcome::PromptRequired => return Mode::Prompt,
            },
            KeyCode::Left => {
                if self.session.previous() == NavOutcome::PromptRequired {
                    return Mode::Prompt;
                }
            }
            KeyCode::Right => {
                if self.session.next() == NavOutcome::PromptRequired {
                    return Mode::Prompt;
                }
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                let last = self.checklist_len().saturating_sub(1);
                self.selected = (self.selected + 1).min(last);
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('n') => {
                if self.session.current_record().is_some() {
                    self.clear_status();
                    return Mode::Notes;
                }
            }
            KeyCode::Char('g') => {
                if !self.session.table().is_empty() {
                    self.clear_status();
                    return Mode::Jump {
                        input: String::new(),
                    };
                }
            }
            KeyCode::Char('s') => self.save(),
            KeyCode::Char('c') => self.show_case_id(),
            KeyCode::Char('o') => self.open_documents(),
            KeyCode::Char('t') => self.toggle_theme(),
            _ => {}
        }
        Mode::Browsing
    }

    fn handle_notes_key(&mut self, code: KeyCode) -> Mode {
        let mut notes = self.session.buffer().notes().to_string();
        match code {
            KeyCode::Esc => return Mode::Browsing,
            KeyCode::Enter => {
                notes.push('\n');
                self.session.set_notes(notes);
            }
            KeyCode::Backspace => {
                notes.pop();
                self.session.set_notes(notes);
            }
            KeyCode::Char(c) => {
                notes.push(c);
                self.session.set_notes(notes);
            }
            _ => {}
        }
        Mode::Notes
    }

    fn handle_jump_key(&mut self, code: KeyCode, mut input: String) -> Mode {
        match code {
            KeyCode::Esc => return Mode::Browsing,
            KeyCode::Enter => {
                let target = input.trim().to_string();
                if target.is_empty() {
                    return Mode::Browsing;
                }
                return match self.session.jump_to(&target) {
                    Ok(NavOutcome::PromptRequired) => Mode::Prompt,
                    Ok(_) => {
                        self.clear_status();
                        Mode::Browsing
                    }
                    Err(_) => {
                        self.set_status(
                            format!("Case ID {target} not found."),
                            StatusKind::Error,
                        );
                        Mode::Browsing
                    }
                };
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) => input.push(c),
            _ => {}
        }
        Mode::Jump { input }
    }

    fn handle_prompt_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        let choice = match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => PromptChoice::Save,
            KeyCode::Char('n') | KeyCode::Char('N') => PromptChoice::Discard,
            KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('C') => PromptChoice::Cancel,
            _ => return Mode::Prompt,
        };

        match self.session.resolve_prompt(choice) {
            Ok(PromptResolution::Closed) => {
                *exit = true;
            }
            Ok(PromptResolution::Navigated) => self.clear_status(),
            Ok(PromptResolution::Retained) => {}
            Err(err) => {
                // Save failed; the session kept the edits, so tell the user
                // and let them retry from the record view.
                self.set_status(surface_error(&err.into()), StatusKind::Error);
            }
        }
        Mode::Browsing
    }

    fn save(&mut self) {
        // Commit no-ops outside `Viewing`; without this guard Ctrl-S during
        // the unsaved-changes dialog would report a save that never happened.
        if self.session.state() != SessionState::Viewing {
            return;
        }
        let Some(id) = self.session.current_record().map(|record| record.id.clone()) else {
            return;
        };
        match self.session.commit() {
            Ok(()) => self.set_status(
                format!("Saved changes for Case ID {id}."),
                StatusKind::Info,
            ),
            Err(err) => self.set_status(surface_error(&err.into()), StatusKind::Error),
        }
    }

    /// Surface the full case id in the footer so it can be selected and
    /// copied out of the terminal.
    fn show_case_id(&mut self) {
        if let Some(record) = self.session.current_record() {
            let id = record.id.clone();
            self.set_status(format!("Case ID: {id}"), StatusKind::Info);
        }
    }

    /// Try to open both documents for the current case, reporting which kinds
    /// are missing.
    fn open_documents(&mut self) {
        let Some(id) = self.session.current_record().map(|record| record.id.clone()) else {
            return;
        };

        let mut missing = Vec::new();
        for kind in [DocKind::Pdf, DocKind::Txt] {
            match self.docs.locate(&id, kind) {
                Some(path) => {
                    if let Err(err) = open_document(&path) {
                        self.set_status(
                            format!("Failed to open {}: {err}", path.display()),
                            StatusKind::Error,
                        );
                        return;
                    }
                }
                None => missing.push(kind.label()),
            }
        }

        match missing.as_slice() {
            [] => self.set_status(
                format!("Opened documents for Case ID {id}."),
                StatusKind::Info,
            ),
            [one] => self.set_status(
                format!("{one} file is missing for Case ID {id}"),
                StatusKind::Error,
            ),
            _ => self.set_status(
                format!("Both PDF and TXT files are missing for Case ID {id}"),
                StatusKind::Error,
            ),
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.settings.theme = self.theme;
        if let Err(err) = config::save(&self.settings) {
            self.set_status(surface_error(&err), StatusKind::Error);
        }
    }

    /// Attribute rows plus the trailing done row.
    fn checklist_len(&self) -> usize {
        self.session.table().attributes().len() + 1
    }

    fn toggle_selected(&mut self) {
        if self.session.current_record().is_none() {
            return;
        }
        let attributes = self.session.table().attributes();
        if self.selected < attributes.len() {
            let name = attributes[self.selected].clone();
            let value = !self.session.buffer().field(&name);
            // Schema-derived name; an unknown-field error here is a bug.
            let toggled = self.session.set_field(&name, value);
            debug_assert!(toggled.is_ok());
        } else {
            let value = !self.session.buffer().done();
            self.session.set_done(value);
        }
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let palette = Palette::for_theme(self.theme);
        let [header_area, gauge_area, list_area, notes_area, footer_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(7),
            Constraint::Length(3),
        ])
        .areas(frame.area());

        self.draw_header(frame, header_area, &palette);
        self.draw_gauge(frame, gauge_area, &palette);
        self.draw_checklist(frame, list_area, &palette);
        self.draw_notes(frame, notes_area, &palette);
        self.draw_footer(frame, footer_area, &palette);

        match &self.mode {
            Mode::Jump { input } => self.draw_jump_dialog(frame, input, &palette),
            Mode::Prompt => self.draw_prompt_dialog(frame, &palette),
            _ => {}
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: ratatui::layout::Rect, palette: &Palette) {
        let title = match self.session.current_record() {
            Some(record) => {
                let position = self.session.current_index().unwrap_or(0) + 1;
                let total = self.session.table().len();
                let mut spans = vec![
                    Span::styled(format!("Case ID: {}", record.id), palette.accent),
                    Span::styled(format!("  ({position}/{total})"), palette.dim),
                ];
                if self.session.is_dirty() {
                    spans.push(Span::styled(
                        "  * unsaved edits",
                        Style::default().fg(Color::Yellow),
                    ));
                }
                Line::from(spans)
            }
            None => Line::from(Span::styled("No record loaded", palette.dim)),
        };

        let header = Paragraph::new(title)
            .style(palette.text)
            .block(Block::default().borders(Borders::ALL).title("Case Reviewer"));
        frame.render_widget(header, area);
    }

    fn draw_gauge(&self, frame: &mut Frame, area: ratatui::layout::Rect, palette: &Palette) {
        let (done, total) = self.session.done_progress();
        let ratio = if total == 0 {
            0.0
        } else {
            done as f64 / total as f64
        };
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Progress"))
            .gauge_style(palette.accent)
            .ratio(ratio)
            .label(progress_label(done, total));
        frame.render_widget(gauge, area);
    }

    fn draw_checklist(&self, frame: &mut Frame, area: ratatui::layout::Rect, palette: &Palette) {
        let buffer = self.session.buffer();
        let mut items: Vec<ListItem> = self
            .session
            .table()
            .attributes()
            .iter()
            .map(|name| {
                ListItem::new(format!("{} {}", check_mark(buffer.field(name)), name))
            })
            .collect();
        items.push(ListItem::new(format!(
            "{} Case Done",
            check_mark(buffer.done())
        )));

        let list = List::new(items)
            .style(palette.text)
            .highlight_style(palette.highlight)
            .highlight_symbol("> ")
            .block(Block::default().borders(Borders::ALL).title("Attributes"));

        let mut state = ListState::default();
        state.select(Some(self.selected.min(self.checklist_len().saturating_sub(1))));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_notes(&self, frame: &mut Frame, area: ratatui::layout::Rect, palette: &Palette) {
        let editing = matches!(self.mode, Mode::Notes);
        let title = if editing {
            "Notes - editing (Esc to finish)"
        } else {
            "Notes (n to edit)"
        };
        let style = if editing { palette.highlight } else { palette.text };

        let notes = Paragraph::new(self.session.buffer().notes().to_string())
            .style(palette.text)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(style),
            );
        frame.render_widget(notes, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: ratatui::layout::Rect, palette: &Palette) {
        let line = match &self.status {
            Some(status) => Line::from(Span::styled(status.text.clone(), status.kind.style())),
            None => Line::from(Span::styled(
                "←/→ navigate  ↑/↓ select  space toggle  n notes  g jump  s save  c copy id  o open  t theme  q quit",
                palette.dim,
            )),
        };
        let footer = Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, area);
    }

    fn draw_jump_dialog(&self, frame: &mut Frame, input: &str, palette: &Palette) {
        let area = centered_rect(40, 20, frame.area());
        frame.render_widget(Clear, area);
        let dialog = Paragraph::new(format!("{input}_"))
            .style(palette.text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Jump to Case ID")
                    .border_style(palette.accent),
            );
        frame.render_widget(dialog, area);
    }

    fn draw_prompt_dialog(&self, frame: &mut Frame, palette: &Palette) {
        let area = centered_rect(50, 25, frame.area());
        frame.render_widget(Clear, area);
        let body = vec![
            Line::from("You have unsaved changes."),
            Line::from(""),
            Line::from(vec![
                Span::styled("[y] ", palette.accent),
                Span::raw("save and continue   "),
                Span::styled("[n] ", palette.accent),
                Span::raw("discard   "),
                Span::styled("[Esc] ", palette.accent),
                Span::raw("cancel"),
            ]),
        ];
        let dialog = Paragraph::new(body)
            .style(palette.text)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Unsaved Changes")
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        frame.render_widget(dialog, area);
    }
}
