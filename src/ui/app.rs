use std::mem;
use std::path::{Path, PathBuf};

use anyhow::Result;
use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap,
};
use ratatui::Frame;
use tracing::{info, warn};

use crate::models::{create_library, Book, Detail, Library};
use crate::store::{list_library_files, load_library, save_library, FILE_EXTENSION};

use super::forms::{BookField, BookForm, ConfirmLeave, ConfirmRemove, TextForm};
use super::helpers::{centered_rect, cursor_in, key_hint, surface_error};
use super::screens::{FilePicker, HomeScreen, LibraryScreen, MenuItem};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows skipped by PageUp / PageDown in the book table.
const PAGE_STEP: isize = 10;

/// High-level navigation states.
enum Screen {
    Home(HomeScreen),
    Library(LibraryScreen),
}

/// Fine-grained modes scoped to the current screen.
enum Mode {
    Normal,
    NamingLibrary(TextForm),
    ChoosingFile(FilePicker),
    AddingBook(BookForm),
    EditingBook { index: usize, form: BookForm },
    ConfirmRemove(ConfirmRemove),
    SavingLibrary(TextForm),
    ConfirmLeave(ConfirmLeave),
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

/// Central application state shared across the TUI. At most one library is
/// open at a time; going back to the start menu drops it.
pub struct App<D: Detail> {
    library_dir: PathBuf,
    library: Option<Library<D>>,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
    dirty: bool,
    file_name: Option<String>,
}

impl<D: Detail> App<D> {
    pub fn new(library_dir: impl Into<PathBuf>) -> Self {
        Self {
            library_dir: library_dir.into(),
            library: None,
            screen: Screen::Home(HomeScreen::default()),
            mode: Mode::Normal,
            status: None,
            dirty: false,
            file_name: None,
        }
    }

    /// The open library, if any.
    pub fn library(&self) -> Option<&Library<D>> {
        self.library.as_ref()
    }

    /// Position of the highlighted book, when a non-empty library is open.
    pub fn selected(&self) -> Option<usize> {
        match (&self.screen, &self.library) {
            (Screen::Library(view), Some(library)) if !library.is_empty() => Some(view.selected),
            _ => None,
        }
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn library_dir(&self) -> &Path {
        &self.library_dir
    }

    /// Whether the start menu is showing.
    pub fn at_home(&self) -> bool {
        matches!(self.screen, Screen::Home(_))
    }

    /// Drop the open library, unsaved changes included, and go back to the
    /// start menu.
    pub fn reset(&mut self) {
        if let Some(library) = self.library.take() {
            info!(name = library.name(), "library closed");
        }
        self.screen = Screen::Home(HomeScreen::default());
        self.mode = Mode::Normal;
        self.status = None;
        self.dirty = false;
        self.file_name = None;
    }

    /// Feed one key press through the state machine. Returns `true` once the
    /// user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::NamingLibrary(form) => self.handle_name_library(code, form),
            Mode::ChoosingFile(picker) => self.handle_choose_file(code, picker),
            Mode::AddingBook(form) => self.handle_add_book(code, form),
            Mode::EditingBook { index, form } => self.handle_edit_book(code, index, form),
            Mode::ConfirmRemove(confirm) => self.handle_confirm_remove(code, confirm),
            Mode::SavingLibrary(form) => self.handle_save_library(code, form),
            Mode::ConfirmLeave(confirm) => self.handle_confirm_leave(code, confirm, &mut exit),
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Home(ref mut home) => {
                let item = match code {
                    KeyCode::Up => {
                        home.move_selection(-1);
                        None
                    }
                    KeyCode::Down => {
                        home.move_selection(1);
                        None
                    }
                    KeyCode::Enter => Some(home.current()),
                    KeyCode::Char('c') | KeyCode::Char('C') => Some(MenuItem::Create),
                    KeyCode::Char('l') | KeyCode::Char('L') => Some(MenuItem::Load),
                    KeyCode::Char('q') | KeyCode::Esc => Some(MenuItem::Exit),
                    _ => None,
                };

                match item {
                    Some(MenuItem::Create) => {
                        self.clear_status();
                        Ok(Mode::NamingLibrary(TextForm::default()))
                    }
                    Some(MenuItem::Load) => Ok(self.open_file_picker()),
                    Some(MenuItem::Exit) => {
                        *exit = true;
                        Ok(Mode::Normal)
                    }
                    None => Ok(Mode::Normal),
                }
            }
            Screen::Library(ref mut view) => {
                let len = self.library.as_ref().map_or(0, Library::len);
                match code {
                    KeyCode::Up => view.move_selection(-1, len),
                    KeyCode::Down => view.move_selection(1, len),
                    KeyCode::PageUp => view.move_selection(-PAGE_STEP, len),
                    KeyCode::PageDown => view.move_selection(PAGE_STEP, len),
                    KeyCode::Home => view.selected = 0,
                    KeyCode::End => view.select_last(len),
                    KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('+') => {
                        self.clear_status();
                        return Ok(Mode::AddingBook(BookForm::default()));
                    }
                    KeyCode::Char('e') | KeyCode::Char('E') => {
                        let index = view.selected;
                        return match self.library.as_ref().and_then(|lib| lib.book(index)) {
                            Some(book) => {
                                let form = BookForm::for_edit(book);
                                self.clear_status();
                                Ok(Mode::EditingBook { index, form })
                            }
                            None => {
                                self.set_status("No book selected!", StatusKind::Error);
                                Ok(Mode::Normal)
                            }
                        };
                    }
                    KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('-') | KeyCode::Delete => {
                        let index = view.selected;
                        return match self.library.as_ref().and_then(|lib| lib.book(index)) {
                            Some(book) => {
                                let title = book.title.clone();
                                self.clear_status();
                                Ok(Mode::ConfirmRemove(ConfirmRemove { index, title }))
                            }
                            None => {
                                self.set_status("No book selected!", StatusKind::Error);
                                Ok(Mode::Normal)
                            }
                        };
                    }
                    KeyCode::Char('s') | KeyCode::Char('S') => {
                        self.clear_status();
                        let suggested = self
                            .file_name
                            .clone()
                            .or_else(|| self.library.as_ref().map(|lib| lib.name().to_string()))
                            .unwrap_or_default();
                        return Ok(Mode::SavingLibrary(TextForm::with_value(suggested)));
                    }
                    KeyCode::Enter => {
                        let index = view.selected;
                        self.open_book_link(index);
                    }
                    KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => {
                        if self.dirty {
                            return Ok(Mode::ConfirmLeave(ConfirmLeave { exit_app: false }));
                        }
                        self.reset();
                    }
                    KeyCode::Char('q') => {
                        if self.dirty {
                            return Ok(Mode::ConfirmLeave(ConfirmLeave { exit_app: true }));
                        }
                        *exit = true;
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
        }
    }

    fn handle_name_library(&mut self, code: KeyCode, mut form: TextForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Create library cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match create_library::<D>(&form.value) {
                Ok(library) => {
                    info!(name = library.name(), "library created");
                    let message = format!("Library '{}' created!", library.name());
                    self.open_library(library, None);
                    self.set_status(message, StatusKind::Info);
                    return Mode::Normal;
                }
                Err(err) => {
                    let message = err.to_string();
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::NamingLibrary(form)
    }

    fn handle_choose_file(&mut self, code: KeyCode, mut picker: FilePicker) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Load library cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Up => picker.move_selection(-1),
            KeyCode::Down => picker.move_selection(1),
            KeyCode::Char(ch) => {
                if let Some(digit) = ch.to_digit(10) {
                    if !picker.select_number(digit as usize) {
                        self.set_status("Invalid choice!", StatusKind::Error);
                    }
                }
            }
            KeyCode::Enter => {
                if let Some(file_name) = picker.current().map(str::to_string) {
                    let path = self.library_dir.join(&file_name);
                    match load_library::<D>(&path) {
                        Ok(library) => {
                            let message = format!("Library '{}' loaded!", library.name());
                            self.open_library(library, Some(file_name));
                            self.set_status(message, StatusKind::Info);
                            return Mode::Normal;
                        }
                        Err(err) => {
                            warn!(path = %path.display(), error = %err, "library load failed");
                            self.set_status(surface_error(&err), StatusKind::Error);
                        }
                    }
                }
            }
            _ => {}
        }
        Mode::ChoosingFile(picker)
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Add book cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match Book::<D>::from_input(&form.to_input()) {
                Ok(book) => {
                    let message = format!("Book '{}' added!", book.title);
                    self.add_book(book);
                    self.set_status(message, StatusKind::Info);
                    return Mode::Normal;
                }
                Err(err) => {
                    let message = format!("All fields must be filled out! {err}");
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::AddingBook(form)
    }

    fn handle_edit_book(&mut self, code: KeyCode, index: usize, mut form: BookForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Edit cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let Some(library) = self.library.as_mut() else {
                    return Mode::Normal;
                };
                match library.edit_book(index, &form.to_input()) {
                    Ok(book) => {
                        info!(index, title = %book.title, "book edited");
                        let message = format!("Book '{}' updated.", book.title);
                        self.dirty = true;
                        self.set_status(message, StatusKind::Info);
                        return Mode::Normal;
                    }
                    Err(err) => {
                        let message = err.to_string();
                        form.error = Some(message.clone());
                        self.set_status(message, StatusKind::Error);
                    }
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::EditingBook { index, form }
    }

    fn handle_confirm_remove(&mut self, code: KeyCode, confirm: ConfirmRemove) -> Mode {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.remove_book(confirm.index);
                Mode::Normal
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.set_status("Removal cancelled.", StatusKind::Info);
                Mode::Normal
            }
            _ => Mode::ConfirmRemove(confirm),
        }
    }

    fn handle_save_library(&mut self, code: KeyCode, mut form: TextForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Save cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let Some(library) = self.library.as_ref() else {
                    return Mode::Normal;
                };
                match save_library(&self.library_dir, &form.value, library) {
                    Ok(path) => {
                        self.dirty = false;
                        self.file_name = path
                            .file_name()
                            .and_then(|name| name.to_str())
                            .map(str::to_string);
                        self.set_status(
                            format!("Library saved to '{}'!", path.display()),
                            StatusKind::Info,
                        );
                        return Mode::Normal;
                    }
                    Err(err) => {
                        warn!(error = %err, "library save failed");
                        let message = surface_error(&err);
                        form.error = Some(message.clone());
                        self.set_status(message, StatusKind::Error);
                    }
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::SavingLibrary(form)
    }

    fn handle_confirm_leave(&mut self, code: KeyCode, confirm: ConfirmLeave, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if confirm.exit_app {
                    *exit = true;
                } else {
                    self.reset();
                }
                Mode::Normal
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Mode::Normal,
            _ => Mode::ConfirmLeave(confirm),
        }
    }

    fn open_file_picker(&mut self) -> Mode {
        match list_library_files(&self.library_dir) {
            Ok(files) if files.is_empty() => {
                self.set_status("No saved libraries found!", StatusKind::Info);
                Mode::Normal
            }
            Ok(files) => {
                self.clear_status();
                Mode::ChoosingFile(FilePicker::new(files))
            }
            Err(err) => {
                self.set_status(surface_error(&err), StatusKind::Error);
                Mode::Normal
            }
        }
    }

    fn open_library(&mut self, library: Library<D>, file_name: Option<String>) {
        self.library = Some(library);
        self.screen = Screen::Library(LibraryScreen::default());
        self.dirty = false;
        self.file_name = file_name;
    }

    fn add_book(&mut self, book: Book<D>) {
        let Some(library) = self.library.as_mut() else {
            return;
        };
        info!(title = %book.title, position = library.len(), "book added");
        library.add_book(book);
        let len = library.len();
        if let Screen::Library(view) = &mut self.screen {
            view.select_last(len);
        }
        self.dirty = true;
    }

    fn remove_book(&mut self, index: usize) {
        let Some(library) = self.library.as_mut() else {
            return;
        };
        match library.remove_book(index) {
            Ok(book) => {
                info!(index, title = %book.title, "book removed");
                let len = library.len();
                if let Screen::Library(view) = &mut self.screen {
                    view.clamp(len);
                }
                self.dirty = true;
                self.set_status(format!("Book '{}' removed!", book.title), StatusKind::Info);
            }
            Err(err) => self.set_status(err.to_string(), StatusKind::Error),
        }
    }

    fn open_book_link(&mut self, index: usize) {
        let Some(book) = self.library.as_ref().and_then(|lib| lib.book(index)) else {
            self.set_status("No book selected!", StatusKind::Error);
            return;
        };
        let title = book.title.clone();
        match book.detail.link() {
            None => self.set_status(
                format!("'{title}' has nothing to open."),
                StatusKind::Error,
            ),
            Some(link) => match open_link(&link) {
                Ok(()) => self.set_status(format!("Opened {link}."), StatusKind::Info),
                Err(err) => {
                    warn!(%link, error = %err, "failed to open link");
                    self.set_status(format!("Failed to open {link}: {err}"), StatusKind::Error);
                }
            },
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Home(home) => self.draw_home(frame, content_area, home),
            Screen::Library(view) => self.draw_library(frame, content_area, view),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::NamingLibrary(form) => {
                self.draw_text_form(frame, area, "Create Library", "Library name", form)
            }
            Mode::SavingLibrary(form) => {
                self.draw_text_form(frame, area, "Save Library", "File name", form)
            }
            Mode::ChoosingFile(picker) => self.draw_file_picker(frame, area, picker),
            Mode::AddingBook(form) => self.draw_book_form(frame, area, "Add Book", form),
            Mode::EditingBook { form, .. } => self.draw_book_form(frame, area, "Edit Book", form),
            Mode::ConfirmRemove(confirm) => self.draw_confirm_remove(frame, area, confirm),
            Mode::ConfirmLeave(confirm) => self.draw_confirm_leave(frame, area, confirm),
            Mode::Normal => {}
        }
    }

    fn draw_home(&self, frame: &mut Frame, area: Rect, home: &HomeScreen) {
        let block = Block::default()
            .title("Library Management System")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), area);

        let menu_area = centered_rect(40, 50, block.inner(area));
        let items: Vec<ListItem> = MenuItem::ALL
            .iter()
            .map(|item| ListItem::new(item.label()))
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(home.selected));
        frame.render_stateful_widget(list, menu_area, &mut list_state);
    }

    fn draw_library(&self, frame: &mut Frame, area: Rect, view: &LibraryScreen) {
        let Some(library) = &self.library else {
            return;
        };

        let marker = if self.dirty { " *" } else { "" };
        let block = Block::default()
            .title(format!(
                "Library: {} ({} books){marker}",
                library.name(),
                library.len()
            ))
            .borders(Borders::ALL);

        if library.is_empty() {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                "No books yet. Press [a] to add one.",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block)
            .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        }

        let header = Row::new(
            ["Title", "Author", "Year", "Theme", D::COLUMN]
                .into_iter()
                .map(|title| Cell::from(title).style(Style::default().add_modifier(Modifier::BOLD))),
        );

        let rows = library.books().iter().map(|book| {
            Row::new(vec![
                Cell::from(book.title.clone()),
                Cell::from(book.author.clone()),
                Cell::from(book.year.clone()),
                Cell::from(book.theme.clone()),
                Cell::from(book.detail.encode().to_string()),
            ])
        });

        let widths = [
            Constraint::Percentage(30),
            Constraint::Percentage(20),
            Constraint::Length(6),
            Constraint::Percentage(15),
            Constraint::Fill(1),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut table_state = TableState::default().with_selected(Some(view.selected));
        frame.render_stateful_widget(table, area, &mut table_state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let hints: Vec<[Span<'static>; 2]> = match (&self.screen, &self.mode) {
            (_, Mode::NamingLibrary(_)) | (_, Mode::SavingLibrary(_)) => {
                vec![key_hint("[Enter]", "Confirm"), key_hint("[Esc]", "Cancel")]
            }
            (_, Mode::ChoosingFile(_)) => vec![
                key_hint("[↑↓/1-9]", "Choose"),
                key_hint("[Enter]", "Load"),
                key_hint("[Esc]", "Cancel"),
            ],
            (_, Mode::AddingBook(_)) | (_, Mode::EditingBook { .. }) => vec![
                key_hint("[Tab]", "Next field"),
                key_hint("[Enter]", "Save"),
                key_hint("[Esc]", "Cancel"),
            ],
            (_, Mode::ConfirmRemove(_)) | (_, Mode::ConfirmLeave(_)) => {
                vec![key_hint("[Y]", "Confirm"), key_hint("[N/Esc]", "Cancel")]
            }
            (Screen::Home(_), Mode::Normal) => vec![
                key_hint("[↑↓]", "Navigate"),
                key_hint("[Enter]", "Select"),
                key_hint("[C]", "Create"),
                key_hint("[L]", "Load"),
                key_hint("[Q]", "Exit"),
            ],
            (Screen::Library(_), Mode::Normal) => vec![
                key_hint("[A]", "Add"),
                key_hint("[E]", "Edit"),
                key_hint("[D]", "Remove"),
                key_hint("[S]", "Save"),
                key_hint("[Enter]", "Open"),
                key_hint("[Esc]", "Back"),
                key_hint("[Q]", "Quit"),
            ],
        };
        Line::from(hints.into_iter().flatten().collect::<Vec<_>>())
    }

    fn draw_text_form(&self, frame: &mut Frame, area: Rect, title: &str, label: &str, form: &TextForm) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![form.build_line(label), Line::from("")];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else if title == "Save Library" {
            lines.push(Line::from(Span::styled(
                format!("Saved as .{FILE_EXTENSION} in {}", self.library_dir.display()),
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let prefix = format!("{label}: ").chars().count();
        frame.set_cursor_position(cursor_in(inner, prefix + form.value_len(), 0));
    }

    fn draw_file_picker(&self, frame: &mut Frame, area: Rect, picker: &FilePicker) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Load Library")
            .borders(Borders::ALL);

        let items: Vec<ListItem> = picker
            .files
            .iter()
            .enumerate()
            .map(|(idx, file)| ListItem::new(format!("{}. {file}", idx + 1)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(picker.selected));
        frame.render_stateful_widget(list, popup_area, &mut list_state);
    }

    fn draw_book_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &BookForm) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = BookField::ALL
            .iter()
            .map(|field| form.build_line::<D>(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else if form.is_edit() {
            lines.push(Line::from(Span::styled(
                "Leave a field empty to keep its current value.",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let row = BookField::ALL
            .iter()
            .position(|field| *field == form.active)
            .unwrap_or(0);
        let prefix = format!("{}: ", form.active.label::<D>()).chars().count();
        frame.set_cursor_position(cursor_in(
            inner,
            prefix + form.value_len(form.active),
            row,
        ));
    }

    fn draw_confirm_remove(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmRemove) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Removal")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Remove '{}' from the library?", confirm.title)),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_confirm_leave(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmLeave) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Unsaved Changes")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let action = if confirm.exit_app { "Quit" } else { "Leave" };
        let lines = vec![
            Line::from(format!("{action} without saving? Unsaved changes will be lost.")),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to discard or N / Esc to go back.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
