use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Book, BookInput, Detail};

/// Single-line text prompt, used for the library name and the save file name.
#[derive(Default, Clone)]
pub(crate) struct TextForm {
    pub(crate) value: String,
    /// Last rejection, shown under the input until the next submit.
    pub(crate) error: Option<String>,
}

impl TextForm {
    pub(crate) fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            error: None,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    pub(crate) fn build_line(&self, field_name: &str) -> Line<'static> {
        let (display, style) = if self.value.is_empty() {
            ("<required>".to_string(), Style::default().fg(Color::DarkGray))
        } else {
            (self.value.clone(), Style::default().fg(Color::Yellow))
        };
        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    pub(crate) fn value_len(&self) -> usize {
        self.value.chars().count()
    }
}

/// Fields of the book form, in the order they are visited with Tab.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
    Year,
    Theme,
    Detail,
}

impl BookField {
    pub(crate) const ALL: [BookField; 5] = [
        BookField::Title,
        BookField::Author,
        BookField::Year,
        BookField::Theme,
        BookField::Detail,
    ];

    fn index(self) -> usize {
        match self {
            BookField::Title => 0,
            BookField::Author => 1,
            BookField::Year => 2,
            BookField::Theme => 3,
            BookField::Detail => 4,
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub(crate) fn label<D: Detail>(self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Year => "Year",
            BookField::Theme => "Theme",
            BookField::Detail => D::LABEL,
        }
    }
}

/// Form state for adding a book or editing one in place. When editing,
/// `current` holds the existing values and is shown as placeholders: a field
/// left empty keeps its value.
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    /// Typed text, indexed by [`BookField`] order.
    values: [String; 5],
    /// Values of the book being edited; `None` while adding.
    current: Option<[String; 5]>,
    /// Field receiving keystrokes.
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

impl BookForm {
    pub(crate) fn for_edit<D: Detail>(book: &Book<D>) -> Self {
        Self {
            current: Some([
                book.title.clone(),
                book.author.clone(),
                book.year.clone(),
                book.theme.clone(),
                book.detail.encode().to_string(),
            ]),
            ..Self::default()
        }
    }

    pub(crate) fn is_edit(&self) -> bool {
        self.current.is_some()
    }

    pub(crate) fn next_field(&mut self) {
        self.active = self.active.next();
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = self.active.previous();
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.values[self.active.index()].push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.values[self.active.index()].pop();
    }

    pub(crate) fn value(&self, field: BookField) -> &str {
        &self.values[field.index()]
    }

    pub(crate) fn value_len(&self, field: BookField) -> usize {
        self.value(field).chars().count()
    }

    pub(crate) fn to_input(&self) -> BookInput {
        let [title, author, year, theme, detail] = self.values.clone();
        BookInput {
            title,
            author,
            year,
            theme,
            detail,
        }
    }

    fn placeholder<D: Detail>(&self, field: BookField) -> String {
        if let Some(current) = &self.current {
            let existing = &current[field.index()];
            return if existing.is_empty() {
                "<keep: none>".to_string()
            } else {
                format!("<keep: {existing}>")
            };
        }
        if field == BookField::Detail && !D::REQUIRED {
            "<optional>".to_string()
        } else {
            "<required>".to_string()
        }
    }

    pub(crate) fn build_line<D: Detail>(&self, field: BookField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            self.placeholder::<D>(field)
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label::<D>())),
            Span::styled(display, style),
        ])
    }
}

/// State for confirming the removal of the book at a position.
pub(crate) struct ConfirmRemove {
    pub(crate) index: usize,
    /// Shown in the prompt so the person sees what goes.
    pub(crate) title: String,
}

/// Asked when leaving a library that has unsaved changes.
pub(crate) struct ConfirmLeave {
    /// Quit the program on "y" instead of returning to the home menu.
    pub(crate) exit_app: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Isbn, PhotoPath};

    #[test]
    fn tab_order_wraps_both_ways() {
        let mut form = BookForm::default();
        for _ in 0..5 {
            form.next_field();
        }
        assert_eq!(form.active, BookField::Title);
        form.previous_field();
        assert_eq!(form.active, BookField::Detail);
    }

    #[test]
    fn typed_values_land_in_active_field() {
        let mut form = BookForm::default();
        "Dune".chars().for_each(|ch| {
            form.push_char(ch);
        });
        form.next_field();
        "Herbert".chars().for_each(|ch| {
            form.push_char(ch);
        });
        form.backspace();
        assert!(!form.push_char('\n'));

        let input = form.to_input();
        assert_eq!(input.title, "Dune");
        assert_eq!(input.author, "Herber");
        assert!(input.year.is_empty());
    }

    #[test]
    fn edit_form_starts_empty_with_existing_placeholders() {
        let book = Book::new("Dune", "Herbert", "1965", "SciFi", Isbn("42".into()));
        let form = BookForm::for_edit(&book);
        assert!(form.is_edit());
        assert_eq!(form.to_input(), BookInput::default());
        assert_eq!(form.placeholder::<Isbn>(BookField::Year), "<keep: 1965>");
    }

    #[test]
    fn optional_detail_placeholder() {
        let form = BookForm::default();
        assert_eq!(form.placeholder::<PhotoPath>(BookField::Detail), "<optional>");
        assert_eq!(form.placeholder::<Isbn>(BookField::Detail), "<required>");
        assert_eq!(BookField::Detail.label::<PhotoPath>(), "Photo");
    }
}
