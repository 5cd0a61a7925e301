//! Domain models for a library of books. These types stay light-weight data
//! holders: the codec turns them into text, the UI renders them, and neither
//! layer needs to know how the other works.
//!
//! A library is addressed purely by position. There is no stable book id, so
//! any index a caller holds is only valid until the next add or remove.

use std::fmt;

use crate::error::LibraryError;

/// The variant-specific fifth column of a book. A library stores books of a
/// single variant so that every saved file has one fixed column layout.
pub trait Detail: Clone + fmt::Debug + PartialEq + Eq {
    /// Header text written in the column line of a saved library.
    const COLUMN: &'static str;
    /// Label used next to the input in forms.
    const LABEL: &'static str;
    /// Whether a new book must supply a value.
    const REQUIRED: bool;

    /// Parse user input. Empty input is either rejected or treated as absent,
    /// depending on [`Detail::REQUIRED`].
    fn parse_input(raw: &str) -> Result<Self, LibraryError>;

    /// Rebuild the value from a token read back from a saved file.
    fn decode(token: String) -> Self;

    /// Token written into a saved file. Absent values encode as `""`.
    fn encode(&self) -> &str;

    /// Something worth handing to the system opener, if the value points
    /// anywhere.
    fn link(&self) -> Option<String>;
}

/// Identifier-bearing variant. Any text is accepted; hyphens and spaces are
/// kept as typed and only stripped when building a lookup link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Isbn(pub String);

impl Detail for Isbn {
    const COLUMN: &'static str = "ISBN";
    const LABEL: &'static str = "ISBN";
    const REQUIRED: bool = true;

    fn parse_input(raw: &str) -> Result<Self, LibraryError> {
        if raw.trim().is_empty() {
            return Err(LibraryError::Validation { field: "ISBN" });
        }
        Ok(Isbn(raw.to_string()))
    }

    fn decode(token: String) -> Self {
        Isbn(token)
    }

    fn encode(&self) -> &str {
        &self.0
    }

    fn link(&self) -> Option<String> {
        let digits: String = self
            .0
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .collect();
        if digits.is_empty() {
            None
        } else {
            Some(format!("https://openlibrary.org/isbn/{digits}"))
        }
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ISBN: {}", self.0)
    }
}

/// Photo-bearing variant. The path is optional, and an empty path is the same
/// thing as no path: there is no way to hold `Some("")`, because a saved file
/// cannot tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhotoPath(Option<String>);

impl PhotoPath {
    /// A book without a photo.
    pub fn none() -> Self {
        Self(None)
    }

    /// A photo at `path`. An empty path means no photo.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        if path.is_empty() {
            Self(None)
        } else {
            Self(Some(path))
        }
    }

    pub fn path(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl Detail for PhotoPath {
    const COLUMN: &'static str = "Photo Path";
    const LABEL: &'static str = "Photo";
    const REQUIRED: bool = false;

    fn parse_input(raw: &str) -> Result<Self, LibraryError> {
        if raw.trim().is_empty() {
            Ok(Self::none())
        } else {
            Ok(Self::new(raw))
        }
    }

    fn decode(token: String) -> Self {
        Self::new(token)
    }

    fn encode(&self) -> &str {
        self.0.as_deref().unwrap_or("")
    }

    fn link(&self) -> Option<String> {
        self.0.clone()
    }
}

impl fmt::Display for PhotoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(path) => write!(f, "Photo: {path}"),
            None => write!(f, "Photo: none"),
        }
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book<D> {
    /// Shown as "Book Name" in saved files and the table header.
    pub title: String,
    pub author: String,
    /// Kept as text; "c. 1600" is as valid as "1965".
    pub year: String,
    /// Free-form genre or subject. Libraries do not group by it.
    pub theme: String,
    /// ISBN or photo path, depending on the library's variant.
    pub detail: D,
}

impl<D: Detail> Book<D> {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
        theme: impl Into<String>,
        detail: D,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
            theme: theme.into(),
            detail,
        }
    }

    /// Build a book from form input. Every text field is required; the detail
    /// field is required only for variants that say so. Values are stored as
    /// typed, whitespace included; trimming only decides whether a field is
    /// empty.
    pub fn from_input(input: &BookInput) -> Result<Self, LibraryError> {
        let title = required(&input.title, "Title")?;
        let author = required(&input.author, "Author")?;
        let year = required(&input.year, "Year")?;
        let theme = required(&input.theme, "Theme")?;
        let detail = D::parse_input(&input.detail)?;
        Ok(Self {
            title,
            author,
            year,
            theme,
            detail,
        })
    }

    /// Overwrite the fields that carry a non-empty value in `input`. Empty
    /// values keep what is already there, including the photo path: clearing
    /// it is not something an edit can do.
    pub fn apply(&mut self, input: &BookInput) -> Result<(), LibraryError> {
        let detail = if input.detail.trim().is_empty() {
            None
        } else {
            Some(D::parse_input(&input.detail)?)
        };

        replace_if_present(&mut self.title, &input.title);
        replace_if_present(&mut self.author, &input.author);
        replace_if_present(&mut self.year, &input.year);
        replace_if_present(&mut self.theme, &input.theme);
        if let Some(detail) = detail {
            self.detail = detail;
        }
        Ok(())
    }
}

impl<D: Detail + fmt::Display> fmt::Display for Book<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' by {} ({}), Theme: {}, {}",
            self.title, self.author, self.year, self.theme, self.detail
        )
    }
}

/// Raw text for the five book fields, as typed into a form. Used both to add a
/// book (all required) and to edit one (empty means keep).
///
/// A value made only of whitespace counts as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub year: String,
    pub theme: String,
    /// Raw text for the variant column, parsed by [`Detail::parse_input`].
    pub detail: String,
}

fn required(value: &str, field: &'static str) -> Result<String, LibraryError> {
    if value.trim().is_empty() {
        Err(LibraryError::Validation { field })
    } else {
        Ok(value.to_string())
    }
}

fn replace_if_present(slot: &mut String, value: &str) {
    if !value.trim().is_empty() {
        *slot = value.to_string();
    }
}

/// A named, ordered collection of books.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library<D> {
    /// Written on the first line of the saved file. Not the file name.
    name: String,
    /// Insertion order; positions shift left on removal.
    books: Vec<Book<D>>,
}

impl<D: Detail> Library<D> {
    /// Create an empty library. The name is taken as given; callers that take
    /// it from a person should go through [`create_library`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            books: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn books(&self) -> &[Book<D>] {
        &self.books
    }

    pub fn book(&self, index: usize) -> Option<&Book<D>> {
        self.books.get(index)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Append a book at the end.
    pub fn add_book(&mut self, book: Book<D>) {
        self.books.push(book);
    }

    /// Remove the book at `index`, shifting later books one position earlier.
    pub fn remove_book(&mut self, index: usize) -> Result<Book<D>, LibraryError> {
        if index < self.books.len() {
            Ok(self.books.remove(index))
        } else {
            Err(self.not_found(index))
        }
    }

    /// Partially update the book at `index` in place. On error the book is
    /// left untouched.
    pub fn edit_book(&mut self, index: usize, input: &BookInput) -> Result<&Book<D>, LibraryError> {
        let len = self.books.len();
        let book = self
            .books
            .get_mut(index)
            .ok_or(LibraryError::NotFound { index, len })?;
        book.apply(input)?;
        Ok(book)
    }

    fn not_found(&self, index: usize) -> LibraryError {
        LibraryError::NotFound {
            index,
            len: self.books.len(),
        }
    }
}

impl<D> fmt::Display for Library<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Library: {}, Total Books: {}",
            self.name,
            self.books.len()
        )
    }
}

/// Create a library from a name a person typed. Surrounding whitespace is
/// dropped and an empty name is rejected.
pub fn create_library<D: Detail>(name: &str) -> Result<Library<D>, LibraryError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LibraryError::Validation {
            field: "Library name",
        });
    }
    Ok(Library::new(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str) -> Book<Isbn> {
        Book::new(title, "Author", "2000", "Theme", Isbn(format!("isbn-{title}")))
    }

    fn library(titles: &[&str]) -> Library<Isbn> {
        let mut library = Library::new("Shelf");
        for title in titles {
            library.add_book(book(title));
        }
        library
    }

    fn titles(library: &Library<Isbn>) -> Vec<&str> {
        library.books().iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn remove_shifts_later_books_left() {
        let mut library = library(&["a", "b", "c", "d"]);
        let removed = library.remove_book(1).unwrap();
        assert_eq!(removed.title, "b");
        assert_eq!(titles(&library), vec!["a", "c", "d"]);
    }

    #[test]
    fn remove_last_and_only() {
        let mut library = library(&["only"]);
        assert_eq!(library.remove_book(0).unwrap().title, "only");
        assert!(library.is_empty());
    }

    #[test]
    fn remove_out_of_range_leaves_library_alone() {
        let mut library = library(&["a", "b"]);
        let before = library.clone();
        let err = library.remove_book(2).unwrap_err();
        assert!(matches!(err, LibraryError::NotFound { index: 2, len: 2 }));
        assert_eq!(library, before);

        let mut empty: Library<Isbn> = Library::new("Empty");
        assert!(matches!(
            empty.remove_book(0),
            Err(LibraryError::NotFound { index: 0, len: 0 })
        ));
    }

    #[test]
    fn add_appends_without_touching_existing() {
        let mut library = library(&["a", "b"]);
        let before: Vec<Book<Isbn>> = library.books().to_vec();
        library.add_book(book("c"));
        assert_eq!(&library.books()[..2], &before[..]);
        assert_eq!(library.book(2).unwrap().title, "c");
    }

    #[test]
    fn duplicates_are_allowed() {
        let mut library = library(&["same"]);
        library.add_book(book("same"));
        assert_eq!(library.len(), 2);
        assert_eq!(library.book(0), library.book(1));
    }

    #[test]
    fn partial_edit_keeps_untouched_fields() {
        let mut library = library(&["a"]);
        let input = BookInput {
            year: "1999".into(),
            ..BookInput::default()
        };
        let edited = library.edit_book(0, &input).unwrap().clone();
        assert_eq!(edited.title, "a");
        assert_eq!(edited.author, "Author");
        assert_eq!(edited.year, "1999");
        assert_eq!(edited.theme, "Theme");
        assert_eq!(edited.detail, Isbn("isbn-a".into()));
    }

    #[test]
    fn whitespace_only_edit_values_keep_existing() {
        let mut library = library(&["a"]);
        let input = BookInput {
            title: "   ".into(),
            detail: " ".into(),
            ..BookInput::default()
        };
        library.edit_book(0, &input).unwrap();
        assert_eq!(library.book(0).unwrap(), &book("a"));
    }

    #[test]
    fn edit_out_of_range_is_not_found() {
        let mut library = library(&["a"]);
        let err = library.edit_book(3, &BookInput::default()).unwrap_err();
        assert!(matches!(err, LibraryError::NotFound { index: 3, len: 1 }));
    }

    #[test]
    fn photo_edit_never_clears_path() {
        let mut library: Library<PhotoPath> = Library::new("Photos");
        library.add_book(Book::new(
            "t",
            "a",
            "y",
            "th",
            PhotoPath::new("cover.jpg"),
        ));

        library.edit_book(0, &BookInput::default()).unwrap();
        assert_eq!(library.book(0).unwrap().detail.path(), Some("cover.jpg"));

        let input = BookInput {
            detail: "new.png".into(),
            ..BookInput::default()
        };
        library.edit_book(0, &input).unwrap();
        assert_eq!(library.book(0).unwrap().detail.path(), Some("new.png"));
    }

    #[test]
    fn from_input_requires_every_text_field() {
        let input = BookInput {
            title: "Dune".into(),
            author: "Herbert".into(),
            year: "".into(),
            theme: "SciFi".into(),
            detail: "123".into(),
        };
        let err = Book::<Isbn>::from_input(&input).unwrap_err();
        assert!(matches!(err, LibraryError::Validation { field: "Year" }));
    }

    #[test]
    fn from_input_detail_requirement_depends_on_variant() {
        let input = BookInput {
            title: "Dune".into(),
            author: "Herbert".into(),
            year: "1965".into(),
            theme: "SciFi".into(),
            detail: String::new(),
        };
        assert!(matches!(
            Book::<Isbn>::from_input(&input),
            Err(LibraryError::Validation { field: "ISBN" })
        ));
        let photo = Book::<PhotoPath>::from_input(&input).unwrap();
        assert_eq!(photo.detail, PhotoPath::none());
    }

    #[test]
    fn empty_photo_path_is_no_photo() {
        assert_eq!(PhotoPath::new(""), PhotoPath::none());
        assert_eq!(PhotoPath::new("").path(), None);
        assert_eq!(PhotoPath::decode(String::new()), PhotoPath::none());
        assert_eq!(PhotoPath::new(" ").path(), Some(" "));
    }

    #[test]
    fn entered_values_are_stored_as_typed() {
        let input = BookInput {
            title: " padded ".into(),
            author: "Herbert".into(),
            year: "1965 ".into(),
            theme: "SciFi".into(),
            detail: " 123 ".into(),
        };
        let book = Book::<Isbn>::from_input(&input).unwrap();
        assert_eq!(book.title, " padded ");
        assert_eq!(book.year, "1965 ");
        assert_eq!(book.detail, Isbn(" 123 ".into()));

        let mut library = library(&["a"]);
        let edit = BookInput {
            author: "  Le Guin ".into(),
            ..BookInput::default()
        };
        library.edit_book(0, &edit).unwrap();
        assert_eq!(library.book(0).unwrap().author, "  Le Guin ");
    }

    #[test]
    fn create_library_rejects_blank_names() {
        assert!(matches!(
            create_library::<Isbn>("  "),
            Err(LibraryError::Validation { .. })
        ));
        let library = create_library::<Isbn>(" Fiction ").unwrap();
        assert_eq!(library.name(), "Fiction");
        assert!(library.is_empty());
    }

    #[test]
    fn display_matches_summary_format() {
        let library = library(&["Dune"]);
        assert_eq!(library.to_string(), "Library: Shelf, Total Books: 1");
        assert_eq!(
            library.book(0).unwrap().to_string(),
            "'Dune' by Author (2000), Theme: Theme, ISBN: isbn-Dune"
        );
    }

    #[test]
    fn isbn_link_points_at_open_library() {
        assert_eq!(
            Isbn("978-0-441-17271-9".into()).link().as_deref(),
            Some("https://openlibrary.org/isbn/9780441172719")
        );
        assert_eq!(Isbn("--".into()).link(), None);
    }
}
