//! Text format for saved libraries.
//!
//! ```text
//! Library Name,<name>
//! Book Name,Author,Year,Theme,<ISBN | Photo Path>
//! <title>,<author>,<year>,<theme>,<detail>
//! ```
//!
//! Fields are comma separated. A field containing a comma, a double quote or a
//! line break is wrapped in double quotes with inner quotes doubled. Lines end
//! in `\r\n`; reading accepts bare `\n` as well. Loading is all or nothing: the
//! first malformed record fails the whole file.

use std::io::{Read, Write};
use std::iter::Peekable;
use std::mem;
use std::str::Chars;

use crate::error::LibraryError;
use crate::models::{Book, Detail, Library};

/// Tag in the first column of the first line.
pub const NAME_TAG: &str = "Library Name";
/// Column headers shared by both variants; the fifth comes from [`Detail::COLUMN`].
pub const COMMON_COLUMNS: [&str; 4] = ["Book Name", "Author", "Year", "Theme"];

const FIELD_COUNT: usize = COMMON_COLUMNS.len() + 1;
const LINE_END: &str = "\r\n";

/// Render a library into its saved text form.
pub fn serialize<D: Detail>(library: &Library<D>) -> String {
    let mut out = String::new();
    write_row(&mut out, &[NAME_TAG, library.name()]);

    let [title, author, year, theme] = COMMON_COLUMNS;
    write_row(&mut out, &[title, author, year, theme, D::COLUMN]);

    for book in library.books() {
        write_row(
            &mut out,
            &[
                &book.title,
                &book.author,
                &book.year,
                &book.theme,
                book.detail.encode(),
            ],
        );
    }
    out
}

/// Parse the saved text form back into a library.
pub fn deserialize<D: Detail>(text: &str) -> Result<Library<D>, LibraryError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = RecordReader::new(text);

    let header = reader
        .next_record()?
        .filter(|record| !record.is_blank())
        .ok_or_else(|| LibraryError::format(1, "missing library name line"))?;
    let name = parse_name(header)?;

    if reader.next_record()?.is_none() {
        return Err(LibraryError::format(reader.line, "missing column header line"));
    }

    let mut library = Library::new(name);
    while let Some(record) = reader.next_record()? {
        if record.is_blank() {
            continue;
        }
        library.add_book(parse_book(record)?);
    }
    Ok(library)
}

/// Serialize `library` into `writer`.
pub fn write_library<W: Write, D: Detail>(
    mut writer: W,
    library: &Library<D>,
) -> Result<(), LibraryError> {
    writer.write_all(serialize(library).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Read everything from `reader` and parse it as a library.
pub fn read_library<R: Read, D: Detail>(mut reader: R) -> Result<Library<D>, LibraryError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    deserialize(&text)
}

fn write_row(out: &mut String, fields: &[&str]) {
    for (idx, field) in fields.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str(LINE_END);
}

fn push_field(out: &mut String, field: &str) {
    if !field.contains([',', '"', '\r', '\n']) {
        out.push_str(field);
        return;
    }
    out.push('"');
    for ch in field.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
}

fn parse_name(record: Record) -> Result<String, LibraryError> {
    let line = record.line;
    let mut fields = record.fields.into_iter();
    if fields.next().as_deref() != Some(NAME_TAG) {
        return Err(LibraryError::format(
            line,
            format!("first line must start with \"{NAME_TAG}\""),
        ));
    }
    let name = fields
        .next()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| LibraryError::format(line, "library name is missing"))?;
    if fields.next().is_some() {
        return Err(LibraryError::format(line, "unexpected data after library name"));
    }
    Ok(name)
}

fn parse_book<D: Detail>(record: Record) -> Result<Book<D>, LibraryError> {
    let line = record.line;
    let [title, author, year, theme, detail]: [String; FIELD_COUNT] =
        record.fields.try_into().map_err(|fields: Vec<String>| {
            LibraryError::format(
                line,
                format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
            )
        })?;

    Ok(Book {
        title,
        author,
        year,
        theme,
        detail: D::decode(detail),
    })
}

/// One logical CSV record and the physical line it starts on.
struct Record {
    line: usize,
    fields: Vec<String>,
    quoted: bool,
}

impl Record {
    /// An empty physical line. `""` on its own is a quoted empty field, not a
    /// blank line.
    fn is_blank(&self) -> bool {
        !self.quoted && self.fields.len() == 1 && self.fields[0].is_empty()
    }
}

enum Boundary {
    Field,
    Record,
}

struct RecordReader<'a> {
    chars: Peekable<Chars<'a>>,
    /// 1-based line of the next unread character.
    line: usize,
}

impl<'a> RecordReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
        }
    }

    fn next_record(&mut self) -> Result<Option<Record>, LibraryError> {
        if self.chars.peek().is_none() {
            return Ok(None);
        }

        let start = self.line;
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut quoted = false;

        loop {
            let after_quote = if self.chars.peek() == Some(&'"') {
                self.chars.next();
                self.read_quoted(&mut field, start)?;
                quoted = true;
                true
            } else {
                false
            };

            match self.read_unquoted(&mut field, after_quote)? {
                Boundary::Field => fields.push(mem::take(&mut field)),
                Boundary::Record => {
                    fields.push(field);
                    break;
                }
            }
        }

        Ok(Some(Record {
            line: start,
            fields,
            quoted,
        }))
    }

    /// Consume a quoted section up to and including its closing quote.
    fn read_quoted(&mut self, field: &mut String, start: usize) -> Result<(), LibraryError> {
        loop {
            match self.chars.next() {
                None => return Err(LibraryError::format(start, "unterminated quoted field")),
                Some('"') => {
                    if self.chars.peek() == Some(&'"') {
                        self.chars.next();
                        field.push('"');
                    } else {
                        return Ok(());
                    }
                }
                Some(ch) => {
                    if ch == '\n' || (ch == '\r' && self.chars.peek() != Some(&'\n')) {
                        self.line += 1;
                    }
                    field.push(ch);
                }
            }
        }
    }

    /// Consume plain characters until the next comma or line break. Right after
    /// a closing quote nothing but a separator may follow.
    fn read_unquoted(
        &mut self,
        field: &mut String,
        after_quote: bool,
    ) -> Result<Boundary, LibraryError> {
        loop {
            match self.chars.next() {
                None => return Ok(Boundary::Record),
                Some(',') => return Ok(Boundary::Field),
                Some('\n') => {
                    self.line += 1;
                    return Ok(Boundary::Record);
                }
                Some('\r') => {
                    if self.chars.peek() == Some(&'\n') {
                        self.chars.next();
                    }
                    self.line += 1;
                    return Ok(Boundary::Record);
                }
                Some(ch) if after_quote => {
                    return Err(LibraryError::format(
                        self.line,
                        format!("unexpected '{ch}' after closing quote"),
                    ));
                }
                Some(ch) => field.push(ch),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Isbn, PhotoPath};

    fn fields(text: &str) -> Vec<Vec<String>> {
        let mut reader = RecordReader::new(text);
        let mut rows = Vec::new();
        while let Some(record) = reader.next_record().unwrap() {
            rows.push(record.fields);
        }
        rows
    }

    #[test]
    fn plain_fields_are_written_bare() {
        let mut out = String::new();
        write_row(&mut out, &["a", "b c", ""]);
        assert_eq!(out, "a,b c,\r\n");
    }

    #[test]
    fn special_fields_are_quoted() {
        let mut out = String::new();
        write_row(&mut out, &["a,b", "say \"hi\"", "two\nlines"]);
        assert_eq!(out, "\"a,b\",\"say \"\"hi\"\"\",\"two\nlines\"\r\n");
    }

    #[test]
    fn reader_handles_quotes_and_line_endings() {
        let rows = fields("x,\"a,b\"\r\n\"q\"\"q\",\"multi\nline\"\nlast");
        assert_eq!(
            rows,
            vec![
                vec!["x".to_string(), "a,b".to_string()],
                vec!["q\"q".to_string(), "multi\nline".to_string()],
                vec!["last".to_string()],
            ]
        );
    }

    #[test]
    fn reader_tracks_physical_lines() {
        let mut reader = RecordReader::new("a\n\"b\nc\"\nd\n");
        let lines: Vec<usize> = std::iter::from_fn(|| reader.next_record().unwrap())
            .map(|record| record.line)
            .collect();
        assert_eq!(lines, vec![1, 2, 4]);
    }

    #[test]
    fn bare_carriage_returns_count_as_lines_inside_quotes() {
        let mut reader = RecordReader::new("a\r\"b\rc\"\rd\r\"e\r\nf\"\r\ng\r\n");
        let lines: Vec<usize> = std::iter::from_fn(|| reader.next_record().unwrap())
            .map(|record| record.line)
            .collect();
        assert_eq!(lines, vec![1, 2, 4, 5, 7]);
    }

    #[test]
    fn unterminated_quote_after_old_mac_lines_reports_its_line() {
        let text = "Library Name,L\rh\r\"multi\rline\",b,c,d,e\r\"open,b,c,d,e\r";
        let err = deserialize::<Isbn>(text).unwrap_err();
        assert!(matches!(err, LibraryError::Format { line: 5, .. }), "{err:?}");
    }

    #[test]
    fn quoted_empty_field_is_not_blank() {
        let mut reader = RecordReader::new("\"\"\n\n");
        assert!(!reader.next_record().unwrap().unwrap().is_blank());
        assert!(reader.next_record().unwrap().unwrap().is_blank());
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn text_after_closing_quote_is_rejected() {
        let mut reader = RecordReader::new("\"ab\"c,d\n");
        assert!(matches!(
            reader.next_record(),
            Err(LibraryError::Format { line: 1, .. })
        ));
    }

    #[test]
    fn unterminated_quote_reports_starting_line() {
        let text = "Library Name,L\r\nBook Name,Author,Year,Theme,ISBN\r\n\"open,b,c,d,e\r\n";
        let err = deserialize::<Isbn>(text).unwrap_err();
        assert!(matches!(err, LibraryError::Format { line: 3, .. }));
    }

    #[test]
    fn header_layout_follows_variant() {
        let isbn: Library<Isbn> = Library::new("A");
        let photo: Library<PhotoPath> = Library::new("A");
        assert_eq!(
            serialize(&isbn),
            "Library Name,A\r\nBook Name,Author,Year,Theme,ISBN\r\n"
        );
        assert_eq!(
            serialize(&photo),
            "Library Name,A\r\nBook Name,Author,Year,Theme,Photo Path\r\n"
        );
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let text = "\u{feff}Library Name,A\nBook Name,Author,Year,Theme,ISBN\n";
        let library = deserialize::<Isbn>(text).unwrap();
        assert_eq!(library.name(), "A");
    }

    #[test]
    fn wrong_tag_is_rejected() {
        let text = "Book Name,Author,Year,Theme,ISBN\nDune,Herbert,1965,SciFi,1\n";
        assert!(matches!(
            deserialize::<Isbn>(text),
            Err(LibraryError::Format { line: 1, .. })
        ));
    }

    #[test]
    fn missing_column_line_is_rejected() {
        assert!(matches!(
            deserialize::<Isbn>("Library Name,A\r\n"),
            Err(LibraryError::Format { line: 2, .. })
        ));
    }
}
