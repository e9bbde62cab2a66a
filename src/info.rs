use chrono::{DateTime, Datelike, FixedOffset, Local, Timelike};
use pdf_writer::{Date, Pdf, Ref, TextStr};
use std::path::Path;

/// Metadata for the PDF's document information dictionary
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Info {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    /// When the document was made. The time of writing is used if unset.
    pub created: Option<DateTime<FixedOffset>>,
}

impl Info {
    pub fn new() -> Info {
        Info::default()
    }

    /// Info describing a conversion of the text file at `path`: the file name becomes
    /// the title and the full path the subject
    pub fn from_source<P: AsRef<Path>>(path: P) -> Info {
        let path = path.as_ref();
        Info {
            title: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            subject: Some(format!("Converted from {}", path.display())),
            ..Info::default()
        }
    }

    pub fn title<S: Into<String>>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn author<S: Into<String>>(&mut self, author: S) -> &mut Self {
        self.author = Some(author.into());
        self
    }

    pub fn created(&mut self, created: DateTime<FixedOffset>) -> &mut Self {
        self.created = Some(created);
        self
    }

    pub(crate) fn write(&self, id: Ref, page_count: usize, writer: &mut Pdf) {
        let mut info = writer.document_info(id);
        if let Some(title) = &self.title {
            info.title(TextStr(title));
        }
        if let Some(author) = &self.author {
            info.author(TextStr(author));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject));
        }

        let producer = format!(
            "{} v{} ({page_count} page{})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            if page_count == 1 { "" } else { "s" }
        );
        info.producer(TextStr(&producer));

        let created = self.created.unwrap_or_else(|| Local::now().fixed_offset());
        info.creation_date(pdf_date(&created));
    }
}

/// Convert a timestamp into a PDF date, keeping its UTC offset
fn pdf_date(when: &DateTime<FixedOffset>) -> Date {
    let offset_minutes = when.offset().local_minus_utc() / 60;
    Date::new(when.year().clamp(0, 9999) as u16)
        .month(when.month() as u8)
        .day(when.day() as u8)
        .hour(when.hour() as u8)
        .minute(when.minute() as u8)
        .second(when.second().min(59) as u8)
        .utc_offset_hour((offset_minutes / 60) as i8)
        .utc_offset_minute((offset_minutes % 60).unsigned_abs() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_to_string(info: &Info, page_count: usize) -> String {
        let mut pdf = Pdf::new();
        info.write(Ref::new(1), page_count, &mut pdf);
        String::from_utf8_lossy(&pdf.finish()).into_owned()
    }

    #[test]
    fn source_path_names_the_document() {
        let info = Info::from_source(Path::new("notes/todo.txt"));
        assert_eq!(info.title.as_deref(), Some("todo.txt"));
        assert_eq!(info.subject.as_deref(), Some("Converted from notes/todo.txt"));
        assert_eq!(info.author, None);
        assert_eq!(info.created, None);
    }

    #[test]
    fn dates_keep_their_offset() {
        let created = DateTime::parse_from_rfc3339("2024-01-02T03:04:05-05:30")
            .expect("valid timestamp");
        let written = write_to_string(Info::new().created(created), 3);
        assert!(written.contains("/CreationDate (D:20240102030405-05'30)"));
        assert!(written.contains("(3 pages)"));

        let utc = DateTime::parse_from_rfc3339("2024-06-30T23:59:59Z").expect("valid timestamp");
        let written = write_to_string(Info::new().created(utc), 1);
        assert!(written.contains("/CreationDate (D:20240630235959Z)"));
        assert!(written.contains("(1 page)"));
    }

    #[test]
    fn unset_fields_are_left_out() {
        let written = write_to_string(&Info::new(), 1);
        assert!(!written.contains("/Title"));
        assert!(!written.contains("/Author"));
        assert!(written.contains("/Producer"));
        assert!(written.contains("/CreationDate"));
    }
}
