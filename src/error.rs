use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    /// An I/O error occurred, either reading the source text or writing the PDF
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error("invalid layout configuration: {0}")]
    /// The page geometry, margin, or font size leaves no room to lay out text
    InvalidConfig(&'static str),

    #[error("unknown page size '{0}', expected one of Letter, Legal, A0, A1, A2, A3, A4, A5, A6")]
    /// A page size name was not part of the supported vocabulary
    UnknownPageSize(String),

    #[error("unknown standard font '{0}'")]
    /// A standard font name was not one of the built-in faces
    UnknownStandardFont(String),

    #[error("font is missing its '{0}' table")]
    /// The font parsed, but lacks a table required to embed it
    MissingFontTable(&'static str),

    #[error("no page is open to draw on")]
    /// The paginator was asked to draw a line without an open page. This indicates
    /// a bug in the paginator rather than bad input
    NoOpenPage,
}
