//! Content stream rendering for laid out pages.

use crate::font::DocumentFont;
use crate::page::PlacedFragment;
use crate::units::Pt;
use std::io::Write;

/// Renders a page's lines to a PDF content stream, drawing each line at its baseline
/// with the document font (`/F0`). Lines with no text are skipped.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_lines(
    lines: &[PlacedFragment],
    font: &DocumentFont,
    font_size: Pt,
) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();

    let mut drawn = lines.iter().filter(|line| !line.text().is_empty()).peekable();
    if drawn.peek().is_none() {
        return Ok(content);
    }

    write!(content, "q\n")?;
    write!(content, "/F0 {} Tf\n", font_size)?;

    for line in drawn {
        let (x, y) = line.coords;
        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", x, y)?;
        write!(content, "<{}> Tj\n", font.encode_hex(line.text()))?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(content)
}
