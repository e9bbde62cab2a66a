//! Convert a text file into a PDF.
//!
//! ```text
//! cargo run --example text-to-pdf -- [options] <output.pdf> <input.txt>
//!
//!   -fontSize <n>        font size in points (default: 10)
//!   -landscape           lay pages out in landscape
//!   -pageSize <name>     Letter, Legal, A0, A1, A2, A3, A4, A5, A6 (default: Letter)
//!   -standardFont <name> one of the 14 standard PDF fonts, e.g. Times-Roman or Courier
//!                        (default: Helvetica)
//!   -ttf <file>          a TrueType font to embed instead of a standard font
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use txt2pdf::layout::{LayoutConfig, LayoutEngine};
use txt2pdf::{DocumentFont, Error, Font, Info, Pt, StandardFont};

struct Options {
    config: LayoutConfig,
    font: DocumentFont,
    output: PathBuf,
    input: PathBuf,
}

fn parse_args() -> Result<Options, String> {
    let mut config = LayoutConfig::default();
    let mut font = DocumentFont::Standard(StandardFont::Helvetica);
    let mut paths: Vec<PathBuf> = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().ok_or(format!("{name} needs a value"));
        match arg.as_str() {
            "-fontSize" => {
                let size: f32 = value("-fontSize")?
                    .parse()
                    .map_err(|e| format!("bad font size: {e}"))?;
                config.font_size(Pt(size));
            }
            "-landscape" => {
                config.landscape(true);
            }
            "-pageSize" => {
                config
                    .page_size_named(&value("-pageSize")?)
                    .map_err(|e| e.to_string())?;
            }
            "-standardFont" => {
                let standard = value("-standardFont")?
                    .parse::<StandardFont>()
                    .map_err(|e| e.to_string())?;
                font = DocumentFont::Standard(standard);
            }
            "-ttf" => {
                let bytes = std::fs::read(value("-ttf")?).map_err(|e| e.to_string())?;
                font = DocumentFont::Embedded(Font::load(bytes).map_err(|e| e.to_string())?);
            }
            _ => paths.push(PathBuf::from(arg)),
        }
    }

    match <[PathBuf; 2]>::try_from(paths) {
        Ok([output, input]) => Ok(Options {
            config,
            font,
            output,
            input,
        }),
        Err(_) => Err("usage: text-to-pdf [options] <output.pdf> <input.txt>".to_string()),
    }
}

fn convert(options: Options) -> Result<usize, Error> {
    let Options {
        config,
        font,
        output,
        input,
    } = options;

    let engine = LayoutEngine::new(config, &font)?;
    let mut document = engine.layout(BufReader::new(File::open(&input)?))?;
    document.set_info(Info::from_source(&input));
    let page_count = document.pages.len();

    document.write(&font, BufWriter::new(File::create(&output)?))?;
    Ok(page_count)
}

fn main() -> ExitCode {
    let options = match parse_args() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    match convert(options) {
        Ok(page_count) => {
            println!("wrote {page_count} page(s)");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error converting text to PDF: {e}");
            ExitCode::from(4)
        }
    }
}
