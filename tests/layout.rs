use txt2pdf::layout::{split_words, Fragment, LayoutConfig, LayoutEngine, LineBreaker, PAGE_BREAK};
use txt2pdf::pagesize::{self, PageOrientation};
use txt2pdf::{Document, FontMetrics, Pt, StandardFont};

const FONT: StandardFont = StandardFont::Courier;

fn letter() -> LayoutConfig {
    LayoutConfig::new(pagesize::LETTER)
        .font_size(Pt(10.0))
        .margin(Pt(40.0))
        .clone()
}

fn layout(config: LayoutConfig, text: &str) -> Document {
    LayoutEngine::new(config, &FONT)
        .expect("config is valid")
        .layout_str(text)
        .expect("can lay out text")
}

fn assert_close(actual: Pt, expected: f32) {
    assert!(
        (actual.0 - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

fn page_texts(document: &Document) -> Vec<Vec<&str>> {
    document
        .pages
        .iter()
        .map(|page| page.texts().collect())
        .collect()
}

#[test]
fn hello_world_is_one_line_on_one_page() {
    let document = layout(letter(), "hello world");
    assert_eq!(page_texts(&document), vec![vec!["hello world "]]);

    let line = &document.pages[0].lines[0];
    assert_eq!(line.coords.0, Pt(40.0));
    assert_close(line.coords.1, 752.0);
    assert_eq!(document.pages[0].width(), Pt(612.0));
    assert_eq!(document.pages[0].height(), Pt(792.0));
}

#[test]
fn empty_input_is_one_blank_page() {
    let document = layout(letter(), "");
    assert_eq!(document.pages.len(), 1);
    assert!(document.pages[0].is_empty());
    assert_eq!(document.line_count(), 0);
}

#[test]
fn form_feed_mid_word_splits_across_pages() {
    let document = layout(letter(), "abc\u{c}def");
    assert_eq!(page_texts(&document), vec![vec!["abc "], vec!["def "]]);
    assert!(document.pages[0].lines[0].fragment.forces_page_break);
    assert!(!document.pages[1].lines[0].fragment.forces_page_break);
    assert_close(document.pages[1].lines[0].coords.1, 752.0);
}

#[test]
fn line_wraps_after_the_third_word() {
    // 25 character words: three fit in 532pt at 6pt per character, a fourth does not
    let words: Vec<String> = (0..7)
        .map(|i| char::from(b'a' + i).to_string().repeat(25))
        .collect();
    let document = layout(letter(), &words.join(" "));

    let fragments: Vec<&Fragment> = document.pages[0]
        .lines
        .iter()
        .map(|line| &line.fragment)
        .collect();
    assert_eq!(fragments.len(), 3);
    assert_eq!(fragments[0].words().collect::<Vec<_>>(), words[0..3].to_vec());
    assert_eq!(fragments[1].words().collect::<Vec<_>>(), words[3..6].to_vec());
    assert_eq!(fragments[2].words().collect::<Vec<_>>(), words[6..7].to_vec());

    let max_width = letter().usable_width();
    for fragment in fragments {
        let drawn = fragment.text().trim_end();
        assert!(FONT.width(drawn, Pt(10.0)) < max_width);
    }
}

#[test]
fn overflowing_the_page_opens_a_second_one() {
    let text: Vec<String> = (0..100).map(|i| format!("line {i}")).collect();
    let document = layout(letter(), &text.join("\n"));

    assert_eq!(document.pages.len(), 2);
    assert_eq!(document.line_count(), 100);
    assert!(document
        .pages
        .iter()
        .flat_map(|page| page.lines.iter())
        .all(|line| !line.fragment.forces_page_break));

    let margin = Pt(40.0);
    let first = &document.pages[0];
    let (last, rest) = first.lines.split_last().expect("first page has lines");
    assert!(last.coords.1 < margin);
    assert!(rest.iter().all(|line| line.coords.1 >= margin));

    let second = &document.pages[1];
    assert_close(second.lines[0].coords.1, 752.0);
    assert_eq!(
        second.lines[0].text(),
        format!("line {} ", first.lines.len())
    );
}

#[test]
fn baselines_step_down_by_the_line_advance() {
    let text = lipsum::lipsum(3000);
    let config = letter();
    let advance = config.line_advance(&FONT);
    let document = layout(config, &text);
    assert!(document.pages.len() > 1);

    for page in &document.pages {
        assert_close(page.lines[0].coords.1, 752.0);
        for pair in page.lines.windows(2) {
            let step = pair[0].coords.1 - pair[1].coords.1;
            assert!((step.0 - advance.0).abs() < 1e-3);
        }
    }
}

#[test]
fn forced_breaks_always_end_their_page() {
    let text = [
        "first page",
        "\u{c}",
        "second page\u{c}third page",
        "still third",
        "a\u{c}\u{c}b",
    ]
    .join("\n");
    let document = layout(letter(), &text);

    for page in &document.pages {
        if let Some((_, rest)) = page.lines.split_last() {
            assert!(rest.iter().all(|line| !line.fragment.forces_page_break));
        }
    }
    assert_eq!(
        page_texts(&document),
        vec![
            vec!["first page ", ""],
            vec!["second page "],
            vec!["third page ", "still third ", "a "],
            vec![""],
            vec!["b "],
        ]
    );
}

#[test]
fn trailing_form_feed_leaves_an_empty_last_page() {
    let document = layout(letter(), "the end\u{c}\n");
    assert_eq!(document.pages.len(), 2);
    assert!(document.pages[1].is_empty());
}

#[test]
fn greedy_wrap_is_maximal_and_within_budget() {
    let max_width = Pt(200.0);
    let size = Pt(10.0);
    let text = lipsum::lipsum(400);

    for line in text.split('\n') {
        let fragments: Vec<Fragment> = LineBreaker::new(line, max_width, &FONT, size).collect();

        for fragment in &fragments {
            let words: Vec<&str> = fragment.words().collect();
            if let Some((last, accepted)) = words.split_last() {
                if !accepted.is_empty() {
                    let prefix: String = accepted.iter().map(|word| format!("{word} ")).collect();
                    assert!(FONT.width(&format!("{prefix} {last}"), size) < max_width);
                }
            }
        }

        for pair in fragments.windows(2) {
            if pair[0].forces_page_break {
                continue;
            }
            let next = pair[1].words().next().expect("fragment has a word");
            let projected = FONT.width(&format!("{} {}", pair[0].text(), next), size);
            assert!(projected >= max_width);
        }

        let words: Vec<&str> = fragments.iter().flat_map(Fragment::words).collect();
        assert_eq!(words, split_words(line));
    }
}

#[test]
fn words_survive_wrapping_in_order() {
    let line = "one  two three\u{c}four five six seven eight nine ten";
    let fragments: Vec<Fragment> = LineBreaker::new(line, Pt(60.0), &FONT, Pt(10.0)).collect();
    let words: Vec<&str> = fragments.iter().flat_map(Fragment::words).collect();
    let expected: Vec<&str> = split_words(line)
        .into_iter()
        .flat_map(|word| word.split(PAGE_BREAK))
        .collect();
    assert_eq!(words, expected);
}

#[test]
fn landscape_widens_the_lines() {
    let text = lipsum::lipsum(200);
    let portrait = layout(letter(), &text);
    let landscape = layout(letter().landscape(true).clone(), &text);

    assert_eq!(
        (landscape.pages[0].width(), landscape.pages[0].height()),
        pagesize::LETTER.landscape()
    );
    assert!(landscape.line_count() < portrait.line_count());
    assert_close(landscape.pages[0].lines[0].coords.1, 572.0);
}

#[test]
fn named_page_sizes_lay_out() {
    for (name, size) in pagesize::NAMED_SIZES {
        let config = LayoutConfig::default()
            .page_size_named(&name.to_lowercase())
            .expect("known page size")
            .clone();
        let document = layout(config, "hello");
        assert_eq!(document.pages[0].width(), size.0);
    }
}

#[test]
fn proportional_fonts_wrap_later_than_courier() {
    let line = "illicit millimetre filling ".repeat(12);
    let max_width = letter().usable_width();
    let wrap = |font: StandardFont| -> Vec<Fragment> {
        LineBreaker::new(&line, max_width, &font, Pt(10.0)).collect()
    };

    let courier = wrap(StandardFont::Courier);
    let helvetica = wrap(StandardFont::Helvetica);
    assert!(helvetica.len() < courier.len());
    assert!(helvetica[0].words().count() > courier[0].words().count());

    let document = LayoutEngine::new(letter(), &StandardFont::Helvetica)
        .expect("config is valid")
        .layout_str(&line)
        .expect("can lay out text");
    assert_eq!(document.line_count(), helvetica.len());
}
