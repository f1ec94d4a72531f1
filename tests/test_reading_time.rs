use prismic_blog::{
    count_words, estimate_reading_minutes, measure_reading_time, Block, PrismicRichText,
    RichTextRenderer, Section, TextBlock,
};

fn words(n: usize) -> String {
    (0..n)
        .map(|i| format!("w{}", i))
        .collect::<Vec<_>>()
        .join(" ")
}

fn section(heading: &str, paragraphs: &[&str]) -> Section {
    Section::new(
        heading,
        paragraphs.iter().map(|p| Block::paragraph(*p)).collect(),
    )
}

/// Renderer that upper-cases text, to show the estimator uses whatever
/// renderer it is handed.
struct ShoutingRenderer;

impl RichTextRenderer for ShoutingRenderer {
    fn as_plain_text(&self, block: &Block) -> String {
        block
            .text_content()
            .map(|content| format!("{} EXTRA", content.text.to_uppercase()))
            .unwrap_or_default()
    }

    fn as_markup(&self, _blocks: &[Block]) -> String {
        String::new()
    }
}

#[test]
fn minutes_are_ceiling_of_words_over_200() {
    for (count, expected) in [(0, 0), (1, 1), (199, 1), (200, 1), (201, 2), (250, 2), (1000, 5)] {
        let sections = vec![Section::new("", vec![Block::paragraph(words(count))])];
        assert_eq!(
            estimate_reading_minutes(&sections, &PrismicRichText),
            expected,
            "{} words",
            count
        );
    }
}

#[test]
fn headings_and_all_body_blocks_are_counted() {
    let sections = vec![
        section("Primeira parte", &["um dois três", "quatro"]),
        Section::new(
            "Segunda",
            vec![
                Block::ListItem(TextBlock::plain("cinco seis")),
                Block::Preformatted(TextBlock::plain("let x = 1;")),
            ],
        ),
    ];

    // 2 + 3 + 1 + 1 + 2 + 3 ("let", "x", "1;")
    assert_eq!(measure_reading_time(&sections, &PrismicRichText).words, 12);
}

#[test]
fn estimator_uses_the_given_renderer() {
    let sections = vec![section("Intro", &["Hello world, this is a test."])];
    assert_eq!(measure_reading_time(&sections, &PrismicRichText).words, 7);
    assert_eq!(measure_reading_time(&sections, &ShoutingRenderer).words, 8);
}

#[test]
fn trait_object_renderer_is_accepted() {
    let renderer: &dyn RichTextRenderer = &PrismicRichText;
    let sections = vec![section("", &[words(401).as_str()])];
    assert_eq!(estimate_reading_minutes(&sections, renderer), 3);
}

#[test]
fn estimate_is_idempotent() {
    let sections = vec![section("Intro", &[words(321).as_str()])];
    let first = estimate_reading_minutes(&sections, &PrismicRichText);
    let second = estimate_reading_minutes(&sections, &PrismicRichText);
    assert_eq!(first, second);
    assert_eq!(first, 2);
}

#[test]
fn whitespace_only_sections_do_not_change_the_estimate() {
    let base = vec![section("Intro", &[words(200).as_str()])];
    let mut padded = base.clone();
    padded.push(section("  ", &["\u{00A0}\u{00A0}", "   "]));
    padded.insert(0, Section::new("\u{00A0}", vec![]));

    assert_eq!(
        estimate_reading_minutes(&base, &PrismicRichText),
        estimate_reading_minutes(&padded, &PrismicRichText)
    );
}

#[test]
fn count_words_edge_cases() {
    assert_eq!(count_words("a\u{00A0}b"), 2);
    assert_eq!(count_words("-- -- --"), 0);
    assert_eq!(count_words("e-mail"), 1);
    assert_eq!(count_words("tab\tseparated"), 1);
    assert_eq!(count_words("linha\nnova"), 1);
}
