//! Integration tests for block matching and title accumulation.

use bboxgen::{
    AnnotationRecord, BoundingBox, ContinuationMode, DocumentAnnotator, DocumentMetadata, Label,
    Match, MatchOptions, MatchState, Matcher, Page, TextBlock, TextLine,
};

fn study_metadata() -> DocumentMetadata {
    DocumentMetadata::new("A Study of X", "42", ["1 INTRODUCTION", "2 RELATED WORK"])
}

fn annotate(
    meta: &DocumentMetadata,
    options: &MatchOptions,
    pages: &[Page],
) -> Vec<AnnotationRecord> {
    let mut annotator = DocumentAnnotator::new(meta, options);
    let mut records: Vec<AnnotationRecord> = Vec::new();
    for page in pages {
        annotator.annotate_page(page, &mut records).unwrap();
    }
    records
}

fn titles(records: &[AnnotationRecord]) -> Vec<&AnnotationRecord> {
    records.iter().filter(|r| r.label == Label::Title).collect()
}

#[test]
fn test_study_scenario() {
    let meta = study_metadata();
    let page = Page::new(1, 612.0, 792.0)
        .with_block(TextBlock::new(vec![
            TextLine::new("A Study of", 10.0, 20.0, 100.0, 15.0),
            TextLine::new("X", 10.0, 35.0, 30.0, 15.0),
        ]))
        .with_block(TextBlock::single("1 INTRODUCTION", 10.0, 60.0, 150.0, 15.0));

    let records = annotate(&meta, &MatchOptions::default(), &[page]);

    assert_eq!(records.len(), 2);

    assert_eq!(records[0].label, Label::Title);
    assert_eq!(records[0].content, "A Study of X");
    assert_eq!(records[0].bbox(), BoundingBox::new(10.0, 20.0, 110.0, 50.0));

    assert_eq!(records[1].label, Label::Section);
    assert_eq!(records[1].content, "1 INTRODUCTION");
    assert_eq!(records[1].bbox(), BoundingBox::new(10.0, 60.0, 160.0, 75.0));

    for record in &records {
        assert_eq!(record.page_image_name, "main-42-1.jpg");
        assert_eq!((record.page_width, record.page_height), (612.0, 792.0));
    }
}

#[test]
fn test_basic_sections_regardless_of_title_state() {
    let meta = study_metadata();
    let options = MatchOptions::default();
    let matcher = Matcher::new(&meta, &options);

    for section in bboxgen::BASIC_SECTIONS {
        let block = TextBlock::single(section, 72.0, 300.0, 80.0, 11.0);
        let expected = Match::section(BoundingBox::new(72.0, 300.0, 152.0, 311.0), section);

        let mut searching = MatchState::new();
        let matches = matcher.match_block(&block, &mut searching);
        assert!(matches.contains(&expected), "{section} before title");

        let mut done = MatchState::new();
        let title = TextBlock::single("A Study of X", 0.0, 0.0, 1.0, 1.0);
        matcher.match_block(&title, &mut done);
        assert!(done.is_title_found());

        let after = matcher.match_block(&block, &mut done);
        assert_eq!(after, vec![expected], "{section} after title");
    }
}

#[test]
fn test_abstract_block_geometry() {
    let meta = study_metadata();
    let page = Page::new(1, 612.0, 792.0)
        .with_block(TextBlock::single("A Study of X", 10.0, 20.0, 100.0, 15.0))
        .with_block(TextBlock::single("ABSTRACT", 54.0, 210.5, 61.25, 9.75));

    let records = annotate(&meta, &MatchOptions::default(), &[page]);
    let abstract_record = records.iter().find(|r| r.content == "ABSTRACT").unwrap();

    assert_eq!(abstract_record.label, Label::Section);
    assert_eq!(
        abstract_record.bbox(),
        BoundingBox::new(54.0, 210.5, 54.0 + 61.25, 210.5 + 9.75)
    );
}

#[test]
fn test_title_once_per_document() {
    let meta = study_metadata();
    let pages: Vec<Page> = (1..=4)
        .map(|n| {
            Page::new(n, 612.0, 792.0)
                .with_block(TextBlock::single("A Study of X", 10.0, 20.0, 100.0, 15.0))
        })
        .collect();

    let records = annotate(&meta, &MatchOptions::default(), &pages);

    let found = titles(&records);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].page_image_name, "main-42-1.jpg");
}

#[test]
fn test_title_state_does_not_leak_between_documents() {
    let first = DocumentMetadata::new("A Study of X", "1", Vec::<String>::new());
    let second = DocumentMetadata::new("On Y", "2", Vec::<String>::new());
    let options = MatchOptions::default();

    let first_page = Page::new(1, 612.0, 792.0)
        .with_block(TextBlock::single("A Study of X", 10.0, 20.0, 100.0, 15.0));
    let second_page = Page::new(1, 612.0, 792.0)
        .with_block(TextBlock::single("On Y", 10.0, 20.0, 40.0, 15.0));

    let mut records = annotate(&first, &options, &[first_page]);
    records.extend(annotate(&second, &options, &[second_page]));

    let found = titles(&records);
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].content, "A Study of X");
    assert_eq!(found[0].page_image_name, "main-1-1.jpg");
    assert_eq!(found[1].content, "On Y");
    assert_eq!(found[1].page_image_name, "main-2-1.jpg");
}

#[test]
fn test_title_never_found_is_not_an_error() {
    let meta = DocumentMetadata::new("A Study of X", "9", ["1 INTRODUCTION"]);
    let options = MatchOptions::default();
    let mut annotator = DocumentAnnotator::new(&meta, &options);
    let mut records: Vec<AnnotationRecord> = Vec::new();

    // Too dissimilar to pass the distance test
    let page = Page::new(1, 612.0, 792.0)
        .with_block(TextBlock::single("ABSTRACT", 10.0, 20.0, 60.0, 10.0));
    let written = annotator.annotate_page(&page, &mut records).unwrap();

    assert_eq!(written, 1);
    assert!(!annotator.title_found());
    assert!(titles(&records).is_empty());
}

#[test]
fn test_accumulated_box_never_shrinks() {
    let meta = study_metadata();
    let cases = vec![
        vec![TextLine::new("A Study of X", 5.0, 5.0, 120.0, 12.0)],
        vec![
            TextLine::new("A Study of", 5.0, 5.0, 120.0, 12.0),
            TextLine::new("X", 5.0, 17.0, 20.0, 12.0),
        ],
        vec![
            TextLine::new("A Study", 5.0, 5.0, 60.0, 12.0),
            TextLine::new("of X", 5.0, 17.0, 200.0, 14.0),
        ],
    ];

    for mode in [ContinuationMode::BlockText, ContinuationMode::CandidateText] {
        let options = MatchOptions::default().with_continuation_mode(mode);
        for lines in &cases {
            let start = lines[0].clone();
            let page = Page::new(1, 612.0, 792.0)
                .with_block(TextBlock::new(lines.clone()));
            let records = annotate(&meta, &options, &[page]);
            let title = titles(&records)[0].bbox();

            assert_eq!((title.xmin, title.ymin), (start.x, start.y));
            assert!(title.height() >= start.height);
            assert!(title.width() >= start.width);
        }
    }
}

#[test]
fn test_continuation_mode_divergence() {
    // The block as a whole is not title-like, but its second line is.
    let meta = study_metadata();
    let block = TextBlock::new(vec![
        TextLine::new("A Study", 10.0, 20.0, 60.0, 15.0),
        TextLine::new("of X", 10.0, 35.0, 40.0, 15.0),
        TextLine::new("1 INTRODUCTION", 10.0, 50.0, 150.0, 15.0),
    ]);
    let page = Page::new(1, 612.0, 792.0).with_block(block);

    let block_text = annotate(
        &meta,
        &MatchOptions::default().with_continuation_mode(ContinuationMode::BlockText),
        std::slice::from_ref(&page),
    );
    let candidate_text = annotate(
        &meta,
        &MatchOptions::default().with_continuation_mode(ContinuationMode::CandidateText),
        std::slice::from_ref(&page),
    );

    assert_eq!(
        titles(&block_text)[0].bbox(),
        BoundingBox::new(10.0, 20.0, 70.0, 35.0)
    );
    assert_eq!(
        titles(&candidate_text)[0].bbox(),
        BoundingBox::new(10.0, 20.0, 70.0, 50.0)
    );
}

#[test]
fn test_block_text_mode_merges_whole_title_block() {
    let meta = study_metadata();
    let block = TextBlock::new(vec![
        TextLine::new("A", 10.0, 20.0, 10.0, 15.0),
        TextLine::new("Study", 10.0, 35.0, 50.0, 15.0),
        TextLine::new("of X", 10.0, 50.0, 40.0, 15.0),
    ]);
    let page = Page::new(1, 612.0, 792.0).with_block(block);

    let records = annotate(&meta, &MatchOptions::default(), &[page]);
    assert_eq!(
        titles(&records)[0].bbox(),
        BoundingBox::new(10.0, 20.0, 60.0, 65.0)
    );
}

#[test]
fn test_custom_section_leading_token_tolerance() {
    let meta = study_metadata();
    let options = MatchOptions::default();
    let matcher = Matcher::new(&meta, &options);
    let mut state = MatchState::new();
    let title = TextBlock::single("A Study of X", 0.0, 0.0, 1.0, 1.0);
    matcher.match_block(&title, &mut state);

    let mut sections = |text: &str| -> Vec<String> {
        matcher
            .match_block(&TextBlock::single(text, 0.0, 0.0, 1.0, 1.0), &mut state)
            .into_iter()
            .filter(|m| m.label == Label::Section)
            .map(|m| m.content)
            .collect()
    };

    const RELATED: &str = "2 RELATED WORK";
    assert_eq!(sections("2 RELATED WORK"), [RELATED]);
    assert_eq!(sections("Conf'18 2 RELATED WORK"), [RELATED]);
    assert!(sections("as noted in 2 RELATED WORK").is_empty());
    assert!(sections("3 Paragraph 2 RELATED WORK").is_empty());
}

#[test]
fn test_repeated_section_heading_not_deduplicated() {
    let meta = study_metadata();
    let page = Page::new(2, 612.0, 792.0)
        .with_block(TextBlock::single("1 INTRODUCTION", 10.0, 60.0, 150.0, 15.0))
        .with_block(TextBlock::single("1 INTRODUCTION", 10.0, 700.0, 150.0, 15.0));

    let options = MatchOptions::default();
    let mut annotator = DocumentAnnotator::new(&meta, &options);
    let matches = annotator.match_page(&page);

    // First block also starts the title search; only section matches count here.
    let sections: Vec<_> = matches
        .iter()
        .filter(|m| m.label == Label::Section)
        .collect();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].bbox.ymin, 60.0);
    assert_eq!(sections[1].bbox.ymin, 700.0);
}

#[test]
fn test_empty_text_produces_nothing() {
    let meta = DocumentMetadata::new("A Study of X", "1", ["", "1 INTRODUCTION"]);
    let options = MatchOptions::default();
    let page = Page::new(1, 612.0, 792.0)
        .with_block(TextBlock::single("", 10.0, 20.0, 100.0, 15.0))
        .with_block(TextBlock::new(vec![
            TextLine::new("", 0.0, 0.0, 1.0, 1.0),
            TextLine::new("", 0.0, 1.0, 1.0, 1.0),
        ]))
        .with_block(TextBlock::default());

    let records = annotate(&meta, &options, &[page]);
    assert!(records.is_empty());
}
