// cnpii-core/tests/image_pipeline_tests.rs
//! End-to-end image-mode tests: fragment merging, per-run analysis, and
//! projection back to pixel regions.

use cnpii_core::{
    AnalyzerConfig, Category, ExtractedEntity, ImageRedactor, NoopExtractor, PiiAnalyzer,
    PixelRegion, PresetExtractor, TextFragment,
};

fn fragment(text: &str, left: i32, top: i32, width: i32, height: i32) -> TextFragment {
    TextFragment {
        text: text.to_string(),
        left,
        top,
        width,
        height,
        confidence: 0.9,
    }
}

fn default_analyzer() -> PiiAnalyzer {
    PiiAnalyzer::new(AnalyzerConfig::default()).unwrap()
}

#[test]
fn test_bank_card_split_across_fragments() {
    // "6222021234567890128" split into three OCR tokens on one line. No
    // single fragment is card-shaped; only the merged run validates.
    let fragments = [
        fragment("62220212", 100, 50, 120, 22),
        fragment("34567890", 235, 52, 120, 22),
        fragment("128", 370, 49, 45, 22),
    ];
    let analyzer = default_analyzer();
    let redactor = ImageRedactor::new(&analyzer);
    let findings = redactor.redact(&fragments, &NoopExtractor);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].category, Category::BankCard);
    assert!((findings[0].score - 0.95).abs() < f64::EPSILON);
    // Union of all three boxes.
    assert_eq!(
        findings[0].region,
        PixelRegion { left: 100, top: 49, right: 415, bottom: 74 }
    );
}

#[test]
fn test_unmergeable_fragments_produce_nothing() {
    // Same digit groups but on separate visual lines: no run reaches 16
    // digits, so nothing validates.
    let fragments = [
        fragment("62220212", 100, 50, 120, 22),
        fragment("34567890", 100, 120, 120, 22),
        fragment("128", 100, 190, 45, 22),
    ];
    let analyzer = default_analyzer();
    let redactor = ImageRedactor::new(&analyzer);
    assert!(redactor.redact(&fragments, &NoopExtractor).is_empty());
}

#[test]
fn test_span_projects_onto_contributing_boxes_only() {
    // A phone number and a label merge into one run; the phone span must
    // map back to the number's boxes, not the label's.
    let fragments = [
        fragment("电话：", 100, 50, 60, 22),
        fragment("138123", 170, 50, 70, 22),
        fragment("45678", 250, 51, 60, 22),
    ];
    let analyzer = default_analyzer();
    let redactor = ImageRedactor::new(&analyzer);
    let findings = redactor.redact(&fragments, &NoopExtractor);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].category, Category::Phone);
    // The label box (left=100..160) contributed no span bytes.
    assert_eq!(
        findings[0].region,
        PixelRegion { left: 170, top: 50, right: 310, bottom: 73 }
    );
}

#[test]
fn test_multiple_lines_yield_separate_regions() {
    let fragments = [
        fragment("手机号13812345678", 80, 40, 220, 24),
        fragment("邮箱user@163.com", 80, 110, 200, 24),
    ];
    let analyzer = default_analyzer();
    let redactor = ImageRedactor::new(&analyzer);
    let findings = redactor.redact(&fragments, &NoopExtractor);

    assert_eq!(findings.len(), 2);
    // Ordered top-to-bottom.
    assert_eq!(findings[0].category, Category::Phone);
    assert_eq!(findings[1].category, Category::Email);
    assert!(findings[0].region.bottom <= findings[1].region.top);
}

#[test]
fn test_extractor_entities_resolve_within_runs() {
    let fragments = [
        fragment("收件人张三", 100, 50, 110, 22),
        fragment("电话13812345678", 100, 100, 180, 22),
    ];
    let analyzer = default_analyzer();
    let redactor = ImageRedactor::new(&analyzer);
    let extractor = PresetExtractor::new(vec![ExtractedEntity::new("姓名", "张三", 0.8)]);
    let findings = redactor.redact(&fragments, &extractor);

    assert_eq!(findings.len(), 2);
    assert!(findings.iter().any(|f| f.category == Category::Name));
    assert!(findings.iter().any(|f| f.category == Category::Phone));
}

#[test]
fn test_id_priority_holds_inside_merged_run() {
    // A checksum-valid ID split across two fragments: the merged run must
    // produce one ID_CARD region and no phone/bank region.
    let fragments = [
        fragment("110105194", 100, 50, 130, 22),
        fragment("912310 02X", 245, 50, 130, 22),
    ];
    let analyzer = default_analyzer();
    let redactor = ImageRedactor::new(&analyzer);
    let findings = redactor.redact(&fragments, &NoopExtractor);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].category, Category::IdCard);
    assert_eq!(
        findings[0].region,
        PixelRegion { left: 100, top: 50, right: 375, bottom: 72 }
    );
}

#[test]
fn test_empty_inputs() {
    let analyzer = default_analyzer();
    let redactor = ImageRedactor::new(&analyzer);
    assert!(redactor.redact(&[], &NoopExtractor).is_empty());

    let blank = [fragment("", 0, 0, 10, 10)];
    assert!(redactor.redact(&blank, &NoopExtractor).is_empty());
}
