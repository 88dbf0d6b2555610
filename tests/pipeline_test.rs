//! End-to-end tests for structure recovery and emission.

use mdshape::model::{units_from_lines, units_from_text, BlockKind, ContentBlock, TableBlock};
use mdshape::normalize::normalize;
use mdshape::{
    emit_markdown, recover_structure, DocumentModel, HeadingKeywords, Pipeline, RawUnit,
    RecoverOptions,
};

fn heading_levels(doc: &DocumentModel) -> Vec<u8> {
    doc.headings().map(|(level, _)| level).collect()
}

fn sample_inputs() -> Vec<Vec<RawUnit>> {
    vec![
        units_from_lines(["# Title", "", "Intro para.", "", "- a", "- b", "", "Next."]),
        units_from_lines(["商业需求文档", "产品属性", "", "风险分析", "", "宏观行业趋势", ""]),
        units_from_lines(["# Top", "#### Deep", "", "Short", "", "A much longer heading line here", ""]),
        units_from_lines(["Intro", "", "Body line.", "", "Intro", "", "Features", ""]),
        units_from_lines(["| a | b | c |", "| 1 |", "| 1 | 2 | 3 | 4 |", "", "- x", "", "* y"]),
        units_from_text("产品需求文档\n\n版本历史\n\n功能说明\n\n- 睡眠模式\n- 运动\n"),
        units_from_lines(["| a | b |", "--- | ---", "| 1 | 2 |", "", "x | y", ":-- | --:", "3 | 4"]),
        units_from_lines(["---", "", "Preface", "", "Body text.", "---", "Tail."]),
        vec![
            RawUnit::new("Guide", 0).with_style("Title"),
            RawUnit::new("Scope", 1).with_style("Heading 3"),
            RawUnit::new("Key Facts", 2).with_emphasis(true, true),
            RawUnit::new("Body text.", 3),
        ],
    ]
}

#[test]
fn test_mixed_blocks_recovered() {
    let units = units_from_lines(["# Title", "", "Intro para.", "", "- a", "- b", "", "Next."]);
    let doc = recover_structure(&units, None);

    assert_eq!(
        doc.blocks,
        vec![
            ContentBlock::heading(1, "Title"),
            ContentBlock::paragraph("Intro para."),
            ContentBlock::list(false, ["a", "b"]),
            ContentBlock::paragraph("Next."),
        ]
    );
    assert_eq!(
        emit_markdown(&doc),
        "# Title\n\nIntro para.\n\n- a\n- b\n\nNext.\n"
    );
}

#[test]
fn test_adjacent_duplicate_heading_dropped() {
    let doc = recover_structure(&units_from_lines(["息屏显", "息屏显"]), None);
    assert_eq!(doc.count(BlockKind::Heading), 1);
    assert_eq!(doc.blocks.len(), 1);
}

#[test]
fn test_profile_keyword_levels() {
    let doc = recover_structure(&units_from_lines(["商业需求文档", "产品属性"]), None);
    assert_eq!(
        doc.blocks,
        vec![
            ContentBlock::heading(1, "商业需求文档"),
            ContentBlock::heading(2, "产品属性"),
        ]
    );
}

#[test]
fn test_table_separator_synthesized() {
    let doc = recover_structure(&units_from_lines(["| Name | Value |", "| rate | 25 Hz |"]), None);

    assert_eq!(
        doc.blocks,
        vec![ContentBlock::Table(TableBlock::from_rows(vec![
            vec!["Name".to_string(), "Value".to_string()],
            vec!["rate".to_string(), "25 Hz".to_string()],
        ]))]
    );
    assert_eq!(
        emit_markdown(&doc),
        "| Name | Value |\n| --- | --- |\n| rate | 25 Hz |\n"
    );
}

#[test]
fn test_ocr_list_continuation() {
    let units = units_from_lines(["- measures heart rate", "all day", "", "Battery lasts a week."]);
    let doc = Pipeline::ocr().recover(&units, None).into_model();

    assert_eq!(
        doc.blocks,
        vec![
            ContentBlock::list(false, ["measures heart rate all day"]),
            ContentBlock::paragraph("Battery lasts a week."),
        ]
    );
}

#[test]
fn test_separator_without_outer_pipes() {
    let doc = recover_structure(&units_from_lines(["| a | b |", "--- | ---", "| 1 | 2 |"]), None);

    assert_eq!(
        doc.blocks,
        vec![ContentBlock::Table(TableBlock::from_rows(vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["1".to_string(), "2".to_string()],
        ]))]
    );
    assert_eq!(emit_markdown(&doc), "| a | b |\n| --- | --- |\n| 1 | 2 |\n");
}

#[test]
fn test_borderless_table() {
    let doc = recover_structure(&units_from_lines(["Mode | Hours", ":-- | --:", "sleep | 8", "run | 1"]), None);

    let ContentBlock::Table(table) = &doc.blocks[0] else {
        panic!("expected a table, got {:?}", doc.blocks);
    };
    assert_eq!(doc.blocks.len(), 1);
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.rows[2], vec!["run".to_string(), "1".to_string()]);
}

#[test]
fn test_empty_input_is_not_an_error() {
    let doc = recover_structure(&[], Some("Untitled"));
    assert!(doc.blocks.is_empty());
    assert_eq!(emit_markdown(&doc), "");
}

/// Lines seen in OCR dumps, word-processor exports and hand-written markdown.
const LINE_POOL: &[&str] = &[
    "",
    "",
    "",
    "# Product Guide",
    "## Setup",
    "#### Deep Detail",
    "Overview",
    "Market Overview",
    "A rather long section heading text",
    "商业需求文档",
    "产品需求文档",
    "产品属性",
    "风险分析",
    "宏观行业趋势",
    "息屏显",
    "- first item",
    "* second item",
    "1. numbered step",
    "2) another step",
    "wrapped continuation text",
    "| a | b | c |",
    "| --- | --- | --- |",
    "--- | ---",
    "| 1 | 2 |",
    "x | y",
    "---",
    "> quoted remark",
    "```",
    "let x = 1;",
    "The device measures heart rate all day long.",
    "采用ppg传感器和ble连接。",
    "Short.",
];

/// Deterministic documents assembled from [`LINE_POOL`].
fn generated_inputs() -> Vec<Vec<RawUnit>> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut docs = Vec::new();

    for _ in 0..300 {
        let mut lines = Vec::new();
        state = xorshift(state);
        let len = 3 + (state % 16) as usize;
        for _ in 0..len {
            state = xorshift(state);
            lines.push(LINE_POOL[(state % LINE_POOL.len() as u64) as usize]);
        }
        docs.push(units_from_lines(lines));
    }
    docs
}

fn xorshift(mut x: u64) -> u64 {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}

fn all_inputs() -> Vec<Vec<RawUnit>> {
    let mut inputs = sample_inputs();
    inputs.extend(generated_inputs());
    inputs
}

#[test]
fn test_heading_monotonicity() {
    for units in all_inputs() {
        for pipeline in [Pipeline::new(), Pipeline::ocr()] {
            let doc = pipeline.recover(&units, None).into_model();
            let levels = heading_levels(&doc);
            for pair in levels.windows(2) {
                assert!(pair[1] <= pair[0] + 1, "skipped level in {:?}", levels);
            }
        }
    }
}

#[test]
fn test_normalization_idempotent() {
    for units in all_inputs() {
        let once = recover_structure(&units, None).blocks;
        let twice = normalize(once.clone());
        assert_eq!(twice, once);
        assert_eq!(normalize(twice.clone()), twice);
    }
}

#[test]
fn test_table_shape_invariant() {
    for units in all_inputs() {
        let doc = recover_structure(&units, None);
        for block in &doc.blocks {
            if let ContentBlock::Table(table) = block {
                assert!(table.is_rectangular());
                assert!(table.rows.iter().all(|r| r.len() == table.rows[0].len()));
            }
        }
    }
}

#[test]
fn test_list_non_empty_invariant() {
    for units in all_inputs() {
        let doc = recover_structure(&units, None);
        for block in &doc.blocks {
            if let ContentBlock::List(list) = block {
                assert!(!list.items.is_empty());
                assert!(list.items.iter().all(|i| !i.trim().is_empty()));
            }
        }
    }
}

#[test]
fn test_no_adjacent_duplicate_headings() {
    for units in sample_inputs() {
        let doc = recover_structure(&units, None);
        for pair in doc.blocks.windows(2) {
            if let (
                ContentBlock::Heading { text: a, .. },
                ContentBlock::Heading { text: b, .. },
            ) = (&pair[0], &pair[1])
            {
                assert_ne!(a.to_lowercase(), b.to_lowercase());
            }
        }
    }
}

#[test]
fn test_emitted_markdown_shape() {
    for units in sample_inputs() {
        let markdown = emit_markdown(&recover_structure(&units, None));
        assert!(markdown.ends_with('\n'));
        assert!(!markdown.ends_with("\n\n"));
        assert!(markdown.lines().all(|l| l == l.trim_end()));
        assert!(!markdown.contains("\n\n\n"));
    }
}

#[test]
fn test_mode_list_promoted_to_ordered() {
    let doc = recover_structure(
        &units_from_text("产品需求文档\n\n版本历史\n\n功能说明\n\n- 睡眠模式\n- 运动\n"),
        None,
    );
    assert!(doc
        .blocks
        .contains(&ContentBlock::list(true, ["睡眠模式", "运动"])));
}

#[test]
fn test_repeated_heading_after_page_break_removed() {
    let doc = recover_structure(
        &units_from_lines(["# Report", "", "Intro", "", "Body line.", "", "Intro", "", "More body."]),
        None,
    );
    let headings: Vec<&str> = doc.headings().map(|(_, t)| t).collect();
    assert_eq!(headings, vec!["Report", "Intro"]);
    assert_eq!(doc.count(BlockKind::Paragraph), 2);
}

#[test]
fn test_terminology_casing() {
    let doc = recover_structure(
        &units_from_lines(["| sensor | link |", "| --- | --- |", "| ppg | ble |"]),
        None,
    );
    assert_eq!(
        doc.blocks[0],
        ContentBlock::Table(TableBlock::from_rows(vec![
            vec!["sensor".to_string(), "link".to_string()],
            vec!["PPG".to_string(), "BLE".to_string()],
        ]))
    );
}

#[test]
fn test_parallel_documents_are_independent() {
    use std::thread;

    let handles: Vec<_> = sample_inputs()
        .into_iter()
        .map(|units| thread::spawn(move || emit_markdown(&recover_structure(&units, None))))
        .collect();
    let parallel: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let sequential: Vec<String> = sample_inputs()
        .iter()
        .map(|units| emit_markdown(&recover_structure(units, None)))
        .collect();
    assert_eq!(parallel, sequential);
}

#[test]
fn test_heading_keyword_table() {
    let units = units_from_lines([
        "第一章 硬件",
        "",
        "传感器配置",
        "采样率为 25 Hz。",
        "",
        "LED 驱动",
        "",
        "电流 20 mA。",
    ]);
    let options = RecoverOptions::default().with_heading_keywords(HeadingKeywords::builtin());
    let doc = Pipeline::new()
        .with_recover_options(options)
        .recover(&units, None)
        .into_model();

    let headings: Vec<(u8, &str)> = doc.headings().collect();
    assert_eq!(headings, vec![(1, "第一章 硬件"), (2, "传感器配置"), (3, "LED 驱动")]);
    assert_eq!(doc.count(BlockKind::Paragraph), 2);
}
