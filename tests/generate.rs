//! End-to-end tests: JSON in, DOCX out, read back through the DOCX reader.

use quizdoc::{
    generate, read_docx, read_docx_bytes, Block, Document, ErrorKind, GenerateOptions,
    SchemaVariant, Table,
};

const LEARNING_UNIT: &str = r#"[
  {
    "LU": "Fractions",
    "LUID": "LU-7",
    "LO": "Compare fractions",
    "LOID": 12,
    "QuestionType": "MCQ",
    "DifficultyLevel": "Easy",
    "BloomsLevel": "Understand",
    "QuestionID": "Q1",
    "TitleStemPrompt": "Which is larger?",
    "Options": [
      {"Option": "A", "Text": "1/2", "TypeOfDistractor": "Correct", "DistractorRationale": "Half is larger"},
      {"Option": "B", "Text": "1/3"}
    ],
    "Hint": "Draw both",
    "Solution": "1/2"
  },
  {
    "QuestionID": "Q2",
    "Options": []
  }
]"#;

fn tables(doc: &Document) -> Vec<&Table> {
    doc.tables().collect()
}

fn texts(table: &Table) -> Vec<Vec<String>> {
    table.rows.iter().map(|r| r.texts()).collect()
}

#[test]
fn test_three_tables_and_a_break_per_question() {
    let bytes = generate(LEARNING_UNIT, &GenerateOptions::default()).unwrap();
    let doc = read_docx_bytes(&bytes).unwrap();

    assert_eq!(doc.table_count(), 6);
    assert_eq!(doc.page_break_count(), 2);

    let kinds: Vec<&str> = doc
        .blocks()
        .map(|b| match b {
            Block::Table(_) => "table",
            Block::PageBreak => "break",
            Block::Paragraph(_) => "paragraph",
        })
        .collect();
    assert_eq!(
        kinds,
        ["table", "table", "table", "break", "table", "table", "table", "break"]
    );
}

#[test]
fn test_metadata_table_rows() {
    let bytes = generate(LEARNING_UNIT, &GenerateOptions::default()).unwrap();
    let doc = read_docx_bytes(&bytes).unwrap();
    let tables = tables(&doc);

    let rows = texts(tables[0]);
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[0], ["LU", "Fractions"]);
    assert_eq!(rows[3], ["LOID", "12"]);
    assert_eq!(rows[6], ["Cognitive Dimension (Bloom's Level)", "Understand"]);
    assert_eq!(rows[8], ["Title (Stem and Prompt)", "Which is larger?"]);
}

#[test]
fn test_options_table_order_and_placeholders() {
    let bytes = generate(LEARNING_UNIT, &GenerateOptions::default()).unwrap();
    let doc = read_docx_bytes(&bytes).unwrap();
    let options = tables(&doc)[1];

    assert_eq!(options.header_rows().len(), 1);
    assert_eq!(
        options.rows[0].texts(),
        ["Option", "Text", "Type of Distractor", "Distractor Rationale"]
    );
    assert_eq!(
        options.rows[1].texts(),
        ["A", "1/2", "Correct", "Half is larger"]
    );
    assert_eq!(options.rows[2].texts(), ["B", "1/3", "N/A", "N/A"]);
}

#[test]
fn test_bottom_table_and_missing_fields() {
    let bytes = generate(LEARNING_UNIT, &GenerateOptions::default()).unwrap();
    let doc = read_docx_bytes(&bytes).unwrap();
    let tables = tables(&doc);

    assert_eq!(texts(tables[2]), [["Hint", "Draw both"], ["Solution", "1/2"]]);

    // Second question: only the header row, placeholders everywhere else
    assert_eq!(tables[4].row_count(), 1);
    assert_eq!(texts(tables[5]), [["Hint", "N/A"], ["Solution", "N/A"]]);
    assert_eq!(texts(tables[3])[0], ["LU", "N/A"]);
    assert_eq!(texts(tables[3])[7], ["Question ID", "Q2"]);
}

#[test]
fn test_custom_placeholder() {
    let options = GenerateOptions::default().with_placeholder("-");
    let bytes = generate(r#"[{"Options": [{"Option": "A"}]}]"#, &options).unwrap();
    let doc = read_docx_bytes(&bytes).unwrap();

    assert_eq!(tables(&doc)[1].rows[1].texts(), ["A", "-", "-", "-"]);
}

#[test]
fn test_empty_list_is_valid() {
    let bytes = generate("[]", &GenerateOptions::default()).unwrap();
    let doc = read_docx_bytes(&bytes).unwrap();
    assert_eq!(doc.table_count(), 0);
    assert_eq!(doc.page_break_count(), 0);
}

#[test]
fn test_multiline_cell_text() {
    let bytes = generate(
        r#"[{"Options": [], "Solution": "step 1\nstep 2"}]"#,
        &GenerateOptions::default(),
    )
    .unwrap();
    let doc = read_docx_bytes(&bytes).unwrap();
    assert_eq!(tables(&doc)[2].rows[1].texts(), ["Solution", "step 1\nstep 2"]);
}

#[test]
fn test_error_kinds() {
    let options = GenerateOptions::default();

    let err = generate("[{", &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert_eq!(err.user_message(), "Invalid JSON format. Please check your input.");

    let err = generate(r#"{"foo": 1}"#, &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);

    let err = generate(r#"[{"Hint": "h", "Solution": "s"}]"#, &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(err.user_message().contains("Options"));

    let err = generate(r#"[{"Options": "A"}]"#, &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_standards_schema_requires_fields() {
    let options = GenerateOptions::default().with_schema(SchemaVariant::Standards);

    let err = generate(r#"[{"Options": []}]"#, &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(err.user_message().contains("Grade"));

    let input = r#"[{
        "Grade": "5",
        "Domain": "Numbers",
        "Standard/Core Concept": "5.NF.1",
        "Question Type": "MCQ",
        "Difficulty Level": "Medium",
        "Cognitive Dimension (Bloom's Level)": "Apply",
        "Question ID": "S1",
        "Title (Stem and Prompt)": "Add the fractions",
        "Hint": "Common denominator",
        "Solution": "5/6",
        "Options": [{"Option": "A", "Text": "5/6", "Type of Distractor": "Correct", "Distractor Rationale": "Sum"}]
    }]"#;
    let doc = read_docx_bytes(&generate(input, &options).unwrap()).unwrap();
    let tables = tables(&doc);

    assert_eq!(tables[0].row_count(), 8);
    assert_eq!(tables[0].rows[2].texts(), ["Standard/Core Concept", "5.NF.1"]);
    assert_eq!(tables[1].rows[1].texts(), ["A", "5/6", "Correct", "Sum"]);
}

#[test]
fn test_title_in_core_properties() {
    let options = GenerateOptions::default().with_title("Unit 3 Quiz");
    let doc = read_docx_bytes(&generate("[]", &options).unwrap()).unwrap();
    assert_eq!(doc.metadata.title.as_deref(), Some("Unit 3 Quiz"));
    assert!(doc
        .metadata
        .application
        .as_deref()
        .is_some_and(|a| a.starts_with("quizdoc")));
}

#[test]
fn test_generate_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("questions.json");
    let output = dir.path().join("Generated_Questions.docx");
    std::fs::write(&input, LEARNING_UNIT).unwrap();

    let count = quizdoc::generate_file(&input, &output, &GenerateOptions::default()).unwrap();
    assert_eq!(count, 2);

    let doc = read_docx(&output).unwrap();
    assert_eq!(doc.table_count(), 6);
}

#[test]
fn test_control_characters_dropped_without_normalization() {
    let options = GenerateOptions::default().with_normalize_text(false);
    let bytes = generate(
        r#"[{"Options": [], "Hint": "a\u0001b", "Solution": "e\u0301"}]"#,
        &options,
    )
    .unwrap();
    let doc = read_docx_bytes(&bytes).unwrap();
    let bottom = tables(&doc)[2];

    assert_eq!(bottom.rows[0].texts(), ["Hint", "ab"]);
    // Decomposed form survives when NFC is off
    assert_eq!(bottom.rows[1].texts(), ["Solution", "e\u{0301}"]);
}

#[test]
fn test_author_in_core_properties() {
    let options = GenerateOptions::default().with_author("Ms. Rivera");
    let doc = read_docx_bytes(&generate("[]", &options).unwrap()).unwrap();
    assert_eq!(doc.metadata.author.as_deref(), Some("Ms. Rivera"));
}
