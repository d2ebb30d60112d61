//! Question records and input validation.
//!
//! Input is a JSON array of question objects. Each question must carry an
//! `Options` array; every other field is optional and looked up through the
//! [`QuestionField`] and [`OptionField`] mappings of the active
//! [`SchemaVariant`].

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Key holding the option list of a question.
pub const OPTIONS_KEY: &str = "Options";

/// Cell text used when a field is missing.
pub const DEFAULT_PLACEHOLDER: &str = "N/A";

/// Which set of field keys the input uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaVariant {
    /// `LU`/`LUID`/`LO`/`LOID` keys; every scalar field is optional.
    #[default]
    LearningUnit,
    /// `Grade`/`Domain`/`Standard/Core Concept` keys; every scalar field is required.
    Standards,
}

impl SchemaVariant {
    /// Metadata fields in table order.
    pub fn metadata_fields(self) -> &'static [QuestionField] {
        use QuestionField::*;
        match self {
            SchemaVariant::LearningUnit => &[
                Lu,
                Luid,
                Lo,
                Loid,
                QuestionType,
                DifficultyLevel,
                BloomsLevel,
                QuestionId,
                Title,
            ],
            SchemaVariant::Standards => &[
                Grade,
                Domain,
                Standard,
                QuestionType,
                DifficultyLevel,
                BloomsLevel,
                QuestionId,
                Title,
            ],
        }
    }

    /// Whether missing scalar fields are a validation error.
    pub fn is_strict(self) -> bool {
        matches!(self, SchemaVariant::Standards)
    }

    /// Name used on the command line and in logs.
    pub fn name(self) -> &'static str {
        match self {
            SchemaVariant::LearningUnit => "learning-unit",
            SchemaVariant::Standards => "standards",
        }
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchemaVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "learning-unit" | "lu" => Ok(SchemaVariant::LearningUnit),
            "standards" | "strict" => Ok(SchemaVariant::Standards),
            other => Err(format!("unknown schema variant: {}", other)),
        }
    }
}

/// A scalar field of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionField {
    Grade,
    Domain,
    Standard,
    Lu,
    Luid,
    Lo,
    Loid,
    QuestionType,
    DifficultyLevel,
    BloomsLevel,
    QuestionId,
    Title,
    Hint,
    Solution,
}

impl QuestionField {
    /// Fields of the bottom table, in order.
    pub const BOTTOM: [QuestionField; 2] = [QuestionField::Hint, QuestionField::Solution];

    /// Row label written in column 0.
    pub fn label(self) -> &'static str {
        match self {
            QuestionField::Grade => "Grade",
            QuestionField::Domain => "Domain",
            QuestionField::Standard => "Standard/Core Concept",
            QuestionField::Lu => "LU",
            QuestionField::Luid => "LUID",
            QuestionField::Lo => "LO",
            QuestionField::Loid => "LOID",
            QuestionField::QuestionType => "Question Type",
            QuestionField::DifficultyLevel => "Difficulty Level",
            QuestionField::BloomsLevel => "Cognitive Dimension (Bloom's Level)",
            QuestionField::QuestionId => "Question ID",
            QuestionField::Title => "Title (Stem and Prompt)",
            QuestionField::Hint => "Hint",
            QuestionField::Solution => "Solution",
        }
    }

    /// JSON key holding this field under the given schema.
    pub fn key(self, schema: SchemaVariant) -> &'static str {
        match (self, schema) {
            (QuestionField::QuestionType, SchemaVariant::LearningUnit) => "QuestionType",
            (QuestionField::DifficultyLevel, SchemaVariant::LearningUnit) => "DifficultyLevel",
            (QuestionField::BloomsLevel, SchemaVariant::LearningUnit) => "BloomsLevel",
            (QuestionField::QuestionId, SchemaVariant::LearningUnit) => "QuestionID",
            (QuestionField::Title, SchemaVariant::LearningUnit) => "TitleStemPrompt",
            // Standards keys are the labels themselves.
            (field, _) => field.label(),
        }
    }
}

/// A field of a multiple-choice option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionField {
    Option,
    Text,
    TypeOfDistractor,
    DistractorRationale,
}

impl OptionField {
    /// Columns of the options table, in order.
    pub const ALL: [OptionField; 4] = [
        OptionField::Option,
        OptionField::Text,
        OptionField::TypeOfDistractor,
        OptionField::DistractorRationale,
    ];

    /// Header label of this column.
    pub fn label(self) -> &'static str {
        match self {
            OptionField::Option => "Option",
            OptionField::Text => "Text",
            OptionField::TypeOfDistractor => "Type of Distractor",
            OptionField::DistractorRationale => "Distractor Rationale",
        }
    }

    /// JSON key holding this field under the given schema.
    pub fn key(self, schema: SchemaVariant) -> &'static str {
        match (self, schema) {
            (OptionField::TypeOfDistractor, SchemaVariant::LearningUnit) => "TypeOfDistractor",
            (OptionField::DistractorRationale, SchemaVariant::LearningUnit) => {
                "DistractorRationale"
            }
            (field, _) => field.label(),
        }
    }
}

/// One multiple-choice option with its distractor classification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionRecord {
    fields: Map<String, Value>,
    schema: SchemaVariant,
}

impl OptionRecord {
    /// Create an empty option for the given schema.
    pub fn new(schema: SchemaVariant) -> Self {
        Self {
            fields: Map::new(),
            schema,
        }
    }

    /// Set a field value.
    pub fn with(mut self, field: OptionField, value: impl Into<String>) -> Self {
        self.fields
            .insert(field.key(self.schema).to_string(), Value::String(value.into()));
        self
    }

    /// Get a field as text, if present.
    pub fn get(&self, field: OptionField) -> Option<String> {
        self.fields.get(field.key(self.schema)).and_then(scalar_text)
    }

    /// Get a field as text, or `placeholder` when missing.
    pub fn text_or(&self, field: OptionField, placeholder: &str) -> String {
        self.get(field).unwrap_or_else(|| placeholder.to_string())
    }
}

/// One quiz item: metadata, options, hint and solution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionRecord {
    fields: Map<String, Value>,
    options: Vec<OptionRecord>,
    schema: SchemaVariant,
}

impl QuestionRecord {
    /// Create an empty question for the given schema.
    pub fn new(schema: SchemaVariant) -> Self {
        Self {
            fields: Map::new(),
            options: Vec::new(),
            schema,
        }
    }

    /// Set a field value.
    pub fn with(mut self, field: QuestionField, value: impl Into<String>) -> Self {
        self.fields
            .insert(field.key(self.schema).to_string(), Value::String(value.into()));
        self
    }

    /// Append an option.
    pub fn with_option(mut self, option: OptionRecord) -> Self {
        self.options.push(option);
        self
    }

    /// Schema this record was read with.
    pub fn schema(&self) -> SchemaVariant {
        self.schema
    }

    /// Get a field as text, if present.
    pub fn get(&self, field: QuestionField) -> Option<String> {
        self.fields.get(field.key(self.schema)).and_then(scalar_text)
    }

    /// Get a field as text, or `placeholder` when missing.
    pub fn text_or(&self, field: QuestionField, placeholder: &str) -> String {
        self.get(field).unwrap_or_else(|| placeholder.to_string())
    }

    /// Options in input order.
    pub fn options(&self) -> &[OptionRecord] {
        &self.options
    }

    /// Validate one element of the input array. `number` is 1-based.
    fn from_value(number: usize, value: Value, schema: SchemaVariant) -> Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(Error::Format(format!(
                "Question {} must be a JSON object.",
                number
            )));
        };

        let options = match fields.remove(OPTIONS_KEY) {
            None => {
                return Err(Error::Format(format!(
                    "Question {} is missing the required '{}' field.",
                    number, OPTIONS_KEY
                )))
            }
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(Error::Format(format!(
                    "Question {} has an invalid '{}' field: expected a list.",
                    number, OPTIONS_KEY
                )))
            }
        };

        let options = options
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(fields) => Ok(OptionRecord { fields, schema }),
                _ => Err(Error::Format(format!(
                    "Question {}, option {} must be a JSON object.",
                    number,
                    i + 1
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        let record = Self {
            fields,
            options,
            schema,
        };

        if schema.is_strict() {
            let required = schema
                .metadata_fields()
                .iter()
                .chain(QuestionField::BOTTOM.iter());
            for field in required {
                if record.get(*field).is_none() {
                    return Err(Error::Format(format!(
                        "Question {} is missing the required '{}' field.",
                        number,
                        field.key(schema)
                    )));
                }
            }
        }

        Ok(record)
    }
}

/// Render a JSON value as cell text. `null` counts as missing.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Decode and validate raw JSON input.
///
/// # Example
///
/// ```
/// use quizdoc::question::{parse_questions, QuestionField, SchemaVariant};
///
/// let input = r#"[{"Options": [], "Hint": "h"}]"#;
/// let records = parse_questions(input, SchemaVariant::LearningUnit)?;
/// assert_eq!(records[0].get(QuestionField::Hint).as_deref(), Some("h"));
/// # Ok::<(), quizdoc::Error>(())
/// ```
pub fn parse_questions(input: &str, schema: SchemaVariant) -> Result<Vec<QuestionRecord>> {
    let value: Value = serde_json::from_str(input)?;
    validate(value, schema)
}

/// Validate an already decoded JSON value.
pub fn validate(value: Value, schema: SchemaVariant) -> Result<Vec<QuestionRecord>> {
    let Value::Array(items) = value else {
        return Err(Error::Format(
            "JSON data must be a list of questions.".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| QuestionRecord::from_value(i + 1, item, schema))
        .collect()
}
