//! parse task document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" which has titles and
//! pairs key-vector of values, then turn it into integration tasks.
//!
//! Example#1
//! ```
//! use RustedQuadrature::Utils::task_parser::parse_task_document;
//! let document = "integral
//!     function: polynomial
//!     bounds: -1.0, 1.0
//!     accuracy: 1e-4
//!     settings
//!     loglevel: off";
//! let tasks = parse_task_document(document).unwrap();
//! assert_eq!(tasks.tasks.len(), 1);
//! assert_eq!(tasks.settings.loglevel, "off");
//! ```
use crate::Examples::quadrature_examples::{CatalogFunction, FunctionCatalog};
use crate::Utils::logger::{parse_loglevel, timestamped_log_name};
use crate::numerical::Newton_Cotes::Reimann_sum::{
    MIN_ACCURACY, QuadratureRule, QuadratureSettings, ReimannSum, SolutionType,
};
use crate::numerical::Newton_Cotes::answer::ReimannSumAnswer;
use crate::numerical::Newton_Cotes::interval::Bounds;
use crate::numerical::Newton_Cotes::quadrature_errors::QuadratureError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0, space0},
    combinator::{map, map_res, recognize},
    multi::{many0, many1, separated_list0},
    sequence::{delimited, pair, separated_pair, terminated},
};
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::fs;
use std::path::Path;

pub const INTEGRAL_SECTION: &str = "integral";
pub const SETTINGS_SECTION: &str = "settings";

const INTEGRAL_KEYS: [&str; 5] = ["function", "bounds", "accuracy", "rule", "solution"];
const SETTINGS_KEYS: [&str; 4] = ["loglevel", "log_file", "max_sections", "max_value"];

/// section title and its key-values in the order of the document
pub type Section = (String, Vec<(String, Vec<Value>)>);
type SectionMap = HashMap<String, Vec<Value>>;

/// enum to represent different value types:
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Float(val) => write!(f, "{}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
        }
    }
}

fn identifier(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    parser.parse(input)
}

/// Parses a title (word characters without spaces), trailing whitespace is dropped
pub fn parse_title(input: &str) -> IResult<&str, String> {
    let (input, result) = identifier(input)?;
    Ok((input.trim(), result))
}

/// Parses a key (word characters without spaces)
pub fn parse_key(input: &str) -> IResult<&str, String> {
    identifier(input)
}

pub fn parse_value(input: &str) -> IResult<&str, Value> {
    // a single value ends at comma, whitespace, newline or semicolon
    let value_parser = take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\n' | '\r' | ';'));
    let mut value_parser = map_res(value_parser, |s: &str| -> Result<Value, String> {
        if let Ok(val) = s.parse::<i64>() {
            Ok(Value::Integer(val))
        } else if let Ok(val) = s.parse::<f64>() {
            Ok(Value::Float(val))
        } else if let Ok(val) = s.parse::<bool>() {
            Ok(Value::Boolean(val))
        } else {
            Ok(Value::String(s.to_string()))
        }
    });
    value_parser.parse(input)
}

pub fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    let (input, _) = space0(input)?;
    let separator_coma = delimited(space0, tag(","), space0);
    let mut value_parser = separated_list0(separator_coma, parse_value);
    value_parser.parse(input)
}

/// Parses a key-value pair where value is a list
pub fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let colon_separator = delimited(space0, tag(":"), space0);
    let mut parser = separated_pair(parse_key, colon_separator, parse_value_list);
    let (input, result) = parser.parse(input)?;
    Ok((input.trim(), result))
}

/// Parses a section with a title and one or more key-value pairs
pub fn parse_section(input: &str) -> IResult<&str, Section> {
    let (input, _) = space0(input)?;
    let (input, title) = parse_title(input)?;
    let (input, _) = multispace0(input)?;
    let mut parser = many1(terminated(parse_key_value_pair, space0));
    let (input, pairs) = parser.parse(input)?;
    Ok((input, (title, pairs)))
}

/// Filters out blank lines and comment lines (starting with //, #, %, or ;)
pub fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//")
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('%')
                && !trimmed.starts_with(';')
                && !trimmed.is_empty()
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses the entire document into sections, keeping their order
pub fn parse_document(input: &str) -> IResult<&str, Vec<Section>> {
    let mut parser = many1(delimited(space0, parse_section, multispace0));
    parser.parse(input)
}

/// integral, integral2, integral_3 ...
pub fn is_integral_title(title: &str) -> bool {
    title.strip_prefix(INTEGRAL_SECTION).is_some_and(|suffix| {
        suffix
            .trim_start_matches('_')
            .chars()
            .all(|c| c.is_ascii_digit())
    })
}

fn section_map(title: &str, pairs: Vec<(String, Vec<Value>)>, allowed: &[&str]) -> Result<SectionMap, String> {
    let mut map = HashMap::new();
    for (key, values) in pairs {
        if !allowed.contains(&key.as_str()) {
            return Err(format!("unknown key '{}' in section '{}'", key, title));
        }
        if map.insert(key.clone(), values).is_some() {
            return Err(format!("key '{}' is repeated in section '{}'", key, title));
        }
    }
    Ok(map)
}

fn single<'a>(section: &'a SectionMap, key: &str) -> Result<Option<&'a Value>, String> {
    match section.get(key).map(|values| values.as_slice()) {
        None => Ok(None),
        Some([value]) => Ok(Some(value)),
        Some(values) => Err(format!(
            "key '{}' expects one value, found {}",
            key,
            values.len()
        )),
    }
}

fn required<'a>(section: &'a SectionMap, key: &str, title: &str) -> Result<&'a Value, String> {
    single(section, key)?.ok_or_else(|| format!("key '{}' is missing in section '{}'", key, title))
}

fn number(key: &str, value: &Value) -> Result<f64, String> {
    value
        .as_number()
        .filter(|x| x.is_finite())
        .ok_or_else(|| format!("key '{}' expects a finite number, found '{}'", key, value))
}

/// one integral to compute
#[derive(Debug, Clone, PartialEq)]
pub struct IntegralTask {
    pub title: String,
    pub function: CatalogFunction,
    pub bounds: Bounds,
    pub accuracy: f64,
    pub rule: QuadratureRule,
    pub solution: SolutionType,
}

impl IntegralTask {
    fn from_section(title: &str, section: &SectionMap) -> Result<IntegralTask, String> {
        let function = match required(section, "function", title)? {
            Value::String(key) => CatalogFunction::from_key(key),
            Value::Integer(n) => usize::try_from(*n).ok().and_then(CatalogFunction::from_number),
            _ => None,
        }
        .ok_or_else(|| format!("unknown function in section '{}'", title))?;

        let bounds = match section.get("bounds").map(|values| values.as_slice()) {
            Some([left, right]) => Bounds::new(number("bounds", left)?, number("bounds", right)?),
            Some(_) => return Err(format!("bounds in section '{}' need two numbers", title)),
            None => return Err(format!("key 'bounds' is missing in section '{}'", title)),
        };

        let accuracy = number("accuracy", required(section, "accuracy", title)?)?;
        if accuracy < MIN_ACCURACY {
            return Err(format!(
                "accuracy {} in section '{}' is less than {}",
                accuracy, title, MIN_ACCURACY
            ));
        }

        let rule = match single(section, "rule")? {
            None => QuadratureRule::Trapezoidal,
            Some(Value::Integer(index)) => usize::try_from(*index)
                .map_err(|_| QuadratureError::UnknownRule(index.to_string()))
                .and_then(QuadratureRule::from_index)
                .map_err(|err| err.to_string())?,
            Some(value) => QuadratureRule::parse(&value.to_string()).map_err(|err| err.to_string())?,
        };

        let solution = match single(section, "solution")? {
            None => SolutionType::default(),
            Some(value) => SolutionType::parse(&value.to_string())
                .ok_or_else(|| format!("unknown solution '{}' in section '{}'", value, title))?,
        };

        Ok(IntegralTask {
            title: title.to_string(),
            function,
            bounds,
            accuracy,
            rule,
            solution,
        })
    }

    pub fn solve(
        &self,
        engine: &ReimannSum,
        catalog: &FunctionCatalog,
    ) -> Result<ReimannSumAnswer, QuadratureError> {
        let function = catalog.get(self.function);
        engine.get_reimann_sum(
            function.as_ref(),
            &self.bounds,
            self.accuracy,
            self.rule,
            self.solution,
        )
    }
}

/// content of the `settings` section
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSettings {
    pub loglevel: String,
    pub log_file: Option<String>,
    pub quadrature: QuadratureSettings,
}

impl Default for TaskSettings {
    fn default() -> Self {
        TaskSettings {
            loglevel: "info".to_string(),
            log_file: None,
            quadrature: QuadratureSettings::default(),
        }
    }
}

impl TaskSettings {
    fn from_section(section: &SectionMap) -> Result<TaskSettings, String> {
        let mut settings = TaskSettings::default();
        if let Some(level) = single(section, "loglevel")? {
            let level = level.to_string();
            parse_loglevel(&level)?;
            settings.loglevel = level;
        }
        // true gives a timestamped file name
        settings.log_file = match single(section, "log_file")? {
            None | Some(Value::Boolean(false)) => None,
            Some(Value::Boolean(true)) => Some(timestamped_log_name()),
            Some(name) => Some(name.to_string()),
        };
        if let Some(value) = single(section, "max_sections")? {
            settings.quadrature.max_sections = match value {
                Value::Integer(n) if *n > 0 => *n as usize,
                _ => return Err(format!("max_sections must be a positive integer, found '{}'", value)),
            };
        }
        if let Some(value) = single(section, "max_value")? {
            let max_value = number("max_value", value)?;
            if max_value <= 0.0 {
                return Err(format!("max_value must be positive, found {}", max_value));
            }
            settings.quadrature.max_value = max_value;
        }
        Ok(settings)
    }
}

/// all tasks of a document and the common settings
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDocument {
    pub tasks: Vec<IntegralTask>,
    pub settings: TaskSettings,
}

impl TaskDocument {
    pub fn engine(&self) -> ReimannSum {
        ReimannSum::with_settings(self.settings.quadrature)
    }
}

pub fn parse_task_document(input: &str) -> Result<TaskDocument, String> {
    let filtered = filter_comments(input);
    if filtered.trim().is_empty() {
        return Err("task document is empty".to_string());
    }
    let (remaining, sections) =
        parse_document(&filtered).map_err(|e| format!("Parsing error: {:?}", e))?;
    if !remaining.trim().is_empty() {
        return Err(format!(
            "Failed to parse entire document. Remaining: '{}'",
            remaining
        ));
    }

    let mut titles = HashSet::new();
    let mut tasks = Vec::new();
    let mut settings = TaskSettings::default();
    for (title, pairs) in sections {
        if !titles.insert(title.clone()) {
            return Err(format!("section '{}' is defined twice", title));
        }
        if title == SETTINGS_SECTION {
            settings = TaskSettings::from_section(&section_map(&title, pairs, &SETTINGS_KEYS)?)?;
        } else if is_integral_title(&title) {
            let section = section_map(&title, pairs, &INTEGRAL_KEYS)?;
            tasks.push(IntegralTask::from_section(&title, &section)?);
        } else {
            return Err(format!("unknown section '{}'", title));
        }
    }
    if tasks.is_empty() {
        return Err("task document has no integral sections".to_string());
    }
    Ok(TaskDocument { tasks, settings })
}

pub fn load_task_file<P: AsRef<Path>>(path: P) -> Result<TaskDocument, String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| format!("can't read task file {}: {}", path.display(), e))?;
    parse_task_document(&content)
}
