/// parse a task document with structure like
/// ```text
/// integral
/// expression: x^2
/// variable: x
/// bounds: 0, 1
/// logging
/// loglevel: info
/// ```
/// i.e. titles followed by pairs key: comma-separated values, into
/// HashMap<title, HashMap<key, Option<Vec<Value>>>>.
/// Values are single tokens: they may not contain spaces, commas or semicolons.
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0, space0},
    combinator::{map, map_res, recognize},
    multi::{many0, many1, separated_list0},
    sequence::{delimited, pair, separated_pair, terminated},
};
use std::collections::HashMap;
use std::fmt::Display;

pub type DocumentMap = HashMap<String, SectionMap>;
pub type SectionMap = HashMap<String, Option<Vec<Value>>>;

/// enum to represent different value types:
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Float(val) => write!(f, "{:?}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
        }
    }
}

/// an identifier: letter or '_' followed by letters, digits, '_'
fn identifier(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    parser.parse(input)
}

/// Parses a title, dropping the whitespace after it
fn parse_title(input: &str) -> IResult<&str, String> {
    let (input, result) = identifier(input)?;
    Ok((input.trim_start(), result))
}

fn parse_key(input: &str) -> IResult<&str, String> {
    identifier(input)
}

fn parse_value(input: &str) -> IResult<&str, Value> {
    // a single value - everything up to a comma, whitespace, newline or semicolon
    let value_parser = take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\n' | '\r' | ';'));
    let mut value_parser = map_res(value_parser, |s: &str| -> Result<Value, String> {
        // try the narrowest type first
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

fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    let separator_coma = delimited(space0, tag(","), space0);
    let mut value_parser = separated_list0(separator_coma, parse_value);
    value_parser.parse(input)
}

/// key: value1, value2 ...
fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let colon_separator = delimited(space0, tag(":"), space0);
    let mut parser = separated_pair(parse_key, colon_separator, parse_value_list);
    let (input, result) = parser.parse(input)?;
    Ok((input.trim_start(), result))
}

/// Parses a section with a title and one or more key-value pairs
fn parse_section(input: &str) -> IResult<&str, (String, HashMap<String, Vec<Value>>)> {
    let (input, _) = space0(input)?;
    let (input, title) = parse_title(input)?;
    let mut parser = many1(terminated(parse_key_value_pair, space0));
    let (input, pairs) = parser.parse(input)?;
    Ok((input, (title, pairs.into_iter().collect())))
}

/// Filters out comment lines (starting with //, #, %, or ;) and blank lines
fn filter_comments(input: &str) -> String {
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

fn parse_sections(input: &str) -> IResult<&str, DocumentMap> {
    let mut parser = many1(delimited(space0, parse_section, multispace0));
    let (input, sections) = parser.parse(input)?;
    let mut result = HashMap::new();
    for (title, section_map) in sections {
        let title_map: SectionMap = section_map
            .into_iter()
            .map(|(key, values)| (key, Some(values)))
            .collect();
        result.insert(title, title_map);
    }
    Ok((input, result))
}

/// Parses the entire document. Every key listed in `template` that the document
/// lacks is inserted as `None`, so that callers can tell "missing" from "present".
pub fn parse_document(input: &str, template: Option<&DocumentMap>) -> Result<DocumentMap, String> {
    let filtered = filter_comments(input);
    let mut parsed = match parse_sections(filtered.trim_start()) {
        Ok((remaining, parsed)) => {
            if !remaining.trim().is_empty() {
                return Err(format!(
                    "Failed to parse entire document. Remaining: '{}'",
                    remaining
                ));
            }
            parsed
        }
        Err(e) => return Err(format!("Parsing error: {:?}", e)),
    };
    if let Some(template) = template {
        for (title, keys_map) in template {
            let section_map = parsed.entry(title.clone()).or_default();
            for key in keys_map.keys() {
                section_map.entry(key.clone()).or_insert(None);
            }
        }
    }
    Ok(parsed)
}
