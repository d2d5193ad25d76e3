//! Parsing of SQL type names
//!
//! Accepts the spellings a validator or a command line would use:
//! `INTEGER`, `DECIMAL(10, 2)`, `VARCHAR(20) NOT NULL`, `DOUBLE NULLABLE`,
//! `INTEGER ARRAY`, `?` (an operand whose type is unknown).

use std::str::FromStr;
use thiserror::Error;
use winnow::ascii::{Caseless, digit1, multispace0};
use winnow::combinator::{alt, cut_err, delimited, eof, not, opt, preceded, separated, terminated};
use winnow::error::{ContextError, ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{literal, one_of, take_while};

use sqlop_diagnostics::{SQL0001, SQL0002, SQL0003, SqlOpError};

use crate::{DEFAULT_DECIMAL_PRECISION, DataType, MAX_DECIMAL_PRECISION, OperandType, SqlType};

/// Type name parse errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeParseError {
    /// Empty input
    #[error("Empty type name")]
    Empty,

    /// Unknown type keyword
    #[error("Unknown type name '{name}'")]
    UnknownType { name: String },

    /// Malformed parameter list
    #[error("Invalid parameters for {type_name}: {reason}")]
    InvalidParameters { type_name: String, reason: String },

    /// Trailing tokens that are not a nullability clause
    #[error("Unexpected '{token}' after type")]
    UnexpectedToken { token: String },
}

impl From<TypeParseError> for SqlOpError {
    fn from(err: TypeParseError) -> Self {
        let code = match &err {
            TypeParseError::Empty | TypeParseError::UnknownType { .. } => SQL0001,
            TypeParseError::InvalidParameters { .. } => SQL0002,
            TypeParseError::UnexpectedToken { .. } => SQL0003,
        };
        let input = match &err {
            TypeParseError::UnknownType { name } => name.clone(),
            TypeParseError::InvalidParameters { type_name, .. } => type_name.clone(),
            TypeParseError::UnexpectedToken { token } => token.clone(),
            TypeParseError::Empty => String::new(),
        };
        SqlOpError::type_syntax(code, err.to_string(), input)
    }
}

type Input<'a> = &'a str;

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Skip whitespace
fn ws<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    multispace0.parse_next(input)
}

/// A bare word such as `INTEGER` or `varying`
fn word<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    preceded(ws, take_while(1.., is_word_char)).parse_next(input)
}

/// Case-insensitive keyword that does not run into a longer word
fn keyword<'a>(kw: &'static str) -> impl Parser<Input<'a>, &'a str, ErrMode<ContextError>> {
    delimited(ws, literal(Caseless(kw)), not(one_of(is_word_char)))
}

fn number(input: &mut Input<'_>) -> ModalResult<u32> {
    preceded(ws, digit1.try_map(|digits: &str| digits.parse::<u32>()))
        .context(StrContext::Expected(StrContextValue::Description("a number")))
        .parse_next(input)
}

/// `( n [, m]* )`; anything after the opening parenthesis is committed
fn parameters(input: &mut Input<'_>) -> ModalResult<Vec<u32>> {
    preceded(
        (ws, '('),
        cut_err(terminated(
            separated(1.., number, (ws, ',')),
            (ws, ')').context(StrContext::Expected(StrContextValue::CharLiteral(')'))),
        )),
    )
    .parse_next(input)
}

/// `NOT NULL`, `NULL`, `NULLABLE` or nothing; `true` unless `NOT NULL`
fn nullability(input: &mut Input<'_>) -> ModalResult<bool> {
    opt(alt((
        preceded(keyword("NOT"), cut_err(keyword("NULL"))).value(false),
        alt((keyword("NULLABLE"), keyword("NULL"))).value(true),
    )))
    .map(|nullable| nullable.unwrap_or(true))
    .parse_next(input)
}

fn eat(input: &mut Input<'_>, kw: &'static str) -> bool {
    matches!(opt(keyword(kw)).parse_next(input), Ok(Some(_)))
}

/// Upper-cased word or symbol at the front of `input`
fn next_token(input: &str) -> String {
    let mut rest = input.trim_start();
    match word.parse_next(&mut rest) {
        Ok(w) => w.to_ascii_uppercase(),
        Err(_) => rest.chars().next().map(String::from).unwrap_or_default(),
    }
}

fn describe(err: ErrMode<ContextError>) -> String {
    let reason = match err {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e.to_string(),
        ErrMode::Incomplete(_) => String::new(),
    };
    if reason.is_empty() {
        "malformed parameter list".to_string()
    } else {
        reason
    }
}

fn type_parameters(input: &mut Input<'_>, type_name: &str) -> Result<Vec<u32>, TypeParseError> {
    opt(parameters)
        .parse_next(input)
        .map(Option::unwrap_or_default)
        .map_err(|err| TypeParseError::InvalidParameters {
            type_name: type_name.to_string(),
            reason: describe(err),
        })
}

fn varchar(input: &mut Input<'_>, type_name: &str) -> Result<SqlType, TypeParseError> {
    match type_parameters(input, type_name)?.as_slice() {
        [] => Ok(SqlType::varchar()),
        [n] => Ok(SqlType::varchar_of(*n)),
        _ => Err(TypeParseError::InvalidParameters {
            type_name: type_name.to_string(),
            reason: "expected a single length".to_string(),
        }),
    }
}

fn decimal(input: &mut Input<'_>, type_name: &str) -> Result<SqlType, TypeParseError> {
    let invalid = |reason: String| TypeParseError::InvalidParameters {
        type_name: type_name.to_string(),
        reason,
    };
    let (precision, scale) = match type_parameters(input, type_name)?.as_slice() {
        [] => (u32::from(DEFAULT_DECIMAL_PRECISION), 0),
        [p] => (*p, 0),
        [p, s] => (*p, *s),
        _ => return Err(invalid("expected at most precision and scale".to_string())),
    };
    if precision == 0 || precision > u32::from(MAX_DECIMAL_PRECISION) {
        return Err(invalid(format!(
            "precision must be between 1 and {}",
            MAX_DECIMAL_PRECISION
        )));
    }
    if scale > precision {
        return Err(invalid("scale exceeds precision".to_string()));
    }
    // Both bounded by MAX_DECIMAL_PRECISION above
    Ok(SqlType::decimal(precision as u8, scale as u8))
}

fn base_type(input: &mut Input<'_>) -> Result<SqlType, TypeParseError> {
    ws(input).ok();
    if input.is_empty() {
        return Err(TypeParseError::Empty);
    }
    let name = match word.parse_next(input) {
        Ok(name) => name.to_ascii_uppercase(),
        Err(_) => {
            return Err(TypeParseError::UnknownType {
                name: next_token(input),
            });
        }
    };

    let ty = match name.as_str() {
        "NULL" => SqlType::Null,
        "ANY" => SqlType::Any,
        "BOOLEAN" | "BOOL" => SqlType::Boolean,
        "TINYINT" => SqlType::TinyInt,
        "SMALLINT" => SqlType::SmallInt,
        "INTEGER" | "INT" => SqlType::Integer,
        "BIGINT" => SqlType::BigInt,
        "REAL" | "FLOAT" => SqlType::Real,
        "DOUBLE" => {
            eat(input, "PRECISION");
            SqlType::Double
        }
        "DECIMAL" | "NUMERIC" | "DEC" => decimal(input, &name)?,
        "CHAR" | "CHARACTER" => {
            if eat(input, "VARYING") {
                varchar(input, &name)?
            } else {
                match type_parameters(input, &name)?.as_slice() {
                    [] => SqlType::char(1),
                    [n] => SqlType::char(*n),
                    _ => {
                        return Err(TypeParseError::InvalidParameters {
                            type_name: name,
                            reason: "expected a single length".to_string(),
                        });
                    }
                }
            }
        }
        "VARCHAR" | "STRING" | "TEXT" => varchar(input, &name)?,
        "VARBINARY" | "BINARY" | "BYTEA" => SqlType::Varbinary,
        "DATE" => SqlType::Date,
        "TIME" => SqlType::Time,
        "TIMESTAMP" => SqlType::Timestamp,
        _ => return Err(TypeParseError::UnknownType { name }),
    };
    Ok(ty)
}

/// Base type followed by any number of `ARRAY` suffixes
fn sql_type(input: &mut Input<'_>) -> Result<SqlType, TypeParseError> {
    let mut ty = base_type(input)?;
    while eat(input, "ARRAY") {
        ty = SqlType::array(ty);
    }
    Ok(ty)
}

fn finish(input: &mut Input<'_>) -> Result<(), TypeParseError> {
    if (ws, eof).parse_next(input).is_ok() {
        return Ok(());
    }
    Err(TypeParseError::UnexpectedToken {
        token: next_token(input),
    })
}

impl FromStr for SqlType {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut input: Input<'_> = s;
        let ty = sql_type(&mut input)?;
        finish(&mut input)?;
        Ok(ty)
    }
}

impl FromStr for DataType {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut input: Input<'_> = s;
        let ty = sql_type(&mut input)?;
        let nullable =
            nullability(&mut input).map_err(|_| TypeParseError::UnexpectedToken {
                token: "NOT".to_string(),
            })?;
        finish(&mut input)?;
        Ok(DataType::new(ty, nullable))
    }
}

impl FromStr for OperandType {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "?" {
            return Ok(OperandType::Unknown);
        }
        s.parse::<DataType>().map(OperandType::Known)
    }
}
