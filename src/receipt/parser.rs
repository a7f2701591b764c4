//! Interprets the script trade receipt pages use to register their items.
//!
//! Receipts describe each item with a short script:
//!
//! ```text
//! var oItem;
//! oItem = {"id":"11292488054","classid":"101785959", ...};
//! oItem.appid = 440;
//! oItem.is_stackable = oItem.amount > 1;
//! BuildHover( 'item0', oItem, UserYou );
//! $('item0').show();
//! ```
//!
//! Only these statement forms are recognized. `BuildHover` registers its second argument and
//! `$(..).show()` does nothing. Anything else is rejected before any statement runs.

use crate::error::ParseHtmlError;
use std::cmp::Ordering;
use std::collections::HashMap;
use serde_json::{Map, Number, Value};

/// Bindings which exist before the script runs.
const PREDECLARED: [&str; 2] = ["UserYou", "UserThem"];
/// The deepest nesting of objects allowed in a registered item.
const MAX_DEPTH: usize = 64;
/// The most values produced across all registered items.
const MAX_VALUES: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Less,
    Greater,
    LessOrEqual,
    GreaterOrEqual,
    Equal,
    NotEqual,
    StrictEqual,
    StrictNotEqual,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Num(Number),
    Punct(char),
    Compare(Comparison),
}

#[derive(Debug, Clone, PartialEq)]
struct Spanned {
    token: Token,
    offset: usize,
}

fn unexpected(found: impl Into<String>, offset: usize) -> ParseHtmlError {
    ParseHtmlError::UnexpectedToken {
        found: found.into(),
        offset,
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn tokenize(source: &str) -> Result<Vec<Spanned>, ParseHtmlError> {
    let chars = source.char_indices().collect::<Vec<_>>();
    let char_at = |i: usize| chars.get(i).map(|(_, c)| *c);
    let offset_at = |i: usize| chars.get(i).map_or(source.len(), |(offset, _)| *offset);
    let mut tokens = Vec::new();
    let mut i = 0;

    while let Some(c) = char_at(i) {
        let offset = offset_at(i);
        let next = char_at(i + 1);
        let mut push = |token: Token| tokens.push(Spanned {
            token,
            offset,
        });

        match c {
            c if c.is_whitespace() => i += 1,
            '/' if next == Some('/') => {
                while char_at(i).is_some_and(|c| c != '\n') {
                    i += 1;
                }
            },
            '/' if next == Some('*') => {
                i += 2;

                loop {
                    match char_at(i) {
                        None => return Err(ParseHtmlError::Malformed("Unterminated comment")),
                        Some('*') if char_at(i + 1) == Some('/') => {
                            i += 2;
                            break;
                        },
                        Some(_) => i += 1,
                    }
                }
            },
            '\'' | '"' => {
                let (value, end) = lex_string(&chars, i)?;

                push(Token::Str(value));
                i = end;
            },
            '0'..='9' | '-' if c != '-' || next.is_some_and(|n| n.is_ascii_digit()) => {
                let start = i;

                i += 1;

                while let Some(c) = char_at(i) {
                    let exponent_sign = matches!(c, '+' | '-') &&
                        matches!(char_at(i - 1), Some('e' | 'E'));

                    if !(c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E') || exponent_sign) {
                        break;
                    }

                    i += 1;
                }

                let text = &source[offset_at(start)..offset_at(i)];
                let number = text.parse::<Number>()
                    .map_err(|_error| unexpected(text, offset))?;

                push(Token::Num(number));
            },
            c if is_ident_start(c) => {
                let start = i;

                while char_at(i).is_some_and(is_ident_continue) {
                    i += 1;
                }

                push(Token::Ident(source[offset_at(start)..offset_at(i)].to_string()));
            },
            '=' | '!' if next == Some('=') => {
                let strict = char_at(i + 2) == Some('=');
                let comparison = match (c, strict) {
                    ('=', false) => Comparison::Equal,
                    ('=', true) => Comparison::StrictEqual,
                    (_, false) => Comparison::NotEqual,
                    (_, true) => Comparison::StrictNotEqual,
                };

                push(Token::Compare(comparison));
                i += if strict { 3 } else { 2 };
            },
            '<' | '>' => {
                let or_equal = next == Some('=');
                let comparison = match (c, or_equal) {
                    ('<', false) => Comparison::Less,
                    ('<', true) => Comparison::LessOrEqual,
                    (_, false) => Comparison::Greater,
                    (_, true) => Comparison::GreaterOrEqual,
                };

                push(Token::Compare(comparison));
                i += if or_equal { 2 } else { 1 };
            },
            '{' | '}' | '[' | ']' | '(' | ')' | ',' | ';' | ':' | '.' | '=' => {
                push(Token::Punct(c));
                i += 1;
            },
            c => return Err(unexpected(c, offset)),
        }
    }

    Ok(tokens)
}

fn push_char(units: &mut Vec<u16>, c: char) {
    let mut buffer = [0; 2];

    units.extend_from_slice(c.encode_utf16(&mut buffer));
}

fn hex_digits(chars: &[(usize, char)], start: usize, count: usize) -> Option<u32> {
    let digits = chars.get(start..start + count)?
        .iter()
        .map(|(_, c)| *c)
        .collect::<String>();

    u32::from_str_radix(&digits, 16).ok()
}

/// Reads a quoted string starting at `start`. Returns the value and the index after the closing
/// quote.
fn lex_string(
    chars: &[(usize, char)],
    start: usize,
) -> Result<(String, usize), ParseHtmlError> {
    let (offset, quote) = chars[start];
    // collected as UTF-16 so escaped surrogate pairs join up
    let mut units: Vec<u16> = Vec::new();
    let mut i = start + 1;

    loop {
        let Some(&(_, c)) = chars.get(i) else {
            return Err(ParseHtmlError::Malformed("Unterminated string"));
        };

        i += 1;

        if c == quote {
            return Ok((String::from_utf16_lossy(&units), i));
        }

        if c == '\n' {
            return Err(unexpected("line break in string", offset));
        }

        if c != '\\' {
            push_char(&mut units, c);
            continue;
        }

        let Some(&(escape_offset, escaped)) = chars.get(i) else {
            return Err(ParseHtmlError::Malformed("Unterminated string"));
        };

        i += 1;

        match escaped {
            'n' => units.push(u16::from(b'\n')),
            't' => units.push(u16::from(b'\t')),
            'r' => units.push(u16::from(b'\r')),
            'b' => units.push(0x08),
            'f' => units.push(0x0C),
            'v' => units.push(0x0B),
            '0' => units.push(0),
            '\n' => {},
            'x' | 'u' => {
                let count = if escaped == 'x' { 2 } else { 4 };
                let unit = hex_digits(chars, i, count)
                    .ok_or_else(|| unexpected(format!("\\{escaped}"), escape_offset))?;

                // at most four hex digits
                units.push(unit as u16);
                i += count;
            },
            other => push_char(&mut units, other),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Undefined,
    Literal(Value),
    Array(Vec<Expr>),
    Object(Vec<(String, Expr)>),
    Path {
        name: String,
        properties: Vec<String>,
        offset: usize,
    },
    Compare(Box<Expr>, Comparison, Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
enum Statement {
    Declare(Vec<(String, Option<Expr>)>),
    Assign {
        name: String,
        properties: Vec<String>,
        value: Expr,
        offset: usize,
    },
    BuildHover(Vec<Expr>),
    Show(Vec<Expr>),
}

struct Parser {
    tokens: Vec<Spanned>,
    position: usize,
    end: usize,
}

impl Parser {
    fn new(source: &str) -> Result<Self, ParseHtmlError> {
        Ok(Self {
            tokens: tokenize(source)?,
            position: 0,
            end: source.len(),
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position).map(|spanned| &spanned.token)
    }

    fn peek_at(&self, ahead: usize) -> Option<&Token> {
        self.tokens.get(self.position + ahead).map(|spanned| &spanned.token)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.position).map_or(self.end, |spanned| spanned.offset)
    }

    fn next(&mut self) -> Result<Spanned, ParseHtmlError> {
        let spanned = self.tokens.get(self.position)
            .cloned()
            .ok_or(ParseHtmlError::Malformed("Unexpected end of script"))?;

        self.position += 1;
        Ok(spanned)
    }

    fn unexpected_here(&self) -> ParseHtmlError {
        let found = match self.peek() {
            Some(token) => format!("{token:?}"),
            None => String::from("end of script"),
        };

        unexpected(found, self.offset())
    }

    fn eat(&mut self, punct: char) -> bool {
        if self.peek() == Some(&Token::Punct(punct)) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, punct: char) -> Result<(), ParseHtmlError> {
        if self.eat(punct) {
            Ok(())
        } else {
            Err(self.unexpected_here())
        }
    }

    fn ident(&mut self) -> Result<String, ParseHtmlError> {
        match self.peek() {
            Some(Token::Ident(name)) => {
                let name = name.clone();

                self.position += 1;
                Ok(name)
            },
            _ => Err(self.unexpected_here()),
        }
    }

    /// A statement ends with `;` or at the end of the script.
    fn terminator(&mut self) -> Result<(), ParseHtmlError> {
        if self.eat(';') || self.peek().is_none() {
            Ok(())
        } else {
            Err(self.unexpected_here())
        }
    }

    fn script(mut self) -> Result<Vec<Statement>, ParseHtmlError> {
        let mut statements = Vec::new();

        while self.peek().is_some() {
            if self.eat(';') {
                continue;
            }

            statements.push(self.statement()?);
        }

        Ok(statements)
    }

    fn statement(&mut self) -> Result<Statement, ParseHtmlError> {
        let offset = self.offset();
        let name = self.ident()?;
        let statement = match name.as_str() {
            "var" => {
                let mut declarations = Vec::new();

                loop {
                    let name = self.ident()?;
                    let value = if self.eat('=') {
                        Some(self.expression()?)
                    } else {
                        None
                    };

                    declarations.push((name, value));

                    if !self.eat(',') {
                        break;
                    }
                }

                Statement::Declare(declarations)
            },
            "BuildHover" if self.peek() == Some(&Token::Punct('(')) => {
                Statement::BuildHover(self.arguments()?)
            },
            "$" if self.peek() == Some(&Token::Punct('(')) => {
                let arguments = self.arguments()?;

                self.expect('.')?;

                if self.ident()? != "show" {
                    return Err(unexpected("method other than show", offset));
                }

                if !self.arguments()?.is_empty() {
                    return Err(unexpected("arguments to show", offset));
                }

                Statement::Show(arguments)
            },
            _ => {
                let mut properties = Vec::new();

                while self.eat('.') {
                    properties.push(self.ident()?);
                }

                self.expect('=')?;

                Statement::Assign {
                    name,
                    properties,
                    value: self.expression()?,
                    offset,
                }
            },
        };

        self.terminator()?;
        Ok(statement)
    }

    fn arguments(&mut self) -> Result<Vec<Expr>, ParseHtmlError> {
        self.expect('(')?;

        let mut arguments = Vec::new();

        if self.eat(')') {
            return Ok(arguments);
        }

        loop {
            arguments.push(self.expression()?);

            if self.eat(')') {
                return Ok(arguments);
            }

            self.expect(',')?;
        }
    }

    fn expression(&mut self) -> Result<Expr, ParseHtmlError> {
        let mut left = self.primary()?;

        while let Some(Token::Compare(comparison)) = self.peek() {
            let comparison = *comparison;

            self.position += 1;
            left = Expr::Compare(Box::new(left), comparison, Box::new(self.primary()?));
        }

        Ok(left)
    }

    fn primary(&mut self) -> Result<Expr, ParseHtmlError> {
        let Spanned { token, offset } = self.next()?;

        match token {
            Token::Str(value) => Ok(Expr::Literal(Value::String(value))),
            Token::Num(number) => Ok(Expr::Literal(Value::Number(number))),
            Token::Ident(name) => Ok(match name.as_str() {
                "true" => Expr::Literal(Value::Bool(true)),
                "false" => Expr::Literal(Value::Bool(false)),
                "null" => Expr::Literal(Value::Null),
                "undefined" => Expr::Undefined,
                _ => {
                    let mut properties = Vec::new();

                    while self.eat('.') {
                        properties.push(self.ident()?);
                    }

                    Expr::Path {
                        name,
                        properties,
                        offset,
                    }
                },
            }),
            Token::Punct('(') => {
                let expr = self.expression()?;

                self.expect(')')?;
                Ok(expr)
            },
            Token::Punct('[') => {
                let mut elements = Vec::new();

                while !self.eat(']') {
                    elements.push(self.expression()?);

                    if !self.eat(',') {
                        self.expect(']')?;
                        break;
                    }
                }

                Ok(Expr::Array(elements))
            },
            Token::Punct('{') => {
                let mut entries = Vec::new();

                while !self.eat('}') {
                    let key = match self.next()? {
                        Spanned { token: Token::Ident(key) | Token::Str(key), .. } => key,
                        Spanned { token: Token::Num(number), .. } => number.to_string(),
                        Spanned { token, offset } => return Err(unexpected(format!("{token:?}"), offset)),
                    };

                    self.expect(':')?;
                    entries.push((key, self.expression()?));

                    if !self.eat(',') {
                        self.expect('}')?;
                        break;
                    }
                }

                Ok(Expr::Object(entries))
            },
            token => Err(unexpected(format!("{token:?}"), offset)),
        }
    }
}

/// A runtime value. Objects live in the interpreter's arena so every binding to the same object
/// sees the same properties.
#[derive(Debug, Clone, PartialEq)]
enum Val {
    Undefined,
    Primitive(Value),
    Array(Vec<Val>),
    Object(usize),
}

impl Val {
    fn to_number(&self) -> Option<f64> {
        match self {
            Val::Primitive(Value::Number(n)) => n.as_f64(),
            Val::Primitive(Value::Bool(b)) => Some(f64::from(u8::from(*b))),
            Val::Primitive(Value::Null) => Some(0.0),
            Val::Primitive(Value::String(s)) if s.trim().is_empty() => Some(0.0),
            Val::Primitive(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    fn is_nullish(&self) -> bool {
        matches!(self, Val::Undefined | Val::Primitive(Value::Null))
    }

    fn strict_equals(&self, other: &Val) -> bool {
        match (self, other) {
            (Val::Undefined, Val::Undefined) => true,
            (Val::Object(a), Val::Object(b)) => a == b,
            (Val::Primitive(Value::Number(a)), Val::Primitive(Value::Number(b))) => {
                a.as_f64() == b.as_f64()
            },
            (Val::Primitive(a), Val::Primitive(b)) => a == b,
            _ => false,
        }
    }

    fn loose_equals(&self, other: &Val) -> bool {
        if self.strict_equals(other) {
            return true;
        }

        if self.is_nullish() || other.is_nullish() {
            return self.is_nullish() && other.is_nullish();
        }

        match (self, other) {
            (Val::Primitive(_), Val::Primitive(_)) => {
                match (self.to_number(), other.to_number()) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                }
            },
            _ => false,
        }
    }

    fn ordering(&self, other: &Val) -> Option<Ordering> {
        if let (Val::Primitive(Value::String(a)), Val::Primitive(Value::String(b))) = (self, other) {
            return Some(a.cmp(b));
        }

        self.to_number()?.partial_cmp(&other.to_number()?)
    }

    fn compare(&self, comparison: Comparison, other: &Val) -> bool {
        let ordering = || self.ordering(other);

        match comparison {
            Comparison::Less => ordering() == Some(Ordering::Less),
            Comparison::Greater => ordering() == Some(Ordering::Greater),
            Comparison::LessOrEqual => matches!(ordering(), Some(Ordering::Less | Ordering::Equal)),
            Comparison::GreaterOrEqual => matches!(ordering(), Some(Ordering::Greater | Ordering::Equal)),
            Comparison::Equal => self.loose_equals(other),
            Comparison::NotEqual => !self.loose_equals(other),
            Comparison::StrictEqual => self.strict_equals(other),
            Comparison::StrictNotEqual => !self.strict_equals(other),
        }
    }
}

#[derive(Debug, Default)]
struct Interpreter {
    bindings: HashMap<String, Val>,
    objects: Vec<Vec<(String, Val)>>,
    registered: Vec<Val>,
}

impl Interpreter {
    fn new() -> Self {
        let mut interpreter = Self::default();

        for name in PREDECLARED {
            interpreter.bindings.insert(name.to_string(), Val::Undefined);
        }

        interpreter
    }

    fn lookup(&self, name: &str, offset: usize) -> Result<&Val, ParseHtmlError> {
        self.bindings
            .get(name)
            .ok_or_else(|| unexpected(format!("undeclared identifier {name}"), offset))
    }

    fn property(&self, target: &Val, property: &str, offset: usize) -> Result<Val, ParseHtmlError> {
        match target {
            Val::Object(id) => Ok(self.objects[*id]
                .iter()
                .find(|(key, _)| key == property)
                .map_or(Val::Undefined, |(_, value)| value.clone())),
            target if target.is_nullish() => {
                Err(unexpected(format!("property {property} of a null value"), offset))
            },
            _ => Ok(Val::Undefined),
        }
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Val, ParseHtmlError> {
        Ok(match expr {
            Expr::Undefined => Val::Undefined,
            Expr::Literal(value) => Val::Primitive(value.clone()),
            Expr::Array(elements) => Val::Array(elements
                .iter()
                .map(|element| self.evaluate(element))
                .collect::<Result<_, _>>()?),
            Expr::Object(entries) => {
                let mut object: Vec<(String, Val)> = Vec::with_capacity(entries.len());

                for (key, expr) in entries {
                    let value = self.evaluate(expr)?;

                    set_entry(&mut object, key, value);
                }

                self.objects.push(object);
                Val::Object(self.objects.len() - 1)
            },
            Expr::Path { name, properties, offset } => {
                let mut value = self.lookup(name, *offset)?.clone();

                for property in properties {
                    value = self.property(&value, property, *offset)?;
                }

                value
            },
            Expr::Compare(left, comparison, right) => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;

                Val::Primitive(Value::Bool(left.compare(*comparison, &right)))
            },
        })
    }

    fn execute(&mut self, statement: &Statement) -> Result<(), ParseHtmlError> {
        match statement {
            Statement::Declare(declarations) => {
                for (name, value) in declarations {
                    let value = match value {
                        Some(expr) => self.evaluate(expr)?,
                        None => self.bindings.get(name).cloned().unwrap_or(Val::Undefined),
                    };

                    self.bindings.insert(name.clone(), value);
                }
            },
            Statement::Assign { name, properties, value, offset } => {
                let value = self.evaluate(value)?;
                let Some((last, path)) = properties.split_last() else {
                    self.bindings.insert(name.clone(), value);
                    return Ok(());
                };
                let mut target = self.lookup(name, *offset)?.clone();

                for property in path {
                    target = self.property(&target, property, *offset)?;
                }

                let Val::Object(id) = target else {
                    return Err(unexpected(format!("property {last} set on a non-object"), *offset));
                };

                set_entry(&mut self.objects[id], last, value);
            },
            Statement::BuildHover(arguments) => {
                let mut values = arguments
                    .iter()
                    .map(|argument| self.evaluate(argument))
                    .collect::<Result<Vec<_>, _>>()?;

                if values.len() < 2 {
                    return Err(ParseHtmlError::Malformed("BuildHover called without an item"));
                }

                self.registered.push(values.swap_remove(1));
            },
            Statement::Show(arguments) => {
                for argument in arguments {
                    self.evaluate(argument)?;
                }
            },
        }

        Ok(())
    }

    /// Converts a registered value to JSON. `path` holds the objects being converted above this
    /// value and `budget` the number of values that may still be produced.
    fn materialize(
        &self,
        value: &Val,
        path: &mut Vec<usize>,
        budget: &mut usize,
    ) -> Result<Value, ParseHtmlError> {
        *budget = budget.checked_sub(1)
            .ok_or(ParseHtmlError::Malformed("Registered item is too large"))?;

        if path.len() > MAX_DEPTH {
            return Err(ParseHtmlError::Malformed("Object nested too deeply"));
        }

        Ok(match value {
            Val::Undefined => Value::Null,
            Val::Primitive(value) => value.clone(),
            Val::Array(elements) => Value::Array(elements
                .iter()
                .map(|element| self.materialize(element, path, budget))
                .collect::<Result<_, _>>()?),
            Val::Object(id) => {
                if path.contains(id) {
                    return Err(ParseHtmlError::Malformed("Object refers to itself"));
                }

                path.push(*id);

                let mut map = Map::new();

                for (key, value) in &self.objects[*id] {
                    // undefined properties are dropped, as JSON.stringify does
                    if *value != Val::Undefined {
                        map.insert(key.clone(), self.materialize(value, path, budget)?);
                    }
                }

                path.pop();
                Value::Object(map)
            },
        })
    }
}

fn set_entry(object: &mut Vec<(String, Val)>, key: &str, value: Val) {
    match object.iter_mut().find(|(existing, _)| existing == key) {
        Some((_, existing)) => *existing = value,
        None => object.push((key.to_string(), value)),
    }
}

/// Runs a receipt script and returns the items registered with `BuildHover`, in order.
pub(crate) fn evaluate_receipt_script(script: &str) -> Result<Vec<Value>, ParseHtmlError> {
    let statements = Parser::new(script)?.script()?;
    let mut interpreter = Interpreter::new();

    for statement in &statements {
        interpreter.execute(statement)?;
    }

    let mut budget = MAX_VALUES;

    interpreter.registered
        .iter()
        .map(|value| interpreter.materialize(value, &mut Vec::new(), &mut budget))
        .collect()
}
