//! CDL Parser
//!
//! Reads the text form of a netCDF file as printed by `ncdump`:
//!
//! ```text
//! netcdf example {
//! dimensions:
//!     time = UNLIMITED ; // (4 currently)
//!     range = 5 ;
//! variables:
//!     double time(time) ;
//!         time:units = "seconds since 2023-04-01T12:00:00Z" ;
//! // global attributes:
//!         :Conventions = "CF/Radial" ;
//! data:
//!  time = 0, 1, 2, 3 ;
//! }
//! ```
//!
//! Only the pieces the checker needs are modelled. User-defined types and
//! groups are rejected.

use thiserror::Error;

use crate::dataset::schema::{AttrValue, DataType, Dataset, Variable, VariableData};

#[derive(Debug, Error, PartialEq)]
pub enum CdlError {
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Line {line}: expected {expected}, found '{found}'")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },
    #[error("Line {line}: invalid number '{text}'")]
    InvalidNumber { line: usize, text: String },
    #[error("Line {line}: unterminated string")]
    UnterminatedString { line: usize },
    #[error("Line {line}: unknown type '{name}'")]
    UnknownType { line: usize, name: String },
    #[error("Line {line}: {what} are not supported")]
    Unsupported { line: usize, what: String },
}

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Word(String),
    Str(String),
    LBrace,
    RBrace,
    LParen,
    RParen,
    Equals,
    Semi,
    Comma,
    Colon,
}

impl Tok {
    fn describe(&self) -> String {
        match self {
            Tok::Word(w) => w.clone(),
            Tok::Str(s) => format!("\"{}\"", s),
            Tok::LBrace => "{".to_string(),
            Tok::RBrace => "}".to_string(),
            Tok::LParen => "(".to_string(),
            Tok::RParen => ")".to_string(),
            Tok::Equals => "=".to_string(),
            Tok::Semi => ";".to_string(),
            Tok::Comma => ",".to_string(),
            Tok::Colon => ":".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct Token {
    tok: Tok,
    line: usize,
}

struct Lexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, CdlError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            if self.is_eof() {
                break;
            }
            let line = self.line;
            let ch = self.peek();
            let tok = match ch {
                '{' => self.single(Tok::LBrace),
                '}' => self.single(Tok::RBrace),
                '(' => self.single(Tok::LParen),
                ')' => self.single(Tok::RParen),
                '=' => self.single(Tok::Equals),
                ';' => self.single(Tok::Semi),
                ',' => self.single(Tok::Comma),
                ':' => self.single(Tok::Colon),
                '"' => Tok::Str(self.read_string()?),
                _ if is_word_char(ch) || ch == '\\' => Tok::Word(self.read_word()),
                _ => {
                    return Err(CdlError::UnexpectedToken {
                        line,
                        expected: "a name, value or punctuation".to_string(),
                        found: ch.to_string(),
                    })
                }
            };
            tokens.push(Token { tok, line });
        }
        Ok(tokens)
    }

    fn single(&mut self, tok: Tok) -> Tok {
        self.advance();
        tok
    }

    fn read_word(&mut self) -> String {
        let mut s = String::new();
        while !self.is_eof() {
            let ch = self.peek();
            if ch == '\\' {
                self.advance();
                if !self.is_eof() {
                    s.push(self.peek());
                    self.advance();
                }
            } else if is_word_char(ch) {
                s.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        s
    }

    fn read_string(&mut self) -> Result<String, CdlError> {
        let start_line = self.line;
        self.advance();
        let mut s = String::new();

        loop {
            if self.is_eof() {
                return Err(CdlError::UnterminatedString { line: start_line });
            }
            let ch = self.peek();
            self.advance();
            match ch {
                '"' => break,
                '\n' => {
                    self.line += 1;
                    s.push('\n');
                }
                '\\' => {
                    if self.is_eof() {
                        return Err(CdlError::UnterminatedString { line: start_line });
                    }
                    let esc = self.peek();
                    self.advance();
                    match esc {
                        'n' => s.push('\n'),
                        't' => s.push('\t'),
                        'r' => s.push('\r'),
                        'a' => s.push('\u{7}'),
                        'b' => s.push('\u{8}'),
                        'f' => s.push('\u{c}'),
                        'v' => s.push('\u{b}'),
                        '0'..='7' => s.push(self.read_octal(esc)),
                        other => s.push(other),
                    }
                }
                other => s.push(other),
            }
        }

        Ok(s)
    }

    /// Up to three octal digits, the first already consumed.
    fn read_octal(&mut self, first: char) -> char {
        let mut code = first.to_digit(8).unwrap_or(0);
        for _ in 0..2 {
            match self.peek().to_digit(8) {
                Some(d) if !self.is_eof() => {
                    code = code * 8 + d;
                    self.advance();
                }
                _ => break,
            }
        }
        char::from_u32(code).unwrap_or('\0')
    }

    fn skip_whitespace_and_comments(&mut self) {
        while !self.is_eof() {
            let ch = self.peek();
            if ch == '\n' {
                self.line += 1;
                self.advance();
            } else if ch.is_whitespace() {
                self.advance();
            } else if ch == '/' && self.peek_at(1) == '/' {
                while !self.is_eof() && self.peek() != '\n' {
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn peek(&self) -> char {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> char {
        self.input.get(self.pos + offset).copied().unwrap_or('\0')
    }

    fn advance(&mut self) {
        if self.pos < self.input.len() {
            self.pos += 1;
        }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '.' | '+' | '-' | '@' | '#')
}

/// A parsed right-hand side: either text or a list of numbers.
enum Values {
    Text(Vec<String>),
    Numbers(DataType, Vec<f64>),
}

/// Parser for CDL text.
pub struct CdlParser {
    tokens: Vec<Token>,
    pos: usize,
    dataset: Dataset,
}

impl CdlParser {
    pub fn new(input: &str) -> Result<Self, CdlError> {
        Ok(Self {
            tokens: Lexer::new(input).tokenize()?,
            pos: 0,
            dataset: Dataset::default(),
        })
    }

    pub fn parse(mut self) -> Result<Dataset, CdlError> {
        self.expect_keyword("netcdf")?;
        // the dataset name is informational
        self.expect_word("dataset name")?;
        self.expect(Tok::LBrace, "'{'")?;

        loop {
            let token = self.peek_token().ok_or(CdlError::UnexpectedEof)?.clone();
            let line = token.line;
            match &token.tok {
                Tok::RBrace => {
                    self.pos += 1;
                    break;
                }
                _ => match self.section_header() {
                    Some("dimensions") => {
                        self.pos += 2;
                        self.parse_dimensions()?;
                    }
                    Some("variables") => {
                        self.pos += 2;
                        self.parse_variables()?;
                    }
                    Some("data") => {
                        self.pos += 2;
                        self.parse_data()?;
                    }
                    Some("types") => {
                        return Err(CdlError::Unsupported {
                            line,
                            what: "user-defined types".to_string(),
                        })
                    }
                    Some("group") => {
                        return Err(CdlError::Unsupported {
                            line,
                            what: "groups".to_string(),
                        })
                    }
                    _ => {
                        return Err(CdlError::UnexpectedToken {
                            line,
                            expected: "a section header or '}'".to_string(),
                            found: token.tok.describe(),
                        })
                    }
                },
            }
        }

        if let Some(token) = self.peek_token() {
            return Err(CdlError::UnexpectedToken {
                line: token.line,
                expected: "end of input".to_string(),
                found: token.tok.describe(),
            });
        }

        tracing::debug!(
            dimensions = self.dataset.dimensions.len(),
            variables = self.dataset.variables.len(),
            attributes = self.dataset.attributes.len(),
            "parsed CDL dataset"
        );
        Ok(self.dataset)
    }

    /// A section header is a keyword followed by a colon that ends its line.
    /// `data:units = ...` on one line is an attribute of a variable named
    /// `data`, not a header.
    fn section_header(&self) -> Option<&'static str> {
        let word = match self.tokens.get(self.pos) {
            Some(Token {
                tok: Tok::Word(w), ..
            }) => w.as_str(),
            _ => return None,
        };
        let colon = self.tokens.get(self.pos + 1)?;
        if colon.tok != Tok::Colon {
            return None;
        }
        if word == "group" {
            return Some("group");
        }
        if let Some(next) = self.tokens.get(self.pos + 2) {
            if next.line == colon.line {
                return None;
            }
        }
        ["dimensions", "variables", "data", "types", "group"]
            .into_iter()
            .find(|k| *k == word)
    }

    fn at_section_end(&self) -> bool {
        match self.peek_token() {
            None => true,
            Some(t) if t.tok == Tok::RBrace => true,
            Some(_) => self.section_header().is_some(),
        }
    }

    fn parse_dimensions(&mut self) -> Result<(), CdlError> {
        while !self.at_section_end() {
            loop {
                let name = self.expect_word("dimension name")?;
                self.expect(Tok::Equals, "'='")?;
                let (len_text, line) = self.expect_word_with_line("dimension length")?;
                let len = if len_text.eq_ignore_ascii_case("UNLIMITED") {
                    0
                } else {
                    len_text
                        .parse::<usize>()
                        .map_err(|_| CdlError::InvalidNumber {
                            line,
                            text: len_text.clone(),
                        })?
                };
                self.dataset.dimensions.insert(name, len);
                if !self.eat(&Tok::Comma) {
                    break;
                }
            }
            self.expect(Tok::Semi, "';'")?;
        }
        Ok(())
    }

    fn parse_variables(&mut self) -> Result<(), CdlError> {
        while !self.at_section_end() {
            let token = self.peek_token().ok_or(CdlError::UnexpectedEof)?.clone();
            match &token.tok {
                Tok::Colon => {
                    self.pos += 1;
                    self.parse_attribute(None, None)?;
                }
                Tok::Word(word) => {
                    let next = self.tokens.get(self.pos + 1).map(|t| t.tok.clone());
                    let after = self.tokens.get(self.pos + 2).map(|t| t.tok.clone());
                    match (next, after) {
                        // var:att = ...
                        (Some(Tok::Colon), _) if self.dataset.has_variable(word) => {
                            self.pos += 2;
                            self.parse_attribute(Some(word.clone()), None)?;
                        }
                        // string :att = ...
                        (Some(Tok::Colon), _) => match DataType::from_cdl(word) {
                            Some(dtype) => {
                                self.pos += 2;
                                self.parse_attribute(None, Some(dtype))?;
                            }
                            None => {
                                return Err(CdlError::UnexpectedToken {
                                    line: token.line,
                                    expected: "an attribute of a declared variable".to_string(),
                                    found: format!("{}:", word),
                                })
                            }
                        },
                        // string var:att = ...
                        (Some(Tok::Word(var)), Some(Tok::Colon)) => {
                            let dtype = self.parse_type(word, token.line)?;
                            self.pos += 3;
                            self.parse_attribute(Some(var), Some(dtype))?;
                        }
                        _ => {
                            let dtype = self.parse_type(word, token.line)?;
                            self.pos += 1;
                            self.parse_declaration(dtype)?;
                        }
                    }
                }
                other => {
                    return Err(CdlError::UnexpectedToken {
                        line: token.line,
                        expected: "a declaration or attribute".to_string(),
                        found: other.describe(),
                    })
                }
            }
        }
        Ok(())
    }

    fn parse_type(&self, word: &str, line: usize) -> Result<DataType, CdlError> {
        DataType::from_cdl(word).ok_or_else(|| CdlError::UnknownType {
            line,
            name: word.to_string(),
        })
    }

    fn parse_declaration(&mut self, dtype: DataType) -> Result<(), CdlError> {
        loop {
            let name = self.expect_word("variable name")?;
            let mut dims = Vec::new();
            if self.eat(&Tok::LParen) {
                loop {
                    dims.push(self.expect_word("dimension name")?);
                    if !self.eat(&Tok::Comma) {
                        break;
                    }
                }
                self.expect(Tok::RParen, "')'")?;
            }
            let dim_refs: Vec<&str> = dims.iter().map(String::as_str).collect();
            let variable = Variable::new(name, dtype, &dim_refs);
            self.dataset = std::mem::take(&mut self.dataset).with_variable(variable);
            if !self.eat(&Tok::Comma) {
                break;
            }
        }
        self.expect(Tok::Semi, "';'")
    }

    /// Parses `att = values ;` after the `var:` or `:` prefix.
    fn parse_attribute(
        &mut self,
        variable: Option<String>,
        dtype: Option<DataType>,
    ) -> Result<(), CdlError> {
        let (name, line) = self.expect_word_with_line("attribute name")?;
        self.expect(Tok::Equals, "'='")?;
        let value = match self.parse_values()? {
            Values::Text(parts) => AttrValue::Text(parts.concat()),
            Values::Numbers(inferred, values) => AttrValue::Numeric {
                dtype: dtype.filter(|d| !d.is_text()).unwrap_or(inferred),
                values,
            },
        };
        self.expect(Tok::Semi, "';'")?;

        match variable {
            None => {
                self.dataset.attributes.insert(name, value);
            }
            Some(var_name) => match self.dataset.variable_mut(&var_name) {
                Some(var) => {
                    var.attributes.insert(name, value);
                }
                None => {
                    return Err(CdlError::UnexpectedToken {
                        line,
                        expected: "an attribute of a declared variable".to_string(),
                        found: format!("{}:{}", var_name, name),
                    })
                }
            },
        }
        Ok(())
    }

    fn parse_data(&mut self) -> Result<(), CdlError> {
        while !self.at_section_end() {
            let (name, line) = self.expect_word_with_line("variable name")?;
            self.expect(Tok::Equals, "'='")?;
            let values = self.parse_values()?;
            self.expect(Tok::Semi, "';'")?;

            let Some(var) = self.dataset.variable_mut(&name) else {
                tracing::warn!(line, variable = %name, "data for undeclared variable ignored");
                continue;
            };
            var.data = Some(match values {
                Values::Text(parts)
                    if var.dtype == DataType::String || var.dimensions.len() >= 2 =>
                {
                    VariableData::Rows(parts)
                }
                Values::Text(parts) => VariableData::Text(parts.concat()),
                Values::Numbers(_, numbers) => VariableData::Numbers(numbers),
            });
        }
        Ok(())
    }

    /// Comma separated values up to (not including) the terminating `;`.
    fn parse_values(&mut self) -> Result<Values, CdlError> {
        let mut texts = Vec::new();
        let mut numbers = Vec::new();
        let mut dtype: Option<DataType> = None;

        loop {
            let token = self.next_token()?;
            match token.tok {
                Tok::Str(s) => texts.push(s),
                Tok::Word(w) => {
                    let (value_type, value) = parse_number(&w, token.line)?;
                    dtype = Some(match (dtype, value_type) {
                        (Some(DataType::Double), _) | (_, Some(DataType::Double)) => {
                            DataType::Double
                        }
                        (Some(seen), _) => seen,
                        (None, Some(t)) => t,
                        (None, None) => DataType::Int,
                    });
                    numbers.push(value);
                }
                other => {
                    return Err(CdlError::UnexpectedToken {
                        line: token.line,
                        expected: "a value".to_string(),
                        found: other.describe(),
                    })
                }
            }
            if !self.eat(&Tok::Comma) {
                break;
            }
        }

        if numbers.is_empty() {
            Ok(Values::Text(texts))
        } else {
            Ok(Values::Numbers(dtype.unwrap_or(DataType::Int), numbers))
        }
    }

    fn peek_token(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next_token(&mut self) -> Result<Token, CdlError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(CdlError::UnexpectedEof)?;
        self.pos += 1;
        Ok(token)
    }

    fn eat(&mut self, tok: &Tok) -> bool {
        match self.peek_token() {
            Some(t) if &t.tok == tok => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn expect(&mut self, tok: Tok, expected: &str) -> Result<(), CdlError> {
        let token = self.next_token()?;
        if token.tok == tok {
            Ok(())
        } else {
            Err(CdlError::UnexpectedToken {
                line: token.line,
                expected: expected.to_string(),
                found: token.tok.describe(),
            })
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<(), CdlError> {
        let (word, line) = self.expect_word_with_line(keyword)?;
        if word == keyword {
            Ok(())
        } else {
            Err(CdlError::UnexpectedToken {
                line,
                expected: format!("'{}'", keyword),
                found: word,
            })
        }
    }

    fn expect_word(&mut self, what: &str) -> Result<String, CdlError> {
        self.expect_word_with_line(what).map(|(w, _)| w)
    }

    fn expect_word_with_line(&mut self, what: &str) -> Result<(String, usize), CdlError> {
        let token = self.next_token()?;
        match token.tok {
            Tok::Word(w) => Ok((w, token.line)),
            other => Err(CdlError::UnexpectedToken {
                line: token.line,
                expected: what.to_string(),
                found: other.describe(),
            }),
        }
    }
}

/// Parse a CDL numeric literal. Returns the type named by its suffix (or
/// `Double` when it has a fraction or exponent), or `None` for a plain
/// integer or a fill marker.
fn parse_number(text: &str, line: usize) -> Result<(Option<DataType>, f64), CdlError> {
    let invalid = || CdlError::InvalidNumber {
        line,
        text: text.to_string(),
    };
    let lower = text.to_ascii_lowercase();

    if lower == "_" {
        return Ok((None, f64::NAN));
    }
    let special = match lower.trim_end_matches('f') {
        "nan" => Some(f64::NAN),
        "infinity" | "+infinity" => Some(f64::INFINITY),
        "-infinity" => Some(f64::NEG_INFINITY),
        _ => None,
    };
    if let Some(value) = special {
        let dtype = if lower.ends_with('f') {
            DataType::Float
        } else {
            DataType::Double
        };
        return Ok((Some(dtype), value));
    }

    const SUFFIXES: [(&str, DataType); 10] = [
        ("ull", DataType::UInt64),
        ("ul", DataType::UInt),
        ("ub", DataType::UByte),
        ("us", DataType::UShort),
        ("ll", DataType::Int64),
        ("l", DataType::Int),
        ("u", DataType::UInt),
        ("b", DataType::Byte),
        ("s", DataType::Short),
        ("f", DataType::Float),
    ];

    let (body, suffix_type) = SUFFIXES
        .iter()
        .find(|(suffix, _)| lower.ends_with(suffix))
        .map(|(suffix, dtype)| (&lower[..lower.len() - suffix.len()], Some(*dtype)))
        .unwrap_or_else(|| match lower.strip_suffix('d') {
            Some(body) => (body, Some(DataType::Double)),
            None => (lower.as_str(), None),
        });

    if body.is_empty() {
        return Err(invalid());
    }
    let is_real = body.contains('.') || body.contains('e');
    let value = if is_real {
        body.parse::<f64>().map_err(|_| invalid())?
    } else {
        body.parse::<i64>().map_err(|_| invalid())? as f64
    };
    let dtype = match suffix_type {
        Some(t) => Some(t),
        None if is_real => Some(DataType::Double),
        None => None,
    };
    Ok((dtype, value))
}

/// Parse CDL text into a dataset.
pub fn parse_cdl(input: &str) -> Result<Dataset, CdlError> {
    CdlParser::new(input)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::schema::AttributeSource;

    const SAMPLE: &str = r#"netcdf cfrad.20230401_120000 {
dimensions:
	time = UNLIMITED ; // (3 currently)
	range = 4 ;
	sweep = 2, string_length = 8 ;
variables:
	double time(time) ;
		time:units = "seconds since 2023-04-01T12:00:00Z" ;
	float range(range) ;
		range:meters_to_center_of_first_gate = 75.f ;
	char sweep_mode(sweep, string_length) ;
	char time_coverage_start(string_length) ;
	short DBZ(time, range) ;
		DBZ:_FillValue = -32768s ;
		DBZ:scale_factor = 0.01f ;
	int scan_id, volume_number ;

// global attributes:
		:Conventions = "CF/Radial" ;
		:scan_id = 3 ;
		:comment = "line one\n", "line two" ;
data:

 time = 0, 1.5, 3 ;

 sweep_mode =
  "rhi",
  "sector" ;

 time_coverage_start = "2023-04-01T12:00:00Z" ;

 volume_number = _ ;
}
"#;

    #[test]
    fn test_parse_dimensions() {
        let ds = parse_cdl(SAMPLE).unwrap();
        assert_eq!(ds.dimension_len("time"), Some(0));
        assert_eq!(ds.dimension_len("range"), Some(4));
        assert_eq!(ds.dimension_len("sweep"), Some(2));
        assert_eq!(ds.dimension_len("string_length"), Some(8));
    }

    #[test]
    fn test_parse_variables_and_attributes() {
        let ds = parse_cdl(SAMPLE).unwrap();
        let names: Vec<&str> = ds.variables().map(|v| v.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "time",
                "range",
                "sweep_mode",
                "time_coverage_start",
                "DBZ",
                "scan_id",
                "volume_number"
            ]
        );

        let dbz = ds.variable("DBZ").unwrap();
        assert_eq!(dbz.dtype, DataType::Short);
        assert!(dbz.has_dimensions(&["time", "range"]));
        assert_eq!(
            dbz.attribute("_FillValue"),
            Some(&AttrValue::scalar(DataType::Short, -32768.0))
        );
        assert_eq!(dbz.attribute("scale_factor").unwrap().dtype(), DataType::Float);

        let range = ds.variable("range").unwrap();
        assert_eq!(
            range.attribute("meters_to_center_of_first_gate"),
            Some(&AttrValue::scalar(DataType::Float, 75.0))
        );
    }

    #[test]
    fn test_parse_global_attributes() {
        let ds = parse_cdl(SAMPLE).unwrap();
        assert_eq!(ds.text_attribute("Conventions"), Some("CF/Radial"));
        assert_eq!(
            ds.attribute("scan_id"),
            Some(&AttrValue::scalar(DataType::Int, 3.0))
        );
        assert_eq!(ds.text_attribute("comment"), Some("line one\nline two"));
    }

    #[test]
    fn test_parse_char_data() {
        let ds = parse_cdl(SAMPLE).unwrap();
        let modes = ds.variable("sweep_mode").unwrap();
        assert_eq!(
            modes.data,
            Some(VariableData::Rows(vec!["rhi".to_string(), "sector".to_string()]))
        );
        let start = ds.variable("time_coverage_start").unwrap();
        assert_eq!(start.char_string().unwrap(), "2023-04-01T12:00:00Z");
    }

    #[test]
    fn test_parse_numeric_data_with_fill() {
        let ds = parse_cdl(SAMPLE).unwrap();
        match &ds.variable("time").unwrap().data {
            Some(VariableData::Numbers(values)) => assert_eq!(values, &vec![0.0, 1.5, 3.0]),
            other => panic!("expected numbers, got {:?}", other),
        }
        match &ds.variable("volume_number").unwrap().data {
            Some(VariableData::Numbers(values)) => assert!(values[0].is_nan()),
            other => panic!("expected numbers, got {:?}", other),
        }
    }

    #[test]
    fn test_typed_string_attributes() {
        let cdl = r#"netcdf typed {
variables:
	float x ;
		string x:units = "m" ;

// global attributes:
		string :title = "typed title" ;
}"#;
        let ds = parse_cdl(cdl).unwrap();
        assert_eq!(ds.text_attribute("title"), Some("typed title"));
        assert_eq!(ds.variable("x").unwrap().text_attribute("units"), Some("m"));
    }

    #[test]
    fn test_variable_named_data_is_not_a_section() {
        let cdl = r#"netcdf odd {
variables:
	float data ;
		data:units = "m" ;
data:
 data = 1.f ;
}"#;
        let ds = parse_cdl(cdl).unwrap();
        let var = ds.variable("data").unwrap();
        assert_eq!(var.text_attribute("units"), Some("m"));
        assert_eq!(var.data, Some(VariableData::Numbers(vec![1.0])));
    }

    #[test]
    fn test_number_suffixes() {
        assert_eq!(parse_number("1b", 1).unwrap(), (Some(DataType::Byte), 1.0));
        assert_eq!(parse_number("-7s", 1).unwrap(), (Some(DataType::Short), -7.0));
        assert_eq!(parse_number("42", 1).unwrap(), (None, 42.0));
        assert_eq!(parse_number("42L", 1).unwrap(), (Some(DataType::Int), 42.0));
        assert_eq!(parse_number("42LL", 1).unwrap(), (Some(DataType::Int64), 42.0));
        assert_eq!(parse_number("7UL", 1).unwrap(), (Some(DataType::UInt), 7.0));
        assert_eq!(parse_number("7ULL", 1).unwrap(), (Some(DataType::UInt64), 7.0));
        assert_eq!(parse_number("200UB", 1).unwrap(), (Some(DataType::UByte), 200.0));
        assert_eq!(parse_number("1.5e-3f", 1).unwrap(), (Some(DataType::Float), 1.5e-3));
        assert_eq!(parse_number("2.", 1).unwrap(), (Some(DataType::Double), 2.0));
        assert_eq!(parse_number("3d", 1).unwrap(), (Some(DataType::Double), 3.0));
        assert!(parse_number("NaNf", 1).unwrap().1.is_nan());
        assert_eq!(
            parse_number("-Infinity", 1).unwrap(),
            (Some(DataType::Double), f64::NEG_INFINITY)
        );
        assert!(matches!(
            parse_number("abc", 9),
            Err(CdlError::InvalidNumber { line: 9, .. })
        ));
    }

    #[test]
    fn test_octal_escape() {
        let cdl = "netcdf e {\nvariables:\n\tchar c(n) ;\ndata:\n c = \"ab\\000\" ;\n}";
        let ds = parse_cdl(cdl).unwrap();
        assert_eq!(ds.variable("c").unwrap().data, Some(VariableData::Text("ab\0".to_string())));
    }

    #[test]
    fn test_rejects_groups_and_types() {
        let grouped = "netcdf g {\ngroup: inner {\n}\n}";
        assert!(matches!(
            parse_cdl(grouped),
            Err(CdlError::Unsupported { line: 2, .. })
        ));

        let typed = "netcdf t {\ntypes:\n  ubyte enum flag {a = 0} ;\n}";
        assert!(matches!(
            parse_cdl(typed),
            Err(CdlError::Unsupported { line: 2, .. })
        ));
    }

    #[test]
    fn test_unexpected_token_reports_line() {
        let cdl = "netcdf bad {\ndimensions:\n\ttime = ;\n}";
        assert!(matches!(
            parse_cdl(cdl),
            Err(CdlError::UnexpectedToken { line: 3, .. })
        ));
    }

    #[test]
    fn test_unterminated_string() {
        let cdl = "netcdf bad {\n// global attributes:\n :title = \"open ;\n}";
        assert!(matches!(
            parse_cdl(cdl),
            Err(CdlError::UnterminatedString { line: 3 })
        ));
    }
}
