/*
    This module reads grammars back from the text they render to
*/

mod lexer;

use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use itertools::{Either, Itertools};
use lexer::*;

use crate::error_handling::*;
use crate::grammar::{ContextFreeGrammar, GrammarErrorType, GrammarRule};
use crate::symbol::{split_concatenated, Symbol};

const NONTERMINALS_SECTION: &str = "Vt";
const TERMINALS_SECTION: &str = "Vh";
const START_SECTION: &str = "start";
const PRODUCTIONS_SECTION: &str = "P";

// A body made of only this symbol is an empty body
const EMPTY_BODY: &str = "ε";

#[derive(Debug)]
pub enum CompileErrorType {
    // A line does not have the separator its first word needs
    MissingSeparator,
    // A symbol set is not wrapped in braces
    UnmatchedBrace,
    // A `-` that does not start `->`
    StrayDash,
    // A token showed up where it does not belong
    UnexpectedToken(String),
    // A section name that is not Vt, Vh, start or P
    UnknownSection(String),
    // The same section is given twice
    DuplicateSection(String),
    // A required section never appears
    MissingSection(&'static str),
    // A rule line before `P:`
    RuleOutsideProductions,
    // Rule body text that cannot be split into declared symbols
    UnknownSymbols(String),
    // The sections parsed but do not form a valid grammar
    InvalidGrammar(GrammarErrorType),
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompileErrorType::FileError(a), CompileErrorType::FileError(b)) => a.kind() == b.kind(),
            (CompileErrorType::UnexpectedToken(a), CompileErrorType::UnexpectedToken(b)) => a == b,
            (CompileErrorType::UnknownSection(a), CompileErrorType::UnknownSection(b)) => a == b,
            (CompileErrorType::DuplicateSection(a), CompileErrorType::DuplicateSection(b)) => a == b,
            (CompileErrorType::MissingSection(a), CompileErrorType::MissingSection(b)) => a == b,
            (CompileErrorType::UnknownSymbols(a), CompileErrorType::UnknownSymbols(b)) => a == b,
            (CompileErrorType::InvalidGrammar(a), CompileErrorType::InvalidGrammar(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::MissingSeparator => write!(f, "Expected `=`, `:` or `->` after the first word"),
            CompileErrorType::UnmatchedBrace => write!(f, "Symbol sets must be written as `{{ a, b, c }}`"),
            CompileErrorType::StrayDash => write!(f, "Expected `>` after `-`"),
            CompileErrorType::UnexpectedToken(token) => write!(f, "Unexpected `{}` encountered", token),
            CompileErrorType::UnknownSection(name) => write!(f, "Unknown section `{}`", name),
            CompileErrorType::DuplicateSection(name) => write!(f, "Section `{}` is given more than once", name),
            CompileErrorType::MissingSection(name) => write!(f, "Section `{}` is missing", name),
            CompileErrorType::RuleOutsideProductions => write!(f, "Rules must come after `P:`"),
            CompileErrorType::UnknownSymbols(text) => write!(f, "Could not split `{}` into declared symbols", text),
            CompileErrorType::InvalidGrammar(e) => write!(f, "{}", e),
            CompileErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

fn io_error(error: std::io::Error, file: PathBuf) -> CompileError {
    CompileErrorType::FileError(error).at(Location::file(file))
}

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

// A rule whose body words are not yet split into symbols
#[derive(PartialEq, Debug)]
struct RawRule {
    head: Symbol,
    body: Vec<String>
}

#[derive(PartialEq, Debug)]
enum Line {
    Vocabulary(String, Vec<Symbol>),
    Start(Symbol),
    Productions,
    Rule(RawRule)
}

fn expect_ident(token: &Token) -> Result<&str> {
    match token {
        Token::Ident(text) => Ok(text),
        other => Err(CompileErrorType::UnexpectedToken(other.to_string()))
    }
}

fn parse_set(tokens: &[Token]) -> Result<Vec<Symbol>> {
    let inner = match tokens {
        [Token::OpenBrace, inner @ .., Token::CloseBrace] => inner,
        _ => return Err(CompileErrorType::UnmatchedBrace)
    };

    if inner.is_empty() {
        return Ok(Vec::new());
    }

    inner.split(|t| *t == Token::Comma).map(|item| match item {
        [Token::Ident(text)] => Ok(Symbol::from(text.as_str())),
        [] => Err(CompileErrorType::UnexpectedToken(Token::Comma.to_string())),
        [Token::Ident(_), token, ..] | [token, ..] => Err(CompileErrorType::UnexpectedToken(token.to_string()))
    }).collect()
}

fn parse_colon_line(name: &str, tokens: &[Token]) -> Result<Line> {
    match name {
        START_SECTION => match tokens {
            [token] => Ok(Line::Start(Symbol::from(expect_ident(token)?))),
            [_, extra, ..] => Err(CompileErrorType::UnexpectedToken(extra.to_string())),
            [] => Err(CompileErrorType::MissingSection(START_SECTION))
        },
        PRODUCTIONS_SECTION => match tokens.first() {
            None => Ok(Line::Productions),
            Some(token) => Err(CompileErrorType::UnexpectedToken(token.to_string()))
        },
        _ => Err(CompileErrorType::UnknownSection(name.to_string()))
    }
}

fn parse_line(tokens: &[Token]) -> Result<Line> {
    let name = match tokens.first() {
        Some(token) => expect_ident(token)?,
        None => return Err(CompileErrorType::MissingSeparator)
    };

    match tokens.get(1) {
        Some(Token::Equals) => Ok(Line::Vocabulary(name.to_string(), parse_set(&tokens[2..])?)),
        Some(Token::Colon) => parse_colon_line(name, &tokens[2..]),
        Some(Token::Arrow) => {
            let body = tokens[2..].iter()
                .map(|token| expect_ident(token).map(str::to_string))
                .collect::<Result<Vec<_>>>()?;
            Ok(Line::Rule(RawRule {
                head: Symbol::from(name),
                body
            }))
        }
        _ => Err(CompileErrorType::MissingSeparator)
    }
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<(Line, Location)> {
    lexer::lex_line(line)
        .and_then(|lexed_line| parse_line(&lexed_line))
        .map(|parsed| (parsed, location.clone()))
        .map_err(|error| error.at(location))
}

fn is_content_line(line: &String) -> bool {
    let trimmed = line.trim_start();
    !trimmed.is_empty() && !trimmed.starts_with(';')
}

// Numbers lines from one and drops blank and comment lines, keeping errors
fn numbered_content_lines(
    lines: impl Iterator<Item = LineResult<String>>
) -> impl Iterator<Item = (usize, LineResult<String>)> {
    lines.enumerate()
        .filter(|(_, line)| line.as_ref().is_ok_and(is_content_line) || line.is_err())
        .map(|(num, line)| (num + 1, line))
}

fn resolve_body(rule: &RawRule, vocabulary: &[Symbol]) -> Result<Vec<Symbol>> {
    if let [word] = &rule.body[..] {
        if word == EMPTY_BODY {
            return Ok(Vec::new());
        }
    }

    let mut body = Vec::new();
    for word in &rule.body {
        let symbols = split_concatenated(word, vocabulary)
            .ok_or_else(|| CompileErrorType::UnknownSymbols(word.clone()))?;
        body.extend(symbols);
    }

    Ok(body)
}

#[derive(Default)]
struct Sections {
    nonterminals: Option<Vec<Symbol>>,
    terminals: Option<Vec<Symbol>>,
    start: Option<Symbol>,
    productions: bool,
    rules: Vec<(RawRule, Location)>
}

impl Sections {
    fn add(&mut self, line: Line, location: &Location) -> Result<()> {
        match line {
            Line::Vocabulary(name, symbols) => {
                let slot = match name.as_str() {
                    NONTERMINALS_SECTION => &mut self.nonterminals,
                    TERMINALS_SECTION => &mut self.terminals,
                    _ => return Err(CompileErrorType::UnknownSection(name))
                };
                if slot.replace(symbols).is_some() {
                    return Err(CompileErrorType::DuplicateSection(name));
                }
            }
            Line::Start(symbol) => {
                if self.start.replace(symbol).is_some() {
                    return Err(CompileErrorType::DuplicateSection(START_SECTION.to_string()));
                }
            }
            Line::Productions => {
                if self.productions {
                    return Err(CompileErrorType::DuplicateSection(PRODUCTIONS_SECTION.to_string()));
                }
                self.productions = true;
            }
            Line::Rule(rule) => {
                if !self.productions {
                    return Err(CompileErrorType::RuleOutsideProductions);
                }
                self.rules.push((rule, location.clone()));
            }
        }

        Ok(())
    }
}

fn grammar_from_lines(lines: Vec<(Line, Location)>, path: &Path) -> FileResult<ContextFreeGrammar> {
    let file_error = |error: CompileErrorType| error.at(Location::file(path.to_path_buf()));

    let mut sections = Sections::default();
    let mut errors = Vec::new();
    for (line, location) in lines {
        if let Err(error) = sections.add(line, &location) {
            errors.push(error.at(location));
        }
    }

    let Sections { nonterminals, terminals, start, productions, rules } = sections;
    let missing = [
        (NONTERMINALS_SECTION, nonterminals.is_none()),
        (TERMINALS_SECTION, terminals.is_none()),
        (START_SECTION, start.is_none()),
        (PRODUCTIONS_SECTION, !productions)
    ];
    errors.extend(missing.into_iter()
        .filter(|(_, is_missing)| *is_missing)
        .map(|(name, _)| file_error(CompileErrorType::MissingSection(name))));

    let (Some(nonterminals), Some(terminals), Some(start)) = (nonterminals, terminals, start) else {
        return Err(errors);
    };

    let vocabulary = nonterminals.iter().chain(&terminals).cloned().collect_vec();
    let (resolved, rule_errors): (Vec<_>, Vec<_>) = rules.into_iter().partition_map(|(rule, location)| {
        match resolve_body(&rule, &vocabulary) {
            Ok(body) => Either::Left(GrammarRule::new(rule.head, body)),
            Err(error) => Either::Right(error.at(location))
        }
    });
    errors.extend(rule_errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    ContextFreeGrammar::new(nonterminals, terminals, start, resolved).map_err(|grammar_errors| {
        grammar_errors.into_iter()
            .map(|e| file_error(CompileErrorType::InvalidGrammar(e)))
            .collect_vec()
    })
}

fn parse_lines(lines: impl Iterator<Item = LineResult<String>>, path: &Path) -> FileResult<ContextFreeGrammar> {
    let parsed_lines = numbered_content_lines(lines).map(|(num, line_res)| {
        line_res.and_then(|line| parse_lex_line(&line, Location {
            file: path.to_path_buf(),
            line: num
        }))
    });

    let (lines, errors): (Vec<_>, Vec<_>) = parsed_lines.partition_map(|line| match line {
        Ok(parsed) => Either::Left(parsed),
        Err(error) => Either::Right(error)
    });
    if !errors.is_empty() {
        return Err(errors);
    }

    let grammar = grammar_from_lines(lines, path)?;
    log::debug!("parsed grammar from {} with {} rules", path.display(), grammar.rules().len());
    Ok(grammar)
}

// Parses grammar text, reporting errors against `path`.
pub fn parse_str(text: &str, path: &Path) -> FileResult<ContextFreeGrammar> {
    parse_lines(text.lines().map(|line| Ok(line.to_string())), path)
}

pub fn parse_file(path: &Path) -> FileResult<ContextFreeGrammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path.to_path_buf())])?;
    let lines = std::io::BufReader::new(file)
        .lines()
        .map(|line| line.map_err(|e| io_error(e, path.to_path_buf())));

    parse_lines(lines, path)
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;
    use crate::grammar::tests::textbook_grammar;

    fn ident(text: &str) -> Token {
        Token::Ident(text.to_string())
    }

    fn symbols(texts: &[&str]) -> Vec<Symbol> {
        texts.iter().map(|&t| Symbol::from(t)).collect()
    }

    fn at(line: usize) -> Location {
        Location {
            file: PathBuf::from("test.cfg"),
            line
        }
    }

    fn parse_test(text: &str) -> FileResult<ContextFreeGrammar> {
        parse_str(text, Path::new("test.cfg"))
    }

    #[test]
    fn parse_normal_set() {
        let lines = vec![
            vec![Token::OpenBrace, ident("x"), Token::Comma, ident("y"), Token::CloseBrace],
            vec![Token::OpenBrace, Token::CloseBrace]
        ];
        let answers = vec![symbols(&["x", "y"]), vec![]];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(parse_set(&line), Ok(answer));
        }
    }

    #[test]
    fn parse_malformed_set() {
        assert_eq!(parse_set(&[ident("x")]), Err(CompileErrorType::UnmatchedBrace));
        assert_eq!(
            parse_set(&[Token::OpenBrace, ident("x"), ident("y"), Token::CloseBrace]),
            Err(CompileErrorType::UnexpectedToken("y".to_string()))
        );
        assert_eq!(
            parse_set(&[Token::OpenBrace, ident("x"), Token::Comma, Token::CloseBrace]),
            Err(CompileErrorType::UnexpectedToken(",".to_string()))
        );
    }

    #[test]
    fn parse_normal_lines() {
        let lines = vec!["Vh = { q, A }", "start: q", "P:", "A -> x A BC"];
        let answers = vec![
            Line::Vocabulary("Vh".to_string(), symbols(&["q", "A"])),
            Line::Start(Symbol::from("q")),
            Line::Productions,
            Line::Rule(RawRule {
                head: Symbol::from("A"),
                body: vec!["x".to_string(), "A".to_string(), "BC".to_string()]
            })
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(parse_line(&lexer::lex_line(line).unwrap()), Ok(answer));
        }
    }

    #[test]
    fn parse_malformed_lines() {
        let lines = vec!["q xA", "Q: a", "start: q r", "P: q", "-> x", "= { }"];
        let answers = vec![
            CompileErrorType::MissingSeparator,
            CompileErrorType::UnknownSection("Q".to_string()),
            CompileErrorType::UnexpectedToken("r".to_string()),
            CompileErrorType::UnexpectedToken("q".to_string()),
            CompileErrorType::UnexpectedToken("->".to_string()),
            CompileErrorType::UnexpectedToken("=".to_string())
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(parse_line(&lexer::lex_line(line).unwrap()), Err(answer));
        }
    }

    #[test]
    fn parse_rendered_grammar() {
        let grammar = textbook_grammar();
        assert_eq!(parse_test(&grammar.to_string()), Ok(grammar));
    }

    #[test]
    fn parse_spaced_and_epsilon_bodies() {
        let text = "\
; balanced brackets
Vt = { open, close }
Vh = { S }
start: S

P:
S -> open S close S
S -> ε
";
        let grammar = parse_test(text).unwrap();
        assert_eq!(grammar.rules(), &[
            GrammarRule::new("S", ["open", "S", "close", "S"]),
            GrammarRule::new("S", Vec::<&str>::new())
        ]);
    }

    #[test]
    fn parse_collects_line_errors() {
        let text = "\
Vt = { x
Vh = { S }

start: S
S -> x
";
        assert_eq!(parse_test(text), Err(vec![
            CompileError { location: at(1), error: CompileErrorType::UnmatchedBrace }
        ]));

        let text = "\
Vt = { x }
Vh = { S }
Vh = { T }
S -> x
";
        assert_eq!(parse_test(text), Err(vec![
            CompileError { location: at(3), error: CompileErrorType::DuplicateSection("Vh".to_string()) },
            CompileError { location: at(4), error: CompileErrorType::RuleOutsideProductions },
            CompileError { location: at(0), error: CompileErrorType::MissingSection("start") },
            CompileError { location: at(0), error: CompileErrorType::MissingSection("P") }
        ]));
    }

    #[test]
    fn parse_unknown_body_and_invalid_grammar() {
        let text = "\
Vt = { x }
Vh = { S }
start: S
P:
S -> xw
x -> S
";
        assert_eq!(parse_test(text), Err(vec![
            CompileError { location: at(5), error: CompileErrorType::UnknownSymbols("xw".to_string()) }
        ]));

        let text = "\
Vt = { x }
Vh = { S }
start: S
P:
x -> S
";
        assert_eq!(parse_test(text), Err(vec![
            CompileError {
                location: at(0),
                error: CompileErrorType::InvalidGrammar(GrammarErrorType::UndefinedHead(Symbol::from("x")))
            }
        ]));
    }

    #[test]
    fn parse_refuses_declared_epsilon() {
        let text = "\
Vt = { ε }
Vh = { S }
start: S
P:
S -> ε
";
        assert_eq!(parse_test(text), Err(vec![
            CompileError {
                location: at(0),
                error: CompileErrorType::InvalidGrammar(GrammarErrorType::ReservedSymbol(Symbol::from("ε")))
            }
        ]));
    }

    #[test]
    fn parse_normal_file() {
        let path = PathBuf::from("example_data/textbook.cfg");
        assert_eq!(parse_file(&path), Ok(textbook_grammar()));
    }

    #[test]
    fn parse_malformed_file() {
        let path = PathBuf::from("example_data/malformed.cfg");

        assert_eq!(parse_file(&path).unwrap_err(), vec![
            CompileError {
                location: Location {
                    file: path.clone(),
                    line: 4
                },
                error: CompileErrorType::StrayDash
            },
            CompileError {
                location: Location {
                    file: path.clone(),
                    line: 9
                },
                error: CompileErrorType::MissingSeparator
            }
        ]);
    }

    #[test]
    fn parse_missing_file() {
        let path = PathBuf::from("example_data/does_not_exist.cfg");
        let errors = parse_file(&path).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0].error, CompileErrorType::FileError(_)));
    }
}
