use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verb {
    Println,
    Print,
    Goto,
    Prompt,
    On,
    Set,
    Clear,
    If,
    Unless,
    Match,
    Visit,
    Return,
    Wait,
    Chance,
    Time,
    Chapter,
    End,
    Other(String),
}

impl Verb {
    /// Case-insensitive; unrecognized text is kept lowercased in `Other`.
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        match lowered.as_str() {
            "println" => Self::Println,
            "print" => Self::Print,
            "goto" => Self::Goto,
            "prompt" => Self::Prompt,
            "on" => Self::On,
            "set" => Self::Set,
            "clear" => Self::Clear,
            "if" => Self::If,
            "unless" => Self::Unless,
            "match" => Self::Match,
            "visit" => Self::Visit,
            "return" => Self::Return,
            "wait" => Self::Wait,
            "chance" => Self::Chance,
            "time" => Self::Time,
            "chapter" => Self::Chapter,
            "end" => Self::End,
            _ => Self::Other(lowered),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Println => "println",
            Self::Print => "print",
            Self::Goto => "goto",
            Self::Prompt => "prompt",
            Self::On => "on",
            Self::Set => "set",
            Self::Clear => "clear",
            Self::If => "if",
            Self::Unless => "unless",
            Self::Match => "match",
            Self::Visit => "visit",
            Self::Return => "return",
            Self::Wait => "wait",
            Self::Chance => "chance",
            Self::Time => "time",
            Self::Chapter => "chapter",
            Self::End => "end",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Verbs that may close a line without an argument token.
    pub fn allows_missing_argument(&self) -> bool {
        matches!(self, Self::End | Self::Return)
    }
}

impl From<String> for Verb {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Verb> for String {
    fn from(value: Verb) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One instruction or guard: a verb and its raw argument text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub verb: Verb,
    pub argument: String,
}

impl Phrase {
    pub fn new(verb: Verb, argument: impl Into<String>) -> Self {
        Self {
            verb,
            argument: argument.into(),
        }
    }

    pub fn is_chapter(&self, label: &str) -> bool {
        self.verb == Verb::Chapter && self.argument == label
    }

    pub fn is_end(&self) -> bool {
        self.verb == Verb::End
    }
}

/// A non-empty run of phrases loaded from one physical source line. The first
/// phrase is the primary instruction; the rest act as guards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    line: usize,
    phrases: Vec<Phrase>,
}

impl Statement {
    pub fn new(line: usize, phrases: Vec<Phrase>) -> Option<Self> {
        if phrases.is_empty() {
            return None;
        }
        Some(Self { line, phrases })
    }

    pub fn single(line: usize, phrase: Phrase) -> Self {
        Self {
            line,
            phrases: vec![phrase],
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Phrase> {
        self.phrases.get(index)
    }

    pub fn primary(&self) -> &Phrase {
        &self.phrases[0]
    }

    pub fn is_chapter(&self, label: &str) -> bool {
        self.primary().is_chapter(label)
    }
}

/// Program counter: the statement index and the phrase index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bookmark {
    pub statement: usize,
    pub phrase: usize,
}

impl Bookmark {
    pub fn new(statement: usize, phrase: usize) -> Self {
        Self { statement, phrase }
    }

    pub fn statement_start(statement: usize) -> Self {
        Self {
            statement,
            phrase: 0,
        }
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.statement, self.phrase)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Statement> {
        self.statements.get(index)
    }

    pub fn phrase_at(&self, bookmark: Bookmark) -> Option<&Phrase> {
        self.get(bookmark.statement)?.get(bookmark.phrase)
    }

    /// Earliest statement heading chapter `label`.
    pub fn find_chapter(&self, label: &str) -> Option<usize> {
        self.statements
            .iter()
            .position(|statement| statement.is_chapter(label))
    }

    /// The phrase after `bookmark` in program order. May point past the last
    /// statement.
    pub fn next_phrase(&self, bookmark: Bookmark) -> Bookmark {
        let statement_len = self.get(bookmark.statement).map_or(0, Statement::len);
        if bookmark.phrase + 1 < statement_len {
            Bookmark::new(bookmark.statement, bookmark.phrase + 1)
        } else {
            self.next_statement(bookmark)
        }
    }

    pub fn next_statement(&self, bookmark: Bookmark) -> Bookmark {
        Bookmark::statement_start(bookmark.statement + 1)
    }
}

#[cfg(test)]
mod types_tests {
    use super::*;

    fn statement(line: usize, phrases: &[(&str, &str)]) -> Statement {
        Statement::new(
            line,
            phrases
                .iter()
                .map(|(verb, argument)| Phrase::new(Verb::parse(verb), *argument))
                .collect(),
        )
        .expect("statement should not be empty")
    }

    fn sample_program() -> Program {
        let mut program = Program::new();
        program.push(statement(1, &[("chapter", "start")]));
        program.push(statement(2, &[("prompt", "Go? "), ("on", "yes")]));
        program.push(statement(3, &[("chapter", "start")]));
        program.push(statement(4, &[("end", "")]));
        program
    }

    #[test]
    fn verb_parse_is_case_insensitive_and_keeps_unknown_text() {
        assert_eq!(Verb::parse("PrintLn"), Verb::Println);
        assert_eq!(Verb::parse("GOTO"), Verb::Goto);
        assert_eq!(Verb::parse("Dance"), Verb::Other("dance".to_string()));
        assert_eq!(Verb::parse("Dance").as_str(), "dance");
    }

    #[test]
    fn only_end_and_return_allow_missing_argument() {
        assert!(Verb::End.allows_missing_argument());
        assert!(Verb::Return.allows_missing_argument());
        assert!(!Verb::Goto.allows_missing_argument());
        assert!(!Verb::Other("x".to_string()).allows_missing_argument());
    }

    #[test]
    fn statement_rejects_empty_phrase_list() {
        assert!(Statement::new(1, Vec::new()).is_none());
    }

    #[test]
    fn find_chapter_returns_earliest_match() {
        let program = sample_program();
        assert_eq!(program.find_chapter("start"), Some(0));
        assert_eq!(program.find_chapter("Start"), None);
        assert_eq!(program.find_chapter("missing"), None);
    }

    #[test]
    fn next_phrase_walks_phrases_then_statements() {
        let program = sample_program();
        assert_eq!(
            program.next_phrase(Bookmark::new(1, 0)),
            Bookmark::new(1, 1)
        );
        assert_eq!(
            program.next_phrase(Bookmark::new(1, 1)),
            Bookmark::new(2, 0)
        );
        assert_eq!(
            program.next_statement(Bookmark::new(1, 0)),
            Bookmark::new(2, 0)
        );
        let past_end = program.next_phrase(Bookmark::new(3, 0));
        assert_eq!(past_end, Bookmark::new(4, 0));
        assert!(program.phrase_at(past_end).is_none());
    }

    #[test]
    fn program_serializes_verbs_as_lowercase_text() {
        let program = sample_program();
        let json = serde_json::to_value(&program).expect("program should serialize");
        assert_eq!(json["statements"][1]["phrases"][0]["verb"], "prompt");
        assert_eq!(json["statements"][1]["line"], 2);

        let phrase: Phrase = serde_json::from_str(r#"{"verb":"GoTo","argument":"cave"}"#)
            .expect("phrase should deserialize");
        assert_eq!(phrase, Phrase::new(Verb::Goto, "cave"));
    }
}
