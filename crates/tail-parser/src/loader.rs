use tail_core::{Phrase, Program, Statement, TailError, Verb};

pub const COMMENT_MARKER: char = '#';
pub const PRINT_SHORTHAND_MARKER: char = '>';
pub const SPACE_ESCAPE: char = '+';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineMode {
    ShorthandPrint,
    VerbPairs,
}

#[derive(Debug)]
enum PairState {
    ExpectVerb,
    ExpectArgument(Verb),
}

pub fn load_script(source: &str) -> Result<Program, TailError> {
    let mut program = Program::new();

    for (index, raw_line) in source.lines().enumerate() {
        let line_number = index + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
            continue;
        }

        let statement = match classify_line(trimmed) {
            LineMode::ShorthandPrint => parse_shorthand_line(trimmed, line_number),
            LineMode::VerbPairs => parse_verb_pairs(trimmed, line_number)?,
        };
        program.push(statement);
    }

    Ok(program)
}

fn classify_line(trimmed: &str) -> LineMode {
    if trimmed.starts_with(PRINT_SHORTHAND_MARKER) {
        LineMode::ShorthandPrint
    } else {
        LineMode::VerbPairs
    }
}

fn parse_shorthand_line(trimmed: &str, line_number: usize) -> Statement {
    let text = trimmed[PRINT_SHORTHAND_MARKER.len_utf8()..].trim();
    Statement::single(line_number, Phrase::new(Verb::Println, text))
}

fn parse_verb_pairs(trimmed: &str, line_number: usize) -> Result<Statement, TailError> {
    let mut phrases = Vec::new();
    let mut state = PairState::ExpectVerb;

    for token in trimmed.split(' ') {
        state = match state {
            PairState::ExpectVerb => PairState::ExpectArgument(Verb::parse(token)),
            PairState::ExpectArgument(verb) => {
                phrases.push(Phrase::new(verb, decode_argument(token)));
                PairState::ExpectVerb
            }
        };
    }

    if let PairState::ExpectArgument(verb) = state {
        if !verb.allows_missing_argument() {
            return Err(TailError::at_line(
                "LOADER_MALFORMED_LINE",
                format!(
                    "Line {}: verb \"{}\" has no argument.",
                    line_number, verb
                ),
                line_number,
            ));
        }
        phrases.push(Phrase::new(verb, String::new()));
    }

    Statement::new(line_number, phrases).ok_or_else(|| {
        TailError::at_line(
            "LOADER_MALFORMED_LINE",
            format!("Line {}: no phrases found.", line_number),
            line_number,
        )
    })
}

fn decode_argument(token: &str) -> String {
    token.replace(SPACE_ESCAPE, " ")
}
