use crate::model::*;

/// One instruction line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Enter {
        category: Category,
        vehicle_id: String,
        timestamp: Secs,
    },
    Exit {
        vehicle_id: String,
        timestamp: Secs,
    },
}

/// First line of an instruction file: lot counts per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub car_lots: u32,
    pub motorcycle_lots: u32,
}

pub fn parse_header(line: &str) -> Result<Header, ParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(ParseError::WrongArity("header", 2, parts.len()));
    }
    Ok(Header {
        car_lots: parse_u32(parts[0])?,
        motorcycle_lots: parse_u32(parts[1])?,
    })
}

/// Parse `Enter <category> <vehicle> <secs>` or `Exit <vehicle> <secs>`.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(action) = parts.first() else {
        return Err(ParseError::Empty);
    };

    if action.eq_ignore_ascii_case("enter") {
        if parts.len() != 4 {
            return Err(ParseError::WrongArity("enter", 4, parts.len()));
        }
        let category = parts[1]
            .parse::<Category>()
            .map_err(|e| ParseError::UnknownCategory(e.0))?;
        Ok(Command::Enter {
            category,
            vehicle_id: parts[2].to_string(),
            timestamp: parse_i64(parts[3])?,
        })
    } else if action.eq_ignore_ascii_case("exit") {
        if parts.len() != 3 {
            return Err(ParseError::WrongArity("exit", 3, parts.len()));
        }
        Ok(Command::Exit {
            vehicle_id: parts[1].to_string(),
            timestamp: parse_i64(parts[2])?,
        })
    } else {
        Err(ParseError::UnknownAction(action.to_string()))
    }
}

fn parse_i64(s: &str) -> Result<i64, ParseError> {
    s.parse()
        .map_err(|e| ParseError::Parse(format!("bad timestamp {s:?}: {e}")))
}

fn parse_u32(s: &str) -> Result<u32, ParseError> {
    s.parse()
        .map_err(|e| ParseError::Parse(format!("bad lot count {s:?}: {e}")))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Parse(String),
    Empty,
    UnknownAction(String),
    UnknownCategory(String),
    WrongArity(&'static str, usize, usize),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Parse(s) => write!(f, "parse error: {s}"),
            ParseError::Empty => write!(f, "empty instruction"),
            ParseError::UnknownAction(a) => write!(f, "unknown action: {a}"),
            ParseError::UnknownCategory(c) => write!(f, "unknown vehicle category: {c}"),
            ParseError::WrongArity(what, expected, got) => {
                write!(f, "{what}: expected {expected} fields, got {got}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_header_two_counts() {
        assert_eq!(
            parse_header("3 4").unwrap(),
            Header {
                car_lots: 3,
                motorcycle_lots: 4
            }
        );
        assert_eq!(
            parse_header("  0   12 ").unwrap(),
            Header {
                car_lots: 0,
                motorcycle_lots: 12
            }
        );
    }

    #[test]
    fn parse_header_rejects_bad_input() {
        assert_eq!(parse_header("3"), Err(ParseError::WrongArity("header", 2, 1)));
        assert!(matches!(parse_header("3 -1"), Err(ParseError::Parse(_))));
        assert!(matches!(parse_header("a b"), Err(ParseError::Parse(_))));
    }

    #[test]
    fn parse_enter() {
        let cmd = parse_command("Enter motorcycle SGX1234A 1613541902").unwrap();
        assert_eq!(
            cmd,
            Command::Enter {
                category: Category::Motorcycle,
                vehicle_id: "SGX1234A".into(),
                timestamp: 1_613_541_902,
            }
        );
    }

    #[test]
    fn parse_exit() {
        let cmd = parse_command("Exit SGX1234A 1613545602").unwrap();
        match cmd {
            Command::Exit {
                vehicle_id,
                timestamp,
            } => {
                assert_eq!(vehicle_id, "SGX1234A");
                assert_eq!(timestamp, 1_613_545_602);
            }
            _ => panic!("expected Exit, got {cmd:?}"),
        }
    }

    #[test]
    fn action_is_case_insensitive() {
        assert!(parse_command("ENTER CAR A 1").is_ok());
        assert!(parse_command("exit A 1").is_ok());
    }

    #[test]
    fn wrong_arity() {
        assert_eq!(
            parse_command("Enter car SGX1234A"),
            Err(ParseError::WrongArity("enter", 4, 3))
        );
        assert_eq!(
            parse_command("Exit SGX1234A 1 2"),
            Err(ParseError::WrongArity("exit", 3, 4))
        );
    }

    #[test]
    fn unknown_action_and_category() {
        assert_eq!(
            parse_command("Park car A 1"),
            Err(ParseError::UnknownAction("Park".into()))
        );
        assert_eq!(
            parse_command("Enter truck A 1"),
            Err(ParseError::UnknownCategory("truck".into()))
        );
    }

    #[test]
    fn bad_timestamp() {
        assert!(matches!(
            parse_command("Exit A soon"),
            Err(ParseError::Parse(_))
        ));
    }

    #[test]
    fn blank_line_is_empty() {
        assert_eq!(parse_command("   "), Err(ParseError::Empty));
    }
}
