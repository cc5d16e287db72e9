use crate::modes::Policy;

/// A parsed line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Free text to answer.
    Query(String),
    Login { username: String, password: String },
    Logout,
    /// Rate the most recent submission.
    Rate(i64),
    Mode(Policy),
    History,
    Dashboard,
    Help,
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnknownCommand(String),
    Usage(&'static str),
    InvalidArgument(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnknownCommand(name) => {
                write!(f, "Unknown command: /{} (try /help)", name)
            }
            ParseError::Usage(usage) => write!(f, "Usage: {}", usage),
            ParseError::InvalidArgument(message) => write!(f, "{}", message),
        }
    }
}

pub const HELP: &str = "\
Commands:
  /login <username> <password>  Log in
  /mode <rule|ai|hybrid>        Choose the response mode
  /rate <1-5>                   Rate the latest response
  /history                      Show chat history
  /dashboard                    Show query analytics
  /logout                       End the session
  /help                         Show this help
  /quit                         Exit
Anything else is sent as a question. Start with // to ask something beginning with /.";

/// Parse one input line. Lines not starting with `/` are queries, passed
/// through untrimmed so blank input reaches validation. A leading `//`
/// sends the rest of the line, starting with `/`, as a query.
pub fn parse_line(line: &str) -> Result<Command, ParseError> {
    let trimmed = line.trim();
    if let Some(escaped) = trimmed.strip_prefix("//") {
        return Ok(Command::Query(format!("/{}", escaped)));
    }
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Ok(Command::Query(line.trim_end_matches(['\r', '\n']).to_string()));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = parts.collect();

    match name.as_str() {
        "login" => match args.as_slice() {
            [username, password] => Ok(Command::Login {
                username: username.to_string(),
                password: password.to_string(),
            }),
            _ => Err(ParseError::Usage("/login <username> <password>")),
        },
        "logout" => Ok(Command::Logout),
        "rate" => match args.as_slice() {
            [value] => value.parse::<i64>().map(Command::Rate).map_err(|_| {
                ParseError::InvalidArgument(format!("Rating must be a number, got '{}'", value))
            }),
            _ => Err(ParseError::Usage("/rate <1-5>")),
        },
        "mode" => match args.as_slice() {
            [policy] => policy
                .parse::<Policy>()
                .map(Command::Mode)
                .map_err(ParseError::InvalidArgument),
            _ => Err(ParseError::Usage("/mode <rule|ai|hybrid>")),
        },
        "history" => Ok(Command::History),
        "dashboard" => Ok(Command::Dashboard),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}
