//! Line-oriented terminal front end.
//!
//! Reads one line at a time, hands it to the [`Assistant`] and writes the
//! result. Each line is fully handled before the next is read.

mod commands;
mod render;

pub use commands::{parse_line, Command, ParseError, HELP};
pub use render::{render_dashboard, render_history, NO_HISTORY, NO_QUERIES};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::assistant::Assistant;
use crate::error::{AppError, SessionError};
use crate::modes::Policy;

pub const LOGIN_REQUIRED: &str = "Please log in first: /login <username> <password>";

/// Interactive session driver.
pub struct Repl {
    assistant: Assistant,
    policy: Policy,
}

/// What the loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

impl Repl {
    pub fn new(assistant: Assistant, policy: Policy) -> Self {
        Self { assistant, policy }
    }

    pub fn assistant(&self) -> &Assistant {
        &self.assistant
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Run over the process stdin and stdout until EOF or `/quit`.
    pub async fn run(&mut self) -> std::io::Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.run_with(stdin, stdout).await
    }

    /// Run over arbitrary input and output streams.
    pub async fn run_with<R, W>(&mut self, mut reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        writer
            .write_all(b"AI-Powered Healthcare Assistant\n")
            .await?;
        writer.write_all(format!("{}\n", LOGIN_REQUIRED).as_bytes()).await?;
        writer.flush().await?;

        let mut buf = Vec::new();

        loop {
            buf.clear();
            let bytes_read = reader.read_until(b'\n', &mut buf).await?;

            // EOF reached
            if bytes_read == 0 {
                info!("EOF received, ending session");
                break;
            }

            // Invalid UTF-8 is replaced, not fatal
            let line = String::from_utf8_lossy(&buf);

            let output = match parse_line(&line) {
                Ok(command) => {
                    debug!(command = %command_name(&command), "Received command");
                    let (flow, output) = self.handle(command).await;
                    if flow == Flow::Exit {
                        writer.write_all(output.as_bytes()).await?;
                        writer.flush().await?;
                        break;
                    }
                    output
                }
                Err(_) if !self.assistant.is_authenticated() => {
                    format!("{}\n", LOGIN_REQUIRED)
                }
                Err(e) => format!("Warning: {}\n", e),
            };

            writer.write_all(output.as_bytes()).await?;
            writer.flush().await?;
        }

        if self.assistant.is_authenticated() {
            self.assistant.logout();
        }
        Ok(())
    }

    async fn handle(&mut self, command: Command) -> (Flow, String) {
        match command {
            Command::Quit => (Flow::Exit, "Goodbye.\n".to_string()),
            Command::Help => (Flow::Continue, format!("{}\n", HELP)),
            Command::Login { username, password } => {
                let output = if self.assistant.login(&username, &password) {
                    format!(
                        "Login successful! Response mode: {} (change with /mode)\n",
                        self.policy
                    )
                } else {
                    "Error: Invalid credentials.\n".to_string()
                };
                (Flow::Continue, output)
            }
            _ if !self.assistant.is_authenticated() => {
                (Flow::Continue, format!("{}\n", LOGIN_REQUIRED))
            }
            Command::Logout => {
                self.assistant.logout();
                (Flow::Continue, "Logged out.\n".to_string())
            }
            Command::Mode(policy) => {
                self.policy = policy;
                (Flow::Continue, format!("Response mode set to {}.\n", policy))
            }
            Command::Query(text) => (Flow::Continue, self.handle_query(&text).await),
            Command::Rate(value) => (Flow::Continue, self.handle_rate(value)),
            Command::History => (
                Flow::Continue,
                with_newline(render_history(self.assistant.history())),
            ),
            Command::Dashboard => (
                Flow::Continue,
                with_newline(render_dashboard(
                    self.assistant.query_log(),
                    &self.assistant.method_summary(),
                )),
            ),
        }
    }

    async fn handle_query(&mut self, text: &str) -> String {
        match self.assistant.submit(text, self.policy).await {
            Ok(submission) => format!(
                "User: {}\nHealthcare Assistant: {}\nRate this response (1-5 stars) with /rate <n>\n",
                text.trim(),
                submission.response
            ),
            Err(e) => describe_error(&e),
        }
    }

    fn handle_rate(&mut self, value: i64) -> String {
        let Some(handle) = self.assistant.latest_submission() else {
            return "Warning: Nothing to rate yet.\n".to_string();
        };
        match self.assistant.rate(handle, value) {
            Ok(()) => format!("Thanks! Rated {} out of 5.\n", value),
            Err(e) => describe_error(&e),
        }
    }
}

fn describe_error(err: &AppError) -> String {
    match err {
        AppError::Validation { reason, .. } => format!("Warning: {}\n", reason),
        AppError::Session(inner @ SessionError::RatingOutOfRange { .. }) => {
            format!("Warning: {}\n", inner)
        }
        AppError::Unauthenticated => format!("{}\n", LOGIN_REQUIRED),
        e => {
            error!(error = %e, "Request failed");
            format!("Error: {}\n", e)
        }
    }
}

fn with_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Command label for logs, without credentials or query text.
fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Query(_) => "query",
        Command::Login { .. } => "login",
        Command::Logout => "logout",
        Command::Rate(_) => "rate",
        Command::Mode(_) => "mode",
        Command::History => "history",
        Command::Dashboard => "dashboard",
        Command::Help => "help",
        Command::Quit => "quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentials;
    use crate::generation::{Candidate, MockTextGenerator};
    use crate::modes::{GenerativeResponder, HybridSelector, RULES};
    use std::sync::Arc;

    fn repl(mock: MockTextGenerator) -> Repl {
        let generative = GenerativeResponder::new(Arc::new(mock), 100);
        let assistant = Assistant::new(
            HybridSelector::new(generative),
            Box::new(StaticCredentials::new("user", "pass")),
        );
        Repl::new(assistant, Policy::Hybrid)
    }

    async fn drive(repl: &mut Repl, input: &str) -> String {
        let mut output = Vec::new();
        repl.run_with(input.as_bytes(), &mut output).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_queries_blocked_before_login() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(0);
        let mut repl = repl(mock);

        let output = drive(&mut repl, "I have a fever\n/history\n/login user wrong\n").await;

        assert_eq!(output.matches(LOGIN_REQUIRED).count(), 3);
        assert!(output.contains("Error: Invalid credentials."));
        assert!(!output.contains("Healthcare Assistant:"));
    }

    #[tokio::test]
    async fn test_session_flow() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .times(1)
            .returning(|_| Ok(vec![Candidate::new("Back pain often improves with rest.")]));
        let mut repl = repl(mock);

        let input = "/login user pass\n\
                     I have a fever\n\
                     /rate 7\n\
                     /rate 4\n\
                     \n\
                     /mode ai\n\
                     my back hurts\n\
                     /history\n\
                     /dashboard\n\
                     /quit\n\
                     ignored after quit\n";
        let output = drive(&mut repl, input).await;

        assert!(output.contains("Login successful!"));
        assert!(output.contains(&format!("Healthcare Assistant: {}", RULES[0].1)));
        assert!(output.contains("Warning: Rating must be between 1 and 5, got 7"));
        assert!(output.contains("Thanks! Rated 4 out of 5."));
        assert!(output.contains("Warning: Please enter a query."));
        assert!(output.contains("Response mode set to ai."));
        assert!(output.contains("Healthcare Assistant: Back pain often improves with rest."));
        assert!(output.contains("2. You: my back hurts"));
        assert!(output.contains("Query Analytics"));
        assert!(output.trim_end().ends_with("Goodbye."));
        assert_eq!(repl.policy(), Policy::Ai);
    }

    #[tokio::test]
    async fn test_rate_without_submission() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(0);
        let mut repl = repl(mock);

        let output = drive(&mut repl, "/login user pass\n/rate 3\n/dashboard\n").await;
        assert!(output.contains("Warning: Nothing to rate yet."));
        assert!(output.contains(NO_QUERIES));
    }

    #[tokio::test]
    async fn test_second_rating_rejected() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(0);
        let mut repl = repl(mock);

        let output = drive(&mut repl, "/login user pass\ncough\n/rate 5\n/rate 2\n").await;
        assert!(output.contains("Thanks! Rated 5 out of 5."));
        assert!(output.contains("Error: Session error: Record 0 has already been rated"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_end_session() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(0);
        let mut repl = repl(mock);

        let input: &[u8] = b"/login user pass\ncaf\xe9 fever\nfever\n/history\n/quit\n";
        let mut output = Vec::new();
        repl.run_with(input, &mut output).await.unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("User: caf\u{FFFD} fever"));
        assert!(output.contains("1. You: caf\u{FFFD} fever"));
        assert!(output.contains("2. You: fever"));
        assert!(output.trim_end().ends_with("Goodbye."));
    }

    #[tokio::test]
    async fn test_parse_errors_before_login_show_login_notice() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(0);
        let mut repl = repl(mock);

        let output = drive(&mut repl, "/dance\n/rate x\n/login user\n").await;

        // Banner plus one notice per line
        assert_eq!(output.matches(LOGIN_REQUIRED).count(), 4);
        assert!(!output.contains("Warning:"));
    }

    #[tokio::test]
    async fn test_parse_errors_after_login_are_warnings() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(0);
        let mut repl = repl(mock);

        let output = drive(&mut repl, "/login user pass\n/dance\n/rate x\n").await;
        assert!(output.contains("Warning: Unknown command: /dance (try /help)"));
        assert!(output.contains("Warning: Rating must be a number, got 'x'"));
    }

    #[tokio::test]
    async fn test_escaped_slash_is_a_query() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .times(1)
            .returning(|_| Ok(vec![Candidate::new("Please see a doctor about that.")]));
        let mut repl = repl(mock);

        let output = drive(&mut repl, "/login user pass\n//etc is a weird name\n").await;
        assert!(output.contains("User: /etc is a weird name"));
        assert!(output.contains("Healthcare Assistant: Please see a doctor about that."));
    }

    #[tokio::test]
    async fn test_logout_discards_session() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(0);
        let mut repl = repl(mock);

        let output = drive(
            &mut repl,
            "/login user pass\nfever\n/logout\n/history\n/login user pass\n/history\n",
        )
        .await;

        assert!(output.contains("Logged out."));
        // Banner plus the blocked /history after logout
        assert_eq!(output.matches(LOGIN_REQUIRED).count(), 2);
        assert!(output.contains(NO_HISTORY));
        assert!(!output.contains("1. You: fever"));
    }

    #[tokio::test]
    async fn test_eof_ends_session() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(0);
        let mut repl = repl(mock);

        drive(&mut repl, "/login user pass\nfever\n").await;
        assert!(!repl.assistant().is_authenticated());
        assert!(repl.assistant().history().is_empty());
    }
}
