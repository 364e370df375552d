use std::process::ExitCode;

use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand};
use pinergy_client::{ClientError, ClientOptions, PinergyClient, DEFAULT_BASE_URL};
use pinergy_core::BaseResult;
use thiserror::Error as ThisError;

use crate::output::{Format, Output};

#[derive(Debug, Parser)]
#[command(name = "pinergy", author, version, about, long_about = None)]
#[command(after_help = concat!(
    "Environment variables:\n",
    "  PINERGY_BASE_URL          API root\n",
    "  PINERGY_AUTH_TOKEN        Auth token for commands that need one\n",
    "  PINERGY_EMAIL             Login email\n",
    "  PINERGY_PASSWORD          Login password\n",
    "  PINERGY_TIMEOUT_SECONDS   Request timeout\n",
    "  PINERGY_DEBUG             Trace requests to stderr\n",
    "  RUST_LOG                  Log filter\n\n",
    "Examples:\n",
    "  # Log in and keep the token for later commands\n",
    "  $ export PINERGY_AUTH_TOKEN=$(pinergy --output json login --email me@example.ie | jq -r .auth_token)\n\n",
    "  # Current balance\n",
    "  $ pinergy balance\n\n",
    "  # Usage as JSON\n",
    "  $ pinergy --output json usage\n"
))]
pub struct RootCommand {
    #[command(flatten)]
    pub args: RootArgs,

    #[command(subcommand)]
    pub action: SubCommands,
}

#[derive(Debug, Args)]
pub struct RootArgs {
    /// API base URL
    #[arg(long, value_name = "URL", env = "PINERGY_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, value_name = "FORMAT", default_value_t, value_enum)]
    pub output: Format,

    /// Print a redacted trace of every request and response to stderr
    #[arg(long, env = "PINERGY_DEBUG", value_parser = BoolishValueParser::new())]
    pub debug: bool,
}

#[derive(Debug, Subcommand)]
pub enum SubCommands {
    /// Log in and print the auth token
    Login(LoginCommand),
    /// Current balance and meter status
    Balance(TokenArgs),
    /// Usage by day, week and month
    Usage(TokenArgs),
    /// Level Pay usage data
    LevelPayUsage(TokenArgs),
    /// Notification preferences
    Account(TokenArgs),
    /// Your usage against similar homes
    Compare(TokenArgs),
    /// Scheduled and automatic top-ups
    #[command(name = "active-topups")]
    ActiveTopUps(TokenArgs),
    /// Past top-ups
    #[command(name = "topup-history")]
    TopUpHistory(TokenArgs),
    /// Allowed top-up amounts and thresholds
    Config(TokenArgs),
    /// House and heating types with their limits (no login needed)
    Defaults,
    /// Whether a premises is a landlord account (no login needed)
    LandlordCheck(LandlordCheckCommand),
}

#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Account email
    #[arg(long, env = "PINERGY_EMAIL")]
    pub email: String,

    /// Account password
    #[arg(long, env = "PINERGY_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Push token to register; a random one is generated when omitted
    #[arg(long)]
    pub device_token: Option<String>,
}

#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Auth token from `pinergy login`
    #[arg(long, env = "PINERGY_AUTH_TOKEN", hide_env_values = true)]
    pub token: String,
}

#[derive(Debug, Args)]
pub struct LandlordCheckCommand {
    /// Premises (card) number
    #[arg(long)]
    pub premises: String,
}

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The server answered but reported failure.
    #[error("{0}")]
    Failed(String),
}

impl From<CliError> for ExitCode {
    fn from(_: CliError) -> Self {
        Self::FAILURE
    }
}

impl RootArgs {
    fn client(&self, token: Option<&str>) -> Result<PinergyClient, CliError> {
        let options = ClientOptions::from_env()
            .with_base_url(self.base_url.as_str())
            .with_debug(self.debug);
        let client = PinergyClient::with_options(options)?;
        Ok(match token {
            Some(token) => client.with_auth_token(token),
            None => client,
        })
    }
}

impl RootCommand {
    pub fn run(self) -> Result<(), CliError> {
        let output = Output::new(self.args.output);

        let result = self.action.run(&self.args, &output);
        if let Err(err) = &result {
            tracing::debug!(error = ?err, "command failed");
            output.error(&err.to_string());
        }
        result
    }
}

impl SubCommands {
    fn run(self, args: &RootArgs, output: &Output) -> Result<(), CliError> {
        match self {
            Self::Login(login) => {
                let mut client = args.client(None)?;
                let response =
                    client.login(&login.email, &login.password, login.device_token.as_deref())?;
                if response.auth_token.is_empty() {
                    return Err(CliError::Failed(format!(
                        "Login failed: {}",
                        message_or(&response.base, "no auth token returned")
                    )));
                }
                output.write(&response);
            }
            Self::Balance(auth) => {
                let response = args.client(Some(&auth.token))?.balance()?;
                ensure_success(&response.base)?;
                output.write(&response);
            }
            Self::Usage(auth) => {
                let response = args.client(Some(&auth.token))?.usage()?;
                ensure_success(&response.base)?;
                output.write(&response);
            }
            Self::LevelPayUsage(auth) => {
                let response = args.client(Some(&auth.token))?.level_pay_usage()?;
                // This endpoint often omits `success`; only a reported error code counts.
                if !response.base.success && response.base.error_code != 0 {
                    return Err(CliError::Failed(message_or(&response.base, "Request failed")));
                }
                output.write(&response);
            }
            Self::Account(auth) => {
                let response = args.client(Some(&auth.token))?.notification_preferences()?;
                output.write(&response);
            }
            Self::Compare(auth) => {
                let response = args.client(Some(&auth.token))?.compare()?;
                ensure_success(&response.base)?;
                output.write(&response);
            }
            Self::ActiveTopUps(auth) => {
                let response = args.client(Some(&auth.token))?.active_top_ups()?;
                ensure_success(&response.base)?;
                output.write(&response);
            }
            Self::TopUpHistory(auth) => {
                let response = args.client(Some(&auth.token))?.top_up_history()?;
                ensure_success(&response.base)?;
                output.write(&response);
            }
            Self::Config(auth) => {
                let response = args.client(Some(&auth.token))?.config_info()?;
                ensure_success(&response.base)?;
                output.write(&response);
            }
            Self::Defaults => {
                let response = args.client(None)?.defaults_info()?;
                ensure_success(&response.base)?;
                output.write(&response);
            }
            Self::LandlordCheck(check) => {
                let response = args.client(None)?.landlord_check(&check.premises)?;
                output.write(&response);
            }
        }
        Ok(())
    }
}

fn message_or(base: &BaseResult, fallback: &str) -> String {
    if base.message.is_empty() {
        fallback.to_string()
    } else {
        base.message.clone()
    }
}

fn ensure_success(base: &BaseResult) -> Result<(), CliError> {
    if base.success {
        Ok(())
    } else {
        Err(CliError::Failed(message_or(base, "Request failed")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn parse(args: &[&str]) -> RootCommand {
        RootCommand::try_parse_from(args).unwrap()
    }

    #[test]
    fn command_definition_is_valid() {
        RootCommand::command().debug_assert();
    }

    #[test]
    fn token_commands_parse() {
        let command = parse(&["pinergy", "--output", "json", "balance", "--token", "tok"]);
        assert_eq!(command.args.output, Format::Json);
        assert!(matches!(command.action, SubCommands::Balance(TokenArgs { ref token }) if token == "tok"));

        let command = parse(&["pinergy", "active-topups", "--token", "t"]);
        assert!(matches!(command.action, SubCommands::ActiveTopUps(_)));
        let command = parse(&["pinergy", "topup-history", "--token", "t"]);
        assert!(matches!(command.action, SubCommands::TopUpHistory(_)));
        let command = parse(&["pinergy", "level-pay-usage", "--token", "t"]);
        assert!(matches!(command.action, SubCommands::LevelPayUsage(_)));
    }

    #[test]
    fn public_commands_need_no_token() {
        let command = parse(&["pinergy", "defaults"]);
        assert!(matches!(command.action, SubCommands::Defaults));
        let command = parse(&["pinergy", "landlord-check", "--premises", "123"]);
        assert!(
            matches!(command.action, SubCommands::LandlordCheck(LandlordCheckCommand { ref premises }) if premises == "123")
        );
    }

    #[test]
    fn login_options() {
        let command = parse(&[
            "pinergy",
            "--base-url",
            "http://localhost:9000/api",
            "--debug",
            "login",
            "--email",
            "a@b.ie",
            "--password",
            "pw",
        ]);
        assert_eq!(command.args.base_url, "http://localhost:9000/api");
        assert!(command.args.debug);
        match command.action {
            SubCommands::Login(login) => {
                assert_eq!(login.email, "a@b.ie");
                assert_eq!(login.password, "pw");
                assert!(login.device_token.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn failure_keeps_server_message() {
        let base = BaseResult {
            success: false,
            message: "Meter offline".into(),
            error_code: 3,
        };
        let err = ensure_success(&base).unwrap_err();
        assert_eq!(err.to_string(), "Meter offline");
        assert!(ensure_success(&BaseResult::default()).is_err());
        assert_eq!(
            message_or(&BaseResult::default(), "Request failed"),
            "Request failed"
        );
    }

    async fn run(server: &MockServer, args: &[&str]) -> Result<(), CliError> {
        let base_url = format!("{}/api", server.uri());
        let mut argv = vec!["pinergy".to_string(), "--base-url".to_string(), base_url];
        argv.extend(args.iter().map(ToString::to_string));
        tokio::task::spawn_blocking(move || RootCommand::try_parse_from(argv).unwrap().run())
            .await
            .unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn balance_command_uses_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/balance"))
            .and(header("auth_token", "tok"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": true, "balance": 3})),
            )
            .expect(1)
            .mount(&server)
            .await;

        run(&server, &["balance", "--token", "tok"]).await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn reported_failure_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/usage"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": false, "message": "No meter"})),
            )
            .mount(&server)
            .await;

        let err = run(&server, &["usage", "--token", "tok"]).await.unwrap_err();
        assert_eq!(err.to_string(), "No meter");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn level_pay_usage_tolerates_missing_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/levelPayUsage"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"usageData": {"a": 1}})),
            )
            .mount(&server)
            .await;

        run(&server, &["level-pay-usage", "--token", "tok"])
            .await
            .unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn login_without_token_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "message": "Check your email"})),
            )
            .mount(&server)
            .await;

        let err = run(&server, &["login", "--email", "a@b.ie", "--password", "pw"])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Login failed: Check your email");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn server_error_maps_to_client_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/defaultsinfo"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = run(&server, &["defaults"]).await.unwrap_err();
        assert!(matches!(err, CliError::Client(ref e) if e.status() == Some(503)));
    }
}
