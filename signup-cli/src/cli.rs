use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand};
use signup_lib::DEFAULT_ADDR;
use simplelog::LevelFilter;

#[derive(Parser)]
#[command(name = "signup", about = "Sign-up form validation demo", version)]
pub struct Cli {
    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the sign-up backend
    Serve {
        /// Address to listen on
        #[arg(long, env = "SIGNUP_ADDR", default_value_t = DEFAULT_ADDR)]
        addr: SocketAddr,

        /// Usernames that are taken from the start (comma separated)
        #[arg(long, value_delimiter = ',')]
        taken: Vec<String>,
    },

    /// Fill in the sign-up form, validate it and submit it
    Submit(SubmitArgs),
}

#[derive(Args)]
pub struct SubmitArgs {
    /// Backend root URL
    #[arg(long, env = "SIGNUP_SERVER", default_value = "http://127.0.0.1:8080")]
    pub server: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    #[arg(long, default_value = "")]
    pub username: String,

    /// Optional display name
    #[arg(long)]
    pub nickname: Option<String>,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub password: String,

    /// Password confirmation
    #[arg(long, default_value = "")]
    pub confirm: String,

    /// Validate locally only, without calling the backend
    #[arg(long)]
    pub offline: bool,

    /// Print the form state as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submit() {
        let cli = Cli::try_parse_from([
            "signup",
            "submit",
            "--username",
            "ada",
            "--email",
            "ada@example.com",
            "--password",
            "difference engine",
            "--confirm",
            "difference engine",
            "--offline",
        ])
        .unwrap();

        let Commands::Submit(args) = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(args.username, "ada");
        assert_eq!(args.nickname, None);
        assert!(args.offline);
        assert!(!args.json);
        assert_eq!(cli.log_level, LevelFilter::Warn);
    }

    #[test]
    fn test_parse_serve_taken_list() {
        let cli = Cli::try_parse_from([
            "signup",
            "--log-level",
            "debug",
            "serve",
            "--addr",
            "127.0.0.1:9000",
            "--taken",
            "alice,bob",
        ])
        .unwrap();

        let Commands::Serve { addr, taken } = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(addr.port(), 9000);
        assert_eq!(taken, vec!["alice", "bob"]);
        assert_eq!(cli.log_level, LevelFilter::Debug);
    }
}
