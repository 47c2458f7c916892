use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "blt-cli")]
#[command(about = "Command-line client for the OWASP BLT API worker", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8787")]
    url: String,

    /// Session token from `login` or `signup`.
    #[arg(short, long, env = "BLT_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Platform statistics
    Stats,
    /// Reported bugs
    Bugs,
    /// Researcher leaderboard
    Leaderboard,
    /// Log in and print the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show the user behind --token
    Me,
    /// End the session
    Logout,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let mut headers = HeaderMap::new();
    if let Some(token) = &cli.token {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
    }

    let res = match cli.command {
        Commands::Stats => client.get(format!("{}/api/stats", base)),
        Commands::Bugs => client.get(format!("{}/api/bugs", base)),
        Commands::Leaderboard => client.get(format!("{}/api/leaderboard", base)),
        Commands::Me => client.get(format!("{}/api/auth/me", base)),
        Commands::Login { email, password } => client
            .post(format!("{}/api/auth/login", base))
            .json(&json!({ "email": email, "password": password })),
        Commands::Signup {
            username,
            email,
            password,
        } => client
            .post(format!("{}/api/auth/signup", base))
            .json(&json!({ "username": username, "email": email, "password": password })),
        Commands::Logout => client
            .post(format!("{}/api/auth/logout", base))
            .json(&json!({})),
    }
    .headers(headers)
    .send()
    .await?;

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
