use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "showcase-cli")]
#[command(about = "Admin CLI for the product showcase", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Session token from `login`.
    #[arg(short, long, env = "SHOWCASE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and print the session token
    Login {
        #[arg(short, long, default_value = "admin")]
        username: String,
        #[arg(short, long, env = "SHOWCASE_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// List every product
    List,
    /// Create a product from a JSON file
    Create {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Replace a product from a JSON file
    Update {
        id: i64,
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Delete a product
    Delete { id: i64 },
    /// End the session
    Logout,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(token) = &cli.token {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}"))?,
        );
    }

    let products = format!("{}/api/products", cli.url);

    let res = match cli.command {
        Commands::Login { username, password } => {
            client
                .post(format!("{}/api/admin/login", cli.url))
                .json(&json!({ "username": username, "password": password }))
                .send()
                .await?
        }
        Commands::List => client.get(&products).send().await?,
        Commands::Create { file } => {
            client
                .post(&products)
                .headers(headers)
                .json(&read_product(&file)?)
                .send()
                .await?
        }
        Commands::Update { id, file } => {
            client
                .put(format!("{products}/{id}"))
                .headers(headers)
                .json(&read_product(&file)?)
                .send()
                .await?
        }
        Commands::Delete { id } => {
            client
                .delete(format!("{products}/{id}"))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Logout => {
            client
                .post(format!("{}/api/admin/logout", cli.url))
                .headers(headers)
                .send()
                .await?
        }
    };
    print_response(res).await
}

fn read_product(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {status}");
        if let Ok(text) = res.text().await {
            eprintln!("Response: {text}");
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
