use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "studio-cli")]
#[command(about = "Command-line client for a running note-studio server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the route table
    Routes,
    /// Resolve a path to its view
    Resolve { path: String },
    /// Build the path for a named route (params as key=value)
    Href {
        name: String,
        params: Vec<String>,
    },
    /// Truncate one or more titles
    Truncate {
        #[arg(short, long)]
        max: Option<usize>,
        titles: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Routes => {
            let res = client.get(format!("{}/api/routes", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Resolve { path } => {
            let res = client
                .get(format!("{}/api/routes/resolve", cli.url))
                .query(&[("path", path)])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Href { name, params } => {
            let mut query = Vec::new();
            for param in params {
                match param.split_once('=') {
                    Some((k, v)) => query.push((k.to_string(), v.to_string())),
                    None => return Err(format!("Expected key=value, got '{}'", param).into()),
                }
            }
            let res = client
                .get(format!(
                    "{}/api/routes/{}/href",
                    cli.url,
                    urlencoding::encode(&name)
                ))
                .query(&query)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Truncate { max, titles } => {
            let res = client
                .post(format!("{}/api/titles/truncate-many", cli.url))
                .json(&json!({ "titles": titles, "max_length": max }))
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
