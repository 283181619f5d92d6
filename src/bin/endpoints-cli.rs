use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "endpoints-cli")]
#[command(about = "Query a running endpoint service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered endpoints
    List,
    /// Print the URL of a page
    Permalink {
        page: String,
        #[arg(long)]
        campaign_id: Option<u64>,
        #[arg(long)]
        donation_id: Option<u64>,
        #[arg(long)]
        redirect_to: Option<String>,
    },
    /// Check whether a path is a given page
    IsPage {
        page: String,
        #[arg(long, default_value = "/")]
        path: String,
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = match cli.command {
        Commands::List => client.get(format!("{}/api/endpoints", cli.url)).send().await?,
        Commands::Permalink {
            page,
            campaign_id,
            donation_id,
            redirect_to,
        } => {
            let mut query: Vec<(&str, String)> = Vec::new();
            if let Some(id) = campaign_id {
                query.push(("campaign_id", id.to_string()));
            }
            if let Some(id) = donation_id {
                query.push(("donation_id", id.to_string()));
            }
            if let Some(url) = redirect_to {
                query.push(("redirect_to", url));
            }
            client
                .get(format!("{}/api/permalink/{}", cli.url, page))
                .query(&query)
                .send()
                .await?
        }
        Commands::IsPage { page, path, strict } => {
            let mut query = vec![("path", path)];
            if strict {
                query.push(("strict", "1".to_string()));
            }
            client
                .get(format!("{}/api/is-page/{}", cli.url, page))
                .query(&query)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;
    if !status.is_success() {
        eprintln!("Error: endpoint service returned status {}", status);
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
