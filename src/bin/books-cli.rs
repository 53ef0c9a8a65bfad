use clap::{Parser, Subcommand};
use reqwest::{Method, Response};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "books-cli")]
#[command(about = "Command-line client for the book service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080", env = "BOOKS_URL")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every book
    List,
    /// Show one book
    Get { id: String },
    /// Add a new book
    Add {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long, default_value_t = 0.0)]
        price: f64,
    },
    /// Replace the title, author and price of a book
    Update {
        id: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long, default_value_t = 0.0)]
        price: f64,
    },
    /// Delete a book
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let (method, path, body) = match cli.command {
        Commands::List => (Method::GET, "/books".to_string(), None),
        Commands::Get { id } => (Method::GET, format!("/books/{id}"), None),
        Commands::Add {
            title,
            author,
            price,
        } => (
            Method::POST,
            "/books".to_string(),
            Some(json!({ "title": title, "author": author, "price": price })),
        ),
        Commands::Update {
            id,
            title,
            author,
            price,
        } => (
            Method::PUT,
            format!("/books/{id}"),
            Some(json!({ "title": title, "author": author, "price": price })),
        ),
        Commands::Delete { id } => (Method::DELETE, format!("/books/{id}"), None),
    };

    let mut request = client.request(method, format!("{base}{path}"));
    if let Some(body) = body {
        request = request.json(&body);
    }
    print_response(request.send().await?).await
}

async fn print_response(res: Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let body: Value = res.json().await.unwrap_or(Value::Null);

    if !status.is_success() {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("no message");
        eprintln!("Error: book service returned {status}: {message}");
        std::process::exit(1);
    }

    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
