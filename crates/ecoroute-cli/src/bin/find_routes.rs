use anyhow::Result;
use clap::Parser;
use ecoroute_cli::{format_route, RouteClient};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// EcoRoute Server URL
    #[arg(long, default_value = "http://localhost:8080")]
    url: String,

    /// Start place name or "lat,lon"
    start: String,

    /// Destination place name or "lat,lon"
    end: String,

    /// Print the raw route list as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let client = RouteClient::new(args.url);

    println!("Requesting routes: {} -> {}", args.start, args.end);
    let routes = match client.find_routes(&args.start, &args.end).await {
        Ok(routes) => routes,
        Err(e) => {
            eprintln!("Failed to fetch routes: {}", e);
            std::process::exit(1);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&routes)?);
        return Ok(());
    }

    println!("{} route(s):", routes.len());
    for route in &routes {
        println!("  {}", format_route(route));
    }

    Ok(())
}
