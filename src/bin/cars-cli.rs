use cars_sdk::{CarsClient, Fetched, ListFilter, NewCar};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(name = "cars-cli")]
#[command(about = "Command-line client for the cars service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service liveness
    Health,
    /// List cars matching the given filters
    List {
        #[arg(long)]
        model: Option<String>,
        /// Case-insensitive name substring
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        min_price: Option<Decimal>,
        #[arg(long)]
        max_price: Option<Decimal>,
        #[arg(long)]
        start: Option<usize>,
        #[arg(long)]
        max: Option<usize>,
    },
    /// Count all cars
    Count,
    /// Fetch one car
    Get {
        id: u64,
        /// Entity tag from a previous fetch
        #[arg(long)]
        etag: Option<String>,
    },
    /// Create a car
    Create(CarArgs),
    /// Replace a car
    Update {
        id: u64,
        #[command(flatten)]
        car: CarArgs,
    },
    /// Delete a car (requires an admin identity)
    Delete {
        id: u64,
        #[arg(long)]
        user: Option<String>,
    },
}

#[derive(Args)]
struct CarArgs {
    #[arg(long)]
    model: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    price: Decimal,
}

impl CarArgs {
    fn into_new_car(self, id: Option<u64>) -> NewCar {
        NewCar {
            id,
            model: self.model,
            name: self.name,
            price: self.price,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = CarsClient::new(&cli.url);

    match cli.command {
        Commands::Health => {
            let status = client.health().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Commands::List {
            model,
            name,
            min_price,
            max_price,
            start,
            max,
        } => {
            let filter = ListFilter {
                model,
                name,
                min_price,
                max_price,
                start,
                max,
            };
            let cars = client.list(&filter).await?;
            println!("{}", serde_json::to_string_pretty(&cars)?);
        }
        Commands::Count => {
            println!("{}", client.count().await?);
        }
        Commands::Get { id, etag } => match client.get(id, etag.as_deref()).await? {
            Fetched::NotModified => println!("Not modified"),
            Fetched::Car { car, etag } => {
                if let Some(tag) = etag {
                    eprintln!("ETag: {}", tag);
                }
                println!("{}", serde_json::to_string_pretty(&car)?);
            }
        },
        Commands::Create(car) => match client.create(&car.into_new_car(None)).await? {
            Some(id) => println!("Created car {}", id),
            None => println!("Created"),
        },
        Commands::Update { id, car } => {
            client.update(id, &car.into_new_car(Some(id))).await?;
            println!("Updated car {}", id);
        }
        Commands::Delete { id, user } => {
            client.delete(id, user.as_deref()).await?;
            println!("Deleted car {}", id);
        }
    }

    Ok(())
}
