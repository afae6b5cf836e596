use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use flat_admin::codec;
use flat_admin::config::Config;
use flat_admin::{
    Coordinates, Flat, FlatApi, FlatInput, FlatStore, Furnish, House, HttpFlatClient,
    ListParams, StoreAction, Transport, View,
};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "flat-admin", version)]
#[command(about = "Browse and edit flats in the flat management service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List one page of flats
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        #[arg(short, long, default_value = "id")]
        sort: String,
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Create a flat
    Create(FlatArgs),
    /// Replace an existing flat
    Update {
        #[arg(long)]
        id: i64,
        #[command(flatten)]
        flat: FlatArgs,
    },
    /// Delete a flat
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Show the flat with minimal coordinates
    MinCoordinates,
    /// List flats furnished below the given level
    FurnishLessThan {
        #[arg(long, value_parser = parse_furnish)]
        max_furnish: Furnish,
    },
    /// Count flats with at least the given number of rooms
    CountRooms {
        #[arg(long)]
        min_rooms: i64,
    },
    /// Total cost of all flats
    TotalCost,
    /// Cheapest or most expensive flat with or without a balcony
    FindWithBalcony {
        #[arg(long)]
        cheapest: bool,
        #[arg(long)]
        with_balcony: bool,
    },
    /// Print the XML request body for a flat without sending it
    Encode(FlatArgs),
    /// Decode an XML response body from a file (or stdin) and print it as JSON
    Decode {
        path: Option<PathBuf>,
        /// Treat the body as a collection of flats
        #[arg(long)]
        many: bool,
    },
}

#[derive(Debug, Args)]
struct FlatArgs {
    #[arg(long)]
    name: String,
    #[arg(long, allow_hyphen_values = true)]
    x: f64,
    #[arg(long, allow_hyphen_values = true)]
    y: f64,
    #[arg(long)]
    area: f64,
    #[arg(long)]
    rooms: i64,
    #[arg(long, value_parser = parse_furnish)]
    furnish: Option<Furnish>,
    #[arg(long, value_parser = parse_view)]
    view: Option<View>,
    #[arg(long, value_parser = parse_transport)]
    transport: Option<Transport>,
    #[arg(long)]
    house_name: Option<String>,
    #[arg(long)]
    house_year: Option<i64>,
    #[arg(long)]
    floors: Option<i64>,
    #[arg(long)]
    lifts: Option<i64>,
}

impl From<FlatArgs> for FlatInput {
    fn from(args: FlatArgs) -> Self {
        let has_house = args.house_name.is_some()
            || args.house_year.is_some()
            || args.floors.is_some()
            || args.lifts.is_some();
        let house = has_house.then(|| House {
            name: args.house_name,
            year: args.house_year,
            number_of_floors: args.floors.unwrap_or_default(),
            number_of_lifts: args.lifts.unwrap_or_default(),
        });

        FlatInput {
            name: args.name,
            coordinates: Coordinates {
                x: args.x,
                y: args.y,
            },
            area: args.area,
            number_of_rooms: args.rooms,
            furnish: args.furnish,
            view: args.view,
            transport: args.transport,
            house,
        }
    }
}

fn parse_furnish(raw: &str) -> Result<Furnish, String> {
    Furnish::from_wire(&raw.to_uppercase()).ok_or_else(|| format!("unknown furnish {raw:?}"))
}

fn parse_view(raw: &str) -> Result<View, String> {
    View::from_wire(&raw.to_uppercase()).ok_or_else(|| format!("unknown view {raw:?}"))
}

fn parse_transport(raw: &str) -> Result<Transport, String> {
    Transport::from_wire(&raw.to_uppercase()).ok_or_else(|| format!("unknown transport {raw:?}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut store = FlatStore::new();

    match cli.command {
        Command::Encode(args) => {
            print!("{}", codec::encode(&FlatInput::from(args)));
            return Ok(());
        }
        Command::Decode { path, many } => {
            let body = match path {
                Some(path) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut body = String::new();
                    tokio::io::stdin()
                        .read_to_string(&mut body)
                        .await
                        .context("Failed to read stdin")?;
                    body
                }
            };
            let flats = if many {
                codec::decode_many(&body)?
            } else {
                vec![codec::decode_one(&body)?]
            };
            store.apply(StoreAction::Replace(flats));
            print_flats(&store)?;
            return Ok(());
        }
        command => {
            let config = Config::from_env()?;
            let client = HttpFlatClient::with_config(&config)?;
            info!(
                "Using {} at {} (agency: {})",
                client.service_name(),
                config.flat_service_url,
                config.agency_service_url
            );
            run_remote(&client, command, &mut store).await?;
        }
    }

    Ok(())
}

async fn run_remote(api: &dyn FlatApi, command: Command, store: &mut FlatStore) -> Result<()> {
    match command {
        Command::List { page, sort, filter } => {
            let params = ListParams { page, sort, filter };
            store.apply(StoreAction::Replace(api.list(&params).await?));
        }
        Command::Create(args) => {
            let created = api.create(&FlatInput::from(args)).await?;
            info!("Created flat {}", created.id);
            store.apply(StoreAction::Added(created));
        }
        Command::Update { id, flat } => {
            let updated = api.update(id, &FlatInput::from(flat)).await?;
            // One-shot store: nothing is loaded yet, so show just the updated flat
            store.apply(StoreAction::Replace(vec![updated]));
        }
        Command::Delete { id } => {
            api.delete(id).await?;
            info!("Deleted flat {}", id);
            return Ok(());
        }
        Command::MinCoordinates => {
            store.apply(StoreAction::Replace(vec![api.min_coordinates().await?]));
        }
        Command::FurnishLessThan { max_furnish } => {
            store.apply(StoreAction::Replace(api.furnish_less_than(max_furnish).await?));
        }
        Command::CountRooms { min_rooms } => {
            let count = api.count_rooms_at_least(min_rooms).await?;
            println!("{count}");
            return Ok(());
        }
        Command::TotalCost => {
            let total = api.total_cost().await?;
            println!("{total}");
            return Ok(());
        }
        Command::FindWithBalcony {
            cheapest,
            with_balcony,
        } => {
            let flat = api.find_with_balcony(cheapest, with_balcony).await?;
            store.apply(StoreAction::Replace(vec![flat]));
        }
        offline @ (Command::Encode(_) | Command::Decode { .. }) => {
            anyhow::bail!("{offline:?} does not talk to the service")
        }
    }

    print_flats(store)
}

fn print_flat_row(index: usize, flat: &Flat) {
    eprintln!(
        "{}. #{} {} ({} m², {} rooms)",
        index + 1,
        flat.id,
        flat.name,
        flat.area,
        flat.number_of_rooms
    );
    eprintln!("   Coordinates: ({}, {})", flat.coordinates.x, flat.coordinates.y);
    if let Some(house) = &flat.house {
        eprintln!(
            "   House: {} ({} floors, {} lifts)",
            house.name.as_deref().unwrap_or("-"),
            house.number_of_floors,
            house.number_of_lifts
        );
    }
}

fn print_flats(store: &FlatStore) -> Result<()> {
    info!("{} flats", store.len());
    for (i, flat) in store.flats().iter().enumerate() {
        print_flat_row(i, flat);
    }
    let json = serde_json::to_string_pretty(store.flats())?;
    println!("{json}");
    Ok(())
}
