use odysseum::config::{InterpreterConfig, RecommendationConfig};
use odysseum::models::request::{DestinationRequest, OptimizationRequest};
use odysseum::models::{
    CategoryBucket, LocationIndex, OptimizationCriterion, RouteEndpoint, StopPlan, StopRequest,
};
use odysseum::services::interpreter::{interpret_query, ChatInterpreter};
use odysseum::services::itinerary_composer::{render, ItineraryComposer};
use odysseum::snapshot::{load_snapshots, JsonSnapshotSource};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_help() {
    eprintln!(
        "\
Usage: recommend [OPTIONS]

Snapshots:
  --locations=PATH      Location snapshot (default: $LOCATIONS_PATH)
  --businesses=PATH     Business snapshot (default: $BUSINESSES_PATH)
  --normalize           Fold free-text categories into buckets while loading

Itinerary:
  --from=NAME           Start location
  --to=NAME             End location (optional)
  --stops=A,B           Stop categories in travel order (default: restaurant)
  --query=TEXT          Free-text trip description instead of --from/--to/--stops
                        (requires INTERPRETER_ENDPOINT)

Lookup:
  --destination=NAME    Ranked businesses near a location; repeatable
  --categories=A,B      Buckets to list (default: all)
  --criterion=C         rating, distance or cost (default: rating)
  --top=N               Results per category (default: 5)

Output:
  --json                Print JSON instead of text
  --help                Show this help message"
    );
}

fn resolve(name: &str, locations: &LocationIndex) -> Result<RouteEndpoint, String> {
    locations
        .get(name)
        .map(|l| RouteEndpoint::new(l.name.clone(), l.coordinates))
        .ok_or_else(|| format!("Unknown location '{}'", name))
}

fn list_arg<'a>(args: &'a [String], prefix: &str) -> Option<Vec<&'a str>> {
    args.iter()
        .find_map(|a| a.strip_prefix(prefix))
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect()
        })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Quiet by default; the itinerary goes to stdout
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "odysseum=warn".into()),
        )
        .with(stderr_layer)
        .init();

    dotenv::dotenv().ok();

    // Parse CLI args
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help") {
        print_help();
        return Ok(());
    }

    let arg = |prefix: &str| {
        args.iter()
            .find_map(|a| a.strip_prefix(prefix))
            .map(str::to_string)
    };

    let locations_path = arg("--locations=")
        .or_else(|| env::var("LOCATIONS_PATH").ok())
        .ok_or("--locations or LOCATIONS_PATH is required")?;
    let businesses_path = arg("--businesses=")
        .or_else(|| env::var("BUSINESSES_PATH").ok())
        .ok_or("--businesses or BUSINESSES_PATH is required")?;
    let json_output = args.iter().any(|a| a == "--json");
    let normalize = args.iter().any(|a| a == "--normalize");

    let source = JsonSnapshotSource::new(locations_path, businesses_path)
        .with_normalized_categories(normalize);
    let snapshots = load_snapshots(&source).await?;

    let config = RecommendationConfig::from_env().map_err(|e| format!("Config error: {}", e))?;
    let composer = ItineraryComposer::new(config);

    // Lookup mode
    let destinations: Vec<&str> = args
        .iter()
        .filter_map(|a| a.strip_prefix("--destination="))
        .collect();
    if !destinations.is_empty() {
        let categories: Vec<CategoryBucket> = match list_arg(&args, "--categories=") {
            Some(names) => names
                .iter()
                .map(|n| n.parse::<CategoryBucket>())
                .collect::<Result<Vec<_>, _>>()?,
            None => CategoryBucket::ALL.to_vec(),
        };
        let optimization = OptimizationRequest {
            criterion: arg("--criterion=")
                .map(|c| OptimizationCriterion::parse_lenient(&c))
                .unwrap_or_default(),
            top_n: arg("--top=").and_then(|s| s.parse().ok()),
        };

        let requests: Vec<DestinationRequest> = destinations
            .iter()
            .map(|name| DestinationRequest::new(*name, &categories))
            .collect();
        let rankings =
            composer.rank_by_location(&snapshots.locations, &snapshots.catalog, &optimization)?;
        let recommendations = composer.recommend_destinations(&requests, &rankings);

        if json_output {
            println!("{}", serde_json::to_string_pretty(&recommendations)?);
        } else {
            for destination in &recommendations {
                println!("{}", destination.name);
                for (bucket, businesses) in &destination.categories {
                    println!("  {}:", bucket.as_str());
                    if businesses.is_empty() {
                        println!("    (none)");
                    }
                    for b in businesses {
                        println!("    {:.1}  {} - {}", b.rating, b.name, b.address);
                    }
                }
            }
        }
        return Ok(());
    }

    // Itinerary mode
    let (endpoints, plan) = if let Some(query) = arg("--query=") {
        let interpreter_config = InterpreterConfig::from_env()?
            .ok_or("--query requires INTERPRETER_ENDPOINT to be set")?;
        let interpreter = ChatInterpreter::new(interpreter_config);
        let interpreted = interpret_query(&interpreter, &query, &snapshots.locations).await?;
        (interpreted.route.endpoints, interpreted.plan)
    } else {
        let from = arg("--from=").ok_or("--from is required (see --help)")?;
        let mut endpoints = vec![resolve(&from, &snapshots.locations)?];
        if let Some(to) = arg("--to=") {
            endpoints.push(resolve(&to, &snapshots.locations)?);
        }
        let plan = match list_arg(&args, "--stops=") {
            Some(stops) => StopPlan::new(stops.into_iter().map(StopRequest::new).collect()),
            None => StopPlan::default_plan(),
        };
        (endpoints, plan)
    };

    let itinerary = composer.compose(&endpoints, &plan, &snapshots.catalog)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&itinerary)?);
    } else {
        println!("{}", render(&itinerary));
    }

    Ok(())
}
