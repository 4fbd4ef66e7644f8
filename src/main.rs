//! Algorithm visualizer CLI - Run recorded animations headless.

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use algo_viz::{
    animation::{BarSurface, PlaybackStatus, SortSession, TriggerOutcome},
    compute::{KMeans, SortAlgorithm, linear_regression, progressive_fits},
    schema::{DataRng, VisualizerConfig},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    match args[1].as_str() {
        "--example" => print_example_config(),
        "sort" => {
            let Some(name) = args.get(2) else {
                print_usage(&args[0]);
                std::process::exit(1);
            };
            let virtual_clock = args.iter().any(|a| a == "--virtual");
            let config = load_config(config_arg(&args[3..]));
            let algorithms: Vec<SortAlgorithm> = if name == "all" {
                SortAlgorithm::ALL.to_vec()
            } else {
                vec![name.parse().unwrap_or_else(|e| {
                    eprintln!("{}", e);
                    std::process::exit(1);
                })]
            };
            for algorithm in algorithms {
                run_sort(algorithm, &config, virtual_clock);
            }
        }
        "kmeans" => run_kmeans(&load_config(args.get(2))),
        "regression" => run_regression(&load_config(args.get(2))),
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <command> [args]", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  sort <algorithm|all> [config.json] [--virtual]");
    eprintln!("                 Record and play a sort animation headless");
    eprintln!("  kmeans [config.json]");
    eprintln!("                 Run k-means on generated cluster data");
    eprintln!("  regression [config.json]");
    eprintln!("                 Fit a line to generated noisy data");
    eprintln!("  --example      Print the default configuration");
    eprintln!();
    eprintln!(
        "Algorithms: {}",
        SortAlgorithm::ALL
            .iter()
            .map(|a| a.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
}

/// First positional argument among `rest`; flags may come before or after it.
fn config_arg(rest: &[String]) -> Option<&String> {
    rest.iter().find(|a| !a.starts_with("--"))
}

fn load_config(path: Option<&String>) -> VisualizerConfig {
    match path {
        Some(path) => {
            VisualizerConfig::from_json_file(PathBuf::from(path)).unwrap_or_else(|e| {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            })
        }
        None => VisualizerConfig::default(),
    }
}

fn run_sort(algorithm: SortAlgorithm, config: &VisualizerConfig, virtual_clock: bool) {
    let mut session = SortSession::new(
        config.sorting.clone(),
        config.playback.clone(),
        BarSurface::default(),
        DataRng::from_seed(config.random_seed),
    );
    let input = session.array().to_vec();

    println!("{}", algorithm);
    println!("{}", "=".repeat(algorithm.to_string().len()));
    println!(
        "Array: {} values, speed {}",
        input.len(),
        session.config().speed
    );

    let start = Instant::now();
    let operations = match session.trigger(algorithm, Duration::ZERO) {
        Ok(TriggerOutcome::Started { operations }) => operations,
        Ok(TriggerOutcome::Reset) => 0,
        Err(e) => {
            eprintln!("Error starting playback: {}", e);
            std::process::exit(1);
        }
    };
    let counts = session.scheduler().log().counts();
    println!(
        "Recorded {} operations ({} compares, {} swaps, {} overwrites)",
        operations, counts.compares, counts.swaps, counts.overwrites
    );

    let played_for = if virtual_clock {
        session.run_virtual(Duration::ZERO)
    } else {
        while let Some(deadline) = session.next_deadline() {
            let elapsed = start.elapsed();
            if deadline > elapsed {
                thread::sleep(deadline - elapsed);
            }
            session.poll(start.elapsed());
        }
        start.elapsed()
    };

    let heights = session.renderer().heights();
    let sorted = heights.windows(2).all(|w| w[0] <= w[1]);
    println!("Playback: {}", session.stats());
    println!(
        "Status: {:?} after {:.2}s, surface sorted: {}",
        session.status(),
        played_for.as_secs_f32(),
        sorted
    );
    println!();

    if session.status() == PlaybackStatus::Finished && !sorted {
        eprintln!("Replayed surface is not sorted");
        std::process::exit(1);
    }
}

fn run_kmeans(config: &VisualizerConfig) {
    let clustering = &config.clustering;
    let mut rng = DataRng::from_seed(config.random_seed);
    let points = rng.cluster_data(clustering.num_points, clustering.num_clusters, clustering.spread);
    let steps = KMeans::from_config(clustering).run(&points, &mut rng);

    println!("K-Means Clustering");
    println!("==================");
    println!(
        "Points: {}, k: {}, replay delay: {}ms",
        points.len(),
        clustering.num_clusters,
        clustering.step_delay().as_millis()
    );
    println!();

    for step in &steps {
        let centers = step
            .centers
            .iter()
            .map(|c| format!("({:.2}, {:.2})", c.x, c.y))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "  Iteration {}: {}{}",
            step.iteration,
            centers,
            if step.converged { " [converged]" } else { "" }
        );
    }

    if let Some(last) = steps.last() {
        println!();
        for center in &last.centers {
            let members = last
                .points
                .iter()
                .filter(|p| p.cluster == Some(center.cluster))
                .count();
            println!("  Cluster {}: {} points", center.cluster + 1, members);
        }
    }
}

fn run_regression(config: &VisualizerConfig) {
    let regression = &config.regression;
    let mut rng = DataRng::from_seed(config.random_seed);
    let points = rng.linear_data(regression.num_points, regression.noise);

    println!("Linear Regression");
    println!("=================");
    println!("Points: {}, noise: {}", points.len(), regression.noise);
    println!();

    if points.len() < 2 {
        println!("Need at least 2 points to fit a line");
        return;
    }

    let fits = progressive_fits(&points);
    let every = (fits.len() / 10).max(1);
    for (i, fit) in fits.iter().enumerate() {
        if (i + 1) % every == 0 {
            println!(
                "  {:>3} points: y = {:.4}x + {:.4}",
                i + 2,
                fit.slope,
                fit.intercept
            );
        }
    }

    let fit = linear_regression(&points);
    let [(x0, y0), (x1, y1)] = fit.segment(0.0, 100.0);
    println!();
    println!("Final fit: y = {:.4}x + {:.4}", fit.slope, fit.intercept);
    println!("Line: ({:.1}, {:.2}) -> ({:.1}, {:.2})", x0, y0, x1, y1);
}

fn print_example_config() {
    let config = VisualizerConfig::default();

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing config: {}", e);
            std::process::exit(1);
        }
    }
}
