use clap::Parser;
use fire_grid_core::{Classification, FireSimConfig, FireSimulation};
use std::process::ExitCode;
use tracing::error;

/// Grid fire simulation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "fire-grid-demo")]
#[command(about = "Headless grid heat propagation demo", long_about = None)]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<String>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Heat transfer rate
    #[arg(short = 'r', long)]
    rate: Option<f32>,

    /// Number of random fire starters
    #[arg(short = 'i', long)]
    ignite_count: Option<usize>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 60)]
    ticks: u64,

    /// Timestep per tick
    #[arg(long, default_value_t = 1.0)]
    dt: f32,

    /// Report interval in ticks
    #[arg(long, default_value_t = 10)]
    report_interval: u64,

    /// Water sources as x,y pairs (repeatable)
    #[arg(long = "water", value_parser = parse_cell)]
    water: Vec<(usize, usize)>,

    /// Print the final classification map
    #[arg(long)]
    map: bool,
}

fn parse_cell(s: &str) -> Result<(usize, usize), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got '{s}'"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in '{s}': {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in '{s}': {e}"))?;
    Ok((x, y))
}

fn load_config(args: &Args) -> Result<FireSimConfig, String> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read {path}: {e}"))?;
            serde_json::from_str(&text).map_err(|e| format!("failed to parse {path}: {e}"))?
        }
        None => FireSimConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(rate) = args.rate {
        config.heat_transfer_rate = rate;
    }
    if let Some(count) = args.ignite_count {
        config.num_fire_starters = count;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn glyph(class: Classification) -> char {
    match class {
        Classification::Ground => '.',
        Classification::LowFire => '+',
        Classification::HighFire(tier) => char::from(b'0' + tier.level()),
        Classification::WaterSource => '~',
    }
}

fn run(args: &Args) -> Result<(), String> {
    let config = load_config(args)?;
    let mut sim = FireSimulation::new(config).map_err(|e| e.to_string())?;

    for &(x, y) in &args.water {
        sim.place_water_source(x, y).map_err(|e| e.to_string())?;
    }

    println!("=== Fire Grid Demo ===\n");
    let config = sim.config();
    println!(
        "Grid: {}x{}, rate: {:.3}, fire threshold: {:.2}, flash point: {:.2}, seed: {}",
        config.width,
        config.height,
        config.heat_transfer_rate,
        config.fire_threshold,
        config.flash_point,
        config.seed
    );
    println!();
    println!("  Tick | Time(s) | Burning | High fire | Water | Max heat | Mean heat");
    println!("-------|---------|---------|-----------|-------|----------|----------");

    for _ in 0..args.ticks {
        let stats = sim.update(args.dt).map_err(|e| e.to_string())?;
        let tick = sim.tick_count();
        if args.report_interval > 0 && (tick % args.report_interval == 0 || tick == args.ticks) {
            println!(
                "{:>6} | {:>7.1} | {:>7} | {:>9} | {:>5} | {:>8.3} | {:>9.4}",
                tick,
                sim.simulation_time(),
                stats.burning_cells,
                stats.high_fire_cells,
                stats.water_cells,
                stats.max_heat,
                stats.mean_heat
            );
        }
    }

    if args.map {
        println!();
        let width = sim.grid().width();
        for row in sim.classifications().chunks(width) {
            let line: String = row.iter().copied().map(glyph).collect();
            println!("{line}");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("3,4"), Ok((3, 4)));
        assert_eq!(parse_cell(" 10 , 2 "), Ok((10, 2)));
        assert!(parse_cell("3").is_err());
        assert!(parse_cell("a,1").is_err());
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(glyph(Classification::Ground), '.');
        assert_eq!(glyph(Classification::WaterSource), '~');
        assert_eq!(
            glyph(Classification::HighFire(fire_grid_core::FireTier::HOTTEST)),
            '5'
        );
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from(["demo-headless", "--width", "20", "--seed", "9"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.width, 20);
        assert_eq!(config.seed, 9);
        assert_eq!(config.height, FireSimConfig::default().height);
    }
}
