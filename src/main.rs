//! # Dashlayout CLI
//!
//! Usage:
//!   dashlayout dashboard.json -o laid_out.json
//!   echo '{ ... }' | dashlayout --template executive
//!   dashlayout --example > dashboard.json

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use dashlayout::{Canvas, DashboardConfig, LayoutEngine, LayoutError, LayoutOptions};

/// Lay out dashboard widgets on a fixed canvas
#[derive(Parser, Debug)]
#[command(name = "dashlayout")]
#[command(version, about = "Lay out dashboard widgets on a fixed canvas")]
struct Cli {
    /// Dashboard JSON file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Write the laid-out dashboard here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Template to apply: executive, analytical or balanced
    #[arg(short, long)]
    template: Option<String>,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 1200.0)]
    width: f64,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// JSON file with layout options (grid size, spacing, default sizes)
    #[arg(long)]
    options: Option<PathBuf>,

    /// Apply the stat card/chart row layout for dense dashboards
    #[arg(long, conflicts_with = "template")]
    special: bool,

    /// Report overlapping elements on stderr
    #[arg(long)]
    check: bool,

    /// Print an example dashboard and exit
    #[arg(long)]
    example: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if cli.example {
        print!("{}", example_dashboard_json());
        return;
    }

    if let Err(e) = run(&cli) {
        eprintln!("✗ {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let input = match &cli.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let config: DashboardConfig = serde_json::from_str(&input).map_err(LayoutError::from)?;

    let options = match &cli.options {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str::<LayoutOptions>(&raw).map_err(LayoutError::from)?
        }
        None => LayoutOptions::default(),
    };
    let engine = LayoutEngine::with_options(options)?;
    let canvas = Canvas::new(cli.width, cli.height);
    let mut rng = rand::thread_rng();

    let laid_out = match (&cli.template, cli.special) {
        (Some(name), _) => engine.apply_template_layout(&config, name, canvas, &mut rng)?,
        (None, true) => engine.create_dashboard_layout(&config, canvas, &mut rng)?,
        (None, false) => engine.smart_distribute(&config, canvas, &mut rng)?,
    };

    if cli.check {
        let overlaps = dashlayout::find_overlaps(&laid_out);
        if overlaps.is_empty() {
            eprintln!("✓ {} elements, no overlaps", laid_out.total_elements());
        } else {
            for (a, b) in &overlaps {
                eprintln!("! {} overlaps {}", a, b);
            }
        }
    }

    let json = serde_json::to_string_pretty(&laid_out)?;
    match &cli.output {
        Some(path) => {
            fs::write(path, &json)?;
            eprintln!("✓ Laid out {} elements to {}", laid_out.total_elements(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn example_dashboard_json() -> &'static str {
    r##"{
  "statCards": [
    { "column": "revenue", "statType": "sum", "title": "Total Revenue" },
    { "column": "orders", "statType": "count", "title": "Orders" },
    { "column": "basket", "statType": "mean", "title": "Average Basket" },
    { "column": "refunds", "statType": "max", "title": "Largest Refund" }
  ],
  "charts": [
    { "type": "line", "columns": ["month", "revenue"], "title": "Revenue by Month" },
    { "type": "bar", "columns": ["region", "orders"], "title": "Orders by Region" },
    { "type": "pie", "columns": ["channel"], "title": "Sales Channels",
      "description": "Share of orders per acquisition channel" }
  ],
  "dataTables": [
    { "columns": ["order_id", "region", "revenue"], "title": "Recent Orders",
      "position": { "x": 0, "y": 0, "width": 600, "height": 250 } }
  ],
  "textBoxes": [
    { "content": "Figures exclude cancelled orders." }
  ]
}
"##
}
