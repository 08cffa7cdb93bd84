use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use tfbs_explorer::dataset::Direction;
use tfbs_explorer::report::{self, Summary, REPORT_DIR};
use tfbs_explorer::{format, serve, tui, CellKey, Config, Dataset, Explorer, Msg};

#[derive(Parser, Debug)]
#[command(name = "tfbs-explorer")]
#[command(author, version, about = "Explore tissue x TF binding-site summaries through linked views")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the browser viewer
    Serve {
        /// Summary JSON document (default from config)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,
    },

    /// Write a static HTML snapshot of all views
    Render {
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Number of top TFs to show (one of the configured counts)
        #[arg(short = 'n', long)]
        tf_count: Option<usize>,

        /// Pin a cell before rendering, as TISSUE:TF
        #[arg(long, value_parser = parse_pin)]
        pin: Option<CellKey>,

        /// Output file (default: tfbs-reports/tfbs_snapshot_<timestamp>.html)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Explore in the terminal
    Tui {
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Print the per-TF table for the top TFs
    Summary {
        #[arg(short, long)]
        data: Option<PathBuf>,

        #[arg(short = 'n', long)]
        tf_count: Option<usize>,
    },

    /// Generate shell completion script
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_pin(s: &str) -> Result<CellKey, String> {
    match s.split_once(':') {
        Some((tissue, tf)) if !tissue.is_empty() && !tf.is_empty() => Ok(CellKey::new(tissue, tf)),
        _ => Err(format!("expected TISSUE:TF, got '{}'", s)),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), message);
    std::process::exit(1);
}

fn load_explorer(config: &Config, data: Option<PathBuf>, tf_count: Option<usize>) -> Explorer {
    let path = data.unwrap_or_else(|| config.data.path.clone());
    let dataset = Dataset::load(&path).unwrap_or_else(|e| {
        fail(format!(
            "{}\n       Check the data path: {}",
            e,
            path.display()
        ))
    });
    tracing::info!(
        path = %path.display(),
        tfs = dataset.tfs.len(),
        tissues = dataset.tissues.len(),
        "loaded dataset"
    );
    let counts = config.tf_counts();
    let tf_count = match tf_count {
        Some(n) => counts.parse(n).unwrap_or_else(|| {
            fail(format!(
                "TF count {} is not one of the allowed values {:?}",
                n,
                counts.values()
            ))
        }),
        None => config.view.default_tf_count,
    };
    Explorer::new(dataset, counts, tf_count, config.layout())
}

fn print_summary(explorer: &Explorer) {
    let view = explorer.view();
    let summary = Summary::from_view(&view);

    println!("{}", explorer.dataset().title().bold());
    println!(
        "Top {} TFs · {} tissues · {} records",
        summary.rows.len(),
        summary.tissues,
        format::count(summary.total_records())
    );
    println!("{}", "─".repeat(72));
    println!(
        "{:>4}  {:<12} {:>9} {:>9} {:>9} {:>10} {:>8}  {}",
        "#", "TF", "+", "−", "?", "total", "score", "imputed"
    );
    for row in &summary.rows {
        let score = format::score(row.score);
        let score = match row.direction() {
            Direction::Enriched => score.red(),
            Direction::Depleted => score.blue(),
            Direction::Balanced => score.normal(),
        };
        let imputed = if row.imputed_tissues > 0 {
            row.imputed_tissues.to_string().yellow()
        } else {
            "-".dimmed()
        };
        println!(
            "{:>4}  {:<12} {:>9} {:>9} {:>9} {:>10} {:>8}  {}",
            row.rank,
            row.tf,
            format::count(row.plus),
            format::count(row.minus),
            format::count(row.unknown),
            format::count(row.total),
            score,
            imputed
        );
    }
}

fn render_snapshot(mut explorer: Explorer, pin: Option<CellKey>, output: Option<PathBuf>) {
    if let Some(key) = pin {
        if !explorer.view().contains_cell(&key.tissue, &key.tf) {
            fail(format!("{} is not in the top {} TFs", key, explorer.state().tf_count));
        }
        explorer.step(Msg::Click(key));
    }

    let path =
        output.unwrap_or_else(|| report::default_path(Path::new(REPORT_DIR), &Local::now()));
    if let Err(e) = report::generate(&path, &explorer) {
        fail(format!("Failed to write snapshot: {}", e));
    }
    eprintln!("{} {}", "Snapshot saved:".green(), path.display());
}

fn main() {
    let cli = Cli::parse();

    // The terminal viewer owns the screen; everything else logs to stderr
    if !matches!(cli.command, Command::Tui { .. } | Command::Completion { .. }) {
        init_tracing();
    }

    let config = Config::load();

    match cli.command {
        Command::Serve { data, port, host } => {
            let explorer = load_explorer(&config, data, None);
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            if let Err(e) = serve::start(explorer, &host, port) {
                fail(format!("Server error: {}", e));
            }
        }
        Command::Render {
            data,
            tf_count,
            pin,
            output,
        } => {
            let explorer = load_explorer(&config, data, tf_count);
            render_snapshot(explorer, pin, output);
        }
        Command::Tui { data } => {
            let explorer = load_explorer(&config, data, None);
            if let Err(e) = tui::run(explorer) {
                fail(format!("TUI error: {}", e));
            }
        }
        Command::Summary { data, tf_count } => {
            let explorer = load_explorer(&config, data, tf_count);
            print_summary(&explorer);
        }
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "tfbs-explorer", &mut io::stdout());
        }
    }
}
