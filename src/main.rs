use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::LevelFilter;

use tower_trial::{FileStore, GameConfig, Output, OutputBlock, Session};

#[derive(Parser)]
#[command(name = "tower-trial")]
#[command(about = "Climb the wizard's tower in your terminal")]
#[command(version)]
struct Cli {
    /// Optional game config (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory quicksaves are written to
    #[arg(long, default_value = ".tower_trial")]
    save_dir: PathBuf,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn strip_markup(s: &str) -> String {
    s.replace("<b>", "").replace("</b>", "")
}

fn flush_output(out: Output) {
    let mut printed_anything = false;
    let mut started_events = false;

    for block in out.blocks {
        match block {
            OutputBlock::Title(t) => {
                println!("\n{}", strip_markup(&t));
            }
            OutputBlock::Text(line) => {
                println!("{}", strip_markup(&line));
            }
            OutputBlock::Event(ev) => {
                if !started_events {
                    if printed_anything {
                        println!();
                    }
                    started_events = true;
                }
                println!("{}", strip_markup(&ev));
            }
            OutputBlock::Hint(h) => {
                println!("  * {}", strip_markup(&h));
            }
            OutputBlock::Exits(exits) => {
                println!("\n{}", exits);
            }
        }
        printed_anything = true;
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => match GameConfig::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load config '{}': {e}", path.display());
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let store = match FileStore::open(&cli.save_dir) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Cannot use save directory '{}': {e}", cli.save_dir.display());
            std::process::exit(1);
        }
    };

    let mut session = match Session::tower(config, Box::new(store)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to load the tower: {e}");
            std::process::exit(1);
        }
    };

    flush_output(session.start());
    println!("\nType 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut last_tick = Instant::now();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        let bytes_read = stdin.read_line(&mut input)?;
        if bytes_read == 0 {
            println!("\nGoodbye.");
            break;
        }

        // time spent at the prompt still counts for hazards and debuffs
        let now = Instant::now();
        flush_output(session.advance(now.duration_since(last_tick)));
        last_tick = now;

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (out, quit) = session.step(input);
        flush_output(out);

        if quit {
            break;
        }
    }

    Ok(())
}
