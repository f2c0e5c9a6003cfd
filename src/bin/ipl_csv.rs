//! IPL CSV Tool - run dashboard analyses from the command line
//!
//! This tool loads the ball-by-ball dataset and runs any of the analysis
//! views against it, printing the resulting tables and bar charts. The
//! `fetch-data` subcommand downloads and extracts the dataset archive.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cricklytics::analysis::{search_names, PROFILE_MIN_DELIVERIES};
use cricklytics::dataset::{self, Dataset};
use cricklytics::pipeline::{
    batsman_swot, batting_profile, bowling_profile, eligible_batsmen, eligible_bowlers,
    line_length_insights, render_blocks, shot_effectiveness, toss_impact, BatsmanSwotConfig,
    BattingProfileConfig, BowlingProfileConfig, LineLengthConfig, ShotEffectivenessConfig,
    TossImpactConfig,
};
use std::path::PathBuf;

/// Default dataset CSV location after `fetch-data`.
const DEFAULT_DATA: &str = "ipl_data/ipl_data.csv";

#[derive(Parser)]
#[command(name = "ipl-csv")]
#[command(about = "Analyze an IPL ball-by-ball dataset from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download and extract the ball-by-ball dataset archive
    FetchData {
        /// Archive URL
        #[arg(long, default_value = dataset::DATA_URL)]
        url: String,

        /// Directory to extract the archive into
        #[arg(long, default_value = dataset::DATA_DIR)]
        dest: PathBuf,
    },

    /// Average runs and dismissal rate per shot type at a ground
    Shots {
        /// Dataset CSV path
        #[arg(long, env = "CRICKLYTICS_DATA", default_value = DEFAULT_DATA)]
        data: PathBuf,

        /// Ground to analyze
        #[arg(short, long)]
        ground: String,

        /// Restrict to these bowling kinds (comma separated)
        #[arg(long, value_delimiter = ',')]
        bowl_kind: Vec<String>,

        /// Restrict to these bowling styles (comma separated)
        #[arg(long, value_delimiter = ',')]
        bowl_style: Vec<String>,

        /// Restrict to these batting hands (comma separated)
        #[arg(long, value_delimiter = ',')]
        bat_hand: Vec<String>,
    },

    /// Bowling average, economy, and strike rate per line/length combination
    LineLength {
        /// Dataset CSV path
        #[arg(long, env = "CRICKLYTICS_DATA", default_value = DEFAULT_DATA)]
        data: PathBuf,

        /// Restrict to these grounds (comma separated; default all)
        #[arg(short, long, value_delimiter = ',')]
        ground: Vec<String>,

        /// Restrict to these bowling kinds (comma separated)
        #[arg(long, value_delimiter = ',')]
        bowl_kind: Vec<String>,

        /// Restrict to these bowling styles (comma separated)
        #[arg(long, value_delimiter = ',')]
        bowl_style: Vec<String>,

        /// Restrict to these batting hands (comma separated)
        #[arg(long, value_delimiter = ',')]
        bat_hand: Vec<String>,
    },

    /// Batsman strengths and weaknesses by line, length, and bowling kind
    Swot {
        /// Dataset CSV path
        #[arg(long, env = "CRICKLYTICS_DATA", default_value = DEFAULT_DATA)]
        data: PathBuf,

        /// Batsman to analyze (exact name; use `players` to search)
        #[arg(short, long)]
        batsman: String,

        /// Restrict to these bowling kinds (comma separated)
        #[arg(long, value_delimiter = ',')]
        bowl_kind: Vec<String>,

        /// Restrict to these bowling styles (comma separated)
        #[arg(long, value_delimiter = ',')]
        bowl_style: Vec<String>,
    },

    /// Toss and batting-first win percentages at a ground
    Toss {
        /// Dataset CSV path
        #[arg(long, env = "CRICKLYTICS_DATA", default_value = DEFAULT_DATA)]
        data: PathBuf,

        /// Ground to analyze
        #[arg(short, long)]
        ground: String,

        /// Restrict to deliveries where this team won the toss
        #[arg(long)]
        team: Option<String>,

        /// Bowling kinds for the bowling breakdown (comma separated; default all)
        #[arg(long, value_delimiter = ',')]
        bowl_kind: Vec<String>,

        /// Restrict the breakdown to these bowling styles (comma separated)
        #[arg(long, value_delimiter = ',')]
        bowl_style: Vec<String>,
    },

    /// Phase-wise batting profile for an eligible batsman
    BattingProfile {
        /// Dataset CSV path
        #[arg(long, env = "CRICKLYTICS_DATA", default_value = DEFAULT_DATA)]
        data: PathBuf,

        /// Batsman to profile
        #[arg(short, long)]
        batsman: String,

        /// Restrict to these grounds (comma separated)
        #[arg(long, value_delimiter = ',')]
        ground: Vec<String>,

        /// Restrict to these bowling kinds (comma separated)
        #[arg(long, value_delimiter = ',')]
        bowl_kind: Vec<String>,

        /// Restrict to these bowling styles (comma separated)
        #[arg(long, value_delimiter = ',')]
        bowl_style: Vec<String>,
    },

    /// Phase-wise bowling profile for an eligible bowler
    BowlingProfile {
        /// Dataset CSV path
        #[arg(long, env = "CRICKLYTICS_DATA", default_value = DEFAULT_DATA)]
        data: PathBuf,

        /// Bowler to profile
        #[arg(short, long)]
        bowler: String,

        /// Restrict to one ground
        #[arg(long)]
        ground: Option<String>,

        /// Restrict to one batting hand
        #[arg(long)]
        bat_hand: Option<String>,
    },

    /// List players eligible for profile views, optionally filtered by search
    Players {
        /// Dataset CSV path
        #[arg(long, env = "CRICKLYTICS_DATA", default_value = DEFAULT_DATA)]
        data: PathBuf,

        /// Which role to list
        #[arg(long, value_enum, default_value = "bat")]
        role: Role,

        /// Case-insensitive substring search
        #[arg(short, long)]
        search: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Role {
    Bat,
    Bowl,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::FetchData { url, dest } => {
            let csv_path = dataset::download_and_extract(&url, &dest)?;
            println!("Dataset ready: {}", csv_path.display());
        }

        Commands::Shots {
            data,
            ground,
            bowl_kind,
            bowl_style,
            bat_hand,
        } => {
            let ds = load_dataset(&data)?;
            let config = ShotEffectivenessConfig {
                ground,
                bowl_kinds: toggle(bowl_kind),
                bowl_styles: toggle(bowl_style),
                bat_hands: toggle(bat_hand),
            };
            print_view(&shot_effectiveness(&ds, &config).blocks)?;
        }

        Commands::LineLength {
            data,
            ground,
            bowl_kind,
            bowl_style,
            bat_hand,
        } => {
            let ds = load_dataset(&data)?;
            let config = LineLengthConfig {
                grounds: ground,
                bowl_kinds: toggle(bowl_kind),
                bowl_styles: toggle(bowl_style),
                bat_hands: toggle(bat_hand),
            };
            print_view(&line_length_insights(&ds, &config).blocks)?;
        }

        Commands::Swot {
            data,
            batsman,
            bowl_kind,
            bowl_style,
        } => {
            let ds = load_dataset(&data)?;
            let config = BatsmanSwotConfig {
                batsman,
                bowl_kinds: toggle(bowl_kind),
                bowl_styles: toggle(bowl_style),
            };
            print_view(&batsman_swot(&ds, &config).blocks)?;
        }

        Commands::Toss {
            data,
            ground,
            team,
            bowl_kind,
            bowl_style,
        } => {
            let ds = load_dataset(&data)?;
            let config = TossImpactConfig {
                ground,
                toss_team: team,
                bowl_kinds: bowl_kind,
                bowl_styles: toggle(bowl_style),
            };
            print_view(&toss_impact(&ds, &config).blocks)?;
        }

        Commands::BattingProfile {
            data,
            batsman,
            ground,
            bowl_kind,
            bowl_style,
        } => {
            let ds = load_dataset(&data)?;
            let config = BattingProfileConfig {
                batsman,
                grounds: toggle(ground),
                bowl_kinds: toggle(bowl_kind),
                bowl_styles: toggle(bowl_style),
            };
            print_view(&batting_profile(&ds, &config).blocks)?;
        }

        Commands::BowlingProfile {
            data,
            bowler,
            ground,
            bat_hand,
        } => {
            let ds = load_dataset(&data)?;
            let config = BowlingProfileConfig {
                bowler,
                ground,
                bat_hand,
            };
            print_view(&bowling_profile(&ds, &config).blocks)?;
        }

        Commands::Players { data, role, search } => {
            let ds = load_dataset(&data)?;
            let names = match role {
                Role::Bat => eligible_batsmen(&ds),
                Role::Bowl => eligible_bowlers(&ds),
            };
            let names = match search {
                Some(term) => search_names(&names, &term),
                None => names,
            };
            if names.is_empty() {
                println!(
                    "No players with at least {} deliveries match.",
                    PROFILE_MIN_DELIVERIES
                );
            } else {
                for name in names {
                    println!("{}", name);
                }
            }
        }
    }

    Ok(())
}

/// Load the dataset, failing startup loudly if it is missing or invalid.
fn load_dataset(path: &PathBuf) -> Result<Dataset> {
    Dataset::load(path).with_context(|| {
        format!(
            "Dataset {} not usable; run `ipl-csv fetch-data` first",
            path.display()
        )
    })
}

/// An empty multi-value argument means the filter is switched off.
fn toggle(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

fn print_view(blocks: &[cricklytics::pipeline::Block]) -> Result<()> {
    print!("{}", render_blocks(blocks)?);
    Ok(())
}
