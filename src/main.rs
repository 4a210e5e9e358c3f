//! Verdant - plant care tracker
//!
//! CLI entry point with global panic handler.

use std::io::{self, Write};
use std::process::ExitCode;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use verdant::cli::{
    confirm, AddCommand, AddInput, CareCommand, CategoryAction, CategoryCommand, DeleteCommand,
    EditCommand, EditInput, ImageAction, ImageCommand, JournalAction, JournalCommand, ListCommand,
    ListOptions, OutputOptions, ShowCommand,
};
use verdant::config::{verdant_home, Config};
use verdant::core::{CareAction, SortOrder};
use verdant::error::exit_codes;
use verdant::storage::FileKeyValueStore;

// =============================================================================
// CLI Definition
// =============================================================================

/// Verdant - track watering, fertilizing and growth of your plants
#[derive(Parser)]
#[command(name = "verdant")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new plant
    Add {
        /// Plant name
        title: String,
        /// Species
        #[arg(long, default_value = "")]
        species: String,
        /// Where the plant lives
        #[arg(long, default_value = "")]
        location: String,
        /// Category id or label
        #[arg(long)]
        category: Option<String>,
        /// Watering interval in days
        #[arg(long = "water", value_name = "DAYS")]
        water_interval_days: Option<u32>,
        /// Fertilizer interval in days
        #[arg(long = "fertilizer", value_name = "DAYS")]
        fertilizer_interval_days: Option<u32>,
        /// Image reference; defaults to the staged image
        #[arg(long)]
        image: Option<String>,
        /// Personal notes
        #[arg(long)]
        notes: Option<String>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Edit an existing plant
    Edit {
        /// Plant ID
        id: String,
        /// New name
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        species: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Category id or label
        #[arg(long, conflicts_with = "clear_category")]
        category: Option<String>,
        /// Remove the plant from its category
        #[arg(long)]
        clear_category: bool,
        /// Watering interval in days
        #[arg(long = "water", value_name = "DAYS")]
        water_interval_days: Option<u32>,
        /// Fertilizer interval in days
        #[arg(long = "fertilizer", value_name = "DAYS")]
        fertilizer_interval_days: Option<u32>,
        #[arg(long, conflicts_with = "clear_image")]
        image: Option<String>,
        /// Remove the plant's image
        #[arg(long)]
        clear_image: bool,
        #[arg(long)]
        notes: Option<String>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show one plant with its care status and journal
    Show {
        /// Plant ID
        id: String,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// List plants
    List {
        /// Sort order (updated, title, urgency)
        #[arg(long, short)]
        sort: Option<String>,
        /// Only plants in this category (id or label)
        #[arg(long, short)]
        category: Option<String>,
        /// Only plants that need water or fertilizer
        #[arg(long)]
        needs_care: bool,
        /// Maximum number of results
        #[arg(long, short)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Delete a plant
    Delete {
        /// Plant ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Record that a plant was watered
    Water {
        /// Plant ID
        id: String,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Record that a plant was fertilized
    Fertilize {
        /// Plant ID
        id: String,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Manage a plant's growth journal
    Journal {
        #[command(subcommand)]
        action: JournalCmd,
        /// Output as JSON
        #[arg(long, short, global = true)]
        json: bool,
        /// Suppress output
        #[arg(long, short, global = true)]
        quiet: bool,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryCmd,
        /// Output as JSON
        #[arg(long, short, global = true)]
        json: bool,
        /// Suppress output
        #[arg(long, short, global = true)]
        quiet: bool,
    },

    /// Stage an image for the next plant to be added
    Image {
        #[command(subcommand)]
        action: ImageCmd,
        /// Output as JSON
        #[arg(long, short, global = true)]
        json: bool,
        /// Suppress output
        #[arg(long, short, global = true)]
        quiet: bool,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
enum JournalCmd {
    /// Add an entry
    Add {
        /// Plant ID
        plant_id: String,
        /// Entry text
        text: String,
    },
    /// Remove an entry
    Remove {
        /// Plant ID
        plant_id: String,
        /// Entry ID
        entry_id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// List entries, newest first
    List {
        /// Plant ID
        plant_id: String,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
enum CategoryCmd {
    /// Create a category
    Add {
        label: String,
    },
    /// Rename a category
    Rename {
        /// Category id or label
        category: String,
        /// New label
        label: String,
    },
    /// Delete a category; its plants show as "No Category"
    Delete {
        /// Category id or label
        category: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// List categories
    List,
}

#[derive(Subcommand, Debug, PartialEq)]
enum ImageCmd {
    /// Stage an image (URL, path or data URL)
    Stage {
        image: String,
    },
    /// Discard the staged image
    Clear,
    /// Show the staged image
    Show,
}

// =============================================================================
// Main
// =============================================================================

fn main() -> ExitCode {
    setup_panic_handler();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("verdant error: {}", e);
            ExitCode::from(exit_codes::ERROR as u8)
        }
    }
}

/// Set up a global panic handler.
///
/// On panic, logs to ~/.verdant/crash.log and exits with code 3.
fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("verdant panic: {}", info);

        if let Some(home) = verdant_home() {
            let crash_log = home.join("crash.log");
            if let Ok(mut file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log)
            {
                let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
                let _ = writeln!(file, "[{}] {}", timestamp, info);
            }
        }

        std::process::exit(exit_codes::CRASH);
    }));
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "verdant=debug" } else { "verdant=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Add {
            title,
            species,
            location,
            category,
            water_interval_days,
            fertilizer_interval_days,
            image,
            notes,
            json,
            quiet,
        } => run_add(
            AddInput {
                title,
                species,
                location,
                category,
                water_interval_days: water_interval_days.unwrap_or(0),
                fertilizer_interval_days: fertilizer_interval_days.unwrap_or(0),
                image,
                notes,
            },
            OutputOptions { json, quiet },
        ),
        Commands::Edit {
            id,
            title,
            species,
            location,
            category,
            clear_category,
            water_interval_days,
            fertilizer_interval_days,
            image,
            clear_image,
            notes,
            json,
            quiet,
        } => run_edit(
            &id,
            EditInput {
                title,
                species,
                location,
                category,
                clear_category,
                water_interval_days,
                fertilizer_interval_days,
                image,
                clear_image,
                notes,
            },
            OutputOptions { json, quiet },
        ),
        Commands::Show { id, json, quiet } => run_show(&id, OutputOptions { json, quiet }),
        Commands::List {
            sort,
            category,
            needs_care,
            limit,
            json,
            quiet,
        } => run_list(sort, category, needs_care, limit, json, quiet),
        Commands::Delete {
            id,
            yes,
            json,
            quiet,
        } => run_delete(&id, yes, OutputOptions { json, quiet }),
        Commands::Water { id, json, quiet } => {
            run_care(&id, CareAction::Water, OutputOptions { json, quiet })
        }
        Commands::Fertilize { id, json, quiet } => {
            run_care(&id, CareAction::Fertilize, OutputOptions { json, quiet })
        }
        Commands::Journal {
            action,
            json,
            quiet,
        } => run_journal(action, OutputOptions { json, quiet }),
        Commands::Category {
            action,
            json,
            quiet,
        } => run_category(action, OutputOptions { json, quiet }),
        Commands::Image {
            action,
            json,
            quiet,
        } => run_image(action, OutputOptions { json, quiet }),
    }
}

/// Convert command success to exit code.
fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(exit_codes::SUCCESS as u8)
    } else {
        ExitCode::from(exit_codes::ERROR as u8)
    }
}

fn print_formatted(formatted: &str) {
    if !formatted.is_empty() {
        print!("{}", formatted);
        if !formatted.ends_with('\n') {
            println!();
        }
    }
}

/// Ask before a destructive action unless `--yes` was given.
///
/// The prompt goes to stderr so JSON on stdout stays parseable.
fn confirmed(yes: bool, prompt: &str) -> bool {
    if yes {
        return true;
    }
    let stdin = io::stdin();
    let approved = confirm(prompt, &mut stdin.lock(), &mut io::stderr());
    if !approved {
        eprintln!("Aborted.");
    }
    approved
}

fn open_store(config: &Config) -> Result<FileKeyValueStore, Box<dyn std::error::Error>> {
    Ok(FileKeyValueStore::from_config(config)?)
}

fn run_add(
    input: AddInput,
    options: OutputOptions,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = Config::load();
    let cmd = AddCommand::new(open_store(&config)?, config);

    let output = cmd.run(input, Utc::now());
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_edit(
    id: &str,
    input: EditInput,
    options: OutputOptions,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = Config::load();
    let cmd = EditCommand::new(open_store(&config)?, config);

    let output = cmd.run(id, input, Utc::now());
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_show(id: &str, options: OutputOptions) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = Config::load();
    let cmd = ShowCommand::new(open_store(&config)?, config);

    let output = cmd.run(id, Utc::now());
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_list(
    sort: Option<String>,
    category: Option<String>,
    needs_care: bool,
    limit: Option<usize>,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let sort = sort.map(|s| s.parse::<SortOrder>()).transpose()?;

    let config = Config::load();
    let cmd = ListCommand::new(open_store(&config)?, config);
    let options = ListOptions {
        json,
        quiet,
        sort,
        category,
        needs_care,
        limit,
    };

    let output = cmd.run(&options, Utc::now());
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_delete(
    id: &str,
    yes: bool,
    options: OutputOptions,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if !confirmed(yes, "Are you sure you want to delete this plant?") {
        return Ok(ExitCode::from(exit_codes::ERROR as u8));
    }

    let config = Config::load();
    let cmd = DeleteCommand::new(open_store(&config)?, config);

    let output = cmd.run(id);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_care(
    id: &str,
    action: CareAction,
    options: OutputOptions,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = Config::load();
    let cmd = CareCommand::new(open_store(&config)?, config);

    let output = cmd.run(id, action, Utc::now());
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_journal(
    action: JournalCmd,
    options: OutputOptions,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let (plant_id, action) = match action {
        JournalCmd::Add { plant_id, text } => (plant_id, JournalAction::Add(text)),
        JournalCmd::Remove {
            plant_id,
            entry_id,
            yes,
        } => {
            if !confirmed(yes, "Are you sure you want to delete this journal entry?") {
                return Ok(ExitCode::from(exit_codes::ERROR as u8));
            }
            (plant_id, JournalAction::Remove(entry_id))
        }
        JournalCmd::List { plant_id } => (plant_id, JournalAction::List),
    };

    let config = Config::load();
    let cmd = JournalCommand::new(open_store(&config)?, config);

    let output = cmd.run(&plant_id, &action, Utc::now());
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_category(
    action: CategoryCmd,
    options: OutputOptions,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let action = match action {
        CategoryCmd::Add { label } => CategoryAction::Add { label },
        CategoryCmd::Rename { category, label } => CategoryAction::Rename {
            reference: category,
            label,
        },
        CategoryCmd::Delete { category, yes } => {
            if !confirmed(yes, "Are you sure you want to delete this category?") {
                return Ok(ExitCode::from(exit_codes::ERROR as u8));
            }
            CategoryAction::Delete {
                reference: category,
            }
        }
        CategoryCmd::List => CategoryAction::List,
    };

    let config = Config::load();
    let cmd = CategoryCommand::new(open_store(&config)?, config);

    let output = cmd.run(&action);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_image(
    action: ImageCmd,
    options: OutputOptions,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let action = match action {
        ImageCmd::Stage { image } => ImageAction::Stage(image),
        ImageCmd::Clear => ImageAction::Clear,
        ImageCmd::Show => ImageAction::Show,
    };

    let config = Config::load();
    let cmd = ImageCommand::new(open_store(&config)?, config);

    let output = cmd.run(&action);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}
