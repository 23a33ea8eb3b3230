use clap::{Args, Parser, Subcommand};
use packload_core::*;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "packload")]
#[command(about = "Safe pack load estimates for hiking dogs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a safe pack load for a hike
    Calc(CalcArgs),

    /// Manage saved dog profiles
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Show pack fit, training and safety guidance
    Resources,
}

#[derive(Args)]
struct CalcArgs {
    /// Hike distance (miles for us, km for metric)
    #[arg(long, allow_negative_numbers = true)]
    distance: f64,

    /// Terrain (easy, mixed, rugged)
    #[arg(long, default_value = "easy")]
    terrain: Terrain,

    /// Elevation gain (feet for us, meters for metric)
    #[arg(long, allow_negative_numbers = true)]
    elevation: Option<f64>,

    /// Temperature (°F for us, °C for metric)
    #[arg(long, allow_negative_numbers = true)]
    temperature: Option<f64>,

    /// Use a saved profile (id or name); cannot be combined with dog flags
    #[arg(long, conflicts_with = "no_profile")]
    profile: Option<String>,

    /// Ignore the selected profile and use the dog flags
    #[arg(long)]
    no_profile: bool,

    #[command(flatten)]
    dog: DogArgs,

    /// Print the result payload as JSON
    #[arg(long)]
    json: bool,

    /// Include the list of adjustments that were applied
    #[arg(long)]
    explain: bool,
}

#[derive(Args)]
struct DogArgs {
    /// Measurement system (us, metric)
    #[arg(long)]
    units: Option<Units>,

    /// Dog weight (lb for us, kg for metric)
    #[arg(long, allow_negative_numbers = true)]
    weight: Option<f64>,

    /// Age in whole years
    #[arg(long, allow_negative_numbers = true)]
    age_years: Option<f64>,

    /// Additional months of age (0-11) [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    age_months: Option<f64>,

    /// Size class (toy, small, medium, large, giant) [default: medium]
    #[arg(long)]
    size: Option<SizeClass>,

    /// Fitness level (low, avg, high) [default: avg]
    #[arg(long)]
    fitness: Option<Fitness>,

    /// Pack experience (new, some, trained) [default: some]
    #[arg(long)]
    experience: Option<Experience>,
}

impl DogArgs {
    /// Whether any dog detail was given on the command line
    fn any_given(&self) -> bool {
        self.units.is_some()
            || self.weight.is_some()
            || self.age_years.is_some()
            || self.age_months.is_some()
            || self.size.is_some()
            || self.fitness.is_some()
            || self.experience.is_some()
    }
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Save a new dog profile
    Add {
        #[arg(long)]
        name: String,

        /// Also select the new profile
        #[arg(long)]
        select: bool,

        #[command(flatten)]
        dog: DogArgs,
    },

    /// List saved profiles, newest first
    List,

    /// Select the profile used by `calc`
    Select {
        /// Profile id or name
        profile: String,
    },

    /// Clear the selected profile
    Clear,

    /// Delete a saved profile
    Delete {
        /// Profile id or name
        profile: String,
    },
}

// Errors are printed with their Display form, e.g. "Invalid input: ..."
fn main() -> ExitCode {
    packload_core::logging::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }

    match cli.command {
        Commands::Calc(args) => cmd_calc(args, &config),
        Commands::Profile { action } => cmd_profile(action, &config),
        Commands::Resources => {
            print!("{}", render_resources());
            Ok(())
        }
    }
}

fn cmd_calc(args: CalcArgs, config: &Config) -> Result<()> {
    let hike = HikeConditions {
        distance: args.distance,
        terrain: args.terrain,
        elevation_gain: args.elevation,
        temperature: args.temperature,
    };

    let store = ProfileStore::load(&config.profiles_path())?;
    let profile = match &args.profile {
        Some(key) => Some(store.find(key)?),
        None if args.no_profile => None,
        None => store.selected(),
    };

    let input = match profile {
        Some(profile) if args.dog.any_given() => {
            return Err(Error::Validation(format!(
                "Profile '{}' already supplies the dog; pass --no-profile to use the dog flags.",
                profile.name
            )));
        }
        Some(profile) => {
            tracing::info!("Using profile {} ({})", profile.name, profile.id);
            if !args.json {
                println!(
                    "Using profile: {} ({} {}, age {}y {}m)\n",
                    profile.name,
                    profile.dog_weight,
                    profile.units.weight_suffix(),
                    profile.age_years,
                    profile.age_months
                );
            }
            profile.to_input(&hike)
        }
        None => ad_hoc_input(&args.dog, &hike, config)?,
    };

    input.validate()?;

    let result = calculate_pack_weight(&input);
    let payload = ResultsPayload::new(&input, result);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{}\n", render_hike(&input));
        print!("{}", render_text(&payload, args.explain));
    }

    Ok(())
}

fn ad_hoc_input(dog: &DogArgs, hike: &HikeConditions, config: &Config) -> Result<CalculationInput> {
    let (dog_weight, age_years) = match (dog.weight, dog.age_years) {
        (Some(weight), Some(years)) => (weight, years),
        _ => {
            return Err(Error::Validation(
                "Provide --weight and --age-years, or use a saved profile.".into(),
            ))
        }
    };

    Ok(CalculationInput {
        units: dog.units.unwrap_or(config.defaults.units),
        dog_weight,
        age_years,
        age_months: dog.age_months.unwrap_or(0.0),
        size_class: dog.size.unwrap_or(SizeClass::Medium),
        fitness: dog.fitness.unwrap_or(Fitness::Avg),
        experience: dog.experience.unwrap_or(Experience::Some),
        distance: hike.distance,
        terrain: hike.terrain,
        elevation_gain: hike.elevation_gain,
        temperature: hike.temperature,
    })
}

fn cmd_profile(action: ProfileCommand, config: &Config) -> Result<()> {
    let path = config.profiles_path();

    match action {
        ProfileCommand::Add { name, select, dog } => {
            let draft = ProfileDraft {
                name,
                units: dog.units.unwrap_or(config.defaults.units),
                dog_weight: dog.weight.unwrap_or(f64::NAN),
                age_years: dog.age_years.unwrap_or(f64::NAN),
                age_months: dog.age_months.unwrap_or(0.0),
                size_class: dog.size.unwrap_or(SizeClass::Medium),
                fitness: dog.fitness.unwrap_or(Fitness::Avg),
                experience: dog.experience.unwrap_or(Experience::Some),
            };

            let profile = ProfileStore::update(&path, |store| {
                let profile = store.add(draft)?;
                if select {
                    store.select(profile.id)?;
                }
                Ok(profile)
            })?;

            println!("✓ Saved profile {} ({})", profile.name, profile.id);
            if select {
                println!("  Selected for calculations");
            }
        }

        ProfileCommand::List => {
            let store = ProfileStore::load(&path)?;
            if store.list().is_empty() {
                println!("No saved profiles.");
                return Ok(());
            }

            for profile in store.list() {
                let marker = if store.selected_dog_id == Some(profile.id) {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{} {}  {} — {} {}, age {}y {}m, {} / {} / {}",
                    marker,
                    profile.id,
                    profile.name,
                    profile.dog_weight,
                    profile.units.weight_suffix(),
                    profile.age_years,
                    profile.age_months,
                    profile.size_class,
                    profile.fitness,
                    profile.experience
                );
            }
        }

        ProfileCommand::Select { profile } => {
            let selected = ProfileStore::update(&path, |store| {
                let found = store.find(&profile)?.clone();
                store.select(found.id)?;
                Ok(found)
            })?;
            println!("✓ Selected {} ({})", selected.name, selected.id);
        }

        ProfileCommand::Clear => {
            ProfileStore::update(&path, |store| {
                store.clear_selection();
                Ok(())
            })?;
            println!("✓ Cleared profile selection");
        }

        ProfileCommand::Delete { profile } => {
            let removed = ProfileStore::update(&path, |store| {
                let id = store.find(&profile)?.id;
                store.delete(id)
            })?;
            println!("✓ Deleted {} ({})", removed.name, removed.id);
        }
    }

    Ok(())
}
