//! Pattern evolution CLI - load training images, evolve, report.

use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command, value_parser};
use log::info;

use symbios_patterns::{
    Evolver,
    algorithms::simple::{ReplacementStrategy, SimpleGA},
    config::EvolutionConfig,
    loss::ImageSetEvaluator,
    pattern::PatternSet,
    prompt::collect_images,
    reconstruct::reconstruct_with_loss,
    report::{CsvReport, DetailLog, generation_line},
};

fn cli() -> Command {
    Command::new("symbios-patterns")
        .about("Evolve a dictionary of 3x3 binary patterns that reconstructs 24x24 images")
        .arg(
            Arg::new("config")
                .long("config")
                .num_args(1)
                .value_parser(value_parser!(PathBuf))
                .help("JSON configuration file"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .num_args(1)
                .value_parser(value_parser!(u64))
                .help("RNG seed (default: wall clock)"),
        )
        .arg(
            Arg::new("generations")
                .long("generations")
                .num_args(1)
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("population")
                .long("population")
                .num_args(1)
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("mutation-rate")
                .long("mutation-rate")
                .num_args(1)
                .value_parser(value_parser!(f32)),
        )
        .arg(
            Arg::new("strategy")
                .long("strategy")
                .num_args(1)
                .value_parser(["full", "elitist"])
                .help("Next-generation method: full replacement or elitist"),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .num_args(1)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("details")
                .long("details")
                .num_args(1)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("images")
                .num_args(0..)
                .value_parser(value_parser!(PathBuf))
                .help("Training image files; missing ones are prompted for"),
        )
}

/// Config file (or defaults) with command-line overrides applied.
fn load_config(matches: &ArgMatches) -> Result<EvolutionConfig, Box<dyn Error>> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => EvolutionConfig::load(path)?,
        None => EvolutionConfig::default(),
    };

    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(seed);
    }
    if let Some(&generations) = matches.get_one::<usize>("generations") {
        config.generations = generations;
    }
    if let Some(&population) = matches.get_one::<usize>("population") {
        config.population_size = population;
    }
    if let Some(&rate) = matches.get_one::<f32>("mutation-rate") {
        config.mutation_rate = rate;
    }
    if let Some(strategy) = matches.get_one::<String>("strategy") {
        config.strategy = strategy.parse::<ReplacementStrategy>()?;
    }
    if let Some(path) = matches.get_one::<PathBuf>("csv") {
        config.csv_path = path.clone();
    }
    if let Some(path) = matches.get_one::<PathBuf>("details") {
        config.details_path = path.clone();
    }

    config.validate()?;
    Ok(config)
}

fn run() -> Result<(), Box<dyn Error>> {
    let matches = cli().get_matches();
    let config = load_config(&matches)?;

    let given: Vec<PathBuf> = matches
        .get_many::<PathBuf>("images")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default();
    let images = collect_images(
        &mut io::stdin().lock(),
        &mut io::stdout(),
        config.num_images,
        &given,
    )?;

    for (i, image) in images.iter().enumerate() {
        println!("\nOriginal Image {} (bit notation):", i + 1);
        print!("{image}");
    }
    println!();

    let mut csv = CsvReport::new(BufWriter::new(File::create(&config.csv_path)?))?;
    let mut details = DetailLog::new(BufWriter::new(File::create(&config.details_path)?));

    let seed = config.resolve_seed();
    info!("Using seed {seed}");
    let mut ga = SimpleGA::from_config(&config, seed, PatternSet::random)?;
    if let Some(first) = ga.population().first() {
        details.initial_patterns(&first.genotype)?;
    }

    let evaluator = ImageSetEvaluator::new(images);
    let summary = ga.run(&evaluator, config.generations, |stats| -> io::Result<()> {
        println!("{}", generation_line(stats));
        csv.record(stats)?;
        details.generation(stats)
    })?;
    csv.finish()?;

    details.final_patterns(config.generations, &summary.best.genotype)?;
    for (i, image) in evaluator.images().iter().enumerate() {
        let reconstruction = reconstruct_with_loss(image, &summary.best.genotype);
        details.image(i + 1, image, &reconstruction)?;

        println!("Reconstructed Image {} Using Evolved Patterns:", i + 1);
        print!("{}", reconstruction.image);
        println!();
    }
    details.finish()?;

    println!(
        "Best total loss: {} (reports: {}, {})",
        summary.best.fitness,
        config.csv_path.display(),
        config.details_path.display()
    );
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
