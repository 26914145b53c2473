use std::io::Write;
use std::path::PathBuf;

use symbios_patterns::{
    Evolver,
    algorithms::simple::{DEFAULT_TOURNAMENT_SIZE, ReplacementStrategy, SimpleGA},
    config::{EvolutionConfig, check_geometry},
    error::ConfigError,
    pattern::PatternSet,
};
use tempfile::NamedTempFile;

#[test]
fn test_defaults_match_reference_run() {
    let config = EvolutionConfig::default();

    assert_eq!(config.population_size, 500);
    assert_eq!(config.generations, 500);
    assert!((config.mutation_rate - 0.05).abs() < f32::EPSILON);
    assert_eq!(config.tournament_size, DEFAULT_TOURNAMENT_SIZE);
    assert_eq!(DEFAULT_TOURNAMENT_SIZE, 3);
    assert_eq!(config.num_images, 5);
    assert_eq!(config.strategy, ReplacementStrategy::FullReplacement);
    assert_eq!(config.seed, None);
    assert_eq!((config.image_size, config.block_size), (24, 3));
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_fills_defaults() {
    let config: EvolutionConfig = serde_json::from_str(
        r#"{ "population_size": 40, "strategy": "elitist", "seed": 99 }"#,
    )
    .unwrap();

    assert_eq!(config.population_size, 40);
    assert_eq!(config.strategy, ReplacementStrategy::Elitist);
    assert_eq!(config.seed, Some(99));
    assert_eq!(config.generations, 500);
    assert_eq!(config.csv_path, PathBuf::from("results.csv"));
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{ "generations": 12, "mutation_rate": 0.1 }}"#).unwrap();

    let config = EvolutionConfig::load(file.path()).unwrap();
    assert_eq!(config.generations, 12);
    assert!((config.mutation_rate - 0.1).abs() < f32::EPSILON);
}

#[test]
fn test_load_reports_bad_json() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{{ population_size: }}").unwrap();

    assert!(matches!(
        EvolutionConfig::load(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_unknown_strategy_is_a_parse_error() {
    let result = serde_json::from_str::<EvolutionConfig>(r#"{ "strategy": "roulette" }"#);
    assert!(result.is_err());
}

#[test]
fn test_indivisible_geometry_is_rejected() {
    assert!(matches!(
        check_geometry(24, 5),
        Err(ConfigError::IndivisibleGeometry {
            image_size: 24,
            block_size: 5
        })
    ));
    assert!(matches!(
        check_geometry(24, 0),
        Err(ConfigError::IndivisibleGeometry { .. })
    ));

    let config = EvolutionConfig {
        image_size: 25,
        ..EvolutionConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::IndivisibleGeometry { .. })
    ));
}

#[test]
fn test_other_divisible_geometry_is_unsupported() {
    assert!(matches!(
        check_geometry(30, 3),
        Err(ConfigError::UnsupportedGeometry { .. })
    ));
    assert!(matches!(
        check_geometry(24, 4),
        Err(ConfigError::UnsupportedGeometry { .. })
    ));
    assert_eq!(check_geometry(24, 3).unwrap(), 8);
}

#[test]
fn test_validate_rejects_bad_parameters() {
    let base = EvolutionConfig::default();

    let cases = [
        EvolutionConfig {
            population_size: 0,
            ..base.clone()
        },
        EvolutionConfig {
            mutation_rate: 1.01,
            ..base.clone()
        },
        EvolutionConfig {
            tournament_size: 0,
            ..base.clone()
        },
        EvolutionConfig {
            num_images: 0,
            ..base.clone()
        },
    ];

    let errors: Vec<ConfigError> = cases
        .iter()
        .map(|c| c.validate().unwrap_err())
        .collect();
    assert!(matches!(errors[0], ConfigError::EmptyPopulation));
    assert!(matches!(errors[1], ConfigError::InvalidMutationRate(_)));
    assert!(matches!(errors[2], ConfigError::InvalidTournamentSize));
    assert!(matches!(errors[3], ConfigError::NoImages));
}

#[test]
fn test_seed_resolution() {
    let fixed = EvolutionConfig {
        seed: Some(1234),
        ..EvolutionConfig::default()
    };
    assert_eq!(fixed.resolve_seed(), 1234);
}

#[test]
fn test_engine_from_config() {
    let config = EvolutionConfig {
        population_size: 12,
        mutation_rate: 0.2,
        tournament_size: 4,
        strategy: ReplacementStrategy::Elitist,
        ..EvolutionConfig::default()
    };

    let ga = SimpleGA::from_config(&config, 5, PatternSet::random).unwrap();
    assert_eq!(ga.population().len(), 12);
    assert_eq!(ga.tournament_size(), 4);
    assert_eq!(ga.strategy(), ReplacementStrategy::Elitist);

    let again = SimpleGA::from_config(&config, 5, PatternSet::random).unwrap();
    assert_eq!(ga.population(), again.population());
}

#[test]
fn test_engine_from_invalid_config_fails() {
    let config = EvolutionConfig {
        block_size: 5,
        ..EvolutionConfig::default()
    };
    assert!(SimpleGA::from_config(&config, 5, PatternSet::random).is_err());
}
