use std::io::Write;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::NamedTempFile;

use stocksim::report::fraction_above;
use stocksim::{
    build_paths, daily_returns, generate_returns, run_simulation, simulate, simulate_report,
    summarize, CsvPriceSource, MarketDataProvider, PriceSeries, ReturnModel, SimError,
    SimulationConfig, StaticPriceSource, Thresholds,
};

const CLOSES: [f64; 6] = [10.0, 10.5, 11.0, 10.8, 11.2, 11.5];

fn prices() -> PriceSeries {
    PriceSeries::new(CLOSES.to_vec()).unwrap()
}

fn config(days: usize, simulations: usize, model: ReturnModel, seed: u64) -> SimulationConfig {
    SimulationConfig {
        days,
        simulations,
        model,
        seed: Some(seed),
    }
}

#[test]
fn test_bootstrap_scenario_shape_and_anchor() {
    let ensemble = simulate(&prices(), &config(5, 10, ReturnModel::Bootstrap, 42)).unwrap();

    assert_eq!(ensemble.shape(), (6, 10));
    assert_eq!(ensemble.prices().row(0), &[11.5; 10]);
}

#[test]
fn test_shape_for_all_models() {
    for model in ReturnModel::all() {
        for (days, sims) in [(1, 1), (1, 20), (15, 1), (30, 200)] {
            let ensemble = simulate(&prices(), &config(days, sims, model, 9)).unwrap();
            assert_eq!(ensemble.shape(), (days + 1, sims));
            assert!(ensemble.prices().row(0).iter().all(|&p| p == 11.5));
        }
    }
}

#[test]
fn test_bootstrap_draws_only_observed_returns() {
    let returns = daily_returns(&CLOSES).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let matrix = generate_returns(&returns, ReturnModel::Bootstrap, 50, 40, &mut rng).unwrap();

    assert!(matrix.as_slice().iter().all(|r| returns.contains(r)));
}

#[test]
fn test_same_seed_same_ensemble_and_report() {
    let thresholds = Thresholds::new(11.0).with_ever_below(10.0);
    for model in ReturnModel::all() {
        let cfg = config(20, 300, model, 1234);

        assert_eq!(simulate(&prices(), &cfg).unwrap(), simulate(&prices(), &cfg).unwrap());
        assert_eq!(
            simulate_report(&prices(), &cfg, &thresholds).unwrap(),
            simulate_report(&prices(), &cfg, &thresholds).unwrap()
        );
    }
}

#[test]
fn test_explicit_rng_matches_config_seed() {
    let cfg = config(10, 50, ReturnModel::Normal, 77);
    let mut rng = StdRng::seed_from_u64(77);

    assert_eq!(
        run_simulation(&prices(), &cfg, &mut rng).unwrap(),
        simulate(&prices(), &cfg).unwrap()
    );
}

#[test]
fn test_prob_above_is_non_increasing_in_target() {
    let ensemble = simulate(&prices(), &config(30, 500, ReturnModel::Bootstrap, 3)).unwrap();

    let mut previous = 1.0;
    for step in 0..40 {
        let target = 8.0 + step as f64 * 0.25;
        let report = summarize(&ensemble, &Thresholds::new(target)).unwrap();
        assert!(report.prob_above_target <= previous);
        previous = report.prob_above_target;
    }
}

#[test]
fn test_ever_above_dominates_final_day() {
    let ensemble = simulate(&prices(), &config(30, 500, ReturnModel::Normal, 8)).unwrap();

    for target in [10.0, 11.5, 12.0, 13.0, 15.0] {
        let report = summarize(&ensemble, &Thresholds::new(target)).unwrap();
        assert!(report.ever_above.probability >= report.prob_above_target);
        assert_eq!(report.prob_above_target, fraction_above(ensemble.final_prices(), target));
    }
}

#[test]
fn test_single_simulation_collapses_band() {
    let ensemble = simulate(&prices(), &config(5, 1, ReturnModel::Bootstrap, 2)).unwrap();
    let report = summarize(&ensemble, &Thresholds::new(11.0)).unwrap();
    let last = ensemble.final_prices()[0];

    assert_eq!(report.percentile_25, last);
    assert_eq!(report.percentile_75, last);
    assert_eq!(report.min_price, last);
    assert_eq!(report.max_price, last);
}

#[test]
fn test_report_band_is_ordered() {
    let cfg = config(30, 1000, ReturnModel::Bootstrap, 21);
    let report = simulate_report(&prices(), &cfg, &Thresholds::new(12.0)).unwrap();

    assert_eq!(report.simulations, 1000);
    assert_eq!(report.days, 30);
    assert_eq!(report.current_price, 11.5);
    assert!(report.min_price <= report.percentile_25);
    assert!(report.percentile_25 <= report.percentile_75);
    assert!(report.percentile_75 <= report.max_price);
    assert!((0.0..=1.0).contains(&report.prob_above_target));
}

#[test]
fn test_single_price_history_fails() {
    let single = PriceSeries::new(vec![11.5]).unwrap();

    assert!(matches!(
        simulate(&single, &config(5, 10, ReturnModel::Bootstrap, 1)),
        Err(SimError::InsufficientData(_))
    ));
    let mut rng = StdRng::seed_from_u64(1);
    assert!(matches!(
        generate_returns(&[], ReturnModel::Normal, 5, 10, &mut rng),
        Err(SimError::EmptyReturns(_))
    ));
}

#[test]
fn test_zero_days_or_simulations_fail() {
    for (days, sims) in [(0, 10), (5, 0), (0, 0)] {
        assert!(matches!(
            simulate(&prices(), &config(days, sims, ReturnModel::Bootstrap, 1)),
            Err(SimError::InvalidParameter(_))
        ));
    }
}

#[test]
fn test_normal_model_keeps_non_positive_prices() {
    // A -150% daily return wipes the path below zero; nothing clamps it.
    let mut rng = StdRng::seed_from_u64(4);
    let matrix = generate_returns(&[-1.5, -1.5], ReturnModel::Normal, 2, 3, &mut rng).unwrap();
    let ensemble = build_paths(&matrix, 10.0);
    assert!(ensemble.final_prices().iter().all(|&p| (p - 2.5).abs() < 1e-9));
    assert!(ensemble.path(0).unwrap()[1] < 0.0);
}

#[test]
fn test_providers_feed_the_simulation() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, "Date,Close").expect("write header");
    for (i, p) in CLOSES.iter().enumerate() {
        writeln!(file, "2024-01-{:02},{}", i + 1, p).expect("write row");
    }

    let from_csv = CsvPriceSource::from_file(file.path())
        .closing_prices("AAPL", 1260)
        .unwrap();
    let from_memory = StaticPriceSource::new()
        .with_series("AAPL", CLOSES.to_vec())
        .closing_prices("AAPL", 1260)
        .unwrap();
    assert_eq!(from_csv, from_memory);

    let cfg = config(5, 10, ReturnModel::Bootstrap, 42);
    let report = simulate_report(&from_csv, &cfg, &Thresholds::new(10.0)).unwrap();
    assert_eq!(report.simulations, 10);
    assert!(report.ever_below.is_none());
}

#[test]
fn test_missing_data_is_distinct_from_empty_returns() {
    let source = StaticPriceSource::new();

    assert!(matches!(
        source.closing_prices("AAPL", 1260),
        Err(SimError::DataUnavailable(_))
    ));
}
