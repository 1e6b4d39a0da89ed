//! Worked four-step example: S0 = K = 100, u = 1.0604, d = 0.9431,
//! r = 10 %, T = 4 months.
//!
//! These integration tests exercise the façade end to end, from parsing the
//! option tags through to the root value.

use approx::assert_abs_diff_eq;
use crr::{
    price_lattice, put_call_parity_gap, ArbitragePolicy, Error, ExerciseStyle, LatticeParameters,
    LatticePricer, LatticeSettings, OptionType, PricedLattice,
};

fn textbook(option_type: &str, style: &str) -> crr::Result<LatticeParameters> {
    LatticeParameters::builder()
        .option_type(option_type.parse()?)
        .exercise_style(style.parse()?)
        .strike(100.0)
        .initial_price(100.0)
        .factors(1.0604, 0.9431)
        .risk_free_rate(0.1)
        .time_to_maturity(1.0 / 3.0)
        .step_count(4)
        .build()
}

fn priced(option_type: &str, style: &str) -> PricedLattice {
    price_lattice(&textbook(option_type, style).unwrap()).unwrap()
}

// ─── Reference values ─────────────────────────────────────────────────────────

#[test]
fn european_call_matches_worked_example() {
    let lattice = priced("call", "european");

    let expected = [126.4384, 112.4519, 100.0126, 88.9494, 79.1099];
    let terminal = lattice.underlying_price().level(4);
    assert_eq!(terminal.len(), expected.len());
    for (s, e) in terminal.iter().zip(expected) {
        assert_abs_diff_eq!(*s, e, epsilon = 1e-4);
    }

    assert_abs_diff_eq!(lattice.price(), 6.1369, epsilon = 1e-4);
    assert_eq!(lattice.price(), lattice.value()[(0, 0)]);
}

#[test]
fn terminal_payoffs_of_worked_example() {
    let lattice = priced("call", "european");
    let payoff = lattice.payoff().level(4);
    assert_abs_diff_eq!(payoff[0], 26.4384, epsilon = 1e-4);
    assert_abs_diff_eq!(payoff[2], 0.0126, epsilon = 1e-4);
    assert_eq!(payoff[3], 0.0);
    assert_eq!(payoff[4], 0.0);
}

#[test]
fn american_put_is_worth_more_than_european_put() {
    let european = priced("put", "european");
    let american = priced("put", "american");
    assert_abs_diff_eq!(european.price(), 2.8585, epsilon = 1e-4);
    assert_abs_diff_eq!(american.price(), 3.3534, epsilon = 1e-4);
    assert_eq!(american.early_exercise_nodes(), vec![(2, 2), (3, 2), (3, 3)]);
}

#[test]
fn worked_example_satisfies_put_call_parity() {
    let call = priced("call", "european");
    let put = priced("put", "european");
    let gap = put_call_parity_gap(&call, &put).unwrap();
    assert_abs_diff_eq!(gap, 0.0, epsilon = 1e-12);

    let df = (-0.1_f64 / 12.0).exp();
    assert_abs_diff_eq!(
        call.price() - put.price(),
        100.0 - 100.0 * df.powi(4),
        epsilon = 1e-12
    );
}

#[test]
fn lattice_renders_level_by_level() {
    let lattice = priced("call", "european");
    let text = format!("{:.4}", lattice.underlying_price());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].ends_with("100.0000"));
    assert!(lines[4].starts_with("4:"));
    assert!(lines[4].contains("126.4384"));
    assert!(lines[4].ends_with("79.1099"));
}

// ─── Parsing boundary ─────────────────────────────────────────────────────────

#[test]
fn unknown_option_type_is_rejected() {
    assert_eq!(
        textbook("straddle", "european").unwrap_err(),
        Error::InvalidOptionType("straddle".to_string())
    );
}

#[test]
fn unknown_exercise_style_is_rejected() {
    assert_eq!(
        textbook("call", "bermudan").unwrap_err(),
        Error::InvalidOptionSpecies("bermudan".to_string())
    );
}

#[test]
fn tags_are_case_insensitive() {
    let a = textbook("CALL", "European").unwrap();
    let b = textbook("c", "e").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.option_type(), OptionType::Call);
    assert_eq!(a.exercise_style(), ExerciseStyle::European);
}

// ─── Degenerate inputs ────────────────────────────────────────────────────────

#[test]
fn single_step_tree_has_no_early_exercise() {
    // at the money the root payoff is zero, so only maturity can matter
    for option_type in [OptionType::Call, OptionType::Put] {
        let params = LatticeParameters::builder()
            .option_type(option_type)
            .strike(100.0)
            .initial_price(100.0)
            .factors(1.0604, 0.9431)
            .risk_free_rate(0.1)
            .time_to_maturity(1.0 / 12.0)
            .step_count(1)
            .build()
            .unwrap();
        let european = price_lattice(&params).unwrap();
        let american = price_lattice(&params.with_exercise_style(ExerciseStyle::American)).unwrap();
        assert_eq!(european.levels(), 2);
        assert_abs_diff_eq!(american.price(), european.price(), epsilon = 1e-15);
        assert!(american.early_exercise_nodes().is_empty());
    }
}

#[test]
fn arbitrage_policy_decides_out_of_range_probability() {
    let params = LatticeParameters::builder()
        .strike(100.0)
        .initial_price(100.0)
        .factors(1.001, 0.999)
        .risk_free_rate(0.5)
        .time_to_maturity(1.0)
        .step_count(4)
        .build()
        .unwrap();

    assert!(matches!(
        price_lattice(&params),
        Err(Error::Arbitrage { .. })
    ));

    let lenient = LatticePricer::with_settings(
        LatticeSettings::default().with_arbitrage_policy(ArbitragePolicy::Allow),
    );
    let lattice = lenient.price(&params).unwrap();
    assert!(lattice.probability() > 1.0);
}

#[test]
fn zero_steps_are_rejected() {
    let err = LatticeParameters::builder()
        .strike(100.0)
        .initial_price(100.0)
        .factors(1.0604, 0.9431)
        .time_to_maturity(1.0)
        .step_count(0)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));
}
