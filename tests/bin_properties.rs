use los_eval::{bin_of, evaluate, BinAccuracy, EvalError, LosBin, MEDIUM_MAX_DAYS, SHORT_MAX_DAYS};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn bin_predicates_partition_the_boundaries() {
    for &(days, expected) in &[
        (0.0, LosBin::Short),
        (SHORT_MAX_DAYS, LosBin::Short),
        (7.0001, LosBin::Medium),
        (MEDIUM_MAX_DAYS, LosBin::Medium),
        (14.0001, LosBin::Long),
    ] {
        assert_eq!(bin_of(days), expected, "bin_of({days})");
    }
}

#[test]
fn three_record_scenario_end_to_end() {
    let ev = evaluate(&[3.0, 10.0, 20.0], &[4.0, 9.0, 13.0]).unwrap();
    let accuracies: Vec<BinAccuracy> = ev.bins.iter().map(|b| b.accuracy).collect();
    assert_eq!(
        accuracies,
        vec![
            BinAccuracy::Measured(1.0),
            BinAccuracy::Measured(1.0),
            BinAccuracy::Measured(0.0)
        ]
    );
    assert_eq!(ev.total_correct(), 2);
}

proptest! {
    #[test]
    fn identical_inputs_are_fully_accurate(ys in proptest::collection::vec(0.0f64..90.0, 1..100)) {
        let ev = evaluate(&ys, &ys).unwrap();
        prop_assert!((ev.categorical_accuracy - 1.0).abs() < 1e-12);
        for b in &ev.bins {
            if b.actual_count == 0 {
                prop_assert_eq!(b.accuracy, BinAccuracy::NoData);
            } else {
                prop_assert_eq!(b.accuracy, BinAccuracy::Measured(1.0));
            }
        }
    }

    #[test]
    fn length_mismatch_always_fails(n in 1usize..50, extra in 1usize..5) {
        let actual = vec![5.0; n + extra];
        let predicted = vec![5.0; n];
        prop_assert_eq!(
            evaluate(&actual, &predicted).unwrap_err(),
            EvalError::InputShape { actual: n + extra, predicted: n }
        );
    }

    #[test]
    fn short_only_holdout_has_no_long_data(ys in proptest::collection::vec(0.0f64..=7.0, 1..50)) {
        let ev = evaluate(&ys, &ys).unwrap();
        prop_assert!(ev.accuracy(LosBin::Long).is_no_data());
        prop_assert!(ev.accuracy(LosBin::Medium).is_no_data());
    }
}
