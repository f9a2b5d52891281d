//! Unit tests for moving averages and cross detection

use wickping::indicators::{CrossPair, MaCondition, MaType, MovingAverageReadings};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_sma_value() {
    let closes = [1.0, 2.0, 3.0, 4.0];
    assert!(approx(MaType::Sma.value_at(&closes, 4, 2).unwrap(), 3.5));
    assert!(approx(MaType::Sma.value_at(&closes, 3, 3).unwrap(), 2.0));
}

#[test]
fn test_ema_seeded_with_sma() {
    let closes = [1.0, 2.0, 3.0, 4.0];
    // alpha = 2/3, seed 1.5 -> 2.5 -> 3.5
    assert!(approx(MaType::Ema.value_at(&closes, 4, 2).unwrap(), 3.5));
    assert!(approx(MaType::Ema.value_at(&closes, 2, 2).unwrap(), 1.5));
}

#[test]
fn test_wma_linear_weights() {
    let closes = [1.0, 2.0, 3.0];
    assert!(approx(MaType::Wma.value_at(&closes, 3, 3).unwrap(), 14.0 / 6.0));
}

#[test]
fn test_value_at_out_of_range() {
    let closes = [1.0, 2.0, 3.0];
    assert!(MaType::Sma.value_at(&closes, 3, 0).is_none());
    assert!(MaType::Sma.value_at(&closes, 2, 3).is_none());
    assert!(MaType::Ema.value_at(&closes, 4, 2).is_none());
}

#[test]
fn test_ma_type_parse() {
    assert_eq!(MaType::parse("ema"), Some(MaType::Ema));
    assert_eq!(MaType::parse("WMA"), Some(MaType::Wma));
    assert_eq!(MaType::parse(" sma "), Some(MaType::Sma));
    assert_eq!(MaType::parse("hull"), None);
    assert_eq!(MaType::default(), MaType::Sma);
}

#[test]
fn test_price_cross_above() {
    let ma = CrossPair::new(100.0, 100.0);
    assert!(CrossPair::new(105.0, 99.0).crossed_above(&ma));
    assert!(CrossPair::new(105.0, 100.0).crossed_above(&ma));
    assert!(!CrossPair::new(105.0, 101.0).crossed_above(&ma));
    assert!(!CrossPair::new(100.0, 95.0).crossed_above(&ma));
}

#[test]
fn test_price_cross_below() {
    let ma = CrossPair::new(100.0, 100.0);
    assert!(CrossPair::new(95.0, 101.0).crossed_below(&ma));
    assert!(CrossPair::new(95.0, 100.0).crossed_below(&ma));
    assert!(!CrossPair::new(95.0, 99.0).crossed_below(&ma));
}

#[test]
fn test_moving_average_pair_needs_period_plus_one() {
    assert!(CrossPair::moving_average(MaType::Sma, &[1.0, 2.0], 2).is_none());
    let pair = CrossPair::moving_average(MaType::Sma, &[1.0, 2.0, 3.0], 2).unwrap();
    assert!(approx(pair.current, 2.5));
    assert!(approx(pair.previous, 1.5));
    assert!(CrossPair::last_two(&[1.0]).is_none());
}

#[test]
fn test_condition_parse_aliases() {
    assert_eq!(MaCondition::parse("price_above_ma"), MaCondition::PriceAboveMa);
    assert_eq!(MaCondition::parse("priceAboveMA"), MaCondition::PriceAboveMa);
    assert_eq!(MaCondition::parse("price_below_ma"), MaCondition::PriceBelowMa);
    assert_eq!(MaCondition::parse("ma_fast_above_slow"), MaCondition::MaFastAboveSlow);
    assert_eq!(MaCondition::parse("fastMAAboveSlowMA"), MaCondition::MaFastAboveSlow);
    assert_eq!(MaCondition::parse("fastMABelowSlowMA"), MaCondition::MaFastBelowSlow);
    assert_eq!(
        MaCondition::parse("golden_cross"),
        MaCondition::Unsupported("golden_cross".to_string())
    );
}

#[test]
fn test_price_conditions_on_readings() {
    let up = MovingAverageReadings::compute(&[100.0, 105.0, 95.0, 105.0], MaType::Sma, 2, 9, 21)
        .unwrap();
    assert!(MaCondition::PriceAboveMa.is_met(&up));
    assert!(!MaCondition::PriceBelowMa.is_met(&up));
    assert!(up.fast_ma.is_none());
    assert!(!MaCondition::MaFastAboveSlow.is_met(&up));

    let already_above =
        MovingAverageReadings::compute(&[100.0, 99.0, 101.0, 105.0], MaType::Sma, 2, 9, 21)
            .unwrap();
    assert!(!MaCondition::PriceAboveMa.is_met(&already_above));
}

#[test]
fn test_fast_slow_cross() {
    let closes = [100.0, 100.0, 100.0, 90.0, 120.0];
    let readings = MovingAverageReadings::compute(&closes, MaType::Sma, 2, 2, 3).unwrap();
    assert!(MaCondition::MaFastAboveSlow.is_met(&readings));
    assert!(!MaCondition::MaFastBelowSlow.is_met(&readings));

    let falling = [100.0, 100.0, 100.0, 110.0, 80.0];
    let readings = MovingAverageReadings::compute(&falling, MaType::Sma, 2, 2, 3).unwrap();
    assert!(MaCondition::MaFastBelowSlow.is_met(&readings));
}

#[test]
fn test_unsupported_condition_is_never_met() {
    let readings =
        MovingAverageReadings::compute(&[100.0, 105.0, 95.0, 105.0], MaType::Sma, 2, 2, 3)
            .unwrap();
    assert!(!MaCondition::Unsupported(String::new()).is_met(&readings));
}

#[test]
fn test_huge_window_yields_nothing() {
    let closes = [1.0, 2.0, 3.0];
    assert!(CrossPair::moving_average(MaType::Sma, &closes, usize::MAX).is_none());
    assert!(CrossPair::moving_average(MaType::Wma, &closes, usize::MAX - 1).is_none());
    assert!(MaType::Wma.value_at(&closes, 3, usize::MAX).is_none());
}
