//! Tests for the brewing conversions through the public API.
//!
//! ## Test Organization
//!
//! 1. **Gravity / Plato** - Tabulated values and inversion
//! 2. **Alcohol** - ABV and ABW from gravity and Plato
//! 3. **Custom Calibration** - Conversions under a loaded calibration
//! 4. **Concurrency** - Shared standard calibration across threads

use approx::assert_abs_diff_eq;

use brew_core::{
    abv_by_sg_plato, abv_from_gravities, abw_by_sg_plato, plato_to_sg_20c20c,
    sg_20c20c_to_plato, Calibration, RootFindError,
};

// ============================================================================
// Gravity / Plato Tests
// ============================================================================

/// Plato -> SG must undo SG -> Plato across the calibration range.
#[test]
fn test_plato_sg_round_trip_over_calibration_range() {
    let mut sg = 0.990;
    while sg <= 1.150 + 1e-12 {
        let back = plato_to_sg_20c20c(sg_20c20c_to_plato(sg)).unwrap();
        assert_abs_diff_eq!(back, sg, epsilon = 1e-6);
        sg += 0.005;
    }
}

#[test]
fn test_plato_is_increasing_in_sg() {
    let readings: Vec<f64> = [1.000, 1.020, 1.040, 1.060, 1.080, 1.100]
        .iter()
        .map(|&sg| sg_20c20c_to_plato(sg))
        .collect();
    assert!(readings.windows(2).all(|w| w[1] > w[0]), "{readings:?}");
}

#[test]
fn test_common_reference_gravities() {
    assert_abs_diff_eq!(plato_to_sg_20c20c(10.0).unwrap(), 1.040, epsilon = 5e-4);
    assert_abs_diff_eq!(plato_to_sg_20c20c(0.0).unwrap(), 1.000, epsilon = 5e-4);
}

// ============================================================================
// Alcohol Tests
// ============================================================================

#[test]
fn test_abv_close_to_classic_formula() {
    let current_plato = sg_20c20c_to_plato(1.010);
    let abv = abv_by_sg_plato(1.050, current_plato).unwrap();
    assert_abs_diff_eq!(abv, (1.050 - 1.010) * 131.25, epsilon = 0.05);
}

#[test]
fn test_no_fermentation_means_no_alcohol() {
    let og = 1.048;
    let abv = abv_by_sg_plato(og, sg_20c20c_to_plato(og)).unwrap();
    let abw = abw_by_sg_plato(og, sg_20c20c_to_plato(og)).unwrap();
    assert_abs_diff_eq!(abv, 0.0, epsilon = 1e-4);
    assert_abs_diff_eq!(abw, 0.0, epsilon = 1e-4);
}

#[test]
fn test_abw_below_abv() {
    for &(og, fg) in &[(1.040, 1.008), (1.060, 1.012), (1.090, 1.020)] {
        let plato = sg_20c20c_to_plato(fg);
        let abv = abv_by_sg_plato(og, plato).unwrap();
        let abw = abw_by_sg_plato(og, plato).unwrap();
        assert!(abw > 0.0 && abw < abv, "og {og} fg {fg}: abv {abv} abw {abw}");
        assert_abs_diff_eq!(abv, abv_from_gravities(og, fg), epsilon = 1e-3);
    }
}

// ============================================================================
// Custom Calibration Tests
// ============================================================================

#[test]
fn test_linear_plato_calibration() {
    // P = 250 * (SG - 1)
    let cal = Calibration::from_json(
        r#"{"plato_from_sg": {"coefficients": [-250.0, 250.0], "order": 1}}"#,
    )
    .unwrap();
    assert_abs_diff_eq!(cal.sg_20c20c_to_plato(1.040), 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(cal.plato_to_sg_20c20c(10.0).unwrap(), 1.040, epsilon = 1e-9);
}

#[test]
fn test_flat_calibration_reports_root_failure() {
    let cal = Calibration::from_json(r#"{"plato_from_sg": {"coefficients": [3.0]}}"#).unwrap();
    let err = cal.plato_to_sg_20c20c(10.0).unwrap_err();
    assert!(matches!(err, RootFindError::FlatSecant { .. }));
    // The failure propagates through the alcohol conversions.
    assert!(cal.abv_by_sg_plato(1.050, 10.0).is_err());
    assert!(cal.abw_by_sg_plato(1.050, 10.0).is_err());
}

#[test]
fn test_sucrose_density_changes_sugar_estimate() {
    let standard = Calibration::standard().plato_from_sugar(1.0, 10.0);
    let heavy = Calibration::from_json(r#"{"sucrose_density_kg_l": 3.0}"#)
        .unwrap()
        .plato_from_sugar(1.0, 10.0);
    // Denser sugar displaces less water, so the wort is more dilute.
    assert!(heavy < standard);
}

// ============================================================================
// Concurrency Tests
// ============================================================================

#[test]
fn test_concurrent_callers_agree() {
    let expected = plato_to_sg_20c20c(12.0).unwrap();
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| plato_to_sg_20c20c(12.0).unwrap()))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
