//! # Brewing Conversions
//!
//! Empirical conversions between the measurements a brewer takes:
//! specific gravity, degrees Plato, alcohol content, refractive index and
//! temperature-dependent water density and hydrometer corrections.
//!
//! ## Conventions
//! - Specific gravity is dimensionless, water = 1.000, measured at 20 °C / 20 °C
//! - Plato is mass-percent sucrose equivalent
//! - Temperatures are °C, densities kg/L, volumes L, masses kg
//!
//! None of these functions validate their inputs. Out-of-range values
//! extrapolate the fitted polynomials and lose accuracy silently.
//!
//! Only the conversions that invert the Plato fit can fail; they return
//! `Result<f64, RootFindError>`. Everything else is total.

use crate::calibration::Calibration;
use crate::error::RootFindError;

/// Density of ethanol in kg/L, used to turn volume fractions into mass fractions.
pub const ETHANOL_DENSITY_KG_L: f64 = 0.79336;

/// ABV percentage points per unit of gravity drop.
pub const ABV_PER_GRAVITY_POINT: f64 = 131.25;

/// Temperature at which the gravity and Plato fits are referenced.
pub const REFERENCE_CELSIUS: f64 = 20.0;

// Secant seeds bracketing ordinary wort and beer gravities.
const SG_SEED_LOW: f64 = 1.000;
const SG_SEED_HIGH: f64 = 1.050;

impl Calibration {
    /// Plato from specific gravity (20 °C / 20 °C).
    pub fn sg_20c20c_to_plato(&self, sg: f64) -> f64 {
        self.plato_from_sg.eval(sg)
    }

    /// Specific gravity (20 °C / 20 °C) from Plato, by inverting the cubic
    /// Plato fit with the secant method.
    pub fn plato_to_sg_20c20c(&self, plato: f64) -> Result<f64, RootFindError> {
        self.plato_from_sg
            .shifted(-plato)
            .root(SG_SEED_LOW, SG_SEED_HIGH)
    }

    /// Density of water in kg/L at the given temperature.
    pub fn water_density_kg_l(&self, celsius: f64) -> f64 {
        self.water_density.eval(celsius)
    }

    /// SG correction to add to the reading of a hydrometer calibrated at 15 °C
    /// when the sample is at `celsius`.
    pub fn hydrometer_15c_correction(&self, celsius: f64) -> f64 {
        self.hydrometer_correction.eval(celsius) * 1e-3
    }

    /// A 15 °C hydrometer reading corrected for the sample temperature.
    pub fn corrected_hydrometer_reading(&self, reading_sg: f64, sample_celsius: f64) -> f64 {
        reading_sg + self.hydrometer_15c_correction(sample_celsius)
    }

    /// Estimates Plato from a mass of dissolved sucrose and the total wort volume.
    ///
    /// Assumes the sucrose and water volumes add up to the wort volume, with
    /// the water at the reference temperature:
    /// `water_kg = (wort_l - sugar_kg / sucrose_density) * water_density`
    /// and `plato = 100 * sugar_kg / (sugar_kg + water_kg)`.
    ///
    /// # Arguments
    /// * `sugar_kg` - Mass of dissolved sucrose (or extract equivalent)
    /// * `wort_l` - Total wort volume
    pub fn plato_from_sugar(&self, sugar_kg: f64, wort_l: f64) -> f64 {
        let water_l = wort_l - sugar_kg / self.sucrose_density_kg_l;
        let water_kg = water_l * self.water_density_kg_l(REFERENCE_CELSIUS);
        100.0 * sugar_kg / (sugar_kg + water_kg)
    }

    /// ABV from the original gravity and the current Plato reading.
    ///
    /// The current Plato is converted back to a final gravity, then the
    /// gravity drop is scaled with [`abv_from_gravities`].
    pub fn abv_by_sg_plato(&self, og: f64, plato: f64) -> Result<f64, RootFindError> {
        let fg = self.plato_to_sg_20c20c(plato)?;
        Ok(abv_from_gravities(og, fg))
    }

    /// ABW from the original gravity and the current Plato reading.
    ///
    /// `ABW = ABV * ethanol_density / FG`: the ethanol volume fraction times
    /// its density gives the ethanol mass per litre, and dividing by the beer
    /// density gives the mass fraction.
    pub fn abw_by_sg_plato(&self, og: f64, plato: f64) -> Result<f64, RootFindError> {
        let fg = self.plato_to_sg_20c20c(plato)?;
        Ok(abv_from_gravities(og, fg) * ETHANOL_DENSITY_KG_L / fg)
    }
}

/// ABV percentage from original and final gravity: `(OG - FG) * 131.25`.
pub fn abv_from_gravities(og: f64, fg: f64) -> f64 {
    (og - fg) * ABV_PER_GRAVITY_POINT
}

/// Apparent attenuation in percent: the share of the original gravity
/// points that fermentation has removed.
pub fn apparent_attenuation(og: f64, fg: f64) -> f64 {
    (og - fg) / (og - 1.0) * 100.0
}

/// Specific gravity of a fermenting sample from refractometer readings.
///
/// Dissolved alcohol bends light more than sugar does, so the current
/// reading alone overstates the remaining extract. This cubic (Terrill)
/// uses the starting reading to account for how much alcohol has formed.
///
/// # Arguments
/// * `starting_plato` - Refractometer reading of the unfermented wort
/// * `current_plato` - Refractometer reading of the sample now
pub fn sg_by_starting_plato(starting_plato: f64, current_plato: f64) -> f64 {
    let sp = starting_plato;
    let cp = current_plato;
    1.001843 - 0.002318474 * sp - 0.000007775 * sp * sp - 0.000000034 * sp * sp * sp
        + 0.00574 * cp
        + 0.00003344 * cp * cp
        + 0.000000086 * cp * cp * cp
}

/// Refractive index of a solution with the given Plato.
pub fn refractive_index(plato: f64) -> f64 {
    1.33302 + 0.001427193 * plato + 0.000005791157 * plato * plato
}

/// Real extract (°P) from the current gravity and the apparent Plato reading,
/// removing the distortion dissolved alcohol adds to the apparent reading.
pub fn real_extract(sg: f64, plato: f64) -> f64 {
    let ri = refractive_index(plato);
    194.5935 + 129.8 * sg + ri * (410.8815 * ri - 790.8732)
}

/// Plato from specific gravity, standard calibration. See [`Calibration::sg_20c20c_to_plato`].
pub fn sg_20c20c_to_plato(sg: f64) -> f64 {
    Calibration::standard().sg_20c20c_to_plato(sg)
}

/// Specific gravity from Plato, standard calibration. See [`Calibration::plato_to_sg_20c20c`].
pub fn plato_to_sg_20c20c(plato: f64) -> Result<f64, RootFindError> {
    Calibration::standard().plato_to_sg_20c20c(plato)
}

pub fn water_density_kg_l(celsius: f64) -> f64 {
    Calibration::standard().water_density_kg_l(celsius)
}

pub fn hydrometer_15c_correction(celsius: f64) -> f64 {
    Calibration::standard().hydrometer_15c_correction(celsius)
}

pub fn corrected_hydrometer_reading(reading_sg: f64, sample_celsius: f64) -> f64 {
    Calibration::standard().corrected_hydrometer_reading(reading_sg, sample_celsius)
}

pub fn plato_from_sugar(sugar_kg: f64, wort_l: f64) -> f64 {
    Calibration::standard().plato_from_sugar(sugar_kg, wort_l)
}

pub fn abv_by_sg_plato(og: f64, plato: f64) -> Result<f64, RootFindError> {
    Calibration::standard().abv_by_sg_plato(og, plato)
}

pub fn abw_by_sg_plato(og: f64, plato: f64) -> Result<f64, RootFindError> {
    Calibration::standard().abw_by_sg_plato(og, plato)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_tabulated_plato() {
        assert_abs_diff_eq!(sg_20c20c_to_plato(1.040), 9.99, epsilon = 0.05);
        assert_abs_diff_eq!(sg_20c20c_to_plato(1.000), 0.0, epsilon = 0.05);
    }

    #[test]
    fn test_water_density_reference_points() {
        assert_abs_diff_eq!(water_density_kg_l(20.0), 0.998, epsilon = 1e-3);
        assert_abs_diff_eq!(water_density_kg_l(4.0), 1.000, epsilon = 1e-3);
    }

    #[test]
    fn test_hydrometer_correction_sign() {
        // Warmer samples read light, colder samples read heavy.
        assert!(hydrometer_15c_correction(25.0) > 0.0);
        assert!(hydrometer_15c_correction(5.0) < 0.0);
        assert_abs_diff_eq!(corrected_hydrometer_reading(1.050, 15.0), 1.050, epsilon = 2e-4);
    }

    #[test]
    fn test_plato_from_sugar() {
        // 1 kg of sucrose made up to 10 L is a little under 10 °P.
        let plato = plato_from_sugar(1.0, 10.0);
        assert_abs_diff_eq!(plato, 9.6595, epsilon = 1e-3);
        assert_eq!(plato_from_sugar(0.0, 10.0), 0.0);
    }

    #[test]
    fn test_abv_matches_gravity_formula() {
        let plato_fg = sg_20c20c_to_plato(1.010);
        let abv = abv_by_sg_plato(1.050, plato_fg).unwrap();
        assert_abs_diff_eq!(abv, abv_from_gravities(1.050, 1.010), epsilon = 0.01);
        assert_abs_diff_eq!(abv, 5.25, epsilon = 0.01);
    }

    #[test]
    fn test_abw_is_lighter_than_abv() {
        let plato_fg = sg_20c20c_to_plato(1.010);
        let abv = abv_by_sg_plato(1.050, plato_fg).unwrap();
        let abw = abw_by_sg_plato(1.050, plato_fg).unwrap();
        assert!(abw < abv);
        assert_abs_diff_eq!(abw, abv * ETHANOL_DENSITY_KG_L / 1.010, epsilon = 1e-4);
    }

    #[test]
    fn test_refractive_index_of_water() {
        assert_eq!(refractive_index(0.0), 1.33302);
        assert!(refractive_index(12.0) > refractive_index(6.0));
    }

    #[test]
    fn test_real_extract() {
        assert_abs_diff_eq!(real_extract(1.0, 0.0), 0.0, epsilon = 0.3);
        // Real extract of a finished beer sits above its gravity-derived Plato.
        let re = real_extract(1.012, 6.0);
        assert!(re > sg_20c20c_to_plato(1.012), "got {re}");
    }

    #[test]
    fn test_sg_by_starting_plato() {
        // Unfermented wort: both readings equal, SG close to the Plato fit.
        let sg = sg_by_starting_plato(12.0, 12.0);
        assert_abs_diff_eq!(sg, plato_to_sg_20c20c(12.0).unwrap(), epsilon = 0.003);
        // Fermentation drops the gravity.
        assert!(sg_by_starting_plato(12.0, 6.0) < sg);
    }

    #[test]
    fn test_plato_to_sg_nan_is_non_finite() {
        assert_eq!(
            plato_to_sg_20c20c(f64::NAN),
            Err(RootFindError::NonFinite { iterations: 0 })
        );
    }

    #[test]
    fn test_attenuation() {
        assert_abs_diff_eq!(apparent_attenuation(1.050, 1.010), 80.0, epsilon = 1e-9);
    }
}
