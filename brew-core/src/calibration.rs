//! # Calibration Module
//!
//! The empirical coefficient tables every conversion is evaluated against,
//! bundled into a [`Calibration`] value that can be saved to and loaded from
//! JSON. The built-in tables are the standard calibration; a caller with
//! better-fitting data for their own instruments can override any of them.
//!
//! ## Calibration ranges
//! - Specific gravity fits: roughly 0.98 to 1.35
//! - Temperature fits: roughly 0 to 40 °C
//!
//! Outside those ranges the polynomials still evaluate, but extrapolate.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::CalibrationError;
use crate::polynomial::Polynomial;

/// Cubic fit of Plato from specific gravity measured at 20 °C relative to
/// water at 20 °C.
///
/// `P = -616.868 + 1111.14(SG) - 630.272(SG)^2 + 135.997(SG)^3`
pub const PLATO_FROM_SG_20C20C: [f64; 4] = [-616.868, 1111.14, -630.272, 135.997];

/// Degree-5 fit of water density in kg/L as a function of °C.
pub const WATER_DENSITY_KG_L_BY_C: [f64; 6] = [
    0.9999776532,
    6.557692037e-5,
    -1.007534371e-5,
    1.372076106e-7,
    -1.414581892e-9,
    5.6890971e-12,
];

/// Cubic fit of the correction (in thousandths of SG) to apply to a
/// hydrometer calibrated at 15 °C, as a function of sample °C.
pub const HYDROMETER_15C_CORRECTION: [f64; 4] = [-0.911045, -16.2853e-3, 5.84346e-3, -15.3226e-6];

/// Density of sucrose in kg/L.
pub const SUCROSE_DENSITY_KG_L: f64 = 1.587;

/// The standard calibration, built once on first use and shared by the
/// free conversion functions.
static STANDARD: Lazy<Calibration> = Lazy::new(Calibration::default);

/// A complete set of fit coefficients and physical constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// Plato as a function of SG (20 °C / 20 °C).
    pub plato_from_sg: Polynomial,
    /// Water density in kg/L as a function of °C.
    pub water_density: Polynomial,
    /// 15 °C hydrometer correction, in thousandths of SG, as a function of °C.
    pub hydrometer_correction: Polynomial,
    pub sucrose_density_kg_l: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            plato_from_sg: Polynomial::from_table(&PLATO_FROM_SG_20C20C),
            water_density: Polynomial::from_table(&WATER_DENSITY_KG_L_BY_C),
            hydrometer_correction: Polynomial::from_table(&HYDROMETER_15C_CORRECTION),
            sucrose_density_kg_l: SUCROSE_DENSITY_KG_L,
        }
    }
}

impl Calibration {
    /// The shared standard calibration.
    pub fn standard() -> &'static Calibration {
        &STANDARD
    }

    /// Parses a calibration from JSON.
    ///
    /// Fields left out of the document keep their standard values, so a file
    /// containing only `{"sucrose_density_kg_l": 1.59}` is valid.
    ///
    /// # Returns
    /// * `Ok(calibration)` - Every polynomial and constant passed validation
    /// * `Err(CalibrationError)` - Malformed JSON, bad polynomial, or bad constant
    pub fn from_json(json: &str) -> Result<Self, CalibrationError> {
        let calibration: Calibration = serde_json::from_str(json)?;
        calibration.validate()?;
        Ok(calibration)
    }

    /// Serializes the calibration as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, CalibrationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), CalibrationError> {
        let density = self.sucrose_density_kg_l;
        if !(density.is_finite() && density > 0.0) {
            return Err(CalibrationError::InvalidConstant {
                name: "sucrose_density_kg_l",
                value: density,
            });
        }
        Ok(())
    }
}
