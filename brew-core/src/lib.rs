// brew-core/src/lib.rs

//! The numeric core of the brewing calculator.
//! This crate is responsible for polynomial evaluation, root finding,
//! and the empirical brewing conversions built on top of them
//! (specific gravity, Plato, alcohol content, refractive index and
//! temperature corrections). It is completely headless and performs
//! no I/O.
//!
//! Every conversion is available as a free function using the standard
//! calibration. Those that depend on fitted coefficients (gravity, Plato,
//! water density, hydrometer correction, sugar and alcohol) are also methods
//! on [`Calibration`] for callers that load their own coefficients.

pub mod calibration;
pub mod conversions;
pub mod error;
pub mod polynomial;

pub use calibration::Calibration;
pub use conversions::{
    abv_by_sg_plato, abv_from_gravities, abw_by_sg_plato, apparent_attenuation,
    corrected_hydrometer_reading, hydrometer_15c_correction, plato_from_sugar,
    plato_to_sg_20c20c, real_extract, refractive_index, sg_20c20c_to_plato,
    sg_by_starting_plato, water_density_kg_l,
};
pub use error::{BrewError, BrewResult, CalibrationError, PolynomialError, RootFindError};
pub use polynomial::{int_pow, poly_eval, root_find, Polynomial, ROOT_PRECISION};
