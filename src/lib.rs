#![warn(missing_docs)]
//! # qgpde: pseudo-spectral solver for the one-layer quasi-geostrophic equation
//!
//! Integrates the potential vorticity equation
//!
//! ```text
//! q_t = - (u + U) q_x - (q_y + Q_y) v
//! ```
//!
//! in a channel, periodic in x and wall-bounded in y. Spatial derivatives
//! are evaluated pseudo-spectrally; the channel boundary condition is
//! enforced by an odd (antisymmetric) mirror extension in y, so that both
//! directions transform with plain Fourier transforms over the doubled
//! domain. Time advancement is third-order Adams-Bashforth, bootstrapped
//! with one Euler and one AB2 step, with a spectral exponential filter
//! keeping the smallest resolved scales quiet.
//!
//! # Example
//! ```
//! use qgpde::{Config, Qg2D};
//!
//! let mut parms = Config::default();
//! parms.nx = 32;
//! parms.ny = 32;
//! parms.tf = 24. * 3600.;
//! let mut qg = Qg2D::new(&parms);
//! qg.set_perturbation(1e-8, 1., 1.);
//! qg.solve();
//! qg.print_drift();
//! ```
pub mod config;
pub mod flux;
pub mod functions;
pub mod grid;
pub mod integrate;
pub mod qg;
pub mod transform;

pub use config::Config;
pub use flux::{flux_qg, FluxResult};
pub use grid::Grid;
pub use integrate::{integrate, Integrate};
pub use qg::Qg2D;
pub use transform::ChannelFft;

/// Real type
pub type Real = f64;
