//! # Model parameters
//! User-facing configuration of the channel model. All fields carry
//! defaults; derived quantities (grid, wavenumbers, spectral kernels)
//! live in [`crate::Grid`].
use crate::Real;

/// Parameters of the one-layer QG channel model.
///
/// The default configuration integrates a 128 x 128 grid over a
/// 1000 km x 1000 km channel for 20 days with an hourly timestep.
///
/// # Example
/// ```
/// use qgpde::Config;
/// let mut parms = Config::default();
/// parms.nx = 64;
/// parms.ny = 64;
/// parms.validate();
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of grid points in x (must be even)
    pub nx: usize,
    /// Number of grid points in y (must be even)
    pub ny: usize,
    /// Zonal domain size \[m\]
    pub lx: Real,
    /// Meridional domain size \[m\]
    pub ly: Real,
    /// (Reduced) gravity \[m/s^2\]
    pub g0: Real,
    /// Mean depth \[m\]
    pub h0: Real,
    /// Coriolis parameter \[1/s\]
    pub f0: Real,
    /// Gradient of the coriolis parameter \[1/(m s)\]
    pub beta: Real,
    /// Background zonal velocity U \[m/s\]
    pub u_bg: Real,
    /// Froude number F. Zero gives the barotropic model; see
    /// [`Config::physical_froude`] for the value implied by `g0`, `h0`, `f0`.
    pub froude: Real,
    /// Initial time \[s\]
    pub t0: Real,
    /// Timestep \[s\]
    pub dt: Real,
    /// Final time \[s\]
    pub tf: Real,
    /// Invoke the callback (status line + render hook) every npt-th timestep
    pub npt: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            nx: 128,
            ny: 128,
            lx: 1000e3,
            ly: 1000e3,
            g0: 9.81,
            h0: 1000.,
            f0: 1e-4,
            beta: 1e-11,
            u_bg: 0.,
            froude: 0.,
            t0: 0.,
            dt: 3600.,
            tf: 20. * 3600. * 24.,
            npt: 12,
        }
    }
}

impl Config {
    /// Froude number implied by the physical constants, F = f0^2 / (g0 h0).
    ///
    /// Not applied automatically; assign it to `froude` to activate the
    /// finite deformation radius.
    pub fn physical_froude(&self) -> Real {
        self.f0 * self.f0 / (self.g0 * self.h0)
    }

    /// Check the configuration before any integration work starts.
    ///
    /// # Panics
    /// Panics on non-positive resolution, domain size, timestep or
    /// integration window, and on odd grid sizes (the wavenumber layout
    /// assumes even nx and ny).
    pub fn validate(&self) {
        assert!(
            self.nx > 0 && self.ny > 0,
            "grid resolution must be positive, got {} x {}",
            self.nx,
            self.ny
        );
        assert!(
            self.nx % 2 == 0 && self.ny % 2 == 0,
            "grid resolution must be even, got {} x {}",
            self.nx,
            self.ny
        );
        assert!(
            self.lx > 0. && self.ly > 0.,
            "domain size must be positive, got {} x {}",
            self.lx,
            self.ly
        );
        assert!(self.dt > 0., "timestep must be positive, got {}", self.dt);
        assert!(
            self.tf > self.t0,
            "final time {} must exceed initial time {}",
            self.tf,
            self.t0
        );
        assert!(self.npt > 0, "callback stride npt must be positive");
    }
}
