//! # Grid, wavenumbers and spectral kernels
//!
//! Everything here is a pure function of [`crate::Config`], computed once.
//! Physical fields live on the (ny, nx) grid; all spectral arrays live on
//! the mirror-doubled (2*ny, nx) domain, where the odd extension of a
//! channel field is periodic over 2*ly.
use crate::{Config, Real};
use ndarray::{Array1, Array2};
use num_complex::Complex;
use std::f64::consts::PI;

/// Filter cutoff, as fraction of the largest zonal wavenumber
const FILTER_CUTOFF: Real = 0.4;
/// Filter roll-off scale, as fraction of the largest zonal wavenumber
const FILTER_ROLLOFF: Real = 0.5;

/// Derived grid of the channel model.
///
/// Wavenumbers in x follow the standard periodic FFT ordering
/// (ascending non-negative, then descending negative). Wavenumbers in y
/// are built for the doubled channel, so that derivatives act on the
/// antisymmetric extension of the physical field.
pub struct Grid {
    /// Number of grid points in x
    pub nx: usize,
    /// Number of grid points in y
    pub ny: usize,
    /// Zonal domain size
    pub lx: Real,
    /// Meridional domain size
    pub ly: Real,
    /// Zonal grid spacing
    pub dx: Real,
    /// Meridional grid spacing
    pub dy: Real,
    /// Cell-centred zonal coordinates, length nx
    pub x: Array1<Real>,
    /// Cell-centred meridional coordinates, length ny
    pub y: Array1<Real>,
    /// Zonal coordinate mesh (ny, nx)
    pub xx: Array2<Real>,
    /// Meridional coordinate mesh (ny, nx)
    pub yy: Array2<Real>,
    /// i*kx on the doubled domain (2*ny, nx)
    pub ik_x: Array2<Complex<Real>>,
    /// i*ky on the doubled domain (2*ny, nx)
    pub ik_y: Array2<Complex<Real>>,
    /// PV inversion kernel, psi_hat = k2fi * q_hat
    pub k2fi: Array2<Real>,
    /// Exponential low-pass filter kernel
    pub sfilt: Array2<Real>,
    /// Background zonal velocity U
    pub u_bg: Real,
    /// Froude number F
    pub froude: Real,
    /// Background PV gradient, Q_y = F*U + beta
    pub q_y: Real,
    /// Timestep
    pub dt: Real,
    /// Final time
    pub tf: Real,
    /// Callback stride in timesteps
    pub npt: usize,
}

impl Grid {
    /// Derive the grid from a configuration.
    ///
    /// # Panics
    /// Panics when the configuration is malformed, see [`Config::validate`].
    pub fn new(parms: &Config) -> Self {
        parms.validate();
        let (nx, ny) = (parms.nx, parms.ny);
        let (lx, ly) = (parms.lx, parms.ly);
        let dx = lx / nx as Real;
        let dy = ly / ny as Real;

        // cell-centred coordinates, walls at y = -ly/2 and y = ly/2
        let x = Array1::from_shape_fn(nx, |i| -0.5 * lx + dx * (i as Real + 0.5));
        let y = Array1::from_shape_fn(ny, |j| -0.5 * ly + dy * (j as Real + 0.5));
        let xx = Array2::from_shape_fn((ny, nx), |(_, i)| x[i]);
        let yy = Array2::from_shape_fn((ny, nx), |(j, _)| y[j]);

        // wavenumbers: x is periodic over lx, y over the doubled channel 2*ly
        let mut kx = Array1::<Real>::zeros(nx);
        for (i, k) in kx.iter_mut().enumerate() {
            let m = if i <= nx / 2 {
                i as isize
            } else {
                i as isize - nx as isize
            };
            *k = 2. * PI / lx * m as Real;
        }
        let mut ky = Array1::<Real>::zeros(2 * ny);
        for (j, k) in ky.iter_mut().enumerate() {
            let m = if j <= ny {
                j as isize
            } else {
                j as isize - 2 * ny as isize
            };
            *k = PI / ly * m as Real;
        }
        let kxx = Array2::from_shape_fn((2 * ny, nx), |(_, i)| kx[i]);
        let kyy = Array2::from_shape_fn((2 * ny, nx), |(j, _)| ky[j]);

        // inversion kernel: q_hat = -(K2 + F) psi_hat
        let froude = parms.froude;
        let mut k2fi =
            Array2::from_shape_fn((2 * ny, nx), |(j, i)| {
                -1. / (kxx[[j, i]] * kxx[[j, i]] + kyy[[j, i]] * kyy[[j, i]] + froude)
            });
        // zero mode: remove the inversion singularity
        k2fi[[0, 0]] = if froude == 0. { 0. } else { -1. / froude };

        // exponential filter, damps the highest third of resolved wavenumbers
        let kmax = kx.iter().cloned().fold(Real::MIN, Real::max);
        let ks = FILTER_CUTOFF * kmax;
        let km = FILTER_ROLLOFF * kmax;
        let beta = 1.88 / (km / ks).ln();
        let alpha = 0.69 * ks.powf(-beta);
        let sfilt = Array2::from_shape_fn((2 * ny, nx), |(j, i)| {
            let k2 = kxx[[j, i]] * kxx[[j, i]] + kyy[[j, i]] * kyy[[j, i]];
            (-alpha * k2.powf(beta / 2.)).exp()
        });

        let ik_x = kxx.mapv(|k| Complex::new(0., k));
        let ik_y = kyy.mapv(|k| Complex::new(0., k));

        Grid {
            nx,
            ny,
            lx,
            ly,
            dx,
            dy,
            x,
            y,
            xx,
            yy,
            ik_x,
            ik_y,
            k2fi,
            sfilt,
            u_bg: parms.u_bg,
            froude,
            q_y: froude * parms.u_bg + parms.beta,
            dt: parms.dt,
            tf: parms.tf,
            npt: parms.npt,
        }
    }

    /// Shape of the mirror-doubled domain, (2*ny, nx)
    pub fn shape_extended(&self) -> (usize, usize) {
        (2 * self.ny, self.nx)
    }

    /// Shape of the physical domain, (ny, nx)
    pub fn shape_physical(&self) -> (usize, usize) {
        (self.ny, self.nx)
    }
}
