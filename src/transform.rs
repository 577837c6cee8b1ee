//! # Fourier transforms on the mirror-doubled channel
//!
//! The channel is periodic in x and wall-bounded in y. A physical field
//! is extended antisymmetrically in y before transforming, so the walls
//! coincide with nodes of the extension and both directions reduce to
//! plain FFTs over the (2*ny, nx) domain. Keeping the stack/flip/restrict
//! sequence behind this wrapper keeps the boundary condition logic in one
//! place.
use crate::Real;
use ndarray::{s, Array2};
use ndrustfft::{ndfft_par, ndifft_par, FftHandler};
use num_complex::Complex;

/// Forward/inverse 2d transforms over the extended domain, plus the
/// antisymmetric extension and its restriction.
///
/// # Example
/// ```
/// use ndarray::Array2;
/// use qgpde::ChannelFft;
/// let mut fft = ChannelFft::new(8, 4);
/// let q = Array2::from_shape_fn((4, 8), |(j, i)| (i + j) as f64);
/// let qe = fft.extend(&q);
/// let qe_hat = fft.forward(&qe);
/// let back_e = fft.inverse(&qe_hat);
/// let back = fft.restrict(&back_e);
/// for (a, b) in q.iter().zip(back.iter()) {
///     assert!((a - b).abs() < 1e-12);
/// }
/// ```
pub struct ChannelFft {
    /// Number of grid points in x
    pub nx: usize,
    /// Number of grid points in y (physical, non-mirrored)
    pub ny: usize,
    fft_x: FftHandler<Real>,
    fft_y: FftHandler<Real>,
}

impl ChannelFft {
    /// Plan transforms for a (ny, nx) physical grid.
    pub fn new(nx: usize, ny: usize) -> Self {
        ChannelFft {
            nx,
            ny,
            fft_x: FftHandler::new(nx),
            fft_y: FftHandler::new(2 * ny),
        }
    }

    /// Odd extension of a physical field: stack it over its negated,
    /// vertically flipped copy; (ny, nx) -> (2*ny, nx).
    ///
    /// # Panics
    /// Panics when the field shape does not match the grid.
    pub fn extend(&self, v: &Array2<Real>) -> Array2<Real> {
        assert!(
            v.dim() == (self.ny, self.nx),
            "shape mismatch in extend, got {:?} expected {:?}",
            v.dim(),
            (self.ny, self.nx)
        );
        let mut ve = Array2::zeros((2 * self.ny, self.nx));
        ve.slice_mut(s![..self.ny, ..]).assign(v);
        ve.slice_mut(s![self.ny.., ..])
            .assign(&v.slice(s![..;-1, ..]).mapv(|x| -x));
        ve
    }

    /// Top (ny, nx) block of an extended field, back on the physical domain.
    pub fn restrict(&self, ve: &Array2<Real>) -> Array2<Real> {
        ve.slice(s![..self.ny, ..]).to_owned()
    }

    /// 2d discrete Fourier transform of the extended field.
    pub fn forward(&mut self, ve: &Array2<Real>) -> Array2<Complex<Real>> {
        let mut buf = ve.mapv(|v| Complex::new(v, 0.));
        let mut vhat = Array2::<Complex<Real>>::zeros((2 * self.ny, self.nx));
        ndfft_par(&mut buf.view_mut(), &mut vhat.view_mut(), &mut self.fft_y, 0);
        ndfft_par(&mut vhat.view_mut(), &mut buf.view_mut(), &mut self.fft_x, 1);
        buf
    }

    /// Inverse 2d transform; returns the real part only. The imaginary
    /// residue of a field that is real in physical space is numerical
    /// noise and is discarded here, never asserted to be zero.
    pub fn inverse(&mut self, vhat: &Array2<Complex<Real>>) -> Array2<Real> {
        let mut buf = vhat.to_owned();
        let mut out = Array2::<Complex<Real>>::zeros(vhat.raw_dim());
        ndifft_par(&mut buf.view_mut(), &mut out.view_mut(), &mut self.fft_y, 0);
        ndifft_par(&mut out.view_mut(), &mut buf.view_mut(), &mut self.fft_x, 1);
        buf.mapv(|v| v.re)
    }
}
