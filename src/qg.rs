//! # One-layer quasi-geostrophic channel model
//! Advances the potential vorticity field with a third-order
//! Adams-Bashforth scheme, bootstrapped by one Euler and one AB2 step,
//! and applies a spectral exponential filter after every AB3 update.
//!
//! # Example
//! Spin up the standard perturbed channel
//! ```
//! use qgpde::{integrate, Config, Qg2D};
//!
//! let mut parms = Config::default();
//! parms.nx = 32;
//! parms.ny = 32;
//! parms.tf = 24. * 3600.;
//! let mut qg = Qg2D::new(&parms);
//! qg.set_perturbation(1e-8, 1., 1.);
//! integrate(&mut qg, parms.tf, None);
//! assert_eq!(qg.diagnostics["energy"].len(), 24);
//! ```
use crate::flux::{flux_qg, FluxResult};
use crate::functions::relative_drift;
use crate::integrate::Integrate;
use crate::transform::ChannelFft;
use crate::{Config, Grid, Real};
use ndarray::Array2;
use std::collections::HashMap;

/// Render hook, called with (time, pv field, grid) from the callback.
/// The core never depends on what the hook does.
pub type RenderHook = Box<dyn FnMut(f64, &Array2<Real>, &Grid)>;

/// Solve the one-layer QG model in a channel.
///
/// Fields:
///   q  : potential vorticity (the evolved state)
///   u,v: zonal/meridional velocity
///   psi: streamfunction
///
/// Evolution:
///   q_t = - (u + U) q_x - (q_y + Q_y) v
///
/// Potential vorticity:
///   q_hat = - (K2 + F) psi_hat
///
/// Geostrophy:
///   u_hat = -i*ky*psi_hat, v_hat = i*kx*psi_hat
///
/// Struct must be mutable, to perform the update step, which advances
/// the solution by 1 timestep.
pub struct Qg2D {
    /// Grid, wavenumbers and spectral kernels
    pub grid: Grid,
    /// Transforms on the mirror-doubled domain
    fft: ChannelFft,
    /// Potential vorticity on the physical (ny, nx) domain
    pub q: Array2<Real>,
    /// Flux of the previous step
    nl_n: Array2<Real>,
    /// Flux of two steps back
    nl_nm: Array2<Real>,
    /// Time
    pub time: f64,
    /// Timestep counter
    pub step: usize,
    /// Time step size
    pub dt: f64,
    /// Conserved-quantity series: "energy", "enstrophy", "mass",
    /// one entry per timestep, recorded at the pre-update field
    pub diagnostics: HashMap<String, Vec<f64>>,
    /// Called with the current field at every callback
    pub render: Option<RenderHook>,
}

impl Qg2D {
    /// Allocate the model from a configuration.
    ///
    /// # Arguments
    ///
    /// * `parms` - Physical and numerical parameters, see [`Config`]
    ///
    /// # Panics
    /// Panics when the configuration is malformed, see [`Config::validate`].
    pub fn new(parms: &Config) -> Self {
        let grid = Grid::new(parms);
        let fft = ChannelFft::new(grid.nx, grid.ny);
        let q = Array2::zeros((grid.ny, grid.nx));
        let nl_n = Array2::zeros((grid.ny, grid.nx));
        let nl_nm = Array2::zeros((grid.ny, grid.nx));

        let mut diagnostics = HashMap::new();
        diagnostics.insert("energy".to_string(), Vec::<f64>::new());
        diagnostics.insert("enstrophy".to_string(), Vec::<f64>::new());
        diagnostics.insert("mass".to_string(), Vec::<f64>::new());

        Qg2D {
            time: parms.t0,
            dt: grid.dt,
            step: 0,
            grid,
            fft,
            q,
            nl_n,
            nl_nm,
            diagnostics,
            render: None,
        }
    }

    /// Overwrite the pv field with an initial condition.
    ///
    /// # Panics
    /// Panics when shapes of fields do not match.
    pub fn set_q(&mut self, q0: &Array2<Real>) {
        assert!(
            q0.dim() == self.q.dim(),
            "shape mismatch in set_q, got {:?} expected {:?}",
            q0.dim(),
            self.q.dim()
        );
        self.q.assign(q0);
    }

    /// Initialize pv with a channel mode
    ///
    /// q0 = amp \* sin(m pi (y + Ly/2) / Ly) \* cos(2 pi n (x + Lx/2) / Lx)
    pub fn set_perturbation(&mut self, amp: Real, m: Real, n: Real) {
        use std::f64::consts::PI;
        let (lx, ly) = (self.grid.lx, self.grid.ly);
        let (xx, yy) = (&self.grid.xx, &self.grid.yy);
        for ((j, i), v) in self.q.indexed_iter_mut() {
            let arg_y = m * PI * (yy[[j, i]] + 0.5 * ly) / ly;
            let arg_x = 2. * PI * n * (xx[[j, i]] + 0.5 * lx) / lx;
            *v = amp * arg_y.sin() * arg_x.cos();
        }
    }

    /// Initialize pv with a uniform random disturbance in \[-amp, amp\]
    pub fn random_disturbance(&mut self, amp: Real) {
        use ndarray_rand::rand_distr::Uniform;
        use ndarray_rand::RandomExt;
        let rand: Array2<Real> =
            Array2::random((self.grid.ny, self.grid.nx), Uniform::new(-amp, amp));
        self.q.assign(&rand);
    }

    /// Run the model from the current state to `grid.tf`, with a
    /// callback every `grid.npt` timesteps.
    pub fn solve(&mut self) {
        let tplot = self.dt * self.grid.npt as f64;
        let tf = self.grid.tf;
        crate::integrate(self, tf, Some(tplot));
    }

    /// Relative drift (max(series) - series\[1\]) / series\[1\] of a
    /// recorded diagnostic series
    pub fn eval_drift(&self, name: &str) -> f64 {
        self.diagnostics
            .get(name)
            .map_or(f64::NAN, |series| relative_drift(series))
    }

    /// Print relative drift of energy, enstrophy and mass
    pub fn print_drift(&self) {
        println!("Error in energy is {:9.3e}", self.eval_drift("energy"));
        println!("Error in enstrophy is {:9.3e}", self.eval_drift("enstrophy"));
        println!("Error in mass is {:9.3e}", self.eval_drift("mass"));
    }

    /// Apply the spectral exponential filter to the pv field
    fn apply_filter(&mut self) {
        let qe = self.fft.extend(&self.q);
        let qe_hat = self.fft.forward(&qe);
        let qe_hat = &qe_hat * &self.grid.sfilt;
        let qe = self.fft.inverse(&qe_hat);
        self.q = self.fft.restrict(&qe);
    }
}

impl Integrate for Qg2D {
    /// Update 1 timestep: Euler at step 0, AB2 at step 1, AB3 with
    /// filtering afterwards. The filter is not applied after the two
    /// bootstrap steps.
    fn update(&mut self) {
        let FluxResult {
            flux: nl,
            energy,
            enstrophy,
            mass,
        } = flux_qg(&self.q, &self.grid, &mut self.fft);

        // diagnostics of the pre-update field
        if let Some(d) = self.diagnostics.get_mut("energy") {
            d.push(energy);
        }
        if let Some(d) = self.diagnostics.get_mut("enstrophy") {
            d.push(enstrophy);
        }
        if let Some(d) = self.diagnostics.get_mut("mass") {
            d.push(mass);
        }

        let dt = self.dt;
        match self.step {
            0 => {
                // Euler step
                self.q += &(dt * &nl);
            }
            1 => {
                // AB2 step
                self.q += &(0.5 * dt * (3. * &nl - &self.nl_n));
            }
            _ => {
                // AB3 step
                self.q += &(dt / 12. * (23. * &nl - 16. * &self.nl_n + 5. * &self.nl_nm));
                self.apply_filter();
            }
        }

        // rotate fluxes
        std::mem::swap(&mut self.nl_nm, &mut self.nl_n);
        self.nl_n = nl;

        // update time
        self.time += self.dt;
        self.step += 1;
    }

    fn get_time(&self) -> f64 {
        self.time
    }

    fn get_dt(&self) -> f64 {
        self.dt
    }

    fn callback(&mut self) {
        let last = |name: &str| -> f64 {
            self.diagnostics
                .get(name)
                .and_then(|d| d.last().copied())
                .unwrap_or(0.)
        };
        println!(
            "time = {:8.2e}     energy = {:5.3e}     enstrophy = {:5.3e}     mass = {:5.3e}",
            self.time,
            last("energy"),
            last("enstrophy"),
            last("mass"),
        );
        if let Some(hook) = &mut self.render {
            hook(self.time, &self.q, &self.grid);
        }
    }

    fn exit(&mut self) -> bool {
        // Break if pv field is nan
        if self.q.iter().any(|v| !v.is_finite()) {
            println!("pv field is not finite, aborting");
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrate;

    fn day_run() -> Qg2D {
        let mut parms = Config::default();
        parms.nx = 32;
        parms.ny = 32;
        parms.tf = 24. * 3600.;
        let mut qg = Qg2D::new(&parms);
        qg.set_perturbation(1e-8, 1., 1.);
        qg.solve();
        qg
    }

    #[test]
    fn day_run_is_finite_with_bounded_drift() {
        let qg = day_run();
        assert_eq!(qg.step, 24);
        assert!((qg.time - 24. * 3600.).abs() < 1e-6);
        assert!(qg.q.iter().all(|v| v.is_finite()));
        for name in ["energy", "enstrophy", "mass"].iter() {
            assert_eq!(qg.diagnostics[*name].len(), 24);
        }
        assert!(qg.eval_drift("energy").abs() < 1e-3);
        assert!(qg.eval_drift("enstrophy").abs() < 1e-3);
    }

    #[test]
    fn mass_is_conserved_after_bootstrap() {
        let qg = day_run();
        let mass = &qg.diagnostics["mass"];
        for m in mass.iter().skip(1) {
            assert!((m - mass[1]).abs() < 1e-9, "mass drifted: {}", m - mass[1]);
        }
    }

    #[test]
    fn zero_initial_field_stays_zero() {
        let mut parms = Config::default();
        parms.nx = 16;
        parms.ny = 16;
        parms.tf = 6. * 3600.;
        let mut qg = Qg2D::new(&parms);
        integrate(&mut qg, parms.tf, None);
        assert!(qg.q.iter().all(|&v| v == 0.));
        assert!(qg.diagnostics["energy"].iter().all(|&e| e == 0.));
        assert!(qg.diagnostics["mass"].iter().all(|&m| m == 0.));
    }

    #[test]
    fn blow_up_guard_stops_the_loop() {
        let mut parms = Config::default();
        parms.nx = 16;
        parms.ny = 16;
        let mut qg = Qg2D::new(&parms);
        qg.q[[0, 0]] = f64::NAN;
        integrate(&mut qg, parms.tf, None);
        // one update happens before the guard fires
        assert_eq!(qg.step, 1);
    }

    #[test]
    fn render_hook_sees_plot_eligible_steps() {
        use std::cell::RefCell;
        use std::rc::Rc;
        let mut parms = Config::default();
        parms.nx = 16;
        parms.ny = 16;
        parms.tf = 24. * 3600.;
        parms.npt = 12;
        let mut qg = Qg2D::new(&parms);
        qg.set_perturbation(1e-8, 1., 1.);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        qg.render = Some(Box::new(move |time, q, _| {
            log.borrow_mut().push((time, q.sum()));
        }));
        qg.solve();
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!((seen[0].0 - 12. * 3600.).abs() < 1e-6);
        assert!((seen[1].0 - 24. * 3600.).abs() < 1e-6);
    }
}
