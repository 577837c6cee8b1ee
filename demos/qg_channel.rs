//! Solve the one-layer QG model in a channel, starting from a
//! small-amplitude perturbation of the gravest channel mode
//!
//! cargo run --release --example qg_channel
use qgpde::{Config, Qg2D};

fn main() {
    // Parameters
    let parms = Config::default();
    let mut qg = Qg2D::new(&parms);
    // Initial conditions
    qg.set_perturbation(1e-8, 1., 1.);
    // Report the field instead of plotting it
    qg.render = Some(Box::new(|time, q, _grid| {
        let days = time / (3600. * 24.);
        let max = q.iter().cloned().fold(f64::MIN, f64::max);
        println!("PV at t = {:5.2} days, max = {:9.3e}", days, max);
    }));
    qg.solve();
    // Diagnostics
    qg.print_drift();
}
