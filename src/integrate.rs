//! Integrate trait and time loop
const MAX_TIMESTEP: usize = 100000;

/// Integrate trait, step forward in time, and report results
pub trait Integrate {
    /// Update solution by one timestep
    fn update(&mut self);
    /// Receive current time
    fn get_time(&self) -> f64;
    /// Get timestep
    fn get_dt(&self) -> f64;
    /// Report or render the current state (used as callback)
    fn callback(&mut self);
    /// Additional break criterion, e.g. a blow-up guard
    fn exit(&mut self) -> bool;
}

/// Integrate pde, that implements the Integrate trait.
///
/// Specify save_intervall to force a callback every that many
/// time units.
///
/// Stop criteria:
/// 1. Time limit (the loop takes floor((max_time - t) / dt) steps)
/// 2. Timestep limit
/// 3. `Integrate::exit`
pub fn integrate<T: Integrate>(pde: &mut T, max_time: f64, save_intervall: Option<f64>) {
    let mut timestep: usize = 0;
    let eps_dt = pde.get_dt() * 1e-4;
    loop {
        // Update
        pde.update();
        timestep += 1;

        // Save
        if let Some(dt_save) = &save_intervall {
            if (pde.get_time() % dt_save) < pde.get_dt() / 2.
                || (pde.get_time() % dt_save) > dt_save - pde.get_dt() / 2.
            {
                pde.callback();
            }
        }

        // Break
        if pde.exit() {
            println!("break criterion reached at time: {:?}", pde.get_time());
            break;
        }
        if pde.get_time() + pde.get_dt() > max_time + eps_dt {
            break;
        }
        if timestep >= MAX_TIMESTEP {
            println!("timestep limit reached: {:?}", timestep);
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        time: f64,
        dt: f64,
        steps: usize,
        callbacks: usize,
    }

    impl Integrate for Counter {
        fn update(&mut self) {
            self.time += self.dt;
            self.steps += 1;
        }
        fn get_time(&self) -> f64 {
            self.time
        }
        fn get_dt(&self) -> f64 {
            self.dt
        }
        fn callback(&mut self) {
            self.callbacks += 1;
        }
        fn exit(&mut self) -> bool {
            false
        }
    }

    #[test]
    fn takes_floor_tf_over_dt_steps() {
        let mut pde = Counter {
            time: 0.,
            dt: 1.,
            steps: 0,
            callbacks: 0,
        };
        integrate(&mut pde, 10., None);
        assert_eq!(pde.steps, 10);

        let mut pde = Counter {
            time: 0.,
            dt: 1.,
            steps: 0,
            callbacks: 0,
        };
        integrate(&mut pde, 10.5, None);
        assert_eq!(pde.steps, 10);
    }

    #[test]
    fn callback_fires_on_the_save_intervall() {
        let mut pde = Counter {
            time: 0.,
            dt: 1.,
            steps: 0,
            callbacks: 0,
        };
        integrate(&mut pde, 12., Some(4.));
        assert_eq!(pde.callbacks, 3);
    }
}
