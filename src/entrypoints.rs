use crate::algorithms::dispatch_algorithm;
use crate::routines::evaluation::objective::objective;
use crate::routines::initialization;
use crate::routines::logger;
use crate::routines::output::{SweepLog, SweepRow};
use crate::routines::settings::{read_settings, write_settings_to_file, Settings};

use anyhow::Result;
use rayon::prelude::*;
use std::time::Instant;

/// Primary entrypoint for sgcore
///
/// Reads the sweep settings from a TOML file, initializes logging, and runs
/// the comparison sweep. See `routines::settings` for the file format.
pub fn start(settings_path: String) -> Result<SweepLog> {
    let settings = read_settings(settings_path)?;
    run(settings)
}

/// Run the comparison sweep described by `settings`
///
/// For every configured (observations, dimension) size, a seeded instance is
/// generated and every configured algorithm is run under the shared budget.
/// Each row reports the objective at the time-averaged iterate, the point
/// subgradient methods converge through. Sizes are independent of each other
/// and run in parallel.
pub fn run(settings: Settings) -> Result<SweepLog> {
    let now = Instant::now();

    logger::setup_log(&settings)?;
    tracing::info!(
        "Starting sweep over {} problem sizes",
        settings.sweep.sizes.len()
    );

    // Fail fast on an inconsistent budget, before any instance is generated
    let budget = settings.budget()?;

    // Tell the user where the output files will be written
    match settings.output.write {
        true => {
            tracing::info!("Output files will be written to {}", settings.output.path)
        }
        false => {
            tracing::info!("Output files will not be written - set `write = true` in the configuration file to enable output files")
        }
    }

    let results: Vec<Vec<SweepRow>> = settings
        .sweep
        .sizes
        .par_iter()
        .map(|&(n, m)| -> Result<Vec<SweepRow>> {
            let instance = initialization::generate(n, m, settings.sweep.seed)?;

            let mut rows = Vec::with_capacity(settings.sweep.algorithms.len());
            for &algorithm in &settings.sweep.algorithms {
                let run_start = Instant::now();

                let mut optimizer = dispatch_algorithm(algorithm, &instance, budget)?;
                let schedule = *optimizer.schedule();

                let trajectory = match optimizer.run() {
                    Ok(trajectory) => trajectory,
                    Err(err) => {
                        tracing::error!("{} failed on the {}x{} instance: {}", algorithm, n, m, err);
                        return Err(err.into());
                    }
                };
                let elapsed = run_start.elapsed();

                let mean = trajectory.mean();
                let value = objective(&instance, mean.weights())?;

                tracing::info!(
                    "{} on {}x{}: averaged objective {:.6} after {} iterates in {:.2?}",
                    algorithm,
                    n,
                    m,
                    value,
                    schedule.horizon(),
                    elapsed
                );

                rows.push(SweepRow::new(
                    algorithm,
                    n,
                    m,
                    schedule.horizon(),
                    schedule.step(),
                    value,
                    elapsed.as_secs_f64(),
                ));
            }
            Ok(rows)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut log = SweepLog::new();
    for rows in results {
        log.extend(rows);
    }

    // Write output files (if configured)
    if settings.output.write {
        write_settings_to_file(&settings)?;
        log.write(&settings)?;
    }

    tracing::info!("Sweep complete after {:.2?}", now.elapsed());

    Ok(log)
}
