use anyhow::Result;
use sgcore::prelude::*;

fn main() -> Result<()> {
    let log = start("demos/compare.toml".to_string())?;

    for row in log.rows() {
        println!(
            "{} on {}x{}: objective {:.6} in {:.3} s",
            row.algorithm(),
            row.observations(),
            row.dimension(),
            row.objective(),
            row.elapsed_s()
        );
    }

    Ok(())
}
