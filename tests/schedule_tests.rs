use anyhow::Result;
use faer::{mat, Col};
use sgcore::prelude::*;

/// A 2x2 diagonal instance with spectral norm 2 and column norms 1 and 0.5
fn diagonal_instance() -> Result<Instance> {
    let matrix = mat![[2.0, 0.0], [0.0, 1.0]];
    let target = Col::from_fn(2, |_| 0.0);
    Ok(Instance::new(matrix, target)?)
}

/// With a fixed horizon, the Euclidean step matches (R/L) * sqrt(1/T)
#[test]
fn euclidean_step_matches_closed_form() -> Result<()> {
    let instance = diagonal_instance()?;
    let schedule = Schedule::euclidean(&instance, Budget::Horizon(1000))?;

    let lipschitz = 2.0; // spectral norm of diag(2, 1)
    let expected = (1.0 / lipschitz) * (1.0_f64 / 1000.0).sqrt();

    assert_eq!(schedule.horizon(), 1000);
    let relative = (schedule.step() - expected).abs() / expected;
    assert!(
        relative < 1e-12,
        "step {} deviates from {} by {:.3e}",
        schedule.step(),
        expected,
        relative
    );
    Ok(())
}

/// With a fixed horizon, the entropic step matches (R/L) * sqrt(2/T)
#[test]
fn entropic_step_matches_closed_form() -> Result<()> {
    let instance = diagonal_instance()?;
    let schedule = Schedule::entropic(&instance, Budget::Horizon(1000))?;

    let lipschitz = 1.0; // largest column l1 norm of diag(2, 1) over n = 2
    let radius = (2.0_f64).ln().sqrt();
    let expected = (radius / lipschitz) * (2.0_f64 / 1000.0).sqrt();

    assert_eq!(schedule.horizon(), 1000);
    let relative = (schedule.step() - expected).abs() / expected;
    assert!(
        relative < 1e-12,
        "step {} deviates from {} by {:.3e}",
        schedule.step(),
        expected,
        relative
    );
    Ok(())
}

/// An accuracy target resolves to T = round((R * L / eps)^2) for the
/// Euclidean geometry
#[test]
fn euclidean_accuracy_budget_resolves_horizon() -> Result<()> {
    let instance = diagonal_instance()?;
    let schedule = Schedule::euclidean(&instance, Budget::Accuracy(0.1))?;

    // (1 * 2 / 0.1)^2 = 400
    assert_eq!(schedule.horizon(), 400);
    Ok(())
}

/// An accuracy target resolves to T = round(2 * (R * L / eps)^2) for the
/// entropic geometry
#[test]
fn entropic_accuracy_budget_resolves_horizon() -> Result<()> {
    let instance = diagonal_instance()?;
    let schedule = Schedule::entropic(&instance, Budget::Accuracy(0.1))?;

    // 2 * (sqrt(ln 2) * 1 / 0.1)^2 = 200 * ln 2 = 138.6..., rounded to 139
    assert_eq!(schedule.horizon(), 139);
    Ok(())
}

/// A very loose accuracy target still schedules one iterate
#[test]
fn accuracy_horizon_is_clamped_to_one() -> Result<()> {
    let instance = diagonal_instance()?;
    let schedule = Schedule::euclidean(&instance, Budget::Accuracy(1e6))?;

    assert_eq!(schedule.horizon(), 1);
    Ok(())
}

/// Accuracy targets resolving past the supported horizon are rejected in
/// both geometries, whether the horizon overflows or is merely enormous
#[test]
fn unattainable_accuracy_is_rejected() -> Result<()> {
    let instance = diagonal_instance()?;

    for epsilon in [1e-300, 1e-6] {
        assert!(matches!(
            Schedule::euclidean(&instance, Budget::Accuracy(epsilon)),
            Err(SgCoreError::Config(_))
        ));
        assert!(matches!(
            Schedule::entropic(&instance, Budget::Accuracy(epsilon)),
            Err(SgCoreError::Config(_))
        ));
    }
    Ok(())
}

/// The zero matrix has no valid schedule in either geometry
#[test]
fn schedules_reject_degenerate_instances() -> Result<()> {
    let matrix = mat![[0.0, 0.0], [0.0, 0.0]];
    let target = Col::from_fn(2, |_| 1.0);
    let instance = Instance::new(matrix, target)?;

    assert!(matches!(
        Schedule::euclidean(&instance, Budget::Horizon(100)),
        Err(SgCoreError::Degenerate(_))
    ));
    assert!(matches!(
        Schedule::entropic(&instance, Budget::Horizon(100)),
        Err(SgCoreError::Degenerate(_))
    ));
    Ok(())
}

/// Zero horizons and non-positive accuracies are configuration errors
#[test]
fn schedules_reject_invalid_budgets() -> Result<()> {
    let instance = diagonal_instance()?;

    assert!(matches!(
        Schedule::euclidean(&instance, Budget::Horizon(0)),
        Err(SgCoreError::Config(_))
    ));
    assert!(matches!(
        Schedule::entropic(&instance, Budget::Horizon(0)),
        Err(SgCoreError::Config(_))
    ));
    for epsilon in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(
            matches!(
                Schedule::euclidean(&instance, Budget::Accuracy(epsilon)),
                Err(SgCoreError::Config(_))
            ),
            "epsilon {} was not rejected",
            epsilon
        );
    }
    Ok(())
}
