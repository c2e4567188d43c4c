//! sgcore is a library for solving L1 robust regression over the probability
//! simplex with first-order subgradient methods.
//!
//! It implements Euclidean projected subgradient descent and entropic mirror
//! descent on top of a shared evaluation core, with step schedules derived
//! analytically from the instance geometry, and a sweep driver that compares
//! both algorithms over a range of problem sizes.

pub mod algorithms;
pub mod entrypoints;
pub mod error;

pub mod routines {
    pub mod evaluation {
        pub mod objective;
        pub mod projection;
        pub mod schedule;
    }
    pub mod initialization;
    pub mod logger;
    pub mod output;
    pub mod settings;
}

pub mod structs {
    pub mod instance;
    pub mod trajectory;
    pub mod weights;
}

pub mod prelude {
    pub use crate::algorithms::{
        dispatch_algorithm, run_mda, run_pgd, Algorithm, Optimizer, Status,
    };
    pub use crate::entrypoints::{run, start};
    pub use crate::error::SgCoreError;
    pub use crate::routines::evaluation::objective::{objective, subgradient};
    pub use crate::routines::evaluation::projection::project_to_simplex;
    pub use crate::routines::evaluation::schedule::{Budget, Schedule};
    pub use crate::routines::initialization;
    pub use crate::routines::logger::setup_log;
    pub use crate::routines::output::{OutputFile, SweepLog, SweepRow};
    pub use crate::routines::settings::{read_settings, write_settings_to_file, Settings};
    pub use crate::structs::instance::Instance;
    pub use crate::structs::trajectory::Trajectory;
    pub use crate::structs::weights::Weights;
}
