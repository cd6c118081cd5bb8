//! Monotone 2D point curves and their derived statistics.
//!
//! Layout
//! - `curve`: the point sequence, its X-direction insertion policy, and the
//!   length/area/extrema metrics recomputed after every mutation.
//! - `io`: flat `x y` point files (load stops early, save never overwrites).
//! - `session`: the call surface a front-end (menu shell, CLI) drives.
//! - `rand`: reproducible random monotone curves for benches and tests.

pub mod curve;
pub mod io;
pub mod rand;
pub mod session;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use curve::{
    point, Curve, CurveMetrics, Direction, MetricsError, Point, PointSequence, RejectionReason,
};
pub use io::{LoadError, LoadOutcome, SaveCfg, SaveError};
pub use session::{ModifiedFlag, Session, SessionState};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::curve::{
        point, policy::admit, Curve, CurveMetrics, Direction, MetricsError, Point, PointSequence,
        RejectionReason,
    };
    pub use crate::io::{LoadError, SaveCfg, SaveError};
    pub use crate::rand::{draw_monotone_curve, MonotoneCfg, ReplayToken};
    pub use crate::session::{ModifiedFlag, Session, SessionState};
}
