mod engine;
mod lockout;
mod password;
mod surface;

pub use engine::{GateEngine, GateStatus};
pub use lockout::LockState;
pub use password::{parse_date_password, DateCandidate};
pub use surface::{GateSurface, NoopGateSurface};
