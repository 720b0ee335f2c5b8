//! Compare follower and following exports and report asymmetric
//! relationships: who does not follow back, and who is not followed back.

pub mod cli;
pub mod compare;
pub mod errors;
pub mod model;
pub mod normalize;
pub mod session;

pub use compare::compare;
pub use errors::AuditError;
pub use model::{ComparisonResult, Role, UsernameSet, profile_url};
pub use normalize::normalize;
pub use session::{AuditSession, LoadOutcome, LoadTicket};
