//! Business logic services
//!
//! Services combine validation, authorization, and persistence so route
//! handlers never touch the repository directly. The shared fetch/list/
//! update/delete flow lives in [`resource`]; per-kind modules add their
//! create-time rules on top.

pub mod exercise;
pub mod relax;
pub mod relax_type;
pub mod resource;
pub mod user;

pub use exercise::{CreateExerciseInput, ExerciseService};
pub use relax::{CreateRelaxActivityInput, RelaxService};
pub use relax_type::RelaxTypeService;
pub use resource::ResourceService;
pub use user::{AuthTokens, UpdateUserInput, UserProfile, UserService};
