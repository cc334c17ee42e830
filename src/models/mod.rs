//! Entity records and their write payloads
//!
//! Each entity kind couples its row struct with the insert/patch shapes the
//! generic repository needs. Ownership semantics for the authorization
//! policy live here too, next to the data they describe.

pub mod exercise;
pub mod relax;
pub mod user;

pub use exercise::{CreateExercise, Exercise, ExercisePatch};
pub use relax::{
    CreateRelaxActivity, CreateRelaxType, RelaxActivity, RelaxActivityPatch, RelaxType,
    RelaxTypePatch,
};
pub use user::{CreateUser, User, UserPatch};
