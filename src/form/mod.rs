//! The CV form: the draft store, the validation rules, the work-experience
//! list editor and the submit state machine.

pub mod state;
pub mod submission;
pub mod validation;
pub mod work_experience;

pub use state::{FieldUpdate, FormStore};
pub use submission::{FormSession, SubmissionState, SubmitOutcome};
pub use validation::{validate, validate_at, ErrorMap, FieldPath, WorkField};
pub use work_experience::{WorkExperienceChange, WorkExperienceEditor};
