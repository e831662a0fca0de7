pub mod submission;

pub use submission::{
    abandon, reject, resolve, submit, SubmissionController, SubmitDecision, SubmitOutcome,
};
