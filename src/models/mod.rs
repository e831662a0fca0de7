pub mod form;
pub mod payload;
pub mod schema;
pub mod status;

pub use form::{
    CourseField, CourseInfo, FieldPath, FieldUpdate, FormValues, QuestionResponse, TextField,
};
pub use payload::{ResponseEntry, SurveyPayload};
pub use schema::{questions, rating_scale, QuestionDescriptor, Rating};
pub use status::Status;
