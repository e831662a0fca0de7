pub mod form_store;
pub mod validation;

pub use form_store::FormStore;
pub use validation::{validate, CourseInfoErrors, ErrorMap};
