pub mod assessment;
pub mod events;

pub use assessment::{AssessmentSession, QuestionState};
pub use events::{SessionEvent, SessionObserver};
