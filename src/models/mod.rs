pub mod exam;
pub mod product;
pub mod setting;

pub use exam::{AnswerOption, Exam, Question, MAX_OPTIONS, MIN_OPTIONS};
pub use product::{Product, ProductKind};
pub use setting::{SettingKey, Settings};
