pub mod evaluation_with_food;
pub mod feeding_record;

pub use evaluation_with_food::EvaluationWithFood;
pub use feeding_record::{FeedingRecord, RecordError};
