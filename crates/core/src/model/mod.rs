mod answers;
mod identity;
mod progress;
mod result;
mod review_nav;
mod score;

pub use answers::{AnswerError, AnswerMap, AnswerStore, OPTION_COUNT};
pub use identity::{ExamIdentity, ExamType, IdentityError, Subject};
pub use progress::{SessionProgress, PROGRESS_MAX_AGE_HOURS};
pub use result::ExamResult;
pub use review_nav::{ReviewFilter, ReviewNavigator};
pub use score::{score_exam, Grade, QuestionResult, QuestionStatus, ScoreReport};
