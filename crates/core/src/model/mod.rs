mod module_progress;
mod percent;
mod results;
mod snapshot;
mod style;
mod tally;

pub use module_progress::{ModuleProgress, ModuleStatus};
pub use percent::{Percent, PercentError};
pub use results::FinalResults;
pub use snapshot::{ProgressSnapshot, SnapshotError};
pub use style::{LearningStyle, ParseStyleError};
pub use tally::{TallyError, VarkTally};
