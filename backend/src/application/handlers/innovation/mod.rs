//! Innovation handlers: packaging, product variants and the feedback loop.

mod feedback_loop;
mod save_packaging;
mod variants;

pub use feedback_loop::{AddFeedbackCommand, FeedbackLoopHandler, FeedbackLoopView};
pub use save_packaging::{SavePackagingCommand, SavePackagingHandler, SavePackagingResult};
pub use variants::{AddVariantCommand, RemoveVariantCommand, UpdateVariantCommand, VariantsHandler};
