pub mod alert;
pub mod confirm;
pub mod title_prompt;

pub use alert::AlertDialog;
pub use confirm::{ConfirmAction, ConfirmDialogState, ConfirmResult};
pub use title_prompt::{PromptPurpose, PromptResult, TitlePrompt};
