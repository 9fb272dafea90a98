pub mod config;
pub mod convert;
pub mod escape;
pub mod pathset;
pub mod recent;
pub mod sync;
pub mod template;
pub mod text;

// Re-export main types
pub use convert::{ConvertError, MarkupConverter, PandocConverter, PandocOptions};
pub use escape::escape_leaf_syntax;
pub use pathset::{PathEntry, PathSet, ScanError};
pub use recent::{recent_items, render_recent_fragment, RecentItem};
pub use sync::{diff, SyncDecision, SyncOutcome, SyncReport, Syncer};
pub use template::{render_envelope, RenderError};
