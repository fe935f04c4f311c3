//! discussctl-core - turn repository discussions into static-site posts
//!
//! ```text
//! DiscussionClient ──▶ filter_by_category ──▶ RenderedDocument ──▶ PostWriter
//!   (GET /discussions)    ("Announcements")    (frontmatter merge)   (content/post/<slug>/index.md)
//! ```

pub mod config;
pub mod discussion;
pub mod error;
pub mod fetch;
pub mod frontmatter;
pub mod pipeline;
pub mod slug;
pub mod writer;

pub use config::{ConfigFile, SyncConfig};
pub use discussion::{filter_by_category, Discussion, Labels, ANNOUNCEMENTS};
pub use error::{DiscussError, Result};
pub use fetch::DiscussionClient;
pub use frontmatter::{render_discussion, split_frontmatter, RenderedDocument};
pub use pipeline::{run_sync, write_posts, SyncReport};
pub use slug::{slugify, SlugRegistry};
pub use writer::PostWriter;
