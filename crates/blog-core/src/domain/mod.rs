//! Domain entities - the core business objects.

mod post;

pub use post::{AUTHOR_MAX_LEN, NewPost, Post, PostPatch, TITLE_MAX_LEN};

pub(crate) use post::check_len;
