pub mod page_traits;

pub use page_traits::{CookieStore, Navigator};
