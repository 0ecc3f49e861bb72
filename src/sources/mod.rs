pub mod html;
pub mod text;
pub mod traits;
pub mod types;

pub use html::HtmlPageSource;
pub use text::TextFileSource;
pub use traits::ListingSource;
pub use types::PageLocation;
