pub mod discord;
pub mod log;
pub mod traits;

pub use discord::DiscordNotifier;
pub use log::LogNotifier;
pub use traits::Notifier;

/// Version shown in notification footers
pub const BOT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Placeholder for unset listing fields
pub(crate) const NOT_AVAILABLE: &str = "N/A";

pub(crate) fn or_na<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}
