pub mod utils;

// Re-exports für einfache Verwendung
pub use utils::{angles, comparison, constants};
