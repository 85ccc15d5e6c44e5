mod favicon;
mod icons;
mod logo;
mod preview;

pub use favicon::favicon;
pub use icons::{android, icons, ios, Step};
pub use logo::logo;
pub use preview::preview;
