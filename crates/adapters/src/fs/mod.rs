mod clock;
mod recipe;

pub use clock::SystemClock;
pub use recipe::{load_recipe, parse_recipe};
