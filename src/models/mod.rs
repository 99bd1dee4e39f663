pub mod analysis;
pub mod assets;
pub mod state;

pub use analysis::*;
pub use assets::*;
pub use state::*;
