//! Domain model types.

pub mod booking;
pub mod ids;
pub mod label;
pub mod macros;
pub mod overlap;
pub mod preference;
pub mod slot;
pub mod time;

pub use booking::*;
pub use ids::*;
pub use label::*;
pub use overlap::*;
pub use preference::*;
pub use slot::*;
pub use time::*;
