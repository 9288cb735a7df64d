#[macro_use]
extern crate anyhow;

mod ids;
pub mod stations;
pub mod trips;

pub use self::ids::{CheapID, IDMapping, StationCode, StationID};
pub use self::stations::Station;
pub use self::trips::Trip;
