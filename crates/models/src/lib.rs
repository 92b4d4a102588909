pub mod errors;
pub mod facility;

pub use facility::{Facility, Location};
