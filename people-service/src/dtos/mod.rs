pub mod people;

pub use people::{Person, PersonInput};
