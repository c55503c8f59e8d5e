pub mod person;

pub use person::{PersonDocument, PersonId};
