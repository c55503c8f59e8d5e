pub mod database;
pub mod memory;
pub mod people;
pub mod store;

pub use database::MongoDb;
pub use memory::MemoryStore;
pub use people::PeopleService;
pub use store::{PersonFilter, PersonStore};
