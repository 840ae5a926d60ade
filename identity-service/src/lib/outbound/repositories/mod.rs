pub mod memory;
pub mod principal;
pub mod profile;

pub use memory::InMemoryRepository;
pub use principal::PostgresPrincipalRepository;
pub use profile::PostgresProfileRepository;
