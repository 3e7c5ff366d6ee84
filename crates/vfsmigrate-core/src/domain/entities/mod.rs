pub mod migration;
pub mod migrations;

pub use migration::Migration;
pub use migrations::Migrations;
