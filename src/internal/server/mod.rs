pub mod server;

// Re-export main types
pub use server::create_server;
pub use server::Server;
