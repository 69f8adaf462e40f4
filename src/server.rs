pub mod handlers;
pub mod params;
pub mod response;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
