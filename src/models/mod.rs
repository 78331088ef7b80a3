//! Data models
//!
//! Pokemon API payloads consumed by the read-through client, and the DTOs
//! of the diagnostics surface.

pub mod pokemon;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use pokemon::{Ability, PokemonData, PokemonListItem, PokemonPage, Sprites, Stat};
pub use requests::InvalidateRequest;
pub use responses::{ClearResponse, ErrorResponse, HealthResponse, InvalidateResponse};
