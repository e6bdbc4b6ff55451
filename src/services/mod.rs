pub mod build_tile_service;
pub mod state_mapping;
pub mod tile_poller;

pub use build_tile_service::BuildTileService;
pub use state_mapping::parse_state;
pub use tile_poller::{PollRound, TilePoller};
