pub mod content;
pub mod forest;
pub mod types;

pub use forest::config::{ForestConfig, HallwayWidth, RoomShape, WalkStrategy};
pub use forest::model::{
    FeatureKind, FloorRecord, GeneratedForest, GenerationStats, PlacedFeature, UniqueSpots,
    WallRecord,
};
pub use forest::{
    BAD_WALL_BITMASKS, FloorCategory, ForestGenerator, WallCategory, generate_forest,
};
pub use types::Pos;
