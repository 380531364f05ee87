pub mod domain;
pub mod loader;
pub mod primitives;
pub mod scale;
pub mod series;
pub mod simplify;
pub mod transform;
pub mod types;
pub mod windowing;

pub use domain::{Domain, DomainPriority, highest_priority_domain};
pub use loader::{
    ClosureLoader, LoaderRequest, LoaderResponse, RequestSequencer, RequestTicket, SeriesLoader,
    SyntheticLoader, SyntheticWave, should_draw_point_markers, visible_point_count,
};
pub use scale::LinearScale;
pub use series::{Series, SeriesId};
pub use simplify::{simplify, simplify_series};
pub use transform::{Transform, VerticalRescale};
pub use types::{Point, Viewport};
pub use windowing::{compute_visible_window, points_in_time_window, visible_slice_with_neighbors};
