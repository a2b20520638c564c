//! ppiviz-chord
//!
//! Chord diagrams of predicted protein-protein interactions.
//!
//! Proteins are drawn as arcs around a circle, sized by sequence length, optionally
//! subdivided into domain segments. Each interaction is a ribbon joining the two
//! interacting residue ranges; hovering reveals the boundary residues and clicking
//! follows a link to the interaction's detail view.
//!
//! ```ignore
//! use ppiviz_chord::{ChordConfig, ChordPlot, ColoringMode};
//! use ppiviz_io::{FileTableSource, ProteinTableCache};
//!
//! let plot = ChordPlot::new(ProteinTableCache::new(FileTableSource::new("proteins.json")));
//! let config = ChordConfig::builder()
//!     .coloring_mode(ColoringMode::ByPartner)
//!     .query_protein("P12345")
//!     .build();
//! plot.render(&rows, "main", &config);
//! let svg = plot.surface("main").markup();
//! ```
mod config;
mod document;
mod link;
mod palette;
mod plot;
mod render;
mod scene;
mod surface;

pub use self::config::{ArcColoringMode, ChordConfig, ColoringMode};
pub use self::link::{interaction_link, DEFAULT_LINK_BASE};
pub use self::palette::{domain_display_name, strip_numeric_suffix, PALETTE};
pub use self::plot::{rows_from_json, ChordPlot, RenderStatus};
pub use self::render::{build_scene, SceneStats, EMPTY_MESSAGE, LOADING_MESSAGE};
pub use self::scene::{Chord, Gradient, Label, Paint, Rendered, Scene, Wedge};
pub use self::surface::{RenderTicket, Surface, SurfaceRegistry};
