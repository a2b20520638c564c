//! Chord Plot Entry Point
use crate::config::ChordConfig;
use crate::render::{build_scene, EMPTY_MESSAGE, LOADING_MESSAGE};
use crate::scene::Rendered;
use crate::surface::{Surface, SurfaceRegistry};
use ppiviz_core::RawRow;
use ppiviz_io::ProteinTableCache;
use serde_json::Value;
use std::sync::Arc;

/// Outcome of one render call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStatus {
    /// False when a newer render on the same target superseded this one.
    pub committed: bool,
    pub arcs: usize,
    pub chords: usize,
    /// Input rows that could not be drawn.
    pub dropped: usize,
}

/// Renders chord plots into named surfaces, sharing one protein table cache.
pub struct ChordPlot {
    cache: Arc<ProteinTableCache>,
    surfaces: SurfaceRegistry,
}

impl ChordPlot {
    pub fn new(cache: ProteinTableCache) -> Self {
        Self::with_shared_cache(Arc::new(cache))
    }

    pub fn with_shared_cache(cache: Arc<ProteinTableCache>) -> Self {
        Self {
            cache,
            surfaces: SurfaceRegistry::default(),
        }
    }

    pub fn cache(&self) -> &ProteinTableCache {
        &self.cache
    }

    pub fn surface(&self, target: &str) -> Arc<Surface> {
        self.surfaces.surface(target)
    }

    /// Renders `rows` into `target`, replacing whatever it showed.
    ///
    /// The target shows a loading message while the protein table is fetched. Errors never
    /// escape: unusable input leaves a placeholder message.
    pub fn render(&self, rows: &[RawRow], target: &str, config: &ChordConfig) -> RenderStatus {
        let surface = self.surfaces.surface(target);
        let ticket = surface.begin();
        if rows.is_empty() {
            return RenderStatus {
                committed: surface.commit(&ticket, Rendered::Placeholder(EMPTY_MESSAGE.to_string())),
                ..RenderStatus::default()
            };
        }

        surface.commit(&ticket, Rendered::Placeholder(LOADING_MESSAGE.to_string()));
        let table = self.cache.get_or_load();
        let (rendered, stats) = build_scene(rows, config, table.as_ref());
        RenderStatus {
            committed: surface.commit(&ticket, rendered),
            arcs: stats.arcs,
            chords: stats.chords,
            dropped: stats.dropped,
        }
    }

    /// Renders untyped JSON input. Anything but an array of objects shows the empty message.
    pub fn render_value(&self, rows: &Value, target: &str, config: &ChordConfig) -> RenderStatus {
        match rows_from_json(rows) {
            Some(rows) => self.render(&rows, target, config),
            None => {
                log::warn!("chord plot input is not an array, nothing to draw");
                self.render(&[], target, config)
            }
        }
    }
}

/// Converts a JSON array of objects to raw rows; `None` if `value` is not an array.
///
/// Scalars become text, nulls are left out, and non-object elements yield empty rows
/// that normalization drops.
pub fn rows_from_json(value: &Value) -> Option<Vec<RawRow>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .map(|item| {
                item.as_object()
                    .map(|object| {
                        object
                            .iter()
                            .filter_map(|(key, value)| {
                                let text = match value {
                                    Value::Null => return None,
                                    Value::String(text) => text.clone(),
                                    other => other.to_string(),
                                };
                                Some((key.clone(), text))
                            })
                            .collect()
                    })
                    .unwrap_or_default()
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppiviz_core::PROTEIN1_FIELDS;
    use ppiviz_io::{ProteinTable, StaticTableSource, TableEntry, TableError, TableSource};
    use serde_json::json;
    use std::sync::mpsc::{channel, Receiver, Sender};
    use std::sync::Mutex;

    fn rows() -> Vec<RawRow> {
        vec![RawRow::new()
            .with("Protein1", "A")
            .with("Protein2", "B")
            .with(
                "absolute_location",
                "{'Protein1': [10, 20], 'Protein2': [100, 120]}",
            )]
    }

    #[test]
    fn test_render_into_surface() {
        let plot = ChordPlot::new(ProteinTableCache::empty());
        let status = plot.render(&rows(), "main", &ChordConfig::default());
        assert!(status.committed);
        assert_eq!((status.arcs, status.chords, status.dropped), (2, 1, 0));
        let markup = plot.surface("main").markup();
        assert!(markup.starts_with("<svg"));
        assert!(markup.contains("interaction.html?p1=A"));
    }

    #[test]
    fn test_rendering_rebuilds_the_target() {
        let plot = ChordPlot::new(ProteinTableCache::empty());
        plot.render(&rows(), "main", &ChordConfig::default());
        plot.render(&[], "main", &ChordConfig::default());
        assert_eq!(plot.surface("main").markup(), EMPTY_MESSAGE);
    }

    #[test]
    fn test_render_value() {
        let plot = ChordPlot::new(ProteinTableCache::empty());
        let status = plot.render_value(&json!({"rows": []}), "a", &ChordConfig::default());
        assert!(status.committed);
        assert_eq!(plot.surface("a").markup(), EMPTY_MESSAGE);

        plot.render_value(&json!([]), "b", &ChordConfig::default());
        assert_eq!(plot.surface("b").markup(), EMPTY_MESSAGE);

        let value = json!([{
            "protein1": "A",
            "protein2": "B",
            "absolute_location": "{'protein1': [3], 'protein2': [4]}",
            "iptm": 0.5,
            "Protein1_Domain": null
        }]);
        let status = plot.render_value(&value, "c", &ChordConfig::default());
        assert_eq!(status.chords, 1);
    }

    #[test]
    fn test_rows_from_json() {
        let rows = rows_from_json(&json!([{"Protein1": "A", "iptm": 0.5, "x": null}, 3])).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(PROTEIN1_FIELDS), Some("A"));
        assert_eq!(rows[0].get(&["iptm"]), Some("0.5"));
        assert_eq!(rows[0].get(&["x"]), None);
        assert_eq!(rows[1], RawRow::new());
        assert!(rows_from_json(&json!("nope")).is_none());
    }

    #[test]
    fn test_render_uses_table_lengths() {
        let mut table = ProteinTable::default();
        table.insert(
            "A",
            TableEntry {
                length: Some(50),
                ..TableEntry::default()
            },
        );
        table.insert(
            "B",
            TableEntry {
                length: Some(150),
                ..TableEntry::default()
            },
        );
        let plot = ChordPlot::new(ProteinTableCache::new(StaticTableSource(table)));
        plot.render(&rows(), "main", &ChordConfig::default());
        let content = plot.surface("main").content().unwrap();
        let scene = content.scene().unwrap();
        assert!((scene.arcs[0].end - scene.arcs[0].start - 89.0).abs() < 1e-9);
        assert!(plot.cache().is_cached());
    }

    /// Blocks the first fetch until released.
    struct GatedSource {
        entered: Mutex<Sender<()>>,
        release: Mutex<Receiver<()>>,
        gated: Mutex<bool>,
    }

    impl TableSource for GatedSource {
        fn fetch(&self) -> Result<ProteinTable, TableError> {
            let mut gated = self.gated.lock().unwrap();
            if *gated {
                *gated = false;
                drop(gated);
                self.entered.lock().unwrap().send(()).unwrap();
                self.release.lock().unwrap().recv().unwrap();
            }
            Ok(ProteinTable::default())
        }

        fn describe(&self) -> String {
            "gated".to_string()
        }
    }

    #[test]
    fn test_stale_render_does_not_clobber_newer() {
        let (entered_tx, entered_rx) = channel();
        let (release_tx, release_rx) = channel();
        let plot = Arc::new(ChordPlot::new(ProteinTableCache::new(GatedSource {
            entered: Mutex::new(entered_tx),
            release: Mutex::new(release_rx),
            gated: Mutex::new(true),
        })));

        let slow = {
            let plot = plot.clone();
            std::thread::spawn(move || plot.render(&rows(), "main", &ChordConfig::default()))
        };
        entered_rx.recv().unwrap();
        assert_eq!(plot.surface("main").markup(), LOADING_MESSAGE);

        let fresh = plot.render(&[], "main", &ChordConfig::default());
        assert!(fresh.committed);

        release_tx.send(()).unwrap();
        let stale = slow.join().unwrap();
        assert!(!stale.committed);
        assert_eq!(plot.surface("main").markup(), EMPTY_MESSAGE);
    }
}
