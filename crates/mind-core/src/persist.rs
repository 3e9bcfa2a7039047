//! `.mind` file codec.
//!
//! A file is the 4-byte magic `MIND` followed by a MessagePack record:
//!
//! ```text
//! roots:    [u32]              positions into `nodes`
//! nodes:    [NodeRecord]       arena order
//! selected: Option<u32>
//! pan:      { dx, dy }
//! ```
//!
//! Links are written as position lists on both ends. The loader rebuilds the
//! edges from `children` and requires every `parents` list to agree; it never
//! papers over an asymmetric file. Decoding always targets a fresh map, so a
//! failed load leaves whatever the caller currently holds untouched.

use crate::graph::{Link, MindMap};
use crate::id::NodeId;
use crate::model::{Color, MindNode, Pan};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const MAGIC: &[u8; 4] = b"MIND";

/// Errors from saving or loading a map.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Encode failed: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("Decode failed: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    #[error("Not a mind map file")]
    BadMagic,

    #[error("Corrupt map: {0}")]
    Corrupt(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct MapRecord {
    roots: Vec<u32>,
    nodes: Vec<NodeRecord>,
    selected: Option<u32>,
    pan: Pan,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeRecord {
    x: f32,
    y: f32,
    radius: f32,
    text: String,
    text_color: Color,
    bg_color: Color,
    centered: bool,
    parents: Vec<u32>,
    children: Vec<u32>,
}

/// Serialize a map to bytes.
pub fn encode(map: &MindMap) -> Result<Vec<u8>, PersistError> {
    let positions: HashMap<NodeId, u32> = map
        .node_ids()
        .enumerate()
        .map(|(pos, id)| (id, pos as u32))
        .collect();
    let position = |id: &NodeId| positions[id];

    let nodes = map
        .nodes()
        .map(|(id, node)| NodeRecord {
            x: node.x,
            y: node.y,
            radius: node.radius(),
            text: node.text().to_string(),
            text_color: node.text_color,
            bg_color: node.bg_color,
            centered: node.centered_text,
            parents: map.parents(id).iter().map(position).collect(),
            children: map.children(id).iter().map(position).collect(),
        })
        .collect();

    let record = MapRecord {
        roots: map.roots().iter().map(position).collect(),
        nodes,
        selected: map.selected().as_ref().map(position),
        pan: map.pan,
    };

    let mut out = MAGIC.to_vec();
    out.extend(rmp_serde::to_vec(&record)?);
    Ok(out)
}

/// Deserialize a map from bytes into a new [`MindMap`].
pub fn decode(bytes: &[u8]) -> Result<MindMap, PersistError> {
    let body = bytes.strip_prefix(MAGIC).ok_or(PersistError::BadMagic)?;
    let record: MapRecord = rmp_serde::from_slice(body)?;

    let mut map = MindMap::new();
    let ids: Vec<NodeId> = record
        .nodes
        .iter()
        .map(|n| {
            map.insert_node(MindNode::restore(
                n.x,
                n.y,
                n.radius,
                n.text.clone(),
                n.text_color,
                n.bg_color,
                n.centered,
            ))
        })
        .collect();
    let resolve = |pos: u32| -> Result<NodeId, PersistError> {
        ids.get(pos as usize)
            .copied()
            .ok_or_else(|| PersistError::Corrupt(format!("node reference {pos} out of range")))
    };

    // Edges come from the children lists; ranks follow list positions.
    for (pos, node) in record.nodes.iter().enumerate() {
        let parent = ids[pos];
        for (child_rank, &child_pos) in node.children.iter().enumerate() {
            let child = resolve(child_pos)?;
            if child == parent {
                return Err(PersistError::Corrupt(format!("node {pos} links to itself")));
            }
            if map.has_parent(child, parent) {
                return Err(PersistError::Corrupt(format!(
                    "duplicate link {pos} -> {child_pos}"
                )));
            }
            map.graph.add_edge(
                parent.index(),
                child.index(),
                Link {
                    child_rank: child_rank as u64,
                    parent_rank: 0,
                },
            );
        }
    }

    // Every parents list must mirror the edges exactly.
    for (pos, node) in record.nodes.iter().enumerate() {
        let child = ids[pos];
        let incoming = map
            .graph
            .neighbors_directed(child.index(), petgraph::Direction::Incoming)
            .count();
        if incoming != node.parents.len() {
            return Err(PersistError::Corrupt(format!(
                "node {pos}: parents list does not match children lists"
            )));
        }
        for (parent_rank, &parent_pos) in node.parents.iter().enumerate() {
            let parent = resolve(parent_pos)?;
            let edge = map
                .graph
                .find_edge(parent.index(), child.index())
                .ok_or_else(|| {
                    PersistError::Corrupt(format!(
                        "node {pos} lists parent {parent_pos} which does not list it as a child"
                    ))
                })?;
            map.graph[edge].parent_rank = parent_rank as u64;
        }
    }
    map.next_rank = record
        .nodes
        .iter()
        .map(|n| n.children.len().max(n.parents.len()) as u64)
        .max()
        .unwrap_or(0);

    for &pos in &record.roots {
        let id = resolve(pos)?;
        if !map.parents(id).is_empty() {
            return Err(PersistError::Corrupt(format!("root {pos} has parents")));
        }
        if !map.roots.contains(&id) {
            map.roots.push(id);
        }
    }
    let missing: Vec<NodeId> = map
        .node_ids()
        .filter(|id| !map.roots.contains(id) && map.parents(*id).is_empty())
        .collect();
    if !missing.is_empty() {
        log::warn!("{} parentless node(s) missing from stored roots", missing.len());
        map.roots.extend(missing);
    }

    map.selected = record.selected.map(resolve).transpose()?;
    map.pan = record.pan;
    Ok(map)
}

impl MindMap {
    /// Write the map to `path`.
    ///
    /// Bytes go to a sibling `.tmp` file that is then renamed over `path`, so
    /// a failed write never truncates an existing map.
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        let bytes = encode(self)?;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err(dir))?;
        }
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, &bytes).map_err(io_err(tmp.as_path()))?;
        if let Err(source) = fs::rename(&tmp, path) {
            if let Err(e) = fs::remove_file(&tmp) {
                log::warn!("could not remove {}: {e}", tmp.display());
            }
            return Err(PersistError::Io {
                path: path.to_path_buf(),
                source,
            });
        }

        log::info!("saved {} node(s) to {}", self.len(), path.display());
        Ok(())
    }

    /// Read a map from `path`.
    pub fn load(path: &Path) -> Result<MindMap, PersistError> {
        let bytes = fs::read(path).map_err(io_err(path))?;
        let map = decode(&bytes)?;
        log::info!("loaded {} node(s) from {}", map.len(), path.display());
        Ok(map)
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> PersistError + use<> {
    let path = path.to_path_buf();
    move |source| PersistError::Io { path, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record_bytes(record: &MapRecord) -> Vec<u8> {
        let mut out = MAGIC.to_vec();
        out.extend(rmp_serde::to_vec(record).unwrap());
        out
    }

    fn plain_node(parents: Vec<u32>, children: Vec<u32>) -> NodeRecord {
        NodeRecord {
            x: 0.0,
            y: 0.0,
            radius: 20.0,
            text: "n".into(),
            text_color: Color::BLACK,
            bg_color: Color::NODE_DEFAULT,
            centered: true,
            parents,
            children,
        }
    }

    #[test]
    fn empty_map_roundtrip() {
        let map = MindMap::new();
        let loaded = decode(&encode(&map).unwrap()).unwrap();
        assert!(loaded.is_empty());
        assert!(loaded.roots().is_empty());
        assert_eq!(loaded.selected(), None);
    }

    #[test]
    fn rejects_foreign_bytes() {
        assert!(matches!(decode(b"PNG\0...."), Err(PersistError::BadMagic)));
        assert!(matches!(decode(b"MIND\xc1"), Err(PersistError::Decode(_))));
    }

    #[test]
    fn rejects_asymmetric_links() {
        // 0 lists 1 as child, 1 does not list 0 as parent.
        let record = MapRecord {
            roots: vec![0, 1],
            nodes: vec![plain_node(vec![], vec![1]), plain_node(vec![], vec![])],
            selected: None,
            pan: Pan::default(),
        };
        assert!(matches!(
            decode(&record_bytes(&record)),
            Err(PersistError::Corrupt(_))
        ));

        // 1 claims parent 0, 0 has no children.
        let record = MapRecord {
            roots: vec![0],
            nodes: vec![plain_node(vec![], vec![]), plain_node(vec![0], vec![])],
            selected: None,
            pan: Pan::default(),
        };
        assert!(matches!(
            decode(&record_bytes(&record)),
            Err(PersistError::Corrupt(_))
        ));
    }

    #[test]
    fn rejects_bad_references() {
        let record = MapRecord {
            roots: vec![0],
            nodes: vec![plain_node(vec![], vec![])],
            selected: Some(4),
            pan: Pan::default(),
        };
        assert!(matches!(
            decode(&record_bytes(&record)),
            Err(PersistError::Corrupt(_))
        ));

        let record = MapRecord {
            roots: vec![0],
            nodes: vec![plain_node(vec![0], vec![0])],
            selected: None,
            pan: Pan::default(),
        };
        assert!(matches!(
            decode(&record_bytes(&record)),
            Err(PersistError::Corrupt(_))
        ));
    }

    #[test]
    fn missing_roots_are_restored() {
        let record = MapRecord {
            roots: vec![],
            nodes: vec![plain_node(vec![], vec![1]), plain_node(vec![0], vec![])],
            selected: None,
            pan: Pan::default(),
        };
        let map = decode(&record_bytes(&record)).unwrap();
        assert_eq!(map.roots().len(), 1);
        assert!(map.roots_consistent());
    }

    #[test]
    fn link_order_survives_roundtrip() {
        let mut map = MindMap::new();
        let p1 = map.create_node(0.0, 0.0);
        let p2 = map.create_node(0.0, 0.0);
        let c = map.create_node(0.0, 0.0);
        let d = map.create_node(0.0, 0.0);
        map.add_parent_link(c, p2);
        map.add_parent_link(d, p1);
        map.add_parent_link(c, p1);

        let loaded = decode(&encode(&map).unwrap()).unwrap();
        let ids: Vec<_> = loaded.node_ids().collect();
        assert_eq!(loaded.parents(ids[2]).as_slice(), &[ids[1], ids[0]]);
        assert_eq!(loaded.children(ids[0]).as_slice(), &[ids[3], ids[2]]);

        // New links after load append after the restored ones.
        let mut loaded = loaded;
        let e = loaded.create_node(0.0, 0.0);
        loaded.add_child_link(ids[0], e);
        assert_eq!(loaded.children(ids[0]).as_slice(), &[ids[3], ids[2], e]);
    }
}
