//! Threaded glTF model provider.
//!
//! Loads run on background threads and report back over a channel; the
//! simulation polls once per frame and substitutes a placeholder body for
//! any character whose load failed. The start gate stays closed until every
//! requested model has resolved one way or the other.

use glam::Mat4;
use renderer::{MeshData, Vertex};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to import model: {0}")]
    Import(#[from] gltf::Error),
    #[error("primitive in mesh {0:?} has no positions")]
    MissingPositions(Option<String>),
    #[error("file contains no mesh data")]
    Empty,
}

/// A resolved load: the requested id plus mesh data or the failure.
pub struct LoadedModel {
    pub id: String,
    pub result: Result<MeshData, ModelError>,
}

/// Hands model load requests to worker threads and collects the results.
pub struct ModelProvider {
    tx: Sender<LoadedModel>,
    rx: Receiver<LoadedModel>,
    pending: usize,
    resolved: usize,
    total: usize,
}

impl ModelProvider {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            tx,
            rx,
            pending: 0,
            resolved: 0,
            total: 0,
        }
    }

    /// Begin loading `path` on a worker thread. The result arrives through
    /// `poll` under the given id.
    pub fn request(&mut self, id: impl Into<String>, path: PathBuf) {
        let id = id.into();
        self.pending += 1;
        self.total += 1;
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = load_gltf_mesh(&path);
            // The receiver dropping just means shutdown mid-load.
            let _ = tx.send(LoadedModel { id, result });
        });
    }

    /// Drain every result that has arrived since the last poll.
    pub fn poll(&mut self) -> Vec<LoadedModel> {
        let mut done = Vec::new();
        while let Ok(loaded) = self.rx.try_recv() {
            self.pending = self.pending.saturating_sub(1);
            self.resolved += 1;
            if let Err(err) = &loaded.result {
                log::warn!("model {:?} failed to load: {err}", loaded.id);
            }
            done.push(loaded);
        }
        done
    }

    /// Whether every requested load has reported back.
    pub fn all_resolved(&self) -> bool {
        self.pending == 0
    }

    pub fn resolved(&self) -> usize {
        self.resolved
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Load progress in [0, 1]; 1 when nothing was requested.
    pub fn progress(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.resolved as f32 / self.total as f32
        }
    }
}

impl Default for ModelProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Synchronously import a glTF file, flattening every scene node into one
/// mesh with node transforms applied.
pub fn load_gltf_mesh(path: &Path) -> Result<MeshData, ModelError> {
    let (document, buffers, _images) = gltf::import(path)?;
    let mut data = MeshData::new();
    for scene in document.scenes() {
        for node in scene.nodes() {
            append_node(&node, Mat4::IDENTITY, &buffers, &mut data)?;
        }
    }
    if data.vertices.is_empty() {
        return Err(ModelError::Empty);
    }
    log::debug!(
        "imported {:?}: {} vertices, {} indices",
        path,
        data.vertices.len(),
        data.indices.len()
    );
    Ok(data)
}

fn append_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut MeshData,
) -> Result<(), ModelError> {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            let reader =
                primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));
            let Some(positions) = reader.read_positions() else {
                return Err(ModelError::MissingPositions(
                    mesh.name().map(str::to_owned),
                ));
            };
            let positions: Vec<[f32; 3]> = positions.collect();
            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .map(|n| n.collect())
                .unwrap_or_default();
            let uvs: Vec<[f32; 2]> = reader
                .read_tex_coords(0)
                .map(|t| t.into_f32().collect())
                .unwrap_or_default();
            let base_color = primitive
                .material()
                .pbr_metallic_roughness()
                .base_color_factor();

            let base = out.vertices.len() as u32;
            for (i, position) in positions.iter().enumerate() {
                let world_pos = world.transform_point3((*position).into());
                let normal = normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]);
                let world_normal = world
                    .transform_vector3(normal.into())
                    .normalize_or_zero();
                let uv = uvs.get(i).copied().unwrap_or([0.0, 0.0]);
                out.vertices.push(Vertex::with_color(
                    world_pos.to_array(),
                    world_normal.to_array(),
                    uv,
                    base_color,
                ));
            }
            match reader.read_indices() {
                Some(indices) => out.indices.extend(indices.into_u32().map(|i| base + i)),
                None => out.indices.extend(base..base + positions.len() as u32),
            }
        }
    }

    for child in node.children() {
        append_node(&child, world, buffers, out)?;
    }
    Ok(())
}
