use std::io::{BufReader, Cursor};

use crate::data_structures::model;

/**
 * This module contains all logic for loading meshes and textures from
 * external files.
 */
pub mod mesh;
pub mod texture;

/// Import an OBJ file from the assets directory as a GPU model.
///
/// Geometry is triangulated and re-indexed to a single index stream. MTL
/// materials referenced by the file are parsed but not used: surface
/// parameters and textures come from the scene's own materials.
pub fn load_model_obj(file_name: &str, device: &wgpu::Device) -> anyhow::Result<model::Model> {
    let start = instant::Instant::now();

    let obj_text = texture::load_string(file_name)?;
    let obj_cursor = Cursor::new(obj_text);
    let mut obj_reader = BufReader::new(obj_cursor);

    let (models, _materials) = tobj::load_obj_buf(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |p| {
            let mat_text = texture::load_string(&p.to_string_lossy())
                .map_err(|_| tobj::LoadError::OpenFileFailed)?;
            tobj::load_mtl_buf(&mut BufReader::new(Cursor::new(mat_text)))
        },
    )?;

    let meshes = mesh::load_meshes(&models, file_name, device);
    log::info!(
        "loaded {} ({} sub-meshes) in {:?}",
        file_name,
        meshes.len(),
        start.elapsed()
    );

    Ok(model::Model { meshes })
}
