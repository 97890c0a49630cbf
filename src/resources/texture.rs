use std::path::Path;

use crate::data_structures::texture;

/// Read a text asset from the assets directory.
pub fn load_string(file_name: &str) -> anyhow::Result<String> {
    let path = Path::new("./").join("assets").join(file_name);
    let txt = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("reading {}: {}", path.display(), e))?;
    Ok(txt)
}

/// Read a binary asset from the assets directory.
pub fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = Path::new("./").join("assets").join(file_name);
    let data = std::fs::read(&path)
        .map_err(|e| anyhow::anyhow!("reading {}: {}", path.display(), e))?;
    Ok(data)
}

/// Load an image asset and upload it as an sRGB base color texture.
pub fn load_texture(
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<texture::Texture> {
    let start = instant::Instant::now();
    let data = load_binary(file_name)?;
    let loaded = texture::Texture::from_bytes(device, queue, &data, file_name, None)?;
    log::info!("loaded {} in {:?}", file_name, start.elapsed());
    Ok(loaded)
}
