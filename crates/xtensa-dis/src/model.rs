use anyhow::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Segment {
    pub name: String,
    pub base: u32,
    pub bytes: Vec<u8>,
    pub perms: &'static str, // e.g., "r-x"
    pub kind: &'static str,  // e.g., "raw"
}

#[derive(Debug, Clone)]
pub struct Image {
    pub segments: Vec<Segment>,
}

pub fn load_raw_bin(path: &Path, base: u32, skip: usize, len: Option<usize>) -> Result<Image> {
    let file = std::fs::read(path)?;
    anyhow::ensure!(skip <= file.len(), "--skip exceeds file size");
    let mut payload = &file[skip..];
    if let Some(lim) = len {
        anyhow::ensure!(lim <= payload.len(), "--len exceeds remaining file size after skip");
        payload = &payload[..lim];
    }
    let seg = Segment { name: "segment0".into(), base, bytes: payload.to_vec(), perms: "r-x", kind: "raw" };
    Ok(Image { segments: vec![seg] })
}

pub fn read_u8(img: &Image, addr: u32) -> Option<u8> {
    for s in &img.segments {
        let start = s.base;
        let end = s.base.wrapping_add(s.bytes.len() as u32);
        if addr >= start && addr < end {
            let off = (addr - start) as usize;
            return Some(s.bytes[off]);
        }
    }
    None
}

/// Read up to `max` consecutive mapped bytes starting at `addr`: the decode
/// window. Stops at the first unmapped address.
pub fn read_window(img: &Image, addr: u32, max: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(max);
    for i in 0..max {
        match read_u8(img, addr.wrapping_add(i as u32)) {
            Some(b) => out.push(b),
            None => break,
        }
    }
    out
}

pub fn is_mapped(img: &Image, addr: u32) -> bool {
    img.segments.iter().any(|s| {
        let start = s.base;
        let end = s.base.wrapping_add(s.bytes.len() as u32);
        addr >= start && addr < end
    })
}
