#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 64;
pub const FRAME_COUNT: usize = 10;
/// One packed 64x64 yuv420p picture.
pub const FRAME_SIZE: usize = WIDTH * HEIGHT * 3 / 2;

/**
    Payload of picture `index`: a luma ramp shifted per picture, flat chroma.
*/
pub fn picture(index: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(FRAME_SIZE);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            data.push(((x + y + index * 7) % 256) as u8);
        }
    }
    data.resize(FRAME_SIZE, 128);
    data
}

/**
    Write a YUV4MPEG2 file of `frames` 64x64 yuv420p pictures at 25 fps.
*/
pub fn write_y4m(dir: &Path, name: &str, frames: usize) -> PathBuf {
    let mut bytes = format!("YUV4MPEG2 W{WIDTH} H{HEIGHT} F25:1 Ip A1:1 C420jpeg\n").into_bytes();
    for index in 0..frames {
        bytes.extend_from_slice(b"FRAME\n");
        bytes.extend_from_slice(&picture(index));
    }
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

/**
    Like [`write_y4m`], but picture `bad_index` carries a corrupt frame header,
    so reading fails partway through the file.
*/
pub fn write_y4m_with_bad_frame(dir: &Path, name: &str, frames: usize, bad_index: usize) -> PathBuf {
    let mut bytes = format!("YUV4MPEG2 W{WIDTH} H{HEIGHT} F25:1 Ip A1:1 C420jpeg\n").into_bytes();
    for index in 0..frames {
        let header: &[u8] = if index == bad_index { b"FRAMX\n" } else { b"FRAME\n" };
        bytes.extend_from_slice(header);
        bytes.extend_from_slice(&picture(index));
    }
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

/**
    Write one second of silent 8 kHz mono 16-bit PCM audio as WAV.
*/
pub fn write_wav(dir: &Path, name: &str) -> PathBuf {
    const SAMPLE_RATE: u32 = 8000;
    let samples = vec![0u8; SAMPLE_RATE as usize * 2];

    let mut bytes = Vec::with_capacity(44 + samples.len());
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + samples.len() as u32).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    bytes.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&(samples.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&samples);

    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

/**
    Write a file no demuxer should accept.
*/
pub fn write_garbage(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"this is not a media file\n").unwrap();
    path
}
