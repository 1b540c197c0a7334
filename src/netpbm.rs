//! Binary netpbm decoding and encoding.
//!
//! Supports the raw variants only: P6 (truecolor, max 255), P5 (grayscale,
//! max 1..=65535, 16-bit big-endian samples above 255) and P4 (bilevel,
//! 8 pixels per byte, MSB first, rows padded to a byte).

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use halftone_core::{BilevelImage, GrayscaleImage, ThresholdMap, TrueColorImage, MAX_COLOR};

use crate::error::CodecError;

/// An image type with a netpbm representation.
pub trait NetpbmFormat: Sized {
    /// Magic number at the start of the file.
    const MAGIC: &'static str;
    /// Conventional file extension.
    const EXTENSION: &'static str;

    fn decode<R: BufRead>(reader: &mut R) -> Result<Self, CodecError>;

    fn encode<W: Write>(&self, writer: &mut W) -> Result<(), CodecError>;
}

/// Read an image from `path`.
pub fn load<T: NetpbmFormat>(path: &Path) -> Result<T, CodecError> {
    let mut reader = BufReader::new(File::open(path)?);
    let image = T::decode(&mut reader)?;
    tracing::debug!(path = %path.display(), format = T::MAGIC, "decoded");
    Ok(image)
}

/// Write an image to `path`, replacing any existing file.
pub fn save<T: NetpbmFormat>(image: &T, path: &Path) -> Result<(), CodecError> {
    let mut writer = BufWriter::new(File::create(path)?);
    image.encode(&mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Load a P5 texture and normalize it into a threshold map.
pub fn load_threshold_map(path: &Path) -> Result<ThresholdMap, CodecError> {
    let texture: GrayscaleImage = load(path)?;
    Ok(ThresholdMap::from_grayscale(&texture)?)
}

fn next_byte<R: BufRead>(reader: &mut R) -> Result<Option<u8>, CodecError> {
    let byte = reader.fill_buf()?.first().copied();
    if byte.is_some() {
        reader.consume(1);
    }
    Ok(byte)
}

/// Read one whitespace-delimited header token.
///
/// Leading whitespace and `#` comments are skipped. Exactly one whitespace
/// byte after the token is consumed, which is where raster data starts
/// after the final header field.
fn read_token<R: BufRead>(reader: &mut R) -> Result<String, CodecError> {
    let mut token = Vec::new();
    loop {
        match next_byte(reader)? {
            None if token.is_empty() => {
                return Err(CodecError::BadHeader("unexpected end of header".into()))
            }
            None => break,
            Some(b'#') if token.is_empty() => {
                while !matches!(next_byte(reader)?, None | Some(b'\n') | Some(b'\r')) {}
            }
            Some(b) if b.is_ascii_whitespace() => {
                if !token.is_empty() {
                    break;
                }
            }
            Some(b) => token.push(b),
        }
    }
    String::from_utf8(token).map_err(|_| CodecError::BadHeader("non-ASCII header token".into()))
}

fn read_number<R: BufRead>(reader: &mut R, field: &str) -> Result<u32, CodecError> {
    let token = read_token(reader)?;
    token
        .parse()
        .map_err(|_| CodecError::BadHeader(format!("invalid {field}: {token:?}")))
}

fn read_magic<R: BufRead>(reader: &mut R, expected: &'static str) -> Result<(), CodecError> {
    let found = read_token(reader)?;
    if found != expected {
        return Err(CodecError::BadMagic { expected, found });
    }
    Ok(())
}

fn read_dimensions<R: BufRead>(reader: &mut R) -> Result<(usize, usize), CodecError> {
    let width = read_number(reader, "width")? as usize;
    let height = read_number(reader, "height")? as usize;
    Ok((width, height))
}

fn raster_len(width: usize, height: usize, bytes_per_row: usize) -> Result<usize, CodecError> {
    height
        .checked_mul(bytes_per_row)
        .ok_or_else(|| CodecError::BadHeader(format!("dimensions too large: {width}x{height}")))
}

/// Read exactly `len` raster bytes without trusting the header for the
/// allocation size.
fn read_raster<R: BufRead>(reader: &mut R, len: usize) -> Result<Vec<u8>, CodecError> {
    let mut data = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut data)?;
    if data.len() != len {
        return Err(CodecError::Truncated {
            expected: len,
            actual: data.len(),
        });
    }
    Ok(data)
}

fn write_header<W: Write>(
    writer: &mut W,
    magic: &str,
    width: usize,
    height: usize,
    max: Option<u16>,
) -> Result<(), CodecError> {
    write!(writer, "{magic}\n{width}\n{height}\n")?;
    if let Some(max) = max {
        writeln!(writer, "{max}")?;
    }
    Ok(())
}

impl NetpbmFormat for TrueColorImage {
    const MAGIC: &'static str = "P6";
    const EXTENSION: &'static str = "ppm";

    fn decode<R: BufRead>(reader: &mut R) -> Result<Self, CodecError> {
        read_magic(reader, Self::MAGIC)?;
        let (width, height) = read_dimensions(reader)?;
        let max = read_number(reader, "max color")?;
        if max != MAX_COLOR as u32 {
            return Err(CodecError::UnsupportedMaxValue {
                value: max,
                allowed: "255",
            });
        }
        let row = width
            .checked_mul(3)
            .ok_or_else(|| CodecError::BadHeader(format!("width too large: {width}")))?;
        let data = read_raster(reader, raster_len(width, height, row)?)?;
        Ok(TrueColorImage::from_bytes(width, height, &data)?)
    }

    fn encode<W: Write>(&self, writer: &mut W) -> Result<(), CodecError> {
        write_header(writer, Self::MAGIC, self.width(), self.height(), Some(MAX_COLOR))?;
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }
}

impl NetpbmFormat for GrayscaleImage {
    const MAGIC: &'static str = "P5";
    const EXTENSION: &'static str = "pgm";

    fn decode<R: BufRead>(reader: &mut R) -> Result<Self, CodecError> {
        read_magic(reader, Self::MAGIC)?;
        let (width, height) = read_dimensions(reader)?;
        let max = read_number(reader, "max gray")?;
        if !(1..=u16::MAX as u32).contains(&max) {
            return Err(CodecError::UnsupportedMaxValue {
                value: max,
                allowed: "1..=65535",
            });
        }
        let max = max as u16;
        let sample_bytes = if max > 255 { 2 } else { 1 };
        let row = width
            .checked_mul(sample_bytes)
            .ok_or_else(|| CodecError::BadHeader(format!("width too large: {width}")))?;
        let data = read_raster(reader, raster_len(width, height, row)?)?;

        let samples: Vec<u16> = if sample_bytes == 2 {
            data.chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect()
        } else {
            data.iter().map(|&b| b as u16).collect()
        };
        Ok(GrayscaleImage::from_samples(width, height, max, &samples)?)
    }

    fn encode<W: Write>(&self, writer: &mut W) -> Result<(), CodecError> {
        write_header(writer, Self::MAGIC, self.width(), self.height(), Some(self.max_gray()))?;
        if self.is_wide() {
            let bytes: Vec<u8> = self.iter().flat_map(u16::to_be_bytes).collect();
            writer.write_all(&bytes)?;
        } else {
            let bytes: Vec<u8> = self.iter().map(|s| s as u8).collect();
            writer.write_all(&bytes)?;
        }
        Ok(())
    }
}

impl NetpbmFormat for BilevelImage {
    const MAGIC: &'static str = "P4";
    const EXTENSION: &'static str = "pbm";

    fn decode<R: BufRead>(reader: &mut R) -> Result<Self, CodecError> {
        read_magic(reader, Self::MAGIC)?;
        let (width, height) = read_dimensions(reader)?;
        let row_bytes = width.div_ceil(8);
        let data = read_raster(reader, raster_len(width, height, row_bytes)?)?;

        let mut bits = Vec::with_capacity(width * height);
        for row in data.chunks_exact(row_bytes.max(1)).take(height) {
            bits.extend((0..width).map(|x| (row[x / 8] >> (7 - x % 8)) & 1));
        }
        Ok(BilevelImage::from_bits(width, height, bits)?)
    }

    fn encode<W: Write>(&self, writer: &mut W) -> Result<(), CodecError> {
        let width = self.width();
        write_header(writer, Self::MAGIC, width, self.height(), None)?;
        let row_bytes = width.div_ceil(8);
        let mut packed = vec![0u8; row_bytes * self.height()];
        for (row, out) in self.bits().chunks_exact(width).zip(packed.chunks_exact_mut(row_bytes)) {
            for (x, &bit) in row.iter().enumerate() {
                out[x / 8] |= bit << (7 - x % 8);
            }
        }
        writer.write_all(&packed)?;
        Ok(())
    }
}
