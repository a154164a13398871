//! NumPy `.npy` array encoding.
//!
//! Layout: `\x93NUMPY`, major/minor version bytes, a little-endian header
//! length (u16 for v1, u32 for v2/v3), an ASCII Python dict literal with
//! `descr`, `fortran_order` and `shape`, then the raw element bytes.

use {
    crate::error::{NpzError, Result},
    base::{Tensor, tensor::element_count},
};

const MAGIC: &[u8; 6] = b"\x93NUMPY";

/// Header data plus magic and length prefix are padded to this alignment.
const HEADER_ALIGN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Float,
    Int,
    Uint,
}

/// Element type decoded from a `descr` string such as `<f4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dtype {
    pub kind: Kind,
    pub size: usize,
    pub order: ByteOrder,
}

impl Dtype {
    pub fn parse(descr: &str) -> Result<Self> {
        let unsupported = || NpzError::UnsupportedDtype(descr.to_string());
        let mut chars = descr.chars();
        let order = match chars.next().ok_or_else(unsupported)? {
            '<' | '|' | '=' => ByteOrder::Little,
            '>' => ByteOrder::Big,
            _ => return Err(unsupported()),
        };
        let kind = match chars.next().ok_or_else(unsupported)? {
            'f' => Kind::Float,
            'i' => Kind::Int,
            'u' => Kind::Uint,
            _ => return Err(unsupported()),
        };
        let size: usize = chars.as_str().parse().map_err(|_| unsupported())?;
        let supported = match kind {
            Kind::Float => matches!(size, 4 | 8),
            Kind::Int | Kind::Uint => matches!(size, 1 | 2 | 4 | 8),
        };
        if !supported {
            return Err(unsupported());
        }
        Ok(Self { kind, size, order })
    }

    fn decode(&self, bytes: &[u8]) -> f64 {
        macro_rules! read {
            ($ty:ty) => {{
                let mut raw = [0u8; std::mem::size_of::<$ty>()];
                raw.copy_from_slice(bytes);
                match self.order {
                    ByteOrder::Little => <$ty>::from_le_bytes(raw),
                    ByteOrder::Big => <$ty>::from_be_bytes(raw),
                }
            }};
        }
        match (self.kind, self.size) {
            (Kind::Float, 4) => read!(f32) as f64,
            (Kind::Float, 8) => read!(f64),
            (Kind::Int, 1) => read!(i8) as f64,
            (Kind::Int, 2) => read!(i16) as f64,
            (Kind::Int, 4) => read!(i32) as f64,
            (Kind::Int, 8) => read!(i64) as f64,
            (Kind::Uint, 1) => read!(u8) as f64,
            (Kind::Uint, 2) => read!(u16) as f64,
            (Kind::Uint, 4) => read!(u32) as f64,
            (Kind::Uint, 8) => read!(u64) as f64,
            _ => unreachable!("dtype validated in Dtype::parse"),
        }
    }
}

/// Parsed `.npy` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpyHeader {
    pub dtype: Dtype,
    pub fortran_order: bool,
    pub shape: Vec<usize>,
}

/// Returns the text following `'key':` in a header dict literal.
fn value_after<'a>(dict: &'a str, key: &str) -> Result<&'a str> {
    [format!("'{key}'"), format!("\"{key}\"")]
        .iter()
        .find_map(|quoted| dict.find(quoted.as_str()).map(|at| &dict[at + quoted.len()..]))
        .and_then(|rest| rest.trim_start().strip_prefix(':'))
        .map(str::trim_start)
        .ok_or_else(|| NpzError::Header(format!("missing key '{key}'")))
}

fn parse_descr(dict: &str) -> Result<String> {
    let value = value_after(dict, "descr")?;
    let quote = value
        .chars()
        .next()
        .filter(|c| *c == '\'' || *c == '"')
        .ok_or_else(|| NpzError::Header("descr is not a string".to_string()))?;
    let body = &value[1..];
    let end = body
        .find(quote)
        .ok_or_else(|| NpzError::Header("unterminated descr string".to_string()))?;
    Ok(body[..end].to_string())
}

fn parse_fortran_order(dict: &str) -> Result<bool> {
    let value = value_after(dict, "fortran_order")?;
    if value.starts_with("True") {
        Ok(true)
    } else if value.starts_with("False") {
        Ok(false)
    } else {
        Err(NpzError::Header("fortran_order is not a boolean".to_string()))
    }
}

fn parse_shape(dict: &str) -> Result<Vec<usize>> {
    let value = value_after(dict, "shape")?;
    let inner = value
        .strip_prefix('(')
        .and_then(|rest| rest.split_once(')'))
        .map(|(inner, _)| inner)
        .ok_or_else(|| NpzError::Header("shape is not a tuple".to_string()))?;
    inner
        .split(',')
        .map(str::trim)
        .filter(|dim| !dim.is_empty())
        // Python 2 era writers emit `3L`.
        .map(|dim| dim.trim_end_matches('L'))
        .map(|dim| {
            dim.parse::<usize>()
                .map_err(|_| NpzError::Header(format!("invalid dimension '{dim}'")))
        })
        .collect()
}

impl NpyHeader {
    pub fn parse(dict: &str) -> Result<Self> {
        Ok(Self {
            dtype: Dtype::parse(&parse_descr(dict)?)?,
            fortran_order: parse_fortran_order(dict)?,
            shape: parse_shape(dict)?,
        })
    }
}

/// Split raw bytes into the header and the element data.
fn split_header(bytes: &[u8]) -> Result<(NpyHeader, &[u8])> {
    if bytes.len() < MAGIC.len() + 2 || &bytes[..MAGIC.len()] != MAGIC {
        return Err(NpzError::BadMagic);
    }
    let (major, minor) = (bytes[6], bytes[7]);
    let (len_bytes, start) = match major {
        1 => (2, 10),
        2 | 3 => (4, 12),
        _ => return Err(NpzError::UnsupportedVersion(major, minor)),
    };
    if bytes.len() < start {
        return Err(NpzError::Header("truncated header length".to_string()));
    }
    let header_len = bytes[8..8 + len_bytes]
        .iter()
        .rev()
        .fold(0usize, |acc, &b| (acc << 8) | b as usize);
    let end = start
        .checked_add(header_len)
        .filter(|end| *end <= bytes.len())
        .ok_or_else(|| NpzError::Header("header runs past end of data".to_string()))?;
    let dict = std::str::from_utf8(&bytes[start..end])
        .map_err(|_| NpzError::Header("header is not valid text".to_string()))?;
    Ok((NpyHeader::parse(dict)?, &bytes[end..]))
}

/// Reorder column-major data into row-major order.
fn fortran_to_c(shape: &[usize], data: Vec<f64>) -> Vec<f64> {
    if shape.len() < 2 {
        return data;
    }
    let mut out = Vec::with_capacity(data.len());
    let mut index = vec![0usize; shape.len()];
    for _ in 0..data.len() {
        let mut offset = 0;
        let mut stride = 1;
        for (i, dim) in index.iter().zip(shape) {
            offset += i * stride;
            stride *= dim;
        }
        out.push(data[offset]);
        for axis in (0..shape.len()).rev() {
            index[axis] += 1;
            if index[axis] < shape[axis] {
                break;
            }
            index[axis] = 0;
        }
    }
    out
}

/// Decode an `.npy` byte buffer into a row-major `f64` tensor.
pub fn decode(bytes: &[u8]) -> Result<Tensor<f64>> {
    let (header, body) = split_header(bytes)?;
    let count = element_count(&header.shape)
        .ok_or_else(|| NpzError::Header("shape overflows".to_string()))?;
    let expected = count
        .checked_mul(header.dtype.size)
        .ok_or_else(|| NpzError::Header("shape overflows".to_string()))?;
    if body.len() < expected {
        return Err(NpzError::SizeMismatch {
            expected,
            got: body.len(),
        });
    }
    let mut data: Vec<f64> = body[..expected]
        .chunks_exact(header.dtype.size)
        .map(|chunk| header.dtype.decode(chunk))
        .collect();
    if header.fortran_order {
        data = fortran_to_c(&header.shape, data);
    }
    Tensor::new(header.shape, data).map_err(|e| NpzError::Header(e.to_string()))
}

/// Encode a tensor as a version 1.0 `.npy` buffer of little-endian `f64`.
pub fn encode(tensor: &Tensor<f64>) -> Vec<u8> {
    let mut dict = format!(
        "{{'descr': '<f8', 'fortran_order': False, 'shape': {}, }}",
        tensor.shape_string()
    );
    let unpadded = MAGIC.len() + 4 + dict.len() + 1;
    let padding = (HEADER_ALIGN - unpadded % HEADER_ALIGN) % HEADER_ALIGN;
    dict.extend(std::iter::repeat_n(' ', padding));
    dict.push('\n');

    let mut out = Vec::with_capacity(MAGIC.len() + 4 + dict.len() + tensor.data.len() * 8);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&[1, 0]);
    out.extend_from_slice(&(dict.len() as u16).to_le_bytes());
    out.extend_from_slice(dict.as_bytes());
    for value in &tensor.data {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fortran_to_c_2x3() {
        // [[1, 2, 3], [4, 5, 6]] stored column-major
        let data = vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
        assert_eq!(
            fortran_to_c(&[2, 3], data),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
        );
    }

    #[test]
    fn test_value_after_tolerates_spacing() {
        let dict = "{'shape' :  (2,), }";
        assert!(value_after(dict, "shape").unwrap().starts_with("(2,)"));
    }

    #[test]
    fn test_encoded_header_is_aligned() {
        let tensor = Tensor::new(vec![44, 3], vec![0.0; 132]).unwrap();
        let bytes = encode(&tensor);
        let header_len = u16::from_le_bytes([bytes[8], bytes[9]]) as usize;
        assert_eq!((10 + header_len) % HEADER_ALIGN, 0);
        assert_eq!(bytes[10 + header_len - 1], b'\n');
    }
}
