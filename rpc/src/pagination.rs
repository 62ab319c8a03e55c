//! Cursor-based pagination for list endpoints.
//!
//! Clients pass `?cursor=...&count=...`; the cursor is opaque (a
//! base64-wrapped offset into the id-ordered listing). Store listings are
//! append-ordered and rows are never deleted from under them, so an offset
//! cursor stays stable across pages.

use serde::{Deserialize, Serialize};

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Hard ceiling on a single page.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Query parameters shared by every list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    /// Opaque cursor from a previous response.
    pub cursor: Option<String>,
    /// Requested page size, clamped server-side.
    pub count: Option<u32>,
}

impl PaginationParams {
    /// Resolve the effective page size, clamped to `[1, MAX_PAGE_SIZE]`.
    pub fn effective_count(&self) -> u32 {
        self.count
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Decode the cursor to an offset. An absent or unreadable cursor
    /// starts from the beginning.
    pub fn decode_offset(&self) -> u64 {
        self.cursor
            .as_deref()
            .and_then(decode_cursor)
            .unwrap_or(0)
    }
}

/// Trailer attached to every list response.
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    /// Cursor to pass for the next page, or `None` on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// Slice one page out of an already-filtered listing and build the
/// metadata for fetching the next one.
pub fn paginate<T>(items: Vec<T>, params: &PaginationParams) -> (Vec<T>, PaginationMeta) {
    let offset = params.decode_offset();
    let page_size = params.effective_count();

    let page: Vec<T> = items
        .into_iter()
        .skip(offset as usize)
        .take(page_size as usize)
        .collect();
    let cursor = next_cursor(offset, page.len(), page_size);

    (page, PaginationMeta { cursor })
}

/// Encode an offset into an opaque cursor string.
pub fn encode_cursor(offset: u64) -> String {
    base64_encode(offset.to_string().as_bytes())
}

/// Decode a cursor string back to an offset.
pub fn decode_cursor(cursor: &str) -> Option<u64> {
    let bytes = base64_decode(cursor)?;
    std::str::from_utf8(&bytes).ok()?.parse().ok()
}

/// The cursor for the page after this one, or `None` when a short page
/// shows we have reached the end.
pub fn next_cursor(current_offset: u64, returned: usize, page_size: u32) -> Option<String> {
    if (returned as u32) < page_size {
        None
    } else {
        Some(encode_cursor(current_offset + returned as u64))
    }
}

// Hand-rolled base64, enough for numeric cursors.

const BASE64_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn base64_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(3) * 4);
    for chunk in data.chunks(3) {
        let mut window = [0u8; 3];
        window[..chunk.len()].copy_from_slice(chunk);
        let triple =
            ((window[0] as u32) << 16) | ((window[1] as u32) << 8) | (window[2] as u32);

        out.push(BASE64_CHARS[((triple >> 18) & 0x3F) as usize] as char);
        out.push(BASE64_CHARS[((triple >> 12) & 0x3F) as usize] as char);
        out.push(if chunk.len() > 1 {
            BASE64_CHARS[((triple >> 6) & 0x3F) as usize] as char
        } else {
            '='
        });
        out.push(if chunk.len() > 2 {
            BASE64_CHARS[(triple & 0x3F) as usize] as char
        } else {
            '='
        });
    }
    out
}

fn base64_decode(input: &str) -> Option<Vec<u8>> {
    let digits: Vec<u8> = input
        .bytes()
        .filter(|&b| b != b'=')
        .map(|b| BASE64_CHARS.iter().position(|&c| c == b).map(|i| i as u8))
        .collect::<Option<_>>()?;

    let mut out = Vec::with_capacity(digits.len() * 3 / 4);
    for chunk in digits.chunks(4) {
        let mut accum = 0u32;
        for &d in chunk {
            accum = (accum << 6) | d as u32;
        }
        accum <<= 6 * (4 - chunk.len()) as u32;

        out.push((accum >> 16) as u8);
        if chunk.len() > 2 {
            out.push((accum >> 8) as u8);
        }
        if chunk.len() > 3 {
            out.push(accum as u8);
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_cursor_decodes_to_the_offset_it_encodes() {
        for offset in [0u64, 1, 42, 100, 999, 123_456_789] {
            let encoded = encode_cursor(offset);
            assert_eq!(decode_cursor(&encoded), Some(offset), "offset {offset}");
        }
    }

    #[test]
    fn garbage_cursors_start_from_the_beginning() {
        let params = PaginationParams {
            cursor: Some("!!not base64!!".into()),
            count: None,
        };
        assert_eq!(params.decode_offset(), 0);
    }

    #[test]
    fn effective_count_defaults_and_clamps() {
        let default = PaginationParams::default();
        assert_eq!(default.effective_count(), 100);

        let oversized = PaginationParams {
            cursor: None,
            count: Some(5000),
        };
        assert_eq!(oversized.effective_count(), 1000);

        let zero = PaginationParams {
            cursor: None,
            count: Some(0),
        };
        assert_eq!(zero.effective_count(), 1);
    }

    #[test]
    fn paginate_walks_the_listing_to_the_end() {
        let items: Vec<u32> = (0..5).collect();
        let params = PaginationParams {
            cursor: None,
            count: Some(2),
        };

        let (page, meta) = paginate(items.clone(), &params);
        assert_eq!(page, vec![0, 1]);
        let cursor = meta.cursor.expect("a full page has a next cursor");

        let params = PaginationParams {
            cursor: Some(cursor),
            count: Some(2),
        };
        let (page, meta) = paginate(items.clone(), &params);
        assert_eq!(page, vec![2, 3]);

        let params = PaginationParams {
            cursor: meta.cursor,
            count: Some(2),
        };
        let (page, meta) = paginate(items, &params);
        assert_eq!(page, vec![4]);
        assert!(meta.cursor.is_none(), "short page ends the walk");
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let params = PaginationParams {
            cursor: Some(encode_cursor(10)),
            count: Some(5),
        };
        let (page, meta) = paginate(vec![1u32, 2, 3], &params);
        assert!(page.is_empty());
        assert!(meta.cursor.is_none());
    }
}
