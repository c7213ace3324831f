use widestring::{U16CStr, U16Str};

use crate::error::GrabResult;

/// Decodes a fixed-size UTF-16 device-name field, stopping at the first nul.
pub(super) fn wide_string_to_string(wide_string: &[u16]) -> GrabResult<String> {
    let string = match U16CStr::from_slice_truncate(wide_string) {
        Ok(c_str) => c_str.to_string()?,
        Err(_) => U16Str::from_slice(wide_string).to_string()?,
    };

    Ok(string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_nul() {
        let mut wide: Vec<u16> = r"\\.\DISPLAY1".encode_utf16().collect();
        wide.push(0);
        wide.push(0x4141);

        assert_eq!(wide_string_to_string(&wide).unwrap(), r"\\.\DISPLAY1");
    }

    #[test]
    fn unterminated_field_is_taken_whole() {
        let wide: Vec<u16> = "DISPLAY".encode_utf16().collect();
        assert_eq!(wide_string_to_string(&wide).unwrap(), "DISPLAY");
    }
}
