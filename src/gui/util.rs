// gui/util.rs
// Small helpers shared by the GUI components

use crate::adb::parse;

const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Standard base64 with padding, for inlining PNG previews.
pub fn base64_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(3) * 4);
    for chunk in data.chunks(3) {
        let n = chunk
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, &b)| acc | (u32::from(b) << (16 - 8 * i)));
        let sextets = [18, 12, 6, 0].map(|shift| BASE64_ALPHABET[((n >> shift) & 0x3f) as usize] as char);
        // 1 input byte -> 2 chars, 2 -> 3, 3 -> 4
        let keep = chunk.len() + 1;
        for (i, c) in sextets.into_iter().enumerate() {
            out.push(if i < keep { c } else { '=' });
        }
    }
    out
}

pub fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", base64_encode(png))
}

/// Append a line, dropping the oldest ones beyond `cap`.
pub fn push_capped(lines: &mut Vec<String>, line: String, cap: usize) {
    lines.push(line);
    if lines.len() > cap {
        let excess = lines.len() - cap;
        lines.drain(..excess);
    }
}

/// The handful of properties shown above the raw `getprop` dump.
pub fn device_summary(getprop: &str) -> Vec<(&'static str, String)> {
    let props = parse::parse_getprop(getprop);
    [
        ("Model", "ro.product.model"),
        ("Manufacturer", "ro.product.manufacturer"),
        ("Android", "ro.build.version.release"),
        ("SDK", "ro.build.version.sdk"),
        ("Build", "ro.build.display.id"),
    ]
    .into_iter()
    .filter_map(|(label, key)| parse::prop(&props, key).map(|v| (label, v.to_string())))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_padding() {
        assert_eq!(base64_encode(b""), "");
        assert_eq!(base64_encode(b"f"), "Zg==");
        assert_eq!(base64_encode(b"fo"), "Zm8=");
        assert_eq!(base64_encode(b"foo"), "Zm9v");
        assert_eq!(base64_encode(b"foobar"), "Zm9vYmFy");
        assert_eq!(base64_encode(&[0xff, 0xfe]), "//4=");
    }

    #[test]
    fn data_url_prefix() {
        assert_eq!(png_data_url(b"foo"), "data:image/png;base64,Zm9v");
    }

    #[test]
    fn capped_lines_drop_oldest() {
        let mut lines = Vec::new();
        for i in 0..5 {
            push_capped(&mut lines, i.to_string(), 3);
        }
        assert_eq!(lines, vec!["2", "3", "4"]);
    }

    #[test]
    fn summary_picks_known_props() {
        let getprop = "[ro.build.version.sdk]: [34]\n[ro.product.model]: [Pixel 7]\n[persist.sys.locale]: [en-US]\n";
        assert_eq!(
            device_summary(getprop),
            vec![
                ("Model", "Pixel 7".to_string()),
                ("SDK", "34".to_string())
            ]
        );
    }
}
