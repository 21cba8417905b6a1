//! C header generator for the embedded firmware image

use ha_switch_shared::HA_SWITCH_LAYOUT;

/// Symbol names and layout of the generated header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderOptions {
    pub guard: String,
    pub array_name: String,
    pub bytes_per_line: usize,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            guard: HA_SWITCH_LAYOUT.header_guard.to_string(),
            array_name: HA_SWITCH_LAYOUT.array_name.to_string(),
            bytes_per_line: HA_SWITCH_LAYOUT.bytes_per_line,
        }
    }
}

/// Render `payload` as a `const uint8_t[]` wrapped in include guards.
///
/// Every data line is indented by four spaces and ends with a comma, including
/// the last one.
pub fn render_header(payload: &[u8], options: &HeaderOptions) -> String {
    let per_line = options.bytes_per_line.max(1);
    let mut output = String::with_capacity(128 + payload.len() * 6);

    output.push_str(&format!("#ifndef {}\n", options.guard));
    output.push_str(&format!("#define {}\n\n", options.guard));
    output.push_str("#include <stdint.h>\n\n");

    output.push_str(&format!("const uint8_t {}[] = {{\n", options.array_name));
    for chunk in payload.chunks(per_line) {
        let line = chunk
            .iter()
            .map(|b| format!("0x{:02x}", b))
            .collect::<Vec<_>>()
            .join(", ");
        output.push_str("    ");
        output.push_str(&line);
        output.push_str(",\n");
    }
    output.push_str("};\n");

    output.push_str("\n#endif\n");
    output
}

/// Parse the array entries back out of a generated header
pub fn parse_header_bytes(header: &str) -> Vec<u8> {
    header
        .lines()
        .filter(|line| line.starts_with("    0x"))
        .flat_map(|line| line.split(','))
        .filter_map(|entry| {
            let entry = entry.trim();
            entry
                .strip_prefix("0x")
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
        })
        .collect()
}
