/// Description DXGI reports for its built-in software rasterizer.
pub const BASIC_RENDER_DRIVER: &str = "Microsoft Basic Render Driver";

/// Decodes the NUL-padded UTF-16 `Description` field of an adapter desc.
pub fn adapter_name(description: &[u16]) -> String {
    let len = description
        .iter()
        .position(|&c| c == 0)
        .unwrap_or(description.len());
    String::from_utf16_lossy(&description[..len])
}

pub fn is_basic_render_driver(name: &str) -> bool {
    name.trim() == BASIC_RENDER_DRIVER
}

#[cfg(test)]
mod tests {
    use super::*;

    fn description(name: &str) -> [u16; 128] {
        let mut field = [0u16; 128];
        for (slot, unit) in field.iter_mut().zip(name.encode_utf16()) {
            *slot = unit;
        }
        field
    }

    #[test]
    fn name_stops_at_nul() {
        assert_eq!(
            adapter_name(&description("NVIDIA GeForce RTX 4070")),
            "NVIDIA GeForce RTX 4070"
        );
        assert_eq!(adapter_name(&[]), "");
    }

    #[test]
    fn only_the_software_rasterizer_is_skipped() {
        assert!(is_basic_render_driver(&adapter_name(&description(
            BASIC_RENDER_DRIVER
        ))));
        assert!(!is_basic_render_driver("AMD Radeon(TM) Graphics"));
        assert!(!is_basic_render_driver("Microsoft Basic Display Adapter"));
    }
}
