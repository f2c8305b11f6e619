//! Graphics capability queries consulted while loading textures.

/// Capability set of the runtime graphics device.
///
/// The texture reader consults these before allocating a resource:
/// a missing capability truncates mip chains or rewrites the stored
/// format to one the device can sample, with a software conversion pass
/// over every kept level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphicsCapabilities {
    /// Device samples non-power-of-two textures with full mip chains.
    pub supports_non_power_of_two: bool,
    /// Device samples DXT1 compressed textures directly.
    pub supports_dxt1: bool,
    /// Device samples DXT3/DXT5 compressed textures directly.
    pub supports_s3tc: bool,
}

impl GraphicsCapabilities {
    /// Every capability present. What a desktop device reports.
    pub const FULL: GraphicsCapabilities = GraphicsCapabilities {
        supports_non_power_of_two: true,
        supports_dxt1: true,
        supports_s3tc: true,
    };

    /// No optional capability present. The reader's worst case.
    pub const MINIMAL: GraphicsCapabilities = GraphicsCapabilities {
        supports_non_power_of_two: false,
        supports_dxt1: false,
        supports_s3tc: false,
    };
}
