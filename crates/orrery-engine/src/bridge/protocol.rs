//! SharedArrayBuffer layout.
//! Must stay in sync with TypeScript `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 8 floats]
//! [Nodes: max_nodes × 16 floats]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Capacities are written once into the header at init.
//! TypeScript reads them from the header to compute offsets dynamically.
//! The overlay projection travels separately as JSON.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::instance::NodeInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices. Slot 0 is reserved for the host's lock word.
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_MAX_NODES: usize = 3;
pub const HEADER_NODE_COUNT: usize = 4;
pub const HEADER_MAX_EVENTS: usize = 5;
pub const HEADER_EVENT_COUNT: usize = 6;
pub const HEADER_ELAPSED: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per node instance (wire format).
pub const NODE_FLOATS: usize = NodeInstance::FLOATS;

/// Floats per game event: kind, a, b, c (wire format).
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum node instances.
    pub max_nodes: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    /// Size of node data section in floats.
    pub node_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where node data begins.
    pub node_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_nodes: usize, max_events: usize) -> Self {
        let node_data_floats = max_nodes * NODE_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let node_data_offset = HEADER_FLOATS;
        let event_data_offset = node_data_offset + node_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_nodes,
            max_events,
            node_data_floats,
            event_data_floats,
            node_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_nodes, config.max_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let config = GameConfig::default();
        let layout = ProtocolLayout::from_config(&config);

        assert_eq!(layout.max_nodes, config.max_nodes);
        assert_eq!(layout.node_data_floats, config.max_nodes * 16);
        assert_eq!(layout.event_data_floats, config.max_events * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn custom_capacities_compute_correctly() {
        let layout = ProtocolLayout::new(100, 10);
        assert_eq!(layout.node_data_floats, 1600);
        assert_eq!(layout.event_data_floats, 40);
        assert_eq!(layout.buffer_total_floats, HEADER_FLOATS + 1600 + 40);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(64, 16);

        assert_eq!(layout.node_data_offset, HEADER_FLOATS);
        assert_eq!(layout.event_data_offset, layout.node_data_offset + layout.node_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + layout.event_data_floats);
    }
}
