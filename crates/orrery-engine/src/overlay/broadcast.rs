use glam::{Vec2, Vec3};
use serde::Serialize;
use crate::api::types::EntityId;
use crate::celestial::description::Description;

/// Shared "what hover text to show, and where" state.
///
/// Last writer wins, keyed by publisher: a body can only clear the
/// description it published itself, so a late leave from a body the
/// pointer already moved off cannot wipe its successor's description.
#[derive(Debug, Default)]
pub struct HoverBroadcast {
    current: Option<(EntityId, Description)>,
    pointer: Vec2,
}

impl HoverBroadcast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `description` on behalf of `owner`. Returns true if the overlay changed.
    pub fn publish(&mut self, owner: EntityId, description: &Description) -> bool {
        if let Some((current_owner, current)) = &self.current {
            if *current_owner == owner && current == description {
                return false;
            }
        }
        self.current = Some((owner, description.clone()));
        true
    }

    /// Clear the description if `owner` still holds it. Stale clears are ignored.
    pub fn clear(&mut self, owner: EntityId) -> bool {
        match &self.current {
            Some((current_owner, _)) if *current_owner == owner => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Track the cursor. Updated on every move, hovered or not.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    pub fn description(&self) -> Option<&Description> {
        self.current.as_ref().map(|(_, d)| d)
    }

    /// Entity whose description is showing.
    pub fn owner(&self) -> Option<EntityId> {
        self.current.as_ref().map(|(id, _)| *id)
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Snapshot for the 2D overlay renderer.
    pub fn project(&self, flyby_active: bool, label: Option<AnchorLabel>) -> OverlayProjection {
        OverlayProjection {
            description: self.description().cloned(),
            pointer: self.pointer.to_array(),
            flyby_active,
            label,
        }
    }
}

/// Fixed caption that follows one body around its orbit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorLabel {
    /// World-space point the caption is pinned to.
    pub anchor: [f32; 3],
    /// World-space end of the leader line drawn from the body centre.
    pub line_end: [f32; 3],
    pub text: String,
    /// Drawn highlighted (red) while set.
    pub alert: bool,
}

impl AnchorLabel {
    /// Caption pinned above-right of a body of `body_radius` at `center`.
    pub fn beside(center: Vec3, body_radius: f32, text: impl Into<String>, alert: bool) -> Self {
        let offset = body_radius + 0.5;
        // leader line stops just short of the caption box
        let line = offset - 0.3;
        Self {
            anchor: (center + Vec3::new(offset, offset, 0.0)).to_array(),
            line_end: (center + Vec3::new(line, line, 0.0)).to_array(),
            text: text.into(),
            alert,
        }
    }
}

/// Read-only projection consumed by the 2D overlay each frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayProjection {
    pub description: Option<Description>,
    pub pointer: [f32; 2],
    pub flyby_active: bool,
    pub label: Option<AnchorLabel>,
}

impl OverlayProjection {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(title: &str) -> Description {
        Description::new(title, "s", "d", "m", "f").unwrap()
    }

    #[test]
    fn publish_then_clear() {
        let mut hb = HoverBroadcast::new();
        assert!(hb.publish(EntityId(1), &desc("Mars")));
        assert_eq!(hb.description().unwrap().title, "Mars");
        assert!(hb.clear(EntityId(1)));
        assert!(hb.description().is_none());
    }

    #[test]
    fn stale_clear_is_ignored() {
        let mut hb = HoverBroadcast::new();
        hb.publish(EntityId(1), &desc("Mars"));
        hb.publish(EntityId(2), &desc("Earth"));
        // Mars' leave arrives after Earth took over
        assert!(!hb.clear(EntityId(1)));
        assert_eq!(hb.description().unwrap().title, "Earth");
        assert_eq!(hb.owner(), Some(EntityId(2)));
    }

    #[test]
    fn republish_is_idempotent() {
        let mut hb = HoverBroadcast::new();
        assert!(hb.publish(EntityId(1), &desc("Sun")));
        assert!(!hb.publish(EntityId(1), &desc("Sun")));
    }

    #[test]
    fn pointer_tracks_without_hover() {
        let mut hb = HoverBroadcast::new();
        hb.set_pointer(120.0, 45.0);
        let p = hb.project(false, None);
        assert_eq!(p.pointer, [120.0, 45.0]);
        assert!(p.description.is_none());
    }

    #[test]
    fn label_offsets_from_body() {
        let label = AnchorLabel::beside(Vec3::new(16.0, 0.0, 0.0), 1.0, "I live here!", false);
        assert_eq!(label.anchor, [17.5, 1.5, 0.0]);
        assert!((label.line_end[0] - 17.2).abs() < 1e-5);
    }

    #[test]
    fn projection_json_shape() {
        let mut hb = HoverBroadcast::new();
        hb.publish(EntityId(4), &desc("Saturn"));
        let json = hb.project(true, None).to_json().unwrap();
        assert!(json.contains("\"flybyActive\":true"));
        assert!(json.contains("\"title\":\"Saturn\""));
        assert!(json.contains("\"label\":null"));
    }
}
