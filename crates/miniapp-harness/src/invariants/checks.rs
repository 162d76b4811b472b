//! Standard App invariants.

use std::collections::HashSet;

use miniapp_app::SAVED_INDICATOR_MS;
use miniapp_core::{MAX_TAGS, MIN_LAYOUT_TOP};

use super::{AppSnapshot, Invariant, InvariantResult, Violation};

/// No tag list holds more than [`MAX_TAGS`] entries.
pub struct TagCapacity;

impl Invariant for TagCapacity {
    fn name(&self) -> &'static str {
        "tag_capacity"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        for list in &state.tag_lists {
            if list.tags.len() > MAX_TAGS {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("{} holds {} tags (max {MAX_TAGS})", list.label, list.tags.len()),
                });
            }
        }
        Ok(())
    }
}

/// Tags are unique, trimmed and non-empty within a list.
pub struct TagUniqueness;

impl Invariant for TagUniqueness {
    fn name(&self) -> &'static str {
        "tag_uniqueness"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        for list in &state.tag_lists {
            let mut seen = HashSet::new();
            for tag in &list.tags {
                if tag.is_empty() || tag.trim() != tag {
                    return Err(Violation {
                        invariant: self.name(),
                        message: format!("{} contains untrimmed tag {tag:?}", list.label),
                    });
                }
                if !seen.insert(tag.as_str()) {
                    return Err(Violation {
                        invariant: self.name(),
                        message: format!("{} contains {tag:?} twice", list.label),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Layout top is the merged top clamped to [`MIN_LAYOUT_TOP`].
pub struct LayoutTopFloor;

impl Invariant for LayoutTopFloor {
    fn name(&self) -> &'static str {
        "layout_top_floor"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        let area = state.safe_area;
        let expected = area.content_top.max(MIN_LAYOUT_TOP);

        if area.layout_top < MIN_LAYOUT_TOP || area.layout_top != expected {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "layout_top {} does not match content_top {} clamped to {MIN_LAYOUT_TOP}",
                    area.layout_top, area.content_top
                ),
            });
        }

        let insets = area.insets;
        if [insets.top, insets.right, insets.bottom, insets.left].iter().any(|v| *v < 0.0) {
            return Err(Violation {
                invariant: self.name(),
                message: format!("negative inset in {insets:?}"),
            });
        }
        Ok(())
    }
}

/// The "saved" indicator expires within [`SAVED_INDICATOR_MS`].
pub struct SavedIndicatorDeadline;

impl Invariant for SavedIndicatorDeadline {
    fn name(&self) -> &'static str {
        "saved_indicator_deadline"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        match state.saved_until {
            Some(until) if until <= state.now_ms => Err(Violation {
                invariant: self.name(),
                message: format!("indicator still shown at {} after deadline {until}", state.now_ms),
            }),
            Some(until) if until > state.now_ms + SAVED_INDICATOR_MS => Err(Violation {
                invariant: self.name(),
                message: format!("deadline {until} more than {SAVED_INDICATOR_MS}ms ahead"),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use miniapp_core::{SafeArea, SafeAreaInsets};

    use super::*;
    use crate::invariants::TagSnapshot;

    fn tags(label: &'static str, tags: &[&str]) -> TagSnapshot {
        TagSnapshot { label, tags: tags.iter().map(|t| (*t).to_string()).collect() }
    }

    #[test]
    fn six_tags_violate_capacity() {
        let state = AppSnapshot {
            tag_lists: vec![tags("Hobbies", &["a", "b", "c", "d", "e", "f"])],
            ..AppSnapshot::default()
        };
        assert!(TagCapacity.check(&state).is_err());
    }

    #[test]
    fn duplicate_and_untrimmed_tags_detected() {
        let dup = AppSnapshot {
            tag_lists: vec![tags("Interests", &["go", "go"])],
            ..AppSnapshot::default()
        };
        assert!(TagUniqueness.check(&dup).is_err());

        let untrimmed =
            AppSnapshot { tag_lists: vec![tags("Hobbies", &[" go"])], ..AppSnapshot::default() };
        assert!(TagUniqueness.check(&untrimmed).is_err());
    }

    #[test]
    fn layout_top_must_be_clamped() {
        let mut area = SafeArea::from_insets(SafeAreaInsets::default());
        let ok = AppSnapshot { safe_area: area, ..AppSnapshot::default() };
        assert!(LayoutTopFloor.check(&ok).is_ok());

        area.layout_top = 10.0;
        let bad = AppSnapshot { safe_area: area, ..AppSnapshot::default() };
        assert!(LayoutTopFloor.check(&bad).is_err());
    }

    #[test]
    fn stale_saved_indicator_detected() {
        let live = AppSnapshot { now_ms: 100, saved_until: Some(2100), ..AppSnapshot::default() };
        assert!(SavedIndicatorDeadline.check(&live).is_ok());

        let stale = AppSnapshot { now_ms: 2100, saved_until: Some(2100), ..AppSnapshot::default() };
        assert!(SavedIndicatorDeadline.check(&stale).is_err());
    }
}
