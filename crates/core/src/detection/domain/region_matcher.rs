use crate::shared::bounding_box::BoundingBox;

/// Which overlap rule paired a skin box with a hair box.
///
/// Rules are tried in declaration order; the first that holds wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchRule {
    SkinContainsHairVertically,
    SkinNestedInHair,
    SkinExtendsPastBottomRight,
    SkinOverlapsHairTopEdge,
}

/// A confirmed face: the skin box plus what it was paired with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceMatch {
    pub skin_index: usize,
    pub hair_index: usize,
    pub rule: MatchRule,
    pub face: BoundingBox,
}

/// Skin starts at or right of and at or below the hair box, and reaches at
/// least as far down.
fn skin_contains_hair_vertically(skin: &BoundingBox, hair: &BoundingBox) -> bool {
    skin.x >= hair.x && skin.y >= hair.y && skin.bottom() >= hair.bottom()
}

/// Skin starts inside the hair box and does not pass its right edge.
fn skin_nested_in_hair(skin: &BoundingBox, hair: &BoundingBox) -> bool {
    skin.x >= hair.x && skin.y >= hair.y && skin.right() <= hair.right()
}

/// Skin starts above the hair box and extends past its bottom-right corner.
fn skin_extends_past_bottom_right(skin: &BoundingBox, hair: &BoundingBox) -> bool {
    skin.x >= hair.x
        && skin.y < hair.y
        && skin.right() > hair.right()
        && skin.bottom() > hair.bottom()
}

/// Skin starts left of the hair box but at or below its top edge.
fn skin_overlaps_hair_top_edge(skin: &BoundingBox, hair: &BoundingBox) -> bool {
    skin.x < hair.x && skin.y >= hair.y && skin.bottom() > hair.y
}

/// First rule under which `skin` pairs with `hair`, if any.
pub fn match_rule(skin: &BoundingBox, hair: &BoundingBox) -> Option<MatchRule> {
    if skin_contains_hair_vertically(skin, hair) {
        Some(MatchRule::SkinContainsHairVertically)
    } else if skin_nested_in_hair(skin, hair) {
        Some(MatchRule::SkinNestedInHair)
    } else if skin_extends_past_bottom_right(skin, hair) {
        Some(MatchRule::SkinExtendsPastBottomRight)
    } else if skin_overlaps_hair_top_edge(skin, hair) {
        Some(MatchRule::SkinOverlapsHairTopEdge)
    } else {
        None
    }
}

/// Greedy first-fit pairing of skin boxes with hair boxes.
///
/// Skin boxes are visited in order; each takes the first hair box (in list
/// order) that has not been consumed yet and satisfies any rule. A consumed
/// hair box is unavailable to later skin boxes. Unpaired skin boxes are
/// dropped. Cost is `O(skin.len() * hair.len())`.
pub fn pair_regions(skin_boxes: &[BoundingBox], hair_boxes: &[BoundingBox]) -> Vec<FaceMatch> {
    let mut consumed = vec![false; hair_boxes.len()];
    let mut matches = Vec::new();

    for (skin_index, skin) in skin_boxes.iter().enumerate() {
        let found = hair_boxes
            .iter()
            .enumerate()
            .filter(|(hair_index, _)| !consumed[*hair_index])
            .find_map(|(hair_index, hair)| match_rule(skin, hair).map(|rule| (hair_index, rule)));

        if let Some((hair_index, rule)) = found {
            consumed[hair_index] = true;
            matches.push(FaceMatch {
                skin_index,
                hair_index,
                rule,
                face: *skin,
            });
        }
    }

    matches
}

/// Face boxes (copies of the paired skin boxes) in skin order.
pub fn match_faces(skin_boxes: &[BoundingBox], hair_boxes: &[BoundingBox]) -> Vec<BoundingBox> {
    pair_regions(skin_boxes, hair_boxes)
        .into_iter()
        .map(|m| m.face)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn bbox(x: i32, y: i32, w: i32, h: i32) -> BoundingBox {
        BoundingBox::new(x, y, w, h)
    }

    // ── Individual rules ─────────────────────────────────────────────

    #[rstest]
    #[case::contains_vertically(bbox(5, 5, 4, 6), bbox(3, 2, 6, 4), MatchRule::SkinContainsHairVertically)]
    #[case::same_box(bbox(3, 3, 4, 4), bbox(3, 3, 4, 4), MatchRule::SkinContainsHairVertically)]
    #[case::nested(bbox(5, 5, 2, 2), bbox(3, 3, 6, 10), MatchRule::SkinNestedInHair)]
    #[case::past_bottom_right(bbox(5, 2, 10, 10), bbox(4, 5, 3, 3), MatchRule::SkinExtendsPastBottomRight)]
    #[case::top_edge(bbox(1, 5, 3, 3), bbox(4, 2, 5, 5), MatchRule::SkinOverlapsHairTopEdge)]
    fn test_rule_selected(
        #[case] skin: BoundingBox,
        #[case] hair: BoundingBox,
        #[case] expected: MatchRule,
    ) {
        assert_eq!(match_rule(&skin, &hair), Some(expected));
    }

    #[rstest]
    #[case::skin_above_left(bbox(0, 0, 2, 2), bbox(5, 5, 2, 2))]
    #[case::skin_above_not_past(bbox(5, 2, 2, 2), bbox(4, 5, 5, 5))]
    #[case::skin_above_past_right_only(bbox(5, 2, 10, 2), bbox(4, 5, 3, 3))]
    #[case::skin_left_and_above(bbox(0, 1, 3, 10), bbox(4, 2, 5, 5))]
    fn test_no_rule(#[case] skin: BoundingBox, #[case] hair: BoundingBox) {
        assert_eq!(match_rule(&skin, &hair), None);
    }

    #[test]
    fn test_contains_takes_precedence_over_nested() {
        // Satisfies both rule 1 and rule 2.
        let skin = bbox(4, 4, 2, 10);
        let hair = bbox(3, 3, 5, 5);
        assert!(skin_nested_in_hair(&skin, &hair));
        assert_eq!(
            match_rule(&skin, &hair),
            Some(MatchRule::SkinContainsHairVertically)
        );
    }

    #[test]
    fn test_top_edge_rule_only() {
        let skin = bbox(1, 5, 3, 3);
        let hair = bbox(4, 2, 5, 5);
        assert!(!skin_contains_hair_vertically(&skin, &hair));
        assert!(!skin_nested_in_hair(&skin, &hair));
        assert!(!skin_extends_past_bottom_right(&skin, &hair));
        assert!(skin_overlaps_hair_top_edge(&skin, &hair));
    }

    // ── Pairing ──────────────────────────────────────────────────────

    #[test]
    fn test_empty_inputs() {
        assert!(match_faces(&[], &[]).is_empty());
        assert!(match_faces(&[bbox(0, 0, 5, 5)], &[]).is_empty());
        assert!(match_faces(&[], &[bbox(0, 0, 5, 5)]).is_empty());
    }

    #[test]
    fn test_face_is_copy_of_skin_box() {
        let skin = bbox(5, 5, 4, 6);
        let faces = match_faces(&[skin], &[bbox(3, 2, 6, 4)]);
        assert_eq!(faces, vec![skin]);
    }

    #[test]
    fn test_consumed_hair_unavailable_to_later_skin() {
        let hair = vec![bbox(3, 2, 6, 4)];
        let skins = vec![bbox(5, 5, 4, 6), bbox(4, 6, 3, 3)];
        let matches = pair_regions(&skins, &hair);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].skin_index, 0);
        assert_eq!(matches[0].hair_index, 0);
    }

    #[test]
    fn test_second_skin_takes_next_free_hair() {
        let hair = vec![bbox(3, 2, 6, 4), bbox(20, 2, 6, 4)];
        let skins = vec![bbox(5, 5, 4, 6), bbox(4, 6, 3, 3)];
        let matches = pair_regions(&skins, &hair);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[1].skin_index, 1);
        // bbox(4,6,..) is left of hair[1] and below its top: top-edge rule.
        assert_eq!(matches[1].hair_index, 1);
        assert_eq!(matches[1].rule, MatchRule::SkinOverlapsHairTopEdge);
    }

    #[test]
    fn test_first_eligible_hair_in_list_order_wins() {
        let skin = vec![bbox(10, 10, 4, 4)];
        let hair = vec![bbox(50, 50, 2, 2), bbox(8, 8, 2, 2), bbox(9, 9, 2, 2)];
        let matches = pair_regions(&skin, &hair);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].hair_index, 1);
    }

    #[test]
    fn test_unmatched_skin_is_dropped_without_consuming() {
        let skins = vec![bbox(0, 0, 2, 2), bbox(5, 5, 4, 6)];
        let hair = vec![bbox(3, 2, 6, 4)];
        let matches = pair_regions(&skins, &hair);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].skin_index, 1);
        assert_eq!(matches[0].face, bbox(5, 5, 4, 6));
    }

    #[test]
    fn test_greedy_not_optimal() {
        // Skin 0 could use either hair box but grabs hair 0; skin 1 only fits
        // hair 0 and so goes unmatched.
        let skins = vec![bbox(10, 10, 4, 4), bbox(2, 2, 1, 1)];
        let hair = vec![bbox(1, 1, 2, 2), bbox(9, 9, 2, 2)];
        assert_eq!(match_rule(&skins[1], &hair[1]), None);
        let matches = pair_regions(&skins, &hair);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].hair_index, 0);
    }

    #[test]
    fn test_pairing_is_deterministic() {
        let skins = vec![bbox(5, 5, 4, 6), bbox(4, 6, 3, 3), bbox(30, 30, 5, 5)];
        let hair = vec![bbox(3, 2, 6, 4), bbox(20, 2, 6, 4), bbox(28, 28, 3, 3)];
        assert_eq!(pair_regions(&skins, &hair), pair_regions(&skins, &hair));
    }
}
