//! Card records and the collection built from content descriptors.
//!
//! A [`Card`] is one project's unit in the carousel.  Cards are created once
//! from the descriptor array and never reordered, resized or mutated; the
//! controller only borrows them for layout.

use serde::Deserialize;

// ───────────────────────────────────────── sections ──────────

/// What a detail section renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Title,
    Text,
    Image,
}

/// One block of a card's back face.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DetailSection {
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub value: String,
}

impl DetailSection {
    pub fn new(kind: SectionKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

// ───────────────────────────────────────── descriptors ───────

/// Input shape of a single project, as it appears in the descriptor file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptor {
    pub title: String,
    pub tag: String,
    pub time: String,
    pub preview_img: String,
    #[serde(default)]
    pub sections: Vec<DetailSection>,
}

// ───────────────────────────────────────── cards ─────────────

/// Index of a card; always equal to its position in the collection.
pub type CardId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    pub tag: String,
    pub time_span: String,
    /// URL or local path of the front-face preview.
    pub preview_image_ref: String,
    pub detail_sections: Vec<DetailSection>,
}

/// Ordered, immutable sequence of cards.
#[derive(Debug, Clone, Default)]
pub struct CardCollection {
    cards: Vec<Card>,
}

impl CardCollection {
    /// One card per descriptor, `id` = position.  Input is trusted as-is.
    pub fn build(descriptors: impl IntoIterator<Item = ProjectDescriptor>) -> Self {
        let cards = descriptors
            .into_iter()
            .enumerate()
            .map(|(id, d)| Card {
                id,
                title: d.title,
                tag: d.tag,
                time_span: d.time,
                preview_image_ref: d.preview_img,
                detail_sections: d.sections,
            })
            .collect();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }
}

impl<'a> IntoIterator for &'a CardCollection {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(title: &str) -> ProjectDescriptor {
        ProjectDescriptor {
            title: title.into(),
            tag: "Tag".into(),
            time: "2024".into(),
            preview_img: "preview.png".into(),
            sections: vec![DetailSection::new(SectionKind::Text, "body")],
        }
    }

    #[test]
    fn ids_follow_descriptor_order() {
        let cards = CardCollection::build(["a", "b", "c"].map(descriptor));
        assert_eq!(cards.len(), 3);
        for (pos, card) in cards.iter().enumerate() {
            assert_eq!(card.id, pos);
        }
        assert_eq!(cards.get(1).map(|c| c.title.as_str()), Some("b"));
        assert!(cards.get(3).is_none());
    }

    #[test]
    fn descriptor_fields_map_onto_card() {
        let cards = CardCollection::build([descriptor("only")]);
        let card = cards.get(0).unwrap();
        assert_eq!(card.time_span, "2024");
        assert_eq!(card.preview_image_ref, "preview.png");
        assert_eq!(card.detail_sections.len(), 1);
        assert_eq!(card.detail_sections[0].kind, SectionKind::Text);
    }

    #[test]
    fn empty_input_builds_empty_collection() {
        let cards = CardCollection::build(Vec::new());
        assert!(cards.is_empty());
    }
}
