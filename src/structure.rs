//! Embedding context of document links.
//!
//! Pure inspection of the link's immediate container and ancestor chain.

use crate::dom::ElementNode;
use crate::patterns::ICON_TAGS;
use crate::result::StructuralProfile;

/// Profile the immediate container of `link`.
///
/// A link without a parent element gets an all-false profile with a sibling
/// count of zero.
#[must_use]
pub fn profile_link<N: ElementNode>(link: &N) -> StructuralProfile {
    let Some(container) = link.parent_element() else {
        return StructuralProfile::default();
    };

    StructuralProfile {
        has_image: container.has_descendant_named(&["img"]),
        has_icon: container.has_descendant_named(ICON_TAGS),
        in_list: link.has_ancestor_named(&["li"]),
        in_table: link.has_ancestor_named(&["table"]),
        siblings_count: container.child_nodes().len(),
    }
}

/// Tag name and class tokens of the link's container.
#[must_use]
pub fn container_of<N: ElementNode>(link: &N) -> (String, Vec<String>) {
    link.parent_element()
        .map(|parent| (parent.element_name().unwrap_or_default(), parent.class_list()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{self, NodeRef};

    fn link<'a>(doc: &'a dom::Document) -> NodeRef<'a> {
        doc.select("a").nodes()[0]
    }

    #[test]
    fn list_item_container() {
        let doc = dom::parse(r#"<ul><li class="item pdf"><a href="/r.pdf">2023年 統合報告書</a></li></ul>"#);
        let profile = profile_link(&link(&doc));
        assert!(profile.in_list);
        assert!(!profile.in_table);
        assert!(!profile.has_image);
        assert!(!profile.has_icon);
        assert_eq!(profile.siblings_count, 1);
        assert_eq!(container_of(&link(&doc)), ("li".to_string(), vec!["item".to_string(), "pdf".to_string()]));
    }

    #[test]
    fn table_cell_with_icon_and_image() {
        let doc = dom::parse(
            r#"<table><tr><td><img src="cover.jpg"><a href="/r.pdf"><i class="icon-pdf"></i>PDF</a> (3MB)</td></tr></table>"#,
        );
        let profile = profile_link(&link(&doc));
        assert!(profile.in_table);
        assert!(!profile.in_list);
        assert!(profile.has_image);
        assert!(profile.has_icon);
        // img, a, and the trailing text node
        assert_eq!(profile.siblings_count, 3);
    }

    #[test]
    fn inline_svg_counts_as_icon() {
        let doc = dom::parse(r#"<div><p><a href="/r.pdf"><svg></svg>Report</a></p></div>"#);
        let profile = profile_link(&link(&doc));
        assert!(profile.has_icon);
        assert!(!profile.has_image);
        assert_eq!(container_of(&link(&doc)).0, "p");
    }

    #[test]
    fn container_without_classes() {
        let doc = dom::parse(r#"<div><a href="/r.pdf">r</a></div>"#);
        let (tag, classes) = container_of(&link(&doc));
        assert_eq!(tag, "div");
        assert!(classes.is_empty());
    }
}
